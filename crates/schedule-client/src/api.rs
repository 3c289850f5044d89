//! Thin async wrappers around the admin API.
//!
//! Each method issues exactly one request. Failures are returned unchanged to the
//! caller: there is no retry and no request deduplication.

use std::time::Duration;

use chrono::NaiveDate;
use reqwest::{Client, Response, Url};
use serde::de::DeserializeOwned;
use slot_engine::clock::{format_calendar_date, ClockTime};
use slot_engine::{Exclusion, ExclusionBatch, Slot, WeekSchedule};
use tracing::{debug, info, warn};

use crate::config::ClientConfig;
use crate::error::{ClientError, Result};
use crate::models::{
    ApiErrorBody, Appointment, AppointmentQuery, CancelRequest, CreatedResponse,
    RescheduleRequest, SavedResponse, SlotDto,
};

const WEEK_SCHEDULES: &str = "week-schedules";
const EXCLUSIONS: &str = "exclusions";
const APPOINTMENTS: &str = "appointments";
const SLOTS: &str = "slots";

/// Client for the scheduling admin API.
#[derive(Debug, Clone)]
pub struct AdminApiClient {
    http: Client,
    base_url: Url,
}

impl AdminApiClient {
    /// Build a client for `config.base_url` with `config.timeout_secs` as the
    /// per-request timeout.
    ///
    /// # Errors
    /// Returns `ClientError::InvalidBaseUrl` if the base URL cannot carry a path,
    /// and `ClientError::Http` if the underlying client cannot be built.
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let base_url = Url::parse(&config.base_url)
            .ok()
            .filter(|u| !u.cannot_be_a_base())
            .ok_or_else(|| ClientError::InvalidBaseUrl(config.base_url.clone()))?;

        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self { http, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Append path segments to the base URL. Segments are percent-encoded, so
    /// opaque ids are safe to pass through.
    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    // ── exclusions ──────────────────────────────────────────────────────────

    /// `GET /week-schedules/exclusions?from&to`
    pub async fn list_exclusions(
        &self,
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
    ) -> Result<Vec<Exclusion>> {
        let mut query = Vec::new();
        if let Some(from) = from {
            query.push(("from", format_calendar_date(from)));
        }
        if let Some(to) = to {
            query.push(("to", format_calendar_date(to)));
        }

        let url = self.endpoint(&[WEEK_SCHEDULES, EXCLUSIONS]);
        debug!(%url, ?from, ?to, "listing exclusions");
        let response = self.http.get(url).query(&query).send().await?;
        let list: Vec<Exclusion> = read_json(response).await?;
        info!(count = list.len(), "loaded exclusions");
        Ok(list)
    }

    /// `POST /week-schedules/exclusions` with `{exclusions: [...]}`.
    ///
    /// Every entry is validated locally first; nothing is sent if one is
    /// malformed. Returns the created count when the API reports one.
    pub async fn create_exclusions(&self, batch: &ExclusionBatch) -> Result<Option<u32>> {
        for entry in &batch.exclusions {
            entry.validate()?;
        }

        let url = self.endpoint(&[WEEK_SCHEDULES, EXCLUSIONS]);
        debug!(%url, entries = batch.len(), "submitting exclusion batch");
        let response = self.http.post(url).json(batch).send().await?;
        let body = read_text(response).await?;
        if body.trim().is_empty() {
            return Ok(None);
        }
        let created: CreatedResponse = serde_json::from_str(&body)?;
        info!(created = ?created.created, "exclusion batch saved");
        Ok(created.created)
    }

    /// `DELETE /week-schedules/exclusions/{id}`
    pub async fn delete_exclusion(&self, id: &str) -> Result<()> {
        let url = self.endpoint(&[WEEK_SCHEDULES, EXCLUSIONS, id]);
        debug!(%url, "deleting exclusion");
        let response = self.http.delete(url).send().await?;
        check_status(response).await?;
        info!(id, "exclusion deleted");
        Ok(())
    }

    // ── slots ───────────────────────────────────────────────────────────────

    /// `GET /slots?date=yyyy-MM-dd`
    pub async fn slots_for(&self, date: NaiveDate) -> Result<Vec<Slot>> {
        let url = self.endpoint(&[SLOTS]);
        debug!(%url, %date, "loading slots");
        let response = self
            .http
            .get(url)
            .query(&[("date", format_calendar_date(date))])
            .send()
            .await?;
        let dtos: Vec<SlotDto> = read_json(response).await?;
        Ok(dtos.into_iter().map(|d| d.into_slot(date)).collect())
    }

    // ── week schedules ──────────────────────────────────────────────────────

    /// `GET /week-schedules`
    pub async fn list_week_schedules(&self) -> Result<Vec<WeekSchedule>> {
        let url = self.endpoint(&[WEEK_SCHEDULES]);
        debug!(%url, "listing week schedules");
        let response = self.http.get(url).send().await?;
        read_json(response).await
    }

    /// `POST /week-schedules`. Returns the id assigned by the API, if any.
    pub async fn save_week_schedule(&self, schedule: &WeekSchedule) -> Result<Option<String>> {
        let url = self.endpoint(&[WEEK_SCHEDULES]);
        debug!(%url, start_date = %schedule.start_date, "saving week schedule");
        let response = self.http.post(url).json(schedule).send().await?;
        let body = read_text(response).await?;
        if body.trim().is_empty() {
            return Ok(None);
        }
        let saved: SavedResponse = serde_json::from_str(&body)?;
        Ok(saved.id)
    }

    /// `DELETE /week-schedules/{startDate}`
    pub async fn delete_week_schedule(&self, start_date: NaiveDate) -> Result<()> {
        let key = format_calendar_date(start_date);
        let url = self.endpoint(&[WEEK_SCHEDULES, key.as_str()]);
        debug!(%url, "deleting week schedule");
        let response = self.http.delete(url).send().await?;
        check_status(response).await?;
        Ok(())
    }

    // ── appointments ────────────────────────────────────────────────────────

    /// `GET /appointments?from&to&q&status`
    pub async fn list_appointments(&self, query: &AppointmentQuery) -> Result<Vec<Appointment>> {
        let url = self.endpoint(&[APPOINTMENTS]);
        debug!(%url, ?query, "listing appointments");
        let response = self.http.get(url).query(&query.params()).send().await?;
        read_json(response).await
    }

    /// `POST /appointments/{id}/cancel`. Returns the API's text reply.
    pub async fn cancel_appointment(
        &self,
        id: &str,
        reason: Option<&str>,
        notify_patient: bool,
    ) -> Result<String> {
        let url = self.endpoint(&[APPOINTMENTS, id, "cancel"]);
        let body = CancelRequest {
            reason,
            notify_patient,
        };
        let response = self.http.post(url).json(&body).send().await?;
        let reply = read_text(response).await?;
        info!(id, "appointment cancelled");
        Ok(reply)
    }

    /// `POST /appointments/{id}/reschedule`. Returns the API's text reply.
    pub async fn reschedule_appointment(
        &self,
        id: &str,
        new_date: NaiveDate,
        new_time: ClockTime,
        reason: Option<&str>,
        notify_patient: bool,
    ) -> Result<String> {
        let url = self.endpoint(&[APPOINTMENTS, id, "reschedule"]);
        let body = RescheduleRequest {
            new_date,
            new_time,
            reason,
            notify_patient,
        };
        let response = self.http.post(url).json(&body).send().await?;
        let reply = read_text(response).await?;
        info!(id, %new_date, %new_time, "appointment rescheduled");
        Ok(reply)
    }

    /// `DELETE /appointments/{id}`. Returns the API's text reply.
    pub async fn delete_appointment(&self, id: &str) -> Result<String> {
        let url = self.endpoint(&[APPOINTMENTS, id]);
        let response = self.http.delete(url).send().await?;
        read_text(response).await
    }
}

/// Turn a non-success status into `ClientError::Status`, using the body's
/// `message` field when it has one.
async fn check_status(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ApiErrorBody>(&body)
        .ok()
        .and_then(|b| b.message)
        .unwrap_or_else(|| {
            if body.trim().is_empty() {
                status.canonical_reason().unwrap_or("request failed").to_string()
            } else {
                body.clone()
            }
        });

    warn!(status = status.as_u16(), %message, "admin API request failed");
    Err(ClientError::Status {
        status: status.as_u16(),
        message,
    })
}

async fn read_text(response: Response) -> Result<String> {
    Ok(check_status(response).await?.text().await?)
}

async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T> {
    let body = read_text(response).await?;
    Ok(serde_json::from_str(&body)?)
}
