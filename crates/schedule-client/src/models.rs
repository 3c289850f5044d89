//! Request and response bodies of the admin API that have no counterpart in
//! `slot-engine`.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use slot_engine::clock::{format_calendar_date, ClockTime};
use slot_engine::Slot;

/// One entry of the per-date slot listing: `{time, length, available}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotDto {
    pub time: ClockTime,
    pub length: u32,
    pub available: bool,
}

impl SlotDto {
    /// Attach the date the listing was requested for.
    pub fn into_slot(self, date: NaiveDate) -> Slot {
        Slot {
            date,
            start: self.time,
            length_minutes: self.length,
            available: self.available,
        }
    }
}

impl From<&Slot> for SlotDto {
    fn from(slot: &Slot) -> Self {
        Self {
            time: slot.start,
            length: slot.length_minutes,
            available: slot.available,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct CreatedResponse {
    pub created: Option<u32>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct SavedResponse {
    pub id: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ApiErrorBody {
    pub message: Option<String>,
}

/// Status filter value that means "no filter".
pub const STATUS_ALL: &str = "ALL";

/// Filters for the appointment list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppointmentQuery {
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
    /// Free-text search; blank is ignored.
    pub q: Option<String>,
    /// Status filter; `None` and `"ALL"` are not sent.
    pub status: Option<String>,
}

impl AppointmentQuery {
    /// Query-string pairs in the order the API documents them.
    pub fn params(&self) -> Vec<(&'static str, String)> {
        let mut params = Vec::new();
        if let Some(from) = self.from {
            params.push(("from", format_calendar_date(from)));
        }
        if let Some(to) = self.to {
            params.push(("to", format_calendar_date(to)));
        }
        if let Some(q) = self.q.as_deref().map(str::trim).filter(|q| !q.is_empty()) {
            params.push(("q", q.to_string()));
        }
        if let Some(status) = self.status.as_deref().filter(|s| *s != STATUS_ALL) {
            params.push(("status", status.to_string()));
        }
        params
    }
}

/// An appointment as listed by the admin API.
///
/// Only `id` is interpreted; the remaining fields are kept as-is for display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Appointment {
    pub id: String,
    #[serde(flatten)]
    pub details: serde_json::Map<String, serde_json::Value>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CancelRequest<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<&'a str>,
    pub notify_patient: bool,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RescheduleRequest<'a> {
    pub new_date: NaiveDate,
    pub new_time: ClockTime,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<&'a str>,
    pub notify_patient: bool,
}
