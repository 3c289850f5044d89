//! Storage seams for the repository and the editing session.
//!
//! [`AdminApiClient`] implements both traits against the remote API; tests and
//! offline tools can substitute their own implementations.

use async_trait::async_trait;
use chrono::NaiveDate;
use slot_engine::{Exclusion, ExclusionBatch, Slot, WeekSchedule};

use crate::api::AdminApiClient;
use crate::error::Result;

/// Persistence for weekly availability templates.
///
/// Implementations must be `Send + Sync` to be shared across async tasks.
#[async_trait]
pub trait ScheduleStore: Send + Sync {
    async fn fetch_week_schedules(&self) -> Result<Vec<WeekSchedule>>;

    async fn store_week_schedule(&self, schedule: &WeekSchedule) -> Result<()>;

    async fn remove_week_schedule(&self, start_date: NaiveDate) -> Result<()>;
}

/// Persistence for exclusions, plus the per-date slot listing used to preview them.
#[async_trait]
pub trait ExclusionStore: Send + Sync {
    async fn fetch_exclusions(
        &self,
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
    ) -> Result<Vec<Exclusion>>;

    /// Submit a batch atomically. Returns the created count if the store reports one.
    async fn submit_batch(&self, batch: &ExclusionBatch) -> Result<Option<u32>>;

    async fn remove_exclusion(&self, id: &str) -> Result<()>;

    async fn fetch_slots(&self, date: NaiveDate) -> Result<Vec<Slot>>;
}

#[async_trait]
impl ScheduleStore for AdminApiClient {
    async fn fetch_week_schedules(&self) -> Result<Vec<WeekSchedule>> {
        self.list_week_schedules().await
    }

    async fn store_week_schedule(&self, schedule: &WeekSchedule) -> Result<()> {
        self.save_week_schedule(schedule).await.map(|_| ())
    }

    async fn remove_week_schedule(&self, start_date: NaiveDate) -> Result<()> {
        self.delete_week_schedule(start_date).await
    }
}

#[async_trait]
impl ExclusionStore for AdminApiClient {
    async fn fetch_exclusions(
        &self,
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
    ) -> Result<Vec<Exclusion>> {
        self.list_exclusions(from, to).await
    }

    async fn submit_batch(&self, batch: &ExclusionBatch) -> Result<Option<u32>> {
        self.create_exclusions(batch).await
    }

    async fn remove_exclusion(&self, id: &str) -> Result<()> {
        self.delete_exclusion(id).await
    }

    async fn fetch_slots(&self, date: NaiveDate) -> Result<Vec<Slot>> {
        self.slots_for(date).await
    }
}
