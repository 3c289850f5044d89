//! Session-owned cache of week schedules.
//!
//! The first [`WeekScheduleRepository::load_all`] fetches every schedule from the
//! store; later calls serve the cache until [`WeekScheduleRepository::invalidate`].
//! Writes go to the store first and only touch the cache once the store accepts
//! them. The cache is kept sorted by start date.

use chrono::NaiveDate;
use slot_engine::schedule::{active_schedule, sort_by_start_date};
use slot_engine::WeekSchedule;
use tracing::{debug, info};

use crate::error::Result;
use crate::store::ScheduleStore;

pub struct WeekScheduleRepository<S> {
    store: S,
    cache: Option<Vec<WeekSchedule>>,
}

impl<S: ScheduleStore> WeekScheduleRepository<S> {
    pub fn new(store: S) -> Self {
        Self { store, cache: None }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn is_loaded(&self) -> bool {
        self.cache.is_some()
    }

    /// All schedules, sorted by start date. Fetches only if not yet loaded.
    pub async fn load_all(&mut self) -> Result<&[WeekSchedule]> {
        if self.cache.is_none() {
            let mut schedules = self.store.fetch_week_schedules().await?;
            sort_by_start_date(&mut schedules);
            info!(count = schedules.len(), "week schedules loaded");
            self.cache = Some(schedules);
        } else {
            debug!("serving week schedules from cache");
        }
        Ok(self.schedules())
    }

    /// Cached schedules; empty before the first load.
    pub fn schedules(&self) -> &[WeekSchedule] {
        self.cache.as_deref().unwrap_or(&[])
    }

    /// The cached schedule starting exactly on `start_date`.
    pub fn get_by_key(&self, start_date: NaiveDate) -> Option<&WeekSchedule> {
        self.schedules()
            .iter()
            .find(|s| s.start_date == start_date)
    }

    /// Save `schedule`, replacing any cached schedule with the same start date.
    ///
    /// If nothing has been loaded yet the cache stays empty, so the next
    /// [`load_all`](Self::load_all) still fetches the full list.
    pub async fn upsert(&mut self, schedule: WeekSchedule) -> Result<()> {
        self.store.store_week_schedule(&schedule).await?;
        info!(start_date = %schedule.start_date, "week schedule saved");

        if let Some(cache) = self.cache.as_mut() {
            cache.retain(|s| s.start_date != schedule.start_date);
            cache.push(schedule);
            sort_by_start_date(cache);
        }
        Ok(())
    }

    /// Delete the schedule starting on `start_date` and evict it from the cache.
    pub async fn remove(&mut self, start_date: NaiveDate) -> Result<()> {
        self.store.remove_week_schedule(start_date).await?;
        info!(%start_date, "week schedule deleted");

        if let Some(cache) = self.cache.as_mut() {
            cache.retain(|s| s.start_date != start_date);
        }
        Ok(())
    }

    /// Drop the cache; the next `load_all` refetches.
    pub fn invalidate(&mut self) {
        self.cache = None;
    }

    /// The cached schedule in force on `today`.
    pub fn active_on(&self, today: NaiveDate) -> Option<&WeekSchedule> {
        active_schedule(self.schedules(), today)
    }
}
