//! # schedule-client
//!
//! Async access to the scheduling admin API, plus the session-owned state built
//! on top of it.
//!
//! ## Modules
//!
//! - [`api`] — `AdminApiClient`, one method per API call
//! - [`store`] — `ScheduleStore` / `ExclusionStore` traits the state objects use
//! - [`repository`] — cached week schedules with load/upsert/remove/invalidate
//! - [`session`] — pending batch, listed exclusions, selection and slot preview
//! - [`config`] — `ClientConfig` loading (defaults, file, environment)
//! - [`models`] — wire bodies not covered by `slot-engine`
//! - [`error`] — Error types

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod repository;
pub mod session;
pub mod store;

pub use api::AdminApiClient;
pub use config::ClientConfig;
pub use error::ClientError;
pub use models::{Appointment, AppointmentQuery, SlotDto};
pub use repository::WeekScheduleRepository;
pub use session::ExclusionSession;
pub use store::{ExclusionStore, ScheduleStore};
