pub mod dashboard;
pub mod database;
pub mod error;

pub use dashboard::{DashboardSummary, WeeklyCount};
pub use database::{Database, DEFAULT_REFLECTION_LIMIT, MAX_ACTIVE_FIELDS};
pub use error::{Result, StoreError};
