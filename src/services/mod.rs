// Service exports
pub mod cache;
pub mod reports;

pub use cache::{CacheError, CacheStats, SnapshotCache};
pub use reports::{ReportsClient, ReportsError};
