// src/lib.rs
// Public library surface for integration tests (and potential reuse).

pub mod aggregate;
pub mod api;
pub mod metrics;

// ---- Re-exports for stable public API ----
pub use crate::aggregate::types::{JobProvider, JobQuery, JobSource, NormalizedJob};
pub use crate::aggregate::{days_ago, days_ago_from_unix, dedup_by_title_company, fetch_external_jobs, slugify};
pub use crate::api::{create_router, AppState};
