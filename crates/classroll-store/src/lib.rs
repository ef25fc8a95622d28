//! # Classroll Store
//!
//! Client-side state for the Classroll dashboard.
//!
//! - [`students::StudentStore`]: the student roster, its filtered view, and
//!   registration
//! - [`users::UserStore`]: the profile shown in the dashboard header
//! - [`api::RosterApi`]: the data-fetching seam both stores are built on
//! - [`http::HttpRosterApi`]: `RosterApi` over HTTP
//!
//! Views only ever observe `{data, is_loading, error}` snapshots: every
//! failure is turned into the store's `error` string, nothing is returned to
//! the caller.
//!
//! # Example
//!
//! ```ignore
//! use classroll_config::ApiClientConfig;
//! use classroll_store::{HttpRosterApi, StudentStore};
//! use std::sync::Arc;
//!
//! let api = Arc::new(HttpRosterApi::new(ApiClientConfig::from_env())?);
//! let students = StudentStore::new(api.clone());
//!
//! students.fetch_all().await;
//! students.reset_filter_by("2024", "");
//! students.narrow_by_search("al");
//! for student in &students.snapshot().filtered_students {
//!     println!("{}", student.name);
//! }
//! ```

pub mod api;
pub mod http;
pub mod state;
pub mod students;
pub mod users;

#[cfg(any(test, feature = "test-utils"))]
pub mod testing;

pub use api::{ApiError, RosterApi};
pub use http::HttpRosterApi;
pub use state::LoadPhase;
pub use students::{StudentState, StudentStore};
pub use users::{UserQuery, UserState, UserStore};
