//! # Classroll Core
//!
//! Foundational types shared by the Classroll API crates.
//!
//! - [`errors`]: Application error type with HTTP response conversion
//!
//! # Example
//!
//! ```ignore
//! use classroll_core::errors::AppError;
//!
//! let error = AppError::not_found(anyhow::anyhow!("User not found"));
//! ```

pub mod errors;

pub use errors::{AppError, ErrorResponse};
