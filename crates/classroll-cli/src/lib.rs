//! # Classroll CLI
//!
//! Database seeding utilities for Classroll development and demos.
//!
//! Seeded rows are recognisable (course codes start with `SEED-`, emails end
//! in `@seed.classroll.dev`) so they can be removed without touching real
//! data.
//!
//! ## Usage
//!
//! ```ignore
//! use classroll_cli::seeder::{seed_all, SeedConfig};
//!
//! let config = SeedConfig::new(8).with_students(200);
//! seed_all(&pool, config).await?;
//! ```

pub mod seeder;
