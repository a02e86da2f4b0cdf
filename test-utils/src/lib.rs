//! Table Planner Test Utils
//!
//! Provides shared testing utilities for the table planner. Tests get an
//! isolated temporary data directory, optionally seeded with table documents
//! and a settings file, plus factories for table records and Serenity models.
//!
//! # Overview
//!
//! The test utilities consist of four main components:
//! - **TestBuilder**: Fluent builder for seeding a data directory
//! - **TestContext**: The seeded directory and helpers to inspect it
//! - **factory**: Builders for `TableRecord` values with sensible defaults
//! - **serenity**: Serenity model objects deserialized from JSON
//!
//! # Usage
//!
//! ```rust,ignore
//! use test_utils::{builder::TestBuilder, factory};
//!
//! #[tokio::test]
//! async fn test_load() -> Result<(), TestError> {
//!     let (id, record) = factory::table::create_table_record();
//!     let test = TestBuilder::new()
//!         .with_active(id, record)
//!         .build()?;
//!
//!     let repo = TableRepository::new(test.path());
//!     // Perform operations...
//!
//!     Ok(())
//! }
//! ```

pub mod builder;
pub mod context;
pub mod error;
pub mod factory;
pub mod serenity;
