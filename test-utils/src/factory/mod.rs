//! Factory methods for creating test data.
//!
//! Factories produce `TableRecord` values with sensible defaults and unique
//! ids, reducing boilerplate in tests. Use the builder for custom values or the
//! `create_*` convenience function for defaults.
//!
//! ```rust,ignore
//! use test_utils::factory;
//!
//! let (id, record) = factory::table::TableRecordFactory::new()
//!     .max_players(2)
//!     .players(["11", "12"])
//!     .build();
//! ```

pub mod helpers;
pub mod table;

pub use table::create_table_record;
