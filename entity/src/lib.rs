//! Persisted record types for the table planner.
//!
//! These structs describe the exact JSON shape written to `tables_active.json`
//! and `tables_archived.json`. Discord snowflakes are stored as strings so that
//! the documents stay readable by tools that parse numbers as doubles.

pub mod prelude;
pub mod table;
