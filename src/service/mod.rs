//! Business logic between the Discord handlers and the data layer.
//!
//! - `table` - the in-memory table store with per-table locking and write-through persistence
//! - `rate_limit` - sliding-window limiters for slash commands
//! - `format` - fixed-width text rendering for table listings

pub mod format;
pub mod rate_limit;
pub mod table;

#[cfg(test)]
mod test;
