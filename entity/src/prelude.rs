pub use super::table::{ArchiveReason, TableRecord, TableStatus, TablesDocument};
