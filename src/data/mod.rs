//! File-backed persistence layer.
//!
//! Repositories here own the on-disk representation. They read and write the
//! record types from the `entity` crate and hand domain models from `model`
//! to the service layer. All blocking file I/O runs on tokio's blocking pool.

pub mod settings;
pub mod table;

#[cfg(test)]
mod test;
