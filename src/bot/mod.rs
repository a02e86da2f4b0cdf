//! Discord gateway client and everything that talks to Discord.
//!
//! `handler` receives gateway events and routes interactions to `command`,
//! `component` and `modal`. Rendering lives in `ui`; helpers that send
//! replies, DMs and table message edits live in `respond` and `table_message`.

pub mod command;
pub mod component;
pub mod handler;
pub mod modal;
pub mod permission;
pub mod respond;
pub mod start;
pub mod table_message;
pub mod ui;
