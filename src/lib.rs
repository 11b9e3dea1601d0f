//! Mini Dictionary - A concurrent word/definition store
//!
//! Entries live in-process behind a single worker task or in a Redis hash,
//! and are reached over HTTP or an interactive prompt.

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod persistence;
pub mod repl;
pub mod store;
pub mod tasks;

pub use api::{create_router, AppState};
pub use config::Config;
pub use error::StoreError;
pub use repl::Repl;
pub use store::{Entry, EntryStore, LocalStore, Snapshot};
pub use tasks::spawn_autosave_task;
