//! Background Tasks Module
//!
//! Contains background tasks that run periodically during server operation.
//!
//! # Tasks
//! - Autosave: Writes the store to the data file at configured intervals

mod autosave;

pub use autosave::spawn_autosave_task;
