//! Core application types and state management.
//!
//! This module contains the fundamental types used throughout the application:
//! - [`AppState`]: Host-owned state holding the current batch
//! - [`Batch`]: Ordered tasks of one upload plus overall progress
//! - [`ImageTask`]: One submitted image and its processing state
//! - [`Progress`]: Progress records reported during processing

mod batch;
mod progress;
mod state;
mod task;
mod types;

pub use batch::Batch;
pub use progress::{Progress, ProgressType};
pub use state::{AppState, CancelFlag};
pub use task::{ImageTask, TaskId, TaskStatus};
pub use types::{BatchSummary, Dimensions, ExportedFile, InputFile};
