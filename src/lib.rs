// Module declarations in dependency order
pub mod utils;
pub mod core;
pub mod processing;
pub mod export;
pub mod commands;

// Public exports for external consumers
pub use crate::core::{
    AppState, Batch, BatchSummary, CancelFlag, Dimensions, ExportedFile, ImageTask, InputFile,
    Progress, ProgressType, TaskId, TaskStatus,
};
pub use export::{export_all, export_all_at, export_single};
pub use processing::{intake, render_placeholder, ProcessorConfig, SequentialProcessor};
pub use utils::{PlaceholderError, PlaceholderResult};
pub use commands::*;
