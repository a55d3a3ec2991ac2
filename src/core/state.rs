//! Application state owned by the host.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::debug;
use crate::core::Batch;
use crate::processing::{ProcessorConfig, SequentialProcessor};

/// Cooperative cancellation flag, checked by the processor between tasks.
#[derive(Debug, Clone, Default)]
pub struct CancelFlag(Arc<AtomicBool>);

impl CancelFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }

    pub fn clear(&self) {
        self.0.store(false, Ordering::Relaxed);
    }
}

/// Application state: the current batch plus the processing configuration.
///
/// Commands borrow it mutably; there is exactly one batch at a time.
pub struct AppState {
    pub(crate) batch: Batch,
    config: ProcessorConfig,
    cancel: CancelFlag,
}

impl AppState {
    pub fn new(config: ProcessorConfig) -> Self {
        debug!("AppState initialized (completion delay: {:?})", config.completion_delay());
        Self {
            batch: Batch::empty(),
            config,
            cancel: CancelFlag::new(),
        }
    }

    pub fn batch(&self) -> &Batch {
        &self.batch
    }

    pub fn config(&self) -> &ProcessorConfig {
        &self.config
    }

    /// Handle that can stop the running batch after its current task.
    pub fn cancel_flag(&self) -> CancelFlag {
        self.cancel.clone()
    }

    /// Creates a processor bound to this state's configuration and cancel flag.
    pub fn create_processor(&self) -> SequentialProcessor {
        SequentialProcessor::new(self.config.clone(), self.cancel.clone())
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(ProcessorConfig::default())
    }
}
