//! Command handlers for the host.
//!
//! This module exposes the operations a front end drives:
//! - [`upload_images`]: Start a new batch from submitted files
//! - [`process_images`]: Generate placeholders for the current batch
//! - [`download_placeholder`] / [`download_all`]: Export results
//! - [`reset`]: Discard the current batch

mod image;

pub use image::*;
