//! Background conversion
//!
//! Runs a conversion on its own thread so a caller (an interactive front
//! end, for instance) stays responsive. The result comes back over a
//! channel; there is no cancellation.

use std::path::PathBuf;
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;

use tracing::{debug, error};

use crate::voxel_pipeline::common::error::Result;
use crate::voxel_pipeline::conversions::{ConversionReport, ImageToVoxelPipeline};
use crate::voxel_pipeline::output::ConversionConfig;

/// Receiving end of a background conversion.
pub struct ConversionHandle {
    receiver: Receiver<Result<ConversionReport>>,
}

impl ConversionHandle {
    /// Blocks until the conversion finishes.
    ///
    /// Returns `None` only if the worker thread died without reporting.
    pub fn wait(self) -> Option<Result<ConversionReport>> {
        self.receiver.recv().ok()
    }

    /// Non-blocking poll. `None` while the conversion is still running.
    pub fn try_result(&self) -> Option<Result<ConversionReport>> {
        match self.receiver.try_recv() {
            Ok(result) => Some(result),
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => {
                error!("Conversion worker exited without a result");
                None
            }
        }
    }
}

/// Converts `input` on a new thread with its own pipeline instance.
pub fn spawn_conversion(input: PathBuf, config: ConversionConfig) -> ConversionHandle {
    let (sender, receiver) = mpsc::channel();

    thread::spawn(move || {
        debug!(input = %input.display(), "Conversion worker started");
        let result = ImageToVoxelPipeline::new(config).convert_file(&input);
        // The caller may have dropped the handle; nothing to report then.
        let _ = sender.send(result);
    });

    ConversionHandle { receiver }
}
