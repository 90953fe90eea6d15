//! Drawing surface abstraction

use std::sync::Arc;

use parking_lot::Mutex;

use crate::render::{PlotFrame, RenderError, RenderResult};

/// Where finished frames are flushed to
pub trait PlotSurface: Send {
    /// Display `frame`, replacing whatever was shown before
    fn present(&mut self, frame: &PlotFrame) -> RenderResult<()>;
}

/// Surface that keeps every presented frame in memory.
///
/// Useful for headless runs and tests. Clones share the same history.
#[derive(Debug, Clone, Default)]
pub struct RecordingSurface {
    frames: Arc<Mutex<Vec<PlotFrame>>>,
    fail_after: Option<usize>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Accept `frames` presents, then fail every later one
    pub fn failing_after(frames: usize) -> Self {
        Self {
            frames: Arc::default(),
            fail_after: Some(frames),
        }
    }

    pub fn frames(&self) -> Vec<PlotFrame> {
        self.frames.lock().clone()
    }

    pub fn frame_count(&self) -> usize {
        self.frames.lock().len()
    }

    pub fn last_frame(&self) -> Option<PlotFrame> {
        self.frames.lock().last().cloned()
    }
}

impl PlotSurface for RecordingSurface {
    fn present(&mut self, frame: &PlotFrame) -> RenderResult<()> {
        let mut frames = self.frames.lock();

        if let Some(limit) = self.fail_after {
            if frames.len() >= limit {
                return Err(RenderError::SurfaceFailure {
                    details: format!("recording surface refused frame {}", frames.len() + 1),
                });
            }
        }

        frames.push(frame.clone());
        Ok(())
    }
}
