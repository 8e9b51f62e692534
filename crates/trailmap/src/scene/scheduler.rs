//! Frame loop registry.

use std::{cell::RefCell, rc::Rc};

use indexmap::IndexMap;
use log::{debug, trace, warn};

/// Milliseconds per frame at 60 Hz.
pub const FRAME_MS: f32 = 1000.0 / 60.0;

/// Timing of one scheduled frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frame {
    index: u64,
    dt: f32,
    elapsed_ms: f32,
}

impl Frame {
    pub fn new(index: u64, dt: f32, elapsed_ms: f32) -> Self {
        Self {
            index,
            dt,
            elapsed_ms,
        }
    }

    /// Number of frames scheduled before this one
    pub fn index(&self) -> u64 {
        self.index
    }

    /// Frames elapsed since the previous frame; `1.0` is one 60 Hz frame
    pub fn dt(&self) -> f32 {
        self.dt
    }

    /// Milliseconds elapsed since the scheduler started, including this frame
    pub fn elapsed_ms(&self) -> f32 {
        self.elapsed_ms
    }
}

/// Work run once per frame.
pub trait FrameCallback {
    fn on_frame(&mut self, frame: &Frame);
}

/// Handle of a registered frame loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LoopHandle(u64);

impl LoopHandle {
    pub fn id(self) -> u64 {
        self.0
    }
}

/// Runs registered frame callbacks in registration order.
#[derive(Default)]
pub struct FrameScheduler {
    loops: IndexMap<LoopHandle, Rc<RefCell<dyn FrameCallback>>>,
    next_handle: u64,
    frames: u64,
    elapsed_ms: f32,
}

impl FrameScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `callback` to run on every frame until cancelled.
    pub fn request_loop(&mut self, callback: Rc<RefCell<dyn FrameCallback>>) -> LoopHandle {
        let handle = LoopHandle(self.next_handle);
        self.next_handle += 1;
        self.loops.insert(handle, callback);
        debug!(handle = handle.id(), active = self.loops.len(); "Frame loop requested");
        handle
    }

    /// Stop running the loop behind `handle`. Returns false if it was not
    /// active.
    pub fn cancel(&mut self, handle: LoopHandle) -> bool {
        let removed = self.loops.shift_remove(&handle).is_some();
        if removed {
            debug!(handle = handle.id(), active = self.loops.len(); "Frame loop cancelled");
        }
        removed
    }

    /// Cancel every loop.
    pub fn cancel_all(&mut self) {
        if !self.loops.is_empty() {
            debug!(cancelled = self.loops.len(); "Cancelling all frame loops");
        }
        self.loops.clear();
    }

    pub fn is_active(&self, handle: LoopHandle) -> bool {
        self.loops.contains_key(&handle)
    }

    pub fn active_loops(&self) -> usize {
        self.loops.len()
    }

    /// Frames scheduled so far.
    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn elapsed_ms(&self) -> f32 {
        self.elapsed_ms
    }

    /// Schedule one frame of `dt` frames and run every active loop.
    ///
    /// A non-finite or negative `dt` is treated as zero.
    pub fn advance(&mut self, dt: f32) -> Frame {
        let dt = if dt.is_finite() { dt.max(0.0) } else { 0.0 };
        self.elapsed_ms += dt * FRAME_MS;
        let frame = Frame::new(self.frames, dt, self.elapsed_ms);
        self.frames += 1;

        for (handle, callback) in &self.loops {
            match callback.try_borrow_mut() {
                Ok(mut callback) => callback.on_frame(&frame),
                Err(_) => warn!(handle = handle.id(); "Frame loop busy, skipping frame"),
            }
        }
        trace!(index = frame.index(), loops = self.loops.len(); "Frame advanced");
        frame
    }
}
