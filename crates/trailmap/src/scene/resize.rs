//! Coalescing of container resize notifications.

use log::trace;

/// Collects resize notifications between frames.
///
/// Only the most recent width survives. A pending width is released after
/// `settle_frames` consecutive frames without a new notification; with the
/// default of zero it is released on the very next frame.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct ResizeCoalescer {
    pending: Option<f32>,
    quiet_frames: u32,
    settle_frames: u32,
    coalesced: u64,
}

impl ResizeCoalescer {
    pub fn new(settle_frames: u32) -> Self {
        Self {
            settle_frames,
            ..Self::default()
        }
    }

    /// Record a new container width. Non-finite and negative widths are
    /// ignored.
    pub fn push(&mut self, width: f32) {
        if !width.is_finite() || width < 0.0 {
            trace!(width; "Ignoring invalid resize");
            return;
        }
        if self.pending.replace(width).is_some() {
            self.coalesced += 1;
        }
        self.quiet_frames = 0;
    }

    /// Called once per frame. Returns the width to apply, if one has settled.
    pub fn flush(&mut self) -> Option<f32> {
        self.pending?;
        if self.quiet_frames < self.settle_frames {
            self.quiet_frames += 1;
            return None;
        }
        self.quiet_frames = 0;
        self.pending.take()
    }

    /// Drop any pending width.
    pub fn clear(&mut self) {
        self.pending = None;
        self.quiet_frames = 0;
    }

    pub fn pending(&self) -> Option<f32> {
        self.pending
    }

    pub fn settle_frames(&self) -> u32 {
        self.settle_frames
    }

    /// Notifications replaced by a later one before being applied.
    pub fn coalesced(&self) -> u64 {
        self.coalesced
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_last_write_wins() {
        let mut coalescer = ResizeCoalescer::new(0);
        for width in [300.0, 500.0, 420.0] {
            coalescer.push(width);
        }
        assert_eq!(coalescer.flush(), Some(420.0));
        assert_eq!(coalescer.flush(), None);
        assert_eq!(coalescer.coalesced(), 2);
    }

    #[test]
    fn test_settle_frames_delay_release() {
        let mut coalescer = ResizeCoalescer::new(2);
        coalescer.push(640.0);
        assert_eq!(coalescer.flush(), None);
        assert_eq!(coalescer.flush(), None);
        assert_eq!(coalescer.flush(), Some(640.0));
    }

    #[test]
    fn test_new_width_restarts_settling() {
        let mut coalescer = ResizeCoalescer::new(1);
        coalescer.push(640.0);
        assert_eq!(coalescer.flush(), None);
        coalescer.push(700.0);
        assert_eq!(coalescer.flush(), None);
        assert_eq!(coalescer.flush(), Some(700.0));
    }

    #[test]
    fn test_invalid_widths_ignored() {
        let mut coalescer = ResizeCoalescer::default();
        coalescer.push(f32::NAN);
        coalescer.push(-5.0);
        coalescer.push(f32::INFINITY);
        assert_eq!(coalescer.pending(), None);
        assert_eq!(coalescer.flush(), None);
    }

    #[test]
    fn test_clear_drops_pending() {
        let mut coalescer = ResizeCoalescer::default();
        coalescer.push(800.0);
        coalescer.clear();
        assert_eq!(coalescer.flush(), None);
    }
}
