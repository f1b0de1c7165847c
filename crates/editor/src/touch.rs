//! Per-frame touch snapshots.

use glam::Vec2;

/// Lifecycle phase of a single touch.
///
/// Phases form a monotonic per-touch sequence:
/// `Began -> {Moved | Stationary}* -> {Ended | Canceled}`. A touch is still
/// part of the frame's snapshot on the frame it ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TouchPhase {
    Began,
    Moved,
    Stationary,
    Ended,
    Canceled,
}

/// A single touch as observed this frame.
///
/// The touch source produces an ordered sequence of these once per frame
/// (order = touch start order). The editor core never mutates them.
#[derive(Debug, Clone, Copy)]
pub struct TouchSample {
    pub id: u64,
    pub screen_position: Vec2,
    pub phase: TouchPhase,
}

impl TouchSample {
    pub fn new(id: u64, screen_position: Vec2, phase: TouchPhase) -> Self {
        Self {
            id,
            screen_position,
            phase,
        }
    }
}
