//! Offset/color state machine behind the scrolling animation.
//!
//! The driver does not own a timer. Whoever owns it arms a scheduler task,
//! hands the token to [`AnimationDriver::arm`] and calls
//! [`AnimationDriver::advance`] each time the task fires. Keeping the token
//! here makes `stop` a single cancel of a known task.

use std::time::Duration;

use crate::scheduler::TaskToken;

/// Delay between two ticks (`1000 / 60` ms, truncated).
pub const FRAME_DURATION: Duration = Duration::from_millis(1000 / 60);

/// Offset gained per tick at speed 1.0.
pub const OFFSET_PER_FRAME: f32 = 0.01;

/// Whether a tick is pending.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DriverPhase {
    Stopped,
    /// Running with exactly one pending tick
    Running(TaskToken),
}

/// Outcome of one tick.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Tick {
    /// Offset after the tick
    pub offset: f32,
    /// The offset wrapped past `max_offset` during this tick
    pub new_turn: bool,
}

#[derive(Debug, Clone)]
pub struct AnimationDriver {
    phase: DriverPhase,
    offset: f32,
    max_offset: f32,
    color_index: usize,
    new_turn: bool,
}

impl AnimationDriver {
    /// A stopped driver for `sections_count` sections (must be > 0).
    pub fn new(sections_count: u32) -> Self {
        debug_assert!(sections_count > 0);
        Self {
            phase: DriverPhase::Stopped,
            offset: 0.0,
            max_offset: 1.0 / sections_count as f32,
            color_index: 0,
            new_turn: false,
        }
    }

    pub fn phase(&self) -> DriverPhase {
        self.phase
    }

    pub fn is_running(&self) -> bool {
        matches!(self.phase, DriverPhase::Running(_))
    }

    pub fn offset(&self) -> f32 {
        self.offset
    }

    pub fn max_offset(&self) -> f32 {
        self.max_offset
    }

    pub fn color_index(&self) -> usize {
        self.color_index
    }

    /// A turn happened and the next frame has not consumed it yet.
    pub fn has_pending_turn(&self) -> bool {
        self.new_turn
    }

    /// Record the pending tick. Replaces the previous token, which must
    /// already have fired or been cancelled.
    pub fn arm(&mut self, token: TaskToken) {
        self.phase = DriverPhase::Running(token);
    }

    /// Move to `Stopped`, returning the pending tick to cancel.
    pub fn disarm(&mut self) -> Option<TaskToken> {
        match std::mem::replace(&mut self.phase, DriverPhase::Stopped) {
            DriverPhase::Running(token) => Some(token),
            DriverPhase::Stopped => None,
        }
    }

    /// Advance the offset by one frame at `speed`.
    ///
    /// A single wrap is applied; a speed large enough to cross several
    /// sections in one tick leaves the offset above `max_offset` until the
    /// following ticks catch up.
    pub fn advance(&mut self, speed: f32) -> Tick {
        self.offset += OFFSET_PER_FRAME * speed;
        let mut new_turn = false;
        if self.offset >= self.max_offset {
            self.offset -= self.max_offset;
            self.new_turn = true;
            new_turn = true;
            log::trace!("animation turn, offset reset to {}", self.offset);
        }
        Tick {
            offset: self.offset,
            new_turn,
        }
    }

    /// Rescale for a new section count, keeping the phase within one section.
    pub fn set_sections_count(&mut self, sections_count: u32) {
        debug_assert!(sections_count > 0);
        self.max_offset = 1.0 / sections_count as f32;
        self.offset %= self.max_offset;
    }

    /// Jump to an explicit offset, wrapped into `[0, max_offset)`.
    /// Non-finite offsets are ignored.
    pub fn set_offset(&mut self, offset: f32) {
        if !offset.is_finite() {
            log::warn!("ignoring non-finite animation offset {}", offset);
            return;
        }
        self.offset = offset.rem_euclid(self.max_offset);
        // rem_euclid can round up to the divisor for tiny negative inputs
        if self.offset >= self.max_offset {
            self.offset = 0.0;
        }
    }

    /// Start the color sequence over; used when the palette is replaced.
    pub fn reset_color_index(&mut self) {
        self.color_index = 0;
    }

    /// Starting color index for the frame about to be drawn.
    ///
    /// A pending turn is consumed here: the start index steps back once so
    /// the section that just scrolled off the leading edge keeps its color.
    pub fn frame_start_color(&mut self, color_count: usize) -> usize {
        debug_assert!(color_count > 0);
        if self.color_index >= color_count {
            self.color_index = 0;
        }
        if self.new_turn {
            self.color_index = decrement_color(self.color_index, color_count);
            self.new_turn = false;
        }
        self.color_index
    }
}

/// Next color index, wrapping at `color_count`.
pub fn increment_color(index: usize, color_count: usize) -> usize {
    let next = index + 1;
    if next >= color_count {
        0
    } else {
        next
    }
}

/// Previous color index, wrapping to the last color.
pub fn decrement_color(index: usize, color_count: usize) -> usize {
    if index == 0 {
        color_count - 1
    } else {
        index - 1
    }
}
