//! Shake animation for groups that failed validation

use std::time::{Duration, Instant};

/// Transient horizontal shake of a field group
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShakeState {
    /// When the shake started
    pub started_at: Instant,
}

impl ShakeState {
    /// Total duration of the shake (matches a 400ms CSS keyframe)
    const DURATION: Duration = Duration::from_millis(400);
    /// Peak displacement in columns
    const AMPLITUDE: f32 = 2.0;
    /// Full left-right swings over the duration
    const SWINGS: f32 = 4.0;

    pub fn new() -> Self {
        Self {
            started_at: Instant::now(),
        }
    }

    pub fn is_finished(&self) -> bool {
        self.started_at.elapsed() >= Self::DURATION
    }

    /// Column offset at the current instant
    pub fn offset(&self) -> i16 {
        self.offset_at(self.started_at.elapsed())
    }

    /// Column offset after `elapsed`: a sine swing damped by cubic ease-out.
    pub fn offset_at(&self, elapsed: Duration) -> i16 {
        if elapsed >= Self::DURATION {
            return 0;
        }
        let progress = elapsed.as_secs_f32() / Self::DURATION.as_secs_f32();
        let damping = 1.0 - simple_easing::cubic_out(progress);
        let swing = (progress * Self::SWINGS * std::f32::consts::TAU).sin();
        (swing * damping * Self::AMPLITUDE).round() as i16
    }
}

impl Default for ShakeState {
    fn default() -> Self {
        Self::new()
    }
}
