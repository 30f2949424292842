//! Reveal Pacer: one-shot timer driving paced playback.
//!
//! Paced reveal runs one character at a time with a delay in between.
//! Instead of a free-running ticker the pacer holds at most one pending
//! deadline, built on `crossbeam_channel::after`, so the main loop can
//! wait on it with `select!` next to the input channel. Rescheduling or
//! cancelling drops the old channel, so a stale deadline never fires.

use crossbeam_channel::{after, never, Receiver};
use std::time::{Duration, Instant};
use tracing::trace;

/// Single pending reveal deadline.
#[derive(Debug)]
pub struct RevealPacer {
    /// Fires once at the deadline, or never when idle.
    tick_rx: Receiver<Instant>,
    /// Whether a deadline is pending.
    armed: bool,
    /// Bumped on every schedule and cancel.
    generation: u64,
}

impl Default for RevealPacer {
    fn default() -> Self {
        Self::new()
    }
}

impl RevealPacer {
    /// Create an idle pacer.
    pub fn new() -> Self {
        Self {
            tick_rx: never(),
            armed: false,
            generation: 0,
        }
    }

    /// Schedule the next reveal step after `delay`, replacing any
    /// pending one.
    pub fn schedule(&mut self, delay: Duration) {
        self.tick_rx = after(delay);
        self.armed = true;
        self.generation += 1;
        trace!(delay_ms = delay.as_millis(), "Reveal step scheduled");
    }

    /// Drop the pending deadline, if any.
    pub fn cancel(&mut self) {
        if self.armed {
            trace!("Reveal step cancelled");
        }
        self.tick_rx = never();
        self.armed = false;
        self.generation += 1;
    }

    /// Mark the pending deadline as consumed.
    ///
    /// Call after receiving from [`receiver`](Self::receiver).
    pub fn fired(&mut self) {
        self.tick_rx = never();
        self.armed = false;
    }

    /// Channel to wait on.
    ///
    /// Clone it before a `select!` when the arm needs `&mut self`.
    #[inline]
    pub const fn receiver(&self) -> &Receiver<Instant> {
        &self.tick_rx
    }

    /// Check whether a deadline is pending.
    #[inline]
    pub const fn is_armed(&self) -> bool {
        self.armed
    }

    /// Current generation; changes whenever the deadline is replaced.
    #[inline]
    pub const fn generation(&self) -> u64 {
        self.generation
    }
}
