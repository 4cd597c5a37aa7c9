// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Repeating auto-paging timer with explicit hold and resume.
//!
//! The timer never reads a clock. Hosts pass monotonic timestamps (any epoch)
//! to [`AutoPagingTimer::tick`]; arming the timer leaves the deadline unset
//! until the next tick anchors it one full interval later.
//!
//! ```
//! use core::time::Duration;
//! use understory_pager::{AutoPagingTimer, TimerState};
//!
//! let mut timer = AutoPagingTimer::new();
//! timer.schedule(Duration::from_secs(3));
//! assert!(!timer.tick(Duration::from_secs(10))); // anchors the deadline at 13s
//! assert!(timer.tick(Duration::from_secs(13)));  // fires and re-arms for 16s
//! assert_eq!(timer.deadline(), Some(Duration::from_secs(16)));
//!
//! timer.hold();
//! assert_eq!(timer.state(), TimerState::Held);
//! assert!(!timer.tick(Duration::from_secs(20)));
//! ```

use core::time::Duration;

/// Coarse state of an [`AutoPagingTimer`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerState {
    /// Not running.
    Idle,
    /// Running; fires once per interval.
    Scheduled,
    /// Paused by user interaction; remaining time is discarded.
    Held,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Idle,
    Scheduled { deadline: Option<Duration> },
    Held,
}

/// Single repeating timer driving automatic page advances.
#[derive(Debug, Clone)]
pub struct AutoPagingTimer {
    interval: Duration,
    phase: Phase,
}

impl Default for AutoPagingTimer {
    fn default() -> Self {
        Self::new()
    }
}

impl AutoPagingTimer {
    /// Creates an idle timer with a zero interval.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            interval: Duration::ZERO,
            phase: Phase::Idle,
        }
    }

    /// Returns the coarse timer state.
    #[must_use]
    pub const fn state(&self) -> TimerState {
        match self.phase {
            Phase::Idle => TimerState::Idle,
            Phase::Scheduled { .. } => TimerState::Scheduled,
            Phase::Held => TimerState::Held,
        }
    }

    /// Interval used by the last [`schedule`](Self::schedule) call.
    #[must_use]
    pub const fn interval(&self) -> Duration {
        self.interval
    }

    /// Time at which the timer fires next, once anchored by a tick.
    #[must_use]
    pub const fn deadline(&self) -> Option<Duration> {
        match self.phase {
            Phase::Scheduled { deadline } => deadline,
            _ => None,
        }
    }

    /// Starts (or restarts) the timer with a full `interval`.
    ///
    /// A zero interval cancels the timer instead.
    pub fn schedule(&mut self, interval: Duration) {
        self.interval = interval;
        if interval.is_zero() {
            self.cancel();
        } else {
            self.phase = Phase::Scheduled { deadline: None };
        }
    }

    /// Pauses a scheduled timer. The elapsed part of the interval is lost.
    pub fn hold(&mut self) {
        if matches!(self.phase, Phase::Scheduled { .. }) {
            self.phase = Phase::Held;
        }
    }

    /// Restarts a held timer with a full interval.
    pub fn resume(&mut self) {
        if self.phase == Phase::Held {
            self.phase = Phase::Scheduled { deadline: None };
        }
    }

    /// Stops the timer.
    pub fn cancel(&mut self) {
        self.phase = Phase::Idle;
    }

    /// Advances the timer to `now`, returning `true` when it fires.
    ///
    /// A firing timer re-arms itself one interval after `now`.
    pub fn tick(&mut self, now: Duration) -> bool {
        let Phase::Scheduled { deadline } = self.phase else {
            return false;
        };
        match deadline {
            None => {
                self.phase = Phase::Scheduled {
                    deadline: Some(now.saturating_add(self.interval)),
                };
                false
            }
            Some(deadline) if now >= deadline => {
                self.phase = Phase::Scheduled {
                    deadline: Some(now.saturating_add(self.interval)),
                };
                true
            }
            Some(_) => false,
        }
    }
}
