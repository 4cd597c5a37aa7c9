// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The paging state machine.
//!
//! [`PagingState`] tracks the current page and at most one in-flight
//! [`Transition`] toward another page. It turns continuous progress samples
//! (offset divided by page extent) into discrete page changes. It owns no
//! views and calls no host code; every input returns an outcome describing
//! what the caller has to do.

use crate::{Direction, PagingMode, direction, step_index};

/// Fraction of a page that must be crossed for a settled gesture to commit.
///
/// A gesture that ends at exactly this fraction commits.
pub const PROMOTION_THRESHOLD: f64 = 0.5;

/// What started a transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionKind {
    /// Driven by the user dragging the surface.
    Interactive,
    /// Driven by an animated paging request or auto-paging.
    Animated,
}

/// An in-flight move from one page toward another.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transition {
    /// Page at rest when the transition began.
    pub from: usize,
    /// Page being moved toward (the reusing page).
    pub to: usize,
    /// Side of `from` on which `to` is shown.
    pub direction: Direction,
    /// Signed fraction of a page travelled, in `[-1, 1]`.
    pub progress: f64,
    /// What drives the transition.
    pub kind: TransitionKind,
}

/// Externally visible state of a [`PagingState`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Phase {
    /// No transition; the page (if any) is fully shown.
    AtRest(Option<usize>),
    /// A transition is in flight.
    Transitioning(Transition),
}

/// A completed transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Commit {
    /// The new current page.
    pub page: usize,
    /// Direction the transition travelled.
    pub direction: Direction,
    /// What drove it.
    pub kind: TransitionKind,
}

/// Result of feeding a progress sample to [`PagingState::sample`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SampleOutcome {
    /// Nothing to do: no pages, or zero progress with no transition.
    Rest,
    /// The step is past a bounded edge; progress is clamped to zero.
    Blocked,
    /// A new transition began; the reusing page needs a view.
    Started(Transition),
    /// The in-flight transition moved.
    Progressed(Transition),
    /// A full page was crossed and the transition committed.
    Committed(Commit),
}

/// Result of ending a gesture or animation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettleOutcome {
    /// No transition was in flight.
    Rest,
    /// The transition committed.
    Committed(Commit),
    /// The transition toward the given page was abandoned.
    Cancelled(usize),
}

/// Current page plus at most one in-flight transition.
#[derive(Debug, Clone)]
pub struct PagingState {
    page_count: usize,
    mode: PagingMode,
    current: Option<usize>,
    transition: Option<Transition>,
}

impl Default for PagingState {
    fn default() -> Self {
        Self::new(PagingMode::default())
    }
}

impl PagingState {
    /// Creates an empty state machine. Call [`reload`](Self::reload) to give it pages.
    #[must_use]
    pub const fn new(mode: PagingMode) -> Self {
        Self {
            page_count: 0,
            mode,
            current: None,
            transition: None,
        }
    }

    /// Number of pages as of the last reload.
    #[must_use]
    pub const fn page_count(&self) -> usize {
        self.page_count
    }

    /// The current page, `None` when there are no pages.
    #[must_use]
    pub const fn current(&self) -> Option<usize> {
        self.current
    }

    /// The in-flight transition, if any.
    #[must_use]
    pub const fn transition(&self) -> Option<&Transition> {
        self.transition.as_ref()
    }

    /// Returns the current phase.
    #[must_use]
    pub fn phase(&self) -> Phase {
        match self.transition {
            Some(transition) => Phase::Transitioning(transition),
            None => Phase::AtRest(self.current),
        }
    }

    /// The paging mode.
    #[must_use]
    pub const fn mode(&self) -> PagingMode {
        self.mode
    }

    /// Changes the paging mode. Takes effect at the next step.
    pub fn set_mode(&mut self, mode: PagingMode) {
        self.mode = mode;
    }

    /// Whether a step in `direction` from the current page reaches another page.
    #[must_use]
    pub fn can_page(&self, direction: Direction) -> bool {
        self.neighbor(direction).is_some()
    }

    /// The page one step from the current page in `direction`, if any.
    #[must_use]
    pub fn neighbor(&self, direction: Direction) -> Option<usize> {
        let current = self.current?;
        step_index(current, direction, self.max_index(), self.mode).filter(|&page| page != current)
    }

    /// Clamps `page` into the valid range, `None` when there are no pages.
    #[must_use]
    pub fn clamp_page(&self, page: usize) -> Option<usize> {
        (self.page_count > 0).then(|| page.min(self.max_index()))
    }

    /// Refreshes the page count and drops any in-flight transition.
    ///
    /// The current page is kept where possible and clamped to the new range.
    /// Returns the cancelled transition's target, if there was one.
    pub fn reload(&mut self, page_count: usize) -> Option<usize> {
        let cancelled = self.transition.take().map(|transition| transition.to);
        self.page_count = page_count;
        self.current = self.clamp_page(self.current.unwrap_or(0));
        cancelled
    }

    /// Moves to `page` immediately, superseding any in-flight transition.
    ///
    /// Returns whether the current page changed. Asking for the page that is
    /// already current still drops an in-flight transition.
    pub fn jump(&mut self, page: usize) -> bool {
        let Some(page) = self.clamp_page(page) else {
            return false;
        };
        if self.current == Some(page) {
            self.transition = None;
            return false;
        }
        self.transition = None;
        self.current = Some(page);
        true
    }

    /// Begins an animated transition to `page`, superseding any in-flight one.
    ///
    /// Returns `None` when there are no pages or the clamped page is already
    /// current; in the latter case an in-flight transition is dropped.
    pub fn begin_animated(&mut self, page: usize) -> Option<Transition> {
        let current = self.current?;
        let page = self.clamp_page(page)?;
        if page == current {
            self.transition = None;
            return None;
        }
        let transition = Transition {
            from: current,
            to: page,
            direction: direction(current, page, self.max_index(), self.mode),
            progress: 0.0,
            kind: TransitionKind::Animated,
        };
        self.transition = Some(transition);
        Some(transition)
    }

    /// Hands an in-flight animated transition over to the user.
    pub fn grab(&mut self) {
        if let Some(transition) = &mut self.transition {
            transition.kind = TransitionKind::Interactive;
        }
    }

    /// Feeds a progress sample: the surface offset along the paging axis
    /// divided by the page extent.
    ///
    /// Non-finite samples count as zero; others are clamped to `[-1, 1]`.
    pub fn sample(&mut self, progress: f64) -> SampleOutcome {
        let Some(current) = self.current else {
            return SampleOutcome::Rest;
        };
        let progress = if progress.is_finite() {
            progress.clamp(-1.0, 1.0)
        } else {
            0.0
        };
        let sampled = Direction::from_progress(progress);

        if let Some(transition) = &mut self.transition {
            let along = sampled.is_none_or(|direction| direction == transition.direction);
            // Animations only ever travel toward their target.
            if along || transition.kind == TransitionKind::Animated {
                transition.progress = if along { progress } else { 0.0 };
                let transition = *transition;
                if progress.abs() >= 1.0 {
                    return SampleOutcome::Committed(self.commit(transition));
                }
                return SampleOutcome::Progressed(transition);
            }
            // Dragged back across the rest position: the old target is abandoned.
            self.transition = None;
        }

        let Some(direction) = sampled else {
            return SampleOutcome::Rest;
        };
        let Some(to) = self.neighbor(direction) else {
            return SampleOutcome::Blocked;
        };
        let transition = Transition {
            from: current,
            to,
            direction,
            progress,
            kind: TransitionKind::Interactive,
        };
        if progress.abs() >= 1.0 {
            return SampleOutcome::Committed(self.commit(transition));
        }
        self.transition = Some(transition);
        SampleOutcome::Started(transition)
    }

    /// Ends a gesture: commits when at least [`PROMOTION_THRESHOLD`] of a page
    /// was crossed, cancels otherwise.
    pub fn settle(&mut self) -> SettleOutcome {
        let Some(transition) = self.transition else {
            return SettleOutcome::Rest;
        };
        if transition.progress.abs() >= PROMOTION_THRESHOLD {
            SettleOutcome::Committed(self.commit(transition))
        } else {
            self.transition = None;
            SettleOutcome::Cancelled(transition.to)
        }
    }

    /// Ends an animated transition, committing it whatever its progress.
    ///
    /// Interactive transitions are left alone; they settle on gesture end.
    pub fn finish_animation(&mut self) -> SettleOutcome {
        let animated = self
            .transition
            .filter(|transition| transition.kind == TransitionKind::Animated);
        match animated {
            Some(transition) => SettleOutcome::Committed(self.commit(transition)),
            None => SettleOutcome::Rest,
        }
    }

    /// Drops the in-flight transition, returning its target page.
    pub fn cancel(&mut self) -> Option<usize> {
        self.transition.take().map(|transition| transition.to)
    }

    fn commit(&mut self, transition: Transition) -> Commit {
        self.transition = None;
        self.current = Some(transition.to);
        Commit {
            page: transition.to,
            direction: transition.direction,
            kind: transition.kind,
        }
    }

    fn max_index(&self) -> usize {
        self.page_count.saturating_sub(1)
    }
}
