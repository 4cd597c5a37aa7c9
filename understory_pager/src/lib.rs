// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_pager --heading-base-level=0

//! Understory Pager: a headless, page-recycling pager core.
//!
//! This crate implements the logic behind "one page at a time" containers such
//! as carousels, onboarding flows, and image galleries: the user drags or
//! flicks between adjacent pages, paging optionally wraps around at the ends,
//! pages can be changed programmatically with or without animation, and a timer
//! can advance pages automatically.
//!
//! The core concepts are:
//!
//! - [`step_index`] and [`direction`]: wraparound-aware index arithmetic under
//!   a [`PagingMode`].
//! - [`PageCache`]: at most two live page views (the current page and the
//!   *reusing* page being scrolled toward) plus up to two spares, created and
//!   reset through the host's [`PageSource`].
//! - [`AutoPagingTimer`]: a repeating timer that is held while the user
//!   interacts and restarts with a full interval afterwards.
//! - [`PagingState`]: the state machine turning continuous scroll progress
//!   into discrete page transitions and commits.
//! - [`Pager`]: the container composing all of the above with a host
//!   [`ScrollSurface`], [`PagerDelegate`], and optional [`ScrollObserver`].
//!
//! This crate deliberately does **not** know about widgets, rendering, or
//! scroll physics. Host frameworks are responsible for:
//!
//! - Owning the scrollable widget, and forwarding its scroll, drag, and
//!   animation events to the pager.
//! - Laying out the current view at the rest position and the reusing view at
//!   [`Pager::reusing_page_origin`].
//! - Limiting scrolling to [`Pager::scroll_range`].
//! - Calling [`Pager::tick`] with a monotonic timestamp while auto-paging.
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::{Size, Vec2};
//! use understory_pager::{PageSource, Pager, PagerDelegate, ScrollSurface};
//!
//! struct Labels(Vec<&'static str>);
//!
//! impl PageSource for Labels {
//!     type View = String;
//!     fn page_count(&self) -> usize {
//!         self.0.len()
//!     }
//!     fn view_for_page(&mut self, index: usize, reusing: Option<String>) -> Option<String> {
//!         let mut view = reusing.unwrap_or_default();
//!         view.clear();
//!         view.push_str(self.0[index]);
//!         Some(view)
//!     }
//! }
//!
//! #[derive(Default)]
//! struct Shown(Vec<usize>);
//!
//! impl PagerDelegate for Shown {
//!     fn did_show_page(&mut self, index: usize) {
//!         self.0.push(index);
//!     }
//! }
//!
//! struct Surface(Vec2);
//!
//! impl ScrollSurface for Surface {
//!     fn offset(&self) -> Vec2 { self.0 }
//!     fn extent(&self) -> Size { Size::new(100.0, 50.0) }
//!     fn is_dragging(&self) -> bool { false }
//!     fn is_decelerating(&self) -> bool { false }
//!     fn scroll_to(&mut self, offset: Vec2, _animated: bool) { self.0 = offset; }
//! }
//!
//! let source = Labels(vec!["one", "two", "three"]);
//! let mut pager = Pager::new(source, Shown::default(), Surface(Vec2::ZERO));
//! assert_eq!(pager.current_view().map(String::as_str), Some("one"));
//!
//! // The user drags 60% of a page forward and lets go.
//! pager.will_begin_dragging();
//! pager.surface_mut().0 = Vec2::new(60.0, 0.0);
//! pager.did_scroll();
//! assert_eq!(pager.reusing_view().map(String::as_str), Some("two"));
//! pager.did_end_dragging(false);
//!
//! assert_eq!(pager.current_page(), Some(1));
//! assert_eq!(pager.current_view().map(String::as_str), Some("two"));
//! assert_eq!(pager.delegate().0, [1]);
//! ```
//!
//! ## Features
//!
//! - `std` (default): enables `std` support for `kurbo`.
//! - `libm`: enables `no_std` builds that rely on `libm` for floating-point math.
//! - `tracing`: emits `tracing` events for transitions, reloads, and timer fires.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod cache;
mod geometry;
mod host;
mod pager;
mod state;
mod timer;

pub use cache::{PageCache, PageSlot, ReusingSlot};
pub use geometry::{Direction, Orientation, PagingMode, ScrollSample, direction, step_index};
pub use host::{PageSource, PagerDelegate, ScrollObserver, ScrollSurface};
pub use pager::{ANIMATION_DURATION, Pager};
pub use state::{
    Commit, PROMOTION_THRESHOLD, PagingState, Phase, SampleOutcome, SettleOutcome, Transition,
    TransitionKind,
};
pub use timer::{AutoPagingTimer, TimerState};
