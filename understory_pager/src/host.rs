// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Host-side interfaces: the page source, the delegate, the scroll surface,
//! and an optional scroll observer.
//!
//! Required methods are the ones the pager cannot work without; everything
//! else has a no-op default so hosts only implement what they care about.

use kurbo::{Size, Vec2};

/// Supplies page count and page views.
pub trait PageSource {
    /// Host view handle for a single page.
    type View;

    /// Number of pages. Read only during [`Pager::reload_data`](crate::Pager::reload_data).
    fn page_count(&self) -> usize;

    /// Creates or configures the view for `index`.
    ///
    /// `reusing` is a previously used view offered for reuse; it is a hint and
    /// may be dropped. Returning `None` marks the page as temporarily
    /// unavailable; the pager asks again on the next [`Pager::layout`](crate::Pager::layout).
    fn view_for_page(&mut self, index: usize, reusing: Option<Self::View>) -> Option<Self::View>;

    /// Resets a view whose reusability is uncertain before it is cached.
    ///
    /// Return `None` to discard it. The default keeps the view unchanged.
    fn prepare_for_reuse(&mut self, view: Self::View) -> Option<Self::View> {
        Some(view)
    }
}

/// Paging notifications. Both methods are optional.
pub trait PagerDelegate {
    /// A transition completed and `index` is now the current page.
    ///
    /// Fired once per completed gesture, auto-advance, or animated paging
    /// request; never for silent assignment or reloads.
    fn did_show_page(&mut self, index: usize) {
        let _ = index;
    }

    /// The user is dragging between pages; `progress` is in `[-1, 1]`.
    fn did_transition_page(&mut self, progress: f64) {
        let _ = progress;
    }
}

impl PagerDelegate for () {}

/// The narrow view of a scrollable surface that paging needs.
///
/// Offsets are relative to the rest position of the current page: zero means
/// the current page is fully visible, one page extent along the paging axis
/// means the next page is.
pub trait ScrollSurface {
    /// Current content offset relative to the rest position.
    fn offset(&self) -> Vec2;

    /// Visible extent of one page.
    fn extent(&self) -> Size;

    /// Whether the user is actively dragging.
    fn is_dragging(&self) -> bool;

    /// Whether the surface is coasting after a drag.
    fn is_decelerating(&self) -> bool;

    /// Moves the surface to `offset`, optionally animated.
    ///
    /// An animated move must report progress through
    /// [`Pager::did_scroll`](crate::Pager::did_scroll) and finish with
    /// [`Pager::did_end_scroll_animation`](crate::Pager::did_end_scroll_animation).
    /// A non-animated move must not call back into the pager.
    fn scroll_to(&mut self, offset: Vec2, animated: bool);
}

/// Secondary listener for raw surface events.
///
/// The pager handles each event first and then forwards it here unchanged.
pub trait ScrollObserver {
    /// The surface offset changed.
    fn did_scroll(&mut self, offset: Vec2) {
        let _ = offset;
    }

    /// A drag is starting.
    fn will_begin_dragging(&mut self) {}

    /// A drag ended; `decelerate` reports whether the surface keeps coasting.
    fn did_end_dragging(&mut self, decelerate: bool) {
        let _ = decelerate;
    }

    /// Coasting finished.
    fn did_end_decelerating(&mut self) {}

    /// A programmatic animated scroll finished.
    fn did_end_scroll_animation(&mut self) {}
}
