// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The pager container: wires the state machine, view cache, and timer to the
//! host's page source, delegate, and scroll surface.

use alloc::boxed::Box;
use core::fmt;
use core::time::Duration;

use kurbo::{Point, Vec2};

#[cfg(feature = "tracing")]
use tracing::{debug, trace};

use crate::{
    AutoPagingTimer, Commit, Direction, Orientation, PageCache, PageSource, PagerDelegate,
    PagingMode, PagingState, Phase, SampleOutcome, ScrollObserver, ScrollSample, ScrollSurface,
    SettleOutcome, Transition, TransitionKind,
};

/// Suggested duration for animated page changes.
pub const ANIMATION_DURATION: Duration = Duration::from_millis(350);

/// A single-page-at-a-time pager over a host page source.
///
/// The host owns the actual scrollable widget and forwards its events to the
/// `did_*` / `will_*` methods; the pager reads positions through
/// [`ScrollSurface`] and moves the surface back to rest after each page change.
/// Offsets are relative to the current page: the reusing page is laid out one
/// page extent before or after it (see [`Pager::reusing_page_origin`]).
pub struct Pager<S: PageSource, D, F> {
    source: S,
    delegate: D,
    surface: F,
    observer: Option<Box<dyn ScrollObserver>>,

    state: PagingState,
    cache: PageCache<S::View>,
    timer: AutoPagingTimer,
    auto_paging_interval: Duration,

    orientation: Orientation,
    bounces: bool,
    attached: bool,
}

impl<S: PageSource, D, F> fmt::Debug for Pager<S, D, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Pager")
            .field("state", &self.state)
            .field("timer", &self.timer)
            .field("auto_paging_interval", &self.auto_paging_interval)
            .field("orientation", &self.orientation)
            .field("bounces", &self.bounces)
            .field("attached", &self.attached)
            .finish_non_exhaustive()
    }
}

impl<S, D, F> Pager<S, D, F>
where
    S: PageSource,
    D: PagerDelegate,
    F: ScrollSurface,
{
    /// Creates a looped, horizontal pager and loads its first page.
    pub fn new(source: S, delegate: D, surface: F) -> Self {
        let mut pager = Self {
            source,
            delegate,
            surface,
            observer: None,
            state: PagingState::new(PagingMode::Looped),
            cache: PageCache::new(),
            timer: AutoPagingTimer::new(),
            auto_paging_interval: Duration::ZERO,
            orientation: Orientation::Horizontal,
            bounces: false,
            attached: false,
        };
        pager.reload_data();
        pager
    }

    /// Number of pages as of the last [`reload_data`](Self::reload_data).
    #[must_use]
    pub fn page_count(&self) -> usize {
        self.state.page_count()
    }

    /// The current page, `None` when there are no pages.
    #[must_use]
    pub fn current_page(&self) -> Option<usize> {
        self.state.current()
    }

    /// Returns the paging phase.
    #[must_use]
    pub fn phase(&self) -> Phase {
        self.state.phase()
    }

    /// Read-only access to the state machine.
    #[must_use]
    pub fn state(&self) -> &PagingState {
        &self.state
    }

    /// Read-only access to the view cache.
    #[must_use]
    pub fn cache(&self) -> &PageCache<S::View> {
        &self.cache
    }

    /// View bound to the current page, if available.
    #[must_use]
    pub fn current_view(&self) -> Option<&S::View> {
        self.cache.current().map(|slot| &slot.view)
    }

    /// View bound to the page being scrolled toward, if any.
    #[must_use]
    pub fn reusing_view(&self) -> Option<&S::View> {
        self.cache.reusing().map(|slot| &slot.view)
    }

    /// The page source.
    #[must_use]
    pub fn source(&self) -> &S {
        &self.source
    }

    /// Mutable access to the page source. Call
    /// [`reload_data`](Self::reload_data) after changing its pages.
    pub fn source_mut(&mut self) -> &mut S {
        &mut self.source
    }

    /// The delegate.
    #[must_use]
    pub fn delegate(&self) -> &D {
        &self.delegate
    }

    /// Mutable access to the delegate.
    pub fn delegate_mut(&mut self) -> &mut D {
        &mut self.delegate
    }

    /// The scroll surface.
    #[must_use]
    pub fn surface(&self) -> &F {
        &self.surface
    }

    /// Mutable access to the scroll surface.
    pub fn surface_mut(&mut self) -> &mut F {
        &mut self.surface
    }

    /// Installs a listener that receives every surface event after the pager.
    pub fn set_scroll_observer(&mut self, observer: Option<Box<dyn ScrollObserver>>) {
        self.observer = observer;
    }

    /// Whether paging wraps around at the edges.
    #[must_use]
    pub fn is_looped(&self) -> bool {
        self.state.mode().is_looped()
    }

    /// Enables or disables wraparound paging.
    pub fn set_looped(&mut self, looped: bool) {
        self.set_paging_mode(PagingMode::from_looped(looped));
    }

    /// The paging mode.
    #[must_use]
    pub fn paging_mode(&self) -> PagingMode {
        self.state.mode()
    }

    /// Sets the paging mode.
    pub fn set_paging_mode(&mut self, mode: PagingMode) {
        self.state.set_mode(mode);
    }

    /// The scroll axis that drives paging.
    #[must_use]
    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// Sets the scroll axis. Any in-flight transition is abandoned.
    pub fn set_orientation(&mut self, orientation: Orientation) {
        if self.orientation == orientation {
            return;
        }
        self.orientation = orientation;
        self.cancel_transition();
        self.rest_surface();
    }

    /// Whether the surface may bounce past a bounded edge.
    #[must_use]
    pub fn bounces(&self) -> bool {
        self.bounces
    }

    /// Allows the surface to bounce past a bounded edge instead of being held
    /// at rest. Bouncing never starts a transition.
    pub fn set_bounces(&mut self, bounces: bool) {
        self.bounces = bounces;
    }

    /// Whether the pager is attached to an active display.
    #[must_use]
    pub fn is_attached(&self) -> bool {
        self.attached
    }

    /// Records display attachment. Auto-paging only runs while attached.
    pub fn set_attached(&mut self, attached: bool) {
        if self.attached != attached {
            self.attached = attached;
            self.restart_timer();
        }
    }

    /// Interval between automatic page advances; zero disables auto-paging.
    #[must_use]
    pub fn auto_paging_interval(&self) -> Duration {
        self.auto_paging_interval
    }

    /// Sets the auto-paging interval, not counting the page animation itself.
    pub fn set_auto_paging_interval(&mut self, interval: Duration) {
        self.auto_paging_interval = interval;
        self.restart_timer();
    }

    /// The auto-paging timer.
    #[must_use]
    pub fn timer(&self) -> &AutoPagingTimer {
        &self.timer
    }

    /// Reloads the page count and all views.
    ///
    /// Any in-flight transition is cancelled, the current page is kept but
    /// clamped to the new count, and the auto-paging interval restarts. The
    /// delegate is not notified.
    pub fn reload_data(&mut self) {
        let _cancelled = self.state.reload(self.source.page_count());
        self.cache.invalidate(&mut self.source);
        self.load_current();
        self.rest_surface();
        self.restart_timer();
        #[cfg(feature = "tracing")]
        debug!(
            page_count = self.state.page_count(),
            current = ?self.state.current(),
            cancelled = ?_cancelled,
            "pager: reload"
        );
    }

    /// Changes the current page.
    ///
    /// Targets outside the page range are clamped; with no pages nothing
    /// happens. Any in-flight transition is superseded, even by a request for
    /// the current page, which then only returns the surface to rest. The
    /// auto-paging interval restarts.
    ///
    /// Without animation the change is silent: the delegate is not notified.
    /// With animation the surface is scrolled toward the target and
    /// [`PagerDelegate::did_show_page`] fires once the animation completes.
    pub fn set_current_page(&mut self, page: usize, animated: bool) {
        let superseded = self.state.transition().copied();
        if !animated {
            if self.state.jump(page) {
                self.cache.discard_reusing();
                self.load_current();
                self.rest_surface();
                self.restart_timer();
            } else {
                self.drop_superseded(superseded);
            }
            return;
        }

        let Some(transition) = self.state.begin_animated(page) else {
            self.drop_superseded(superseded);
            return;
        };
        self.cache
            .reusing_view(transition.to, transition.direction, &mut self.source);
        self.timer.hold();
        self.rest_surface();
        let target = self.page_offset(transition.direction);
        self.surface.scroll_to(target, true);
        #[cfg(feature = "tracing")]
        debug!(from = transition.from, to = transition.to, "pager: animating");
    }

    /// Retries loading views that the page source could not supply earlier.
    pub fn layout(&mut self) {
        if let Some(page) = self.state.current() {
            if self.cache.current().is_none_or(|slot| slot.index != page) {
                self.cache.current_view(page, &mut self.source);
            }
        }
        if let Some(transition) = self.state.transition().copied() {
            if self.cache.reusing().is_none_or(|slot| slot.index != transition.to) {
                self.cache
                    .reusing_view(transition.to, transition.direction, &mut self.source);
            }
        }
    }

    /// Drives the auto-paging timer; call with a monotonic timestamp.
    ///
    /// When the timer fires the pager advances one page forward, animated, as
    /// if [`set_current_page`](Self::set_current_page) had been called. At a
    /// bounded last page (or with a single page) nothing happens.
    pub fn tick(&mut self, now: Duration) {
        if !self.timer.tick(now) {
            return;
        }
        // A gesture the host did not report still wins over auto-paging.
        if self.state.transition().is_some()
            || self.surface.is_dragging()
            || self.surface.is_decelerating()
        {
            return;
        }
        if let Some(next) = self.state.neighbor(Direction::Forward) {
            #[cfg(feature = "tracing")]
            debug!(next, "pager: auto-paging");
            self.set_current_page(next, true);
        }
    }

    /// Minimum and maximum surface offset along the paging axis.
    ///
    /// Hosts should restrict scrolling to this range (plus any bounce). A side
    /// without a reachable page is closed off at zero.
    #[must_use]
    pub fn scroll_range(&self) -> (f64, f64) {
        let extent = self.extent();
        let min = if self.state.can_page(Direction::Backward) {
            -extent
        } else {
            0.0
        };
        let max = if self.state.can_page(Direction::Forward) {
            extent
        } else {
            0.0
        };
        (min, max)
    }

    /// Where the reusing view should be placed, relative to the current page.
    #[must_use]
    pub fn reusing_page_origin(&self) -> Option<Point> {
        let slot = self.cache.reusing()?;
        Some(Point::ORIGIN + self.page_offset(slot.direction))
    }

    /// The surface scrolled; samples its position.
    pub fn did_scroll(&mut self) {
        let offset = self.surface.offset();
        let sample = ScrollSample::new(self.orientation, offset, self.surface.extent());
        let outcome = self.state.sample(sample.progress());
        #[cfg(feature = "tracing")]
        trace!(progress = sample.progress(), ?outcome, "pager: sample");
        match outcome {
            SampleOutcome::Rest => {}
            SampleOutcome::Blocked => {
                self.cache.discard_reusing();
                if !self.bounces {
                    self.rest_surface();
                }
            }
            SampleOutcome::Started(transition) => {
                self.cache
                    .reusing_view(transition.to, transition.direction, &mut self.source);
                if transition.kind == TransitionKind::Interactive {
                    self.delegate.did_transition_page(transition.progress);
                }
            }
            SampleOutcome::Progressed(transition) => {
                if transition.kind == TransitionKind::Interactive {
                    self.delegate.did_transition_page(transition.progress);
                }
            }
            SampleOutcome::Committed(commit) => {
                if commit.kind == TransitionKind::Interactive {
                    self.delegate
                        .did_transition_page(commit.direction.signum());
                }
                // Keep whatever overshoot the surface has past the new page.
                let rebased = offset - self.page_offset(commit.direction);
                self.surface.scroll_to(rebased, false);
                self.complete(commit);
            }
        }
        if let Some(observer) = &mut self.observer {
            observer.did_scroll(offset);
        }
    }

    /// The user started dragging the surface.
    pub fn will_begin_dragging(&mut self) {
        self.timer.hold();
        self.state.grab();
        if let Some(observer) = &mut self.observer {
            observer.will_begin_dragging();
        }
    }

    /// The user stopped dragging; `decelerate` reports whether the surface
    /// keeps coasting (settling then waits for
    /// [`did_end_decelerating`](Self::did_end_decelerating)).
    pub fn did_end_dragging(&mut self, decelerate: bool) {
        if !decelerate {
            self.settle();
            self.timer.resume();
        }
        if let Some(observer) = &mut self.observer {
            observer.did_end_dragging(decelerate);
        }
    }

    /// The surface stopped coasting.
    pub fn did_end_decelerating(&mut self) {
        self.settle();
        self.timer.resume();
        if let Some(observer) = &mut self.observer {
            observer.did_end_decelerating();
        }
    }

    /// An animated [`ScrollSurface::scroll_to`] finished.
    pub fn did_end_scroll_animation(&mut self) {
        if let SettleOutcome::Committed(commit) = self.state.finish_animation() {
            self.rest_surface();
            self.complete(commit);
        }
        if let Some(observer) = &mut self.observer {
            observer.did_end_scroll_animation();
        }
    }

    fn settle(&mut self) {
        match self.state.settle() {
            SettleOutcome::Rest => {}
            SettleOutcome::Committed(commit) => {
                self.rest_surface();
                self.complete(commit);
            }
            SettleOutcome::Cancelled(_page) => {
                #[cfg(feature = "tracing")]
                debug!(page = _page, "pager: transition cancelled");
                self.cache.discard_reusing();
                self.rest_surface();
            }
        }
    }

    /// Promotes the committed page's view and notifies the delegate.
    fn complete(&mut self, commit: Commit) {
        self.load_current();
        #[cfg(feature = "tracing")]
        debug!(page = commit.page, kind = ?commit.kind, "pager: page shown");
        if commit.kind == TransitionKind::Animated {
            self.restart_timer();
        }
        self.delegate.did_show_page(commit.page);
    }

    fn cancel_transition(&mut self) {
        let Some(transition) = self.state.transition().copied() else {
            return;
        };
        self.state.cancel();
        self.cache.discard_reusing();
        if transition.kind == TransitionKind::Animated {
            self.restart_timer();
        }
    }

    /// Cleans up after a transition that a request for the current page dropped.
    fn drop_superseded(&mut self, superseded: Option<Transition>) {
        let Some(transition) = superseded else {
            return;
        };
        if self.state.transition().is_some() {
            return;
        }
        #[cfg(feature = "tracing")]
        debug!(to = transition.to, "pager: transition superseded");
        self.cache.discard_reusing();
        self.rest_surface();
        if transition.kind == TransitionKind::Animated {
            self.restart_timer();
        }
    }

    fn load_current(&mut self) {
        if let Some(page) = self.state.current() {
            self.cache.current_view(page, &mut self.source);
        }
    }

    fn rest_surface(&mut self) {
        if self.surface.offset() != Vec2::ZERO {
            self.surface.scroll_to(Vec2::ZERO, false);
        }
    }

    fn restart_timer(&mut self) {
        if self.attached && !self.auto_paging_interval.is_zero() {
            self.timer.schedule(self.auto_paging_interval);
        } else {
            self.timer.cancel();
        }
    }

    fn extent(&self) -> f64 {
        self.orientation.axis_extent(self.surface.extent())
    }

    fn page_offset(&self, direction: Direction) -> Vec2 {
        self.orientation.offset_vec(direction.signum() * self.extent())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::rc::Rc;
    use alloc::vec;
    use alloc::vec::Vec;
    use core::cell::RefCell;
    use kurbo::Size;

    use crate::{TimerState, Transition};

    const WIDTH: f64 = 100.0;

    struct Pages {
        count: usize,
        created: u32,
        requests: Vec<usize>,
        unavailable: Option<usize>,
    }

    impl Pages {
        fn new(count: usize) -> Self {
            Self {
                count,
                created: 0,
                requests: Vec::new(),
                unavailable: None,
            }
        }
    }

    /// Views remember which page they were configured for.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    struct View {
        id: u32,
        page: usize,
    }

    impl PageSource for Pages {
        type View = View;

        fn page_count(&self) -> usize {
            self.count
        }

        fn view_for_page(&mut self, index: usize, reusing: Option<View>) -> Option<View> {
            self.requests.push(index);
            if self.unavailable == Some(index) {
                return None;
            }
            let id = reusing.map_or_else(
                || {
                    self.created += 1;
                    self.created
                },
                |view| view.id,
            );
            Some(View { id, page: index })
        }
    }

    #[derive(Default)]
    struct Events {
        shown: Vec<usize>,
        progress: Vec<f64>,
    }

    impl PagerDelegate for Events {
        fn did_show_page(&mut self, index: usize) {
            self.shown.push(index);
        }

        fn did_transition_page(&mut self, progress: f64) {
            self.progress.push(progress);
        }
    }

    #[derive(Default)]
    struct Surface {
        offset: Vec2,
        dragging: bool,
        moves: Vec<(Vec2, bool)>,
    }

    impl ScrollSurface for Surface {
        fn offset(&self) -> Vec2 {
            self.offset
        }

        fn extent(&self) -> Size {
            Size::new(WIDTH, 40.0)
        }

        fn is_dragging(&self) -> bool {
            self.dragging
        }

        fn is_decelerating(&self) -> bool {
            false
        }

        fn scroll_to(&mut self, offset: Vec2, animated: bool) {
            self.moves.push((offset, animated));
            if !animated {
                self.offset = offset;
            }
        }
    }

    type TestPager = Pager<Pages, Events, Surface>;

    fn pager(count: usize, mode: PagingMode, current: usize) -> TestPager {
        let mut pager = Pager::new(Pages::new(count), Events::default(), Surface::default());
        pager.set_paging_mode(mode);
        pager.set_current_page(current, false);
        pager.surface_mut().moves.clear();
        pager
    }

    fn drag_to(pager: &mut TestPager, x: f64) {
        pager.surface_mut().offset = Vec2::new(x, 0.0);
        pager.did_scroll();
    }

    fn animate_to_end(pager: &mut TestPager) {
        let (target, animated) = *pager.surface().moves.last().expect("an animated scroll");
        assert!(animated, "last surface move should be animated");
        pager.surface_mut().offset = target;
        pager.did_scroll();
        pager.did_end_scroll_animation();
    }

    #[test]
    fn new_pager_loads_the_first_page() {
        let pager = pager(5, PagingMode::Looped, 0);
        assert_eq!(pager.page_count(), 5);
        assert_eq!(pager.phase(), Phase::AtRest(Some(0)));
        assert_eq!(pager.current_view().map(|view| view.page), Some(0));
        assert!(pager.delegate().shown.is_empty());
    }

    #[test]
    fn empty_source_has_no_page() {
        let mut pager = pager(0, PagingMode::Looped, 0);
        assert_eq!(pager.phase(), Phase::AtRest(None));
        pager.set_current_page(3, true);
        pager.set_current_page(3, false);
        assert_eq!(pager.phase(), Phase::AtRest(None));
        assert!(pager.surface().moves.is_empty());
        assert!(pager.source().requests.is_empty());
    }

    #[test]
    fn dragging_past_a_bounded_edge_does_nothing() {
        let mut pager = pager(5, PagingMode::Bounded, 0);
        let requests = pager.source().requests.len();
        drag_to(&mut pager, -30.0);

        assert_eq!(pager.phase(), Phase::AtRest(Some(0)));
        assert_eq!(pager.source().requests.len(), requests, "no reusing view requested");
        assert!(pager.reusing_view().is_none());
        assert!(pager.delegate().progress.is_empty());
        assert!(pager.delegate().shown.is_empty());
        // Held at rest.
        assert_eq!(pager.surface().offset, Vec2::ZERO);
    }

    #[test]
    fn bouncing_edges_are_left_to_the_surface() {
        let mut pager = pager(5, PagingMode::Bounded, 4);
        pager.set_bounces(true);
        drag_to(&mut pager, 20.0);
        assert_eq!(pager.phase(), Phase::AtRest(Some(4)));
        assert_eq!(pager.surface().offset, Vec2::new(20.0, 0.0));
        assert!(pager.delegate().progress.is_empty());
    }

    #[test]
    fn animated_wrap_from_last_page_goes_forward() {
        let mut pager = pager(5, PagingMode::Looped, 4);
        pager.set_current_page(0, true);

        assert!(matches!(
            pager.phase(),
            Phase::Transitioning(Transition {
                to: 0,
                direction: Direction::Forward,
                kind: TransitionKind::Animated,
                ..
            })
        ));
        assert_eq!(pager.surface().moves, vec![(Vec2::new(WIDTH, 0.0), true)]);
        assert_eq!(pager.reusing_page_origin(), Some(Point::new(WIDTH, 0.0)));

        animate_to_end(&mut pager);
        assert_eq!(pager.phase(), Phase::AtRest(Some(0)));
        assert_eq!(pager.delegate().shown, vec![0]);
        assert!(pager.delegate().progress.is_empty(), "animations do not report progress");
        assert_eq!(pager.current_view().map(|view| view.page), Some(0));
        assert_eq!(pager.surface().offset, Vec2::ZERO);
    }

    #[test]
    fn animation_end_without_full_sample_still_commits() {
        let mut pager = pager(5, PagingMode::Bounded, 1);
        pager.set_current_page(3, true);
        pager.did_end_scroll_animation();
        assert_eq!(pager.phase(), Phase::AtRest(Some(3)));
        assert_eq!(pager.delegate().shown, vec![3]);
    }

    #[test]
    fn auto_paging_advances_and_rearms() {
        let secs = Duration::from_secs;
        let mut pager = pager(5, PagingMode::Bounded, 2);
        pager.set_attached(true);
        pager.set_auto_paging_interval(secs(3));

        pager.tick(secs(10));
        assert_eq!(pager.timer().deadline(), Some(secs(13)));
        pager.tick(secs(13));
        assert_eq!(pager.timer().state(), TimerState::Held);

        animate_to_end(&mut pager);
        assert_eq!(pager.phase(), Phase::AtRest(Some(3)));
        assert_eq!(pager.delegate().shown, vec![3]);

        assert_eq!(pager.timer().state(), TimerState::Scheduled);
        pager.tick(secs(14));
        assert_eq!(pager.timer().deadline(), Some(secs(17)));
    }

    #[test]
    fn auto_paging_stops_at_a_bounded_last_page() {
        let mut pager = pager(5, PagingMode::Bounded, 4);
        pager.set_attached(true);
        pager.set_auto_paging_interval(Duration::from_secs(1));
        pager.tick(Duration::ZERO);
        pager.tick(Duration::from_secs(1));
        assert_eq!(pager.phase(), Phase::AtRest(Some(4)));
        assert!(pager.surface().moves.is_empty());
    }

    #[test]
    fn auto_paging_with_a_single_page_is_a_no_op() {
        let mut pager = pager(1, PagingMode::Looped, 0);
        pager.set_attached(true);
        pager.set_auto_paging_interval(Duration::from_secs(1));
        pager.tick(Duration::ZERO);
        pager.tick(Duration::from_secs(1));
        assert_eq!(pager.phase(), Phase::AtRest(Some(0)));
        assert!(pager.delegate().shown.is_empty());
    }

    #[test]
    fn auto_paging_skips_unreported_drags() {
        let mut pager = pager(5, PagingMode::Looped, 0);
        pager.set_attached(true);
        pager.set_auto_paging_interval(Duration::from_secs(1));
        pager.surface_mut().dragging = true;
        pager.tick(Duration::ZERO);
        pager.tick(Duration::from_secs(1));
        assert_eq!(pager.phase(), Phase::AtRest(Some(0)));

        pager.surface_mut().dragging = false;
        pager.tick(Duration::from_secs(2));
        assert!(matches!(pager.phase(), Phase::Transitioning(Transition { to: 1, .. })));
    }

    #[test]
    fn auto_paging_needs_attachment() {
        let mut pager = pager(5, PagingMode::Looped, 0);
        pager.set_auto_paging_interval(Duration::from_secs(1));
        assert_eq!(pager.timer().state(), TimerState::Idle);
        pager.set_attached(true);
        assert_eq!(pager.timer().state(), TimerState::Scheduled);
        pager.set_attached(false);
        assert_eq!(pager.timer().state(), TimerState::Idle);
    }

    #[test]
    fn dragging_holds_the_timer_until_the_gesture_ends() {
        let mut pager = pager(5, PagingMode::Looped, 0);
        pager.set_attached(true);
        pager.set_auto_paging_interval(Duration::from_secs(1));

        pager.will_begin_dragging();
        assert_eq!(pager.timer().state(), TimerState::Held);
        drag_to(&mut pager, 10.0);
        pager.did_end_dragging(true);
        assert_eq!(pager.timer().state(), TimerState::Held);
        pager.did_end_decelerating();
        assert_eq!(pager.timer().state(), TimerState::Scheduled);
    }

    #[test]
    fn drag_past_threshold_commits_on_release() {
        let mut pager = pager(5, PagingMode::Bounded, 0);
        pager.will_begin_dragging();
        drag_to(&mut pager, 30.0);
        assert_eq!(pager.reusing_view().map(|view| view.page), Some(1));
        drag_to(&mut pager, 60.0);
        pager.did_end_dragging(false);

        assert_eq!(pager.phase(), Phase::AtRest(Some(1)));
        assert_eq!(pager.delegate().shown, vec![1]);
        assert_eq!(pager.delegate().progress, vec![0.3, 0.6]);
        assert_eq!(pager.current_view().map(|view| view.page), Some(1));
        assert!(pager.reusing_view().is_none());
        assert_eq!(pager.surface().offset, Vec2::ZERO);
    }

    #[test]
    fn release_at_exactly_half_a_page_commits_backward() {
        let mut pager = pager(5, PagingMode::Bounded, 2);
        pager.will_begin_dragging();
        drag_to(&mut pager, -50.0);
        pager.did_end_dragging(false);
        assert_eq!(pager.phase(), Phase::AtRest(Some(1)));
        assert_eq!(pager.delegate().shown, vec![1]);
    }

    #[test]
    fn release_short_of_threshold_springs_back() {
        let mut pager = pager(5, PagingMode::Bounded, 2);
        pager.will_begin_dragging();
        drag_to(&mut pager, 49.0);
        pager.did_end_dragging(false);

        assert_eq!(pager.phase(), Phase::AtRest(Some(2)));
        assert!(pager.delegate().shown.is_empty());
        assert!(pager.reusing_view().is_none());
        assert_eq!(pager.cache().spare_count(), 1);
        assert_eq!(pager.surface().offset, Vec2::ZERO);
    }

    #[test]
    fn crossing_a_full_page_commits_mid_drag() {
        let mut pager = pager(3, PagingMode::Looped, 2);
        pager.will_begin_dragging();
        drag_to(&mut pager, 60.0);
        drag_to(&mut pager, 100.0);

        assert_eq!(pager.phase(), Phase::AtRest(Some(0)));
        assert_eq!(pager.delegate().shown, vec![0]);
        // The surface is rebased so the new page sits at rest.
        assert_eq!(pager.surface().offset, Vec2::ZERO);

        // The gesture can continue onto the following page.
        drag_to(&mut pager, 20.0);
        assert_eq!(pager.reusing_view().map(|view| view.page), Some(1));
    }

    #[test]
    fn reversing_a_drag_swaps_the_reusing_page() {
        let mut pager = pager(5, PagingMode::Looped, 0);
        pager.will_begin_dragging();
        drag_to(&mut pager, 20.0);
        assert_eq!(pager.reusing_view().map(|view| view.page), Some(1));
        drag_to(&mut pager, -20.0);
        assert_eq!(pager.reusing_view().map(|view| view.page), Some(4));
        assert_eq!(pager.reusing_page_origin(), Some(Point::new(-WIDTH, 0.0)));
    }

    #[test]
    fn reload_mid_transition_cancels_silently() {
        let mut pager = pager(5, PagingMode::Bounded, 2);
        pager.will_begin_dragging();
        drag_to(&mut pager, 40.0);
        assert_eq!(pager.reusing_view().map(|view| view.page), Some(3));

        pager.reload_data();
        assert_eq!(pager.phase(), Phase::AtRest(Some(2)));
        assert!(pager.reusing_view().is_none());
        assert_eq!(pager.current_view().map(|view| view.page), Some(2));
        assert_eq!(pager.surface().offset, Vec2::ZERO);

        pager.did_end_dragging(false);
        assert!(pager.delegate().shown.is_empty());
    }

    #[test]
    fn reload_clamps_to_the_new_page_count() {
        let mut pager = pager(5, PagingMode::Bounded, 4);
        pager.source_mut().count = 2;
        pager.reload_data();
        assert_eq!(pager.phase(), Phase::AtRest(Some(1)));
        pager.source_mut().count = 0;
        pager.reload_data();
        assert_eq!(pager.phase(), Phase::AtRest(None));
        assert!(pager.current_view().is_none());
    }

    #[test]
    fn reload_then_set_page_lands_at_rest() {
        let mut pager = pager(5, PagingMode::Looped, 1);
        pager.reload_data();
        pager.set_current_page(3, false);
        assert_eq!(pager.phase(), Phase::AtRest(Some(3)));
        assert_eq!(pager.current_view().map(|view| view.page), Some(3));
    }

    #[test]
    fn silent_assignment_never_notifies() {
        let mut pager = pager(5, PagingMode::Looped, 1);
        pager.set_current_page(1, false);
        pager.set_current_page(4, false);
        pager.set_current_page(4, false);
        assert_eq!(pager.phase(), Phase::AtRest(Some(4)));
        assert!(pager.delegate().shown.is_empty());
        assert!(pager.surface().moves.is_empty());
    }

    #[test]
    fn animated_request_for_current_page_is_a_no_op() {
        let mut pager = pager(5, PagingMode::Looped, 2);
        pager.set_current_page(2, true);
        assert_eq!(pager.phase(), Phase::AtRest(Some(2)));
        assert!(pager.surface().moves.is_empty());
    }

    #[test]
    fn out_of_range_targets_are_clamped() {
        let mut pager = pager(5, PagingMode::Bounded, 0);
        pager.set_current_page(42, true);
        assert!(matches!(pager.phase(), Phase::Transitioning(Transition { to: 4, .. })));
        pager.did_end_scroll_animation();
        assert_eq!(pager.delegate().shown, vec![4]);
    }

    #[test]
    fn new_request_supersedes_an_animation() {
        let mut pager = pager(5, PagingMode::Bounded, 0);
        pager.set_current_page(2, true);
        pager.set_current_page(4, true);
        assert_eq!(pager.reusing_view().map(|view| view.page), Some(4));
        pager.did_end_scroll_animation();
        assert_eq!(pager.delegate().shown, vec![4]);
    }

    #[test]
    fn animated_request_for_current_page_cancels_the_animation() {
        let mut pager = pager(5, PagingMode::Bounded, 0);
        pager.set_attached(true);
        pager.set_auto_paging_interval(Duration::from_secs(3));
        pager.set_current_page(3, true);
        drag_to(&mut pager, 0.4 * WIDTH);
        assert_eq!(pager.timer().state(), TimerState::Held);

        pager.set_current_page(0, true);
        assert_eq!(pager.phase(), Phase::AtRest(Some(0)));
        assert!(pager.reusing_view().is_none());
        assert_eq!(pager.surface().offset, Vec2::ZERO);
        assert_eq!(pager.timer().state(), TimerState::Scheduled);

        pager.did_end_scroll_animation();
        assert_eq!(pager.phase(), Phase::AtRest(Some(0)));
        assert!(pager.delegate().shown.is_empty());
        assert_eq!(pager.current_view().map(|view| view.page), Some(0));
    }

    #[test]
    fn silent_request_for_current_page_cancels_the_animation() {
        let mut pager = pager(5, PagingMode::Bounded, 0);
        pager.set_current_page(3, true);
        drag_to(&mut pager, 0.4 * WIDTH);

        pager.set_current_page(0, false);
        assert_eq!(pager.phase(), Phase::AtRest(Some(0)));
        assert!(pager.reusing_view().is_none());
        assert_eq!(pager.surface().offset, Vec2::ZERO);

        pager.did_end_scroll_animation();
        assert_eq!(pager.phase(), Phase::AtRest(Some(0)));
        assert!(pager.delegate().shown.is_empty());
    }

    #[test]
    fn unavailable_pages_are_retried_on_layout() {
        let mut source = Pages::new(3);
        source.unavailable = Some(0);
        let mut pager = Pager::new(source, Events::default(), Surface::default());
        assert_eq!(pager.current_page(), Some(0));
        assert!(pager.current_view().is_none());

        pager.layout();
        assert!(pager.current_view().is_none());

        pager.source_mut().unavailable = None;
        pager.layout();
        assert_eq!(pager.current_view().map(|view| view.page), Some(0));
    }

    #[test]
    fn scroll_range_closes_unreachable_sides() {
        let mut pager = pager(5, PagingMode::Bounded, 0);
        assert_eq!(pager.scroll_range(), (0.0, WIDTH));
        pager.set_current_page(4, false);
        assert_eq!(pager.scroll_range(), (-WIDTH, 0.0));
        pager.set_looped(true);
        assert_eq!(pager.scroll_range(), (-WIDTH, WIDTH));

        let single = self::pager(1, PagingMode::Looped, 0);
        assert_eq!(single.scroll_range(), (0.0, 0.0));
    }

    #[test]
    fn vertical_pagers_read_the_y_axis() {
        let mut pager = pager(5, PagingMode::Bounded, 0);
        pager.set_orientation(Orientation::Vertical);
        pager.will_begin_dragging();
        pager.surface_mut().offset = Vec2::new(90.0, 24.0);
        pager.did_scroll();
        // 24 / 40 along y.
        assert_eq!(pager.delegate().progress, vec![0.6]);
    }

    #[test]
    fn observer_sees_every_event_after_the_pager() {
        #[derive(Clone, Default)]
        struct Log(Rc<RefCell<Vec<&'static str>>>);

        impl ScrollObserver for Log {
            fn did_scroll(&mut self, _offset: Vec2) {
                self.0.borrow_mut().push("scroll");
            }
            fn will_begin_dragging(&mut self) {
                self.0.borrow_mut().push("begin");
            }
            fn did_end_dragging(&mut self, _decelerate: bool) {
                self.0.borrow_mut().push("end");
            }
            fn did_end_decelerating(&mut self) {
                self.0.borrow_mut().push("decelerated");
            }
            fn did_end_scroll_animation(&mut self) {
                self.0.borrow_mut().push("animated");
            }
        }

        let log = Log::default();
        let mut pager = pager(5, PagingMode::Looped, 0);
        pager.set_scroll_observer(Some(Box::new(log.clone())));

        pager.will_begin_dragging();
        drag_to(&mut pager, 70.0);
        pager.did_end_dragging(true);
        pager.did_end_decelerating();
        pager.did_end_scroll_animation();

        assert_eq!(
            *log.0.borrow(),
            vec!["begin", "scroll", "end", "decelerated", "animated"]
        );
        // The pager still handled the gesture itself.
        assert_eq!(pager.delegate().shown, vec![1]);
    }
}
