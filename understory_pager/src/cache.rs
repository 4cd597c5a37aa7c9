// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! View recycling for the two live page roles.
//!
//! A [`PageCache`] holds at most one view bound to the current page, at most
//! one view bound to the page being scrolled toward, and up to two spare views
//! kept for the next creation request. All view creation and resetting goes
//! through the host's [`PageSource`].

use smallvec::SmallVec;

use crate::{Direction, PageSource};

/// Upper bound on cached spare views: one per role.
const MAX_SPARES: usize = 2;

/// A view bound to the current page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageSlot<V> {
    /// Page the view shows.
    pub index: usize,
    /// Host view.
    pub view: V,
}

/// A view bound to the page being scrolled toward.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReusingSlot<V> {
    /// Page the view shows.
    pub index: usize,
    /// Side of the current page the view sits on.
    pub direction: Direction,
    /// Host view.
    pub view: V,
}

/// Cache of live and spare page views.
#[derive(Debug)]
pub struct PageCache<V> {
    current: Option<PageSlot<V>>,
    reusing: Option<ReusingSlot<V>>,
    spares: SmallVec<[V; MAX_SPARES]>,
}

impl<V> Default for PageCache<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> PageCache<V> {
    /// Creates an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self {
            current: None,
            reusing: None,
            spares: SmallVec::new(),
        }
    }

    /// The current-page slot, if bound.
    #[must_use]
    pub fn current(&self) -> Option<&PageSlot<V>> {
        self.current.as_ref()
    }

    /// The reusing-page slot, if bound.
    #[must_use]
    pub fn reusing(&self) -> Option<&ReusingSlot<V>> {
        self.reusing.as_ref()
    }

    /// Number of spare views waiting to be reused.
    #[must_use]
    pub fn spare_count(&self) -> usize {
        self.spares.len()
    }

    /// Returns the view for the current page at `index`.
    ///
    /// A view already bound to `index` is returned as is. A reusing view bound
    /// to `index` is promoted. Otherwise the source is asked for a view, with
    /// the vacated current view (or a spare) offered for reuse.
    pub fn current_view<S>(&mut self, index: usize, source: &mut S) -> Option<&V>
    where
        S: PageSource<View = V> + ?Sized,
    {
        let bound = self.current.as_ref().is_some_and(|slot| slot.index == index);
        if !bound {
            if self.reusing.as_ref().is_some_and(|slot| slot.index == index) {
                self.promote(source);
            } else {
                let hint = match self.current.take() {
                    Some(slot) => Some(slot.view),
                    None => self.spares.pop(),
                };
                self.current = request(source, index, hint).map(|view| PageSlot { index, view });
            }
        }
        self.current.as_ref().map(|slot| &slot.view)
    }

    /// Returns the view for the reusing page at `index`, on the `direction`
    /// side of the current page.
    ///
    /// Spares left by earlier vacancies are offered for reuse before the
    /// reusing view being replaced.
    pub fn reusing_view<S>(&mut self, index: usize, direction: Direction, source: &mut S) -> Option<&V>
    where
        S: PageSource<View = V> + ?Sized,
    {
        if let Some(slot) = self.reusing.as_mut().filter(|slot| slot.index == index) {
            slot.direction = direction;
        } else {
            let vacated = self.reusing.take().map(|slot| slot.view);
            let hint = if self.spares.is_empty() {
                vacated
            } else {
                let spare = self.spares.remove(0);
                if let Some(view) = vacated {
                    self.push_spare(view);
                }
                Some(spare)
            };
            self.reusing = request(source, index, hint).map(|view| ReusingSlot {
                index,
                direction,
                view,
            });
        }
        self.reusing.as_ref().map(|slot| &slot.view)
    }

    /// Makes the reusing view current.
    ///
    /// The old current view is passed through
    /// [`PageSource::prepare_for_reuse`] and kept as a spare unless the source
    /// discards it. Returns `false` when there was no reusing view.
    pub fn promote<S>(&mut self, source: &mut S) -> bool
    where
        S: PageSource<View = V> + ?Sized,
    {
        let Some(reusing) = self.reusing.take() else {
            return false;
        };
        if let Some(old) = self.current.take() {
            if let Some(view) = source.prepare_for_reuse(old.view) {
                self.push_spare(view);
            }
        }
        self.current = Some(PageSlot {
            index: reusing.index,
            view: reusing.view,
        });
        true
    }

    /// Unbinds the reusing view and keeps it as a spare.
    pub fn discard_reusing(&mut self) {
        if let Some(slot) = self.reusing.take() {
            self.push_spare(slot.view);
        }
    }

    /// Unbinds every view, resetting them through
    /// [`PageSource::prepare_for_reuse`] and caching the survivors as spares.
    pub fn invalidate<S>(&mut self, source: &mut S)
    where
        S: PageSource<View = V> + ?Sized,
    {
        let current = self.current.take().map(|slot| slot.view);
        let reusing = self.reusing.take().map(|slot| slot.view);
        for view in current.into_iter().chain(reusing) {
            if let Some(view) = source.prepare_for_reuse(view) {
                self.push_spare(view);
            }
        }
    }

    fn push_spare(&mut self, view: V) {
        if self.spares.len() >= MAX_SPARES {
            self.spares.remove(0);
        }
        self.spares.push(view);
    }
}

fn request<S>(source: &mut S, index: usize, hint: Option<S::View>) -> Option<S::View>
where
    S: PageSource + ?Sized,
{
    let view = source.view_for_page(index, hint);
    #[cfg(feature = "tracing")]
    if view.is_none() {
        tracing::warn!(index, "page source returned no view; page unavailable");
    }
    view
}
