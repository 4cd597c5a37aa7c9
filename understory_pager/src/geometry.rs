// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Index arithmetic and axis helpers shared by the pager components.

use kurbo::{Size, Vec2};

/// Policy applied when paging past the first or last page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PagingMode {
    /// Stepping past the last page wraps to the first, and vice versa.
    #[default]
    Looped,
    /// Stepping past either edge is not possible.
    Bounded,
}

impl PagingMode {
    /// Returns the mode for a looped flag.
    #[must_use]
    pub const fn from_looped(looped: bool) -> Self {
        if looped { Self::Looped } else { Self::Bounded }
    }

    /// Returns `true` for [`PagingMode::Looped`].
    #[must_use]
    pub const fn is_looped(self) -> bool {
        matches!(self, Self::Looped)
    }
}

/// Sign of motion between two pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Toward the next page (positive offsets).
    Forward,
    /// Toward the previous page (negative offsets).
    Backward,
}

impl Direction {
    /// Returns the other direction.
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::Forward => Self::Backward,
            Self::Backward => Self::Forward,
        }
    }

    /// Returns `1.0` for [`Direction::Forward`] and `-1.0` for [`Direction::Backward`].
    #[must_use]
    pub const fn signum(self) -> f64 {
        match self {
            Self::Forward => 1.0,
            Self::Backward => -1.0,
        }
    }

    /// Direction implied by the sign of a progress value, `None` at zero (or NaN).
    #[must_use]
    pub fn from_progress(progress: f64) -> Option<Self> {
        if progress > 0.0 {
            Some(Self::Forward)
        } else if progress < 0.0 {
            Some(Self::Backward)
        } else {
            None
        }
    }
}

/// Scroll axis that drives paging.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Orientation {
    /// Pages are laid out left to right.
    #[default]
    Horizontal,
    /// Pages are laid out top to bottom.
    Vertical,
}

impl Orientation {
    /// Component of `offset` along this axis.
    #[must_use]
    pub const fn axis_offset(self, offset: Vec2) -> f64 {
        match self {
            Self::Horizontal => offset.x,
            Self::Vertical => offset.y,
        }
    }

    /// Component of `size` along this axis.
    #[must_use]
    pub const fn axis_extent(self, size: Size) -> f64 {
        match self {
            Self::Horizontal => size.width,
            Self::Vertical => size.height,
        }
    }

    /// Builds an offset vector that moves `distance` along this axis only.
    #[must_use]
    pub const fn offset_vec(self, distance: f64) -> Vec2 {
        match self {
            Self::Horizontal => Vec2::new(distance, 0.0),
            Self::Vertical => Vec2::new(0.0, distance),
        }
    }
}

/// One position reading from the scroll surface, reduced to the paging axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollSample {
    /// Offset from the rest position along the paging axis.
    pub offset: f64,
    /// Page extent along the paging axis.
    pub extent: f64,
}

impl ScrollSample {
    /// Reduces a 2D surface reading to `orientation`'s axis.
    #[must_use]
    pub const fn new(orientation: Orientation, offset: Vec2, size: Size) -> Self {
        Self {
            offset: orientation.axis_offset(offset),
            extent: orientation.axis_extent(size),
        }
    }

    /// Signed fraction of a page travelled, clamped to `[-1, 1]`.
    ///
    /// Zero when the extent is not positive or either value is not finite.
    #[must_use]
    pub fn progress(&self) -> f64 {
        if !(self.extent > 0.0) || !self.offset.is_finite() || !self.extent.is_finite() {
            return 0.0;
        }
        (self.offset / self.extent).clamp(-1.0, 1.0)
    }
}

/// Steps `index` one page in `direction` within `0..=max_index`.
///
/// In [`PagingMode::Looped`] the step wraps around at either edge. In
/// [`PagingMode::Bounded`] stepping past an edge returns `None`, which callers
/// must treat as "do not advance".
#[must_use]
pub const fn step_index(
    index: usize,
    direction: Direction,
    max_index: usize,
    mode: PagingMode,
) -> Option<usize> {
    match (mode, direction) {
        (PagingMode::Looped, Direction::Forward) => {
            Some(if index >= max_index { 0 } else { index + 1 })
        }
        (PagingMode::Looped, Direction::Backward) => {
            Some(if index == 0 { max_index } else { index - 1 })
        }
        (PagingMode::Bounded, Direction::Forward) => {
            if index >= max_index {
                None
            } else {
                Some(index + 1)
            }
        }
        (PagingMode::Bounded, Direction::Backward) => {
            if index == 0 {
                None
            } else {
                Some(index - 1)
            }
        }
    }
}

/// Direction of travel when paging from `from` to `to`.
///
/// Forward when `from < to`. In looped mode with at least three pages the
/// wrap between the last and first page counts as a single step: last to
/// first is forward and first to last is backward, so swapping `from` and
/// `to` always flips the result.
///
/// Callers must not ask for `from == to`; equal indices mean there is no
/// transition at all.
#[must_use]
pub const fn direction(from: usize, to: usize, max_index: usize, mode: PagingMode) -> Direction {
    debug_assert!(from != to, "no direction between equal pages");
    let wraps = matches!(mode, PagingMode::Looped) && max_index >= 2;
    let forward = if wraps && from == max_index && to == 0 {
        true
    } else if wraps && from == 0 && to == max_index {
        false
    } else {
        from < to
    };
    if forward {
        Direction::Forward
    } else {
        Direction::Backward
    }
}
