//! Rectangle algebra for clipping and dirty-region decomposition.
//!
//! A [`Rect`] stores its four edges in display coordinates and covers the
//! half-open pixel range `left <= x < right`, `top <= y < bottom`. Every
//! operation here is pure; malformed rectangles (an edge past its opposite)
//! trip a debug assertion.

use embedded_graphics::prelude::{Point, Size};
use embedded_graphics::primitives::Rectangle;
use heapless::Vec;

/// Signed display coordinate.
pub type Coord = i32;

/// Unsigned width or height.
pub type Extent = u32;

/// Upper bound on the number of pieces [`Rect::subtract`] can produce.
pub const MAX_SUBTRACT_RECTS: usize = 4;

/// Result of a rectangle subtraction.
pub type RectList = Vec<Rect, MAX_SUBTRACT_RECTS>;

/// Axis-aligned rectangle in display coordinates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Rect {
    pub left: Coord,
    pub top: Coord,
    pub right: Coord,
    pub bottom: Coord,
}

impl Rect {
    pub fn new(left: Coord, top: Coord, right: Coord, bottom: Coord) -> Self {
        let rect = Self {
            left,
            top,
            right,
            bottom,
        };
        debug_assert!(rect.is_well_formed(), "malformed rect {:?}", rect);
        rect
    }

    /// Rectangle with its top-left corner at `origin`.
    pub fn from_origin_size(origin: Point, width: Extent, height: Extent) -> Self {
        Self::new(
            origin.x,
            origin.y,
            origin.x + width as Coord,
            origin.y + height as Coord,
        )
    }

    pub const fn is_well_formed(&self) -> bool {
        self.right >= self.left && self.bottom >= self.top
    }

    pub fn width(&self) -> Extent {
        debug_assert!(self.is_well_formed());
        (self.right - self.left) as Extent
    }

    pub fn height(&self) -> Extent {
        debug_assert!(self.is_well_formed());
        (self.bottom - self.top) as Extent
    }

    /// A rectangle covering no pixels.
    pub fn is_empty(&self) -> bool {
        self.width() == 0 || self.height() == 0
    }

    pub const fn top_left(&self) -> Point {
        Point::new(self.left, self.top)
    }

    /// The exclusive bottom-right corner.
    pub const fn bottom_right(&self) -> Point {
        Point::new(self.right, self.bottom)
    }

    pub fn size(&self) -> Size {
        Size::new(self.width(), self.height())
    }

    /// Grow every edge outward by `margin`.
    pub fn inflate(&self, margin: Extent) -> Self {
        let margin = margin as Coord;
        Self::new(
            self.left - margin,
            self.top - margin,
            self.right + margin,
            self.bottom + margin,
        )
    }

    /// Shrink every edge inward by `margin`, collapsing to the centre line
    /// when the margin exceeds half the extent.
    pub fn deflate(&self, margin: Extent) -> Self {
        let dx = (margin as Coord).min((self.width() / 2) as Coord);
        let dy = (margin as Coord).min((self.height() / 2) as Coord);
        Self::new(
            self.left + dx,
            self.top + dy,
            self.right - dx,
            self.bottom - dy,
        )
    }

    /// Move the rectangle by `(dx, dy)`.
    pub fn translate(&self, dx: Coord, dy: Coord) -> Self {
        Self::new(
            self.left + dx,
            self.top + dy,
            self.right + dx,
            self.bottom + dy,
        )
    }

    /// Same size, top-left corner moved to `origin`.
    pub fn moved_to(&self, origin: Point) -> Self {
        Self::from_origin_size(origin, self.width(), self.height())
    }

    pub fn contains_point(&self, point: Point) -> bool {
        point.x >= self.left && point.x < self.right && point.y >= self.top && point.y < self.bottom
    }

    /// True iff the two rectangles share at least one pixel.
    pub fn intersects(&self, other: &Rect) -> bool {
        !self.is_empty()
            && !other.is_empty()
            && self.left < other.right
            && other.left < self.right
            && self.top < other.bottom
            && other.top < self.bottom
    }

    /// The common area, or an empty rectangle when disjoint.
    pub fn intersection(&self, other: &Rect) -> Rect {
        if !self.intersects(other) {
            return Rect::default();
        }
        Rect::new(
            self.left.max(other.left),
            self.top.max(other.top),
            self.right.min(other.right),
            self.bottom.min(other.bottom),
        )
    }

    /// The smallest rectangle containing both. Empty operands are ignored.
    pub fn union(&self, other: &Rect) -> Rect {
        if self.is_empty() {
            return *other;
        }
        if other.is_empty() {
            return *self;
        }
        Rect::new(
            self.left.min(other.left),
            self.top.min(other.top),
            self.right.max(other.right),
            self.bottom.max(other.bottom),
        )
    }

    /// Every pixel of `self` lies in `other`.
    pub fn is_within(&self, other: &Rect) -> bool {
        self.left >= other.left
            && self.top >= other.top
            && self.right <= other.right
            && self.bottom <= other.bottom
    }

    /// No pixel of `self` lies in `other`.
    pub fn is_outside(&self, other: &Rect) -> bool {
        !self.intersects(other)
    }

    /// Pairwise disjoint rectangles covering exactly `self \ other`.
    ///
    /// Each edge of `other` that cuts into `self` yields one band: the top
    /// and bottom bands span the full width of `self`, the left and right
    /// bands span only the rows between them. Edges aligned with (or beyond)
    /// the matching edge of `self` contribute nothing.
    pub fn subtract(&self, other: &Rect) -> RectList {
        let mut pieces = RectList::new();
        if self.is_empty() {
            return pieces;
        }
        if !self.intersects(other) {
            pieces.push(*self).ok();
            return pieces;
        }

        let clip = self.intersection(other);

        if clip.top > self.top {
            pieces
                .push(Rect::new(self.left, self.top, self.right, clip.top))
                .ok();
        }
        if clip.bottom < self.bottom {
            pieces
                .push(Rect::new(self.left, clip.bottom, self.right, self.bottom))
                .ok();
        }
        if clip.left > self.left {
            pieces
                .push(Rect::new(self.left, clip.top, clip.left, clip.bottom))
                .ok();
        }
        if clip.right < self.right {
            pieces
                .push(Rect::new(clip.right, clip.top, self.right, clip.bottom))
                .ok();
        }

        pieces
    }
}

impl From<Rectangle> for Rect {
    fn from(rect: Rectangle) -> Self {
        Rect::from_origin_size(rect.top_left, rect.size.width, rect.size.height)
    }
}

impl From<Rect> for Rectangle {
    fn from(rect: Rect) -> Self {
        Rectangle::new(rect.top_left(), rect.size())
    }
}

impl core::fmt::Display for Rect {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(
            f,
            "{{l={}, t={}, r={}, b={}}}",
            self.left, self.top, self.right, self.bottom
        )
    }
}
