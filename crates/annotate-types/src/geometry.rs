//! Points and rectangles
//!
//! `Rect` (origin + size) is the canonical form used throughout the workspace.
//! `Bounds` (edges) is what the DOM reports from `getBoundingClientRect` and is
//! only converted at the boundary.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Shift the point by the given deltas
    pub fn offset(self, dx: f64, dy: f64) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Self::new(x, y)
    }
}

impl From<[f64; 2]> for Point {
    fn from([x, y]: [f64; 2]) -> Self {
        Self::new(x, y)
    }
}

impl From<Point> for (f64, f64) {
    fn from(p: Point) -> Self {
        (p.x, p.y)
    }
}

/// Rectangle in origin form
///
/// Width and height may be negative when a caller builds a rect from a drag that
/// went up or left; [`Rect::normalized`] and every space conversion fold that
/// back into non-negative dimensions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Build the smallest rect containing both corners, in whatever order they come
    pub fn from_corners(a: Point, b: Point) -> Self {
        Self {
            x: a.x.min(b.x),
            y: a.y.min(b.y),
            width: (b.x - a.x).abs(),
            height: (b.y - a.y).abs(),
        }
    }

    /// Bounding rect of a point sequence. `None` for an empty sequence.
    pub fn enclosing<I>(points: I) -> Option<Self>
    where
        I: IntoIterator<Item = Point>,
    {
        let mut iter = points.into_iter();
        let first = iter.next()?;
        let (min, max) = iter.fold((first, first), |(min, max), p| {
            (
                Point::new(min.x.min(p.x), min.y.min(p.y)),
                Point::new(max.x.max(p.x), max.y.max(p.y)),
            )
        });
        Some(Self::from_corners(min, max))
    }

    /// The corner at `(x, y)` and the one diagonally opposite it
    pub fn corners(&self) -> (Point, Point) {
        (
            Point::new(self.x, self.y),
            Point::new(self.x + self.width, self.y + self.height),
        )
    }

    pub fn normalized(&self) -> Self {
        let (a, b) = self.corners();
        Self::from_corners(a, b)
    }

    pub fn left(&self) -> f64 {
        self.x.min(self.x + self.width)
    }

    pub fn right(&self) -> f64 {
        self.x.max(self.x + self.width)
    }

    pub fn top(&self) -> f64 {
        self.y.min(self.y + self.height)
    }

    pub fn bottom(&self) -> f64 {
        self.y.max(self.y + self.height)
    }

    /// Multiply every component by `factor`
    pub fn scaled(&self, factor: f64) -> Self {
        Self::new(
            self.x * factor,
            self.y * factor,
            self.width * factor,
            self.height * factor,
        )
    }

    pub fn translated(&self, dx: f64, dy: f64) -> Self {
        Self::new(self.x + dx, self.y + dy, self.width, self.height)
    }
}

/// Rectangle in edge form, as reported by `getBoundingClientRect`
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub top: f64,
    pub left: f64,
    pub bottom: f64,
    pub right: f64,
}

impl Bounds {
    pub const fn new(top: f64, left: f64, bottom: f64, right: f64) -> Self {
        Self {
            top,
            left,
            bottom,
            right,
        }
    }

    pub fn width(&self) -> f64 {
        self.right - self.left
    }

    pub fn height(&self) -> f64 {
        self.bottom - self.top
    }

    pub fn scaled(&self, factor: f64) -> Self {
        Self::new(
            self.top * factor,
            self.left * factor,
            self.bottom * factor,
            self.right * factor,
        )
    }

    pub fn translated(&self, dx: f64, dy: f64) -> Self {
        Self::new(self.top + dy, self.left + dx, self.bottom + dy, self.right + dx)
    }
}

impl From<Rect> for Bounds {
    fn from(rect: Rect) -> Self {
        Self::new(rect.top(), rect.left(), rect.bottom(), rect.right())
    }
}

impl From<Bounds> for Rect {
    fn from(bounds: Bounds) -> Self {
        Rect::from_corners(
            Point::new(bounds.left, bounds.top),
            Point::new(bounds.right, bounds.bottom),
        )
    }
}
