//! Axis-aligned integer rectangles: the geometry primitive of detection.
//!
//! A [`Rectangle`] is an immutable value. Every combining operation
//! ([`merge`](Rectangle::merge), `+`) returns a new rectangle; the only
//! in-place mutation is `+=`, used by absorption on its own accumulator
//! copy.

use std::fmt;
use std::ops::{Add, AddAssign};

use imageproc::point::Point;
use serde::{Deserialize, Serialize};

use crate::contour::Contour;
use crate::types::GeometryError;

/// How a candidate rectangle is derived from a contour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CandidateMode {
    /// Pixel-covering bounding box of all contour points.
    #[default]
    Bound,
    /// Average of the four corners of a quadrilateral contour.
    ///
    /// The contour must have exactly four points, typically the output
    /// of [`Contour::approximate_polygon`].
    Average,
}

/// An axis-aligned box with `x1 <= x2` and `y1 <= y2`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawRectangle")]
pub struct Rectangle {
    x1: i32,
    y1: i32,
    x2: i32,
    y2: i32,
}

/// Unvalidated wire form; deserialization re-checks the ordering invariant.
#[derive(Deserialize)]
struct RawRectangle {
    x1: i32,
    y1: i32,
    x2: i32,
    y2: i32,
}

impl TryFrom<RawRectangle> for Rectangle {
    type Error = GeometryError;

    fn try_from(raw: RawRectangle) -> Result<Self, Self::Error> {
        Self::new(raw.x1, raw.y1, raw.x2, raw.y2)
    }
}

impl Rectangle {
    /// Largest magnitude a coordinate may have. Keeps every width,
    /// height, center and merge result representable as `i32`.
    pub const COORD_LIMIT: i32 = i32::MAX / 2;

    /// Create a rectangle from its corner coordinates.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::InvalidGeometry`] if `x1 > x2` or `y1 > y2`,
    /// and [`GeometryError::OutOfRange`] if a coordinate exceeds
    /// [`COORD_LIMIT`](Self::COORD_LIMIT) in magnitude.
    pub const fn new(x1: i32, y1: i32, x2: i32, y2: i32) -> Result<Self, GeometryError> {
        if x1 > x2 || y1 > y2 {
            return Err(GeometryError::InvalidGeometry { x1, y1, x2, y2 });
        }
        if x1 < -Self::COORD_LIMIT
            || y1 < -Self::COORD_LIMIT
            || x2 > Self::COORD_LIMIT
            || y2 > Self::COORD_LIMIT
        {
            return Err(GeometryError::OutOfRange { x1, y1, x2, y2 });
        }
        Ok(Self { x1, y1, x2, y2 })
    }

    /// The smallest box covering every pixel in `points`.
    ///
    /// Points are pixel coordinates, so the far edges sit one past the
    /// largest coordinate: a single point yields a 1x1 rectangle.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::EmptyPointSet`] if `points` is empty, and
    /// [`GeometryError::OutOfRange`] if the box leaves the coordinate range.
    pub fn from_bounding_box(points: &[Point<i32>]) -> Result<Self, GeometryError> {
        let first = points.first().ok_or(GeometryError::EmptyPointSet)?;
        let (mut min_x, mut min_y, mut max_x, mut max_y) = (first.x, first.y, first.x, first.y);
        for p in &points[1..] {
            min_x = min_x.min(p.x);
            min_y = min_y.min(p.y);
            max_x = max_x.max(p.x);
            max_y = max_y.max(p.y);
        }
        // Saturation lands past COORD_LIMIT, so `new` reports it.
        Self::new(min_x, min_y, max_x.saturating_add(1), max_y.saturating_add(1))
    }

    /// Approximate a near-axis-aligned quadrilateral by averaging corners.
    ///
    /// X and y coordinates are sorted independently; the two smallest of
    /// each become the near edge, the two largest the far edge. The
    /// corners may be given in any order. Skewed or self-intersecting
    /// quadrilaterals still produce a box, just not a tight one.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::CornerCount`] unless exactly four points
    /// are given.
    pub fn from_four_corners(points: &[Point<i32>]) -> Result<Self, GeometryError> {
        let [a, b, c, d] = points else {
            return Err(GeometryError::CornerCount(points.len()));
        };
        let mut xs = [a.x, b.x, c.x, d.x];
        let mut ys = [a.y, b.y, c.y, d.y];
        xs.sort_unstable();
        ys.sort_unstable();
        Self::new(
            mean_pair(xs[0], xs[1]),
            mean_pair(ys[0], ys[1]),
            mean_pair(xs[2], xs[3]),
            mean_pair(ys[2], ys[3]),
        )
    }

    /// Derive a candidate rectangle from a contour.
    ///
    /// # Errors
    ///
    /// Propagates the errors of [`from_bounding_box`](Self::from_bounding_box)
    /// or [`from_four_corners`](Self::from_four_corners).
    pub fn from_contour(contour: &Contour, mode: CandidateMode) -> Result<Self, GeometryError> {
        match mode {
            CandidateMode::Bound => Self::from_bounding_box(contour.points()),
            CandidateMode::Average => Self::from_four_corners(contour.points()),
        }
    }

    #[must_use]
    pub const fn x1(&self) -> i32 {
        self.x1
    }

    #[must_use]
    pub const fn y1(&self) -> i32 {
        self.y1
    }

    #[must_use]
    pub const fn x2(&self) -> i32 {
        self.x2
    }

    #[must_use]
    pub const fn y2(&self) -> i32 {
        self.y2
    }

    /// Left edge; alias of [`x1`](Self::x1).
    #[must_use]
    pub const fn x(&self) -> i32 {
        self.x1
    }

    /// Top edge; alias of [`y1`](Self::y1).
    #[must_use]
    pub const fn y(&self) -> i32 {
        self.y1
    }

    #[must_use]
    pub const fn width(&self) -> i32 {
        self.x2 - self.x1
    }

    #[must_use]
    pub const fn height(&self) -> i32 {
        self.y2 - self.y1
    }

    /// `(width, height)`.
    #[must_use]
    pub const fn shape(&self) -> (i32, i32) {
        (self.width(), self.height())
    }

    /// Area in square pixels, widened so large frames cannot overflow.
    #[must_use]
    pub const fn area(&self) -> i64 {
        self.width() as i64 * self.height() as i64
    }

    #[must_use]
    pub const fn perimeter(&self) -> i64 {
        2 * (self.width() as i64 + self.height() as i64)
    }

    /// Center point, rounded down toward the top-left corner.
    #[must_use]
    pub const fn center(&self) -> (i32, i32) {
        (self.x1 + self.width() / 2, self.y1 + self.height() / 2)
    }

    #[must_use]
    pub const fn tl(&self) -> (i32, i32) {
        (self.x1, self.y1)
    }

    #[must_use]
    pub const fn tr(&self) -> (i32, i32) {
        (self.x2, self.y1)
    }

    #[must_use]
    pub const fn bl(&self) -> (i32, i32) {
        (self.x1, self.y2)
    }

    #[must_use]
    pub const fn br(&self) -> (i32, i32) {
        (self.x2, self.y2)
    }

    /// Whether the interiors of `self` and `other` overlap.
    ///
    /// Rectangles that only share an edge or a corner do not intersect.
    #[must_use]
    pub const fn intersects(&self, other: &Self) -> bool {
        self.x1 < other.x2 && self.x2 > other.x1 && self.y1 < other.y2 && self.y2 > other.y1
    }

    /// The bounding box of `self` and `other`.
    #[must_use = "returns the merged rectangle"]
    pub fn merge(&self, other: &Self) -> Self {
        // Componentwise min/max of two valid rectangles is always valid.
        Self {
            x1: self.x1.min(other.x1),
            y1: self.y1.min(other.y1),
            x2: self.x2.max(other.x2),
            y2: self.y2.max(other.y2),
        }
    }
}

/// Mean of two integers, truncated toward zero.
const fn mean_pair(a: i32, b: i32) -> i32 {
    ((a as i64 + b as i64) / 2) as i32
}

impl Add for Rectangle {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        self.merge(&other)
    }
}

impl AddAssign for Rectangle {
    fn add_assign(&mut self, other: Self) {
        *self = self.merge(&other);
    }
}

impl fmt::Display for Rectangle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Rect({}, {}, {}, {})",
            self.x1,
            self.y1,
            self.width(),
            self.height()
        )
    }
}
