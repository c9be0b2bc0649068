//! Geometry Utilities
//!
//! Pure functions over axis-aligned bounding boxes: grid snapping, bounds
//! clamping, overlap and adjacency tests. Every table is treated as its
//! bounding box `[x, x+w] × [y, y+h]` regardless of visual shape.

use serde::{Deserialize, Serialize};
use shared::models::{Fixture, FloorTable};

/// Grid unit used when no configuration is supplied
pub const DEFAULT_GRID: f64 = 8.0;

/// Axis-aligned bounding box in layout units
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
}

impl Rect {
    pub const fn new(x: f64, y: f64, w: f64, h: f64) -> Self {
        Self { x, y, w, h }
    }

    #[inline]
    pub fn right(&self) -> f64 {
        self.x + self.w
    }

    #[inline]
    pub fn bottom(&self) -> f64 {
        self.y + self.h
    }

    pub fn area(&self) -> f64 {
        self.w * self.h
    }

    /// Half-open containment: the right and bottom edges belong to the neighbour
    pub fn contains_point(&self, px: f64, py: f64) -> bool {
        px >= self.x && px < self.right() && py >= self.y && py < self.bottom()
    }

    /// True if the whole box lies inside `[0, max_x] × [0, max_y]`
    pub fn within(&self, max_x: f64, max_y: f64) -> bool {
        self.x >= 0.0 && self.y >= 0.0 && self.right() <= max_x && self.bottom() <= max_y
    }

    /// Smallest box covering both
    pub fn union(&self, other: &Rect) -> Rect {
        let x = self.x.min(other.x);
        let y = self.y.min(other.y);
        Rect {
            x,
            y,
            w: self.right().max(other.right()) - x,
            h: self.bottom().max(other.bottom()) - y,
        }
    }
}

impl From<&FloorTable> for Rect {
    fn from(t: &FloorTable) -> Self {
        Rect::new(t.x, t.y, t.w, t.h)
    }
}

impl From<&Fixture> for Rect {
    fn from(f: &Fixture) -> Self {
        Rect::new(f.x, f.y, f.w, f.h)
    }
}

/// Keyboard nudge direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Offset of one step of `grid` units; y grows downward
    pub fn delta(&self, grid: f64) -> (f64, f64) {
        match self {
            Direction::Up => (0.0, -grid),
            Direction::Down => (0.0, grid),
            Direction::Left => (-grid, 0.0),
            Direction::Right => (grid, 0.0),
        }
    }
}

/// Round `value` to the nearest multiple of `grid`.
///
/// Halfway values round toward positive infinity, so `-4` snaps to `0` and
/// `4` snaps to `8`. A non-positive grid or a non-finite value passes through.
pub fn snap(value: f64, grid: f64) -> f64 {
    if grid <= 0.0 || !value.is_finite() {
        return value;
    }
    (value / grid + 0.5).floor() * grid
}

/// Round `value` down to a multiple of `grid`
pub fn snap_down(value: f64, grid: f64) -> f64 {
    if grid <= 0.0 || !value.is_finite() {
        return value;
    }
    (value / grid).floor() * grid
}

/// Clamp a position so the full `w × h` box stays inside `[0, max_x] × [0, max_y]`.
///
/// A box larger than the canvas is pinned to the origin on that axis.
pub fn clamp_to_bounds(x: f64, y: f64, w: f64, h: f64, max_x: f64, max_y: f64) -> (f64, f64) {
    (x.min(max_x - w).max(0.0), y.min(max_y - h).max(0.0))
}

/// True if the boxes intersect with non-zero area. Touching edges do not count.
pub fn overlaps(a: &Rect, b: &Rect) -> bool {
    a.x < b.right() && b.x < a.right() && a.y < b.bottom() && b.y < a.bottom()
}

/// True if the boxes share one full edge, within `tolerance`.
///
/// Side by side requires identical vertical extent, stacked requires identical
/// horizontal extent. Partial contact is not adjacency.
pub fn is_adjacent(a: &Rect, b: &Rect, tolerance: f64) -> bool {
    let close = |p: f64, q: f64| (p - q).abs() <= tolerance;

    let same_rows = close(a.y, b.y) && close(a.bottom(), b.bottom());
    let same_cols = close(a.x, b.x) && close(a.right(), b.right());

    let side_by_side = same_rows && (close(a.right(), b.x) || close(b.right(), a.x));
    let stacked = same_cols && (close(a.bottom(), b.y) || close(b.bottom(), a.y));

    side_by_side || stacked
}

/// Union of every box, `None` for an empty input
pub fn bounding_box<'a>(rects: impl IntoIterator<Item = &'a Rect>) -> Option<Rect> {
    rects
        .into_iter()
        .copied()
        .reduce(|acc, r| acc.union(&r))
}
