//! Integer grid geometry and the layout engine built on it.
//!
//! Items live on a grid with a fixed number of columns and an unbounded
//! number of rows. Every item occupies a rectangle of whole cells; two
//! rectangles overlap when their half-open intervals intersect on both axes.
//!
//! The engine is made of two pure functions:
//! - [`resolve`]: move unlocked items until nothing overlaps
//! - [`first_fit`]: find the origin for a new item
//!
//! Neither function knows anything about widget content or persistence.

mod placement;
mod resolve;

pub use placement::{first_fit, Occupancy};
pub use resolve::{overlapping_pairs, resolve};

use serde::{Deserialize, Serialize};
use std::fmt;

/// Grid width used when no configuration overrides it.
pub const DEFAULT_COLUMNS: u32 = 4;

/// Height of the window scanned by first-fit placement.
pub const DEFAULT_SCAN_ROWS: u32 = 20;

/// Widest grid the engine lays out.
pub const MAX_COLUMNS: u32 = 64;

/// Deepest window first-fit placement scans.
pub const MAX_SCAN_ROWS: u32 = 1024;

/// A rectangle of grid cells.
///
/// `x`/`y` are the top-left cell, `w`/`h` the span in cells. Deserialization
/// accepts signed values and clamps them (see [`Rect::clamped`]) so malformed
/// records never reach the layout engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "RawRect")]
pub struct Rect {
    /// Column of the left edge.
    pub x: u32,
    /// Row of the top edge.
    pub y: u32,
    /// Width in columns (at least 1).
    pub w: u32,
    /// Height in rows (at least 1).
    pub h: u32,
}

impl Rect {
    /// Creates a rectangle, raising zero spans to 1.
    pub fn new(x: u32, y: u32, w: u32, h: u32) -> Self {
        Self {
            x,
            y,
            w: w.max(1),
            h: h.max(1),
        }
    }

    /// Creates a rectangle from untrusted signed values.
    ///
    /// Negative coordinates become 0 and spans below 1 become 1.
    pub fn clamped(x: i64, y: i64, w: i64, h: i64) -> Self {
        fn to_u32(v: i64, min: i64) -> u32 {
            v.clamp(min, u32::MAX as i64) as u32
        }
        Self {
            x: to_u32(x, 0),
            y: to_u32(y, 0),
            w: to_u32(w, 1),
            h: to_u32(h, 1),
        }
    }

    /// Returns this rectangle squeezed into a grid `columns` wide.
    ///
    /// The width is capped at the column count and the left edge is pulled in
    /// so the rectangle ends inside the grid. Rows are never touched.
    pub fn fit_columns(self, columns: u32) -> Self {
        let columns = columns.max(1);
        let w = self.w.min(columns);
        Self {
            x: self.x.min(columns - w),
            w,
            ..self
        }
    }

    /// Column just past the right edge.
    pub fn right(&self) -> u32 {
        self.x.saturating_add(self.w)
    }

    /// Row just past the bottom edge.
    pub fn bottom(&self) -> u32 {
        self.y.saturating_add(self.h)
    }

    /// Axis-aligned overlap test on half-open intervals.
    ///
    /// Rectangles that only share an edge do not overlap.
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.x < other.right()
            && self.right() > other.x
            && self.y < other.bottom()
            && self.bottom() > other.y
    }
}

impl fmt::Display for Rect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{} {}x{})", self.x, self.y, self.w, self.h)
    }
}

/// Wire form of [`Rect`] before clamping.
#[derive(Deserialize)]
struct RawRect {
    #[serde(default)]
    x: i64,
    #[serde(default)]
    y: i64,
    #[serde(default = "one")]
    w: i64,
    #[serde(default = "one")]
    h: i64,
}

fn one() -> i64 {
    1
}

impl From<RawRect> for Rect {
    fn from(raw: RawRect) -> Self {
        Rect::clamped(raw.x, raw.y, raw.w, raw.h)
    }
}

/// The unit the layout engine operates on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridItem {
    /// Opaque identifier, stable across drags and resizes.
    pub id: String,
    /// Occupied cells.
    pub position: Rect,
    /// Locked items are never moved, by the engine or by the user.
    #[serde(default)]
    pub locked: bool,
}

impl GridItem {
    /// Creates an unlocked item.
    pub fn new(id: impl Into<String>, position: Rect) -> Self {
        Self {
            id: id.into(),
            position,
            locked: false,
        }
    }

    /// Creates a locked item.
    pub fn locked(id: impl Into<String>, position: Rect) -> Self {
        Self {
            id: id.into(),
            position,
            locked: true,
        }
    }
}
