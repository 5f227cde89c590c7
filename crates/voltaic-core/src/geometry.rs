//! Geometric primitives for schematic layout and drawing.
//!
//! Two coordinate spaces meet in a schematic:
//!
//! - **Grid space**: the abstract integer lattice the layout engine places
//!   components on ([`GridPoint`]). Net hubs live between lattice points, so
//!   they are expressed with the fractional [`Point`] in the same units.
//! - **Pixel space**: SVG user units, produced by the scale manager.
//!
//! # Coordinate Systems
//!
//! Grid space uses the mathematical convention (Y grows upward); pixel space
//! matches SVG:
//!
//! ```text
//!   grid                       pixels
//!    +Y                        (0,0) ────────► +X
//!     ▲                          │
//!     │                          │
//!     └────────► +X              ▼
//!                               +Y
//! ```
//!
//! The scale manager is the only place where one is converted into the other.

use serde::Serialize;

/// A 2D point with `f32` coordinates.
///
/// Used both for pixel positions and for net hub positions in grid units.
///
/// # Examples
///
/// ```
/// # use voltaic_core::geometry::Point;
/// let hub = Point::new(1.5, 0.0);
/// let lifted = hub.with_y(-1.0);
///
/// assert_eq!(lifted.x(), 1.5);
/// assert_eq!(lifted.y(), -1.0);
/// assert!(lifted.is_finite());
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Point {
    x: f32,
    y: f32,
}

impl Point {
    /// Creates a new point with the specified coordinates
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Returns the x-coordinate of the point
    pub fn x(self) -> f32 {
        self.x
    }

    /// Returns the y-coordinate of the point
    pub fn y(self) -> f32 {
        self.y
    }

    /// Creates a new point with the specified x-coordinate
    pub fn with_x(mut self, x: f32) -> Self {
        self.x = x;
        self
    }

    /// Creates a new point with the specified y-coordinate
    pub fn with_y(mut self, y: f32) -> Self {
        self.y = y;
        self
    }

    /// Returns true when both coordinates are finite (no NaN or infinity).
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl From<GridPoint> for Point {
    fn from(point: GridPoint) -> Self {
        Self::new(point.x as f32, point.y as f32)
    }
}

/// An integer position on the layout grid.
///
/// The voltage source sits at the origin; downstream stages grow along +X and
/// parallel branches step to `y = +1` / `y = -1`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
pub struct GridPoint {
    x: i32,
    y: i32,
}

impl GridPoint {
    /// The grid origin `(0, 0)`.
    pub const ORIGIN: Self = Self { x: 0, y: 0 };

    /// Creates a new grid point
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Returns the column of this grid point
    pub fn x(self) -> i32 {
        self.x
    }

    /// Returns the row of this grid point
    pub fn y(self) -> i32 {
        self.y
    }
}

/// Represents the dimensions of an element with width and height
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Size {
    width: f32,
    height: f32,
}

impl Size {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Returns the width dimension of this size
    pub fn width(self) -> f32 {
        self.width
    }

    /// Returns the height dimension of this size
    pub fn height(self) -> f32 {
        self.height
    }

    /// Shrinks this size by the given insets, never going below zero.
    ///
    /// # Examples
    ///
    /// ```
    /// # use voltaic_core::geometry::{Insets, Size};
    /// let canvas = Size::new(1160.0, 600.0);
    /// let inner = canvas.shrink(Insets::new(40.0, 40.0, 40.0, 150.0));
    /// assert_eq!(inner.width(), 970.0);
    /// assert_eq!(inner.height(), 520.0);
    /// ```
    pub fn shrink(self, insets: Insets) -> Self {
        Self {
            width: (self.width - insets.horizontal_sum()).max(0.0),
            height: (self.height - insets.vertical_sum()).max(0.0),
        }
    }
}

/// Represents spacing around an element (padding, margin, etc.)
/// with potentially different values for each side
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Insets {
    top: f32,
    right: f32,
    bottom: f32,
    left: f32,
}

impl Insets {
    /// Creates new insets with specified values for each side
    pub fn new(top: f32, right: f32, bottom: f32, left: f32) -> Self {
        Self {
            top,
            right,
            bottom,
            left,
        }
    }

    /// Creates uniform insets with the same value for all sides
    pub fn uniform(value: f32) -> Self {
        Self::new(value, value, value, value)
    }

    /// Returns the top inset value
    pub fn top(self) -> f32 {
        self.top
    }

    /// Returns the right inset value
    pub fn right(self) -> f32 {
        self.right
    }

    /// Returns the bottom inset value
    pub fn bottom(self) -> f32 {
        self.bottom
    }

    /// Returns the left inset value
    pub fn left(self) -> f32 {
        self.left
    }

    /// Returns the sum of left and right insets
    pub fn horizontal_sum(self) -> f32 {
        self.left + self.right
    }

    /// Returns the sum of top and bottom insets
    pub fn vertical_sum(self) -> f32 {
        self.top + self.bottom
    }
}
