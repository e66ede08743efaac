//! Geometry primitives: rectangles, box sides, origin conventions and grid
//! snapping.

use glam::DVec2;

/// Axis-aligned rectangle.
///
/// Inside the engine `y` always grows downward and is local to the parent's
/// outer top-left corner. Use [`Origin`] to convert from and to a
/// bottom-left convention.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    /// Create a rectangle with position and size.
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }

    /// Create a rectangle from position and size vectors.
    pub fn from_vecs(position: DVec2, size: DVec2) -> Self {
        Self::new(position.x, position.y, size.x, size.y)
    }

    /// Get position as a vector.
    pub fn position(&self) -> DVec2 {
        DVec2::new(self.x, self.y)
    }

    /// Get size as a vector.
    pub fn size(&self) -> DVec2 {
        DVec2::new(self.width, self.height)
    }

    /// Get the right edge (x + width).
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    /// Get the bottom edge (y + height).
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// Get the center X coordinate.
    pub fn center_x(&self) -> f64 {
        self.x + self.width / 2.0
    }

    /// Get the center Y coordinate.
    pub fn center_y(&self) -> f64 {
        self.y + self.height / 2.0
    }

    /// Move the rectangle by `delta`.
    pub fn translate(&self, delta: DVec2) -> Rect {
        Rect::from_vecs(self.position() + delta, self.size())
    }

    /// Compute union (bounding box) with another rectangle.
    pub fn union(&self, other: &Rect) -> Rect {
        let x1 = self.x.min(other.x);
        let y1 = self.y.min(other.y);
        let x2 = self.right().max(other.right());
        let y2 = self.bottom().max(other.bottom());
        Rect::new(x1, y1, x2 - x1, y2 - y1)
    }

    /// Grow by per-side amounts.
    pub fn expand(&self, sides: &Sides) -> Rect {
        Rect::new(
            self.x - sides.left,
            self.y - sides.top,
            self.width + sides.horizontal(),
            self.height + sides.vertical(),
        )
    }

    /// Shrink by per-side amounts.
    pub fn inset(&self, sides: &Sides) -> Rect {
        self.expand(&sides.negated())
    }

    /// Compare with tolerance on all four fields.
    pub fn approx_eq(&self, other: &Rect, tolerance: f64) -> bool {
        approx_eq(self.x, other.x, tolerance)
            && approx_eq(self.y, other.y, tolerance)
            && approx_eq(self.width, other.width, tolerance)
            && approx_eq(self.height, other.height, tolerance)
    }
}

/// Per-side amounts, used for padding and margin.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Sides {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl Sides {
    pub const ZERO: Sides = Sides { top: 0.0, right: 0.0, bottom: 0.0, left: 0.0 };

    pub fn new(top: f64, right: f64, bottom: f64, left: f64) -> Self {
        Self { top, right, bottom, left }
    }

    /// Create uniform sides.
    pub fn uniform(value: f64) -> Self {
        Self::new(value, value, value, value)
    }

    /// Create symmetric sides.
    pub fn symmetric(horizontal: f64, vertical: f64) -> Self {
        Self::new(vertical, horizontal, vertical, horizontal)
    }

    /// Total horizontal amount.
    pub fn horizontal(&self) -> f64 {
        self.left + self.right
    }

    /// Total vertical amount.
    pub fn vertical(&self) -> f64 {
        self.top + self.bottom
    }

    fn negated(&self) -> Sides {
        Sides::new(-self.top, -self.right, -self.bottom, -self.left)
    }
}

/// Where the y axis starts for a page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Origin {
    /// y = 0 is the top edge, y grows downward
    #[default]
    TopLeft,
    /// y = 0 is the bottom edge, y grows upward; `y` is the bottom of a rect
    BottomLeft,
}

impl Origin {
    /// Convert a rect given in this convention to top-left form inside a
    /// container of `container_height`.
    pub fn normalize(self, rect: Rect, container_height: f64) -> Rect {
        match self {
            Origin::TopLeft => rect,
            Origin::BottomLeft => Rect {
                y: container_height - rect.y - rect.height,
                ..rect
            },
        }
    }

    /// Convert a top-left rect back into this convention.
    pub fn denormalize(self, rect: Rect, container_height: f64) -> Rect {
        // The flip is its own inverse.
        self.normalize(rect, container_height)
    }
}

/// Compare two values with an absolute tolerance.
pub fn approx_eq(a: f64, b: f64, tolerance: f64) -> bool {
    (a - b).abs() <= tolerance
}

/// Round `value` to the nearest line of a grid with the given unit whose
/// first line sits at `start`.
///
/// A value exactly halfway between two lines goes to the line with the even
/// index, so `snap_to_grid(6.0, 12.0, 0.0)` is `0.0` and
/// `snap_to_grid(18.0, 12.0, 0.0)` is `24.0`.
pub fn snap_to_grid(value: f64, unit: f64, start: f64) -> f64 {
    start + ((value - start) / unit).round_ties_even() * unit
}

/// Nearest grid line at or above `value` on the page, i.e. the largest y <= value.
pub fn snap_up_to_grid(value: f64, unit: f64, start: f64) -> f64 {
    start + ((value - start) / unit).floor() * unit
}

/// Nearest grid line at or below `value` on the page, i.e. the smallest y >= value.
pub fn snap_down_to_grid(value: f64, unit: f64, start: f64) -> f64 {
    start + ((value - start) / unit).ceil() * unit
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_expand_and_inset() {
        let rect = Rect::new(10.0, 10.0, 100.0, 50.0);
        let margin = Sides::new(1.0, 2.0, 3.0, 4.0);
        let outer = rect.expand(&margin);
        assert_eq!(outer, Rect::new(6.0, 9.0, 106.0, 54.0));
        assert_eq!(outer.inset(&margin), rect);
    }

    #[test]
    fn test_translate() {
        let rect = Rect::new(1.0, 2.0, 3.0, 4.0).translate(DVec2::new(10.0, -2.0));
        assert_eq!(rect, Rect::new(11.0, 0.0, 3.0, 4.0));
    }

    #[test]
    fn test_bottom_left_origin() {
        // 50 high box sitting 10 above the bottom of a 500 high page
        let rect = Rect::new(0.0, 10.0, 100.0, 50.0);
        let normalized = Origin::BottomLeft.normalize(rect, 500.0);
        assert_eq!(normalized.y, 440.0);
        assert_eq!(Origin::BottomLeft.denormalize(normalized, 500.0), rect);
        assert_eq!(Origin::TopLeft.normalize(rect, 500.0), rect);
    }

    #[test]
    fn test_snap_ties_to_even() {
        assert_eq!(snap_to_grid(6.0, 12.0, 0.0), 0.0);
        assert_eq!(snap_to_grid(18.0, 12.0, 0.0), 24.0);
        assert_eq!(snap_to_grid(30.0, 12.0, 0.0), 24.0);
        assert_eq!(snap_to_grid(7.0, 12.0, 0.0), 12.0);
        assert_eq!(snap_to_grid(25.0, 12.0, 5.0), 29.0);
    }

    #[test]
    fn test_directed_snap() {
        assert_eq!(snap_up_to_grid(23.0, 12.0, 0.0), 12.0);
        assert_eq!(snap_down_to_grid(13.0, 12.0, 0.0), 24.0);
        assert_eq!(snap_down_to_grid(24.0, 12.0, 0.0), 24.0);
    }

    proptest! {
        #[test]
        fn snapped_value_is_on_grid_and_close(p in -10_000.0f64..10_000.0, g in 0.5f64..200.0) {
            let r = snap_to_grid(p, g, 0.0);
            prop_assert!((r - p).abs() <= g / 2.0 + 1e-9);
            let steps = r / g;
            prop_assert!((steps - steps.round()).abs() < 1e-6);
        }
    }
}
