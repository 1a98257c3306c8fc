// src/components/position.rs

use serde::{Deserialize, Serialize};

/// A point in scene coordinates (rendered pixels, origin at the scene's top-left).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Component-wise difference `self - other`.
    pub fn offset_from(self, other: Position) -> Position {
        Position::new(self.x - other.x, self.y - other.y)
    }
}

/// Width/height pair. Used both for authored geometry and for measured sizes.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    pub fn half(self) -> Position {
        Position::new(self.width / 2.0, self.height / 2.0)
    }

    /// A measured size is usable only when both sides are positive and finite.
    /// Detached elements report 0x0.
    pub fn is_measurable(self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
    }
}

/// Axis-aligned rectangle given by its top-left corner and extent.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }

    pub fn from_origin_and_size(origin: Position, size: Size) -> Self {
        Self::new(origin.x, origin.y, size.width, size.height)
    }

    pub fn left(&self) -> f64 {
        self.x
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn top(&self) -> f64 {
        self.y
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// Scales origin and extent independently per axis.
    pub fn scaled(&self, scale_x: f64, scale_y: f64) -> Rect {
        Rect::new(
            self.x * scale_x,
            self.y * scale_y,
            self.width * scale_x,
            self.height * scale_y,
        )
    }

    /// Separating-axis test. Rectangles that only share an edge count as overlapping.
    pub fn overlaps(&self, other: &Rect) -> bool {
        !(self.right() < other.left()
            || self.left() > other.right()
            || self.bottom() < other.top()
            || self.top() > other.bottom())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rect_edges() {
        let rect = Rect::new(250.0, 100.0, 120.0, 80.0);
        assert_eq!(rect.left(), 250.0);
        assert_eq!(rect.right(), 370.0);
        assert_eq!(rect.top(), 100.0);
        assert_eq!(rect.bottom(), 180.0);
    }

    #[test]
    fn overlap_is_symmetric() {
        let a = Rect::new(0.0, 0.0, 100.0, 80.0);
        let b = Rect::new(50.0, 40.0, 10.0, 10.0);
        let c = Rect::new(300.0, 300.0, 10.0, 10.0);
        assert!(a.overlaps(&b) && b.overlaps(&a));
        assert!(!a.overlaps(&c) && !c.overlaps(&a));
    }

    #[test]
    fn touching_edges_overlap() {
        let a = Rect::new(0.0, 0.0, 100.0, 100.0);
        let right_neighbour = Rect::new(100.0, 0.0, 50.0, 50.0);
        let below = Rect::new(0.0, 100.0, 50.0, 50.0);
        assert!(a.overlaps(&right_neighbour));
        assert!(a.overlaps(&below));

        let just_past = Rect::new(100.5, 0.0, 50.0, 50.0);
        assert!(!a.overlaps(&just_past));
    }

    #[test]
    fn overlap_requires_both_axes() {
        let a = Rect::new(0.0, 0.0, 100.0, 100.0);
        // x ranges intersect, y ranges do not
        let b = Rect::new(50.0, 200.0, 100.0, 100.0);
        assert!(!a.overlaps(&b));
    }

    #[test]
    fn scaled_rect() {
        let rect = Rect::new(250.0, 100.0, 120.0, 80.0);
        assert_eq!(rect.scaled(2.0, 0.5), Rect::new(500.0, 50.0, 240.0, 40.0));
    }

    #[test]
    fn measurable_sizes() {
        assert!(Size::new(500.0, 360.0).is_measurable());
        assert!(!Size::new(0.0, 0.0).is_measurable());
        assert!(!Size::new(500.0, f64::NAN).is_measurable());
    }
}
