use serde::{Deserialize, Serialize};

/// Viewport-relative rectangle with non-negative dimensions. Produced by
/// the region selector, consumed once by the serializer, then discarded.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Region {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Region {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Axis-aligned bounding box of the drag anchor and the current
    /// pointer position, valid for all four drag directions.
    pub fn from_drag(anchor: (f64, f64), current: (f64, f64)) -> Self {
        Self {
            x: anchor.0.min(current.0),
            y: anchor.1.min(current.1),
            width: (current.0 - anchor.0).abs(),
            height: (current.1 - anchor.1).abs(),
        }
    }

    pub fn zero_sized_at(x: f64, y: f64) -> Self {
        Self::new(x, y, 0.0, 0.0)
    }

    pub fn intersects(&self, other: &Region) -> bool {
        self.x < other.x + other.width
            && other.x < self.x + self.width
            && self.y < other.y + other.height
            && other.y < self.y + self.height
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_drag_top_left_to_bottom_right() {
        let region = Region::from_drag((10.0, 10.0), (50.0, 30.0));
        assert_eq!(region, Region::new(10.0, 10.0, 40.0, 20.0));
    }

    #[test]
    fn test_from_drag_crossing_the_anchor_horizontally() {
        let region = Region::from_drag((10.0, 10.0), (5.0, 40.0));
        assert_eq!(region, Region::new(5.0, 10.0, 5.0, 30.0));
    }

    #[test]
    fn test_from_drag_bottom_right_to_top_left() {
        let region = Region::from_drag((50.0, 30.0), (10.0, 10.0));
        assert_eq!(region, Region::new(10.0, 10.0, 40.0, 20.0));
    }

    #[test]
    fn test_from_drag_bottom_left_to_top_right() {
        let region = Region::from_drag((10.0, 40.0), (30.0, 20.0));
        assert_eq!(region, Region::new(10.0, 20.0, 20.0, 20.0));
    }

    #[test]
    fn test_from_drag_without_movement_is_zero_sized() {
        let region = Region::from_drag((7.0, 9.0), (7.0, 9.0));
        assert_eq!(region, Region::new(7.0, 9.0, 0.0, 0.0));
    }

    #[test]
    fn test_intersects_overlapping_regions() {
        let a = Region::new(0.0, 0.0, 10.0, 10.0);
        let b = Region::new(5.0, 5.0, 10.0, 10.0);
        assert!(a.intersects(&b));
        assert!(b.intersects(&a));
    }

    #[test]
    fn test_intersects_disjoint_regions() {
        let a = Region::new(0.0, 0.0, 10.0, 10.0);
        let b = Region::new(20.0, 0.0, 10.0, 10.0);
        assert!(!a.intersects(&b));
    }
}
