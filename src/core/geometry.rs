//=========================================================================
// Geometry
//=========================================================================
//
// Axis-aligned rectangles and bounding circles.
//
// Architecture:
//   Aabb           → precise (narrow-phase) overlap test
//   BoundingCircle → conservative (broad-phase) proximity test
//
// Overlap is strict: rectangles sharing only an edge do not collide.
// Resting contact is therefore detected by probing one pixel further.
//
//=========================================================================

//=== Aabb ================================================================

/// Axis-aligned rectangle in scene coordinates (y grows downward).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Aabb {
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }

    #[inline]
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    #[inline]
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// Returns `true` if the rectangle has no area.
    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }

    /// Strict overlap test. Touching edges and empty rectangles never overlap.
    pub fn overlaps(&self, other: &Aabb) -> bool {
        if self.is_empty() || other.is_empty() {
            return false;
        }

        self.x < other.right()
            && self.right() > other.x
            && self.y < other.bottom()
            && self.bottom() > other.y
    }
}

//=== BoundingCircle ======================================================

/// Circle enclosing an object, optionally inflated by a movement length.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingCircle {
    pub center_x: f64,
    pub center_y: f64,
    pub radius: f64,
}

impl BoundingCircle {
    /// Circle centred on `(center_x, center_y)` enclosing a `width` x `height` box.
    pub fn enclosing(center_x: f64, center_y: f64, width: f64, height: f64) -> Self {
        Self {
            center_x,
            center_y,
            radius: (width * width + height * height).sqrt() / 2.0,
        }
    }

    /// Grows the radius by half of `movement_length`.
    pub fn inflated(mut self, movement_length: f64) -> Self {
        self.radius += movement_length / 2.0;
        self
    }

    /// Returns `true` if the circles touch or intersect.
    pub fn overlaps(&self, other: &BoundingCircle) -> bool {
        let dx = self.center_x - other.center_x;
        let dy = self.center_y - other.center_y;
        (dx * dx + dy * dy).sqrt() <= self.radius + other.radius
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overlapping_rectangles_collide() {
        let a = Aabb::new(0.0, 0.0, 10.0, 10.0);
        let b = Aabb::new(5.0, 5.0, 10.0, 10.0);
        assert!(a.overlaps(&b));
        assert!(b.overlaps(&a));
    }

    #[test]
    fn touching_edges_do_not_collide() {
        let a = Aabb::new(0.0, 0.0, 10.0, 20.0);
        let floor = Aabb::new(-50.0, 20.0, 100.0, 10.0);
        assert!(!a.overlaps(&floor));

        let probe = Aabb::new(0.0, 1.0, 10.0, 20.0);
        assert!(probe.overlaps(&floor));
    }

    #[test]
    fn empty_rectangle_never_collides() {
        let a = Aabb::new(0.0, 0.0, 0.0, 10.0);
        let b = Aabb::new(-5.0, -5.0, 20.0, 20.0);
        assert!(!a.overlaps(&b));
    }

    #[test]
    fn bounding_circle_radius_is_half_diagonal() {
        let circle = BoundingCircle::enclosing(0.0, 0.0, 6.0, 8.0);
        assert_eq!(circle.radius, 5.0);
        assert_eq!(circle.inflated(4.0).radius, 7.0);
    }

    #[test]
    fn distant_circles_do_not_overlap() {
        let a = BoundingCircle::enclosing(0.0, 0.0, 6.0, 8.0);
        let b = BoundingCircle::enclosing(10.0, 0.0, 6.0, 8.0);
        let c = BoundingCircle::enclosing(10.5, 0.0, 6.0, 8.0);
        assert!(a.overlaps(&b));
        assert!(!a.overlaps(&c));
    }
}
