//=========================================================================
// Scene Objects
//=========================================================================
//
// Capability interface the resolver needs from a game object, plus a
// plain rectangle implementation.
//
// The resolver only ever reads position and size, writes position, and
// asks whether two objects overlap. Anything richer (sprites, masks,
// animation) lives behind this trait in the host game.
//
//=========================================================================

//=== Internal Dependencies ===============================================

use crate::core::geometry::{Aabb, BoundingCircle};

//=== SceneObject Trait ===================================================

/// Position, size and overlap capability of a scene object.
///
/// Only the accessors are required. Drawable position defaults to the
/// logical position, the center defaults to the middle of the box, and
/// collision defaults to an axis-aligned overlap of the hitboxes.
///
/// # Example
///
/// ```
/// use aetheric_platformer::core::world::{Body, SceneObject};
///
/// let mut body = Body::new(0.0, 0.0, 10.0, 20.0);
/// body.set_x(4.0);
/// assert_eq!(body.hitbox().right(), 14.0);
/// ```
pub trait SceneObject {
    fn x(&self) -> f64;
    fn y(&self) -> f64;
    fn set_x(&mut self, x: f64);
    fn set_y(&mut self, y: f64);
    fn width(&self) -> f64;
    fn height(&self) -> f64;

    /// Left edge of the rendered/collidable area.
    fn drawable_x(&self) -> f64 {
        self.x()
    }

    /// Top edge of the rendered/collidable area.
    fn drawable_y(&self) -> f64 {
        self.y()
    }

    /// Center offset relative to the drawable position.
    fn center_x(&self) -> f64 {
        self.width() / 2.0
    }

    fn center_y(&self) -> f64 {
        self.height() / 2.0
    }

    fn hitbox(&self) -> Aabb {
        Aabb::new(self.drawable_x(), self.drawable_y(), self.width(), self.height())
    }

    /// Circle enclosing the object, used for broad-phase pruning.
    fn bounding_circle(&self) -> BoundingCircle {
        BoundingCircle::enclosing(
            self.drawable_x() + self.center_x(),
            self.drawable_y() + self.center_y(),
            self.width(),
            self.height(),
        )
    }

    fn is_colliding_with(&self, other: &Self) -> bool
    where
        Self: Sized,
    {
        self.hitbox().overlaps(&other.hitbox())
    }
}

//=== Body ================================================================

/// Rectangle object with a top-left origin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Body {
    x: f64,
    y: f64,
    width: f64,
    height: f64,
}

impl Body {
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }

    pub fn set_position(&mut self, x: f64, y: f64) {
        self.x = x;
        self.y = y;
    }

    /// Resizes the body, keeping its top-left corner in place.
    pub fn set_size(&mut self, width: f64, height: f64) {
        self.width = width;
        self.height = height;
    }
}

impl SceneObject for Body {
    fn x(&self) -> f64 {
        self.x
    }

    fn y(&self) -> f64 {
        self.y
    }

    fn set_x(&mut self, x: f64) {
        self.x = x;
    }

    fn set_y(&mut self, y: f64) {
        self.y = y;
    }

    fn width(&self) -> f64 {
        self.width
    }

    fn height(&self) -> f64 {
        self.height
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn body_defaults_center_to_middle() {
        let body = Body::new(10.0, 20.0, 30.0, 40.0);
        assert_eq!(body.center_x(), 15.0);
        assert_eq!(body.center_y(), 20.0);

        let circle = body.bounding_circle();
        assert_eq!((circle.center_x, circle.center_y), (25.0, 40.0));
        assert_eq!(circle.radius, 25.0);
    }

    #[test]
    fn bodies_collide_only_when_overlapping() {
        let player = Body::new(0.0, 0.0, 10.0, 20.0);
        let floor = Body::new(-100.0, 20.0, 200.0, 10.0);
        assert!(!player.is_colliding_with(&floor));

        let mut sunk = player;
        sunk.set_y(0.5);
        assert!(sunk.is_colliding_with(&floor));
    }
}
