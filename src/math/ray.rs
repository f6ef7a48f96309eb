use super::{next_float_up, Point3, Vec3};

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Ray {
    pub origin: Point3,
    pub direction: Vec3,
}

impl Ray {
    /// `direction` must already be unit length, the intersection routines rely on it.
    pub fn new(origin: Point3, direction: Vec3) -> Self {
        debug_assert!(
            (direction.norm_squared() - 1.0).abs() < 1e-9,
            "ray direction is not normalized: {:?}",
            direction
        );
        Ray { origin, direction }
    }

    pub fn point_at_parameter(self, time: f64) -> Point3 {
        self.origin + self.direction * time
    }

    /// Continuation of this ray starting at the smallest representable parameter above `time`,
    /// so the surface hit at `time` is not reported again.
    pub fn advanced_past(self, time: f64) -> Ray {
        Ray {
            origin: self.point_at_parameter(next_float_up(time)),
            direction: self.direction,
        }
    }
}

impl Default for Ray {
    fn default() -> Self {
        Ray::new(Point3::default(), Vec3::Z)
    }
}
