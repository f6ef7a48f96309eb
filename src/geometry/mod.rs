use crate::math::{Point3, Ray, Vec3};

mod sphere;

pub use sphere::Sphere;

/// Intersections closer than this along a ray are treated as self-intersections.
pub const HIT_EPSILON: f64 = 1e-5;

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Hit {
    pub time: f64,
    pub point: Point3,
}

impl Hit {
    pub fn new(time: f64, point: Point3) -> Self {
        debug_assert!(time > HIT_EPSILON);
        Hit { time, point }
    }
}

/// Texture coordinates in [0, 1]², u from longitude and v from latitude.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct UV {
    pub u: f64,
    pub v: f64,
}

pub trait Primitive {
    /// Nearest intersection further than [`HIT_EPSILON`] along the world space ray.
    fn intersect(&self, r: Ray) -> Option<Hit>;
    /// Texture coordinates of a world space point on the surface.
    fn uv(&self, p: Point3) -> UV;
    /// Unit normal at a world space point, expressed in object space.
    fn local_normal(&self, p: Point3) -> Vec3;
    /// Unit normal at a world space point, expressed in world space.
    fn world_normal(&self, p: Point3) -> Vec3;
}
