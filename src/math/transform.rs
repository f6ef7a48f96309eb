use nalgebra::{Matrix4, Rotation3, Unit, Vector3, Vector4};

use super::{Point3, Ray, Vec3};

/// Affine object-to-world map. The inverse is carried alongside the forward matrix,
/// both are fixed once constructed.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Transform3 {
    forward: Matrix4<f64>,
    reverse: Matrix4<f64>,
}

impl Transform3 {
    pub fn identity() -> Self {
        Transform3 {
            forward: Matrix4::identity(),
            reverse: Matrix4::identity(),
        }
    }

    pub fn translation(offset: Vec3) -> Self {
        let v = Vector3::from(offset.as_array());
        Transform3 {
            forward: Matrix4::new_translation(&v),
            reverse: Matrix4::new_translation(&-v),
        }
    }

    /// Right handed rotation of `angle` radians about `axis`.
    pub fn rotation(axis: Vec3, angle: f64) -> Self {
        let axis = Unit::new_normalize(Vector3::from(axis.as_array()));
        Transform3 {
            forward: Rotation3::from_axis_angle(&axis, angle).to_homogeneous(),
            reverse: Rotation3::from_axis_angle(&axis, -angle).to_homogeneous(),
        }
    }

    pub fn inverse(&self) -> Self {
        Transform3 {
            forward: self.reverse,
            reverse: self.forward,
        }
    }

    /// `self.then(other)` applies `self` first, then `other`.
    pub fn then(&self, other: &Transform3) -> Self {
        Transform3 {
            forward: other.forward * self.forward,
            reverse: self.reverse * other.reverse,
        }
    }

    pub fn apply_point(&self, p: Point3) -> Point3 {
        let [x, y, z] = p.as_array();
        let h = self.forward * Vector4::new(x, y, z, 1.0);
        Point3::new(h.x / h.w, h.y / h.w, h.z / h.w)
    }

    /// Directions ignore the translation part.
    pub fn apply_direction(&self, v: Vec3) -> Vec3 {
        let [x, y, z] = v.as_array();
        let h = self.forward * Vector4::new(x, y, z, 0.0);
        Vec3::new(h.x, h.y, h.z)
    }

    /// Transformed direction is renormalized so the result stays a valid ray.
    pub fn apply_ray(&self, r: Ray) -> Ray {
        Ray::new(
            self.apply_point(r.origin),
            self.apply_direction(r.direction).normalized(),
        )
    }
}

impl Default for Transform3 {
    fn default() -> Self {
        Transform3::identity()
    }
}
