use std::f64::consts::{FRAC_PI_2, PI};

use crate::geometry::{Hit, Primitive, HIT_EPSILON, UV};
use crate::math::{Point3, Ray, Transform3, Vec3};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Sphere {
    pub radius: f64,
    /// Center in object space.
    pub origin: Point3,
    /// Rigid object to world map, scaling would distort the parametric distances.
    pub transform: Transform3,
}

impl Sphere {
    pub fn new(radius: f64, origin: Point3, transform: Transform3) -> Sphere {
        debug_assert!(radius > 0.0);
        Sphere {
            radius,
            origin,
            transform,
        }
    }

    pub fn centered(radius: f64) -> Sphere {
        Sphere::new(radius, Point3::ORIGIN, Transform3::identity())
    }

    pub fn world_center(&self) -> Point3 {
        self.transform.apply_point(self.origin)
    }

    fn to_local(&self, p: Point3) -> Vec3 {
        self.transform.inverse().apply_point(p) - self.origin
    }

    /// Both parametric roots of the ray/sphere quadratic, nearest first.
    /// `None` when the discriminant is not positive.
    pub fn roots(&self, r: Ray) -> Option<(f64, f64)> {
        let local = self.transform.inverse().apply_ray(r);
        let to = local.origin - self.origin;
        let b = to * local.direction;
        let c = to * to - self.radius * self.radius;
        let discriminant = b * b - c;
        if discriminant <= 0.0 {
            return None;
        }
        let discriminant_sqrt = discriminant.sqrt();
        Some((-b - discriminant_sqrt, -b + discriminant_sqrt))
    }
}

impl Primitive for Sphere {
    fn intersect(&self, r: Ray) -> Option<Hit> {
        let (t0, t1) = self.roots(r)?;
        [t0, t1]
            .into_iter()
            .find(|&time| time > HIT_EPSILON)
            .map(|time| Hit::new(time, r.point_at_parameter(time)))
    }

    fn uv(&self, p: Point3) -> UV {
        let p = self.to_local(p);
        let longitude = p.z().atan2(p.x());
        let latitude = p.y().atan2(p.horizontal_norm());
        UV {
            u: 1.0 - (longitude + PI) / (2.0 * PI),
            v: (latitude + FRAC_PI_2) / PI,
        }
    }

    fn local_normal(&self, p: Point3) -> Vec3 {
        self.to_local(p).normalized()
    }

    fn world_normal(&self, p: Point3) -> Vec3 {
        self.transform
            .apply_direction(self.local_normal(p))
            .normalized()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use rand::Rng;

    fn random_unit_vector(rng: &mut impl Rng) -> Vec3 {
        let z: f64 = rng.gen_range(-1.0..1.0);
        let phi: f64 = rng.gen_range(0.0..2.0 * PI);
        let r = (1.0 - z * z).sqrt();
        Vec3::new(r * phi.cos(), r * phi.sin(), z)
    }

    #[test]
    fn test_sphere_ray_intersection() {
        let sphere = Sphere::new(
            2.0,
            Point3::ORIGIN,
            Transform3::translation(Vec3::new(2.0, 2.0, 2.0)),
        );
        let ray = Ray::new(Point3::ORIGIN, Vec3::new(1.0, 1.0, 1.0).normalized());
        let hit = sphere.intersect(ray).expect("ray through the center must hit");
        let expected = 12.0f64.sqrt() - 2.0;
        assert!((hit.time - expected).abs() < 1e-9, "{:?}", hit);
        assert!(((hit.point - sphere.world_center()).norm() - 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_ray_pointing_away_misses() {
        let sphere = Sphere::centered(1.0);
        let ray = Ray::new(Point3::new(0.0, 0.0, -5.0), -Vec3::Z);
        assert!(sphere.intersect(ray).is_none());

        let mut rng = rand::thread_rng();
        for _ in 0..100 {
            let outward = random_unit_vector(&mut rng);
            let origin = Point3::from(outward * 3.0);
            // any direction in the hemisphere facing away from the sphere
            let mut d = random_unit_vector(&mut rng);
            if d * outward < 0.0 {
                d = -d;
            }
            assert!(sphere.intersect(Ray::new(origin, d)).is_none());
        }
    }

    #[test]
    fn test_roots_symmetric_about_projected_center() {
        let sphere = Sphere::new(
            3.0,
            Point3::ORIGIN,
            Transform3::translation(Vec3::new(1.0, -2.0, 0.5)),
        );
        let origin = Point3::new(-20.0, 4.0, 7.0);
        let direction = (sphere.world_center() - origin).normalized();
        let (t0, t1) = sphere.roots(Ray::new(origin, direction)).unwrap();
        let center_distance = (sphere.world_center() - origin).norm();
        assert!(((t0 + t1) / 2.0 - center_distance).abs() < 1e-9);
        assert!(((t1 - t0) - 6.0).abs() < 1e-9);
    }

    #[test]
    fn test_tangent_ray_misses() {
        let sphere = Sphere::centered(1.0);
        let ray = Ray::new(Point3::new(-5.0, 1.0, 0.0), Vec3::X);
        assert!(sphere.intersect(ray).is_none());
    }

    #[test]
    fn test_origin_inside_reports_far_root() {
        let sphere = Sphere::centered(2.0);
        let hit = sphere.intersect(Ray::new(Point3::ORIGIN, Vec3::Y)).unwrap();
        assert!((hit.time - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_advanced_ray_does_not_reintersect_same_surface() {
        let sphere = Sphere::centered(6_471_000.0);
        let ray = Ray::new(
            Point3::new(0.0, 0.0, -40_000_000.0),
            Vec3::new(0.05, 0.1, 5.0).normalized(),
        );
        let hit = sphere.intersect(ray).unwrap();
        let continuation = ray.advanced_past(hit.time);
        let exit = sphere.intersect(continuation).unwrap();
        // the only remaining root is the far side of the shell
        assert!(exit.time > 1000.0, "{:?}", exit);
    }

    #[test]
    fn test_uv_landmarks() {
        let sphere = Sphere::centered(10.0);
        let at = |x: f64, y: f64, z: f64| sphere.uv(Point3::new(x, y, z));

        // equator, prime meridian
        let uv = at(10.0, 0.0, 0.0);
        assert!((uv.u - 0.5).abs() < 1e-12 && (uv.v - 0.5).abs() < 1e-12, "{:?}", uv);
        // poles
        assert!((at(0.0, 10.0, 0.0).v - 1.0).abs() < 1e-12);
        assert!(at(0.0, -10.0, 0.0).v.abs() < 1e-12);
        // quarter turns around the equator
        assert!((at(0.0, 0.0, 10.0).u - 0.25).abs() < 1e-12);
        assert!((at(0.0, 0.0, -10.0).u - 0.75).abs() < 1e-12);
        // 45 degrees north
        let h = 10.0 / 2.0f64.sqrt();
        assert!((at(h, h, 0.0).v - 0.75).abs() < 1e-12);
    }

    #[test]
    fn test_uv_follows_rotation() {
        let rotated = Sphere::new(
            10.0,
            Point3::ORIGIN,
            Transform3::rotation(Vec3::Y, FRAC_PI_2),
        );
        // object space +X lands on world -Z
        let uv = rotated.uv(Point3::new(0.0, 0.0, -10.0));
        assert!((uv.u - 0.5).abs() < 1e-9, "{:?}", uv);
    }

    #[test]
    fn test_world_normal_uses_rotation() {
        let sphere = Sphere::new(
            1.0,
            Point3::ORIGIN,
            Transform3::rotation(Vec3::Y, 1.3),
        );
        let p = Point3::new(0.0, 0.0, -1.0);
        let n = sphere.world_normal(p);
        assert!((n - Vec3::new(0.0, 0.0, -1.0)).norm() < 1e-9, "{:?}", n);
    }
}
