//! Fixed step trapezoidal quadrature shared by the scalar optical length and the
//! RGB in-scattering integrals.

use std::ops::{Add, Mul};

use crate::math::{RGBColor, Vec3};

/// Values that can be summed and scaled by a step width.
pub trait Integrand: Copy + Add<Output = Self> + Mul<f64, Output = Self> {
    const ZERO: Self;
}

impl Integrand for f64 {
    const ZERO: f64 = 0.0;
}

impl Integrand for Vec3 {
    const ZERO: Vec3 = Vec3::ZERO;
}

impl Integrand for RGBColor {
    const ZERO: RGBColor = RGBColor::ZERO;
}

/// Integrates `f` over `[a, b]` with the trapezoidal rule on `n` evenly spaced samples.
///
/// `f` receives the sample position and the step width, integrands that model
/// attenuation across one step use the latter.
pub fn integrate<T, F>(f: F, a: f64, b: f64, n: usize) -> T
where
    T: Integrand,
    F: Fn(f64, f64) -> T,
{
    debug_assert!(n >= 2, "trapezoidal rule needs at least two samples, got {}", n);
    let dx = (b - a) / (n - 1) as f64;

    let mut area = T::ZERO;
    let mut prev = f(a, dx);
    for i in 1..n {
        let next = f(a + dx * i as f64, dx);
        area = area + prev + next;
        prev = next;
    }
    area * (dx * 0.5)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::math::nearly_equal;

    #[test]
    fn test_integrator() {
        let res: f64 = integrate(|t, _| (-(t * t * t * t)).exp(), -2.0, 2.0, 1000);
        assert!(
            nearly_equal(res, 1.812_804_947_37, 1e-8),
            "expected {} got {}",
            1.812_804_947_37,
            res
        );
    }

    #[test]
    fn test_linear_is_exact() {
        let res: f64 = integrate(|t, _| 3.0 * t + 1.0, 0.0, 4.0, 2);
        assert_eq!(res, 28.0);
    }

    #[test]
    fn test_empty_interval() {
        let res: f64 = integrate(|_, _| 1.0, 5.0, 5.0, 50);
        assert_eq!(res, 0.0);
        let c: RGBColor = integrate(|_, _| RGBColor::WHITE, 0.0, 0.0, 50);
        assert_eq!(c.max_channel(), 0.0);
    }

    #[test]
    fn test_step_width_is_passed_through() {
        let res: f64 = integrate(
            |_, dx| {
                assert!((dx - 0.25).abs() < 1e-15);
                1.0
            },
            0.0,
            1.0,
            5,
        );
        assert!((res - 1.0).abs() < 1e-15);
    }

    #[test]
    fn test_vector_integrand_matches_scalar() {
        let v: Vec3 = integrate(|t, _| Vec3::new(t, t * t, 1.0), 0.0, 1.0, 101);
        let x: f64 = integrate(|t, _| t, 0.0, 1.0, 101);
        let y: f64 = integrate(|t, _| t * t, 0.0, 1.0, 101);
        assert_eq!(v.x(), x);
        assert_eq!(v.y(), y);
        assert!((v.z() - 1.0).abs() < 1e-12);
    }
}
