use std::ops::{Add, AddAssign, Div, Mul, MulAssign};

/// Linear, unclamped RGB with a straight alpha channel.
///
/// Arithmetic only touches the colour channels, alpha rides along from the left hand side.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct RGBColor(pub [f64; 4]);

impl RGBColor {
    pub const fn new(r: f64, g: f64, b: f64) -> RGBColor {
        RGBColor([r, g, b, 1.0])
    }
    pub const fn with_alpha(r: f64, g: f64, b: f64, a: f64) -> RGBColor {
        RGBColor([r, g, b, a])
    }
    pub const fn splat(v: f64) -> RGBColor {
        RGBColor::new(v, v, v)
    }
    /// Additive identity, transparent so sums keep the alpha of their first term.
    pub const ZERO: RGBColor = RGBColor([0.0, 0.0, 0.0, 0.0]);
    pub const BLACK: RGBColor = RGBColor::new(0.0, 0.0, 0.0);
    pub const WHITE: RGBColor = RGBColor::new(1.0, 1.0, 1.0);
}

impl RGBColor {
    #[inline(always)]
    pub fn r(&self) -> f64 {
        self.0[0]
    }
    #[inline(always)]
    pub fn g(&self) -> f64 {
        self.0[1]
    }
    #[inline(always)]
    pub fn b(&self) -> f64 {
        self.0[2]
    }
    #[inline(always)]
    pub fn a(&self) -> f64 {
        self.0[3]
    }

    /// Applies `f` to the colour channels, alpha is left untouched.
    pub fn map_rgb<F: Fn(f64) -> f64>(self, f: F) -> RGBColor {
        RGBColor([f(self.r()), f(self.g()), f(self.b()), self.a()])
    }

    pub fn is_finite(&self) -> bool {
        self.0.iter().all(|e| e.is_finite())
    }

    pub fn max_channel(&self) -> f64 {
        self.r().max(self.g()).max(self.b())
    }

    /// Clamp every channel to [0, 1] and quantize to 8 bits.
    pub fn pack(&self) -> [u8; 4] {
        let quantize = |c: f64| (c * 255.0).clamp(0.0, 255.0).round() as u8;
        [
            quantize(self.r()),
            quantize(self.g()),
            quantize(self.b()),
            quantize(self.a()),
        ]
    }

    pub fn from_rgba8(rgba: [u8; 4]) -> RGBColor {
        let [r, g, b, a] = rgba.map(|c| c as f64 / 255.0);
        RGBColor::with_alpha(r, g, b, a)
    }
}

impl Default for RGBColor {
    fn default() -> Self {
        RGBColor::ZERO
    }
}

impl Add for RGBColor {
    type Output = RGBColor;
    fn add(self, other: RGBColor) -> RGBColor {
        RGBColor([
            self.r() + other.r(),
            self.g() + other.g(),
            self.b() + other.b(),
            self.a(),
        ])
    }
}

impl AddAssign for RGBColor {
    fn add_assign(&mut self, other: RGBColor) {
        *self = *self + other;
    }
}

// channel-wise product
impl Mul for RGBColor {
    type Output = RGBColor;
    fn mul(self, other: RGBColor) -> RGBColor {
        RGBColor([
            self.r() * other.r(),
            self.g() * other.g(),
            self.b() * other.b(),
            self.a(),
        ])
    }
}

impl MulAssign for RGBColor {
    fn mul_assign(&mut self, other: RGBColor) {
        *self = *self * other;
    }
}

impl Mul<f64> for RGBColor {
    type Output = RGBColor;
    fn mul(self, other: f64) -> RGBColor {
        self.map_rgb(|c| c * other)
    }
}

impl Mul<RGBColor> for f64 {
    type Output = RGBColor;
    fn mul(self, other: RGBColor) -> RGBColor {
        other * self
    }
}

impl MulAssign<f64> for RGBColor {
    fn mul_assign(&mut self, other: f64) {
        *self = *self * other;
    }
}

impl Div<f64> for RGBColor {
    type Output = RGBColor;
    fn div(self, other: f64) -> RGBColor {
        self.map_rgb(|c| c / other)
    }
}

impl From<f64> for RGBColor {
    fn from(s: f64) -> RGBColor {
        RGBColor::splat(s)
    }
}

impl From<[f64; 3]> for RGBColor {
    fn from(rgb: [f64; 3]) -> RGBColor {
        RGBColor::new(rgb[0], rgb[1], rgb[2])
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_pack_clamps_and_rounds() {
        let c = RGBColor::with_alpha(-0.5, 0.5, 3.0, 1.0);
        assert_eq!(c.pack(), [0, 128, 255, 255]);
        assert_eq!(RGBColor::with_alpha(0.0, 0.0, 0.0, 0.0).pack(), [0, 0, 0, 0]);
    }

    #[test]
    fn test_arithmetic_keeps_alpha() {
        let a = RGBColor::with_alpha(0.1, 0.2, 0.3, 0.75);
        let sum = a + RGBColor::with_alpha(1.0, 1.0, 1.0, 0.0);
        assert_eq!(sum.a(), 0.75);
        assert!((sum.g() - 1.2).abs() < 1e-12);
        let scaled = a * 2.0;
        assert_eq!(scaled.a(), 0.75);
        assert!((scaled.b() - 0.6).abs() < 1e-12);
    }

    #[test]
    fn test_zero_is_additive_identity_for_alpha() {
        let c = RGBColor::new(0.25, 0.5, 0.75);
        assert_eq!(c + RGBColor::ZERO, c);
        assert_eq!((RGBColor::ZERO + c).a(), 0.0);
    }

    #[test]
    fn test_rgba8_round_trip() {
        let px = [12, 200, 255, 0];
        assert_eq!(RGBColor::from_rgba8(px).pack(), px);
    }
}
