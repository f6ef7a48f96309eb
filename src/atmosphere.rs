//! Single scattering atmosphere: exponential density falloff, per-channel extinction,
//! optical length along a ray and the in-scattered sunlight along a view segment.

use std::f64::consts::PI;

use serde::{Deserialize, Serialize};

use crate::geometry::{Primitive, Sphere};
use crate::integrator::integrate;
use crate::math::{Point3, RGBColor, Ray, Vec3};

/// Index of refraction of air at sea level.
pub const AIR_INDEX_OF_REFRACTION: f64 = 1.0003;
/// Molecular number density of air at sea level, in m⁻³.
pub const AIR_MOLECULAR_DENSITY: f64 = 2.545e25;
/// Depolarization factor of air.
pub const AIR_DEPOLARIZATION: f64 = 0.035;

/// Red, green and blue wavelengths in nanometres.
pub const DEFAULT_WAVELENGTHS: [f64; 3] = [650.0, 570.0, 475.0];
pub const RAYLEIGH_DENSITY_SCALE: f64 = 0.25;
pub const MIE_EXTINCTION: f64 = 2.3e-6;
pub const MIE_DENSITY_SCALE: f64 = 0.1;

/// Rayleigh extinction coefficient in m⁻¹ for a wavelength in nanometres.
pub fn rayleigh_extinction(wavelength_nm: f64) -> f64 {
    let lambda = wavelength_nm * 1e-9;
    let n2 = AIR_INDEX_OF_REFRACTION * AIR_INDEX_OF_REFRACTION - 1.0;
    let king_factor =
        (6.0 + 3.0 * AIR_DEPOLARIZATION) / (6.0 - 7.0 * AIR_DEPOLARIZATION);
    8.0 * PI.powi(3) * n2 * n2 / (3.0 * AIR_MOLECULAR_DENSITY * lambda.powi(4)) * king_factor
}

/// Cornette-Shanks phase function, normalized over the sphere.
/// With `g == 0` this is the Rayleigh phase 3/(16π)·(1 + cos²θ).
pub fn phase_function(cos_theta: f64, g: f64) -> f64 {
    let g2 = g * g;
    let num = 3.0 * (1.0 - g2) * (1.0 + cos_theta * cos_theta);
    let denom = 8.0 * PI * (2.0 + g2) * (1.0 + g2 - 2.0 * g * cos_theta).powf(1.5);
    num / denom
}

/// One kind of scatterer: its per-channel extinction at zero height and how fast it thins out.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ScatteringComponent {
    pub extinction: RGBColor,
    /// Falloff scale on the normalized [0, 1] height.
    pub density_scale: f64,
    /// Phase asymmetry, 0 scatters symmetrically.
    pub asymmetry: f64,
}

impl ScatteringComponent {
    pub fn rayleigh(wavelengths_nm: [f64; 3], density_scale: f64) -> Self {
        ScatteringComponent {
            extinction: RGBColor::from(wavelengths_nm.map(rayleigh_extinction)),
            density_scale,
            asymmetry: 0.0,
        }
    }

    pub fn mie(extinction: f64, density_scale: f64, asymmetry: f64) -> Self {
        ScatteringComponent {
            extinction: RGBColor::splat(extinction),
            density_scale,
            asymmetry,
        }
    }

    pub fn density(&self, height: f64) -> f64 {
        (-height / self.density_scale).exp()
    }

    pub fn phase(&self, cos_theta: f64) -> f64 {
        phase_function(cos_theta, self.asymmetry)
    }

    /// exp(-β·length) per channel.
    pub fn transmittance(&self, optical_length: f64) -> RGBColor {
        self.extinction.map_rgb(|beta| (-beta * optical_length).exp())
    }
}

/// Directional light. `direction` is the way the light travels.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Sunlight {
    pub direction: Vec3,
    pub intensity: f64,
}

impl Sunlight {
    pub fn new(direction: Vec3, intensity: f64) -> Self {
        Sunlight {
            direction: direction.normalized(),
            intensity,
        }
    }

    pub fn towards_sun(&self) -> Vec3 {
        -self.direction
    }

    /// Lambertian irradiance on a surface with world space normal `n`.
    pub fn irradiance(&self, n: Vec3) -> f64 {
        (-(n * self.direction)).max(0.0) * self.intensity
    }
}

/// How a single in-scatter sample is weighted before integration.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InScatterWeighting {
    /// Attenuated sunlight times phase, unscaled. This is the reference integrand,
    /// its values are far outside the displayable range.
    Unit,
    /// Additionally scaled by the scattering coefficient and the local density.
    Density,
}

/// The planet, its atmospheric shell and the light passing through it.
/// Read only once built, shared by every render worker.
#[derive(Clone, Debug)]
pub struct AtmosphereModel {
    pub planet: Sphere,
    pub shell: Sphere,
    pub sun: Sunlight,
    pub rayleigh: ScatteringComponent,
    pub mie: Option<ScatteringComponent>,
    pub weighting: InScatterWeighting,
    pub optical_length_samples: usize,
    pub in_scatter_samples: usize,
}

impl AtmosphereModel {
    fn components(&self) -> impl Iterator<Item = &ScatteringComponent> {
        std::iter::once(&self.rayleigh).chain(self.mie.iter())
    }

    /// Height above the planet surface, 0 at the surface and 1 at the top of the shell.
    pub fn normalized_height(&self, p: Point3) -> f64 {
        let altitude = (p - self.planet.world_center()).norm() - self.planet.radius;
        let thickness = self.shell.radius - self.planet.radius;
        (altitude / thickness).clamp(0.0, 1.0)
    }

    /// Integral of the component's density along `ray` over `[0, end]`.
    pub fn optical_length(&self, component: &ScatteringComponent, ray: Ray, end: f64) -> f64 {
        integrate(
            |t, _| component.density(self.normalized_height(ray.point_at_parameter(t))),
            0.0,
            end,
            self.optical_length_samples,
        )
    }

    /// Fraction of light surviving the trip along `ray` over `[0, end]`, per channel.
    pub fn transmittance(&self, ray: Ray, end: f64) -> RGBColor {
        self.components()
            .map(|c| c.transmittance(self.optical_length(c, ray, end)))
            .fold(RGBColor::WHITE, |acc, t| acc * t)
    }

    /// Extinction over one integration step of width `dx`, at full density.
    fn step_transmittance(&self, dx: f64) -> RGBColor {
        self.components()
            .map(|c| c.transmittance(dx))
            .fold(RGBColor::WHITE, |acc, t| acc * t)
    }

    /// Sunlight arriving at `sample` after crossing the atmosphere, or `None` when the
    /// planet blocks it.
    pub fn sunlight_at(&self, sample: Point3) -> Option<RGBColor> {
        let sun_ray = Ray::new(sample, self.sun.towards_sun());
        if self.planet.intersect(sun_ray).is_some() {
            return None;
        }
        let exit = self.shell.intersect(sun_ray).map_or(0.0, |hit| hit.time);
        Some(self.transmittance(sun_ray, exit) * self.sun.intensity)
    }

    fn in_scatter_sample(&self, ray: Ray, t: f64, dx: f64) -> RGBColor {
        let p = ray.point_at_parameter(t);
        let Some(sun_color) = self.sunlight_at(p) else {
            return RGBColor::ZERO;
        };
        let cos_theta = ray.direction * self.sun.direction;
        let height = self.normalized_height(p);
        let scattered = self
            .components()
            .map(|c| {
                let weight = match self.weighting {
                    InScatterWeighting::Unit => RGBColor::WHITE,
                    InScatterWeighting::Density => c.extinction * c.density(height),
                };
                sun_color * weight * c.phase(cos_theta)
            })
            .fold(RGBColor::ZERO, |acc, c| acc + c);
        scattered * self.step_transmittance(dx)
    }

    /// Sunlight scattered towards the viewer along `ray` over `[0, end]`.
    /// The result is transparent so adding it keeps the alpha of the surface term.
    pub fn in_scatter(&self, ray: Ray, end: f64) -> RGBColor {
        integrate(
            |t, dx| self.in_scatter_sample(ray, t, dx),
            0.0,
            end,
            self.in_scatter_samples,
        )
    }
}
