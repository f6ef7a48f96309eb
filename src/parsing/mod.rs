//! JSON scene description. Every field is optional, missing ones take the values of
//! the reference Earth scene.

use std::{fs::File, io::Read, path::Path};

use serde::{de::DeserializeOwned, Deserialize, Serialize};

use crate::atmosphere::{
    AtmosphereModel, InScatterWeighting, ScatteringComponent, Sunlight, DEFAULT_WAVELENGTHS,
    MIE_DENSITY_SCALE, MIE_EXTINCTION, RAYLEIGH_DENSITY_SCALE,
};
use crate::camera::PinholeCamera;
use crate::error::ConfigError;
use crate::geometry::Sphere;
use crate::math::{Point3, RGBColor, Transform3, Vec3};
use crate::renderer::Scene;

pub const EARTH_RADIUS: f64 = 6_371_000.0;
pub const EARTH_ATMOSPHERE_HEIGHT: f64 = 100_000.0;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SunConfig {
    /// Direction the light travels in, normalized on load.
    pub direction: [f64; 3],
    pub intensity: f64,
}

impl Default for SunConfig {
    fn default() -> Self {
        SunConfig {
            direction: [3.0, 5.0, 1.0],
            intensity: 3.0,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RayleighConfig {
    /// Red, green and blue wavelengths in nanometres.
    pub wavelengths: [f64; 3],
    /// Explicit coefficients in m⁻¹, take precedence over `wavelengths`.
    pub extinction: Option<[f64; 3]>,
    pub density_scale: f64,
}

impl Default for RayleighConfig {
    fn default() -> Self {
        RayleighConfig {
            wavelengths: DEFAULT_WAVELENGTHS,
            extinction: None,
            density_scale: RAYLEIGH_DENSITY_SCALE,
        }
    }
}

impl RayleighConfig {
    pub fn component(&self) -> ScatteringComponent {
        let mut component = ScatteringComponent::rayleigh(self.wavelengths, self.density_scale);
        if let Some(extinction) = self.extinction {
            component.extinction = RGBColor::from(extinction);
        }
        component
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MieConfig {
    pub enabled: bool,
    pub extinction: f64,
    pub density_scale: f64,
    pub asymmetry: f64,
}

impl Default for MieConfig {
    fn default() -> Self {
        MieConfig {
            enabled: false,
            extinction: MIE_EXTINCTION,
            density_scale: MIE_DENSITY_SCALE,
            asymmetry: 0.0,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CameraConfig {
    pub position: [f64; 3],
    pub look_at: [f64; 3],
    /// The reference view has world -Y pointing up the image.
    pub up: [f64; 3],
    pub focal_length: f64,
}

impl Default for CameraConfig {
    fn default() -> Self {
        CameraConfig {
            position: [0.0, 0.0, -40_000_000.0],
            look_at: [0.0, 0.0, 0.0],
            up: [0.0, -1.0, 0.0],
            focal_length: 5.0,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SceneConfig {
    pub width: usize,
    pub height: usize,
    pub planet_radius: f64,
    pub atmosphere_height: f64,
    pub planet_center: [f64; 3],
    pub planet_rotation_axis: [f64; 3],
    /// Radians about `planet_rotation_axis`.
    pub planet_rotation: f64,
    pub camera: CameraConfig,
    pub sun: SunConfig,
    pub rayleigh: RayleighConfig,
    pub mie: MieConfig,
    pub in_scatter_weighting: InScatterWeighting,
    pub optical_length_samples: usize,
    pub in_scatter_samples: usize,
}

impl Default for SceneConfig {
    fn default() -> Self {
        SceneConfig {
            width: 640,
            height: 480,
            planet_radius: EARTH_RADIUS,
            atmosphere_height: EARTH_ATMOSPHERE_HEIGHT,
            planet_center: [0.0, 0.0, 0.0],
            planet_rotation_axis: [0.0, 1.0, 0.0],
            planet_rotation: -3.1,
            camera: CameraConfig::default(),
            sun: SunConfig::default(),
            rayleigh: RayleighConfig::default(),
            mie: MieConfig::default(),
            in_scatter_weighting: InScatterWeighting::Density,
            optical_length_samples: 5,
            in_scatter_samples: 50,
        }
    }
}

fn is_nonzero(v: [f64; 3]) -> bool {
    v.iter().all(|e| e.is_finite()) && v.iter().any(|e| *e != 0.0)
}

impl SceneConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |reason: &str| Err(ConfigError::Invalid(reason.to_string()));
        if self.width == 0 || self.height == 0 {
            return invalid("image dimensions must be positive");
        }
        if !(self.planet_radius > 0.0) || !(self.atmosphere_height > 0.0) {
            return invalid("planet radius and atmosphere height must be positive");
        }
        if self.optical_length_samples < 2 || self.in_scatter_samples < 2 {
            return invalid("integration needs at least two samples");
        }
        if !is_nonzero(self.sun.direction) {
            return invalid("sun direction must be a finite, non-zero vector");
        }
        if !is_nonzero(self.planet_rotation_axis) {
            return invalid("planet rotation axis must be a finite, non-zero vector");
        }
        if !(self.rayleigh.density_scale > 0.0) || !(self.mie.density_scale > 0.0) {
            return invalid("density scales must be positive");
        }
        if self.rayleigh.wavelengths.iter().any(|w| !(*w > 0.0)) {
            return invalid("wavelengths must be positive");
        }
        if !(self.mie.asymmetry.abs() < 1.0) {
            return invalid("mie asymmetry must lie in (-1, 1)");
        }
        let forward = Vec3::from(self.camera.look_at) - Vec3::from(self.camera.position);
        if !is_nonzero(forward.as_array()) || forward.cross(Vec3::from(self.camera.up)).norm() == 0.0 {
            return invalid("camera up must not be parallel to the view direction");
        }
        if !(self.camera.focal_length > 0.0) {
            return invalid("focal length must be positive");
        }
        Ok(())
    }

    pub fn atmosphere_model(&self) -> AtmosphereModel {
        let center = Transform3::translation(Vec3::from(self.planet_center));
        let spin = Transform3::rotation(
            Vec3::from(self.planet_rotation_axis),
            self.planet_rotation,
        );
        AtmosphereModel {
            planet: Sphere::new(self.planet_radius, Point3::ORIGIN, spin.then(&center)),
            shell: Sphere::new(
                self.planet_radius + self.atmosphere_height,
                Point3::ORIGIN,
                center,
            ),
            sun: Sunlight::new(Vec3::from(self.sun.direction), self.sun.intensity),
            rayleigh: self.rayleigh.component(),
            mie: self.mie.enabled.then(|| {
                ScatteringComponent::mie(
                    self.mie.extinction,
                    self.mie.density_scale,
                    self.mie.asymmetry,
                )
            }),
            weighting: self.in_scatter_weighting,
            optical_length_samples: self.optical_length_samples,
            in_scatter_samples: self.in_scatter_samples,
        }
    }

    pub fn camera(&self) -> PinholeCamera {
        PinholeCamera::new(
            Point3::from(self.camera.position),
            Point3::from(self.camera.look_at),
            Vec3::from(self.camera.up),
            self.camera.focal_length,
            self.width,
            self.height,
        )
    }

    /// Expects a configuration that passed [`SceneConfig::validate`].
    pub fn build_scene(&self) -> Scene {
        Scene::new(self.atmosphere_model(), self.camera())
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<SceneConfig, ConfigError> {
        let config: SceneConfig = load_json(path)?;
        config.validate()?;
        Ok(config)
    }
}

pub fn load_json<T, P>(path: P) -> Result<T, ConfigError>
where
    T: DeserializeOwned,
    P: AsRef<Path>,
{
    let mut input = String::new();
    File::open(path)
        .and_then(|mut f| f.read_to_string(&mut input))
        .map_err(ConfigError::Read)?;

    let data: T = serde_json::from_str(&input).map_err(ConfigError::Parse)?;
    Ok(data)
}
