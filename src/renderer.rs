//! Per-pixel compositing of the planet surface and the atmosphere, and the parallel
//! render loop driving it.

use std::io::Stdout;
use std::sync::Mutex;
use std::time::Instant;

use pbr::ProgressBar;
use rayon::prelude::*;
use tracing::{debug, info};

use crate::atmosphere::AtmosphereModel;
use crate::camera::PinholeCamera;
use crate::film::Film;
use crate::geometry::{Hit, Primitive};
use crate::math::{RGBColor, Ray};
use crate::texture::Texture;

/// What a camera ray runs into.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum RayPath {
    /// Misses the atmosphere entirely.
    Space,
    /// Crosses the atmosphere without touching the planet. `ray` starts just past the
    /// entry point and leaves the shell at `end`, 0 for a grazing ray that never re-exits.
    Atmosphere { ray: Ray, end: f64 },
    /// Enters the atmosphere and hits the planet at `hit`, measured along `ray`.
    Surface { ray: Ray, hit: Hit },
}

impl RayPath {
    /// Ray parameter where atmospheric integration stops.
    pub fn segment_end(&self) -> f64 {
        match self {
            RayPath::Space => 0.0,
            RayPath::Atmosphere { end, .. } => *end,
            RayPath::Surface { hit, .. } => hit.time,
        }
    }
}

#[derive(Clone, Debug)]
pub struct Scene {
    pub atmosphere: AtmosphereModel,
    pub camera: PinholeCamera,
}

impl Scene {
    pub fn new(atmosphere: AtmosphereModel, camera: PinholeCamera) -> Self {
        Scene { atmosphere, camera }
    }

    pub fn classify(&self, ray: Ray) -> RayPath {
        let Some(entry) = self.atmosphere.shell.intersect(ray) else {
            return RayPath::Space;
        };
        let ray = ray.advanced_past(entry.time);
        match self.atmosphere.planet.intersect(ray) {
            Some(hit) => RayPath::Surface { ray, hit },
            None => RayPath::Atmosphere {
                ray,
                end: self
                    .atmosphere
                    .shell
                    .intersect(ray)
                    .map_or(0.0, |exit| exit.time),
            },
        }
    }

    /// Albedo at `hit` lit by the sun, before any atmospheric extinction.
    pub fn shade_surface<T: Texture + ?Sized>(&self, hit: &Hit, texture: &T) -> RGBColor {
        let planet = &self.atmosphere.planet;
        let uv = planet.uv(hit.point);
        let n = planet.world_normal(hit.point);
        texture.sample(uv.u, uv.v) * self.atmosphere.sun.irradiance(n)
    }

    /// Linear radiance arriving along a camera ray.
    ///
    /// Surface light is dimmed by the extinction along the view segment. In-scattered
    /// light already carries its own attenuation and is added on top.
    pub fn trace<T: Texture + ?Sized>(&self, ray: Ray, texture: &T) -> RGBColor {
        let path = self.classify(ray);
        let (ray, surface) = match path {
            RayPath::Space => return RGBColor::BLACK,
            RayPath::Atmosphere { ray, .. } => (ray, RGBColor::BLACK),
            RayPath::Surface { ray, hit } => (ray, self.shade_surface(&hit, texture)),
        };
        let end = path.segment_end();
        surface * self.atmosphere.transmittance(ray, end) + self.atmosphere.in_scatter(ray, end)
    }

    pub fn pixel<T: Texture + ?Sized>(&self, x: usize, y: usize, texture: &T) -> RGBColor {
        self.trace(self.camera.get_ray(x, y), texture)
    }

    /// Renders every pixel, rows are distributed over the current rayon pool.
    pub fn render<T: Texture + ?Sized>(
        &self,
        texture: &T,
        progress: Option<&Mutex<ProgressBar<Stdout>>>,
    ) -> Film<RGBColor> {
        let (width, height) = (self.camera.width, self.camera.height);
        let mut film = Film::new(width, height, RGBColor::BLACK);
        info!(width, height, threads = rayon::current_num_threads(), "rendering");
        let now = Instant::now();

        film.buffer
            .par_chunks_mut(width)
            .enumerate()
            .for_each(|(y, row)| {
                for (x, pixel) in row.iter_mut().enumerate() {
                    *pixel = self.pixel(x, y, texture);
                }
                if let Some(bar) = progress {
                    if let Ok(mut bar) = bar.lock() {
                        bar.inc();
                    }
                }
            });

        let elapsed = now.elapsed();
        info!(
            "rendered {} pixels in {:.3}s",
            film.total_pixels(),
            elapsed.as_secs_f64()
        );
        debug!(
            "{:.1} µs per pixel",
            elapsed.as_secs_f64() * 1e6 * rayon::current_num_threads() as f64
                / film.total_pixels().max(1) as f64
        );
        film
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::parsing::SceneConfig;
    use crate::texture::ConstantTexture;

    #[test]
    fn test_classification_of_reference_rays() {
        let scene = SceneConfig::default().build_scene();
        assert_eq!(scene.classify(scene.camera.get_ray(0, 0)), RayPath::Space);
        assert!(matches!(
            scene.classify(scene.camera.get_ray(320, 240)),
            RayPath::Surface { .. }
        ));
    }

    #[test]
    fn test_limb_ray_crosses_atmosphere_only() {
        let scene = SceneConfig::default().build_scene();
        // walk outwards from the center along the middle row until the planet is missed
        let path = (320..640)
            .map(|x| scene.classify(scene.camera.get_ray(x, 240)))
            .find(|p| matches!(p, RayPath::Atmosphere { .. }))
            .expect("some column sees only atmosphere");
        assert!(path.segment_end() > 0.0);
    }

    #[test]
    fn test_render_fills_every_pixel() {
        let mut config = SceneConfig::default();
        config.width = 32;
        config.height = 24;
        config.in_scatter_samples = 4;
        let scene = config.build_scene();
        let film = scene.render(&ConstantTexture(RGBColor::splat(0.5)), None);
        assert_eq!(film.buffer.len(), 32 * 24);
        assert!(film.buffer.iter().all(|c| c.is_finite() && c.a() == 1.0));
        // the corner is deep space, the center is lit planet
        assert_eq!(film.at(0, 0), RGBColor::BLACK);
        assert!(film.at(16, 12).max_channel() > 0.0);
    }

    #[test]
    fn test_render_single_pixel() {
        let mut config = SceneConfig::default();
        config.width = 1;
        config.height = 1;
        config.validate().unwrap();
        let scene = config.build_scene();
        let film = scene.render(&ConstantTexture(RGBColor::splat(0.5)), None);
        assert_eq!(film.buffer.len(), 1);
        assert!(film.at(0, 0).is_finite(), "{:?}", film.at(0, 0));
    }
}
