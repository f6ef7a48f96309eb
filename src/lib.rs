//! Ray traced planet with a single scattering atmosphere.
//!
//! A pinhole camera looks at two nested spheres, the planet and the top of its
//! atmosphere. Each camera ray is classified as deep space, atmosphere only or
//! planet hit, the surface is lit by a directional sun, and Rayleigh extinction and
//! in-scattering are integrated along the part of the ray inside the atmosphere.

pub mod atmosphere;
pub mod camera;
pub mod error;
pub mod film;
pub mod geometry;
pub mod integrator;
pub mod logging;
pub mod math;
pub mod parsing;
pub mod renderer;
pub mod texture;
pub mod tonemap;

pub use error::{ConfigError, RenderError};
pub use parsing::SceneConfig;
pub use renderer::Scene;
