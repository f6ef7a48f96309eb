pub mod color;

mod misc;
mod point;
mod ray;
mod transform;
mod vec;

pub use color::*;
pub use misc::*;
pub use point::*;
pub use ray::*;
pub use transform::*;
pub use vec::*;
