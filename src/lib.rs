//! Recursive ray tracer for mirrored spheres lit by bulbs, rendered through
//! a parallel camera and supersampled over a ladder of resolutions.

pub mod algebra;
pub mod camera;
pub mod caster;
pub mod error;
pub mod light;
pub mod material;
pub mod object;
pub mod renderer;
pub mod scene;
pub mod sphere;

pub use algebra::{Color, Vec3};
pub use caster::cast;
pub use error::{Error, Result};
pub use scene::{Scene, Setup};
