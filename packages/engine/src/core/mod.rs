//! Core value types shared by every system: vectors, colors, randomness, errors.

pub mod color;
pub mod error;
pub mod random;
pub mod vec3;

pub use color::Color;
pub use error::{BallpitError, Result};
pub use random::Rng;
pub use vec3::Vec3;
