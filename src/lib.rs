//! Rotation quaternions with axis/angle and Euler-angle construction.

pub mod config;
pub mod error;
pub mod quaternion;
pub mod vector;

pub use crate::error::{QuatError, QuatResult};
pub use crate::quaternion::Quaternion;
pub use crate::vector::Vec3;
