//! World/view/projection transforms.
//!
//! Conventions:
//! - right-handed world space, +Y up
//! - clip-space depth in `[0, 1]` (wgpu)
//! - matrices are column-major `glam::Mat4`

mod camera;
mod spin;

pub use camera::{Camera, TransformUniform, Transforms};
pub use spin::Spin;
