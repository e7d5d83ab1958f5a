use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec3};

/// Look-at camera with a perspective lens.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Camera {
    pub eye: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    /// Vertical field of view, in radians.
    pub fov_y: f32,
    pub near: f32,
    pub far: f32,
}

impl Camera {
    pub fn looking_at(eye: Vec3, target: Vec3) -> Self {
        Self {
            eye,
            target,
            up: Vec3::Y,
            fov_y: 90f32.to_radians(),
            near: 0.1,
            far: 1000.0,
        }
    }

    pub fn view(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.target, self.up)
    }

    /// Perspective projection for a `width / height` aspect ratio.
    ///
    /// Non-finite or non-positive aspects (zero-sized surfaces) fall back to 1.
    pub fn projection(&self, aspect: f32) -> Mat4 {
        let aspect = if aspect.is_finite() && aspect > 0.0 { aspect } else { 1.0 };
        Mat4::perspective_rh(self.fov_y, aspect, self.near, self.far)
    }
}

/// The three matrices uploaded every frame.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Transforms {
    pub world: Mat4,
    pub view: Mat4,
    pub projection: Mat4,
}

impl Transforms {
    pub fn new(camera: &Camera, aspect: f32) -> Self {
        Self {
            world: Mat4::IDENTITY,
            view: camera.view(),
            projection: camera.projection(aspect),
        }
    }

    /// Full model-to-clip transform, `projection * view * world`.
    pub fn clip_from_model(&self) -> Mat4 {
        self.projection * self.view * self.world
    }

    pub fn to_uniform(&self) -> TransformUniform {
        TransformUniform {
            world: self.world.to_cols_array_2d(),
            view: self.view.to_cols_array_2d(),
            projection: self.projection.to_cols_array_2d(),
        }
    }
}

/// GPU layout of the `Transforms` uniform block (`mWorld`, `mView`, `mProjection`).
#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
pub struct TransformUniform {
    pub world: [[f32; 4]; 4],
    pub view: [[f32; 4]; 4],
    pub projection: [[f32; 4]; 4],
}

impl TransformUniform {
    pub const SIZE: u64 = std::mem::size_of::<TransformUniform>() as u64;

    /// Byte offset of the world matrix, for partial per-frame updates.
    pub const WORLD_OFFSET: u64 = 0;

    /// Byte offset of the projection matrix.
    pub const PROJECTION_OFFSET: u64 = 128;
}
