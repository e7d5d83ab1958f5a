//! GPU rendering subsystem.
//!
//! Renderers own their GPU resources (pipelines, buffers) and record draw
//! calls into a [`RenderTarget`] provided by the frame context.
//!
//! Convention:
//! - CPU geometry is in world units, right-handed, +Y up.
//! - Vertex shaders receive `mWorld`, `mView`, `mProjection` in one uniform block.

mod ctx;
mod error;
mod mesh;
pub mod program;

pub use ctx::{RenderCtx, RenderTarget};
pub use error::SetupError;
pub use mesh::{MeshRenderer, PipelineConfig};
pub use program::{
    LinkedProgram, ProgramContract, ShaderProgram, COLOR_ATTRIBUTE, MESH_CONTRACT,
    POSITION_ATTRIBUTE,
};
