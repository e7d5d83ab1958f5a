//! Drawing-context acquisition: wgpu device, window surface, depth buffer and
//! per-frame swapchain images.

mod depth;
mod gpu;
mod init;
mod surface;

pub use depth::DepthTexture;
pub use gpu::{Gpu, GpuFrame};
pub use surface::SurfaceErrorAction;
pub use init::GpuInit;
