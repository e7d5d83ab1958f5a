//! CPU-side geometry.
//!
//! Meshes are plain vertex/color/index arrays built once at startup and handed
//! to the GPU layer unchanged. Triangles are counter-clockwise when seen from
//! their front side.

mod cuboid;
mod hexagon;
mod mesh;

pub use cuboid::{generate_box, BoxGeometry, BOX_FACE_PALETTE, BOX_FACES};
pub use hexagon::{hexagon, HEXAGON_COLORS, HEXAGON_POSITIONS};
pub use mesh::{fan_indices, Mesh, MeshError};
