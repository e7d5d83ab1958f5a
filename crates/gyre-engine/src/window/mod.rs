//! Window + runtime loop.
//!
//! Owns the `winit` EventLoop and Window (or page canvas), and wires them to
//! the GPU layer.

mod runtime;

pub use runtime::{Runtime, RuntimeConfig};
