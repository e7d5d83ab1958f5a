//! Gyre engine crate.
//!
//! This crate owns the platform + GPU runtime pieces used by the demos:
//! surface acquisition, shader program checks, static mesh upload and the
//! per-frame transform updates.

pub mod core;
pub mod device;
pub mod time;
pub mod window;

pub mod geometry;
pub mod logging;
pub mod paint;
pub mod render;
pub mod transform;
