//! Time subsystem.
//!
//! Provides frame timing utilities without coupling to the runtime.
//! Intended usage:
//! - one `FrameClock` per window (or per render loop)
//! - call `tick()` once per presented frame to obtain `FrameTime`
//! - drive animations from `FrameTime::elapsed`, not from summed `dt`

mod frame_clock;
mod instant;

pub use frame_clock::{FrameClock, FrameTime};
pub use instant::Instant;
