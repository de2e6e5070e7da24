//! Time subsystem.
//!
//! Frame timing for the context's render loop:
//! - one `FrameClock` per context
//! - `tick()` once per `window_is_open()` call to obtain `FrameTime`

mod frame_clock;

pub use frame_clock::{FrameClock, FrameTime};
