//! Time subsystem.
//!
//! `FrameClock` is ticked once per presented frame. Besides the clamped
//! delta it tracks the wall-clock time since the session (re)started, which
//! feeds the HUD timer.

mod frame_clock;

pub use frame_clock::{FrameClock, FrameTime};
