//! Tumble engine crate.
//!
//! This crate owns the platform + GPU runtime pieces used by the game:
//! window and event loop, input translation, frame timing, the mesh registry
//! and its renderer, the HUD text renderer and logger setup.

pub mod device;
pub mod window;
pub mod input;
pub mod time;
pub mod core;

pub mod logging;
pub mod paint;
pub mod render;
pub mod scene;
pub mod text;
