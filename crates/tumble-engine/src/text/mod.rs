//! Font loading for the HUD.

mod font_system;

pub use font_system::{FontId, FontLoadError, FontSystem};
