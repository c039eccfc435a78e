//! Paint model shared between the game and the renderers.

pub mod color;

pub use color::Color;
