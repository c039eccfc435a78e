//! Scene (draw stream) types.
//!
//! The game fills a `DrawList` each frame; renderers consume it. Mesh draws
//! keep submission order, with depth testing doing the visibility work.

mod list;

pub use list::{DrawList, MeshDraw, TextDraw};
