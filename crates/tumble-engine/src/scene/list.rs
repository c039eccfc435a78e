use glam::Mat4;

use crate::paint::Color;
use crate::render::MeshHandle;
use crate::text::FontId;

/// One mesh drawn with a full model-view-projection transform.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct MeshDraw {
    pub mesh: MeshHandle,
    pub mvp: Mat4,
}

/// A HUD label in logical pixels; `origin` is the top-left of the line.
#[derive(Debug, Clone, PartialEq)]
pub struct TextDraw {
    pub text: String,
    pub font: FontId,
    pub size: f32,
    pub origin: (f32, f32),
    pub color: Color,
}

/// Draws recorded for one frame.
#[derive(Debug, Default)]
pub struct DrawList {
    meshes: Vec<MeshDraw>,
    texts: Vec<TextDraw>,
}

impl DrawList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clears all draws while keeping allocations.
    pub fn clear(&mut self) {
        self.meshes.clear();
        self.texts.clear();
    }

    pub fn push_mesh(&mut self, mesh: MeshHandle, mvp: Mat4) {
        self.meshes.push(MeshDraw { mesh, mvp });
    }

    pub fn push_text(&mut self, draw: TextDraw) {
        self.texts.push(draw);
    }

    pub fn meshes(&self) -> &[MeshDraw] {
        &self.meshes
    }

    pub fn texts(&self) -> &[TextDraw] {
        &self.texts
    }
}
