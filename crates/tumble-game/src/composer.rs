//! Turns placed shapes into mesh draws.

use glam::{Mat4, Vec3};
use tumble_engine::scene::DrawList;

use crate::catalog::{MeshCatalog, Shape};

/// One shape placed in the world.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Instance {
    pub shape: Shape,
    pub translation: Vec3,
    pub scale: Vec3,
}

impl Instance {
    pub fn at(shape: Shape, translation: Vec3) -> Self {
        Self { shape, translation, scale: Vec3::ONE }
    }

    pub fn scaled(self, scale: Vec3) -> Self {
        Self { scale, ..self }
    }

    /// Scale first, then translate.
    pub fn model(&self) -> Mat4 {
        Mat4::from_translation(self.translation) * Mat4::from_scale(self.scale)
    }
}

/// Applies one frame's view-projection to every instance.
#[derive(Debug, Copy, Clone)]
pub struct SceneComposer {
    view_projection: Mat4,
}

impl SceneComposer {
    pub fn new(view_projection: Mat4) -> Self {
        Self { view_projection }
    }

    pub fn mvp(&self, instance: &Instance) -> Mat4 {
        self.view_projection * instance.model()
    }

    /// Appends a mesh draw per instance, in order.
    pub fn submit(&self, catalog: &MeshCatalog, instances: &[Instance], list: &mut DrawList) {
        for instance in instances {
            match catalog.handle(instance.shape) {
                Some(mesh) => list.push_mesh(mesh, self.mvp(instance)),
                None => log::warn!("{:?} is not in the mesh catalog", instance.shape),
            }
        }
    }
}
