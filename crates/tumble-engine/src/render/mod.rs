//! GPU rendering subsystem.
//!
//! Renderers consume the `scene` draw list and issue wgpu commands. Each
//! renderer owns its GPU resources (pipelines, buffers) and creates them
//! lazily on first use.
//!
//! Conventions:
//! - mesh geometry is in world units, transformed by a per-draw MVP matrix
//! - HUD text is in logical pixels (top-left origin, +Y down)

mod ctx;
pub mod mesh;
pub mod mesh_pass;
pub mod shader;
pub mod text;

pub use ctx::{RenderCtx, RenderTarget};
pub use mesh::{FillMode, MeshData, MeshError, MeshHandle, MeshRegistry, MeshVertex, Topology, VertexColors};
pub use mesh_pass::MeshRenderer;
pub use shader::{ShaderProgram, ShaderSources};
pub use text::TextRenderer;
