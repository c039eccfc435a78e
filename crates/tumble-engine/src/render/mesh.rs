//! Mesh registry.
//!
//! Geometry is uploaded once at startup. Callers get back an opaque
//! `MeshHandle` and issue draws with it every frame; the registry never
//! changes a mesh after registration.

use std::fmt;

use bytemuck::{Pod, Zeroable};
use wgpu::util::DeviceExt;

use crate::paint::color::srgb_to_linear;

// ── input description ─────────────────────────────────────────────────────

/// How the incoming vertex list is grouped.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Topology {
    /// Every 3 vertices form a triangle.
    Triangles,
    /// Every 2 vertices form a segment.
    Lines,
}

/// How triangles are rasterized.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum FillMode {
    Fill,
    /// Only triangle edges are drawn. Lines ignore this.
    Outline,
}

/// Per-vertex colors as flat `r, g, b` triples, or one color for the whole mesh.
///
/// Channels are sRGB in `[0, 1]`.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum VertexColors<'a> {
    PerVertex(&'a [f32]),
    Solid([f32; 3]),
}

// ── errors ────────────────────────────────────────────────────────────────

/// Rejected mesh description.
#[derive(Debug, Clone, PartialEq)]
pub enum MeshError {
    /// No vertices were supplied.
    Empty,
    /// A flat float array was not a multiple of 3.
    NotTriples { what: &'static str, len: usize },
    /// Per-vertex colors do not match the vertex count.
    ColorCountMismatch { vertices: usize, colors: usize },
    /// The vertex count does not close the last primitive.
    IncompletePrimitive { topology: Topology, vertices: usize },
}

impl fmt::Display for MeshError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MeshError::Empty => write!(f, "mesh has no vertices"),
            MeshError::NotTriples { what, len } => {
                write!(f, "{what} array has {len} floats, expected a multiple of 3")
            }
            MeshError::ColorCountMismatch { vertices, colors } => {
                write!(f, "mesh has {vertices} vertices but {colors} colors")
            }
            MeshError::IncompletePrimitive { topology, vertices } => {
                write!(f, "{vertices} vertices do not form whole {topology:?} primitives")
            }
        }
    }
}

impl std::error::Error for MeshError {}

// ── CPU mesh ──────────────────────────────────────────────────────────────

#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct MeshVertex {
    pub position: [f32; 3],
    pub color: [f32; 3],
}

impl MeshVertex {
    const ATTRS: [wgpu::VertexAttribute; 2] = wgpu::vertex_attr_array![
        0 => Float32x3, // position
        1 => Float32x3  // color
    ];

    pub(crate) fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<MeshVertex>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRS,
        }
    }
}

/// Primitive the GPU will actually rasterize.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub(crate) enum Primitive {
    TriangleList,
    LineList,
}

/// Validated, interleaved vertex data ready for upload.
///
/// Outlined triangles are expanded into their three edges here, so the
/// renderer only needs a triangle and a line pipeline.
#[derive(Debug, Clone, PartialEq)]
pub struct MeshData {
    primitive: Primitive,
    vertices: Vec<MeshVertex>,
}

impl MeshData {
    pub fn build(
        topology: Topology,
        positions: &[f32],
        colors: VertexColors<'_>,
        fill: FillMode,
    ) -> Result<Self, MeshError> {
        if positions.is_empty() {
            return Err(MeshError::Empty);
        }
        if positions.len() % 3 != 0 {
            return Err(MeshError::NotTriples { what: "position", len: positions.len() });
        }

        let count = positions.len() / 3;
        let per_primitive = match topology {
            Topology::Triangles => 3,
            Topology::Lines => 2,
        };
        if count % per_primitive != 0 {
            return Err(MeshError::IncompletePrimitive { topology, vertices: count });
        }

        if let VertexColors::PerVertex(c) = colors {
            if c.len() % 3 != 0 {
                return Err(MeshError::NotTriples { what: "color", len: c.len() });
            }
            if c.len() / 3 != count {
                return Err(MeshError::ColorCountMismatch { vertices: count, colors: c.len() / 3 });
            }
        }

        let color_at = |i: usize| -> [f32; 3] {
            match colors {
                VertexColors::PerVertex(c) => [c[i * 3], c[i * 3 + 1], c[i * 3 + 2]],
                VertexColors::Solid(c) => c,
            }
        };

        let mut flat: Vec<MeshVertex> = positions
            .chunks_exact(3)
            .enumerate()
            .map(|(i, p)| MeshVertex { position: [p[0], p[1], p[2]], color: color_at(i) })
            .collect();

        let primitive = match (topology, fill) {
            (Topology::Triangles, FillMode::Fill) => Primitive::TriangleList,
            (Topology::Triangles, FillMode::Outline) => {
                flat = triangle_edges(&flat);
                Primitive::LineList
            }
            (Topology::Lines, _) => Primitive::LineList,
        };

        Ok(Self { primitive, vertices: flat })
    }

    pub fn vertices(&self) -> &[MeshVertex] {
        &self.vertices
    }

    pub fn vertex_count(&self) -> u32 {
        self.vertices.len() as u32
    }

    pub fn is_lines(&self) -> bool {
        self.primitive == Primitive::LineList
    }
}

fn triangle_edges(tris: &[MeshVertex]) -> Vec<MeshVertex> {
    let mut edges = Vec::with_capacity(tris.len() * 2);
    for t in tris.chunks_exact(3) {
        edges.extend_from_slice(&[t[0], t[1], t[1], t[2], t[2], t[0]]);
    }
    edges
}

// ── GPU registry ──────────────────────────────────────────────────────────

/// Opaque reference to a registered mesh.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct MeshHandle(u32);

pub(crate) struct GpuMesh {
    pub primitive: Primitive,
    pub vertex_buffer: wgpu::Buffer,
    pub vertex_count: u32,
}

/// Owns every uploaded mesh for the lifetime of the GPU context.
#[derive(Default)]
pub struct MeshRegistry {
    meshes: Vec<GpuMesh>,
}

impl MeshRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validates and uploads a mesh, returning its handle.
    pub fn register(
        &mut self,
        device: &wgpu::Device,
        label: &str,
        topology: Topology,
        positions: &[f32],
        colors: VertexColors<'_>,
        fill: FillMode,
    ) -> Result<MeshHandle, MeshError> {
        let data = MeshData::build(topology, positions, colors, fill)?;
        Ok(self.register_data(device, label, &data))
    }

    /// Uploads already validated data.
    pub fn register_data(&mut self, device: &wgpu::Device, label: &str, data: &MeshData) -> MeshHandle {
        let linear: Vec<MeshVertex> = data
            .vertices
            .iter()
            .map(|v| MeshVertex {
                position: v.position,
                color: v.color.map(srgb_to_linear),
            })
            .collect();

        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(label),
            contents: bytemuck::cast_slice(&linear),
            usage: wgpu::BufferUsages::VERTEX,
        });

        let handle = MeshHandle(self.meshes.len() as u32);
        self.meshes.push(GpuMesh {
            primitive: data.primitive,
            vertex_buffer,
            vertex_count: data.vertex_count(),
        });

        log::debug!(
            "registered mesh {label:?} as {handle:?} ({} vertices, {:?})",
            data.vertex_count(),
            data.primitive
        );
        handle
    }

    pub(crate) fn get(&self, handle: MeshHandle) -> Option<&GpuMesh> {
        self.meshes.get(handle.0 as usize)
    }
}
