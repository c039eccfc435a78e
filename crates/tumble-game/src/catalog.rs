//! The fixed set of shapes the game draws.
//!
//! Every shape is built and uploaded once in `on_gpu_ready`; afterwards the
//! game only refers to them through `Shape` values.

use tumble_engine::render::{FillMode, MeshData, MeshError, MeshHandle, MeshRegistry, Topology, VertexColors};

/// Half extents of the board cuboid: a 0.4 x 0.4 tile, 0.1 thick.
pub const CUBOID_HALF: [f32; 3] = [0.2, 0.2, 0.05];

pub const MARKER_RADIUS: f32 = 0.2;
pub const MARKER_SEGMENTS: usize = 360;

const TILE_COLOR: [f32; 3] = [1.0, 0.5, 0.6];
const TILE_ALT_COLOR: [f32; 3] = [1.0, 1.0, 1.0];
/// Tint of the alternate tile's top corner.
const TILE_ALT_ACCENT: [f32; 3] = [1.0, 0.6, 0.0];
const TOKEN_COLOR: [f32; 3] = [102.0 / 255.0, 0.0, 0.0];
const FRAGILE_COLOR: [f32; 3] = [1.0, 0.5, 0.3];
const BLACK: [f32; 3] = [0.0, 0.0, 0.0];

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Shape {
    Triangle,
    Rectangle,
    Tile,
    TileAlt,
    Token,
    Fragile,
    FragileOutline,
    Marker,
}

impl Shape {
    pub const ALL: [Shape; 8] = [
        Shape::Triangle,
        Shape::Rectangle,
        Shape::Tile,
        Shape::TileAlt,
        Shape::Token,
        Shape::Fragile,
        Shape::FragileOutline,
        Shape::Marker,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Shape::Triangle => "triangle",
            Shape::Rectangle => "rectangle",
            Shape::Tile => "tile",
            Shape::TileAlt => "tile-alt",
            Shape::Token => "token",
            Shape::Fragile => "fragile",
            Shape::FragileOutline => "fragile-outline",
            Shape::Marker => "marker",
        }
    }

    /// Validated vertex data for this shape.
    pub fn mesh_data(self) -> Result<MeshData, MeshError> {
        match self {
            Shape::Triangle => {
                let positions: [f32; 9] = [0.0, 1.0, 0.0, -1.0, -1.0, 0.0, 1.0, -1.0, 0.0];
                let colors: [f32; 9] = [1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0];
                MeshData::build(
                    Topology::Triangles,
                    &positions,
                    VertexColors::PerVertex(&colors),
                    FillMode::Outline,
                )
            }
            Shape::Rectangle => {
                let positions: [f32; 18] = [
                    -1.2, -1.0, 0.0, 1.2, -1.0, 0.0, 1.2, 1.0, 0.0, //
                    1.2, 1.0, 0.0, -1.2, 1.0, 0.0, -1.2, -1.0, 0.0,
                ];
                let colors: [f32; 18] = [
                    1.0, 0.0, 0.0, 0.0, 0.0, 1.0, 0.0, 1.0, 0.0, //
                    0.0, 1.0, 0.0, 0.3, 0.3, 0.3, 1.0, 0.0, 0.0,
                ];
                MeshData::build(
                    Topology::Triangles,
                    &positions,
                    VertexColors::PerVertex(&colors),
                    FillMode::Fill,
                )
            }
            Shape::Tile => solid_cuboid(TILE_COLOR, FillMode::Fill),
            Shape::TileAlt => {
                let positions = cuboid_positions();
                let colors: Vec<f32> = positions
                    .chunks_exact(3)
                    .flat_map(|p| {
                        if p == CUBOID_HALF.as_slice() { TILE_ALT_ACCENT } else { TILE_ALT_COLOR }
                    })
                    .collect();
                MeshData::build(
                    Topology::Triangles,
                    &positions,
                    VertexColors::PerVertex(&colors),
                    FillMode::Fill,
                )
            }
            Shape::Token => solid_cuboid(TOKEN_COLOR, FillMode::Fill),
            Shape::Fragile => solid_cuboid(FRAGILE_COLOR, FillMode::Fill),
            Shape::FragileOutline => solid_cuboid(BLACK, FillMode::Outline),
            Shape::Marker => MeshData::build(
                Topology::Triangles,
                &disc_positions(MARKER_RADIUS, MARKER_SEGMENTS),
                VertexColors::Solid(BLACK),
                FillMode::Fill,
            ),
        }
    }
}

fn solid_cuboid(color: [f32; 3], fill: FillMode) -> Result<MeshData, MeshError> {
    MeshData::build(Topology::Triangles, &cuboid_positions(), VertexColors::Solid(color), fill)
}

/// 12 triangles, two per face, as flat `x, y, z` triples.
pub fn cuboid_positions() -> Vec<f32> {
    const CORNERS: [[f32; 3]; 8] = [
        [-1.0, -1.0, -1.0],
        [1.0, -1.0, -1.0],
        [1.0, 1.0, -1.0],
        [-1.0, 1.0, -1.0],
        [-1.0, -1.0, 1.0],
        [1.0, -1.0, 1.0],
        [1.0, 1.0, 1.0],
        [-1.0, 1.0, 1.0],
    ];
    const FACES: [[usize; 6]; 6] = [
        [0, 2, 1, 0, 3, 2], // bottom
        [4, 5, 6, 4, 6, 7], // top
        [0, 1, 5, 0, 5, 4], // -y
        [3, 7, 6, 3, 6, 2], // +y
        [0, 4, 7, 0, 7, 3], // -x
        [1, 2, 6, 1, 6, 5], // +x
    ];

    FACES
        .iter()
        .flatten()
        .flat_map(|&i| {
            let c = CORNERS[i];
            [c[0] * CUBOID_HALF[0], c[1] * CUBOID_HALF[1], c[2] * CUBOID_HALF[2]]
        })
        .collect()
}

/// Triangle fan around the origin in the XY plane.
pub fn disc_positions(radius: f32, segments: usize) -> Vec<f32> {
    let step = std::f32::consts::TAU / segments as f32;
    (0..segments)
        .flat_map(|i| {
            let (s0, c0) = (i as f32 * step).sin_cos();
            let (s1, c1) = (((i + 1) % segments) as f32 * step).sin_cos();
            [0.0, 0.0, 0.0, radius * c0, radius * s0, 0.0, radius * c1, radius * s1, 0.0]
        })
        .collect()
}

/// Handles of every uploaded shape.
#[derive(Debug, Clone)]
pub struct MeshCatalog {
    handles: Vec<(Shape, MeshHandle)>,
}

impl MeshCatalog {
    pub fn register(registry: &mut MeshRegistry, device: &wgpu::Device) -> Result<Self, MeshError> {
        let mut handles = Vec::with_capacity(Shape::ALL.len());
        for shape in Shape::ALL {
            let data = shape.mesh_data()?;
            handles.push((shape, registry.register_data(device, shape.label(), &data)));
        }
        log::info!("mesh catalog ready ({} shapes)", handles.len());
        Ok(Self { handles })
    }

    pub fn handle(&self, shape: Shape) -> Option<MeshHandle> {
        self.handles.iter().find(|(s, _)| *s == shape).map(|(_, h)| *h)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_shape_builds() {
        for shape in Shape::ALL {
            assert!(shape.mesh_data().is_ok(), "{shape:?}");
        }
    }

    #[test]
    fn vertex_counts() {
        let count = |s: Shape| shape_data(s).vertex_count();
        assert_eq!(count(Shape::Rectangle), 6);
        assert_eq!(count(Shape::Tile), 36);
        assert_eq!(count(Shape::Token), 36);
        assert_eq!(count(Shape::Marker), 360 * 3);
        // Outlines carry two vertices per triangle edge.
        assert_eq!(count(Shape::Triangle), 6);
        assert_eq!(count(Shape::FragileOutline), 72);
    }

    #[test]
    fn only_outlines_are_lines() {
        for shape in Shape::ALL {
            let outlined = matches!(shape, Shape::Triangle | Shape::FragileOutline);
            assert_eq!(shape_data(shape).is_lines(), outlined, "{shape:?}");
        }
    }

    #[test]
    fn cuboid_spans_its_half_extents() {
        let positions = cuboid_positions();
        assert_eq!(positions.len(), 36 * 3);
        for axis in 0..3 {
            let max = positions.iter().skip(axis).step_by(3).fold(f32::MIN, |m, v| m.max(*v));
            let min = positions.iter().skip(axis).step_by(3).fold(f32::MAX, |m, v| m.min(*v));
            assert!((max - CUBOID_HALF[axis]).abs() < 1e-6);
            assert!((min + CUBOID_HALF[axis]).abs() < 1e-6);
        }
    }

    #[test]
    fn alternate_tile_tints_one_corner() {
        let data = shape_data(Shape::TileAlt);
        let tinted: Vec<_> = data.vertices().iter().filter(|v| v.color == TILE_ALT_ACCENT).collect();
        assert!(!tinted.is_empty());
        assert!(tinted.iter().all(|v| v.position == CUBOID_HALF));
        assert!(data
            .vertices()
            .iter()
            .filter(|v| v.position != CUBOID_HALF)
            .all(|v| v.color == TILE_ALT_COLOR));
    }

    #[test]
    fn marker_disc_stays_inside_its_radius() {
        let positions = disc_positions(MARKER_RADIUS, MARKER_SEGMENTS);
        for p in positions.chunks_exact(3) {
            assert!((p[0] * p[0] + p[1] * p[1]).sqrt() <= MARKER_RADIUS + 1e-6);
            assert_eq!(p[2], 0.0);
        }
    }

    fn shape_data(shape: Shape) -> MeshData {
        shape.mesh_data().unwrap()
    }
}
