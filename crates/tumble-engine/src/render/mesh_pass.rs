use bytemuck::{Pod, Zeroable};

use crate::device::DEPTH_FORMAT;
use crate::render::mesh::{GpuMesh, MeshRegistry, MeshVertex, Primitive};
use crate::render::shader::{ShaderProgram, ShaderSources};
use crate::render::{RenderCtx, RenderTarget};
use crate::scene::MeshDraw;

// ── per-draw uniform ──────────────────────────────────────────────────────

#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
struct DrawUniform {
    mvp: [[f32; 4]; 4],
}

const DRAW_UNIFORM_SIZE: u64 = std::mem::size_of::<DrawUniform>() as u64;

// ── renderer ──────────────────────────────────────────────────────────────

/// Renders `MeshDraw`s with depth testing.
///
/// Every draw gets its own slot in one uniform buffer, addressed with a
/// dynamic offset. Triangles and lines use two pipelines built from the same
/// shader program.
pub struct MeshRenderer {
    sources: ShaderSources,

    pipeline_format: Option<wgpu::TextureFormat>,
    triangle_pipeline: Option<wgpu::RenderPipeline>,
    line_pipeline: Option<wgpu::RenderPipeline>,
    bind_group_layout: Option<wgpu::BindGroupLayout>,

    uniform_buffer: Option<wgpu::Buffer>,
    bind_group: Option<wgpu::BindGroup>,
    uniform_capacity: usize,
    uniform_stride: u64,

    staging: Vec<u8>,
}

impl MeshRenderer {
    pub fn new(sources: ShaderSources) -> Self {
        Self {
            sources,
            pipeline_format: None,
            triangle_pipeline: None,
            line_pipeline: None,
            bind_group_layout: None,
            uniform_buffer: None,
            bind_group: None,
            uniform_capacity: 0,
            uniform_stride: DRAW_UNIFORM_SIZE,
            staging: Vec::new(),
        }
    }

    /// Builds the pipelines now instead of on the first frame.
    pub fn prepare(&mut self, device: &wgpu::Device, surface_format: wgpu::TextureFormat) {
        self.ensure_pipelines(device, surface_format);
    }

    pub fn render(
        &mut self,
        ctx: &RenderCtx<'_>,
        target: &mut RenderTarget<'_>,
        registry: &MeshRegistry,
        draws: &[MeshDraw],
    ) {
        if draws.is_empty() {
            return;
        }

        self.ensure_pipelines(ctx.device, ctx.surface_format);
        self.ensure_uniform_capacity(ctx, draws.len());
        self.write_uniforms(ctx, draws);

        let Some(triangles) = self.triangle_pipeline.as_ref() else { return };
        let Some(lines) = self.line_pipeline.as_ref() else { return };
        let Some(bind_group) = self.bind_group.as_ref() else { return };

        let mut rpass = target.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("tumble mesh pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: target.color_view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Load,
                    store: wgpu::StoreOp::Store,
                },
                depth_slice: None,
            })],
            depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                view: target.depth_view,
                depth_ops: Some(wgpu::Operations {
                    load: wgpu::LoadOp::Load,
                    store: wgpu::StoreOp::Store,
                }),
                stencil_ops: None,
            }),
            timestamp_writes: None,
            occlusion_query_set: None,
            multiview_mask: None,
        });

        let mut bound: Option<Primitive> = None;
        for (i, draw) in draws.iter().enumerate() {
            let Some(mesh) = registry.get(draw.mesh) else {
                log::warn!("draw of unregistered mesh {:?} skipped", draw.mesh);
                continue;
            };

            if bound != Some(mesh.primitive) {
                rpass.set_pipeline(match mesh.primitive {
                    Primitive::TriangleList => triangles,
                    Primitive::LineList => lines,
                });
                bound = Some(mesh.primitive);
            }

            let offset = (i as u64 * self.uniform_stride) as u32;
            rpass.set_bind_group(0, bind_group, &[offset]);
            draw_mesh(&mut rpass, mesh);
        }
    }

    // ── lazy-init helpers ──────────────────────────────────────────────────

    fn ensure_pipelines(&mut self, device: &wgpu::Device, format: wgpu::TextureFormat) {
        if self.pipeline_format == Some(format) && self.triangle_pipeline.is_some() {
            return;
        }

        let program = ShaderProgram::compile(device, &self.sources);

        let bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("tumble mesh bgl"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: true,
                    min_binding_size: wgpu::BufferSize::new(DRAW_UNIFORM_SIZE),
                },
                count: None,
            }],
        });

        let layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("tumble mesh pipeline layout"),
            bind_group_layouts: &[&bgl],
            immediate_size: 0,
        });

        let build = |label: &str, topology: wgpu::PrimitiveTopology| {
            device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
                label: Some(label),
                layout: Some(&layout),
                vertex: wgpu::VertexState {
                    module: &program.vertex,
                    entry_point: Some("vs_main"),
                    compilation_options: Default::default(),
                    buffers: &[MeshVertex::layout()],
                },
                fragment: Some(wgpu::FragmentState {
                    module: &program.fragment,
                    entry_point: Some("fs_main"),
                    compilation_options: Default::default(),
                    targets: &[Some(wgpu::ColorTargetState {
                        format,
                        blend: Some(wgpu::BlendState::REPLACE),
                        write_mask: wgpu::ColorWrites::ALL,
                    })],
                }),
                primitive: wgpu::PrimitiveState {
                    topology,
                    strip_index_format: None,
                    front_face: wgpu::FrontFace::Ccw,
                    cull_mode: None,
                    polygon_mode: wgpu::PolygonMode::Fill,
                    unclipped_depth: false,
                    conservative: false,
                },
                depth_stencil: Some(wgpu::DepthStencilState {
                    format: DEPTH_FORMAT,
                    depth_write_enabled: true,
                    depth_compare: wgpu::CompareFunction::LessEqual,
                    stencil: wgpu::StencilState::default(),
                    bias: wgpu::DepthBiasState::default(),
                }),
                multisample: wgpu::MultisampleState::default(),
                multiview_mask: None,
                cache: None,
            })
        };

        self.triangle_pipeline = Some(build("tumble mesh triangles", wgpu::PrimitiveTopology::TriangleList));
        self.line_pipeline = Some(build("tumble mesh lines", wgpu::PrimitiveTopology::LineList));

        let align = device.limits().min_uniform_buffer_offset_alignment as u64;
        self.uniform_stride = DRAW_UNIFORM_SIZE.div_ceil(align) * align;

        self.pipeline_format = Some(format);
        self.bind_group_layout = Some(bgl);
        self.bind_group = None;
        self.uniform_buffer = None;
        self.uniform_capacity = 0;
    }

    fn ensure_uniform_capacity(&mut self, ctx: &RenderCtx<'_>, required: usize) {
        if required <= self.uniform_capacity && self.bind_group.is_some() {
            return;
        }
        let Some(bgl) = self.bind_group_layout.as_ref() else { return };

        let capacity = required.next_power_of_two().max(64);
        let buffer = ctx.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("tumble mesh draw uniforms"),
            size: capacity as u64 * self.uniform_stride,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let bind_group = ctx.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("tumble mesh bind group"),
            layout: bgl,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: wgpu::BindingResource::Buffer(wgpu::BufferBinding {
                    buffer: &buffer,
                    offset: 0,
                    size: wgpu::BufferSize::new(DRAW_UNIFORM_SIZE),
                }),
            }],
        });

        self.uniform_buffer = Some(buffer);
        self.bind_group = Some(bind_group);
        self.uniform_capacity = capacity;
    }

    fn write_uniforms(&mut self, ctx: &RenderCtx<'_>, draws: &[MeshDraw]) {
        let Some(buffer) = self.uniform_buffer.as_ref() else { return };

        let stride = self.uniform_stride as usize;
        self.staging.clear();
        self.staging.resize(draws.len() * stride, 0);

        for (i, draw) in draws.iter().enumerate() {
            let uniform = DrawUniform { mvp: draw.mvp.to_cols_array_2d() };
            let start = i * stride;
            self.staging[start..start + DRAW_UNIFORM_SIZE as usize]
                .copy_from_slice(bytemuck::bytes_of(&uniform));
        }

        ctx.queue.write_buffer(buffer, 0, &self.staging);
    }
}

fn draw_mesh(rpass: &mut wgpu::RenderPass<'_>, mesh: &GpuMesh) {
    rpass.set_vertex_buffer(0, mesh.vertex_buffer.slice(..));
    rpass.draw(0..mesh.vertex_count, 0..1);
}
