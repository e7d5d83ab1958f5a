use glam::Mat4;
use wgpu::util::DeviceExt;

use crate::geometry::Mesh;
use crate::transform::{TransformUniform, Transforms};

use super::program::{LinkedProgram, COLOR_ATTRIBUTE, POSITION_ATTRIBUTE};
use super::{RenderCtx, RenderTarget, SetupError};

/// Fixed-function state for a mesh pipeline.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct PipelineConfig {
    /// Faces to discard; front faces wind counter-clockwise.
    pub cull_mode: Option<wgpu::Face>,
    /// Depth-test against the surface depth buffer, if one exists.
    pub depth_test: bool,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            cull_mode: None,
            depth_test: false,
        }
    }
}

/// Draws one static colored mesh with a world/view/projection uniform block.
///
/// All buffers are uploaded at construction; per frame only the uniform block
/// changes.
pub struct MeshRenderer {
    pipeline: wgpu::RenderPipeline,
    bind_group: wgpu::BindGroup,
    transform_ubo: wgpu::Buffer,

    position_vbo: wgpu::Buffer,
    color_vbo: wgpu::Buffer,
    ibo: Option<wgpu::Buffer>,
    element_count: u32,

    depth_format: Option<wgpu::TextureFormat>,
}

impl MeshRenderer {
    /// Uploads `mesh` and builds a pipeline for `program`.
    pub fn new(
        ctx: &RenderCtx<'_>,
        program: &LinkedProgram,
        mesh: &Mesh,
        transforms: &Transforms,
        config: PipelineConfig,
    ) -> Result<Self, SetupError> {
        mesh.validate()?;

        let (Some(position_loc), Some(color_loc)) = (
            program.attribute_location(POSITION_ATTRIBUTE),
            program.attribute_location(COLOR_ATTRIBUTE),
        ) else {
            return Err(SetupError::ProgramLink {
                label: program.label().to_owned(),
                log: format!(
                    "mesh programs need `{POSITION_ATTRIBUTE}` and `{COLOR_ATTRIBUTE}` attributes"
                ),
            });
        };

        let position_vbo = ctx.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("gyre mesh positions"),
            contents: bytemuck::cast_slice(&mesh.positions),
            usage: wgpu::BufferUsages::VERTEX,
        });

        let color_vbo = ctx.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("gyre mesh colors"),
            contents: bytemuck::cast_slice(&mesh.colors),
            usage: wgpu::BufferUsages::VERTEX,
        });

        let ibo = mesh.indices.as_ref().map(|indices| {
            ctx.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("gyre mesh indices"),
                contents: bytemuck::cast_slice(indices),
                usage: wgpu::BufferUsages::INDEX,
            })
        });

        let transform_ubo = ctx.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("gyre transform ubo"),
            contents: bytemuck::bytes_of(&transforms.to_uniform()),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let bind_group_layout =
            ctx.device
                .create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                    label: Some("gyre mesh bgl"),
                    entries: &[wgpu::BindGroupLayoutEntry {
                        binding: 0,
                        visibility: wgpu::ShaderStages::VERTEX,
                        ty: wgpu::BindingType::Buffer {
                            ty: wgpu::BufferBindingType::Uniform,
                            has_dynamic_offset: false,
                            min_binding_size: wgpu::BufferSize::new(TransformUniform::SIZE),
                        },
                        count: None,
                    }],
                });

        let bind_group = ctx.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("gyre mesh bind group"),
            layout: &bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: transform_ubo.as_entire_binding(),
            }],
        });

        let pipeline_layout =
            ctx.device
                .create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
                    label: Some("gyre mesh pipeline layout"),
                    bind_group_layouts: &[&bind_group_layout],
                    immediate_size: 0,
                });

        let shader = ctx.device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some(program.label()),
            source: wgpu::ShaderSource::Wgsl(program.source().into()),
        });

        let position_attrs = [vec3_attribute(position_loc)];
        let color_attrs = [vec3_attribute(color_loc)];
        let buffers = [
            vec3_layout(&position_attrs),
            vec3_layout(&color_attrs),
        ];

        let depth_format = if config.depth_test {
            if ctx.depth_format.is_none() {
                log::warn!("depth test requested but the surface has no depth buffer");
            }
            ctx.depth_format
        } else {
            None
        };

        let pipeline = ctx.device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("gyre mesh pipeline"),
            layout: Some(&pipeline_layout),

            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some(program.contract().vertex_entry),
                compilation_options: Default::default(),
                buffers: &buffers,
            },

            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some(program.contract().fragment_entry),
                compilation_options: Default::default(),
                targets: &[Some(wgpu::ColorTargetState {
                    format: ctx.surface_format,
                    blend: Some(wgpu::BlendState::REPLACE),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),

            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: config.cull_mode,
                polygon_mode: wgpu::PolygonMode::Fill,
                unclipped_depth: false,
                conservative: false,
            },

            depth_stencil: depth_format.map(|format| wgpu::DepthStencilState {
                format,
                depth_write_enabled: true,
                depth_compare: wgpu::CompareFunction::Less,
                stencil: wgpu::StencilState::default(),
                bias: wgpu::DepthBiasState::default(),
            }),
            multisample: wgpu::MultisampleState::default(),

            multiview_mask: None,
            cache: None,
        });

        log::info!(
            "mesh uploaded: {} vertices, {} elements, depth {}",
            mesh.vertex_count(),
            mesh.element_count(),
            if depth_format.is_some() { "on" } else { "off" }
        );

        Ok(Self {
            pipeline,
            bind_group,
            transform_ubo,
            position_vbo,
            color_vbo,
            ibo,
            element_count: mesh.element_count() as u32,
            depth_format,
        })
    }

    /// Uploads only the world matrix.
    pub fn set_world(&self, queue: &wgpu::Queue, world: Mat4) {
        write_matrix(queue, &self.transform_ubo, TransformUniform::WORLD_OFFSET, world);
    }

    /// Uploads only the projection matrix.
    pub fn set_projection(&self, queue: &wgpu::Queue, projection: Mat4) {
        write_matrix(queue, &self.transform_ubo, TransformUniform::PROJECTION_OFFSET, projection);
    }

    /// Records one draw call into `target`, on top of its current contents.
    pub fn render(&self, target: &mut RenderTarget<'_>) {
        let depth_stencil_attachment = match (self.depth_format, target.depth_view) {
            (Some(_), Some(view)) => Some(wgpu::RenderPassDepthStencilAttachment {
                view,
                depth_ops: Some(wgpu::Operations {
                    load: wgpu::LoadOp::Load,
                    store: wgpu::StoreOp::Store,
                }),
                stencil_ops: None,
            }),
            (Some(_), None) => {
                log::warn!("mesh pipeline expects depth but the target has none; skipping draw");
                return;
            }
            (None, _) => None,
        };

        let mut rpass = target.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("gyre mesh pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: target.color_view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Load,
                    store: wgpu::StoreOp::Store,
                },
                depth_slice: None,
            })],
            depth_stencil_attachment,
            timestamp_writes: None,
            occlusion_query_set: None,
            multiview_mask: None,
        });

        rpass.set_pipeline(&self.pipeline);
        rpass.set_bind_group(0, &self.bind_group, &[]);
        rpass.set_vertex_buffer(0, self.position_vbo.slice(..));
        rpass.set_vertex_buffer(1, self.color_vbo.slice(..));

        match &self.ibo {
            Some(ibo) => {
                rpass.set_index_buffer(ibo.slice(..), wgpu::IndexFormat::Uint16);
                rpass.draw_indexed(0..self.element_count, 0, 0..1);
            }
            None => rpass.draw(0..self.element_count, 0..1),
        }
    }
}

fn vec3_attribute(location: u32) -> wgpu::VertexAttribute {
    wgpu::VertexAttribute {
        format: wgpu::VertexFormat::Float32x3,
        offset: 0,
        shader_location: location,
    }
}

fn vec3_layout(attributes: &[wgpu::VertexAttribute]) -> wgpu::VertexBufferLayout<'_> {
    wgpu::VertexBufferLayout {
        array_stride: std::mem::size_of::<[f32; 3]>() as u64,
        step_mode: wgpu::VertexStepMode::Vertex,
        attributes,
    }
}

fn write_matrix(queue: &wgpu::Queue, buffer: &wgpu::Buffer, offset: u64, m: Mat4) {
    queue.write_buffer(buffer, offset, bytemuck::bytes_of(&m.to_cols_array_2d()));
}
