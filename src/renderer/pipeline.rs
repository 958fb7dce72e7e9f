//! WebGPU render pipeline
//!
//! One pipeline, one uniform holding the playfield size, and one vertex
//! buffer that grows when a frame needs more room. Shapes stay in playfield
//! pixels; the vertex shader maps them to clip space.

use bytemuck::{Pod, Zeroable};
use wgpu::util::DeviceExt;

use super::shapes;
use super::vertex::{Vertex, colors};
use crate::sim::{GameState, Playfield};

/// Vertices the buffer is created with (a full scene fits comfortably)
const INITIAL_VERTEX_CAPACITY: usize = 1024;

/// Playfield size as the shader sees it (16-byte aligned for WebGL)
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
struct ViewportUniform {
    size: [f32; 4],
}

impl ViewportUniform {
    fn new(playfield: &Playfield) -> Self {
        Self {
            size: [playfield.width, playfield.height, 0.0, 0.0],
        }
    }
}

/// Smallest power-of-two multiple of `current` that holds `needed` vertices
fn grown_capacity(current: usize, needed: usize) -> usize {
    let mut capacity = current.max(1);
    while capacity < needed {
        capacity *= 2;
    }
    capacity
}

fn create_vertex_buffer(device: &wgpu::Device, capacity: usize) -> wgpu::Buffer {
    device.create_buffer(&wgpu::BufferDescriptor {
        label: Some("vertex_buffer"),
        size: (capacity * size_of::<Vertex>()) as wgpu::BufferAddress,
        usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
        mapped_at_creation: false,
    })
}

fn surface_config(
    surface: &wgpu::Surface<'static>,
    adapter: &wgpu::Adapter,
    width: u32,
    height: u32,
) -> wgpu::SurfaceConfiguration {
    let caps = surface.get_capabilities(adapter);
    let format = caps
        .formats
        .iter()
        .copied()
        .find(|f| f.is_srgb())
        .or_else(|| caps.formats.first().copied())
        .unwrap_or(wgpu::TextureFormat::Bgra8UnormSrgb);

    wgpu::SurfaceConfiguration {
        usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
        format,
        width: width.max(1),
        height: height.max(1),
        present_mode: wgpu::PresentMode::AutoVsync,
        alpha_mode: caps
            .alpha_modes
            .first()
            .copied()
            .unwrap_or(wgpu::CompositeAlphaMode::Auto),
        view_formats: vec![],
        desired_maximum_frame_latency: 2,
    }
}

fn build_pipeline(
    device: &wgpu::Device,
    format: wgpu::TextureFormat,
    viewport_layout: &wgpu::BindGroupLayout,
) -> wgpu::RenderPipeline {
    let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some("flat_shader"),
        source: wgpu::ShaderSource::Wgsl(include_str!("shader.wgsl").into()),
    });

    let layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some("flat_pipeline_layout"),
        bind_group_layouts: &[viewport_layout],
        immediate_size: 0,
    });

    device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some("flat_pipeline"),
        layout: Some(&layout),
        vertex: wgpu::VertexState {
            module: &shader,
            entry_point: Some("vs_main"),
            buffers: &[Vertex::layout()],
            compilation_options: Default::default(),
        },
        fragment: Some(wgpu::FragmentState {
            module: &shader,
            entry_point: Some("fs_main"),
            targets: &[Some(wgpu::ColorTargetState {
                format,
                blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                write_mask: wgpu::ColorWrites::ALL,
            })],
            compilation_options: Default::default(),
        }),
        // Shapes are emitted with mixed winding
        primitive: wgpu::PrimitiveState {
            cull_mode: None,
            ..Default::default()
        },
        depth_stencil: None,
        multisample: wgpu::MultisampleState::default(),
        multiview_mask: None,
        cache: None,
    })
}

/// GPU side of the game view
pub struct RenderState {
    pub surface: wgpu::Surface<'static>,
    pub device: wgpu::Device,
    pub queue: wgpu::Queue,
    pub config: wgpu::SurfaceConfiguration,
    pipeline: wgpu::RenderPipeline,
    viewport_buffer: wgpu::Buffer,
    viewport_bind_group: wgpu::BindGroup,
    vertex_buffer: wgpu::Buffer,
    vertex_capacity: usize,
    /// Surface size in physical pixels
    pub size: (u32, u32),
    /// Playfield the game coordinates refer to
    pub playfield: Playfield,
}

impl RenderState {
    pub async fn new(
        surface: wgpu::Surface<'static>,
        adapter: &wgpu::Adapter,
        width: u32,
        height: u32,
        playfield: Playfield,
    ) -> Result<Self, wgpu::RequestDeviceError> {
        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: Some("flappy-magic-device"),
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::downlevel_webgl2_defaults(),
                memory_hints: Default::default(),
                trace: Default::default(),
                experimental_features: Default::default(),
            })
            .await?;

        let config = surface_config(&surface, adapter, width, height);
        surface.configure(&device, &config);

        let viewport_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("viewport_uniform"),
            contents: bytemuck::bytes_of(&ViewportUniform::new(&playfield)),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let viewport_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("viewport_layout"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            }],
        });

        let viewport_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("viewport_bind_group"),
            layout: &viewport_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: viewport_buffer.as_entire_binding(),
            }],
        });

        let pipeline = build_pipeline(&device, config.format, &viewport_layout);
        let vertex_buffer = create_vertex_buffer(&device, INITIAL_VERTEX_CAPACITY);

        log::info!(
            "Renderer ready: {}x{} surface, format {:?}",
            config.width,
            config.height,
            config.format
        );

        Ok(Self {
            surface,
            device,
            queue,
            config,
            pipeline,
            viewport_buffer,
            viewport_bind_group,
            vertex_buffer,
            vertex_capacity: INITIAL_VERTEX_CAPACITY,
            size: (width, height),
            playfield,
        })
    }

    /// New backing size and/or playfield
    pub fn resize(&mut self, new_width: u32, new_height: u32, playfield: Playfield) {
        if playfield != self.playfield {
            self.playfield = playfield;
            self.queue.write_buffer(
                &self.viewport_buffer,
                0,
                bytemuck::bytes_of(&ViewportUniform::new(&playfield)),
            );
        }
        if new_width > 0 && new_height > 0 {
            self.size = (new_width, new_height);
            self.config.width = new_width;
            self.config.height = new_height;
            self.surface.configure(&self.device, &self.config);
        }
    }

    /// Draw one frame of the game
    pub fn render(
        &mut self,
        state: &GameState,
        wing_squash: f32,
    ) -> Result<(), wgpu::SurfaceError> {
        let vertices = shapes::scene(state, wing_squash);
        self.draw(&vertices)
    }

    /// Upload vertices (playfield pixels) and draw them over the background
    pub fn draw(&mut self, vertices: &[Vertex]) -> Result<(), wgpu::SurfaceError> {
        if vertices.len() > self.vertex_capacity {
            self.vertex_capacity = grown_capacity(self.vertex_capacity, vertices.len());
            self.vertex_buffer = create_vertex_buffer(&self.device, self.vertex_capacity);
            log::debug!("Vertex buffer grown to {} vertices", self.vertex_capacity);
        }
        if !vertices.is_empty() {
            self.queue
                .write_buffer(&self.vertex_buffer, 0, bytemuck::cast_slice(vertices));
        }

        let output = self.surface.get_current_texture()?;
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("frame_encoder"),
            });

        {
            let [r, g, b, a] = colors::BACKGROUND.map(f64::from);
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("frame_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color { r, g, b, a }),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
                multiview_mask: None,
            });

            if !vertices.is_empty() {
                pass.set_pipeline(&self.pipeline);
                pass.set_bind_group(0, &self.viewport_bind_group, &[]);
                pass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
                pass.draw(0..vertices.len() as u32, 0..1);
            }
        }

        self.queue.submit(std::iter::once(encoder.finish()));
        output.present();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grown_capacity() {
        assert_eq!(grown_capacity(1024, 10), 1024);
        assert_eq!(grown_capacity(1024, 1024), 1024);
        assert_eq!(grown_capacity(1024, 1025), 2048);
        assert_eq!(grown_capacity(1024, 5000), 8192);
        assert_eq!(grown_capacity(0, 3), 4);
    }

    #[test]
    fn test_viewport_uniform_is_aligned() {
        assert_eq!(size_of::<ViewportUniform>() % 16, 0);
        let u = ViewportUniform::new(&Playfield::default());
        assert_eq!(u.size[..2], [1000.0, 600.0]);
    }
}
