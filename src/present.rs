//! Window presentation: upload the CPU-shaded frame into a texture and
//! stretch it across the surface with nearest sampling. The stretch is
//! the pixel-size upscale; no shading happens on the GPU.

use std::num::NonZeroU32;

use log::{debug, warn};
use thiserror::Error;

use crate::encoder::{self, CommandEncoderExt};
use crate::frame::FrameBuffer;
use crate::screen::Size;

#[derive(Debug, Error)]
pub enum PresentError {
    #[error("no compatible graphics adapter")]
    NoAdapter,
    #[error("surface reports no supported formats")]
    NoSurfaceFormat,
    #[error("requesting device: {0}")]
    Device(#[from] wgpu::RequestDeviceError),
}

/// Texture sized to the frame buffer, plus the bind group sampling it.
/// Rebuilt whenever the buffer dimensions change.
struct FrameTexture {
    texture: wgpu::Texture,
    bind_group: wgpu::BindGroup,
    size: Size,
}

pub struct Presenter {
    surface: wgpu::Surface,
    device: wgpu::Device,
    queue: wgpu::Queue,
    surface_configuration: wgpu::SurfaceConfiguration,
    render_pipeline: wgpu::RenderPipeline,
    sampler: wgpu::Sampler,
    frame_format: wgpu::TextureFormat,
    frame_texture: Option<FrameTexture>,
}

impl Presenter {
    pub fn new(window: &winit::window::Window) -> Result<Self, PresentError> {
        let instance = wgpu::Instance::new(wgpu::Backends::all());

        let size = window.inner_size();
        let surface = unsafe { instance.create_surface(window) };

        let adapter = pollster::block_on(instance.request_adapter(&wgpu::RequestAdapterOptions {
            power_preference: Default::default(),
            force_fallback_adapter: false,
            compatible_surface: Some(&surface),
        }))
        .ok_or(PresentError::NoAdapter)?;

        let (device, queue) = pollster::block_on(adapter.request_device(
            &wgpu::DeviceDescriptor {
                label: Some("device"),
                features: wgpu::Features::empty(),
                limits: wgpu::Limits::default(),
            },
            None,
        ))?;

        let surface_format = surface
            .get_supported_formats(&adapter)
            .first()
            .copied()
            .ok_or(PresentError::NoSurfaceFormat)?;

        // Match the surface's colour space so the buffer's bytes reach
        // the screen unshifted.
        let frame_format = if surface_format.describe().srgb {
            wgpu::TextureFormat::Rgba8UnormSrgb
        } else {
            wgpu::TextureFormat::Rgba8Unorm
        };

        let surface_configuration = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: size.width,
            height: size.height,
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode: wgpu::CompositeAlphaMode::Auto,
        };
        if size.width > 0 && size.height > 0 {
            surface.configure(&device, &surface_configuration);
        }

        let shader_module = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("blit-shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("blit.wgsl").into()),
        });

        let bind_group_layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("blit-bind-group-layout"),
                entries: &[
                    wgpu::BindGroupLayoutEntry {
                        binding: 0,
                        visibility: wgpu::ShaderStages::FRAGMENT,
                        ty: wgpu::BindingType::Texture {
                            sample_type: wgpu::TextureSampleType::Float { filterable: false },
                            view_dimension: wgpu::TextureViewDimension::D2,
                            multisampled: false,
                        },
                        count: None,
                    },
                    wgpu::BindGroupLayoutEntry {
                        binding: 1,
                        visibility: wgpu::ShaderStages::FRAGMENT,
                        ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::NonFiltering),
                        count: None,
                    },
                ],
            });

        let render_pipeline_layout =
            device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
                label: Some("blit-pipeline-layout"),
                bind_group_layouts: &[&bind_group_layout],
                push_constant_ranges: &[],
            });

        let render_pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("blit-pipeline"),
            layout: Some(&render_pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader_module,
                entry_point: "vertex_main",
                buffers: &[],
            },
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleStrip,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: Some(wgpu::Face::Back),
                unclipped_depth: false,
                polygon_mode: wgpu::PolygonMode::Fill,
                conservative: false,
            },
            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            fragment: Some(wgpu::FragmentState {
                module: &shader_module,
                entry_point: "fragment_main",
                targets: &[Some(wgpu::ColorTargetState {
                    format: surface_configuration.format,
                    blend: Some(wgpu::BlendState::REPLACE),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),
            multiview: None,
        });

        // The default sampler filters with nearest, which keeps the
        // upscaled cells crisp instead of smearing them.
        let sampler = device.create_sampler(&wgpu::SamplerDescriptor::default());

        Ok(Presenter {
            surface,
            device,
            queue,
            surface_configuration,
            render_pipeline,
            sampler,
            frame_format,
            frame_texture: None,
        })
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        debug!("reconfiguring surface to {}x{}", width, height);
        self.surface_configuration.width = width;
        self.surface_configuration.height = height;
        if width > 0 && height > 0 {
            self.surface
                .configure(&self.device, &self.surface_configuration);
        }
    }

    pub fn present(&mut self, frame: &FrameBuffer) {
        let size = frame.size();
        if size.is_empty()
            || self.surface_configuration.width == 0
            || self.surface_configuration.height == 0
        {
            return;
        }

        if self.frame_texture.as_ref().map(|frame_texture| frame_texture.size) != Some(size) {
            self.rebuild_frame_texture(size);
        }
        let frame_texture = match self.frame_texture.as_ref() {
            Some(frame_texture) => frame_texture,
            None => return,
        };

        self.queue.write_texture(
            wgpu::ImageCopyTexture {
                texture: &frame_texture.texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            frame.as_bytes(),
            wgpu::ImageDataLayout {
                offset: 0,
                bytes_per_row: NonZeroU32::new(4 * size.width),
                rows_per_image: None,
            },
            wgpu::Extent3d {
                width: size.width,
                height: size.height,
                depth_or_array_layers: 1,
            },
        );

        let surface_texture = match self.surface.get_current_texture() {
            Ok(surface_texture) => surface_texture,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                self.surface
                    .configure(&self.device, &self.surface_configuration);
                return;
            }
            Err(error) => {
                warn!("dropping frame: {}", error);
                return;
            }
        };

        let surface_texture_view = surface_texture
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let command_buffer = encoder::record(&self.device, "present", |command_encoder| {
            command_encoder.push_debug_group("blit-pass");
            command_encoder.with_render_pass(
                &wgpu::RenderPassDescriptor {
                    label: Some("blit-pass"),
                    color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                        view: &surface_texture_view,
                        resolve_target: None,
                        ops: wgpu::Operations {
                            load: wgpu::LoadOp::Clear(wgpu::Color::BLACK),
                            store: true,
                        },
                    })],
                    depth_stencil_attachment: None,
                },
                |render_pass| {
                    render_pass.set_pipeline(&self.render_pipeline);
                    render_pass.set_bind_group(0, &frame_texture.bind_group, &[]);
                    render_pass.draw(0..4, 0..1);
                },
            );
            command_encoder.pop_debug_group();
        });

        self.queue.submit([command_buffer]);
        surface_texture.present();
    }

    fn rebuild_frame_texture(&mut self, size: Size) {
        debug!(
            "rebuilding frame texture at {}x{}",
            size.width, size.height
        );

        let texture = self.device.create_texture(&wgpu::TextureDescriptor {
            label: Some("frame-texture"),
            size: wgpu::Extent3d {
                width: size.width,
                height: size.height,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: self.frame_format,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
        });

        let texture_view = texture.create_view(&wgpu::TextureViewDescriptor::default());

        let bind_group = self.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("blit-bind-group"),
            layout: &self.render_pipeline.get_bind_group_layout(0),
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(&texture_view),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::Sampler(&self.sampler),
                },
            ],
        });

        self.frame_texture = Some(FrameTexture {
            texture,
            bind_group,
            size,
        });
    }
}
