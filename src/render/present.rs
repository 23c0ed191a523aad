use std::sync::Arc;
use wgpu::{BindGroup, Device, RenderPipeline, SurfaceConfiguration, Texture, TextureView};
use winit::window::Window;

use super::backend::{GeometryHandle, GraphicsBackend, MaterialHandle, RenderError};
use super::gpu::GpuContext;
use super::raster::SoftwareBackend;
use crate::core::{SurfaceId, Viewport};
use crate::scene::{Geometry, Material, PerspectiveCamera, Scene};

/// Uploads an RGBA framebuffer to a texture and draws it to the window
pub struct SurfacePresenter {
    surface_config: SurfaceConfiguration,
    render_pipeline: RenderPipeline,
    texture: Texture,
    bind_group: BindGroup,
    width: u32,
    height: u32,
}

impl SurfacePresenter {
    pub fn new(gpu: &GpuContext, viewport: Viewport) -> Result<Self, RenderError> {
        let (width, height) = (viewport.width.max(1), viewport.height.max(1));

        let caps = gpu.surface_capabilities();
        let format = caps
            .formats
            .iter()
            .find(|f| !f.is_srgb())
            .or_else(|| caps.formats.first())
            .copied()
            .ok_or_else(|| RenderError::Surface("surface reports no formats".into()))?;
        let alpha_mode = caps
            .alpha_modes
            .first()
            .copied()
            .unwrap_or(wgpu::CompositeAlphaMode::Auto);

        let surface_config = SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width,
            height,
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        gpu.surface().configure(gpu.device(), &surface_config);

        let texture = Self::create_frame_texture(gpu.device(), width, height);
        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        let (render_pipeline, bind_group) = Self::create_render_pipeline(gpu.device(), &view, format);

        Ok(Self {
            surface_config,
            render_pipeline,
            texture,
            bind_group,
            width,
            height,
        })
    }

    /// Present one frame; `pixels` must be `width * height` RGBA texels
    pub fn present(&self, gpu: &GpuContext, pixels: &[u8]) -> Result<(), RenderError> {
        let expected = self.width as usize * self.height as usize * 4;
        if pixels.len() != expected {
            return Err(RenderError::Surface(format!(
                "framebuffer is {} bytes, surface expects {}",
                pixels.len(),
                expected
            )));
        }

        gpu.queue().write_texture(
            self.texture.as_image_copy(),
            pixels,
            wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(4 * self.width),
                rows_per_image: Some(self.height),
            },
            wgpu::Extent3d {
                width: self.width,
                height: self.height,
                depth_or_array_layers: 1,
            },
        );

        let frame = match gpu.surface().get_current_texture() {
            Ok(frame) => frame,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                // Reconfigure and skip this frame
                gpu.surface().configure(gpu.device(), &self.surface_config);
                return Ok(());
            }
            Err(e) => return Err(RenderError::Surface(e.to_string())),
        };
        let view = frame.texture.create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = gpu.device().create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("Present Encoder"),
        });

        {
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Present Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color::BLACK),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            pass.set_pipeline(&self.render_pipeline);
            pass.set_bind_group(0, &self.bind_group, &[]);
            pass.draw(0..3, 0..1);
        }

        gpu.queue().submit(Some(encoder.finish()));
        frame.present();
        Ok(())
    }

    pub fn resize(&mut self, gpu: &GpuContext, viewport: Viewport) {
        if viewport.is_empty() {
            return;
        }

        self.width = viewport.width;
        self.height = viewport.height;
        self.surface_config.width = viewport.width;
        self.surface_config.height = viewport.height;
        gpu.surface().configure(gpu.device(), &self.surface_config);

        self.texture = Self::create_frame_texture(gpu.device(), self.width, self.height);
        let view = self.texture.create_view(&wgpu::TextureViewDescriptor::default());
        let layout = self.render_pipeline.get_bind_group_layout(0);
        self.bind_group = Self::create_bind_group(gpu.device(), &layout, &view);
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn create_frame_texture(device: &Device, width: u32, height: u32) -> Texture {
        device.create_texture(&wgpu::TextureDescriptor {
            label: Some("Frame Texture"),
            size: wgpu::Extent3d {
                width,
                height,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::Rgba8Unorm,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        })
    }

    fn create_render_pipeline(
        device: &Device,
        view: &TextureView,
        format: wgpu::TextureFormat,
    ) -> (RenderPipeline, BindGroup) {
        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Display Shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("display.wgsl").into()),
        });

        let layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Frame Bind Group Layout"),
            entries: &[
                wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Texture {
                        sample_type: wgpu::TextureSampleType::Float { filterable: true },
                        view_dimension: wgpu::TextureViewDimension::D2,
                        multisampled: false,
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 1,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                    count: None,
                },
            ],
        });

        let bind_group = Self::create_bind_group(device, &layout, view);

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Present Pipeline Layout"),
            bind_group_layouts: &[&layout],
            push_constant_ranges: &[],
        });

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("Present Pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                buffers: &[],
                compilation_options: Default::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                targets: &[Some(wgpu::ColorTargetState {
                    format,
                    blend: Some(wgpu::BlendState::REPLACE),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: Default::default(),
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                ..Default::default()
            },
            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            multiview: None,
            cache: None,
        });

        (pipeline, bind_group)
    }

    fn create_bind_group(device: &Device, layout: &wgpu::BindGroupLayout, view: &TextureView) -> BindGroup {
        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("Frame Sampler"),
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            address_mode_w: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Nearest,
            min_filter: wgpu::FilterMode::Nearest,
            mipmap_filter: wgpu::FilterMode::Nearest,
            ..Default::default()
        });

        device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Frame Bind Group"),
            layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(view),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::Sampler(&sampler),
                },
            ],
        })
    }
}

/// Software rasterizer presented through a wgpu window surface
///
/// Only one surface exists per window; it is created on the first
/// `create_surface` and torn down by `destroy_surface`.
pub struct WindowBackend {
    gpu: GpuContext,
    raster: SoftwareBackend,
    presenter: Option<(SurfaceId, SurfacePresenter)>,
}

impl WindowBackend {
    pub fn new(window: Arc<Window>) -> Result<Self, RenderError> {
        let gpu = pollster::block_on(GpuContext::for_window(window))?;
        Ok(Self {
            gpu,
            raster: SoftwareBackend::new(),
            presenter: None,
        })
    }

    pub fn raster(&self) -> &SoftwareBackend {
        &self.raster
    }
}

impl GraphicsBackend for WindowBackend {
    fn create_surface(&mut self, viewport: Viewport) -> Result<SurfaceId, RenderError> {
        if self.presenter.is_some() {
            return Err(RenderError::Surface("window already has a surface".into()));
        }
        let presenter = SurfacePresenter::new(&self.gpu, viewport)?;
        let id = self.raster.create_surface(viewport)?;
        self.presenter = Some((id, presenter));
        Ok(id)
    }

    fn resize_surface(&mut self, surface: SurfaceId, viewport: Viewport) {
        self.raster.resize_surface(surface, viewport);
        if let Some((id, presenter)) = self.presenter.as_mut() {
            if *id == surface {
                presenter.resize(&self.gpu, viewport);
            }
        }
    }

    fn destroy_surface(&mut self, surface: SurfaceId) {
        if matches!(self.presenter, Some((id, _)) if id == surface) {
            self.presenter = None;
        }
        self.raster.destroy_surface(surface);
    }

    fn create_geometry(&mut self, geometry: Geometry) -> GeometryHandle {
        self.raster.create_geometry(geometry)
    }

    fn create_material(&mut self, material: Material) -> MaterialHandle {
        self.raster.create_material(material)
    }

    fn dispose_geometry(&mut self, handle: GeometryHandle) {
        self.raster.dispose_geometry(handle);
    }

    fn dispose_material(&mut self, handle: MaterialHandle) {
        self.raster.dispose_material(handle);
    }

    fn render(&mut self, surface: SurfaceId, scene: &Scene, camera: &PerspectiveCamera) -> Result<(), RenderError> {
        self.raster.render(surface, scene, camera)?;

        let Some((_, presenter)) = self.presenter.as_ref().filter(|(id, _)| *id == surface) else {
            return Err(RenderError::NoSurface(surface));
        };
        let fb = self.raster.framebuffer(surface).ok_or(RenderError::NoSurface(surface))?;

        // The presenter ignores zero-sized resizes; skip frames until sizes agree
        if fb.dimensions() != presenter.dimensions() {
            return Ok(());
        }
        presenter.present(&self.gpu, fb.as_bytes())
    }
}
