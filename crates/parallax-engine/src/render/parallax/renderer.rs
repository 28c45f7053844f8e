use wgpu::util::DeviceExt;

use crate::render::image::ImageData;
use crate::render::plane::{PlaneGeometry, PlaneVertex};
use crate::render::{RenderCtx, RenderTarget};

use super::uniform::ParallaxUniform;

/// Texture filtering applied to both the photo and the depth map.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct SamplerQuality {
    /// Linear filtering; `false` selects nearest.
    pub linear: bool,

    /// Anisotropy clamp in `1..=16`. Only honored with linear filtering.
    pub anisotropy: u16,
}

impl Default for SamplerQuality {
    fn default() -> Self {
        Self {
            linear: true,
            anisotropy: 16,
        }
    }
}

/// Everything the renderer needs for one frame.
///
/// `generation` identifies the photo/depth/plane content. Textures and
/// geometry are uploaded when it changes and reused otherwise; only the
/// uniform block is written every frame.
pub struct ParallaxDraw<'a> {
    pub generation: u64,
    pub plane: &'a PlaneGeometry,
    pub photo: &'a ImageData,
    pub depth: &'a ImageData,
    pub uniform: ParallaxUniform,
}

/// Draws the depth-parallax plane.
///
/// All GPU resources are created lazily on the first `render` call:
/// - pipeline per surface format
/// - sampler, uniform buffer once
/// - textures and plane buffers per content generation
#[derive(Default)]
pub struct ParallaxRenderer {
    quality: SamplerQuality,

    pipeline_format: Option<wgpu::TextureFormat>,
    pipeline: Option<wgpu::RenderPipeline>,
    bind_group_layout: Option<wgpu::BindGroupLayout>,

    sampler: Option<wgpu::Sampler>,
    uniform_ubo: Option<wgpu::Buffer>,

    content_generation: Option<u64>,
    content: Option<GpuContent>,

    bind_group: Option<wgpu::BindGroup>,
    bind_group_generation: Option<u64>,
}

/// Per-generation GPU resources.
struct GpuContent {
    _photo: wgpu::Texture,
    photo_view: wgpu::TextureView,
    _depth: wgpu::Texture,
    depth_view: wgpu::TextureView,
    vbo: wgpu::Buffer,
    ibo: wgpu::Buffer,
    index_count: u32,
}

impl ParallaxRenderer {
    pub fn new(quality: SamplerQuality) -> Self {
        Self {
            quality,
            ..Self::default()
        }
    }

    /// Renders the plane into `target`.
    ///
    /// Content that cannot be uploaded (e.g. larger than the device texture
    /// limit) is reported once per generation and skipped.
    pub fn render(
        &mut self,
        ctx: &RenderCtx<'_>,
        target: &mut RenderTarget<'_>,
        draw: &ParallaxDraw<'_>,
    ) {
        self.ensure_pipeline(ctx);
        self.ensure_sampler(ctx);
        self.ensure_uniform_buffer(ctx);
        self.ensure_content(ctx, draw);
        self.ensure_bindings(ctx);

        let Some(ubo) = self.uniform_ubo.as_ref() else { return };
        ctx.queue.write_buffer(ubo, 0, bytemuck::bytes_of(&draw.uniform));

        let Some(pipeline) = self.pipeline.as_ref() else { return };
        let Some(bind_group) = self.bind_group.as_ref() else { return };
        let Some(content) = self.content.as_ref() else { return };

        let mut rpass = target.pass("parallax plane pass", wgpu::LoadOp::Load);
        rpass.set_pipeline(pipeline);
        rpass.set_bind_group(0, bind_group, &[]);
        rpass.set_vertex_buffer(0, content.vbo.slice(..));
        rpass.set_index_buffer(content.ibo.slice(..), wgpu::IndexFormat::Uint16);
        rpass.draw_indexed(0..content.index_count, 0, 0..1);
    }

    fn ensure_pipeline(&mut self, ctx: &RenderCtx<'_>) {
        if self.pipeline_format == Some(ctx.surface_format) && self.pipeline.is_some() {
            return;
        }

        let shader = ctx.device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("parallax shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("../shaders/parallax.wgsl").into()),
        });

        let texture_entry = |binding: u32| wgpu::BindGroupLayoutEntry {
            binding,
            visibility: wgpu::ShaderStages::FRAGMENT,
            ty: wgpu::BindingType::Texture {
                sample_type: wgpu::TextureSampleType::Float { filterable: true },
                view_dimension: wgpu::TextureViewDimension::D2,
                multisampled: false,
            },
            count: None,
        };

        let bgl = ctx.device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("parallax bgl"),
            entries: &[
                wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: ParallaxUniform::binding_size(),
                    },
                    count: None,
                },
                texture_entry(1),
                texture_entry(2),
                wgpu::BindGroupLayoutEntry {
                    binding: 3,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                    count: None,
                },
            ],
        });

        let pipeline_layout = ctx.device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("parallax pipeline layout"),
            bind_group_layouts: &[&bgl],
            immediate_size: 0,
        });

        let pipeline = ctx.device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("parallax pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                compilation_options: Default::default(),
                buffers: &[PlaneVertex::layout()],
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
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
                // Double-sided plane.
                cull_mode: None,
                polygon_mode: wgpu::PolygonMode::Fill,
                unclipped_depth: false,
                conservative: false,
            },
            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            multiview_mask: None,
            cache: None,
        });

        self.pipeline_format = Some(ctx.surface_format);
        self.pipeline = Some(pipeline);
        self.bind_group_layout = Some(bgl);
        self.bind_group = None;
        self.bind_group_generation = None;
    }

    fn ensure_sampler(&mut self, ctx: &RenderCtx<'_>) {
        if self.sampler.is_some() {
            return;
        }

        let (filter, mipmap_filter, anisotropy_clamp) = if self.quality.linear {
            (
                wgpu::FilterMode::Linear,
                wgpu::MipmapFilterMode::Linear,
                self.quality.anisotropy.clamp(1, 16),
            )
        } else {
            (wgpu::FilterMode::Nearest, wgpu::MipmapFilterMode::Nearest, 1)
        };

        self.sampler = Some(ctx.device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("parallax sampler"),
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            address_mode_w: wgpu::AddressMode::ClampToEdge,
            mag_filter: filter,
            min_filter: filter,
            mipmap_filter,
            anisotropy_clamp,
            ..Default::default()
        }));
    }

    fn ensure_uniform_buffer(&mut self, ctx: &RenderCtx<'_>) {
        if self.uniform_ubo.is_some() {
            return;
        }
        self.uniform_ubo = Some(ctx.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("parallax uniform ubo"),
            size: std::mem::size_of::<ParallaxUniform>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        }));
        self.bind_group = None;
        self.bind_group_generation = None;
    }

    fn ensure_content(&mut self, ctx: &RenderCtx<'_>, draw: &ParallaxDraw<'_>) {
        if self.content_generation == Some(draw.generation) {
            return;
        }
        self.content_generation = Some(draw.generation);
        self.content = None;
        self.bind_group = None;
        self.bind_group_generation = None;

        for (name, image) in [("photo", draw.photo), ("depth map", draw.depth)] {
            if !ctx.fits_texture(image.width(), image.height()) {
                log::error!(
                    "{name} is {}x{}, larger than the device limit of {}; not rendering",
                    image.width(),
                    image.height(),
                    ctx.max_texture_dimension()
                );
                return;
            }
        }

        let (photo, photo_view) = upload_texture(ctx, "parallax photo", draw.photo);
        let (depth, depth_view) = upload_texture(ctx, "parallax depth map", draw.depth);

        let vbo = ctx.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("parallax plane vbo"),
            contents: bytemuck::cast_slice(&draw.plane.vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let ibo = ctx.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("parallax plane ibo"),
            contents: bytemuck::cast_slice(&draw.plane.indices),
            usage: wgpu::BufferUsages::INDEX,
        });

        log::debug!(
            "uploaded parallax content generation {} (photo {}x{}, depth {}x{})",
            draw.generation,
            draw.photo.width(),
            draw.photo.height(),
            draw.depth.width(),
            draw.depth.height()
        );

        self.content = Some(GpuContent {
            _photo: photo,
            photo_view,
            _depth: depth,
            depth_view,
            vbo,
            ibo,
            index_count: draw.plane.indices.len() as u32,
        });
    }

    fn ensure_bindings(&mut self, ctx: &RenderCtx<'_>) {
        if self.bind_group.is_some() && self.bind_group_generation == self.content_generation {
            return;
        }

        let Some(bgl) = self.bind_group_layout.as_ref() else { return };
        let Some(sampler) = self.sampler.as_ref() else { return };
        let Some(ubo) = self.uniform_ubo.as_ref() else { return };
        let Some(content) = self.content.as_ref() else { return };

        let bind_group = ctx.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("parallax bind group"),
            layout: bgl,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: ubo.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::TextureView(&content.photo_view),
                },
                wgpu::BindGroupEntry {
                    binding: 2,
                    resource: wgpu::BindingResource::TextureView(&content.depth_view),
                },
                wgpu::BindGroupEntry {
                    binding: 3,
                    resource: wgpu::BindingResource::Sampler(sampler),
                },
            ],
        });

        self.bind_group = Some(bind_group);
        self.bind_group_generation = self.content_generation;
    }
}

fn upload_texture(
    ctx: &RenderCtx<'_>,
    label: &str,
    image: &ImageData,
) -> (wgpu::Texture, wgpu::TextureView) {
    let size = wgpu::Extent3d {
        width: image.width(),
        height: image.height(),
        depth_or_array_layers: 1,
    };

    let texture = ctx.device.create_texture(&wgpu::TextureDescriptor {
        label: Some(label),
        size,
        mip_level_count: 1,
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        format: image.format().texture_format(),
        usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
        view_formats: &[],
    });

    ctx.queue.write_texture(
        wgpu::TexelCopyTextureInfo {
            texture: &texture,
            mip_level: 0,
            origin: wgpu::Origin3d::ZERO,
            aspect: wgpu::TextureAspect::All,
        },
        image.pixels(),
        wgpu::TexelCopyBufferLayout {
            offset: 0,
            bytes_per_row: Some(image.bytes_per_row()),
            rows_per_image: Some(image.height()),
        },
        size,
    );

    let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
    (texture, view)
}
