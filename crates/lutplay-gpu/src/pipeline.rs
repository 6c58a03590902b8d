//! The LUT render pipeline: two shader stages compiled separately, linked
//! into one render pipeline, drawing a full-screen triangle-strip quad.
//!
//! The fragment stage remaps every frame sample through the packed LUT
//! image: the red channel picks one of 64 tiles in an 8x8 grid, blue/green
//! index inside the 32x32 tile, with a round-nearest modulo keeping tile
//! addressing exact at integer red levels.

use bytemuck::{Pod, Zeroable};
use lutplay_core::{LutPlayError, Rect, Result, ShaderStage};
use tracing::info;
use wgpu::util::DeviceExt;

const VS_SHADER: &str = r#"
@vertex
fn vs_main(@location(0) position: vec2<f32>) -> @builtin(position) vec4<f32> {
    return vec4<f32>(position, 0.0, 1.0);
}
"#;

const FS_SHADER: &str = r#"
struct Params {
    x: f32,
    y: f32,
    width: f32,
    height: f32,
}

@group(0) @binding(0) var frame_tex: texture_2d<f32>;
@group(0) @binding(1) var frame_samp: sampler;
@group(0) @binding(2) var lut_tex: texture_2d<f32>;
@group(0) @binding(3) var lut_samp: sampler;
@group(0) @binding(4) var<uniform> params: Params;

fn round_mod(a: f32, b: f32) -> f32 {
    let m = a - floor((a + 0.5) / b) * b;
    return floor(m + 0.5);
}

fn lut_lookup(color: vec3<f32>) -> vec3<f32> {
    let c = clamp(color, vec3<f32>(0.0), vec3<f32>(1.0));
    let bg = (vec2<f32>(c.b, c.g) / 8.0) * (255.0 / 256.0);
    let r = round(c.r * 255.0);
    let row = floor(r / 32.0) / 8.0;
    let col = floor(round_mod(r, 32.0) / 4.0) / 8.0;
    let pos = clamp(vec2<f32>(col, row) + bg, vec2<f32>(0.0), vec2<f32>(1.0));
    return textureSample(lut_tex, lut_samp, pos).rgb;
}

@fragment
fn fs_main(@builtin(position) frag: vec4<f32>) -> @location(0) vec4<f32> {
    // Framebuffer origin is top-left, matching image row order: no Y flip.
    let uv = (frag.xy - vec2<f32>(params.x, params.y))
        / vec2<f32>(params.width, params.height);
    let color = textureSample(frame_tex, frame_samp, uv).rgb;
    return vec4<f32>(lut_lookup(color), 1.0);
}
"#;

/// Binding names the pipeline resolves against the shader sources. The
/// shader and the binding code must stay in sync; a missing name is a fatal
/// configuration error.
const REQUIRED_VERTEX_BINDINGS: [&str; 1] = ["position"];
const REQUIRED_FRAGMENT_BINDINGS: [&str; 5] =
    ["frame_tex", "frame_samp", "lut_tex", "lut_samp", "params"];

/// Per-draw uniform: the fitted viewport rect in surface pixels. Fragment
/// UVs span exactly this rect.
#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
struct Params {
    x: f32,
    y: f32,
    width: f32,
    height: f32,
}

#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
struct Vertex {
    position: [f32; 2],
}

/// Triangle-strip quad covering clip space.
const QUAD: [Vertex; 4] = [
    Vertex { position: [-1.0, -1.0] },
    Vertex { position: [1.0, -1.0] },
    Vertex { position: [-1.0, 1.0] },
    Vertex { position: [1.0, 1.0] },
];

/// Compiled and linked LUT pipeline with its static GPU state.
///
/// Created once per target format; immutable afterwards and dropped with the
/// device.
pub struct LutPipeline {
    pipeline: wgpu::RenderPipeline,
    bind_layout: wgpu::BindGroupLayout,
    frame_sampler: wgpu::Sampler,
    lut_sampler: wgpu::Sampler,
    quad: wgpu::Buffer,
    params: wgpu::Buffer,
}

impl LutPipeline {
    /// Compile both stages, resolve bindings, and link the pipeline.
    pub fn new(device: &wgpu::Device, target_format: wgpu::TextureFormat) -> Result<Self> {
        resolve_bindings(VS_SHADER, FS_SHADER)?;

        let vs = compile_stage(device, ShaderStage::Vertex, VS_SHADER)?;
        let fs = compile_stage(device, ShaderStage::Fragment, FS_SHADER)?;

        let bind_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("lutplay-bind-layout"),
            entries: &[
                texture_entry(0),
                sampler_entry(1),
                texture_entry(2),
                sampler_entry(3),
                wgpu::BindGroupLayoutEntry {
                    binding: 4,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: wgpu::BufferSize::new(
                            std::mem::size_of::<Params>() as u64
                        ),
                    },
                    count: None,
                },
            ],
        });

        // Linear smooths upscaled video; nearest keeps LUT cells from
        // bleeding into each other. Both clamp to edge.
        let frame_sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("lutplay-frame-sampler"),
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            ..Default::default()
        });
        let lut_sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("lutplay-lut-sampler"),
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Nearest,
            min_filter: wgpu::FilterMode::Nearest,
            ..Default::default()
        });

        let quad = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("lutplay-quad"),
            contents: bytemuck::cast_slice(&QUAD),
            usage: wgpu::BufferUsages::VERTEX,
        });

        let params = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("lutplay-params"),
            contents: bytemuck::bytes_of(&Params {
                x: 0.0,
                y: 0.0,
                width: 1.0,
                height: 1.0,
            }),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("lutplay-pipeline-layout"),
            bind_group_layouts: &[&bind_layout],
            push_constant_ranges: &[],
        });

        // The link step: stage interfaces and target format are validated
        // here.
        device.push_error_scope(wgpu::ErrorFilter::Validation);
        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("lutplay-pipeline"),
            layout: Some(&layout),
            vertex: wgpu::VertexState {
                module: &vs,
                entry_point: Some("vs_main"),
                buffers: &[wgpu::VertexBufferLayout {
                    array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
                    step_mode: wgpu::VertexStepMode::Vertex,
                    attributes: &wgpu::vertex_attr_array![0 => Float32x2],
                }],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            },
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleStrip,
                ..Default::default()
            },
            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            fragment: Some(wgpu::FragmentState {
                module: &fs,
                entry_point: Some("fs_main"),
                targets: &[Some(wgpu::ColorTargetState {
                    format: target_format,
                    blend: None,
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            }),
            multiview: None,
            cache: None,
        });
        if let Some(err) = pollster::block_on(device.pop_error_scope()) {
            return Err(LutPlayError::ProgramLink(err.to_string()));
        }

        info!(format = ?target_format, "LUT pipeline linked");

        Ok(Self {
            pipeline,
            bind_layout,
            frame_sampler,
            lut_sampler,
            quad,
            params,
        })
    }

    /// Bind the frame and LUT texture views. Rebuilt whenever an upload
    /// reallocates either texture.
    pub fn create_bind_group(
        &self,
        device: &wgpu::Device,
        frame_view: &wgpu::TextureView,
        lut_view: &wgpu::TextureView,
    ) -> wgpu::BindGroup {
        device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("lutplay-bind-group"),
            layout: &self.bind_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(frame_view),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::Sampler(&self.frame_sampler),
                },
                wgpu::BindGroupEntry {
                    binding: 2,
                    resource: wgpu::BindingResource::TextureView(lut_view),
                },
                wgpu::BindGroupEntry {
                    binding: 3,
                    resource: wgpu::BindingResource::Sampler(&self.lut_sampler),
                },
                wgpu::BindGroupEntry {
                    binding: 4,
                    resource: self.params.as_entire_binding(),
                },
            ],
        })
    }

    /// Update the per-draw uniform with the fitted viewport rect.
    pub fn write_params(&self, queue: &wgpu::Queue, viewport: Rect) {
        queue.write_buffer(
            &self.params,
            0,
            bytemuck::bytes_of(&Params {
                x: viewport.x,
                y: viewport.y,
                width: viewport.width.max(1.0),
                height: viewport.height.max(1.0),
            }),
        );
    }

    /// Record one frame: clear the target to black (the letterbox bars) and
    /// draw the quad into the fitted rect.
    pub fn draw(
        &self,
        encoder: &mut wgpu::CommandEncoder,
        target_view: &wgpu::TextureView,
        bind_group: &wgpu::BindGroup,
        viewport: Rect,
    ) {
        let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("lutplay-pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: target_view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(wgpu::Color::BLACK),
                    store: wgpu::StoreOp::Store,
                },
            })],
            depth_stencil_attachment: None,
            timestamp_writes: None,
            occlusion_query_set: None,
        });

        if viewport.width >= 1.0 && viewport.height >= 1.0 {
            pass.set_viewport(
                viewport.x,
                viewport.y,
                viewport.width,
                viewport.height,
                0.0,
                1.0,
            );
            let (sx, sy, sw, sh) = scissor_rect(viewport);
            pass.set_scissor_rect(sx, sy, sw, sh);
        }
        pass.set_pipeline(&self.pipeline);
        pass.set_bind_group(0, bind_group, &[]);
        pass.set_vertex_buffer(0, self.quad.slice(..));
        pass.draw(0..QUAD.len() as u32, 0..1);
    }
}

/// Pixel-snap the fitted rect for the scissor test.
///
/// The origin rounds to the nearest pixel and the extent comes from the
/// rounded far edge, so a fractional centering offset (e.g. y = 99.5 from an
/// odd letterbox bar) never leaves the scissor a pixel adrift of the
/// floating-point viewport.
fn scissor_rect(viewport: Rect) -> (u32, u32, u32, u32) {
    let x0 = viewport.x.round().max(0.0) as u32;
    let y0 = viewport.y.round().max(0.0) as u32;
    let x1 = (viewport.x + viewport.width).round().max(0.0) as u32;
    let y1 = (viewport.y + viewport.height).round().max(0.0) as u32;
    (x0, y0, x1.saturating_sub(x0), y1.saturating_sub(y0))
}

fn texture_entry(binding: u32) -> wgpu::BindGroupLayoutEntry {
    wgpu::BindGroupLayoutEntry {
        binding,
        visibility: wgpu::ShaderStages::FRAGMENT,
        ty: wgpu::BindingType::Texture {
            sample_type: wgpu::TextureSampleType::Float { filterable: true },
            view_dimension: wgpu::TextureViewDimension::D2,
            multisampled: false,
        },
        count: None,
    }
}

fn sampler_entry(binding: u32) -> wgpu::BindGroupLayoutEntry {
    wgpu::BindGroupLayoutEntry {
        binding,
        visibility: wgpu::ShaderStages::FRAGMENT,
        ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
        count: None,
    }
}

/// Compile one shader stage inside a validation error scope so a compiler
/// diagnostic surfaces as a typed error naming the stage.
fn compile_stage(
    device: &wgpu::Device,
    stage: ShaderStage,
    source: &str,
) -> Result<wgpu::ShaderModule> {
    device.push_error_scope(wgpu::ErrorFilter::Validation);
    let module = device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some(&format!("lutplay-{}-shader", stage)),
        source: wgpu::ShaderSource::Wgsl(source.into()),
    });
    if let Some(err) = pollster::block_on(device.pop_error_scope()) {
        return Err(LutPlayError::ShaderCompile {
            stage,
            log: err.to_string(),
        });
    }
    Ok(module)
}

/// Check that every required binding name is declared in its stage source.
pub fn resolve_bindings(vertex_source: &str, fragment_source: &str) -> Result<()> {
    for name in REQUIRED_VERTEX_BINDINGS {
        if !declares(vertex_source, name) {
            return Err(LutPlayError::MissingBinding(name.to_string()));
        }
    }
    for name in REQUIRED_FRAGMENT_BINDINGS {
        if !declares(fragment_source, name) {
            return Err(LutPlayError::MissingBinding(name.to_string()));
        }
    }
    Ok(())
}

/// Word-boundary search: `frame_tex` must not match inside `frame_texture`.
fn declares(source: &str, name: &str) -> bool {
    let is_ident = |c: char| c.is_ascii_alphanumeric() || c == '_';
    let mut start = 0;
    while let Some(at) = source[start..].find(name) {
        let at = start + at;
        let before_ok = at == 0 || !source[..at].chars().next_back().map_or(false, is_ident);
        let after = at + name.len();
        let after_ok = after == source.len() || !source[after..].chars().next().map_or(false, is_ident);
        if before_ok && after_ok {
            return true;
        }
        start = at + name.len();
    }
    false
}
