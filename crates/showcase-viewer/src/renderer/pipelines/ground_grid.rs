// Renders an infinite-looking floor grid below the slide panels: fine cells,
// darker section lines, faded out with distance from the camera.

use crate::camera::Camera;
use glam::Mat4;
use wgpu::util::DeviceExt;

/// Spacing of the fine grid lines, world units.
const CELL_SIZE: f32 = 0.5;
/// Spacing of the section lines, world units.
const SECTION_SIZE: f32 = 1.0;
/// Distance from the camera at which the grid has fully faded.
const FADE_DISTANCE: f32 = 50.0;

#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct GridUniforms {
    pub view_proj: Mat4,        // 64 B
    pub camera_pos: [f32; 3],   // +12
    pub plane_y: f32,           // +4  -> 80
    pub cell_size: f32,         // +4
    pub section_size: f32,      // +4
    pub fade_distance: f32,     // +4
    pub half_extent: f32,       // +4  -> 96
}

// Buffer size must match the WGSL struct.
const _: [(); 96] = [(); core::mem::size_of::<GridUniforms>()];

pub struct GroundGridPipeline {
    pipeline: wgpu::RenderPipeline,
    bind_group: wgpu::BindGroup,
    uniform_buffer: wgpu::Buffer,
    quad_vb: wgpu::Buffer,
}

impl GroundGridPipeline {
    pub fn new(device: &wgpu::Device, color_fmt: wgpu::TextureFormat) -> Self {
        let uniform_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Grid Uniform Buffer"),
            size: std::mem::size_of::<GridUniforms>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Grid BGL"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            }],
        });

        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Grid Bind Group"),
            layout: &bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buffer.as_entire_binding(),
            }],
        });

        // Unit quad, two triangles; scaled and centred under the camera in the shader.
        let corners: [[f32; 2]; 6] = [
            [-1.0, -1.0], [1.0, -1.0], [1.0, 1.0],
            [-1.0, -1.0], [1.0, 1.0],  [-1.0, 1.0],
        ];
        let quad_vb = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Grid Quad VB"),
            contents: bytemuck::cast_slice(&corners),
            usage: wgpu::BufferUsages::VERTEX,
        });

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Grid WGSL"),
            source: wgpu::ShaderSource::Wgsl(GRID_WGSL.into()),
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Grid Pipeline Layout"),
            bind_group_layouts: &[&bind_group_layout],
            push_constant_ranges: &[],
        });

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("Ground Grid Pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: "vs_main",
                buffers: &[wgpu::VertexBufferLayout {
                    array_stride: std::mem::size_of::<[f32; 2]>() as u64,
                    step_mode: wgpu::VertexStepMode::Vertex,
                    attributes: &[wgpu::VertexAttribute {
                        shader_location: 0,
                        format: wgpu::VertexFormat::Float32x2,
                        offset: 0,
                    }],
                }],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: "fs_main",
                targets: &[Some(wgpu::ColorTargetState {
                    format: color_fmt,
                    blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            }),
            primitive: wgpu::PrimitiveState::default(),
            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            multiview: None,
        });

        Self {
            pipeline,
            bind_group,
            uniform_buffer,
            quad_vb,
        }
    }

    pub fn draw<'a>(
        &'a self,
        rpass: &mut wgpu::RenderPass<'a>,
        queue: &wgpu::Queue,
        camera: &Camera,
        plane_y: f32,
    ) {
        let uniforms = GridUniforms {
            view_proj: camera.view_proj(),
            camera_pos: camera.pose.position.to_array(),
            plane_y,
            cell_size: CELL_SIZE,
            section_size: SECTION_SIZE,
            fade_distance: FADE_DISTANCE,
            half_extent: FADE_DISTANCE,
        };

        queue.write_buffer(&self.uniform_buffer, 0, bytemuck::bytes_of(&uniforms));

        rpass.set_pipeline(&self.pipeline);
        rpass.set_bind_group(0, &self.bind_group, &[]);
        rpass.set_vertex_buffer(0, self.quad_vb.slice(..));
        rpass.draw(0..6, 0..1);
    }
}

pub const GRID_WGSL: &str = r#"
struct GridUniforms {
    view_proj: mat4x4<f32>,
    camera_pos: vec3<f32>,
    plane_y: f32,
    cell_size: f32,
    section_size: f32,
    fade_distance: f32,
    half_extent: f32,
};
@group(0) @binding(0) var<uniform> U: GridUniforms;

struct VSOut {
    @builtin(position) clip: vec4<f32>,
    @location(0) world_xz: vec2<f32>,
}

@vertex
fn vs_main(@location(0) corner: vec2<f32>) -> VSOut {
    // Keep the quad centred under the camera so the grid never ends.
    let xz = U.camera_pos.xz + corner * U.half_extent;
    var out: VSOut;
    out.clip = U.view_proj * vec4<f32>(xz.x, U.plane_y, xz.y, 1.0);
    out.world_xz = xz;
    return out;
}

// Anti-aliased line mask
fn line(coord: f32, step: f32) -> f32 {
    let t   = coord / step;
    let aaw = min(fwidth(t) * 1.5, 0.5);
    let f   = fract(t);
    let d   = min(f, 1.0 - f);
    return 1.0 - smoothstep(0.0, aaw, d);
}

@fragment
fn fs_main(in: VSOut) -> @location(0) vec4<f32> {
    let p = in.world_xz;
    let cell    = max(line(p.x, U.cell_size), line(p.y, U.cell_size));
    let section = max(line(p.x, U.section_size), line(p.y, U.section_size));

    let dist = distance(p, U.camera_pos.xz);
    let fade = 1.0 - smoothstep(U.fade_distance * 0.2, U.fade_distance, dist);

    let cell_color    = vec3<f32>(0.435, 0.435, 0.435); // #6f6f6f
    let section_color = vec3<f32>(0.0, 0.0, 0.0);

    let color = mix(cell_color, section_color, section);
    let alpha = max(cell * 0.6, section) * fade;
    if (alpha <= 0.001) {
        discard;
    }
    return vec4<f32>(color, alpha);
}
"#;
