//! The rendering orchestrator. Owns the GPU context, the floor grid pipeline
//! and the egui renderer used for every 2D overlay.

pub mod context;
pub mod pipelines;

use self::{context::GfxContext, pipelines::ground_grid::GroundGridPipeline};
use crate::camera::Camera;
use std::sync::Arc;
use winit::window::Window;

/// Background behind the gallery.
const CLEAR_COLOR: wgpu::Color = wgpu::Color {
    r: 0.93,
    g: 0.93,
    b: 0.92,
    a: 1.0,
};

/// Owns all rendering-related state.
pub struct Renderer {
    pub gfx: GfxContext,
    pub grid: GroundGridPipeline,
    pub egui_renderer: egui_wgpu::Renderer,
}

impl Renderer {
    pub async fn new(window: Arc<Window>) -> anyhow::Result<Self> {
        let gfx = GfxContext::new(window).await?;
        let grid = GroundGridPipeline::new(&gfx.device, gfx.config.format);
        let egui_renderer = egui_wgpu::Renderer::new(&gfx.device, gfx.config.format, None, 1);

        Ok(Self {
            gfx,
            grid,
            egui_renderer,
        })
    }

    pub fn resize(&mut self, new_size: winit::dpi::PhysicalSize<u32>) {
        self.gfx.resize(new_size);
    }

    /// Clears the frame and draws the floor grid `floor_y` below the slides.
    pub fn render(&mut self, swap_view: &wgpu::TextureView, camera: &Camera, floor_y: f32) {
        let mut encoder = self
            .gfx
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Frame Encoder"),
            });

        {
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Scene Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: swap_view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(CLEAR_COLOR),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            self.grid.draw(&mut pass, &self.gfx.queue, camera, floor_y);
        }

        self.gfx.queue.submit(std::iter::once(encoder.finish()));
    }
}
