use crate::{
    assets,
    camera::{Camera, OrbitController, PointerAction, FRAMING_DISTANCE},
    config::Config,
    renderer::Renderer,
    ui::{self, NavAction},
};
use anyhow::{Context as _, Result};
use glam::Vec2;
use showcase::{Catalog, NavigationTuning, Showcase};
use std::sync::Arc;
use std::time::Instant;
use winit::{
    event::{ElementState, WindowEvent},
    keyboard::{KeyCode, PhysicalKey},
    window::Window,
};

pub struct App {
    pub renderer: Renderer,
    pub camera: Camera,
    pub orbit: OrbitController,
    pub showcase: Showcase,
    pub egui_ctx: egui::Context,
    pub egui_state: egui_winit::State,
    slide_gap: f32,
    dolly_distance: f32,
}

impl App {
    pub async fn new(window: Arc<Window>, config: &Config) -> Result<Self> {
        let renderer = Renderer::new(window.clone()).await?;
        let size = renderer.gfx.size;

        let catalog = match &config.catalog {
            Some(path) => Catalog::from_path(path)
                .with_context(|| format!("loading catalog {}", path.display()))?,
            None => Catalog::builtin(),
        };
        log::info!("Catalog has {} slides", catalog.len());

        let tuning = NavigationTuning::default();
        let camera = Camera::new(tuning.resting_pose, size.width, size.height);

        let mut showcase = Showcase::new(catalog, tuning, camera.world_viewport(FRAMING_DISTANCE))?;
        showcase.set_slide_gap(config.slide_gap)?;
        showcase.set_dolly_distance(config.dolly_distance)?;

        if config.assume_models_ready {
            assets::assume_ready(&mut showcase);
        } else {
            assets::resolve_models(&mut showcase, &config.assets);
        }

        let egui_ctx = egui::Context::default();
        let egui_state = egui_winit::State::new(
            egui_ctx.clone(),
            egui_ctx.viewport_id(),
            &*window,
            None,
            None,
        );

        let params = *showcase.params();
        Ok(Self {
            renderer,
            camera,
            orbit: OrbitController::new(),
            showcase,
            egui_ctx,
            egui_state,
            slide_gap: params.slide_gap,
            dolly_distance: params.dolly_distance,
        })
    }

    pub fn resize(&mut self, new_size: winit::dpi::PhysicalSize<u32>) {
        if new_size.width > 0 && new_size.height > 0 {
            self.renderer.resize(new_size);
            self.camera.set_aspect(new_size.width, new_size.height);

            let viewport = self.camera.world_viewport(FRAMING_DISTANCE);
            if let Err(e) = self.showcase.resize(viewport, Instant::now()) {
                log::warn!("Ignoring resize: {}", e);
            }
        }
    }

    /// Returns true when the event was consumed.
    pub fn handle_event(&mut self, window: &Window, event: &WindowEvent) -> bool {
        let response = self.egui_state.on_window_event(window, event);
        if response.consumed {
            return true;
        }

        match event {
            WindowEvent::KeyboardInput { event, .. } if event.state == ElementState::Pressed => {
                if let PhysicalKey::Code(code) = event.physical_key {
                    if self.handle_key(code) {
                        return true;
                    }
                }
            }
            WindowEvent::Resized(physical_size) => self.resize(*physical_size),
            _ => {}
        }

        let pose = self.showcase.camera_pose();
        let orbit_enabled = !self.showcase.is_transitioning();
        let scale = window.scale_factor() as f32;
        match self.orbit.handle_event(event, &pose, orbit_enabled, scale) {
            Some(PointerAction::Place(position)) => {
                self.showcase.place_camera(position);
            }
            Some(PointerAction::Click(point)) => self.click(point),
            None => {}
        }

        false
    }

    fn handle_key(&mut self, code: KeyCode) -> bool {
        let result = match code {
            KeyCode::ArrowRight => self.showcase.next_slide(),
            KeyCode::ArrowLeft => self.showcase.previous_slide(),
            KeyCode::Home => self.showcase.select_slide(0),
            KeyCode::End => self
                .showcase
                .select_slide(self.showcase.slide_count().saturating_sub(1)),
            KeyCode::KeyR | KeyCode::Backspace => {
                self.showcase.request_reset();
                Ok(())
            }
            _ => return false,
        };
        if let Err(e) = result {
            log::warn!("{}", e);
        }
        true
    }

    fn click(&mut self, point: Vec2) {
        let screen = self.egui_ctx.screen_rect().size();
        let Some(ray) = self.camera.ray_through(point, Vec2::new(screen.x, screen.y)) else {
            return;
        };
        if !self.showcase.click(&ray) {
            log::trace!("Click at ({:.0}, {:.0}) hit no hotspot", point.x, point.y);
        }
    }

    fn apply_nav(&mut self, action: NavAction) {
        let result = match action {
            NavAction::Select(index) => self.showcase.select_slide(index),
            NavAction::Previous => self.showcase.previous_slide(),
            NavAction::Next => self.showcase.next_slide(),
            NavAction::Reset => {
                self.showcase.request_reset();
                Ok(())
            }
        };
        if let Err(e) = result {
            log::warn!("{}", e);
        }
    }

    pub fn render(&mut self, window: &Window) -> Result<(), wgpu::SurfaceError> {
        let tick = self.showcase.tick(Instant::now());
        if let Some(event) = tick.event {
            log::debug!("{:?}", event);
        }
        self.camera.pose = tick.pose;

        let frame = self.renderer.gfx.surface.get_current_texture()?;
        let swap_view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let floor_y = -self.showcase.viewport().height * 0.5;
        self.renderer.render(&swap_view, &self.camera, floor_y);

        let egui_input = self.egui_state.take_egui_input(window);
        self.egui_ctx.begin_frame(egui_input);

        let active = self.showcase.active_slide();
        if let Some(slide) = self.showcase.slide(active) {
            ui::draw_hud(&self.egui_ctx, slide, active, self.showcase.slide_count());
        }
        ui::draw_scene_overlay(&self.egui_ctx, &self.camera, &self.showcase);

        let close = self
            .showcase
            .active_annotation()
            .is_some_and(|card| ui::draw_annotation_card(&self.egui_ctx, &self.camera, &card));

        let nav = ui::draw_nav_bar(&self.egui_ctx, &self.showcase);
        let tuned = ui::draw_tuning_panel(&self.egui_ctx, &mut self.slide_gap, &mut self.dolly_distance);

        let egui_output = self.egui_ctx.end_frame();
        self.egui_state
            .handle_platform_output(window, egui_output.platform_output.clone());

        if close {
            self.showcase.request_reset();
        }
        if let Some(action) = nav {
            self.apply_nav(action);
        }
        if tuned {
            if let Err(e) = self
                .showcase
                .set_slide_gap(self.slide_gap)
                .and_then(|_| self.showcase.set_dolly_distance(self.dolly_distance))
            {
                log::warn!("{}", e);
            }
        }

        let shapes = self
            .egui_ctx
            .tessellate(egui_output.shapes, self.egui_ctx.pixels_per_point());

        let screen_descriptor = egui_wgpu::ScreenDescriptor {
            size_in_pixels: [
                self.renderer.gfx.config.width,
                self.renderer.gfx.config.height,
            ],
            pixels_per_point: self.egui_ctx.pixels_per_point(),
        };

        let mut encoder = self
            .renderer
            .gfx
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("UI Encoder"),
            });

        for (id, delta) in &egui_output.textures_delta.set {
            self.renderer.egui_renderer.update_texture(
                &self.renderer.gfx.device,
                &self.renderer.gfx.queue,
                *id,
                delta,
            );
        }

        self.renderer.egui_renderer.update_buffers(
            &self.renderer.gfx.device,
            &self.renderer.gfx.queue,
            &mut encoder,
            &shapes,
            &screen_descriptor,
        );

        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("EGUI Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &swap_view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Load,
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            self.renderer
                .egui_renderer
                .render(&mut render_pass, &shapes, &screen_descriptor);
        }

        for id in &egui_output.textures_delta.free {
            self.renderer.egui_renderer.free_texture(id);
        }

        self.renderer
            .gfx
            .queue
            .submit(std::iter::once(encoder.finish()));
        frame.present();

        Ok(())
    }
}
