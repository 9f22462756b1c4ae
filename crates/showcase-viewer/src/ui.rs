//! egui overlays: slide info, projected slide panels and hotspot markers, the
//! annotation card, the navigation bar and the tuning panel.

use crate::camera::Camera;
use egui::{Align2, Color32, FontId, Pos2, RichText, Stroke};
use glam::{Vec2, Vec3};
use showcase::{AnnotationCard, Showcase, Slide};

const PANEL_STROKE: Color32 = Color32::from_rgb(60, 60, 60);
const MARKER_COLOR: Color32 = Color32::from_rgb(220, 40, 40);
const MARKER_DIMMED: Color32 = Color32::from_rgba_premultiplied(110, 20, 20, 110);
const MARKER_RADIUS_PX: f32 = 7.0;
/// Height of the caption above a slide panel's top edge, world units.
const CAPTION_LIFT: f32 = 1.5;
const CARD_WIDTH: f32 = 260.0;

/// What the navigation bar asks for this frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavAction {
    Select(usize),
    Previous,
    Next,
    Reset,
}

fn to_pos(v: Vec2) -> Pos2 {
    Pos2::new(v.x, v.y)
}

fn screen_size(ctx: &egui::Context) -> Vec2 {
    let size = ctx.screen_rect().size();
    Vec2::new(size.x, size.y)
}

/// Top-left panel with the active slide's name, years and specs.
pub fn draw_hud(ctx: &egui::Context, slide: &Slide, index: usize, count: usize) {
    egui::Area::new(egui::Id::new("slide_hud"))
        .anchor(Align2::LEFT_TOP, [16.0, 16.0])
        .show(ctx, |ui| {
            ui.label(RichText::new(&slide.display_name).heading().strong());
            ui.label(&slide.description);
            if let Some(price) = slide.price {
                ui.label(format!("Price: ${:.0}", price));
            }
            if let Some(range) = slide.range {
                ui.label(format!("Range: {:.0} mi", range));
            }
            ui.weak(format!("{} / {}", index + 1, count));
        });
}

/// Draws every slide's panel outline and caption, and the active slide's
/// hotspot markers, on the background layer.
pub fn draw_scene_overlay(ctx: &egui::Context, camera: &Camera, showcase: &Showcase) {
    let painter = ctx.layer_painter(egui::LayerId::background());
    let screen = screen_size(ctx);
    let viewport = showcase.viewport();
    let (hw, hh) = (viewport.width * 0.5, viewport.height * 0.5);

    for (index, slide) in showcase.slides().enumerate() {
        let origin = showcase.slide_origin(index);
        let corners = [
            Vec3::new(-hw, -hh, 0.0),
            Vec3::new(hw, -hh, 0.0),
            Vec3::new(hw, hh, 0.0),
            Vec3::new(-hw, hh, 0.0),
        ];
        let projected: Option<Vec<Pos2>> = corners
            .iter()
            .map(|c| camera.project(origin + *c, screen).map(to_pos))
            .collect();
        if let Some(mut points) = projected {
            points.push(points[0]);
            painter.add(egui::Shape::line(points, Stroke::new(1.5, PANEL_STROKE)));
        }

        if let Some(at) = camera.project(origin + Vec3::new(0.0, hh + CAPTION_LIFT, 0.0), screen) {
            painter.text(
                to_pos(at),
                Align2::CENTER_BOTTOM,
                &slide.caption,
                FontId::proportional(32.0),
                PANEL_STROKE,
            );
        }
    }

    let ctl = showcase.active_controller();
    let enabled = ctl.model_status().is_ready() && !showcase.is_transitioning();
    let color = if enabled { MARKER_COLOR } else { MARKER_DIMMED };
    for hotspot in &ctl.slide().hotspots {
        if let Some(at) = camera.project(ctl.origin() + hotspot.world_position, screen) {
            painter.circle_filled(to_pos(at), MARKER_RADIUS_PX, color);
            painter.circle_stroke(to_pos(at), MARKER_RADIUS_PX, Stroke::new(1.0, Color32::WHITE));
        }
    }
}

/// Draws the annotation card at its projected anchor. Returns true when the
/// close button was clicked.
///
/// egui cards are screen-aligned; the anchor rotation only decides which
/// side faces the viewer. A card seen from behind is drawn faded.
pub fn draw_annotation_card(ctx: &egui::Context, camera: &Camera, card: &AnnotationCard<'_>) -> bool {
    let Some(at) = camera.project(card.anchor, screen_size(ctx)) else {
        return false;
    };
    let scale = card.scale_from(camera.pose.position).clamp(0.5, 1.5);
    let alpha = if card.faces(camera.pose.position) { 230 } else { 120 };
    let annotation = card.annotation;
    let mut close = false;

    egui::Area::new(egui::Id::new("annotation_card").with(card.hotspot_id))
        .fixed_pos(to_pos(at))
        .pivot(Align2::CENTER_CENTER)
        .show(ctx, |ui| {
            egui::Frame::none()
                .fill(Color32::from_rgba_unmultiplied(255, 255, 255, alpha))
                .rounding(4.0)
                .inner_margin(12.0 * scale)
                .show(ui, |ui| {
                    ui.set_max_width(CARD_WIDTH * scale);
                    ui.label(
                        RichText::new(&annotation.title)
                            .strong()
                            .size(16.0 * scale)
                            .color(Color32::BLACK),
                    );
                    if !annotation.image_ref.is_empty() {
                        ui.weak(RichText::new(&annotation.image_ref).size(10.0 * scale));
                    }
                    ui.label(
                        RichText::new(&annotation.body)
                            .size(13.0 * scale)
                            .color(Color32::DARK_GRAY),
                    );
                    ui.horizontal(|ui| {
                        if !annotation.link_ref.is_empty() {
                            ui.hyperlink_to(&annotation.link_label, &annotation.link_ref);
                        }
                        if ui.button("Close").clicked() {
                            close = true;
                        }
                    });
                });
        });

    close
}

/// Bottom bar with previous/next, one entry per slide and a reset button.
pub fn draw_nav_bar(ctx: &egui::Context, showcase: &Showcase) -> Option<NavAction> {
    let mut action = None;
    let active = showcase.active_slide();

    egui::TopBottomPanel::bottom("nav_bar").show(ctx, |ui| {
        ui.horizontal_centered(|ui| {
            if ui.button("<").clicked() {
                action = Some(NavAction::Previous);
            }
            for (index, slide) in showcase.slides().enumerate() {
                if ui.selectable_label(index == active, &slide.display_name).clicked() {
                    action = Some(NavAction::Select(index));
                }
            }
            if ui.button(">").clicked() {
                action = Some(NavAction::Next);
            }
            ui.separator();
            if ui.button("Reset view").clicked() {
                action = Some(NavAction::Reset);
            }
        });
    });

    action
}

/// Floating panel with the gallery tunables. Returns true when a value
/// changed.
pub fn draw_tuning_panel(ctx: &egui::Context, slide_gap: &mut f32, dolly_distance: &mut f32) -> bool {
    let mut changed = false;
    egui::Window::new("Controls")
        .default_open(false)
        .anchor(Align2::RIGHT_TOP, [-16.0, 16.0])
        .show(ctx, |ui| {
            changed |= ui
                .add(egui::Slider::new(slide_gap, 0.0..=10.0).text("Slide gap"))
                .changed();
            changed |= ui
                .add(egui::Slider::new(dolly_distance, 0.0..=50.0).text("Dolly distance"))
                .changed();
        });
    changed
}
