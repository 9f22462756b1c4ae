use glam::{Mat4, Vec2, Vec3};
use showcase::{CameraPose, Ray, Viewport};
use winit::event::{ElementState, MouseButton, MouseScrollDelta, WindowEvent};

/// Vertical field of view.
pub const FOV_Y_DEG: f32 = 50.0;
pub const NEAR: f32 = 0.5;
pub const FAR: f32 = 1_000.0;

/// Distance at which the slide panels are framed. The gallery's viewport is
/// the visible world extent at this distance.
pub const FRAMING_DISTANCE: f32 = 5.0;

#[derive(Debug, Clone)]
pub struct Camera {
    /// Pose supplied by the navigation core each frame.
    pub pose: CameraPose,
    pub fov_y_rad: f32,
    pub aspect: f32,
}

impl Camera {
    pub fn new(pose: CameraPose, width: u32, height: u32) -> Self {
        Self {
            pose,
            fov_y_rad: FOV_Y_DEG.to_radians(),
            aspect: width as f32 / height.max(1) as f32,
        }
    }

    pub fn set_aspect(&mut self, width: u32, height: u32) {
        self.aspect = width as f32 / height.max(1) as f32;
    }

    pub fn view(&self) -> Mat4 {
        Mat4::look_at_rh(self.pose.position, self.pose.look_at, Vec3::Y)
    }

    /// Right-handed projection with wgpu's [0, 1] depth range.
    pub fn proj(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov_y_rad, self.aspect, NEAR, FAR)
    }

    pub fn view_proj(&self) -> Mat4 {
        self.proj() * self.view()
    }

    /// Visible world extent on a plane `distance` in front of the camera.
    pub fn world_viewport(&self, distance: f32) -> Viewport {
        let height = 2.0 * distance * (self.fov_y_rad * 0.5).tan();
        Viewport::new(height * self.aspect, height)
    }

    /// Projects a world point to screen coordinates (logical points, origin
    /// top-left). `None` when the point is behind the camera or clipped.
    pub fn project(&self, world: Vec3, screen: Vec2) -> Option<Vec2> {
        let clip = self.view_proj() * world.extend(1.0);
        if clip.w <= 0.0 {
            return None;
        }
        let ndc = clip.truncate() / clip.w;
        if !(0.0..=1.0).contains(&ndc.z) {
            return None;
        }
        Some(Vec2::new(
            (ndc.x * 0.5 + 0.5) * screen.x,
            (0.5 - ndc.y * 0.5) * screen.y,
        ))
    }

    /// World ray through a screen point.
    pub fn ray_through(&self, point: Vec2, screen: Vec2) -> Option<Ray> {
        if screen.x <= 0.0 || screen.y <= 0.0 {
            return None;
        }
        let ndc = Vec2::new(2.0 * point.x / screen.x - 1.0, 1.0 - 2.0 * point.y / screen.y);
        let inv = self.view_proj().inverse();
        let near = inv.project_point3(ndc.extend(0.0));
        let far = inv.project_point3(ndc.extend(1.0));
        Ray::new(near, far - near)
    }
}

/// What a pointer gesture asks for.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerAction {
    /// Move the camera to this position (orbit or zoom).
    Place(Vec3),
    /// A click without drag at this point.
    Click(Vec2),
}

/// Orbit and zoom around the current look-at point, plus click detection.
/// Clicks and drags share the left button; a press that moves less than
/// `CLICK_SLOP` before release is a click.
pub struct OrbitController {
    mouse_down: bool,
    dragged: bool,
    press_at: Option<Vec2>,
    last_mouse: Option<Vec2>,
}

const CLICK_SLOP: f32 = 4.0;
const ORBIT_SPEED: f32 = 0.005;
const MIN_DISTANCE: f32 = 6.0;
const MAX_DISTANCE: f32 = 20.0;
const MAX_POLAR_DEG: f32 = 75.0;

impl OrbitController {
    /// Creates a new controller with default state.
    pub fn new() -> Self {
        Self {
            mouse_down: false,
            dragged: false,
            press_at: None,
            last_mouse: None,
        }
    }

    /// Handles pointer events. `orbit_enabled` is false while the camera is
    /// being moved by the navigation core. `scale` converts physical pixels to
    /// logical points.
    pub fn handle_event(
        &mut self,
        event: &WindowEvent,
        pose: &CameraPose,
        orbit_enabled: bool,
        scale: f32,
    ) -> Option<PointerAction> {
        match event {
            WindowEvent::MouseInput {
                button: MouseButton::Left,
                state,
                ..
            } => match state {
                ElementState::Pressed => {
                    self.press();
                    None
                }
                ElementState::Released => self.release(),
            },
            WindowEvent::CursorMoved { position, .. } => {
                let xy = Vec2::new(position.x as f32, position.y as f32) / scale;
                let action = self.handle_cursor(xy, pose, orbit_enabled);
                self.last_mouse = Some(xy);
                action
            }
            WindowEvent::MouseWheel { delta, .. } if orbit_enabled => {
                let scroll = match delta {
                    MouseScrollDelta::LineDelta(_, y) => *y,
                    MouseScrollDelta::PixelDelta(pos) => pos.y as f32 / 120.0,
                };
                Some(PointerAction::Place(zoom(pose, scroll)))
            }
            _ => None,
        }
    }

    fn press(&mut self) {
        self.mouse_down = true;
        self.dragged = false;
        // Unknown until the first cursor event when none arrived yet.
        self.press_at = self.last_mouse;
    }

    fn release(&mut self) -> Option<PointerAction> {
        self.mouse_down = false;
        let clicked = !self.dragged;
        self.dragged = false;
        self.press_at.take().filter(|_| clicked).map(PointerAction::Click)
    }

    fn handle_cursor(&mut self, xy: Vec2, pose: &CameraPose, orbit_enabled: bool) -> Option<PointerAction> {
        if !self.mouse_down {
            return None;
        }
        let press = *self.press_at.get_or_insert(xy);
        if press.distance(xy) > CLICK_SLOP {
            self.dragged = true;
        }
        let last = self.last_mouse?;
        if !(self.dragged && orbit_enabled) {
            return None;
        }
        let delta = (xy - last) * ORBIT_SPEED;
        Some(PointerAction::Place(orbit(pose, delta)))
    }
}

impl Default for OrbitController {
    fn default() -> Self {
        Self::new()
    }
}

/// Rotates the camera around its look-at point. `delta.x` turns around the
/// vertical axis, `delta.y` tilts, with the tilt kept above the horizon band.
fn orbit(pose: &CameraPose, delta: Vec2) -> Vec3 {
    let offset = pose.position - pose.look_at;
    let radius = offset.length().max(f32::EPSILON);
    let azimuth = offset.x.atan2(offset.z) - delta.x;
    let polar = ((offset.y / radius).clamp(-1.0, 1.0).acos() - delta.y)
        .clamp(0.01, MAX_POLAR_DEG.to_radians());

    let (sin_p, cos_p) = polar.sin_cos();
    let (sin_a, cos_a) = azimuth.sin_cos();
    pose.look_at + Vec3::new(sin_p * sin_a, cos_p, sin_p * cos_a) * radius
}

/// Moves the camera toward (positive scroll) or away from its look-at point.
fn zoom(pose: &CameraPose, scroll: f32) -> Vec3 {
    let offset = pose.position - pose.look_at;
    let radius = (offset.length() * 1.1_f32.powf(-scroll)).clamp(MIN_DISTANCE, MAX_DISTANCE);
    pose.look_at + offset.normalize_or_zero() * radius
}
