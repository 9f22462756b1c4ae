//! Scene composer: lays the slides out side by side, owns one transition
//! controller per slide, and decides which controller drives the rendered
//! camera.
//!
//! Exactly one controller is active at a time, the one for the selected
//! slide. The composer is the only place that hands out write access to the
//! shared camera intent, and it only does so for the active controller.

use crate::content::{Catalog, Slide};
use crate::error::NavError;
use crate::intent::CameraIntent;
use crate::picking::{pick_hotspot, Ray};
use crate::pose::{CameraPose, Viewport};
use crate::presenter::AnnotationCard;
use crate::resize::ResizeDebounce;
use crate::selection::{SlideChange, SlideSelection};
use crate::sequence::{DollyParams, DollyPlan, DOLLY_DISTANCE_RANGE, SLIDE_GAP_RANGE};
use crate::transition::{ModelStatus, Phase, TransitionController, TransitionEvent};
use crate::tuning::NavigationTuning;
use glam::Vec3;
use std::time::Instant;

/// What happened during one [`Showcase::tick`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tick {
    /// Pose the rendered camera should use this frame.
    pub pose: CameraPose,
    pub event: Option<TransitionEvent>,
    /// The camera was re-homed after a resize.
    pub rehomed: bool,
}

pub struct Showcase {
    controllers: Vec<TransitionController>,
    selection: SlideSelection,
    intent: CameraIntent,
    tuning: NavigationTuning,
    params: DollyParams,
    viewport: Viewport,
    resize: ResizeDebounce,
}

impl Showcase {
    pub fn new(catalog: Catalog, tuning: NavigationTuning, viewport: Viewport) -> Result<Self, NavError> {
        tuning.validate()?;
        if !viewport.is_valid() {
            return Err(NavError::InvalidViewport {
                width: viewport.width,
                height: viewport.height,
            });
        }

        let params = DollyParams::new(viewport.width);
        let mut controllers: Vec<_> = catalog
            .into_slides()
            .into_iter()
            .enumerate()
            .map(|(i, slide)| {
                TransitionController::new(slide, tuning, Vec3::new(params.slide_x(i), 0.0, 0.0))
            })
            .collect();

        let count = controllers.len();
        let resting = controllers[0].resting_pose();
        controllers[0].activate();

        log::info!(
            "Showcase ready: {} slides, viewport {:.2}x{:.2}, pitch {:.2}",
            count,
            viewport.width,
            viewport.height,
            params.pitch()
        );

        Ok(Self {
            controllers,
            selection: SlideSelection::new(count),
            intent: CameraIntent::new(resting),
            tuning,
            params,
            viewport,
            resize: ResizeDebounce::new(tuning.resize_debounce),
        })
    }

    // --- Queries ---

    pub fn slide_count(&self) -> usize {
        self.controllers.len()
    }

    pub fn slides(&self) -> impl Iterator<Item = &Slide> {
        self.controllers.iter().map(TransitionController::slide)
    }

    pub fn slide(&self, index: usize) -> Option<&Slide> {
        self.controllers.get(index).map(TransitionController::slide)
    }

    pub fn controller(&self, index: usize) -> Option<&TransitionController> {
        self.controllers.get(index)
    }

    /// Index of the slide that owns the camera.
    pub fn active_slide(&self) -> usize {
        self.selection.last_processed()
    }

    pub fn active_controller(&self) -> &TransitionController {
        &self.controllers[self.active_slide()]
    }

    pub fn camera_pose(&self) -> CameraPose {
        self.active_controller().state().current
    }

    pub fn is_transitioning(&self) -> bool {
        let state = self.active_controller().state();
        state.is_transitioning || state.reset_requested
    }

    pub fn active_annotation(&self) -> Option<AnnotationCard<'_>> {
        AnnotationCard::for_controller(self.active_controller())
    }

    pub fn intent(&self) -> &CameraIntent {
        &self.intent
    }

    pub fn params(&self) -> &DollyParams {
        &self.params
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn tuning(&self) -> &NavigationTuning {
        &self.tuning
    }

    /// World position of a slide's layout origin.
    pub fn slide_origin(&self, index: usize) -> Vec3 {
        Vec3::new(self.params.slide_x(index), 0.0, 0.0)
    }

    // --- Slide selection ---

    /// Selects a slide. When the selection differs from the slide that owns
    /// the camera, any move in flight is cancelled and a new dolly sequence
    /// starts from wherever the camera currently is.
    pub fn select_slide(&mut self, index: usize) -> Result<(), NavError> {
        self.selection.select(index)?;
        if let Some(change) = self.selection.take_change() {
            self.apply_slide_change(change);
        }
        Ok(())
    }

    pub fn next_slide(&mut self) -> Result<(), NavError> {
        self.select_slide(self.selection.next_index())
    }

    pub fn previous_slide(&mut self) -> Result<(), NavError> {
        self.select_slide(self.selection.previous_index())
    }

    fn apply_slide_change(&mut self, change: SlideChange) {
        let from_pose = self.controllers[change.from].state().current;
        if self.controllers[change.from].phase() == Phase::Transitioning {
            log::info!(
                "Slide change {} -> {} cancels the move in flight",
                change.from,
                change.to
            );
        }

        self.controllers[change.from].deactivate();
        let plan = DollyPlan::slide_change(change.from, change.to, &self.params, self.tuning.resting_pose);

        let ctl = &mut self.controllers[change.to];
        ctl.activate();
        ctl.run_sequence(from_pose, plan, &mut self.intent.writer(change.to));

        log::debug!(
            "Dolly {} -> {} from ({:.2}, {:.2}, {:.2})",
            change.from,
            change.to,
            from_pose.position.x,
            from_pose.position.y,
            from_pose.position.z
        );
    }

    // --- Hotspots ---

    /// Activates a hotspot on the active slide. Ids that don't belong to the
    /// active slide are ignored.
    pub fn activate_hotspot(&mut self, id: &str) {
        let active = self.active_slide();
        self.controllers[active].activate_hotspot(id, &mut self.intent.writer(active));
    }

    /// Hides the annotation immediately and returns the camera to rest at the
    /// next frame.
    pub fn request_reset(&mut self) {
        let active = self.active_slide();
        self.controllers[active].request_reset(&mut self.intent.writer(active));
    }

    /// Hotspot of the active slide under the ray, if any.
    pub fn pick(&self, ray: &Ray) -> Option<&str> {
        let ctl = self.active_controller();
        pick_hotspot(ray, &ctl.slide().hotspots, ctl.origin(), self.tuning.pick_radius)
            .map(|h| h.id.as_str())
    }

    /// Picks and activates in one step. Returns whether a hotspot was hit.
    pub fn click(&mut self, ray: &Ray) -> bool {
        let Some(id) = self.pick(ray).map(str::to_owned) else {
            return false;
        };
        self.activate_hotspot(&id);
        true
    }

    /// Moves the camera by hand (e.g. orbiting). Ignored while a transition
    /// or reset is running.
    pub fn place_camera(&mut self, position: Vec3) -> bool {
        let active = self.active_slide();
        self.controllers[active].place(position)
    }

    pub fn set_model_status(&mut self, slide: usize, status: ModelStatus) -> Result<(), NavError> {
        let count = self.controllers.len();
        let ctl = self
            .controllers
            .get_mut(slide)
            .ok_or(NavError::SlideOutOfRange { index: slide, count })?;
        ctl.set_model_status(status);
        Ok(())
    }

    // --- Layout ---

    pub fn set_slide_gap(&mut self, gap: f32) -> Result<(), NavError> {
        if !gap.is_finite() {
            return Err(NavError::NonFiniteParameter {
                name: "slide gap",
                value: gap,
            });
        }
        self.params.slide_gap = gap.clamp(*SLIDE_GAP_RANGE.start(), *SLIDE_GAP_RANGE.end());
        self.relayout();
        Ok(())
    }

    pub fn set_dolly_distance(&mut self, distance: f32) -> Result<(), NavError> {
        if !distance.is_finite() {
            return Err(NavError::NonFiniteParameter {
                name: "dolly distance",
                value: distance,
            });
        }
        self.params.dolly_distance =
            distance.clamp(*DOLLY_DISTANCE_RANGE.start(), *DOLLY_DISTANCE_RANGE.end());
        Ok(())
    }

    /// Applies a new viewport. Slides move immediately; the camera is re-homed
    /// once resizes have been quiet for the debounce window.
    pub fn resize(&mut self, viewport: Viewport, now: Instant) -> Result<(), NavError> {
        if !viewport.is_valid() {
            return Err(NavError::InvalidViewport {
                width: viewport.width,
                height: viewport.height,
            });
        }
        self.viewport = viewport;
        self.params.viewport_width = viewport.width;
        self.relayout();
        self.resize.notify(now);
        Ok(())
    }

    fn relayout(&mut self) {
        let params = self.params;
        let active = self.active_slide();
        for (i, ctl) in self.controllers.iter_mut().enumerate() {
            let origin = Vec3::new(params.slide_x(i), 0.0, 0.0);
            if i == active {
                ctl.relocate(origin, &mut self.intent.writer(active));
            } else {
                ctl.set_origin(origin);
            }
        }
    }

    // --- Frame loop ---

    /// Advances the active controller by one frame.
    pub fn tick(&mut self, now: Instant) -> Tick {
        let active = self.active_slide();
        let mut writer = self.intent.writer(active);

        let rehomed = self.resize.poll(now);
        if rehomed {
            log::debug!("Re-homing camera on slide {} after resize", active);
            self.controllers[active].rehome(&mut writer);
        }

        let event = self.controllers[active].advance(&mut writer);
        Tick {
            pose: self.controllers[active].state().current,
            event,
            rehomed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn showcase() -> Showcase {
        let mut sc = Showcase::new(
            Catalog::builtin(),
            NavigationTuning::default(),
            Viewport::new(10.0, 6.0),
        )
        .unwrap();
        for i in 0..sc.slide_count() {
            sc.set_model_status(i, ModelStatus::Ready).unwrap();
        }
        sc
    }

    #[test]
    fn slides_are_laid_out_by_pitch() {
        let sc = showcase();
        assert_eq!(sc.slide_origin(2), Vec3::new(22.0, 0.0, 0.0));
        assert_eq!(sc.controller(2).unwrap().origin().x, 22.0);
    }

    #[test]
    fn only_active_slide_accepts_hotspots() {
        let mut sc = showcase();
        sc.activate_hotspot("model-a-photo");
        assert!(sc.active_annotation().is_none());
        assert_eq!(sc.intent().owner(), None);
    }

    #[test]
    fn gap_change_moves_slides() {
        let mut sc = showcase();
        sc.set_slide_gap(4.0).unwrap();
        assert_eq!(sc.slide_origin(1).x, 14.0);
        assert_eq!(
            sc.controller(1).unwrap().state().current.position,
            Vec3::new(17.0, 5.0, 20.0)
        );
    }

    fn settle(sc: &mut Showcase, now: &mut Instant) {
        let mut frames = 0;
        while sc.is_transitioning() {
            *now += Duration::from_millis(16);
            sc.tick(*now);
            frames += 1;
            assert!(frames < 10_000, "camera never settled");
        }
    }

    #[test]
    fn gap_change_mid_dolly_still_lands_on_the_slide() {
        let mut sc = showcase();
        let mut now = Instant::now();
        sc.select_slide(2).unwrap();
        for _ in 0..5 {
            now += Duration::from_millis(16);
            sc.tick(now);
        }

        sc.set_slide_gap(4.0).unwrap();
        settle(&mut sc, &mut now);

        let resting = sc.controller(2).unwrap().resting_pose();
        assert_eq!(resting.position, Vec3::new(31.0, 5.0, 20.0));
        assert!(sc.camera_pose().distance_to(&resting) < 0.1);
        assert_eq!(sc.camera_pose().look_at, resting.look_at);
    }

    #[test]
    fn gap_change_at_rest_carries_the_camera() {
        let mut sc = showcase();
        let mut now = Instant::now();
        sc.select_slide(1).unwrap();
        settle(&mut sc, &mut now);

        sc.set_slide_gap(0.0).unwrap();
        assert!(!sc.is_transitioning());

        let resting = sc.active_controller().resting_pose();
        assert_eq!(resting.position, Vec3::new(13.0, 5.0, 20.0));
        assert!(sc.camera_pose().distance_to(&resting) < 0.1);
        assert_eq!(sc.camera_pose().look_at, resting.look_at);
        assert_eq!(sc.intent().pose().look_at, resting.look_at);
    }

    #[test]
    fn hotspot_target_follows_the_slide() {
        let mut sc = showcase();
        let mut now = Instant::now();
        sc.select_slide(1).unwrap();
        settle(&mut sc, &mut now);
        sc.activate_hotspot("model-a-burger");
        now += Duration::from_millis(16);
        sc.tick(now);

        sc.set_slide_gap(5.0).unwrap();
        settle(&mut sc, &mut now);

        assert!(sc.camera_pose().position.distance(Vec3::new(17.0, 1.0, 1.0)) < 0.1);
        assert!(sc.active_annotation().is_some());
    }

    #[test]
    fn tunables_are_clamped_and_validated() {
        let mut sc = showcase();
        sc.set_slide_gap(99.0).unwrap();
        assert_eq!(sc.params().slide_gap, 10.0);
        sc.set_dolly_distance(-3.0).unwrap();
        assert_eq!(sc.params().dolly_distance, 0.0);
        assert!(sc.set_dolly_distance(f32::NAN).is_err());
    }

    #[test]
    fn resize_rehomes_after_debounce() {
        let mut sc = showcase();
        let t0 = Instant::now();
        sc.activate_hotspot("model-t-glass");
        sc.tick(t0);

        sc.resize(Viewport::new(12.0, 6.0), t0).unwrap();
        let tick = sc.tick(t0 + Duration::from_millis(50));
        assert!(!tick.rehomed);
        assert!(sc.active_annotation().is_some());

        let tick = sc.tick(t0 + Duration::from_millis(250));
        assert!(tick.rehomed);
        assert!(sc.active_annotation().is_none());
        assert_eq!(sc.camera_pose(), sc.active_controller().resting_pose());
    }

    #[test]
    fn invalid_tuning_is_rejected() {
        let tuning = NavigationTuning {
            max_frames_per_leg: 0,
            ..Default::default()
        };
        let err = Showcase::new(Catalog::builtin(), tuning, Viewport::new(10.0, 6.0)).err();
        assert!(matches!(err, Some(NavError::InvalidTuning { .. })));
    }

    #[test]
    fn invalid_viewport_is_rejected() {
        let err = Showcase::new(
            Catalog::builtin(),
            NavigationTuning::default(),
            Viewport::new(0.0, 6.0),
        )
        .err();
        assert!(matches!(err, Some(NavError::InvalidViewport { .. })));
    }

    #[test]
    fn orbiting_is_blocked_during_transitions() {
        let mut sc = showcase();
        assert!(sc.place_camera(Vec3::new(0.0, 4.0, 12.0)));
        sc.select_slide(1).unwrap();
        assert!(!sc.place_camera(Vec3::new(0.0, 4.0, 12.0)));
    }
}
