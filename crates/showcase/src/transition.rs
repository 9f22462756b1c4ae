//! Per-slide camera transition controller.
//!
//! Each slide owns one controller. It holds the double-buffered camera pose
//! (`current` eases toward `target`), the id of the active hotspot and the
//! queue of remaining legs for multi-leg moves such as the gallery dolly.
//!
//! Only position is damped. Once a target is set, the look-at point snaps to
//! the target's look-at on every frame.
//!
//! Every write to the shared camera intent goes through an
//! [`IntentWriter`], which the showcase only creates for the active slide.

use crate::content::{Annotation, Slide};
use crate::intent::IntentWriter;
use crate::pose::CameraPose;
use crate::tuning::{NavigationTuning, ResetStyle};
use glam::Vec3;
use std::collections::VecDeque;

/// Coarse state of a controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Resting,
    Transitioning,
}

/// What a call to [`TransitionController::advance`] completed, if anything.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionEvent {
    /// A leg finished and the next queued leg started.
    LegComplete,
    /// The last leg finished; the controller is resting.
    TransitionComplete,
    /// A pending reset was applied.
    ResetComplete,
}

/// Load state of a slide's model, reported by the external asset loader.
///
/// Hotspots only make sense on top of the model's geometry, so activations
/// are deferred until the model is [`ModelStatus::Ready`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ModelStatus {
    #[default]
    Pending,
    Ready,
    Failed(String),
}

impl ModelStatus {
    pub fn is_ready(&self) -> bool {
        matches!(self, ModelStatus::Ready)
    }
}

/// Navigation state of one slide, in world coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct NavigationState {
    pub current: CameraPose,
    pub target: CameraPose,
    pub active_hotspot: Option<String>,
    pub is_transitioning: bool,
    pub reset_requested: bool,
}

impl NavigationState {
    fn resting(pose: CameraPose) -> Self {
        Self {
            current: pose,
            target: pose,
            active_hotspot: None,
            is_transitioning: false,
            reset_requested: false,
        }
    }
}

#[derive(Debug, Clone)]
pub struct TransitionController {
    slide: Slide,
    tuning: NavigationTuning,
    /// World position of the slide's layout origin.
    origin: Vec3,
    state: NavigationState,
    /// Legs still to run after the current target.
    legs: VecDeque<CameraPose>,
    frames_in_leg: u32,
    model: ModelStatus,
    active: bool,
}

impl TransitionController {
    pub fn new(slide: Slide, tuning: NavigationTuning, origin: Vec3) -> Self {
        let resting = tuning.resting_pose.translated(origin);
        Self {
            slide,
            tuning,
            origin,
            state: NavigationState::resting(resting),
            legs: VecDeque::new(),
            frames_in_leg: 0,
            model: ModelStatus::Pending,
            active: false,
        }
    }

    #[inline]
    pub fn slide(&self) -> &Slide {
        &self.slide
    }

    #[inline]
    pub fn state(&self) -> &NavigationState {
        &self.state
    }

    pub fn phase(&self) -> Phase {
        if self.state.is_transitioning {
            Phase::Transitioning
        } else {
            Phase::Resting
        }
    }

    #[inline]
    pub fn origin(&self) -> Vec3 {
        self.origin
    }

    /// The slide's resting pose in world coordinates.
    pub fn resting_pose(&self) -> CameraPose {
        self.tuning.resting_pose.translated(self.origin)
    }

    pub fn model_status(&self) -> &ModelStatus {
        &self.model
    }

    pub fn set_model_status(&mut self, status: ModelStatus) {
        if let ModelStatus::Failed(reason) = &status {
            log::warn!(
                "Model {} for slide {} failed to load: {}; hotspots stay disabled",
                self.slide.model_ref,
                self.slide.index,
                reason
            );
        }
        self.model = status;
    }

    #[inline]
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Number of legs queued after the current one.
    pub fn remaining_legs(&self) -> usize {
        self.legs.len()
    }

    /// Marks this slide as the camera owner.
    pub(crate) fn activate(&mut self) {
        self.active = true;
    }

    /// Releases the camera and returns to the resting state. Any in-flight
    /// sequence is dropped.
    pub(crate) fn deactivate(&mut self) {
        self.active = false;
        self.rest();
    }

    /// Moves the slide's layout origin and re-seats the camera on the new
    /// resting pose. Used for slides that don't own the camera.
    pub(crate) fn set_origin(&mut self, origin: Vec3) {
        self.origin = origin;
        self.rest();
    }

    /// Moves the layout origin of the camera-owning slide. The target and
    /// every queued leg shift with the slide, so a move in flight still ends
    /// on the slide's new resting pose. A resting camera shifts along.
    pub(crate) fn relocate(&mut self, origin: Vec3, intent: &mut IntentWriter<'_>) {
        debug_assert_eq!(intent.slide(), self.slide.index);

        let shift = origin - self.origin;
        self.origin = origin;
        if shift == Vec3::ZERO {
            return;
        }

        self.state.target = self.state.target.translated(shift);
        for leg in self.legs.iter_mut() {
            *leg = leg.translated(shift);
        }
        if !self.state.is_transitioning {
            self.state.current = self.state.current.translated(shift);
        }
        intent.publish(self.state.target);

        log::debug!(
            "Slide {} moved by {:.2}; {} queued legs re-aimed",
            self.slide.index,
            shift.x,
            self.legs.len()
        );
    }

    /// Places the camera on the resting pose and clears the annotation.
    pub(crate) fn rehome(&mut self, intent: &mut IntentWriter<'_>) {
        debug_assert_eq!(intent.slide(), self.slide.index);
        self.rest();
        intent.complete_reset(self.state.current);
    }

    fn rest(&mut self) {
        self.state = NavigationState::resting(self.resting_pose());
        self.legs.clear();
        self.frames_in_leg = 0;
    }

    /// Starts an eased move toward the hotspot's camera pose and marks its
    /// annotation visible. Unknown ids are ignored, as are activations while
    /// the slide's model has not loaded.
    pub fn activate_hotspot(&mut self, id: &str, intent: &mut IntentWriter<'_>) {
        debug_assert_eq!(intent.slide(), self.slide.index);

        if !self.model.is_ready() {
            log::debug!(
                "Deferring hotspot `{}` on slide {}: model not ready ({:?})",
                id,
                self.slide.index,
                self.model
            );
            return;
        }

        let Some(hotspot) = self.slide.hotspots.find(id) else {
            log::warn!("Ignoring unknown hotspot `{}` on slide {}", id, self.slide.index);
            return;
        };

        let target = hotspot.target_pose().translated(self.origin);
        if !self.legs.is_empty() {
            log::debug!("Hotspot `{}` cancels {} queued legs", id, self.legs.len());
        }
        self.legs.clear();
        self.frames_in_leg = 0;
        self.state.target = target;
        self.state.active_hotspot = Some(hotspot.id.clone());
        self.state.reset_requested = false;
        self.state.is_transitioning =
            self.state.current.distance_to(&target) >= self.tuning.convergence_tolerance;
        if !self.state.is_transitioning {
            // Already there; only the look-at needs to follow.
            self.state.current.look_at = target.look_at;
        }
        intent.publish(target);

        log::debug!("Hotspot `{}` activated on slide {}", id, self.slide.index);
    }

    /// Hides the annotation now; the pose returns to rest at the next
    /// [`advance`](Self::advance).
    pub fn request_reset(&mut self, intent: &mut IntentWriter<'_>) {
        debug_assert_eq!(intent.slide(), self.slide.index);
        self.state.active_hotspot = None;
        self.state.reset_requested = true;
        intent.request_reset();
    }

    /// Replaces whatever is in flight with a sequence of legs, starting from
    /// `from`. The controller eases through each leg in order.
    pub fn run_sequence<I>(&mut self, from: CameraPose, legs: I, intent: &mut IntentWriter<'_>)
    where
        I: IntoIterator<Item = CameraPose>,
    {
        debug_assert_eq!(intent.slide(), self.slide.index);

        self.legs = legs.into_iter().collect();
        self.state.current = from;
        self.state.active_hotspot = None;
        self.state.reset_requested = false;
        self.frames_in_leg = 0;

        match self.legs.pop_front() {
            Some(first) => {
                self.state.target = first;
                self.state.is_transitioning = true;
                intent.publish(first);
            }
            None => {
                self.state.target = from;
                self.state.is_transitioning = false;
            }
        }
    }

    /// Manual camera placement (e.g. user orbiting). Accepted only while
    /// resting with no reset pending.
    pub(crate) fn place(&mut self, position: Vec3) -> bool {
        if self.state.is_transitioning || self.state.reset_requested || !position.is_finite() {
            return false;
        }
        self.state.current.position = position;
        self.state.target.position = position;
        true
    }

    /// Runs one frame of the state machine.
    pub fn advance(&mut self, intent: &mut IntentWriter<'_>) -> Option<TransitionEvent> {
        debug_assert_eq!(intent.slide(), self.slide.index);

        if self.state.reset_requested {
            let resting = self.resting_pose();
            self.legs.clear();
            self.frames_in_leg = 0;
            self.state.reset_requested = false;
            self.state.target = resting;
            match self.tuning.reset_style {
                ResetStyle::Snap => {
                    self.state.current = resting;
                    self.state.is_transitioning = false;
                }
                ResetStyle::Ease => {
                    self.state.is_transitioning = true;
                }
            }
            intent.complete_reset(resting);
            return Some(TransitionEvent::ResetComplete);
        }

        if !self.state.is_transitioning {
            return None;
        }

        let target = self.state.target;
        let step = (target.position - self.state.current.position) * self.tuning.damping;
        self.state.current.position += step;
        self.state.current.look_at = target.look_at;
        self.frames_in_leg += 1;

        let remaining = self.state.current.distance_to(&target);
        if remaining < self.tuning.convergence_tolerance {
            return Some(self.finish_leg(intent));
        }

        if self.frames_in_leg >= self.tuning.max_frames_per_leg
            || step.length() < self.tuning.min_step
        {
            log::warn!(
                "Slide {} leg stalled {:.4} from target after {} frames; placing camera",
                self.slide.index,
                remaining,
                self.frames_in_leg
            );
            self.state.current.position = target.position;
            return Some(self.finish_leg(intent));
        }

        None
    }

    fn finish_leg(&mut self, intent: &mut IntentWriter<'_>) -> TransitionEvent {
        self.frames_in_leg = 0;
        match self.legs.pop_front() {
            Some(next) => {
                self.state.target = next;
                intent.publish(next);
                TransitionEvent::LegComplete
            }
            None => {
                self.state.is_transitioning = false;
                TransitionEvent::TransitionComplete
            }
        }
    }

    /// Annotation to present, if any. Nothing is shown on an inactive slide or
    /// while a reset is pending.
    pub fn active_annotation(&self) -> Option<&Annotation> {
        if !self.active || self.state.reset_requested {
            return None;
        }
        let id = self.state.active_hotspot.as_deref()?;
        self.slide.hotspots.find(id).map(|h| &h.annotation)
    }
}
