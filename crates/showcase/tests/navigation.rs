use glam::Vec3;
use showcase::{
    Catalog, ModelStatus, NavigationTuning, Ray, Showcase, TransitionEvent, Viewport,
};
use std::time::{Duration, Instant};

const FRAME: Duration = Duration::from_millis(16);

struct Harness {
    showcase: Showcase,
    now: Instant,
}

impl Harness {
    fn new() -> Self {
        let mut showcase = Showcase::new(
            Catalog::builtin(),
            NavigationTuning::default(),
            Viewport::new(10.0, 6.0),
        )
        .unwrap();
        for i in 0..showcase.slide_count() {
            showcase.set_model_status(i, ModelStatus::Ready).unwrap();
        }
        Self {
            showcase,
            now: Instant::now(),
        }
    }

    fn frame(&mut self) -> showcase::Tick {
        self.now += FRAME;
        self.showcase.tick(self.now)
    }

    /// Ticks until the camera settles, returning every frame's result.
    fn settle(&mut self) -> Vec<showcase::Tick> {
        let mut ticks = Vec::new();
        loop {
            let tick = self.frame();
            ticks.push(tick);
            if !self.showcase.is_transitioning() {
                return ticks;
            }
            assert!(ticks.len() < 10_000, "camera never settled");
        }
    }
}

#[test]
fn hotspot_then_reset_scenario() {
    let mut h = Harness::new();

    h.showcase.activate_hotspot("model-t-glass");
    h.settle();

    let card = h.showcase.active_annotation().expect("card visible");
    assert_eq!(card.annotation.title, "Check out our drinkware collection");
    assert_eq!(card.hotspot_id, "model-t-glass");
    assert!(h.showcase.camera_pose().position.distance(Vec3::new(2.0, 3.0, 4.0)) < 0.1);

    h.showcase.request_reset();
    assert!(h.showcase.active_annotation().is_none());

    h.settle();
    assert!(h.showcase.active_annotation().is_none());
    assert!(h.showcase.camera_pose().position.distance(Vec3::new(3.0, 5.0, 20.0)) < 0.1);
}

#[test]
fn every_hotspot_converges_to_its_camera_position() {
    let catalog = Catalog::builtin();
    for (index, slide) in catalog.slides().iter().enumerate() {
        for hotspot in &slide.hotspots {
            let mut h = Harness::new();
            h.showcase.select_slide(index).unwrap();
            h.settle();

            h.showcase.activate_hotspot(&hotspot.id);
            h.settle();

            let expected = hotspot.target_camera_position + h.showcase.slide_origin(index);
            assert!(
                h.showcase.camera_pose().position.distance(expected) < 0.1,
                "{} did not converge",
                hotspot.id
            );
            assert_eq!(
                h.showcase.active_annotation().map(|c| c.annotation),
                Some(&hotspot.annotation)
            );
            let card = h.showcase.active_annotation().expect("card visible");
            assert!(
                card.faces(h.showcase.camera_pose().position),
                "{} card seen from behind",
                hotspot.id
            );
        }
    }
}

#[test]
fn reset_hides_annotation_before_any_frame() {
    let mut h = Harness::new();
    h.showcase.activate_hotspot("model-t-tires");
    h.frame();
    h.frame();
    assert!(h.showcase.active_annotation().is_some());

    h.showcase.request_reset();
    assert!(h.showcase.active_annotation().is_none());
    assert!(h.showcase.intent().reset_requested());

    let tick = h.frame();
    assert_eq!(tick.event, Some(TransitionEvent::ResetComplete));
    assert!(!h.showcase.intent().reset_requested());
}

#[test]
fn slide_change_runs_three_legs() {
    let mut h = Harness::new();
    h.showcase.select_slide(2).unwrap();
    assert_eq!(h.showcase.active_slide(), 2);

    let events: Vec<_> = h.settle().into_iter().filter_map(|t| t.event).collect();
    assert_eq!(
        events,
        [
            TransitionEvent::LegComplete,
            TransitionEvent::LegComplete,
            TransitionEvent::TransitionComplete
        ]
    );

    let resting = h.showcase.active_controller().resting_pose();
    assert!(h.showcase.camera_pose().distance_to(&resting) < 0.1);
    assert_eq!(h.showcase.camera_pose().look_at, resting.look_at);
}

#[test]
fn redundant_selection_is_a_no_op() {
    let mut h = Harness::new();
    h.showcase.select_slide(0).unwrap();
    assert!(!h.showcase.is_transitioning());
    assert!(h.showcase.select_slide(7).is_err());
    assert_eq!(h.showcase.active_slide(), 0);
}

#[test]
fn mid_sequence_change_cancels_and_restarts() {
    let mut h = Harness::new();
    h.showcase.select_slide(2).unwrap();

    // Run until the lateral pass (leg 2) is under way.
    loop {
        if h.frame().event == Some(TransitionEvent::LegComplete) {
            break;
        }
    }
    for _ in 0..5 {
        h.frame();
    }

    let slide2_resting = h.showcase.controller(2).unwrap().resting_pose();
    let before = h.showcase.camera_pose();
    h.showcase.select_slide(1).unwrap();
    // Restart begins from where the camera was.
    assert_eq!(h.showcase.camera_pose(), before);

    let ticks = h.settle();
    let completions = ticks
        .iter()
        .filter(|t| t.event == Some(TransitionEvent::TransitionComplete))
        .count();
    assert_eq!(completions, 1);
    assert!(ticks
        .iter()
        .all(|t| t.pose.distance_to(&slide2_resting) > 0.1));

    let slide1_resting = h.showcase.controller(1).unwrap().resting_pose();
    assert_eq!(h.showcase.active_slide(), 1);
    assert!(h.showcase.camera_pose().distance_to(&slide1_resting) < 0.1);
}

#[test]
fn clicking_picks_on_active_slide_only() {
    let mut h = Harness::new();
    let from = Vec3::new(3.0, 5.0, 20.0);
    let ray = Ray::new(from, Vec3::new(3.7, 1.0, 3.3) - from).unwrap();

    assert_eq!(h.showcase.pick(&ray), Some("model-t-glass"));
    assert!(h.showcase.click(&ray));
    assert!(h.showcase.is_transitioning());

    // The same ray aimed at slide 0 hits nothing once slide 1 is active.
    h.showcase.select_slide(1).unwrap();
    h.settle();
    assert_eq!(h.showcase.pick(&ray), None);
}

#[test]
fn hotspots_wait_for_the_model() {
    let mut h = Harness::new();
    h.showcase
        .set_model_status(0, ModelStatus::Failed("missing file".into()))
        .unwrap();
    h.showcase.activate_hotspot("model-t-glass");
    assert!(!h.showcase.is_transitioning());
    assert!(h.showcase.active_annotation().is_none());

    h.showcase.set_model_status(0, ModelStatus::Ready).unwrap();
    h.showcase.activate_hotspot("model-t-glass");
    assert!(h.showcase.is_transitioning());
}

#[test]
fn hotspot_interrupts_a_dolly() {
    let mut h = Harness::new();
    h.showcase.select_slide(1).unwrap();
    h.frame();
    h.showcase.activate_hotspot("model-a-burger");
    assert_eq!(h.showcase.active_controller().remaining_legs(), 0);

    h.settle();
    let expected = Vec3::new(2.0, 1.0, 1.0) + h.showcase.slide_origin(1);
    assert!(h.showcase.camera_pose().position.distance(expected) < 0.1);
    assert!(h.showcase.active_annotation().is_some());
}
