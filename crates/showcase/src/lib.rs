// src/lib.rs
//! Camera and annotation navigation core for a paged 3D product showcase.
//!
//! The showcase is a horizontal gallery of slides, each holding one model and
//! a set of clickable hotspots. This crate owns the only stateful part of the
//! system: where the camera should be, how it eases there, which slide owns
//! the rendered camera and which annotation card is visible. Rendering, model
//! loading and card markup live outside; see the `showcase_viewer` crate.
//!
//! Everything is driven by an explicit per-frame [`Showcase::tick`] call, so
//! the state machine can be exercised without a renderer.

pub mod composer;
pub mod content;
pub mod error;
pub mod intent;
pub mod picking;
pub mod pose;
pub mod presenter;
pub mod resize;
pub mod selection;
pub mod sequence;
pub mod transition;
pub mod tuning;

// Re-export commonly used types for convenience.
pub use self::composer::{Showcase, Tick};
pub use self::content::{Annotation, Catalog, Hotspot, HotspotRegistry, Slide};
pub use self::error::{ConfigError, NavError};
pub use self::intent::CameraIntent;
pub use self::picking::Ray;
pub use self::pose::{CameraPose, Viewport};
pub use self::presenter::AnnotationCard;
pub use self::sequence::{DollyParams, DollyPlan};
pub use self::transition::{ModelStatus, NavigationState, Phase, TransitionController, TransitionEvent};
pub use self::tuning::{NavigationTuning, ResetStyle};
