//! Error types surfaced by catalog loading and navigation requests.

use std::path::PathBuf;
use thiserror::Error;

/// A slide catalog could not be turned into immutable showcase content.
///
/// These are raised once, at load time. Nothing in the render path masks a
/// malformed catalog.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read catalog {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed catalog JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("catalog contains no slides")]
    EmptyCatalog,

    #[error("slide {slide} has no model reference")]
    MissingModelRef { slide: usize },

    #[error("slide {slide} has a hotspot with an empty id")]
    EmptyHotspotId { slide: usize },

    #[error("slide {slide} declares hotspot `{id}` more than once")]
    DuplicateHotspot { slide: usize, id: String },

    #[error("hotspot `{id}` on slide {slide} has no annotation")]
    MissingAnnotation { slide: usize, id: String },

    #[error("annotation for hotspot `{id}` on slide {slide} has an empty title")]
    EmptyTitle { slide: usize, id: String },

    #[error("hotspot `{id}` on slide {slide} has a non-finite {field}")]
    NonFiniteVector {
        slide: usize,
        id: String,
        field: &'static str,
    },
}

/// A navigation request was rejected before touching any state.
#[derive(Debug, Error, PartialEq)]
pub enum NavError {
    #[error("slide index {index} out of range (showcase has {count} slides)")]
    SlideOutOfRange { index: usize, count: usize },

    #[error("{name} must be finite, got {value}")]
    NonFiniteParameter { name: &'static str, value: f32 },

    #[error("tuning value {name} is out of range: {value}")]
    InvalidTuning { name: &'static str, value: f32 },

    #[error("viewport must be finite and positive, got {width}x{height}")]
    InvalidViewport { width: f32, height: f32 },
}
