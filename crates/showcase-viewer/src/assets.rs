//! Model asset discovery. Rendering the models themselves is out of scope for
//! the viewer; it only needs to know which slides have a model on disk so the
//! navigation core can enable their hotspots.

use showcase::{ModelStatus, Showcase};
use std::collections::HashSet;
use std::ffi::OsString;
use std::path::Path;
use walkdir::WalkDir;

const MODEL_EXTENSIONS: [&str; 2] = ["glb", "gltf"];

/// File names of all model files below `root`.
pub fn scan_models(root: &Path) -> HashSet<OsString> {
    WalkDir::new(root)
        .into_iter()
        .filter_map(Result::ok)
        .filter(|e| e.file_type().is_file())
        .filter(|e| {
            e.path()
                .extension()
                .and_then(|s| s.to_str())
                .is_some_and(|ext| MODEL_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()))
        })
        .map(|e| e.file_name().to_os_string())
        .collect()
}

/// Status for a slide's model reference given the files found on disk.
pub fn status_for(model_ref: &str, found: &HashSet<OsString>, root: &Path) -> ModelStatus {
    match Path::new(model_ref).file_name() {
        Some(name) if found.contains(name) => ModelStatus::Ready,
        _ => ModelStatus::Failed(format!("{} not found under {}", model_ref, root.display())),
    }
}

/// Scans `root` and reports a model status for every slide.
pub fn resolve_models(showcase: &mut Showcase, root: &Path) {
    if !root.is_dir() {
        log::warn!(
            "Asset directory '{}' does not exist; hotspots stay disabled",
            root.display()
        );
    }

    let found = scan_models(root);
    log::info!("Found {} model files under '{}'", found.len(), root.display());

    let statuses: Vec<_> = showcase
        .slides()
        .map(|slide| status_for(&slide.model_ref, &found, root))
        .collect();

    for (index, status) in statuses.into_iter().enumerate() {
        if let Err(e) = showcase.set_model_status(index, status) {
            log::error!("Failed to set model status: {}", e);
        }
    }
}

/// Marks every slide's model as loaded.
pub fn assume_ready(showcase: &mut Showcase) {
    for index in 0..showcase.slide_count() {
        if let Err(e) = showcase.set_model_status(index, ModelStatus::Ready) {
            log::error!("Failed to set model status: {}", e);
        }
    }
}
