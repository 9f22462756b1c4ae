use clap::Parser;
use std::path::PathBuf;

/// `showcase_viewer` - an interactive 3D product showcase.
///
/// Pages through a gallery of slides; clicking a hotspot flies the camera to
/// it and opens its annotation card.
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None)]
pub struct Config {
    /// JSON slide catalog. The built-in showcase is used when omitted.
    #[arg(long, env = "SHOWCASE_CATALOG")]
    pub catalog: Option<PathBuf>,

    /// Directory searched for the slides' model files.
    ///
    /// A slide whose model file is not found keeps its hotspots disabled.
    #[arg(long, env = "SHOWCASE_ASSETS", default_value = "models")]
    pub assets: PathBuf,

    /// Treat every model as loaded without looking for the files.
    #[arg(long, env = "SHOWCASE_ASSUME_MODELS_READY")]
    pub assume_models_ready: bool,

    /// Gap between slide panels, in world units (0 to 10).
    #[arg(long, env = "SHOWCASE_SLIDE_GAP", default_value_t = 1.0)]
    pub slide_gap: f32,

    /// How far the camera pulls back while moving between slides (0 to 50).
    #[arg(long, env = "SHOWCASE_DOLLY_DISTANCE", default_value_t = 20.0)]
    pub dolly_distance: f32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_tweak_panel() {
        let config = Config::parse_from(["showcase_viewer"]);
        assert_eq!(config.slide_gap, 1.0);
        assert_eq!(config.dolly_distance, 20.0);
        assert_eq!(config.assets, PathBuf::from("models"));
        assert!(!config.assume_models_ready);
    }

    #[test]
    fn flags_override_defaults() {
        let config = Config::parse_from([
            "showcase_viewer",
            "--slide-gap",
            "3.5",
            "--assume-models-ready",
            "--catalog",
            "cars.json",
        ]);
        assert_eq!(config.slide_gap, 3.5);
        assert!(config.assume_models_ready);
        assert_eq!(config.catalog, Some(PathBuf::from("cars.json")));
    }
}
