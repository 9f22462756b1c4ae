//! Static showcase content: slides, their hotspots and annotation cards.
//!
//! Content is read once from a JSON catalog, validated, and then never
//! mutated. Hotspot and annotation coordinates are slide-local: they are
//! relative to the slide's layout origin, which the gallery shifts along X.
//!
//! Catalog layout (camelCase keys):
//!
//! ```text
//! { "slides": [ { "modelRef", "displayName", "caption", "description",
//!                 "price", "range", "mainColor",
//!                 "hotspots": [ { "id", "position", "cameraPosition",
//!                                 "annotation": { "title", "body", "imageRef",
//!                                                 "linkRef", "linkLabel",
//!                                                 "position", "rotation"? } } ] } ] }
//! ```

use crate::error::ConfigError;
use crate::pose::CameraPose;
use glam::Vec3;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;

const BUILTIN_CATALOG: &str = include_str!("../assets/showcase.json");

/// The content card shown while a hotspot is active.
#[derive(Debug, Clone, PartialEq)]
pub struct Annotation {
    pub title: String,
    pub body: String,
    pub image_ref: String,
    pub link_ref: String,
    pub link_label: String,
    /// Slide-local point the card is pinned to.
    pub anchor_position: Vec3,
    /// Optional Euler XYZ orientation of the card, radians.
    pub anchor_rotation: Option<Vec3>,
}

/// A clickable point of interest on a slide's model.
#[derive(Debug, Clone, PartialEq)]
pub struct Hotspot {
    pub id: String,
    /// Slide-local position of the hotspot; the camera looks here once active.
    pub world_position: Vec3,
    /// Slide-local camera position used while the hotspot is active.
    pub target_camera_position: Vec3,
    pub annotation: Annotation,
}

impl Hotspot {
    /// Slide-local pose the camera eases to when this hotspot is activated.
    #[inline]
    pub fn target_pose(&self) -> CameraPose {
        CameraPose::new(self.target_camera_position, self.world_position)
    }
}

/// Ordered hotspots of one slide, indexed by id.
#[derive(Debug, Clone, Default)]
pub struct HotspotRegistry {
    hotspots: Vec<Hotspot>,
    by_id: HashMap<String, usize>,
}

impl HotspotRegistry {
    pub fn find(&self, id: &str) -> Option<&Hotspot> {
        self.by_id.get(id).map(|&i| &self.hotspots[i])
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Hotspot> {
        self.hotspots.iter()
    }

    pub fn len(&self) -> usize {
        self.hotspots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hotspots.is_empty()
    }

    /// Appends a hotspot, rejecting a duplicate id.
    fn insert(&mut self, slide: usize, hotspot: Hotspot) -> Result<(), ConfigError> {
        if self.by_id.contains_key(&hotspot.id) {
            return Err(ConfigError::DuplicateHotspot {
                slide,
                id: hotspot.id,
            });
        }
        self.by_id.insert(hotspot.id.clone(), self.hotspots.len());
        self.hotspots.push(hotspot);
        Ok(())
    }
}

impl<'a> IntoIterator for &'a HotspotRegistry {
    type Item = &'a Hotspot;
    type IntoIter = std::slice::Iter<'a, Hotspot>;

    fn into_iter(self) -> Self::IntoIter {
        self.hotspots.iter()
    }
}

/// One paged unit of the showcase.
#[derive(Debug, Clone)]
pub struct Slide {
    /// Position of the slide in the gallery, left to right.
    pub index: usize,
    pub model_ref: String,
    pub display_name: String,
    /// Short label drawn above the slide panel (e.g. a model year).
    pub caption: String,
    pub description: String,
    pub price: Option<f64>,
    pub range: Option<f64>,
    pub main_color: String,
    pub hotspots: HotspotRegistry,
}

/// All slides of a showcase, in gallery order.
#[derive(Debug, Clone)]
pub struct Catalog {
    slides: Vec<Slide>,
}

impl Catalog {
    /// The three-slide showcase shipped with the crate.
    pub fn builtin() -> Self {
        // The embedded catalog is covered by tests; failing here is a build defect.
        Self::from_json(BUILTIN_CATALOG).expect("embedded showcase catalog is valid")
    }

    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let raw: RawCatalog = serde_json::from_str(json)?;
        raw.validate()
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let catalog = Self::from_json(&json)?;
        log::info!(
            "Loaded catalog {} ({} slides)",
            path.display(),
            catalog.slides.len()
        );
        Ok(catalog)
    }

    pub fn slides(&self) -> &[Slide] {
        &self.slides
    }

    pub fn slide(&self, index: usize) -> Option<&Slide> {
        self.slides.get(index)
    }

    pub fn len(&self) -> usize {
        self.slides.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slides.is_empty()
    }

    pub fn into_slides(self) -> Vec<Slide> {
        self.slides
    }
}

// --- Raw serde records ---

#[derive(Deserialize)]
struct RawCatalog {
    slides: Vec<RawSlide>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawSlide {
    model_ref: String,
    display_name: String,
    #[serde(default)]
    caption: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    price: Option<f64>,
    #[serde(default)]
    range: Option<f64>,
    #[serde(default = "default_main_color")]
    main_color: String,
    #[serde(default)]
    hotspots: Vec<RawHotspot>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawHotspot {
    id: String,
    position: Vec3,
    camera_position: Vec3,
    #[serde(default)]
    annotation: Option<RawAnnotation>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawAnnotation {
    title: String,
    #[serde(default)]
    body: String,
    #[serde(default)]
    image_ref: String,
    #[serde(default)]
    link_ref: String,
    #[serde(default)]
    link_label: String,
    position: Vec3,
    #[serde(default)]
    rotation: Option<Vec3>,
}

fn default_main_color() -> String {
    "#ffffff".to_owned()
}

impl RawCatalog {
    fn validate(self) -> Result<Catalog, ConfigError> {
        if self.slides.is_empty() {
            return Err(ConfigError::EmptyCatalog);
        }

        let slides = self
            .slides
            .into_iter()
            .enumerate()
            .map(|(index, raw)| raw.validate(index))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Catalog { slides })
    }
}

impl RawSlide {
    fn validate(self, index: usize) -> Result<Slide, ConfigError> {
        if self.model_ref.trim().is_empty() {
            return Err(ConfigError::MissingModelRef { slide: index });
        }

        let mut hotspots = HotspotRegistry::default();
        for raw in self.hotspots {
            hotspots.insert(index, raw.validate(index)?)?;
        }

        Ok(Slide {
            index,
            model_ref: self.model_ref,
            display_name: self.display_name,
            caption: self.caption,
            description: self.description,
            price: self.price,
            range: self.range,
            main_color: self.main_color,
            hotspots,
        })
    }
}

impl RawHotspot {
    fn validate(self, slide: usize) -> Result<Hotspot, ConfigError> {
        if self.id.trim().is_empty() {
            return Err(ConfigError::EmptyHotspotId { slide });
        }

        if !self.position.is_finite() {
            return Err(non_finite(slide, &self.id, "position"));
        }
        if !self.camera_position.is_finite() {
            return Err(non_finite(slide, &self.id, "cameraPosition"));
        }

        let Some(annotation) = self.annotation else {
            return Err(ConfigError::MissingAnnotation { slide, id: self.id });
        };
        if annotation.title.trim().is_empty() {
            return Err(ConfigError::EmptyTitle { slide, id: self.id });
        }
        if !annotation.position.is_finite() {
            return Err(non_finite(slide, &self.id, "annotation position"));
        }
        if annotation.rotation.is_some_and(|r| !r.is_finite()) {
            return Err(non_finite(slide, &self.id, "annotation rotation"));
        }

        Ok(Hotspot {
            world_position: self.position,
            target_camera_position: self.camera_position,
            annotation: Annotation {
                title: annotation.title,
                body: annotation.body,
                image_ref: annotation.image_ref,
                link_ref: annotation.link_ref,
                link_label: annotation.link_label,
                anchor_position: annotation.position,
                anchor_rotation: annotation.rotation,
            },
            id: self.id,
        })
    }
}

fn non_finite(slide: usize, id: &str, field: &'static str) -> ConfigError {
    ConfigError::NonFiniteVector {
        slide,
        id: id.to_owned(),
        field,
    }
}
