//! Centralized gallery options with TOML preset support.
//!
//! Every tweakable setting (scroll feel, camera, distortion, image sources,
//! host settings, native grid layout) is consolidated here. Options
//! serialize to/from TOML so a site can ship a preset next to its assets.

mod camera;
mod distortion;
mod gallery;
mod images;
mod layout;
mod scroll;

use std::path::Path;

pub use camera::CameraOptions;
pub use distortion::DistortionOptions;
pub use gallery::GalleryOptions;
pub use images::ImageOptions;
pub use layout::{GridPreset, LayoutOptions};
use schemars::JsonSchema;
pub use scroll::ScrollOptions;
use serde::{Deserialize, Serialize};

use crate::error::VitrineError;

/// Top-level options container. All sub-structs use `#[serde(default)]` so
/// partial TOML files (e.g. only overriding `[scroll]`) work correctly.
#[derive(
    Debug, Clone, Serialize, Deserialize, PartialEq, Default, JsonSchema,
)]
#[serde(default)]
pub struct Options {
    /// Scroll easing and input sensitivity.
    pub scroll: ScrollOptions,
    /// Camera projection parameters.
    pub camera: CameraOptions,
    /// Distortion strength mapping.
    pub distortion: DistortionOptions,
    /// Image sources.
    #[schemars(skip)]
    pub images: ImageOptions,
    /// Host-facing settings (slot selector, settle delay).
    pub gallery: GalleryOptions,
    /// Grid layout used by the native viewer.
    pub layout: LayoutOptions,
}

impl Options {
    /// Generate JSON Schema describing the UI-exposed options.
    #[must_use]
    pub fn json_schema() -> schemars::Schema {
        schemars::schema_for!(Options)
    }

    /// Load options from a TOML file. Missing fields use defaults.
    pub fn load(path: &Path) -> Result<Self, VitrineError> {
        let content = std::fs::read_to_string(path).map_err(VitrineError::Io)?;
        Self::from_toml(&content)
    }

    /// Parse and validate options from a TOML string.
    pub fn from_toml(content: &str) -> Result<Self, VitrineError> {
        let options: Self = toml::from_str(content)
            .map_err(|e| VitrineError::Options(e.to_string()))?;
        options.validate()?;
        Ok(options)
    }

    /// Save options to a TOML file (pretty-printed).
    pub fn save(&self, path: &Path) -> Result<(), VitrineError> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| VitrineError::Options(e.to_string()))?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(VitrineError::Io)?;
        }
        std::fs::write(path, content).map_err(VitrineError::Io)
    }

    /// Reject values the gallery cannot run with.
    pub fn validate(&self) -> Result<(), VitrineError> {
        let ease = self.scroll.ease;
        if !(ease > 0.0 && ease <= 1.0) {
            return Err(VitrineError::Options(format!(
                "scroll.ease must be in (0, 1], got {ease}"
            )));
        }
        if !(self.camera.fovy > 0.0 && self.camera.fovy < 180.0) {
            return Err(VitrineError::Options(format!(
                "camera.fovy must be in (0, 180), got {}",
                self.camera.fovy
            )));
        }
        if self.camera.distance <= 0.0 {
            return Err(VitrineError::Options(format!(
                "camera.distance must be positive, got {}",
                self.camera.distance
            )));
        }
        if self.images.urls.is_empty() {
            return Err(VitrineError::Options(
                "images.urls must name at least one image".to_owned(),
            ));
        }
        if self.layout.columns == 0 {
            return Err(VitrineError::Options(
                "layout.columns must be at least 1".to_owned(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_round_trips_through_toml() {
        let opts = Options::default();
        let toml_str = toml::to_string_pretty(&opts).unwrap();
        let parsed: Options = toml::from_str(&toml_str).unwrap();
        assert_eq!(opts, parsed);
    }

    #[test]
    fn partial_toml_fills_defaults() {
        let toml_str = r"
[scroll]
ease = 0.1
";
        let opts = Options::from_toml(toml_str).unwrap();
        assert_eq!(opts.scroll.ease, 0.1);
        // Everything else should be default
        assert_eq!(opts.scroll.ambient_speed, 2.0);
        assert_eq!(opts.camera.fovy, 45.0);
        assert_eq!(opts.gallery.settle_delay_ms, 200);
        assert_eq!(opts.layout.preset, GridPreset::Default);
    }

    #[test]
    fn preset_names_are_snake_case() {
        let opts = Options::from_toml("[layout]\npreset = \"mobile\"\n").unwrap();
        assert_eq!(opts.layout.preset, GridPreset::Mobile);
    }

    #[test]
    fn ease_outside_unit_interval_is_rejected() {
        for bad in ["0.0", "-0.5", "1.5"] {
            let toml_str = format!("[scroll]\nease = {bad}\n");
            assert!(
                matches!(
                    Options::from_toml(&toml_str),
                    Err(VitrineError::Options(_))
                ),
                "ease {bad} should be rejected"
            );
        }
        assert!(Options::from_toml("[scroll]\nease = 1.0\n").is_ok());
    }

    #[test]
    fn empty_image_list_is_rejected() {
        let opts = Options {
            images: ImageOptions {
                urls: Vec::new(),
                fallback: Vec::new(),
            },
            ..Options::default()
        };
        assert!(opts.validate().is_err());
    }

    #[test]
    fn save_then_load_preserves_values() {
        let dir = std::env::temp_dir().join("vitrine-options-test");
        let path = dir.join("preset.toml");
        let mut opts = Options::default();
        opts.distortion.clamp = false;
        opts.scroll.ambient_speed = 0.0;
        opts.save(&path).unwrap();
        let loaded = Options::load(&path).unwrap();
        assert_eq!(loaded, opts);
        let _ = std::fs::remove_dir_all(dir);
    }

    #[test]
    fn schema_has_expected_properties() {
        let schema_value =
            serde_json::to_value(Options::json_schema()).unwrap();
        let props = schema_value["properties"].as_object().unwrap();

        assert!(props.contains_key("scroll"));
        assert!(props.contains_key("camera"));
        assert!(props.contains_key("distortion"));
        assert!(props.contains_key("layout"));
        assert!(!props.contains_key("images"));

        let camera = &props["camera"]["properties"];
        assert!(camera.get("fovy").is_some());
        assert!(camera.get("distance").is_none());
    }
}
