//! Map configuration.
//!
//! The default configuration is embedded at compile time. A user file is
//! layered on top of it one section at a time: any section present in the
//! file replaces the default section wholesale.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tract_map_classify::{ClassificationEngine, ClassifyError, Color, Palette};

use crate::label::LabelPlacement;
use crate::style::StrokeStyle;

const DEFAULT_CONFIG: &str = include_str!("../config/default.toml");

/// Errors from loading or validating a configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("Failed to read {}: {source}", .path.display())]
    Io {
        /// File that failed to load.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The configuration is not valid TOML or has the wrong shape.
    #[error("Invalid configuration: {0}")]
    Toml(#[from] toml::de::Error),

    /// The classification parameters are unusable.
    #[error(transparent)]
    Classify(#[from] ClassifyError),
}

/// Dataset locations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataConfig {
    /// CSV of tract records keyed by `tract_id`.
    pub tabular: PathBuf,
    /// `GeoJSON` tract polygons.
    pub geometry: PathBuf,
}

/// Color classification and histogram parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassificationConfig {
    /// Number of quantile color classes.
    pub class_count: usize,
    /// Number of histogram bins.
    pub bin_count: usize,
    /// Class colors, lowest class first.
    pub palette: Vec<Color>,
    /// Fill for tracts with no value.
    pub no_data: Color,
}

impl ClassificationConfig {
    /// Validates the parameters into an engine.
    ///
    /// # Errors
    ///
    /// Returns [`ClassifyError`] if the palette is empty or the counts are
    /// out of range.
    pub fn engine(&self) -> Result<ClassificationEngine, ClassifyError> {
        ClassificationEngine::new(
            Palette {
                colors: self.palette.clone(),
                no_data: self.no_data,
            },
            self.class_count,
            self.bin_count,
        )
    }
}

/// Strokes for regions, bars, and the highlight.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StyleConfig {
    /// Resting outline of tract polygons.
    pub region: StrokeStyle,
    /// Resting outline of histogram bars.
    pub bar: StrokeStyle,
    /// Outline applied to highlighted elements.
    pub highlight: StrokeStyle,
}

/// Background grid lines.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GraticuleConfig {
    /// Whether to draw the graticule at all.
    pub enabled: bool,
    /// `(longitude, latitude)` spacing in degrees.
    pub step: (f64, f64),
    /// Extra grid steps around the data extent.
    pub padding: u32,
}

/// Drawing frame dimensions and hover label placement.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FrameConfig {
    /// Frame width in pixels.
    pub width: f64,
    /// Frame height in pixels.
    pub height: f64,
    /// `(x, y)` offset of the label from the pointer.
    pub label_offset: (f64, f64),
    /// Label width used to decide when to flip it left of the pointer.
    pub label_width: f64,
}

impl FrameConfig {
    /// Label placement inside this frame.
    #[must_use]
    pub const fn label_placement(&self) -> LabelPlacement {
        LabelPlacement {
            offset: self.label_offset,
            label_width: self.label_width,
            frame_width: self.width,
        }
    }
}

/// Complete map configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapConfig {
    /// Dataset locations.
    pub data: DataConfig,
    /// Classification parameters.
    pub classification: ClassificationConfig,
    /// Element strokes.
    pub style: StyleConfig,
    /// Background grid.
    pub graticule: GraticuleConfig,
    /// Frame and label layout.
    pub frame: FrameConfig,
}

/// The embedded defaults. Every section is required here, so parsing them
/// never consults [`MapConfig::default`].
#[derive(Deserialize)]
struct DefaultSections {
    data: DataConfig,
    classification: ClassificationConfig,
    style: StyleConfig,
    graticule: GraticuleConfig,
    frame: FrameConfig,
}

impl Default for MapConfig {
    fn default() -> Self {
        let sections: DefaultSections = toml::from_str(DEFAULT_CONFIG)
            .unwrap_or_else(|e| panic!("Failed to parse embedded default config: {e}"));
        Self {
            data: sections.data,
            classification: sections.classification,
            style: sections.style,
            graticule: sections.graticule,
            frame: sections.frame,
        }
    }
}

impl MapConfig {
    /// Parses a configuration, filling absent sections from the defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Toml`] if the text is not a valid
    /// configuration.
    pub fn from_toml_str(toml_str: &str) -> Result<Self, ConfigError> {
        let config = toml::from_str(toml_str)?;
        Ok(config)
    }

    /// Reads and parses a configuration file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        log::debug!("Loaded configuration from {}", path.display());
        Self::from_toml_str(&text)
    }

    /// Reads `path` if given, otherwise returns the defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the file cannot be read or parsed.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, ConfigError> {
        path.map_or_else(|| Ok(Self::default()), Self::load)
    }

    /// The validated classification engine.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Classify`] if the classification section is
    /// unusable.
    pub fn engine(&self) -> Result<ClassificationEngine, ConfigError> {
        Ok(self.classification.engine()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embedded_defaults_parse() {
        let config = MapConfig::default();
        assert_eq!(config.classification.class_count, 5);
        assert_eq!(config.classification.bin_count, 20);
        assert_eq!(config.classification.palette.len(), 5);
        assert_eq!(
            config.classification.palette[0],
            Color::rgb(0xD4, 0xB9, 0xDA)
        );
        assert_eq!(config.classification.no_data, Color::rgb(0xee, 0xee, 0xee));
        assert_eq!(config.graticule.step, (0.25, 0.25));
        assert!((config.frame.width - 960.0).abs() < f64::EPSILON);
        assert!(config.engine().is_ok());
    }

    #[test]
    fn present_section_replaces_default_section() {
        let config = MapConfig::from_toml_str(
            r##"
            [classification]
            class_count = 3
            bin_count = 10
            palette = ["#000", "#777", "#fff"]
            no_data = "#ccc"
            "##,
        )
        .unwrap();

        assert_eq!(config.classification.class_count, 3);
        assert_eq!(config.classification.palette.len(), 3);
        assert_eq!(config.data, MapConfig::default().data);
        assert_eq!(config.frame, MapConfig::default().frame);
    }

    #[test]
    fn defaults_and_classification_only_file_agree_on_other_sections() {
        let defaults = MapConfig::default();
        let config = MapConfig::from_toml_str(
            r##"
            [classification]
            class_count = 2
            bin_count = 4
            palette = ["#111", "#222"]
            no_data = "#eee"
            "##,
        )
        .unwrap();

        assert_eq!(config.classification.palette.len(), 2);
        assert_eq!(config.data, defaults.data);
        assert_eq!(config.frame, defaults.frame);
        assert_eq!(config.style, defaults.style);
        assert_eq!(config.graticule, defaults.graticule);
        assert_eq!(MapConfig::from_toml_str("").unwrap(), defaults);
        assert_eq!(MapConfig::load_or_default(None).unwrap(), defaults);
    }

    #[test]
    fn partial_section_is_rejected() {
        let result = MapConfig::from_toml_str("[frame]\nwidth = 400.0\n");
        assert!(matches!(result, Err(ConfigError::Toml(_))));
    }

    #[test]
    fn invalid_color_is_rejected() {
        let result = MapConfig::from_toml_str(
            r##"
            [classification]
            class_count = 1
            bin_count = 1
            palette = ["purple"]
            no_data = "#eee"
            "##,
        );
        assert!(matches!(result, Err(ConfigError::Toml(_))));
    }

    #[test]
    fn class_count_beyond_palette_fails_validation() {
        let mut config = MapConfig::default();
        config.classification.class_count = 9;
        assert!(matches!(config.engine(), Err(ConfigError::Classify(_))));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let result = MapConfig::load(Path::new("/nonexistent/tract_map.toml"));
        assert!(matches!(result, Err(ConfigError::Io { .. })));
    }
}
