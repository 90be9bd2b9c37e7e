//! # Configuration Module
//!
//! Configuration structures and validation for the image server. A config can come
//! from a TOML file, from CLI flags, or from both (flags win).
//!
//! ## Configuration Parameters
//!
//! | Parameter | Type | Default | Description |
//! |-----------|------|---------|-------------|
//! | `bind` | `SocketAddr` | `0.0.0.0:12345` | Listen address |
//! | `display.width` | `u32` | 960 | Bounding box width, even |
//! | `display.height` | `u32` | 540 | Bounding box height, even |
//! | `display.quantization` | `linear` / `threshold` | `linear` | 8-bit to 4-bit mapping |
//! | `display.threshold` | `u8` | 250 | Cutoff used by `threshold` |
//! | `images` | list of `{ name, path }` | empty | Source images, served in order |
//! | `placeholder.enabled` | `bool` | `true` | Append a generated text image |
//!
//! ## Example File
//!
//! ```toml
//! bind = "0.0.0.0:12345"
//!
//! [display]
//! width = 960
//! height = 540
//!
//! [[images]]
//! name = "logo"
//! path = "./server/teemo.jpg"
//!
//! [placeholder]
//! text = "Hello World from my server!"
//! x = 250
//! y = 270
//! ```

use std::collections::HashSet;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use eink_pack::Size;
use eink_pack::pack::Quantization;
use eink_pack::presets::DisplayPreset;
use serde::Deserialize;

use crate::error::{ServeError, ServeResult};

/// Top-level server configuration.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ServerConfig {
    /// Address the HTTP listener binds to.
    pub bind: SocketAddr,

    /// Target panel geometry and pixel mapping.
    pub display: DisplayConfig,

    /// Source images loaded from disk, in rotation order.
    pub images: Vec<ImageEntry>,

    /// Generated placeholder image, served after the configured images.
    pub placeholder: PlaceholderConfig,
}

/// Bounding box and quantization for the target panel.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DisplayConfig {
    pub width: u32,
    pub height: u32,
    pub quantization: QuantizationMode,
    /// Only read when `quantization = "threshold"`.
    pub threshold: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuantizationMode {
    #[default]
    Linear,
    Threshold,
}

/// One named source image on disk.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ImageEntry {
    pub name: String,
    pub path: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PlaceholderConfig {
    pub enabled: bool,
    pub name: String,
    pub text: String,
    /// Left edge of the text baseline, in panel pixels.
    pub x: i32,
    /// Baseline of the text, in panel pixels.
    pub y: i32,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: SocketAddr::from(([0, 0, 0, 0], 12345)),
            display: DisplayConfig::default(),
            images: Vec::new(),
            placeholder: PlaceholderConfig::default(),
        }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        let bounds = DisplayPreset::default().bounds();
        Self {
            width: bounds.w,
            height: bounds.h,
            quantization: QuantizationMode::Linear,
            threshold: 250,
        }
    }
}

impl Default for PlaceholderConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            name: "placeholder".to_string(),
            text: "Hello World from my server!".to_string(),
            x: 250,
            y: 270,
        }
    }
}

impl DisplayConfig {
    pub fn from_preset(preset: DisplayPreset) -> Self {
        let bounds = preset.bounds();
        Self {
            width: bounds.w,
            height: bounds.h,
            ..Self::default()
        }
    }

    pub fn bounds(&self) -> Size {
        Size::new(self.width, self.height)
    }

    pub fn quantization(&self) -> Quantization {
        match self.quantization {
            QuantizationMode::Linear => Quantization::Linear,
            QuantizationMode::Threshold => Quantization::Threshold {
                cutoff: self.threshold,
            },
        }
    }
}

/// Parses `name=path`, the form used by the `--image` flag.
impl FromStr for ImageEntry {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (name, path) = s
            .split_once('=')
            .ok_or_else(|| format!("expected NAME=PATH, got `{s}`"))?;
        let name = name.trim();
        let path = path.trim();
        if name.is_empty() || path.is_empty() {
            return Err(format!("expected NAME=PATH, got `{s}`"));
        }
        Ok(Self {
            name: name.to_string(),
            path: PathBuf::from(path),
        })
    }
}

impl ServerConfig {
    /// Read and parse a TOML config file. Missing fields take their defaults.
    pub fn load(path: &Path) -> ServeResult<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml(&text).map_err(|source| ServeError::ConfigFile {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn from_toml(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }

    /// Number of images the library will hold.
    pub fn image_count(&self) -> usize {
        self.images.len() + usize::from(self.placeholder.enabled)
    }

    /// Validates the configuration parameters.
    pub fn validate(&self) -> ServeResult<()> {
        if self.display.width == 0 {
            return Err(ServeError::config("display.width", "0", "must be greater than 0"));
        }
        if self.display.height == 0 {
            return Err(ServeError::config("display.height", "0", "must be greater than 0"));
        }
        if self.display.width % 2 == 1 {
            return Err(ServeError::config(
                "display.width",
                self.display.width.to_string(),
                "must be even (two pixels per byte)",
            ));
        }
        if self.display.height % 2 == 1 {
            return Err(ServeError::config(
                "display.height",
                self.display.height.to_string(),
                "must be even (two pixels per byte)",
            ));
        }
        if self.image_count() == 0 {
            return Err(ServeError::EmptyLibrary);
        }

        let mut seen = HashSet::new();
        let placeholder_name = self.placeholder.enabled.then_some(&self.placeholder.name);
        for name in self.images.iter().map(|e| &e.name).chain(placeholder_name) {
            if name.trim().is_empty() {
                return Err(ServeError::config("images.name", name.as_str(), "must not be empty"));
            }
            if !seen.insert(name.as_str()) {
                return Err(ServeError::DuplicateImage(name.clone()));
            }
        }

        if self.placeholder.enabled && self.placeholder.text.is_empty() {
            return Err(ServeError::config("placeholder.text", "", "must not be empty"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ServerConfig::default();
        assert_eq!(config.bind.port(), 12345);
        assert_eq!(config.display.bounds(), Size::new(960, 540));
        assert_eq!(config.display.quantization(), Quantization::Linear);
        assert!(config.images.is_empty());
        assert!(config.placeholder.enabled);
        assert_eq!(config.image_count(), 1);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_toml() {
        let config = ServerConfig::from_toml(
            r#"
            bind = "127.0.0.1:8080"

            [display]
            width = 800
            height = 480
            quantization = "threshold"
            threshold = 200

            [[images]]
            name = "logo"
            path = "./server/teemo.jpg"

            [placeholder]
            enabled = false
            "#,
        )
        .unwrap();

        assert_eq!(config.bind, "127.0.0.1:8080".parse::<SocketAddr>().unwrap());
        assert_eq!(config.display.bounds(), Size::new(800, 480));
        assert_eq!(
            config.display.quantization(),
            Quantization::Threshold { cutoff: 200 }
        );
        assert_eq!(config.images.len(), 1);
        assert_eq!(config.images[0].path, PathBuf::from("./server/teemo.jpg"));
        assert!(!config.placeholder.enabled);
        assert_eq!(config.placeholder.text, "Hello World from my server!");
    }

    #[test]
    fn test_unknown_field_rejected() {
        assert!(ServerConfig::from_toml("colour = true").is_err());
    }

    #[test]
    fn test_config_validation() {
        let mut config = ServerConfig::default();

        config.display.width = 0;
        assert!(config.validate().is_err());
        config.display.width = 961;
        assert!(matches!(
            config.validate(),
            Err(ServeError::Config { ref field, .. }) if field == "display.width"
        ));
        config.display.width = 960;

        config.display.height = 541;
        assert!(matches!(
            config.validate(),
            Err(ServeError::Config { ref field, .. }) if field == "display.height"
        ));
        config.display.height = 540;

        config.placeholder.enabled = false;
        assert!(matches!(config.validate(), Err(ServeError::EmptyLibrary)));

        config.images.push("logo=a.png".parse().unwrap());
        assert!(config.validate().is_ok());

        config.images.push("logo=b.png".parse().unwrap());
        assert!(matches!(config.validate(), Err(ServeError::DuplicateImage(n)) if n == "logo"));
        config.images.pop();

        config.placeholder.enabled = true;
        config.placeholder.name = "logo".to_string();
        assert!(matches!(config.validate(), Err(ServeError::DuplicateImage(_))));
    }

    #[test]
    fn test_image_entry_from_str() {
        let entry: ImageEntry = "logo=./server/teemo.jpg".parse().unwrap();
        assert_eq!(entry.name, "logo");
        assert_eq!(entry.path, PathBuf::from("./server/teemo.jpg"));

        assert!("logo".parse::<ImageEntry>().is_err());
        assert!("=x.png".parse::<ImageEntry>().is_err());
    }

    #[test]
    fn test_from_preset() {
        let display = DisplayConfig::from_preset(DisplayPreset::Trmnl);
        assert_eq!(display.bounds(), Size::new(800, 480));
        assert_eq!(display.threshold, 250);
    }
}
