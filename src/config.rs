//! Configuration handling for termframe.
//!
//! Rendering policy is resolved once at startup into an immutable
//! [`RenderConfig`]. Values come from built-in defaults, then an optional
//! TOML file (`~/.config/termframe/config.toml` or `--config`), then
//! command-line flags.

use serde::Deserialize;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::error::ConfigError;

/// Default release window for the input debouncer, in milliseconds.
pub const DEFAULT_KEYPRESS_SMOOTHING_MS: u32 = 42;

/// Native screen size of the host application.
pub const HOST_SCREEN_WIDTH: u32 = 320;
pub const HOST_SCREEN_HEIGHT: u32 = 200;

/// Default downscale factor (320x200 -> 80x50).
pub const DEFAULT_SCALING: u32 = 4;

/// Window title used when none is configured.
pub const DEFAULT_TITLE: &str = "termframe";

/// Commented config file written by `termframe config init`.
pub const DEFAULT_CONFIG_TOML: &str = r#"# termframe configuration
# Command-line flags override anything set here.

[render]
# True-color foreground escapes
color = true
# Map brightness to glyph density (off: solid glyphs)
gradient = true
# Bold attribute for the whole frame
bold = true
# Erase the display before every frame
erase = false
# Square-root gamma curve before quantizing
gamma_correct = false
# Character set: ascii, block, braille
chars = "ascii"

[input]
# Milliseconds without a repeat before a key counts as released
kpsmooth_ms = 42

[screen]
# Downscale factor of the 320x200 host screen
scaling = 4
# Terminal window title
title = "termframe"
"#;

/// Glyph family used to draw each pixel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CharacterSet {
    /// Single-byte ASCII density ramp
    #[default]
    Ascii,
    /// Unicode shade blocks (3-byte UTF-8)
    Block,
    /// Unicode braille patterns (3-byte UTF-8), dithered
    Braille,
}

impl CharacterSet {
    /// Name as accepted on the command line and in the config file.
    pub fn name(&self) -> &'static str {
        match self {
            CharacterSet::Ascii => "ascii",
            CharacterSet::Block => "block",
            CharacterSet::Braille => "braille",
        }
    }

    /// Worst-case bytes needed for the two glyphs drawn per pixel.
    pub fn glyph_pair_bytes(&self) -> usize {
        match self {
            CharacterSet::Ascii => 2,
            CharacterSet::Block | CharacterSet::Braille => 6,
        }
    }
}

impl fmt::Display for CharacterSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for CharacterSet {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ascii" => Ok(CharacterSet::Ascii),
            "block" => Ok(CharacterSet::Block),
            "braille" => Ok(CharacterSet::Braille),
            other => Err(ConfigError::UnknownCharacterSet(other.to_string())),
        }
    }
}

/// Rendering and input policy, fixed for the lifetime of the process.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderConfig {
    pub color_enabled: bool,
    pub gradient_enabled: bool,
    pub bold_enabled: bool,
    pub erase_enabled: bool,
    pub gamma_correct_enabled: bool,
    pub character_set: CharacterSet,
    pub keypress_smoothing_ms: u32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            color_enabled: true,
            gradient_enabled: true,
            bold_enabled: true,
            erase_enabled: false,
            gamma_correct_enabled: false,
            character_set: CharacterSet::Ascii,
            keypress_smoothing_ms: DEFAULT_KEYPRESS_SMOOTHING_MS,
        }
    }
}

/// Everything resolved at startup: render policy, frame size and title.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub render: RenderConfig,
    pub width: usize,
    pub height: usize,
    pub scaling: u32,
    pub title: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            render: RenderConfig::default(),
            width: (HOST_SCREEN_WIDTH / DEFAULT_SCALING) as usize,
            height: (HOST_SCREEN_HEIGHT / DEFAULT_SCALING) as usize,
            scaling: DEFAULT_SCALING,
            title: DEFAULT_TITLE.to_string(),
        }
    }
}

/// Configuration file structure.
///
/// Every field is optional so that a partial file only overrides what it names.
#[derive(Debug, Deserialize, Default)]
pub struct FileConfig {
    #[serde(default)]
    pub render: RenderSection,
    #[serde(default)]
    pub input: InputSection,
    #[serde(default)]
    pub screen: ScreenSection,
}

#[derive(Debug, Deserialize, Default)]
pub struct RenderSection {
    pub color: Option<bool>,
    pub gradient: Option<bool>,
    pub bold: Option<bool>,
    pub erase: Option<bool>,
    pub gamma_correct: Option<bool>,
    pub chars: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
pub struct InputSection {
    pub kpsmooth_ms: Option<u32>,
}

#[derive(Debug, Deserialize, Default)]
pub struct ScreenSection {
    pub scaling: Option<u32>,
    pub title: Option<String>,
}

impl FileConfig {
    /// Load configuration from a file path.
    ///
    /// With no explicit path the default location is tried and a missing file
    /// yields the default config. An explicit path must exist.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let explicit = path.is_some();
        let path = path.map(PathBuf::from).unwrap_or_else(default_path);

        if !path.exists() {
            if explicit {
                return Err(ConfigError::NotFound(path));
            }
            log::debug!("no config file at {}, using defaults", path.display());
            return Ok(FileConfig::default());
        }

        let content = std::fs::read_to_string(&path).map_err(|source| ConfigError::Io {
            path: path.clone(),
            source,
        })?;
        let config = toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.clone(),
            source,
        })?;
        log::info!("loaded config from {}", path.display());
        Ok(config)
    }

    /// Apply the file's values on top of the built-in defaults.
    pub fn render_config(&self) -> Result<RenderConfig, ConfigError> {
        let defaults = RenderConfig::default();
        let character_set = match &self.render.chars {
            Some(name) => name.parse()?,
            None => defaults.character_set,
        };

        Ok(RenderConfig {
            color_enabled: self.render.color.unwrap_or(defaults.color_enabled),
            gradient_enabled: self.render.gradient.unwrap_or(defaults.gradient_enabled),
            bold_enabled: self.render.bold.unwrap_or(defaults.bold_enabled),
            erase_enabled: self.render.erase.unwrap_or(defaults.erase_enabled),
            gamma_correct_enabled: self
                .render
                .gamma_correct
                .unwrap_or(defaults.gamma_correct_enabled),
            character_set,
            keypress_smoothing_ms: self
                .input
                .kpsmooth_ms
                .unwrap_or(defaults.keypress_smoothing_ms),
        })
    }

    /// Defaults with this file's values applied.
    pub fn settings(&self) -> Result<Settings, ConfigError> {
        let scaling = self.screen.scaling.unwrap_or(DEFAULT_SCALING);
        let (width, height) = resolution_for_scaling(scaling)?;
        Ok(Settings {
            render: self.render_config()?,
            width: width as usize,
            height: height as usize,
            scaling,
            title: self
                .screen
                .title
                .clone()
                .unwrap_or_else(|| DEFAULT_TITLE.to_string()),
        })
    }
}

/// Write the commented default config to `path`, creating parent
/// directories. Refuses to overwrite an existing file.
pub fn init_config_file(path: &Path) -> Result<(), ConfigError> {
    if path.exists() {
        return Err(ConfigError::AlreadyExists(path.to_path_buf()));
    }
    let io_err = |source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    };
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(io_err)?;
    }
    std::fs::write(path, DEFAULT_CONFIG_TOML).map_err(io_err)?;
    log::info!("wrote default config to {}", path.display());
    Ok(())
}

/// Framebuffer dimensions for a given downscale factor of the host screen.
pub fn resolution_for_scaling(scaling: u32) -> Result<(u32, u32), ConfigError> {
    if scaling == 0 || scaling > HOST_SCREEN_HEIGHT {
        return Err(ConfigError::InvalidScaling(scaling));
    }
    Ok((HOST_SCREEN_WIDTH / scaling, HOST_SCREEN_HEIGHT / scaling))
}

/// Get the default config file path.
pub fn default_path() -> PathBuf {
    dirs::config_dir()
        .map(|d| d.join("termframe").join("config.toml"))
        .unwrap_or_else(|| {
            let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(home).join(".config/termframe/config.toml")
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_render_config_defaults() {
        let config = RenderConfig::default();
        assert!(config.color_enabled);
        assert!(config.gradient_enabled);
        assert!(config.bold_enabled);
        assert!(!config.erase_enabled);
        assert!(!config.gamma_correct_enabled);
        assert_eq!(config.character_set, CharacterSet::Ascii);
        assert_eq!(config.keypress_smoothing_ms, 42);
    }

    #[test]
    fn test_character_set_from_str() {
        assert_eq!("ascii".parse::<CharacterSet>().unwrap(), CharacterSet::Ascii);
        assert_eq!("block".parse::<CharacterSet>().unwrap(), CharacterSet::Block);
        assert_eq!(
            "braille".parse::<CharacterSet>().unwrap(),
            CharacterSet::Braille
        );
    }

    #[test]
    fn test_character_set_unknown_is_error() {
        let err = "BLOCK".parse::<CharacterSet>().unwrap_err();
        assert!(matches!(err, ConfigError::UnknownCharacterSet(ref s) if s == "BLOCK"));
    }

    #[test]
    fn test_load_missing_explicit_path_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope.toml");
        let err = FileConfig::load(Some(&path)).unwrap_err();
        assert!(matches!(err, ConfigError::NotFound(_)));
    }

    #[test]
    fn test_load_partial_file_overrides_named_fields() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "[render]\ncolor = false\nchars = \"braille\"\n\n[input]\nkpsmooth_ms = 100"
        )
        .unwrap();

        let config = FileConfig::load(Some(file.path())).unwrap();
        let render = config.render_config().unwrap();
        assert!(!render.color_enabled);
        assert!(render.bold_enabled);
        assert_eq!(render.character_set, CharacterSet::Braille);
        assert_eq!(render.keypress_smoothing_ms, 100);
    }

    #[test]
    fn test_load_unknown_charset_in_file_is_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[render]\nchars = \"emoji\"").unwrap();

        let config = FileConfig::load(Some(file.path())).unwrap();
        assert!(matches!(
            config.render_config(),
            Err(ConfigError::UnknownCharacterSet(_))
        ));
    }

    #[test]
    fn test_load_invalid_toml_is_parse_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[render\ncolor = ").unwrap();
        assert!(matches!(
            FileConfig::load(Some(file.path())),
            Err(ConfigError::Parse { .. })
        ));
    }

    #[test]
    fn test_default_config_file_matches_defaults() {
        let config: FileConfig = toml::from_str(DEFAULT_CONFIG_TOML).unwrap();
        assert_eq!(config.settings().unwrap(), Settings::default());
    }

    #[test]
    fn test_settings_from_screen_section() {
        let config: FileConfig =
            toml::from_str("[screen]\nscaling = 2\ntitle = \"DOOM\"").unwrap();
        let settings = config.settings().unwrap();
        assert_eq!((settings.width, settings.height), (160, 100));
        assert_eq!(settings.title, "DOOM");
    }

    #[test]
    fn test_settings_zero_scaling_is_error() {
        let config: FileConfig = toml::from_str("[screen]\nscaling = 0").unwrap();
        assert!(matches!(
            config.settings(),
            Err(ConfigError::InvalidScaling(0))
        ));
    }

    #[test]
    fn test_init_config_file_creates_and_refuses_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        init_config_file(&path).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), DEFAULT_CONFIG_TOML);
        assert!(matches!(
            init_config_file(&path),
            Err(ConfigError::AlreadyExists(_))
        ));
    }

    #[test]
    fn test_resolution_for_scaling() {
        assert_eq!(resolution_for_scaling(4).unwrap(), (80, 50));
        assert_eq!(resolution_for_scaling(1).unwrap(), (320, 200));
        assert!(resolution_for_scaling(0).is_err());
        assert!(resolution_for_scaling(201).is_err());
    }
}
