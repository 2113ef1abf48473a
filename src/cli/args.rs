//! CLI argument parsing with clap.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use super::enums::CharacterSet;
use crate::config::{resolution_for_scaling, FileConfig, Settings};
use crate::error::ConfigError;

/// Renders an animated framebuffer in the terminal and reports key events
#[derive(Parser, Debug)]
#[command(name = "termframe")]
#[command(version, about = "Framebuffer to terminal renderer with debounced key input", long_about = None)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Disable true-color escapes
    #[arg(long)]
    pub no_color: bool,

    /// Draw solid glyphs instead of a brightness gradient
    #[arg(long)]
    pub no_gradient: bool,

    /// Disable the bold attribute
    #[arg(long)]
    pub no_bold: bool,

    /// Erase the display before every frame
    #[arg(long)]
    pub erase: bool,

    /// Apply square-root gamma correction
    #[arg(long)]
    pub gamma_correct: bool,

    /// Character set
    #[arg(long, value_name = "SET")]
    pub chars: Option<CharacterSet>,

    /// Key release window in milliseconds
    #[arg(long, value_name = "MS")]
    pub kpsmooth: Option<u32>,

    /// Downscale factor of the 320x200 screen
    #[arg(long, value_name = "N")]
    pub scaling: Option<u32>,

    /// Config file path
    #[arg(long, short)]
    pub config: Option<PathBuf>,

    /// Terminal window title
    #[arg(long)]
    pub title: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Debug, Clone)]
pub enum ConfigAction {
    /// Show the resolved configuration
    Show,
    /// Create default config file
    Init,
}

impl Args {
    /// Load the config file named by `--config` (or the default one) and
    /// apply these flags on top of it.
    pub fn load_settings(&self) -> Result<Settings, ConfigError> {
        let file = FileConfig::load(self.config.as_deref())?;
        self.apply(&file)
    }

    /// Resolve settings: defaults, then `file`, then flags.
    ///
    /// Flags only ever override; an absent flag keeps the file's value.
    pub fn apply(&self, file: &FileConfig) -> Result<Settings, ConfigError> {
        let mut settings = file.settings()?;
        let render = &mut settings.render;

        if self.no_color {
            render.color_enabled = false;
        }
        if self.no_gradient {
            render.gradient_enabled = false;
        }
        if self.no_bold {
            render.bold_enabled = false;
        }
        if self.erase {
            render.erase_enabled = true;
        }
        if self.gamma_correct {
            render.gamma_correct_enabled = true;
        }
        if let Some(chars) = self.chars {
            render.character_set = chars.into();
        }
        if let Some(ms) = self.kpsmooth {
            render.keypress_smoothing_ms = ms;
        }
        if let Some(scaling) = self.scaling {
            let (width, height) = resolution_for_scaling(scaling)?;
            settings.scaling = scaling;
            settings.width = width as usize;
            settings.height = height as usize;
        }
        if let Some(title) = &self.title {
            settings.title = title.clone();
        }

        Ok(settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config;

    fn file(toml_text: &str) -> FileConfig {
        toml::from_str(toml_text).unwrap()
    }

    #[test]
    fn test_args_defaults() {
        let args = Args::parse_from(["termframe"]);
        assert!(!args.no_color);
        assert!(!args.no_gradient);
        assert!(!args.no_bold);
        assert!(!args.erase);
        assert!(!args.gamma_correct);
        assert!(args.chars.is_none());
        assert!(args.kpsmooth.is_none());
        assert!(args.scaling.is_none());
        assert!(args.config.is_none());
        assert!(args.title.is_none());
        assert!(args.command.is_none());
    }

    #[test]
    fn test_args_chars_values() {
        let args = Args::parse_from(["termframe", "--chars", "block"]);
        assert_eq!(args.chars, Some(CharacterSet::Block));

        let args = Args::parse_from(["termframe", "--chars", "braille"]);
        assert_eq!(args.chars, Some(CharacterSet::Braille));
    }

    #[test]
    fn test_args_unknown_chars_rejected() {
        let result = Args::try_parse_from(["termframe", "--chars", "emoji"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_args_config_short_flag() {
        let args = Args::parse_from(["termframe", "-c", "/tmp/termframe.toml"]);
        assert_eq!(args.config, Some(PathBuf::from("/tmp/termframe.toml")));
    }

    #[test]
    fn test_args_config_subcommand() {
        let args = Args::parse_from(["termframe", "config", "init"]);
        assert!(matches!(
            args.command,
            Some(Command::Config {
                action: ConfigAction::Init
            })
        ));
    }

    #[test]
    fn test_apply_without_flags_is_defaults() {
        let args = Args::parse_from(["termframe"]);
        let settings = args.apply(&FileConfig::default()).unwrap();
        assert_eq!(settings, Settings::default());
        assert_eq!((settings.width, settings.height), (80, 50));
    }

    #[test]
    fn test_apply_flags_override_file() {
        let args = Args::parse_from([
            "termframe",
            "--no-color",
            "--chars",
            "block",
            "--kpsmooth",
            "60",
            "--scaling",
            "2",
        ]);
        let settings = args
            .apply(&file(
                "[render]\ncolor = true\nchars = \"braille\"\n[input]\nkpsmooth_ms = 10",
            ))
            .unwrap();
        assert!(!settings.render.color_enabled);
        assert_eq!(settings.render.character_set, config::CharacterSet::Block);
        assert_eq!(settings.render.keypress_smoothing_ms, 60);
        assert_eq!((settings.width, settings.height), (160, 100));
    }

    #[test]
    fn test_apply_absent_flags_keep_file_values() {
        let args = Args::parse_from(["termframe"]);
        let settings = args
            .apply(&file("[render]\nbold = false\nerase = true\n[screen]\ntitle = \"DOOM\""))
            .unwrap();
        assert!(!settings.render.bold_enabled);
        assert!(settings.render.erase_enabled);
        assert_eq!(settings.title, "DOOM");
    }

    #[test]
    fn test_apply_enabling_flags() {
        let args = Args::parse_from(["termframe", "--erase", "--gamma-correct", "--no-gradient"]);
        let settings = args.apply(&FileConfig::default()).unwrap();
        assert!(settings.render.erase_enabled);
        assert!(settings.render.gamma_correct_enabled);
        assert!(!settings.render.gradient_enabled);
    }

    #[test]
    fn test_apply_invalid_scaling() {
        let args = Args::parse_from(["termframe", "--scaling", "0"]);
        assert!(matches!(
            args.apply(&FileConfig::default()),
            Err(ConfigError::InvalidScaling(0))
        ));
    }

    #[test]
    fn test_load_settings_reads_explicit_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[render]\ngamma_correct = true").unwrap();

        let args = Args::parse_from(["termframe", "--config", path.to_str().unwrap()]);
        let settings = args.load_settings().unwrap();
        assert!(settings.render.gamma_correct_enabled);
    }
}
