//! Subcommand handlers for config actions.

use std::io::{self, Write};
use std::path::Path;

use super::args::{Args, ConfigAction};
use crate::config::{default_path, init_config_file, Settings};
use crate::error::BackendError;

/// Handle a `config` subcommand.
pub fn handle_config_action(action: ConfigAction, args: &Args) -> Result<(), BackendError> {
    let config_path = args.config.clone().unwrap_or_else(default_path);
    let stdout = io::stdout();
    let mut out = stdout.lock();
    match action {
        ConfigAction::Show => {
            let settings = args.load_settings()?;
            report(show_settings(&mut out, &settings, &config_path))
        }
        ConfigAction::Init => {
            init_config_file(&config_path)?;
            report(writeln!(out, "Created config file: {}", config_path.display()))
        }
    }
}

/// Map a stdout write failure to `BackendError`. A reader that went away
/// (`termframe config show | head -1`) is not an error.
fn report(result: io::Result<()>) -> Result<(), BackendError> {
    match result {
        Err(e) if e.kind() != io::ErrorKind::BrokenPipe => Err(BackendError::os("write", e)),
        _ => Ok(()),
    }
}

/// Print the resolved settings and where the config file lives.
pub fn show_settings<W: Write>(
    out: &mut W,
    settings: &Settings,
    config_path: &Path,
) -> io::Result<()> {
    let yes_no = |b: bool| if b { "yes" } else { "no" };
    let render = &settings.render;

    writeln!(out, "Current configuration:")?;
    writeln!(out, "  Color: {}", yes_no(render.color_enabled))?;
    writeln!(out, "  Gradient: {}", yes_no(render.gradient_enabled))?;
    writeln!(out, "  Bold: {}", yes_no(render.bold_enabled))?;
    writeln!(out, "  Erase: {}", yes_no(render.erase_enabled))?;
    writeln!(out, "  Gamma correct: {}", yes_no(render.gamma_correct_enabled))?;
    writeln!(out, "  Chars: {}", render.character_set)?;
    writeln!(out, "  Key smoothing: {} ms", render.keypress_smoothing_ms)?;
    writeln!(
        out,
        "  Resolution: {}x{} (scaling {})",
        settings.width, settings.height, settings.scaling
    )?;
    writeln!(out, "  Title: {}", settings.title)?;
    writeln!(out)?;

    if config_path.exists() {
        writeln!(out, "Config file: {} (exists)", config_path.display())
    } else {
        writeln!(out, "Config file: {} (not found)", config_path.display())
    }
}
