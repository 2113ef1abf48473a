mod pattern;

use clap::Parser;
use std::fmt::Display;

use pattern::TestPattern;
use termframe::backend::Backend;
use termframe::cli::{handle_config_action, Args, Command};
use termframe::config::Settings;
use termframe::error::BackendError;
use termframe::input::keys::{key_name, KEY_ESCAPE};
use termframe::input::KeySource;
use termframe::terminal::{setup_ctrlc_handler, shutdown_requested};

/// Target frame period (35 frames per second).
const FRAME_MS: u64 = 28;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args = Args::parse();

    if let Some(Command::Config { action }) = &args.command {
        if let Err(e) = handle_config_action(action.clone(), &args) {
            fatal(e);
        }
        return;
    }

    let settings = match args.load_settings() {
        Ok(settings) => settings,
        Err(e) => fatal(e),
    };
    log::info!(
        "starting {}x{} (scaling {}) with {:?}",
        settings.width,
        settings.height,
        settings.scaling,
        settings.render
    );

    if let Err(e) = setup_ctrlc_handler() {
        log::warn!("signal handler not installed: {}", e);
    }

    if let Err(e) = run(&settings) {
        fatal(e);
    }
}

fn fatal(e: impl Display) -> ! {
    log::error!("{}", e);
    eprintln!("Error: {}", e);
    std::process::exit(1);
}

#[cfg(unix)]
fn run(settings: &Settings) -> Result<(), BackendError> {
    let _raw_mode = termframe::terminal::RawModeGuard::enter()?;
    let backend = Backend::init(settings.render, settings.width, settings.height);
    host_loop(backend, settings)
}

#[cfg(not(unix))]
fn run(settings: &Settings) -> Result<(), BackendError> {
    use termframe::clock::MonotonicClock;
    use termframe::input::NativeKeyQueue;
    use termframe::render::FrameEncoder;
    use termframe::terminal::OutputSink;

    let backend = Backend::with_parts(
        FrameEncoder::new(settings.render, settings.width, settings.height),
        NativeKeyQueue::new(),
        OutputSink::stdout(),
        MonotonicClock::new(),
    );
    host_loop(backend, settings)
}

/// Draw, poll, drain, pace; until `q`, Escape, or a termination signal.
fn host_loop<K: KeySource>(
    mut backend: Backend<K>,
    settings: &Settings,
) -> Result<(), BackendError> {
    let (width, height) = backend.encoder().dimensions();
    let mut pattern = TestPattern::new(width, height);
    backend.set_window_title(&settings.title)?;

    let mut quit = false;
    while !quit && !shutdown_requested() {
        let frame_start = backend.ticks_ms();
        backend.draw_frame(pattern.render(frame_start))?;

        backend.read_input()?;
        while let Some((pressed, key)) = backend.get_key() {
            log::info!(
                "{} {}",
                if pressed { "pressed" } else { "released" },
                key_name(key)
            );
            if !pressed {
                continue;
            }
            if key == b'q' || key == KEY_ESCAPE {
                quit = true;
            }
            backend.set_window_title(&format!("{} [{}]", settings.title, key_name(key)))?;
        }

        let elapsed = backend.ticks_ms().saturating_sub(frame_start);
        if elapsed < FRAME_MS {
            backend.sleep_ms((FRAME_MS - elapsed) as u32);
        }
    }

    backend.shutdown()
}
