//! End-to-end tests for the backend: settings in, bytes and events out.

use clap::Parser;
use std::io::Cursor;
use termframe::backend::Backend;
use termframe::cli::Args;
use termframe::clock::ManualClock;
use termframe::config::FileConfig;
use termframe::error::BackendError;
use termframe::input::keys::{KEY_ESCAPE, KEY_F1};
use termframe::input::TerminalKeys;
use termframe::render::{buffer_size, FrameEncoder, Pixel};
use termframe::terminal::OutputSink;

type TestBackend<'a> = Backend<TerminalKeys<Cursor<Vec<u8>>>, Vec<u8>, &'a ManualClock>;

fn backend_from_args<'a>(argv: &[&str], input: &[u8], clock: &'a ManualClock) -> TestBackend<'a> {
    let args = Args::parse_from(argv);
    let settings = args.apply(&FileConfig::default()).unwrap();
    Backend::with_parts(
        FrameEncoder::seeded(settings.render, settings.width, settings.height, 1),
        TerminalKeys::new(Cursor::new(input.to_vec())),
        OutputSink::new(Vec::new()),
        clock,
    )
}

// ==================== Rendering Tests ====================

#[test]
fn test_default_settings_render_80x50() {
    let clock = ManualClock::new(0);
    let mut backend = backend_from_args(&["termframe"], b"", &clock);
    let mut fb = vec![u32::from(Pixel::rgb(128, 64, 32)); 80 * 50];

    assert_eq!(backend.encoder().dimensions(), (80, 50));
    let config = *backend.encoder().config();
    assert_eq!(backend.encoder().capacity(), buffer_size(&config, 80, 50));

    let written = backend.draw_frame(&mut fb).unwrap();
    assert!(written <= backend.encoder().capacity() + b"\x1b[1;1H\x1b[2J".len());

    let out = backend.sink().get_ref();
    assert!(out.starts_with(b"\x1b[1;1H\x1b[2J\x1b[;H\x1b[1m\x1b[38;2;128;064;032m"));
    assert!(out.ends_with(b"\n\x1b[0m"));
    assert_eq!(out.iter().filter(|&&b| b == b'\n').count(), 50);
}

#[test]
fn test_scaled_plain_render() {
    let clock = ManualClock::new(0);
    let mut backend = backend_from_args(
        &["termframe", "--scaling", "40", "--no-color", "--no-bold", "--no-gradient"],
        b"",
        &clock,
    );
    // 320/40 x 200/40 = 8x5
    let mut fb = vec![0u32; 40];
    backend.draw_frame(&mut fb).unwrap();
    backend.draw_frame(&mut fb).unwrap();

    let row = b"################\n";
    let mut expected = b"\x1b[1;1H\x1b[2J".to_vec();
    for _ in 0..2 {
        expected.extend_from_slice(b"\x1b[;H");
        for _ in 0..5 {
            expected.extend_from_slice(row);
        }
    }
    assert_eq!(backend.sink().get_ref().as_slice(), expected.as_slice());
    assert_eq!(backend.sink().frames_written(), 2);
}

#[test]
fn test_wrong_framebuffer_is_error() {
    let clock = ManualClock::new(0);
    let mut backend = backend_from_args(&["termframe", "--scaling", "40"], b"", &clock);
    let mut fb = vec![0u32; 39];
    let err = backend.draw_frame(&mut fb).unwrap_err();
    assert!(matches!(
        err,
        BackendError::FramebufferSize {
            expected: 40,
            actual: 39
        }
    ));
}

// ==================== Input Tests ====================

#[test]
fn test_keys_press_then_release_with_custom_smoothing() {
    let clock = ManualClock::new(0);
    let mut backend = backend_from_args(
        &["termframe", "--scaling", "40", "--kpsmooth", "100"],
        b"\x1bOP\x1b",
        &clock,
    );

    backend.read_input().unwrap();
    assert_eq!(backend.get_key(), Some((true, KEY_ESCAPE)));
    assert_eq!(backend.get_key(), Some((true, KEY_F1)));
    assert_eq!(backend.get_key(), None);

    clock.set(100);
    backend.read_input().unwrap();
    assert_eq!(backend.get_key(), None);

    clock.set(101);
    backend.read_input().unwrap();
    assert_eq!(backend.get_key(), Some((false, KEY_ESCAPE)));
    assert_eq!(backend.get_key(), Some((false, KEY_F1)));
    assert_eq!(backend.get_key(), None);
}

#[test]
fn test_ticks_and_title() {
    let clock = ManualClock::new(0);
    let mut backend = backend_from_args(&["termframe", "--scaling", "40"], b"", &clock);
    assert_eq!(backend.ticks_ms(), 0);
    clock.advance(250);
    assert_eq!(backend.ticks_ms(), 250);

    backend.set_window_title("termframe\n").unwrap();
    assert_eq!(backend.sink().get_ref().as_slice(), b"\x1b]2;termframe\x1b\\");
}
