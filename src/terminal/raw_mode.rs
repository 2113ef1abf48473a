//! Zero-timeout terminal input mode with panic-safe restoration.

use std::panic;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use crate::error::BackendError;

/// Set while the terminal is in input mode (for the panic handler)
pub(crate) static RAW_MODE_ACTIVE: AtomicBool = AtomicBool::new(false);

/// Copy of the settings saved on entry, for the panic handler.
static TERMIOS_BACKUP: Mutex<Option<libc::termios>> = Mutex::new(None);

/// True when standard input is attached to a terminal.
pub fn stdin_is_tty() -> bool {
    // SAFETY: isatty only inspects the descriptor.
    unsafe { libc::isatty(libc::STDIN_FILENO) != 0 }
}

/// Guard that keeps stdin non-canonical, unechoed and zero-timeout, and
/// puts the saved settings back on drop.
///
/// When stdin is not a terminal the guard is inert: nothing is changed and
/// nothing is restored.
pub struct RawModeGuard {
    original: Option<libc::termios>,
}

impl RawModeGuard {
    /// Switch stdin into zero-timeout input mode.
    ///
    /// Canonical line editing and echo are turned off; `VMIN = 0` and
    /// `VTIME = 0` make reads return immediately with whatever is pending.
    ///
    /// # Errors
    /// `tcgetattr` or `tcsetattr` failures, named by operation.
    pub fn enter() -> Result<Self, BackendError> {
        install_panic_hook();

        if !stdin_is_tty() {
            log::debug!("stdin is not a terminal, input mode left unchanged");
            return Ok(Self { original: None });
        }

        let fd = libc::STDIN_FILENO;
        // SAFETY: termios is plain data and is filled in by tcgetattr.
        let mut termios: libc::termios = unsafe { std::mem::zeroed() };
        if unsafe { libc::tcgetattr(fd, &mut termios) } != 0 {
            return Err(BackendError::last_os("tcgetattr"));
        }
        let original = termios;

        termios.c_lflag &= !(libc::ICANON | libc::ECHO);
        termios.c_cc[libc::VMIN] = 0;
        termios.c_cc[libc::VTIME] = 0;

        if unsafe { libc::tcsetattr(fd, libc::TCSANOW, &termios) } != 0 {
            return Err(BackendError::last_os("tcsetattr"));
        }

        if let Ok(mut backup) = TERMIOS_BACKUP.lock() {
            *backup = Some(original);
        }
        RAW_MODE_ACTIVE.store(true, Ordering::SeqCst);
        log::debug!("terminal input mode entered");

        Ok(Self {
            original: Some(original),
        })
    }

    /// Whether this guard changed the terminal and still owes a restore.
    pub fn is_active(&self) -> bool {
        self.original.is_some()
    }

    /// Restore the saved settings now. Dropping afterwards is a no-op.
    ///
    /// # Errors
    /// A failing `tcsetattr`.
    pub fn exit(&mut self) -> Result<(), BackendError> {
        if let Some(original) = self.original.take() {
            RAW_MODE_ACTIVE.store(false, Ordering::SeqCst);
            clear_backup();
            if unsafe { libc::tcsetattr(libc::STDIN_FILENO, libc::TCSANOW, &original) } != 0 {
                return Err(BackendError::last_os("tcsetattr"));
            }
            log::debug!("terminal input mode restored");
        }
        Ok(())
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        if let Err(e) = self.exit() {
            log::warn!("failed to restore terminal: {}", e);
        }
    }
}

fn clear_backup() {
    if let Ok(mut backup) = TERMIOS_BACKUP.lock() {
        *backup = None;
    }
}

/// Best-effort restore from the saved copy. Never blocks.
fn restore_from_backup() {
    if let Ok(backup) = TERMIOS_BACKUP.try_lock() {
        if let Some(original) = backup.as_ref() {
            unsafe {
                libc::tcsetattr(libc::STDIN_FILENO, libc::TCSANOW, original);
            }
        }
    }
}

/// Install a panic hook that restores the terminal before the panic
/// message is printed. Installed at most once per process.
pub(crate) fn install_panic_hook() {
    static HOOK_INSTALLED: AtomicBool = AtomicBool::new(false);

    if HOOK_INSTALLED.swap(true, Ordering::SeqCst) {
        return;
    }

    let original_hook = panic::take_hook();

    panic::set_hook(Box::new(move |panic_info| {
        if RAW_MODE_ACTIVE.swap(false, Ordering::SeqCst) {
            restore_from_backup();
        }
        original_hook(panic_info);
    }));
}
