// SPDX-License-Identifier: MIT
//
// Terminal control — raw, non-blocking input and RAII cleanup.
//
// Safety: This module necessarily uses `unsafe` for termios (tcgetattr,
// tcsetattr), fcntl, ioctl (TIOCGWINSZ), and raw fd writes. These are the
// standard POSIX interfaces for terminal control. Each unsafe block is
// minimal.
#![allow(unsafe_code)]
//
// Entering game mode does four things:
//
//   1. canonical mode and echo off, VMIN = VTIME = 0, so read() returns
//      whatever bytes are available right now, one keypress at a time
//   2. O_NONBLOCK on stdin, so an empty read reports EAGAIN instead of
//      parking the loop
//   3. hide the cursor
//   4. clear the screen once
//
// All of it is undone when the guard is dropped, on error returns, and from
// a panic hook that restores the saved state without the guard. Signals are
// left enabled (no ISIG change) so Ctrl-C reaches the loop's signal flag and
// unwinds through the guard like any other exit.

use std::io::{self, Write};
use std::sync::{Mutex, Once};

use crate::ansi;
use crate::error::{Result, TermError};

// ─── Size ───────────────────────────────────────────────────────────────────

/// Terminal dimensions in character cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Size {
    /// Number of columns.
    pub cols: u16,
    /// Number of rows.
    pub rows: u16,
}

impl Size {
    /// Whether a `width × height` canvas fits without clipping.
    #[inline]
    #[must_use]
    pub const fn fits(self, width: u16, height: u16) -> bool {
        self.cols >= width && self.rows >= height
    }
}

/// Query the current terminal size via `ioctl(TIOCGWINSZ)`.
///
/// Returns `None` if stdout is not a terminal or the query fails.
#[cfg(unix)]
#[must_use]
pub fn get_size() -> Option<Size> {
    let mut ws: libc::winsize = unsafe { std::mem::zeroed() };
    let result = unsafe { libc::ioctl(libc::STDOUT_FILENO, libc::TIOCGWINSZ, &mut ws) };

    if result == 0 && ws.ws_col > 0 && ws.ws_row > 0 {
        Some(Size {
            cols: ws.ws_col,
            rows: ws.ws_row,
        })
    } else {
        None
    }
}

#[cfg(not(unix))]
#[must_use]
pub fn get_size() -> Option<Size> {
    None
}

// ─── Saved state ────────────────────────────────────────────────────────────

/// Everything we change on stdin, captured before changing it.
#[cfg(unix)]
#[derive(Clone, Copy)]
struct SavedState {
    termios: libc::termios,
    flags: libc::c_int,
}

/// Copy of the saved state for the panic hook, which cannot reach the guard.
#[cfg(unix)]
static STATE_BACKUP: Mutex<Option<SavedState>> = Mutex::new(None);

/// Put stdin back the way we found it. Best-effort from the panic hook.
#[cfg(unix)]
fn restore_from_backup() {
    if let Ok(guard) = STATE_BACKUP.lock() {
        if let Some(saved) = *guard {
            unsafe {
                let _ = libc::tcsetattr(libc::STDIN_FILENO, libc::TCSANOW, &raw const saved.termios);
                let _ = libc::fcntl(libc::STDIN_FILENO, libc::F_SETFL, saved.flags);
            }
        }
    }
}

/// Show the cursor and clear what the game drew.
const EMERGENCY_RESTORE: &[u8] = b"\x1b[H\x1b[J\x1b[?25h";

static PANIC_HOOK_INSTALLED: Once = Once::new();

/// Restore the terminal before the default hook prints the panic message.
fn install_panic_hook() {
    PANIC_HOOK_INSTALLED.call_once(|| {
        let original = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |info| {
            emergency_restore();

            #[cfg(unix)]
            restore_from_backup();

            original(info);
        }));
    });
}

/// Write [`EMERGENCY_RESTORE`] straight to fd 1, bypassing the stdout lock
/// (the panic may have happened while a frame flush held it).
fn emergency_restore() {
    #[cfg(unix)]
    unsafe {
        let _ = libc::write(
            libc::STDOUT_FILENO,
            EMERGENCY_RESTORE.as_ptr().cast::<libc::c_void>(),
            EMERGENCY_RESTORE.len(),
        );
    }

    #[cfg(not(unix))]
    {
        let _ = io::stdout().write_all(EMERGENCY_RESTORE);
        let _ = io::stdout().flush();
    }
}

// ─── Terminal ───────────────────────────────────────────────────────────────

/// Scoped ownership of the controlling terminal.
///
/// # Example
///
/// ```no_run
/// use dodjo_term::terminal::Terminal;
///
/// let mut term = Terminal::new();
/// term.enter()?;
/// // ... poll input, render frames ...
/// // Terminal is restored on drop.
/// # Ok::<(), dodjo_term::error::TermError>(())
/// ```
pub struct Terminal {
    #[cfg(unix)]
    saved: Option<SavedState>,
    active: bool,
}

impl Terminal {
    /// Create an inactive handle. Nothing is changed until [`enter`](Self::enter).
    #[must_use]
    pub const fn new() -> Self {
        Self {
            #[cfg(unix)]
            saved: None,
            active: false,
        }
    }

    /// Whether game mode is currently active.
    #[inline]
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.active
    }

    /// Enter game mode: raw non-blocking stdin, hidden cursor, cleared screen.
    ///
    /// Idempotent.
    ///
    /// # Errors
    ///
    /// Fails if terminal attributes cannot be queried or set (for instance
    /// when stdin is not a terminal), if stdin cannot be made non-blocking,
    /// or if the control sequences cannot be written. On failure, anything
    /// already changed is rolled back.
    pub fn enter(&mut self) -> Result<()> {
        if self.active {
            return Ok(());
        }

        install_panic_hook();
        self.enable_raw_mode()?;

        let stdout = io::stdout();
        let mut lock = stdout.lock();
        let written = ansi::cursor_hide(&mut lock)
            .and_then(|()| ansi::clear_screen(&mut lock))
            .and_then(|()| lock.flush());
        drop(lock);

        if let Err(e) = written {
            let _ = self.disable_raw_mode();
            return Err(e.into());
        }

        self.active = true;
        tracing::debug!("terminal entered game mode");
        Ok(())
    }

    /// Leave game mode and restore everything `enter` changed.
    ///
    /// Idempotent.
    ///
    /// # Errors
    ///
    /// Returns an error if output or the attribute restore fails.
    pub fn leave(&mut self) -> Result<()> {
        if !self.active {
            return Ok(());
        }
        self.active = false;

        let stdout = io::stdout();
        let mut lock = stdout.lock();
        let written = ansi::clear_screen(&mut lock)
            .and_then(|()| ansi::cursor_show(&mut lock))
            .and_then(|()| lock.flush());
        drop(lock);

        // Restore input mode even if the output failed.
        self.disable_raw_mode()?;
        written?;

        tracing::debug!("terminal restored");
        Ok(())
    }

    // ── Raw, non-blocking stdin ─────────────────────────────────────

    #[cfg(unix)]
    fn enable_raw_mode(&mut self) -> Result<()> {
        let fd = libc::STDIN_FILENO;

        let mut termios: libc::termios = unsafe { std::mem::zeroed() };
        if unsafe { libc::tcgetattr(fd, &raw mut termios) } != 0 {
            return Err(TermError::attributes("query"));
        }

        let flags = unsafe { libc::fcntl(fd, libc::F_GETFL) };
        if flags == -1 {
            return Err(TermError::non_blocking("query"));
        }

        let saved = SavedState { termios, flags };

        termios.c_lflag &= !(libc::ICANON | libc::ECHO);
        termios.c_cc[libc::VMIN] = 0;
        termios.c_cc[libc::VTIME] = 0;

        if unsafe { libc::tcsetattr(fd, libc::TCSANOW, &raw const termios) } != 0 {
            return Err(TermError::attributes("set"));
        }

        if unsafe { libc::fcntl(fd, libc::F_SETFL, flags | libc::O_NONBLOCK) } == -1 {
            let err = TermError::non_blocking("enable");
            unsafe {
                let _ = libc::tcsetattr(fd, libc::TCSANOW, &raw const saved.termios);
            }
            return Err(err);
        }

        self.saved = Some(saved);
        if let Ok(mut guard) = STATE_BACKUP.lock() {
            *guard = Some(saved);
        }
        Ok(())
    }

    #[cfg(not(unix))]
    fn enable_raw_mode(&mut self) -> Result<()> {
        Ok(())
    }

    #[cfg(unix)]
    fn disable_raw_mode(&mut self) -> Result<()> {
        let Some(saved) = self.saved.take() else {
            return Ok(());
        };
        let fd = libc::STDIN_FILENO;

        if let Ok(mut guard) = STATE_BACKUP.lock() {
            *guard = None;
        }

        let flags_ok = unsafe { libc::fcntl(fd, libc::F_SETFL, saved.flags) } != -1;
        let flags_err = (!flags_ok).then(|| TermError::non_blocking("disable"));

        if unsafe { libc::tcsetattr(fd, libc::TCSANOW, &raw const saved.termios) } != 0 {
            return Err(TermError::attributes("restore"));
        }

        flags_err.map_or(Ok(()), Err)
    }

    #[cfg(not(unix))]
    fn disable_raw_mode(&mut self) -> Result<()> {
        Ok(())
    }
}

impl Default for Terminal {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for Terminal {
    fn drop(&mut self) {
        if self.active {
            if let Err(e) = self.leave() {
                tracing::warn!(error = %e, "terminal restore on drop failed");
            }
        }
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
