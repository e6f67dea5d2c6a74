//! Terminal state ownership for a breathing session.
//!
//! A [`TerminalSession`] hides the cursor and, for anchor mode, switches
//! stdin into raw mode. It records those changes in a process-wide
//! [`TerminalRestore`]. Restoration is idempotent and runs on drop, on
//! panic unwinding through the owner, and from the signal watcher.
//!
//! The signal watcher is installed once per process with
//! [`install_signal_watcher`] and stays for the rest of the command. It
//! restores whatever is still recorded, then exits with `128 + signal`.

use std::io::{self, Write};
use std::sync::atomic::{AtomicBool, Ordering};

use crossterm::cursor::{Hide, Show};
use crossterm::execute;
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use crossterm::tty::IsTty;
use tokio::runtime::Handle;
use tracing::{debug, warn};

use super::error::{Result, SessionError};

static TERMINAL: TerminalRestore = TerminalRestore::new();
static WATCHER_INSTALLED: AtomicBool = AtomicBool::new(false);

// ============================================================================
// TerminalRestore
// ============================================================================

/// Terminal changes that still need undoing.
#[derive(Debug, Default)]
pub struct TerminalRestore {
    cursor_hidden: AtomicBool,
    raw_mode: AtomicBool,
}

impl TerminalRestore {
    pub const fn new() -> Self {
        Self {
            cursor_hidden: AtomicBool::new(false),
            raw_mode: AtomicBool::new(false),
        }
    }

    /// Undoes every recorded change once; later calls do nothing.
    pub fn restore(&self) {
        if self.raw_mode.swap(false, Ordering::SeqCst) {
            if let Err(e) = disable_raw_mode() {
                warn!(error = %e, "failed to leave raw mode");
            }
        }
        if self.cursor_hidden.swap(false, Ordering::SeqCst) {
            let mut stdout = io::stdout();
            if let Err(e) = execute!(stdout, Show) {
                warn!(error = %e, "failed to show cursor");
            }
        }
    }

    pub fn is_cursor_hidden(&self) -> bool {
        self.cursor_hidden.load(Ordering::SeqCst)
    }

    pub fn is_raw_mode(&self) -> bool {
        self.raw_mode.load(Ordering::SeqCst)
    }

    fn mark_cursor_hidden(&self) {
        self.cursor_hidden.store(true, Ordering::SeqCst);
    }

    fn mark_raw_mode(&self) {
        self.raw_mode.store(true, Ordering::SeqCst);
    }
}

// ============================================================================
// TerminalSession
// ============================================================================

/// Scoped ownership of the terminal's cursor and input mode.
#[derive(Debug)]
pub struct TerminalSession {
    restore: &'static TerminalRestore,
}

impl TerminalSession {
    /// Hides the cursor for the fixed-timeline mode.
    pub fn hidden_cursor() -> Self {
        let session = Self::unarmed();
        session.hide_cursor();
        session
    }

    /// Enters raw, no-echo input mode and hides the cursor.
    ///
    /// Checks stdin again even when the caller already ran
    /// [`ensure_interactive`] to fail before printing anything.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::NotATerminal` when stdin is redirected and
    /// `SessionError::RawMode` when the switch fails. The terminal is left
    /// untouched in both cases.
    pub fn interactive() -> Result<Self> {
        ensure_interactive()?;
        enable_raw_mode().map_err(SessionError::RawMode)?;

        let session = Self::unarmed();
        session.restore.mark_raw_mode();
        session.hide_cursor();
        debug!("terminal switched to raw mode");
        Ok(session)
    }

    /// The process-wide restore state shared with the signal watcher.
    pub fn restore_handle() -> &'static TerminalRestore {
        &TERMINAL
    }

    /// Restores the terminal now instead of on drop.
    pub fn restore(&self) {
        self.restore.restore();
    }

    fn unarmed() -> Self {
        install_signal_watcher();
        Self { restore: &TERMINAL }
    }

    fn hide_cursor(&self) {
        let mut stdout = io::stdout();
        match execute!(stdout, Hide) {
            Ok(()) => self.restore.mark_cursor_hidden(),
            Err(e) => debug!(error = %e, "failed to hide cursor"),
        }
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        self.restore.restore();
    }
}

/// Fails with `SessionError::NotATerminal` unless stdin is a terminal.
pub fn ensure_interactive() -> Result<()> {
    if io::stdin().is_tty() {
        Ok(())
    } else {
        Err(SessionError::NotATerminal)
    }
}

// ============================================================================
// Signal watcher
// ============================================================================

/// Spawns the signal watcher on the current runtime unless one is
/// already running.
///
/// Returns `false` outside a tokio runtime, where nothing is installed.
/// The watcher lives as long as that runtime, so the binary installs it
/// from `main` to cover the whole command.
pub fn install_signal_watcher() -> bool {
    let Ok(handle) = Handle::try_current() else {
        debug!("no async runtime, signal restoration disabled");
        return false;
    };
    if !WATCHER_INSTALLED.swap(true, Ordering::SeqCst) {
        handle.spawn(watch_signals(&TERMINAL));
        debug!("signal watcher installed");
    }
    true
}

/// Waits for a termination signal, restores the terminal, then exits.
async fn watch_signals(restore: &'static TerminalRestore) {
    let code = match wait_for_signal().await {
        Ok(code) => code,
        Err(e) => {
            warn!(error = %e, "failed to install signal handlers");
            return;
        }
    };

    debug!(code, "termination signal received");
    restore.restore();
    let mut stdout = io::stdout();
    let _ = writeln!(stdout);
    let _ = stdout.flush();
    std::process::exit(code);
}

/// Resolves with the exit code for the first termination signal.
#[cfg(unix)]
async fn wait_for_signal() -> io::Result<i32> {
    use tokio::signal::unix::{signal, SignalKind};

    const SIGHUP: i32 = 1;
    const SIGINT: i32 = 2;
    const SIGTERM: i32 = 15;

    let mut hangup = signal(SignalKind::hangup())?;
    let mut interrupt = signal(SignalKind::interrupt())?;
    let mut terminate = signal(SignalKind::terminate())?;

    let signo = tokio::select! {
        _ = hangup.recv() => SIGHUP,
        _ = interrupt.recv() => SIGINT,
        _ = terminate.recv() => SIGTERM,
    };
    Ok(128 + signo)
}

/// Resolves with the exit code for the first termination signal.
#[cfg(not(unix))]
async fn wait_for_signal() -> io::Result<i32> {
    tokio::signal::ctrl_c().await?;
    Ok(1)
}

// ============================================================================
// Tests
// ============================================================================
