//! Display utilities for the Zenta CLI.
//!
//! This module provides formatted output for:
//! - Post-session closing lines and quotes
//! - Version information
//! - Error messages and recovery hints

use std::io::{self, Write};

use tracing::debug;

use super::version::BuildInfo;
use crate::breathing::{pad, write_bottom_padding, write_padded};
use crate::quotes::{display_quote, TYPING_DELAY};

/// Closing line after `now --silent`.
pub const CALM_CLOSING: &str = "   Carry this calm with you throughout your day 🙏";

// ============================================================================
// Display
// ============================================================================

/// Display utilities for CLI output.
pub struct Display;

impl Display {
    /// Types a quote inside a box on stdout.
    pub async fn show_quote(quote: &str) {
        let mut stdout = io::stdout();
        if let Err(e) = display_quote(&mut stdout, quote, TYPING_DELAY).await {
            debug!(error = %e, "quote output failed");
        }
    }

    /// Shows the closing line used instead of a quote.
    pub fn show_calm_closing() {
        Self::best_effort(|out| write_padded(out, CALM_CLOSING));
    }

    /// Adds the trailing blank lines after a session.
    pub fn show_bottom_padding() {
        Self::best_effort(write_bottom_padding);
    }

    /// Shows version and build information.
    pub fn show_version(info: &BuildInfo) {
        println!("{info}");
    }

    /// Shows an error message.
    pub fn show_error(message: &str) {
        eprintln!("{}", Self::format_error(message));
    }

    /// Shows a hint for recovering from an error.
    pub fn show_hint(hint: &str) {
        eprintln!("{}", pad(hint));
    }

    fn format_error(message: &str) -> String {
        format!("Error: {message}")
    }

    fn best_effort<F>(write: F)
    where
        F: FnOnce(&mut io::Stdout) -> io::Result<()>,
    {
        let mut stdout = io::stdout();
        if let Err(e) = write(&mut stdout).and_then(|()| stdout.flush()) {
            debug!(error = %e, "output failed");
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
