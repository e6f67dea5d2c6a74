//! Command definitions for the Zenta CLI.
//!
//! Uses clap derive macro for argument parsing.

use clap::{Args, Parser, Subcommand};

use crate::types::{RenderMode, SessionConfig, DEFAULT_CYCLES};

/// Cycles played by `now --quick`.
pub const QUICK_CYCLES: u32 = 1;

/// Cycles played by `now --extended`.
pub const EXTENDED_CYCLES: u32 = 5;

// ============================================================================
// CLI Structure
// ============================================================================

/// Zenta - mindfulness for terminal users
#[derive(Parser, Debug)]
#[command(
    name = "zenta",
    version,
    about = "Mindfulness for terminal users",
    long_about = "A calm breathing and reflection tool for the terminal.\n\
                  Follow a guided breathing animation, pace your own breath, \
                  or close the day with a gentle reflection.",
    after_help = "Mindful aliases:\n  \
                  alias breath='zenta now --quick'\n  \
                  alias breathe='zenta now'\n  \
                  alias reflect='zenta reflect'",
    propagate_version = true
)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Enable verbose output for debugging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

// ============================================================================
// Subcommands
// ============================================================================

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Take a mindful breathing moment
    Now(NowArgs),

    /// Anchor your breath to the present moment, paced with [SPACE]
    Anchor(AnchorArgs),

    /// End-of-day reflection on thought patterns
    Reflect,

    /// Show version and build information
    Version,

    /// Generate shell completion scripts
    Completions {
        /// Shell type for completion script
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

// ============================================================================
// Now Command Arguments
// ============================================================================

/// Arguments for the now command
#[derive(Args, Debug, Clone, Default, PartialEq, Eq)]
pub struct NowArgs {
    /// Quick 1-cycle session
    #[arg(short, long, conflicts_with = "extended")]
    pub quick: bool,

    /// Extended 5-cycle session
    #[arg(short, long)]
    pub extended: bool,

    /// Breathing only, skip the quote
    #[arg(short, long)]
    pub silent: bool,

    /// Simple line animation (for terminal compatibility)
    #[arg(long, conflicts_with = "complex")]
    pub simple: bool,

    /// Force the circle animation (default except on Apple Terminal)
    #[arg(long)]
    pub complex: bool,

    /// Pulse the circle while holding and resting
    #[arg(long)]
    pub pulse: bool,
}

impl NowArgs {
    pub fn cycles(&self) -> u32 {
        if self.quick {
            QUICK_CYCLES
        } else if self.extended {
            EXTENDED_CYCLES
        } else {
            DEFAULT_CYCLES
        }
    }

    /// Render mode forced on the command line, if any.
    pub fn render_mode(&self) -> Option<RenderMode> {
        match (self.simple, self.complex) {
            (true, _) => Some(RenderMode::Simple),
            (false, true) => Some(RenderMode::Complex),
            (false, false) => None,
        }
    }

    /// Applies the flags over the default session configuration.
    pub fn to_config(&self) -> SessionConfig {
        let config = SessionConfig::default()
            .with_cycles(self.cycles())
            .with_quote(!self.silent)
            .with_pulse(self.pulse);
        match self.render_mode() {
            Some(mode) => config.with_render_mode(mode),
            None => config,
        }
    }
}

// ============================================================================
// Anchor Command Arguments
// ============================================================================

/// Arguments for the anchor command
#[derive(Args, Debug, Clone, Default, PartialEq, Eq)]
pub struct AnchorArgs {
    /// Skip the quote after the session
    #[arg(short, long)]
    pub silent: bool,
}

impl AnchorArgs {
    pub fn to_config(&self) -> SessionConfig {
        SessionConfig::default().with_quote(!self.silent)
    }
}

// ============================================================================
// Tests
// ============================================================================
