//! Entry points for running a breathing session.
//!
//! [`BreathingSession`] validates a [`SessionConfig`] up front, then plays
//! either the fixed timeline (`start`) or the user-paced anchor mode
//! (`start_anchor`). Both return once the visualization completes or the
//! user quits; the caller decides what to show afterwards.

use std::io::{self, Write};

use crossbeam_channel::Receiver;
use tracing::{debug, info};

use super::driver::{AnimationDriver, PlaybackSummary};
use super::error::{Result, SessionError};
use super::pacer::{spawn_key_reader, InteractivePacer, PacerExit, DEFAULT_MAX_SIZE};
use super::terminal::{ensure_interactive, TerminalSession};
use super::timeline::PhaseTimeline;
use super::{write_bottom_padding, write_padded, write_section_spacing};
use crate::types::SessionConfig;

const BREATHE_INTRO: &str = "   Let's breathe 🌸";
const ANCHOR_MARK: &str = "   🌸";
const ANCHOR_INTRO: &str = "   Let the rhythm guide you. [SPACE] to switch phase, [q] to quit.";
const ANCHOR_CLOSING: &str = "   🙏 Carry this calm with you.";

/// Width blanked out when the anchor bar line is cleared.
const ANCHOR_LINE_WIDTH: usize = 80;

// ============================================================================
// BreathingSession
// ============================================================================

/// A validated breathing session ready to play.
#[derive(Debug, Clone)]
pub struct BreathingSession {
    config: SessionConfig,
    timeline: PhaseTimeline,
    max_size: u32,
}

impl BreathingSession {
    /// Validates `config` and builds the phase timeline.
    ///
    /// # Errors
    ///
    /// Returns a configuration error for zero cycles or a zero phase
    /// duration. Nothing is written to the terminal in that case.
    pub fn new(config: SessionConfig) -> Result<Self> {
        config.validate()?;
        let timeline = PhaseTimeline::from_config(&config)?;
        Ok(Self {
            config,
            timeline,
            max_size: DEFAULT_MAX_SIZE,
        })
    }

    /// Sets the anchor bar width.
    pub fn with_max_size(mut self, max_size: u32) -> Self {
        self.max_size = max_size;
        self
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn timeline(&self) -> &PhaseTimeline {
        &self.timeline
    }

    /// Whether the caller should show a quote after the session.
    pub fn should_show_quote(&self) -> bool {
        self.config.show_quote
    }

    /// Plays the fixed timeline on stdout with the cursor hidden.
    pub async fn start(&self) -> PlaybackSummary {
        let _terminal = TerminalSession::hidden_cursor();
        self.start_with(io::stdout()).await
    }

    /// Plays the fixed timeline on `out`.
    pub async fn start_with<W: Write>(&self, mut out: W) -> PlaybackSummary {
        info!(
            cycles = self.config.cycles,
            mode = self.config.render_mode.as_str(),
            "starting breathing session"
        );
        best_effort(&mut out, |out| {
            writeln!(out)?;
            write_padded(out, BREATHE_INTRO)?;
            write_section_spacing(out)
        });

        let mut driver = AnimationDriver::new(self.timeline.clone(), self.config.render_mode, out);
        let summary = driver.run().await;

        let mut out = driver.into_surface().into_inner();
        best_effort(&mut out, write_section_spacing);
        summary
    }

    /// Runs the user-paced anchor mode on the controlling terminal.
    ///
    /// # Errors
    ///
    /// Fails fast with a device-capability error when stdin is not a
    /// terminal or cannot enter raw mode, and with `KeyReader` when the
    /// reader thread cannot start. The terminal is restored in every case.
    pub async fn start_anchor(&self) -> Result<PacerExit> {
        ensure_interactive()?;

        let mut out = io::stdout();
        best_effort(&mut out, write_anchor_intro);

        let terminal = TerminalSession::interactive()?;
        let keys = spawn_key_reader(io::stdin()).map_err(SessionError::KeyReader)?;
        let exit = self.run_pacer(keys, io::stdout()).await;
        drop(terminal);

        best_effort(&mut out, write_anchor_closing);
        info!(?exit, "anchor session finished");
        Ok(exit)
    }

    /// Runs the anchor pacer over an existing key channel.
    pub async fn run_pacer<W: Write>(&self, keys: Receiver<u8>, out: W) -> PacerExit {
        let mut pacer = InteractivePacer::new(keys, out, self.max_size);
        let exit = pacer.run().await;
        debug!(frames = pacer.frames(), "pacer stopped");
        exit
    }
}

/// Blank line, the anchor mark, the key hint, blank line.
pub fn write_anchor_intro<W: Write>(out: &mut W) -> io::Result<()> {
    writeln!(out)?;
    write_padded(out, ANCHOR_MARK)?;
    write_padded(out, ANCHOR_INTRO)?;
    writeln!(out)
}

/// Blanks the bar line, then prints the anchor closing line.
pub fn write_anchor_closing<W: Write>(out: &mut W) -> io::Result<()> {
    let blank = " ".repeat(ANCHOR_LINE_WIDTH);
    write!(out, "\r{blank}\r")?;
    write_padded(out, ANCHOR_CLOSING)?;
    write_bottom_padding(out)
}

fn best_effort<W, F>(out: &mut W, write: F)
where
    W: Write,
    F: FnOnce(&mut W) -> io::Result<()>,
{
    if let Err(e) = write(out).and_then(|()| out.flush()) {
        debug!(error = %e, "session output failed, skipping");
    }
}

// ============================================================================
// Tests
// ============================================================================
