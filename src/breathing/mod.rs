//! Breathing visualization engine.
//!
//! This module turns a sequence of breathing phases into a live terminal
//! animation:
//! - `timeline`: phase definitions and per-tick size computation
//! - `surface`: cursor-anchored drawing primitives
//! - `driver`: fixed-timeline playback
//! - `pacer`: user-paced anchor mode with a key reader thread
//! - `terminal`: cursor and raw-mode ownership, signal restoration
//! - `session`: entry points used by the CLI

pub mod capability;
pub mod driver;
pub mod error;
pub mod pacer;
pub mod session;
pub mod surface;
pub mod terminal;
pub mod timeline;

use std::io::{self, Write};

pub use driver::{AnimationDriver, DriverState, PlaybackSummary};
pub use error::SessionError;
pub use pacer::{InteractivePacer, KeyAction, PacerExit, PacerPhase, PacerState};
pub use session::BreathingSession;
pub use surface::RenderSurface;
pub use terminal::{install_signal_watcher, TerminalSession};
pub use timeline::{Phase, PhaseTimeline, Shape};

/// Left margin applied to every printed line.
pub const LEFT_PADDING: usize = 4;

/// Blank lines between sections.
pub const SECTION_SPACING: usize = 1;

/// Blank lines after the last section.
pub const BOTTOM_PADDING: usize = 2;

/// Prefixes `text` with the left margin.
pub fn pad(text: &str) -> String {
    format!("{}{text}", " ".repeat(LEFT_PADDING))
}

/// Writes `text` with the left margin and a newline.
pub fn write_padded<W: Write>(out: &mut W, text: &str) -> io::Result<()> {
    writeln!(out, "{}", pad(text))
}

pub fn write_section_spacing<W: Write>(out: &mut W) -> io::Result<()> {
    write_blank_lines(out, SECTION_SPACING)
}

pub fn write_bottom_padding<W: Write>(out: &mut W) -> io::Result<()> {
    write_blank_lines(out, BOTTOM_PADDING)
}

fn write_blank_lines<W: Write>(out: &mut W, count: usize) -> io::Result<()> {
    for _ in 0..count {
        writeln!(out)?;
    }
    Ok(())
}
