//! Core data types for Zenta.
//!
//! This module defines the data structures used for:
//! - Breathing phase identification
//! - Render mode selection
//! - Session configuration with validation

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::breathing::capability;
use crate::breathing::error::SessionError;

// ============================================================================
// PhaseKind
// ============================================================================

/// Names one segment of a breath cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PhaseKind {
    /// Breathing in, the visual grows
    Inhale,
    /// Holding full lungs, the visual stays large
    Hold,
    /// Breathing out, the visual shrinks
    Exhale,
    /// Resting with empty lungs, the visual stays small
    Rest,
}

impl PhaseKind {
    /// Returns the string representation of the phase.
    pub fn as_str(&self) -> &'static str {
        match self {
            PhaseKind::Inhale => "inhale",
            PhaseKind::Hold => "hold",
            PhaseKind::Exhale => "exhale",
            PhaseKind::Rest => "rest",
        }
    }
}

impl fmt::Display for PhaseKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// RenderMode
// ============================================================================

/// How the fixed-timeline animation is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RenderMode {
    /// One reserved line rewritten with a short pattern per tick
    Simple,
    /// A circle drawn with relative cursor movement
    Complex,
}

impl RenderMode {
    /// Returns the string representation of the mode.
    pub fn as_str(&self) -> &'static str {
        match self {
            RenderMode::Simple => "simple",
            RenderMode::Complex => "complex",
        }
    }
}

// ============================================================================
// SessionConfig
// ============================================================================

/// Default number of breath cycles.
pub const DEFAULT_CYCLES: u32 = 3;
/// Default inhale, hold and exhale duration in seconds.
pub const DEFAULT_PHASE_SECONDS: u32 = 4;
/// Default pause between cycles.
pub const DEFAULT_REST: Duration = Duration::from_secs(2);

/// Configuration for a breathing session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Number of full breath cycles (>= 1)
    pub cycles: u32,
    /// Inhale duration in seconds (>= 1)
    pub inhale_secs: u32,
    /// Hold duration in seconds (>= 1); also used for the rest phase
    pub hold_secs: u32,
    /// Exhale duration in seconds (>= 1)
    pub exhale_secs: u32,
    /// Pause between cycles
    pub rest: Duration,
    /// Animation style
    pub render_mode: RenderMode,
    /// Whether a quote is shown after the session
    pub show_quote: bool,
    /// Alternate filled and outline glyphs during hold and rest
    pub pulse: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            cycles: DEFAULT_CYCLES,
            inhale_secs: DEFAULT_PHASE_SECONDS,
            hold_secs: DEFAULT_PHASE_SECONDS,
            exhale_secs: DEFAULT_PHASE_SECONDS,
            rest: DEFAULT_REST,
            render_mode: capability::detect_render_mode(),
            show_quote: true,
            pulse: false,
        }
    }
}

impl SessionConfig {
    /// Sets the number of cycles.
    pub fn with_cycles(mut self, cycles: u32) -> Self {
        self.cycles = cycles;
        self
    }

    /// Sets inhale, hold and exhale durations in seconds.
    pub fn with_durations(mut self, inhale: u32, hold: u32, exhale: u32) -> Self {
        self.inhale_secs = inhale;
        self.hold_secs = hold;
        self.exhale_secs = exhale;
        self
    }

    /// Sets the pause between cycles.
    pub fn with_rest(mut self, rest: Duration) -> Self {
        self.rest = rest;
        self
    }

    /// Forces a render mode.
    pub fn with_render_mode(mut self, mode: RenderMode) -> Self {
        self.render_mode = mode;
        self
    }

    /// Sets whether the quote is shown afterwards.
    pub fn with_quote(mut self, show_quote: bool) -> Self {
        self.show_quote = show_quote;
        self
    }

    /// Enables or disables the pulse effect.
    pub fn with_pulse(mut self, pulse: bool) -> Self {
        self.pulse = pulse;
        self
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::ZeroCycles` or `SessionError::InvalidDuration`
    /// for the first offending field.
    pub fn validate(&self) -> Result<(), SessionError> {
        if self.cycles == 0 {
            return Err(SessionError::ZeroCycles);
        }
        if self.inhale_secs == 0 {
            return Err(SessionError::InvalidDuration(PhaseKind::Inhale));
        }
        if self.hold_secs == 0 {
            return Err(SessionError::InvalidDuration(PhaseKind::Hold));
        }
        if self.exhale_secs == 0 {
            return Err(SessionError::InvalidDuration(PhaseKind::Exhale));
        }
        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================
