//! Breath cycle description.
//!
//! A [`PhaseTimeline`] is an ordered list of [`Phase`]s repeated a number
//! of cycles. Each phase maps its 1-based tick index to a visual size.
//!
//! Progress convention: tick `t` of a phase lasting `d` ticks has progress
//! `(t - 1) / (d - 1)`, so the first tick is the start of the ramp and the
//! last tick is its end. A single-tick phase has progress 1.

use std::num::NonZeroU32;
use std::time::Duration;

use super::error::{Result, SessionError};
use crate::types::{PhaseKind, SessionConfig};

/// Smallest circle size in the fixed-timeline mode.
pub const MIN_SIZE: u32 = 1;
/// Largest circle size in the fixed-timeline mode.
pub const MAX_SIZE: u32 = 4;

/// Glyph for growing and shrinking circles.
pub const OUTLINE_GLYPH: &str = "○";
/// Glyph for a full circle.
pub const FILLED_GLYPH: &str = "●";
/// Glyph for an empty breath and for inner rings.
pub const FAINT_GLYPH: &str = "·";
/// Pulse counterpart of [`FAINT_GLYPH`].
pub const FAINT_PULSE_GLYPH: &str = "∘";

// ============================================================================
// Shape
// ============================================================================

/// Size-over-time mapping of a phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    /// Ramps from `MIN_SIZE` to `MAX_SIZE`
    Expand,
    /// Fixed at `MAX_SIZE`
    Full,
    /// Ramps from `MAX_SIZE` down to `MIN_SIZE`
    Contract,
    /// Fixed at `MIN_SIZE`
    Empty,
}

impl Shape {
    /// Returns the shape used by a phase kind.
    pub fn for_kind(kind: PhaseKind) -> Self {
        match kind {
            PhaseKind::Inhale => Shape::Expand,
            PhaseKind::Hold => Shape::Full,
            PhaseKind::Exhale => Shape::Contract,
            PhaseKind::Rest => Shape::Empty,
        }
    }

    /// Visual size at 1-based `tick` of a phase lasting `duration` ticks.
    ///
    /// Always within `MIN_SIZE..=MAX_SIZE`.
    pub fn size_at(&self, tick: u32, duration: u32) -> u32 {
        let span = MAX_SIZE - MIN_SIZE;
        match self {
            Shape::Expand => MIN_SIZE + scaled(tick, duration, span),
            Shape::Full => MAX_SIZE,
            Shape::Contract => MAX_SIZE - scaled(tick, duration, span),
            Shape::Empty => MIN_SIZE,
        }
    }

    /// Outer glyph at `tick`, alternating on even ticks when `pulse` is set.
    pub fn glyph_at(&self, tick: u32, pulse: bool) -> &'static str {
        let alternate = pulse && tick % 2 == 0;
        match self {
            Shape::Expand | Shape::Contract => OUTLINE_GLYPH,
            Shape::Full if alternate => OUTLINE_GLYPH,
            Shape::Full => FILLED_GLYPH,
            Shape::Empty if alternate => FAINT_PULSE_GLYPH,
            Shape::Empty => FAINT_GLYPH,
        }
    }
}

/// Maps `tick` in `1..=duration` onto `0..=span` using `(t-1)/(d-1)`.
pub(crate) fn scaled(tick: u32, duration: u32, span: u32) -> u32 {
    if duration <= 1 {
        return span;
    }
    let t = u64::from(tick.clamp(1, duration));
    let d = u64::from(duration);
    // t - 1 <= d - 1, so the quotient never exceeds span
    ((t - 1) * u64::from(span) / (d - 1)) as u32
}

// ============================================================================
// Phase
// ============================================================================

/// One named segment of a breath cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Phase {
    kind: PhaseKind,
    duration: NonZeroU32,
    shape: Shape,
}

impl Phase {
    /// Creates a phase lasting `duration_ticks` ticks.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::InvalidDuration` if `duration_ticks` is zero.
    pub fn new(kind: PhaseKind, duration_ticks: u32) -> Result<Self> {
        let duration =
            NonZeroU32::new(duration_ticks).ok_or(SessionError::InvalidDuration(kind))?;
        Ok(Self {
            kind,
            duration,
            shape: Shape::for_kind(kind),
        })
    }

    pub fn kind(&self) -> PhaseKind {
        self.kind
    }

    pub fn duration_ticks(&self) -> u32 {
        self.duration.get()
    }

    pub fn shape(&self) -> Shape {
        self.shape
    }

    /// Visual size at 1-based `tick`.
    pub fn size_at(&self, tick: u32) -> u32 {
        self.shape.size_at(tick, self.duration.get())
    }

    /// Emoji shown next to the guidance text.
    pub fn emoji(&self) -> &'static str {
        match self.kind {
            PhaseKind::Inhale => "🌬️",
            PhaseKind::Hold => "✨",
            PhaseKind::Exhale => "🌸",
            PhaseKind::Rest => "🕯️",
        }
    }

    /// Guidance text for the circle animation.
    pub fn instruction(&self) -> &'static str {
        match self.kind {
            PhaseKind::Inhale => "Breathe in gently, let your body expand...",
            PhaseKind::Hold => "Hold softly, feel the fullness...",
            PhaseKind::Exhale => "Release slowly, let everything go...",
            PhaseKind::Rest => "Rest in the emptiness, be present...",
        }
    }

    /// Guidance text for the simple line animation.
    pub fn short_instruction(&self) -> &'static str {
        match self.kind {
            PhaseKind::Inhale => "Breathe in gently...",
            PhaseKind::Hold => "Hold softly...",
            PhaseKind::Exhale => "Release slowly...",
            PhaseKind::Rest => "Rest in emptiness...",
        }
    }

    /// Pattern table for the simple line animation.
    pub fn patterns(&self) -> &'static [&'static str] {
        match self.kind {
            PhaseKind::Inhale => &["·", "○", "○○", "●○○", "●●○○", "●●●○", "●●●●"],
            PhaseKind::Hold => &["●●●●", "●●●●", "●●●●", "●●●●"],
            PhaseKind::Exhale => &["●●●●", "●●●○", "●●○○", "●○○○", "○○○○", "○○  ", "○   "],
            PhaseKind::Rest => &["·", "·", "·", "·"],
        }
    }

    /// Index into [`Phase::patterns`] for 1-based `tick`.
    pub fn pattern_index(&self, tick: u32) -> usize {
        let last = self.patterns().len().saturating_sub(1);
        (scaled(tick, self.duration.get(), last as u32) as usize).min(last)
    }

    /// Simple-mode pattern for 1-based `tick`.
    pub fn pattern_at(&self, tick: u32) -> &'static str {
        self.patterns()[self.pattern_index(tick)]
    }
}

// ============================================================================
// PhaseTimeline
// ============================================================================

/// Ordered phases repeated for a number of cycles.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhaseTimeline {
    phases: Vec<Phase>,
    cycles: NonZeroU32,
    cycle_rest: Duration,
    pulse: bool,
}

impl PhaseTimeline {
    /// Creates a timeline from explicit phases.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::ZeroCycles` if `cycles` is zero.
    pub fn new(phases: Vec<Phase>, cycles: u32, cycle_rest: Duration) -> Result<Self> {
        let cycles = NonZeroU32::new(cycles).ok_or(SessionError::ZeroCycles)?;
        Ok(Self {
            phases,
            cycles,
            cycle_rest,
            pulse: false,
        })
    }

    /// Builds the inhale / hold / exhale / rest cycle from a session config.
    ///
    /// The rest phase reuses the hold duration.
    pub fn from_config(config: &SessionConfig) -> Result<Self> {
        let phases = vec![
            Phase::new(PhaseKind::Inhale, config.inhale_secs)?,
            Phase::new(PhaseKind::Hold, config.hold_secs)?,
            Phase::new(PhaseKind::Exhale, config.exhale_secs)?,
            Phase::new(PhaseKind::Rest, config.hold_secs)?,
        ];
        Ok(Self::new(phases, config.cycles, config.rest)?.with_pulse(config.pulse))
    }

    /// Enables the hold/rest glyph pulse.
    pub fn with_pulse(mut self, pulse: bool) -> Self {
        self.pulse = pulse;
        self
    }

    pub fn phases(&self) -> &[Phase] {
        &self.phases
    }

    pub fn cycles(&self) -> u32 {
        self.cycles.get()
    }

    pub fn cycle_rest(&self) -> Duration {
        self.cycle_rest
    }

    pub fn pulse(&self) -> bool {
        self.pulse
    }

    /// Number of ticks in one pass over all phases.
    pub fn ticks_per_cycle(&self) -> u32 {
        self.phases.iter().map(Phase::duration_ticks).sum()
    }

    /// Number of ticks over all cycles, excluding inter-cycle rests.
    pub fn total_ticks(&self) -> u32 {
        self.ticks_per_cycle() * self.cycles()
    }
}

// ============================================================================
// Tests
// ============================================================================
