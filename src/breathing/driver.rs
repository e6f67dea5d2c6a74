//! Fixed-timeline animation driver.
//!
//! Walks a [`PhaseTimeline`] tick by tick and draws each frame through a
//! [`RenderSurface`], either as a breathing circle (complex mode) or as a
//! single rewritten pattern line (simple mode).
//!
//! Frame writes are best effort: a failed write is logged and skipped.

use std::io::{self, Write};
use std::ops::RangeInclusive;
use std::time::Duration;

use tokio::time::{interval, sleep, Interval, MissedTickBehavior};
use tracing::{debug, info, warn};

use super::pad;
use super::surface::RenderSurface;
use super::timeline::{Phase, PhaseTimeline};
use super::LEFT_PADDING;
use crate::types::RenderMode;

/// One tick in the reference configuration.
pub const FIXED_TICK: Duration = Duration::from_secs(1);

/// Lines reserved below the guidance line for the circle.
pub const RESERVED_LINES: u16 = 12;
/// Circle centre, in lines below the guidance line.
pub const CIRCLE_ROW: i32 = 5;
/// Circle centre column.
pub const CIRCLE_COL: i32 = LEFT_PADDING as i32 + 25;
/// Width blanked when erasing a frame.
pub const CLEAR_WIDTH: u16 = 80;

const CLEAR_ROWS: RangeInclusive<i32> = (CIRCLE_ROW - 4)..=(CIRCLE_ROW + 4);
const TRANSITION_EMOJI: &str = "💫";
const TRANSITION_TEXT: &str = "Feel the rhythm... continuing...";
const COMPLETE_TEXT: &str = "   🙏 Complete";
const PATTERN_INDENT: &str = "      ";
const PATTERN_TRAILING: usize = 4;

// ============================================================================
// DriverState
// ============================================================================

/// Playback progress of an [`AnimationDriver`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriverState {
    /// Not started yet
    Idle,
    /// Currently showing `tick` of phase `phase_index` in `cycle` (1-based
    /// cycle and tick)
    Running {
        cycle: u32,
        phase_index: usize,
        tick: u32,
    },
    /// Playback finished
    Done,
}

/// What a playback rendered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PlaybackSummary {
    /// Number of animation frames drawn
    pub frames: u32,
    /// Number of cycles played
    pub cycles: u32,
    /// Number of between-cycle pauses shown
    pub pauses: u32,
}

// ============================================================================
// AnimationDriver
// ============================================================================

/// Plays a timeline on a terminal surface.
pub struct AnimationDriver<W: Write> {
    timeline: PhaseTimeline,
    mode: RenderMode,
    surface: RenderSurface<W>,
    tick_interval: Duration,
    state: DriverState,
}

impl<W: Write> AnimationDriver<W> {
    /// Creates a driver ticking once per second.
    pub fn new(timeline: PhaseTimeline, mode: RenderMode, out: W) -> Self {
        Self {
            timeline,
            mode,
            surface: RenderSurface::new(out),
            tick_interval: FIXED_TICK,
            state: DriverState::Idle,
        }
    }

    /// Overrides the tick interval. Zero is raised to one millisecond.
    pub fn with_tick_interval(mut self, tick_interval: Duration) -> Self {
        self.tick_interval = tick_interval.max(Duration::from_millis(1));
        self
    }

    pub fn state(&self) -> DriverState {
        self.state
    }

    pub fn surface(&self) -> &RenderSurface<W> {
        &self.surface
    }

    pub fn into_surface(self) -> RenderSurface<W> {
        self.surface
    }

    /// Plays every cycle of the timeline and returns once done.
    pub async fn run(&mut self) -> PlaybackSummary {
        if self.state != DriverState::Idle {
            warn!("animation driver already ran, ignoring");
            return PlaybackSummary::default();
        }

        info!(
            mode = self.mode.as_str(),
            cycles = self.timeline.cycles(),
            ticks_per_cycle = self.timeline.ticks_per_cycle(),
            "breathing playback started"
        );

        let mut ticker = interval(self.tick_interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // The first tick of an interval completes immediately.
        ticker.tick().await;

        let summary = match self.mode {
            RenderMode::Complex => self.play_complex(&mut ticker).await,
            RenderMode::Simple => self.play_simple(&mut ticker).await,
        };

        self.state = DriverState::Done;
        info!(frames = summary.frames, "breathing playback finished");
        summary
    }

    async fn play_complex(&mut self, ticker: &mut Interval) -> PlaybackSummary {
        let mut summary = PlaybackSummary::default();
        let timeline = self.timeline.clone();
        let cycles = timeline.cycles();

        self.best_effort(|s| s.reserve_lines(RESERVED_LINES));

        for cycle in 1..=cycles {
            for (phase_index, phase) in timeline.phases().iter().enumerate() {
                debug!(cycle, phase = %phase.kind(), "phase started");
                let guidance = pad(&format!("   {} {}", phase.emoji(), phase.instruction()));
                self.best_effort(|s| s.rewrite_line(&guidance));

                for tick in 1..=phase.duration_ticks() {
                    self.state = DriverState::Running {
                        cycle,
                        phase_index,
                        tick,
                    };
                    let size = phase.size_at(tick);
                    let glyph = phase.shape().glyph_at(tick, timeline.pulse());
                    self.best_effort(|s| {
                        s.clear_region(CLEAR_ROWS, CLEAR_WIDTH)?;
                        s.draw_circle(CIRCLE_ROW, CIRCLE_COL, size, glyph)
                    });
                    summary.frames += 1;
                    ticker.tick().await;
                }
            }
            summary.cycles += 1;

            if cycle < cycles {
                let text = pad(&format!("   {TRANSITION_EMOJI} {TRANSITION_TEXT}"));
                self.best_effort(|s| s.rewrite_line(&text));
                summary.pauses += 1;
                self.pause_between_cycles(ticker).await;
            }
        }

        self.best_effort(|s| {
            s.clear_region(CLEAR_ROWS, CLEAR_WIDTH)?;
            s.rewrite_line("")?;
            s.skip_lines(RESERVED_LINES)
        });
        summary
    }

    async fn play_simple(&mut self, ticker: &mut Interval) -> PlaybackSummary {
        let mut summary = PlaybackSummary::default();
        let timeline = self.timeline.clone();
        let cycles = timeline.cycles();

        for cycle in 1..=cycles {
            for (phase_index, phase) in timeline.phases().iter().enumerate() {
                debug!(cycle, phase = %phase.kind(), "phase started");
                let heading = pad(&format!("   {} {}", phase.emoji(), phase.short_instruction()));
                self.best_effort(|s| s.line(&heading));

                for tick in 1..=phase.duration_ticks() {
                    self.state = DriverState::Running {
                        cycle,
                        phase_index,
                        tick,
                    };
                    let frame = simple_frame(phase, tick);
                    self.best_effort(|s| s.replace_line(&frame, PATTERN_TRAILING));
                    summary.frames += 1;
                    ticker.tick().await;
                }
                self.best_effort(|s| s.line(""));
            }
            summary.cycles += 1;

            if cycle < cycles {
                let text = pad(&format!("   {TRANSITION_EMOJI} {TRANSITION_TEXT}"));
                self.best_effort(|s| s.line(&text));
                summary.pauses += 1;
                self.pause_between_cycles(ticker).await;
                self.best_effort(|s| s.line(""));
            }
        }

        self.best_effort(|s| {
            s.line(&pad(COMPLETE_TEXT))?;
            s.line("")
        });
        summary
    }

    async fn pause_between_cycles(&mut self, ticker: &mut Interval) {
        sleep(self.timeline.cycle_rest()).await;
        ticker.reset();
    }

    /// Runs a drawing step and flushes; failures are logged and dropped.
    fn best_effort<F>(&mut self, draw: F)
    where
        F: FnOnce(&mut RenderSurface<W>) -> io::Result<()>,
    {
        if let Err(e) = draw(&mut self.surface).and_then(|()| self.surface.flush()) {
            debug!(error = %e, "frame write failed, skipping");
        }
    }
}

/// Simple-mode frame text for `tick` of `phase`.
pub fn simple_frame(phase: &Phase, tick: u32) -> String {
    pad(&format!("{PATTERN_INDENT}{}", phase.pattern_at(tick)))
}

// ============================================================================
// Tests
// ============================================================================
