//! User-paced breathing (anchor mode).
//!
//! The pacer grows a breath bar while inhaling and shrinks it while
//! exhaling; the user flips between the two with the space bar. Keys are
//! read by a dedicated thread doing blocking one-byte reads and handed over
//! through a single-slot channel that the pacer polls without blocking once
//! per tick.

use std::io::{self, Read, Write};
use std::thread;
use std::time::Duration;

use crossbeam_channel::{bounded, Receiver, TryRecvError};
use tokio::time::{interval, MissedTickBehavior};
use tracing::debug;

use super::pad;
use super::surface::RenderSurface;

/// Delay between pacer updates.
pub const ANCHOR_TICK: Duration = Duration::from_millis(90);
/// Width of the breath bar.
pub const DEFAULT_MAX_SIZE: u32 = 40;

const CTRL_C: u8 = 3;
const FILLED_CELL: char = '●';
const EDGE_CELL: char = '○';
const EMPTY_CELL: char = '·';

// ============================================================================
// PacerPhase / PacerState
// ============================================================================

/// Phase of the anchor breath.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PacerPhase {
    Inhale,
    Exhale,
    Paused,
}

impl PacerPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            PacerPhase::Inhale => "inhale",
            PacerPhase::Exhale => "exhale",
            PacerPhase::Paused => "paused",
        }
    }
}

/// What a key press does.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    /// Switch between inhale and exhale
    Switch,
    /// Leave the pacer
    Quit,
    /// Anything else
    Ignore,
}

impl KeyAction {
    /// Maps a raw input byte to an action.
    pub fn from_byte(byte: u8) -> Self {
        match byte {
            b' ' => KeyAction::Switch,
            b'q' | b'Q' | CTRL_C => KeyAction::Quit,
            _ => KeyAction::Ignore,
        }
    }
}

/// Breath size and phase, mutated only by the pacer loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PacerState {
    breath_size: u32,
    phase: PacerPhase,
    max_size: u32,
}

impl PacerState {
    /// Starts inhaling from an empty breath.
    pub fn new(max_size: u32) -> Self {
        Self {
            breath_size: 0,
            phase: PacerPhase::Inhale,
            max_size,
        }
    }

    pub fn breath_size(&self) -> u32 {
        self.breath_size
    }

    pub fn phase(&self) -> PacerPhase {
        self.phase
    }

    pub fn max_size(&self) -> u32 {
        self.max_size
    }

    /// Applies a key press. Space while exhaling is ignored so an exhale
    /// always runs to empty.
    pub fn apply_key(&mut self, byte: u8) -> KeyAction {
        let action = KeyAction::from_byte(byte);
        if action == KeyAction::Switch {
            self.phase = match self.phase {
                PacerPhase::Inhale => PacerPhase::Exhale,
                PacerPhase::Paused => PacerPhase::Inhale,
                PacerPhase::Exhale => PacerPhase::Exhale,
            };
        }
        action
    }

    /// Advances one tick.
    pub fn tick(&mut self) {
        match self.phase {
            PacerPhase::Inhale => {
                if self.breath_size < self.max_size {
                    self.breath_size += 1;
                }
            }
            PacerPhase::Exhale => {
                if self.breath_size > 0 {
                    self.breath_size -= 1;
                } else {
                    self.phase = PacerPhase::Paused;
                }
            }
            PacerPhase::Paused => {}
        }
    }

    /// Renders the padded phase name and breath bar.
    pub fn render_bar(&self) -> String {
        let size = self.breath_size.min(self.max_size) as usize;
        let max = self.max_size as usize;

        let mut bar = pad(&format!("{:<8} [", self.phase.as_str()));
        bar.extend(std::iter::repeat(FILLED_CELL).take(size));
        if size < max {
            bar.push(EDGE_CELL);
            bar.extend(std::iter::repeat(EMPTY_CELL).take(max - size - 1));
        }
        bar.push(']');
        bar
    }
}

// ============================================================================
// Key reader
// ============================================================================

/// Spawns the key reader thread.
///
/// The thread exits on EOF or on a read error, and dropping its sender
/// closes the channel. It is never joined: a reader blocked in `read`
/// holds nothing that needs releasing.
pub fn spawn_key_reader<R>(mut input: R) -> io::Result<Receiver<u8>>
where
    R: Read + Send + 'static,
{
    let (tx, rx) = bounded(1);

    thread::Builder::new()
        .name("zenta-keys".to_string())
        .spawn(move || {
            let mut buf = [0u8; 1];
            loop {
                match input.read(&mut buf) {
                    Ok(0) => {
                        debug!("key reader reached end of input");
                        break;
                    }
                    Ok(_) => {
                        if tx.send(buf[0]).is_err() {
                            break;
                        }
                    }
                    Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                    Err(e) => {
                        debug!(error = %e, "key reader stopped");
                        break;
                    }
                }
            }
        })?;

    Ok(rx)
}

// ============================================================================
// InteractivePacer
// ============================================================================

/// Why the pacer loop ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PacerExit {
    /// The user pressed a quit key
    Quit,
    /// The key channel closed (EOF or read error)
    InputClosed,
}

/// Runs the anchor-mode render/update loop.
pub struct InteractivePacer<W: Write> {
    state: PacerState,
    keys: Receiver<u8>,
    surface: RenderSurface<W>,
    tick_interval: Duration,
    frames: u32,
}

impl<W: Write> InteractivePacer<W> {
    pub fn new(keys: Receiver<u8>, out: W, max_size: u32) -> Self {
        Self {
            state: PacerState::new(max_size),
            keys,
            surface: RenderSurface::new(out),
            tick_interval: ANCHOR_TICK,
            frames: 0,
        }
    }

    /// Overrides the tick interval. Zero is raised to one millisecond.
    pub fn with_tick_interval(mut self, tick_interval: Duration) -> Self {
        self.tick_interval = tick_interval.max(Duration::from_millis(1));
        self
    }

    pub fn state(&self) -> &PacerState {
        &self.state
    }

    /// Frames drawn so far.
    pub fn frames(&self) -> u32 {
        self.frames
    }

    pub fn into_surface(self) -> RenderSurface<W> {
        self.surface
    }

    /// Loops until a quit key arrives or the key channel closes.
    ///
    /// Each tick applies at most one pending key before the size update,
    /// so a quit or switch takes effect before the next frame.
    pub async fn run(&mut self) -> PacerExit {
        let mut ticker = interval(self.tick_interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        ticker.tick().await;

        loop {
            match self.keys.try_recv() {
                Ok(byte) => {
                    let before = self.state.phase();
                    match self.state.apply_key(byte) {
                        KeyAction::Quit => {
                            debug!("quit key received");
                            return PacerExit::Quit;
                        }
                        KeyAction::Switch => {
                            debug!(from = before.as_str(), to = self.state.phase().as_str(), "switch key");
                        }
                        KeyAction::Ignore => {}
                    }
                }
                Err(TryRecvError::Empty) => {}
                Err(TryRecvError::Disconnected) => {
                    debug!("key channel closed");
                    return PacerExit::InputClosed;
                }
            }

            self.state.tick();
            self.draw();
            ticker.tick().await;
        }
    }

    fn draw(&mut self) {
        let bar = self.state.render_bar();
        let result = self
            .surface
            .replace_line(&bar, 1)
            .and_then(|()| self.surface.flush());
        if let Err(e) = result {
            debug!(error = %e, "pacer frame write failed, skipping");
        }
        self.frames += 1;
    }
}

// ============================================================================
// Tests
// ============================================================================
