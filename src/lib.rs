//! Zenta Library
//!
//! This library provides the core functionality for the Zenta CLI.
//! It includes:
//! - Breathing visualization engine (fixed timeline and user-paced anchor mode)
//! - Terminal session management with signal-safe restoration
//! - Built-in quotes with a boxed typing display
//! - Evening reflection prompts
//! - CLI command parsing and display utilities
//! - Type definitions for session configuration

pub mod breathing;
pub mod cli;
pub mod quotes;
pub mod reflection;
pub mod types;

// Re-export commonly used types for convenience
pub use types::{PhaseKind, RenderMode, SessionConfig};

// Re-export breathing engine types
pub use breathing::{
    AnimationDriver, BreathingSession, InteractivePacer, PacerExit, PacerState, PhaseTimeline,
    RenderSurface, SessionError, TerminalSession,
};

// Re-export collaborator types
pub use quotes::QuoteService;
pub use reflection::{PromptSet, ReflectionPacing};
