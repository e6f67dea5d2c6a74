//! CLI module for Zenta.
//!
//! This module provides the command-line interface:
//! - `commands`: Command definitions using clap derive
//! - `display`: Output formatting and display logic
//! - `version`: Build and version information

pub mod commands;
pub mod display;
pub mod version;

pub use commands::{AnchorArgs, Cli, Commands, NowArgs};
pub use display::Display;
pub use version::BuildInfo;
