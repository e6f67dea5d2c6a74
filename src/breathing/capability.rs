//! Terminal capability detection.
//!
//! Some terminals mishandle relative cursor sequences, which corrupts the
//! circle animation. Detection is a pure function over an environment
//! lookup so new terminals only need a table entry.

use crate::types::RenderMode;

/// Environment variable / value pairs identifying terminals that need
/// the simple line animation.
pub const INCOMPATIBLE_TERMINALS: &[(&str, &str)] = &[
    ("TERM_PROGRAM", "Apple_Terminal"),
    ("TERM", "dumb"),
];

/// Picks a render mode from the process environment.
pub fn detect_render_mode() -> RenderMode {
    render_mode_for(|key| std::env::var(key).ok())
}

/// Picks a render mode from an arbitrary environment lookup.
pub fn render_mode_for<F>(lookup: F) -> RenderMode
where
    F: Fn(&str) -> Option<String>,
{
    let incompatible = INCOMPATIBLE_TERMINALS
        .iter()
        .any(|(key, value)| lookup(key).as_deref() == Some(*value));

    if incompatible {
        RenderMode::Simple
    } else {
        RenderMode::Complex
    }
}
