//! Built-in mindfulness quotes shown after a session.
//!
//! - `QuoteService`: the quote collection and random selection
//! - `display`: boxed rendering with a typing effect

pub mod display;

use rand::seq::SliceRandom;
use rand::Rng;

pub use display::{display_quote, QuoteCard, TYPING_DELAY};

/// Returned when the collection is empty.
pub const FALLBACK_QUOTE: &str = "🧘 Take a breath. This moment is all there is.";

const BUILTIN_QUOTES: &[&str] = &[
    "🧘 Take a breath. This moment is all there is.",
    "🌱 What you resist persists. What you accept transforms.",
    "⭐ The present moment is the only time over which we have dominion. - Thich Nhat Hanh",
    "🍃 Wherever you are, be there totally. - Eckhart Tolle",
    "🌊 You have power over your mind, not outside events. Realize this, and you will find strength. - Marcus Aurelius",
    "🎯 The best way to take care of the future is to take care of the present moment.",
    "🌸 Peace comes from within. Do not seek it without. - Buddha",
    "🕯️ Between stimulus and response there is a space. In that space is our power to choose our response.",
    "🌿 Mindfulness is about being fully awake in our lives.",
    "⚡ This too shall pass. Notice what arises, and let it go.",
    "🎋 The mind is everything. What you think you become. - Buddha",
    "🌅 Each morning we are born again. What we do today is what matters most.",
    "🪨 Be like water making its way through cracks. - Bruce Lee",
    "🌊 Flow with whatever may happen and let your mind be free.",
    "⭐ The quieter you become, the more you are able to hear.",
    "🌱 In the beginner's mind there are many possibilities, in the expert's mind there are few. - Shunryu Suzuki",
    "🕊️ Let go or be dragged. - Zen Proverb",
    "🌸 The only way out is through.",
    "🎯 Focus on the step in front of you, not the whole staircase.",
    "🌿 Breathe in calm, breathe out chaos.",
    "⚖️ Balance is not something you find, it's something you create.",
    "🌊 When you realize nothing is lacking, the whole world belongs to you. - Lao Tzu",
    "🪷 Muddy water is best cleared by leaving it alone. - Alan Watts",
    "🌅 Every moment is a fresh beginning. - T.S. Eliot",
    "🎋 Simplicity is the ultimate sophistication.",
];

// ============================================================================
// QuoteService
// ============================================================================

/// Source of post-session quotes.
#[derive(Debug, Clone)]
pub struct QuoteService {
    quotes: Vec<&'static str>,
}

impl Default for QuoteService {
    fn default() -> Self {
        Self::new()
    }
}

impl QuoteService {
    /// Creates a service over the built-in collection.
    pub fn new() -> Self {
        Self {
            quotes: BUILTIN_QUOTES.to_vec(),
        }
    }

    /// Picks a quote using the thread-local generator.
    pub fn random_quote(&self) -> &'static str {
        self.random_quote_with(&mut rand::thread_rng())
    }

    /// Picks a quote using `rng`.
    pub fn random_quote_with<R: Rng + ?Sized>(&self, rng: &mut R) -> &'static str {
        self.quotes.choose(rng).copied().unwrap_or(FALLBACK_QUOTE)
    }

    /// Returns a copy of every quote.
    pub fn all_quotes(&self) -> Vec<&'static str> {
        self.quotes.clone()
    }

    pub fn count(&self) -> usize {
        self.quotes.len()
    }
}
