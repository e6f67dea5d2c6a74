//! Boxed quote rendering with a typing effect.

use std::io::{self, Write};
use std::time::Duration;

use tokio::time::sleep;
use unicode_width::UnicodeWidthStr;

use crate::breathing::pad;

/// Maximum text width inside the box.
pub const WRAP_WIDTH: usize = 50;

/// Pause after each typed non-space character.
pub const TYPING_DELAY: Duration = Duration::from_millis(15);

/// Shown when a quote carries no emoji of its own.
pub const DEFAULT_EMOJI: &str = "💭";

/// Columns added around the widest line for borders and spacing.
const BOX_MARGIN: usize = 8;

// ============================================================================
// QuoteCard
// ============================================================================

/// A quote split into its emoji and wrapped lines, sized for a box.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuoteCard {
    emoji: String,
    lines: Vec<String>,
    box_width: usize,
}

impl QuoteCard {
    pub fn parse(quote: &str) -> Self {
        let (emoji, text) = split_emoji(quote);
        let lines: Vec<String> = textwrap::wrap(text, WRAP_WIDTH)
            .into_iter()
            .map(|line| line.into_owned())
            .collect();
        let widest = lines.iter().map(|line| line.width()).max().unwrap_or(0);
        Self {
            emoji: emoji.to_string(),
            lines,
            box_width: widest + BOX_MARGIN,
        }
    }

    pub fn emoji(&self) -> &str {
        &self.emoji
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Total box width in terminal columns, borders included.
    pub fn box_width(&self) -> usize {
        self.box_width
    }

    pub fn top_border(&self) -> String {
        pad(&format!("┌{}┐", "─".repeat(self.box_width - 2)))
    }

    pub fn bottom_border(&self) -> String {
        pad(&format!("└{}┘", "─".repeat(self.box_width - 2)))
    }

    /// Left border plus the emoji (first line) or matching blank space.
    pub fn row_lead(&self, index: usize) -> String {
        pad(&format!("│ {}", self.prefix(index)))
    }

    /// Fill and right border closing row `index`.
    pub fn row_tail(&self, index: usize) -> String {
        let used = 2 + self.prefix(index).width() + self.lines[index].width() + 2;
        format!("{} │", " ".repeat(self.box_width.saturating_sub(used)))
    }

    /// Every row fully rendered, without the typing effect.
    pub fn rows(&self) -> Vec<String> {
        let mut rows = Vec::with_capacity(self.lines.len() + 2);
        rows.push(self.top_border());
        for (i, line) in self.lines.iter().enumerate() {
            rows.push(format!("{}{line}{}", self.row_lead(i), self.row_tail(i)));
        }
        rows.push(self.bottom_border());
        rows
    }

    fn prefix(&self, index: usize) -> String {
        if index == 0 {
            format!("{} ", self.emoji)
        } else {
            " ".repeat(self.emoji.width() + 1)
        }
    }
}

/// Splits a leading emoji word from the quote text.
pub fn split_emoji(quote: &str) -> (&str, &str) {
    let quote = quote.trim();
    let (first, rest) = quote
        .split_once(char::is_whitespace)
        .unwrap_or((quote, ""));

    match first.chars().next() {
        Some(c) if is_emoji(c) => (first, rest.trim_start()),
        _ => (DEFAULT_EMOJI, quote),
    }
}

fn is_emoji(c: char) -> bool {
    matches!(
        c as u32,
        0x1F300..=0x1F5FF
            | 0x1F600..=0x1F64F
            | 0x1F680..=0x1F6FF
            | 0x1F900..=0x1F9FF
            | 0x1FA70..=0x1FAFF
            | 0x2600..=0x26FF
            | 0x2700..=0x27BF
            | 0x2B50
    )
}

// ============================================================================
// Typing display
// ============================================================================

/// Draws `quote` in a box, typing each line character by character.
pub async fn display_quote<W: Write>(out: &mut W, quote: &str, delay: Duration) -> io::Result<()> {
    let card = QuoteCard::parse(quote);

    writeln!(out, "{}", card.top_border())?;
    for (i, line) in card.lines().iter().enumerate() {
        write!(out, "{}", card.row_lead(i))?;
        type_out(out, line, delay).await?;
        writeln!(out, "{}", card.row_tail(i))?;
    }
    writeln!(out, "{}", card.bottom_border())?;
    out.flush()
}

async fn type_out<W: Write>(out: &mut W, text: &str, delay: Duration) -> io::Result<()> {
    for c in text.chars() {
        write!(out, "{c}")?;
        if !c.is_whitespace() {
            out.flush()?;
            sleep(delay).await;
        }
    }
    Ok(())
}
