//! Evening reflection prompts and their paced playback.

use std::io::{self, Write};
use std::time::Duration;

use tokio::time::sleep;
use tracing::debug;

use crate::breathing::{write_bottom_padding, write_padded, write_section_spacing};

// ============================================================================
// Pacing
// ============================================================================

/// Pauses between reflection lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReflectionPacing {
    pub after_title: Duration,
    pub per_instruction: Duration,
    pub after_last_instruction: Duration,
    pub after_prompt_title: Duration,
    pub per_prompt: Duration,
    pub per_closing: Duration,
}

impl Default for ReflectionPacing {
    fn default() -> Self {
        Self {
            after_title: Duration::from_secs(1),
            per_instruction: Duration::from_secs(3),
            after_last_instruction: Duration::from_secs(5),
            after_prompt_title: Duration::from_secs(2),
            per_prompt: Duration::from_secs(8),
            per_closing: Duration::from_secs(3),
        }
    }
}

// ============================================================================
// PromptSet
// ============================================================================

/// Text of one reflection session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptSet {
    pub title: String,
    pub instructions: Vec<String>,
    pub prompt_title: String,
    pub prompts: Vec<String>,
    pub closing: Vec<String>,
}

impl Default for PromptSet {
    fn default() -> Self {
        fn owned(lines: &[&str]) -> Vec<String> {
            lines.iter().map(|line| line.to_string()).collect()
        }

        Self {
            title: "🕯️  Evening Reflection".to_string(),
            instructions: owned(&[
                "   Close your eyes for a moment...",
                "   Take three deep breaths...",
            ]),
            prompt_title: "   📝 Gentle reflection:".to_string(),
            prompts: owned(&[
                "      • What thoughts kept pulling you away today?",
                "      • Were there moments when you were truly present?",
                "      • What patterns do you notice in your mind?",
            ]),
            closing: owned(&[
                "   These are just thoughts. They come and go like clouds.",
                "   The noticing itself is the practice. 🙏",
            ]),
        }
    }
}

impl PromptSet {
    /// Sum of every pause `run` will take with `pacing`.
    pub fn total_duration(&self, pacing: &ReflectionPacing) -> Duration {
        let instructions = match self.instructions.len() {
            0 => Duration::ZERO,
            n => pacing.per_instruction * (n as u32 - 1) + pacing.after_last_instruction,
        };
        pacing.after_title
            + instructions
            + pacing.after_prompt_title
            + pacing.per_prompt * self.prompts.len() as u32
            + pacing.per_closing * self.closing.len() as u32
    }

    /// Prints the prompts to `out`, pausing between lines.
    pub async fn run<W: Write>(&self, out: &mut W, pacing: &ReflectionPacing) -> io::Result<()> {
        debug!(prompts = self.prompts.len(), "reflection started");

        write_padded(out, &self.title)?;
        pause(out, pacing.after_title).await?;
        write_section_spacing(out)?;

        let last = self.instructions.len().saturating_sub(1);
        for (i, line) in self.instructions.iter().enumerate() {
            write_padded(out, line)?;
            let wait = if i == last {
                pacing.after_last_instruction
            } else {
                pacing.per_instruction
            };
            pause(out, wait).await?;
        }
        write_section_spacing(out)?;

        write_padded(out, &self.prompt_title)?;
        pause(out, pacing.after_prompt_title).await?;

        for line in &self.prompts {
            write_padded(out, line)?;
            pause(out, pacing.per_prompt).await?;
        }
        write_section_spacing(out)?;

        for line in &self.closing {
            write_padded(out, line)?;
            pause(out, pacing.per_closing).await?;
        }
        write_bottom_padding(out)?;
        out.flush()
    }
}

async fn pause<W: Write>(out: &mut W, wait: Duration) -> io::Result<()> {
    out.flush()?;
    sleep(wait).await;
    Ok(())
}
