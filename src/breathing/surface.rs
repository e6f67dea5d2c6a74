//! Cursor-anchored drawing on a terminal device.
//!
//! Every drawing operation runs inside [`RenderSurface::with_cursor_saved`],
//! which leaves the cursor exactly where it found it. Terminals keep a single
//! saved-cursor slot, so only the outermost scope emits save/restore; nested
//! scopes return to their entry point by restoring the anchor and replaying
//! the tracked offset.

use std::io::{self, Write};
use std::ops::RangeInclusive;

use crossterm::cursor::{
    MoveDown, MoveLeft, MoveRight, MoveToColumn, MoveUp, RestorePosition, SavePosition,
};
use crossterm::queue;
use crossterm::style::Print;
use crossterm::terminal::{Clear, ClearType};
use tracing::debug;

use super::timeline::FAINT_GLYPH;

/// Horizontal stretch applied to left/right circle points, since terminal
/// cells are about twice as tall as they are wide.
pub const CELL_ASPECT: i32 = 2;
/// Diagonal offset factor for circle points.
const DIAGONAL_FACTOR: f64 = 0.7;

// ============================================================================
// Cursor tracking
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Column {
    /// Anchor column plus a signed offset
    Anchor(i32),
    /// Absolute column from the start of the line
    At(u16),
    /// Unknown after printing text of unknown width
    Drifted,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Offset {
    rows: i32,
    column: Column,
}

impl Offset {
    const ANCHOR: Offset = Offset {
        rows: 0,
        column: Column::Anchor(0),
    };
}

// ============================================================================
// RenderSurface
// ============================================================================

/// Terminal drawing surface addressed relative to the cursor.
pub struct RenderSurface<W: Write> {
    out: W,
    depth: usize,
    cursor: Offset,
}

impl<W: Write> RenderSurface<W> {
    /// Wraps a terminal device (or any writer).
    pub fn new(out: W) -> Self {
        Self {
            out,
            depth: 0,
            cursor: Offset::ANCHOR,
        }
    }

    pub fn get_ref(&self) -> &W {
        &self.out
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    /// Runs `draw` and restores the cursor afterwards, even when `draw`
    /// returns early with an error.
    pub fn with_cursor_saved<F>(&mut self, draw: F) -> io::Result<()>
    where
        F: FnOnce(&mut Self) -> io::Result<()>,
    {
        let entry = self.cursor;
        let outermost = self.depth == 0;
        if outermost {
            queue!(self.out, SavePosition)?;
            self.cursor = Offset::ANCHOR;
        }

        self.depth += 1;
        let result = draw(self);
        self.depth -= 1;

        let restored = if outermost {
            self.cursor = Offset::ANCHOR;
            queue!(self.out, RestorePosition)
        } else {
            self.return_to(entry)
        };
        result.and(restored)
    }

    /// Moves the cursor by a signed row/column delta. Never scrolls as long
    /// as the target row lies inside lines that already exist.
    pub fn move_relative(&mut self, rows: i32, cols: i32) -> io::Result<()> {
        self.move_rows(rows)?;
        if cols > 0 {
            queue!(self.out, MoveRight(clamp_u16(cols)))?;
        } else if cols < 0 {
            queue!(self.out, MoveLeft(clamp_u16(-cols)))?;
        }
        self.cursor.column = match self.cursor.column {
            Column::Anchor(offset) => Column::Anchor(offset + cols),
            Column::At(col) => Column::At(clamp_u16(i32::from(col) + cols)),
            Column::Drifted => Column::Drifted,
        };
        Ok(())
    }

    /// Moves to an absolute column on the current line.
    pub fn move_to_column(&mut self, col: u16) -> io::Result<()> {
        queue!(self.out, MoveToColumn(col))?;
        self.cursor.column = Column::At(col);
        Ok(())
    }

    /// Writes text at the cursor.
    pub fn print(&mut self, text: &str) -> io::Result<()> {
        if text.is_empty() {
            return Ok(());
        }
        queue!(self.out, Print(text))?;
        self.cursor.column = Column::Drifted;
        Ok(())
    }

    /// Blanks `width` columns on every line in `rows`, relative to the
    /// current line.
    pub fn clear_region(&mut self, rows: RangeInclusive<i32>, width: u16) -> io::Result<()> {
        let blank = " ".repeat(usize::from(width));
        self.with_cursor_saved(|surface| {
            for row in rows {
                surface.with_cursor_saved(|s| {
                    s.move_relative(row, 0)?;
                    s.move_to_column(0)?;
                    s.print(&blank)
                })?;
            }
            Ok(())
        })
    }

    /// Writes a glyph at `row_offset` lines from the current line and
    /// column `col` from the start of that line. Negative columns are
    /// clipped.
    pub fn draw_glyph_at(&mut self, row_offset: i32, col: i32, glyph: &str) -> io::Result<()> {
        if col < 0 {
            return Ok(());
        }
        self.with_cursor_saved(|s| {
            s.move_relative(row_offset, 0)?;
            s.move_to_column(clamp_u16(col))?;
            s.print(glyph)
        })
    }

    /// Draws concentric rings centred at (`row_offset`, `center_col`).
    ///
    /// The outermost ring uses `glyph`; inner rings use a faint dot.
    pub fn draw_circle(
        &mut self,
        row_offset: i32,
        center_col: i32,
        size: u32,
        glyph: &str,
    ) -> io::Result<()> {
        if size <= 1 {
            return self.draw_glyph_at(row_offset, center_col, glyph);
        }

        self.with_cursor_saved(|s| {
            for radius in 1..=size {
                let ring_glyph = if radius < size { FAINT_GLYPH } else { glyph };
                for (dr, dc) in ring_points(radius) {
                    s.draw_glyph_at(row_offset + dr, center_col + dc, ring_glyph)?;
                }
            }
            Ok(())
        })
    }

    /// Rewrites the current line from column zero.
    pub fn rewrite_line(&mut self, text: &str) -> io::Result<()> {
        self.with_cursor_saved(|s| {
            s.move_to_column(0)?;
            queue!(s.out, Clear(ClearType::UntilNewLine))?;
            s.print(text)
        })
    }

    /// Replaces the current line with a carriage return only, for terminals
    /// that mishandle cursor sequences.
    pub fn replace_line(&mut self, text: &str, trailing_blank: usize) -> io::Result<()> {
        queue!(self.out, Print('\r'), Print(text), Print(" ".repeat(trailing_blank)))?;
        self.cursor.column = Column::Drifted;
        Ok(())
    }

    /// Prints `count` blank lines and returns to the first of them, so
    /// later relative moves stay inside existing lines.
    pub fn reserve_lines(&mut self, count: u16) -> io::Result<()> {
        if count == 0 {
            return Ok(());
        }
        queue!(self.out, Print("\n".repeat(usize::from(count))), MoveUp(count))?;
        self.cursor.column = Column::Drifted;
        Ok(())
    }

    /// Moves below a reserved block without writing into it.
    pub fn skip_lines(&mut self, count: u16) -> io::Result<()> {
        if count > 0 {
            queue!(self.out, MoveDown(count))?;
        }
        Ok(())
    }

    /// Writes a full line followed by a newline.
    pub fn line(&mut self, text: &str) -> io::Result<()> {
        queue!(self.out, Print(text), Print('\n'))?;
        self.cursor.column = Column::Drifted;
        Ok(())
    }

    pub fn flush(&mut self) -> io::Result<()> {
        self.out.flush()
    }

    fn move_rows(&mut self, rows: i32) -> io::Result<()> {
        if rows > 0 {
            queue!(self.out, MoveDown(clamp_u16(rows)))?;
        } else if rows < 0 {
            queue!(self.out, MoveUp(clamp_u16(-rows)))?;
        }
        self.cursor.rows += rows;
        Ok(())
    }

    /// Returns from a nested scope to its entry position.
    fn return_to(&mut self, entry: Offset) -> io::Result<()> {
        queue!(self.out, RestorePosition)?;
        self.cursor = Offset::ANCHOR;
        self.move_rows(entry.rows)?;
        match entry.column {
            Column::Anchor(offset) => self.move_relative(0, offset)?,
            Column::At(col) => self.move_to_column(col)?,
            Column::Drifted => {
                debug!("nested draw scope entered at an unknown column, returning to anchor column");
            }
        }
        self.cursor = entry;
        Ok(())
    }
}

/// Points of one ring at `radius`: four cardinal points, with left/right
/// stretched by [`CELL_ASPECT`], plus four diagonals for radius > 1.
pub fn ring_points(radius: u32) -> Vec<(i32, i32)> {
    let r = radius as i32;
    let mut points = vec![(-r, 0), (r, 0), (0, -r * CELL_ASPECT), (0, r * CELL_ASPECT)];
    if radius > 1 {
        let diag = (f64::from(radius) * DIAGONAL_FACTOR).round() as i32;
        points.extend([(-diag, -diag), (-diag, diag), (diag, -diag), (diag, diag)]);
    }
    points
}

fn clamp_u16(value: i32) -> u16 {
    value.clamp(0, i32::from(u16::MAX)) as u16
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    const SAVE: &str = "\x1b7";
    const RESTORE: &str = "\x1b8";

    fn output(surface: RenderSurface<Vec<u8>>) -> String {
        String::from_utf8(surface.into_inner()).unwrap()
    }

    mod ring_points_tests {
        use super::*;

        #[test]
        fn test_radius_one_has_cardinals_only() {
            assert_eq!(ring_points(1), vec![(-1, 0), (1, 0), (0, -2), (0, 2)]);
        }

        #[test]
        fn test_radius_two_adds_diagonals() {
            let points = ring_points(2);
            assert_eq!(points.len(), 8);
            assert!(points.contains(&(-1, -1)));
            assert!(points.contains(&(1, 1)));
        }

        #[test]
        fn test_diagonal_rounds() {
            // 4 * 0.7 = 2.8 rounds to 3
            assert!(ring_points(4).contains(&(3, -3)));
            // 3 * 0.7 = 2.1 rounds to 2
            assert!(ring_points(3).contains(&(-2, 2)));
        }

        #[test]
        fn test_horizontal_stretch() {
            assert!(ring_points(4).contains(&(0, -8)));
            assert!(ring_points(4).contains(&(0, 8)));
        }
    }

    mod scope_tests {
        use super::*;

        #[test]
        fn test_outermost_scope_saves_and_restores() {
            let mut surface = RenderSurface::new(Vec::new());
            surface.with_cursor_saved(|s| s.print("x")).unwrap();
            assert_eq!(output(surface), format!("{SAVE}x{RESTORE}"));
        }

        #[test]
        fn test_restores_after_early_error() {
            let mut surface = RenderSurface::new(Vec::new());
            let result = surface.with_cursor_saved(|s| {
                s.print("a")?;
                Err(io::Error::new(io::ErrorKind::Other, "boom"))
            });
            assert!(result.is_err());
            assert!(output(surface).ends_with(RESTORE));
        }

        #[test]
        fn test_nested_scope_emits_single_save() {
            let mut surface = RenderSurface::new(Vec::new());
            surface
                .with_cursor_saved(|s| s.with_cursor_saved(|inner| inner.print("y")))
                .unwrap();
            let out = output(surface);
            assert_eq!(out.matches(SAVE).count(), 1);
            assert!(out.ends_with(RESTORE));
        }

        #[test]
        fn test_nested_scope_replays_offset() {
            let mut surface = RenderSurface::new(Vec::new());
            surface
                .with_cursor_saved(|s| {
                    s.move_relative(3, 0)?;
                    s.move_to_column(5)?;
                    s.with_cursor_saved(|inner| inner.print("z"))
                })
                .unwrap();
            // inner scope returns via restore, down 3, column 6 (1-based)
            assert!(output(surface).contains(&format!("z{RESTORE}\x1b[3B\x1b[6G")));
        }

        #[test]
        fn test_zero_moves_emit_nothing() {
            let mut surface = RenderSurface::new(Vec::new());
            surface.move_relative(0, 0).unwrap();
            surface.skip_lines(0).unwrap();
            surface.reserve_lines(0).unwrap();
            assert!(output(surface).is_empty());
        }
    }

    mod drawing_tests {
        use super::*;

        #[test]
        fn test_draw_glyph_moves_up_for_negative_rows() {
            let mut surface = RenderSurface::new(Vec::new());
            surface.draw_glyph_at(-2, 10, "●").unwrap();
            assert_eq!(output(surface), format!("{SAVE}\x1b[2A\x1b[11G●{RESTORE}"));
        }

        #[test]
        fn test_negative_column_is_clipped() {
            let mut surface = RenderSurface::new(Vec::new());
            surface.draw_glyph_at(1, -1, "●").unwrap();
            assert!(output(surface).is_empty());
        }

        #[test]
        fn test_small_circle_is_single_point() {
            let mut surface = RenderSurface::new(Vec::new());
            surface.draw_circle(5, 29, 1, "·").unwrap();
            let out = output(surface);
            assert_eq!(out.matches('·').count(), 1);
        }

        #[test]
        fn test_circle_inner_rings_are_faint() {
            let mut surface = RenderSurface::new(Vec::new());
            surface.draw_circle(5, 29, 3, "●").unwrap();
            let out = output(surface);
            // radius 3 has 8 points in the primary glyph
            assert_eq!(out.matches('●').count(), 8);
            // radius 1 (4 points) and radius 2 (8 points) are faint
            assert_eq!(out.matches(FAINT_GLYPH).count(), 12);
        }

        #[test]
        fn test_clear_region_blanks_each_row() {
            let mut surface = RenderSurface::new(Vec::new());
            surface.clear_region(1..=3, 10).unwrap();
            let out = output(surface);
            assert_eq!(out.matches(&" ".repeat(10)).count(), 3);
            assert!(out.contains("\x1b[1B"));
            assert!(out.contains("\x1b[3B"));
        }

        #[test]
        fn test_rewrite_line_clears_first() {
            let mut surface = RenderSurface::new(Vec::new());
            surface.rewrite_line("hello").unwrap();
            assert_eq!(output(surface), format!("{SAVE}\x1b[1G\x1b[Khello{RESTORE}"));
        }

        #[test]
        fn test_replace_line_uses_carriage_return_only() {
            let mut surface = RenderSurface::new(Vec::new());
            surface.replace_line("●●", 2).unwrap();
            assert_eq!(output(surface), "\r●●  ");
        }

        #[test]
        fn test_reserve_lines_returns_to_top() {
            let mut surface = RenderSurface::new(Vec::new());
            surface.reserve_lines(3).unwrap();
            assert_eq!(output(surface), "\n\n\n\x1b[3A");
        }
    }
}
