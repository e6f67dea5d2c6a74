//! A minimal virtual terminal for checking rendered output.
//!
//! Understands the sequences the renderer emits: ESC 7 / ESC 8, CSI
//! A/B/C/D/G/K, cursor show/hide, carriage return, newline and printable
//! characters. Relative moves clamp at the edges of the lines written so
//! far, like a real terminal clamps at the screen edge without scrolling.

#![allow(dead_code)]

use unicode_width::UnicodeWidthChar;

pub const WIDTH: usize = 120;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VirtualTerminal {
    lines: Vec<Vec<String>>,
    row: usize,
    col: usize,
    saved: Option<(usize, usize)>,
    cursor_visible: bool,
    scrolled_by_moves: usize,
}

impl Default for VirtualTerminal {
    fn default() -> Self {
        Self::new()
    }
}

impl VirtualTerminal {
    pub fn new() -> Self {
        Self {
            lines: vec![blank_line()],
            row: 0,
            col: 0,
            saved: None,
            cursor_visible: true,
            scrolled_by_moves: 0,
        }
    }

    /// Starts with `count` existing lines and the cursor on the first.
    pub fn with_lines(count: usize) -> Self {
        let mut term = Self::new();
        term.lines = vec![blank_line(); count.max(1)];
        term
    }

    pub fn cursor(&self) -> (usize, usize) {
        (self.row, self.col)
    }

    pub fn cursor_visible(&self) -> bool {
        self.cursor_visible
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Moves that tried to go past the last line.
    pub fn scrolled_by_moves(&self) -> usize {
        self.scrolled_by_moves
    }

    pub fn cell(&self, row: usize, col: usize) -> &str {
        self.lines
            .get(row)
            .and_then(|line| line.get(col))
            .map(String::as_str)
            .unwrap_or(" ")
    }

    /// Text of `row` with trailing blanks removed.
    pub fn line_text(&self, row: usize) -> String {
        self.lines
            .get(row)
            .map(|line| line.concat().trim_end().to_string())
            .unwrap_or_default()
    }

    pub fn feed_bytes(&mut self, bytes: &[u8]) {
        let text = String::from_utf8_lossy(bytes).into_owned();
        self.feed(&text);
    }

    pub fn feed(&mut self, text: &str) {
        let mut chars = text.chars().peekable();
        while let Some(c) = chars.next() {
            match c {
                '\x1b' => match chars.next() {
                    Some('7') => self.saved = Some((self.row, self.col)),
                    Some('8') => {
                        if let Some((row, col)) = self.saved {
                            self.row = row;
                            self.col = col;
                        }
                    }
                    Some('[') => {
                        let mut params = String::new();
                        let mut final_byte = None;
                        for c in chars.by_ref() {
                            if c.is_ascii_digit() || c == '?' || c == ';' {
                                params.push(c);
                            } else {
                                final_byte = Some(c);
                                break;
                            }
                        }
                        if let Some(f) = final_byte {
                            self.csi(&params, f);
                        }
                    }
                    other => panic!("unexpected escape sequence ESC {other:?}"),
                },
                '\r' => self.col = 0,
                '\n' => {
                    self.row += 1;
                    if self.row == self.lines.len() {
                        self.lines.push(blank_line());
                    }
                }
                c => self.put(c),
            }
        }
    }

    fn csi(&mut self, params: &str, final_byte: char) {
        if let Some(mode) = params.strip_prefix('?') {
            if mode == "25" {
                match final_byte {
                    'l' => self.cursor_visible = false,
                    'h' => self.cursor_visible = true,
                    _ => {}
                }
            }
            return;
        }

        let n: usize = params.parse().unwrap_or(1);
        match final_byte {
            'A' => self.row = self.row.saturating_sub(n),
            'B' => {
                let last = self.lines.len() - 1;
                if self.row + n > last {
                    self.scrolled_by_moves += 1;
                }
                self.row = (self.row + n).min(last);
            }
            'C' => self.col = (self.col + n).min(WIDTH - 1),
            'D' => self.col = self.col.saturating_sub(n),
            'G' => self.col = n.saturating_sub(1).min(WIDTH - 1),
            'K' => {
                let col = self.col;
                for cell in self.lines[self.row].iter_mut().skip(col) {
                    *cell = " ".to_string();
                }
            }
            other => panic!("unexpected CSI final byte {other:?}"),
        }
    }

    fn put(&mut self, c: char) {
        let width = c.width().unwrap_or(0);
        if width == 0 {
            if self.col > 0 {
                self.lines[self.row][self.col - 1].push(c);
            }
            return;
        }
        if self.col + width > WIDTH {
            return;
        }
        let line = &mut self.lines[self.row];
        line[self.col] = c.to_string();
        for extra in 1..width {
            line[self.col + extra] = String::new();
        }
        self.col += width;
    }
}

fn blank_line() -> Vec<String> {
    vec![" ".to_string(); WIDTH]
}
