//! Text renderer for game snapshots.
//!
//! Every frame is a full redraw of a small fixed layout: the 10x20 well on the
//! left (two columns per cell) and a side panel with score, next piece, and
//! status on the right. Frames are encoded into a byte buffer first so the
//! layout can be tested without a terminal.

use std::io::{self, Write};

use anyhow::Result;
use crossterm::{
    cursor,
    style::{Attribute, Color, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor},
    terminal, QueueableCommand,
};

use tetrion::core::GameSnapshot;
use tetrion::types::{Lifecycle, BOARD_HEIGHT, BOARD_WIDTH};

/// Width of the board frame in terminal columns, borders included.
const WELL_COLUMNS: usize = BOARD_WIDTH as usize * 2 + 2;

pub struct TerminalRenderer {
    stdout: io::Stdout,
    buf: Vec<u8>,
    needs_clear: bool,
}

impl TerminalRenderer {
    pub fn new() -> Self {
        Self {
            stdout: io::stdout(),
            buf: Vec::with_capacity(16 * 1024),
            needs_clear: true,
        }
    }

    pub fn enter(&mut self) -> Result<()> {
        terminal::enable_raw_mode()?;
        self.buf.clear();
        self.buf.queue(terminal::EnterAlternateScreen)?;
        self.buf.queue(cursor::Hide)?;
        self.buf.queue(terminal::DisableLineWrap)?;
        self.flush_buf()
    }

    pub fn exit(&mut self) -> Result<()> {
        self.buf.clear();
        self.buf.queue(ResetColor)?;
        self.buf.queue(SetAttribute(Attribute::Reset))?;
        self.buf.queue(terminal::EnableLineWrap)?;
        self.buf.queue(cursor::Show)?;
        self.buf.queue(terminal::LeaveAlternateScreen)?;
        self.flush_buf()?;
        terminal::disable_raw_mode()?;
        Ok(())
    }

    /// Clear the screen before the next frame (after a resize).
    pub fn invalidate(&mut self) {
        self.needs_clear = true;
    }

    pub fn draw(&mut self, snap: &GameSnapshot) -> Result<()> {
        self.buf.clear();
        if self.needs_clear {
            self.buf.queue(terminal::Clear(terminal::ClearType::All))?;
            self.needs_clear = false;
        }
        encode_frame_into(snap, &mut self.buf)?;
        self.flush_buf()
    }

    fn flush_buf(&mut self) -> Result<()> {
        self.stdout.write_all(&self.buf)?;
        self.stdout.flush()?;
        Ok(())
    }
}

/// Encode one full frame into `out`.
pub fn encode_frame_into(snap: &GameSnapshot, out: &mut Vec<u8>) -> Result<()> {
    let panel = side_panel(snap);
    let dim = snap.lifecycle != Lifecycle::Active;

    out.queue(cursor::MoveTo(0, 0))?;
    out.queue(Print(format!("┌{}┐", "─".repeat(WELL_COLUMNS - 2))))?;
    out.queue(Print("\r\n"))?;

    for (y, row) in snap.board.iter().enumerate() {
        out.queue(Print("│"))?;
        for &id in row.iter() {
            if id == 0 {
                out.queue(SetForegroundColor(Color::DarkGrey))?;
                out.queue(Print(" ·"))?;
            } else {
                out.queue(SetBackgroundColor(cell_color(id, dim)))?;
                out.queue(Print("  "))?;
            }
            out.queue(ResetColor)?;
        }
        out.queue(Print("│  "))?;
        if let Some(line) = panel.get(y) {
            out.queue(Print(line))?;
        }
        out.queue(terminal::Clear(terminal::ClearType::UntilNewLine))?;
        out.queue(Print("\r\n"))?;
    }

    out.queue(Print(format!("└{}┘", "─".repeat(WELL_COLUMNS - 2))))?;
    out.queue(ResetColor)?;
    out.queue(SetAttribute(Attribute::Reset))?;
    Ok(())
}

/// Side panel text, one entry per board row (shorter than the board).
pub fn side_panel(snap: &GameSnapshot) -> Vec<String> {
    let mut lines = Vec::with_capacity(BOARD_HEIGHT as usize);
    lines.push(format!("SCORE {}", snap.score));
    lines.push(format!("LINES {}", snap.lines));
    lines.push(String::new());
    lines.push("NEXT".to_string());
    for row in snap.next.shape.rows() {
        let text: String = row
            .iter()
            .map(|&filled| if filled == 1 { "██" } else { "  " })
            .collect();
        lines.push(text);
    }
    lines.push(String::new());
    lines.push(
        match snap.lifecycle {
            Lifecycle::Active => "",
            Lifecycle::Paused => "PAUSED  (p to resume)",
            Lifecycle::GameOver => "GAME OVER  (r to restart)",
        }
        .to_string(),
    );
    lines.push(String::new());
    lines.push("←/→ move   ↑ rotate".to_string());
    lines.push("↓ soft drop   space hard drop".to_string());
    lines.push("p pause   r restart   q quit".to_string());
    lines
}

fn cell_color(id: u8, dim: bool) -> Color {
    let Some(hue) = tetrion::types::Color::new(id).and_then(tetrion::types::Color::hue) else {
        return if dim { Color::DarkGrey } else { Color::Grey };
    };
    let lightness = if dim { 0.3 } else { 0.5 };
    let (r, g, b) = hsl_to_rgb(hue as f32, 0.7, lightness);
    Color::Rgb { r, g, b }
}

fn hsl_to_rgb(h: f32, s: f32, l: f32) -> (u8, u8, u8) {
    let c = (1.0 - (2.0 * l - 1.0).abs()) * s;
    let hp = (h % 360.0) / 60.0;
    let x = c * (1.0 - (hp % 2.0 - 1.0).abs());
    let (r1, g1, b1) = match hp as u32 {
        0 => (c, x, 0.0),
        1 => (x, c, 0.0),
        2 => (0.0, c, x),
        3 => (0.0, x, c),
        4 => (x, 0.0, c),
        _ => (c, 0.0, x),
    };
    let m = l - c / 2.0;
    let to_u8 = |v: f32| ((v + m) * 255.0).round().clamp(0.0, 255.0) as u8;
    (to_u8(r1), to_u8(g1), to_u8(b1))
}
