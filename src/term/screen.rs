//! Screen: raw-mode lifecycle and frame drawing.

use std::io::{self, Write};

use anyhow::Result;
use crossterm::{
    cursor,
    style::{Attribute, Color, Print, ResetColor, SetAttribute, SetForegroundColor},
    terminal, QueueableCommand,
};

use crate::term::view::{Line, TextStyle};

pub struct Screen {
    stdout: io::Stdout,
}

impl Screen {
    pub fn new() -> Self {
        Self {
            stdout: io::stdout(),
        }
    }

    pub fn enter(&mut self) -> Result<()> {
        terminal::enable_raw_mode()?;
        self.stdout.queue(terminal::EnterAlternateScreen)?;
        self.stdout.queue(cursor::Hide)?;
        self.stdout.queue(terminal::DisableLineWrap)?;
        self.stdout.flush()?;
        Ok(())
    }

    pub fn exit(&mut self) -> Result<()> {
        self.stdout.queue(ResetColor)?;
        self.stdout.queue(SetAttribute(Attribute::Reset))?;
        self.stdout.queue(terminal::EnableLineWrap)?;
        self.stdout.queue(cursor::Show)?;
        self.stdout.queue(terminal::LeaveAlternateScreen)?;
        self.stdout.flush()?;
        terminal::disable_raw_mode()?;
        Ok(())
    }

    /// Full redraw of one frame.
    pub fn draw(&mut self, lines: &[Line]) -> Result<()> {
        self.stdout
            .queue(terminal::Clear(terminal::ClearType::All))?;

        let mut current: Option<TextStyle> = None;
        for (y, line) in lines.iter().enumerate() {
            self.stdout.queue(cursor::MoveTo(0, y as u16))?;
            for span in &line.spans {
                if current != Some(span.style) {
                    self.apply_style(span.style)?;
                    current = Some(span.style);
                }
                self.stdout.queue(Print(span.text.as_str()))?;
            }
        }

        self.stdout.queue(ResetColor)?;
        self.stdout.queue(SetAttribute(Attribute::Reset))?;
        self.stdout.flush()?;
        Ok(())
    }

    /// Terminal bell, used as the sound cue when sfx is enabled.
    pub fn bell(&mut self) {
        let _ = self.stdout.write_all(b"\x07");
        let _ = self.stdout.flush();
    }

    fn apply_style(&mut self, style: TextStyle) -> Result<()> {
        self.stdout.queue(SetAttribute(Attribute::Reset))?;
        match style {
            TextStyle::Plain => {
                self.stdout.queue(SetForegroundColor(Color::Reset))?;
            }
            TextStyle::Title => {
                self.stdout.queue(SetForegroundColor(Color::Cyan))?;
                self.stdout.queue(SetAttribute(Attribute::Bold))?;
            }
            TextStyle::Dim => {
                self.stdout.queue(SetForegroundColor(Color::Reset))?;
                self.stdout.queue(SetAttribute(Attribute::Dim))?;
            }
            TextStyle::Accent => {
                self.stdout.queue(SetForegroundColor(Color::Yellow))?;
                self.stdout.queue(SetAttribute(Attribute::Bold))?;
            }
            TextStyle::CardBack => {
                self.stdout.queue(SetForegroundColor(Color::Blue))?;
            }
            TextStyle::CardFace => {
                self.stdout.queue(SetForegroundColor(Color::White))?;
                self.stdout.queue(SetAttribute(Attribute::Bold))?;
            }
            TextStyle::CardMatched => {
                self.stdout.queue(SetForegroundColor(Color::Green))?;
                self.stdout.queue(SetAttribute(Attribute::Dim))?;
            }
            TextStyle::Cursor => {
                self.stdout.queue(SetForegroundColor(Color::Magenta))?;
                self.stdout.queue(SetAttribute(Attribute::Bold))?;
            }
            TextStyle::Alert => {
                self.stdout.queue(SetForegroundColor(Color::Red))?;
                self.stdout.queue(SetAttribute(Attribute::Bold))?;
            }
        }
        Ok(())
    }
}

impl Default for Screen {
    fn default() -> Self {
        Self::new()
    }
}
