// Copyright (c) 2026 rezky_nightky

use std::io::{stdout, Result, Stdout, Write};

use crossterm::{
    cursor, event,
    style::{
        Attribute, Color, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor,
    },
    terminal, ExecutableCommand, QueueableCommand,
};

use crate::frame::{Frame, Tile};

/// Raw-mode alternate screen; restored on drop.
pub struct Terminal {
    stdout: Stdout,
    pen: Pen,
}

/// Style currently active on the terminal, to skip redundant escapes.
#[derive(Default)]
struct Pen {
    fg: Option<Color>,
    bg: Option<Color>,
    bold: bool,
    pos: Option<(u16, u16)>,
}

impl Terminal {
    pub fn new() -> Result<Self> {
        let mut out = stdout();
        terminal::enable_raw_mode()?;
        let init_res: Result<()> = (|| {
            out.execute(terminal::EnterAlternateScreen)?;
            out.execute(cursor::Hide)?;
            let _ = out.execute(terminal::DisableLineWrap);
            out.execute(SetAttribute(Attribute::Reset))?;
            out.execute(ResetColor)?;
            out.execute(terminal::Clear(terminal::ClearType::All))?;
            out.flush()?;
            Ok(())
        })();
        if let Err(e) = init_res {
            restore_terminal_best_effort();
            return Err(e);
        }
        Ok(Self {
            stdout: out,
            pen: Pen::default(),
        })
    }

    pub fn size(&self) -> Result<(u16, u16)> {
        terminal::size()
    }

    pub fn poll_event(timeout: std::time::Duration) -> Result<bool> {
        event::poll(timeout)
    }

    pub fn read_event() -> Result<event::Event> {
        event::read()
    }

    /// Writes the tiles that changed since the last draw, or all of them
    /// when the frame was cleared.
    pub fn draw(&mut self, frame: &mut Frame) -> Result<()> {
        self.pen = Pen::default();
        self.stdout.queue(SetAttribute(Attribute::Reset))?;
        self.stdout.queue(ResetColor)?;

        if frame.is_dirty_all() {
            self.stdout
                .queue(terminal::Clear(terminal::ClearType::All))?;
            for y in 0..frame.height {
                for x in 0..frame.width {
                    let idx = y as usize * frame.width as usize + x as usize;
                    self.put(x, y, frame.tile_at_index(idx))?;
                }
            }
        } else {
            let width = frame.width as usize;
            let mut dirty = frame.dirty_indices().to_vec();
            dirty.sort_unstable();
            for idx in dirty {
                let x = (idx % width) as u16;
                let y = (idx / width) as u16;
                self.put(x, y, frame.tile_at_index(idx))?;
            }
        }

        self.stdout.queue(SetAttribute(Attribute::Reset))?;
        self.stdout.queue(ResetColor)?;
        self.stdout.flush()?;
        frame.clear_dirty();
        Ok(())
    }

    fn put(&mut self, x: u16, y: u16, tile: Tile) -> Result<()> {
        if self.pen.pos != Some((x, y)) {
            self.stdout.queue(cursor::MoveTo(x, y))?;
        }
        if tile.fg != self.pen.fg {
            self.stdout
                .queue(SetForegroundColor(tile.fg.unwrap_or(Color::Reset)))?;
            self.pen.fg = tile.fg;
        }
        if tile.bg != self.pen.bg {
            self.stdout
                .queue(SetBackgroundColor(tile.bg.unwrap_or(Color::Reset)))?;
            self.pen.bg = tile.bg;
        }
        if tile.bold != self.pen.bold {
            self.stdout.queue(SetAttribute(if tile.bold {
                Attribute::Bold
            } else {
                Attribute::NormalIntensity
            }))?;
            self.pen.bold = tile.bold;
        }
        self.stdout.queue(Print(tile.ch))?;
        // Wide glyphs may advance the cursor by two; only trust narrow ones.
        self.pen.pos = if tile.ch.is_ascii() {
            Some((x.saturating_add(1), y))
        } else {
            None
        };
        Ok(())
    }
}

impl Drop for Terminal {
    fn drop(&mut self) {
        restore_terminal_best_effort();
    }
}

pub fn restore_terminal_best_effort() {
    let mut out = stdout();
    let _ = out.execute(SetAttribute(Attribute::Reset));
    let _ = out.execute(ResetColor);
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::EnableLineWrap);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();
    let _ = out.flush();
}
