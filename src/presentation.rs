// Copyright (c) 2026 rezky_nightky

use std::io;

use thiserror::Error;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mode {
    /// Grid boxed in the middle of the terminal.
    Framed,
    /// Grid stretched over the whole terminal.
    Fullscreen,
}

#[derive(Debug, Error)]
pub enum PresentationError {
    #[error("terminal is {width}x{height}, fullscreen needs at least {cols}x{rows}")]
    TooSmall {
        width: u16,
        height: u16,
        cols: u16,
        rows: u16,
    },
    #[error("failed to query terminal size: {0}")]
    Size(#[from] io::Error),
}

/// Where grid cell `(col, row)` lands on screen.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Layout {
    pub origin_x: u16,
    pub origin_y: u16,
    pub step_x: u16,
    pub step_y: u16,
    pub border: bool,
}

impl Layout {
    pub fn framed(width: u16, height: u16, cols: u16, rows: u16) -> Self {
        let span_x = span(cols, 2) as u32 + 2;
        let span_y = span(rows, 1) as u32 + 2;
        Self {
            origin_x: (centered(width, span_x) + 1) as u16,
            origin_y: (centered(height, span_y) + 1) as u16,
            step_x: 2,
            step_y: 1,
            border: true,
        }
    }

    pub fn fullscreen(
        width: u16,
        height: u16,
        cols: u16,
        rows: u16,
    ) -> Result<Self, PresentationError> {
        if width < cols || height < rows || cols == 0 || rows == 0 {
            return Err(PresentationError::TooSmall {
                width,
                height,
                cols,
                rows,
            });
        }
        let step_x = width / cols;
        let step_y = height / rows;
        Ok(Self {
            origin_x: centered(width, span(cols, step_x) as u32) as u16,
            origin_y: centered(height, span(rows, step_y) as u32) as u16,
            step_x,
            step_y,
            border: false,
        })
    }

    /// Screen position of a grid cell; `None` if it does not fit in `u16`.
    pub fn position(&self, col: u16, row: u16) -> Option<(u16, u16)> {
        let x = self.origin_x.checked_add(col.checked_mul(self.step_x)?)?;
        let y = self.origin_y.checked_add(row.checked_mul(self.step_y)?)?;
        Some((x, y))
    }

    /// Inclusive corners of the box drawn around a framed grid.
    pub fn border_rect(&self, cols: u16, rows: u16) -> Option<(u16, u16, u16, u16)> {
        if !self.border {
            return None;
        }
        let left = self.origin_x.checked_sub(1)?;
        let top = self.origin_y.checked_sub(1)?;
        let right = left.saturating_add(span(cols, self.step_x)).saturating_add(1);
        let bottom = top.saturating_add(span(rows, self.step_y)).saturating_add(1);
        Some((left, top, right, bottom))
    }
}

/// Screen cells covered by `n` items `step` apart.
fn span(n: u16, step: u16) -> u16 {
    if n == 0 {
        return 0;
    }
    (n - 1).saturating_mul(step).saturating_add(1)
}

fn centered(avail: u16, used: u32) -> u32 {
    (avail as u32).saturating_sub(used) / 2
}

/// Tracks the active mode and its layout for the current terminal size.
#[derive(Clone, Debug)]
pub struct Presentation {
    mode: Mode,
    layout: Layout,
    cols: u16,
    rows: u16,
}

impl Presentation {
    pub fn new(mode: Mode, width: u16, height: u16, cols: u16, rows: u16) -> Self {
        let mut p = Self {
            mode: Mode::Framed,
            layout: Layout::framed(width, height, cols, rows),
            cols,
            rows,
        };
        if mode == Mode::Fullscreen {
            if let Err(e) = p.enter_fullscreen(width, height) {
                log::warn!("starting framed: {}", e);
            }
        }
        p
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    /// Switches between framed and fullscreen. On error nothing changes.
    pub fn toggle_fullscreen(
        &mut self,
        size: io::Result<(u16, u16)>,
    ) -> Result<Mode, PresentationError> {
        let (width, height) = size?;
        match self.mode {
            Mode::Framed => self.enter_fullscreen(width, height)?,
            Mode::Fullscreen => {
                self.mode = Mode::Framed;
                self.layout = Layout::framed(width, height, self.cols, self.rows);
            }
        }
        Ok(self.mode)
    }

    /// Recomputes the layout after a terminal resize, dropping back to
    /// framed when fullscreen no longer fits.
    pub fn resize(&mut self, width: u16, height: u16) {
        if self.mode == Mode::Fullscreen {
            match Layout::fullscreen(width, height, self.cols, self.rows) {
                Ok(layout) => {
                    self.layout = layout;
                    return;
                }
                Err(e) => {
                    log::warn!("leaving fullscreen after resize: {}", e);
                    self.mode = Mode::Framed;
                }
            }
        }
        self.layout = Layout::framed(width, height, self.cols, self.rows);
    }

    fn enter_fullscreen(&mut self, width: u16, height: u16) -> Result<(), PresentationError> {
        self.layout = Layout::fullscreen(width, height, self.cols, self.rows)?;
        self.mode = Mode::Fullscreen;
        Ok(())
    }
}
