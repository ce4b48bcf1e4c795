// Copyright (c) 2026 rezky_nightky

/// How a grid cell is currently shown.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Shade {
    /// Never touched by a drop.
    Lit,
    /// Leading cell of a drop; its glyph keeps flickering.
    Head,
    /// Trailing cell of a drop, opacity in percent.
    Fade(u8),
    Hidden,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Cell {
    pub ch: char,
    pub shade: Shade,
}

impl Cell {
    pub fn new(ch: char) -> Self {
        Self {
            ch,
            shade: Shade::Lit,
        }
    }

    pub fn is_head(&self) -> bool {
        self.shade == Shade::Head
    }
}
