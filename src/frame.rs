// Copyright (c) 2026 rezky_nightky

use crossterm::style::Color;

/// One character cell on screen.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Tile {
    pub ch: char,
    pub fg: Option<Color>,
    pub bg: Option<Color>,
    pub bold: bool,
}

impl Tile {
    pub fn blank(bg: Option<Color>) -> Self {
        Self {
            ch: ' ',
            fg: None,
            bg,
            bold: false,
        }
    }
}

/// Off-screen copy of the terminal that remembers which tiles changed.
#[derive(Clone, Debug)]
pub struct Frame {
    pub width: u16,
    pub height: u16,
    tiles: Vec<Tile>,
    blank: Tile,
    dirty_all: bool,
    dirty_map: Vec<bool>,
    dirty: Vec<usize>,
}

impl Frame {
    pub fn new(width: u16, height: u16, bg: Option<Color>) -> Self {
        let len = width as usize * height as usize;
        let blank = Tile::blank(bg);
        Self {
            width,
            height,
            tiles: vec![blank; len],
            blank,
            dirty_all: true,
            dirty_map: vec![false; len],
            dirty: Vec::new(),
        }
    }

    /// Blanks every tile and forces the next draw to repaint everything.
    pub fn clear(&mut self) {
        self.tiles.fill(self.blank);
        self.dirty_all = true;
        self.dirty_map.fill(false);
        self.dirty.clear();
    }

    pub fn is_dirty_all(&self) -> bool {
        self.dirty_all
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty_all || !self.dirty.is_empty()
    }

    pub fn dirty_indices(&self) -> &[usize] {
        &self.dirty
    }

    pub fn clear_dirty(&mut self) {
        if self.dirty_all {
            self.dirty_all = false;
            self.dirty_map.fill(false);
        } else {
            for &i in &self.dirty {
                self.dirty_map[i] = false;
            }
        }
        self.dirty.clear();
    }

    pub fn index(&self, x: u16, y: u16) -> Option<usize> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(y as usize * self.width as usize + x as usize)
    }

    #[cfg(test)]
    pub fn get(&self, x: u16, y: u16) -> Option<&Tile> {
        self.index(x, y).map(|i| &self.tiles[i])
    }

    pub fn tile_at_index(&self, i: usize) -> Tile {
        self.tiles.get(i).copied().unwrap_or(self.blank)
    }

    pub fn blank(&self) -> Tile {
        self.blank
    }

    /// Writes a tile; out-of-bounds positions are clipped.
    pub fn set(&mut self, x: u16, y: u16, tile: Tile) {
        let Some(i) = self.index(x, y) else {
            return;
        };
        if self.tiles[i] == tile {
            return;
        }
        self.tiles[i] = tile;
        if !self.dirty_all && !self.dirty_map[i] {
            self.dirty_map[i] = true;
            self.dirty.push(i);
        }
    }

    pub fn put_str(&mut self, x: u16, y: u16, s: &str, fg: Option<Color>, bold: bool) {
        let bg = self.blank.bg;
        for (i, ch) in s.chars().enumerate() {
            let Some(cx) = x.checked_add(i as u16) else {
                break;
            };
            self.set(cx, y, Tile { ch, fg, bg, bold });
        }
    }
}
