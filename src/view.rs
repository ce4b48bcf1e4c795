// Copyright (c) 2026 rezky_nightky

use crate::frame::{Frame, Tile};
use crate::grid::Grid;
use crate::palette::Palette;
use crate::presentation::Layout;

const HINT: &str = " space pause · f fullscreen · q quit ";
const PAUSED: &str = " PAUSED ";

/// Copies the grid into `frame` at the positions given by `layout`.
pub fn paint_grid(frame: &mut Frame, grid: &Grid, layout: &Layout, palette: &Palette) {
    let blank = frame.blank();
    for (ci, column) in grid.columns().iter().enumerate() {
        for (ri, cell) in column.cells().iter().enumerate() {
            let Some((x, y)) = layout.position(ci as u16, ri as u16) else {
                continue;
            };
            let tile = match palette.style(cell.shade) {
                Some((fg, bold)) => Tile {
                    ch: cell.ch,
                    fg,
                    bg: blank.bg,
                    bold,
                },
                None => blank,
            };
            frame.set(x, y, tile);
        }
    }
}

/// Repaints everything: grid first, then chrome on top so the pause marker
/// stays readable where it overlaps grid tiles in fullscreen.
pub fn paint_scene(frame: &mut Frame, grid: &Grid, layout: &Layout, palette: &Palette, paused: bool) {
    frame.clear();
    paint_grid(frame, grid, layout, palette);
    paint_chrome(frame, grid, layout, palette, paused);
}

/// Box around a framed grid, with the key hint below and a pause marker above.
pub fn paint_chrome(frame: &mut Frame, grid: &Grid, layout: &Layout, palette: &Palette, paused: bool) {
    let Some((left, top, right, bottom)) = layout.border_rect(grid.cols(), grid.rows()) else {
        if paused {
            frame.put_str(0, 0, PAUSED, palette.accent, true);
        }
        return;
    };
    let bg = frame.blank().bg;
    let edge = |ch| Tile {
        ch,
        fg: palette.accent,
        bg,
        bold: false,
    };

    for x in left + 1..right {
        frame.set(x, top, edge('─'));
        frame.set(x, bottom, edge('─'));
    }
    for y in top + 1..bottom {
        frame.set(left, y, edge('│'));
        frame.set(right, y, edge('│'));
    }
    frame.set(left, top, edge('┌'));
    frame.set(right, top, edge('┐'));
    frame.set(left, bottom, edge('└'));
    frame.set(right, bottom, edge('┘'));

    let inner = right.saturating_sub(left) as usize;
    if HINT.chars().count() + 2 <= inner {
        frame.put_str(left + 2, bottom, HINT, palette.accent, false);
    }
    if paused {
        frame.put_str(left + 2, top, PAUSED, palette.accent, true);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cell::Shade;
    use crate::charset::Alphabet;
    use crate::palette::{build_palette, ColorMode, ColorScheme};
    use crate::random::SeededRandom;

    fn setup() -> (Grid, Palette) {
        let mut rng = SeededRandom::new(Some(1));
        let grid = Grid::build(4, 3, Alphabet::LATIN, &mut rng);
        let palette = build_palette(ColorScheme::Green, ColorMode::Color256, false);
        (grid, palette)
    }

    #[test]
    fn cells_land_on_layout_positions() {
        let (grid, palette) = setup();
        let layout = Layout::framed(20, 7, 4, 3);
        let mut frame = Frame::new(20, 7, palette.bg);
        paint_grid(&mut frame, &grid, &layout, &palette);

        for ci in 0..4 {
            for ri in 0..3 {
                let (x, y) = layout.position(ci, ri).unwrap();
                assert_eq!(frame.get(x, y).unwrap().ch, grid.cell(ci, ri).unwrap().ch);
            }
        }
    }

    #[test]
    fn hidden_cells_are_blank() {
        let (mut grid, palette) = setup();
        grid.column_mut(0).unwrap().cells_mut()[0].shade = Shade::Hidden;
        let layout = Layout::fullscreen(4, 3, 4, 3).unwrap();
        let mut frame = Frame::new(4, 3, palette.bg);
        paint_grid(&mut frame, &grid, &layout, &palette);
        assert_eq!(*frame.get(0, 0).unwrap(), frame.blank());
        assert_ne!(frame.get(1, 0).unwrap().ch, ' ');
    }

    #[test]
    fn chrome_draws_corners_and_pause_marker() {
        let (grid, palette) = setup();
        let layout = Layout::framed(20, 7, 4, 3);
        let mut frame = Frame::new(20, 7, palette.bg);
        paint_chrome(&mut frame, &grid, &layout, &palette, true);
        let (l, t, r, b) = layout.border_rect(4, 3).unwrap();
        assert_eq!(frame.get(l, t).unwrap().ch, '┌');
        assert_eq!(frame.get(r, b).unwrap().ch, '┘');
        assert_eq!(frame.get(l + 3, t).unwrap().ch, 'P');
    }

    fn row_text(frame: &Frame, y: u16, x: u16, len: u16) -> String {
        (x..x + len).map(|x| frame.get(x, y).unwrap().ch).collect()
    }

    #[test]
    fn pause_marker_survives_fullscreen_grid() {
        let mut rng = SeededRandom::new(Some(7));
        let mut grid = Grid::build(40, 25, Alphabet::LATIN, &mut rng);
        grid.column_mut(1).unwrap().cells_mut()[0].shade = Shade::Hidden;
        let palette = build_palette(ColorScheme::Green, ColorMode::Color256, false);
        let layout = Layout::fullscreen(160, 50, 40, 25).unwrap();
        let mut frame = Frame::new(160, 50, palette.bg);

        paint_scene(&mut frame, &grid, &layout, &palette, true);
        assert_eq!(row_text(&frame, 0, 0, 8), PAUSED);

        let (x, y) = layout.position(0, 0).unwrap();
        assert!(y == 0 && x < 8);

        paint_scene(&mut frame, &grid, &layout, &palette, false);
        assert_eq!(frame.get(x, y).unwrap().ch, grid.cell(0, 0).unwrap().ch);
    }
}
