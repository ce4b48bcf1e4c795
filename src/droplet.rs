// Copyright (c) 2026 rezky_nightky

use crate::cell::Shade;
use crate::grid::Column;
use crate::random::RandomSource;

pub const MIN_CADENCE_MS: u32 = 50;
pub const MAX_CADENCE_MS: u32 = 500;

/// A highlight sweeping down one column.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Droplet {
    pub column: u16,
    /// Next row the head is painted at.
    pub row: u16,
    /// Length of the fading trail above the head.
    pub size: u16,
    pub cadence_ms: u64,
    pub created_ms: u64,
    pub last_update_ms: Option<u64>,
}

impl Droplet {
    pub fn spawn<R: RandomSource + ?Sized>(column: u16, rows: u16, now_ms: u64, rng: &mut R) -> Self {
        let rows = rows as u32;
        Self {
            column,
            row: rng.range(0, rows) as u16,
            size: (rng.range(0, rows) + 1) as u16,
            cadence_ms: rng.range(MIN_CADENCE_MS, MAX_CADENCE_MS) as u64,
            created_ms: now_ms,
            last_update_ms: None,
        }
    }

    pub fn is_due(&self, now_ms: u64) -> bool {
        match self.last_update_ms {
            None => true,
            Some(last) => now_ms.saturating_sub(last) >= self.cadence_ms,
        }
    }

    pub fn has_fallen_off(&self, rows: u16) -> bool {
        self.row >= rows
    }

    /// Head at `row`, fading trail of `size` cells above it, everything else hidden.
    pub fn paint(&self, column: &mut Column) {
        for (i, cell) in column.cells_mut().iter_mut().enumerate() {
            let i = i as u16;
            cell.shade = if i == self.row {
                Shade::Head
            } else if i < self.row && self.row - i <= self.size {
                Shade::Fade(fade_opacity(self.row - i, self.size))
            } else {
                Shade::Hidden
            };
        }
    }
}

/// Opacity in percent for a trail cell `distance` rows above the head.
pub fn fade_opacity(distance: u16, size: u16) -> u8 {
    let span = size as u32 + 1;
    let d = (distance as u32).min(span);
    (100 - (100 * d) / span) as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::charset::Alphabet;
    use crate::grid::Grid;
    use crate::random::scripted::Scripted;
    use crate::random::SeededRandom;

    fn drop_at(row: u16, size: u16) -> Droplet {
        Droplet {
            column: 0,
            row,
            size,
            cadence_ms: 100,
            created_ms: 0,
            last_update_ms: None,
        }
    }

    #[test]
    fn spawn_parameters_are_in_range() {
        let mut rng = SeededRandom::new(Some(5));
        for _ in 0..2_000 {
            let d = Droplet::spawn(3, 25, 77, &mut rng);
            assert_eq!(d.column, 3);
            assert!(d.row < 25);
            assert!((1..=25).contains(&d.size));
            assert!((50..500).contains(&d.cadence_ms));
            assert_eq!(d.created_ms, 77);
            assert_eq!(d.last_update_ms, None);
        }
    }

    #[test]
    fn due_immediately_then_on_cadence() {
        let mut d = drop_at(0, 3);
        assert!(d.is_due(0));
        d.last_update_ms = Some(1_000);
        assert!(!d.is_due(1_099));
        assert!(d.is_due(1_100));
        assert!(!d.is_due(500));
    }

    #[test]
    fn paint_sets_head_trail_and_hidden() {
        let mut rng = Scripted::new(&[], 0.0);
        let mut grid = Grid::build(1, 10, Alphabet::BINARY, &mut rng);
        let col = grid.column_mut(0).unwrap();
        drop_at(5, 2).paint(col);

        let shades: Vec<Shade> = col.cells().iter().map(|c| c.shade).collect();
        assert_eq!(shades[5], Shade::Head);
        assert_eq!(shades[4], Shade::Fade(67));
        assert_eq!(shades[3], Shade::Fade(34));
        for i in [0, 1, 2, 6, 7, 8, 9] {
            assert_eq!(shades[i], Shade::Hidden, "row {}", i);
        }
    }

    #[test]
    fn fade_decreases_with_distance() {
        let size = 8;
        let mut prev = 100;
        for d in 1..=size {
            let o = fade_opacity(d, size);
            assert!(o < prev);
            assert!(o > 0);
            prev = o;
        }
    }

    #[test]
    fn falls_off_at_row_count() {
        assert!(!drop_at(9, 1).has_fallen_off(10));
        assert!(drop_at(10, 1).has_fallen_off(10));
    }
}
