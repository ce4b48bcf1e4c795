// Copyright (c) 2026 rezky_nightky

use crate::cell::Cell;
use crate::charset::Alphabet;
use crate::random::RandomSource;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Column {
    cells: Vec<Cell>,
}

impl Column {
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn cells_mut(&mut self) -> &mut [Cell] {
        &mut self.cells
    }
}

/// Fixed `cols x rows` block of glyph cells, stored column-major.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    rows: u16,
    columns: Vec<Column>,
}

impl Grid {
    pub fn build<R: RandomSource + ?Sized>(
        cols: u16,
        rows: u16,
        alphabet: Alphabet,
        rng: &mut R,
    ) -> Self {
        let mut columns = Vec::with_capacity(cols as usize);
        for _ in 0..cols {
            let mut cells = Vec::with_capacity(rows as usize);
            for _ in 0..rows {
                cells.push(Cell::new(alphabet.random_char(&mut *rng)));
            }
            columns.push(Column { cells });
        }
        Self { rows, columns }
    }

    pub fn cols(&self) -> u16 {
        self.columns.len() as u16
    }

    pub fn rows(&self) -> u16 {
        self.rows
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column_mut(&mut self, col: u16) -> Option<&mut Column> {
        self.columns.get_mut(col as usize)
    }

    #[cfg(test)]
    pub fn cell(&self, col: u16, row: u16) -> Option<&Cell> {
        self.columns.get(col as usize)?.cells.get(row as usize)
    }

    pub fn cells_mut(&mut self) -> impl Iterator<Item = &mut Cell> {
        self.columns.iter_mut().flat_map(|c| c.cells.iter_mut())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cell::Shade;
    use crate::random::SeededRandom;

    #[test]
    fn build_makes_cols_by_rows_lit_cells() {
        let mut rng = SeededRandom::new(Some(1));
        let g = Grid::build(40, 25, Alphabet::LATIN, &mut rng);
        assert_eq!(g.cols(), 40);
        assert_eq!(g.rows(), 25);
        assert!(g.columns().iter().all(|c| c.cells().len() == 25));
        assert!(g
            .columns()
            .iter()
            .flat_map(|c| c.cells())
            .all(|c| c.shade == Shade::Lit && Alphabet::LATIN.contains(c.ch)));
    }

    #[test]
    fn cell_lookup_is_bounds_checked() {
        let mut rng = SeededRandom::new(Some(1));
        let g = Grid::build(3, 4, Alphabet::BINARY, &mut rng);
        assert!(g.cell(2, 3).is_some());
        assert!(g.cell(3, 0).is_none());
        assert!(g.cell(0, 4).is_none());
    }
}
