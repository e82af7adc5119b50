//! Pixel field storage, neighborhood reads and the scroll-left step.
//!
//! Cells are stored row-major: `index = y * width + x`, with `x` the column
//! and `y` the row. Dimensions are fixed at creation.

use crate::config::MAX_GRID_SIZE;
use crate::error::{AutomatonError, Result};

/// A fixed-size grid of integer cell values.
///
/// Values are unclamped; they only become colors when a palette renders them.
#[derive(Clone, Debug)]
pub struct PixelField {
    pub width: usize,
    pub height: usize,
    pub cells: Vec<i64>,
    /// Number of columns appended so far. Also the column index fed to the
    /// generator for the next column.
    pub generation: u64,
}

/// Up to four neighbor values, in left, right, up, down order (missing
/// neighbors at edges are skipped, not zero-filled).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Neighborhood {
    values: [i64; 4],
    len: usize,
}

impl Neighborhood {
    #[inline]
    fn push(&mut self, value: i64) {
        if self.len < self.values.len() {
            self.values[self.len] = value;
            self.len += 1;
        }
    }

    #[inline]
    pub fn as_slice(&self) -> &[i64] {
        &self.values[..self.len]
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

/// Create a zero-filled field.
pub fn create_field(width: usize, height: usize) -> Result<PixelField> {
    for edge in [width, height] {
        if edge == 0 || edge > MAX_GRID_SIZE {
            return Err(AutomatonError::InvalidSize(edge));
        }
    }
    Ok(PixelField {
        width,
        height,
        cells: vec![0; width * height],
        generation: 0,
    })
}

/// Calculate the linear index for a 2D coordinate.
#[inline]
pub fn index_of(field: &PixelField, x: usize, y: usize) -> usize {
    y * field.width + x
}

/// Check if signed coordinates are within field bounds.
#[inline]
pub fn in_bounds(field: &PixelField, x: isize, y: isize) -> bool {
    x >= 0 && (x as usize) < field.width && y >= 0 && (y as usize) < field.height
}

/// The 4-neighborhood of `(x, y)`: left, right, up, down.
pub fn neighbors_of(field: &PixelField, x: usize, y: usize) -> Neighborhood {
    let mut hood = Neighborhood::default();
    for (dx, dy) in [(-1isize, 0isize), (1, 0), (0, -1), (0, 1)] {
        let nx = x as isize + dx;
        let ny = y as isize + dy;
        if in_bounds(field, nx, ny) {
            hood.push(field.cells[index_of(field, nx as usize, ny as usize)]);
        }
    }
    hood
}

/// Values of the rightmost column next to row `y`: same row, row above,
/// row below. Empty until the first column has been appended.
pub fn edge_neighbors(field: &PixelField, y: usize) -> Neighborhood {
    let mut hood = Neighborhood::default();
    if field.generation == 0 || y >= field.height {
        return hood;
    }
    let x = field.width - 1;
    hood.push(field.cells[index_of(field, x, y)]);
    if y > 0 {
        hood.push(field.cells[index_of(field, x, y - 1)]);
    }
    if y + 1 < field.height {
        hood.push(field.cells[index_of(field, x, y + 1)]);
    }
    hood
}

/// Copy out column `x`, top to bottom.
pub fn column(field: &PixelField, x: usize) -> Vec<i64> {
    (0..field.height)
        .map(|y| field.cells[index_of(field, x, y)])
        .collect()
}

/// Shift every row one cell to the left, dropping column 0, and write
/// `new_column` into the rightmost column.
///
/// Fails without touching the field if `new_column` is not exactly one
/// value per row.
pub fn scroll_and_append(field: &mut PixelField, new_column: &[i64]) -> Result<()> {
    if new_column.len() != field.height {
        return Err(AutomatonError::DimensionMismatch {
            expected: field.height,
            actual: new_column.len(),
        });
    }

    let width = field.width;
    for (row, &value) in field.cells.chunks_exact_mut(width).zip(new_column) {
        row.copy_within(1.., 0);
        row[width - 1] = value;
    }

    field.generation += 1;
    Ok(())
}


#[cfg(test)]
mod property_tests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn scroll_preserves_shape_and_shifts(
            width in 2usize..12,
            height in 1usize..12,
            steps in 1usize..20,
        ) {
            let mut field = create_field(width, height).unwrap();
            for step in 0..steps {
                let second_before = column(&field, 1);
                let incoming: Vec<i64> = (0..height).map(|y| (step * 100 + y) as i64).collect();
                scroll_and_append(&mut field, &incoming).unwrap();

                prop_assert_eq!(field.width, width);
                prop_assert_eq!(field.height, height);
                prop_assert_eq!(field.cells.len(), width * height);
                prop_assert_eq!(column(&field, 0), second_before);
                prop_assert_eq!(column(&field, width - 1), incoming);
            }
            prop_assert_eq!(field.generation, steps as u64);
        }
    }
}
