use serde::{Deserialize, Serialize};

use crate::*;

/// Pixel layout of the board: square cells separated by a margin, with the margin also
/// running around the outside edge.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BoardGeometry {
    pub box_size: f64,
    pub margin: f64,
}

impl BoardGeometry {
    pub const DEFAULT: Self = Self::new(40., 2.);

    pub const fn new(box_size: f64, margin: f64) -> Self {
        Self { box_size, margin }
    }

    pub fn pitch(&self) -> f64 {
        self.box_size + self.margin
    }

    /// Width (and height) of a drawing surface holding a `size`×`size` board.
    pub fn extent(&self, size: Coord) -> f64 {
        f64::from(size) * self.pitch() + self.margin
    }

    /// Top-left corner `(x, y)` of the cell at `(row, col)`.
    pub fn cell_origin(&self, (row, col): Coord2) -> (f64, f64) {
        (
            f64::from(col) * self.pitch() + self.margin,
            f64::from(row) * self.pitch() + self.margin,
        )
    }

    /// Maps a point relative to the surface's top-left corner to the cell under it.
    pub fn cell_at(&self, x: f64, y: f64, size: Coord) -> Option<Coord2> {
        if !(x.is_finite() && y.is_finite()) || x < 0. || y < 0. {
            return None;
        }

        let col = (x / self.pitch()) as u64;
        let row = (y / self.pitch()) as u64;
        let size = u64::from(size);
        (row < size && col < size).then(|| (row as Coord, col as Coord))
    }
}

impl Default for BoardGeometry {
    fn default() -> Self {
        Self::DEFAULT
    }
}
