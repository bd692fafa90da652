use serde::{Deserialize, Serialize};

/// Player-visible state of a single cell.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum CellState {
    Hidden,
    Empty,
    Mine,
}

impl CellState {
    pub const fn is_revealed(self) -> bool {
        !matches!(self, Self::Hidden)
    }

    /// Text drawn on top of the cell.
    pub const fn glyph(self) -> &'static str {
        match self {
            Self::Hidden => "*",
            Self::Empty => "E",
            Self::Mine => "M",
        }
    }
}

impl Default for CellState {
    fn default() -> Self {
        Self::Hidden
    }
}
