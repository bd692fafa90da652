/// Single coordinate axis used for board side length, rows and columns.
pub type Coord = u8;

/// Count type used for mine counts and total-cell counts.
pub type CellCount = u16;

/// Two-dimensional coordinates `(row, col)`.
pub type Coord2 = (Coord, Coord);

/// Level number, starting at 1.
pub type Level = u32;

/// Coin balance.
pub type Coins = u32;

/// Side length added to the level number to get the board side length.
pub const BASE_BOARD_SIZE: Coord = 5;

pub trait ToNdIndex {
    type Output;
    fn to_nd_index(self) -> Self::Output;
}

impl ToNdIndex for Coord2 {
    type Output = [usize; 2];

    fn to_nd_index(self) -> Self::Output {
        [self.0.into(), self.1.into()]
    }
}

pub const fn mult(a: Coord, b: Coord) -> CellCount {
    let a = a as CellCount;
    let b = b as CellCount;
    a.saturating_mul(b)
}

/// Board side length for `level`, saturating at [`Coord::MAX`].
pub const fn board_size_for_level(level: Level) -> Coord {
    let size = (BASE_BOARD_SIZE as Level).saturating_add(level);
    if size > Coord::MAX as Level {
        Coord::MAX
    } else {
        size as Coord
    }
}
