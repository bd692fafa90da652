use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum EngineState {
    Active,
    Won,
    Lost,
}

impl EngineState {
    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

impl Default for EngineState {
    fn default() -> Self {
        Self::Active
    }
}

/// Reveal bookkeeping for a single board. Every reveal discloses exactly one cell.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlayEngine {
    mine_layout: MineLayout,
    revealed: Array2<bool>,
    revealed_count: CellCount,
    state: EngineState,
    triggered_mine: Option<Coord2>,
}

impl PlayEngine {
    pub fn new(mine_layout: MineLayout) -> Self {
        let size = mine_layout.size();
        Self {
            mine_layout,
            revealed: Array2::default((size, size).to_nd_index()),
            revealed_count: 0,
            state: Default::default(),
            triggered_mine: None,
        }
    }

    pub fn state(&self) -> EngineState {
        self.state
    }

    pub fn is_finished(&self) -> bool {
        self.state.is_finished()
    }

    pub fn size(&self) -> Coord {
        self.mine_layout.size()
    }

    pub fn total_mines(&self) -> CellCount {
        self.mine_layout.mine_count()
    }

    pub fn revealed_count(&self) -> CellCount {
        self.revealed_count
    }

    /// Safe cells still hidden.
    pub fn cells_left(&self) -> CellCount {
        self.mine_layout.safe_cell_count() - self.revealed_count
    }

    pub fn triggered_mine(&self) -> Option<Coord2> {
        self.triggered_mine
    }

    pub fn has_mine_at(&self, coords: Coord2) -> bool {
        self.mine_layout.contains_mine(coords)
    }

    /// Panics when `coords` is off the board.
    pub fn is_revealed(&self, coords: Coord2) -> bool {
        self.revealed[coords.to_nd_index()]
    }

    /// Panics when `coords` is off the board, see [`PlayEngine::get`].
    pub fn cell_at(&self, coords: Coord2) -> CellState {
        match (self.is_revealed(coords), self.has_mine_at(coords)) {
            (false, _) => CellState::Hidden,
            (true, false) => CellState::Empty,
            (true, true) => CellState::Mine,
        }
    }

    pub fn get(&self, coords: Coord2) -> Option<CellState> {
        let coords = self.mine_layout.validate_coords(coords).ok()?;
        Some(self.cell_at(coords))
    }

    pub fn reveal(&mut self, coords: Coord2) -> Result<RevealOutcome> {
        let coords = self.mine_layout.validate_coords(coords)?;
        self.check_not_finished()?;

        if self.is_revealed(coords) {
            return Ok(RevealOutcome::NoChange);
        }

        self.revealed[coords.to_nd_index()] = true;
        self.revealed_count += 1;

        Ok(if self.mine_layout[coords] {
            self.triggered_mine = Some(coords);
            self.state = EngineState::Lost;
            RevealOutcome::HitMine
        } else if self.revealed_count == self.mine_layout.safe_cell_count() {
            self.state = EngineState::Won;
            RevealOutcome::Won
        } else {
            RevealOutcome::Revealed
        })
    }

    fn check_not_finished(&self) -> Result<()> {
        if self.state.is_finished() {
            Err(GameError::AlreadyEnded)
        } else {
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layout(size: Coord, mines: &[Coord2]) -> MineLayout {
        MineLayout::from_mine_coords(size, mines).unwrap()
    }

    fn safe_cells(engine: &PlayEngine) -> impl Iterator<Item = Coord2> + '_ {
        let size = engine.size();
        (0..size)
            .flat_map(move |row| (0..size).map(move |col| (row, col)))
            .filter(|&coords| !engine.has_mine_at(coords))
    }

    #[test]
    fn reveal_hits_mine_and_sets_triggered_cell() {
        let mut engine = PlayEngine::new(layout(2, &[(0, 0)]));

        let outcome = engine.reveal((0, 0)).unwrap();

        assert_eq!(outcome, RevealOutcome::HitMine);
        assert_eq!(engine.state(), EngineState::Lost);
        assert_eq!(engine.triggered_mine(), Some((0, 0)));
        assert_eq!(engine.cell_at((0, 0)), CellState::Mine);
    }

    #[test]
    fn reveal_opens_a_single_cell_only() {
        let mut engine = PlayEngine::new(layout(3, &[(2, 2)]));

        let outcome = engine.reveal((0, 0)).unwrap();

        assert_eq!(outcome, RevealOutcome::Revealed);
        assert_eq!(engine.revealed_count(), 1);
        assert_eq!(engine.cell_at((0, 0)), CellState::Empty);
        assert_eq!(engine.cell_at((0, 1)), CellState::Hidden);
        assert_eq!(engine.cell_at((1, 1)), CellState::Hidden);
    }

    #[test]
    fn revealing_twice_is_a_no_op() {
        let mut engine = PlayEngine::new(layout(3, &[(2, 2)]));
        engine.reveal((1, 0)).unwrap();
        let before = engine.clone();

        assert_eq!(engine.reveal((1, 0)).unwrap(), RevealOutcome::NoChange);
        assert_eq!(engine, before);
    }

    #[test]
    fn out_of_bounds_reveal_is_rejected() {
        let mut engine = PlayEngine::new(layout(3, &[(2, 2)]));

        assert_eq!(engine.reveal((3, 0)), Err(GameError::InvalidCoords));
        assert_eq!(engine.revealed_count(), 0);
    }

    #[test]
    fn level_one_board_needs_every_safe_cell() {
        let mines = [(0, 0), (1, 3), (2, 5), (4, 4), (5, 1)];
        let mut engine = PlayEngine::new(layout(6, &mines));
        let cells: alloc::vec::Vec<_> = safe_cells(&engine).collect();
        assert_eq!(cells.len(), 31);

        let (last, rest) = cells.split_last().unwrap();
        for &coords in rest {
            assert_eq!(engine.reveal(coords).unwrap(), RevealOutcome::Revealed);
        }
        assert_eq!(engine.cells_left(), 1);
        assert_eq!(engine.reveal(*last).unwrap(), RevealOutcome::Won);
        assert_eq!(engine.revealed_count(), 31);
        assert!(engine.is_finished());
    }

    #[test]
    fn get_checks_bounds() {
        let mut engine = PlayEngine::new(layout(3, &[(2, 2)]));
        engine.reveal((0, 1)).unwrap();

        assert_eq!(engine.get((0, 1)), Some(CellState::Empty));
        assert_eq!(engine.get((2, 2)), Some(CellState::Hidden));
        assert_eq!(engine.get((3, 0)), None);
        assert_eq!(engine.get((0, 3)), None);
    }

    #[test]
    fn finished_board_rejects_moves() {
        let mut engine = PlayEngine::new(layout(2, &[(0, 0)]));
        engine.reveal((0, 0)).unwrap();

        assert_eq!(engine.reveal((1, 1)), Err(GameError::AlreadyEnded));
        assert_eq!(engine.cell_at((1, 1)), CellState::Hidden);
    }
}
