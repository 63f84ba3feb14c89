use mineproof_core::{BoardSize, BoardView, CellView, Coord};
use rand::prelude::*;
use rand_pcg::Pcg64Mcg;

use crate::{GameConfig, GameError};

/// The ground truth of a single game.
///
/// Mines are placed lazily on the first reveal so that, with first-click
/// safety, the opening cell and its neighbours are never mined. Placement is
/// driven by a seeded generator, so a seed reproduces the same game for the
/// same opening move.
///
/// # Examples
///
/// ```
/// use mineproof_core::{CellView, Coord};
/// use mineproof_game::{Board, GameConfig};
///
/// let mut board = Board::new(GameConfig::BEGINNER, 42);
/// let revealed = board.reveal(Coord::new(4, 4))?;
///
/// // The opening cell is a zero, so the reveal floods outward.
/// assert!(revealed.len() > 1);
/// assert_eq!(board.view()[Coord::new(4, 4)], CellView::Revealed(0));
/// assert!(!board.lost());
/// # Ok::<(), mineproof_game::GameError>(())
/// ```
#[derive(Debug, Clone)]
pub struct Board {
    config: GameConfig,
    mines: Vec<bool>,
    counts: Vec<u8>,
    cells: Vec<CellView>,
    mines_placed: bool,
    safe_left: usize,
    lost: bool,
    rng: Pcg64Mcg,
}

impl Board {
    /// Creates a board whose mines are drawn from `seed`.
    ///
    /// Without first-click safety the mines are placed immediately.
    #[must_use]
    pub fn new(config: GameConfig, seed: u64) -> Self {
        let size = config.size();
        let mut board = Self {
            config,
            mines: vec![false; size.cell_count()],
            counts: vec![0; size.cell_count()],
            cells: vec![CellView::Hidden; size.cell_count()],
            mines_placed: false,
            safe_left: config.safe_cells(),
            lost: false,
            rng: Pcg64Mcg::seed_from_u64(seed),
        };
        if !config.first_click_safe() {
            board.place_random_mines(None);
        }
        board
    }

    /// Creates a board with mines at exactly the given cells.
    ///
    /// # Errors
    ///
    /// - [`GameError::InvalidLayout`] if a mine is off the board or listed twice.
    /// - Any error of [`GameConfig::new`] for the resulting configuration.
    pub fn from_mines<I>(size: BoardSize, mines: I) -> Result<Self, GameError>
    where
        I: IntoIterator<Item = Coord>,
    {
        let mut layout = vec![false; size.cell_count()];
        let mut count = 0;
        for coord in mines {
            if !size.contains(coord) || layout[size.index_of(coord)] {
                return Err(GameError::InvalidLayout { coord });
            }
            layout[size.index_of(coord)] = true;
            count += 1;
        }

        let config = GameConfig::new(size.rows, size.cols, count, false)?;
        let mut board = Self {
            config,
            mines: layout,
            counts: vec![0; size.cell_count()],
            cells: vec![CellView::Hidden; size.cell_count()],
            mines_placed: true,
            safe_left: config.safe_cells(),
            lost: false,
            rng: Pcg64Mcg::seed_from_u64(0),
        };
        board.update_counts();
        Ok(board)
    }

    /// Returns the configuration the board was built from.
    #[must_use]
    pub fn config(&self) -> GameConfig {
        self.config
    }

    /// Returns the board dimensions.
    #[must_use]
    pub fn size(&self) -> BoardSize {
        self.config.size()
    }

    /// Reveals `coord`, flooding outward from cells with no adjacent mine.
    ///
    /// Returns every newly revealed cell, starting with `coord`. Revealing a
    /// mine loses the game and returns just that cell. The flood passes over
    /// flagged cells.
    ///
    /// # Errors
    ///
    /// - [`GameError::OutOfBounds`] if `coord` is not on the board.
    /// - [`GameError::AlreadyRevealed`] if `coord` is revealed or exploded.
    /// - [`GameError::RevealOnFlagged`] if `coord` is flagged.
    pub fn reveal(&mut self, coord: Coord) -> Result<Vec<Coord>, GameError> {
        let index = self.index(coord)?;
        match self.cells[index] {
            CellView::Hidden => {}
            CellView::Flagged => return Err(GameError::RevealOnFlagged { coord }),
            CellView::Revealed(_) | CellView::Exploded => {
                return Err(GameError::AlreadyRevealed { coord });
            }
        }
        if !self.mines_placed {
            let exclude = self.config.first_click_safe().then_some(coord);
            self.place_random_mines(exclude);
        }

        if self.mines[index] {
            self.cells[index] = CellView::Exploded;
            self.lost = true;
            return Ok(vec![coord]);
        }

        let size = self.size();
        let mut revealed = vec![coord];
        self.open(index);
        let mut stack = vec![coord];
        while let Some(current) = stack.pop() {
            if self.counts[size.index_of(current)] != 0 {
                continue;
            }
            for neighbor in size.neighbors(current) {
                let index = size.index_of(neighbor);
                if !self.cells[index].is_hidden() || self.mines[index] {
                    continue;
                }
                self.open(index);
                revealed.push(neighbor);
                stack.push(neighbor);
            }
        }
        Ok(revealed)
    }

    /// Toggles the flag on `coord`.
    ///
    /// Returns `true` if the cell is now flagged, `false` if the flag was removed.
    ///
    /// # Errors
    ///
    /// - [`GameError::OutOfBounds`] if `coord` is not on the board.
    /// - [`GameError::FlagOnRevealed`] if the cell is already revealed.
    pub fn toggle_flag(&mut self, coord: Coord) -> Result<bool, GameError> {
        let index = self.index(coord)?;
        match self.cells[index] {
            CellView::Hidden => {
                self.cells[index] = CellView::Flagged;
                Ok(true)
            }
            CellView::Flagged => {
                self.cells[index] = CellView::Hidden;
                Ok(false)
            }
            CellView::Revealed(_) | CellView::Exploded => Err(GameError::FlagOnRevealed { coord }),
        }
    }

    /// Returns `true` once a mine was revealed.
    #[must_use]
    pub fn lost(&self) -> bool {
        self.lost
    }

    /// Returns the number of safe cells still hidden.
    #[must_use]
    pub fn safe_left(&self) -> usize {
        self.safe_left
    }

    /// Completes a won board.
    ///
    /// Once every safe cell is revealed, all remaining hidden cells must be
    /// mines: they are flagged and returned. Returns `None` while safe cells
    /// are still hidden.
    pub fn finish(&mut self) -> Option<Vec<Coord>> {
        if self.safe_left != 0 || self.lost {
            return None;
        }
        let size = self.size();
        let flagged = size
            .coords()
            .filter(|&coord| {
                let cell = &mut self.cells[size.index_of(coord)];
                if cell.is_hidden() {
                    *cell = CellView::Flagged;
                    true
                } else {
                    false
                }
            })
            .collect();
        Some(flagged)
    }

    /// Returns `true` if `coord` holds a mine.
    ///
    /// This is ground truth; agents only ever see [`view`](Self::view).
    #[must_use]
    pub fn is_mine(&self, coord: Coord) -> bool {
        self.size().contains(coord) && self.mines[self.size().index_of(coord)]
    }

    /// Returns a snapshot of everything a player can see.
    #[must_use]
    pub fn view(&self) -> BoardView {
        let size = self.size();
        BoardView::from_fn(size, |coord| self.cells[size.index_of(coord)])
    }

    fn index(&self, coord: Coord) -> Result<usize, GameError> {
        let size = self.size();
        if size.contains(coord) {
            Ok(size.index_of(coord))
        } else {
            Err(GameError::OutOfBounds { coord, size })
        }
    }

    fn open(&mut self, index: usize) {
        self.cells[index] = CellView::Revealed(self.counts[index]);
        self.safe_left -= 1;
    }

    fn place_random_mines(&mut self, exclude: Option<Coord>) {
        let size = self.size();
        let excluded = |coord: Coord| {
            exclude.is_some_and(|center| {
                coord == center || size.neighbors(center).contains(&coord)
            })
        };
        let mut candidates: Vec<Coord> = size.coords().filter(|&coord| !excluded(coord)).collect();
        candidates.shuffle(&mut self.rng);

        let wanted = self.config.mines();
        if candidates.len() < wanted {
            log::warn!(
                "only {} cells can hold mines, {wanted} requested",
                candidates.len()
            );
        }
        for coord in candidates.into_iter().take(wanted) {
            self.mines[size.index_of(coord)] = true;
        }
        self.mines_placed = true;
        self.update_counts();
    }

    fn update_counts(&mut self) {
        let size = self.size();
        for coord in size.coords() {
            let count = size
                .neighbors(coord)
                .into_iter()
                .filter(|&n| self.mines[size.index_of(n)])
                .count();
            // At most eight neighbours.
            #[expect(clippy::cast_possible_truncation)]
            let count = count as u8;
            self.counts[size.index_of(coord)] = count;
        }
    }
}
