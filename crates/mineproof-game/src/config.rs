use mineproof_core::BoardSize;

use crate::GameError;

/// Board dimensions and mine count of a game.
///
/// # Examples
///
/// ```
/// use mineproof_game::GameConfig;
///
/// let config = GameConfig::new(9, 9, 10, true)?;
/// assert_eq!(config, GameConfig::BEGINNER);
/// assert_eq!(config.max_mines(), 72);
///
/// assert!(GameConfig::new(3, 3, 1, true).is_err());
/// # Ok::<(), mineproof_game::GameError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameConfig {
    rows: u16,
    cols: u16,
    mines: usize,
    first_click_safe: bool,
}

impl GameConfig {
    /// 9x9 with 10 mines.
    pub const BEGINNER: Self = Self::preset(9, 9, 10);
    /// 16x16 with 40 mines.
    pub const NORMAL: Self = Self::preset(16, 16, 40);
    /// 24x16 with 70 mines.
    pub const HARD: Self = Self::preset(24, 16, 70);
    /// 30x16 with 99 mines.
    pub const EXPERT: Self = Self::preset(30, 16, 99);

    const fn preset(rows: u16, cols: u16, mines: usize) -> Self {
        Self {
            rows,
            cols,
            mines,
            first_click_safe: true,
        }
    }

    /// Creates a validated configuration.
    ///
    /// With `first_click_safe`, the first revealed cell and its neighbours are
    /// kept free of mines, so up to nine cells are unavailable.
    ///
    /// # Errors
    ///
    /// - [`GameError::EmptyBoard`] if either dimension is zero.
    /// - [`GameError::TooManyMines`] if `mines` exceeds [`max_mines`](Self::max_mines).
    pub fn new(rows: u16, cols: u16, mines: usize, first_click_safe: bool) -> Result<Self, GameError> {
        if rows == 0 || cols == 0 {
            return Err(GameError::EmptyBoard);
        }
        let config = Self {
            rows,
            cols,
            mines,
            first_click_safe,
        };
        let max = config.max_mines();
        if mines > max {
            return Err(GameError::TooManyMines {
                mines,
                max,
                size: config.size(),
            });
        }
        Ok(config)
    }

    /// Returns a copy with first-click safety switched on or off.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::TooManyMines`] if the mines no longer fit.
    pub fn with_first_click_safe(self, first_click_safe: bool) -> Result<Self, GameError> {
        Self::new(self.rows, self.cols, self.mines, first_click_safe)
    }

    /// Returns the board dimensions.
    #[must_use]
    pub const fn size(&self) -> BoardSize {
        BoardSize::new(self.rows, self.cols)
    }

    /// Returns the number of mines.
    #[must_use]
    pub const fn mines(&self) -> usize {
        self.mines
    }

    /// Returns the number of safe cells.
    #[must_use]
    pub const fn safe_cells(&self) -> usize {
        self.size().cell_count() - self.mines
    }

    /// Returns `true` if the first reveal can never hit a mine.
    #[must_use]
    pub const fn first_click_safe(&self) -> bool {
        self.first_click_safe
    }

    /// Returns the largest mine count this board accepts.
    #[must_use]
    pub const fn max_mines(&self) -> usize {
        let cells = self.size().cell_count();
        if self.first_click_safe {
            cells.saturating_sub(9)
        } else {
            cells
        }
    }
}
