//! Headless batch play.
//!
//! Each game runs without an oracle: its sender is dropped up front, so a game
//! that would need a guess ends as [`GameState::Idle`] instead of blocking.

use std::{
    fmt,
    time::{Duration, Instant},
};

use mineproof_agent::{ControllerError, oracle_channel};
use mineproof_game::{EventBus, GameConfig, GameState};
use rayon::prelude::*;

use crate::game_factory;

/// Result of one headless game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameOutcome {
    /// Final state.
    pub state: GameState,
    /// Moves applied to the board.
    pub moves: usize,
    /// Safe cells revealed.
    pub revealed: usize,
    /// Safe cells on the board.
    pub safe_cells: usize,
    /// Wall-clock time of the game.
    pub elapsed: Duration,
}

impl GameOutcome {
    /// Fraction of safe cells revealed.
    #[must_use]
    pub fn coverage(&self) -> f64 {
        if self.safe_cells == 0 {
            return 1.0;
        }
        ratio(self.revealed, self.safe_cells)
    }
}

/// Plays one game without an oracle.
///
/// # Errors
///
/// Returns the [`ControllerError`] that aborted the game.
pub fn play_headless(config: GameConfig, seed: u64) -> Result<GameOutcome, ControllerError> {
    let start = Instant::now();
    let (tx, rx) = oracle_channel();
    drop(tx);

    let mut controller = game_factory::new_game(config, seed, EventBus::new(), rx);
    let state = controller.run()?;
    let board = controller.board();
    Ok(GameOutcome {
        state,
        moves: controller.moves_played(),
        revealed: config.safe_cells() - board.safe_left(),
        safe_cells: config.safe_cells(),
        elapsed: start.elapsed(),
    })
}

/// Aggregated statistics over many games.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BenchReport {
    games: usize,
    won: usize,
    lost: usize,
    idle: usize,
    failed: usize,
    coverage: f64,
    moves: usize,
    elapsed: Duration,
}

impl BenchReport {
    /// Adds the result of one game.
    pub fn record(&mut self, outcome: &Result<GameOutcome, ControllerError>) {
        self.games += 1;
        match outcome {
            Ok(outcome) => {
                match outcome.state {
                    GameState::Won => self.won += 1,
                    GameState::Lost => self.lost += 1,
                    GameState::Idle | GameState::Running => self.idle += 1,
                }
                self.coverage += outcome.coverage();
                self.moves += outcome.moves;
                self.elapsed += outcome.elapsed;
            }
            Err(err) => {
                log::error!("game aborted: {err}");
                self.failed += 1;
            }
        }
    }

    /// Combines two partial reports.
    #[must_use]
    pub fn merge(mut self, other: Self) -> Self {
        self.games += other.games;
        self.won += other.won;
        self.lost += other.lost;
        self.idle += other.idle;
        self.failed += other.failed;
        self.coverage += other.coverage;
        self.moves += other.moves;
        self.elapsed += other.elapsed;
        self
    }

    /// Number of games played, including aborted ones.
    #[must_use]
    pub fn games(&self) -> usize {
        self.games
    }

    /// Number of games won.
    #[must_use]
    pub fn won(&self) -> usize {
        self.won
    }

    /// Number of games lost.
    #[must_use]
    pub fn lost(&self) -> usize {
        self.lost
    }

    /// Number of games that stopped on a needed guess.
    #[must_use]
    pub fn idle(&self) -> usize {
        self.idle
    }

    /// Number of games aborted by an error.
    #[must_use]
    pub fn failed(&self) -> usize {
        self.failed
    }

    /// Fraction of all games won.
    #[must_use]
    pub fn win_rate(&self) -> f64 {
        ratio(self.won, self.games)
    }

    /// Mean safe-cell coverage over completed games.
    #[must_use]
    pub fn mean_coverage(&self) -> f64 {
        let completed = self.games - self.failed;
        if completed == 0 {
            return 0.0;
        }
        #[expect(clippy::cast_precision_loss)]
        let completed = completed as f64;
        self.coverage / completed
    }

    /// Mean moves per completed game.
    #[must_use]
    pub fn mean_moves(&self) -> f64 {
        ratio(self.moves, self.games - self.failed)
    }

    /// Mean wall-clock time per completed game.
    #[must_use]
    pub fn mean_latency(&self) -> Duration {
        match u32::try_from(self.games - self.failed) {
            Ok(0) | Err(_) => Duration::ZERO,
            Ok(completed) => self.elapsed / completed,
        }
    }
}

impl fmt::Display for BenchReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "games:        {}", self.games)?;
        writeln!(
            f,
            "won/lost/idle: {}/{}/{} ({} aborted)",
            self.won, self.lost, self.idle, self.failed
        )?;
        writeln!(f, "win rate:     {:.1}%", self.win_rate() * 100.0)?;
        writeln!(f, "coverage:     {:.1}%", self.mean_coverage() * 100.0)?;
        writeln!(f, "moves/game:   {:.1}", self.mean_moves())?;
        write!(f, "time/game:    {:.2?}", self.mean_latency())
    }
}

/// Plays `games` games in parallel, seeding game `i` with `seed + i`.
#[must_use]
pub fn run(config: GameConfig, games: usize, seed: u64) -> BenchReport {
    (0..games)
        .into_par_iter()
        .map(|i| play_headless(config, seed.wrapping_add(i as u64)))
        .fold(BenchReport::default, |mut report, outcome| {
            report.record(&outcome);
            report
        })
        .reduce(BenchReport::default, BenchReport::merge)
}

#[expect(clippy::cast_precision_loss)]
fn ratio(num: usize, den: usize) -> f64 {
    if den == 0 {
        return 0.0;
    }
    num as f64 / den as f64
}
