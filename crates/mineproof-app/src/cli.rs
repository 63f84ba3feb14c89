//! Command-line arguments.

use clap::{Args, Parser, Subcommand, ValueEnum};
use mineproof_game::{GameConfig, GameError};

/// Logical Minesweeper solver.
///
/// The solver plays every move it can prove and asks for a decision only when
/// nothing is provable.
#[derive(Debug, Parser)]
#[command(name = "mineproof", author, version, about)]
pub struct Cli {
    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Play one game in the terminal, answering guesses on stdin.
    Play(PlayArgs),
    /// Play many headless games in parallel and report statistics.
    Bench(BenchArgs),
}

/// Arguments of `play`.
#[derive(Debug, Args)]
pub struct PlayArgs {
    /// Board to play on.
    #[command(flatten)]
    pub board: BoardArgs,
}

/// Arguments of `bench`.
#[derive(Debug, Args)]
pub struct BenchArgs {
    /// Board to play on. `--seed` is the seed of the first game.
    #[command(flatten)]
    pub board: BoardArgs,

    /// Number of games to play.
    #[arg(short = 'n', long, value_name = "COUNT", default_value_t = 100)]
    pub games: usize,
}

/// Named board configurations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Preset {
    /// 9x9 with 10 mines.
    Beginner,
    /// 16x16 with 40 mines.
    Normal,
    /// 24x16 with 70 mines.
    Hard,
    /// 30x16 with 99 mines.
    Expert,
}

impl Preset {
    /// Returns the configuration of the preset.
    #[must_use]
    pub const fn config(self) -> GameConfig {
        match self {
            Self::Beginner => GameConfig::BEGINNER,
            Self::Normal => GameConfig::NORMAL,
            Self::Hard => GameConfig::HARD,
            Self::Expert => GameConfig::EXPERT,
        }
    }
}

/// Board selection shared by every subcommand.
#[derive(Debug, Clone, Args)]
pub struct BoardArgs {
    /// Starting configuration; `--rows`, `--cols` and `--mines` override it.
    #[arg(short, long, value_name = "PRESET", default_value = "beginner")]
    pub preset: Preset,

    /// Number of rows.
    #[arg(long, value_name = "ROWS")]
    pub rows: Option<u16>,

    /// Number of columns.
    #[arg(long, value_name = "COLS")]
    pub cols: Option<u16>,

    /// Number of mines.
    #[arg(short, long, value_name = "COUNT")]
    pub mines: Option<usize>,

    /// Seed for mine placement and the opening move. Random when omitted.
    #[arg(short, long, value_name = "SEED")]
    pub seed: Option<u64>,

    /// Allow the first revealed cell to be a mine.
    #[arg(long)]
    pub no_first_click_safe: bool,
}

impl BoardArgs {
    /// Resolves the arguments into a validated configuration.
    ///
    /// # Errors
    ///
    /// Returns the [`GameError`] of [`GameConfig::new`] for impossible boards.
    pub fn config(&self) -> Result<GameConfig, GameError> {
        let preset = self.preset.config();
        let size = preset.size();
        GameConfig::new(
            self.rows.unwrap_or(size.rows),
            self.cols.unwrap_or(size.cols),
            self.mines.unwrap_or(preset.mines()),
            !self.no_first_click_safe,
        )
    }
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory as _;

    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("mineproof").chain(args.iter().copied())).unwrap()
    }

    fn board(cli: Cli) -> BoardArgs {
        match cli.command {
            Command::Play(args) => args.board,
            Command::Bench(args) => args.board,
        }
    }

    #[test]
    fn test_cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_default_is_beginner() {
        let config = board(parse(&["play"])).config().unwrap();
        assert_eq!(config, GameConfig::BEGINNER);
    }

    #[test]
    fn test_overrides_apply_on_top_of_preset() {
        let args = board(parse(&["play", "--preset", "expert", "--mines", "50", "--no-first-click-safe"]));
        let config = args.config().unwrap();
        assert_eq!(config.size(), GameConfig::EXPERT.size());
        assert_eq!(config.mines(), 50);
        assert!(!config.first_click_safe());
    }

    #[test]
    fn test_bench_arguments() {
        let cli = parse(&["bench", "-n", "8", "--seed", "42", "--rows", "5", "--cols", "6", "--mines", "3"]);
        let Command::Bench(args) = cli.command else {
            panic!("expected bench");
        };
        assert_eq!(args.games, 8);
        assert_eq!(args.board.seed, Some(42));
        let config = args.board.config().unwrap();
        assert_eq!((config.size().rows, config.size().cols, config.mines()), (5, 6, 3));
    }

    #[test]
    fn test_invalid_configuration_is_rejected() {
        let args = board(parse(&["play", "--rows", "3", "--cols", "3", "--mines", "5"]));
        assert!(matches!(args.config(), Err(GameError::TooManyMines { .. })));
    }
}
