//! Terminal front end for `play`.
//!
//! The board is printed after every change. When the agent asks for a guess,
//! a line from stdin is forwarded to the oracle channel. Input typed while no
//! guess is pending is ignored, so it can never answer a later request.

use std::{
    io::{self, BufRead},
    sync::Arc,
    thread::{self, JoinHandle},
};

use mineproof_agent::OracleSender;
use mineproof_core::{Coord, Move, MoveKind};
use mineproof_game::{Event, EventBus, EventKind};
use portable_atomic::{AtomicBool, Ordering};

const PROMPT: &str = "No provable move. Enter `r ROW COL` to reveal, `f ROW COL` to flag, or `q` to give up:";

/// A line that is not a valid decision.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum ParseDecisionError {
    /// The line is blank.
    #[display("empty input")]
    Empty,
    /// The first word is not a known command.
    #[display("unknown command `{command}`")]
    UnknownCommand {
        /// The unrecognized word.
        command: String,
    },
    /// The command needs exactly a row and a column.
    #[display("expected `{command} ROW COL`")]
    WrongArity {
        /// The command that was given.
        command: char,
    },
    /// A coordinate is not a number.
    #[display("`{text}` is not a valid row or column")]
    InvalidNumber {
        /// The offending word.
        text: String,
    },
}

/// Parses `r ROW COL`, `f ROW COL` or `q`.
///
/// # Errors
///
/// Returns a [`ParseDecisionError`] describing what is wrong with the line.
///
/// # Examples
///
/// ```
/// use mineproof_app::console::parse_decision;
/// use mineproof_core::{Coord, Move};
///
/// assert_eq!(parse_decision("r 2 3"), Ok(Move::Reveal(Coord::new(2, 3))));
/// assert_eq!(parse_decision(" F 0 1 "), Ok(Move::Flag(Coord::new(0, 1))));
/// assert_eq!(parse_decision("q"), Ok(Move::OutOfMoves));
/// assert!(parse_decision("x 1 1").is_err());
/// ```
pub fn parse_decision(line: &str) -> Result<Move, ParseDecisionError> {
    let mut words = line.split_whitespace();
    let Some(command) = words.next() else {
        return Err(ParseDecisionError::Empty);
    };
    let kind = match command.to_ascii_lowercase().as_str() {
        "r" | "reveal" => MoveKind::Reveal,
        "f" | "flag" => MoveKind::Flag,
        "q" | "quit" => return Ok(Move::OutOfMoves),
        _ => {
            return Err(ParseDecisionError::UnknownCommand {
                command: command.to_owned(),
            });
        }
    };

    let letter = match kind {
        MoveKind::Reveal => 'r',
        MoveKind::Flag => 'f',
    };
    let (Some(row), Some(col), None) = (words.next(), words.next(), words.next()) else {
        return Err(ParseDecisionError::WrongArity { command: letter });
    };
    let parse = |text: &str| {
        text.parse::<u16>()
            .map_err(|_| ParseDecisionError::InvalidNumber { text: text.to_owned() })
    };
    Ok(Move::new(kind, Coord::new(parse(row)?, parse(col)?)))
}

/// Prints the board on every change and the outcome at game over.
pub fn attach_printer(bus: &EventBus) {
    for kind in [
        EventKind::GameStarted,
        EventKind::TilesRevealed,
        EventKind::TilesFlagged,
        EventKind::TilesUnflagged,
    ] {
        bus.subscribe(kind, |event| {
            if let Some(view) = event.view() {
                println!("{view}");
            }
        });
    }
    bus.subscribe(EventKind::GameOver, |event| {
        if let Event::GameOver { state } = event {
            println!("game over: {state}");
        }
    });
    bus.subscribe(EventKind::GuessRequested, |_| println!("{PROMPT}"));
}

/// Keeps `awaiting` in step with guess requests on `bus`.
pub fn attach_gate(bus: &EventBus, awaiting: &Arc<AtomicBool>) {
    let gate = Arc::clone(awaiting);
    bus.subscribe(EventKind::GuessRequested, move |_| gate.store(true, Ordering::Release));
    let gate = Arc::clone(awaiting);
    bus.subscribe(EventKind::GuessResolved, move |_| gate.store(false, Ordering::Release));
}

/// Forwards one decision per guess request from `input` to `oracle`.
///
/// Returns when `input` ends or the agent hangs up. Dropping `oracle` on return
/// tells a waiting agent that no decision will come.
pub fn forward_decisions<R>(input: R, oracle: &OracleSender, awaiting: &AtomicBool)
where
    R: BufRead,
{
    for line in input.lines() {
        let line = match line {
            Ok(line) => line,
            Err(err) => {
                log::error!("failed to read input: {err}");
                return;
            }
        };
        if !awaiting.load(Ordering::Acquire) {
            if !line.trim().is_empty() {
                eprintln!("no guess requested; input ignored");
            }
            continue;
        }
        let decision = match parse_decision(&line) {
            Ok(decision) => decision,
            Err(err) => {
                eprintln!("{err}");
                println!("{PROMPT}");
                continue;
            }
        };
        // Claim the request so a second line cannot answer it too.
        if awaiting.swap(false, Ordering::AcqRel) && oracle.send(decision).is_err() {
            log::debug!("agent hung up; stopping input");
            return;
        }
    }
    log::debug!("input closed");
}

/// Spawns a thread forwarding stdin decisions to `oracle`.
#[must_use]
pub fn spawn_stdin_producer(oracle: OracleSender, awaiting: Arc<AtomicBool>) -> JoinHandle<()> {
    thread::spawn(move || forward_decisions(io::stdin().lock(), &oracle, &awaiting))
}
