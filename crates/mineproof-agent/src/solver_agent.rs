use std::{
    cell::RefCell,
    collections::VecDeque,
    rc::{Rc, Weak},
};

use mineproof_core::{BoardView, CellView, Coord, Move};
use mineproof_game::{Event, EventBus, EventKind};
use mineproof_solver::{ConstraintStore, Deduction, EngineStats, InferenceEngine, SolverError};
use rand::prelude::*;
use rand_pcg::Pcg64Mcg;

use crate::{Agent, AgentError, OracleReceiver};

/// Where a [`SolverAgent`] is in its move cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::IsVariant)]
pub enum AgentPhase {
    /// The random opening move has not been played yet.
    #[display("seeding")]
    Seeding,
    /// Moves come from logical deduction.
    #[display("deducing")]
    Deducing,
    /// Nothing is provable; blocked on the oracle.
    #[display("awaiting oracle")]
    AwaitingOracle,
    /// The game is over.
    #[display("terminated")]
    Terminated,
}

/// Construction options for a [`SolverAgent`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AgentOptions {
    /// Seed for the opening move. A random seed is drawn when `None`.
    pub seed: Option<u64>,
    /// Fixed opening cell. Overrides `seed` when set.
    pub opening: Option<Coord>,
}

/// State shared with the bus handlers.
#[derive(Debug)]
struct Inbox {
    store: ConstraintStore,
    reveals: Vec<(Coord, u8)>,
    phase: AgentPhase,
    fault: Option<SolverError>,
}

impl Inbox {
    fn fail(&mut self, err: SolverError) {
        log::error!("{err}");
        self.fault.get_or_insert(err);
    }
}

/// An agent that plays only moves it can prove, and asks an oracle otherwise.
///
/// The agent learns about the board exclusively through bus notifications:
///
/// - reveals are buffered and folded into its [`ConstraintStore`] only when
///   the move queue runs dry,
/// - flag changes are applied to the store immediately,
/// - game over terminates the agent.
///
/// When the queue is empty the [`InferenceEngine`] runs on the folded facts.
/// Proven mines are flagged first, then proven safe cells are revealed. If
/// nothing is provable, stale oracle decisions are discarded, a
/// [`Event::GuessRequested`] is published, and the agent blocks until one
/// decision arrives, which it returns as its move after publishing
/// [`Event::GuessResolved`].
#[derive(Debug)]
pub struct SolverAgent {
    inbox: Rc<RefCell<Inbox>>,
    moves: VecDeque<Move>,
    engine: InferenceEngine,
    stats: EngineStats,
    bus: EventBus,
    oracle: OracleReceiver,
}

impl SolverAgent {
    /// Creates an agent for the board shown in `view` and subscribes it to `bus`.
    ///
    /// The opening move reveals `options.opening`, or a uniformly random cell
    /// when none is given.
    #[must_use]
    pub fn new(view: &BoardView, bus: &EventBus, oracle: OracleReceiver, options: AgentOptions) -> Self {
        let size = view.size();
        let inbox = Rc::new(RefCell::new(Inbox {
            store: ConstraintStore::new(size),
            reveals: Vec::new(),
            phase: AgentPhase::Seeding,
            fault: None,
        }));
        subscribe(bus, &inbox);

        let mut moves = VecDeque::new();
        if let Some(opening) = options.opening {
            moves.push_back(Move::Reveal(opening));
        } else if size.cell_count() > 0 {
            let seed = options.seed.unwrap_or_else(rand::random);
            let mut rng = Pcg64Mcg::seed_from_u64(seed);
            let opening = Coord::new(rng.random_range(0..size.rows), rng.random_range(0..size.cols));
            log::debug!("opening with {opening} (seed {seed})");
            moves.push_back(Move::Reveal(opening));
        } else {
            log::warn!("board {size} has no cells to open");
        }

        let engine = InferenceEngine::with_all_techniques();
        let stats = engine.new_stats();
        Self {
            inbox,
            moves,
            engine,
            stats,
            bus: bus.clone(),
            oracle,
        }
    }

    /// Returns the current phase.
    #[must_use]
    pub fn phase(&self) -> AgentPhase {
        self.inbox.borrow().phase
    }

    /// Returns statistics over every inference pass run so far.
    #[must_use]
    pub fn stats(&self) -> &EngineStats {
        &self.stats
    }

    /// Returns the number of queued moves.
    #[must_use]
    pub fn pending_moves(&self) -> usize {
        self.moves.len()
    }

    /// Returns the number of reveals not yet folded into the store.
    #[must_use]
    pub fn buffered_reveals(&self) -> usize {
        self.inbox.borrow().reveals.len()
    }

    fn set_phase(&self, phase: AgentPhase) {
        let mut inbox = self.inbox.borrow_mut();
        if !inbox.phase.is_terminated() {
            inbox.phase = phase;
        }
    }

    fn deduce(&mut self) -> Result<Deduction, SolverError> {
        let mut inbox = self.inbox.borrow_mut();
        let Inbox { store, reveals, .. } = &mut *inbox;
        for (coord, count) in reveals.drain(..) {
            store.record_revealed(coord, count)?;
        }
        let constraints = store.constraints()?;
        self.engine.deduce_with_stats(&constraints, &mut self.stats)
    }

    fn ask_oracle(&mut self) -> Move {
        self.set_phase(AgentPhase::AwaitingOracle);
        let stale = self.oracle.drain_stale();
        if stale > 0 {
            log::debug!("dropped {stale} stale decisions");
        }
        log::info!("no provable move; waiting for a decision");
        self.bus.publish(&Event::GuessRequested);

        let decision = self.oracle.recv_decision();
        self.set_phase(AgentPhase::Deducing);
        self.bus.publish(&Event::GuessResolved);
        match decision {
            Some(decision) => {
                log::info!("oracle decided: {decision}");
                decision
            }
            None => {
                log::warn!("oracle disconnected; giving up");
                Move::OutOfMoves
            }
        }
    }
}

impl Agent for SolverAgent {
    fn choose_action(&mut self, view: &BoardView) -> Result<Move, AgentError> {
        if let Some(err) = self.inbox.borrow_mut().fault.take() {
            return Err(err.into());
        }
        match self.phase() {
            AgentPhase::Terminated => return Ok(Move::OutOfMoves),
            AgentPhase::Seeding => self.set_phase(AgentPhase::Deducing),
            AgentPhase::Deducing | AgentPhase::AwaitingOracle => {}
        }

        // A flood from an earlier reveal may have opened queued cells already.
        self.moves.retain(|&next| {
            let open = still_open(next, view);
            if !open {
                log::trace!("dropping {next}; cell is no longer hidden");
            }
            open
        });
        if self.moves.is_empty() {
            let deduction = self.deduce()?;
            self.moves.extend(deduction.into_moves());
        }
        let next = match self.moves.pop_front() {
            Some(next) => next,
            None => self.ask_oracle(),
        };
        log::trace!("playing {next}");
        Ok(next)
    }
}

fn still_open(next: Move, view: &BoardView) -> bool {
    next.coord()
        .and_then(|coord| view.get(coord))
        .is_none_or(|cell| cell.is_hidden())
}

fn subscribe(bus: &EventBus, inbox: &Rc<RefCell<Inbox>>) {
    let weak = Rc::downgrade(inbox);
    on(bus, EventKind::TilesRevealed, &weak, |inbox, event| {
        if let Event::TilesRevealed { view, coords } = event {
            for &coord in coords {
                if let Some(CellView::Revealed(count)) = view.get(coord) {
                    inbox.reveals.push((coord, count));
                }
            }
        }
    });
    on(bus, EventKind::TilesFlagged, &weak, |inbox, event| {
        if let Event::TilesFlagged { coords, .. } = event {
            for &coord in coords {
                if let Err(err) = inbox.store.record_flag(coord) {
                    inbox.fail(err);
                }
            }
        }
    });
    on(bus, EventKind::TilesUnflagged, &weak, |inbox, event| {
        if let Event::TilesUnflagged { coords, .. } = event {
            for &coord in coords {
                inbox.store.clear_flag(coord);
            }
        }
    });
    on(bus, EventKind::GameOver, &weak, |inbox, _| {
        inbox.phase = AgentPhase::Terminated;
    });
}

fn on<F>(bus: &EventBus, kind: EventKind, inbox: &Weak<RefCell<Inbox>>, handler: F)
where
    F: Fn(&mut Inbox, &Event) + 'static,
{
    let inbox = Weak::clone(inbox);
    bus.subscribe(kind, move |event| {
        if let Some(inbox) = inbox.upgrade() {
            handler(&mut inbox.borrow_mut(), event);
        }
    });
}
