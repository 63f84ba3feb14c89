//! Agents that play Minesweeper and the loop that runs them.
//!
//! - [`SolverAgent`] plays moves proven by the solver and falls back to an
//!   external decision source (the oracle) only when nothing is provable.
//! - [`oracle_channel`] creates the blocking hand-off used for that fallback.
//! - [`GameController`] applies moves to a [`Board`](mineproof_game::Board)
//!   and announces every change on the [`EventBus`](mineproof_game::EventBus).

pub use self::{
    agent::Agent,
    controller::GameController,
    error::{AgentError, ControllerError},
    oracle::{OracleDisconnected, OracleReceiver, OracleSender, oracle_channel},
    solver_agent::{AgentOptions, AgentPhase, SolverAgent},
};

mod agent;
mod controller;
mod error;
mod oracle;
mod solver_agent;
