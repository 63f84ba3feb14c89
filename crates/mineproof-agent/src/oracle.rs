use std::sync::mpsc::{self, TryRecvError};

use mineproof_core::Move;

/// Creates the hand-off channel between a decision source and an agent.
///
/// The sender may move to another thread; the receiver stays with the agent.
///
/// # Examples
///
/// ```
/// use mineproof_agent::oracle_channel;
/// use mineproof_core::{Coord, Move};
///
/// let (tx, rx) = oracle_channel();
/// tx.send(Move::Reveal(Coord::new(0, 0)))?;
/// tx.send(Move::Reveal(Coord::new(1, 1)))?;
///
/// assert_eq!(rx.drain_stale(), 2);
/// tx.send(Move::Flag(Coord::new(2, 2)))?;
/// assert_eq!(rx.recv_decision(), Some(Move::Flag(Coord::new(2, 2))));
/// # Ok::<(), mineproof_agent::OracleDisconnected>(())
/// ```
#[must_use]
pub fn oracle_channel() -> (OracleSender, OracleReceiver) {
    let (tx, rx) = mpsc::channel();
    (OracleSender { tx }, OracleReceiver { rx })
}

/// The receiving agent is gone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("the agent no longer accepts decisions")]
pub struct OracleDisconnected;

/// Producer side of the oracle channel.
#[derive(Debug)]
pub struct OracleSender {
    tx: mpsc::Sender<Move>,
}

impl OracleSender {
    /// Queues a decision.
    ///
    /// # Errors
    ///
    /// Returns [`OracleDisconnected`] if the receiver was dropped.
    pub fn send(&self, decision: Move) -> Result<(), OracleDisconnected> {
        self.tx.send(decision).map_err(|_| OracleDisconnected)
    }
}

/// Consumer side of the oracle channel.
#[derive(Debug)]
pub struct OracleReceiver {
    rx: mpsc::Receiver<Move>,
}

impl OracleReceiver {
    /// Discards every queued decision without blocking and returns how many
    /// were dropped.
    pub fn drain_stale(&self) -> usize {
        let mut dropped = 0;
        loop {
            match self.rx.try_recv() {
                Ok(decision) => {
                    log::debug!("discarding stale decision: {decision}");
                    dropped += 1;
                }
                Err(TryRecvError::Empty | TryRecvError::Disconnected) => return dropped,
            }
        }
    }

    /// Blocks until a decision arrives.
    ///
    /// Returns `None` once the sender is dropped and nothing is queued.
    #[must_use]
    pub fn recv_decision(&self) -> Option<Move> {
        self.rx.recv().ok()
    }
}
