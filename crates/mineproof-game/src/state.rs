/// Lifecycle of a game as seen by the controller.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, derive_more::Display, derive_more::IsVariant)]
pub enum GameState {
    /// Stopped without an outcome: the agent ran out of moves.
    #[display("idle")]
    Idle,
    /// Moves are still being played.
    #[default]
    #[display("running")]
    Running,
    /// Every safe cell was revealed.
    #[display("won")]
    Won,
    /// A mine was revealed.
    #[display("lost")]
    Lost,
}

impl GameState {
    /// Returns `true` for every state but [`GameState::Running`].
    #[must_use]
    pub const fn is_over(self) -> bool {
        !matches!(self, Self::Running)
    }
}
