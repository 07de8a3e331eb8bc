use mazechase_game_types::{
    types::{AdversaryPositionGettableGame, AgentPositionGettableGame, PelletGettableGame},
    wire_representation::Position,
};

/// A value-based identity for a game state, used as the membership key of a
/// [VisitedSet](super::VisitedSet).
///
/// Two states with the same observable content produce equal keys no matter how or when
/// they were constructed; nothing here depends on object identity. The key deliberately
/// ignores the running score: a state reached by a longer route is still the same place
/// on the board.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StateKey {
    agent: Position,
    pellets: Vec<Position>,
    adversaries: Vec<Position>,
}

/// Derives the [StateKey] of a state from its observable content.
pub fn fingerprint<GameType>(node: &GameType) -> StateKey
where
    GameType: AgentPositionGettableGame + AdversaryPositionGettableGame + PelletGettableGame,
{
    StateKey {
        agent: node.get_agent_position(),
        pellets: node.get_pellet_positions(),
        adversaries: node.get_adversary_positions(),
    }
}
