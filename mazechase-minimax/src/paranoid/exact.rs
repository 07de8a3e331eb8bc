use decorum::N64;
use rustc_hash::FxHashSet;

use mazechase_game_types::types::{
    AdversaryPositionGettableGame, AdversarySimulableGame, AgentPositionGettableGame,
    AgentSimulableGame, OutcomeDeterminableGame, PelletGettableGame, ScoreGettableGame,
};

use super::{
    fingerprint::{fingerprint, StateKey},
    turn::Turn,
};

/// The state keys already expanded along one root-to-leaf branch of the exact search.
///
/// Every recursion step works on its own copy: sibling branches never see each other's
/// history, only revisits along a single path are excluded. That is the minimum needed
/// to guarantee termination on a state graph with cycles. A shared mutable set would
/// let one branch's history wrongly prune an independent one.
#[derive(Debug, Clone, Default)]
pub struct VisitedSet {
    keys: FxHashSet<StateKey>,
}

impl VisitedSet {
    /// A branch history holding only the root state's key.
    pub fn root(key: StateKey) -> Self {
        let mut keys = FxHashSet::default();
        keys.insert(key);
        VisitedSet { keys }
    }

    /// Whether `key` is already on this branch.
    pub fn contains(&self, key: &StateKey) -> bool {
        self.keys.contains(key)
    }

    /// A copy of this branch's history with `key` added. The parent set is untouched.
    fn descend(&self, key: StateKey) -> Self {
        let mut keys = self.keys.clone();
        keys.insert(key);
        VisitedSet { keys }
    }
}

/// Exact minimax utility of `node`, with a per-branch cycle guard instead of a depth
/// limit.
///
/// Terminal states are worth their game score, whatever `turn` says. Everywhere else
/// the mover given by `turn` is expanded, skipping successors whose [StateKey] already
/// lies on this branch, and the agent maximizes while adversaries minimize.
///
/// Returns `None` when the node offers no information: every successor was already on
/// the branch (or there were none). Such nodes are simply excluded from their parent's
/// max/min rather than mapped onto a sentinel value that would masquerade as a real
/// utility.
///
/// Termination comes from the branch history strictly growing on every recursion, so
/// the recursion depth and running time are bounded by the number of distinct reachable
/// states. That bound can be exponential in board size; there is no internal safeguard,
/// so keep this to small boards or wrap the call with an external cap.
pub fn exhaustive_value<GameType>(
    node: &GameType,
    visited: &VisitedSet,
    turn: Turn,
) -> Option<N64>
where
    GameType: OutcomeDeterminableGame
        + ScoreGettableGame
        + AgentPositionGettableGame
        + AdversaryPositionGettableGame
        + PelletGettableGame
        + AgentSimulableGame
        + AdversarySimulableGame,
{
    if node.is_over() {
        return Some(node.get_score().into());
    }

    // The node itself goes on the branch history; its successors are checked against it.
    let visited = visited.descend(fingerprint(node));
    let next_turn = turn.next(node.adversary_count());

    match turn {
        Turn::Agent => node
            .simulate_agent_moves()
            .into_iter()
            .filter(|(_, successor)| !visited.contains(&fingerprint(successor)))
            .filter_map(|(_, successor)| exhaustive_value(&successor, &visited, next_turn))
            .max(),
        Turn::Adversary(index) => node
            .simulate_adversary_moves(index)
            .into_iter()
            .filter(|successor| !visited.contains(&fingerprint(successor)))
            .filter_map(|successor| exhaustive_value(&successor, &visited, next_turn))
            .min(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mazechase_game_types::wire_representation::{Board, Game, Position};

    /// Two open cells and a pellet sealed off behind a wall: the agent can only shuttle
    /// back and forth, so every branch eventually revisits its own path.
    fn sealed_pellet() -> Game {
        Game {
            board: Board {
                width: 4,
                height: 1,
                walls: vec![Position { x: 2, y: 0 }],
                pellets: vec![Position { x: 3, y: 0 }],
            },
            agent: Position { x: 0, y: 0 },
            adversaries: vec![],
            score: 0.0,
        }
    }

    #[test]
    fn cyclic_state_graphs_terminate_with_no_information() {
        let game = sealed_pellet();
        let visited = VisitedSet::root(fingerprint(&game));

        // A: only useful successor is B; B: only useful successor is A. The guard has
        // to cut both branches rather than recurse forever.
        assert_eq!(exhaustive_value(&game, &visited, Turn::Agent), None);
    }

    #[test]
    fn terminal_states_are_worth_their_score_whatever_the_turn() {
        let mut cleared = sealed_pellet();
        cleared.board.pellets.clear();
        cleared.score = 509.0;

        let fresh = VisitedSet::default();
        for turn in [Turn::Agent, Turn::Adversary(1), Turn::Adversary(2)] {
            assert_eq!(
                exhaustive_value(&cleared, &fresh, turn),
                Some(N64::from(509.0))
            );
        }
    }

    #[test]
    fn descending_copies_the_branch_history() {
        let here = fingerprint(&sealed_pellet());
        let mut there_game = sealed_pellet();
        there_game.agent = Position { x: 1, y: 0 };
        let there = fingerprint(&there_game);

        let parent = VisitedSet::root(here.clone());
        let child = parent.descend(there.clone());

        assert!(child.contains(&here));
        assert!(child.contains(&there));
        // The sibling-visible parent set must not have picked up the child's key.
        assert!(!parent.contains(&there));
    }
}
