//! The capability traits the search engines require of a game state, plus the [Move]
//! action vocabulary.
//!
//! Each trait covers one narrow capability so that game implementations (and test
//! doubles) only have to provide what a given algorithm actually consumes.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::wire_representation::{Position, Vector};

/// The closed set of actions the agent can take.
///
/// `Stop` is a legal action like any other; excluding it is a caller policy, not
/// something the search engines do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Move {
    /// Towards larger `y`
    North,
    /// Towards smaller `y`
    South,
    /// Towards larger `x`
    East,
    /// Towards smaller `x`
    West,
    /// Hold the current cell
    Stop,
}

impl Move {
    /// All moves, in the order successor generators are expected to enumerate them.
    pub fn all() -> [Move; 5] {
        [Move::North, Move::South, Move::East, Move::West, Move::Stop]
    }

    /// The unit offset this move applies to a [Position].
    pub fn to_vector(self) -> Vector {
        match self {
            Move::North => Vector { x: 0, y: 1 },
            Move::South => Vector { x: 0, y: -1 },
            Move::East => Vector { x: 1, y: 0 },
            Move::West => Vector { x: -1, y: 0 },
            Move::Stop => Vector { x: 0, y: 0 },
        }
    }

    /// True for the hold-still action.
    pub fn is_stop(self) -> bool {
        matches!(self, Move::Stop)
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Move::North => "north",
            Move::South => "south",
            Move::East => "east",
            Move::West => "west",
            Move::Stop => "stop",
        };
        write!(f, "{}", name)
    }
}

/// Games where the outcome of the match can be read off the state.
pub trait OutcomeDeterminableGame {
    /// The agent has won.
    fn is_win(&self) -> bool;

    /// The agent has lost.
    fn is_lose(&self) -> bool;

    /// The game is over, one way or the other.
    fn is_over(&self) -> bool {
        self.is_win() || self.is_lose()
    }
}

/// Games that track a running score for the agent.
pub trait ScoreGettableGame {
    /// The agent's score in this state, terminal or not.
    fn get_score(&self) -> f64;
}

/// Games where the agent's cell can be read off the state.
pub trait AgentPositionGettableGame {
    /// The cell the agent currently occupies.
    fn get_agent_position(&self) -> Position;
}

/// Games where the adversaries' cells can be read off the state.
pub trait AdversaryPositionGettableGame {
    /// The adversary cells in their fixed order. Adversary indices used elsewhere are
    /// 1-based: adversary `k` is at element `k - 1`.
    fn get_adversary_positions(&self) -> Vec<Position>;

    /// How many adversaries are in the game.
    fn adversary_count(&self) -> usize {
        self.get_adversary_positions().len()
    }
}

/// Games with collectible pellets on the board.
pub trait PelletGettableGame {
    /// Every remaining pellet cell, in a stable order.
    fn get_pellet_positions(&self) -> Vec<Position>;

    /// How many pellets are left.
    fn pellet_count(&self) -> usize {
        self.get_pellet_positions().len()
    }
}

/// Games that can generate the agent's successor states.
pub trait AgentSimulableGame: Sized {
    /// Every state reachable by one legal agent move, paired with the move that
    /// produces it. Terminal states have no successors.
    fn simulate_agent_moves(&self) -> Vec<(Move, Self)>;
}

/// Games that can generate an adversary's successor states.
pub trait AdversarySimulableGame: Sized {
    /// Every state reachable by one legal move of adversary `adversary_index`
    /// (1-based). Terminal states have no successors.
    fn simulate_adversary_moves(&self, adversary_index: usize) -> Vec<Self>;
}
