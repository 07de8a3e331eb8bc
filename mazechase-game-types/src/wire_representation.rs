//! Grid geometry and a small serde-friendly game implementation.
//!
//! [Game] is the reference maze pursuit game: an agent collecting pellets while
//! adversaries chase it on a walled grid. It exists so fixtures and tests have a
//! concrete state to search; a production engine would implement the same traits from
//! [crate::types] over its own representation.

use serde::{Deserialize, Serialize};

use crate::types::{
    AdversaryPositionGettableGame, AdversarySimulableGame, AgentPositionGettableGame,
    AgentSimulableGame, Move, OutcomeDeterminableGame, PelletGettableGame, ScoreGettableGame,
};

/// Points deducted for every agent move, including `Stop`.
pub const MOVE_COST: f64 = 1.0;
/// Points awarded for collecting a pellet.
pub const PELLET_SCORE: f64 = 10.0;
/// Bonus for clearing the last pellet.
pub const WIN_SCORE: f64 = 500.0;
/// Penalty for being caught by an adversary.
pub const LOSE_SCORE: f64 = 500.0;

/// A cell on the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    /// Column, growing east
    pub x: i32,
    /// Row, growing north
    pub y: i32,
}

/// An offset between two [Position]s.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Vector {
    pub x: i32,
    pub y: i32,
}

impl Position {
    /// The position reached by applying `v` to `self`.
    pub fn add_vec(&self, v: Vector) -> Position {
        Position {
            x: self.x + v.x,
            y: self.y + v.y,
        }
    }

    /// Manhattan distance to `other`.
    pub fn dist_from(&self, other: &Position) -> u32 {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
    }
}

/// The static part of a game state: dimensions, walls and remaining pellets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Board {
    /// Number of columns
    pub width: i32,
    /// Number of rows
    pub height: i32,
    /// Impassable cells
    pub walls: Vec<Position>,
    /// Remaining pellet cells, in layout order
    pub pellets: Vec<Position>,
}

impl Board {
    /// Whether `position` is on the board and not a wall.
    pub fn is_open(&self, position: &Position) -> bool {
        position.x >= 0
            && position.x < self.width
            && position.y >= 0
            && position.y < self.height
            && !self.walls.contains(position)
    }
}

/// A full game state as it comes off the wire.
///
/// Scoring follows the classic maze pursuit rules: every agent move costs
/// [MOVE_COST], a pellet is worth [PELLET_SCORE], clearing the board adds
/// [WIN_SCORE] and being caught subtracts [LOSE_SCORE]. Adversaries move in the
/// four cardinal directions and only hold their cell when fully walled in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Game {
    /// The board this state lives on
    pub board: Board,
    /// The agent's cell
    pub agent: Position,
    /// Adversary cells; adversary `k` (1-based) is `adversaries[k - 1]`
    pub adversaries: Vec<Position>,
    /// The agent's running score
    pub score: f64,
}

impl OutcomeDeterminableGame for Game {
    fn is_win(&self) -> bool {
        self.board.pellets.is_empty() && !self.is_lose()
    }

    fn is_lose(&self) -> bool {
        self.adversaries.contains(&self.agent)
    }
}

impl ScoreGettableGame for Game {
    fn get_score(&self) -> f64 {
        self.score
    }
}

impl AgentPositionGettableGame for Game {
    fn get_agent_position(&self) -> Position {
        self.agent
    }
}

impl AdversaryPositionGettableGame for Game {
    fn get_adversary_positions(&self) -> Vec<Position> {
        self.adversaries.clone()
    }

    fn adversary_count(&self) -> usize {
        self.adversaries.len()
    }
}

impl PelletGettableGame for Game {
    fn get_pellet_positions(&self) -> Vec<Position> {
        self.board.pellets.clone()
    }

    fn pellet_count(&self) -> usize {
        self.board.pellets.len()
    }
}

impl AgentSimulableGame for Game {
    fn simulate_agent_moves(&self) -> Vec<(Move, Self)> {
        if self.is_over() {
            return vec![];
        }

        Move::all()
            .iter()
            .filter_map(|&mv| {
                let target = self.agent.add_vec(mv.to_vector());
                if !self.board.is_open(&target) {
                    return None;
                }

                let mut next = self.clone();
                next.agent = target;
                next.score -= MOVE_COST;
                if let Some(i) = next.board.pellets.iter().position(|p| *p == target) {
                    next.board.pellets.remove(i);
                    next.score += PELLET_SCORE;
                    if next.is_win() {
                        next.score += WIN_SCORE;
                    }
                }
                if next.is_lose() {
                    next.score -= LOSE_SCORE;
                }
                Some((mv, next))
            })
            .collect()
    }
}

impl AdversarySimulableGame for Game {
    fn simulate_adversary_moves(&self, adversary_index: usize) -> Vec<Self> {
        if self.is_over() {
            return vec![];
        }

        let idx = adversary_index - 1;
        let from = self.adversaries[idx];

        let mut successors: Vec<Game> = Move::all()
            .iter()
            .filter(|mv| !mv.is_stop())
            .filter_map(|&mv| {
                let target = from.add_vec(mv.to_vector());
                if !self.board.is_open(&target) {
                    return None;
                }

                let mut next = self.clone();
                next.adversaries[idx] = target;
                if next.is_lose() {
                    next.score -= LOSE_SCORE;
                }
                Some(next)
            })
            .collect();

        // A fully walled-in adversary holds its cell instead of vanishing from the ply.
        if successors.is_empty() {
            successors.push(self.clone());
        }

        successors
    }
}
