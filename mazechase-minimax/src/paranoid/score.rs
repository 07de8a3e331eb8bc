use decorum::N64;

use mazechase_game_types::types::{
    AdversaryPositionGettableGame, AgentPositionGettableGame, OutcomeDeterminableGame,
    PelletGettableGame, ScoreGettableGame,
};

const ADVERSARY_PRESSURE_WEIGHT: f64 = 1.5;
const PELLET_DISTANCE_WEIGHT: f64 = 1.5;
const PELLET_COUNT_WEIGHT: f64 = 6.0;

/// This trait is used to control something that can return a score from a game state
///
/// We use this trait to be able to swap scoring approaches without touching the search
pub trait Scorable<GameType> {
    /// Convert the given state into a utility
    fn score(&self, node: &GameType) -> N64;
}

impl<GameType, FnLike: Fn(&GameType) -> N64> Scorable<GameType> for FnLike {
    fn score(&self, node: &GameType) -> N64 {
        (self)(node)
    }
}

/// Provides an implementation for `cutoff_score` if the implementer implements the
/// `score` function.
///
/// `cutoff_score` decides whether expansion stops at a node. Terminal states are worth
/// exactly their game score whatever the remaining depth; an exhausted depth budget
/// falls back to the heuristic `score`; everything else keeps expanding.
pub trait CutoffScorable<GameType>
where
    GameType: OutcomeDeterminableGame + ScoreGettableGame,
{
    /// The heuristic scoring function for non-terminal cut-off states
    fn score(&self, node: &GameType) -> N64;

    /// Returns `Some` when the search should stop at `node`, with the value to use
    fn cutoff_score(&self, node: &GameType, depth: usize) -> Option<N64> {
        if node.is_over() {
            return Some(node.get_score().into());
        }

        if depth == 0 {
            return Some(self.score(node));
        }

        None
    }
}

/// The stock evaluation heuristic: the running score, pushed down by adversary
/// proximity, the walk to the nearest pellet and the number of pellets still out.
///
/// Distances are Manhattan. The adversary term divides by the distance to the nearest
/// adversary, clamped to at least 1 so an adversary sharing the agent's cell reads as
/// maximum pressure rather than a division by zero. A game with no adversaries has no
/// pressure term; a board with no pellets left has no distance term.
pub fn standard_score<GameType>(node: &GameType) -> N64
where
    GameType: OutcomeDeterminableGame
        + ScoreGettableGame
        + AgentPositionGettableGame
        + AdversaryPositionGettableGame
        + PelletGettableGame,
{
    let current_score = node.get_score();

    if node.is_over() {
        return current_score.into();
    }

    let agent = node.get_agent_position();
    let nearest_adversary = node
        .get_adversary_positions()
        .iter()
        .map(|p| agent.dist_from(p))
        .min();
    let nearest_pellet = node
        .get_pellet_positions()
        .iter()
        .map(|p| agent.dist_from(p))
        .min();

    let mut score = current_score;
    if let Some(distance) = nearest_adversary {
        score -= ADVERSARY_PRESSURE_WEIGHT / f64::from(distance.max(1));
    }
    if let Some(distance) = nearest_pellet {
        score -= PELLET_DISTANCE_WEIGHT * f64::from(distance);
    }
    score -= PELLET_COUNT_WEIGHT * node.pellet_count() as f64;

    score.into()
}
