use std::cmp::{max, min};

use decorum::{Infinite, N64};
use derivative::Derivative;
use itertools::Itertools;
use thiserror::Error;
use tracing::{info, info_span};

use mazechase_game_types::types::{
    AdversaryPositionGettableGame, AdversarySimulableGame, AgentPositionGettableGame,
    AgentSimulableGame, Move, OutcomeDeterminableGame, PelletGettableGame, ScoreGettableGame,
};

use super::{
    exact::{exhaustive_value, VisitedSet},
    fingerprint::fingerprint,
    score::{CutoffScorable, Scorable},
    turn::Turn,
};

#[derive(Derivative, Clone)]
#[derivative(Debug)]
/// This is the struct that wraps a game state and a scoring function and can be used to
/// pick the agent's next move.
///
/// It also outputs traces using the [tracing] crate.
pub struct MinimaxAgent<GameType, ScorableType>
where
    ScorableType: Scorable<GameType>,
{
    /// The state the next move is chosen for
    pub game: GameType,
    /// Which decision this is, carried along for tracing
    pub turn: i32,
    #[derivative(Debug = "ignore")]
    score_function: ScorableType,
    /// A name to identify this agent in traces
    pub name: &'static str,
    options: AgentOptions,
}

/// Optional properties that can be defined for a [MinimaxAgent]
///
/// The defaults (as implemented by [Default]) are as follows:
/// ```
/// use mazechase_minimax::paranoid::AgentOptions;
///
/// let defaults: AgentOptions = Default::default();
///
/// assert_eq!(defaults.search_depth, 4);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct AgentOptions {
    /// The depth budget for [MinimaxAgent::choose_move]
    ///
    /// The budget shrinks by one when the agent expands and again when the last
    /// adversary hands the ply back, and expansion stops the moment it reaches zero.
    /// The exhaustive variant ignores this and searches until its cycle guard runs dry.
    pub search_depth: usize,
}

impl Default for AgentOptions {
    fn default() -> Self {
        Self { search_depth: 4 }
    }
}

/// The outcome of a successful search: the move to play and the utility the search
/// assigned to it at the root.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChosenMove {
    /// The direction to move in
    pub direction: Move,
    /// The root utility of that direction
    pub value: N64,
}

/// Why no move could be chosen
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ChooseMoveError {
    /// The game is already over, or the agent cannot move at all. Falling back to some
    /// hardcoded direction here would just hide a broken input.
    #[error("the agent has no legal move at the root")]
    NoLegalMoves,
    /// Exhaustive search only: every candidate leads straight back into the current
    /// path, so no candidate produced any information to rank them by.
    #[error("every legal move cycles back into an already-searched position")]
    NoViableMove,
}

impl<GameType, ScorableType> CutoffScorable<GameType> for MinimaxAgent<GameType, ScorableType>
where
    GameType: OutcomeDeterminableGame + ScoreGettableGame,
    ScorableType: Scorable<GameType>,
{
    fn score(&self, node: &GameType) -> N64 {
        self.score_function.score(node)
    }
}

impl<GameType> MinimaxAgent<GameType, &'static (dyn Fn(&GameType) -> N64 + Send + Sync)> {
    /// Construct a [MinimaxAgent] from a plain scoring function, with default
    /// [AgentOptions]
    pub fn from_fn(
        game: GameType,
        turn: i32,
        score_function: &'static (dyn Fn(&GameType) -> N64 + Send + Sync),
        name: &'static str,
    ) -> Self {
        Self {
            game,
            turn,
            score_function,
            name,
            options: Default::default(),
        }
    }
}

impl<GameType, ScorableType> MinimaxAgent<GameType, ScorableType>
where
    GameType: OutcomeDeterminableGame
        + ScoreGettableGame
        + AgentPositionGettableGame
        + AdversaryPositionGettableGame
        + PelletGettableGame
        + AgentSimulableGame
        + AdversarySimulableGame,
    ScorableType: Scorable<GameType>,
{
    /// Construct a new [MinimaxAgent]
    pub fn new(
        game: GameType,
        turn: i32,
        score_function: ScorableType,
        name: &'static str,
        options: AgentOptions,
    ) -> Self {
        Self {
            game,
            turn,
            score_function,
            name,
            options,
        }
    }

    /// Pick the next move with depth-limited alpha-beta search.
    ///
    /// Every legal root move is evaluated under the configured depth budget; leaves
    /// are valued by [CutoffScorable::cutoff_score].
    /// The first root move to reach the best value wins ties: a later candidate
    /// replaces the current best only on strict improvement. `alpha` is raised to the
    /// best value between candidates, so later candidates profit from pruning the
    /// earlier ones already established.
    pub fn choose_move(&self) -> Result<ChosenMove, ChooseMoveError> {
        info_span!(
            "alpha_beta_minimax",
            agent_name = self.name,
            turn = self.turn,
            depth = self.options.search_depth,
            chosen_score = tracing::field::Empty,
            chosen_direction = tracing::field::Empty,
        )
        .in_scope(|| {
            let adversary_count = self.game.adversary_count();
            let depth = self.options.search_depth;

            let mut alpha = N64::NEG_INFINITY;
            let beta = N64::INFINITY;
            let mut best: Option<ChosenMove> = None;
            let mut candidates = vec![];

            for (direction, successor) in self.game.simulate_agent_moves() {
                let value = if adversary_count == 0 {
                    self.alpha_beta(
                        &successor,
                        Turn::Agent,
                        depth.saturating_sub(1),
                        alpha,
                        beta,
                    )
                } else {
                    self.alpha_beta(
                        &successor,
                        Turn::Adversary(adversary_count),
                        depth,
                        alpha,
                        beta,
                    )
                };
                candidates.push((direction, value));

                if best.map_or(true, |b| value > b.value) {
                    best = Some(ChosenMove { direction, value });
                    alpha = max(alpha, value);
                }
            }

            let chosen = best.ok_or(ChooseMoveError::NoLegalMoves)?;
            self.record_choice(&chosen, &candidates);
            Ok(chosen)
        })
    }

    /// Pick the next move with the exact, cycle-guarded search.
    ///
    /// There is no depth limit: [exhaustive_value] runs until every branch hits a
    /// terminal state or revisits its own path, so this is only viable on small boards.
    /// Candidates that produce no information (their whole subtree cycles back into the
    /// path) are skipped; ties go to the first candidate reaching the best value.
    pub fn choose_move_exhaustive(&self) -> Result<ChosenMove, ChooseMoveError> {
        info_span!(
            "exhaustive_minimax",
            agent_name = self.name,
            turn = self.turn,
            chosen_score = tracing::field::Empty,
            chosen_direction = tracing::field::Empty,
        )
        .in_scope(|| {
            let adversary_count = self.game.adversary_count();
            let visited = VisitedSet::root(fingerprint(&self.game));

            let mut best: Option<ChosenMove> = None;
            let mut candidates = vec![];
            let mut saw_candidate = false;

            for (direction, successor) in self.game.simulate_agent_moves() {
                saw_candidate = true;

                let Some(value) =
                    exhaustive_value(&successor, &visited, Turn::opening(adversary_count))
                else {
                    continue;
                };
                candidates.push((direction, value));

                if best.map_or(true, |b| value > b.value) {
                    best = Some(ChosenMove { direction, value });
                }
            }

            let chosen = best.ok_or(if saw_candidate {
                ChooseMoveError::NoViableMove
            } else {
                ChooseMoveError::NoLegalMoves
            })?;
            self.record_choice(&chosen, &candidates);
            Ok(chosen)
        })
    }

    fn record_choice(&self, chosen: &ChosenMove, candidates: &[(Move, N64)]) {
        let current_span = tracing::Span::current();
        current_span.record("chosen_score", format!("{:?}", chosen.value).as_str());
        current_span.record("chosen_direction", format!("{}", chosen.direction).as_str());

        info!(
            candidates = %candidates
                .iter()
                .map(|(direction, value)| format!("{direction}={value:?}"))
                .join(" "),
            "chose move"
        );
    }

    /// One node of the pruned search. The cutoff test fires before any expansion, so
    /// `depth >= 1` wherever a successor is generated: the decrements below can never
    /// underflow.
    fn alpha_beta(
        &self,
        node: &GameType,
        turn: Turn,
        depth: usize,
        alpha: N64,
        beta: N64,
    ) -> N64 {
        let mut alpha = alpha;
        let mut beta = beta;

        if let Some(score) = self.cutoff_score(node, depth) {
            return score;
        }

        let adversary_count = node.adversary_count();

        match turn {
            Turn::Agent => {
                let mut value = N64::NEG_INFINITY;

                for (_, successor) in node.simulate_agent_moves() {
                    value = max(
                        value,
                        self.alpha_beta(
                            &successor,
                            Turn::opening(adversary_count),
                            depth - 1,
                            alpha,
                            beta,
                        ),
                    );
                    if value >= beta {
                        return value;
                    }
                    alpha = max(alpha, value);
                }

                value
            }
            Turn::Adversary(index) => {
                let mut value = N64::INFINITY;

                for successor in node.simulate_adversary_moves(index) {
                    let recursed = if index > 1 {
                        self.alpha_beta(&successor, Turn::Adversary(index - 1), depth, alpha, beta)
                    } else {
                        self.alpha_beta(&successor, Turn::Agent, depth - 1, alpha, beta)
                    };

                    value = min(value, recursed);
                    if value <= alpha {
                        return value;
                    }
                    beta = min(beta, value);
                }

                value
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::{cell::RefCell, rc::Rc};

    use mazechase_game_types::wire_representation::{Board, Game, Position};

    use crate::paranoid::standard_score;

    /// Plain depth-limited minimax with no pruning, used as the oracle the alpha-beta
    /// search has to agree with. Same cutoff, same turn rotation, same tie-break.
    fn plain_value<S: Scorable<Game>>(
        agent: &MinimaxAgent<Game, S>,
        node: &Game,
        turn: Turn,
        depth: usize,
    ) -> N64 {
        if let Some(score) = agent.cutoff_score(node, depth) {
            return score;
        }

        match turn {
            Turn::Agent => node
                .simulate_agent_moves()
                .into_iter()
                .map(|(_, successor)| {
                    plain_value(
                        agent,
                        &successor,
                        Turn::opening(node.adversary_count()),
                        depth - 1,
                    )
                })
                .max()
                .unwrap_or(N64::NEG_INFINITY),
            Turn::Adversary(index) => node
                .simulate_adversary_moves(index)
                .into_iter()
                .map(|successor| {
                    if index > 1 {
                        plain_value(agent, &successor, Turn::Adversary(index - 1), depth)
                    } else {
                        plain_value(agent, &successor, Turn::Agent, depth - 1)
                    }
                })
                .min()
                .unwrap_or(N64::INFINITY),
        }
    }

    fn plain_choose<S: Scorable<Game>>(
        agent: &MinimaxAgent<Game, S>,
        depth: usize,
    ) -> Option<ChosenMove> {
        let adversary_count = agent.game.adversary_count();
        let mut best: Option<ChosenMove> = None;

        for (direction, successor) in agent.game.simulate_agent_moves() {
            let value = if adversary_count == 0 {
                plain_value(agent, &successor, Turn::Agent, depth.saturating_sub(1))
            } else {
                plain_value(agent, &successor, Turn::Adversary(adversary_count), depth)
            };

            if best.map_or(true, |b| value > b.value) {
                best = Some(ChosenMove { direction, value });
            }
        }

        best
    }

    #[test]
    fn corridor_pellet_is_chased_by_both_variants() {
        let game: Game =
            serde_json::from_str(include_str!("../../fixtures/corridor.json")).unwrap();
        let agent = MinimaxAgent::new(
            game,
            0,
            |g: &Game| standard_score(g),
            "corridor",
            AgentOptions { search_depth: 2 },
        );

        let pruned = agent.choose_move().unwrap();
        let exhaustive = agent.choose_move_exhaustive().unwrap();

        assert_eq!(pruned.direction, Move::East);
        assert_eq!(exhaustive.direction, Move::East);
        assert_eq!(pruned.value, exhaustive.value);
        // -1 per step, +10 for the pellet, +500 for clearing the board
        assert_eq!(pruned.value, N64::from(508.0));
    }

    /// A 5x2 strip with two pellets; adversaries get added per case.
    fn strip(adversaries: Vec<Position>) -> Game {
        Game {
            board: Board {
                width: 5,
                height: 2,
                walls: vec![],
                pellets: vec![Position { x: 4, y: 0 }, Position { x: 0, y: 1 }],
            },
            agent: Position { x: 0, y: 0 },
            adversaries,
            score: 0.0,
        }
    }

    #[test]
    fn pruning_never_changes_the_root_choice() {
        let cases: Vec<(Vec<Position>, usize)> = vec![
            (vec![Position { x: 4, y: 1 }], 4),
            (vec![Position { x: 4, y: 1 }, Position { x: 2, y: 1 }], 3),
            (
                vec![
                    Position { x: 4, y: 1 },
                    Position { x: 2, y: 1 },
                    Position { x: 3, y: 0 },
                ],
                2,
            ),
        ];

        for (adversaries, max_depth) in cases {
            for depth in 1..=max_depth {
                let agent = MinimaxAgent::new(
                    strip(adversaries.clone()),
                    0,
                    |g: &Game| standard_score(g),
                    "equivalence",
                    AgentOptions {
                        search_depth: depth,
                    },
                );

                let pruned = agent.choose_move().unwrap();
                let plain = plain_choose(&agent, depth).unwrap();

                assert_eq!(
                    pruned,
                    plain,
                    "{} adversaries at depth {}",
                    adversaries.len(),
                    depth
                );
            }
        }
    }

    /// A game with two adversaries where every mover has exactly one successor, which
    /// records who generated it. Never terminal, so only the depth budget stops it.
    #[derive(Clone)]
    struct OrderProbe {
        step: i32,
        log: Rc<RefCell<Vec<String>>>,
    }

    impl OrderProbe {
        fn advanced(&self) -> Self {
            OrderProbe {
                step: self.step + 1,
                log: Rc::clone(&self.log),
            }
        }
    }

    impl OutcomeDeterminableGame for OrderProbe {
        fn is_win(&self) -> bool {
            false
        }
        fn is_lose(&self) -> bool {
            false
        }
    }
    impl ScoreGettableGame for OrderProbe {
        fn get_score(&self) -> f64 {
            0.0
        }
    }
    impl AgentPositionGettableGame for OrderProbe {
        fn get_agent_position(&self) -> Position {
            Position {
                x: self.step,
                y: 0,
            }
        }
    }
    impl AdversaryPositionGettableGame for OrderProbe {
        fn get_adversary_positions(&self) -> Vec<Position> {
            vec![Position { x: 8, y: 0 }, Position { x: 8, y: 1 }]
        }
    }
    impl PelletGettableGame for OrderProbe {
        fn get_pellet_positions(&self) -> Vec<Position> {
            vec![Position { x: 9, y: 9 }]
        }
    }
    impl AgentSimulableGame for OrderProbe {
        fn simulate_agent_moves(&self) -> Vec<(Move, Self)> {
            self.log.borrow_mut().push("agent".to_owned());
            vec![(Move::East, self.advanced())]
        }
    }
    impl AdversarySimulableGame for OrderProbe {
        fn simulate_adversary_moves(&self, adversary_index: usize) -> Vec<Self> {
            self.log
                .borrow_mut()
                .push(format!("adversary {adversary_index}"));
            vec![self.advanced()]
        }
    }

    #[test]
    fn adversaries_move_highest_index_first_once_per_ply() {
        let log = Rc::new(RefCell::new(vec![]));
        let probe = OrderProbe {
            step: 0,
            log: Rc::clone(&log),
        };
        let agent = MinimaxAgent::new(
            probe,
            0,
            |_: &OrderProbe| N64::from(0.0),
            "order-probe",
            AgentOptions { search_depth: 2 },
        );

        agent.choose_move().unwrap();

        assert_eq!(
            *log.borrow(),
            vec!["agent", "adversary 2", "adversary 1", "agent"]
        );
    }

    #[test]
    fn equal_candidates_keep_the_first_maximum() {
        // Two pellets mirrored around the agent: north and south score identically, so
        // the first candidate in move order has to win the tie in both variants.
        let column = Game {
            board: Board {
                width: 1,
                height: 5,
                walls: vec![],
                pellets: vec![Position { x: 0, y: 0 }, Position { x: 0, y: 4 }],
            },
            agent: Position { x: 0, y: 2 },
            adversaries: vec![],
            score: 0.0,
        };
        let agent = MinimaxAgent::new(
            column,
            0,
            |g: &Game| standard_score(g),
            "column",
            AgentOptions { search_depth: 2 },
        );

        assert_eq!(agent.choose_move().unwrap().direction, Move::North);
        assert_eq!(
            agent.choose_move_exhaustive().unwrap().direction,
            Move::North
        );
    }

    #[test]
    fn a_finished_game_is_an_error_not_a_default_direction() {
        let caught: Game =
            serde_json::from_str(include_str!("../../fixtures/caught.json")).unwrap();
        let agent = MinimaxAgent::new(
            caught,
            7,
            |g: &Game| standard_score(g),
            "caught",
            Default::default(),
        );

        assert_eq!(agent.choose_move(), Err(ChooseMoveError::NoLegalMoves));
        assert_eq!(
            agent.choose_move_exhaustive(),
            Err(ChooseMoveError::NoLegalMoves)
        );
    }

    #[test]
    fn all_cycling_candidates_are_an_error_for_the_exhaustive_search() {
        // The pellet is sealed off, so every branch of the exact search can only
        // shuttle between the two open cells until the cycle guard dries up.
        let sealed = Game {
            board: Board {
                width: 4,
                height: 1,
                walls: vec![Position { x: 2, y: 0 }],
                pellets: vec![Position { x: 3, y: 0 }],
            },
            agent: Position { x: 0, y: 0 },
            adversaries: vec![],
            score: 0.0,
        };
        let agent = MinimaxAgent::new(
            sealed,
            0,
            |g: &Game| standard_score(g),
            "sealed",
            Default::default(),
        );

        assert_eq!(
            agent.choose_move_exhaustive(),
            Err(ChooseMoveError::NoViableMove)
        );
    }
}
