//! There are multiple multiplayer variations to minimax, this module is for the
//! `paranoid` variant: every adversary is assumed to cooperate against the agent, so the
//! agent's turns maximize its score and every adversary turn minimizes it. One full ply
//! is the agent moving once, then adversary N down to adversary 1 in that fixed order.
//!
//! Two engines share that turn model:
//!
//! * [MinimaxAgent::choose_move] — depth-limited search with alpha-beta pruning, scoring
//!   cut-off leaves with a heuristic such as [standard_score];
//! * [MinimaxAgent::choose_move_exhaustive] — exact search with no depth limit, kept
//!   finite by a per-branch [VisitedSet] cycle guard. Its running time is bounded only
//!   by the number of distinct reachable states, so it is for small boards only.
//!
//! ```rust
//! use decorum::N64;
//! use mazechase_game_types::wire_representation::Game;
//! use mazechase_minimax::paranoid::{standard_score, MinimaxAgent};
//!
//! // Fixture data matches what we expect to come from the game engine
//! let wire_state = include_str!("../../fixtures/corridor.json");
//! let game: Game = serde_json::from_str(wire_state).unwrap();
//!
//! // The scoring function used for states where the depth budget runs out
//! fn score_function(game: &Game) -> N64 {
//!     standard_score(game)
//! }
//!
//! let agent = MinimaxAgent::from_fn(game, 0, &score_function, "corridor-agent");
//!
//! // The one pellet sits east of the agent, so that is the only sensible move
//! let chosen = agent.choose_move().unwrap();
//! assert_eq!(chosen.direction.to_string(), "east");
//! ```

mod fingerprint;
pub use fingerprint::{fingerprint, StateKey};

mod turn;
pub use turn::Turn;

mod score;
pub use score::{standard_score, CutoffScorable, Scorable};

mod exact;
pub use exact::{exhaustive_value, VisitedSet};

mod eval;
pub use eval::{AgentOptions, ChooseMoveError, ChosenMove, MinimaxAgent};
