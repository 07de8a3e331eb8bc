#![deny(
    warnings,
    missing_copy_implementations,
    missing_debug_implementations,
    missing_docs
)]
//! This crate picks the next move for an agent in a maze pursuit game by searching the
//! game tree. You provide a game state implementing the capability traits from
//! `mazechase-game-types` and a scoring function that turns a board into a
//! [decorum::N64]; the crate hands back the best move and its utility.
//!
//! We lean on the `mazechase-game-types` crate for the game vocabulary, and in
//! particular for the successor generators, which are used to produce the next states
//! the search descends into.

pub mod paranoid;
