//! Game-state vocabulary for maze pursuit games.
//!
//! The searching agents in `mazechase-minimax` are generic over a game state. This crate
//! defines the capability traits a state has to offer them (positions, score, terminal
//! flags, successor generation) together with the [Move] action vocabulary and grid
//! geometry. It also ships a small serde-friendly "wire" game in
//! [wire_representation] which implements every trait and backs fixtures and tests.
//!
//! The real game engine stays on the far side of these traits: the search never mutates
//! a state, it only reads accessors and asks for fresh successor states.

pub mod types;
pub mod wire_representation;
