//! Core building blocks: players, RNG, configuration, actions, state.
//!
//! Everything here is game-design-agnostic: the generator's `GameConfig`
//! parameterizes it, the simulator drives it.

pub mod action;
pub mod config;
pub mod player;
pub mod rng;
pub mod state;

pub use action::Action;
pub use config::{BoardConfig, BoardKind, GameConfig, Genre, Mechanic, RuleSet, WinCondition, WinKind};
pub use player::{PlayerId, PlayerMap};
pub use rng::GameRng;
pub use state::{GameState, Position, StateKey};
