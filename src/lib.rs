//! # playtest-engine
//!
//! A self-playtesting engine for procedurally generated board games.
//! An external generator produces a [`GameConfig`]; this crate runs many
//! simulated games between tabular Q-learning agents and scores the batch
//! for fairness, pacing and engagement.
//!
//! ## Design Principles
//!
//! 1. **Configuration Over Convention**: the generator describes a game
//!    (genre, board, win condition, rules); the engine interprets it.
//!    The engine never hardcodes a specific game design.
//!
//! 2. **Deterministic**: every source of randomness (policy exploration,
//!    dice, contested claims) draws from a seeded [`GameRng`], so whole
//!    training batches are reproducible.
//!
//! 3. **Exclusive Ownership**: the [`Simulator`] owns the mutable
//!    [`GameState`]; each [`Agent`] owns its value table and statistics.
//!    No hidden process-wide state; components are independently
//!    constructible.
//!
//! ## Modules
//!
//! - `core`: players, RNG, configuration, actions, game state
//! - `agent`: value table, epsilon-greedy Q-learning agent, model snapshots
//! - `sim`: genre executors, win conditions, the episode loop
//! - `analysis`: batch balance metrics, grades and recommendations

pub mod agent;
pub mod analysis;
pub mod core;
pub mod error;
pub mod sim;

// Re-export commonly used types
pub use crate::core::{
    Action, BoardConfig, BoardKind, GameConfig, GameRng, GameState, Genre, Mechanic, PlayerId,
    PlayerMap, Position, RuleSet, StateKey, WinCondition, WinKind,
};

pub use crate::agent::{Agent, AgentConfig, AgentStats, ValueTable};

pub use crate::sim::{EpisodeOptions, SimulationResult, Simulator, TurnSnapshot};

pub use crate::analysis::{
    BalanceAnalyzer, BalanceGrade, BalanceReport, GameComparison, Verdict,
};

pub use crate::error::SnapshotError;
