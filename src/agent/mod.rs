//! The per-player learning agent.
//!
//! - `value_table`: tabular (state key, action) value store
//! - `learner`: epsilon-greedy policy, one-step TD updates, bookkeeping
//! - `snapshot`: flat JSON model persistence

pub mod learner;
pub mod snapshot;
pub mod value_table;

pub use learner::{Agent, AgentConfig, AgentStats};
pub use value_table::{TableKey, ValueTable};
