//! The tabular value store.

use rustc_hash::FxHashMap;

use crate::core::{Action, StateKey};

/// Key of one learned estimate: an abstracted state plus the action taken
/// from it. Equality and ordering are defined on both components.
pub type TableKey = (StateKey, Action);

/// Mapping from (state key, action) to a learned value estimate.
///
/// Owned exclusively by one agent. Grows monotonically during training and
/// is never evicted; the lossy `StateKey` abstraction bounds its size.
/// Unknown pairs read as 0.
#[derive(Clone, Debug, Default)]
pub struct ValueTable {
    entries: FxHashMap<TableKey, f64>,
}

impl ValueTable {
    /// Create an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Learned value for a (state, action) pair; 0 when never visited.
    #[must_use]
    pub fn get(&self, key: StateKey, action: Action) -> f64 {
        self.entries.get(&(key, action)).copied().unwrap_or(0.0)
    }

    /// Store a value estimate.
    pub fn set(&mut self, key: StateKey, action: Action, value: f64) {
        self.entries.insert((key, action), value);
    }

    /// Highest value among `actions` at `key`; 0 when `actions` is empty.
    /// Unvisited actions contribute their 0 default.
    #[must_use]
    pub fn best_value(&self, key: StateKey, actions: &[Action]) -> f64 {
        if actions.is_empty() {
            return 0.0;
        }
        actions
            .iter()
            .map(|&a| self.get(key, a))
            .fold(f64::NEG_INFINITY, f64::max)
    }

    /// Number of learned entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing has been learned yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over all learned entries.
    pub fn iter(&self) -> impl Iterator<Item = (&TableKey, &f64)> {
        self.entries.iter()
    }
}
