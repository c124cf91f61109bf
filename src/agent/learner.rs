//! The Q-learning agent: policy, value updates and bookkeeping.
//!
//! One agent per seat. Each agent owns its value table, statistics and RNG;
//! nothing is shared between agents, and all mutation happens through the
//! operations below.

use serde::{Deserialize, Serialize};

use crate::core::{Action, GameConfig, GameRng, GameState, PlayerId, StateKey};

use super::value_table::ValueTable;

/// Learning hyperparameters.
#[derive(Clone, Copy, Debug)]
pub struct AgentConfig {
    /// Step size of the TD update (alpha).
    pub learning_rate: f64,

    /// Discount on future value (gamma).
    pub discount: f64,

    /// Starting exploration rate.
    pub epsilon: f64,

    /// Geometric decay applied to epsilon after each training episode.
    pub epsilon_decay: f64,

    /// Exploration never decays below this floor.
    pub epsilon_floor: f64,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            learning_rate: 0.1,
            discount: 0.9,
            epsilon: 0.2,
            epsilon_decay: 0.995,
            epsilon_floor: 0.01,
        }
    }
}

impl AgentConfig {
    /// Create a config with default hyperparameters.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the learning rate (alpha).
    #[must_use]
    pub fn with_learning_rate(mut self, alpha: f64) -> Self {
        self.learning_rate = alpha;
        self
    }

    /// Set the discount factor (gamma).
    #[must_use]
    pub fn with_discount(mut self, gamma: f64) -> Self {
        self.discount = gamma;
        self
    }

    /// Set the starting exploration rate.
    #[must_use]
    pub fn with_epsilon(mut self, epsilon: f64) -> Self {
        self.epsilon = epsilon;
        self
    }

    /// Set the per-episode epsilon decay rate.
    #[must_use]
    pub fn with_epsilon_decay(mut self, rate: f64) -> Self {
        self.epsilon_decay = rate;
        self
    }

    /// Set the epsilon floor.
    #[must_use]
    pub fn with_epsilon_floor(mut self, floor: f64) -> Self {
        self.epsilon_floor = floor;
        self
    }
}

/// Summary of an agent's training so far.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AgentStats {
    pub player_id: u8,
    pub games_played: u32,
    pub wins: u32,
    pub win_rate: f64,
    pub total_reward: f64,
    pub avg_reward: f64,
    pub table_size: usize,
    pub epsilon: f64,
}

/// A learning participant: selects actions epsilon-greedily and updates its
/// value table from experience.
#[derive(Clone, Debug)]
pub struct Agent {
    id: PlayerId,
    config: AgentConfig,
    table: ValueTable,
    epsilon: f64,
    wins: u32,
    games_played: u32,
    total_reward: f64,
    rng: GameRng,
}

impl Agent {
    /// Create an agent for seat `id`.
    ///
    /// The seed fixes the agent's exploration stream; distinct seeds per
    /// seat keep streams independent while whole runs stay reproducible.
    #[must_use]
    pub fn new(id: PlayerId, config: AgentConfig, seed: u64) -> Self {
        Self {
            id,
            epsilon: config.epsilon,
            config,
            table: ValueTable::new(),
            wins: 0,
            games_played: 0,
            total_reward: 0.0,
            rng: GameRng::new(seed),
        }
    }

    /// Seat this agent plays.
    #[must_use]
    pub fn id(&self) -> PlayerId {
        self.id
    }

    /// Abstract the current state from this agent's perspective.
    #[must_use]
    pub fn state_key(&self, state: &GameState) -> StateKey {
        StateKey::for_player(state, self.id)
    }

    /// Choose an action with the epsilon-greedy policy.
    ///
    /// During training, explores uniformly with probability epsilon.
    /// Otherwise exploits: picks the highest-valued legal action, breaking
    /// ties uniformly among the maximizers.
    pub fn choose_action(&mut self, state: &GameState, config: &GameConfig, training: bool) -> Action {
        let valid = Action::valid_for(state, config, self.id);

        if training && self.rng.gen_bool(self.epsilon) {
            return *self.rng.choose(&valid).expect("legal action set is never empty");
        }

        let key = self.state_key(state);
        let best = self.table.best_value(key, &valid);

        let maximizers: Vec<Action> = valid
            .iter()
            .copied()
            .filter(|&a| self.table.get(key, a) == best)
            .collect();

        *self
            .rng
            .choose(&maximizers)
            .expect("legal action set is never empty")
    }

    /// Apply the one-step TD update for a transition.
    ///
    /// `value <- value + alpha * (target - value)` where the target is the
    /// raw reward on terminal transitions, otherwise the reward plus the
    /// discounted best value over the next state's legal actions.
    pub fn update(
        &mut self,
        state: &GameState,
        action: Action,
        reward: f64,
        next_state: &GameState,
        terminal: bool,
        config: &GameConfig,
    ) {
        let key = self.state_key(state);
        let current = self.table.get(key, action);

        let target = if terminal {
            reward
        } else {
            let next_key = self.state_key(next_state);
            let next_valid = Action::valid_for(next_state, config, self.id);
            reward + self.config.discount * self.table.best_value(next_key, &next_valid)
        };

        let updated = current + self.config.learning_rate * (target - current);
        self.table.set(key, action, updated);

        self.total_reward += reward;
    }

    /// Record the outcome of a finished game.
    pub fn record_result(&mut self, won: bool) {
        self.games_played += 1;
        if won {
            self.wins += 1;
        }
    }

    /// Decay epsilon geometrically toward the configured floor.
    pub fn decay_epsilon(&mut self) {
        self.epsilon = self
            .config
            .epsilon_floor
            .max(self.epsilon * self.config.epsilon_decay);
    }

    /// Current exploration rate.
    #[must_use]
    pub fn epsilon(&self) -> f64 {
        self.epsilon
    }

    /// Fraction of recorded games won; 0 before any game.
    #[must_use]
    pub fn win_rate(&self) -> f64 {
        if self.games_played == 0 {
            0.0
        } else {
            f64::from(self.wins) / f64::from(self.games_played)
        }
    }

    /// The learned value table.
    #[must_use]
    pub fn table(&self) -> &ValueTable {
        &self.table
    }

    /// Mutable access to the value table, for tools that pre-seed or edit
    /// learned values directly.
    pub fn table_mut(&mut self) -> &mut ValueTable {
        &mut self.table
    }

    /// Snapshot of training statistics.
    #[must_use]
    pub fn stats(&self) -> AgentStats {
        AgentStats {
            player_id: self.id.0,
            games_played: self.games_played,
            wins: self.wins,
            win_rate: self.win_rate(),
            total_reward: self.total_reward,
            avg_reward: if self.games_played == 0 {
                0.0
            } else {
                self.total_reward / f64::from(self.games_played)
            },
            table_size: self.table.len(),
            epsilon: self.epsilon,
        }
    }

    pub(crate) fn restore(
        &mut self,
        table: ValueTable,
        wins: u32,
        games_played: u32,
        total_reward: f64,
        epsilon: Option<f64>,
    ) {
        self.table = table;
        self.wins = wins;
        self.games_played = games_played;
        self.total_reward = total_reward;
        if let Some(epsilon) = epsilon {
            self.epsilon = epsilon;
        }
    }
}
