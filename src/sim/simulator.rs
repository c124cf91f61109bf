//! The episode loop.
//!
//! A `Simulator` owns the mutable `GameState` for one playthrough at a
//! time: it asks each agent for an action, executes it through the genre
//! executor, checks the win condition, and (when training) feeds the
//! transition straight back into the agent's value table. Completed
//! results accumulate in an in-memory history for the analyzer.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::agent::Agent;
use crate::core::{GameConfig, GameRng, GameState, PlayerId, PlayerMap, Position};

use super::executor;
use super::win;

/// Bonus added to the winning step's reward.
const WIN_BONUS: f64 = 100.0;

/// Per-episode switches.
#[derive(Clone, Copy, Debug)]
pub struct EpisodeOptions {
    /// Apply TD updates and decay epsilon after the episode.
    pub training: bool,

    /// Capture a per-turn snapshot sequence for the presentation layer.
    pub record_history: bool,
}

impl Default for EpisodeOptions {
    fn default() -> Self {
        Self {
            training: true,
            record_history: false,
        }
    }
}

impl EpisodeOptions {
    /// Training episode (the default): agents learn and explore.
    #[must_use]
    pub fn training() -> Self {
        Self::default()
    }

    /// Evaluation episode: pure exploitation, no table updates.
    #[must_use]
    pub fn evaluation() -> Self {
        Self {
            training: false,
            record_history: false,
        }
    }

    /// Toggle per-turn snapshot recording.
    #[must_use]
    pub fn with_history(mut self, record: bool) -> Self {
        self.record_history = record;
        self
    }
}

/// State captured at the top of one turn, for visualization.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TurnSnapshot {
    pub turn: u32,
    pub positions: PlayerMap<Position>,
    pub scores: PlayerMap<i64>,
    pub resources: PlayerMap<i64>,
}

impl TurnSnapshot {
    fn capture(state: &GameState) -> Self {
        Self {
            turn: state.turn,
            positions: state.positions.clone(),
            scores: state.scores.clone(),
            resources: state.resources.clone(),
        }
    }
}

/// Outcome of one completed episode.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SimulationResult {
    /// Winning seat, or `None` when the turn ceiling ran out first.
    pub winner: Option<PlayerId>,

    /// Turns actually played (1-based; equals the ceiling on exhaustion).
    pub turns: u32,

    pub final_scores: PlayerMap<i64>,

    pub final_resources: PlayerMap<i64>,

    /// Per-turn snapshots, present when the episode recorded history.
    pub history: Option<Vec<TurnSnapshot>>,
}

impl SimulationResult {
    /// Whether this game produced a winner.
    #[must_use]
    pub fn decided(&self) -> bool {
        self.winner.is_some()
    }
}

/// Runs complete games of one configured design.
pub struct Simulator {
    config: GameConfig,
    rng: GameRng,
    history: Vec<SimulationResult>,
}

impl Simulator {
    /// Create a simulator for `config`. The seed fixes dice and contested
    /// claim rolls for the whole batch.
    #[must_use]
    pub fn new(config: GameConfig, seed: u64) -> Self {
        Self {
            config,
            rng: GameRng::new(seed),
            history: Vec::new(),
        }
    }

    /// The game design this simulator runs.
    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// A fresh initial state for this design.
    #[must_use]
    pub fn initial_state(&self) -> GameState {
        GameState::new(&self.config)
    }

    /// Run one episode to termination or the turn ceiling.
    ///
    /// `agents` must hold one agent per seat, in seat order. Within a turn
    /// every non-eliminated player acts exactly once, in ascending seat
    /// order; a satisfied win condition ends the game immediately and adds
    /// the win bonus to that step's reward.
    pub fn run_episode(&mut self, agents: &mut [Agent], options: EpisodeOptions) -> SimulationResult {
        assert_eq!(
            agents.len(),
            self.config.num_players,
            "one agent per configured seat"
        );

        let mut state = self.initial_state();
        let mut snapshots = options.record_history.then(Vec::new);

        'game: for turn in 0..self.config.max_turns {
            state.turn = turn;

            if let Some(snapshots) = snapshots.as_mut() {
                snapshots.push(TurnSnapshot::capture(&state));
            }

            for player in PlayerId::all(self.config.num_players) {
                if state.is_eliminated(player) {
                    continue;
                }

                let agent = &mut agents[player.index()];
                let action = agent.choose_action(&state, &self.config, options.training);

                // The TD update needs the pre-action state.
                let before = options.training.then(|| state.clone());

                let mut reward =
                    executor::execute(&mut state, &self.config, player, action, &mut self.rng);

                let mut terminal = false;
                if win::is_satisfied(&state, &self.config, player) {
                    state.game_over = true;
                    state.winner = Some(player);
                    terminal = true;
                    reward += WIN_BONUS;
                }

                if let Some(before) = before {
                    agent.update(&before, action, reward, &state, terminal, &self.config);
                }

                if state.game_over {
                    break 'game;
                }
            }
        }

        let turns = if state.game_over {
            state.turn + 1
        } else {
            self.config.max_turns
        };

        for agent in agents.iter_mut() {
            agent.record_result(state.winner == Some(agent.id()));
            if options.training {
                agent.decay_epsilon();
            }
        }

        debug!(winner = ?state.winner, turns, "episode finished");

        let result = SimulationResult {
            winner: state.winner,
            turns,
            final_scores: state.scores.clone(),
            final_resources: state.resources.clone(),
            history: snapshots,
        };
        self.history.push(result.clone());
        result
    }

    /// Run `episodes` consecutive episodes, returning the slice of results
    /// they appended to the history.
    pub fn run_batch(
        &mut self,
        agents: &mut [Agent],
        episodes: usize,
        options: EpisodeOptions,
    ) -> &[SimulationResult] {
        let start = self.history.len();
        for _ in 0..episodes {
            self.run_episode(agents, options);
        }
        &self.history[start..]
    }

    /// All results recorded so far.
    #[must_use]
    pub fn history(&self) -> &[SimulationResult] {
        &self.history
    }

    /// Forget recorded results (e.g. between designs under comparison).
    pub fn clear_history(&mut self) {
        self.history.clear();
    }
}
