//! The closed action vocabulary and per-state action legality.
//!
//! Actions are a small fixed enum rather than free-form names: the genre
//! and board edges decide which subset is legal in a given state, and the
//! (state key, action) pair is the value-table key. Textual names are
//! stable because snapshots persist them.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::config::GameConfig;
use super::player::PlayerId;
use super::state::{GameState, Position};

/// The set of legal actions in one state. Stack-allocated; never longer
/// than the full vocabulary.
pub type ActionSet = SmallVec<[Action; 8]>;

/// Everything a player can do on their turn.
///
/// Racing uses `Advance`/`Stay`; grid genres use the directional moves plus
/// `Collect`/`Attack` where the configuration enables them. `Stay` is legal
/// everywhere, so the legal set is never empty.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    MoveLeft,
    MoveRight,
    MoveUp,
    MoveDown,
    Advance,
    Collect,
    Attack,
    Stay,
}

impl Action {
    /// Stable textual name, used in snapshots.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Action::MoveLeft => "move_left",
            Action::MoveRight => "move_right",
            Action::MoveUp => "move_up",
            Action::MoveDown => "move_down",
            Action::Advance => "advance",
            Action::Collect => "collect",
            Action::Attack => "attack",
            Action::Stay => "stay",
        }
    }

    /// Parse a stable textual name back into an action.
    #[must_use]
    pub fn parse(name: &str) -> Option<Action> {
        match name {
            "move_left" => Some(Action::MoveLeft),
            "move_right" => Some(Action::MoveRight),
            "move_up" => Some(Action::MoveUp),
            "move_down" => Some(Action::MoveDown),
            "advance" => Some(Action::Advance),
            "collect" => Some(Action::Collect),
            "attack" => Some(Action::Attack),
            "stay" => Some(Action::Stay),
            _ => None,
        }
    }

    /// Whether this is a directional grid movement.
    #[must_use]
    pub fn is_grid_move(self) -> bool {
        matches!(
            self,
            Action::MoveLeft | Action::MoveRight | Action::MoveUp | Action::MoveDown
        )
    }

    /// Legal actions for `player` in `state` under `config`.
    ///
    /// Genre-dependent and board-edge-aware: directional moves that would
    /// leave the board are excluded, racing offers `Advance` only before
    /// the finish line. Never returns an empty set.
    #[must_use]
    pub fn valid_for(state: &GameState, config: &GameConfig, player: PlayerId) -> ActionSet {
        let mut actions = ActionSet::new();

        match state.positions[player] {
            Position::Track(pos) => {
                if pos < state.track_length - 1 {
                    actions.push(Action::Advance);
                }
            }
            Position::Grid { x, y } => {
                if x > 0 {
                    actions.push(Action::MoveLeft);
                }
                if x < state.board_size - 1 {
                    actions.push(Action::MoveRight);
                }
                if y > 0 {
                    actions.push(Action::MoveUp);
                }
                if y < state.board_size - 1 {
                    actions.push(Action::MoveDown);
                }
                if config.allows_collect() {
                    actions.push(Action::Collect);
                }
                if config.allows_attack() {
                    actions.push(Action::Attack);
                }
            }
        }

        actions.push(Action::Stay);
        actions
    }
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
