//! Win-condition evaluation.

use crate::core::{GameConfig, GameState, PlayerId, Position, WinKind};

/// Whether `player` satisfies the configured win condition in `state`.
///
/// Dispatches on the configured type. `Unknown` types are never satisfied:
/// generator configs are contractually well-formed, so an unrecognized type
/// just lets the game run to the turn ceiling.
pub(crate) fn is_satisfied(state: &GameState, config: &GameConfig, player: PlayerId) -> bool {
    match config.win_condition.kind {
        WinKind::RaceFinish => match state.positions[player] {
            Position::Track(pos) => pos >= state.track_length - 1,
            Position::Grid { .. } => false,
        },
        WinKind::ResourceCollection => {
            state.resources[player] >= config.win_condition.target_resources
        }
        WinKind::TerritoryControl => {
            state.scores[player] as f64 >= config.win_condition.control_percentage * 100.0
        }
        WinKind::PositionOrElimination => {
            let (x, y) = config.goal_position();
            state.positions[player] == Position::Grid { x, y }
        }
        WinKind::Unknown => false,
    }
}
