//! Mutable game state and the per-player state abstraction.
//!
//! ## GameState
//!
//! The full state of one playthrough: turn index, board dimensions,
//! per-player positions/resources/scores, eliminations, terminal flag and
//! winner. Exclusively owned and mutated by the simulator; agents only ever
//! see `&GameState`.
//!
//! ## StateKey
//!
//! The lossy per-player abstraction used as a value-table key: own position,
//! live opponent count, own resources, turn modulo 10. Distinct global
//! states may collide on a key; that is the accepted tradeoff that keeps
//! tabular learning bounded.

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use super::config::{GameConfig, Genre};
use super::player::{PlayerId, PlayerMap};

/// A player's location: a 2-D coordinate on grid boards, a scalar space
/// index on racing tracks.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Position {
    Grid { x: u16, y: u16 },
    Track(u16),
}

impl Position {
    /// Manhattan distance from a grid position to `goal`. Track positions
    /// have no 2-D distance and return 0.
    #[must_use]
    pub fn manhattan_to(self, goal: (u16, u16)) -> u32 {
        match self {
            Position::Grid { x, y } => {
                (x.abs_diff(goal.0) as u32) + (y.abs_diff(goal.1) as u32)
            }
            Position::Track(_) => 0,
        }
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Position::Grid { x, y } => write!(f, "{},{}", x, y),
            Position::Track(p) => write!(f, "t{}", p),
        }
    }
}

/// Value-table key: the deterministic, lossy abstraction of a `GameState`
/// from one player's perspective.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StateKey {
    pub position: Position,
    pub opponents: u8,
    pub resources: i64,
    pub turn_mod: u8,
}

impl StateKey {
    /// Derive the key for `player` from the current state.
    #[must_use]
    pub fn for_player(state: &GameState, player: PlayerId) -> Self {
        Self {
            position: state.positions[player],
            opponents: state.live_opponents(player) as u8,
            resources: state.resources[player],
            turn_mod: (state.turn % 10) as u8,
        }
    }
}

impl std::fmt::Display for StateKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}|{}|{}|{}",
            self.position, self.opponents, self.resources, self.turn_mod
        )
    }
}

/// Complete state of one simulated playthrough.
#[derive(Clone, Debug)]
pub struct GameState {
    /// Turn index, 0-based.
    pub turn: u32,

    /// Side length of the grid board.
    pub board_size: u16,

    /// Length of the racing track.
    pub track_length: u16,

    /// Per-player location.
    pub positions: PlayerMap<Position>,

    /// Per-player resource counters. Never negative.
    pub resources: PlayerMap<i64>,

    /// Per-player scores.
    pub scores: PlayerMap<i64>,

    /// Players removed from play. Eliminated players are skipped in the
    /// turn loop and excluded from opponent counts.
    pub eliminated: FxHashSet<PlayerId>,

    /// Set when a win condition was satisfied.
    pub game_over: bool,

    /// The winning player, if any. At most one winner per game.
    pub winner: Option<PlayerId>,

    /// Numeric board surface handed to the presentation layer. Carries no
    /// simulation logic.
    pub surface: Vec<f64>,
}

impl GameState {
    /// Initialize state for a new game of `config`.
    ///
    /// Racing players start at track position 0; grid players start on the
    /// four canonical corners, cycling by seat. All counters start at 0.
    #[must_use]
    pub fn new(config: &GameConfig) -> Self {
        let size = config.board.size;
        let length = config.board.length;

        let corners = [
            (0, 0),
            (0, size - 1),
            (size - 1, 0),
            (size - 1, size - 1),
        ];

        let positions = PlayerMap::new(config.num_players, |p| match config.genre {
            Genre::Racing => Position::Track(0),
            _ => {
                let (x, y) = corners[p.index() % corners.len()];
                Position::Grid { x, y }
            }
        });

        let surface = if config.genre == Genre::Racing {
            vec![0.0; length as usize]
        } else {
            vec![0.0; size as usize * size as usize]
        };

        Self {
            turn: 0,
            board_size: size,
            track_length: length,
            positions,
            resources: PlayerMap::with_value(config.num_players, 0),
            scores: PlayerMap::with_value(config.num_players, 0),
            eliminated: FxHashSet::default(),
            game_over: false,
            winner: None,
            surface,
        }
    }

    /// Number of seats in this game.
    #[must_use]
    pub fn player_count(&self) -> usize {
        self.positions.player_count()
    }

    /// Whether `player` has been removed from play.
    #[must_use]
    pub fn is_eliminated(&self, player: PlayerId) -> bool {
        self.eliminated.contains(&player)
    }

    /// Remove `player` from play.
    pub fn eliminate(&mut self, player: PlayerId) {
        self.eliminated.insert(player);
    }

    /// Number of opponents of `player` still in play.
    #[must_use]
    pub fn live_opponents(&self, player: PlayerId) -> usize {
        PlayerId::all(self.player_count())
            .filter(|&p| p != player && !self.is_eliminated(p))
            .count()
    }

    /// Whether any other live player stands on `position`.
    #[must_use]
    pub fn is_occupied_by_other(&self, player: PlayerId, position: Position) -> bool {
        self.positions
            .iter()
            .any(|(p, &pos)| p != player && !self.is_eliminated(p) && pos == position)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::Genre;

    #[test]
    fn test_racing_players_start_at_zero() {
        let config = GameConfig::new(Genre::Racing).with_players(4);
        let state = GameState::new(&config);

        for player in PlayerId::all(4) {
            assert_eq!(state.positions[player], Position::Track(0));
        }
        assert_eq!(state.surface.len(), 30);
    }

    #[test]
    fn test_grid_players_start_on_corners() {
        let config = GameConfig::new(Genre::Strategy)
            .with_players(4)
            .with_board_size(8);
        let state = GameState::new(&config);

        assert_eq!(state.positions[PlayerId::new(0)], Position::Grid { x: 0, y: 0 });
        assert_eq!(state.positions[PlayerId::new(1)], Position::Grid { x: 0, y: 7 });
        assert_eq!(state.positions[PlayerId::new(2)], Position::Grid { x: 7, y: 0 });
        assert_eq!(state.positions[PlayerId::new(3)], Position::Grid { x: 7, y: 7 });
        assert_eq!(state.surface.len(), 64);
    }

    #[test]
    fn test_corners_cycle_beyond_four_players() {
        let config = GameConfig::new(Genre::TerritoryControl).with_players(5);
        let state = GameState::new(&config);

        assert_eq!(
            state.positions[PlayerId::new(4)],
            state.positions[PlayerId::new(0)]
        );
    }

    #[test]
    fn test_counters_start_at_zero() {
        let config = GameConfig::new(Genre::ResourceManagement).with_players(3);
        let state = GameState::new(&config);

        for player in PlayerId::all(3) {
            assert_eq!(state.resources[player], 0);
            assert_eq!(state.scores[player], 0);
        }
        assert!(!state.game_over);
        assert_eq!(state.winner, None);
    }

    #[test]
    fn test_elimination_and_opponent_count() {
        let config = GameConfig::new(Genre::Strategy).with_players(4);
        let mut state = GameState::new(&config);

        let p0 = PlayerId::new(0);
        assert_eq!(state.live_opponents(p0), 3);

        state.eliminate(PlayerId::new(2));
        assert!(state.is_eliminated(PlayerId::new(2)));
        assert_eq!(state.live_opponents(p0), 2);
    }

    #[test]
    fn test_occupancy_ignores_self_and_eliminated() {
        let config = GameConfig::new(Genre::TerritoryControl).with_players(2);
        let mut state = GameState::new(&config);

        let p0 = PlayerId::new(0);
        let p1 = PlayerId::new(1);
        let own = state.positions[p0];
        let other = state.positions[p1];

        assert!(!state.is_occupied_by_other(p0, own));
        assert!(state.is_occupied_by_other(p0, other));

        state.eliminate(p1);
        assert!(!state.is_occupied_by_other(p0, other));
    }

    #[test]
    fn test_state_key_derivation() {
        let config = GameConfig::new(Genre::Strategy).with_players(3);
        let mut state = GameState::new(&config);
        state.turn = 23;
        state.resources[PlayerId::new(0)] = 7;

        let key = StateKey::for_player(&state, PlayerId::new(0));

        assert_eq!(key.position, Position::Grid { x: 0, y: 0 });
        assert_eq!(key.opponents, 2);
        assert_eq!(key.resources, 7);
        assert_eq!(key.turn_mod, 3);
    }

    #[test]
    fn test_state_key_collides_by_design() {
        let config = GameConfig::new(Genre::Strategy).with_players(2);
        let mut state = GameState::new(&config);

        state.turn = 5;
        let a = StateKey::for_player(&state, PlayerId::new(0));

        // A different global state, ten turns later with an opponent moved,
        // still maps to the same key.
        state.turn = 15;
        state.positions[PlayerId::new(1)] = Position::Grid { x: 3, y: 3 };
        let b = StateKey::for_player(&state, PlayerId::new(0));

        assert_eq!(a, b);
    }

    #[test]
    fn test_manhattan_distance() {
        let pos = Position::Grid { x: 2, y: 3 };
        assert_eq!(pos.manhattan_to((7, 7)), 9);
        assert_eq!(pos.manhattan_to((2, 3)), 0);
        assert_eq!(pos.manhattan_to((0, 0)), 5);

        assert_eq!(Position::Track(12).manhattan_to((7, 7)), 0);
    }

    #[test]
    fn test_state_key_display_encoding() {
        let key = StateKey {
            position: Position::Grid { x: 4, y: 1 },
            opponents: 3,
            resources: 12,
            turn_mod: 9,
        };
        assert_eq!(key.to_string(), "4,1|3|12|9");

        let key = StateKey {
            position: Position::Track(17),
            opponents: 1,
            resources: 0,
            turn_mod: 0,
        };
        assert_eq!(key.to_string(), "t17|1|0|0");
    }
}
