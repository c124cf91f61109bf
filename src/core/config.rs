//! Game configuration: the generator's schema as typed structs.
//!
//! An external generator produces one immutable `GameConfig` per game
//! design. The engine deserializes it, resolves missing optional fields to
//! documented defaults, and never mutates it afterwards.
//!
//! Defaults (applied when the generator omits a field): board size 8, track
//! length 30, turn ceiling 100, base movement 2, collection rate 2, target
//! resources 50, control percentage 0.6, two players.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

/// Rule family a generated game belongs to.
///
/// The genre selects the action executor and shapes the valid-action set;
/// it is the explicit discriminator for every per-genre branch.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Genre {
    Strategy,
    ResourceManagement,
    Racing,
    TerritoryControl,
}

impl Genre {
    /// Grid genres place players on a size x size board; racing uses a
    /// one-dimensional track.
    #[must_use]
    pub fn is_grid(self) -> bool {
        !matches!(self, Genre::Racing)
    }
}

/// Board shape emitted by the generator.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum BoardKind {
    #[default]
    Grid,
    ResourceMap,
    Track,
}

/// Board descriptor. `size` applies to grid boards, `length` to tracks.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardConfig {
    #[serde(rename = "type", default)]
    pub kind: BoardKind,

    /// Side length of a square grid board.
    #[serde(default = "default_board_size")]
    pub size: u16,

    /// Number of spaces on a racing track.
    #[serde(default = "default_track_length")]
    pub length: u16,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            kind: BoardKind::Grid,
            size: default_board_size(),
            length: default_track_length(),
        }
    }
}

/// Win-condition type.
///
/// Types the engine does not recognize deserialize to `Unknown`, which is
/// never satisfied. Generator configs are contractually well-formed, so an
/// unknown type means the game simply runs to the turn ceiling.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case", from = "String")]
pub enum WinKind {
    RaceFinish,
    ResourceCollection,
    TerritoryControl,
    #[default]
    PositionOrElimination,
    Unknown,
}

impl From<String> for WinKind {
    fn from(value: String) -> Self {
        match value.as_str() {
            "race_finish" => WinKind::RaceFinish,
            "resource_collection" => WinKind::ResourceCollection,
            "territory_control" => WinKind::TerritoryControl,
            "position_or_elimination" => WinKind::PositionOrElimination,
            _ => WinKind::Unknown,
        }
    }
}

/// Win-condition descriptor: a type plus its parameters.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct WinCondition {
    #[serde(rename = "type", default)]
    pub kind: WinKind,

    /// Goal coordinate for position wins. Defaults to the far corner of the
    /// board when omitted; resolve via [`GameConfig::goal_position`].
    #[serde(default)]
    pub goal_position: Option<(u16, u16)>,

    /// Resource total required for collection wins.
    #[serde(default = "default_target_resources")]
    pub target_resources: i64,

    /// Fraction of the 100-point control scale required for territory wins.
    #[serde(default = "default_control_percentage")]
    pub control_percentage: f64,
}

impl Default for WinCondition {
    fn default() -> Self {
        Self {
            kind: WinKind::default(),
            goal_position: None,
            target_resources: default_target_resources(),
            control_percentage: default_control_percentage(),
        }
    }
}

impl WinCondition {
    /// Race win: first player at or past the end of the track.
    #[must_use]
    pub fn race_finish() -> Self {
        Self {
            kind: WinKind::RaceFinish,
            ..Self::default()
        }
    }

    /// Collection win: first player holding `target` resources.
    #[must_use]
    pub fn resource_collection(target: i64) -> Self {
        Self {
            kind: WinKind::ResourceCollection,
            target_resources: target,
            ..Self::default()
        }
    }

    /// Territory win: first player scoring `fraction` of the 100-point scale.
    #[must_use]
    pub fn territory_control(fraction: f64) -> Self {
        Self {
            kind: WinKind::TerritoryControl,
            control_percentage: fraction,
            ..Self::default()
        }
    }

    /// Position win: first player standing exactly on `goal`.
    #[must_use]
    pub fn position(goal: (u16, u16)) -> Self {
        Self {
            kind: WinKind::PositionOrElimination,
            goal_position: Some(goal),
            ..Self::default()
        }
    }
}

/// Genre-specific numeric and boolean rule parameters.
///
/// The generator emits only the parameters relevant to a genre; the rest
/// resolve to defaults and are ignored by the other executors.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleSet {
    /// Spaces a racing player advances per turn.
    #[serde(default = "default_base_movement")]
    pub base_movement: i64,

    /// Adds a 0..=2 die bonus to racing movement.
    #[serde(default)]
    pub dice_modifier: bool,

    /// Resources gained per collect action.
    #[serde(default = "default_collection_rate")]
    pub collection_rate: i64,

    /// Capturing rules enable the attack action.
    #[serde(default)]
    pub can_capture: bool,

    /// Resource generation outside the resource genre enables collect.
    #[serde(default)]
    pub resource_generation: bool,

    /// A combat system enables the attack action.
    #[serde(default)]
    pub combat_system: bool,
}

impl Default for RuleSet {
    fn default() -> Self {
        Self {
            base_movement: default_base_movement(),
            dice_modifier: false,
            collection_rate: default_collection_rate(),
            can_capture: false,
            resource_generation: false,
            combat_system: false,
        }
    }
}

/// Mechanics the generator attached to a design.
///
/// Carried for the presentation layer and design records; the executors
/// consume their effects through `RuleSet` flags instead.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mechanic {
    DiceRolling,
    CardDrawing,
    TilePlacement,
    WorkerPlacement,
    AreaControl,
    SetCollection,
    Movement,
}

/// One complete game design, produced by the external generator.
///
/// Immutable once deserialized. Unknown JSON fields are ignored; missing
/// optional fields resolve to the documented defaults.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GameConfig {
    #[serde(default)]
    pub id: String,

    #[serde(default)]
    pub name: String,

    pub genre: Genre,

    #[serde(default = "default_num_players")]
    pub num_players: usize,

    #[serde(default)]
    pub board: BoardConfig,

    #[serde(default)]
    pub win_condition: WinCondition,

    #[serde(default)]
    pub rules: RuleSet,

    #[serde(default)]
    pub mechanics: Vec<Mechanic>,

    /// Phase names within a turn, as generated. Informational.
    #[serde(default)]
    pub turn_structure: Vec<String>,

    /// Scoring table: event name to point value. Informational.
    #[serde(default)]
    pub scoring: FxHashMap<String, i64>,

    #[serde(default = "default_pieces_per_player")]
    pub pieces_per_player: u16,

    /// Generator complexity knob in [0, 1].
    #[serde(default)]
    pub complexity: f64,

    /// Turn ceiling: every game terminates by this many turns.
    #[serde(default = "default_max_turns")]
    pub max_turns: u32,
}

impl GameConfig {
    /// Create a config for `genre` with every optional field at its default.
    #[must_use]
    pub fn new(genre: Genre) -> Self {
        Self {
            id: String::new(),
            name: String::new(),
            genre,
            num_players: default_num_players(),
            board: BoardConfig::default(),
            win_condition: WinCondition::default(),
            rules: RuleSet::default(),
            mechanics: Vec::new(),
            turn_structure: Vec::new(),
            scoring: FxHashMap::default(),
            pieces_per_player: default_pieces_per_player(),
            complexity: 0.0,
            max_turns: default_max_turns(),
        }
    }

    /// Set the player count.
    #[must_use]
    pub fn with_players(mut self, count: usize) -> Self {
        self.num_players = count;
        self
    }

    /// Set the grid board side length.
    #[must_use]
    pub fn with_board_size(mut self, size: u16) -> Self {
        self.board.size = size;
        self
    }

    /// Set the racing track length.
    #[must_use]
    pub fn with_track_length(mut self, length: u16) -> Self {
        self.board.kind = BoardKind::Track;
        self.board.length = length;
        self
    }

    /// Set the win condition.
    #[must_use]
    pub fn with_win_condition(mut self, win: WinCondition) -> Self {
        self.win_condition = win;
        self
    }

    /// Set the rule parameters.
    #[must_use]
    pub fn with_rules(mut self, rules: RuleSet) -> Self {
        self.rules = rules;
        self
    }

    /// Set the turn ceiling.
    #[must_use]
    pub fn with_max_turns(mut self, max_turns: u32) -> Self {
        self.max_turns = max_turns;
        self
    }

    /// Goal coordinate for position wins: the configured goal, or the far
    /// corner of the board when the generator omitted one.
    #[must_use]
    pub fn goal_position(&self) -> (u16, u16) {
        self.win_condition
            .goal_position
            .unwrap_or((self.board.size - 1, self.board.size - 1))
    }

    /// Whether the configuration enables the collect action.
    #[must_use]
    pub fn allows_collect(&self) -> bool {
        self.genre == Genre::ResourceManagement || self.rules.resource_generation
    }

    /// Whether the configuration enables the attack action.
    #[must_use]
    pub fn allows_attack(&self) -> bool {
        self.rules.can_capture || self.rules.combat_system
    }
}

fn default_board_size() -> u16 {
    8
}

fn default_track_length() -> u16 {
    30
}

fn default_target_resources() -> i64 {
    50
}

fn default_control_percentage() -> f64 {
    0.6
}

fn default_base_movement() -> i64 {
    2
}

fn default_collection_rate() -> i64 {
    2
}

fn default_num_players() -> usize {
    2
}

fn default_pieces_per_player() -> u16 {
    1
}

fn default_max_turns() -> u32 {
    100
}
