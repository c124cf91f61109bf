//! Genre-specific action execution.
//!
//! One executor per genre, selected by the config's `Genre` discriminator.
//! Each maps (state, action) to a new state and a scalar reward, and every
//! step pays a small fixed cost so agents learn to resolve games quickly.
//! Non-movement actions a genre does not interpret (e.g. `Attack`) leave
//! the state unchanged and earn only the step cost.

use crate::core::{Action, GameConfig, GameRng, GameState, Genre, PlayerId, Position};

/// Flat cost charged on every step.
pub(crate) const STEP_COST: f64 = 0.01;

/// Racing reward per space advanced.
const ADVANCE_REWARD: f64 = 0.5;

/// Racing bonus for crossing the finish line.
const FINISH_BONUS: f64 = 100.0;

/// Flat reward for repositioning in the resource genre.
const EXPLORE_REWARD: f64 = 0.1;

/// Reward and score granted for a successful territory claim.
const CLAIM_REWARD: f64 = 5.0;
const CLAIM_SCORE: i64 = 3;

/// Chance that a move into unoccupied ground wins the contested claim.
const CLAIM_CHANCE: f64 = 0.3;

/// Strategy rewards for moving toward/away from the goal.
const TOWARD_GOAL_REWARD: f64 = 1.0;
const AWAY_FROM_GOAL_PENALTY: f64 = -0.5;

/// Execute `action` for `player`, mutating `state` and returning the step
/// reward (net of the step cost).
pub(crate) fn execute(
    state: &mut GameState,
    config: &GameConfig,
    player: PlayerId,
    action: Action,
    rng: &mut GameRng,
) -> f64 {
    let reward = match config.genre {
        Genre::Racing => execute_racing(state, config, player, action, rng),
        Genre::ResourceManagement => execute_resources(state, config, player, action),
        Genre::TerritoryControl => execute_territory(state, player, action, rng),
        Genre::Strategy => execute_strategy(state, config, player, action),
    };

    reward - STEP_COST
}

/// Advance along the track; score mirrors position.
fn execute_racing(
    state: &mut GameState,
    config: &GameConfig,
    player: PlayerId,
    action: Action,
    rng: &mut GameRng,
) -> f64 {
    let Position::Track(current) = state.positions[player] else {
        return 0.0;
    };
    let end = i64::from(state.track_length) - 1;

    let mut movement = 0;
    if action == Action::Advance {
        movement = config.rules.base_movement;
        if config.rules.dice_modifier {
            movement += rng.gen_range(0..3);
        }
    }

    let new_pos = (i64::from(current) + movement).min(end);
    state.positions[player] = Position::Track(new_pos as u16);
    state.scores[player] = new_pos;

    let mut reward = movement as f64 * ADVANCE_REWARD;
    if new_pos >= end {
        reward += FINISH_BONUS;
    }
    reward
}

/// Collect resources or reposition; score mirrors the resource counter.
fn execute_resources(
    state: &mut GameState,
    config: &GameConfig,
    player: PlayerId,
    action: Action,
) -> f64 {
    let mut reward = 0.0;

    if action == Action::Collect {
        let rate = config.rules.collection_rate;
        state.resources[player] += rate;
        reward = rate as f64;
    } else if action.is_grid_move() {
        state.positions[player] = step_grid(state.positions[player], action, state.board_size);
        reward = EXPLORE_REWARD;
    }

    state.scores[player] = state.resources[player];
    reward
}

/// Reposition and attempt to claim the destination. Claims fail on ground
/// another live player occupies, and otherwise pass a fixed contest roll.
fn execute_territory(
    state: &mut GameState,
    player: PlayerId,
    action: Action,
    rng: &mut GameRng,
) -> f64 {
    if !action.is_grid_move() {
        return 0.0;
    }

    let destination = step_grid(state.positions[player], action, state.board_size);

    let mut reward = 0.0;
    if !state.is_occupied_by_other(player, destination) && rng.gen_bool(CLAIM_CHANCE) {
        reward = CLAIM_REWARD;
        state.scores[player] += CLAIM_SCORE;
    }

    state.positions[player] = destination;
    reward
}

/// Reposition toward the goal coordinate; reward follows the change in
/// Manhattan distance, score counts moves.
fn execute_strategy(
    state: &mut GameState,
    config: &GameConfig,
    player: PlayerId,
    action: Action,
) -> f64 {
    if !action.is_grid_move() {
        return 0.0;
    }

    let goal = config.goal_position();
    let current = state.positions[player];
    let destination = step_grid(current, action, state.board_size);

    let old_dist = current.manhattan_to(goal);
    let new_dist = destination.manhattan_to(goal);

    state.positions[player] = destination;
    state.scores[player] += 1;

    if new_dist < old_dist {
        TOWARD_GOAL_REWARD
    } else if new_dist > old_dist {
        AWAY_FROM_GOAL_PENALTY
    } else {
        0.0
    }
}

/// One clamped step on the grid.
fn step_grid(position: Position, action: Action, board_size: u16) -> Position {
    let Position::Grid { mut x, mut y } = position else {
        return position;
    };

    match action {
        Action::MoveLeft => x = x.saturating_sub(1),
        Action::MoveRight => x = (x + 1).min(board_size - 1),
        Action::MoveUp => y = y.saturating_sub(1),
        Action::MoveDown => y = (y + 1).min(board_size - 1),
        _ => {}
    }

    Position::Grid { x, y }
}
