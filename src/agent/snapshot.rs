//! Flat JSON model snapshots.
//!
//! One file per agent: `{agent_id, entries, stats}` with value-table
//! entries keyed by a textual `<state key>:<action>` encoding. Loading
//! parses the whole artifact before touching the agent, so a malformed or
//! missing file is reported and leaves in-memory state unchanged.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::core::{Action, Position, StateKey};
use crate::error::SnapshotError;

use super::learner::Agent;
use super::value_table::{TableKey, ValueTable};

#[derive(Debug, Serialize, Deserialize)]
struct ModelSnapshot {
    agent_id: u8,
    /// BTreeMap keeps the artifact diffable across saves.
    entries: BTreeMap<String, f64>,
    #[serde(default)]
    stats: SnapshotStats,
}

/// Persisted summary stats. Every field is optional on reload; absent
/// fields keep the agent's current values where that is meaningful.
#[derive(Debug, Default, Serialize, Deserialize)]
struct SnapshotStats {
    #[serde(default)]
    wins: u32,
    #[serde(default)]
    games_played: u32,
    #[serde(default)]
    total_reward: f64,
    #[serde(default)]
    epsilon: Option<f64>,
}

fn encode_key(key: &TableKey) -> String {
    format!("{}:{}", key.0, key.1)
}

fn decode_key(text: &str) -> Result<TableKey, SnapshotError> {
    let bad = || SnapshotError::Key(text.to_string());

    let (state_part, action_part) = text.rsplit_once(':').ok_or_else(bad)?;
    let action = Action::parse(action_part).ok_or_else(bad)?;

    let mut fields = state_part.split('|');
    let position = parse_position(fields.next().ok_or_else(bad)?).ok_or_else(bad)?;
    let opponents = fields.next().and_then(|s| s.parse().ok()).ok_or_else(bad)?;
    let resources = fields.next().and_then(|s| s.parse().ok()).ok_or_else(bad)?;
    let turn_mod = fields.next().and_then(|s| s.parse().ok()).ok_or_else(bad)?;
    if fields.next().is_some() {
        return Err(bad());
    }

    Ok((
        StateKey {
            position,
            opponents,
            resources,
            turn_mod,
        },
        action,
    ))
}

fn parse_position(text: &str) -> Option<Position> {
    if let Some(track) = text.strip_prefix('t') {
        return track.parse().ok().map(Position::Track);
    }
    let (x, y) = text.split_once(',')?;
    Some(Position::Grid {
        x: x.parse().ok()?,
        y: y.parse().ok()?,
    })
}

impl Agent {
    /// Write this agent's model (value table plus summary stats) to `path`
    /// as a flat JSON artifact.
    pub fn save_model(&self, path: impl AsRef<Path>) -> Result<(), SnapshotError> {
        let stats = self.stats();
        let snapshot = ModelSnapshot {
            agent_id: stats.player_id,
            entries: self
                .table()
                .iter()
                .map(|(key, &value)| (encode_key(key), value))
                .collect(),
            stats: SnapshotStats {
                wins: stats.wins,
                games_played: stats.games_played,
                total_reward: stats.total_reward,
                epsilon: Some(stats.epsilon),
            },
        };

        fs::write(path, serde_json::to_string_pretty(&snapshot)?)?;
        Ok(())
    }

    /// Reload a model previously written by [`Agent::save_model`].
    ///
    /// The artifact is parsed completely before any mutation: on a missing
    /// file, malformed JSON or an undecodable key, the failure is logged
    /// and the agent keeps its prior table and stats.
    pub fn load_model(&mut self, path: impl AsRef<Path>) -> Result<(), SnapshotError> {
        let path = path.as_ref();

        let loaded = (|| -> Result<(u8, ValueTable, SnapshotStats), SnapshotError> {
            let snapshot: ModelSnapshot = serde_json::from_str(&fs::read_to_string(path)?)?;

            let mut table = ValueTable::new();
            for (text, value) in &snapshot.entries {
                let (key, action) = decode_key(text)?;
                table.set(key, action, *value);
            }
            Ok((snapshot.agent_id, table, snapshot.stats))
        })();

        match loaded {
            Ok((agent_id, table, stats)) => {
                if agent_id != self.id().index() as u8 {
                    warn!(
                        artifact_seat = agent_id,
                        seat = self.id().index() as u8,
                        "snapshot was written for a different seat"
                    );
                }
                self.restore(
                    table,
                    stats.wins,
                    stats.games_played,
                    stats.total_reward,
                    stats.epsilon,
                );
                Ok(())
            }
            Err(err) => {
                warn!(path = %path.display(), %err, "model load failed; agent unchanged");
                Err(err)
            }
        }
    }
}
