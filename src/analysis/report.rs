//! Balance report value types.

use serde::{Deserialize, Serialize};

use crate::core::PlayerMap;

/// Five-level letter grade derived from the fairness score, plus an
/// undetermined grade for batches with no data.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BalanceGrade {
    Excellent,
    Good,
    Fair,
    Poor,
    Unbalanced,
    Undetermined,
}

impl BalanceGrade {
    /// Grade a fairness score on the 90/75/60/45 thresholds.
    #[must_use]
    pub fn from_fairness(fairness: f64) -> Self {
        if fairness >= 90.0 {
            BalanceGrade::Excellent
        } else if fairness >= 75.0 {
            BalanceGrade::Good
        } else if fairness >= 60.0 {
            BalanceGrade::Fair
        } else if fairness >= 45.0 {
            BalanceGrade::Poor
        } else {
            BalanceGrade::Unbalanced
        }
    }

    /// The letter alone.
    #[must_use]
    pub fn letter(self) -> &'static str {
        match self {
            BalanceGrade::Excellent => "A",
            BalanceGrade::Good => "B",
            BalanceGrade::Fair => "C",
            BalanceGrade::Poor => "D",
            BalanceGrade::Unbalanced => "F",
            BalanceGrade::Undetermined => "N/A",
        }
    }
}

impl std::fmt::Display for BalanceGrade {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BalanceGrade::Excellent => write!(f, "A (Excellent)"),
            BalanceGrade::Good => write!(f, "B (Good)"),
            BalanceGrade::Fair => write!(f, "C (Fair)"),
            BalanceGrade::Poor => write!(f, "D (Poor)"),
            BalanceGrade::Unbalanced => write!(f, "F (Unbalanced)"),
            BalanceGrade::Undetermined => write!(f, "N/A"),
        }
    }
}

/// Balance metrics for one batch of completed games.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct BalanceReport {
    /// Games in the batch, decided or not.
    pub total_games: usize,

    /// Per-seat win percentage over decided games. Sums to 100 when at
    /// least one game was decided, 0 otherwise.
    pub win_distribution: PlayerMap<f64>,

    /// 0-100; 100 means wins are spread perfectly evenly.
    pub fairness_score: f64,

    /// Mean game length in turns.
    pub average_game_length: f64,

    /// Population standard deviation of game length.
    pub game_length_std: f64,

    /// 0-100, from game length and its variation.
    pub complexity_score: f64,

    /// 0-100, highest when games land in the 20-40 turn band.
    pub engagement_score: f64,

    pub balance_grade: BalanceGrade,

    /// Rule-based guidance for the designer; one positive message when no
    /// threshold triggers, empty on an empty batch.
    pub recommendations: Vec<String>,
}

impl BalanceReport {
    /// The defined all-zero report for an empty batch.
    #[must_use]
    pub fn empty(player_count: usize) -> Self {
        Self {
            total_games: 0,
            win_distribution: PlayerMap::with_value(player_count, 0.0),
            fairness_score: 0.0,
            average_game_length: 0.0,
            game_length_std: 0.0,
            complexity_score: 0.0,
            engagement_score: 0.0,
            balance_grade: BalanceGrade::Undetermined,
            recommendations: Vec::new(),
        }
    }

    /// Combined fairness/engagement average used when comparing designs.
    #[must_use]
    pub fn combined_score(&self) -> f64 {
        (self.fairness_score + self.engagement_score) / 2.0
    }
}

/// Which of two compared batches a metric favors.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    Tied,
    First,
    Second,
}

/// Side-by-side analysis of two batches of the same player count.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GameComparison {
    pub first: BalanceReport,
    pub second: BalanceReport,

    /// Strict comparison on fairness alone.
    pub better_fairness: Verdict,

    /// Strict comparison on engagement alone.
    pub better_engagement: Verdict,

    /// Overall verdict on the combined score, tied within a small margin.
    pub verdict: Verdict,
}

impl GameComparison {
    /// One-line human-readable conclusion.
    #[must_use]
    pub fn summary(&self) -> String {
        match self.verdict {
            Verdict::Tied => "Both designs are similarly balanced.".to_string(),
            Verdict::First => {
                "The first design shows better overall balance and engagement.".to_string()
            }
            Verdict::Second => {
                "The second design shows better overall balance and engagement.".to_string()
            }
        }
    }
}
