//! Batch balance analysis.
//!
//! Consumes completed `SimulationResult`s and produces the fairness,
//! complexity and engagement metrics plus a grade and recommendations.
//! An empty batch yields the defined all-zero report rather than failing.

use tracing::debug;

use crate::core::{PlayerId, PlayerMap};
use crate::sim::SimulationResult;

use super::report::{BalanceGrade, BalanceReport, GameComparison, Verdict};

/// Fairness below this triggers the imbalance recommendation.
const LOW_FAIRNESS: f64 = 60.0;

/// Mean-length thresholds for the pacing recommendations.
const SHORT_GAME: f64 = 10.0;
const LONG_GAME: f64 = 60.0;

/// Complexity thresholds.
const LOW_COMPLEXITY: f64 = 30.0;
const HIGH_COMPLEXITY: f64 = 80.0;

/// Engagement threshold.
const LOW_ENGAGEMENT: f64 = 50.0;

/// Combined scores within this margin compare as tied.
const TIE_MARGIN: f64 = 5.0;

/// The engagement curve is flat at 100 inside this band of mean turns.
const ENGAGEMENT_BAND: std::ops::RangeInclusive<f64> = 20.0..=40.0;

/// Turns batch statistics into balance metrics and recommendations.
///
/// Stateless apart from a history of the reports it has produced.
#[derive(Debug, Default)]
pub struct BalanceAnalyzer {
    history: Vec<BalanceReport>,
}

impl BalanceAnalyzer {
    /// Create an analyzer with an empty report history.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Analyze one batch of results for a `player_count`-seat design.
    ///
    /// An empty batch returns the all-zero report and is not recorded in
    /// the history.
    pub fn analyze(
        &mut self,
        results: &[SimulationResult],
        player_count: usize,
    ) -> BalanceReport {
        if results.is_empty() {
            return BalanceReport::empty(player_count);
        }

        let report = self.build_report(results, player_count);
        self.history.push(report.clone());
        report
    }

    /// Analyze two batches of the same design family and compare them.
    ///
    /// The overall verdict is on the combined fairness/engagement average,
    /// tied when the difference stays within a small margin.
    pub fn compare(
        &mut self,
        first: &[SimulationResult],
        second: &[SimulationResult],
        player_count: usize,
    ) -> GameComparison {
        let first = self.analyze(first, player_count);
        let second = self.analyze(second, player_count);

        let verdict = {
            let diff = first.combined_score() - second.combined_score();
            if diff.abs() < TIE_MARGIN {
                Verdict::Tied
            } else if diff > 0.0 {
                Verdict::First
            } else {
                Verdict::Second
            }
        };

        GameComparison {
            better_fairness: strict_verdict(first.fairness_score, second.fairness_score),
            better_engagement: strict_verdict(first.engagement_score, second.engagement_score),
            verdict,
            first,
            second,
        }
    }

    /// Every report produced so far, oldest first.
    #[must_use]
    pub fn history(&self) -> &[BalanceReport] {
        &self.history
    }

    fn build_report(&self, results: &[SimulationResult], player_count: usize) -> BalanceReport {
        let winners: Vec<PlayerId> = results.iter().filter_map(|r| r.winner).collect();
        let turns: Vec<f64> = results.iter().map(|r| f64::from(r.turns)).collect();

        let win_distribution = win_distribution(&winners, player_count);
        let fairness_score = fairness(&win_distribution, winners.len());
        let average_game_length = mean(&turns);
        let game_length_std = population_std(&turns);
        let complexity_score = complexity(average_game_length, game_length_std);
        let engagement_score = engagement(average_game_length);

        let mut report = BalanceReport {
            total_games: results.len(),
            win_distribution,
            fairness_score,
            average_game_length,
            game_length_std,
            complexity_score,
            engagement_score,
            balance_grade: BalanceGrade::from_fairness(fairness_score),
            recommendations: Vec::new(),
        };
        report.recommendations = recommendations(&report);

        debug!(
            games = report.total_games,
            fairness = report.fairness_score,
            grade = %report.balance_grade,
            "batch analyzed"
        );
        report
    }
}

fn strict_verdict(first: f64, second: f64) -> Verdict {
    if first > second {
        Verdict::First
    } else if second > first {
        Verdict::Second
    } else {
        Verdict::Tied
    }
}

/// Per-seat win percentages over decided games; all zero when none were.
fn win_distribution(winners: &[PlayerId], player_count: usize) -> PlayerMap<f64> {
    let mut counts = PlayerMap::with_value(player_count, 0usize);
    for &winner in winners {
        counts[winner] += 1;
    }

    if winners.is_empty() {
        return PlayerMap::with_value(player_count, 0.0);
    }

    PlayerMap::new(player_count, |p| {
        counts[p] as f64 / winners.len() as f64 * 100.0
    })
}

/// `100 * (1 - min(var / maxvar, 1))`, where maxvar is the variance of the
/// one-player-wins-everything distribution, `(100 / N)^2`.
fn fairness(distribution: &PlayerMap<f64>, decided_games: usize) -> f64 {
    if decided_games == 0 {
        return 0.0;
    }

    let percentages: Vec<f64> = distribution.values().copied().collect();
    let variance = population_variance(&percentages);
    let max_variance = (100.0 / distribution.player_count() as f64).powi(2);

    100.0 * (1.0 - (variance / max_variance).min(1.0))
}

/// Two capped terms, up to 50 points each: one for mean length, one for
/// length variation.
fn complexity(average_length: f64, length_std: f64) -> f64 {
    let length_score = (average_length / 50.0 * 50.0).min(50.0);
    let variation_score = (length_std / 10.0 * 50.0).min(50.0);
    length_score + variation_score
}

/// Average of the banded length curve and a fixed 50-point baseline. The
/// curve is 100 inside the target band, rises linearly below it and falls
/// linearly above it.
fn engagement(average_length: f64) -> f64 {
    let length_engagement = if ENGAGEMENT_BAND.contains(&average_length) {
        100.0
    } else if average_length < *ENGAGEMENT_BAND.start() {
        average_length / ENGAGEMENT_BAND.start() * 100.0
    } else {
        (100.0 - (average_length - ENGAGEMENT_BAND.end()) * 2.0).max(0.0)
    };

    (length_engagement + 50.0) / 2.0
}

fn recommendations(report: &BalanceReport) -> Vec<String> {
    let mut out = Vec::new();

    if report.fairness_score < LOW_FAIRNESS {
        out.push(
            "Win rates are skewed; consider adjusting starting positions or mechanics."
                .to_string(),
        );
    }

    if report.average_game_length < SHORT_GAME {
        out.push("Games are very short; consider increasing complexity or board size.".to_string());
    } else if report.average_game_length > LONG_GAME {
        out.push("Games run long; consider speeding up win conditions.".to_string());
    }

    if report.complexity_score < LOW_COMPLEXITY {
        out.push("Low complexity; add more mechanics or strategic depth.".to_string());
    } else if report.complexity_score > HIGH_COMPLEXITY {
        out.push("High complexity; may overwhelm casual players.".to_string());
    }

    if report.engagement_score < LOW_ENGAGEMENT {
        out.push("Low engagement; improve pacing toward the 20-40 turn band.".to_string());
    }

    if out.is_empty() {
        out.push(
            "Game shows good balance; continue training agents for further optimization."
                .to_string(),
        );
    }

    out
}

fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

fn population_variance(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let m = mean(values);
    values.iter().map(|v| (v - m).powi(2)).sum::<f64>() / values.len() as f64
}

fn population_std(values: &[f64]) -> f64 {
    population_variance(values).sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(winner: Option<u8>, turns: u32) -> SimulationResult {
        SimulationResult {
            winner: winner.map(PlayerId::new),
            turns,
            final_scores: PlayerMap::with_value(4, 0),
            final_resources: PlayerMap::with_value(4, 0),
            history: None,
        }
    }

    /// `games` decided games spread evenly across `players` seats.
    fn uniform_batch(players: u8, games: usize, turns: u32) -> Vec<SimulationResult> {
        (0..games)
            .map(|i| result(Some(i as u8 % players), turns))
            .collect()
    }

    #[test]
    fn test_empty_batch_is_zero_report() {
        let mut analyzer = BalanceAnalyzer::new();
        let report = analyzer.analyze(&[], 4);

        assert_eq!(report.total_games, 0);
        assert_eq!(report.fairness_score, 0.0);
        assert_eq!(report.balance_grade, BalanceGrade::Undetermined);
        assert_eq!(report.win_distribution.player_count(), 4);
        assert!(report.win_distribution.values().all(|&p| p == 0.0));
    }

    #[test]
    fn test_uniform_wins_score_perfect_fairness() {
        let mut analyzer = BalanceAnalyzer::new();
        let report = analyzer.analyze(&uniform_batch(4, 100, 30), 4);

        assert_eq!(report.fairness_score, 100.0);
        assert_eq!(report.balance_grade, BalanceGrade::Excellent);
        for (_, &pct) in report.win_distribution.iter() {
            assert!((pct - 25.0).abs() < 1e-9);
        }
    }

    #[test]
    fn test_single_dominant_winner_scores_zero() {
        let results: Vec<_> = (0..50).map(|_| result(Some(0), 30)).collect();
        let mut analyzer = BalanceAnalyzer::new();
        let report = analyzer.analyze(&results, 4);

        assert_eq!(report.fairness_score, 0.0);
        assert_eq!(report.balance_grade, BalanceGrade::Unbalanced);
        assert_eq!(report.win_distribution[PlayerId::new(0)], 100.0);
    }

    #[test]
    fn test_distribution_sums_to_100_when_decided() {
        let mut results = uniform_batch(3, 10, 25);
        // Undecided games don't enter the distribution.
        results.push(result(None, 100));
        results.push(result(None, 100));

        let mut analyzer = BalanceAnalyzer::new();
        let report = analyzer.analyze(&results, 3);

        let sum: f64 = report.win_distribution.values().sum();
        assert!((sum - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_distribution_sums_to_zero_when_undecided() {
        let results = vec![result(None, 100), result(None, 100)];
        let mut analyzer = BalanceAnalyzer::new();
        let report = analyzer.analyze(&results, 2);

        let sum: f64 = report.win_distribution.values().sum();
        assert_eq!(sum, 0.0);
        assert_eq!(report.fairness_score, 0.0);
    }

    #[test]
    fn test_game_length_statistics() {
        let results = vec![
            result(Some(0), 20),
            result(Some(1), 30),
            result(Some(0), 40),
        ];
        let mut analyzer = BalanceAnalyzer::new();
        let report = analyzer.analyze(&results, 2);

        assert!((report.average_game_length - 30.0).abs() < 1e-9);
        // Population std of [20, 30, 40].
        assert!((report.game_length_std - (200.0f64 / 3.0).sqrt()).abs() < 1e-9);
    }

    #[test]
    fn test_complexity_caps() {
        // Both terms saturate.
        assert_eq!(complexity(80.0, 25.0), 100.0);
        // Mid-range values score proportionally.
        assert_eq!(complexity(25.0, 5.0), 50.0);
        assert_eq!(complexity(0.0, 0.0), 0.0);
    }

    #[test]
    fn test_engagement_curve() {
        // Inside the band.
        assert_eq!(engagement(20.0), 75.0);
        assert_eq!(engagement(30.0), 75.0);
        assert_eq!(engagement(40.0), 75.0);
        // Linear rise below.
        assert_eq!(engagement(10.0), 50.0);
        assert_eq!(engagement(0.0), 25.0);
        // Linear fall above, floored at the baseline.
        assert_eq!(engagement(50.0), 65.0);
        assert_eq!(engagement(100.0), 25.0);
    }

    #[test]
    fn test_balanced_batch_gets_positive_recommendation() {
        let mut analyzer = BalanceAnalyzer::new();
        let report = analyzer.analyze(&uniform_batch(2, 40, 30), 2);

        assert_eq!(report.recommendations.len(), 1);
        assert!(report.recommendations[0].contains("good balance"));
    }

    #[test]
    fn test_skewed_short_games_trigger_recommendations() {
        let results: Vec<_> = (0..20).map(|_| result(Some(0), 3)).collect();
        let mut analyzer = BalanceAnalyzer::new();
        let report = analyzer.analyze(&results, 2);

        let text = report.recommendations.join("\n");
        assert!(text.contains("skewed"));
        assert!(text.contains("very short"));
        assert!(text.contains("Low complexity"));
        assert!(text.contains("Low engagement"));
    }

    #[test]
    fn test_long_games_trigger_pacing_recommendation() {
        let results: Vec<_> = (0u32..20)
            .map(|i| result(Some((i % 2) as u8), 90 + (i % 5)))
            .collect();
        let mut analyzer = BalanceAnalyzer::new();
        let report = analyzer.analyze(&results, 2);

        assert!(report
            .recommendations
            .iter()
            .any(|r| r.contains("speeding up win conditions")));
    }

    #[test]
    fn test_comparison_verdicts() {
        let mut analyzer = BalanceAnalyzer::new();

        // Balanced 30-turn games vs one-sided 3-turn games.
        let good = uniform_batch(2, 40, 30);
        let bad: Vec<_> = (0..40).map(|_| result(Some(0), 3)).collect();

        let comparison = analyzer.compare(&good, &bad, 2);
        assert_eq!(comparison.verdict, Verdict::First);
        assert_eq!(comparison.better_fairness, Verdict::First);
        assert!(comparison.summary().contains("first design"));

        let comparison = analyzer.compare(&bad, &good, 2);
        assert_eq!(comparison.verdict, Verdict::Second);
    }

    #[test]
    fn test_comparison_tie_margin() {
        let mut analyzer = BalanceAnalyzer::new();
        let batch = uniform_batch(2, 40, 30);

        let comparison = analyzer.compare(&batch, &batch.clone(), 2);
        assert_eq!(comparison.verdict, Verdict::Tied);
        assert_eq!(comparison.better_fairness, Verdict::Tied);
        assert!(comparison.summary().contains("similarly balanced"));
    }

    #[test]
    fn test_history_accumulates() {
        let mut analyzer = BalanceAnalyzer::new();
        assert!(analyzer.history().is_empty());

        // Empty batches are answered but not recorded.
        analyzer.analyze(&[], 2);
        assert!(analyzer.history().is_empty());

        analyzer.analyze(&uniform_batch(2, 10, 30), 2);
        assert_eq!(analyzer.history().len(), 1);

        // A comparison analyzes both batches.
        analyzer.compare(&uniform_batch(2, 10, 30), &uniform_batch(2, 10, 30), 2);
        assert_eq!(analyzer.history().len(), 3);
    }
}
