//! Balance analysis: batch metrics, grades, recommendations, comparisons.

pub mod analyzer;
pub mod report;

pub use analyzer::BalanceAnalyzer;
pub use report::{BalanceGrade, BalanceReport, GameComparison, Verdict};
