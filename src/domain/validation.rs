use serde::Serialize;
use std::fmt;

use super::models::{FormatStats, PlayerMetrics, TimeClass};
use crate::errors::RiskError;

/// Allowed gap between a reported percentage and the one its counts imply.
/// Covers producers that round to whole percents.
const PERCENTAGE_TOLERANCE: f64 = 0.5;

/// A single invariant violation found in a metrics object
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationIssue {
    pub field: String,
    pub message: String,
}

impl ValidationIssue {
    fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Every issue found in one validation pass
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationReport {
    pub issues: Vec<ValidationIssue>,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.issues.is_empty()
    }

    fn push(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.issues.push(ValidationIssue::new(field, message));
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .issues
            .iter()
            .map(|issue| format!("{}: {}", issue.field, issue.message))
            .collect();
        f.write_str(&parts.join("; "))
    }
}

/// Check the invariants of an externally built metrics object.
///
/// Pure diagnostic: never mutates or coerces the input.
pub fn validate_metrics(metrics: &PlayerMetrics) -> ValidationReport {
    let mut report = ValidationReport::default();

    if metrics.username.trim().is_empty() {
        report.push("username", "must not be empty");
    }

    for (format, stats) in &metrics.formats {
        check_format(*format, stats, &mut report);
    }

    report
}

/// Validate and turn a failing report into an error
pub fn ensure_valid(metrics: &PlayerMetrics) -> Result<(), RiskError> {
    let report = validate_metrics(metrics);
    if report.is_valid() {
        Ok(())
    } else {
        Err(RiskError::InvalidInput(report))
    }
}

fn check_format(format: TimeClass, stats: &FormatStats, report: &mut ValidationReport) {
    let prefix = format!("formats.{}", format);

    let counts = &stats.games_counts;
    let counts_consistent =
        counts.wins as u64 + counts.losses as u64 + counts.draws as u64 == counts.total as u64;
    if !counts_consistent {
        report.push(
            format!("{prefix}.gamesCounts"),
            format!(
                "total {} does not equal wins {} + losses {} + draws {}",
                counts.total, counts.wins, counts.losses, counts.draws
            ),
        );
    }

    let recent = &stats.recent_games;
    let recent_consistent =
        recent.wins as u64 + recent.losses as u64 + recent.draws as u64 == recent.total as u64;
    if !recent_consistent {
        report.push(
            format!("{prefix}.recentGames"),
            format!(
                "total {} does not equal wins {} + losses {} + draws {}",
                recent.total, recent.wins, recent.losses, recent.draws
            ),
        );
    }

    let field = format!("{prefix}.overallWinrate");
    if check_percentage(&field, stats.overall_winrate, report) && counts_consistent {
        let derived = percentage_of(counts.wins, counts.total);
        check_derived(&field, stats.overall_winrate, derived, report);
    }

    let field = format!("{prefix}.recentGames.winrate");
    if check_percentage(&field, recent.winrate, report) && recent_consistent {
        let derived = percentage_of(recent.wins, recent.total);
        check_derived(&field, recent.winrate, derived, report);
    }

    let accuracy = &stats.accuracy;
    let accuracy_consistent = accuracy.high_accuracy_games <= accuracy.games_with_accuracy;
    if !accuracy_consistent {
        report.push(
            format!("{prefix}.accuracy.highAccuracyGames"),
            format!(
                "{} exceeds gamesWithAccuracy {}",
                accuracy.high_accuracy_games, accuracy.games_with_accuracy
            ),
        );
    }
    let field = format!("{prefix}.accuracy.highAccuracyPercentage");
    if check_percentage(&field, accuracy.high_accuracy_percentage, report) && accuracy_consistent {
        let derived = percentage_of(accuracy.high_accuracy_games, accuracy.games_with_accuracy);
        check_derived(&field, accuracy.high_accuracy_percentage, derived, report);
    }
}

/// Range check; false when an issue was recorded
fn check_percentage(field: &str, value: f64, report: &mut ValidationReport) -> bool {
    if !value.is_finite() || !(0.0..=100.0).contains(&value) {
        report.push(field, format!("{} is not a percentage in 0-100", value));
        return false;
    }
    true
}

fn check_derived(field: &str, value: f64, derived: f64, report: &mut ValidationReport) {
    if (value - derived).abs() > PERCENTAGE_TOLERANCE {
        report.push(
            field,
            format!("{} does not match {:.2} computed from the counts", value, derived),
        );
    }
}

fn percentage_of(part: u32, whole: u32) -> f64 {
    if whole == 0 {
        return 0.0;
    }
    part as f64 / whole as f64 * 100.0
}
