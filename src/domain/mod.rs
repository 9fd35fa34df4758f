pub mod models;
pub mod outcomes;
pub mod results;
pub mod validation;

pub use models::{
    AccuracyStats, FormatStats, GameOutcome, GameRecord, GamesCounts, LifetimeRecord,
    PlayerMetrics, RecentGames, TimeClass,
};
pub use outcomes::map_result_code;
pub use results::{
    FactorBreakdown, FormatRiskResult, HeadlineScore, NoScoreReason, RiskFactors,
    RiskScoreResult, SignalReason,
};
pub use validation::{ensure_valid, validate_metrics, ValidationIssue, ValidationReport};
