//! Cheat-risk scoring engine
//!
//! Invariants:
//! - Pure and synchronous: no I/O, clocks or shared state
//! - Per-format scores are capped once, after the account-age multiplier
//! - Identical input yields an identical result

pub mod aggregate;
pub mod confidence;
pub mod level;
pub mod selector;
pub mod signals;

pub use aggregate::{account_age_multiplier, evaluate_format};
pub use confidence::{confidence_weight, ConfidenceWeights};
pub use level::RiskLevel;
pub use selector::{calculate_risk_score, score_player};
pub use signals::{accuracy_score, win_rate_score, SignalScore};
