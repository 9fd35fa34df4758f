//! Single-signal scorers.
//!
//! Each scorer maps one normalized signal onto a base score and scales it
//! by the sample-size confidence. Base scores are not capped here; the cap
//! is applied once per format by the aggregator.

use super::confidence::ConfidenceWeights;
use crate::config::settings::{AccuracyCurve, WinRateCurve};
use crate::domain::SignalReason;

/// Result of one scorer, kept whole for the audit trail
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SignalScore {
    pub base_score: f64,
    pub confidence: f64,
    /// `base_score * confidence`
    pub score: f64,
    pub reason: Option<SignalReason>,
}

impl SignalScore {
    fn weighted(base_score: f64, confidence: f64, reason: Option<SignalReason>) -> Self {
        Self {
            base_score,
            confidence,
            score: base_score * confidence,
            reason,
        }
    }
}

/// Score a win rate given as a fraction in [0, 1]
pub fn win_rate_score(
    win_rate: f64,
    total_games: u32,
    curve: &WinRateCurve,
    weights: &mut ConfidenceWeights,
) -> SignalScore {
    let base = win_rate_base_score(win_rate, curve);
    SignalScore::weighted(base, weights.weight(total_games), None)
}

fn win_rate_base_score(win_rate: f64, curve: &WinRateCurve) -> f64 {
    let first_step = curve.baseline + curve.band;
    let second_step = first_step + curve.band;

    if win_rate.is_nan() || win_rate <= curve.baseline {
        0.0
    } else if win_rate <= first_step {
        (win_rate - curve.baseline) / curve.band * curve.base_score
    } else if win_rate <= second_step {
        curve.base_score + (win_rate - first_step) / curve.band * curve.base_score
    } else {
        curve.extended_score + (win_rate - second_step) / curve.band * curve.extended_score
    }
}

/// Score the share of high-accuracy games, given as a percentage
pub fn accuracy_score(
    percentage: f64,
    sample_count: u32,
    curve: &AccuracyCurve,
    weights: &mut ConfidenceWeights,
) -> SignalScore {
    let confidence = weights.weight(sample_count);

    if sample_count == 0 || percentage.is_nan() {
        return SignalScore::weighted(0.0, confidence, Some(SignalReason::NoAccuracyData));
    }
    if percentage <= curve.moderate_suspicion_threshold {
        return SignalScore::weighted(0.0, confidence, Some(SignalReason::BelowThreshold));
    }

    SignalScore::weighted(accuracy_base_score(percentage, curve), confidence, None)
}

fn accuracy_base_score(percentage: f64, curve: &AccuracyCurve) -> f64 {
    if percentage <= curve.high_suspicion_threshold {
        let span = curve.high_suspicion_threshold - curve.moderate_suspicion_threshold;
        (percentage - curve.moderate_suspicion_threshold) / span * curve.moderate_max_score
    } else if percentage <= curve.step_threshold {
        let span = curve.step_threshold - curve.high_suspicion_threshold;
        let ramp = curve.high_max_score - curve.moderate_max_score;
        curve.moderate_max_score + (percentage - curve.high_suspicion_threshold) / span * ramp
    } else {
        // Flat bonus per full step, never interpolated
        let steps = ((percentage - curve.step_threshold) / curve.step_width).floor();
        curve.high_max_score + steps * curve.step_bonus
    }
}
