//! Terminal and JSON rendering of analyses

use anyhow::{Context, Result};
use colored::Colorize;

use crate::api::models::{HistoryResponse, RiskResponse};
use crate::database::HistoryEntry;
use crate::domain::{FactorBreakdown, FormatRiskResult, RiskFactors};
use crate::risk::RiskLevel;
use crate::services::analysis::Analysis;

pub fn render_text(analysis: &Analysis, color: bool) -> String {
    let result = &analysis.result;
    let headline = &result.max_score;
    let mut output = String::new();

    output.push_str(&format!("Player:      {}\n", result.username));
    output.push_str(&format!(
        "Risk score:  {} / 100  {}\n",
        headline.value,
        paint_level(analysis.level, color)
    ));
    match (headline.format, headline.reason) {
        (Some(format), _) => output.push_str(&format!("Format:      {}\n", format)),
        (None, Some(reason)) => output.push_str(&format!("Format:      none ({})\n", reason.as_str())),
        (None, None) => {}
    }
    output.push_str(&format!(
        "Account age: {} days (x{:.1})\n",
        result.account_age_days, result.account_age_score
    ));

    if let (Some(format), Some(factors)) = (headline.format, headline.factors.as_ref()) {
        output.push('\n');
        output.push_str(&render_factors(&format.to_string(), factors));
    }

    for other in &result.other_formats {
        output.push('\n');
        output.push_str(&render_other(other));
    }

    output
}

pub fn render_json(analysis: &Analysis) -> Result<String> {
    serde_json::to_string_pretty(&RiskResponse::from(analysis.clone()))
        .context("Failed to serialize analysis")
}

pub fn render_history(entries: &[HistoryEntry], color: bool) -> String {
    if entries.is_empty() {
        return "No analyses recorded yet\n".to_string();
    }

    let mut output = format!(
        "{:<26} {:>5}  {:<8} {:<16} {}\n",
        "PLAYER", "SCORE", "FORMAT", "LEVEL", "ANALYZED"
    );
    for entry in entries {
        let format = entry.format.map(|f| f.to_string()).unwrap_or_else(|| "-".to_string());
        let level = format!("{:<16}", entry.risk_level.label());
        output.push_str(&format!(
            "{:<26} {:>5}  {:<8} {} {}\n",
            entry.username,
            entry.score,
            format,
            paint(&level, entry.risk_level, color),
            entry.timestamp.format("%Y-%m-%d %H:%M"),
        ));
    }
    output
}

pub fn render_history_json(entries: &[HistoryEntry]) -> Result<String> {
    serde_json::to_string_pretty(&HistoryResponse {
        items: entries.to_vec(),
        total: entries.len(),
    })
    .context("Failed to serialize history")
}

fn render_factors(format: &str, factors: &RiskFactors) -> String {
    let mut output = format!(
        "{:<16} {:>8} {:>6} {:>8} {:>6} {:>8} {:>12}\n",
        format.to_uppercase(),
        "VALUE",
        "N",
        "BASE",
        "CONF",
        "WEIGHT",
        "CONTRIB"
    );
    for (name, factor) in [
        ("overall winrate", &factors.overall_winrate),
        ("recent winrate", &factors.recent_winrate),
        ("high accuracy", &factors.high_accuracy),
    ] {
        output.push_str(&factor_row(name, factor));
    }
    output.push_str(&format!(
        "weighted {:.2} x{:.1} = {:.2} before cap\n",
        factors.weighted_sum, factors.account_age_multiplier, factors.before_cap
    ));
    output
}

fn factor_row(name: &str, factor: &FactorBreakdown) -> String {
    let note = factor
        .reason
        .map(|reason| format!("  ({})", reason.as_str()))
        .unwrap_or_default();
    format!(
        "{:<16} {:>7.1}% {:>6} {:>8.1} {:>6.2} {:>8.2} {:>12.2}{}\n",
        name,
        factor.raw_value,
        factor.sample_size,
        factor.base_score,
        factor.confidence,
        factor.weight,
        factor.contribution,
        note
    )
}

fn render_other(result: &FormatRiskResult) -> String {
    format!("{:<16} {:>6.1}\n", result.format.to_string(), result.score)
}

fn paint_level(level: RiskLevel, color: bool) -> String {
    paint(level.label(), level, color)
}

fn paint(text: &str, level: RiskLevel, color: bool) -> String {
    if !color {
        return text.to_string();
    }
    match hex_to_rgb(level.color()) {
        Some((r, g, b)) => text.truecolor(r, g, b).bold().to_string(),
        None => text.to_string(),
    }
}

fn hex_to_rgb(hex: &str) -> Option<(u8, u8, u8)> {
    let digits = hex.strip_prefix('#')?;
    if digits.len() != 6 {
        return None;
    }
    let channel = |range: std::ops::Range<usize>| u8::from_str_radix(digits.get(range)?, 16).ok();
    Some((channel(0..2)?, channel(2..4)?, channel(4..6)?))
}
