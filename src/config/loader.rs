use anyhow::{Context, Result};
use log::info;
use std::fs;
use std::path::Path;

use super::settings::RiskSettings;
use crate::errors::config_context;

/// Load a (possibly partial) risk settings document from a JSON file.
///
/// Missing fields keep their defaults; the result is validated.
pub fn load_risk_settings(path: &Path) -> Result<RiskSettings> {
    let json = fs::read_to_string(path).with_context(|| config_context(path))?;
    let settings = parse_risk_settings(&json).with_context(|| config_context(path))?;
    info!("Loaded risk configuration from {}", path.display());
    Ok(settings)
}

pub fn parse_risk_settings(json: &str) -> Result<RiskSettings> {
    let settings: RiskSettings =
        serde_json::from_str(json).context("Failed to parse risk configuration")?;
    settings.validate()?;
    Ok(settings)
}

/// Resolve the settings for a run: explicit file if given, defaults otherwise
pub fn resolve_risk_settings(path: Option<&Path>) -> Result<RiskSettings> {
    match path {
        Some(path) => load_risk_settings(path),
        None => Ok(RiskSettings::default()),
    }
}
