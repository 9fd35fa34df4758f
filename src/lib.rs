pub mod api;
pub mod backoff;
pub mod cache;
pub mod cli;
pub mod config;
pub mod database;
pub mod domain;
pub mod errors;
pub mod http;
pub mod metrics;
pub mod report;
pub mod risk;
pub mod services;

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};
use clap_complete::Shell;
use colored::control::SHOULD_COLORIZE;
use std::path::Path;

use crate::cli::Cli;
use crate::config::settings::AppConfig;
use crate::config::resolve_risk_settings;
use crate::database::create_pool;
use crate::domain::PlayerMetrics;
use crate::services::analysis::{evaluate, AnalysisService};
use crate::services::server::ServerService;

pub fn interpret() -> Cli {
    Cli::parse()
}

pub fn load_config(config_path: Option<&Path>) -> Result<AppConfig> {
    let risk = resolve_risk_settings(config_path)?;
    Ok(AppConfig::new().with_risk(risk))
}

pub fn handle_analyze(config: AppConfig, username: &str, all_games: bool, json: bool) -> Result<()> {
    let runtime = tokio::runtime::Runtime::new()?;
    let analysis = runtime.block_on(async {
        let service = build_service(config)?;
        let rated_only = service.config().fetch.rated_only && !all_games;
        service.analyze(username, rated_only).await
    })?;

    if json {
        println!("{}", report::render_json(&analysis)?);
    } else {
        print!("{}", report::render_text(&analysis, use_color()));
    }
    Ok(())
}

pub fn handle_score(config: AppConfig, file: &Path, json: bool) -> Result<()> {
    let content = std::fs::read_to_string(file)
        .with_context(|| format!("Failed to read metrics file: {}", file.display()))?;
    let metrics: PlayerMetrics = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse metrics file: {}", file.display()))?;

    let analysis = evaluate(&metrics, &config.risk)?;

    if json {
        println!("{}", report::render_json(&analysis)?);
    } else {
        print!("{}", report::render_text(&analysis, use_color()));
    }
    Ok(())
}

pub fn handle_history(config: AppConfig, limit: usize, json: bool) -> Result<()> {
    let service = build_service(config)?;
    let entries = service.history(limit)?;

    if json {
        println!("{}", report::render_history_json(&entries)?);
    } else {
        print!("{}", report::render_history(&entries, use_color()));
    }
    Ok(())
}

pub fn handle_clear_history(config: AppConfig) -> Result<()> {
    let service = build_service(config)?;
    let removed = service.clear_history()?;
    println!("Removed {} history entries", removed);
    Ok(())
}

pub fn handle_serve(config: AppConfig, port: u16) -> Result<()> {
    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(async {
        let service = ServerService::new(port, config);
        service.run().await
    })
}

pub fn handle_completions(shell: Shell) -> Result<()> {
    let mut command = Cli::command();
    let name = command.get_name().to_string();
    clap_complete::generate(shell, &mut command, name, &mut std::io::stdout());
    Ok(())
}

fn build_service(config: AppConfig) -> Result<AnalysisService> {
    let pool = create_pool(&config.history.database_path)?;
    AnalysisService::new(config, pool)
}

fn use_color() -> bool {
    SHOULD_COLORIZE.should_colorize()
}
