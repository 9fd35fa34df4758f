use anyhow::Result;

use chess_risk::cli::{Cli, Command};
use chess_risk::{
    handle_analyze, handle_clear_history, handle_completions, handle_history, handle_score,
    handle_serve, interpret, load_config,
};

fn main() {
    setup_logging();
    parse_and_execute().unwrap_or_else(|e| {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    });
}

fn setup_logging() {
    sensible_env_logger::init!();
}

fn parse_and_execute() -> Result<()> {
    let cli = interpret();
    execute_command(&cli)
}

fn execute_command(cli: &Cli) -> Result<()> {
    if let Command::Completions { shell } = &cli.command {
        return handle_completions(*shell);
    }

    let config = load_config(cli.config.as_deref())?;
    match &cli.command {
        Command::Analyze { username, all_games, json } => {
            handle_analyze(config, username, *all_games, *json)
        }
        Command::Score { file, json } => handle_score(config, file, *json),
        Command::History { limit, json } => handle_history(config, *limit, *json),
        Command::ClearHistory => handle_clear_history(config),
        Command::Serve { port } => handle_serve(config, *port),
        Command::Completions { shell } => handle_completions(*shell),
    }
}
