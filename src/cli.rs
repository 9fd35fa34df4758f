use clap::{Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "chess-risk", author, version, about = "Heuristic cheat-risk scoring for chess.com players")]
pub struct Cli {
    /// JSON file overriding the default risk settings
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Command
    #[clap(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
#[clap(rename_all = "kebab-case")]
pub enum Command {
    /// Fetch a chess.com player and score them
    Analyze {
        username: String,
        /// Include unrated games in the recent sample
        #[arg(long)]
        all_games: bool,
        #[arg(long)]
        json: bool,
    },
    /// Score a metrics document offline
    Score {
        file: PathBuf,
        #[arg(long)]
        json: bool,
    },
    /// Show recently analysed players
    History {
        #[arg(short, long, default_value_t = 10)]
        limit: usize,
        #[arg(long)]
        json: bool,
    },
    /// Forget every recorded analysis
    ClearHistory,
    /// Start the HTTP server
    Serve {
        /// Port number (optional, defaults to 3000)
        #[arg(short, long, default_value_t = 3000)]
        port: u16,
    },
    /// Print a shell completion script
    Completions { shell: Shell },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_analyze_flags() {
        let cli = Cli::parse_from(["chess-risk", "analyze", "Hikaru", "--all-games", "--config", "risk.json"]);
        assert_eq!(cli.config, Some(PathBuf::from("risk.json")));
        assert_eq!(
            cli.command,
            Command::Analyze { username: "Hikaru".to_string(), all_games: true, json: false }
        );
    }

    #[test]
    fn test_defaults() {
        let cli = Cli::parse_from(["chess-risk", "serve"]);
        assert_eq!(cli.command, Command::Serve { port: 3000 });

        let cli = Cli::parse_from(["chess-risk", "history"]);
        assert_eq!(cli.command, Command::History { limit: 10, json: false });
    }

    #[test]
    fn test_kebab_case_subcommand() {
        let cli = Cli::parse_from(["chess-risk", "clear-history"]);
        assert_eq!(cli.command, Command::ClearHistory);
    }

    #[test]
    fn test_cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
