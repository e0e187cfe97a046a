//! Command-line interface for rustychess.

use clap::{Parser, Subcommand};
use rustychess::AppConfig;
use rustychess_engine::SearchKind;
use std::path::PathBuf;

/// RustyChess - play chess against a search engine
#[derive(Parser, Debug)]
#[command(name = "rustychess")]
#[command(about = "Play chess against a search engine", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Path to a TOML config file (default: ./rustychess.toml if present)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Engine search strategy (alphabeta or greedy)
    #[arg(long, global = true)]
    pub search: Option<SearchKind>,

    /// Engine search depth in plies
    #[arg(long, global = true)]
    pub depth: Option<u8>,

    /// Engine reply timeout in milliseconds (0 disables)
    #[arg(long, global = true)]
    pub timeout_ms: Option<u64>,

    /// Start position as FEN
    #[arg(long, global = true)]
    pub fen: Option<String>,

    /// Subcommand to run (default: tui)
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Play in the terminal UI
    Tui,

    /// Play by typing UCI moves (e2e4, e7e8q) on stdin
    Play,

    /// Let the engine play both sides
    Selfplay {
        /// Number of plies to play
        #[arg(long, default_value = "20")]
        plies: u32,
    },
}

impl Cli {
    /// Applies command-line overrides on top of file configuration.
    pub fn apply_overrides(&self, config: AppConfig) -> AppConfig {
        let mut engine = config.engine().clone();
        let mut session = config.session().clone();

        if let Some(search) = self.search {
            engine = engine.with_search(search);
        }
        if let Some(depth) = self.depth {
            engine = engine.with_search_depth(depth);
        }
        if let Some(timeout_ms) = self.timeout_ms {
            session = session.with_engine_timeout_ms(timeout_ms);
        }
        if let Some(fen) = &self.fen {
            session = session.with_start_position(fen.clone());
        }

        config.with_engine(engine).with_session(session)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_to_no_command() {
        let cli = Cli::parse_from(["rustychess"]);
        assert_eq!(cli.command, None);
    }

    #[test]
    fn test_overrides_replace_file_values() {
        let cli = Cli::parse_from(["rustychess", "--depth", "5", "--timeout-ms", "0", "play"]);
        let config = cli.apply_overrides(AppConfig::default());

        assert_eq!(*config.engine().search_depth(), 5);
        assert_eq!(config.session().engine_timeout(), None);
        assert_eq!(cli.command, Some(Command::Play));
    }

    #[test]
    fn test_search_strategy_override() {
        let cli = Cli::parse_from(["rustychess", "--search", "greedy", "selfplay"]);
        let config = cli.apply_overrides(AppConfig::default());

        assert_eq!(*config.engine().search(), SearchKind::Greedy);
        assert_eq!(*config.engine().search_depth(), 3);
    }

    #[test]
    fn test_selfplay_plies() {
        let cli = Cli::parse_from(["rustychess", "selfplay", "--plies", "4"]);
        assert_eq!(cli.command, Some(Command::Selfplay { plies: 4 }));
    }
}
