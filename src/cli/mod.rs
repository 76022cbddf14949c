//! CLI module for httpoll
//!
//! Command-line interface definitions and handlers.
//!
//! # Commands
//!
//! - `watch` - Poll URLs continuously and show a live dashboard
//! - `check` - Probe URLs once and print the results
//! - `config` - Configuration utilities (init)
//! - `completions` - Generate shell completions
//!
//! # Example
//!
//! ```bash
//! # Watch two sites, probing every 5 seconds
//! httpoll watch example.com https://example.org/health -i 5
//!
//! # One-shot check with JSON output
//! httpoll check https://example.com --json
//! ```

pub mod check;
pub mod completions;
pub mod config;
pub mod output;
pub mod watch;

pub use completions::handle_completions;
pub use config::handle_config_init;

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// httpoll - HTTP latency monitor
#[derive(Parser, Debug)]
#[command(
    name = "httpoll",
    version,
    about = "Poll HTTP endpoints and watch their latency history"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Poll URLs continuously and show a live dashboard
    Watch(WatchArgs),
    /// Probe URLs once and print the results
    Check(CheckArgs),
    /// Configuration utilities
    #[command(subcommand)]
    Config(ConfigCommands),
    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[derive(Args, Debug)]
pub struct WatchArgs {
    /// URLs to poll (a missing scheme defaults to http://)
    pub urls: Vec<String>,

    /// Path to configuration file
    #[arg(short, long, default_value = "httpoll.toml")]
    pub config: PathBuf,

    /// Seconds between probes of the same URL
    #[arg(short, long)]
    pub interval: Option<u64>,

    /// Request timeout in seconds
    #[arg(short, long)]
    pub timeout: Option<u64>,

    /// Latency samples kept per URL
    #[arg(short, long)]
    pub window: Option<usize>,

    /// Milliseconds between dashboard redraws
    #[arg(short, long)]
    pub refresh: Option<u64>,

    /// Set log level (trace, debug, info, warn, error)
    #[arg(short, long)]
    pub log_level: Option<String>,

    /// Disable colors
    #[arg(long)]
    pub no_color: bool,
}

#[derive(Args, Debug)]
pub struct CheckArgs {
    /// URLs to probe (a missing scheme defaults to http://)
    pub urls: Vec<String>,

    /// Path to configuration file
    #[arg(short, long, default_value = "httpoll.toml")]
    pub config: PathBuf,

    /// Request timeout in seconds
    #[arg(short, long)]
    pub timeout: Option<u64>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Initialize a new configuration file
    Init(ConfigInitArgs),
}

#[derive(Args, Debug)]
pub struct ConfigInitArgs {
    /// Output file path
    #[arg(short, long, default_value = "httpoll.toml")]
    pub output: PathBuf,

    /// Overwrite existing file
    #[arg(short, long)]
    pub force: bool,
}

#[derive(Args, Debug)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: clap_complete::Shell,
}

/// Prefix `http://` onto a target that has no scheme.
pub fn normalize_target(target: &str) -> String {
    let target = target.trim();
    if target.starts_with("http") {
        target.to_string()
    } else {
        format!("http://{}", target)
    }
}

/// Command-line targets followed by configured ones, normalized.
pub fn collect_targets(cli_targets: &[String], config_targets: &[String]) -> Vec<String> {
    cli_targets
        .iter()
        .chain(config_targets)
        .map(|t| normalize_target(t))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_cli_parse_watch_defaults() {
        let cli = Cli::try_parse_from(["httpoll", "watch", "example.com"]).unwrap();
        match cli.command {
            Commands::Watch(args) => {
                assert_eq!(args.urls, vec!["example.com".to_string()]);
                assert_eq!(args.config, PathBuf::from("httpoll.toml"));
                assert!(args.interval.is_none());
                assert!(!args.no_color);
            }
            _ => panic!("Expected Watch command"),
        }
    }

    #[test]
    fn test_cli_parse_watch_overrides() {
        let cli = Cli::try_parse_from([
            "httpoll", "watch", "-i", "10", "-t", "2", "-w", "20", "a.com", "b.com",
        ])
        .unwrap();
        match cli.command {
            Commands::Watch(args) => {
                assert_eq!(args.interval, Some(10));
                assert_eq!(args.timeout, Some(2));
                assert_eq!(args.window, Some(20));
                assert_eq!(args.urls.len(), 2);
            }
            _ => panic!("Expected Watch command"),
        }
    }

    #[test]
    fn test_cli_parse_check_json() {
        let cli = Cli::try_parse_from(["httpoll", "check", "--json", "a.com"]).unwrap();
        match cli.command {
            Commands::Check(args) => assert!(args.json),
            _ => panic!("Expected Check command"),
        }
    }

    #[test]
    fn test_cli_parse_config_init() {
        let cli = Cli::try_parse_from(["httpoll", "config", "init", "-f"]).unwrap();
        match cli.command {
            Commands::Config(ConfigCommands::Init(args)) => assert!(args.force),
            _ => panic!("Expected Config Init command"),
        }
    }

    #[test]
    fn test_normalize_target_adds_scheme() {
        assert_eq!(normalize_target("example.com"), "http://example.com");
        assert_eq!(normalize_target(" example.com/x "), "http://example.com/x");
    }

    #[test]
    fn test_normalize_target_keeps_scheme() {
        assert_eq!(normalize_target("https://example.com"), "https://example.com");
        assert_eq!(normalize_target("http://example.com"), "http://example.com");
    }

    #[test]
    fn test_collect_targets_cli_first() {
        let targets = collect_targets(
            &["a.com".to_string()],
            &["https://b.com".to_string()],
        );
        assert_eq!(targets, vec!["http://a.com", "https://b.com"]);
    }
}
