//! Watch command implementation

use crate::cli::output::format_dashboard;
use crate::cli::{collect_targets, WatchArgs};
use crate::config::HttpollConfig;
use crate::history::HistoryStore;
use crate::poller::Poller;
use std::io::Write;
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

/// Clear the screen and move the cursor home.
const CLEAR_SCREEN: &str = "\x1b[2J\x1b[H";

/// Load configuration with CLI overrides
pub fn load_config_with_overrides(
    args: &WatchArgs,
) -> Result<HttpollConfig, Box<dyn std::error::Error>> {
    // Load from file if it exists, otherwise use defaults
    let mut config = if args.config.exists() {
        HttpollConfig::load(Some(&args.config))?
    } else {
        HttpollConfig::default()
    };

    config = config.with_env_overrides();

    if let Some(interval) = args.interval {
        config.poll.interval_seconds = interval;
    }
    if let Some(timeout) = args.timeout {
        config.poll.timeout_seconds = timeout;
    }
    if let Some(window) = args.window {
        config.poll.window_size = window;
    }
    if let Some(refresh) = args.refresh {
        config.dashboard.refresh_millis = refresh;
    }
    if let Some(ref log_level) = args.log_level {
        config.logging.level = log_level.clone();
    }
    if args.no_color {
        config.dashboard.color = false;
    }

    Ok(config)
}

/// Wait for shutdown signal (SIGINT or SIGTERM)
pub async fn shutdown_signal(cancel_token: CancellationToken) {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl-C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received SIGINT, shutting down...");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, shutting down...");
        }
        _ = cancel_token.cancelled() => {}
    }

    cancel_token.cancel();
}

/// Draw one frame from the store.
fn render_frame(
    store: &HistoryStore,
    interval: Duration,
    timeout: Duration,
) -> Result<(), Box<dyn std::error::Error>> {
    let rows = store.snapshot_all()?;
    let frame = format_dashboard(&rows, interval, timeout);

    let mut stdout = std::io::stdout().lock();
    write!(stdout, "{}{}", CLEAR_SCREEN, frame)?;
    stdout.flush()?;
    Ok(())
}

/// Main watch command handler
pub async fn run_watch(args: WatchArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = load_config_with_overrides(&args)?;
    config.validate()?;

    crate::logging::init_tracing(&config.logging)?;
    if !config.dashboard.color {
        colored::control::set_override(false);
    }

    let targets = collect_targets(&args.urls, &config.targets);
    if targets.is_empty() {
        return Err("no URLs to poll; pass them as arguments or set `targets` in the config".into());
    }

    tracing::debug!(?config, "Loaded configuration");
    for component in config.logging.unknown_components() {
        tracing::warn!(component, "Unknown logging component; its level has no effect");
    }
    if config.poll.allows_overlap() {
        tracing::warn!(
            interval_seconds = config.poll.interval_seconds,
            timeout_seconds = config.poll.timeout_seconds,
            "Timeout exceeds poll interval; probes of the same URL may overlap"
        );
    }

    let poller = Poller::new(targets, &config.poll)?;
    let store: Arc<HistoryStore> = poller.store();

    let cancel_token = CancellationToken::new();
    let mut poller_handle = poller.start(cancel_token.clone());
    tokio::spawn(shutdown_signal(cancel_token.clone()));

    let mut refresh = tokio::time::interval(config.dashboard.refresh());
    refresh.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

    let outcome = loop {
        tokio::select! {
            _ = cancel_token.cancelled() => break None,
            // Poller only finishes early on a fatal store error
            finished = &mut poller_handle => break Some(finished),
            _ = refresh.tick() => {
                if let Err(e) = render_frame(&store, config.poll.interval(), config.poll.timeout()) {
                    cancel_token.cancel();
                    let _ = poller_handle.await;
                    return Err(e);
                }
            }
        }
    };

    cancel_token.cancel();
    let finished = match outcome {
        Some(finished) => finished,
        None => poller_handle.await,
    };
    finished??;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    fn watch_args(argv: &[&str]) -> WatchArgs {
        let mut full = vec!["httpoll", "watch"];
        full.extend_from_slice(argv);
        match crate::cli::Cli::try_parse_from(full).unwrap().command {
            crate::cli::Commands::Watch(args) => args,
            _ => panic!("Expected Watch command"),
        }
    }

    #[test]
    fn test_overrides_apply_over_file() {
        let temp = tempfile::NamedTempFile::new().unwrap();
        std::fs::write(
            temp.path(),
            "[poll]\ninterval_seconds = 30\ntimeout_seconds = 9\n",
        )
        .unwrap();
        let path = temp.path().to_str().unwrap();

        let args = watch_args(&["-c", path, "-i", "2", "-r", "250", "--no-color"]);
        let config = load_config_with_overrides(&args).unwrap();

        assert_eq!(config.poll.interval_seconds, 2);
        assert_eq!(config.poll.timeout_seconds, 9);
        assert_eq!(config.dashboard.refresh_millis, 250);
        assert!(!config.dashboard.color);
    }

    #[test]
    fn test_missing_config_file_uses_defaults() {
        let args = watch_args(&["-c", "/nonexistent/httpoll.toml"]);
        let config = load_config_with_overrides(&args).unwrap();
        assert_eq!(config.poll.window_size, 50);
    }
}
