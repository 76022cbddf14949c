//! Check command implementation

use crate::cli::output::{format_records_json, format_records_table};
use crate::cli::{collect_targets, CheckArgs};
use crate::config::HttpollConfig;
use crate::probe::{Prober, StatusRecord};
use futures::future::join_all;

/// Probe every target once, concurrently, in target order.
pub async fn probe_all(prober: &Prober, targets: &[String]) -> Vec<StatusRecord> {
    join_all(targets.iter().map(|url| prober.probe(url))).await
}

/// Handle `httpoll check`
///
/// Prints one row (or JSON object) per target and returns whether every
/// target was healthy.
pub async fn run_check(args: CheckArgs) -> Result<bool, Box<dyn std::error::Error>> {
    let config = if args.config.exists() {
        HttpollConfig::load(Some(&args.config))?
    } else {
        HttpollConfig::default()
    };
    let mut config = config.with_env_overrides();
    if let Some(timeout) = args.timeout {
        config.poll.timeout_seconds = timeout;
    }
    config.validate()?;

    crate::logging::init_tracing(&config.logging)?;

    let targets = collect_targets(&args.urls, &config.targets);
    if targets.is_empty() {
        return Err("no URLs to check; pass them as arguments or set `targets` in the config".into());
    }

    let prober = Prober::new(config.poll.timeout())?;
    let records = probe_all(&prober, &targets).await;

    if args.json {
        println!("{}", format_records_json(&records)?);
    } else {
        println!("{}", format_records_table(&records));
    }

    Ok(records.iter().all(|r| r.healthy))
}
