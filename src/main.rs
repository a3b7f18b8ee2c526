//! Fraud Demo Driver
//!
//! Loads the demo datasets, checks the scoring service, and emits
//! geo-annotated demo events at a randomized pace.

use anyhow::{Context, Result};
use fraud_utils::{
    config::{AppConfig, LoggingConfig},
    data::Datasets,
    liveness::LivenessProbe,
    pacing::wait_random_time_with,
    types::DemoEvent,
};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

fn init_logging(config: &LoggingConfig) -> Result<()> {
    let filter = EnvFilter::from_default_env()
        .add_directive(format!("fraud_utils={}", config.level).parse()?)
        .add_directive(format!("fraud_demo={}", config.level).parse()?);

    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    if config.format == "json" {
        builder.json().init();
    } else {
        builder.init();
    }
    Ok(())
}

fn main() -> Result<()> {
    let config = AppConfig::load_or_default()?;
    init_logging(&config.logging)?;
    config.validate()?;

    info!("Starting fraud demo driver");
    info!(
        "Detection threshold: {:.2}, baseline model: {}",
        config.detection.threshold, config.detection.baseline_model
    );

    // Load datasets (fatal on failure)
    let datasets = Datasets::init(&config.data).context("Failed to load demo datasets")?;
    info!(
        transactions = datasets.transactions.len(),
        frauds = datasets.transactions.fraud_count(),
        cities = datasets.cities.len(),
        "Datasets ready"
    );

    // Check the scoring service
    let probe = LivenessProbe::from_config(&config.api);
    if probe.is_online() {
        info!(url = %probe.url(), "Scoring service online");
    } else {
        warn!(url = %probe.url(), "Scoring service offline, emitting events anyway");
    }

    let mut rng = rand::thread_rng();
    for i in 0..config.demo.events {
        let transaction = datasets.select_random_transaction(&mut rng)?;
        let city = datasets.select_random_city(&mut rng)?;
        let event = DemoEvent::new(transaction, city);

        info!(
            event = %serde_json::to_string(&event)?,
            "Demo event {}/{}",
            i + 1,
            config.demo.events
        );

        wait_random_time_with(
            &mut rng,
            config.pacing.min_wait_secs,
            config.pacing.max_wait_secs,
        )?;
    }

    info!(events = config.demo.events, "Demo driver finished");
    Ok(())
}
