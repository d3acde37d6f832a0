//! Main entry point for the validator effectiveness exporter

use anyhow::Context;
use clap::Parser;
use effectiveness_exporter::{
    client::{BeaconApi, BeaconChainClient, EffectivenessFetcher},
    config::Config,
    metrics::{install_prometheus_exporter, GaugeState, MetricsPublisher},
    poll::{IntervalTicker, PollLoop},
    telemetry::init_logging,
    validators::ValidatorSetResolver,
};
use std::num::NonZeroUsize;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{error, info};

#[derive(Parser)]
#[command(
    name = "effectiveness-exporter",
    about = "Prometheus exporter for validator attestation effectiveness",
    version
)]
struct Args {
    /// Path to configuration file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Print the default configuration and exit
    #[arg(long)]
    gen_config: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    if args.gen_config {
        println!("{}", Config::generate_example()?);
        return Ok(());
    }

    let config = Config::load(args.config.as_deref())?;
    init_logging(config.log_level()?, config.log_format()?)?;

    info!(
        "Starting validator effectiveness exporter v{}",
        effectiveness_exporter::VERSION
    );

    let api: Arc<dyn BeaconApi> = Arc::new(BeaconChainClient::new(&config.api)?);

    // An empty set is fatal: do not open the metrics port
    let validators = ValidatorSetResolver::new(config.sources.clone(), api.clone())
        .resolve()
        .await
        .inspect_err(|e| error!("Validator resolution failed: {}", e))?;

    info!("Starting Prometheus server - Port: {}", config.exporter_port);
    install_prometheus_exporter(config.metrics_address()?)?;

    let chunk_size =
        NonZeroUsize::new(config.api.chunk_size).context("api.chunk_size must be positive")?;
    let poll_loop = PollLoop::new(
        validators,
        chunk_size,
        EffectivenessFetcher::new(api),
        MetricsPublisher::new(GaugeState::new()),
    );

    info!(
        "Run metrics loop - Polling interval: {} seconds",
        config.polling_interval_seconds
    );
    poll_loop
        .run(IntervalTicker::new(config.polling_interval()))
        .await;

    Ok(())
}
