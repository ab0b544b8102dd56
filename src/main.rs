// ABOUTME: Runs the default dinner - five agents, three rounds, two admitted at a time.
// ABOUTME: Logs each critical action to stdout and exits once every agent is done.

use anyhow::Result;
use tracing::{Level, info};
use tracing_subscriber::FmtSubscriber;

use dining::prelude::*;

#[tokio::main]
async fn main() -> Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let dinner = Dinner::new(DinnerConfig::default())?;
    dinner.hooks().register(TracingHook).await;

    let report = dinner.run().await?;
    info!(
        rounds = report.total_rounds(),
        denials = report.arbiter.denials,
        peak_admitted = report.arbiter.peak_admitted,
        elapsed_ms = report.elapsed.as_millis() as u64,
        "all agents finished"
    );

    Ok(())
}
