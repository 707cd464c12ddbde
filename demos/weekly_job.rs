use minicron::{Scheduler, SchedulerError};
use tracing_subscriber::{filter::EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

fn enable_logs() {
    let fmt_layer = tracing_subscriber::fmt::layer();
    let filter_layer = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(fmt_layer)
        .init();
}

#[tokio::main]
async fn main() -> Result<(), SchedulerError> {
    enable_logs();

    // Fires at 18:00 every Tuesday, UTC time.
    let mut scheduler = Scheduler::new(
        "0 18 * * 2",
        || println!("Schedule fired at {}", chrono::Utc::now()),
        true,
        "UTC",
    )?;

    println!("Schedule registered, waiting for the next Tuesday 18:00 UTC...");
    tokio::signal::ctrl_c().await.ok();
    scheduler.stop();
    Ok(())
}
