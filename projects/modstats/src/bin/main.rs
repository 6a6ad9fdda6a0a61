use thiserror::Error;
use tokio::signal;
use tokio::time::interval;
use tracing::{error, info};

use projects_modstats::collect;
use projects_modstats::config::{Config, LoadConfigError};

#[derive(Debug, Error)]
pub enum MainError {
    #[error("TracingInit: {source}")]
    TracingInit {
        #[source]
        source: utils_trace::TracingInitError,
    },
    #[error("LoadConfig: {source}")]
    LoadConfig {
        #[source]
        source: LoadConfigError,
    },
    #[error("RunCycle: {source}")]
    RunCycle {
        #[source]
        source: collect::RunCycleError,
    },
}

#[tokio::main]
async fn main() -> Result<(), MainError> {
    utils_trace::init("info")
        .map_err(|source| MainError::TracingInit { source })?;

    let config = Config::from_env()
        .map_err(|source| MainError::LoadConfig { source })?;

    match config.poll_interval {
        // Cron mode: one cycle, nonzero exit on failure
        None => {
            collect::run_cycle(&config)
                .await
                .map_err(|source| MainError::RunCycle { source })?;
        }
        Some(period) => {
            info!("polling every {}s", period.as_secs());
            let mut ticker = interval(period);

            loop {
                tokio::select! {
                    _ = ticker.tick() => {
                        if let Err(err) = collect::run_cycle(&config).await {
                            error!("poll cycle failed: {err}");
                        }
                    }
                    _ = signal::ctrl_c() => {
                        info!("shutting down");
                        break;
                    }
                }
            }
        }
    }

    Ok(())
}
