pub mod config;
pub mod flow;
pub mod trace;
pub mod vendor;

pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

use std::env;

use config::AppConfig;
use flow::StartupFlow;
use trace::init_tracing;
use tracing::error;

pub async fn run() -> Result<(), BoxError> {
    init_tracing();

    let cfg = match AppConfig::from_env() {
        Ok(c) => c,
        Err(e) => {
            error!("Configuration error: {}", e);
            return Err(Box::new(e) as BoxError);
        }
    };

    // A query passed on the command line wins over the FINAL_QUERY variable.
    let final_query_override = env::args().nth(1);

    StartupFlow::new(cfg).run(final_query_override).await;

    Ok(())
}
