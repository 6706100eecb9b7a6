//! Schema and seed administration tool.
//!
//! `-initialize` applies the database schema; `-load` seeds countries and
//! states from the CSV files under `conf/`. Per-row insert failures during
//! a load are logged and skipped; everything else is fatal.

use std::path::Path;
use std::process::ExitCode;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use globe_backend::config::Config;
use globe_backend::db::{self, Repository};
use globe_backend::seed;

const COUNTRY_FILE: &str = "conf/countries.csv";
const STATE_FILE: &str = "conf/states.csv";

#[tokio::main]
async fn main() -> ExitCode {
    let config = Config::from_env();

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    let mut initialize = false;
    let mut load = false;
    for arg in std::env::args().skip(1) {
        match arg.as_str() {
            "-initialize" | "--initialize" => initialize = true,
            "-load" | "--load" => load = true,
            other => {
                eprintln!("Unknown flag: {}", other);
                eprintln!("Usage: manage-env [-initialize] [-load]");
                return ExitCode::from(2);
            }
        }
    }

    let pool = match db::connect(&config.database_url).await {
        Ok(pool) => pool,
        Err(e) => {
            tracing::error!("Unable to establish connection to the database: {}", e);
            return ExitCode::FAILURE;
        }
    };

    if initialize {
        if let Err(e) = db::run_migrations(&pool).await {
            tracing::error!("Error initializing schema, changes rolled back: {}", e);
            return ExitCode::FAILURE;
        }
        tracing::info!("Schema applied");
    }

    if load {
        let repo = Repository::new(pool.clone());
        if let Err(e) = seed::run(&repo, Path::new(COUNTRY_FILE), Path::new(STATE_FILE)).await {
            tracing::error!("An error occurred while loading countries and states: {}", e);
            return ExitCode::FAILURE;
        }
        tracing::info!("Seed load complete");
    }

    pool.close().await;
    ExitCode::SUCCESS
}
