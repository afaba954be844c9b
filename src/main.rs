/// Dynamo Next Match — nejbližší zápas HC Dynamo na e-ink displeji
///
/// Co dělá:
///   1. Stáhne stránku se zápasy klubu
///   2. Vytáhne nejbližší zápas (týmy, datum a čas, kolo, soutěž)
///   3. Pošle ho jako query parametry do ZivyObraz.eu
///
/// Jeden běh = jeden zápas. Periodické spouštění řeší cron/systemd timer.
///
/// Spuštění:
///   cargo run --bin next-match -- --skip-publish

mod config;
mod error;
mod lock;
mod pipeline;
#[cfg(test)]
mod test_support;

use std::env;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use dotenv::dotenv;
use dynamo_scraper::{build_client, ClientSettings};
use logger::Logger;

use crate::config::{Cli, Config};
use crate::error::RunError;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<ExitCode> {
    dotenv().ok();
    let cli = Cli::parse();

    let log_settings = config::log_settings(|key| env::var(key).ok());
    let _log_guard = logger::init_tracing(&log_settings).context("logging setup failed")?;
    let rust_log = env::var("RUST_LOG").ok();
    let log = Logger::tracing(log_settings.component_level(rust_log.as_deref()));

    match run(&cli, &log).await {
        Ok(()) => Ok(ExitCode::SUCCESS),
        Err(e) => {
            log.fatal(format!("{}: {e}", e.kind()));
            Ok(ExitCode::FAILURE)
        }
    }
}

async fn run(cli: &Cli, log: &Logger) -> Result<(), RunError> {
    let config = Config::from_env(cli)?;
    log.debug(format!("Config: {config:?}"));

    let mut instance_lock = if config.lock {
        Some(lock::open_lock(&env::temp_dir().join(lock::LOCK_FILE_NAME))?)
    } else {
        None
    };
    let _write_guard = match instance_lock.as_mut() {
        Some(l) => match lock::try_acquire(l, log) {
            Some(guard) => Some(guard),
            None => return Ok(()),
        },
        None => None,
    };

    log.debug("Creating http client for connections");
    let client = build_client(&ClientSettings { strict_tls: config.strict_tls })?;

    pipeline::run(&config, client, log).await?;
    Ok(())
}
