//! Signing key rotation job
//!
//! Runs one rotation against the configured key store and exits. Meant to be
//! triggered by cron, a Kubernetes CronJob or a similar scheduler; only one
//! instance should run at a time.

use anyhow::Context;
use tracing::{error, info};

use tv_core::services::{generate_signing_key, KeyRotationConfig, KeyRotationService};
use tv_infra::key_store::build_key_store;
use tv_infra::logging::init_tracing;
use tv_shared::{AppConfig, Environment};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // dotenvy never overrides variables already set, so the per-environment file wins
    dotenvy::from_filename(Environment::from_env().env_file()).ok();
    dotenvy::dotenv().ok();

    let config = AppConfig::load().context("failed to load configuration")?;
    init_tracing(&config.logging)?;

    info!(
        environment = %config.environment,
        backend = ?config.key_store.backend,
        retention = config.rotation.retention,
        "Starting signing key rotation"
    );

    let store = build_key_store(&config.key_store).await?;
    let rotation = KeyRotationService::new(
        store,
        generate_signing_key,
        KeyRotationConfig::try_from(&config.rotation)?,
    );

    match rotation.rotate().await {
        Ok(result) => {
            info!(
                new_key = %result.new_key,
                pruned = ?result.pruned,
                retained = result.retained,
                "Signing key rotation finished"
            );
            Ok(())
        }
        Err(e) => {
            error!(error = %e, code = e.code(), "Signing key rotation failed");
            Err(e.into())
        }
    }
}
