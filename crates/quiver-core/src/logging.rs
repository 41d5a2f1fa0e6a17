//! Tracing subscriber initialization shared by binaries and tests.

use tracing_subscriber::EnvFilter;

/// ## Summary
/// Initializes the global tracing subscriber with an env-filter built from
/// `RUST_LOG`, falling back to the supplied level. Also bridges `log`
/// records into tracing.
///
/// ## Errors
/// Returns an error if a global subscriber has already been set.
pub fn init(default_level: &str) -> anyhow::Result<()> {
    tracing_log::LogTracer::init()?;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_level.to_string()));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}
