//! Configuration loading for the API binary

use anyhow::bail;

pub use mg_shared::config::AppConfig;

/// Load configuration from the process environment and check it is servable
///
/// # Returns
///
/// The validated configuration, or an error describing the first problem
/// found. A failed load should abort startup.
pub fn load() -> anyhow::Result<AppConfig> {
    let config = AppConfig::from_env();
    ensure_servable(&config)?;
    Ok(config)
}

/// Cross-field checks beyond what per-field parsing can catch
///
/// Development deployments may run without API keys (every protected request
/// is then rejected), but production must configure at least one.
fn ensure_servable(config: &AppConfig) -> anyhow::Result<()> {
    if let Err(message) = config.validate() {
        bail!("invalid configuration: {message}");
    }
    if config.environment.is_production() && !config.security.has_keys() {
        bail!("API_KEYS must be set when ENVIRONMENT is production");
    }
    Ok(())
}
