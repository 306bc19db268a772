use anyhow::Context;
use ferrous_dnsbl_domain::{CliOverrides, Config};

/// Loads, overrides and validates the configuration.
pub fn load_config(path: Option<&str>, overrides: CliOverrides) -> anyhow::Result<Config> {
    let config = Config::load(path, overrides).context("Failed to load configuration")?;
    config.validate().context("Invalid configuration")?;
    Ok(config)
}
