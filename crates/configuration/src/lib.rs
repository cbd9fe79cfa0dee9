// Declare the modules that make up this crate.
pub mod error;
pub mod settings;

use crate::error::ConfigError;

// Re-export the core types to provide a clean public API.
pub use settings::{Config, DisplaySettings, GoalPolicy, TrendPolicy};

/// Loads the reporting configuration from the `config.toml` file.
///
/// This function is the primary entry point for this crate. The file is
/// optional: when it is absent, every recognized option falls back to its
/// documented default (met 90, exceeded 100, stable band 0, precision 2).
/// The result is validated before being returned, so callers never hold an
/// inconsistent threshold set.
pub fn load_config() -> Result<Config, ConfigError> {
    let builder = config::Config::builder()
        // Tells the builder to look for a file named `config.toml`.
        .add_source(config::File::with_name("config.toml").required(false))
        .build()?;

    // Attempt to deserialize the entire configuration into our `Config` struct
    let config = builder.try_deserialize::<Config>()?;

    config.validate()?;

    Ok(config)
}
