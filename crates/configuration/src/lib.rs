use crate::error::ConfigError;
use std::path::Path;

// Declare the modules that make up this crate.
pub mod error;
pub mod logging;
pub mod settings;

// Re-export the core types to provide a clean public API.
pub use logging::init_logging;
pub use settings::{
    AnalysisConfig, Basket, Config, LoggingConfig, OutputFormat, ReportConfig, SolverConfig,
};

/// Prefix of environment variables that override file settings,
/// e.g. `EIGENTREND__SOLVER__MAX_SWEEPS=200`.
const ENV_PREFIX: &str = "EIGENTREND";

/// Loads the application configuration.
///
/// Reads `path` when given (the file must exist), otherwise an optional
/// `config.toml` in the working directory. Environment variables are layered on
/// top, and the result is validated before it is returned.
pub fn load_config(path: Option<&Path>) -> Result<Config, ConfigError> {
    let file = match path {
        Some(path) => config::File::from(path).required(true),
        None => config::File::with_name("config.toml").required(false),
    };

    let builder = config::Config::builder()
        .add_source(file)
        .add_source(config::Environment::with_prefix(ENV_PREFIX).separator("__"));

    finish(builder)
}

/// Parses configuration from a TOML string, applying the same defaults and validation.
pub fn config_from_toml(toml: &str) -> Result<Config, ConfigError> {
    let builder = config::Config::builder()
        .add_source(config::File::from_str(toml, config::FileFormat::Toml));
    finish(builder)
}

fn finish(
    builder: config::ConfigBuilder<config::builder::DefaultState>,
) -> Result<Config, ConfigError> {
    // Attempt to deserialize the entire configuration into our `Config` struct
    let config = builder.build()?.try_deserialize::<Config>()?;
    config.validate()?;
    tracing::debug!(?config, "Configuration loaded.");
    Ok(config)
}
