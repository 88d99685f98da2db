// --- File: crates/reservify_config/src/lib.rs ---
use chrono_tz::Tz;
use config::{Config, Environment, File};
pub use config::ConfigError;
use once_cell::sync::OnceCell;
use std::env;
use std::path::Path;
use tracing::debug;

pub mod env_vars;
pub mod models;
pub use models::*;

use env_vars::{get_config_prefix, legacy_overrides, CONFIG_SEPARATOR};

/// Loads the application configuration.
///
/// Sources, lowest precedence first: built-in defaults, `config/default.*`,
/// `config/{RUN_ENV}.*`, `RESERVIFY__*` variables, then the plain variables
/// listed in [`env_vars::LEGACY_ENV_VARS`]. The `.env` file is loaded first.
pub fn load_config() -> Result<AppConfig, ConfigError> {
    ensure_dotenv_loaded();
    let run_env = env::var("RUN_ENV").unwrap_or_else(|_| "debug".to_string());
    load_config_from(Path::new("config"), &run_env)
}

/// Same as [`load_config`] with an explicit config directory and run
/// environment, and without touching `.env`.
pub fn load_config_from(config_dir: &Path, run_env: &str) -> Result<AppConfig, ConfigError> {
    let default_path = config_dir.join("default");
    let env_path = config_dir.join(run_env);
    debug!(
        "Loading config from {} and {}",
        default_path.display(),
        env_path.display()
    );

    let prefix = get_config_prefix();
    let mut builder = Config::builder()
        .set_default("server.host", DEFAULT_HOST)?
        .set_default("server.port", i64::from(DEFAULT_PORT))?
        .set_default("gcal.key_path", DEFAULT_KEY_PATH)?
        .set_default("gcal.time_zone", DEFAULT_TIME_ZONE)?
        .add_source(File::with_name(&default_path.to_string_lossy()).required(false))
        .add_source(File::with_name(&env_path.to_string_lossy()).required(false))
        .add_source(Environment::with_prefix(&prefix).separator(CONFIG_SEPARATOR));

    for (path, value) in legacy_overrides() {
        builder = builder.set_override(path, value)?;
    }

    let config: AppConfig = builder.build()?.try_deserialize()?;
    validate(&config)?;
    Ok(config)
}

fn validate(config: &AppConfig) -> Result<(), ConfigError> {
    config
        .gcal
        .time_zone
        .parse::<Tz>()
        .map_err(|_| ConfigError::Message(format!("unknown time zone: {}", config.gcal.time_zone)))?;
    Ok(())
}

static INIT_DOTENV: OnceCell<()> = OnceCell::new();

/// Ensures that the dotenv file is loaded into the environment variables.
///
/// The file is taken from `DOTENV_OVERRIDE`, else from the first command line
/// argument if it starts with `.env`, else `.env`. Loading happens once per
/// process; a missing file is not an error. Returns the path that was used.
pub fn ensure_dotenv_loaded() -> String {
    let dotenv_path_override = std::env::var("DOTENV_OVERRIDE").ok();
    let dotenv_path_arg = env::args().nth(1).filter(|s| s.starts_with(".env"));

    let dotenv_path = dotenv_path_override
        .or(dotenv_path_arg)
        .unwrap_or_else(|| ".env".to_string());

    INIT_DOTENV.get_or_init(|| {
        dotenv::from_filename(&dotenv_path).ok();
    });

    dotenv_path
}
