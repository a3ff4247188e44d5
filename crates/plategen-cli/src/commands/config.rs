//! `plategen config`: inspect configuration values.

use crate::{
    cli::ConfigCommands,
    config::AppConfig,
    error::{CliError, CliResult, IntoCli},
    output::OutputManager,
};

/// Dispatch to the correct config subcommand.
pub fn execute(
    cmd: ConfigCommands,
    explicit: Option<std::path::PathBuf>,
    config: AppConfig,
    output: OutputManager,
) -> CliResult<()> {
    match cmd {
        ConfigCommands::Get { key } => {
            output.data(&get_config_value(&config, &key)?)?;
        }

        ConfigCommands::List => {
            output.header("Current Configuration:")?;
            let serialised = config
                .to_toml()
                .with_cli_context(|| "Failed to serialise config")?;
            output.data(&serialised)?;
        }

        ConfigCommands::Path => match AppConfig::active_path(explicit.as_ref()) {
            Some(path) => output.data(&path.display().to_string())?,
            None => {
                output.data(&AppConfig::config_path().display().to_string())?;
                output.info("No configuration file exists yet; built-in defaults are in use")?;
            }
        },
    }

    Ok(())
}

// ── helpers ───────────────────────────────────────────────────────────────────

/// Scalars print bare, tables print as TOML.
fn get_config_value(config: &AppConfig, key: &str) -> CliResult<String> {
    let value = config
        .get(key)
        .filter(|v| !v.is_null())
        .ok_or_else(|| CliError::UnknownConfigKey { key: key.into() })?;

    Ok(match value {
        serde_json::Value::String(s) => s,
        serde_json::Value::Object(mut table) => {
            // TOML has no null; unset optional keys are simply absent.
            table.retain(|_, v| !v.is_null());
            toml::to_string_pretty(&table).map_err(|e| CliError::ConfigError {
                message: format!("Failed to serialise '{key}': {e}"),
                source: Some(Box::new(e)),
            })?
        }
        other => other.to_string(),
    })
}

// ── tests ─────────────────────────────────────────────────────────────────────
