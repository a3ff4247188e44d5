//! `plategen init`: create a default configuration file, and optionally
//! export the bundled scripts for customisation.

use std::path::{Path, PathBuf};

use plategen_adapters::EmbeddedScriptStore;

use crate::{
    cli::{GlobalArgs, InitArgs},
    config::{AppConfig, LOCAL_CONFIG_FILE},
    error::{CliError, CliResult, IntoCli},
    output::OutputManager,
};

pub fn execute(
    args: InitArgs,
    _global: GlobalArgs,
    _config: AppConfig,
    output: OutputManager,
) -> CliResult<()> {
    output.info("Initialising configuration...")?;

    let config_path = if args.local {
        PathBuf::from(LOCAL_CONFIG_FILE)
    } else {
        AppConfig::config_path()
    };
    refuse_overwrite(&config_path, args.force)?;

    let mut new_config = AppConfig::default();
    if let Some(dir) = &args.scripts {
        let written = export_scripts(dir, args.force)?;
        output.success(&format!(
            "Exported {written} scripts to {}",
            dir.display()
        ))?;
        new_config.paths.scripts_dir = Some(std::path::absolute(dir).unwrap_or_else(|_| dir.clone()));
    }

    write_config(&config_path, &new_config)?;
    output.success(&format!(
        "Configuration created at {}",
        config_path.display()
    ))?;
    Ok(())
}

fn refuse_overwrite(path: &Path, force: bool) -> CliResult<()> {
    if path.exists() && !force {
        return Err(CliError::AlreadyExists {
            path: path.to_path_buf(),
        });
    }
    Ok(())
}

fn write_config(path: &Path, config: &AppConfig) -> CliResult<()> {
    let toml = config
        .to_toml()
        .with_cli_context(|| "Failed to serialise default config")?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).with_cli_context(|| {
            format!("Failed to create config directory '{}'", parent.display())
        })?;
    }
    std::fs::write(path, toml)
        .with_cli_context(|| format!("Failed to write config to '{}'", path.display()))
}

/// Write every bundled script into `dir`, returning how many were written.
fn export_scripts(dir: &Path, force: bool) -> CliResult<usize> {
    for (name, _) in EmbeddedScriptStore::entries() {
        refuse_overwrite(&dir.join(name), force)?;
    }

    std::fs::create_dir_all(dir)
        .with_cli_context(|| format!("Failed to create '{}'", dir.display()))?;

    let mut written = 0;
    for (name, source) in EmbeddedScriptStore::entries() {
        let path = dir.join(name);
        std::fs::write(&path, source)
            .with_cli_context(|| format!("Failed to write '{}'", path.display()))?;
        written += 1;
    }
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn export_writes_every_bundled_script() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("scripts");

        let written = export_scripts(&target, false).unwrap();
        assert_eq!(written, EmbeddedScriptStore::entries().count());
        assert!(target.join("dubai_new.scad").is_file());
        assert!(target.join("sharjah_old.scad").is_file());
    }

    #[test]
    fn export_refuses_to_overwrite_without_force() {
        let dir = tempfile::tempdir().unwrap();
        export_scripts(dir.path(), false).unwrap();

        let err = export_scripts(dir.path(), false).unwrap_err();
        assert!(matches!(err, CliError::AlreadyExists { .. }));
        assert!(export_scripts(dir.path(), true).is_ok());
    }

    #[test]
    fn written_config_loads_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        let mut config = AppConfig::default();
        config.paths.scripts_dir = Some(PathBuf::from("/srv/plate-scripts"));

        write_config(&path, &config).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        let parsed: AppConfig = toml::from_str(&text).unwrap();
        assert_eq!(parsed, config);
    }
}
