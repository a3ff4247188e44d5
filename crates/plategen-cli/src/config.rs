//! Application configuration.
//!
//! [`AppConfig`] is loaded once at startup and passed down by value.  The
//! CLI layer owns config; the core crate only ever sees the
//! [`RenderSettings`] derived from it.
//!
//! # Resolution order (highest priority first)
//!
//! 1. CLI flags (handled at the call-site, not here)
//! 2. Environment variables: `PLATEGEN_COMPILER__TIMEOUT_SECS=60`
//! 3. File passed with `--config`
//! 4. `plategen.toml` in the current directory
//! 5. The per-user config file (see [`AppConfig::config_path`])
//! 6. Built-in defaults (always present)

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Context as _;
use config::{Config, Environment, File, FileFormat, FileSourceFile};
use plategen_core::application::{DEFAULT_RENDER_TIMEOUT, RenderSettings};
use plategen_core::domain::{ArtifactFormat, DomainError};
use serde::{Deserialize, Serialize};

/// File name looked up in the working directory.
pub const LOCAL_CONFIG_FILE: &str = "plategen.toml";

/// Prefix for environment overrides.
pub const ENV_PREFIX: &str = "PLATEGEN";

/// Application configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// How the geometry compiler is started.
    pub compiler: CompilerConfig,
    /// Where scripts and models live.
    pub paths: PathsConfig,
    /// Output settings.
    pub output: OutputConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompilerConfig {
    /// OpenSCAD executable, looked up on `PATH` when not absolute.
    pub binary: PathBuf,
    pub timeout_secs: u64,
    /// Extra arguments placed before `-o`.
    pub args: Vec<String>,
}

impl Default for CompilerConfig {
    fn default() -> Self {
        Self {
            binary: PathBuf::from("openscad"),
            timeout_secs: DEFAULT_RENDER_TIMEOUT.as_secs(),
            args: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PathsConfig {
    pub output_dir: PathBuf,
    pub scratch_dir: PathBuf,
    /// Directory of `.scad` scripts; the bundled scripts are used when unset.
    pub scripts_dir: Option<PathBuf>,
}

impl Default for PathsConfig {
    fn default() -> Self {
        let render = RenderSettings::default();
        Self {
            output_dir: render.output_dir,
            scratch_dir: render.scratch_dir,
            scripts_dir: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Model format: `stl`, `3mf`, `off` or `amf`.
    pub format: String,
    pub no_color: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: ArtifactFormat::default().to_string(),
            no_color: false,
        }
    }
}

impl AppConfig {
    /// Load configuration from every layer.
    ///
    /// `config_file` is the path given with `--config`; unlike the implicit
    /// locations it must exist.
    pub fn load(config_file: Option<&PathBuf>) -> anyhow::Result<Self> {
        Self::load_from(
            Some(Self::config_path()).as_deref(),
            Path::new(LOCAL_CONFIG_FILE),
            config_file.map(PathBuf::as_path),
        )
    }

    fn load_from(
        global: Option<&Path>,
        local: &Path,
        explicit: Option<&Path>,
    ) -> anyhow::Result<Self> {
        let defaults =
            Config::try_from(&Self::default()).context("Failed to serialise default config")?;

        let mut builder = Config::builder().add_source(defaults);
        if let Some(global) = global {
            builder = builder.add_source(toml_file(global).required(false));
        }
        builder = builder.add_source(toml_file(local).required(false));
        if let Some(explicit) = explicit {
            builder = builder.add_source(toml_file(explicit).required(true));
        }
        builder = builder.add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator("__")
                .list_separator(" ")
                .with_list_parse_key("compiler.args")
                .try_parsing(true),
        );

        builder
            .build()
            .context("Failed to read configuration")?
            .try_deserialize()
            .context("Invalid configuration")
    }

    /// Path to the per-user configuration file.
    ///
    /// Uses `directories::ProjectDirs` for cross-platform correctness,
    /// falling back to `plategen.toml` in the current directory.
    pub fn config_path() -> PathBuf {
        directories::ProjectDirs::from("com", "plategen", "plategen")
            .map(|d| d.config_dir().join("config.toml"))
            .unwrap_or_else(|| PathBuf::from(LOCAL_CONFIG_FILE))
    }

    /// The file that currently wins, if any exists.
    pub fn active_path(explicit: Option<&PathBuf>) -> Option<PathBuf> {
        if let Some(path) = explicit {
            return Some(path.clone());
        }
        let local = PathBuf::from(LOCAL_CONFIG_FILE);
        if local.is_file() {
            return Some(local);
        }
        let global = Self::config_path();
        global.is_file().then_some(global)
    }

    /// Render the configuration as TOML.
    pub fn to_toml(&self) -> anyhow::Result<String> {
        toml::to_string_pretty(self).context("Failed to serialise configuration")
    }

    /// Look up a dotted key such as `compiler.binary`.
    pub fn get(&self, key: &str) -> Option<serde_json::Value> {
        let mut value = serde_json::to_value(self).ok()?;
        for part in key.split('.') {
            value = value.get_mut(part)?.take();
        }
        Some(value)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.compiler.timeout_secs)
    }

    pub fn artifact_format(&self) -> Result<ArtifactFormat, String> {
        self.output
            .format
            .parse()
            .map_err(|e: DomainError| e.to_string())
    }

    /// Settings handed to the render invoker.
    pub fn render_settings(&self) -> Result<RenderSettings, String> {
        Ok(RenderSettings {
            scratch_dir: self.paths.scratch_dir.clone(),
            output_dir: self.paths.output_dir.clone(),
            timeout: self.timeout(),
            format: self.artifact_format()?,
        })
    }
}

fn toml_file(path: &Path) -> File<FileSourceFile, FileFormat> {
    File::from(path).format(FileFormat::Toml)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn missing() -> PathBuf {
        PathBuf::from("/definitely/not/here/plategen.toml")
    }

    #[test]
    fn defaults_match_render_defaults() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.compiler.binary, PathBuf::from("openscad"));
        assert_eq!(cfg.compiler.timeout_secs, 30);
        assert_eq!(cfg.paths.output_dir, PathBuf::from("generated_files"));
        assert!(cfg.paths.scripts_dir.is_none());
        assert_eq!(cfg.output.format, "stl");
        assert!(!cfg.output.no_color);
    }

    #[test]
    fn load_without_files_returns_defaults() {
        let cfg = AppConfig::load_from(None, &missing(), None).unwrap();
        assert_eq!(cfg.compiler.timeout_secs, 30);
        assert_eq!(cfg.output.format, "stl");
    }

    #[test]
    fn explicit_file_must_exist() {
        assert!(AppConfig::load_from(None, &missing(), Some(&missing())).is_err());
    }

    #[test]
    fn file_values_override_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("custom.toml");
        std::fs::write(
            &path,
            "[compiler]\ntimeout_secs = 90\n\n[output]\nformat = \"3mf\"\n",
        )
        .unwrap();

        let cfg = AppConfig::load_from(None, &missing(), Some(&path)).unwrap();
        assert_eq!(cfg.compiler.timeout_secs, 90);
        assert_eq!(cfg.compiler.binary, PathBuf::from("openscad"));
        assert_eq!(cfg.artifact_format().unwrap(), ArtifactFormat::ThreeMf);
    }

    #[test]
    fn get_walks_dotted_keys() {
        let cfg = AppConfig::default();
        assert_eq!(
            cfg.get("compiler.timeout_secs"),
            Some(serde_json::json!(30))
        );
        assert_eq!(cfg.get("output.format"), Some(serde_json::json!("stl")));
        assert!(cfg.get("compiler.nope").is_none());
    }

    #[test]
    fn render_settings_reject_unknown_format() {
        let mut cfg = AppConfig::default();
        cfg.output.format = "obj".into();
        assert!(cfg.render_settings().is_err());

        cfg.output.format = "STL".into();
        assert_eq!(cfg.render_settings().unwrap().format, ArtifactFormat::Stl);
    }

    #[test]
    fn toml_round_trip_keeps_sections() {
        let text = AppConfig::default().to_toml().unwrap();
        assert!(text.contains("[compiler]"));
        assert!(text.contains("timeout_secs = 30"));
        let parsed: AppConfig = toml::from_str(&text).unwrap();
        assert_eq!(parsed, AppConfig::default());
    }
}
