//! Command handlers.
//!
//! Each handler translates parsed arguments into calls on the core services
//! and prints the results.  Wiring of adapters lives here so that every
//! command builds its services the same way.

use std::io::IsTerminal as _;
use std::path::PathBuf;

use plategen_adapters::{LocalFilesystem, OpenScadCompiler, script_store};
use plategen_adapters::script_store::ScriptSource;
use plategen_core::application::{GenerationService, RenderInvoker, ScriptStore};
use tracing::debug;

use crate::{
    cli::{GlobalArgs, PlateArgs},
    config::AppConfig,
    error::{CliError, CliResult},
};

pub mod check;
pub mod completions;
pub mod compose;
pub mod config;
pub mod generate;
pub mod init;
pub mod templates;

/// `--scripts-dir` wins over `paths.scripts_dir`.
pub(crate) fn scripts_dir(global: &GlobalArgs, config: &AppConfig) -> Option<PathBuf> {
    global
        .scripts_dir
        .clone()
        .or_else(|| config.paths.scripts_dir.clone())
}

pub(crate) fn open_scripts(
    global: &GlobalArgs,
    config: &AppConfig,
) -> CliResult<(ScriptSource, Box<dyn ScriptStore>)> {
    let dir = scripts_dir(global, config);
    let (source, store) = script_store::resolve(dir.as_deref())?;
    debug!(%source, "script store opened");
    Ok((source, store))
}

pub(crate) fn compiler(config: &AppConfig) -> OpenScadCompiler {
    OpenScadCompiler::new(&config.compiler.binary).with_args(config.compiler.args.iter().cloned())
}

/// Wire the adapters into a ready generation service.
pub(crate) fn build_service(global: &GlobalArgs, config: &AppConfig) -> CliResult<GenerationService> {
    let (_, scripts) = open_scripts(global, config)?;
    let settings = config.render_settings().map_err(CliError::config)?;

    let invoker = RenderInvoker::new(
        Box::new(compiler(config)),
        Box::new(LocalFilesystem::new()),
        settings,
    );
    Ok(GenerationService::try_new(scripts, invoker)?)
}

/// The template to use: the flag when given, otherwise an interactive pick.
pub(crate) fn template_for(plate: &PlateArgs, global: &GlobalArgs) -> CliResult<String> {
    if let Some(template) = &plate.template {
        return Ok(template.clone());
    }
    if global.quiet || !std::io::stdin().is_terminal() {
        return Err(CliError::invalid_input("--template is required"));
    }
    pick_template()
}

#[cfg(feature = "interactive")]
fn pick_template() -> CliResult<String> {
    use dialoguer::{FuzzySelect, theme::ColorfulTheme};
    use plategen_core::domain::TemplateId;

    let items: Vec<String> = TemplateId::ALL
        .iter()
        .map(|id| format!("{:<14} {}", id.as_str(), id.config().label))
        .collect();

    let choice = FuzzySelect::with_theme(&ColorfulTheme::default())
        .with_prompt("Template")
        .items(&items)
        .default(0)
        .interact_opt()
        .map_err(|e| CliError::IoError {
            message: "template prompt failed".into(),
            source: std::io::Error::other(e),
        })?;

    match choice {
        Some(index) => Ok(TemplateId::ALL[index].as_str().to_string()),
        None => Err(CliError::Cancelled),
    }
}

#[cfg(not(feature = "interactive"))]
fn pick_template() -> CliResult<String> {
    Err(CliError::FeatureNotAvailable {
        feature: "interactive",
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::{LogFormat, OutputFormat};

    fn global(scripts_dir: Option<&str>) -> GlobalArgs {
        GlobalArgs {
            verbose: 0,
            quiet: true,
            no_color: true,
            config: None,
            scripts_dir: scripts_dir.map(PathBuf::from),
            output_format: OutputFormat::Plain,
            log_format: LogFormat::Text,
        }
    }

    #[test]
    fn flag_overrides_configured_scripts_dir() {
        let mut config = AppConfig::default();
        config.paths.scripts_dir = Some(PathBuf::from("/etc/plategen/scripts"));

        assert_eq!(
            scripts_dir(&global(Some("./mine")), &config),
            Some(PathBuf::from("./mine"))
        );
        assert_eq!(
            scripts_dir(&global(None), &config),
            Some(PathBuf::from("/etc/plategen/scripts"))
        );
    }

    #[test]
    fn missing_template_is_rejected_when_quiet() {
        let plate = PlateArgs {
            code: "A".into(),
            number: "1".into(),
            template: None,
        };
        let err = template_for(&plate, &global(None)).unwrap_err();
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn compiler_uses_configured_binary() {
        let mut config = AppConfig::default();
        config.compiler.binary = PathBuf::from("/opt/openscad/bin/openscad");
        assert_eq!(
            compiler(&config).binary(),
            std::path::Path::new("/opt/openscad/bin/openscad")
        );
    }
}
