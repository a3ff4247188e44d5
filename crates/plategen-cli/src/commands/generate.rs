//! Implementation of the `plategen generate` command.
//!
//! Responsibility: fold flag overrides into the config, build the
//! generation service, render one plate, and report the artifact.

use plategen_core::application::GenerationResponse;
use plategen_core::domain::{ArtifactFormat, RawPlateRequest};
use plategen_core::error::PlateError;
use tracing::{info, instrument};

use crate::{
    cli::{GenerateArgs, GlobalArgs},
    commands::{build_service, template_for},
    config::AppConfig,
    error::{CliError, CliResult},
    output::OutputManager,
};

#[instrument(skip_all, fields(code = %args.plate.code, number = %args.plate.number))]
pub fn execute(
    args: GenerateArgs,
    global: GlobalArgs,
    config: AppConfig,
    output: OutputManager,
) -> CliResult<()> {
    let config = apply_overrides(config, &args)?;
    let template = template_for(&args.plate, &global)?;
    let service = build_service(&global, &config)?;

    let raw = RawPlateRequest::new(template, &args.plate.code, &args.plate.number);

    let spinner = output.spinner(format!(
        "Rendering {}-{} on {}",
        raw.plate_code.to_ascii_uppercase(),
        raw.plate_number,
        raw.template
    ));
    let result = service.generate(&raw);
    spinner.finish_and_clear();

    if args.json || output.wants_json() {
        output.json(&GenerationResponse::from_result(&result))?;
    }

    let artifact = result?;
    info!(path = %artifact.output_path.display(), "model written");

    if !(args.json || output.wants_json()) {
        output.success(&format!("Generated {}", artifact.output_file_name))?;
        output.info(&format!("Saved to {}", artifact.output_path.display()))?;
    }
    Ok(())
}

/// Fold `--output-dir`, `--format`, `--timeout` and `--compiler` into the
/// loaded configuration.
fn apply_overrides(mut config: AppConfig, args: &GenerateArgs) -> CliResult<AppConfig> {
    if let Some(dir) = &args.output_dir {
        config.paths.output_dir = dir.clone();
    }
    if let Some(format) = &args.format {
        let format: ArtifactFormat = format.parse().map_err(PlateError::from)?;
        config.output.format = format.to_string();
    }
    if let Some(secs) = args.timeout {
        if secs == 0 {
            return Err(CliError::invalid_input("--timeout must be at least 1 second"));
        }
        config.compiler.timeout_secs = secs;
    }
    if let Some(binary) = &args.compiler {
        config.compiler.binary = binary.clone();
    }
    Ok(config)
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;
    use std::time::Duration;

    use super::*;
    use crate::cli::PlateArgs;

    fn args() -> GenerateArgs {
        GenerateArgs {
            plate: PlateArgs {
                code: "A".into(),
                number: "12345".into(),
                template: Some("dubai_new".into()),
            },
            output_dir: None,
            format: None,
            timeout: None,
            compiler: None,
            json: false,
        }
    }

    #[test]
    fn no_flags_keep_config() {
        let config = apply_overrides(AppConfig::default(), &args()).unwrap();
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn flags_override_config() {
        let mut a = args();
        a.output_dir = Some(PathBuf::from("/tmp/plates"));
        a.format = Some("3MF".into());
        a.timeout = Some(5);
        a.compiler = Some(PathBuf::from("/usr/local/bin/openscad-nightly"));

        let config = apply_overrides(AppConfig::default(), &a).unwrap();
        let settings = config.render_settings().unwrap();
        assert_eq!(settings.output_dir, PathBuf::from("/tmp/plates"));
        assert_eq!(settings.format, ArtifactFormat::ThreeMf);
        assert_eq!(settings.timeout, Duration::from_secs(5));
        assert_eq!(
            config.compiler.binary,
            PathBuf::from("/usr/local/bin/openscad-nightly")
        );
    }

    #[test]
    fn unknown_format_is_a_user_error() {
        let mut a = args();
        a.format = Some("obj".into());
        let err = apply_overrides(AppConfig::default(), &a).unwrap_err();
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn zero_timeout_is_rejected() {
        let mut a = args();
        a.timeout = Some(0);
        assert!(apply_overrides(AppConfig::default(), &a).is_err());
    }
}
