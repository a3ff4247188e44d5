//! Implementation of the `plategen check` command.
//!
//! Checks, in order:
//! 1. every template has a source script
//! 2. every script composes for both code-length branches
//! 3. the OpenSCAD binary can be started

use plategen_core::application::{GeometryCompiler, TemplateService};
use tracing::instrument;

use crate::{
    cli::{CheckArgs, GlobalArgs},
    commands::{build_service, compiler, open_scripts},
    config::AppConfig,
    error::{CliError, CliResult},
    output::OutputManager,
};

#[instrument(skip_all)]
pub fn execute(
    args: CheckArgs,
    global: GlobalArgs,
    config: AppConfig,
    output: OutputManager,
) -> CliResult<()> {
    let mut failures = 0;

    let (source, scripts) = open_scripts(&global, &config)?;
    output.header(&format!("Scripts: {source}"))?;

    let missing = TemplateService::new(scripts).missing();
    for template in &missing {
        failures += 1;
        output.error(&format!(
            "{}: script '{}' not found",
            template.id, template.source_script
        ))?;
    }

    if missing.is_empty() {
        failures += check_composition(&global, &config, &output)?;
    }

    if args.skip_compiler {
        output.info("Compiler check skipped")?;
    } else {
        let compiler = compiler(&config);
        match compiler.probe() {
            Ok(version) => output.success(&format!(
                "Compiler: {} ({version})",
                compiler.binary().display()
            ))?,
            Err(e) => {
                failures += 1;
                output.error(&format!("Compiler: {e}"))?;
            }
        }
    }

    if failures > 0 {
        return Err(CliError::CheckFailed { failures });
    }
    output.success("All checks passed")?;
    Ok(())
}

fn check_composition(
    global: &GlobalArgs,
    config: &AppConfig,
    output: &OutputManager,
) -> CliResult<usize> {
    let service = build_service(global, config)?;

    let mut failures = 0;
    for check in service.check_templates() {
        match check.result {
            Ok(()) => output.success(&format!("{}: composes", check.template))?,
            Err(e) => {
                failures += 1;
                output.error(&format!("{}: {e}", check.template))?;
            }
        }
    }
    Ok(failures)
}
