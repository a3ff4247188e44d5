//! Implementation of the `plategen compose` command (dry run).
//!
//! Validates and composes exactly as `generate` does, then prints the
//! script instead of handing it to the compiler.

use plategen_core::domain::{ComposedScript, RawPlateRequest};
use tracing::instrument;

use crate::{
    cli::{ComposeArgs, GlobalArgs},
    commands::{build_service, template_for},
    config::AppConfig,
    error::CliResult,
    output::OutputManager,
};

#[instrument(skip_all, fields(code = %args.plate.code, number = %args.plate.number))]
pub fn execute(
    args: ComposeArgs,
    global: GlobalArgs,
    config: AppConfig,
    output: OutputManager,
) -> CliResult<()> {
    let template = template_for(&args.plate, &global)?;
    let service = build_service(&global, &config)?;

    let raw = RawPlateRequest::new(template, &args.plate.code, &args.plate.number);
    let script = service.compose_raw(&raw)?;

    if args.bindings {
        for line in binding_lines(&script) {
            output.data(&line)?;
        }
    } else {
        output.data(script.as_str())?;
    }
    Ok(())
}

fn binding_lines(script: &ComposedScript) -> Vec<String> {
    script
        .bindings()
        .iter()
        .map(|(placeholder, value)| format!("{placeholder} = {value}"))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use plategen_core::domain::{PlateRequest, ResolvedLayout, ScriptComposer};

    #[test]
    fn bindings_list_every_placeholder() {
        let source = "<plateCode> <plateNum> <plateCodeSize> <plateNumSize> \
                      <x_pCode> <y_pCode> <x_pNum> <y_pNum> <z_pCodeNum>";
        let request = PlateRequest::parse("dubai_new", "ab", "12345").unwrap();
        let layout = ResolvedLayout::resolve(request.config(), request.code().len());
        let script = ScriptComposer::compose(source, &request, &layout).unwrap();

        let lines = binding_lines(&script);
        assert_eq!(lines.len(), 9);
        assert!(lines.contains(&"<plateCode> = AB".to_string()));
        assert!(lines.contains(&"<x_pCode> = 16".to_string()));
        assert!(lines.contains(&"<plateCodeSize> = 7".to_string()));
    }
}
