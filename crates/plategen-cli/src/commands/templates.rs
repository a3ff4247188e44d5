//! Implementation of the `plategen templates` command.

use plategen_core::application::{TemplateInfo, TemplateService};

use crate::{
    cli::{GlobalArgs, ListFormat, TemplatesArgs},
    commands::open_scripts,
    config::AppConfig,
    error::CliResult,
    output::OutputManager,
};

pub fn execute(
    args: TemplatesArgs,
    global: GlobalArgs,
    config: AppConfig,
    output: OutputManager,
) -> CliResult<()> {
    let (source, scripts) = open_scripts(&global, &config)?;
    let templates = TemplateService::new(scripts).list();

    match args.format {
        ListFormat::Table => {
            output.header(&format!("Available templates ({source}):"))?;
            for line in table(&templates) {
                output.data(&line)?;
            }
        }
        // JSON and CSV bypass the quiet flag: they are meant for pipes.
        ListFormat::Json => output.json(&templates)?,
        ListFormat::List => {
            for t in &templates {
                output.data(&t.id)?;
            }
        }
        ListFormat::Csv => {
            for line in csv(&templates) {
                output.data(&line)?;
            }
        }
    }

    Ok(())
}

fn table(templates: &[TemplateInfo]) -> Vec<String> {
    let mut lines = vec![format!(
        "  {:<14} {:<26} {:<28} {:>6}  {}",
        "ID", "LABEL", "CODE", "DIGITS", "SCRIPT"
    )];
    lines.extend(templates.iter().map(|t| {
        let script = if t.script_available {
            t.script.clone()
        } else {
            format!("{} (missing)", t.script)
        };
        format!(
            "  {:<14} {:<26} {:<28} {:>6}  {}",
            t.id, t.label, t.code_rule, t.max_number_digits, script
        )
    }));
    lines
}

fn csv(templates: &[TemplateInfo]) -> Vec<String> {
    let mut lines = vec!["id,label,code_rule,max_number_digits,script,script_available".to_string()];
    lines.extend(templates.iter().map(|t| {
        format!(
            "{},{},{},{},{},{}",
            t.id,
            csv_field(&t.label),
            csv_field(&t.code_rule),
            t.max_number_digits,
            t.script,
            t.script_available
        )
    }));
    lines
}

fn csv_field(value: &str) -> String {
    if value.contains([',', '"']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn info(id: &str, available: bool) -> TemplateInfo {
        TemplateInfo {
            id: id.into(),
            label: "Dubai Plate - New".into(),
            code_rule: "1 to 2 letters".into(),
            max_number_digits: 5,
            script: format!("{id}.scad"),
            script_available: available,
        }
    }

    #[test]
    fn table_marks_missing_scripts() {
        let lines = table(&[info("dubai_new", true), info("sharjah_old", false)]);
        assert_eq!(lines.len(), 3);
        assert!(lines[0].contains("ID"));
        assert!(!lines[1].contains("missing"));
        assert!(lines[2].contains("sharjah_old.scad (missing)"));
    }

    #[test]
    fn csv_has_header_and_rows() {
        let lines = csv(&[info("dubai_new", true)]);
        assert_eq!(
            lines,
            vec![
                "id,label,code_rule,max_number_digits,script,script_available".to_string(),
                "dubai_new,Dubai Plate - New,1 to 2 letters,5,dubai_new.scad,true".to_string(),
            ]
        );
    }

    #[test]
    fn csv_quotes_commas() {
        assert_eq!(csv_field("a, b"), "\"a, b\"");
        assert_eq!(csv_field("say \"hi\""), "\"say \"\"hi\"\"\"");
    }
}
