//! Shell completion generation.

use clap::CommandFactory;
use clap_complete::{Generator, generate, shells};

use crate::cli::{Cli, CompletionsArgs, Shell};
use crate::error::CliResult;

const BIN_NAME: &str = "plategen";

pub fn execute(args: CompletionsArgs) -> CliResult<()> {
    let mut out = std::io::stdout();
    match args.shell {
        Shell::Bash => write(shells::Bash, &mut out),
        Shell::Zsh => write(shells::Zsh, &mut out),
        Shell::Fish => write(shells::Fish, &mut out),
        Shell::PowerShell => write(shells::PowerShell, &mut out),
        Shell::Elvish => write(shells::Elvish, &mut out),
    }
    Ok(())
}

fn write(shell: impl Generator, out: &mut dyn std::io::Write) {
    generate(shell, &mut Cli::command(), BIN_NAME, out);
}
