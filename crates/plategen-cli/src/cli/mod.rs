//! CLI argument definitions using the clap derive API.
//!
//! This module is the *only* place that knows about argument names, aliases,
//! help text, and value enums.  No business logic lives here.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

pub mod global;
pub use global::{GlobalArgs, LogFormat, OutputFormat};

// ── Top-level CLI ─────────────────────────────────────────────────────────────

/// Main CLI entry-point.
#[derive(Debug, Parser)]
#[command(
    name    = "plategen",
    bin_name = "plategen",
    version  = env!("CARGO_PKG_VERSION"),
    author   = env!("CARGO_PKG_AUTHORS"),
    about    = "Number plate 3D models from OpenSCAD templates",
    long_about = "Plategen validates a plate code and number, lays them out on \
                  one of the bundled plate templates, and renders a printable \
                  model with OpenSCAD.",
    after_help = "EXAMPLES:\n\
        \x20 plategen generate --code A --number 12345 --template dubai_new\n\
        \x20 plategen generate --code ab --number 77 -t dubai_old --format 3mf\n\
        \x20 plategen templates\n\
        \x20 plategen check",
    arg_required_else_help = true,
    subcommand_required    = true,
)]
pub struct Cli {
    /// Flags available on every subcommand.
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

// ── Subcommands ───────────────────────────────────────────────────────────────

/// All available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Render a plate model.
    #[command(
        visible_alias = "g",
        about = "Generate a plate model",
        after_help = "EXAMPLES:\n\
            \x20 plategen generate --code A  --number 12345 --template dubai_new\n\
            \x20 plategen generate --code XY --number 7     --template dubai_new_sm --json\n\
            \x20 plategen generate --code 3  --number 42    --template sharjah_old --timeout 60"
    )]
    Generate(GenerateArgs),

    /// List available templates.
    #[command(
        visible_alias = "ls",
        about = "List available templates",
        after_help = "EXAMPLES:\n\
            \x20 plategen templates\n\
            \x20 plategen templates --format json"
    )]
    Templates(TemplatesArgs),

    /// Print the composed script without rendering it.
    #[command(
        about = "Print the composed OpenSCAD script (dry run)",
        after_help = "EXAMPLES:\n\
            \x20 plategen compose --code AB --number 12345 --template dubai_new > plate.scad\n\
            \x20 plategen compose --code A --number 1 -t dubai_old --bindings"
    )]
    Compose(ComposeArgs),

    /// Verify scripts and the compiler.
    #[command(
        about = "Check templates and the OpenSCAD installation",
        after_help = "EXAMPLES:\n\
            \x20 plategen check\n\
            \x20 plategen check --skip-compiler"
    )]
    Check(CheckArgs),

    /// Initialise a Plategen configuration file.
    #[command(
        about = "Initialise configuration",
        after_help = "EXAMPLES:\n\
            \x20 plategen init                    # default location\n\
            \x20 plategen init --local            # plategen.toml in CWD\n\
            \x20 plategen init --scripts ./scripts  # export bundled scripts"
    )]
    Init(InitArgs),

    /// Generate shell completion scripts.
    #[command(
        about = "Generate shell completions",
        after_help = "EXAMPLES:\n\
            \x20 plategen completions bash > ~/.local/share/bash-completion/completions/plategen\n\
            \x20 plategen completions zsh  > ~/.zfunc/_plategen\n\
            \x20 plategen completions fish > ~/.config/fish/completions/plategen.fish"
    )]
    Completions(CompletionsArgs),

    /// Inspect the Plategen configuration.
    #[command(
        about = "Configuration management",
        subcommand,
        after_help = "EXAMPLES:\n\
            \x20 plategen config get compiler.timeout_secs\n\
            \x20 plategen config list\n\
            \x20 plategen config path"
    )]
    Config(ConfigCommands),
}

// ── plate request ─────────────────────────────────────────────────────────────

/// The three request fields, shared by `generate` and `compose`.
#[derive(Debug, Args)]
pub struct PlateArgs {
    /// Plate code: letters for Dubai templates, one digit for sharjah_old.
    #[arg(long = "code", value_name = "CODE", help = "Plate code (e.g. A, AB, 3)")]
    pub code: String,

    /// Plate number, 1 to 5 digits.
    #[arg(
        short = 'n',
        long = "number",
        value_name = "NUMBER",
        help = "Plate number (1-5 digits)"
    )]
    pub number: String,

    /// Template identifier.  Prompted for on a terminal when omitted.
    #[arg(
        short = 't',
        long = "template",
        value_name = "ID",
        help = "Template ID (see `plategen templates`)"
    )]
    pub template: Option<String>,
}

// ── generate ──────────────────────────────────────────────────────────────────

/// Arguments for `plategen generate`.
#[derive(Debug, Args)]
pub struct GenerateArgs {
    #[command(flatten)]
    pub plate: PlateArgs,

    /// Override `paths.output_dir`.
    #[arg(
        short = 'o',
        long = "output-dir",
        value_name = "DIR",
        help = "Directory for generated models"
    )]
    pub output_dir: Option<PathBuf>,

    /// Override `output.format`.
    #[arg(
        short = 'f',
        long = "format",
        value_name = "EXT",
        help = "Model format: stl, 3mf, off, amf"
    )]
    pub format: Option<String>,

    /// Override `compiler.timeout_secs`.
    #[arg(long = "timeout", value_name = "SECS", help = "Render timeout in seconds")]
    pub timeout: Option<u64>,

    /// Override `compiler.binary`.
    #[arg(long = "compiler", value_name = "PATH", help = "OpenSCAD executable")]
    pub compiler: Option<PathBuf>,

    /// Print the result as JSON.
    #[arg(long = "json", help = "Print the result as JSON")]
    pub json: bool,
}

// ── templates ─────────────────────────────────────────────────────────────────

/// Arguments for `plategen templates`.
#[derive(Debug, Args)]
pub struct TemplatesArgs {
    /// Output format.
    #[arg(
        long = "format",
        value_enum,
        default_value = "table",
        help = "Output format"
    )]
    pub format: ListFormat,
}

/// Output format for the `templates` command.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ListFormat {
    /// Human-readable table.
    Table,
    /// One identifier per line.
    List,
    /// JSON array.
    Json,
    /// CSV rows.
    Csv,
}

// ── compose ───────────────────────────────────────────────────────────────────

/// Arguments for `plategen compose`.
#[derive(Debug, Args)]
pub struct ComposeArgs {
    #[command(flatten)]
    pub plate: PlateArgs,

    /// Print `placeholder = value` lines instead of the script.
    #[arg(long = "bindings", help = "Print resolved placeholder values only")]
    pub bindings: bool,
}

// ── check ─────────────────────────────────────────────────────────────────────

/// Arguments for `plategen check`.
#[derive(Debug, Args)]
pub struct CheckArgs {
    /// Only check scripts; do not start the compiler.
    #[arg(long = "skip-compiler", help = "Do not probe the OpenSCAD binary")]
    pub skip_compiler: bool,
}

// ── init ──────────────────────────────────────────────────────────────────────

/// Arguments for `plategen init`.
#[derive(Debug, Args)]
pub struct InitArgs {
    /// Write `plategen.toml` in the current directory.
    #[arg(
        long = "local",
        help = "Create local configuration in current directory"
    )]
    pub local: bool,

    /// Also export the bundled scripts into DIR for customisation.
    #[arg(
        long = "scripts",
        value_name = "DIR",
        help = "Export bundled .scad scripts into DIR"
    )]
    pub scripts: Option<PathBuf>,

    /// Overwrite existing files.
    #[arg(short = 'f', long = "force", help = "Overwrite existing files")]
    pub force: bool,
}

// ── completions ───────────────────────────────────────────────────────────────

/// Arguments for `plategen completions`.
#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Target shell.
    #[arg(value_enum, help = "Shell to generate completions for")]
    pub shell: Shell,
}

/// Supported shells for completion generation.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

// ── config subcommands ────────────────────────────────────────────────────────

/// Subcommands for `plategen config`.
#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Print the value of a configuration key.
    Get {
        /// Dotted key path, e.g. `compiler.binary`.
        key: String,
    },
    /// Print all configuration values.
    List,
    /// Print the path to the active configuration file.
    Path,
}

// ── tests ─────────────────────────────────────────────────────────────────────
