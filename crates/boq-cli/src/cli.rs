//! CLI argument definitions for the quote importer.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

use boq_cli::overrides::ColumnAssignment;
use boq_model::FieldKey;
use boq_transform::MergeMode;

#[derive(Parser)]
#[command(
    name = "boq",
    version,
    about = "Import bill-of-quantities spreadsheets into quote line items",
    long_about = "Import bill-of-quantities spreadsheets into quote line items.\n\n\
                  Reads the first sheet of an .xlsx, .xls or .csv file, finds the header row,\n\
                  previews the normalized rows and merges them into a JSON item list."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for humans, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Import a spreadsheet and write the merged item list as JSON.
    Import(ImportArgs),

    /// Show the detected mapping and preview rows without committing.
    Preview(PreviewArgs),

    /// Write the import template workbook.
    Template(TemplateArgs),

    /// List line-item fields and the header labels that map to them.
    Fields(FieldsArgs),
}

/// Options shared by commands that open a spreadsheet.
#[derive(Args)]
pub struct SessionArgs {
    /// Spreadsheet to import (.xlsx, .xls or .csv).
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Map a field to a column, e.g. `--map unit_price=E` or `--map quantity=3`.
    ///
    /// Columns are zero-based numbers or spreadsheet letters. Overrides header
    /// detection for that field.
    #[arg(long = "map", value_name = "FIELD=COL")]
    pub map: Vec<ColumnAssignment>,

    /// Remove the mapping for a field.
    #[arg(long = "unmap", value_name = "FIELD")]
    pub unmap: Vec<FieldKey>,

    /// Import settings (TOML): detection depth, size limit, extra header labels.
    #[arg(long = "config", value_name = "TOML")]
    pub config: Option<PathBuf>,
}

#[derive(Args)]
pub struct ImportArgs {
    #[command(flatten)]
    pub session: SessionArgs,

    /// Existing item list (JSON array) to merge into.
    #[arg(long = "items", value_name = "JSON")]
    pub items: Option<PathBuf>,

    /// Append to the existing items or replace them.
    #[arg(long = "mode", value_enum, default_value = "add")]
    pub mode: MergeModeArg,

    /// Confirm replacing a non-empty item list.
    #[arg(long = "yes", short = 'y')]
    pub yes: bool,

    /// Where to write the merged list (default: stdout).
    #[arg(long = "output", short = 'o', value_name = "JSON")]
    pub output: Option<PathBuf>,

    /// Preview and merge without writing anything.
    #[arg(long = "dry-run")]
    pub dry_run: bool,
}

#[derive(Args)]
pub struct PreviewArgs {
    #[command(flatten)]
    pub session: SessionArgs,
}

#[derive(Args)]
pub struct TemplateArgs {
    /// Path of the .xlsx file to create.
    #[arg(value_name = "OUTPUT")]
    pub output: PathBuf,
}

#[derive(Args)]
pub struct FieldsArgs {
    /// Include extra header labels from this config file.
    #[arg(long = "config", value_name = "TOML")]
    pub config: Option<PathBuf>,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum MergeModeArg {
    Add,
    Replace,
}

impl From<MergeModeArg> for MergeMode {
    fn from(arg: MergeModeArg) -> Self {
        match arg {
            MergeModeArg::Add => MergeMode::Add,
            MergeModeArg::Replace => MergeMode::Replace,
        }
    }
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
