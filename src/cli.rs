use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(
    name = "formulae",
    about = "Validate and evaluate formulas with mixed brackets, implicit products and variables",
    version,
    propagate_version = true,
    disable_help_subcommand = true
)]
pub struct FormulaeCli {
    /// Global: path to config (TOML); default: ~/.formulae/config.toml
    #[arg(long = "config", value_name = "FILE", global = true)]
    pub config: Option<PathBuf>,

    /// Global: variables file used by save/load/savelist (overrides config)
    #[arg(long = "save-file", value_name = "FILE", global = true)]
    pub save_file: Option<PathBuf>,

    /// Global: disable colored output
    #[arg(long = "no-color", action = ArgAction::SetTrue, global = true)]
    pub no_color: bool,

    /// Global: print results as JSON lines
    #[arg(long = "json", action = ArgAction::SetTrue, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub cmd: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Evaluate one or more formulas
    ///
    /// Examples:
    ///   formulae eval "2+3*4"
    ///   formulae eval "3(4)" "-(2+3)" "7 % 4 + 1"
    Eval {
        #[arg(value_name = "FORMULA", required = true, allow_hyphen_values = true)]
        formulas: Vec<String>,
    },

    /// Check a formula's syntax without evaluating it
    Check {
        #[arg(value_name = "FORMULA", allow_hyphen_values = true)]
        formula: String,
    },

    /// Print the normalized formula and its tokens (debug)
    Tokens {
        #[arg(value_name = "FORMULA", allow_hyphen_values = true)]
        formula: String,
    },

    /// Start the interactive shell (default)
    Shell,
}
