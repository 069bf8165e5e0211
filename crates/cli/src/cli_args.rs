//! Command-line argument parsing.
//!
//! This module defines the command-line interface structure using the
//! `clap` crate. Everything after `--` is handed to the resolution engine
//! untouched.

use clap::Parser;

use crate::config::DEFAULT_PADDING;

/// Command-line arguments for the parmsets CLI tool.
///
/// # Examples
///
/// ```rust
/// use clap::Parser;
/// use parmsets_cli::cli_args::Args;
///
/// let args = Args::parse_from(["parmsets", "--", "-Target", "web01"]);
/// assert_eq!(args.tokens, vec!["-Target", "web01"]);
/// ```
#[derive(Parser, Debug)] // requires `derive` feature
#[command(term_width = 0)] // Just to make testing across clap features easier
pub struct Args {
    /// Path to the parameter declarations YAML.
    ///
    /// If not provided, defaults to `~/.parmsets/parameters.yml`.
    #[arg(long, short = 'd')]
    pub declarations: Option<String>,

    /// Column width of parameter names in the usage text (`-?`).
    #[arg(long, default_value_t = DEFAULT_PADDING)]
    pub padding: usize,

    /// Tokens to resolve against the declared parameter sets.
    ///
    /// Pass them after `--` so that named tokens such as `-Target` are not
    /// read as options of this tool.
    ///
    /// # Examples
    /// ```bash
    /// parmsets -d deploy.yml -- -Target web01 -Force
    /// ```
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    pub tokens: Vec<String>,
}
