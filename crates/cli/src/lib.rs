//! Parmsets CLI Library
//!
//! This crate provides the command-line front end for parmsets. It loads
//! parameter declarations from YAML, resolves the tokens given on the
//! command line against them, and prints the resulting parameter set.
//!
//! # Key Features
//!
//! - **YAML Declarations**: Program description and parameters in one file
//! - **Usage and Detailed Help**: `-?`, `-??` and `-help` rendered from the declarations
//! - **Terminal Prompts**: Unmet mandatory parameters are asked for interactively
//! - **Suggestions**: Mistyped parameter names get "did you mean" hints
//!
//! # Architecture
//!
//! - [`cli_args`]: Command-line argument parsing
//! - [`config`]: Declaration path resolution
//! - [`declarations`]: Declaration file loading
//! - [`help`]: Usage, detailed help and version text
//! - [`prompt`]: Terminal prompter for mandatory parameters
//! - [`report`]: Rendering of a resolved set
//! - [`suggest`]: Fuzzy name suggestions
//!
//! # Examples
//!
//! ```bash
//! # Resolve tokens against the default declaration file
//! parmsets -- -Target web01 -Force
//!
//! # Use another declaration file
//! parmsets -d deploy.yml -- web01 1 2 3
//!
//! # Usage text
//! parmsets -d deploy.yml -- -?
//! ```

pub mod cli_args;
pub mod config;
pub mod declarations;
pub mod error;
pub mod help;
pub mod prompt;
pub mod report;
pub mod suggest;
