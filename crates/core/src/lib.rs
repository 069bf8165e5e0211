//! Parmsets Core Library
//!
//! This crate resolves a list of command-line tokens against declared,
//! mutually exclusive parameter sets. It picks the set the tokens belong to,
//! converts and validates every value into its declared type, and reports
//! which values were supplied and which kept their initial value.
//!
//! # Key Features
//!
//! - **Parameter Sets**: Named invocation forms with positional, named, switch
//!   and variadic parameters
//! - **Name Abbreviation**: Any unique, case-insensitive prefix selects a parameter
//! - **Typed Values**: Scalars and arrays of `bool`, `char`, `int`, `uint`,
//!   `float` and `string`
//! - **Validation**: Length, count, range, set membership and pattern constraints
//! - **Interactive Fallback**: Prompts for mandatory parameters left unset
//!
//! # Examples
//!
//! ```
//! use parmsets_core::{Attribute, ParameterDefinition, Parameters, Resolution};
//! use parmsets_core::value::{ScalarType, ValueType};
//!
//! let parameters = Parameters::new([
//!     ParameterDefinition::new("Target", ValueType::STRING).at_position(0).mandatory(),
//!     ParameterDefinition::new("Count", ValueType::Scalar(ScalarType::Int))
//!         .initial("1")
//!         .with(Attribute::range(1, 10)),
//!     ParameterDefinition::switch("Force"),
//! ])?;
//!
//! match parameters.resolve(&["web01", "-co", "3", "-f"])? {
//!     Resolution::Bound(bound) => {
//!         assert_eq!(bound.get::<String>("Target").as_deref(), Some("web01"));
//!         assert_eq!(bound.get::<i64>("Count"), Some(3));
//!         assert_eq!(bound.get::<bool>("Force"), Some(true));
//!     }
//!     other => panic!("unexpected resolution: {other:?}"),
//! }
//! # Ok::<(), parmsets_core::error::Error>(())
//! ```

pub mod binding;
pub mod convert;
pub mod engine;
pub mod error;
pub mod parameter;
pub mod parameter_set;
pub mod prompt;
pub mod selection;
pub mod tokenize;
pub mod validate;
pub mod value;

pub use binding::{Binding, BoundSet};
pub use convert::{split_quoted, Converter, StandardConverter};
pub use engine::{Parameters, ParametersBuilder, Resolution};
pub use error::{Error, ErrorKind, Result};
pub use parameter::{Attribute, Parameter, ParameterDefinition};
pub use parameter_set::ParameterSet;
pub use prompt::{Prompter, ScriptedPrompter, StdinPrompter};
pub use tokenize::HelpRequest;
