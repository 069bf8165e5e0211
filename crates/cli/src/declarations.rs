//! Loading parameter declarations from YAML.
//!
//! A declaration file describes the program (name, version, help texts) and
//! lists every parameter declaration, one entry per set membership.

use std::fs::File;

use log::debug;
use serde::{Deserialize, Serialize};

use parmsets_core::{ParameterDefinition, Parameters};

use crate::error::{Error, Result};

/// Program description and parameter declarations read from one file.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ProgramDeclaration {
    pub program: String,
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub long_description: Option<String>,
    #[serde(default)]
    pub copyright: Option<String>,
    #[serde(default)]
    pub home: Option<String>,
    #[serde(default)]
    pub example: Option<String>,
    #[serde(default)]
    pub default_set: Option<String>,
    #[serde(default)]
    pub parameters: Vec<ParameterDefinition>,
}

impl ProgramDeclaration {
    /// Builds the resolution engine for these declarations.
    pub fn build_parameters(&self) -> Result<Parameters> {
        let mut builder = Parameters::builder().declare_all(self.parameters.iter().cloned());
        if let Some(default_set) = &self.default_set {
            builder = builder.default_set(default_set);
        }
        Ok(builder.build()?)
    }
}

fn get_reader(file_description: &str, path: &str) -> Result<File> {
    File::open(path)
        .map_err(|e| Error::io_error(file_description.to_string(), path.to_string(), e))
}

/// Reads and parses the declaration file at `declarations_path`.
///
/// # Errors
///
/// Returns an error if:
/// - The file cannot be opened
/// - The file contains invalid YAML or does not match the expected structure
/// - The file declares no parameters
pub fn get_declarations(declarations_path: &str) -> Result<ProgramDeclaration> {
    let reader = get_reader("declarations", declarations_path)?;

    let declaration: ProgramDeclaration = serde_yaml::from_reader(reader).map_err(|e| {
        Error::yaml_error(
            "reading".to_string(),
            "declarations".to_string(),
            declarations_path.to_string(),
            e,
        )
    })?;

    if declaration.parameters.is_empty() {
        return Err(Error::empty_declarations(declarations_path.to_string()));
    }

    debug!(
        "Loaded {} parameter declaration(s) for `{}`",
        declaration.parameters.len(),
        declaration.program
    );
    Ok(declaration)
}
