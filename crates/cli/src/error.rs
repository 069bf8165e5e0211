use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Error {} {} file at `{}`: {}", .action, .file_description, .path, .original)]
    Yaml {
        action: String,
        file_description: String,
        path: String,
        original: serde_yaml::Error,
    },

    #[error("IO error with {} file at path `{}`: {}", .file_description, .path, .original)]
    Io {
        file_description: String,
        path: String,
        original: std::io::Error,
    },

    #[error("No parameters were found in the declaration YAML. Is `{}` empty?", .path)]
    EmptyDeclarations { path: String },

    #[error("{}", .0)]
    Resolution(#[from] parmsets_core::Error),
}

impl Error {
    pub fn empty_declarations(path: String) -> Self {
        Self::EmptyDeclarations { path }
    }

    pub fn yaml_error(
        action: String,
        file_description: String,
        path: String,
        original: serde_yaml::Error,
    ) -> Self {
        Self::Yaml {
            action,
            file_description,
            path,
            original,
        }
    }

    pub fn io_error(file_description: String, path: String, original: std::io::Error) -> Self {
        Self::Io {
            file_description,
            path,
            original,
        }
    }

    /// The core error behind this one, if resolution failed.
    pub fn resolution(&self) -> Option<&parmsets_core::Error> {
        match self {
            Error::Resolution(error) => Some(error),
            _ => None,
        }
    }
}
