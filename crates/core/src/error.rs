use std::fmt::{Display, Formatter};

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Machine-distinguishable category of an [`Error`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Declaration,
    UnknownParameter,
    AmbiguousParameter,
    MalformedToken,
    DuplicateParameter,
    NoMatchingSet,
    ConversionFailed,
    ValidationFailed,
    TooManyPositional,
    MissingMandatory,
    AbortedInput,
    Io,
}

/// The constraint a value violated, carried by [`Error::ValidationFailed`].
#[derive(Debug, Clone, PartialEq)]
pub enum Constraint {
    Length { min: usize, max: usize },
    Count { min: usize, max: usize },
    Set,
    Range { min: String, max: String },
    Pattern(String),
}

impl Display for Constraint {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Constraint::Length { min, max } => {
                write!(formatter, "must have length between [{min}-{max}].")
            }
            Constraint::Count { min, max } => {
                write!(formatter, "must have array count between [{min}-{max}].")
            }
            Constraint::Set => formatter.write_str("is not in the validation set."),
            Constraint::Range { min, max } => write!(formatter, "is not in range [{min}-{max}]."),
            Constraint::Pattern(pattern) => write!(formatter, "did not match pattern [{pattern}]."),
        }
    }
}

/// Problems found while building parameters and sets, before any token is read.
#[derive(Error, Debug)]
pub enum DeclarationError {
    #[error("No parameters were declared.")]
    NoParameters,

    #[error("Invalid parameter name `{}`: name may not be empty", .0)]
    EmptyName(String),

    #[error("Invalid parameter name `{}`: name can not start with the '-' character", .0)]
    LeadingDash(String),

    #[error("Invalid parameter name `{}`: name can only contain ASCII letters or digits", .0)]
    NotAlphanumeric(String),

    #[error("Parameter name `{}` is reserved", .0)]
    ReservedName(String),

    #[error("Unsupported parameter type `{}`", .0)]
    UnsupportedType(String),

    #[error("Parameter set `{}` already contains a parameter named `{}`", .set, .name)]
    DuplicateName { set: String, name: String },

    #[error("Parameter set `{}` already contains a parameter at position {}", .set, .position)]
    DuplicatePosition { set: String, position: usize },

    #[error("Only one variadic parameter allowed per parameter set (set `{}`)", .0)]
    MultipleVariadic(String),

    #[error("Parameter `{}` is declared with a different type or switch flag in another set", .0)]
    ConflictingDefinition(String),

    #[error("Switch parameter `{}` must be of type bool", .0)]
    SwitchNotBool(String),

    #[error("Variadic parameter `{}` must be of type string[]", .0)]
    VariadicNotStringArray(String),

    #[error("The `{}` attribute is not valid on parameter `{}` of type {}", .attribute, .name, .value_type)]
    IncompatibleAttribute {
        name: String,
        attribute: &'static str,
        value_type: String,
    },

    #[error("The `{}` attribute is declared more than once on parameter `{}`", .attribute, .name)]
    DuplicateAttribute {
        name: String,
        attribute: &'static str,
    },

    #[error("Invalid {} on parameter `{}`: min must be <= max", .attribute, .name)]
    MinGreaterThanMax {
        name: String,
        attribute: &'static str,
    },

    #[error("Value `{}` declared on parameter `{}` can not be converted to {}", .value, .name, .value_type)]
    InvalidDeclaredValue {
        name: String,
        value: String,
        value_type: String,
    },

    #[error("Validation set on parameter `{}` is empty", .0)]
    EmptyValidationSet(String),

    #[error("Invalid pattern on parameter `{}`: {}", .name, .original)]
    InvalidPattern {
        name: String,
        original: regex::Error,
    },

    #[error("Invalid prompt on parameter `{}`: {}", .name, .reason)]
    InvalidPrompt { name: String, reason: String },

    #[error("Default set name `{}` does not match a declared set", .0)]
    UnknownDefaultSet(String),
}

#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid parameter declaration: {}", .0)]
    Declaration(#[from] DeclarationError),

    #[error("Invalid parameter name [{}].", .0)]
    UnknownParameter(String),

    #[error("Parameter [-{}] not unique. Try adding more of the name.", .input)]
    AmbiguousParameter {
        input: String,
        candidates: Vec<String>,
    },

    #[error("Parameter [{}] has invalid value [{}].", .token, .reason)]
    MalformedToken { token: String, reason: String },

    #[error("Duplicate parameter name [{}].", .0)]
    DuplicateParameter(String),

    #[error("{}", .0)]
    NoMatchingSet(String),

    #[error("Parameter [{}] could not be converted to [{}]. Invalid data: '{}'", .parameter, .type_name, .input)]
    ConversionFailed {
        parameter: String,
        type_name: String,
        input: String,
    },

    #[error("Parameter [{}] {} Invalid data: '{}'", .parameter, .constraint, .input)]
    ValidationFailed {
        parameter: String,
        constraint: Constraint,
        input: String,
    },

    #[error("Too many position parameter(s) for set `{}`: {} left over.", .set, .extra)]
    TooManyPositional { set: String, extra: usize },

    #[error("Missing mandatory parameter(s): {}.", .0.join(", "))]
    MissingMandatory(Vec<String>),

    #[error("Input aborted while prompting for parameter [{}].", .0)]
    AbortedInput(String),

    #[error("STDIO error: {}", .0)]
    Stdio(#[from] std::io::Error),
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Declaration(_) => ErrorKind::Declaration,
            Error::UnknownParameter(_) => ErrorKind::UnknownParameter,
            Error::AmbiguousParameter { .. } => ErrorKind::AmbiguousParameter,
            Error::MalformedToken { .. } => ErrorKind::MalformedToken,
            Error::DuplicateParameter(_) => ErrorKind::DuplicateParameter,
            Error::NoMatchingSet(_) => ErrorKind::NoMatchingSet,
            Error::ConversionFailed { .. } => ErrorKind::ConversionFailed,
            Error::ValidationFailed { .. } => ErrorKind::ValidationFailed,
            Error::TooManyPositional { .. } => ErrorKind::TooManyPositional,
            Error::MissingMandatory(_) => ErrorKind::MissingMandatory,
            Error::AbortedInput(_) => ErrorKind::AbortedInput,
            Error::Stdio(_) => ErrorKind::Io,
        }
    }

    pub fn malformed(token: &str, reason: &str) -> Self {
        Self::MalformedToken {
            token: token.to_string(),
            reason: reason.to_string(),
        }
    }

    pub fn no_matching_set(reason: &str) -> Self {
        Self::NoMatchingSet(format!("{reason} Use '-?' for help."))
    }

    pub fn validation(parameter: &str, constraint: Constraint, input: &str) -> Self {
        Self::ValidationFailed {
            parameter: parameter.to_string(),
            constraint,
            input: input.to_string(),
        }
    }
}
