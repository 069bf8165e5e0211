//! Declared parameter types and the typed values bound to them.
//!
//! Parameter types are a closed set of scalar kinds plus homogeneous arrays of
//! those kinds. Every kind can be parsed from a string and compared for
//! ordering, which range and set validators rely on.

use std::cmp::Ordering;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::DeclarationError;

/// Element kind of a parameter type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScalarType {
    Bool,
    Char,
    Int,
    UInt,
    Float,
    String,
}

impl ScalarType {
    pub fn name(&self) -> &'static str {
        match self {
            ScalarType::Bool => "bool",
            ScalarType::Char => "char",
            ScalarType::Int => "int",
            ScalarType::UInt => "uint",
            ScalarType::Float => "float",
            ScalarType::String => "string",
        }
    }
}

impl Display for ScalarType {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        formatter.write_str(self.name())
    }
}

impl FromStr for ScalarType {
    type Err = DeclarationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "bool" | "boolean" => Ok(ScalarType::Bool),
            "char" => Ok(ScalarType::Char),
            "int" | "integer" | "i64" => Ok(ScalarType::Int),
            "uint" | "u64" => Ok(ScalarType::UInt),
            "float" | "double" | "f64" => Ok(ScalarType::Float),
            "string" | "str" => Ok(ScalarType::String),
            _ => Err(DeclarationError::UnsupportedType(s.to_string())),
        }
    }
}

/// Declared type of a parameter: a scalar or a homogeneous array.
///
/// Written as `int`, `string`, `int[]`, `string[]` and so on in declaration
/// files.
///
/// ```
/// use parmsets_core::value::{ScalarType, ValueType};
///
/// let files: ValueType = "string[]".parse().unwrap();
/// assert_eq!(files, ValueType::Array(ScalarType::String));
/// assert_eq!(files.to_string(), "string[]");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(try_from = "String", into = "String")]
pub enum ValueType {
    Scalar(ScalarType),
    Array(ScalarType),
}

impl ValueType {
    pub const BOOL: ValueType = ValueType::Scalar(ScalarType::Bool);
    pub const STRING: ValueType = ValueType::Scalar(ScalarType::String);
    pub const STRING_ARRAY: ValueType = ValueType::Array(ScalarType::String);

    /// The scalar kind, or the element kind for arrays.
    pub fn element_type(&self) -> ScalarType {
        match self {
            ValueType::Scalar(element) | ValueType::Array(element) => *element,
        }
    }

    pub fn is_array(&self) -> bool {
        matches!(self, ValueType::Array(_))
    }

    /// True for `string` and `string[]`.
    pub fn is_textual(&self) -> bool {
        self.element_type() == ScalarType::String
    }
}

impl Display for ValueType {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ValueType::Scalar(element) => write!(formatter, "{element}"),
            ValueType::Array(element) => write!(formatter, "{element}[]"),
        }
    }
}

impl FromStr for ValueType {
    type Err = DeclarationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        match trimmed.strip_suffix("[]") {
            Some(element) => element
                .parse()
                .map(ValueType::Array)
                .map_err(|_| DeclarationError::UnsupportedType(s.to_string())),
            None => trimmed.parse().map(ValueType::Scalar),
        }
    }
}

impl TryFrom<String> for ValueType {
    type Error = DeclarationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ValueType> for String {
    fn from(value: ValueType) -> Self {
        value.to_string()
    }
}

/// A single converted element.
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    Bool(bool),
    Char(char),
    Int(i64),
    UInt(u64),
    Float(f64),
    String(String),
}

impl Scalar {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Scalar::String(s) => Some(s),
            _ => None,
        }
    }
}

/// Scalars of the same kind are ordered; scalars of different kinds are not.
impl PartialOrd for Scalar {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        match (self, other) {
            (Scalar::Bool(a), Scalar::Bool(b)) => a.partial_cmp(b),
            (Scalar::Char(a), Scalar::Char(b)) => a.partial_cmp(b),
            (Scalar::Int(a), Scalar::Int(b)) => a.partial_cmp(b),
            (Scalar::UInt(a), Scalar::UInt(b)) => a.partial_cmp(b),
            (Scalar::Float(a), Scalar::Float(b)) => a.partial_cmp(b),
            (Scalar::String(a), Scalar::String(b)) => a.partial_cmp(b),
            _ => None,
        }
    }
}

impl Display for Scalar {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Scalar::Bool(value) => write!(formatter, "{value}"),
            Scalar::Char(value) => write!(formatter, "{value}"),
            Scalar::Int(value) => write!(formatter, "{value}"),
            Scalar::UInt(value) => write!(formatter, "{value}"),
            Scalar::Float(value) => write!(formatter, "{value}"),
            Scalar::String(value) => formatter.write_str(value),
        }
    }
}

/// A converted parameter value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Scalar(Scalar),
    Array(Vec<Scalar>),
}

impl Value {
    /// Elements of the value: the scalar itself, or every array element.
    pub fn elements(&self) -> &[Scalar] {
        match self {
            Value::Scalar(scalar) => std::slice::from_ref(scalar),
            Value::Array(elements) => elements,
        }
    }
}

/// Quotes a text element when it would not survive [`split_quoted`] as-is.
///
/// Inside quotes, `"` and `\` are escaped with a backslash.
///
/// [`split_quoted`]: crate::convert::split_quoted
pub(crate) fn quote_element(text: &str) -> String {
    let needs_quotes = text.is_empty()
        || text.trim() != text
        || text.contains([',', ' ', '\t', '"']);
    if !needs_quotes {
        return text.to_string();
    }
    let escaped = text.replace('\\', "\\\\").replace('"', "\\\"");
    format!("\"{escaped}\"")
}

impl Display for Value {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Scalar(scalar) => write!(formatter, "{scalar}"),
            Value::Array(elements) => {
                let rendered: Vec<String> = elements
                    .iter()
                    .map(|element| quote_element(&element.to_string()))
                    .collect();
                formatter.write_str(&rendered.join(","))
            }
        }
    }
}

/// Extraction of a Rust value from a bound [`Value`].
pub trait FromValue: Sized {
    fn from_value(value: &Value) -> Option<Self>;
}

macro_rules! from_value {
    ($rust:ty, $variant:ident) => {
        impl FromValue for $rust {
            fn from_value(value: &Value) -> Option<Self> {
                match value {
                    Value::Scalar(Scalar::$variant(inner)) => Some(inner.clone()),
                    _ => None,
                }
            }
        }

        impl FromValue for Vec<$rust> {
            fn from_value(value: &Value) -> Option<Self> {
                match value {
                    Value::Array(elements) => elements
                        .iter()
                        .map(|element| match element {
                            Scalar::$variant(inner) => Some(inner.clone()),
                            _ => None,
                        })
                        .collect(),
                    _ => None,
                }
            }
        }
    };
}

from_value!(bool, Bool);
from_value!(char, Char);
from_value!(i64, Int);
from_value!(u64, UInt);
from_value!(f64, Float);
from_value!(String, String);
