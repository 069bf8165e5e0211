//! String to typed value conversion.
//!
//! Scalars go through a [`Converter`]; arrays are split with [`split_quoted`]
//! and converted element by element.

use log::trace;
use regex::Regex;

use crate::value::{Scalar, ScalarType, Value, ValueType};

/// Delimiters used when splitting an array value.
pub const ARRAY_DELIMITERS: &str = ", ";

/// Delimiters used by [`split_quoted`] when none are supplied.
pub const DEFAULT_DELIMITERS: &str = " \t";

/// Pluggable string to scalar conversion.
pub trait Converter {
    /// Converts `text` to a scalar of kind `target`, or explains why it can't.
    fn convert(&self, text: &str, target: ScalarType) -> Result<Scalar, String>;

    /// Whether this converter can produce values of kind `target`.
    fn supports(&self, _target: ScalarType) -> bool {
        true
    }
}

/// [`Converter`] built on the standard library parsers.
#[derive(Debug, Default, Clone, Copy)]
pub struct StandardConverter;

impl Converter for StandardConverter {
    fn convert(&self, text: &str, target: ScalarType) -> Result<Scalar, String> {
        match target {
            ScalarType::Bool => normalize_bool(text)
                .map(Scalar::Bool)
                .ok_or_else(|| "not a boolean".to_string()),
            ScalarType::Char => {
                let mut chars = text.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Ok(Scalar::Char(c)),
                    _ => Err("expected exactly one character".to_string()),
                }
            }
            ScalarType::Int => text
                .trim()
                .parse()
                .map(Scalar::Int)
                .map_err(|e: std::num::ParseIntError| e.to_string()),
            ScalarType::UInt => text
                .trim()
                .parse()
                .map(Scalar::UInt)
                .map_err(|e: std::num::ParseIntError| e.to_string()),
            ScalarType::Float => text
                .trim()
                .parse()
                .map(Scalar::Float)
                .map_err(|e: std::num::ParseFloatError| e.to_string()),
            ScalarType::String => Ok(Scalar::String(text.to_string())),
        }
    }
}

/// Normalizes the accepted spellings of a boolean.
///
/// ```
/// use parmsets_core::convert::normalize_bool;
///
/// assert_eq!(normalize_bool("TRU"), Some(true));
/// assert_eq!(normalize_bool("0"), Some(false));
/// assert_eq!(normalize_bool("yes"), None);
/// ```
pub fn normalize_bool(text: &str) -> Option<bool> {
    match text.trim().to_lowercase().as_str() {
        "t" | "tr" | "tru" | "true" | "1" => Some(true),
        "f" | "fa" | "fal" | "fals" | "false" | "0" => Some(false),
        _ => None,
    }
}

/// Splits `text` on any of the `delimiters`, keeping double-quoted spans whole.
///
/// Quotes are removed from quoted spans and `\` escapes the next character
/// inside them. Quoted spans are kept verbatim, unquoted runs are trimmed and
/// runs of delimiters never produce empty elements. An empty `delimiters`
/// string means space and tab.
///
/// ```
/// use parmsets_core::convert::split_quoted;
///
/// assert_eq!(split_quoted("\"a b\" c,d", ", "), vec!["a b", "c", "d"]);
/// assert_eq!(split_quoted("one,,,,two", ","), vec!["one", "two"]);
/// assert_eq!(split_quoted(r#""say \"hi\"",x"#, ","), vec!["say \"hi\"", "x"]);
/// ```
pub fn split_quoted(text: &str, delimiters: &str) -> Vec<String> {
    let delimiters = if delimiters.is_empty() {
        DEFAULT_DELIMITERS
    } else {
        delimiters
    };
    let class: String = delimiters
        .chars()
        .map(|c| regex::escape(&c.to_string()))
        .collect();
    let pattern = format!(r#""((?:[^"\\]|\\.)*)"|([^{class}]+)"#);
    let Ok(splitter) = Regex::new(&pattern) else {
        // Every delimiter is escaped, so the pattern is always valid.
        return vec![text.to_string()];
    };

    splitter
        .captures_iter(text)
        .filter_map(|captures| match (captures.get(1), captures.get(2)) {
            (Some(quoted), _) => Some(unescape(quoted.as_str())),
            (None, Some(unquoted)) => {
                let trimmed = unquoted.as_str().trim();
                (!trimmed.is_empty()).then(|| trimmed.to_string())
            }
            (None, None) => None,
        })
        .collect()
}

/// Drops each `\` and keeps the character it escapes.
fn unescape(quoted: &str) -> String {
    let mut unescaped = String::with_capacity(quoted.len());
    let mut chars = quoted.chars();
    while let Some(c) = chars.next() {
        match c {
            '\\' => unescaped.extend(chars.next()),
            _ => unescaped.push(c),
        }
    }
    unescaped
}

/// Converts `text` into a value of `target`.
///
/// On failure returns the offending text: the whole input for scalars, the
/// failing element for arrays.
pub fn convert_from_string(
    text: &str,
    target: ValueType,
    converter: &dyn Converter,
) -> Result<Value, String> {
    match target {
        ValueType::Scalar(element) => converter
            .convert(text, element)
            .map(Value::Scalar)
            .map_err(|reason| {
                trace!("Could not convert `{text}` to {target}: {reason}");
                text.to_string()
            }),
        ValueType::Array(element) => {
            let mut converted = Vec::new();
            for part in split_quoted(text, ARRAY_DELIMITERS) {
                let scalar = converter.convert(&part, element).map_err(|reason| {
                    trace!("Could not convert element `{part}` to {element}: {reason}");
                    part.to_string()
                })?;
                converted.push(scalar);
            }
            Ok(Value::Array(converted))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_quoted_keeps_quoted_spans() {
        assert_eq!(split_quoted("\"a b\" c,d", ", "), vec!["a b", "c", "d"]);
    }

    #[test]
    fn test_split_quoted_default_delimiters() {
        assert_eq!(
            split_quoted("\"one two\" three four,five", ""),
            vec!["one two", "three", "four,five"]
        );
    }

    #[test]
    fn test_split_quoted_escapes_class_characters() {
        assert_eq!(split_quoted("a-b]c", "-]"), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_split_quoted_empty_quotes_yield_empty_element() {
        assert_eq!(split_quoted("\"\",x", ","), vec!["", "x"]);
    }

    #[test]
    fn test_split_quoted_unescapes_and_keeps_quoted_whitespace() {
        assert_eq!(
            split_quoted(r#"" lead","say \"hi there\"","a\\b",plain"#, ","),
            vec![" lead", "say \"hi there\"", "a\\b", "plain"]
        );
        assert_eq!(split_quoted("a,\tb\t,c", ","), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_convert_scalar_int() {
        let value = convert_from_string(" 42 ", ValueType::Scalar(ScalarType::Int), &StandardConverter);
        assert_eq!(value, Ok(Value::Scalar(Scalar::Int(42))));
    }

    #[test]
    fn test_convert_negative_int() {
        let value = convert_from_string("-7", ValueType::Scalar(ScalarType::Int), &StandardConverter);
        assert_eq!(value, Ok(Value::Scalar(Scalar::Int(-7))));
    }

    #[test]
    fn test_convert_array_reports_offending_element() {
        let result = convert_from_string(
            "1, 2, x, 4",
            ValueType::Array(ScalarType::Int),
            &StandardConverter,
        );
        assert_eq!(result, Err("x".to_string()));
    }

    #[test]
    fn test_convert_array_of_strings() {
        let value = convert_from_string(
            "alpha, \"beta gamma\",delta",
            ValueType::STRING_ARRAY,
            &StandardConverter,
        )
        .unwrap();
        assert_eq!(
            value,
            Value::Array(vec![
                Scalar::String("alpha".to_string()),
                Scalar::String("beta gamma".to_string()),
                Scalar::String("delta".to_string()),
            ])
        );
    }

    #[test]
    fn test_convert_char_requires_single_character() {
        let target = ValueType::Scalar(ScalarType::Char);
        assert_eq!(
            convert_from_string("x", target, &StandardConverter),
            Ok(Value::Scalar(Scalar::Char('x')))
        );
        assert!(convert_from_string("xy", target, &StandardConverter).is_err());
    }

    #[test]
    fn test_round_trip_through_display() {
        for (text, target) in [
            ("12", ValueType::Scalar(ScalarType::Int)),
            ("2.5", ValueType::Scalar(ScalarType::Float)),
            ("true", ValueType::BOOL),
            ("a,\"b c\",d", ValueType::STRING_ARRAY),
            ("1,2,3", ValueType::Array(ScalarType::UInt)),
        ] {
            let value = convert_from_string(text, target, &StandardConverter).unwrap();
            assert_eq!(value.to_string(), text);
        }
    }
}
