//! Value validators bound to declared constraints.
//!
//! Validators run after a value converted successfully, always in the same
//! order: length, count, set, range, pattern.

use regex::Regex;

use crate::error::{Constraint, Error, Result};
use crate::value::{Scalar, Value};

/// Inclusive `min..=max` bound on a length or element count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IntRange {
    pub min: usize,
    pub max: usize,
}

impl IntRange {
    /// Returns `None` when `min > max`.
    pub fn new(min: usize, max: usize) -> Option<Self> {
        (min <= max).then_some(Self { min, max })
    }

    pub fn contains(&self, comparand: usize) -> bool {
        comparand >= self.min && comparand <= self.max
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LengthRule {
    pub range: IntRange,
    pub trim: bool,
}

impl LengthRule {
    fn accepts(&self, text: &str) -> bool {
        let measured = if self.trim { text.trim() } else { text };
        self.range.contains(measured.chars().count())
    }
}

/// Inclusive range of ordered scalars, both bounds of the declared kind.
#[derive(Debug, Clone, PartialEq)]
pub struct Range {
    min: Scalar,
    max: Scalar,
}

impl Range {
    /// Returns `None` unless the bounds are of the same kind and `min <= max`.
    pub fn new(min: Scalar, max: Scalar) -> Option<Self> {
        match min.partial_cmp(&max) {
            Some(std::cmp::Ordering::Greater) | None => None,
            Some(_) => Some(Self { min, max }),
        }
    }

    pub fn min(&self) -> &Scalar {
        &self.min
    }

    pub fn max(&self) -> &Scalar {
        &self.max
    }

    pub fn contains(&self, value: &Scalar) -> bool {
        value >= &self.min && value <= &self.max
    }
}

/// Discrete set of allowed values.
#[derive(Debug, Clone, PartialEq)]
pub struct ValueSet {
    pub values: Vec<Scalar>,
    pub case_insensitive: bool,
}

impl ValueSet {
    pub fn contains(&self, candidate: &Scalar) -> bool {
        self.values.iter().any(|allowed| match (candidate, allowed) {
            (Scalar::String(candidate), Scalar::String(allowed)) => {
                if self.case_insensitive {
                    candidate.to_lowercase() == allowed.to_lowercase()
                } else {
                    candidate == allowed
                }
            }
            _ => candidate.partial_cmp(allowed) == Some(std::cmp::Ordering::Equal),
        })
    }
}

#[derive(Debug, Clone)]
pub struct Pattern {
    source: String,
    regex: Regex,
}

impl Pattern {
    pub fn new(source: &str) -> std::result::Result<Self, regex::Error> {
        Ok(Self {
            source: source.to_string(),
            regex: Regex::new(source)?,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.source
    }

    pub fn is_match(&self, text: &str) -> bool {
        self.regex.is_match(text)
    }
}

/// The validators attached to one parameter.
#[derive(Debug, Clone, Default)]
pub struct Validators {
    pub length: Option<LengthRule>,
    pub count: Option<IntRange>,
    pub set: Option<ValueSet>,
    pub range: Option<Range>,
    pub pattern: Option<Pattern>,
}

impl Validators {
    /// Checks a converted `value` bound from `input` for `parameter`.
    pub fn check(&self, parameter: &str, input: &str, value: &Value) -> Result<()> {
        let elements = value.elements();

        if let Some(length) = &self.length {
            let texts = elements.iter().filter_map(Scalar::as_str);
            for text in texts {
                if !length.accepts(text) {
                    return Err(Error::validation(
                        parameter,
                        Constraint::Length {
                            min: length.range.min,
                            max: length.range.max,
                        },
                        input,
                    ));
                }
            }
        }

        if let (Some(count), Value::Array(items)) = (&self.count, value) {
            if !count.contains(items.len()) {
                return Err(Error::validation(
                    parameter,
                    Constraint::Count {
                        min: count.min,
                        max: count.max,
                    },
                    input,
                ));
            }
        }

        if let Some(set) = &self.set {
            if let Some(outsider) = elements.iter().find(|element| !set.contains(element)) {
                return Err(Error::validation(
                    parameter,
                    Constraint::Set,
                    &outsider.to_string(),
                ));
            }
        }

        if let Some(range) = &self.range {
            if elements.iter().any(|element| !range.contains(element)) {
                return Err(Error::validation(
                    parameter,
                    Constraint::Range {
                        min: range.min.to_string(),
                        max: range.max.to_string(),
                    },
                    input,
                ));
            }
        }

        if let Some(pattern) = &self.pattern {
            let texts = elements.iter().filter_map(Scalar::as_str);
            for text in texts {
                if !pattern.is_match(text) {
                    return Err(Error::validation(
                        parameter,
                        Constraint::Pattern(pattern.as_str().to_string()),
                        input,
                    ));
                }
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    fn text(value: &str) -> Value {
        Value::Scalar(Scalar::String(value.to_string()))
    }

    fn constraint_of(result: Result<()>) -> Constraint {
        match result {
            Err(Error::ValidationFailed { constraint, .. }) => constraint,
            other => panic!("expected validation failure, got {other:?}"),
        }
    }

    #[test]
    fn test_int_range_rejects_min_over_max() {
        assert!(IntRange::new(3, 2).is_none());
        assert!(IntRange::new(2, 2).is_some());
    }

    #[test]
    fn test_range_requires_same_kind_and_order() {
        assert!(Range::new(Scalar::Int(10), Scalar::Int(1)).is_none());
        assert!(Range::new(Scalar::Int(1), Scalar::UInt(10)).is_none());
        assert!(Range::new(Scalar::Int(1), Scalar::Int(10)).is_some());
    }

    #[test]
    fn test_range_validation_is_inclusive() {
        let validators = Validators {
            range: Range::new(Scalar::Int(1), Scalar::Int(10)),
            ..Default::default()
        };
        let ten = Value::Scalar(Scalar::Int(10));
        let eleven = Value::Scalar(Scalar::Int(11));
        assert!(validators.check("Count", "10", &ten).is_ok());
        let error = validators.check("Count", "11", &eleven).unwrap_err();
        assert_eq!(error.kind(), ErrorKind::ValidationFailed);
    }

    #[test]
    fn test_length_trims_before_measuring() {
        let validators = Validators {
            length: Some(LengthRule {
                range: IntRange::new(1, 3).unwrap(),
                trim: true,
            }),
            ..Default::default()
        };
        assert!(validators.check("Name", "  ab  ", &text("  ab  ")).is_ok());
        assert!(validators.check("Name", "   ", &text("   ")).is_err());
    }

    #[test]
    fn test_count_applies_to_arrays() {
        let validators = Validators {
            count: IntRange::new(1, 2),
            ..Default::default()
        };
        let three = Value::Array(vec![Scalar::Int(1), Scalar::Int(2), Scalar::Int(3)]);
        assert_eq!(
            constraint_of(validators.check("Ids", "1,2,3", &three)),
            Constraint::Count { min: 1, max: 2 }
        );
    }

    #[test]
    fn test_set_honors_case_insensitivity() {
        let mut validators = Validators {
            set: Some(ValueSet {
                values: vec![Scalar::String("Debug".to_string())],
                case_insensitive: false,
            }),
            ..Default::default()
        };
        assert!(validators.check("Mode", "debug", &text("debug")).is_err());
        if let Some(set) = validators.set.as_mut() {
            set.case_insensitive = true;
        }
        assert!(validators.check("Mode", "debug", &text("debug")).is_ok());
    }

    #[test]
    fn test_set_failure_names_offending_element() {
        let validators = Validators {
            set: Some(ValueSet {
                values: vec![Scalar::Int(1), Scalar::Int(2)],
                case_insensitive: false,
            }),
            ..Default::default()
        };
        let value = Value::Array(vec![Scalar::Int(1), Scalar::Int(5)]);
        match validators.check("Levels", "1,5", &value) {
            Err(Error::ValidationFailed { input, constraint, .. }) => {
                assert_eq!(input, "5");
                assert_eq!(constraint, Constraint::Set);
            }
            other => panic!("expected set failure, got {other:?}"),
        }
    }

    #[test]
    fn test_pattern_checks_each_element() {
        let validators = Validators {
            pattern: Pattern::new("^[a-z]+$").ok(),
            ..Default::default()
        };
        let good = Value::Array(vec![
            Scalar::String("abc".to_string()),
            Scalar::String("def".to_string()),
        ]);
        let bad = Value::Array(vec![
            Scalar::String("abc".to_string()),
            Scalar::String("D3F".to_string()),
        ]);
        assert!(validators.check("Words", "abc,def", &good).is_ok());
        assert_eq!(
            constraint_of(validators.check("Words", "abc,D3F", &bad)),
            Constraint::Pattern("^[a-z]+$".to_string())
        );
    }

    #[test]
    fn test_order_reports_length_before_pattern() {
        let validators = Validators {
            length: Some(LengthRule {
                range: IntRange::new(1, 2).unwrap(),
                trim: false,
            }),
            pattern: Pattern::new("^[0-9]+$").ok(),
            ..Default::default()
        };
        assert_eq!(
            constraint_of(validators.check("Code", "abcd", &text("abcd"))),
            Constraint::Length { min: 1, max: 2 }
        );
    }
}
