//! Splits raw argument tokens into named and positional buckets.

use indexmap::IndexMap;
use log::{debug, trace};

use crate::convert::normalize_bool;
use crate::error::{Error, Result};
use crate::parameter::Parameter;

const ESCAPE: char = '\\';

/// Which help form was asked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HelpRequest {
    /// `-?`
    Usage,
    /// `-??`
    Detailed,
    /// `-help`
    Help,
}

impl HelpRequest {
    pub fn is_detailed(&self) -> bool {
        !matches!(self, HelpRequest::Usage)
    }
}

/// Named values keyed by canonical name, and positional tokens in order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TokenBag {
    pub named: IndexMap<String, String>,
    pub positional: Vec<String>,
}

impl TokenBag {
    pub fn is_empty(&self) -> bool {
        self.named.is_empty() && self.positional.is_empty()
    }

    pub fn named_names(&self) -> impl Iterator<Item = &str> + Clone {
        self.named.keys().map(String::as_str)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Scan {
    Tokens(TokenBag),
    Help(HelpRequest),
    Version,
}

fn reserved_token(token: &str) -> Option<Scan> {
    match token.to_ascii_lowercase().as_str() {
        "-?" => Some(Scan::Help(HelpRequest::Usage)),
        "-??" => Some(Scan::Help(HelpRequest::Detailed)),
        "-help" => Some(Scan::Help(HelpRequest::Help)),
        "-version" => Some(Scan::Version),
        _ => None,
    }
}

/// Resolves `input` to a declared parameter: exact match first, then a
/// unique prefix, both ignoring ASCII case.
pub fn canonical_name<'p>(parameters: &'p [Parameter], input: &str) -> Result<&'p Parameter> {
    let wanted = input.to_ascii_lowercase();

    if let Some(exact) = parameters
        .iter()
        .find(|parameter| parameter.name().to_ascii_lowercase() == wanted)
    {
        return Ok(exact);
    }

    let candidates: Vec<&Parameter> = parameters
        .iter()
        .filter(|parameter| parameter.name().to_ascii_lowercase().starts_with(&wanted))
        .collect();

    match candidates.as_slice() {
        [] => Err(Error::UnknownParameter(input.to_string())),
        [only] => {
            trace!("Resolved `{input}` to `{}` by prefix", only.name());
            Ok(*only)
        }
        _ => Err(Error::AmbiguousParameter {
            input: input.to_string(),
            candidates: candidates
                .iter()
                .map(|parameter| parameter.name().to_string())
                .collect(),
        }),
    }
}

fn insert_named(bag: &mut TokenBag, name: &str, value: String) -> Result<()> {
    if bag.named.contains_key(name) {
        return Err(Error::DuplicateParameter(name.to_string()));
    }
    trace!("Named token `{name}` = `{value}`");
    bag.named.insert(name.to_string(), value);
    Ok(())
}

/// Value token following a `-name` token.
fn named_value(name: &str, token: Option<&String>) -> Result<String> {
    let Some(token) = token else {
        return Err(Error::malformed(name, "No value"));
    };

    if let Some(rest) = token.strip_prefix('-') {
        return match rest.chars().next() {
            None => Err(Error::malformed(name, "Expected a value, not a '-'.")),
            Some(next) if next.is_ascii_digit() => Ok(token.clone()),
            Some(_) => Err(Error::malformed(
                name,
                &format!("'{token}' invalid.  Expected a value, not a named parameter."),
            )),
        };
    }

    if let Some(rest) = token.strip_prefix(ESCAPE) {
        if rest.is_empty() {
            return Err(Error::malformed(
                name,
                "No value after escape character '\\'.",
            ));
        }
        return Ok(rest.to_string());
    }

    Ok(token.clone())
}

/// Walks `tokens` left to right, resolving names against `parameters`.
///
/// Stops at the first help or version token, or at a token starting with `--`.
pub fn tokenize<S: AsRef<str>>(tokens: &[S], parameters: &[Parameter]) -> Result<Scan> {
    let tokens: Vec<String> = tokens.iter().map(|token| token.as_ref().to_string()).collect();
    let mut bag = TokenBag::default();
    let mut index = 0;

    while index < tokens.len() {
        let token = &tokens[index];
        index += 1;

        if let Some(reserved) = reserved_token(token) {
            debug!("Stopped at reserved token `{token}`");
            return Ok(reserved);
        }

        if token.starts_with("--") {
            trace!("End of recognized tokens at `{token}`");
            break;
        }

        if let Some(body) = token.strip_prefix('-') {
            if body.is_empty() {
                return Err(Error::malformed(token, "No name"));
            }

            if let Some((name, value)) = body.split_once(':') {
                if name.is_empty() {
                    return Err(Error::malformed(token, "No name"));
                }
                if value.is_empty() {
                    return Err(Error::malformed(name, "No value"));
                }
                let parameter = canonical_name(parameters, name)?;
                let value = if parameter.is_switch() {
                    match normalize_bool(value) {
                        Some(flag) => flag.to_string(),
                        None => {
                            return Err(Error::ConversionFailed {
                                parameter: parameter.name().to_string(),
                                type_name: parameter.value_type().to_string(),
                                input: value.to_string(),
                            })
                        }
                    }
                } else {
                    value.to_string()
                };
                insert_named(&mut bag, parameter.name(), value)?;
                continue;
            }

            let parameter = canonical_name(parameters, body)?;
            if parameter.is_switch() {
                insert_named(&mut bag, parameter.name(), true.to_string())?;
                continue;
            }

            let value = named_value(parameter.name(), tokens.get(index))?;
            index += 1;
            insert_named(&mut bag, parameter.name(), value)?;
            continue;
        }

        if let Some(rest) = token.strip_prefix(ESCAPE) {
            if rest.is_empty() {
                return Err(Error::malformed(token, "No value after escape character '\\'."));
            }
            bag.positional.push(rest.to_string());
        } else {
            bag.positional.push(token.clone());
        }
    }

    debug!(
        "Tokenized {} named and {} positional token(s)",
        bag.named.len(),
        bag.positional.len()
    );
    Ok(Scan::Tokens(bag))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::convert::StandardConverter;
    use crate::error::ErrorKind;
    use crate::parameter::ParameterDefinition;
    use crate::value::{ScalarType, ValueType};

    fn declared() -> Vec<Parameter> {
        [
            ParameterDefinition::new("Target", ValueType::STRING),
            ParameterDefinition::new("Type", ValueType::STRING),
            ParameterDefinition::new("Count", ValueType::Scalar(ScalarType::Int)),
            ParameterDefinition::switch("Recurse"),
        ]
        .iter()
        .map(|definition| Parameter::from_definition(definition, &StandardConverter).unwrap())
        .collect()
    }

    fn bag(tokens: &[&str]) -> Result<TokenBag> {
        match tokenize(tokens, &declared())? {
            Scan::Tokens(bag) => Ok(bag),
            other => panic!("expected tokens, got {other:?}"),
        }
    }

    #[test]
    fn test_prefix_resolution() {
        let parameters = declared();
        assert_eq!(canonical_name(&parameters, "targ").unwrap().name(), "Target");
        assert_eq!(canonical_name(&parameters, "TYPE").unwrap().name(), "Type");
        let error = canonical_name(&parameters, "t").unwrap_err();
        assert_eq!(error.kind(), ErrorKind::AmbiguousParameter);
        assert_eq!(
            canonical_name(&parameters, "zzz").unwrap_err().kind(),
            ErrorKind::UnknownParameter
        );
    }

    #[test]
    fn test_prefix_resolution_folds_ascii_case_only() {
        let parameters: Vec<Parameter> = [ParameterDefinition::new("Kind", ValueType::STRING)]
            .iter()
            .map(|definition| Parameter::from_definition(definition, &StandardConverter).unwrap())
            .collect();
        assert_eq!(canonical_name(&parameters, "KI").unwrap().name(), "Kind");
        // Kelvin sign, which full Unicode lowercasing folds to `k`
        assert_eq!(
            canonical_name(&parameters, "\u{212A}ind").unwrap_err().kind(),
            ErrorKind::UnknownParameter
        );
    }

    #[test]
    fn test_help_and_version_stop_parsing() {
        let parameters = declared();
        assert_eq!(
            tokenize(&["-Target", "x", "-?", "-bogus"], &parameters).unwrap(),
            Scan::Help(HelpRequest::Usage)
        );
        assert_eq!(
            tokenize(&["-??"], &parameters).unwrap(),
            Scan::Help(HelpRequest::Detailed)
        );
        assert_eq!(
            tokenize(&["-HELP"], &parameters).unwrap(),
            Scan::Help(HelpRequest::Help)
        );
        assert_eq!(tokenize(&["-Version"], &parameters).unwrap(), Scan::Version);
    }

    #[test]
    fn test_double_dash_ends_recognized_tokens() {
        let bag = bag(&["one", "--", "-bogus", "two"]).unwrap();
        assert_eq!(bag.positional, vec!["one"]);
        assert!(bag.named.is_empty());
    }

    #[test]
    fn test_switch_forms() {
        let bag = bag(&["-r", "positional"]).unwrap();
        assert_eq!(bag.named.get("Recurse").map(String::as_str), Some("true"));
        assert_eq!(bag.positional, vec!["positional"]);

        let bag = self::bag(&["-rec:F"]).unwrap();
        assert_eq!(bag.named.get("Recurse").map(String::as_str), Some("false"));

        let error = self::bag(&["-r:maybe"]).unwrap_err();
        assert_eq!(error.kind(), ErrorKind::ConversionFailed);
    }

    #[test]
    fn test_colon_form() {
        let bag = bag(&["-Target:C:\\dir"]).unwrap();
        assert_eq!(bag.named.get("Target").map(String::as_str), Some("C:\\dir"));
        assert_eq!(
            self::bag(&["-:x"]).unwrap_err().kind(),
            ErrorKind::MalformedToken
        );
        assert_eq!(
            self::bag(&["-Target:"]).unwrap_err().kind(),
            ErrorKind::MalformedToken
        );
    }

    #[test]
    fn test_value_token_rules() {
        let bag = bag(&["-Count", "-5"]).unwrap();
        assert_eq!(bag.named.get("Count").map(String::as_str), Some("-5"));

        let bag = self::bag(&["-Target", "\\-literal"]).unwrap();
        assert_eq!(bag.named.get("Target").map(String::as_str), Some("-literal"));

        for tokens in [&["-Target", "-Type"][..], &["-Target", "-"], &["-Target"]] {
            assert_eq!(
                self::bag(tokens).unwrap_err().kind(),
                ErrorKind::MalformedToken
            );
        }
    }

    #[test]
    fn test_duplicate_named_rejected() {
        let error = bag(&["-Target", "a", "-targ", "b"]).unwrap_err();
        assert_eq!(error.kind(), ErrorKind::DuplicateParameter);
    }

    #[test]
    fn test_escaped_positional_is_stripped() {
        let bag = bag(&["\\-notaname", "plain"]).unwrap();
        assert_eq!(bag.positional, vec!["-notaname", "plain"]);
    }
}
