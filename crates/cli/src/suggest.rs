//! "Did you mean" hints for mistyped parameter names.

use fuzzy_matcher::skim::SkimMatcherV2;
use fuzzy_matcher::FuzzyMatcher;
use itertools::Itertools;

use parmsets_core::{Error, Parameters};

const MAX_SUGGESTIONS: usize = 3;

/// Declared names that fuzzily match `input`, best match first.
pub fn suggest_names(input: &str, parameters: &Parameters) -> Vec<String> {
    let matcher = SkimMatcherV2::default().ignore_case();

    parameters
        .parameters()
        .iter()
        .filter_map(|parameter| {
            matcher
                .fuzzy_match(parameter.name(), input)
                .map(|score| (score, parameter.name()))
        })
        .sorted_by(|(left, _), (right, _)| right.cmp(left))
        .take(MAX_SUGGESTIONS)
        .map(|(_, name)| name.to_string())
        .collect()
}

/// A hint line for name errors, if there is anything useful to say.
pub fn did_you_mean(error: &Error, parameters: &Parameters) -> Option<String> {
    let names = match error {
        Error::UnknownParameter(input) => suggest_names(input, parameters),
        Error::AmbiguousParameter { candidates, .. } => candidates.clone(),
        _ => return None,
    };

    if names.is_empty() {
        return None;
    }
    Some(format!(
        "Did you mean: {}?",
        names.iter().map(|name| format!("-{name}")).join(", ")
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use parmsets_core::value::ValueType;
    use parmsets_core::ParameterDefinition;

    fn parameters() -> Parameters {
        Parameters::new([
            ParameterDefinition::new("Target", ValueType::STRING),
            ParameterDefinition::new("Type", ValueType::STRING),
            ParameterDefinition::switch("Force"),
        ])
        .unwrap()
    }

    #[test]
    fn test_suggest_names_for_typo() {
        let suggestions = suggest_names("trgt", &parameters());
        assert_eq!(suggestions, vec!["Target"]);
    }

    #[test]
    fn test_did_you_mean_lists_ambiguous_candidates() {
        let parameters = parameters();
        let error = parameters.canonical_name("t").unwrap_err();
        assert_eq!(
            did_you_mean(&error, &parameters),
            Some("Did you mean: -Target, -Type?".to_string())
        );
    }

    #[test]
    fn test_did_you_mean_ignores_other_errors() {
        let error = Error::MissingMandatory(vec!["Target".to_string()]);
        assert_eq!(did_you_mean(&error, &parameters()), None);
        let error = Error::UnknownParameter("zzz".to_string());
        assert_eq!(did_you_mean(&error, &parameters()), None);
    }
}
