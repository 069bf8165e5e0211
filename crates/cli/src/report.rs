//! Plain-text report of a resolved parameter set.

use itertools::Itertools;

use parmsets_core::{Binding, BoundSet};

/// Set name, then one line per parameter: its value and where it came from.
pub fn report(bound: &BoundSet) -> String {
    let width = bound
        .iter()
        .map(|(parameter, _)| parameter.name().len())
        .max()
        .unwrap_or(0);

    let lines = bound.iter().map(|(parameter, binding)| {
        let described = match binding {
            Binding {
                value: Some(value),
                been_set: true,
            } => format!("{value} (supplied)"),
            Binding {
                value: Some(value),
                been_set: false,
            } => format!("{value} (default)"),
            Binding { value: None, .. } => "<unset>".to_string(),
        };
        format!("  {:<width$} = {described}", parameter.name())
    });

    format!(
        "Parameter set: {}\n{}\n",
        bound.set().display_name(),
        lines.format("\n")
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use parmsets_core::value::{ScalarType, ValueType};
    use parmsets_core::{ParameterDefinition, Parameters, ScriptedPrompter};

    #[test]
    fn test_report_tags_each_value() {
        let parameters = Parameters::new([
            ParameterDefinition::new("Target", ValueType::STRING).at_position(0),
            ParameterDefinition::new("Count", ValueType::Scalar(ScalarType::Int)).initial("1"),
            ParameterDefinition::switch("Force"),
        ])
        .unwrap();
        let bound = parameters
            .resolve_with(&["web01"], &mut ScriptedPrompter::default())
            .unwrap()
            .bound()
            .unwrap();

        assert_eq!(
            report(&bound),
            "Parameter set: Default\n\
             \x20 Target = web01 (supplied)\n\
             \x20 Count  = 1 (default)\n\
             \x20 Force  = <unset>\n"
        );
    }
}
