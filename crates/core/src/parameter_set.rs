//! One coherent invocation form: an ordered group of parameters.

use itertools::Itertools;

use crate::error::DeclarationError;
use crate::parameter::Parameter;

/// Display name of the set declared with an empty name.
pub const DEFAULT_SET_LABEL: &str = "Default";

#[derive(Debug, Clone)]
pub struct ParameterSet {
    name: String,
    parameters: Vec<Parameter>,
}

impl ParameterSet {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.trim().to_string(),
            parameters: Vec::new(),
        }
    }

    /// Adds `parameter`, keeping names, positions and the variadic slot unique.
    pub fn add(&mut self, parameter: Parameter) -> Result<(), DeclarationError> {
        if self.contains(parameter.name()) {
            return Err(DeclarationError::DuplicateName {
                set: self.display_name().to_string(),
                name: parameter.name().to_string(),
            });
        }
        if let Some(position) = parameter.position() {
            if self.find_by_position(position).is_some() {
                return Err(DeclarationError::DuplicatePosition {
                    set: self.display_name().to_string(),
                    position,
                });
            }
        }
        if parameter.is_variadic() && self.variadic_parameter().is_some() {
            return Err(DeclarationError::MultipleVariadic(
                self.display_name().to_string(),
            ));
        }
        self.parameters.push(parameter);
        Ok(())
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The set name, or `Default` for the unnamed set.
    pub fn display_name(&self) -> &str {
        if self.name.is_empty() {
            DEFAULT_SET_LABEL
        } else {
            &self.name
        }
    }

    pub fn is_named(&self, name: &str) -> bool {
        self.name.eq_ignore_ascii_case(name.trim())
    }

    /// Parameters in declaration order.
    pub fn parameters(&self) -> &[Parameter] {
        &self.parameters
    }

    pub fn find_by_name(&self, name: &str) -> Option<&Parameter> {
        self.parameters
            .iter()
            .find(|parameter| parameter.name().eq_ignore_ascii_case(name))
    }

    pub fn find_by_position(&self, position: usize) -> Option<&Parameter> {
        self.parameters
            .iter()
            .find(|parameter| parameter.position() == Some(position))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.find_by_name(name).is_some()
    }

    pub fn contains_all<'n>(&self, names: impl IntoIterator<Item = &'n str>) -> bool {
        names.into_iter().all(|name| self.contains(name))
    }

    /// Positional parameters ordered by position.
    pub fn positional_parameters(&self) -> Vec<&Parameter> {
        self.parameters
            .iter()
            .filter(|parameter| parameter.is_positional())
            .sorted_by_key(|parameter| parameter.position())
            .collect()
    }

    pub fn positional_count(&self) -> usize {
        self.parameters
            .iter()
            .filter(|parameter| parameter.is_positional())
            .count()
    }

    /// Positional slots left once the `named` parameters have taken theirs.
    pub fn positional_remaining<'n>(&self, named: impl IntoIterator<Item = &'n str>) -> usize {
        let taken = named
            .into_iter()
            .filter_map(|name| self.find_by_name(name))
            .filter(|parameter| parameter.is_positional())
            .count();
        self.positional_count().saturating_sub(taken)
    }

    pub fn variadic_parameter(&self) -> Option<&Parameter> {
        self.parameters.iter().find(|parameter| parameter.is_variadic())
    }

    pub fn has_variadic(&self) -> bool {
        self.variadic_parameter().is_some()
    }

    /// One-line summary in declaration order, e.g. `-Target <string> [-Count <int>] [-Force]`.
    pub fn usage_summary(&self) -> String {
        self.parameters
            .iter()
            .map(|parameter| {
                let rendered = if parameter.is_switch() {
                    format!("-{}", parameter.name())
                } else {
                    format!("-{} <{}>", parameter.name(), parameter.value_type())
                };
                if parameter.is_mandatory() {
                    rendered
                } else {
                    format!("[{rendered}]")
                }
            })
            .join(" ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::convert::StandardConverter;
    use crate::parameter::ParameterDefinition;
    use crate::value::{ScalarType, ValueType};

    fn parameter(definition: ParameterDefinition) -> Parameter {
        Parameter::from_definition(&definition, &StandardConverter).unwrap()
    }

    fn deploy_set() -> ParameterSet {
        let mut set = ParameterSet::new(" Deploy ");
        set.add(parameter(
            ParameterDefinition::new("Target", ValueType::STRING)
                .at_position(0)
                .mandatory(),
        ))
        .unwrap();
        set.add(parameter(
            ParameterDefinition::new("Count", ValueType::Scalar(ScalarType::Int)).at_position(1),
        ))
        .unwrap();
        set.add(parameter(ParameterDefinition::switch("Force")))
            .unwrap();
        set
    }

    #[test]
    fn test_name_is_trimmed_and_matched_case_insensitively() {
        let set = deploy_set();
        assert_eq!(set.name(), "Deploy");
        assert!(set.is_named("deploy"));
        assert_eq!(ParameterSet::new("").display_name(), "Default");
    }

    #[test]
    fn test_add_rejects_duplicates() {
        let mut set = deploy_set();
        assert!(matches!(
            set.add(parameter(ParameterDefinition::new("target", ValueType::STRING))),
            Err(DeclarationError::DuplicateName { .. })
        ));
        assert!(matches!(
            set.add(parameter(
                ParameterDefinition::new("Other", ValueType::STRING).at_position(1)
            )),
            Err(DeclarationError::DuplicatePosition { position: 1, .. })
        ));
        set.add(parameter(ParameterDefinition::variadic("Rest")))
            .unwrap();
        assert!(matches!(
            set.add(parameter(ParameterDefinition::variadic("More"))),
            Err(DeclarationError::MultipleVariadic(_))
        ));
    }

    #[test]
    fn test_lookups() {
        let set = deploy_set();
        assert_eq!(set.find_by_name("COUNT").map(Parameter::name), Some("Count"));
        assert_eq!(set.find_by_position(0).map(Parameter::name), Some("Target"));
        assert!(set.find_by_position(2).is_none());
        assert!(set.contains_all(["target", "force"]));
        assert!(!set.contains_all(["target", "missing"]));
    }

    #[test]
    fn test_positional_remaining_subtracts_named_positionals() {
        let set = deploy_set();
        assert_eq!(set.positional_count(), 2);
        assert_eq!(set.positional_remaining(["Target"]), 1);
        assert_eq!(set.positional_remaining(["Force"]), 2);
    }

    #[test]
    fn test_usage_summary() {
        assert_eq!(
            deploy_set().usage_summary(),
            "-Target <string> [-Count <int>] [-Force]"
        );
    }
}
