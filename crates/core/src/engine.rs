//! The resolution engine: declared sets plus the entry point that turns raw
//! tokens into a bound set.

use std::fmt::{Debug, Formatter};

use log::debug;

use crate::binding::BoundSet;
use crate::convert::{Converter, StandardConverter};
use crate::error::{DeclarationError, Result};
use crate::parameter::{Parameter, ParameterDefinition};
use crate::parameter_set::ParameterSet;
use crate::prompt::{Prompter, StdinPrompter};
use crate::selection::select_set;
use crate::tokenize::{canonical_name, tokenize, HelpRequest, Scan};

/// Outcome of a successful resolution call.
#[derive(Debug, Clone)]
pub enum Resolution<'a> {
    Help(HelpRequest),
    Version,
    Bound(BoundSet<'a>),
}

impl<'a> Resolution<'a> {
    pub fn bound(self) -> Option<BoundSet<'a>> {
        match self {
            Resolution::Bound(bound) => Some(bound),
            _ => None,
        }
    }
}

/// Collects declarations and builds a [`Parameters`] engine.
#[derive(Default)]
pub struct ParametersBuilder {
    definitions: Vec<ParameterDefinition>,
    default_set: Option<String>,
    converter: Option<Box<dyn Converter>>,
}

impl ParametersBuilder {
    pub fn declare(mut self, definition: ParameterDefinition) -> Self {
        self.definitions.push(definition);
        self
    }

    pub fn declare_all(mut self, definitions: impl IntoIterator<Item = ParameterDefinition>) -> Self {
        self.definitions.extend(definitions);
        self
    }

    /// Names the set used to break ties. Must match a declared set.
    pub fn default_set(mut self, name: &str) -> Self {
        self.default_set = Some(name.to_string());
        self
    }

    pub fn converter(mut self, converter: impl Converter + 'static) -> Self {
        self.converter = Some(Box::new(converter));
        self
    }

    /// Checks every declaration and groups them into sets.
    pub fn build(self) -> Result<Parameters> {
        if self.definitions.is_empty() {
            return Err(DeclarationError::NoParameters.into());
        }
        let converter: Box<dyn Converter> = match self.converter {
            Some(converter) => converter,
            None => Box::new(StandardConverter),
        };

        let mut parameters: Vec<Parameter> = Vec::new();
        let mut sets: Vec<ParameterSet> = Vec::new();

        for definition in &self.definitions {
            let parameter = Parameter::from_definition(definition, &*converter)?;

            match parameters
                .iter()
                .find(|known| known.name().eq_ignore_ascii_case(parameter.name()))
            {
                Some(known) => {
                    if known.value_type() != parameter.value_type()
                        || known.is_switch() != parameter.is_switch()
                    {
                        return Err(
                            DeclarationError::ConflictingDefinition(parameter.name().to_string())
                                .into(),
                        );
                    }
                }
                None => parameters.push(parameter.clone()),
            }

            let index = match sets
                .iter()
                .position(|set| set.is_named(parameter.set_name()))
            {
                Some(index) => index,
                None => {
                    sets.push(ParameterSet::new(parameter.set_name()));
                    sets.len() - 1
                }
            };
            sets[index].add(parameter)?;
        }

        parameters.sort_by_key(|parameter| parameter.name().to_ascii_lowercase());

        let default_set = match &self.default_set {
            Some(wanted) => sets
                .iter()
                .find(|set| set.is_named(wanted))
                .map(|set| set.name().to_string())
                .ok_or_else(|| DeclarationError::UnknownDefaultSet(wanted.clone()))?,
            None => sets
                .iter()
                .find(|set| set.name().is_empty())
                .or_else(|| sets.first())
                .map(|set| set.name().to_string())
                .unwrap_or_default(),
        };

        debug!(
            "Declared {} parameter(s) in {} set(s), default set `{}`",
            parameters.len(),
            sets.len(),
            default_set
        );

        Ok(Parameters {
            parameters,
            sets,
            default_set,
            converter,
        })
    }
}

/// Every declared parameter set, ready to resolve argument lists.
///
/// The engine is immutable once built; each resolution returns its own
/// binding state, so one engine can resolve any number of argument lists.
pub struct Parameters {
    parameters: Vec<Parameter>,
    sets: Vec<ParameterSet>,
    default_set: String,
    converter: Box<dyn Converter>,
}

impl Debug for Parameters {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        formatter
            .debug_struct("Parameters")
            .field("parameters", &self.parameters)
            .field("sets", &self.sets)
            .field("default_set", &self.default_set)
            .finish_non_exhaustive()
    }
}

impl Parameters {
    pub fn builder() -> ParametersBuilder {
        ParametersBuilder::default()
    }

    /// Builds an engine from `definitions` with the standard converter.
    pub fn new(definitions: impl IntoIterator<Item = ParameterDefinition>) -> Result<Self> {
        Self::builder().declare_all(definitions).build()
    }

    /// One entry per declared name, sorted by name.
    pub fn parameters(&self) -> &[Parameter] {
        &self.parameters
    }

    /// Sets in the order their first parameter was declared.
    pub fn sets(&self) -> &[ParameterSet] {
        &self.sets
    }

    pub fn default_set_name(&self) -> &str {
        &self.default_set
    }

    /// Resolves a possibly abbreviated name to its declared parameter.
    pub fn canonical_name(&self, input: &str) -> Result<&Parameter> {
        canonical_name(&self.parameters, input)
    }

    /// Resolves `args`, prompting on stdin for unmet mandatory parameters.
    pub fn resolve<S: AsRef<str>>(&self, args: &[S]) -> Result<Resolution<'_>> {
        self.resolve_with(args, &mut StdinPrompter)
    }

    /// Resolves `args`, asking `prompter` for unmet mandatory parameters.
    pub fn resolve_with<S: AsRef<str>>(
        &self,
        args: &[S],
        prompter: &mut dyn Prompter,
    ) -> Result<Resolution<'_>> {
        let bag = match tokenize(args, &self.parameters)? {
            Scan::Help(request) => return Ok(Resolution::Help(request)),
            Scan::Version => return Ok(Resolution::Version),
            Scan::Tokens(bag) => bag,
        };

        let set = select_set(&self.sets, &self.default_set, &bag)?;
        let converter = &*self.converter;

        let mut bound = BoundSet::new(set);
        bound.bind_named(&bag, converter)?;
        bound.bind_positional(&bag.positional, converter)?;
        bound.fill_mandatory(prompter, converter)?;

        debug!(
            "Resolved set `{}` with {} supplied value(s)",
            set.display_name(),
            bound.supplied().count()
        );
        Ok(Resolution::Bound(bound))
    }
}
