//! Binding state of one resolution: the chosen set and a value per parameter.

use indexmap::IndexMap;
use log::debug;

use crate::convert::Converter;
use crate::error::{Error, Result};
use crate::parameter::Parameter;
use crate::parameter_set::ParameterSet;
use crate::prompt::{ask, Prompter};
use crate::tokenize::TokenBag;
use crate::value::{quote_element, FromValue, Value};

/// Delimiter joining leftover positional tokens into the variadic parameter.
pub const CAPTURE_DELIMITER: &str = ",";

/// Current value of one parameter and whether a token or prompt supplied it.
#[derive(Debug, Clone, PartialEq)]
pub struct Binding {
    pub value: Option<Value>,
    pub been_set: bool,
}

/// A chosen parameter set with its bound values.
#[derive(Debug, Clone)]
pub struct BoundSet<'a> {
    set: &'a ParameterSet,
    bindings: IndexMap<String, Binding>,
}

/// Joins captured tokens so that splitting the result gives them back unchanged.
pub(crate) fn join_capture(tokens: &[String]) -> String {
    tokens
        .iter()
        .map(|token| quote_element(token))
        .collect::<Vec<_>>()
        .join(CAPTURE_DELIMITER)
}

impl<'a> BoundSet<'a> {
    pub(crate) fn new(set: &'a ParameterSet) -> Self {
        let bindings = set
            .parameters()
            .iter()
            .map(|parameter| {
                (
                    parameter.name().to_string(),
                    Binding {
                        value: parameter.initial().cloned(),
                        been_set: false,
                    },
                )
            })
            .collect();
        Self { set, bindings }
    }

    pub fn set(&self) -> &'a ParameterSet {
        self.set
    }

    /// Name of the chosen set; empty for the default set.
    pub fn name(&self) -> &str {
        self.set.name()
    }

    pub fn binding(&self, name: &str) -> Option<&Binding> {
        let parameter = self.set.find_by_name(name)?;
        self.bindings.get(parameter.name())
    }

    pub fn value(&self, name: &str) -> Option<&Value> {
        self.binding(name)?.value.as_ref()
    }

    /// Typed value of `name`, if bound and of the requested Rust type.
    ///
    /// ```
    /// use parmsets_core::{Parameters, ParameterDefinition, Resolution};
    /// use parmsets_core::value::{ScalarType, ValueType};
    ///
    /// let parameters = Parameters::builder()
    ///     .declare(ParameterDefinition::new("Count", ValueType::Scalar(ScalarType::Int)))
    ///     .build()?;
    /// if let Resolution::Bound(bound) = parameters.resolve(&["-Count", "3"])? {
    ///     assert_eq!(bound.get::<i64>("count"), Some(3));
    /// }
    /// # Ok::<(), parmsets_core::error::Error>(())
    /// ```
    pub fn get<T: FromValue>(&self, name: &str) -> Option<T> {
        T::from_value(self.value(name)?)
    }

    pub fn is_set(&self, name: &str) -> bool {
        self.binding(name).is_some_and(|binding| binding.been_set)
    }

    /// Parameters of the set with their bindings, in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&'a Parameter, &Binding)> + '_ {
        self.set.parameters().iter().filter_map(move |parameter| {
            self.bindings
                .get(parameter.name())
                .map(|binding| (parameter, binding))
        })
    }

    /// Values that came from tokens or prompts.
    pub fn supplied(&self) -> impl Iterator<Item = (&'a Parameter, &Value)> + '_ {
        self.iter().filter_map(|(parameter, binding)| match binding {
            Binding {
                value: Some(value),
                been_set: true,
            } => Some((parameter, value)),
            _ => None,
        })
    }

    /// Initial values of parameters nothing supplied.
    pub fn defaulted(&self) -> impl Iterator<Item = (&'a Parameter, &Value)> + '_ {
        self.iter().filter_map(|(parameter, binding)| match binding {
            Binding {
                value: Some(value),
                been_set: false,
            } => Some((parameter, value)),
            _ => None,
        })
    }

    /// Unbound positional parameters, ordered by position.
    pub fn unfilled_positional_parameters(&self) -> Vec<&'a Parameter> {
        self.set
            .positional_parameters()
            .into_iter()
            .filter(|parameter| !self.is_set(parameter.name()))
            .collect()
    }

    /// Mandatory parameters not yet bound, in declaration order.
    pub fn unmet_mandatory(&self) -> Vec<&'a Parameter> {
        self.set
            .parameters()
            .iter()
            .filter(|parameter| parameter.is_mandatory() && !self.is_set(parameter.name()))
            .collect()
    }

    fn bind(&mut self, parameter: &Parameter, text: &str, converter: &dyn Converter) -> Result<()> {
        let value = parameter.bind(text, converter)?;
        self.bindings.insert(
            parameter.name().to_string(),
            Binding {
                value: Some(value),
                been_set: true,
            },
        );
        Ok(())
    }

    pub(crate) fn bind_named(&mut self, bag: &TokenBag, converter: &dyn Converter) -> Result<()> {
        for (name, text) in &bag.named {
            let set = self.set;
            let parameter = set
                .find_by_name(name)
                .ok_or_else(|| Error::UnknownParameter(name.clone()))?;
            self.bind(parameter, text, converter)?;
        }
        Ok(())
    }

    /// Fills unbound positional slots in order, then hands leftovers to the
    /// variadic parameter.
    pub(crate) fn bind_positional(
        &mut self,
        tokens: &[String],
        converter: &dyn Converter,
    ) -> Result<()> {
        let mut remaining = tokens.iter();
        let mut captured = Vec::new();

        for parameter in self.unfilled_positional_parameters() {
            let Some(token) = remaining.next() else {
                break;
            };
            if parameter.is_variadic() {
                captured.push(token.clone());
            } else {
                self.bind(parameter, token, converter)?;
            }
        }

        let leftover: Vec<String> = remaining.cloned().collect();
        if !leftover.is_empty() {
            let set = self.set;
            let capturing = set
                .variadic_parameter()
                .filter(|variadic| !self.is_set(variadic.name()));
            if capturing.is_none() {
                return Err(Error::TooManyPositional {
                    set: set.display_name().to_string(),
                    extra: leftover.len(),
                });
            }
            captured.extend(leftover);
        }

        if captured.is_empty() {
            return Ok(());
        }
        let set = self.set;
        if let Some(variadic) = set.variadic_parameter() {
            debug!(
                "Capturing {} positional token(s) into `{}`",
                captured.len(),
                variadic.name()
            );
            self.bind(variadic, &join_capture(&captured), converter)?;
        }
        Ok(())
    }

    /// Prompts for unmet mandatory parameters, or fails listing every one
    /// that has no prompt.
    pub(crate) fn fill_mandatory(
        &mut self,
        prompter: &mut dyn Prompter,
        converter: &dyn Converter,
    ) -> Result<()> {
        let unmet = self.unmet_mandatory();
        let unprompted: Vec<String> = unmet
            .iter()
            .filter(|parameter| parameter.prompt().is_none())
            .map(|parameter| parameter.name().to_string())
            .collect();
        if !unprompted.is_empty() {
            return Err(Error::MissingMandatory(unprompted));
        }

        for parameter in unmet {
            let answer = ask(parameter, prompter)?;
            self.bind(parameter, &answer, converter)?;
        }
        Ok(())
    }
}
