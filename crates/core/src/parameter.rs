//! Parameter declarations and their validated runtime form.
//!
//! A [`ParameterDefinition`] is plain data, written by hand with the builder
//! methods or loaded from a declaration file. [`Parameter::from_definition`]
//! checks it once and resolves every attribute into a typed validator, so no
//! declaration problem can surface while tokens are being bound.

use std::collections::HashSet;
use std::fmt::{Display, Formatter};

use log::debug;
use serde::{Deserialize, Serialize};

use crate::convert::{convert_from_string, Converter};
use crate::error::{DeclarationError, Error, Result};
use crate::prompt::check_template;
use crate::validate::{IntRange, LengthRule, Pattern, Range, ValueSet, Validators};
use crate::value::{Scalar, ScalarType, Value, ValueType};

/// Names claimed by the help and version tokens.
pub const RESERVED_NAMES: [&str; 2] = ["help", "version"];

/// Declared constraint or decoration of a parameter.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Attribute {
    /// Character length of string values (each element for `string[]`).
    Length {
        min: usize,
        max: usize,
        #[serde(default)]
        trim: bool,
    },
    /// Element count of array values.
    Count { min: usize, max: usize },
    /// Inclusive value range, bounds written in the parameter's element type.
    Range { min: String, max: String },
    /// Discrete allowed values.
    Set {
        values: Vec<String>,
        #[serde(default)]
        case_insensitive: bool,
    },
    /// Regular expression each string value must match.
    Pattern(String),
    /// Interactive fallback for an unset mandatory parameter.
    Prompt {
        text: String,
        #[serde(default)]
        default: Option<String>,
    },
    Help {
        short: String,
        #[serde(default)]
        long: Option<String>,
    },
}

impl Attribute {
    pub fn kind(&self) -> &'static str {
        match self {
            Attribute::Length { .. } => "length",
            Attribute::Count { .. } => "count",
            Attribute::Range { .. } => "range",
            Attribute::Set { .. } => "set",
            Attribute::Pattern(_) => "pattern",
            Attribute::Prompt { .. } => "prompt",
            Attribute::Help { .. } => "help",
        }
    }

    pub fn length(min: usize, max: usize) -> Self {
        Attribute::Length {
            min,
            max,
            trim: false,
        }
    }

    pub fn count(min: usize, max: usize) -> Self {
        Attribute::Count { min, max }
    }

    pub fn range(min: impl Display, max: impl Display) -> Self {
        Attribute::Range {
            min: min.to_string(),
            max: max.to_string(),
        }
    }

    pub fn set<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Attribute::Set {
            values: values.into_iter().map(Into::into).collect(),
            case_insensitive: false,
        }
    }

    pub fn pattern(pattern: &str) -> Self {
        Attribute::Pattern(pattern.to_string())
    }

    pub fn prompt(text: &str, default: Option<&str>) -> Self {
        Attribute::Prompt {
            text: text.to_string(),
            default: default.map(str::to_string),
        }
    }

    pub fn help(short: &str) -> Self {
        Attribute::Help {
            short: short.to_string(),
            long: None,
        }
    }
}

/// Declaration of one parameter's membership in one set.
///
/// ```
/// use parmsets_core::parameter::{Attribute, ParameterDefinition};
/// use parmsets_core::value::{ScalarType, ValueType};
///
/// let count = ParameterDefinition::new("Count", ValueType::Scalar(ScalarType::Int))
///     .in_set("Batch")
///     .at_position(1)
///     .with(Attribute::range(1, 10));
/// assert_eq!(count.position, Some(1));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ParameterDefinition {
    pub name: String,
    #[serde(rename = "type")]
    pub value_type: ValueType,
    /// Owning set; empty for the default set.
    #[serde(default)]
    pub set: String,
    #[serde(default)]
    pub position: Option<usize>,
    #[serde(default)]
    pub mandatory: bool,
    #[serde(default)]
    pub switch: bool,
    #[serde(default)]
    pub variadic: bool,
    /// Value text reported when the parameter is never bound.
    #[serde(default)]
    pub initial: Option<String>,
    #[serde(default)]
    pub attributes: Vec<Attribute>,
}

impl ParameterDefinition {
    pub fn new(name: &str, value_type: ValueType) -> Self {
        Self {
            name: name.to_string(),
            value_type,
            set: String::new(),
            position: None,
            mandatory: false,
            switch: false,
            variadic: false,
            initial: None,
            attributes: Vec::new(),
        }
    }

    /// A boolean switch, set by presence alone.
    pub fn switch(name: &str) -> Self {
        Self {
            switch: true,
            ..Self::new(name, ValueType::BOOL)
        }
    }

    /// A `string[]` parameter that captures leftover positional tokens.
    pub fn variadic(name: &str) -> Self {
        Self {
            variadic: true,
            ..Self::new(name, ValueType::STRING_ARRAY)
        }
    }

    pub fn in_set(mut self, set: &str) -> Self {
        self.set = set.to_string();
        self
    }

    pub fn at_position(mut self, position: usize) -> Self {
        self.position = Some(position);
        self
    }

    pub fn mandatory(mut self) -> Self {
        self.mandatory = true;
        self
    }

    pub fn initial(mut self, text: &str) -> Self {
        self.initial = Some(text.to_string());
        self
    }

    pub fn with(mut self, attribute: Attribute) -> Self {
        self.attributes.push(attribute);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompt {
    pub text: String,
    pub default_answer: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HelpText {
    pub short: String,
    pub long: Option<String>,
}

/// A checked parameter declaration.
#[derive(Debug, Clone)]
pub struct Parameter {
    name: String,
    value_type: ValueType,
    set_name: String,
    position: Option<usize>,
    mandatory: bool,
    switch: bool,
    variadic: bool,
    validators: Validators,
    prompt: Option<Prompt>,
    help: Option<HelpText>,
    initial: Option<Value>,
}

fn check_name(name: &str) -> std::result::Result<String, DeclarationError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(DeclarationError::EmptyName(name.to_string()));
    }
    if name.starts_with('-') {
        return Err(DeclarationError::LeadingDash(name.to_string()));
    }
    if !name.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err(DeclarationError::NotAlphanumeric(name.to_string()));
    }
    if RESERVED_NAMES
        .iter()
        .any(|reserved| reserved.eq_ignore_ascii_case(name))
    {
        return Err(DeclarationError::ReservedName(name.to_string()));
    }
    Ok(name.to_string())
}

fn convert_declared(
    name: &str,
    text: &str,
    element: ScalarType,
    converter: &dyn Converter,
) -> std::result::Result<Scalar, DeclarationError> {
    converter
        .convert(text, element)
        .map_err(|_| DeclarationError::InvalidDeclaredValue {
            name: name.to_string(),
            value: text.to_string(),
            value_type: element.to_string(),
        })
}

impl Parameter {
    /// Checks `definition` and resolves its attributes.
    pub fn from_definition(
        definition: &ParameterDefinition,
        converter: &dyn Converter,
    ) -> std::result::Result<Self, DeclarationError> {
        let name = check_name(&definition.name)?;
        let value_type = definition.value_type;
        let element = value_type.element_type();

        if !converter.supports(element) {
            return Err(DeclarationError::UnsupportedType(value_type.to_string()));
        }
        if definition.switch && value_type != ValueType::BOOL {
            return Err(DeclarationError::SwitchNotBool(name));
        }
        if definition.variadic && value_type != ValueType::STRING_ARRAY {
            return Err(DeclarationError::VariadicNotStringArray(name));
        }

        let incompatible = |attribute: &Attribute| DeclarationError::IncompatibleAttribute {
            name: name.clone(),
            attribute: attribute.kind(),
            value_type: value_type.to_string(),
        };
        let min_over_max = |attribute: &Attribute| DeclarationError::MinGreaterThanMax {
            name: name.clone(),
            attribute: attribute.kind(),
        };

        let mut seen = HashSet::new();
        let mut validators = Validators::default();
        let mut prompt = None;
        let mut help = None;

        for attribute in &definition.attributes {
            if !seen.insert(attribute.kind()) {
                return Err(DeclarationError::DuplicateAttribute {
                    name,
                    attribute: attribute.kind(),
                });
            }

            match attribute {
                Attribute::Length { min, max, trim } => {
                    if !value_type.is_textual() {
                        return Err(incompatible(attribute));
                    }
                    let range = IntRange::new(*min, *max).ok_or_else(|| min_over_max(attribute))?;
                    validators.length = Some(LengthRule { range, trim: *trim });
                }
                Attribute::Count { min, max } => {
                    if !value_type.is_array() {
                        return Err(incompatible(attribute));
                    }
                    validators.count =
                        Some(IntRange::new(*min, *max).ok_or_else(|| min_over_max(attribute))?);
                }
                Attribute::Range { min, max } => {
                    let min = convert_declared(&name, min, element, converter)?;
                    let max = convert_declared(&name, max, element, converter)?;
                    validators.range =
                        Some(Range::new(min, max).ok_or_else(|| min_over_max(attribute))?);
                }
                Attribute::Set {
                    values,
                    case_insensitive,
                } => {
                    if values.is_empty() {
                        return Err(DeclarationError::EmptyValidationSet(name));
                    }
                    let values = values
                        .iter()
                        .map(|text| convert_declared(&name, text, element, converter))
                        .collect::<std::result::Result<Vec<_>, _>>()?;
                    validators.set = Some(ValueSet {
                        values,
                        case_insensitive: *case_insensitive,
                    });
                }
                Attribute::Pattern(source) => {
                    if !value_type.is_textual() {
                        return Err(incompatible(attribute));
                    }
                    let pattern =
                        Pattern::new(source).map_err(|original| DeclarationError::InvalidPattern {
                            name: name.clone(),
                            original,
                        })?;
                    validators.pattern = Some(pattern);
                }
                Attribute::Prompt { text, default } => {
                    check_template(text).map_err(|reason| DeclarationError::InvalidPrompt {
                        name: name.clone(),
                        reason,
                    })?;
                    prompt = Some(Prompt {
                        text: text.clone(),
                        default_answer: default.clone(),
                    });
                }
                Attribute::Help { short, long } => {
                    help = Some(HelpText {
                        short: short.clone(),
                        long: long.clone(),
                    });
                }
            }
        }

        let initial = match &definition.initial {
            Some(text) => Some(convert_from_string(text, value_type, converter).map_err(
                |value| DeclarationError::InvalidDeclaredValue {
                    name: name.clone(),
                    value,
                    value_type: value_type.to_string(),
                },
            )?),
            None => None,
        };

        Ok(Self {
            name,
            value_type,
            set_name: definition.set.trim().to_string(),
            position: definition.position,
            mandatory: definition.mandatory,
            switch: definition.switch,
            variadic: definition.variadic,
            validators,
            prompt,
            help,
            initial,
        })
    }

    /// Converts and validates `text` as a value of this parameter.
    ///
    /// A scalar with a trimming length rule is trimmed before conversion, and
    /// the trimmed text is what gets bound.
    pub fn bind(&self, text: &str, converter: &dyn Converter) -> Result<Value> {
        let text = match &self.validators.length {
            Some(length) if length.trim && !self.value_type.is_array() => text.trim(),
            _ => text,
        };
        let value = convert_from_string(text, self.value_type, converter).map_err(|input| {
            Error::ConversionFailed {
                parameter: self.name.clone(),
                type_name: self.value_type.to_string(),
                input,
            }
        })?;
        self.validators.check(&self.name, text, &value)?;
        debug!("Bound parameter `{}` = `{}`", self.name, value);
        Ok(value)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn value_type(&self) -> ValueType {
        self.value_type
    }

    pub fn set_name(&self) -> &str {
        &self.set_name
    }

    pub fn position(&self) -> Option<usize> {
        self.position
    }

    pub fn is_positional(&self) -> bool {
        self.position.is_some()
    }

    pub fn is_mandatory(&self) -> bool {
        self.mandatory
    }

    pub fn is_switch(&self) -> bool {
        self.switch
    }

    pub fn is_variadic(&self) -> bool {
        self.variadic
    }

    pub fn validators(&self) -> &Validators {
        &self.validators
    }

    pub fn prompt(&self) -> Option<&Prompt> {
        self.prompt.as_ref()
    }

    pub fn help(&self) -> Option<&HelpText> {
        self.help.as_ref()
    }

    pub fn initial(&self) -> Option<&Value> {
        self.initial.as_ref()
    }
}

impl Display for Parameter {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        write!(formatter, "-{} <{}>", self.name, self.value_type)
    }
}
