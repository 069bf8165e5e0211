//! Interactive fallback for mandatory parameters left unset.

use std::collections::{HashMap, VecDeque};
use std::io::{stdin, stdout, Write};

use leon::Template;
use log::debug;

use crate::error::{DeclarationError, Error, Result};
use crate::parameter::{Parameter, Prompt};

/// Template keys a prompt may use; both hold the default answer.
const PROMPT_KEYS: [&str; 2] = ["default", "0"];

/// Source of answers for prompted parameters.
pub trait Prompter {
    /// Shows `prompt` and reads one line. `None` means end of input.
    fn read_line(&mut self, prompt: &str) -> Result<Option<String>>;
}

/// Prompts on stdout and reads answers from stdin.
#[derive(Debug, Default, Clone, Copy)]
pub struct StdinPrompter;

impl Prompter for StdinPrompter {
    fn read_line(&mut self, prompt: &str) -> Result<Option<String>> {
        print!("{prompt}");
        stdout().flush()?;

        let mut input = String::new();
        if stdin().read_line(&mut input)? == 0 {
            return Ok(None);
        }
        Ok(Some(input))
    }
}

/// Answers from a fixed script, recording every prompt shown.
///
/// Intended for tests and non-interactive callers; it never touches stdin.
#[derive(Debug, Default, Clone)]
pub struct ScriptedPrompter {
    answers: VecDeque<String>,
    shown: Vec<String>,
}

impl ScriptedPrompter {
    pub fn new<I, S>(answers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            answers: answers.into_iter().map(Into::into).collect(),
            shown: Vec::new(),
        }
    }

    pub fn shown(&self) -> &[String] {
        &self.shown
    }
}

impl Prompter for ScriptedPrompter {
    fn read_line(&mut self, prompt: &str) -> Result<Option<String>> {
        self.shown.push(prompt.to_string());
        Ok(self.answers.pop_front())
    }
}

/// Checks that `text` parses as a template using only the default answer keys.
pub(crate) fn check_template(text: &str) -> std::result::Result<(), String> {
    let template = Template::parse(text).map_err(|e| e.to_string())?;
    for key in template.keys() {
        let key: &str = key;
        if !PROMPT_KEYS.contains(&key) {
            return Err(format!("unknown template key `{key}`"));
        }
    }
    Ok(())
}

/// Renders the prompt text with its default answer substituted.
pub fn render_prompt(name: &str, prompt: &Prompt) -> Result<String> {
    let default_answer = prompt.default_answer.clone().unwrap_or_default();
    let values: HashMap<String, String> = PROMPT_KEYS
        .iter()
        .map(|key| (key.to_string(), default_answer.clone()))
        .collect();

    let invalid = |reason: String| {
        Error::from(DeclarationError::InvalidPrompt {
            name: name.to_string(),
            reason,
        })
    };
    let template = Template::parse(&prompt.text).map_err(|e| invalid(e.to_string()))?;
    template.render(&values).map_err(|e| invalid(e.to_string()))
}

/// Prompts for `parameter` and returns the answer text, or its default.
pub(crate) fn ask(parameter: &Parameter, prompter: &mut dyn Prompter) -> Result<String> {
    let Some(prompt) = parameter.prompt() else {
        return Err(Error::MissingMandatory(vec![parameter.name().to_string()]));
    };

    let rendered = render_prompt(parameter.name(), prompt)?;
    let Some(line) = prompter.read_line(&rendered)? else {
        return Err(Error::AbortedInput(parameter.name().to_string()));
    };

    let answer = line.trim_end_matches(['\r', '\n']);
    if answer.is_empty() {
        debug!("Empty answer for `{}`, using default", parameter.name());
        return Ok(prompt.default_answer.clone().unwrap_or_default());
    }
    Ok(answer.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::convert::StandardConverter;
    use crate::error::ErrorKind;
    use crate::parameter::{Attribute, ParameterDefinition};
    use crate::value::ValueType;

    fn prompted(text: &str, default: Option<&str>) -> Parameter {
        let definition = ParameterDefinition::new("Target", ValueType::STRING)
            .mandatory()
            .with(Attribute::prompt(text, default));
        Parameter::from_definition(&definition, &StandardConverter).unwrap()
    }

    #[test]
    fn test_check_template_keys() {
        assert!(check_template("Target [{default}]: ").is_ok());
        assert!(check_template("Target [{0}]: ").is_ok());
        assert!(check_template("Target: ").is_ok());
        assert!(check_template("Target [{host}]: ").is_err());
    }

    #[test]
    fn test_render_substitutes_default() {
        let prompt = Prompt {
            text: "Target [{default}]: ".to_string(),
            default_answer: Some("web01".to_string()),
        };
        assert_eq!(render_prompt("Target", &prompt).unwrap(), "Target [web01]: ");
    }

    #[test]
    fn test_ask_returns_answer_without_line_terminator() {
        let parameter = prompted("Target: ", None);
        let mut prompter = ScriptedPrompter::new(["web02\r\n"]);
        assert_eq!(ask(&parameter, &mut prompter).unwrap(), "web02");
        assert_eq!(prompter.shown(), ["Target: "]);
    }

    #[test]
    fn test_ask_empty_answer_uses_default() {
        let parameter = prompted("Target [{0}]: ", Some("web01"));
        let mut prompter = ScriptedPrompter::new(["\n"]);
        assert_eq!(ask(&parameter, &mut prompter).unwrap(), "web01");
        assert_eq!(prompter.shown(), ["Target [web01]: "]);
    }

    #[test]
    fn test_ask_end_of_input_aborts() {
        let parameter = prompted("Target: ", None);
        let mut prompter = ScriptedPrompter::default();
        let error = ask(&parameter, &mut prompter).unwrap_err();
        assert_eq!(error.kind(), ErrorKind::AbortedInput);
    }
}
