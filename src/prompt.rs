//! User input and interaction handling.
//! The context builder never reads the console directly; it asks a
//! [`Prompter`] for raw answers so it can be driven by a terminal, by
//! preloaded answers or by tests.

use crate::error::{Error, Result};
use dialoguer::{Confirm, Input};
use std::io::Read;

/// Source of raw answers for configuration variables.
pub trait Prompter {
    /// Returns the raw answer for `key`. An empty string keeps `default`.
    fn answer(&self, key: &str, default: &serde_json::Value) -> Result<String>;

    /// Asks a yes/no question. `skip` answers yes without asking.
    ///
    /// Non-interactive prompters answer no unless `skip` is set.
    fn confirm(&self, skip: bool, _prompt: String) -> Result<bool> {
        Ok(skip)
    }
}

/// Formats a default for display: strings without quotes, everything else as JSON.
pub fn display_default(default: &serde_json::Value) -> String {
    match default {
        serde_json::Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Interactive prompter backed by dialoguer.
#[derive(Debug, Default)]
pub struct DialoguerPrompter;

impl DialoguerPrompter {
    pub fn new() -> Self {
        Self
    }

    /// Asks for the template location when it was not given on the command line.
    pub fn template_source(&self) -> Result<String> {
        let source: String = Input::new()
            .with_prompt("Enter the path to the template directory or repository URL")
            .interact_text()?;
        Ok(source.trim().to_string())
    }
}

impl Prompter for DialoguerPrompter {
    fn answer(&self, key: &str, default: &serde_json::Value) -> Result<String> {
        let input: String = Input::new()
            .with_prompt(format!("{} ({})", key, display_default(default)))
            .allow_empty(true)
            .interact_text()?;
        Ok(input)
    }

    fn confirm(&self, skip: bool, prompt: String) -> Result<bool> {
        if skip {
            return Ok(true);
        }
        Ok(Confirm::new().with_prompt(prompt).default(false).interact()?)
    }
}

/// Keeps every default. Used with `--no-input`.
#[derive(Debug, Default)]
pub struct DefaultsPrompter;

impl Prompter for DefaultsPrompter {
    fn answer(&self, _key: &str, _default: &serde_json::Value) -> Result<String> {
        Ok(String::new())
    }
}

/// Answers taken from a JSON object; unknown keys keep their defaults.
#[derive(Debug, Clone, Default)]
pub struct PreloadedPrompter {
    answers: serde_json::Map<String, serde_json::Value>,
}

impl PreloadedPrompter {
    /// Builds a prompter from a decoded answers document.
    /// Anything other than an object yields no answers.
    pub fn new(answers: serde_json::Value) -> Self {
        match answers {
            serde_json::Value::Object(answers) => Self { answers },
            _ => Self::default(),
        }
    }

    /// Builds a prompter from `key`/`raw answer` pairs.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let answers = pairs
            .into_iter()
            .map(|(k, v)| (k.into(), serde_json::Value::String(v.into())))
            .collect();
        Self { answers }
    }
}

impl Prompter for PreloadedPrompter {
    fn answer(&self, key: &str, _default: &serde_json::Value) -> Result<String> {
        Ok(match self.answers.get(key) {
            None | Some(serde_json::Value::Null) => String::new(),
            Some(value) => display_default(value),
        })
    }
}

/// Reads a JSON answers document from stdin. Empty input means no answers.
pub fn load_answers_from_stdin() -> Result<serde_json::Value> {
    let mut buffer = String::new();
    std::io::stdin().read_to_string(&mut buffer)?;
    parse_answers(&buffer)
}

/// Decodes an answers document.
pub fn parse_answers(content: &str) -> Result<serde_json::Value> {
    let content = content.trim();
    if content.is_empty() {
        return Ok(serde_json::Value::Null);
    }
    serde_json::from_str(content).map_err(Error::AnswersParseError)
}
