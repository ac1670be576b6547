//! Render context construction.
//! Collects an answer for every configuration variable, coerces it to the
//! type of the variable's default and freezes the result.

use crate::config::ConfigDocument;
use crate::constants::CONTEXT_KEY;
use crate::error::{Error, Result};
use crate::prompt::Prompter;
use log::{debug, warn};
use serde::{Serialize, Serializer};
use std::path::Path;

/// The type a variable's answer is coerced to, inferred from its default.
#[derive(Debug, Clone, PartialEq)]
pub enum DefaultValue {
    String(String),
    Integer(i64),
    Float(f64),
    Boolean(bool),
    /// Null, arrays, objects and integers outside the `i64` range.
    Other(serde_json::Value),
}

impl From<&serde_json::Value> for DefaultValue {
    fn from(value: &serde_json::Value) -> Self {
        match value {
            serde_json::Value::String(s) => Self::String(s.clone()),
            serde_json::Value::Bool(b) => Self::Boolean(*b),
            serde_json::Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Self::Integer(i)
                } else if n.is_f64() {
                    Self::Float(n.as_f64().unwrap_or_default())
                } else {
                    Self::Other(value.clone())
                }
            }
            other => Self::Other(other.clone()),
        }
    }
}

impl DefaultValue {
    fn into_value(self) -> serde_json::Value {
        match self {
            Self::String(s) => serde_json::Value::String(s),
            Self::Integer(i) => serde_json::Value::from(i),
            Self::Float(f) => serde_json::Value::from(f),
            Self::Boolean(b) => serde_json::Value::Bool(b),
            Self::Other(v) => v,
        }
    }

    fn type_name(&self) -> &'static str {
        match self {
            Self::String(_) => "string",
            Self::Integer(_) => "integer",
            Self::Float(_) => "number",
            Self::Boolean(_) => "boolean",
            Self::Other(_) => "value",
        }
    }
}

/// What to do with non-empty input that does not parse as the default's type.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CoercionPolicy {
    /// Store the zero value of the target type (`0`, `0.0`, `false`).
    #[default]
    ZeroValue,
    /// Fail with `Error::InvalidAnswer`.
    Reject,
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.to_ascii_lowercase().as_str() {
        "true" | "t" | "1" | "yes" | "y" => Some(true),
        "false" | "f" | "0" | "no" | "n" => Some(false),
        _ => None,
    }
}

/// Coerces a raw answer for `key` against the type of `default`.
///
/// Empty input keeps the default, including its type. String and untyped
/// defaults store the raw text unmodified.
///
/// # Errors
/// * `Error::InvalidAnswer` if parsing fails and `policy` is `Reject`
pub fn coerce(
    key: &str,
    default: &serde_json::Value,
    raw: &str,
    policy: CoercionPolicy,
) -> Result<serde_json::Value> {
    if raw.is_empty() {
        return Ok(default.clone());
    }

    let target = DefaultValue::from(default);
    let trimmed = raw.trim();
    let parsed = match &target {
        DefaultValue::String(_) | DefaultValue::Other(_) => {
            return Ok(serde_json::Value::String(raw.to_string()))
        }
        DefaultValue::Integer(_) => trimmed.parse::<i64>().ok().map(DefaultValue::Integer),
        DefaultValue::Float(_) => trimmed
            .parse::<f64>()
            .ok()
            .filter(|f| f.is_finite())
            .map(DefaultValue::Float),
        DefaultValue::Boolean(_) => parse_bool(trimmed).map(DefaultValue::Boolean),
    };

    match (parsed, policy) {
        (Some(value), _) => Ok(value.into_value()),
        (None, CoercionPolicy::Reject) => Err(Error::InvalidAnswer {
            key: key.to_string(),
            value: raw.to_string(),
            expected: target.type_name(),
        }),
        (None, CoercionPolicy::ZeroValue) => {
            let zero = match &target {
                DefaultValue::Integer(_) => DefaultValue::Integer(0),
                DefaultValue::Float(_) => DefaultValue::Float(0.0),
                _ => DefaultValue::Boolean(false),
            };
            warn!(
                "'{}' is not a valid {} for '{}', using {}",
                raw,
                target.type_name(),
                key,
                zero.clone().into_value()
            );
            Ok(zero.into_value())
        }
    }
}

/// Frozen mapping of configuration variables, namespaced under
/// [`CONTEXT_KEY`]. Templates address values as `cookiecutter.<name>`.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderContext {
    value: serde_json::Value,
}

impl RenderContext {
    /// Wraps `root` under the namespace key.
    pub fn new(root: serde_json::Value) -> Self {
        let mut map = serde_json::Map::new();
        map.insert(CONTEXT_KEY.to_string(), root);
        Self { value: serde_json::Value::Object(map) }
    }

    /// The full context, including the namespace key.
    pub fn as_value(&self) -> &serde_json::Value {
        &self.value
    }

    /// The namespaced variables.
    pub fn variables(&self) -> &serde_json::Value {
        &self.value[CONTEXT_KEY]
    }
}

impl Serialize for RenderContext {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        self.value.serialize(serializer)
    }
}

/// Asks for every top-level variable of `document` and returns the frozen context.
///
/// Non-object roots are stored verbatim without prompting.
pub fn collect_answers(
    document: ConfigDocument,
    prompter: &dyn Prompter,
    policy: CoercionPolicy,
) -> Result<RenderContext> {
    if !document.root().is_object() {
        return Ok(RenderContext::new(document.into_root()));
    }

    let mut answers = serde_json::Map::new();
    for (key, default) in document.variables() {
        let raw = prompter.answer(&key, &default)?;
        let value = coerce(&key, &default, &raw, policy)?;
        debug!("{} = {}", key, value);
        answers.insert(key, value);
    }

    Ok(RenderContext::new(serde_json::Value::Object(answers)))
}

/// Reads the configuration document at `config_path` and builds the render context.
///
/// # Errors
/// * `Error::ConfigReadError` / `Error::ConfigParseError` before any prompting
/// * `Error::InvalidAnswer` for malformed input under `CoercionPolicy::Reject`
/// * Any error raised by the prompter
pub fn build_context<P: AsRef<Path>>(
    config_path: P,
    prompter: &dyn Prompter,
    policy: CoercionPolicy,
) -> Result<RenderContext> {
    let document = ConfigDocument::read(config_path)?;
    collect_answers(document, prompter, policy)
}
