//! Configuration handling for cutter templates.
//! Loads the `cookiecutter.json` document that declares template variables
//! and their default values.

use crate::constants::CONFIG_FILE;
use crate::error::{Error, Result};
use indexmap::IndexMap;
use log::debug;
use std::path::Path;

/// A parsed configuration document.
///
/// The root is kept exactly as decoded; callers decide how to interpret
/// non-object roots.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigDocument {
    root: serde_json::Value,
}

impl ConfigDocument {
    /// Reads and decodes the document at `path`.
    ///
    /// The file is read completely before decoding, so a malformed document
    /// fails before any prompting starts.
    ///
    /// # Errors
    /// * `Error::ConfigReadError` if the file is missing or unreadable
    /// * `Error::ConfigParseError` if the contents are not valid JSON
    pub fn read<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        debug!("Loading configuration from {}", path.display());

        let content = std::fs::read_to_string(path).map_err(|source| {
            Error::ConfigReadError { path: path.display().to_string(), source }
        })?;

        Self::parse(path, &content)
    }

    /// Decodes `content` as the document located at `path`.
    pub fn parse<P: AsRef<Path>>(path: P, content: &str) -> Result<Self> {
        let path = path.as_ref();
        let root = serde_json::from_str(content).map_err(|source| {
            Error::ConfigParseError { path: path.display().to_string(), source }
        })?;

        Ok(Self { root })
    }

    /// The decoded root value.
    pub fn root(&self) -> &serde_json::Value {
        &self.root
    }

    /// Top-level variables and their defaults, in document order.
    /// Empty when the root is not an object.
    pub fn variables(&self) -> IndexMap<String, serde_json::Value> {
        match &self.root {
            serde_json::Value::Object(map) => {
                map.iter().map(|(k, v)| (k.clone(), v.clone())).collect()
            }
            _ => IndexMap::new(),
        }
    }

    pub fn into_root(self) -> serde_json::Value {
        self.root
    }
}

/// Loads the configuration document from a template directory.
///
/// # Arguments
/// * `template_dir` - Directory containing `cookiecutter.json`
pub fn load_config<P: AsRef<Path>>(template_dir: P) -> Result<ConfigDocument> {
    ConfigDocument::read(template_dir.as_ref().join(CONFIG_FILE))
}
