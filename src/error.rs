//! Error handling for the cutter application.
//! Defines the error taxonomy and result type used throughout the application.

use std::io;
use thiserror::Error;

/// Custom error types for cutter operations.
///
/// Every variant that originates from a concrete file or template carries
/// the offending path or name next to the underlying cause, so the top-level
/// handler can report it without extra context.
#[derive(Error, Debug)]
pub enum Error {
    /// The configuration document is missing or cannot be read.
    #[error("Cannot read configuration file '{path}': {source}.")]
    ConfigReadError {
        path: String,
        #[source]
        source: io::Error,
    },

    /// The configuration document is not valid JSON.
    #[error("Cannot parse configuration file '{path}': {source}.")]
    ConfigParseError {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    /// Preloaded answers could not be decoded.
    #[error("Cannot parse answers: {0}.")]
    AnswersParseError(#[source] serde_json::Error),

    /// A non-empty answer does not parse as the type of its default value.
    #[error("Invalid answer for '{key}': '{value}' is not a valid {expected}.")]
    InvalidAnswer {
        key: String,
        value: String,
        expected: &'static str,
    },

    /// Terminal interaction failed.
    #[error("Prompt error: {0}.")]
    PromptError(#[from] dialoguer::Error),

    /// The template tree cannot be traversed.
    #[error("Cannot access template entry: {0}.")]
    WalkAccessError(#[from] walkdir::Error),

    /// A template failed to parse.
    #[error("Template syntax error in '{template}': {source}.")]
    TemplateSyntaxError {
        template: String,
        #[source]
        source: minijinja::Error,
    },

    /// A template parsed but failed while substituting values.
    #[error("Template execution error in '{template}': {source}.")]
    TemplateExecutionError {
        template: String,
        #[source]
        source: minijinja::Error,
    },

    /// A template file cannot be read.
    #[error("Cannot read '{path}': {source}.")]
    ReadError {
        path: String,
        #[source]
        source: io::Error,
    },

    /// An output entry cannot be created or written.
    #[error("Cannot write '{path}': {source}.")]
    WriteError {
        path: String,
        #[source]
        source: io::Error,
    },

    /// The output directory would be read back by the template walk.
    #[error(
        "Output directory '{output_dir}' must not be inside the template directory '{template_dir}'; pass an OUTPUT_DIR outside of it."
    )]
    OutputInsideTemplateError { output_dir: String, template_dir: String },

    /// The hook glob pattern is invalid.
    #[error("Invalid hook pattern '{pattern}': {source}.")]
    HookPatternError {
        pattern: String,
        #[source]
        source: globset::Error,
    },

    /// A post-generation script could not be started or exited with failure.
    #[error("Hook '{script}' failed: {reason}.")]
    HookExecutionError { script: String, reason: String },

    /// The local template path does not exist.
    #[error("Template directory '{template_dir}' does not exist.")]
    TemplateDoesNotExistsError { template_dir: String },

    /// Cloning the template repository failed.
    #[error("Git error: {0}.")]
    Git2Error(#[from] git2::Error),

    /// Any other file system failure.
    #[error("IO error: {0}.")]
    IoError(#[from] io::Error),
}

/// Convenience type alias for Results with [`Error`] as the error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Default error handler that prints the error and exits the program.
///
/// Output written before the failure is left in place.
pub fn default_error_handler(err: Error) {
    eprintln!("{err}");
    std::process::exit(1);
}
