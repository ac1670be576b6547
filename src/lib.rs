//! cutter renders cookiecutter-style project templates.
//! It reads a template's `cookiecutter.json`, collects values for its
//! variables and mirrors the template tree into an output directory,
//! rendering every path and file through MiniJinja.

/// Command-line interface module for the cutter application
pub mod cli;

/// Loading of the `cookiecutter.json` configuration document
pub mod config;

/// Reserved file names and defaults
pub mod constants;

/// Answer coercion and the frozen render context
pub mod context;

/// Error types and handling for the cutter application
pub mod error;

/// Post generation hook processing
/// Runs the scripts found in the generated post_gen directory
pub mod hooks;

/// Template sources: local directories and git repositories
pub mod loader;

/// Logger initialization for the command-line binary
pub mod logger;

/// Template tree walking and output materialization
pub mod processor;

/// User input and interaction handling
pub mod prompt;

/// Template rendering with strict and lenient modes
pub mod renderer;
