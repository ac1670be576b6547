//! Common constants used throughout the cutter application.

/// Name of the configuration document at the template root.
/// Files with this name are never copied to the output.
pub const CONFIG_FILE: &str = "cookiecutter.json";

/// Namespace under which the configuration is exposed to templates.
pub const CONTEXT_KEY: &str = "cookiecutter";

/// Version-control metadata directory skipped during traversal.
pub const VCS_DIR: &str = ".git";

/// Directory inside the generated output that holds post-generation scripts.
pub const POST_GEN_DIR: &str = "post_gen";

/// Scripts in [`POST_GEN_DIR`] matching this glob are executed.
pub const DEFAULT_HOOK_PATTERN: &str = "*.go";

/// Command used to execute each post-generation script.
pub const DEFAULT_HOOK_RUNNER: &str = "go run";
