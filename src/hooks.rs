//! Post-generation hook processing.
//! Scripts placed in the generated `post_gen` directory are executed one by
//! one after the output tree has been written.

use globset::{Glob, GlobMatcher};
use log::{debug, info};
use serde::Serialize;
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use crate::constants::POST_GEN_DIR;
use crate::context::RenderContext;
use crate::error::{Error, Result};
use crate::prompt::Prompter;

/// Payload written to each hook's stdin.
#[derive(Serialize)]
pub struct Output<'a> {
    pub template_dir: &'a str,
    pub output_dir: &'a str,
    pub context: &'a serde_json::Value,
}

/// Returns the hook directory inside the generated output.
pub fn get_hook_dir<P: AsRef<Path>>(output_dir: P) -> PathBuf {
    output_dir.as_ref().join(POST_GEN_DIR)
}

/// Asks whether the discovered hooks may run.
///
/// Returns `false` without asking when there is nothing to run, and `true`
/// without asking when `skip_hooks_check` is set.
pub fn confirm_hook_execution(
    prompt: &dyn Prompter,
    hooks: &HookRunner,
    output_dir: &Path,
    skip_hooks_check: bool,
) -> Result<bool> {
    let scripts = hooks.discover(output_dir)?;
    if scripts.is_empty() {
        return Ok(false);
    }

    prompt.confirm(
        skip_hooks_check,
        format!(
            "WARNING: This template contains {} post-generation script(s) that will execute commands on your system. Do you want to run them?",
            scripts.len()
        ),
    )
}

/// Discovers and runs post-generation scripts.
#[derive(Debug)]
pub struct HookRunner {
    matcher: GlobMatcher,
    program: String,
    args: Vec<String>,
}

impl HookRunner {
    /// Creates a runner for scripts whose file name matches `pattern`.
    ///
    /// `runner` is split on whitespace; its first word is the program and the
    /// rest are passed before the script path, e.g. `go run`. An empty runner
    /// executes the script directly.
    ///
    /// # Errors
    /// * `Error::HookPatternError` if `pattern` is not a valid glob
    pub fn new(pattern: &str, runner: &str) -> Result<Self> {
        let matcher = Glob::new(pattern)
            .map_err(|source| Error::HookPatternError { pattern: pattern.to_string(), source })?
            .compile_matcher();

        let mut words = runner.split_whitespace().map(str::to_string);
        let program = words.next().unwrap_or_default();
        let args = words.collect();

        Ok(Self { matcher, program, args })
    }

    /// Lists matching scripts directly inside `<output_dir>/post_gen`, sorted by name.
    /// A missing hook directory yields no scripts.
    pub fn discover<P: AsRef<Path>>(&self, output_dir: P) -> Result<Vec<PathBuf>> {
        let hook_dir = get_hook_dir(output_dir);
        if !hook_dir.is_dir() {
            debug!("No hook directory at {}", hook_dir.display());
            return Ok(Vec::new());
        }

        let read_error =
            |source: std::io::Error| Error::ReadError { path: hook_dir.display().to_string(), source };

        let mut scripts = Vec::new();
        for entry in fs::read_dir(&hook_dir).map_err(read_error)? {
            let entry = entry.map_err(read_error)?;
            let path = entry.path();
            if path.is_file() && self.matcher.is_match(entry.file_name()) {
                scripts.push(path);
            }
        }
        scripts.sort();
        Ok(scripts)
    }

    /// Runs every discovered script in order, stopping at the first failure.
    pub fn run_all(
        &self,
        template_dir: &Path,
        output_dir: &Path,
        context: &RenderContext,
    ) -> Result<()> {
        // Scripts run from inside the output directory, so relative paths
        // would no longer point at them.
        let output_dir = std::path::absolute(output_dir)?;
        let output_dir = output_dir.as_path();
        let template_dir_str = template_dir.display().to_string();
        let output_dir_str = output_dir.display().to_string();
        let output = Output {
            template_dir: &template_dir_str,
            output_dir: &output_dir_str,
            context: context.as_value(),
        };
        let payload = serde_json::to_string(&output).map_err(|e| Error::HookExecutionError {
            script: POST_GEN_DIR.to_string(),
            reason: e.to_string(),
        })?;

        for script in self.discover(output_dir)? {
            info!("Running hook: {}", script.display());
            self.run_hook(&script, output_dir, &payload)?;
        }
        Ok(())
    }

    /// Runs one script with `payload` on stdin and the output directory as
    /// working directory.
    pub fn run_hook(&self, script: &Path, output_dir: &Path, payload: &str) -> Result<()> {
        let hook_error = |reason: String| Error::HookExecutionError {
            script: script.display().to_string(),
            reason,
        };

        let mut command = if self.program.is_empty() {
            Command::new(script)
        } else {
            let mut command = Command::new(&self.program);
            command.args(&self.args).arg(script);
            command
        };

        let mut child = command
            .current_dir(output_dir)
            .stdin(Stdio::piped())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .spawn()
            .map_err(|e| hook_error(e.to_string()))?;

        if let Some(mut stdin) = child.stdin.take() {
            // Scripts are free to ignore their input.
            match stdin.write_all(payload.as_bytes()) {
                Err(e) if e.kind() != ErrorKind::BrokenPipe => {
                    return Err(hook_error(e.to_string()))
                }
                _ => {}
            }
        }

        let status = child.wait().map_err(|e| hook_error(e.to_string()))?;
        if !status.success() {
            return Err(hook_error(format!("exited with {status}")));
        }

        Ok(())
    }
}
