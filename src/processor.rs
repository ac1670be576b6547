//! Template tree materialization.
//! Walks the template directory depth-first, renders every entry's path and
//! every file's contents, and mirrors the result under the output directory.

use log::{debug, info, warn};
use std::ffi::OsStr;
use std::fs;
use std::path::{Component, Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

use crate::{
    constants::{CONFIG_FILE, VCS_DIR},
    context::RenderContext,
    error::{Error, Result},
    renderer::TemplateRenderer,
};

/// A single change to the output tree produced for one template entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileOperation {
    /// Create a directory and any missing ancestors.
    CreateDir { target: PathBuf },
    /// Create or overwrite a file.
    Write { target: PathBuf, content: Vec<u8> },
}

impl FileOperation {
    pub fn target(&self) -> &Path {
        match self {
            FileOperation::CreateDir { target } | FileOperation::Write { target, .. } => target,
        }
    }
}

/// Applies `operation` to the file system.
///
/// # Errors
/// * `Error::WriteError` if the directory or file cannot be created or written
pub fn apply_operation(operation: &FileOperation) -> Result<()> {
    match operation {
        FileOperation::CreateDir { target } => create_dir_all(target),
        FileOperation::Write { target, content } => {
            debug!("Writing file: {}", target.display());
            fs::write(target, content).map_err(|source| Error::WriteError {
                path: target.display().to_string(),
                source,
            })
        }
    }
}

fn create_dir_all(path: &Path) -> Result<()> {
    debug!("Creating directory: {}", path.display());
    fs::create_dir_all(path)
        .map_err(|source| Error::WriteError { path: path.display().to_string(), source })
}

fn read_file(path: &Path) -> Result<Vec<u8>> {
    fs::read(path).map_err(|source| Error::ReadError { path: path.display().to_string(), source })
}

fn is_vcs_dir(entry: &DirEntry) -> bool {
    entry.file_type().is_dir() && entry.file_name() == VCS_DIR
}

fn is_config_file(entry: &DirEntry) -> bool {
    !entry.file_type().is_dir() && entry.file_name() == CONFIG_FILE
}

/// A rendered relative path is usable only if it stays below the output root.
pub fn is_rendered_path_valid<P: AsRef<Path>>(rendered: P) -> bool {
    rendered.as_ref().components().all(|c| matches!(c, Component::Normal(_) | Component::CurDir))
}

/// Fails when `output_dir` is `template_dir` or lies inside it.
pub fn check_output_dir<P: AsRef<Path>, Q: AsRef<Path>>(
    template_dir: P,
    output_dir: Q,
) -> Result<()> {
    let template_dir = std::path::absolute(template_dir.as_ref())?;
    let output_dir = std::path::absolute(output_dir.as_ref())?;
    let template_dir = template_dir.canonicalize().unwrap_or(template_dir);
    let output_dir = resolve_existing_prefix(&output_dir);

    if output_dir.starts_with(&template_dir) {
        return Err(Error::OutputInsideTemplateError {
            output_dir: output_dir.display().to_string(),
            template_dir: template_dir.display().to_string(),
        });
    }
    Ok(())
}

// Canonicalizes the longest existing ancestor and re-attaches the rest.
fn resolve_existing_prefix(path: &Path) -> PathBuf {
    let mut existing = path.to_path_buf();
    let mut rest = Vec::new();
    while !existing.exists() {
        match (existing.file_name(), existing.parent()) {
            (Some(name), Some(parent)) => {
                rest.push(name.to_os_string());
                existing = parent.to_path_buf();
            }
            _ => return path.to_path_buf(),
        }
    }
    let mut resolved = existing.canonicalize().unwrap_or(existing);
    resolved.extend(rest.iter().rev());
    resolved
}

/// Renders a template tree into an output directory.
pub struct Processor<'a> {
    engine: &'a dyn TemplateRenderer,
    context: &'a RenderContext,
    template_root: &'a Path,
    output_root: &'a Path,
}

impl<'a> Processor<'a> {
    pub fn new(
        engine: &'a dyn TemplateRenderer,
        context: &'a RenderContext,
        template_root: &'a Path,
        output_root: &'a Path,
    ) -> Self {
        Self { engine, context, template_root, output_root }
    }

    /// Renders a path relative to the template root, one segment at a time.
    ///
    /// Each segment renders leniently on its own, so a segment that fails
    /// keeps its literal text while its rendered ancestors stay rendered.
    /// Non-UTF-8 segments and renderings that would leave the output root
    /// also fall back to the literal segment.
    pub fn render_path(&self, relative: &Path) -> PathBuf {
        relative
            .components()
            .map(|component| match component {
                Component::Normal(segment) => self.render_segment(relative, segment),
                other => PathBuf::from(other.as_os_str()),
            })
            .collect()
    }

    fn render_segment(&self, relative: &Path, segment: &OsStr) -> PathBuf {
        let Some(literal) = segment.to_str() else {
            warn!("Path segment '{}' is not valid UTF-8, using it unrendered.", segment.to_string_lossy());
            return PathBuf::from(segment);
        };

        let name = relative.to_string_lossy();
        let rendered = self.engine.render_lenient(&name, literal, self.context);
        if is_rendered_path_valid(&rendered) {
            PathBuf::from(rendered)
        } else {
            warn!("Segment '{literal}' of '{name}' renders to '{rendered}' outside the output directory, using it unrendered.");
            PathBuf::from(literal)
        }
    }

    /// Decides what to do with one template entry.
    ///
    /// Returns `None` for entries that produce no output.
    ///
    /// # Errors
    /// * `Error::ReadError` if a template file cannot be read
    /// * `Error::TemplateSyntaxError` / `Error::TemplateExecutionError` if
    ///   the file's contents fail to render
    pub fn process(&self, entry: &DirEntry) -> Result<Option<FileOperation>> {
        let path = entry.path();
        let relative = path.strip_prefix(self.template_root).unwrap_or(path);

        debug!("Processing source entry: {}", relative.display());

        let rendered_relative = self.render_path(relative);

        if entry.file_type().is_dir() {
            let target = self.output_root.join(rendered_relative);
            return Ok(Some(FileOperation::CreateDir { target }));
        }

        if is_config_file(entry) {
            debug!("Skipping configuration file: {}", relative.display());
            return Ok(None);
        }

        let raw = read_file(path)?;
        let content = match String::from_utf8(raw) {
            Ok(text) => {
                let name = relative.to_string_lossy();
                self.engine.render(&name, &text, self.context)?.into_bytes()
            }
            Err(e) => {
                debug!("Copying binary file: {}", relative.display());
                e.into_bytes()
            }
        };

        // The output path is rendered once more, on its own, after the contents.
        let target = self.output_root.join(self.render_path(&rendered_relative));
        Ok(Some(FileOperation::Write { target, content }))
    }

    /// Walks the template tree in sorted depth-first order, handing every
    /// operation to `apply` as soon as it is produced.
    ///
    /// Directories are yielded before their contents. The walk stops at the
    /// first error from the traversal, from rendering or from `apply`.
    pub fn walk<F>(&self, mut apply: F) -> Result<()>
    where
        F: FnMut(FileOperation) -> Result<()>,
    {
        let walker = WalkDir::new(self.template_root)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|entry| !is_vcs_dir(entry));

        for entry in walker {
            let entry = entry?;
            if let Some(operation) = self.process(&entry)? {
                apply(operation)?;
            }
        }
        Ok(())
    }

    /// Creates the output root and writes the rendered tree beneath it.
    ///
    /// Files written before a failure are left in place.
    pub fn materialize(&self) -> Result<()> {
        debug!("Processing template...");
        create_dir_all(self.output_root)?;

        self.walk(|operation| apply_operation(&operation))?;

        info!("Done!");
        Ok(())
    }
}
