//! Template loading for cutter.
//! Resolves a template argument to a local directory, cloning git
//! repositories into a temporary checkout first.
use crate::error::{Error, Result};
use log::debug;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use url::Url;

/// Represents the source location of a template.
#[derive(Debug, PartialEq, Eq)]
pub enum TemplateSource {
    /// Local filesystem template path
    FileSystem(PathBuf),
    /// Git repository URL (HTTPS or SSH)
    Git(String),
}

impl std::fmt::Display for TemplateSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TemplateSource::FileSystem(path) => {
                write!(f, "local path: '{}'", path.display())
            }
            TemplateSource::Git(repo) => write!(f, "git repository: '{repo}'"),
        }
    }
}

impl TemplateSource {
    /// Classifies a template argument as a git repository or a local path.
    pub fn from_string(s: &str) -> Self {
        if let Ok(url) = Url::parse(s) {
            if url.scheme() == "https" || url.scheme() == "git" {
                return Self::Git(s.to_string());
            }
        }

        if s.starts_with("git@") {
            return Self::Git(s.to_string());
        }

        Self::FileSystem(PathBuf::from(s))
    }

    /// Base name used for the default output directory.
    pub fn name(&self) -> String {
        match self {
            TemplateSource::FileSystem(path) => {
                let path = std::path::absolute(path).unwrap_or_else(|_| path.clone());
                // `absolute` keeps `.` and `..`, so normalize through canonicalize when possible.
                let path = path.canonicalize().unwrap_or(path);
                path.file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_else(|| "template".to_string())
            }
            TemplateSource::Git(repo) => repo_name(repo),
        }
    }
}

/// Last path segment of a repository URL, without a trailing `/` or `.git`.
pub fn repo_name(repo: &str) -> String {
    let trimmed = repo.trim_end_matches('/');
    let last = trimmed.rsplit(['/', ':']).next().unwrap_or(trimmed);
    let name = last.trim_end_matches(".git");
    if name.is_empty() {
        "template".to_string()
    } else {
        name.to_string()
    }
}

/// A template ready to be rendered.
#[derive(Debug)]
pub struct LoadedTemplate {
    /// Directory holding `cookiecutter.json`
    pub root: PathBuf,
    /// Base name of the template source
    pub name: String,
    // Keeps a cloned checkout alive until the template is dropped.
    _checkout: Option<TempDir>,
}

/// Trait for loading templates from different sources.
pub trait TemplateLoader {
    fn load(&self) -> Result<LoadedTemplate>;
}

/// Loader for templates from the local filesystem.
pub struct LocalLoader<P: AsRef<Path>> {
    path: P,
}

impl<P: AsRef<Path>> LocalLoader<P> {
    pub fn new(path: P) -> Self {
        Self { path }
    }
}

impl<P: AsRef<Path>> TemplateLoader for LocalLoader<P> {
    /// # Errors
    /// * `Error::TemplateDoesNotExistsError` if the path does not exist
    fn load(&self) -> Result<LoadedTemplate> {
        let path = self.path.as_ref();
        if !path.exists() {
            return Err(Error::TemplateDoesNotExistsError {
                template_dir: path.display().to_string(),
            });
        }

        Ok(LoadedTemplate {
            root: path.to_path_buf(),
            name: TemplateSource::FileSystem(path.to_path_buf()).name(),
            _checkout: None,
        })
    }
}

/// Loader for templates from git repositories.
pub struct GitLoader<S: AsRef<str>> {
    repo: S,
}

impl<S: AsRef<str>> GitLoader<S> {
    pub fn new(repo: S) -> Self {
        Self { repo }
    }
}

impl<S: AsRef<str>> TemplateLoader for GitLoader<S> {
    /// Clones the repository into a temporary directory.
    ///
    /// # Errors
    /// * `Error::Git2Error` if the clone fails
    fn load(&self) -> Result<LoadedTemplate> {
        let repo_url = self.repo.as_ref();
        let name = repo_name(repo_url);
        let checkout = tempfile::Builder::new().prefix("cutter-").tempdir()?;
        let clone_path = checkout.path().join(&name);

        debug!("Cloning repository '{}' to '{}'.", repo_url, clone_path.display());

        let mut callbacks = git2::RemoteCallbacks::new();
        callbacks.credentials(|_url, username_from_url, _allowed_types| {
            git2::Cred::ssh_key_from_agent(username_from_url.unwrap_or("git"))
        });

        let mut fetch_opts = git2::FetchOptions::new();
        fetch_opts.remote_callbacks(callbacks);

        let mut builder = git2::build::RepoBuilder::new();
        builder.fetch_options(fetch_opts);
        builder.clone(repo_url, &clone_path)?;

        Ok(LoadedTemplate { root: clone_path, name, _checkout: Some(checkout) })
    }
}

/// Returns the template directory for the provided template argument.
pub fn load_template<S: AsRef<str>>(template: S) -> Result<LoadedTemplate> {
    let template_source = TemplateSource::from_string(template.as_ref());

    println!("Using template from the {template_source}");

    let loader: Box<dyn TemplateLoader> = match template_source {
        TemplateSource::Git(repo) => Box::new(GitLoader::new(repo)),
        TemplateSource::FileSystem(path) => Box::new(LocalLoader::new(path)),
    };

    loader.load()
}
