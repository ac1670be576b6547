//! Template rendering for cutter.
//! Paths and file contents share one MiniJinja grammar but differ in how
//! failures are handled: contents render strictly, paths render leniently.
use crate::context::RenderContext;
use crate::error::{Error, Result};
use cruet::Inflector;
use log::warn;
use minijinja::{AutoEscape, Environment, ErrorKind, UndefinedBehavior};

/// Trait for template rendering engines.
pub trait TemplateRenderer {
    /// Renders `template` strictly: parse and substitution failures are returned.
    ///
    /// # Arguments
    /// * `name` - Name reported in errors, usually the template entry's path
    /// * `template` - Template string to render
    /// * `context` - Context variables for rendering
    ///
    /// # Errors
    /// * `Error::TemplateSyntaxError` if the template does not parse
    /// * `Error::TemplateExecutionError` if substitution fails, e.g. on an
    ///   undefined variable
    fn render(&self, name: &str, template: &str, context: &RenderContext) -> Result<String>;

    /// Renders `template` leniently: on any error the literal input is returned.
    fn render_lenient(&self, name: &str, template: &str, context: &RenderContext) -> String {
        match self.render(name, template, context) {
            Ok(rendered) => rendered,
            Err(e) => {
                warn!("{e} Using '{template}' unrendered.");
                template.to_string()
            }
        }
    }
}

/// MiniJinja-based template rendering engine.
pub struct MiniJinjaRenderer {
    env: Environment<'static>,
}

impl MiniJinjaRenderer {
    /// Creates a renderer that rejects undefined variables, keeps trailing
    /// newlines and never escapes output.
    pub fn new() -> Self {
        let mut env = Environment::new();
        env.set_undefined_behavior(UndefinedBehavior::Strict);
        env.set_keep_trailing_newline(true);
        env.set_auto_escape_callback(|_: &str| AutoEscape::None);

        env.add_filter("snake_case", |value: String| value.to_snake_case());
        env.add_filter("kebab_case", |value: String| value.to_kebab_case());
        env.add_filter("camel_case", |value: String| value.to_camel_case());
        env.add_filter("pascal_case", |value: String| value.to_pascal_case());
        env.add_filter("title_case", |value: String| value.to_title_case());

        Self { env }
    }
}

impl Default for MiniJinjaRenderer {
    fn default() -> Self {
        MiniJinjaRenderer::new()
    }
}

impl TemplateRenderer for MiniJinjaRenderer {
    fn render(&self, name: &str, template: &str, context: &RenderContext) -> Result<String> {
        self.env.render_named_str(name, template, context.as_value()).map_err(|source| {
            let template = name.to_string();
            if matches!(source.kind(), ErrorKind::SyntaxError | ErrorKind::BadEscape) {
                Error::TemplateSyntaxError { template, source }
            } else {
                Error::TemplateExecutionError { template, source }
            }
        })
    }
}
