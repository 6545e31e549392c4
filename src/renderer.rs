//! Template renderer for file contents.
//! Generated files are source code, so HTML auto-escaping is always off.
use crate::error::{Error, Result};
use minijinja::{AutoEscape, Environment};

/// Trait for template rendering engines.
pub trait TemplateRenderer {
    /// Renders a template string with the given context.
    ///
    /// # Arguments
    /// * `template` - Template string to render
    /// * `context` - Context variables for rendering
    ///
    /// # Returns
    /// * `Result<String>` - Rendered template string
    fn render(&self, template: &str, context: &serde_json::Value) -> Result<String>;
}

/// MiniJinja-based template rendering engine.
pub struct MiniJinjaRenderer {
    /// MiniJinja environment instance
    env: Environment<'static>,
}

impl MiniJinjaRenderer {
    /// Creates a renderer that never escapes output and keeps trailing newlines.
    pub fn new() -> Self {
        let mut env = Environment::new();
        env.set_auto_escape_callback(|_| AutoEscape::None);
        env.set_keep_trailing_newline(true);
        Self { env }
    }
}

impl Default for MiniJinjaRenderer {
    fn default() -> Self {
        MiniJinjaRenderer::new()
    }
}

impl TemplateRenderer for MiniJinjaRenderer {
    /// Renders a template string using MiniJinja.
    ///
    /// # Errors
    /// * `Error::MinijinjaError` if the template fails to parse or render
    fn render(&self, template: &str, context: &serde_json::Value) -> Result<String> {
        self.env.render_str(template, context).map_err(Error::MinijinjaError)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_markup_is_not_escaped() {
        let renderer = MiniJinjaRenderer::new();
        let context = json!({"ComponentName": "Button", "attr": "x&y"});
        let out = renderer.render("<{{ ComponentName }} a=\"{{ attr }}\" />", &context).unwrap();
        assert_eq!(out, "<Button a=\"x&y\" />");
    }

    #[test]
    fn test_trailing_newline_is_kept() {
        let renderer = MiniJinjaRenderer::new();
        let out = renderer.render("export {};\n", &json!({})).unwrap();
        assert_eq!(out, "export {};\n");
    }
}
