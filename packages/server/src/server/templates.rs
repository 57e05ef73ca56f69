//! HTML templates, compiled into the binary.

use anyhow::{Context, Result};
use minijinja::Environment;
use serde::Serialize;

const TEMPLATES: &[(&str, &str)] = &[
    ("layout.html", include_str!("../../templates/layout.html")),
    ("index.html", include_str!("../../templates/index.html")),
    ("urls.html", include_str!("../../templates/urls.html")),
    ("url.html", include_str!("../../templates/url.html")),
];

/// Static page for unknown routes and ids
pub const NOT_FOUND_PAGE: &str = include_str!("../../templates/404.html");

/// Static page for unexpected failures
pub const INTERNAL_ERROR_PAGE: &str = include_str!("../../templates/500.html");

/// Template environment shared by all handlers
///
/// `.html` templates are auto-escaped.
pub struct Templates {
    env: Environment<'static>,
}

impl Templates {
    pub fn new() -> Result<Self> {
        let mut env = Environment::new();
        for &(name, source) in TEMPLATES {
            env.add_template(name, source)
                .with_context(|| format!("Failed to load template {name}"))?;
        }
        Ok(Self { env })
    }

    /// Render `name` with `ctx`
    pub fn render<S: Serialize>(&self, name: &str, ctx: S) -> Result<String> {
        let template = self
            .env
            .get_template(name)
            .with_context(|| format!("Unknown template {name}"))?;
        template
            .render(ctx)
            .with_context(|| format!("Failed to render template {name}"))
    }
}
