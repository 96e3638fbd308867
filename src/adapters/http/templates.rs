use std::sync::Arc;
use tera::Tera;

/// Template engine wrapper for rendering HTML templates
#[derive(Clone)]
pub struct TemplateEngine {
  tera: Arc<Tera>,
}

impl TemplateEngine {
  /// Loads every `templates/**/*.html.tera` with HTML autoescaping
  pub fn new() -> Result<Self, tera::Error> {
    let mut tera = Tera::new("templates/**/*.html.tera")?;
    tera.autoescape_on(vec!["html.tera", ".html"]);

    Ok(Self {
      tera: Arc::new(tera),
    })
  }

  pub fn render(&self, template: &str, context: &tera::Context) -> Result<String, tera::Error> {
    self.tera.render(template, context)
  }
}
