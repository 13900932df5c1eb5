//! HTML rendering of the dashboard.

use tera::{Context, Tera};
use thiserror::Error;

pub mod view;

pub use view::{DashboardInput, DashboardView};

const TEMPLATE_NAME: &str = "dashboard.html";
const TEMPLATE: &str = include_str!("../../templates/dashboard.html");

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("template error: {0}")]
    Template(#[from] tera::Error),
}

pub type RenderResult<T> = Result<T, RenderError>;

/// Owns the compiled dashboard template. Autoescaping is on, so every
/// string coming from an external source is HTML-escaped.
pub struct Renderer {
    tera: Tera,
}

impl Renderer {
    pub fn new() -> RenderResult<Self> {
        let mut tera = Tera::default();
        tera.add_raw_template(TEMPLATE_NAME, TEMPLATE)?;
        Ok(Self { tera })
    }

    pub fn render(&self, view: &DashboardView) -> RenderResult<String> {
        let mut context = Context::from_serialize(view)?;
        context.insert("HAS_NEWS", &view.has_news());
        Ok(self.tera.render(TEMPLATE_NAME, &context)?)
    }
}
