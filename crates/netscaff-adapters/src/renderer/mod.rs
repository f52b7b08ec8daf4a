//! Template rendering.

mod cache;
mod handlebars;

pub use cache::TemplateCache;
pub use handlebars::HandlebarsRenderer;
