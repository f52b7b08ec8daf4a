//! [`TemplateRenderer`] backed by Handlebars.

use std::sync::Arc;

use serde_json::Value;

use netscaff_core::{
    application::ports::TemplateRenderer,
    domain::TemplateKey,
    error::ScaffResult,
};

use super::TemplateCache;
use crate::builtin_templates::TemplateSources;

/// Renders through a shared [`TemplateCache`].
#[derive(Debug, Clone)]
pub struct HandlebarsRenderer {
    cache: Arc<TemplateCache>,
}

impl HandlebarsRenderer {
    /// Renderer over the process-wide built-in cache.
    pub fn new() -> Self {
        Self {
            cache: TemplateCache::shared(),
        }
    }

    /// Renderer with its own cache over `sources`.
    pub fn with_sources(sources: TemplateSources) -> Self {
        Self::with_cache(Arc::new(TemplateCache::new(sources)))
    }

    pub fn with_cache(cache: Arc<TemplateCache>) -> Self {
        Self { cache }
    }

    pub fn cache(&self) -> &Arc<TemplateCache> {
        &self.cache
    }
}

impl Default for HandlebarsRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl TemplateRenderer for HandlebarsRenderer {
    fn render(&self, key: TemplateKey, data: &Value) -> ScaffResult<String> {
        self.cache.render(key, data)
    }
}
