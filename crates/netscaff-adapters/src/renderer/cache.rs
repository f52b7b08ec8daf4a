//! Compiled template cache.
//!
//! Templates are compiled on first use and kept for the life of the cache.
//! Reads share a lock; only a first compilation takes the write lock.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, OnceLock, RwLock, RwLockReadGuard, RwLockWriteGuard};

use handlebars::{Handlebars, RenderErrorReason};
use serde_json::Value;
use tracing::{debug, instrument};

use netscaff_core::{
    application::ApplicationError,
    domain::TemplateKey,
    error::ScaffResult,
};

use crate::builtin_templates::TemplateSources;

const LOCK_NAME: &str = "template cache";

/// Lazily compiled templates keyed by [`TemplateKey::path`].
pub struct TemplateCache {
    sources: TemplateSources,
    registry: RwLock<Handlebars<'static>>,
    compilations: AtomicUsize,
}

impl TemplateCache {
    pub fn new(sources: TemplateSources) -> Self {
        let mut registry = Handlebars::new();
        // C# is not HTML: `List<string>` must come out verbatim.
        registry.register_escape_fn(handlebars::no_escape);
        registry.set_strict_mode(true);

        Self {
            sources,
            registry: RwLock::new(registry),
            compilations: AtomicUsize::new(0),
        }
    }

    /// Process-wide cache over the built-in sources.
    pub fn shared() -> Arc<Self> {
        static SHARED: OnceLock<Arc<TemplateCache>> = OnceLock::new();
        SHARED
            .get_or_init(|| Arc::new(Self::new(TemplateSources::builtin())))
            .clone()
    }

    pub fn sources(&self) -> &TemplateSources {
        &self.sources
    }

    /// Number of templates compiled so far.
    pub fn compilations(&self) -> usize {
        self.compilations.load(Ordering::Relaxed)
    }

    pub fn is_compiled(&self, key: TemplateKey) -> ScaffResult<bool> {
        Ok(self.read()?.has_template(key.path()))
    }

    #[instrument(skip(self, data), fields(template = %key))]
    pub fn render(&self, key: TemplateKey, data: &Value) -> ScaffResult<String> {
        self.ensure_compiled(key)?;

        self.read()?
            .render(key.path(), data)
            .map_err(|e| match e.reason() {
                RenderErrorReason::TemplateNotFound(name) => ApplicationError::TemplateNotFound {
                    key: name.clone(),
                },
                _ => ApplicationError::RenderingFailed {
                    template: key.path().to_string(),
                    reason: e.to_string(),
                },
            }
            .into())
    }

    fn ensure_compiled(&self, key: TemplateKey) -> ScaffResult<()> {
        if self.read()?.has_template(key.path()) {
            return Ok(());
        }

        let mut registry = self.write()?;
        // Another thread may have compiled it between the two locks.
        if registry.has_template(key.path()) {
            return Ok(());
        }

        let source = self.sources.source(key)?;
        registry
            .register_template_string(key.path(), source.as_ref())
            .map_err(|e| ApplicationError::RenderingFailed {
                template: key.path().to_string(),
                reason: e.to_string(),
            })?;
        self.compilations.fetch_add(1, Ordering::Relaxed);
        debug!(template = %key, "Compiled template");
        Ok(())
    }

    fn read(&self) -> ScaffResult<RwLockReadGuard<'_, Handlebars<'static>>> {
        self.registry.read().map_err(|_| {
            ApplicationError::LockPoisoned {
                resource: LOCK_NAME,
            }
            .into()
        })
    }

    fn write(&self) -> ScaffResult<RwLockWriteGuard<'_, Handlebars<'static>>> {
        self.registry.write().map_err(|_| {
            ApplicationError::LockPoisoned {
                resource: LOCK_NAME,
            }
            .into()
        })
    }
}

impl std::fmt::Debug for TemplateCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TemplateCache")
            .field("sources", &self.sources)
            .field("compilations", &self.compilations())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use std::thread;

    use serde_json::json;

    use super::*;
    use netscaff_core::error::ErrorCategory;

    #[test]
    fn compiles_each_template_once() {
        let cache = TemplateCache::new(TemplateSources::builtin());
        let data = json!({ "commonNamespace": "Shop.Domain.Common" });

        assert!(!cache.is_compiled(TemplateKey::BaseEntity).unwrap());
        let first = cache.render(TemplateKey::BaseEntity, &data).unwrap();
        let second = cache.render(TemplateKey::BaseEntity, &data).unwrap();

        assert_eq!(first, second);
        assert!(first.contains("namespace Shop.Domain.Common;"));
        assert_eq!(cache.compilations(), 1);
        assert!(cache.is_compiled(TemplateKey::BaseEntity).unwrap());
    }

    #[test]
    fn concurrent_first_use_compiles_once() {
        let cache = Arc::new(TemplateCache::new(TemplateSources::builtin()));
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let cache = Arc::clone(&cache);
                thread::spawn(move || {
                    cache
                        .render(
                            TemplateKey::BaseEntity,
                            &json!({ "commonNamespace": "A.Domain.Common" }),
                        )
                        .unwrap()
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }
        assert_eq!(cache.compilations(), 1);
    }

    #[test]
    fn missing_field_fails_in_strict_mode() {
        let cache = TemplateCache::new(TemplateSources::builtin());

        let err = cache.render(TemplateKey::BaseEntity, &json!({})).unwrap_err();

        assert_eq!(err.category(), ErrorCategory::Internal);
        assert!(err.user_message().contains("domain/base_entity.cs.hbs"));
    }

    #[test]
    fn broken_override_is_a_rendering_failure() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(TemplateKey::Program.path());
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, "{{#if project}}unterminated").unwrap();
        let cache = TemplateCache::new(TemplateSources::with_override_dir(dir.path()));

        let err = cache
            .render(TemplateKey::Program, &json!({ "project": "Shop" }))
            .unwrap_err();

        assert!(err.user_message().starts_with("Rendering api/program.cs.hbs failed"));
        assert_eq!(cache.compilations(), 0);
    }
}
