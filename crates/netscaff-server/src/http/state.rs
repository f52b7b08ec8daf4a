//! Application state shared across all API handlers.

use std::sync::Arc;
use std::time::{Duration, Instant};

use netscaff_adapters::{
    DotnetCli, HandlebarsRenderer, LocalFilesystem, ScriptedSdk, TemplateCache, TemplateSources,
    ZipArchiver,
};
use netscaff_core::application::{ScaffoldService, SdkService, ports::SdkCli};

use crate::config::AppConfig;

/// Cheap to clone; every request builds its own services over the shared
/// template cache.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    templates: Arc<TemplateCache>,
    /// Use the scripted SDK instead of spawning `dotnet`.
    offline: bool,
    /// Server start time for uptime calculation.
    pub start_time: Instant,
}

impl AppState {
    pub fn new(config: AppConfig, offline: bool) -> Self {
        let templates = match &config.templates.local_path {
            Some(dir) => Arc::new(TemplateCache::new(TemplateSources::with_override_dir(dir))),
            None => TemplateCache::shared(),
        };

        Self {
            config: Arc::new(config),
            templates,
            offline,
            start_time: Instant::now(),
        }
    }

    pub fn scaffold_service(&self) -> ScaffoldService {
        ScaffoldService::new(
            Box::new(LocalFilesystem::new()),
            Box::new(HandlebarsRenderer::with_cache(self.templates.clone())),
            self.sdk(),
            Box::new(ZipArchiver::new()),
        )
    }

    pub fn sdk_service(&self) -> SdkService {
        SdkService::new(self.sdk())
    }

    pub fn is_offline(&self) -> bool {
        self.offline
    }

    pub fn cleanup_delay(&self) -> Duration {
        Duration::from_secs(self.config.workspace.cleanup_delay_secs)
    }

    /// Get server uptime in seconds.
    pub fn uptime_seconds(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }

    fn sdk(&self) -> Box<dyn SdkCli> {
        if self.offline {
            Box::new(ScriptedSdk::new(LocalFilesystem::new()))
        } else {
            Box::new(DotnetCli::new(self.config.sdk.executable.clone()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_templates_use_the_process_cache() {
        let state = AppState::new(AppConfig::default(), true);
        assert!(Arc::ptr_eq(&state.templates, &TemplateCache::shared()));
    }

    #[test]
    fn local_templates_get_a_private_cache() {
        let mut config = AppConfig::default();
        config.templates.local_path = Some("/opt/netscaff/templates".into());

        let state = AppState::new(config, false);

        assert!(!Arc::ptr_eq(&state.templates, &TemplateCache::shared()));
        assert_eq!(
            state.templates.sources().override_dir(),
            Some(std::path::Path::new("/opt/netscaff/templates"))
        );
    }

    #[test]
    fn cleanup_delay_comes_from_config() {
        let mut config = AppConfig::default();
        config.workspace.cleanup_delay_secs = 5;
        assert_eq!(AppState::new(config, true).cleanup_delay(), Duration::from_secs(5));
    }
}
