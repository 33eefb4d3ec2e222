//! Shared handler state.

use std::sync::Arc;

use crate::application::GenerationService;
use crate::ports::{
    DocumentExporter, GenerationStore, ProviderFactory, SettingsStore, TemplateSource,
    TrackerFactory,
};

/// Everything the HTTP handlers reach for, behind the port traits so the
/// same router serves production adapters and in-memory test doubles.
#[derive(Clone)]
pub struct AppState {
    pub settings: Arc<dyn SettingsStore>,
    pub generations: Arc<dyn GenerationStore>,
    pub templates: Arc<dyn TemplateSource>,
    pub exporter: Arc<dyn DocumentExporter>,
    pub providers: Arc<dyn ProviderFactory>,
    pub trackers: Arc<dyn TrackerFactory>,
    pub generation: Arc<GenerationService>,
}

impl AppState {
    pub fn new(
        settings: Arc<dyn SettingsStore>,
        generations: Arc<dyn GenerationStore>,
        templates: Arc<dyn TemplateSource>,
        exporter: Arc<dyn DocumentExporter>,
        providers: Arc<dyn ProviderFactory>,
        trackers: Arc<dyn TrackerFactory>,
    ) -> Self {
        let generation = Arc::new(GenerationService::new(
            settings.clone(),
            generations.clone(),
            templates.clone(),
            providers.clone(),
        ));
        Self {
            settings,
            generations,
            templates,
            exporter,
            providers,
            trackers,
            generation,
        }
    }
}
