//! Generation orchestration.
//!
//! One generation request: read the active template and provider
//! configuration, build the prompt, call the provider once (synchronously
//! from the caller's perspective), persist the outcome, return the record.
//! A provider failure surfaces as a typed error and persists nothing.

use std::sync::Arc;
use std::time::Instant;

use chrono::Utc;
use thiserror::Error;

use super::prompt::build_prompt;
use crate::domain::{GenerationId, GenerationRecord, IssueDetails};
use crate::ports::{
    GenerationStore, ProviderError, ProviderFactory, SettingsStore, StoreError, TemplateSource,
};

/// Orchestrates one test-plan generation per call.
pub struct GenerationService {
    settings: Arc<dyn SettingsStore>,
    generations: Arc<dyn GenerationStore>,
    templates: Arc<dyn TemplateSource>,
    providers: Arc<dyn ProviderFactory>,
}

impl GenerationService {
    pub fn new(
        settings: Arc<dyn SettingsStore>,
        generations: Arc<dyn GenerationStore>,
        templates: Arc<dyn TemplateSource>,
        providers: Arc<dyn ProviderFactory>,
    ) -> Self {
        Self {
            settings,
            generations,
            templates,
            providers,
        }
    }

    /// Generate and persist a test plan for `issue`.
    pub async fn generate(&self, issue: &IssueDetails) -> Result<GenerationRecord, GenerationError> {
        let provider_config = self
            .settings
            .load_provider()
            .await?
            .ok_or(GenerationError::ProviderNotConfigured)?;

        let provider = self.providers.create(&provider_config)?;

        // Template text is optional; absence falls back to the default hint
        // inside the prompt builder.
        let template_text = match self.settings.load_template().await? {
            Some(template) => self.templates.load_text(&template.file_path).await,
            None => None,
        };

        let prompt = build_prompt(issue, template_text.as_deref());

        let started = Instant::now();
        let content = provider.generate(&prompt).await.map_err(|e| {
            tracing::error!(error = %e, issue = %issue.key, "generation failed");
            GenerationError::Provider(e)
        })?;
        let generation_seconds = round2(started.elapsed().as_secs_f64());

        let record = GenerationRecord {
            id: GenerationId::new(),
            source_issue_id: issue.key.clone(),
            source_summary: issue.summary.clone(),
            generated_content: content,
            provider_used: provider.name().to_string(),
            generation_seconds,
            created_at: Utc::now(),
        };

        self.generations.insert(&record).await?;
        tracing::info!(
            id = %record.id,
            issue = %record.source_issue_id,
            provider = %record.provider_used,
            seconds = record.generation_seconds,
            "test plan generated"
        );

        Ok(record)
    }
}

/// Failures of the generation flow.
#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("language-model provider is not configured")]
    ProviderNotConfigured,

    #[error(transparent)]
    Provider(#[from] ProviderError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Wall-clock seconds rounded to two decimal places.
fn round2(seconds: f64) -> f64 {
    (seconds * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round2_rounds_to_two_decimals() {
        assert_eq!(round2(1.2345), 1.23);
        assert_eq!(round2(1.235), 1.24);
        assert_eq!(round2(0.0), 0.0);
    }
}
