use std::sync::Arc;

use info_service::InformationService;
use shared::{
    domain::{IncidentDraft, Language},
    error::HubError,
};

use crate::prompts;

#[derive(Clone)]
pub struct IncidentReportFormatter {
    service: Arc<dyn InformationService>,
}

impl IncidentReportFormatter {
    pub fn new(service: Arc<dyn InformationService>) -> Self {
        Self { service }
    }

    /// Authority-facing rewrite of a report. Failures are advisory only.
    pub async fn format(&self, draft: &IncidentDraft, language: Language) -> Result<String, HubError> {
        let text = self
            .service
            .generate(prompts::format_report(draft, language))
            .await
            .map_err(|err| HubError::Format(err.to_string()))?;

        let message = text.trim();
        if message.is_empty() {
            return Err(HubError::Format("empty response".to_string()));
        }
        Ok(message.to_string())
    }
}
