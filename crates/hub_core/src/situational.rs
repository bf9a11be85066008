use std::sync::Arc;

use info_service::InformationService;
use shared::{
    domain::{Language, LocationQuery},
    error::HubError,
    protocol::SituationalData,
};
use tracing::debug;

use crate::prompts;

/// Fetches a fresh alerts/updates/resources snapshot. Results are never merged
/// with earlier snapshots, and an unparsable answer is an error, not an empty
/// snapshot.
#[derive(Clone)]
pub struct SituationalDataFetcher {
    service: Arc<dyn InformationService>,
}

impl SituationalDataFetcher {
    pub fn new(service: Arc<dyn InformationService>) -> Self {
        Self { service }
    }

    pub async fn fetch(
        &self,
        location: &LocationQuery,
        language: Language,
    ) -> Result<SituationalData, HubError> {
        let text = self
            .service
            .generate(prompts::situational_data(location, language))
            .await
            .map_err(|err| HubError::DataFetch(err.to_string()))?;

        let data: SituationalData = serde_json::from_str(text.trim())
            .map_err(|err| HubError::DataFetch(format!("malformed response: {err}")))?;

        debug!(
            "situational: snapshot parsed alerts={} updates={} resources={}",
            data.alerts.len(),
            data.updates.len(),
            data.resources.len()
        );
        Ok(data)
    }
}
