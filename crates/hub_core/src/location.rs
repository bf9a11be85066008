use std::sync::Arc;

use info_service::InformationService;
use shared::{
    domain::{Coordinates, LocationQuery, ResolvedLocation},
    error::HubError,
};
use tracing::debug;

use crate::prompts;

/// Geocoding through the information service. Holds no state of its own and
/// never retries; callers reissue on failure.
#[derive(Clone)]
pub struct LocationResolver {
    service: Arc<dyn InformationService>,
}

impl LocationResolver {
    pub fn new(service: Arc<dyn InformationService>) -> Self {
        Self { service }
    }

    pub async fn geocode(&self, address: &str) -> Result<Coordinates, HubError> {
        let text = self
            .service
            .generate(prompts::geocode(address))
            .await
            .map_err(|err| HubError::Service(err.to_string()))?;

        let coordinates: Coordinates = serde_json::from_str(text.trim())
            .map_err(|err| HubError::Service(format!("malformed geocode response: {err}")))?;

        if coordinates.is_not_found_sentinel() || !coordinates.is_finite() {
            return Err(HubError::UnresolvedLocation(address.to_string()));
        }

        debug!(
            "location: geocoded address={address} lat={} lon={}",
            coordinates.lat, coordinates.lon
        );
        Ok(coordinates)
    }

    /// Best effort: whatever the service answers, trimmed.
    pub async fn reverse_geocode(&self, coordinates: Coordinates) -> Result<String, HubError> {
        let text = self
            .service
            .generate(prompts::reverse_geocode(coordinates))
            .await
            .map_err(|err| HubError::Service(err.to_string()))?;
        Ok(text.trim().to_string())
    }

    /// Reduce a query to coordinates plus a display address, failing as a unit.
    pub async fn resolve(&self, query: &LocationQuery) -> Result<ResolvedLocation, HubError> {
        match query {
            LocationQuery::Address(address) => {
                let display_address = address.trim();
                if display_address.is_empty() {
                    return Err(HubError::UnresolvedLocation(address.clone()));
                }
                let coordinates = self.geocode(display_address).await?;
                Ok(ResolvedLocation {
                    coordinates,
                    display_address: display_address.to_string(),
                })
            }
            LocationQuery::Coordinates(coordinates) => {
                let display_address = self.reverse_geocode(*coordinates).await?;
                if display_address.is_empty() {
                    return Err(HubError::UnresolvedLocation(coordinates.map_target()));
                }
                Ok(ResolvedLocation {
                    coordinates: *coordinates,
                    display_address,
                })
            }
        }
    }
}
