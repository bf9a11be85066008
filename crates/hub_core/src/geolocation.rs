use async_trait::async_trait;
use shared::{domain::Coordinates, error::HubError};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GeolocationError {
    #[error("geolocation is not supported")]
    Unsupported,
    #[error("geolocation permission denied")]
    PermissionDenied,
}

impl From<GeolocationError> for HubError {
    fn from(value: GeolocationError) -> Self {
        match value {
            GeolocationError::Unsupported => HubError::GeolocationUnsupported,
            GeolocationError::PermissionDenied => HubError::GeolocationPermissionDenied,
        }
    }
}

/// One-shot device position request; no continuous tracking.
#[async_trait]
pub trait GeolocationProvider: Send + Sync {
    fn is_supported(&self) -> bool {
        true
    }

    async fn current_position(&self) -> Result<Coordinates, GeolocationError>;
}

pub struct MissingGeolocation;

#[async_trait]
impl GeolocationProvider for MissingGeolocation {
    fn is_supported(&self) -> bool {
        false
    }

    async fn current_position(&self) -> Result<Coordinates, GeolocationError> {
        Err(GeolocationError::Unsupported)
    }
}

/// A device that always reports the same position, e.g. from command-line flags.
pub struct FixedGeolocation(pub Coordinates);

#[async_trait]
impl GeolocationProvider for FixedGeolocation {
    async fn current_position(&self) -> Result<Coordinates, GeolocationError> {
        Ok(self.0)
    }
}

pub struct DeniedGeolocation;

#[async_trait]
impl GeolocationProvider for DeniedGeolocation {
    async fn current_position(&self) -> Result<Coordinates, GeolocationError> {
        Err(GeolocationError::PermissionDenied)
    }
}
