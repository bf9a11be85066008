use thiserror::Error;

use crate::{
    domain::Language,
    i18n::{MessageKey, Translations},
};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HubError {
    #[error("Could not find coordinates for \"{0}\". Please try a different location.")]
    UnresolvedLocation(String),
    #[error("failed to load situational data: {0}")]
    DataFetch(String),
    #[error("failed to format report: {0}")]
    Format(String),
    #[error("geolocation is not supported on this device")]
    GeolocationUnsupported,
    #[error("geolocation permission denied")]
    GeolocationPermissionDenied,
    #[error("information service error: {0}")]
    Service(String),
}

impl HubError {
    /// The single string shown to the user for this failure.
    pub fn user_message(&self, language: Language) -> String {
        let translations = Translations::for_language(language);
        match self {
            Self::GeolocationUnsupported => translations
                .text(MessageKey::GeolocationNotSupported)
                .to_string(),
            Self::GeolocationPermissionDenied => translations
                .text(MessageKey::LocationPermissionDenied)
                .to_string(),
            other => other.to_string(),
        }
    }
}
