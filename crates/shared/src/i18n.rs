//! Translation table lookup. Only English strings ship today; every other
//! language falls back to English key by key.

use crate::domain::{IncidentKind, Language};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MessageKey {
    GeolocationNotSupported,
    LocationUnavailable,
    LocationPermissionDenied,
    ReportSentConfirmation,
    AssistantGreeting,
    AssistantFailure,
    IncidentKind(IncidentKind),
}

#[derive(Debug, Clone, Copy)]
pub struct Translations {
    language: Language,
}

impl Translations {
    pub fn for_language(language: Language) -> Self {
        Self { language }
    }

    pub fn text(&self, key: MessageKey) -> &'static str {
        lookup(self.language, key).unwrap_or_else(|| english(key))
    }

    pub fn incident_kind(&self, kind: IncidentKind) -> &'static str {
        self.text(MessageKey::IncidentKind(kind))
    }
}

fn lookup(language: Language, key: MessageKey) -> Option<&'static str> {
    match language {
        Language::En => Some(english(key)),
        Language::Hi
        | Language::Ta
        | Language::Te
        | Language::Kn
        | Language::Ml
        | Language::Bn => None,
    }
}

fn english(key: MessageKey) -> &'static str {
    match key {
        MessageKey::GeolocationNotSupported => "Geolocation is not supported by your browser.",
        MessageKey::LocationUnavailable => {
            "Could not determine your location. Please enter it manually."
        }
        MessageKey::LocationPermissionDenied => {
            "Location access was denied. Please enable it in your browser settings or enter a location manually."
        }
        MessageKey::ReportSentConfirmation => "Report sent to mock authorities for review:",
        MessageKey::AssistantGreeting => {
            "Hello! I am your AI assistant. How can I help you prepare for a disaster?"
        }
        MessageKey::AssistantFailure => "Sorry, I encountered an error. Please try again.",
        MessageKey::IncidentKind(kind) => match kind {
            IncidentKind::Flood => "Flood",
            IncidentKind::Fire => "Fire",
            IncidentKind::Cyclone => "Cyclone",
            IncidentKind::Landslide => "Landslide",
            IncidentKind::Earthquake => "Earthquake",
            IncidentKind::Other => "Other",
        },
    }
}
