use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lon: f64,
}

impl Coordinates {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// The geocoder answers `(0, 0)` when it cannot place an address.
    pub fn is_not_found_sentinel(&self) -> bool {
        self.lat == 0.0 && self.lon == 0.0
    }

    pub fn is_finite(&self) -> bool {
        self.lat.is_finite() && self.lon.is_finite()
    }

    /// Renderable `"lat,lon"` form understood by the map viewer.
    pub fn map_target(&self) -> String {
        format!("{},{}", self.lat, self.lon)
    }
}

impl fmt::Display for Coordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "latitude {}, longitude {}", self.lat, self.lon)
    }
}

/// A location as the user supplied it: free text or a device position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum LocationQuery {
    Address(String),
    Coordinates(Coordinates),
}

impl LocationQuery {
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Address(address) => address.is_empty(),
            Self::Coordinates(_) => false,
        }
    }

    pub fn map_target(&self) -> String {
        match self {
            Self::Address(address) => address.clone(),
            Self::Coordinates(coordinates) => coordinates.map_target(),
        }
    }
}

impl From<&str> for LocationQuery {
    fn from(value: &str) -> Self {
        Self::Address(value.to_string())
    }
}

impl From<String> for LocationQuery {
    fn from(value: String) -> Self {
        Self::Address(value)
    }
}

impl From<Coordinates> for LocationQuery {
    fn from(value: Coordinates) -> Self {
        Self::Coordinates(value)
    }
}

impl fmt::Display for LocationQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Address(address) => f.write_str(address),
            Self::Coordinates(coordinates) => coordinates.fmt(f),
        }
    }
}

/// Both coordinates and a human-readable address; never partially filled.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedLocation {
    pub coordinates: Coordinates,
    pub display_address: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Language {
    #[default]
    En,
    Hi,
    Ta,
    Te,
    Kn,
    Ml,
    Bn,
}

impl Language {
    pub const ALL: [Language; 7] = [
        Language::En,
        Language::Hi,
        Language::Ta,
        Language::Te,
        Language::Kn,
        Language::Ml,
        Language::Bn,
    ];

    pub fn code(&self) -> &'static str {
        match self {
            Self::En => "en",
            Self::Hi => "hi",
            Self::Ta => "ta",
            Self::Te => "te",
            Self::Kn => "kn",
            Self::Ml => "ml",
            Self::Bn => "bn",
        }
    }

    /// English name, used when asking the information service to answer in this language.
    pub fn name(&self) -> &'static str {
        match self {
            Self::En => "English",
            Self::Hi => "Hindi",
            Self::Ta => "Tamil",
            Self::Te => "Telugu",
            Self::Kn => "Kannada",
            Self::Ml => "Malayalam",
            Self::Bn => "Bengali",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        let code = code.trim().to_ascii_lowercase();
        Self::ALL.into_iter().find(|language| language.code() == code)
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IncidentKind {
    #[default]
    Flood,
    Fire,
    Cyclone,
    Landslide,
    Earthquake,
    Other,
}

impl IncidentKind {
    pub const ALL: [IncidentKind; 6] = [
        IncidentKind::Flood,
        IncidentKind::Fire,
        IncidentKind::Cyclone,
        IncidentKind::Landslide,
        IncidentKind::Earthquake,
        IncidentKind::Other,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            Self::Flood => "flood",
            Self::Fire => "fire",
            Self::Cyclone => "cyclone",
            Self::Landslide => "landslide",
            Self::Earthquake => "earthquake",
            Self::Other => "other",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        let key = key.trim().to_ascii_lowercase();
        Self::ALL.into_iter().find(|kind| kind.key() == key)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IncidentId(pub String);

impl fmt::Display for IncidentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A report as handed over by the report modal, before coordinates are settled.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IncidentDraft {
    pub kind: IncidentKind,
    pub description: String,
    pub location: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coordinates: Option<Coordinates>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportedIncident {
    pub id: IncidentId,
    pub kind: IncidentKind,
    pub description: String,
    pub location: String,
    pub lat: f64,
    pub lon: f64,
}

impl ReportedIncident {
    pub fn coordinates(&self) -> Coordinates {
        Coordinates::new(self.lat, self.lon)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChatRole {
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub text: String,
}

impl ChatMessage {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: ChatRole::User,
            text: text.into(),
        }
    }

    pub fn assistant(text: impl Into<String>) -> Self {
        Self {
            role: ChatRole::Assistant,
            text: text.into(),
        }
    }
}
