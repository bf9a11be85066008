//! Prompt text and response schemas sent to the information service.

use serde_json::{json, Value};
use shared::{
    domain::{ChatMessage, ChatRole, Coordinates, IncidentDraft, Language, LocationQuery},
    i18n::Translations,
    protocol::GenerateRequest,
};

pub const ASSISTANT_SYSTEM_INSTRUCTION: &str = "You are a helpful assistant specializing in disaster preparedness. \
Give concise, actionable advice and format answers with markdown lists where it helps.";

pub fn geocode(address: &str) -> GenerateRequest {
    GenerateRequest::json(
        format!(
            "Give the latitude and longitude of this address: \"{address}\". \
Answer as JSON like {{\"lat\": 19.0760, \"lon\": 72.8777}}. \
If the place cannot be found, answer {{\"lat\": 0, \"lon\": 0}}."
        ),
        coordinates_schema(),
    )
}

pub fn reverse_geocode(coordinates: Coordinates) -> GenerateRequest {
    GenerateRequest::text(format!(
        "Give a simple, common street address for latitude {} and longitude {}. \
Answer with the address only.",
        coordinates.lat, coordinates.lon
    ))
}

pub fn situational_data(location: &LocationQuery, language: Language) -> GenerateRequest {
    GenerateRequest::json(
        format!(
            "Generate mock disaster-related community information for \"{location}\", written in {}.\n\
Return a JSON object with the keys \"alerts\", \"updates\" and \"resources\".\n\
- \"alerts\": 2-3 objects with \"title\", \"source\", \"summary\" and an optional \"link\".\n\
- \"updates\": 2-3 objects with \"update\", \"location\" and \"timestamp\".\n\
- \"resources\": 3-4 objects with \"name\", \"type\" (for example Shelter, Hospital, Food Bank) and \"address\".\n\
Addresses must be plausible for the given location.",
            language.name()
        ),
        situational_data_schema(),
    )
}

pub fn format_report(draft: &IncidentDraft, language: Language) -> GenerateRequest {
    let kind = Translations::for_language(language).incident_kind(draft.kind);
    GenerateRequest::text(format!(
        "Rewrite this user-submitted disaster report as a concise message for the authorities, written in {}.\n\
- Type: {kind}\n\
- Location: {}\n\
- Description: {}",
        language.name(),
        draft.location,
        draft.description
    ))
}

pub fn assistant(history: &[ChatMessage]) -> GenerateRequest {
    let transcript = history
        .iter()
        .map(|message| {
            let speaker = match message.role {
                ChatRole::User => "User",
                ChatRole::Assistant => "Assistant",
            };
            format!("{speaker}: {}", message.text)
        })
        .collect::<Vec<_>>()
        .join("\n\n");
    GenerateRequest::text(transcript).with_system_instruction(ASSISTANT_SYSTEM_INSTRUCTION)
}

fn coordinates_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "lat": { "type": "NUMBER" },
            "lon": { "type": "NUMBER" }
        },
        "required": ["lat", "lon"]
    })
}

fn situational_data_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "alerts": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "title": { "type": "STRING" },
                        "source": { "type": "STRING" },
                        "summary": { "type": "STRING" },
                        "link": { "type": "STRING" }
                    },
                    "required": ["title", "source", "summary"]
                }
            },
            "updates": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "update": { "type": "STRING" },
                        "location": { "type": "STRING" },
                        "timestamp": { "type": "STRING" }
                    },
                    "required": ["update", "location", "timestamp"]
                }
            },
            "resources": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "name": { "type": "STRING" },
                        "type": { "type": "STRING" },
                        "address": { "type": "STRING" }
                    },
                    "required": ["name", "type", "address"]
                }
            }
        },
        "required": ["alerts", "updates", "resources"]
    })
}
