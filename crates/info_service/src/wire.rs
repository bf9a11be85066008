//! Request/response bodies of the `generateContent` REST call.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use shared::protocol::GenerateRequest;

const JSON_MIME_TYPE: &str = "application/json";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentBody {
    pub contents: Vec<Content>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub system_instruction: Option<Content>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub generation_config: Option<GenerationConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Content {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default)]
    pub parts: Vec<Part>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Part {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    pub response_mime_type: String,
    pub response_schema: Value,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Candidate {
    #[serde(default)]
    pub content: Option<Content>,
}

impl Content {
    fn text(role: Option<&str>, text: impl Into<String>) -> Self {
        Self {
            role: role.map(str::to_string),
            parts: vec![Part {
                text: Some(text.into()),
            }],
        }
    }
}

impl From<GenerateRequest> for GenerateContentBody {
    fn from(request: GenerateRequest) -> Self {
        Self {
            contents: vec![Content::text(Some("user"), request.prompt)],
            system_instruction: request
                .system_instruction
                .map(|instruction| Content::text(None, instruction)),
            generation_config: request.response_schema.map(|schema| GenerationConfig {
                response_mime_type: JSON_MIME_TYPE.to_string(),
                response_schema: schema,
            }),
        }
    }
}

impl GenerateContentResponse {
    /// Concatenated text parts of the first candidate, if it carries any text.
    pub fn first_text(&self) -> Option<String> {
        let content = self.candidates.first()?.content.as_ref()?;
        let text = content
            .parts
            .iter()
            .filter_map(|part| part.text.as_deref())
            .collect::<String>();
        if text.is_empty() {
            None
        } else {
            Some(text)
        }
    }
}
