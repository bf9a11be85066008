use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Snapshot of alerts, updates and resources for one location.
///
/// Every array is required on the wire. A response missing any of them fails to
/// deserialize rather than defaulting to empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SituationalData {
    pub alerts: Vec<AlertNotice>,
    pub updates: Vec<CommunityUpdate>,
    pub resources: Vec<CommunityResource>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlertNotice {
    pub title: String,
    pub source: String,
    pub summary: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommunityUpdate {
    pub update: String,
    pub location: String,
    pub timestamp: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommunityResource {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub address: String,
}

/// One call into the generative information service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerateRequest {
    pub prompt: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub system_instruction: Option<String>,
    /// When present the service must answer with JSON conforming to this schema.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response_schema: Option<Value>,
}

impl GenerateRequest {
    pub fn text(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            system_instruction: None,
            response_schema: None,
        }
    }

    pub fn json(prompt: impl Into<String>, schema: Value) -> Self {
        Self {
            prompt: prompt.into(),
            system_instruction: None,
            response_schema: Some(schema),
        }
    }

    pub fn with_system_instruction(mut self, instruction: impl Into<String>) -> Self {
        self.system_instruction = Some(instruction.into());
        self
    }

    pub fn expects_json(&self) -> bool {
        self.response_schema.is_some()
    }
}
