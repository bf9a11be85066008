use std::{sync::Arc, time::Duration};

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use info_service::{HttpInformationService, InformationService, ServiceConfig};
use shared::protocol::GenerateRequest;
use tokio::{
    net::TcpListener,
    sync::{Barrier, Mutex},
};

pub(crate) const SITUATIONAL_JSON: &str = r#"{
    "alerts": [
        {"title": "Flood warning", "source": "IMD", "summary": "Heavy rainfall expected", "link": "https://example.org/alert"}
    ],
    "updates": [
        {"update": "Western Express Highway closed", "location": "Andheri", "timestamp": "2024-07-01 10:00"}
    ],
    "resources": [
        {"name": "Ward Office Shelter", "type": "Shelter", "address": "12 Station Road, Mumbai"},
        {"name": "KEM Hospital", "type": "Hospital", "address": "Acharya Donde Marg, Parel"}
    ]
}"#;
pub(crate) const GEOCODE_JSON: &str = r#"{"lat": 19.076, "lon": 72.8777}"#;
pub(crate) const REVERSE_ADDRESS: &str = "  221 Marine Drive, Mumbai  ";
pub(crate) const AUTHORITY_MESSAGE: &str = "URGENT: flooding reported near Marine Drive.";
pub(crate) const ASSISTANT_REPLY: &str = "- Store 3 days of water\n- Keep a torch";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Call {
    Geocode,
    ReverseGeocode,
    Situational,
    Format,
    Assistant,
}

pub(crate) fn classify(request: &GenerateRequest) -> Call {
    let prompt = request.prompt.as_str();
    if request.system_instruction.is_some() {
        Call::Assistant
    } else if prompt.starts_with("Give the latitude and longitude") {
        Call::Geocode
    } else if prompt.starts_with("Give a simple, common street address") {
        Call::ReverseGeocode
    } else if prompt.starts_with("Generate mock disaster-related") {
        Call::Situational
    } else if prompt.starts_with("Rewrite this user-submitted") {
        Call::Format
    } else {
        panic!("unexpected prompt: {prompt}")
    }
}

/// In-memory information service answering each kind of prompt with a fixed reply.
pub(crate) struct ScriptedService {
    pub(crate) geocode: std::result::Result<String, String>,
    pub(crate) reverse_geocode: std::result::Result<String, String>,
    pub(crate) situational: std::result::Result<String, String>,
    pub(crate) format: std::result::Result<String, String>,
    pub(crate) assistant: std::result::Result<String, String>,
    pub(crate) requests: Arc<Mutex<Vec<(Call, GenerateRequest)>>>,
    rendezvous: Option<Arc<Barrier>>,
}

impl ScriptedService {
    pub(crate) fn ok() -> Self {
        Self {
            geocode: Ok(GEOCODE_JSON.to_string()),
            reverse_geocode: Ok(REVERSE_ADDRESS.to_string()),
            situational: Ok(SITUATIONAL_JSON.to_string()),
            format: Ok(AUTHORITY_MESSAGE.to_string()),
            assistant: Ok(ASSISTANT_REPLY.to_string()),
            requests: Arc::new(Mutex::new(Vec::new())),
            rendezvous: None,
        }
    }

    /// Reverse-geocode and situational calls each block until the other one
    /// has also been issued.
    pub(crate) fn with_rendezvous(mut self) -> Self {
        self.rendezvous = Some(Arc::new(Barrier::new(2)));
        self
    }

    pub(crate) async fn count(&self, call: Call) -> usize {
        self.requests
            .lock()
            .await
            .iter()
            .filter(|(seen, _)| *seen == call)
            .count()
    }

    pub(crate) async fn total_calls(&self) -> usize {
        self.requests.lock().await.len()
    }

    pub(crate) async fn last_request(&self, call: Call) -> Option<GenerateRequest> {
        self.requests
            .lock()
            .await
            .iter()
            .rev()
            .find(|(seen, _)| *seen == call)
            .map(|(_, request)| request.clone())
    }
}

#[async_trait]
impl InformationService for ScriptedService {
    async fn generate(&self, request: GenerateRequest) -> Result<String> {
        let call = classify(&request);
        self.requests.lock().await.push((call, request));

        if let Some(barrier) = &self.rendezvous {
            if matches!(call, Call::ReverseGeocode | Call::Situational) {
                barrier.wait().await;
            }
        }

        let reply = match call {
            Call::Geocode => &self.geocode,
            Call::ReverseGeocode => &self.reverse_geocode,
            Call::Situational => &self.situational,
            Call::Format => &self.format,
            Call::Assistant => &self.assistant,
        };
        reply.clone().map_err(|err| anyhow!(err))
    }
}

/// An HTTP information service pointed at a listener that accepts connections
/// and never answers, with a short request timeout.
pub(crate) async fn stalled_http_service() -> HttpInformationService {
    std::env::set_var("NO_PROXY", "127.0.0.1,localhost");
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        let mut held = Vec::new();
        while let Ok((socket, _)) = listener.accept().await {
            held.push(socket);
        }
    });

    let mut config = ServiceConfig::new("test-key");
    config.base_url = format!("http://{addr}");
    config.request_timeout = Duration::from_millis(200);
    HttpInformationService::new(config).expect("client")
}
