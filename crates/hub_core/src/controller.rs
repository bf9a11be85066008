use std::sync::Arc;

use chrono::Utc;
use info_service::InformationService;
use serde::Serialize;
use shared::{
    domain::{
        Coordinates, IncidentDraft, IncidentId, Language, LocationQuery, ReportedIncident,
    },
    error::HubError,
    i18n::{MessageKey, Translations},
    protocol::SituationalData,
};
use tokio::sync::{broadcast, Mutex};
use tracing::{debug, info, warn};

use crate::{
    formatter::IncidentReportFormatter,
    geolocation::{GeolocationProvider, MissingGeolocation},
    incidents::IncidentStore,
    location::LocationResolver,
    report::ReportWorkflow,
    situational::SituationalDataFetcher,
};

pub const DEFAULT_MAP_TARGET: &str = "India";
const EVENT_CAPACITY: usize = 256;

/// Read-only view of the hub panel handed to presentation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HubUIState {
    pub query_text: String,
    pub resolved_data: Option<SituationalData>,
    pub incidents: Vec<ReportedIncident>,
    pub is_loading: bool,
    pub is_locating: bool,
    pub error: Option<String>,
    pub map_target: String,
    pub language: Language,
}

#[derive(Debug, Clone)]
pub enum HubEvent {
    QueryTextChanged(String),
    MapTargetChanged(String),
    DataLoaded(SituationalData),
    IncidentRecorded(ReportedIncident),
    ReportConfirmed {
        incident_id: IncidentId,
        confirmation: String,
    },
    Error(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReportReceipt {
    pub incident: ReportedIncident,
    /// Shown to the user; degrades to the bare prefix when formatting failed.
    pub confirmation: String,
    pub authority_message: Option<String>,
}

#[derive(Debug, Clone)]
pub struct HubOptions {
    pub language: Language,
    pub initial_map_target: String,
}

impl Default for HubOptions {
    fn default() -> Self {
        Self {
            language: Language::default(),
            initial_map_target: DEFAULT_MAP_TARGET.to_string(),
        }
    }
}

struct HubState {
    query_text: String,
    resolved_data: Option<SituationalData>,
    incidents: IncidentStore,
    is_loading: bool,
    is_locating: bool,
    error: Option<String>,
    map_target: String,
    language: Language,
}

/// Orchestrates the community hub panel. Sole writer of the map target, the
/// situational snapshot and the incident list.
///
/// Entry points take `&self` and never hold the state lock across a service
/// call, so the two legs of [`HubController::locate_me`] can interleave. The
/// host is expected not to run `search`, `locate_me` and `submit_report` truly
/// in parallel on one instance.
pub struct HubController {
    resolver: LocationResolver,
    fetcher: SituationalDataFetcher,
    formatter: IncidentReportFormatter,
    geolocation: Arc<dyn GeolocationProvider>,
    inner: Mutex<HubState>,
    events: broadcast::Sender<HubEvent>,
}

impl HubController {
    pub fn new(service: Arc<dyn InformationService>) -> Arc<Self> {
        Self::new_with_dependencies(service, Arc::new(MissingGeolocation), HubOptions::default())
    }

    pub fn new_with_dependencies(
        service: Arc<dyn InformationService>,
        geolocation: Arc<dyn GeolocationProvider>,
        options: HubOptions,
    ) -> Arc<Self> {
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Arc::new(Self {
            resolver: LocationResolver::new(Arc::clone(&service)),
            fetcher: SituationalDataFetcher::new(Arc::clone(&service)),
            formatter: IncidentReportFormatter::new(service),
            geolocation,
            inner: Mutex::new(HubState {
                query_text: String::new(),
                resolved_data: None,
                incidents: IncidentStore::new(),
                is_loading: false,
                is_locating: false,
                error: None,
                map_target: options.initial_map_target,
                language: options.language,
            }),
            events,
        })
    }

    pub fn subscribe_events(&self) -> broadcast::Receiver<HubEvent> {
        self.events.subscribe()
    }

    pub async fn snapshot(&self) -> HubUIState {
        let guard = self.inner.lock().await;
        HubUIState {
            query_text: guard.query_text.clone(),
            resolved_data: guard.resolved_data.clone(),
            incidents: guard.incidents.all(),
            is_loading: guard.is_loading,
            is_locating: guard.is_locating,
            error: guard.error.clone(),
            map_target: guard.map_target.clone(),
            language: guard.language,
        }
    }

    pub async fn incidents(&self) -> Vec<ReportedIncident> {
        self.inner.lock().await.incidents.all()
    }

    pub async fn language(&self) -> Language {
        self.inner.lock().await.language
    }

    pub async fn set_language(&self, language: Language) {
        self.inner.lock().await.language = language;
    }

    pub async fn set_query_text(&self, text: impl Into<String>) {
        let text = text.into();
        let mut guard = self.inner.lock().await;
        guard.query_text = text.clone();
        let _ = self.events.send(HubEvent::QueryTextChanged(text));
    }

    /// Opens the report modal pre-seeded with the current query text.
    pub async fn open_report(&self) -> ReportWorkflow {
        let (query_text, language) = {
            let guard = self.inner.lock().await;
            (guard.query_text.clone(), guard.language)
        };
        let mut workflow = ReportWorkflow::new(
            Arc::clone(&self.geolocation),
            self.resolver.clone(),
            language,
        );
        workflow.open(&query_text);
        workflow
    }

    /// Searches with whatever the query text field currently holds.
    pub async fn search_query_text(&self) {
        let query_text = self.inner.lock().await.query_text.clone();
        self.search(LocationQuery::Address(query_text)).await;
    }

    pub async fn search(&self, query: impl Into<LocationQuery>) {
        let query = query.into();
        let Some(language) = self.begin_search(&query).await else {
            return;
        };
        let outcome = self.fetcher.fetch(&query, language).await;
        self.finish_search(&query, language, outcome).await;
    }

    /// Resolves the device position, then runs the reverse-geocode and search
    /// legs concurrently. Neither leg cancels the other; `is_locating` clears
    /// only once both have settled.
    pub async fn locate_me(&self) {
        let language = self.language().await;
        if !self.geolocation.is_supported() {
            warn!("hub: locate requested but geolocation is unsupported");
            self.record_error(&HubError::GeolocationUnsupported, language)
                .await;
            return;
        }

        {
            let mut guard = self.inner.lock().await;
            guard.is_locating = true;
            guard.error = None;
        }

        let coordinates = match self.geolocation.current_position().await {
            Ok(coordinates) => coordinates,
            Err(err) => {
                warn!("hub: device position unavailable err={err}");
                let message = HubError::from(err).user_message(language);
                let mut guard = self.inner.lock().await;
                guard.error = Some(message.clone());
                guard.is_locating = false;
                let _ = self.events.send(HubEvent::Error(message));
                return;
            }
        };
        info!(
            "hub: located device lat={} lon={}",
            coordinates.lat, coordinates.lon
        );

        let query = LocationQuery::Coordinates(coordinates);
        // Both legs start from the same cleared state; the search reset must
        // not run after the address leg has already reported a failure.
        let search_language = self.begin_search(&query).await;

        let address_leg = self.apply_reverse_geocode(coordinates, language);
        let search_leg = async {
            if let Some(language) = search_language {
                let outcome = self.fetcher.fetch(&query, language).await;
                self.finish_search(&query, language, outcome).await;
            }
        };
        tokio::join!(address_leg, search_leg);

        self.inner.lock().await.is_locating = false;
    }

    /// Records a report once its coordinates are known, then asks for the
    /// advisory authority message. Nothing is stored when coordinates cannot
    /// be resolved.
    pub async fn submit_report(&self, draft: IncidentDraft) -> Option<ReportReceipt> {
        let language = {
            let mut guard = self.inner.lock().await;
            guard.is_loading = true;
            guard.error = None;
            guard.language
        };

        let coordinates = match draft.coordinates {
            Some(coordinates) => Ok(coordinates),
            None => self.resolver.geocode(&draft.location).await,
        };
        let coordinates = match coordinates {
            Ok(coordinates) => coordinates,
            Err(err) => {
                warn!(
                    "hub: report rejected location={} err={err}",
                    draft.location
                );
                let message = err.user_message(language);
                let mut guard = self.inner.lock().await;
                guard.error = Some(message.clone());
                guard.is_loading = false;
                let _ = self.events.send(HubEvent::Error(message));
                return None;
            }
        };

        let incident = self.record_incident(&draft, coordinates).await;

        let prefix = Translations::for_language(language).text(MessageKey::ReportSentConfirmation);
        let authority_message = match self.formatter.format(&draft, language).await {
            Ok(message) => Some(message),
            Err(err) => {
                warn!(
                    "hub: authority message unavailable incident={} err={err}",
                    incident.id
                );
                None
            }
        };
        let confirmation = match &authority_message {
            Some(message) => format!("{prefix}\n\n{message}"),
            None => prefix.to_string(),
        };

        self.inner.lock().await.is_loading = false;
        let _ = self.events.send(HubEvent::ReportConfirmed {
            incident_id: incident.id.clone(),
            confirmation: confirmation.clone(),
        });

        Some(ReportReceipt {
            incident,
            confirmation,
            authority_message,
        })
    }

    /// Points the map at a reported incident. Returns false for unknown ids.
    pub async fn select_incident(&self, id: &IncidentId) -> bool {
        let mut guard = self.inner.lock().await;
        let Some(target) = guard
            .incidents
            .get(id)
            .map(|incident| incident.coordinates().map_target())
        else {
            return false;
        };
        self.set_map_target(&mut guard, target);
        true
    }

    /// Points the map at a resource from the current snapshot by position.
    pub async fn select_resource(&self, index: usize) -> bool {
        let mut guard = self.inner.lock().await;
        let Some(target) = guard
            .resolved_data
            .as_ref()
            .and_then(|data| data.resources.get(index))
            .map(|resource| resource.address.clone())
        else {
            return false;
        };
        self.set_map_target(&mut guard, target);
        true
    }

    async fn begin_search(&self, query: &LocationQuery) -> Option<Language> {
        if query.is_empty() {
            debug!("hub: empty search ignored");
            return None;
        }

        let mut guard = self.inner.lock().await;
        guard.is_loading = true;
        guard.error = None;
        guard.resolved_data = None;
        info!("hub: search started query={query}");
        Some(guard.language)
    }

    async fn finish_search(
        &self,
        query: &LocationQuery,
        language: Language,
        outcome: Result<SituationalData, HubError>,
    ) {
        let mut guard = self.inner.lock().await;
        match outcome {
            Ok(data) => {
                info!(
                    "hub: search completed query={query} alerts={} updates={} resources={}",
                    data.alerts.len(),
                    data.updates.len(),
                    data.resources.len()
                );
                guard.resolved_data = Some(data.clone());
                let _ = self.events.send(HubEvent::DataLoaded(data));
                self.set_map_target(&mut guard, query.map_target());
            }
            Err(err) => {
                warn!("hub: search failed query={query} err={err}");
                let message = err.user_message(language);
                guard.error = Some(message.clone());
                let _ = self.events.send(HubEvent::Error(message));
            }
        }
        guard.is_loading = false;
    }

    async fn apply_reverse_geocode(&self, coordinates: Coordinates, language: Language) {
        match self.resolver.reverse_geocode(coordinates).await {
            Ok(address) => self.set_query_text(address).await,
            Err(err) => {
                warn!("hub: reverse geocode failed err={err}");
                let message = Translations::for_language(language)
                    .text(MessageKey::LocationUnavailable)
                    .to_string();
                let mut guard = self.inner.lock().await;
                guard.error = Some(message.clone());
                let _ = self.events.send(HubEvent::Error(message));
            }
        }
    }

    async fn record_incident(
        &self,
        draft: &IncidentDraft,
        coordinates: Coordinates,
    ) -> ReportedIncident {
        let mut guard = self.inner.lock().await;
        let incident = ReportedIncident {
            id: guard.incidents.next_id(Utc::now()),
            kind: draft.kind,
            description: draft.description.clone(),
            location: draft.location.clone(),
            lat: coordinates.lat,
            lon: coordinates.lon,
        };
        guard.incidents.add(incident.clone());
        info!(
            "hub: incident recorded id={} kind={} lat={} lon={}",
            incident.id,
            incident.kind.key(),
            incident.lat,
            incident.lon
        );
        let _ = self.events.send(HubEvent::IncidentRecorded(incident.clone()));
        self.set_map_target(&mut guard, coordinates.map_target());
        incident
    }

    async fn record_error(&self, err: &HubError, language: Language) {
        let message = err.user_message(language);
        self.inner.lock().await.error = Some(message.clone());
        let _ = self.events.send(HubEvent::Error(message));
    }

    fn set_map_target(&self, state: &mut HubState, target: String) {
        state.map_target = target.clone();
        let _ = self.events.send(HubEvent::MapTargetChanged(target));
    }
}

#[cfg(test)]
#[path = "tests/controller_tests.rs"]
mod tests;
