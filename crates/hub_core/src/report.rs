use std::sync::Arc;

use shared::{
    domain::{Coordinates, IncidentDraft, IncidentKind, Language, LocationQuery},
    error::HubError,
    i18n::{MessageKey, Translations},
};
use tokio::{sync::watch, task::JoinHandle};
use tracing::{info, warn};

use crate::{
    controller::{HubController, ReportReceipt},
    geolocation::GeolocationProvider,
    location::LocationResolver,
};

/// Transient state of the "report incident" modal.
///
/// The location text and any captured coordinates never diverge: a manual edit
/// of the text drops the coordinates, and "use my location" stores both or
/// neither. The locating flag is published on a watch channel so a view can
/// show progress while [`ReportWorkflow::use_my_location`] is in flight.
pub struct ReportWorkflow {
    geolocation: Arc<dyn GeolocationProvider>,
    resolver: LocationResolver,
    language: Language,
    is_open: bool,
    kind: IncidentKind,
    description: String,
    location: String,
    coordinates: Option<Coordinates>,
    locating: watch::Sender<bool>,
    location_error: Option<String>,
}

impl ReportWorkflow {
    pub fn new(
        geolocation: Arc<dyn GeolocationProvider>,
        resolver: LocationResolver,
        language: Language,
    ) -> Self {
        Self {
            geolocation,
            resolver,
            language,
            is_open: false,
            kind: IncidentKind::default(),
            description: String::new(),
            location: String::new(),
            coordinates: None,
            locating: watch::channel(false).0,
            location_error: None,
        }
    }

    /// Resets the form and seeds the location from the hub's query text.
    pub fn open(&mut self, hub_query: &str) {
        self.is_open = true;
        self.kind = IncidentKind::default();
        self.description.clear();
        self.location = hub_query.to_string();
        self.coordinates = None;
        self.location_error = None;
    }

    pub fn close(&mut self) {
        self.is_open = false;
    }

    pub fn is_open(&self) -> bool {
        self.is_open
    }

    pub fn kind(&self) -> IncidentKind {
        self.kind
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn location(&self) -> &str {
        &self.location
    }

    pub fn coordinates(&self) -> Option<Coordinates> {
        self.coordinates
    }

    pub fn is_locating(&self) -> bool {
        *self.locating.borrow()
    }

    pub fn subscribe_locating(&self) -> watch::Receiver<bool> {
        self.locating.subscribe()
    }

    pub fn location_error(&self) -> Option<&str> {
        self.location_error.as_deref()
    }

    pub fn set_language(&mut self, language: Language) {
        self.language = language;
    }

    pub fn set_kind(&mut self, kind: IncidentKind) {
        self.kind = kind;
    }

    pub fn set_description(&mut self, description: impl Into<String>) {
        self.description = description.into();
    }

    pub fn edit_location(&mut self, text: impl Into<String>) {
        self.location = text.into();
        self.coordinates = None;
        self.location_error = None;
    }

    pub async fn use_my_location(&mut self) {
        let translations = Translations::for_language(self.language);
        if !self.geolocation.is_supported() {
            self.location_error = Some(
                translations
                    .text(MessageKey::GeolocationNotSupported)
                    .to_string(),
            );
            return;
        }

        self.locating.send_replace(true);
        self.location_error = None;

        match self.geolocation.current_position().await {
            Ok(position) => match self
                .resolver
                .resolve(&LocationQuery::Coordinates(position))
                .await
            {
                Ok(resolved) => {
                    self.location = resolved.display_address;
                    self.coordinates = Some(resolved.coordinates);
                }
                Err(err) => {
                    warn!("report: reverse geocode failed err={err}");
                    self.location_error = Some(
                        translations
                            .text(MessageKey::LocationUnavailable)
                            .to_string(),
                    );
                }
            },
            Err(err) => {
                self.location_error = Some(HubError::from(err).user_message(self.language));
            }
        }

        self.locating.send_replace(false);
    }

    pub fn can_submit(&self) -> bool {
        !self.description.is_empty() && !self.location.is_empty()
    }

    /// Closes the modal and hands back the report. The modal does not wait
    /// for the hub to record it; a failed submission shows up only as the
    /// hub's error.
    pub fn submit(&mut self) -> Option<IncidentDraft> {
        if !self.can_submit() {
            return None;
        }
        let draft = IncidentDraft {
            kind: self.kind,
            description: self.description.clone(),
            location: self.location.clone(),
            coordinates: self.coordinates,
        };
        self.close();
        info!(
            "report: dispatched kind={} geolocated={}",
            draft.kind.key(),
            draft.coordinates.is_some()
        );
        Some(draft)
    }

    /// Submits and hands the draft to the hub on a background task.
    pub fn dispatch(
        &mut self,
        hub: &Arc<HubController>,
    ) -> Option<JoinHandle<Option<ReportReceipt>>> {
        let draft = self.submit()?;
        let hub = Arc::clone(hub);
        Some(tokio::spawn(async move { hub.submit_report(draft).await }))
    }
}

#[cfg(test)]
#[path = "tests/report_tests.rs"]
mod tests;
