use std::collections::VecDeque;

use chrono::{DateTime, Utc};
use shared::domain::{IncidentId, ReportedIncident};

/// Session-lifetime incident list, most recent first. No dedup, no capacity bound.
#[derive(Debug, Default, Clone)]
pub struct IncidentStore {
    incidents: VecDeque<ReportedIncident>,
    last_id_millis: i64,
}

impl IncidentStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, incident: ReportedIncident) {
        self.incidents.push_front(incident);
    }

    pub fn all(&self) -> Vec<ReportedIncident> {
        self.incidents.iter().cloned().collect()
    }

    pub fn get(&self, id: &IncidentId) -> Option<&ReportedIncident> {
        self.incidents.iter().find(|incident| &incident.id == id)
    }

    /// Submission-time id in epoch milliseconds, bumped past the previous id
    /// when two submissions land in the same millisecond or the clock steps back.
    pub fn next_id(&mut self, submitted_at: DateTime<Utc>) -> IncidentId {
        let millis = submitted_at.timestamp_millis().max(self.last_id_millis + 1);
        self.last_id_millis = millis;
        IncidentId(millis.to_string())
    }
}
