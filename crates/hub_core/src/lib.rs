//! Community hub orchestration: location resolution, situational data,
//! incident reporting and the report modal, sequenced by [`HubController`].

pub mod assistant;
pub mod controller;
pub mod formatter;
pub mod geolocation;
pub mod incidents;
pub mod location;
pub mod prompts;
pub mod report;
pub mod situational;

pub use assistant::AssistantSession;
pub use controller::{HubController, HubEvent, HubOptions, HubUIState, ReportReceipt};
pub use formatter::IncidentReportFormatter;
pub use geolocation::{
    DeniedGeolocation, FixedGeolocation, GeolocationError, GeolocationProvider,
    MissingGeolocation,
};
pub use incidents::IncidentStore;
pub use location::LocationResolver;
pub use report::ReportWorkflow;
pub use situational::SituationalDataFetcher;

#[cfg(test)]
#[path = "tests/support.rs"]
pub(crate) mod test_support;

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
