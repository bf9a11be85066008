use super::{
    domain::{Coordinates, IncidentKind, Language, LocationQuery},
    error::HubError,
    i18n::{MessageKey, Translations},
    protocol::SituationalData,
};

#[test]
fn coordinate_query_renders_lat_lon_map_target() {
    let query = LocationQuery::from(Coordinates::new(12.97, 77.59));
    assert_eq!(query.map_target(), "12.97,77.59");
    assert!(!query.is_empty());
}

#[test]
fn address_query_renders_itself_as_map_target() {
    let query = LocationQuery::from("Mumbai, 400001");
    assert_eq!(query.map_target(), "Mumbai, 400001");
    assert!(LocationQuery::from("").is_empty());
}

#[test]
fn zero_pair_is_the_not_found_sentinel() {
    assert!(Coordinates::new(0.0, 0.0).is_not_found_sentinel());
    assert!(!Coordinates::new(0.0, 72.8).is_not_found_sentinel());
    assert!(!Coordinates::new(f64::NAN, 1.0).is_finite());
}

#[test]
fn situational_data_requires_every_array() {
    let missing_resources = r#"{"alerts": [], "updates": []}"#;
    assert!(serde_json::from_str::<SituationalData>(missing_resources).is_err());

    let complete = r#"{
        "alerts": [{"title": "Flood watch", "source": "IMD", "summary": "Heavy rain"}],
        "updates": [],
        "resources": [{"name": "City Hall", "type": "Shelter", "address": "1 Main Rd"}]
    }"#;
    let data: SituationalData = serde_json::from_str(complete).expect("parse");
    assert_eq!(data.alerts[0].link, None);
    assert_eq!(data.resources[0].kind, "Shelter");
}

#[test]
fn situational_data_rejects_records_missing_required_fields() {
    let raw = r#"{"alerts": [{"title": "x"}], "updates": [], "resources": []}"#;
    assert!(serde_json::from_str::<SituationalData>(raw).is_err());
}

#[test]
fn languages_parse_from_codes() {
    assert_eq!(Language::from_code("TA"), Some(Language::Ta));
    assert_eq!(Language::from_code("fr"), None);
    assert_eq!(Language::ALL.len(), 7);
}

#[test]
fn untranslated_languages_fall_back_to_english() {
    let hindi = Translations::for_language(Language::Hi);
    let english = Translations::for_language(Language::En);
    assert_eq!(
        hindi.text(MessageKey::ReportSentConfirmation),
        english.text(MessageKey::ReportSentConfirmation)
    );
    assert_eq!(hindi.incident_kind(IncidentKind::Flood), "Flood");
}

#[test]
fn geolocation_errors_render_translated_messages() {
    let message = HubError::GeolocationPermissionDenied.user_message(Language::En);
    assert!(message.starts_with("Location access was denied"));
    let unresolved = HubError::UnresolvedLocation("Atlantis".into()).user_message(Language::En);
    assert!(unresolved.contains("\"Atlantis\""));
}

#[test]
fn incident_kinds_parse_from_keys() {
    assert_eq!(IncidentKind::from_key("Earthquake"), Some(IncidentKind::Earthquake));
    assert_eq!(IncidentKind::default(), IncidentKind::Flood);
}
