use std::collections::HashSet;

use proximity::{
    preferences::{self, DEFAULT_MAX_DISTANCE_MILES},
    prelude::*,
};

#[test]
fn default_preferences() {
    let preferences = FilterPreferences::default();
    assert_eq!(preferences.max_distance_miles(), DEFAULT_MAX_DISTANCE_MILES);
    assert_eq!(preferences.max_distance(), Distance::from_miles(50.0));
    assert!(!preferences.include_route_stops());
    assert!(!preferences.is_unlimited());
    assert_eq!(preferences.domain(), DistanceDomain::default());
}

#[test]
fn values_are_clamped_to_domain() {
    let domain = DistanceDomain::default();
    assert_eq!(FilterPreferences::new(0, false, domain).max_distance_miles(), 5);
    assert_eq!(FilterPreferences::new(75, false, domain).max_distance_miles(), 75);
    assert_eq!(FilterPreferences::new(999, false, domain).max_distance_miles(), 200);
}

#[test]
fn custom_domain_moves_the_sentinel() {
    let domain = DistanceDomain::new(1, 100).unwrap();
    assert!(FilterPreferences::new(100, false, domain).is_unlimited());
    assert!(!FilterPreferences::new(99, false, domain).is_unlimited());
}

#[test]
fn invalid_domain() {
    assert_eq!(
        DistanceDomain::new(0, 100),
        Err(preferences::Error::InvalidDomain { min: 0, max: 100 })
    );
    assert!(DistanceDomain::new(50, 10).is_err());
    assert!(DistanceDomain::new(10, 10).is_ok());
}

#[test]
fn features() {
    assert_eq!(Feature::Dating.policy(), Policy::FailClosed);
    assert_eq!(Feature::NearbyFriends.policy(), Policy::FailClosed);
    assert_eq!(Feature::Events.policy(), Policy::FailOpen);
    assert_eq!(Feature::Events.candidate_kind(), CandidateKind::Event);

    let keys: HashSet<_> = Feature::ALL.iter().map(Feature::storage_key).collect();
    assert_eq!(keys.len(), Feature::ALL.len());
}

#[test]
fn store_returns_defaults_when_empty() {
    let store = MemoryStore::new();
    for feature in Feature::ALL {
        assert_eq!(store.load(feature), feature.default_preferences());
    }
}

#[test]
fn store_keeps_features_apart() {
    let store = MemoryStore::new();
    let dating = FilterPreferences::default().with_max_distance(25);
    let events = FilterPreferences::default()
        .with_max_distance(120)
        .with_route_stops(true);
    store.save(Feature::Dating, dating).unwrap();
    store.save(Feature::Events, events).unwrap();

    assert_eq!(store.load(Feature::Dating), dating);
    assert_eq!(store.load(Feature::Events), events);
    assert_eq!(
        store.load(Feature::NearbyFriends),
        Feature::NearbyFriends.default_preferences()
    );
}

#[test]
fn store_is_usable_behind_a_trait_object() {
    let store: Box<dyn PreferenceStore> = Box::new(MemoryStore::new());
    let _ = store.save(Feature::NearbyFriends, FilterPreferences::default().with_max_distance(10));
    assert_eq!(store.load(Feature::NearbyFriends).max_distance_miles(), 10);
}

#[test]
fn stored_values_out_of_domain_are_clamped_on_load() {
    let stored: FilterPreferences = serde_json::from_str(
        r#"{"max_distance_miles":4000,"include_route_stops":true,"domain":{"min_miles":5,"max_miles":200}}"#,
    )
    .unwrap();
    let store = MemoryStore::new();
    store.save(Feature::Dating, stored).unwrap();
    let loaded = store.load(Feature::Dating);
    assert_eq!(loaded.max_distance_miles(), 200);
    assert!(loaded.is_unlimited());
    assert!(loaded.include_route_stops());
}

#[test]
fn corrupt_coordinates_do_not_deserialize() {
    let result: Result<Coordinate, _> =
        serde_json::from_str(r#"{"latitude":-999.0,"longitude":-999.0}"#);
    assert!(result.is_err());
    let coordinate: Coordinate =
        serde_json::from_str(r#"{"latitude":45.5152,"longitude":-122.6784}"#).unwrap();
    assert_eq!(coordinate.latitude(), 45.5152);
}

#[test]
fn corrupt_domain_does_not_deserialize() {
    for domain in [
        r#"{"min_miles":50,"max_miles":10}"#,
        r#"{"min_miles":0,"max_miles":0}"#,
    ] {
        let json = format!(
            r#"{{"max_distance_miles":10,"include_route_stops":false,"domain":{domain}}}"#
        );
        let result: Result<FilterPreferences, _> = serde_json::from_str(&json);
        assert!(result.is_err(), "{json}");
    }
    let domain: DistanceDomain = serde_json::from_str(r#"{"min_miles":1,"max_miles":100}"#).unwrap();
    assert_eq!(domain, DistanceDomain::new(1, 100).unwrap());
}

#[test]
fn distant_profile_stays_filtered_after_store_round_trip() {
    let store = MemoryStore::new();
    store
        .save(Feature::Dating, FilterPreferences::default().with_max_distance(10))
        .unwrap();
    let preferences = store.load(Feature::Dating);
    assert!(!preferences.is_unlimited());

    let references = ReferenceSet::build(Coordinate::new(36.2704, -121.8081).ok(), false, Vec::new());
    let seattle = Candidate::profile("seattle", Coordinate::new(47.6062, -122.3321).ok());
    assert!(!matches_profile(&seattle, &preferences, &references, None));
}
