pub use crate::{
    candidate::{Candidate, CandidateKind, GeocodeCache},
    preferences::{DistanceDomain, Feature, FilterPreferences, MemoryStore, PreferenceStore},
    proximity::{
        Filter, Outcome, Policy, ProximityMatcher, ReferencePoint, ReferenceSet, matches_event,
        matches_profile,
    },
    shared::{
        Locatable,
        geo::{Coordinate, Distance, haversine_miles, is_valid},
    },
};
