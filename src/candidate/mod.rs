mod geocode;
pub use geocode::*;

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::shared::{Locatable, geo::Coordinate};

/// What kind of entity is being filtered.
/// The kinds only differ in what happens when no coordinate can be found.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CandidateKind {
    /// A person, shown by the dating and nearby friends features.
    #[default]
    Profile,
    /// A community event.
    Event,
}

/// An entity tested for inclusion in a filtered list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    /// External identifier, also the key into a [`GeocodeCache`].
    pub id: Arc<str>,
    pub kind: CandidateKind,
    /// The stored location, already validated at ingestion.
    pub coordinate: Option<Coordinate>,
}

impl Candidate {
    pub fn new(
        kind: CandidateKind,
        id: impl Into<Arc<str>>,
        coordinate: Option<Coordinate>,
    ) -> Self {
        Self {
            id: id.into(),
            kind,
            coordinate,
        }
    }

    pub fn profile(id: impl Into<Arc<str>>, coordinate: Option<Coordinate>) -> Self {
        Self::new(CandidateKind::Profile, id, coordinate)
    }

    pub fn event(id: impl Into<Arc<str>>, coordinate: Option<Coordinate>) -> Self {
        Self::new(CandidateKind::Event, id, coordinate)
    }

    /// Builds a candidate straight from backend fields, where a missing
    /// location may be null, `-999` or any other out of range number.
    pub fn from_raw(
        kind: CandidateKind,
        id: impl Into<Arc<str>>,
        latitude: Option<f64>,
        longitude: Option<f64>,
    ) -> Self {
        Self::new(kind, id, Coordinate::from_raw(latitude, longitude))
    }
}

impl Locatable for Candidate {
    fn id(&self) -> &str {
        &self.id
    }

    fn coordinate(&self) -> Option<Coordinate> {
        self.coordinate
    }

    fn kind(&self) -> CandidateKind {
        self.kind
    }
}
