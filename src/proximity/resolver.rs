use tracing::trace;

use crate::{
    candidate::GeocodeCache,
    shared::{Locatable, geo::Coordinate},
};

/// Where a resolved coordinate came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Source {
    /// The candidate's own stored location.
    Stored,
    /// The external geocoder's snapshot.
    Geocoded,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Resolved {
    pub coordinate: Coordinate,
    pub source: Source,
}

/// Finds a usable coordinate for a candidate.
///
/// The stored coordinate wins; the geocode cache is only consulted when the
/// candidate has none. `None` means the candidate cannot be placed.
pub fn resolve<T>(candidate: &T, cache: Option<&GeocodeCache>) -> Option<Resolved>
where
    T: Locatable + ?Sized,
{
    if let Some(coordinate) = candidate.coordinate() {
        return Some(Resolved {
            coordinate,
            source: Source::Stored,
        });
    }

    let coordinate = cache?.get(candidate.id())?;
    trace!("Resolved {} from geocode cache at {coordinate}", candidate.id());
    Some(Resolved {
        coordinate,
        source: Source::Geocoded,
    })
}
