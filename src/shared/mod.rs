pub mod geo;

pub use geo::*;

/// Anything that can be placed on the map for proximity filtering.
///
/// Call sites implement this for their own profile or event types so they
/// can be filtered without being copied into a [`Candidate`](crate::candidate::Candidate).
pub trait Locatable {
    /// Key used to look the entity up in a geocode cache.
    fn id(&self) -> &str;
    /// The stored coordinate, if the entity has a valid one.
    fn coordinate(&self) -> Option<Coordinate>;
    fn kind(&self) -> crate::candidate::CandidateKind;
}
