//! Geo-proximity filtering for people and event lists.
//!
//! Decides whether a candidate lies within a distance of the viewer or of any
//! of their planned travel stops, falling back to a geocode snapshot when the
//! candidate has no stored location. See [`proximity::Filter`] for the main
//! entry point.

pub mod candidate;
pub mod preferences;
pub mod prelude;
pub mod proximity;
pub mod shared;
