use std::{collections::HashMap, sync::Arc};

use tracing::warn;

use crate::shared::geo::Coordinate;

/// Read-only snapshot of coordinates produced by an external geocoder,
/// keyed by candidate id.
///
/// The snapshot is built once per filter pass and never written to by the
/// matcher, so it can be shared freely between threads.
#[derive(Debug, Clone, Default)]
pub struct GeocodeCache {
    entries: HashMap<Arc<str>, Coordinate>,
}

impl GeocodeCache {
    pub fn new() -> Self {
        Default::default()
    }

    /// Builds a snapshot from unchecked geocoder output.
    /// Entries that fail the coordinate range check are dropped.
    pub fn from_raw<I, K>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, f64, f64)>,
        K: Into<Arc<str>>,
    {
        let mut dropped: usize = 0;
        let entries: HashMap<Arc<str>, Coordinate> = entries
            .into_iter()
            .filter_map(|(id, latitude, longitude)| {
                let id: Arc<str> = id.into();
                match Coordinate::from_raw(Some(latitude), Some(longitude)) {
                    Some(coordinate) => Some((id, coordinate)),
                    None => {
                        warn!("Dropping geocode result for {id}: ({latitude}, {longitude})");
                        dropped += 1;
                        None
                    }
                }
            })
            .collect();
        if dropped > 0 {
            warn!("Dropped {dropped} invalid geocode results");
        }
        Self { entries }
    }

    pub fn get(&self, id: &str) -> Option<Coordinate> {
        self.entries.get(id).copied()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.entries.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K> FromIterator<(K, Coordinate)> for GeocodeCache
where
    K: Into<Arc<str>>,
{
    fn from_iter<T: IntoIterator<Item = (K, Coordinate)>>(iter: T) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(id, coordinate)| (id.into(), coordinate))
                .collect(),
        }
    }
}
