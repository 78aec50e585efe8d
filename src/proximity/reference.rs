use std::ops::Deref;

use serde::{Deserialize, Serialize};

use crate::shared::geo::Coordinate;

/// A place distance is measured from: the viewer or one of their travel stops.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ReferencePoint {
    Viewer(Coordinate),
    RouteStop(Coordinate),
}

impl ReferencePoint {
    pub const fn coordinate(&self) -> Coordinate {
        match self {
            ReferencePoint::Viewer(coordinate) | ReferencePoint::RouteStop(coordinate) => {
                *coordinate
            }
        }
    }
}

/// Ordered list of reference points for one filtering pass.
///
/// An empty set means nothing can be measured against and every candidate
/// passes the distance check.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReferenceSet {
    points: Vec<ReferencePoint>,
}

impl ReferenceSet {
    pub fn new() -> Self {
        Default::default()
    }

    /// Assembles the viewer location followed by the route stops.
    /// Stops are only added when `include_route_stops` is set, and are kept
    /// as given: no dedup, no pruning.
    pub fn build<I>(viewer: Option<Coordinate>, include_route_stops: bool, route_stops: I) -> Self
    where
        I: IntoIterator<Item = Coordinate>,
    {
        let set = Self::new().with_viewer(viewer);
        if include_route_stops {
            set.with_route_stops(route_stops)
        } else {
            set
        }
    }

    pub fn with_viewer(mut self, viewer: Option<Coordinate>) -> Self {
        if let Some(coordinate) = viewer {
            self.points.push(ReferencePoint::Viewer(coordinate));
        }
        self
    }

    pub fn with_route_stops<I>(mut self, route_stops: I) -> Self
    where
        I: IntoIterator<Item = Coordinate>,
    {
        self.points
            .extend(route_stops.into_iter().map(ReferencePoint::RouteStop));
        self
    }

    pub fn coordinates(&self) -> impl Iterator<Item = Coordinate> + '_ {
        self.points.iter().map(ReferencePoint::coordinate)
    }
}

impl Deref for ReferenceSet {
    type Target = [ReferencePoint];

    fn deref(&self) -> &Self::Target {
        &self.points
    }
}

impl FromIterator<ReferencePoint> for ReferenceSet {
    fn from_iter<T: IntoIterator<Item = ReferencePoint>>(iter: T) -> Self {
        Self {
            points: iter.into_iter().collect(),
        }
    }
}
