mod store;
pub use store::*;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{candidate::CandidateKind, proximity::Policy, shared::geo::Distance};

pub const DEFAULT_MAX_DISTANCE_MILES: u32 = 50;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("Invalid distance domain {min}..={max}")]
    InvalidDomain { min: u32, max: u32 },
    #[error("Preference store is unavailable: {0}")]
    StoreUnavailable(String),
}

/// The range a distance slider can take, in whole miles.
///
/// `max_miles` doubles as the unlimited sentinel: a preference at or above it
/// turns distance filtering off.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawDistanceDomain", into = "RawDistanceDomain")]
pub struct DistanceDomain {
    min_miles: u32,
    max_miles: u32,
}

#[derive(Serialize, Deserialize)]
struct RawDistanceDomain {
    min_miles: u32,
    max_miles: u32,
}

impl TryFrom<RawDistanceDomain> for DistanceDomain {
    type Error = self::Error;

    fn try_from(value: RawDistanceDomain) -> Result<Self, Self::Error> {
        Self::new(value.min_miles, value.max_miles)
    }
}

impl From<DistanceDomain> for RawDistanceDomain {
    fn from(value: DistanceDomain) -> Self {
        Self {
            min_miles: value.min_miles,
            max_miles: value.max_miles,
        }
    }
}

impl Default for DistanceDomain {
    fn default() -> Self {
        Self {
            min_miles: 5,
            max_miles: 200,
        }
    }
}

impl DistanceDomain {
    pub fn new(min_miles: u32, max_miles: u32) -> Result<Self, self::Error> {
        if min_miles == 0 || min_miles > max_miles {
            return Err(self::Error::InvalidDomain {
                min: min_miles,
                max: max_miles,
            });
        }
        Ok(Self {
            min_miles,
            max_miles,
        })
    }

    /// Re-runs the checks of [`DistanceDomain::new`].
    pub fn validate(&self) -> Result<Self, self::Error> {
        Self::new(self.min_miles, self.max_miles)
    }

    pub const fn min_miles(&self) -> u32 {
        self.min_miles
    }

    pub const fn max_miles(&self) -> u32 {
        self.max_miles
    }

    pub fn clamp(&self, miles: u32) -> u32 {
        // Not `u32::clamp`, which panics if min > max.
        miles.max(self.min_miles).min(self.max_miles)
    }

    pub const fn is_unlimited(&self, miles: u32) -> bool {
        miles >= self.max_miles
    }
}

/// Distance settings for one filtering pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterPreferences {
    max_distance_miles: u32,
    include_route_stops: bool,
    domain: DistanceDomain,
}

impl Default for FilterPreferences {
    fn default() -> Self {
        Self {
            max_distance_miles: DEFAULT_MAX_DISTANCE_MILES,
            include_route_stops: false,
            domain: DistanceDomain::default(),
        }
    }
}

impl FilterPreferences {
    /// Creates preferences with `max_distance_miles` clamped into `domain`.
    pub fn new(
        max_distance_miles: u32,
        include_route_stops: bool,
        domain: DistanceDomain,
    ) -> Self {
        Self {
            max_distance_miles: domain.clamp(max_distance_miles),
            include_route_stops,
            domain,
        }
    }

    pub fn with_max_distance(mut self, miles: u32) -> Self {
        self.max_distance_miles = self.domain.clamp(miles);
        self
    }

    pub fn with_route_stops(mut self, include_route_stops: bool) -> Self {
        self.include_route_stops = include_route_stops;
        self
    }

    /// Re-applies the domain. Used when values come back from storage.
    pub fn clamped(self) -> Self {
        Self::new(self.max_distance_miles, self.include_route_stops, self.domain)
    }

    /// Checks the domain and re-applies it, for values crossing the store
    /// boundary.
    pub fn validated(self) -> Result<Self, self::Error> {
        self.domain.validate()?;
        Ok(self.clamped())
    }

    pub const fn max_distance_miles(&self) -> u32 {
        self.max_distance_miles
    }

    pub fn max_distance(&self) -> Distance {
        self.max_distance_miles.into()
    }

    pub const fn include_route_stops(&self) -> bool {
        self.include_route_stops
    }

    pub const fn domain(&self) -> DistanceDomain {
        self.domain
    }

    /// True when the slider sits on its maximum and distance is ignored.
    pub const fn is_unlimited(&self) -> bool {
        self.domain.is_unlimited(self.max_distance_miles)
    }
}

/// The screens that filter by distance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Feature {
    Dating,
    NearbyFriends,
    Events,
}

impl Feature {
    pub const ALL: [Feature; 3] = [Feature::Dating, Feature::NearbyFriends, Feature::Events];

    /// Key the feature's preferences are stored under.
    pub const fn storage_key(&self) -> &'static str {
        match self {
            Feature::Dating => "dating.filter",
            Feature::NearbyFriends => "nearby_friends.filter",
            Feature::Events => "events.filter",
        }
    }

    pub const fn candidate_kind(&self) -> CandidateKind {
        match self {
            Feature::Dating | Feature::NearbyFriends => CandidateKind::Profile,
            Feature::Events => CandidateKind::Event,
        }
    }

    pub const fn policy(&self) -> Policy {
        Policy::for_kind(self.candidate_kind())
    }

    pub fn domain(&self) -> DistanceDomain {
        DistanceDomain::default()
    }

    pub fn default_preferences(&self) -> FilterPreferences {
        FilterPreferences::new(DEFAULT_MAX_DISTANCE_MILES, false, self.domain())
    }
}
