mod filter;
mod reference;
pub mod resolver;

pub use filter::*;
pub use reference::*;

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::{
    candidate::{CandidateKind, GeocodeCache},
    preferences::FilterPreferences,
    shared::{Locatable, geo::Distance},
};

/// What to do with a candidate whose location cannot be resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Policy {
    /// Keep the candidate.
    FailOpen,
    /// Drop the candidate.
    FailClosed,
}

impl Policy {
    /// People are hidden when they cannot be placed, events are shown.
    pub const fn for_kind(kind: CandidateKind) -> Self {
        match kind {
            CandidateKind::Profile => Policy::FailClosed,
            CandidateKind::Event => Policy::FailOpen,
        }
    }

    pub const fn passes(&self) -> bool {
        matches!(self, Policy::FailOpen)
    }
}

/// Why a candidate did or did not pass the distance check.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Outcome {
    /// The slider is at its maximum, distance was never looked at.
    Unlimited,
    /// There was nothing to measure from.
    NoReference,
    /// The candidate has no usable location.
    Unresolved(Policy),
    /// Distance to the first reference point found within range.
    Within { distance: Distance },
    /// Distance to the nearest reference point, which was still too far.
    OutOfRange { nearest: Distance },
}

impl Outcome {
    pub const fn is_match(&self) -> bool {
        match self {
            Outcome::Unlimited | Outcome::NoReference | Outcome::Within { .. } => true,
            Outcome::Unresolved(policy) => policy.passes(),
            Outcome::OutOfRange { .. } => false,
        }
    }
}

/// Decides whether candidates lie close enough to any reference point.
///
/// The matcher holds no state between calls and only borrows the geocode
/// snapshot, so one instance can be shared across threads for a whole list.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProximityMatcher<'a> {
    cache: Option<&'a GeocodeCache>,
    policy: Option<Policy>,
}

impl<'a> ProximityMatcher<'a> {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn with_cache(mut self, cache: &'a GeocodeCache) -> Self {
        self.cache = Some(cache);
        self
    }

    /// Overrides the policy that would otherwise follow from the candidate kind.
    pub fn with_policy(mut self, policy: Policy) -> Self {
        self.policy = Some(policy);
        self
    }

    fn policy_for(&self, kind: CandidateKind) -> Policy {
        self.policy.unwrap_or(Policy::for_kind(kind))
    }

    pub fn evaluate<T>(
        &self,
        candidate: &T,
        preferences: &FilterPreferences,
        references: &[ReferencePoint],
    ) -> Outcome
    where
        T: Locatable + ?Sized,
    {
        // Checked before resolving so unlimited works for candidates
        // without any location at all.
        if preferences.is_unlimited() {
            trace!("{} passes, distance is unlimited", candidate.id());
            return Outcome::Unlimited;
        }

        if references.is_empty() {
            trace!("{} passes, no reference point", candidate.id());
            return Outcome::NoReference;
        }

        let Some(resolved) = resolver::resolve(candidate, self.cache) else {
            let policy = self.policy_for(candidate.kind());
            match policy {
                Policy::FailClosed => debug!(
                    "Excluding {:?} {}: no valid coordinate and no geocode entry",
                    candidate.kind(),
                    candidate.id()
                ),
                Policy::FailOpen => trace!(
                    "Including {:?} {} without a coordinate",
                    candidate.kind(),
                    candidate.id()
                ),
            }
            return Outcome::Unresolved(policy);
        };

        let max_distance = preferences.max_distance();
        let mut nearest: Option<Distance> = None;
        for reference in references {
            let distance = reference.coordinate().distance(&resolved.coordinate);
            if distance <= max_distance {
                return Outcome::Within { distance };
            }
            if nearest.is_none_or(|current| distance < current) {
                nearest = Some(distance);
            }
        }
        let nearest = nearest.unwrap_or(Distance::ZERO);
        trace!(
            "{} at {} is {nearest} from the nearest reference, limit {max_distance}",
            candidate.id(),
            resolved.coordinate
        );
        Outcome::OutOfRange { nearest }
    }

    pub fn matches<T>(
        &self,
        candidate: &T,
        preferences: &FilterPreferences,
        references: &[ReferencePoint],
    ) -> bool
    where
        T: Locatable + ?Sized,
    {
        self.evaluate(candidate, preferences, references).is_match()
    }
}

/// Distance check for a person, used by the dating and nearby friends lists.
/// Profiles that cannot be placed are excluded.
pub fn matches_profile<T>(
    profile: &T,
    preferences: &FilterPreferences,
    references: &[ReferencePoint],
    cache: Option<&GeocodeCache>,
) -> bool
where
    T: Locatable + ?Sized,
{
    matcher(cache)
        .with_policy(Policy::FailClosed)
        .matches(profile, preferences, references)
}

/// Distance check for a community event.
/// Events that cannot be placed are included.
pub fn matches_event<T>(
    event: &T,
    preferences: &FilterPreferences,
    references: &[ReferencePoint],
    cache: Option<&GeocodeCache>,
) -> bool
where
    T: Locatable + ?Sized,
{
    matcher(cache)
        .with_policy(Policy::FailOpen)
        .matches(event, preferences, references)
}

fn matcher(cache: Option<&GeocodeCache>) -> ProximityMatcher<'_> {
    match cache {
        Some(cache) => ProximityMatcher::new().with_cache(cache),
        None => ProximityMatcher::new(),
    }
}
