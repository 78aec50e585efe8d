use std::time::Instant;

use rayon::prelude::*;
use tracing::debug;

use crate::{
    candidate::GeocodeCache,
    preferences::{Feature, FilterPreferences},
    proximity::{Outcome, ProximityMatcher, ReferenceSet},
    shared::{Locatable, geo::Coordinate},
};

/// Everything needed to filter one list of candidates by distance.
///
/// Built once per pass from the caller's inputs and then read from as many
/// threads as rayon cares to use.
#[derive(Debug, Clone)]
pub struct Filter<'a> {
    matcher: ProximityMatcher<'a>,
    preferences: FilterPreferences,
    references: ReferenceSet,
}

impl<'a> Filter<'a> {
    /// Assembles the reference points from the viewer and, if the
    /// preferences ask for it, the route stops.
    pub fn new<I>(
        preferences: FilterPreferences,
        viewer: Option<Coordinate>,
        route_stops: I,
    ) -> Self
    where
        I: IntoIterator<Item = Coordinate>,
    {
        Self {
            matcher: ProximityMatcher::new(),
            references: ReferenceSet::build(
                viewer,
                preferences.include_route_stops(),
                route_stops,
            ),
            preferences,
        }
    }

    /// Uses the feature's policy for every candidate regardless of its kind.
    pub fn for_feature(mut self, feature: Feature) -> Self {
        self.matcher = self.matcher.with_policy(feature.policy());
        self
    }

    pub fn with_cache(mut self, cache: &'a GeocodeCache) -> Self {
        self.matcher = self.matcher.with_cache(cache);
        self
    }

    pub fn references(&self) -> &ReferenceSet {
        &self.references
    }

    pub fn preferences(&self) -> &FilterPreferences {
        &self.preferences
    }

    pub fn evaluate<T>(&self, candidate: &T) -> Outcome
    where
        T: Locatable + ?Sized,
    {
        self.matcher
            .evaluate(candidate, &self.preferences, &self.references)
    }

    pub fn matches<T>(&self, candidate: &T) -> bool
    where
        T: Locatable + ?Sized,
    {
        self.evaluate(candidate).is_match()
    }

    /// Keeps the candidates within range, in their original order.
    pub fn apply<'c, T>(&self, candidates: &'c [T]) -> Vec<&'c T>
    where
        T: Locatable + Sync,
    {
        self.apply_with(candidates, |_| true)
    }

    /// Like [`Filter::apply`] but also requires `extra` to hold.
    ///
    /// `extra` is the call site's own predicate (age, interests, lifestyle)
    /// and only runs for candidates that passed the distance check.
    pub fn apply_with<'c, T, F>(&self, candidates: &'c [T], extra: F) -> Vec<&'c T>
    where
        T: Locatable + Sync,
        F: Fn(&T) -> bool + Sync + Send,
    {
        let now = Instant::now();
        let kept: Vec<&T> = candidates
            .par_iter()
            .filter(|candidate| self.matches(*candidate) && extra(*candidate))
            .collect();
        debug!(
            "Kept {} of {} candidates in {:?}",
            kept.len(),
            candidates.len(),
            now.elapsed()
        );
        kept
    }

    /// Single threaded version of [`Filter::apply`]. Returns the same result.
    pub fn apply_sequential<'c, T>(&self, candidates: &'c [T]) -> Vec<&'c T>
    where
        T: Locatable,
    {
        candidates
            .iter()
            .filter(|candidate| self.matches(*candidate))
            .collect()
    }
}
