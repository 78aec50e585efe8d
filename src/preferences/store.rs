use std::{collections::HashMap, sync::RwLock};

use tracing::{debug, warn};

use crate::preferences::{Error, Feature, FilterPreferences};

/// Persistence for per-feature filter preferences, injected by the host app.
pub trait PreferenceStore: Send + Sync {
    /// Returns the stored preferences, or the feature default when nothing
    /// usable is stored. Never fails.
    fn load(&self, feature: Feature) -> FilterPreferences;

    /// Stores the preferences. Callers are free to ignore the result.
    fn save(&self, feature: Feature, preferences: FilterPreferences) -> Result<(), Error>;
}

/// In-process store, mostly for tests and embedding.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RwLock<HashMap<&'static str, FilterPreferences>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Default::default()
    }
}

impl PreferenceStore for MemoryStore {
    fn load(&self, feature: Feature) -> FilterPreferences {
        let entries = match self.entries.read() {
            Ok(entries) => entries,
            Err(_) => {
                warn!("Preference store poisoned, using defaults for {feature:?}");
                return feature.default_preferences();
            }
        };
        let Some(stored) = entries.get(feature.storage_key()) else {
            debug!("No stored preferences for {feature:?}, using defaults");
            return feature.default_preferences();
        };
        match stored.validated() {
            Ok(preferences) => preferences,
            Err(err) => {
                warn!("Stored preferences for {feature:?} are corrupt ({err}), using defaults");
                feature.default_preferences()
            }
        }
    }

    fn save(&self, feature: Feature, preferences: FilterPreferences) -> Result<(), Error> {
        let preferences = preferences.validated()?;
        let mut entries = self
            .entries
            .write()
            .map_err(|err| Error::StoreUnavailable(err.to_string()))?;
        entries.insert(feature.storage_key(), preferences);
        Ok(())
    }
}
