//! Tracker session - the per-save context the host's event layer drives.

use gift_catalogue::{DialogueContext, EntityId, HostCatalogue, InventoryDelta, ReactionOracle};

use crate::classifier::EventClassifier;
use crate::config::TrackerConfig;
use crate::inference::DialogueInferenceEngine;
use crate::taste_store::{Fact, InsertOutcome, LoadOrigin, TasteStore};

/// Host content plus everything compiled from it.
///
/// Replaced as a whole on reload, never patched.
#[derive(Debug, Clone)]
pub struct ContentSnapshot {
    catalogue: HostCatalogue,
    engine: DialogueInferenceEngine,
}

impl ContentSnapshot {
    pub fn new(catalogue: HostCatalogue) -> Self {
        let engine = DialogueInferenceEngine::new(&catalogue);
        Self { catalogue, engine }
    }

    pub fn catalogue(&self) -> &HostCatalogue {
        &self.catalogue
    }

    pub fn engine(&self) -> &DialogueInferenceEngine {
        &self.engine
    }
}

/// One save file's worth of tracking state.
///
/// Created when a save is loaded and dropped when it is closed. Host events
/// arrive serially; the session is not meant to be shared across threads.
pub struct TrackerSession<O: ReactionOracle> {
    config: TrackerConfig,
    store: TasteStore,
    content: ContentSnapshot,
    oracle: O,
    /// Last in-game day whose checkpoint saved successfully.
    last_saved_day: Option<u32>,
}

impl<O: ReactionOracle> TrackerSession<O> {
    /// Open the session for `save_name`, loading its taste file.
    pub fn start(
        config: TrackerConfig,
        save_name: &str,
        catalogue: HostCatalogue,
        oracle: O,
    ) -> (Self, LoadOrigin) {
        let path = config.storage_path(save_name);
        let (store, origin) =
            TasteStore::load(path, catalogue.gift_entities(), config.visibility());
        tracing::info!(save_name, entities = store.entity_count(), "Gift tracker session started");

        let session = Self {
            config,
            store,
            content: ContentSnapshot::new(catalogue),
            oracle,
            last_saved_day: None,
        };
        (session, origin)
    }

    pub fn config(&self) -> &TrackerConfig {
        &self.config
    }

    pub fn store(&self) -> &TasteStore {
        &self.store
    }

    pub fn content(&self) -> &ContentSnapshot {
        &self.content
    }

    /// Apply new options; only visibility affects a running session.
    pub fn set_config(&mut self, config: TrackerConfig) {
        self.store.set_visibility(config.visibility());
        self.config = config;
    }

    /// Swap in freshly loaded host content.
    pub fn reload_content(&mut self, catalogue: HostCatalogue) {
        self.content = ContentSnapshot::new(catalogue);
        tracing::debug!("Reloaded gift content");
    }

    /// Inventory-changed callback: the direct path.
    pub fn on_inventory_changed(
        &mut self,
        delta: &InventoryDelta,
        dialogue: Option<&DialogueContext>,
    ) -> Option<InsertOutcome> {
        let classifier = EventClassifier::new(&self.content.catalogue, &self.oracle);
        let fact = classifier.classify(delta, dialogue)?;
        Some(self.store.insert_fact(&fact))
    }

    /// Dialogue callback: the text-inference path.
    pub fn on_dialogue(&mut self, speaker: &EntityId, line: &str) -> Option<InsertOutcome> {
        let candidate = self.content.engine.infer_any(speaker, line)?;
        Some(self.store.insert_fact(&Fact::from(candidate)))
    }

    /// End-of-day checkpoint. Saves at most once per day; returns whether it saved.
    ///
    /// A failed save is logged and leaves the day unmarked so a later signal
    /// can retry.
    pub fn on_day_ending(&mut self, day: u32) -> bool {
        if self.last_saved_day == Some(day) {
            tracing::debug!(day, "Gift tastes already saved today");
            return false;
        }

        match self.store.save() {
            Ok(()) => {
                self.last_saved_day = Some(day);
                true
            }
            Err(err) => {
                tracing::error!(day, path = %self.store.path().display(), "Failed to save gift tastes: {}", err);
                false
            }
        }
    }

    /// The query command. Never fails; unmatched filters give an empty report.
    pub fn query<S: AsRef<str>>(&self, filters: &[S]) -> String {
        self.store.query(filters)
    }
}
