//! The taste store - per-entity sets of discovered item names.

use gift_catalogue::{EntityId, ReactionCategory};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use super::Fact;

/// Category -> item names known for one entity.
pub type CategorySets = BTreeMap<ReactionCategory, BTreeSet<String>>;

/// Entity -> known tastes. This is also the on-disk shape.
pub type TasteMap = BTreeMap<EntityId, CategorySets>;

/// Which categories reports include. Love is always shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VisibilityPolicy {
    pub show_likes: bool,
    pub show_dislikes: bool,
    pub show_hates: bool,
    pub show_neutral: bool,
}

impl Default for VisibilityPolicy {
    fn default() -> Self {
        Self {
            show_likes: true,
            show_dislikes: true,
            show_hates: true,
            show_neutral: false,
        }
    }
}

impl VisibilityPolicy {
    /// A policy that shows every category.
    pub fn all() -> Self {
        Self {
            show_likes: true,
            show_dislikes: true,
            show_hates: true,
            show_neutral: true,
        }
    }

    /// Whether `category` is included in reports.
    pub fn shows(&self, category: ReactionCategory) -> bool {
        match category {
            ReactionCategory::Love => true,
            ReactionCategory::Like => self.show_likes,
            ReactionCategory::Dislike => self.show_dislikes,
            ReactionCategory::Hate => self.show_hates,
            ReactionCategory::Neutral => self.show_neutral,
        }
    }
}

/// What an insert did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertOutcome {
    /// The item was new for this entity and category.
    Added,
    /// The fact was already known; nothing changed.
    AlreadyKnown,
    /// The entity is not tracked; nothing changed.
    UnknownEntity,
}

/// The persisted knowledge base of gift tastes.
///
/// Every tracked entity has an entry for every [`ReactionCategory`], possibly
/// empty. The set of tracked entities is fixed when the store is built or
/// loaded; inserts never add entities.
///
/// The store takes `&mut self` for mutation and does no internal locking. A
/// multi-threaded host must serialize access itself.
#[derive(Debug, Clone)]
pub struct TasteStore {
    /// File this store saves to.
    pub(super) path: PathBuf,

    pub(super) tastes: TasteMap,

    visibility: VisibilityPolicy,
}

impl TasteStore {
    /// Create an empty store covering `entities`, skipping universal placeholders.
    pub fn new<'a>(
        path: impl Into<PathBuf>,
        entities: impl IntoIterator<Item = &'a EntityId>,
        visibility: VisibilityPolicy,
    ) -> Self {
        Self::from_tastes(path.into(), skeleton(entities), visibility)
    }

    pub(super) fn from_tastes(path: PathBuf, tastes: TasteMap, visibility: VisibilityPolicy) -> Self {
        Self {
            path,
            tastes,
            visibility,
        }
    }

    /// File this store saves to.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The active visibility policy.
    pub fn visibility(&self) -> VisibilityPolicy {
        self.visibility
    }

    /// Replace the visibility policy (e.g. after a config reload).
    pub fn set_visibility(&mut self, visibility: VisibilityPolicy) {
        self.visibility = visibility;
    }

    /// Record that `entity` has `category` towards `item`.
    pub fn insert(
        &mut self,
        entity: &EntityId,
        item: &str,
        category: ReactionCategory,
    ) -> InsertOutcome {
        let Some(categories) = self.tastes.get_mut(entity) else {
            tracing::debug!(entity = %entity, item, "Ignoring taste for untracked entity");
            return InsertOutcome::UnknownEntity;
        };

        let items = categories.entry(category).or_default();
        if items.contains(item) {
            return InsertOutcome::AlreadyKnown;
        }

        items.insert(item.to_string());
        InsertOutcome::Added
    }

    /// Insert a fact and log it when it is new.
    pub fn insert_fact(&mut self, fact: &Fact) -> InsertOutcome {
        let outcome = self.insert(&fact.entity, &fact.item, fact.category);
        if outcome == InsertOutcome::Added {
            tracing::info!(source = ?fact.source, "{}", fact);
        }
        outcome
    }

    /// Whether `entity` is tracked.
    pub fn contains_entity(&self, entity: &EntityId) -> bool {
        self.tastes.contains_key(entity)
    }

    /// Items known for one entity and category.
    pub fn items(&self, entity: &EntityId, category: ReactionCategory) -> Option<&BTreeSet<String>> {
        self.tastes.get(entity).and_then(|c| c.get(&category))
    }

    /// Whether the store holds `fact`'s triple.
    pub fn contains(&self, entity: &EntityId, item: &str, category: ReactionCategory) -> bool {
        self.items(entity, category)
            .is_some_and(|items| items.contains(item))
    }

    /// True if `entity` is tracked and has at least one visible, non-empty category.
    pub fn has_known_tastes(&self, entity: &EntityId) -> bool {
        self.tastes.get(entity).is_some_and(|categories| {
            categories
                .iter()
                .any(|(category, items)| self.visibility.shows(*category) && !items.is_empty())
        })
    }

    /// All tracked entities, in case-insensitive name order.
    pub fn entities(&self) -> impl Iterator<Item = &EntityId> + '_ {
        self.tastes.keys()
    }

    /// Number of tracked entities.
    pub fn entity_count(&self) -> usize {
        self.tastes.len()
    }

    /// Total number of stored facts.
    pub fn fact_count(&self) -> usize {
        self.tastes
            .values()
            .flat_map(|categories| categories.values())
            .map(BTreeSet::len)
            .sum()
    }

    /// Read-only view of the whole mapping.
    pub fn tastes(&self) -> &TasteMap {
        &self.tastes
    }

    /// Format known tastes for the named entities, or all entities when
    /// `filters` is empty. Names match case-insensitively.
    pub fn query<S: AsRef<str>>(&self, filters: &[S]) -> String {
        let mut report = String::new();

        for (entity, categories) in &self.tastes {
            let wanted = filters.is_empty() || filters.iter().any(|f| entity.matches(f.as_ref()));
            if !wanted || !self.has_known_tastes(entity) {
                continue;
            }

            let _ = writeln!(report, "{}:", entity);
            for category in ReactionCategory::ALL {
                if !self.visibility.shows(category) {
                    continue;
                }
                let Some(items) = categories.get(&category).filter(|i| !i.is_empty()) else {
                    continue;
                };
                let names: Vec<&str> = items.iter().map(String::as_str).collect();
                let _ = writeln!(report, "\t{} {}", category.label(), names.join(", "));
            }
        }

        report
    }
}

/// Empty taste sets for every non-universal entity.
pub fn skeleton<'a>(entities: impl IntoIterator<Item = &'a EntityId>) -> TasteMap {
    entities
        .into_iter()
        .filter(|id| !id.is_universal())
        .map(|id| (id.clone(), empty_categories()))
        .collect()
}

/// One empty set per category.
pub fn empty_categories() -> CategorySets {
    ReactionCategory::ALL
        .into_iter()
        .map(|category| (category, BTreeSet::new()))
        .collect()
}
