//! Dialogue template compiler - turns host templates into per-entity matchers.
//!
//! A host template is a regular expression with two positional slots:
//! `{0}` for the associate reference and `{1}` for the item name. Each
//! speaking entity gets its own compiled copy with `{0}` replaced by an
//! alternation of that entity's reference phrases.

use gift_catalogue::{EntityId, HostCatalogue, ReactionCategory};
use regex::Regex;
use std::collections::{BTreeMap, HashMap};

use super::{RelationshipEntry, RelationshipIndex};

/// Slot for the associate reference.
pub const CHARACTER_SLOT: &str = "{0}";

/// Slot for the item name.
pub const ITEM_SLOT: &str = "{1}";

/// Capture group holding the associate reference.
pub const CHARACTER_GROUP: &str = "character";

/// Capture group holding the item name.
pub const ITEM_GROUP: &str = "item";

/// A run of letters, spaces and hyphens, starting with a letter.
const ITEM_PATTERN: &str = r"[A-Za-z][A-Za-z \-]*";

/// Compiled matchers for one speaking entity, in host-declared order.
pub type EntityMatchers = BTreeMap<ReactionCategory, Vec<Regex>>;

/// Compiled matchers for every entity with a relationship entry.
///
/// Immutable once built; a content reload builds a new set.
#[derive(Debug, Clone, Default)]
pub struct TemplateSet {
    matchers: HashMap<EntityId, EntityMatchers>,
}

impl TemplateSet {
    /// Compile every text-inferable template for every entity in `index`.
    pub fn compile(index: &RelationshipIndex, catalogue: &HostCatalogue) -> Self {
        let mut matchers = HashMap::new();
        for entity in catalogue.relationships.keys() {
            let Some(entry) = index.get(entity) else {
                continue;
            };
            let compiled = compile_entity(entity, entry, catalogue);
            if compiled.values().any(|m| !m.is_empty()) {
                matchers.insert(entity.clone(), compiled);
            }
        }
        Self { matchers }
    }

    /// Matchers for one entity and category; empty when there are none.
    pub fn matchers(&self, entity: &EntityId, category: ReactionCategory) -> &[Regex] {
        self.matchers
            .get(entity)
            .and_then(|by_category| by_category.get(&category))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Number of entities with at least one matcher.
    pub fn entity_count(&self) -> usize {
        self.matchers.len()
    }
}

/// Compile one entity's matchers.
///
/// Templates that fail to compile are logged and skipped.
pub fn compile_entity(
    entity: &EntityId,
    entry: &RelationshipEntry,
    catalogue: &HostCatalogue,
) -> EntityMatchers {
    let mut compiled = EntityMatchers::new();
    let Some(alternation) = character_alternation(entry) else {
        tracing::warn!(entity = %entity, "No reference phrases, skipping templates");
        return compiled;
    };

    for category in ReactionCategory::TEXT_INFERABLE {
        let list = compiled.entry(category).or_default();
        for template in catalogue.templates_for(category) {
            match compile_template(template, &alternation) {
                Ok(regex) => list.push(regex),
                Err(err) => {
                    tracing::warn!(
                        entity = %entity,
                        ?category,
                        template,
                        "Skipping dialogue template: {}",
                        err
                    );
                }
            }
        }
    }
    compiled
}

/// Why a template could not be compiled.
#[derive(Debug, thiserror::Error)]
pub enum TemplateError {
    #[error("template is missing the {0} slot")]
    MissingSlot(&'static str),

    #[error("invalid pattern: {0}")]
    Regex(#[from] regex::Error),
}

/// Substitute both slots and compile.
pub fn compile_template(template: &str, alternation: &str) -> Result<Regex, TemplateError> {
    for slot in [CHARACTER_SLOT, ITEM_SLOT] {
        if !template.contains(slot) {
            return Err(TemplateError::MissingSlot(slot));
        }
    }

    // Both groups start on a word boundary so "gil" never matches inside "Virgil".
    let pattern = template
        .replace(
            CHARACTER_SLOT,
            &format!(r"\b(?P<{CHARACTER_GROUP}>(?i:{alternation}))\b"),
        )
        .replace(ITEM_SLOT, &format!(r"\b(?P<{ITEM_GROUP}>{ITEM_PATTERN})"));
    Ok(Regex::new(&pattern)?)
}

/// Escaped alternation of all phrases, longest first so a short phrase
/// never shadows a longer one that contains it.
pub fn character_alternation(entry: &RelationshipEntry) -> Option<String> {
    let mut phrases: Vec<&str> = entry.phrases().collect();
    if phrases.is_empty() {
        return None;
    }
    phrases.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));
    Some(
        phrases
            .into_iter()
            .map(regex::escape)
            .collect::<Vec<_>>()
            .join("|"),
    )
}
