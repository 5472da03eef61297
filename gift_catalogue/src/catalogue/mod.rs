//! Host content snapshot - everything the tracker reads from host data files.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use thiserror::Error;

use crate::entities::EntityId;
use crate::reactions::ReactionCategory;

/// Errors raised while reading a catalogue document.
#[derive(Debug, Error)]
pub enum CatalogueError {
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),
}

/// One host dialogue template for a text-inferable category.
///
/// `{0}` stands for the character reference and `{1}` for the item name;
/// the rest of the template is a regular expression.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DialogueTemplate {
    pub category: ReactionCategory,
    pub template: String,
}

/// Snapshot of the host's gift-related content.
///
/// Built once per content load and replaced as a whole on reload.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HostCatalogue {
    /// Every row of the host's gift-taste table, universal placeholders included.
    #[serde(default)]
    pub entities: Vec<EntityId>,

    /// Entity -> flat list alternating associate id and relation token.
    #[serde(default)]
    pub relationships: BTreeMap<EntityId, Vec<String>>,

    /// Templates in host-declared order.
    #[serde(default)]
    pub dialogue_templates: Vec<DialogueTemplate>,

    /// Entity -> exact lines that mean "this entity is reacting to a gift".
    #[serde(default)]
    pub reactive_lines: BTreeMap<EntityId, BTreeSet<String>>,
}

impl HostCatalogue {
    /// Create an empty catalogue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a catalogue from a TOML document.
    pub fn from_toml_str(source: &str) -> Result<Self, CatalogueError> {
        Ok(toml::from_str(source)?)
    }

    /// Entities that can hold tastes, with universal placeholders removed.
    pub fn gift_entities(&self) -> impl Iterator<Item = &EntityId> + '_ {
        self.entities.iter().filter(|id| !id.is_universal())
    }

    /// Templates for one category, in declared order.
    pub fn templates_for(
        &self,
        category: ReactionCategory,
    ) -> impl Iterator<Item = &str> + '_ {
        self.dialogue_templates
            .iter()
            .filter(move |t| t.category == category)
            .map(|t| t.template.as_str())
    }

    /// Whether `line` is one of `speaker`'s gift reactions.
    pub fn is_reactive_line(&self, speaker: &EntityId, line: &str) -> bool {
        self.reactive_lines
            .get(speaker)
            .is_some_and(|lines| lines.contains(line))
    }

    /// Add a gift-taste row.
    pub fn with_entity(mut self, id: impl Into<EntityId>) -> Self {
        self.entities.push(id.into());
        self
    }

    /// Attach a relationship record to an entity.
    pub fn with_relationships<I, S>(mut self, id: impl Into<EntityId>, tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.relationships
            .insert(id.into(), tokens.into_iter().map(Into::into).collect());
        self
    }

    /// Append a dialogue template.
    pub fn with_template(mut self, category: ReactionCategory, template: impl Into<String>) -> Self {
        self.dialogue_templates.push(DialogueTemplate {
            category,
            template: template.into(),
        });
        self
    }

    /// Register a gift-reaction line for an entity.
    pub fn with_reactive_line(mut self, id: impl Into<EntityId>, line: impl Into<String>) -> Self {
        self.reactive_lines
            .entry(id.into())
            .or_default()
            .insert(line.into());
        self
    }
}

/// Split a host disposition string such as `"Caroline 'wife' Jas 'daughter'"`
/// into the flat token list used for relationship records.
pub fn relation_tokens(raw: &str) -> Vec<String> {
    raw.split_whitespace().map(str::to_string).collect()
}
