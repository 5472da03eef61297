//! Fact definitions - the unit the taste store holds.

use gift_catalogue::{EntityId, ReactionCategory};
use serde::{Deserialize, Serialize};

/// How a fact was observed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FactSource {
    /// Inventory loss correlated with the recipient's reaction line.
    DirectGift,
    /// Parsed from a third party talking about the gift.
    Dialogue,
}

/// A confirmed (entity, item, category) association.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fact {
    pub entity: EntityId,

    /// Canonical host item name, compared case-sensitively.
    pub item: String,

    pub category: ReactionCategory,

    pub source: FactSource,
}

impl Fact {
    /// Create a fact learned on the direct path.
    pub fn direct(
        entity: impl Into<EntityId>,
        item: impl Into<String>,
        category: ReactionCategory,
    ) -> Self {
        Self {
            entity: entity.into(),
            item: item.into(),
            category,
            source: FactSource::DirectGift,
        }
    }
}

/// Result of a successful dialogue match, before the store validates it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateFact {
    /// The associate the speaker referred to.
    pub associate: EntityId,
    pub item: String,
    pub category: ReactionCategory,
}

impl From<CandidateFact> for Fact {
    fn from(candidate: CandidateFact) -> Self {
        Self {
            entity: candidate.associate,
            item: candidate.item,
            category: candidate.category,
            source: FactSource::Dialogue,
        }
    }
}

impl std::fmt::Display for Fact {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {} {}", self.entity, self.category.verb(), self.item)
    }
}
