//! Reaction categories and the host's direct-reaction lookup.

use serde::{Deserialize, Serialize};

use crate::entities::EntityId;

/// How an entity feels about a gift.
///
/// Variants are declared in display order, so `Ord` and [`ReactionCategory::ALL`]
/// agree on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ReactionCategory {
    Love,
    Like,
    Dislike,
    Hate,
    Neutral,
}

impl ReactionCategory {
    /// Every category in display order.
    pub const ALL: [Self; 5] = [
        Self::Love,
        Self::Like,
        Self::Dislike,
        Self::Hate,
        Self::Neutral,
    ];

    /// Categories the host supplies dialogue templates for.
    pub const TEXT_INFERABLE: [Self; 2] = [Self::Love, Self::Hate];

    /// Whether this category can be learned from third-party dialogue.
    pub fn is_text_inferable(&self) -> bool {
        Self::TEXT_INFERABLE.contains(self)
    }

    /// Map one of the host's integer gift-taste codes onto a category.
    pub fn from_host_code(code: i32) -> Option<Self> {
        match code {
            0 => Some(Self::Love),
            2 => Some(Self::Like),
            4 => Some(Self::Dislike),
            6 => Some(Self::Hate),
            8 => Some(Self::Neutral),
            _ => None,
        }
    }

    /// The host's integer code for this category.
    pub fn host_code(&self) -> i32 {
        match self {
            Self::Love => 0,
            Self::Like => 2,
            Self::Dislike => 4,
            Self::Hate => 6,
            Self::Neutral => 8,
        }
    }

    /// Verb used in reports and log lines ("Caroline loves Daffodil").
    pub fn verb(&self) -> &'static str {
        match self {
            Self::Love => "loves",
            Self::Like => "likes",
            Self::Dislike => "dislikes",
            Self::Hate => "hates",
            Self::Neutral => "is neutral about",
        }
    }

    /// Short label used as the report line prefix.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Love => "loves",
            Self::Like => "likes",
            Self::Dislike => "dislikes",
            Self::Hate => "hates",
            Self::Neutral => "neutral",
        }
    }
}

impl std::fmt::Display for ReactionCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// The host's authoritative gift-taste table.
///
/// Implementations answer with the host's raw integer code; callers go
/// through [`direct_reaction`] to get a [`ReactionCategory`].
pub trait ReactionOracle {
    fn gift_taste_code(&self, entity: &EntityId, item: &str) -> i32;
}

/// Ask the host how `entity` feels about `item`.
///
/// Returns `None` when the host answers with a code outside the known set.
pub fn direct_reaction<O>(oracle: &O, entity: &EntityId, item: &str) -> Option<ReactionCategory>
where
    O: ReactionOracle + ?Sized,
{
    let code = oracle.gift_taste_code(entity, item);
    let category = ReactionCategory::from_host_code(code);
    if category.is_none() {
        tracing::warn!(entity = %entity, item, code, "Host returned an unknown gift taste code");
    }
    category
}
