//! Relationship index - how each entity refers to its associates in speech.

use gift_catalogue::{EntityId, HostCatalogue};
use std::collections::{BTreeMap, HashMap};

/// Reference phrases one entity uses for its associates.
///
/// Phrases are stored lower-cased; lookups ignore case.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RelationshipEntry {
    phrases: BTreeMap<String, EntityId>,
}

impl RelationshipEntry {
    /// Build an entry from a flat `[associate, relation, associate, relation, ...]` record.
    ///
    /// Returns `None` for records that are too short or have odd length, and
    /// for records where no pair yields a usable phrase.
    pub fn build<S: AsRef<str>>(tokens: &[S]) -> Option<Self> {
        if tokens.len() <= 1 || tokens.len() % 2 != 0 {
            return None;
        }

        let mut phrases = BTreeMap::new();
        for pair in tokens.chunks_exact(2) {
            let associate = pair[0].as_ref().trim();
            if associate.is_empty() {
                continue;
            }
            let relation = normalize_relation(pair[1].as_ref());
            let phrase = if relation.is_empty() {
                associate.to_lowercase()
            } else {
                format!("my {}", relation.to_lowercase())
            };
            phrases.insert(phrase, EntityId::new(associate));
        }

        if phrases.is_empty() {
            None
        } else {
            Some(Self { phrases })
        }
    }

    /// Resolve a reference phrase to the associate it names.
    pub fn get(&self, phrase: &str) -> Option<&EntityId> {
        self.phrases.get(&phrase.trim().to_lowercase())
    }

    /// All known phrases, lower-cased.
    pub fn phrases(&self) -> impl Iterator<Item = &str> + '_ {
        self.phrases.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.phrases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.phrases.is_empty()
    }
}

/// Strip enclosing quotes and turn separators into spaces.
///
/// An empty result is the "no relation" marker: the associate is referred to
/// by name.
pub fn normalize_relation(token: &str) -> String {
    let mut relation = token.trim();
    for quote in ['\'', '"'] {
        relation = relation.strip_prefix(quote).unwrap_or(relation);
        relation = relation.strip_suffix(quote).unwrap_or(relation);
    }

    relation
        .split(|c: char| c == '_' || c.is_whitespace())
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Per-entity relationship entries for the whole catalogue.
#[derive(Debug, Clone, Default)]
pub struct RelationshipIndex {
    entries: HashMap<EntityId, RelationshipEntry>,
}

impl RelationshipIndex {
    /// Build the index from host relationship records.
    ///
    /// Malformed records are skipped; those entities get no entry and no
    /// third-party inference.
    pub fn build(catalogue: &HostCatalogue) -> Self {
        let mut entries = HashMap::new();
        for (entity, tokens) in &catalogue.relationships {
            match RelationshipEntry::build(tokens.as_slice()) {
                Some(entry) => {
                    entries.insert(entity.clone(), entry);
                }
                None => {
                    tracing::warn!(
                        entity = %entity,
                        tokens = tokens.len(),
                        "Skipping malformed relationship record"
                    );
                }
            }
        }
        Self { entries }
    }

    /// The entry for `entity`, if its record was usable.
    pub fn get(&self, entity: &EntityId) -> Option<&RelationshipEntry> {
        self.entries.get(entity)
    }

    /// Resolve `phrase` as spoken by `entity`.
    pub fn resolve(&self, entity: &EntityId, phrase: &str) -> Option<&EntityId> {
        self.get(entity).and_then(|entry| entry.get(phrase))
    }

    /// Number of entities with an entry.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_possessive_phrases() {
        let entry = RelationshipEntry::build(&["Caroline", "wife", "Jas", "daughter"]).unwrap();

        assert_eq!(entry.get("my wife"), Some(&EntityId::from("Caroline")));
        assert_eq!(entry.get("my daughter"), Some(&EntityId::from("Jas")));
        assert_eq!(entry.get("My Wife"), Some(&EntityId::from("Caroline")));
        assert_eq!(entry.len(), 2);
    }

    #[test]
    fn test_quoted_and_underscored_relations() {
        let entry =
            RelationshipEntry::build(&["Gus", "'best_friend'", "Evelyn", "\"grand_mother\""])
                .unwrap();

        assert_eq!(entry.get("my best friend"), Some(&EntityId::from("Gus")));
        assert_eq!(entry.get("my grand mother"), Some(&EntityId::from("Evelyn")));
    }

    #[test]
    fn test_no_relation_uses_name() {
        let entry = RelationshipEntry::build(&["Haley", "''", "Emily", "sister"]).unwrap();

        assert_eq!(entry.get("Haley"), Some(&EntityId::from("Haley")));
        assert_eq!(entry.get("my sister"), Some(&EntityId::from("Emily")));
        let phrases: Vec<_> = entry.phrases().collect();
        assert_eq!(phrases, vec!["haley", "my sister"]);
    }

    #[test]
    fn test_malformed_records_skip() {
        assert!(RelationshipEntry::build(&["Marlon", "friend", "Gil"]).is_none());
        assert!(RelationshipEntry::build(&["Marlon"]).is_none());
        assert!(RelationshipEntry::build::<&str>(&[]).is_none());
        assert!(RelationshipEntry::build(&["", "friend"]).is_none());
    }

    #[test]
    fn test_duplicate_phrase_last_wins() {
        let entry = RelationshipEntry::build(&["Sam", "friend", "Sebastian", "friend"]).unwrap();
        assert_eq!(entry.get("my friend"), Some(&EntityId::from("Sebastian")));
        assert_eq!(entry.len(), 1);
    }

    #[test]
    fn test_normalize_relation() {
        assert_eq!(normalize_relation("'wife'"), "wife");
        assert_eq!(normalize_relation("  'best_friend' "), "best friend");
        assert_eq!(normalize_relation("''"), "");
        assert_eq!(normalize_relation("\"\""), "");
        assert_eq!(normalize_relation("step__son"), "step son");
    }

    #[test]
    fn test_index_from_catalogue() {
        let catalogue = HostCatalogue::new()
            .with_relationships("Pierre", ["Caroline", "wife", "Abigail", "daughter"])
            .with_relationships("Marlon", ["Marlon", "friend", "Gil"]);

        let index = RelationshipIndex::build(&catalogue);

        assert_eq!(index.len(), 1);
        assert_eq!(
            index.resolve(&EntityId::from("pierre"), "my wife"),
            Some(&EntityId::from("Caroline"))
        );
        assert!(index.get(&EntityId::from("Marlon")).is_none());
        assert!(index.resolve(&EntityId::from("Marlon"), "my friend").is_none());
    }
}
