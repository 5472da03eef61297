//! Dialogue inference - recovers third-party gift reactions from speech.
//!
//! The pipeline works as follows:
//! 1. **Relationships**: each entity's associates are indexed by the phrases
//!    the entity uses for them ("my wife", "Haley")
//! 2. **Templates**: host dialogue templates are compiled per entity with
//!    those phrases substituted in
//! 3. **Inference**: an utterance is matched against the speaker's templates,
//!    and the captured phrase is resolved back to an associate

mod relationship;
mod templates;

pub use relationship::*;
pub use templates::*;

use gift_catalogue::{EntityId, HostCatalogue, ReactionCategory};

use crate::taste_store::CandidateFact;

/// Matches utterances against per-entity compiled templates.
///
/// The relationship index and the templates are built together from one
/// catalogue snapshot and replaced together.
#[derive(Debug, Clone, Default)]
pub struct DialogueInferenceEngine {
    relationships: RelationshipIndex,
    templates: TemplateSet,
}

impl DialogueInferenceEngine {
    /// Build the index and compile every template from one catalogue.
    pub fn new(catalogue: &HostCatalogue) -> Self {
        let relationships = RelationshipIndex::build(catalogue);
        let templates = TemplateSet::compile(&relationships, catalogue);
        tracing::debug!(
            relationships = relationships.len(),
            speakers = templates.entity_count(),
            "Compiled dialogue templates"
        );
        Self {
            relationships,
            templates,
        }
    }

    /// Try `speaker`'s matchers for `category` in order; the first match wins.
    pub fn infer(
        &self,
        speaker: &EntityId,
        utterance: &str,
        category: ReactionCategory,
    ) -> Option<CandidateFact> {
        for matcher in self.templates.matchers(speaker, category) {
            let Some(caps) = matcher.captures(utterance) else {
                continue;
            };

            let phrase = caps.name(CHARACTER_GROUP)?.as_str();
            let item = caps.name(ITEM_GROUP)?.as_str().trim();
            let Some(associate) = self.relationships.resolve(speaker, phrase) else {
                tracing::warn!(speaker = %speaker, phrase, "Matched phrase missing from relationship index");
                return None;
            };

            return Some(CandidateFact {
                associate: associate.clone(),
                item: item.to_string(),
                category,
            });
        }
        None
    }

    /// Try every text-inferable category in display order.
    pub fn infer_any(&self, speaker: &EntityId, utterance: &str) -> Option<CandidateFact> {
        ReactionCategory::TEXT_INFERABLE
            .into_iter()
            .find_map(|category| self.infer(speaker, utterance, category))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine() -> DialogueInferenceEngine {
        let catalogue = HostCatalogue::new()
            .with_relationships("Pierre", ["Caroline", "wife", "Abigail", "daughter"])
            .with_relationships("Marlon", ["Gil", "friend", "Clint"])
            .with_relationships("Haley", ["Emily", "''", "Gil", "''"])
            .with_template(ReactionCategory::Love, "{0} really loves the {1} I gave (him|her)!")
            .with_template(ReactionCategory::Love, "{0} can't stop talking about the {1}!")
            .with_template(ReactionCategory::Hate, "{0} was upset about the {1} I gave (him|her).");
        DialogueInferenceEngine::new(&catalogue)
    }

    #[test]
    fn test_infer_possessive() {
        let fact = engine()
            .infer(
                &EntityId::from("Pierre"),
                "my wife really loves the Daffodil I gave her!",
                ReactionCategory::Love,
            )
            .unwrap();

        assert_eq!(
            fact,
            CandidateFact {
                associate: EntityId::from("Caroline"),
                item: "Daffodil".to_string(),
                category: ReactionCategory::Love,
            }
        );
    }

    #[test]
    fn test_infer_sentence_case_and_second_template() {
        let fact = engine()
            .infer(
                &EntityId::from("pierre"),
                "My daughter can't stop talking about the Amethyst!",
                ReactionCategory::Love,
            )
            .unwrap();
        assert_eq!(fact.associate, EntityId::from("Abigail"));
        assert_eq!(fact.item, "Amethyst");
    }

    #[test]
    fn test_infer_bare_name() {
        let fact = engine()
            .infer_any(
                &EntityId::from("Haley"),
                "Emily was upset about the Salmonberry I gave her.",
            )
            .unwrap();
        assert_eq!(fact.associate, EntityId::from("Emily"));
        assert_eq!(fact.category, ReactionCategory::Hate);
    }

    #[test]
    fn test_infer_misses() {
        let engine = engine();
        let pierre = EntityId::from("Pierre");

        assert!(engine
            .infer(&pierre, "Welcome to my shop!", ReactionCategory::Love)
            .is_none());
        assert!(engine
            .infer(
                &pierre,
                "my wife really loves the Daffodil I gave her!",
                ReactionCategory::Hate
            )
            .is_none());
        assert!(engine
            .infer(
                &pierre,
                "my cousin really loves the Daffodil I gave her!",
                ReactionCategory::Love
            )
            .is_none());
    }

    #[test]
    fn test_phrase_must_be_whole_word() {
        let engine = engine();
        let haley = EntityId::from("Haley");

        assert!(engine
            .infer(
                &haley,
                "Virgil really loves the Daffodil I gave her!",
                ReactionCategory::Love
            )
            .is_none());

        let fact = engine
            .infer(
                &haley,
                "Gil really loves the Daffodil I gave him!",
                ReactionCategory::Love,
            )
            .unwrap();
        assert_eq!(fact.associate, EntityId::from("Gil"));
    }

    #[test]
    fn test_first_matching_template_wins() {
        let relations = ["Caroline", "wife"];
        let specific = "{0} said the {1} was lovely";
        let general = "{0} said the {1}";
        let line = "my wife said the Tulip was lovely";
        let pierre = EntityId::from("Pierre");

        let specific_first = DialogueInferenceEngine::new(
            &HostCatalogue::new()
                .with_relationships("Pierre", relations)
                .with_template(ReactionCategory::Love, specific)
                .with_template(ReactionCategory::Love, general),
        );
        let fact = specific_first
            .infer(&pierre, line, ReactionCategory::Love)
            .unwrap();
        assert_eq!(fact.item, "Tulip");

        let general_first = DialogueInferenceEngine::new(
            &HostCatalogue::new()
                .with_relationships("Pierre", relations)
                .with_template(ReactionCategory::Love, general)
                .with_template(ReactionCategory::Love, specific),
        );
        let fact = general_first
            .infer(&pierre, line, ReactionCategory::Love)
            .unwrap();
        assert_eq!(fact.item, "Tulip was lovely");
    }

    #[test]
    fn test_malformed_relations_have_no_inference() {
        assert!(engine()
            .infer_any(
                &EntityId::from("Marlon"),
                "my friend really loves the Daffodil I gave him!",
            )
            .is_none());
    }

    #[test]
    fn test_unknown_speaker() {
        assert!(engine()
            .infer_any(
                &EntityId::from("Krobus"),
                "my wife really loves the Daffodil I gave her!",
            )
            .is_none());
    }
}
