//! Event classifier - turns an inventory loss plus a reaction line into a fact.

use gift_catalogue::{direct_reaction, DialogueContext, HostCatalogue, InventoryDelta, ReactionOracle};

use crate::taste_store::Fact;

/// The item an inventory delta gave away, if it looks like a gift.
///
/// Gifts leave one at a time, so only the first entry is considered. A
/// removed stack wins over a shrinking one.
pub fn gifted_item(delta: &InventoryDelta) -> Option<&str> {
    if let Some(stack) = delta.removed.first() {
        return Some(&stack.name);
    }
    delta
        .quantity_changed
        .first()
        .filter(|change| change.stack_change < 0)
        .map(|change| change.item.name.as_str())
}

/// Correlates inventory losses with the host's reaction dialogue.
pub struct EventClassifier<'a, O: ReactionOracle + ?Sized> {
    catalogue: &'a HostCatalogue,
    oracle: &'a O,
}

impl<'a, O: ReactionOracle + ?Sized> EventClassifier<'a, O> {
    pub fn new(catalogue: &'a HostCatalogue, oracle: &'a O) -> Self {
        Self { catalogue, oracle }
    }

    /// Produce a direct fact for the recipient of a gift.
    ///
    /// Requires an active dialogue whose current line is one of the
    /// speaker's known gift reactions; anything else (deliveries, ordinary
    /// conversation, no dialogue at all) is not observable as a gift here.
    pub fn classify(&self, delta: &InventoryDelta, dialogue: Option<&DialogueContext>) -> Option<Fact> {
        let item = gifted_item(delta)?;
        let dialogue = dialogue?;

        if !self
            .catalogue
            .is_reactive_line(&dialogue.speaker, &dialogue.current_line)
        {
            tracing::debug!(speaker = %dialogue.speaker, item, "Item left inventory without a gift reaction");
            return None;
        }

        let category = direct_reaction(self.oracle, &dialogue.speaker, item)?;
        Some(Fact::direct(dialogue.speaker.clone(), item, category))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::taste_store::FactSource;
    use gift_catalogue::{EntityId, ItemStack, QuantityChange, ReactionCategory};

    const THANKS: &str = "Oh, a Daffodil! I love these!";

    struct LovesEverything;

    impl ReactionOracle for LovesEverything {
        fn gift_taste_code(&self, _entity: &EntityId, _item: &str) -> i32 {
            ReactionCategory::Love.host_code()
        }
    }

    fn catalogue() -> HostCatalogue {
        HostCatalogue::new()
            .with_entity("Caroline")
            .with_reactive_line("Caroline", THANKS)
    }

    fn shrink(name: &str, by: i32) -> QuantityChange {
        QuantityChange {
            item: ItemStack::new(name, 3),
            stack_change: by,
        }
    }

    #[test]
    fn test_gifted_item_prefers_removal() {
        let delta = InventoryDelta {
            removed: vec![ItemStack::new("Daffodil", 1)],
            quantity_changed: vec![shrink("Leek", -1)],
            ..Default::default()
        };
        assert_eq!(gifted_item(&delta), Some("Daffodil"));
    }

    #[test]
    fn test_gifted_item_quantity_change() {
        assert_eq!(
            gifted_item(&InventoryDelta::quantity_changed([shrink("Leek", -1)])),
            Some("Leek")
        );
        assert_eq!(
            gifted_item(&InventoryDelta::quantity_changed([shrink("Leek", 2)])),
            None
        );
        assert_eq!(gifted_item(&InventoryDelta::default()), None);
    }

    #[test]
    fn test_classify_direct_gift() {
        let catalogue = catalogue();
        let classifier = EventClassifier::new(&catalogue, &LovesEverything);

        let fact = classifier
            .classify(
                &InventoryDelta::removed([ItemStack::new("Daffodil", 1)]),
                Some(&DialogueContext::new("Caroline", THANKS)),
            )
            .unwrap();

        assert_eq!(fact.entity, EntityId::from("Caroline"));
        assert_eq!(fact.item, "Daffodil");
        assert_eq!(fact.category, ReactionCategory::Love);
        assert_eq!(fact.source, FactSource::DirectGift);
    }

    #[test]
    fn test_classify_requires_reaction_line() {
        let catalogue = catalogue();
        let classifier = EventClassifier::new(&catalogue, &LovesEverything);
        let delta = InventoryDelta::removed([ItemStack::new("Daffodil", 1)]);

        assert!(classifier.classify(&delta, None).is_none());
        assert!(classifier
            .classify(
                &delta,
                Some(&DialogueContext::new("Caroline", "Thanks for the delivery."))
            )
            .is_none());
        assert!(classifier
            .classify(&delta, Some(&DialogueContext::new("Pierre", THANKS)))
            .is_none());
    }

    #[test]
    fn test_classify_ignores_gains() {
        let catalogue = catalogue();
        let classifier = EventClassifier::new(&catalogue, &LovesEverything);
        let delta = InventoryDelta {
            added: vec![ItemStack::new("Daffodil", 1)],
            ..Default::default()
        };

        assert!(classifier
            .classify(&delta, Some(&DialogueContext::new("Caroline", THANKS)))
            .is_none());
    }
}
