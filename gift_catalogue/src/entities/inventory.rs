//! Inventory and dialogue observations delivered by the host.

use serde::{Deserialize, Serialize};

use super::EntityId;

/// A stack of items in the player's inventory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemStack {
    /// Canonical host item name, compared case-sensitively.
    pub name: String,
    pub quantity: u32,
}

impl ItemStack {
    pub fn new(name: impl Into<String>, quantity: u32) -> Self {
        Self {
            name: name.into(),
            quantity,
        }
    }
}

/// A change in size of a stack that stayed in the inventory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuantityChange {
    pub item: ItemStack,
    /// Signed change; negative means items left the inventory.
    pub stack_change: i32,
}

/// One inventory-changed notification from the host.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryDelta {
    #[serde(default)]
    pub added: Vec<ItemStack>,
    #[serde(default)]
    pub removed: Vec<ItemStack>,
    #[serde(default)]
    pub quantity_changed: Vec<QuantityChange>,
}

impl InventoryDelta {
    /// A delta where whole stacks were removed.
    pub fn removed(items: impl IntoIterator<Item = ItemStack>) -> Self {
        Self {
            removed: items.into_iter().collect(),
            ..Default::default()
        }
    }

    /// A delta where existing stacks changed size.
    pub fn quantity_changed(changes: impl IntoIterator<Item = QuantityChange>) -> Self {
        Self {
            quantity_changed: changes.into_iter().collect(),
            ..Default::default()
        }
    }
}

/// The reactive dialogue box currently shown by the host, if any.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DialogueContext {
    pub speaker: EntityId,
    /// The exact line on screen.
    pub current_line: String,
}

impl DialogueContext {
    pub fn new(speaker: impl Into<EntityId>, current_line: impl Into<String>) -> Self {
        Self {
            speaker: speaker.into(),
            current_line: current_line.into(),
        }
    }
}
