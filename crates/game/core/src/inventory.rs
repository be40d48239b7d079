//! Player inventory snapshot and consumable usage checks.
//!
//! The caller owns persistence; this module only validates a session's claimed
//! item usage against a snapshot and decrements it in memory.

use std::collections::BTreeMap;

use crate::error::{ErrorSeverity, GameError};

/// Identifier of an item kind (e.g. `"extra_life"`).
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct ItemVariant(pub String);

impl ItemVariant {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl core::fmt::Display for ItemVariant {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ItemVariant {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

/// An owned item capability.
///
/// Only consumables carry a quantity and can be spent during a session.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "kind", rename_all = "snake_case"))]
pub enum InventoryItem {
    Consumable(ConsumableItem),
    Permanent { variant: ItemVariant },
}

impl InventoryItem {
    pub fn consumable(variant: impl Into<ItemVariant>, quantity: u32) -> Self {
        Self::Consumable(ConsumableItem::new(variant, quantity))
    }

    pub fn permanent(variant: impl Into<ItemVariant>) -> Self {
        Self::Permanent {
            variant: variant.into(),
        }
    }

    pub fn variant(&self) -> &ItemVariant {
        match self {
            Self::Consumable(item) => &item.variant,
            Self::Permanent { variant } => variant,
        }
    }
}

/// A quantity-bearing item.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ConsumableItem {
    pub variant: ItemVariant,
    quantity: u32,
}

impl ConsumableItem {
    pub fn new(variant: impl Into<ItemVariant>, quantity: u32) -> Self {
        Self {
            variant: variant.into(),
            quantity,
        }
    }

    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    /// Spends one unit.
    pub fn consume(&mut self) -> Result<(), InventoryError> {
        self.quantity = self
            .quantity
            .checked_sub(1)
            .ok_or_else(|| InventoryError::Exhausted(self.variant.clone()))?;
        Ok(())
    }
}

/// Claimed usage grouped by variant, in variant order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ItemUsage(BTreeMap<ItemVariant, u32>);

impl ItemUsage {
    pub fn from_claims<'a>(claims: impl IntoIterator<Item = &'a ItemVariant>) -> Self {
        let mut counts = BTreeMap::new();
        for variant in claims {
            *counts.entry(variant.clone()).or_insert(0) += 1;
        }
        Self(counts)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn count(&self, variant: &ItemVariant) -> u32 {
        self.0.get(variant).copied().unwrap_or(0)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&ItemVariant, u32)> {
        self.0.iter().map(|(variant, count)| (variant, *count))
    }
}

/// Snapshot of everything a player owns.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Inventory {
    items: Vec<InventoryItem>,
}

impl Inventory {
    pub fn new(items: Vec<InventoryItem>) -> Self {
        Self { items }
    }

    pub fn items(&self) -> &[InventoryItem] {
        &self.items
    }

    pub fn get(&self, variant: &ItemVariant) -> Option<&InventoryItem> {
        self.items.iter().find(|item| item.variant() == variant)
    }

    /// Remaining quantity of a consumable, `None` if absent or permanent.
    pub fn quantity_of(&self, variant: &ItemVariant) -> Option<u32> {
        match self.get(variant)? {
            InventoryItem::Consumable(item) => Some(item.quantity()),
            InventoryItem::Permanent { .. } => None,
        }
    }

    fn consumable_mut(&mut self, variant: &ItemVariant) -> Option<&mut ConsumableItem> {
        self.items.iter_mut().find_map(|item| match item {
            InventoryItem::Consumable(consumable) if &consumable.variant == variant => {
                Some(consumable)
            }
            _ => None,
        })
    }

    /// Checks that every claimed variant is an owned consumable with enough units.
    ///
    /// Leaves the inventory untouched.
    pub fn check_usage(&self, usage: &ItemUsage) -> Result<(), InventoryError> {
        for (variant, requested) in usage.iter() {
            match self.get(variant) {
                None => return Err(InventoryError::NotOwned(variant.clone())),
                Some(InventoryItem::Permanent { .. }) => {
                    return Err(InventoryError::NotConsumable(variant.clone()));
                }
                Some(InventoryItem::Consumable(item)) if item.quantity() < requested => {
                    return Err(InventoryError::Insufficient {
                        variant: variant.clone(),
                        owned: item.quantity(),
                        requested,
                    });
                }
                Some(InventoryItem::Consumable(_)) => {}
            }
        }
        Ok(())
    }

    /// Validates `claims` and spends them one unit at a time.
    ///
    /// Nothing is decremented unless the whole usage is valid.
    pub fn spend(&mut self, claims: &[ItemVariant]) -> Result<ItemUsage, InventoryError> {
        let usage = ItemUsage::from_claims(claims);
        self.check_usage(&usage)?;

        for (variant, count) in usage.iter() {
            let item = self
                .consumable_mut(variant)
                .ok_or_else(|| InventoryError::NotOwned(variant.clone()))?;
            for _ in 0..count {
                item.consume()?;
            }
        }
        Ok(usage)
    }
}

/// Rejected item usage.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum InventoryError {
    #[error("item {0} is not in the inventory")]
    NotOwned(ItemVariant),

    #[error("item {0} is not consumable")]
    NotConsumable(ItemVariant),

    #[error("item {variant}: requested {requested}, owned {owned}")]
    Insufficient {
        variant: ItemVariant,
        owned: u32,
        requested: u32,
    },

    #[error("item {0} consumed below zero")]
    Exhausted(ItemVariant),
}

impl GameError for InventoryError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::NotOwned(_) | Self::NotConsumable(_) | Self::Insufficient { .. } => {
                ErrorSeverity::Validation
            }
            Self::Exhausted(_) => ErrorSeverity::Internal,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::NotOwned(_) => "ITEM_NOT_OWNED",
            Self::NotConsumable(_) => "ITEM_NOT_CONSUMABLE",
            Self::Insufficient { .. } => "ITEM_INSUFFICIENT",
            Self::Exhausted(_) => "ITEM_EXHAUSTED",
        }
    }
}
