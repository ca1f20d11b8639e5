//! # Wishlist Store
//!
//! Favorited properties, persisted under the `wishlist` key.
//!
//! ## Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Wishlist Operations                                  │
//! │                                                                         │
//! │  UI Action                 Store Call            State Change           │
//! │  ─────────                 ──────────            ────────────           │
//! │                                                                         │
//! │  Tap heart (empty) ──────► toggle() ───────────► entries.push(p)        │
//! │  Tap heart (filled) ─────► toggle() ───────────► entries.retain(≠ id)   │
//! │  "Remove" button ────────► remove(id) ─────────► entries.retain(≠ id)   │
//! │  "Clear all" ────────────► clear() ────────────► entries.clear()        │
//! │  Navbar badge ───────────► count() ────────────► (read only)            │
//! │                                                                         │
//! │  Every state change is written through to storage before returning.    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Invariants
//! - Entries are unique by property `id`
//! - Insertion order is kept (used for grouping and display only)

use stayhub_core::validation::validate_id;
use stayhub_core::{Money, Property, CURRENCY_SYMBOL, WISHLIST_KEY};
use tracing::{debug, info};

use crate::error::StoreResult;
use crate::persist::{load_collection, save_collection};
use crate::storage::KeyValueStorage;

/// Properties the user has favorited.
#[derive(Debug)]
pub struct WishlistStore<S> {
    storage: S,
    entries: Vec<Property>,
}

impl<S: KeyValueStorage> WishlistStore<S> {
    /// Creates an empty wishlist over `storage` without reading it.
    pub fn new(storage: S) -> Self {
        WishlistStore {
            storage,
            entries: Vec::new(),
        }
    }

    /// Creates a wishlist and rehydrates it from `storage`.
    pub fn open(storage: S) -> Self {
        let mut store = Self::new(storage);
        store.rehydrate();
        store
    }

    /// Replaces the in-memory entries with what storage holds.
    ///
    /// Duplicate ids in the stored array are collapsed to their first
    /// occurrence. Returns the number of entries loaded.
    pub fn rehydrate(&mut self) -> usize {
        let stored: Vec<Property> = load_collection(&self.storage, WISHLIST_KEY);

        self.entries.clear();
        for property in stored {
            if !self.is_member(&property.id) {
                self.entries.push(property);
            }
        }

        debug!(count = self.entries.len(), "Wishlist rehydrated");
        self.entries.len()
    }

    /// Adds `property` unless an entry with the same id exists.
    ///
    /// ## Returns
    /// - `Ok(true)` if the property was added and persisted
    /// - `Ok(false)` if it was already present (nothing written)
    /// - `Err(_)` if persisting failed; the entry stays in memory
    pub fn add(&mut self, property: Property) -> StoreResult<bool> {
        validate_id("id", &property.id)?;

        if self.is_member(&property.id) {
            return Ok(false);
        }

        info!(property_id = %property.id, "Adding to wishlist");
        self.entries.push(property);
        self.persist()?;
        Ok(true)
    }

    /// Removes the entry with `property_id`, if present.
    ///
    /// ## Returns
    /// `Ok(true)` if an entry was removed, `Ok(false)` if none matched.
    pub fn remove(&mut self, property_id: &str) -> StoreResult<bool> {
        let before = self.entries.len();
        self.entries.retain(|p| p.id != property_id);

        if self.entries.len() == before {
            return Ok(false);
        }

        info!(property_id = %property_id, "Removed from wishlist");
        self.persist()?;
        Ok(true)
    }

    /// Removes `property` if present, otherwise adds it.
    ///
    /// ## Returns
    /// Whether the property is in the wishlist afterwards.
    pub fn toggle(&mut self, property: Property) -> StoreResult<bool> {
        if self.is_member(&property.id) {
            self.remove(&property.id)?;
            Ok(false)
        } else {
            self.add(property)?;
            Ok(true)
        }
    }

    pub fn is_member(&self, property_id: &str) -> bool {
        self.entries.iter().any(|p| p.id == property_id)
    }

    pub fn count(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Empties the wishlist.
    pub fn clear(&mut self) -> StoreResult<()> {
        info!(count = self.entries.len(), "Clearing wishlist");
        self.entries.clear();
        self.persist()
    }

    /// Entries in insertion order.
    pub fn entries(&self) -> &[Property] {
        &self.entries
    }

    pub fn get(&self, property_id: &str) -> Option<&Property> {
        self.entries.iter().find(|p| p.id == property_id)
    }

    /// Entries grouped by property type, groups in first-seen order.
    pub fn grouped_by_type(&self) -> Vec<(&str, Vec<&Property>)> {
        let mut groups: Vec<(&str, Vec<&Property>)> = Vec::new();
        for property in &self.entries {
            match groups
                .iter_mut()
                .find(|(kind, _)| *kind == property.property_type)
            {
                Some((_, members)) => members.push(property),
                None => groups.push((property.property_type.as_str(), vec![property])),
            }
        }
        groups
    }

    /// Sum of nightly prices across all entries.
    pub fn total_value(&self) -> Money {
        self.entries.iter().map(|p| p.price).sum()
    }

    /// Mean nightly price, rounded; zero for an empty wishlist.
    pub fn average_price(&self) -> Money {
        self.total_value().divide_rounded(self.entries.len())
    }

    /// Plain-text summary for sharing.
    ///
    /// ```text
    /// My Property Wishlist:
    /// Lake House - ₹4,500/night
    /// Sea View Villa - ₹12,000/night
    /// ```
    pub fn share_text(&self) -> String {
        self.share_text_with(CURRENCY_SYMBOL)
    }

    /// Same as [`share_text`](Self::share_text), prices shown with `symbol`.
    pub fn share_text_with(&self, symbol: &str) -> String {
        let mut text = String::from("My Property Wishlist:");
        for property in &self.entries {
            text.push('\n');
            text.push_str(&format!(
                "{} - {}/night",
                property.name,
                property.price.format_with(symbol)
            ));
        }
        text
    }

    fn persist(&self) -> StoreResult<()> {
        save_collection(&self.storage, WISHLIST_KEY, &self.entries)
    }
}
