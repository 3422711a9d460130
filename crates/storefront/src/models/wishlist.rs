//! Wishlist stored in the session.

use bazaar_core::{ProductId, WishlistItem};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Upper bound for saved products per session.
pub const MAX_WISHLIST_ITEMS: usize = 100;

/// Errors from wishlist operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WishlistError {
    #[error("wishlist already holds {MAX_WISHLIST_ITEMS} products")]
    Full,
}

/// Saved products, oldest first, without duplicates.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Wishlist {
    #[serde(default)]
    items: Vec<WishlistItem>,
}

impl Wishlist {
    #[must_use]
    pub fn items(&self) -> &[WishlistItem] {
        &self.items
    }

    #[must_use]
    pub fn contains(&self, product_id: ProductId) -> bool {
        self.items.iter().any(|i| i.product_id == product_id)
    }

    /// Add a product. Returns `false` if it was already saved.
    ///
    /// # Errors
    ///
    /// Returns `WishlistError::Full` once `MAX_WISHLIST_ITEMS` are saved.
    pub fn add(&mut self, product_id: ProductId) -> Result<bool, WishlistError> {
        if self.contains(product_id) {
            return Ok(false);
        }
        if self.is_full() {
            return Err(WishlistError::Full);
        }
        self.items.push(WishlistItem {
            product_id,
            added_at: Utc::now(),
        });
        Ok(true)
    }

    /// Remove a product. Returns whether it was present.
    pub fn remove(&mut self, product_id: ProductId) -> bool {
        let before = self.items.len();
        self.items.retain(|i| i.product_id != product_id);
        self.items.len() != before
    }

    /// Add the product if absent, remove it otherwise.
    ///
    /// Returns whether the product is saved afterwards.
    ///
    /// # Errors
    ///
    /// Returns `WishlistError::Full` when adding to a full wishlist.
    pub fn toggle(&mut self, product_id: ProductId) -> Result<bool, WishlistError> {
        if self.remove(product_id) {
            Ok(false)
        } else {
            self.add(product_id)
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_full(&self) -> bool {
        self.items.len() >= MAX_WISHLIST_ITEMS
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn product_ids(&self) -> impl Iterator<Item = ProductId> + '_ {
        self.items.iter().map(|i| i.product_id)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle() {
        let mut wishlist = Wishlist::default();
        let id = ProductId::new(3);
        assert!(wishlist.toggle(id).unwrap());
        assert!(wishlist.contains(id));
        assert!(!wishlist.toggle(id).unwrap());
        assert!(wishlist.is_empty());
    }

    #[test]
    fn test_add_is_idempotent_and_ordered() {
        let mut wishlist = Wishlist::default();
        assert!(wishlist.add(ProductId::new(2)).unwrap());
        assert!(wishlist.add(ProductId::new(1)).unwrap());
        assert!(!wishlist.add(ProductId::new(2)).unwrap());
        assert_eq!(wishlist.len(), 2);
        assert_eq!(
            wishlist.product_ids().collect::<Vec<_>>(),
            vec![ProductId::new(2), ProductId::new(1)]
        );
    }

    #[test]
    fn test_remove_missing_returns_false() {
        let mut wishlist = Wishlist::default();
        assert!(!wishlist.remove(ProductId::new(9)));
    }

    #[test]
    fn test_full_wishlist_rejects_new_products() {
        let mut wishlist = Wishlist::default();
        for id in 1..=MAX_WISHLIST_ITEMS {
            wishlist.add(ProductId::new(i64::try_from(id).unwrap())).unwrap();
        }
        assert!(wishlist.is_full());

        let extra = ProductId::new(10_000);
        assert_eq!(wishlist.add(extra), Err(WishlistError::Full));
        assert_eq!(wishlist.toggle(extra), Err(WishlistError::Full));
        assert_eq!(wishlist.len(), MAX_WISHLIST_ITEMS);

        // Saved products can still be removed, which frees a slot
        assert!(!wishlist.toggle(ProductId::new(1)).unwrap());
        assert!(wishlist.toggle(extra).unwrap());
    }
}
