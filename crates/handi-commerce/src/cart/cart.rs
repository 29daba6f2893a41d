//! Cart and line item types.

use crate::error::MarketplaceError;
use crate::ids::{CartId, CartItemId, ProviderId, UserId};
use crate::money::{Currency, Money};
use serde::{Deserialize, Serialize};

/// Maximum quantity allowed per line item.
pub const MAX_QUANTITY_PER_ITEM: i64 = 999;

/// A product or service line in the cart.
///
/// Lines are denormalized: the display name and provider name are captured
/// at add time so the checkout snapshot stays meaningful even if the
/// listing changes later.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CartItem {
    /// Unique line identifier.
    pub id: CartItemId,
    /// Listing name (e.g., "Deep home cleaning").
    pub name: String,
    /// Provider offering the listing.
    pub provider: ProviderId,
    /// Provider display name.
    pub provider_name: String,
    /// Quantity, always >= 1.
    pub quantity: i64,
    /// Unit price in minor units, never negative.
    pub unit_price: Money,
    /// Line total (unit_price * quantity).
    pub total_price: Money,
}

impl CartItem {
    /// Create a new line item.
    ///
    /// Returns an error if the quantity is not in `1..=MAX_QUANTITY_PER_ITEM`,
    /// the unit price is negative, or the line total overflows.
    pub fn new(
        id: CartItemId,
        name: impl Into<String>,
        provider: ProviderId,
        provider_name: impl Into<String>,
        quantity: i64,
        unit_price: Money,
    ) -> Result<Self, MarketplaceError> {
        if quantity <= 0 {
            return Err(MarketplaceError::InvalidQuantity(quantity));
        }
        if quantity > MAX_QUANTITY_PER_ITEM {
            return Err(MarketplaceError::QuantityExceedsLimit(
                quantity,
                MAX_QUANTITY_PER_ITEM,
            ));
        }
        if unit_price.is_negative() {
            return Err(MarketplaceError::InvalidUnitPrice(unit_price.amount_minor));
        }
        let total_price = unit_price
            .try_multiply(quantity)
            .ok_or(MarketplaceError::Overflow)?;
        Ok(Self {
            id,
            name: name.into(),
            provider,
            provider_name: provider_name.into(),
            quantity,
            unit_price,
            total_price,
        })
    }

    /// Recompute the line total after a quantity change.
    pub fn update_total(&mut self) -> Result<(), MarketplaceError> {
        self.total_price = self
            .unit_price
            .try_multiply(self.quantity)
            .ok_or(MarketplaceError::Overflow)?;
        Ok(())
    }
}

/// A shopping cart.
///
/// The cart is owned and mutated by the cart screen; checkout only ever
/// sees a frozen [`CartSnapshot`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Cart {
    /// Unique cart identifier.
    pub id: CartId,
    /// Owning user, if signed in.
    pub user_id: Option<UserId>,
    /// Items in the cart.
    pub items: Vec<CartItem>,
    /// Cart currency.
    pub currency: Currency,
    /// Unix timestamp of creation.
    pub created_at: i64,
    /// Unix timestamp of last update.
    pub updated_at: i64,
}

impl Cart {
    /// Create a new empty cart.
    pub fn new(currency: Currency) -> Self {
        let now = current_timestamp();
        Self {
            id: CartId::generate(),
            user_id: None,
            items: Vec::new(),
            currency,
            created_at: now,
            updated_at: now,
        }
    }

    /// Create a cart for a signed-in user.
    pub fn for_user(user_id: UserId, currency: Currency) -> Self {
        let mut cart = Self::new(currency);
        cart.user_id = Some(user_id);
        cart
    }

    /// Add an item to the cart.
    ///
    /// Adding a line that already exists merges quantities, capped at
    /// [`MAX_QUANTITY_PER_ITEM`].
    pub fn add_item(
        &mut self,
        id: CartItemId,
        name: impl Into<String>,
        provider: ProviderId,
        provider_name: impl Into<String>,
        quantity: i64,
        unit_price: Money,
    ) -> Result<CartItemId, MarketplaceError> {
        if quantity <= 0 {
            return Err(MarketplaceError::InvalidQuantity(quantity));
        }

        if let Some(existing) = self.items.iter_mut().find(|i| i.id == id) {
            let new_quantity = existing
                .quantity
                .checked_add(quantity)
                .ok_or(MarketplaceError::Overflow)?;
            if new_quantity > MAX_QUANTITY_PER_ITEM {
                return Err(MarketplaceError::QuantityExceedsLimit(
                    new_quantity,
                    MAX_QUANTITY_PER_ITEM,
                ));
            }
            existing.quantity = new_quantity;
            existing.update_total()?;
            self.updated_at = current_timestamp();
            return Ok(existing.id.clone());
        }

        let item = CartItem::new(id, name, provider, provider_name, quantity, unit_price)?;
        let id = item.id.clone();
        self.items.push(item);
        self.updated_at = current_timestamp();
        Ok(id)
    }

    /// Update the quantity of a line.
    ///
    /// A quantity of zero or less removes the line. Returns whether a line
    /// was changed.
    pub fn update_quantity(
        &mut self,
        item_id: &CartItemId,
        quantity: i64,
    ) -> Result<bool, MarketplaceError> {
        if quantity <= 0 {
            return Ok(self.remove_item(item_id));
        }
        if quantity > MAX_QUANTITY_PER_ITEM {
            return Err(MarketplaceError::QuantityExceedsLimit(
                quantity,
                MAX_QUANTITY_PER_ITEM,
            ));
        }
        if let Some(item) = self.items.iter_mut().find(|i| &i.id == item_id) {
            item.quantity = quantity;
            item.update_total()?;
            self.updated_at = current_timestamp();
            Ok(true)
        } else {
            Ok(false)
        }
    }

    /// Remove a line from the cart.
    pub fn remove_item(&mut self, item_id: &CartItemId) -> bool {
        let len_before = self.items.len();
        self.items.retain(|i| &i.id != item_id);
        let removed = self.items.len() < len_before;
        if removed {
            self.updated_at = current_timestamp();
        }
        removed
    }

    /// Clear all items.
    pub fn clear(&mut self) {
        self.items.clear();
        self.updated_at = current_timestamp();
    }

    /// Get total item count (sum of quantities).
    pub fn item_count(&self) -> i64 {
        self.items.iter().map(|i| i.quantity).sum()
    }

    /// Get number of unique lines.
    pub fn unique_item_count(&self) -> usize {
        self.items.len()
    }

    /// Check if cart is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Get a line by ID.
    pub fn get_item(&self, item_id: &CartItemId) -> Option<&CartItem> {
        self.items.iter().find(|i| &i.id == item_id)
    }

    /// Freeze the current contents into a snapshot for checkout.
    pub fn snapshot(&self) -> CartSnapshot {
        CartSnapshot {
            cart_id: self.id.clone(),
            items: self.items.clone(),
            currency: self.currency,
            taken_at: current_timestamp(),
        }
    }
}

impl Default for Cart {
    fn default() -> Self {
        Self::new(Currency::NGN)
    }
}

/// An immutable view of a cart, taken when checkout starts.
///
/// Checkout reads line items and totals from the snapshot and never writes
/// back; quantity edits happen on the originating [`Cart`] before a new
/// snapshot is taken.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CartSnapshot {
    /// Cart the snapshot was taken from.
    pub cart_id: CartId,
    /// Frozen line items.
    pub items: Vec<CartItem>,
    /// Snapshot currency.
    pub currency: Currency,
    /// Unix timestamp when the snapshot was taken.
    pub taken_at: i64,
}

impl CartSnapshot {
    /// Get total item count (sum of quantities).
    pub fn item_count(&self) -> i64 {
        self.items.iter().map(|i| i.quantity).sum()
    }

    /// Check if the snapshot has no lines.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Get current Unix timestamp.
fn current_timestamp() -> i64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs() as i64)
        .unwrap_or(0)
}
