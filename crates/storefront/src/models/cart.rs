//! Shopping cart stored in the session.

use bazaar_core::{Locale, Product, ProductId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::backend::OrderLineRequest;

/// Upper bound for the quantity of a single line.
pub const MAX_LINE_QUANTITY: u32 = 99;

/// Errors from cart operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CartError {
    #[error("product {0} is out of stock")]
    OutOfStock(ProductId),
    #[error("product {0} is not in the cart")]
    NotInCart(ProductId),
}

/// A product snapshot plus quantity.
///
/// Name, price and image are copied when the product is added so the cart can
/// render without a backend round trip. The backend re-prices at checkout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    pub product_id: ProductId,
    pub name: String,
    #[serde(default)]
    pub name_ar: Option<String>,
    pub unit_price: Decimal,
    #[serde(default)]
    pub image: Option<String>,
    pub quantity: u32,
    /// Stock level seen when the line was last touched.
    #[serde(default)]
    pub stock: Option<i64>,
}

impl CartLine {
    #[must_use]
    pub fn localized_name(&self, locale: Locale) -> &str {
        match (locale, self.name_ar.as_deref()) {
            (Locale::Ar, Some(ar)) if !ar.trim().is_empty() => ar,
            _ => &self.name,
        }
    }

    /// Unit price times quantity, or `None` on overflow.
    #[must_use]
    pub fn line_total(&self) -> Option<Decimal> {
        self.unit_price.checked_mul(Decimal::from(self.quantity))
    }

    /// Largest quantity this line may hold.
    fn max_quantity(&self) -> u32 {
        max_quantity(self.stock)
    }
}

/// The shopper's cart, in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cart {
    #[serde(default)]
    lines: Vec<CartLine>,
}

impl Cart {
    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    #[must_use]
    pub fn line(&self, product_id: ProductId) -> Option<&CartLine> {
        self.lines.iter().find(|l| l.product_id == product_id)
    }

    /// Add `quantity` units of `product`, merging with an existing line.
    ///
    /// The resulting quantity is clamped to `1..=MAX_LINE_QUANTITY` and to the
    /// product's stock when the backend reports one. Returns the line's new
    /// quantity.
    ///
    /// # Errors
    ///
    /// Returns `CartError::OutOfStock` if the product has no stock left.
    pub fn add(&mut self, product: &Product, quantity: u32) -> Result<u32, CartError> {
        if !product.in_stock() {
            return Err(CartError::OutOfStock(product.id));
        }

        let max = max_quantity(product.stock);
        let requested = quantity.max(1);

        if let Some(line) = self.lines.iter_mut().find(|l| l.product_id == product.id) {
            // Refresh the snapshot with current backend data
            line.name.clone_from(&product.name);
            line.name_ar.clone_from(&product.name_ar);
            line.unit_price = product.effective_price();
            line.image.clone_from(&product.image);
            line.stock = product.stock;
            line.quantity = line.quantity.saturating_add(requested).clamp(1, max);
            return Ok(line.quantity);
        }

        let line = CartLine {
            product_id: product.id,
            name: product.name.clone(),
            name_ar: product.name_ar.clone(),
            unit_price: product.effective_price(),
            image: product.image.clone(),
            quantity: requested.clamp(1, max),
            stock: product.stock,
        };
        let quantity = line.quantity;
        self.lines.push(line);
        Ok(quantity)
    }

    /// Set a line's quantity. Zero removes the line.
    ///
    /// # Errors
    ///
    /// Returns `CartError::NotInCart` if the product has no line.
    pub fn set_quantity(&mut self, product_id: ProductId, quantity: u32) -> Result<u32, CartError> {
        if quantity == 0 {
            return if self.remove(product_id) {
                Ok(0)
            } else {
                Err(CartError::NotInCart(product_id))
            };
        }

        let line = self
            .lines
            .iter_mut()
            .find(|l| l.product_id == product_id)
            .ok_or(CartError::NotInCart(product_id))?;
        line.quantity = quantity.clamp(1, line.max_quantity());
        Ok(line.quantity)
    }

    /// Remove a line. Returns whether anything was removed.
    pub fn remove(&mut self, product_id: ProductId) -> bool {
        let before = self.lines.len();
        self.lines.retain(|l| l.product_id != product_id);
        self.lines.len() != before
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Total number of units across all lines.
    #[must_use]
    pub fn item_count(&self) -> u32 {
        self.lines
            .iter()
            .fold(0, |count, l| count.saturating_add(l.quantity))
    }

    /// Sum of all line totals, or `None` if any step overflows.
    #[must_use]
    pub fn subtotal(&self) -> Option<Decimal> {
        self.lines.iter().try_fold(Decimal::ZERO, |sum, line| {
            sum.checked_add(line.line_total()?)
        })
    }

    /// Lines as sent to `POST /orders`.
    #[must_use]
    pub fn order_lines(&self) -> Vec<OrderLineRequest> {
        self.lines
            .iter()
            .map(|l| OrderLineRequest {
                product_id: l.product_id,
                quantity: l.quantity,
            })
            .collect()
    }
}

fn max_quantity(stock: Option<i64>) -> u32 {
    match stock {
        Some(stock) => u32::try_from(stock.max(1))
            .unwrap_or(MAX_LINE_QUANTITY)
            .min(MAX_LINE_QUANTITY),
        None => MAX_LINE_QUANTITY,
    }
}
