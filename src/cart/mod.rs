//! Cart
//!
//! The order being assembled. Lines are kept in the order they were first
//! added and are identified by item id plus [`Customizations`]; adding the same
//! pair again merges into the existing line.

use rusty_money::{Money, MoneyError, iso::Currency};
use thiserror::Error;
use tracing::debug;

use crate::{catalog::MenuItem, customizations::Customizations, i18n::Localized};

pub mod observer;

pub use observer::{CartObserver, NoopObserver};

/// Errors related to cart mutations or totals.
#[derive(Debug, Error, PartialEq)]
pub enum CartError {
    /// Quantities added to the cart must be positive.
    #[error("Quantity must be a positive integer, got {0}")]
    InvalidQuantity(i64),

    /// An item's currency differs from the cart currency (item id, item currency, cart currency).
    #[error("Item {0} has currency {1}, but cart has currency {2}")]
    CurrencyMismatch(String, &'static str, &'static str),

    /// A quantity or amount for the given item does not fit in 64 bits.
    #[error("Quantity or amount overflow for item {0}")]
    Overflow(String),

    /// Wrapped money arithmetic error.
    #[error(transparent)]
    Money(#[from] MoneyError),
}

/// One entry in the cart: a snapshot of the item taken when it was added.
#[derive(Clone, Debug, PartialEq)]
pub struct CartLine<'a> {
    item_id: String,
    name: Localized<String>,
    description: Localized<Option<String>>,
    price: Money<'a, Currency>,
    image: String,
    category: String,
    quantity: u64,
    customizations: Customizations,
}

impl<'a> CartLine<'a> {
    fn snapshot(item: &MenuItem<'a>, quantity: u64, customizations: Customizations) -> Self {
        Self {
            item_id: item.id().to_string(),
            name: item.name().clone(),
            description: item.description().clone(),
            price: *item.price(),
            image: item.image().to_string(),
            category: item.category().to_string(),
            quantity,
            customizations,
        }
    }

    fn matches(&self, item_id: &str, customizations: &Customizations) -> bool {
        self.item_id == item_id && self.customizations == *customizations
    }

    /// Id of the menu item
    pub fn item_id(&self) -> &str {
        &self.item_id
    }

    /// Localized name at the time of adding
    pub fn name(&self) -> &Localized<String> {
        &self.name
    }

    /// Localized description at the time of adding
    pub fn description(&self) -> &Localized<Option<String>> {
        &self.description
    }

    /// Unit price at the time of adding
    pub fn price(&self) -> &Money<'a, Currency> {
        &self.price
    }

    /// Image path
    pub fn image(&self) -> &str {
        &self.image
    }

    /// Category id
    pub fn category(&self) -> &str {
        &self.category
    }

    /// Number of units, always positive
    pub fn quantity(&self) -> u64 {
        self.quantity
    }

    /// Customer choices for this line
    pub fn customizations(&self) -> &Customizations {
        &self.customizations
    }

    /// Unit price times quantity.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::Overflow`] if the amount does not fit in 64 bits.
    pub fn total(&self) -> Result<Money<'a, Currency>, CartError> {
        let minor = i64::try_from(self.quantity)
            .ok()
            .and_then(|quantity| self.price.to_minor_units().checked_mul(quantity))
            .ok_or_else(|| CartError::Overflow(self.item_id.clone()))?;

        Ok(Money::from_minor(minor, self.price.currency()))
    }
}

/// Item count and price of a cart.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CartTotals<'a> {
    /// Sum of line quantities
    pub total_items: u64,

    /// Sum of unit price times quantity
    pub total_price: Money<'a, Currency>,
}

/// Cart
#[derive(Clone, Debug)]
pub struct Cart<'a> {
    lines: Vec<CartLine<'a>>,
    currency: &'a Currency,
}

impl<'a> Cart<'a> {
    /// Create an empty cart in the given currency.
    pub fn new(currency: &'a Currency) -> Self {
        Self {
            lines: Vec::new(),
            currency,
        }
    }

    /// Add `quantity` units of `item` with the given customizations.
    ///
    /// # Errors
    ///
    /// See [`Cart::add_with_observer`].
    pub fn add(
        &mut self,
        item: &MenuItem<'a>,
        quantity: i64,
        customizations: Customizations,
    ) -> Result<(), CartError> {
        self.add_with_observer(item, quantity, customizations, &mut NoopObserver)
    }

    /// Add `quantity` units of `item`, merging into an existing line with the
    /// same item and customizations or appending a new one, then notify the
    /// observer.
    ///
    /// # Errors
    ///
    /// - [`CartError::InvalidQuantity`]: `quantity` is zero or negative.
    /// - [`CartError::CurrencyMismatch`]: the item is priced in another currency.
    /// - [`CartError::Overflow`]: the merged quantity does not fit in 64 bits.
    pub fn add_with_observer<O: CartObserver>(
        &mut self,
        item: &MenuItem<'a>,
        quantity: i64,
        customizations: Customizations,
        observer: &mut O,
    ) -> Result<(), CartError> {
        let added = u64::try_from(quantity)
            .ok()
            .filter(|quantity| *quantity > 0)
            .ok_or(CartError::InvalidQuantity(quantity))?;

        let item_currency = item.price().currency();

        if item_currency != self.currency {
            return Err(CartError::CurrencyMismatch(
                item.id().to_string(),
                item_currency.iso_alpha_code,
                self.currency.iso_alpha_code,
            ));
        }

        let existing = self
            .lines
            .iter_mut()
            .find(|line| line.matches(item.id(), &customizations));

        if let Some(line) = existing {
            line.quantity = line
                .quantity
                .checked_add(added)
                .ok_or_else(|| CartError::Overflow(item.id().to_string()))?;

            debug!(
                item = item.id(),
                customizations = %line.customizations,
                quantity = line.quantity,
                "merged cart line"
            );

            observer.on_add(line, added);

            return Ok(());
        }

        let line = CartLine::snapshot(item, added, customizations);

        debug!(
            item = item.id(),
            customizations = %line.customizations,
            quantity = added,
            "appended cart line"
        );

        observer.on_add(&line, added);

        self.lines.push(line);

        Ok(())
    }

    /// Remove the line matching `item_id` and exactly these customizations.
    ///
    /// Pass [`Customizations::none`] to target the uncustomized line; it is not
    /// a wildcard. Returns whether a line was removed.
    pub fn remove(&mut self, item_id: &str, customizations: &Customizations) -> bool {
        let before = self.lines.len();

        self.lines
            .retain(|line| !line.matches(item_id, customizations));

        let removed = self.lines.len() != before;

        if removed {
            debug!(item = item_id, customizations = %customizations, "removed cart line");
        }

        removed
    }

    /// Set the quantity of the matching line. Zero or negative quantities
    /// remove it. Returns whether a line changed.
    pub fn update_quantity(
        &mut self,
        item_id: &str,
        quantity: i64,
        customizations: &Customizations,
    ) -> bool {
        let quantity = match u64::try_from(quantity) {
            Ok(quantity) if quantity > 0 => quantity,
            _ => return self.remove(item_id, customizations),
        };

        let Some(line) = self
            .lines
            .iter_mut()
            .find(|line| line.matches(item_id, customizations))
        else {
            return false;
        };

        line.quantity = quantity;

        debug!(item = item_id, customizations = %customizations, quantity, "updated cart line");

        true
    }

    /// Item count and price, recomputed from the lines.
    ///
    /// # Errors
    ///
    /// Returns a [`CartError`] if an amount overflows.
    pub fn totals(&self) -> Result<CartTotals<'a>, CartError> {
        let total_items = self.lines.iter().try_fold(0_u64, |acc, line| {
            acc.checked_add(line.quantity)
                .ok_or_else(|| CartError::Overflow(line.item_id.clone()))
        })?;

        let total_price = self.lines.iter().try_fold(
            Money::from_minor(0, self.currency),
            |acc, line| -> Result<_, CartError> { Ok(acc.add(line.total()?)?) },
        )?;

        Ok(CartTotals {
            total_items,
            total_price,
        })
    }

    /// Find the line for an item and customizations.
    pub fn line(&self, item_id: &str, customizations: &Customizations) -> Option<&CartLine<'a>> {
        self.lines
            .iter()
            .find(|line| line.matches(item_id, customizations))
    }

    /// Iterate over the lines in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &CartLine<'a>> {
        self.lines.iter()
    }

    /// Lines in insertion order.
    pub fn lines(&self) -> &[CartLine<'a>] {
        &self.lines
    }

    /// Number of lines.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Check if the cart has no lines.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Remove every line.
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Currency of the cart.
    pub fn currency(&self) -> &'a Currency {
        self.currency
    }
}
