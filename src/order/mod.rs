//! Order
//!
//! Turns a cart into the plain-text message sent to the venue.

use std::io;

use thiserror::Error;

use crate::{
    cart::{Cart, CartError},
    catalog::Venue,
    i18n::{Language, Message},
};

pub mod link;
pub mod receipt;

pub use link::checkout_link;
pub use receipt::write_cart_table;

/// Errors related to composing or sending an order.
#[derive(Debug, Error)]
pub enum OrderError {
    /// Checkout is not offered for an empty cart.
    #[error("Cart is empty")]
    EmptyCart,

    /// The venue phone number has no digits.
    #[error("Invalid order phone number: {0:?}")]
    InvalidPhone(String),

    /// Cart arithmetic failed.
    #[error(transparent)]
    Cart(#[from] CartError),

    /// Writing output failed.
    #[error(transparent)]
    Io(#[from] io::Error),
}

/// Compose the order message for `cart` in the given language.
///
/// The message is a header naming the venue, one line per cart line in cart
/// order, and a total line, separated by blank lines. An empty cart has no
/// line block and a total of `0`.
///
/// # Errors
///
/// Returns [`OrderError::Cart`] if a line total or the cart total overflows.
pub fn compose(cart: &Cart<'_>, venue: &Venue, language: Language) -> Result<String, OrderError> {
    let currency_label = venue.currency_label.text(language);

    let header = format!(
        "{} {}",
        language.text(Message::OrderHeaderPrefix),
        venue.name.text(language)
    );

    let lines = cart
        .iter()
        .map(|line| -> Result<String, CartError> {
            Ok(format!(
                "{} x{} - {} {currency_label}",
                line.name().text(language),
                line.quantity(),
                format_amount(line.total()?.to_minor_units()),
            ))
        })
        .collect::<Result<Vec<_>, _>>()?;

    let total = format!(
        "{} {} {currency_label}",
        language.text(Message::OrderTotal),
        format_amount(cart.totals()?.total_price.to_minor_units()),
    );

    if lines.is_empty() {
        return Ok(format!("{header}\n\n{total}"));
    }

    Ok(format!("{header}\n\n{}\n\n{total}", lines.join("\n")))
}

/// Format an amount in the smallest currency unit with `,` thousands
/// separators and ASCII digits, e.g. `450000` as `450,000`.
pub fn format_amount(amount: i64) -> String {
    let digits = amount.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);

    if amount < 0 {
        grouped.push('-');
    }

    for (idx, digit) in digits.chars().enumerate() {
        if idx > 0 && (digits.len() - idx) % 3 == 0 {
            grouped.push(',');
        }

        grouped.push(digit);
    }

    grouped
}
