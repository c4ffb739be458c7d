//! Checkout Link

use crate::{
    cart::Cart,
    catalog::Venue,
    i18n::Language,
    order::{OrderError, compose},
};

/// Base URL of the messaging deep link.
const CHAT_BASE_URL: &str = "https://wa.me";

/// Deep link that opens a chat with the venue, pre-filled with the order
/// message. The phone number is reduced to its digits.
///
/// # Errors
///
/// - [`OrderError::EmptyCart`]: there is nothing to order.
/// - [`OrderError::InvalidPhone`]: the venue phone number has no digits.
/// - [`OrderError::Cart`]: the cart totals overflow.
pub fn checkout_link(cart: &Cart<'_>, venue: &Venue, language: Language) -> Result<String, OrderError> {
    if cart.is_empty() {
        return Err(OrderError::EmptyCart);
    }

    let phone: String = venue
        .order_phone
        .chars()
        .filter(char::is_ascii_digit)
        .collect();

    if phone.is_empty() {
        return Err(OrderError::InvalidPhone(venue.order_phone.clone()));
    }

    let message = compose(cart, venue, language)?;

    Ok(format!(
        "{CHAT_BASE_URL}/{phone}?text={}",
        urlencoding::encode(&message)
    ))
}
