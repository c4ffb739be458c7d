//! Cafe Menu
//!
//! A bilingual (Arabic/English) café menu: a validated catalog, search and
//! filtering, a cart keyed by item and customizations, and an order composer
//! that produces the message and deep link sent to the venue.

pub mod cart;
pub mod catalog;
pub mod customizations;
pub mod i18n;
pub mod order;
pub mod prelude;
pub mod search;
pub mod session;
pub mod tags;
