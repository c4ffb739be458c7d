//! Cafe menu prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    cart::{Cart, CartError, CartLine, CartObserver, CartTotals, NoopObserver},
    catalog::{
        Catalog, CatalogError, MenuCategory, Venue,
        images::image_for,
        items::{Dietary, ItemDetails, MenuItem, Nutrition},
    },
    customizations::{CustomizationError, CustomizationOptions, Customizations, SpiceLevel},
    i18n::{Direction, Language, Localized, Message},
    order::{OrderError, checkout_link, compose, format_amount, write_cart_table},
    search::{MenuFilter, filter, filter_with},
    session::{MenuSession, SessionError, Theme, UnknownTheme},
    tags::Tags,
};
