//! Catalog Files
//!
//! YAML representation of a catalog. Prices are written as `"150000 LBP"`:
//! an integer amount in the smallest currency unit followed by an ISO code.

use rust_decimal::{Decimal, prelude::ToPrimitive};
use rusty_money::{
    Money,
    iso::{Currency, EUR, GBP, LBP, USD},
};
use serde::Deserialize;

use crate::{
    catalog::{
        CatalogError, MenuCategory, Venue,
        items::{ItemDetails, MenuItem},
    },
    i18n::Localized,
    tags::Tags,
};

/// Top level of a catalog file
#[derive(Debug, Deserialize)]
pub struct CatalogFile {
    /// Venue details
    pub venue: Venue,

    /// Categories in display order
    pub categories: Vec<CategoryFile>,
}

/// Category entry
#[derive(Debug, Deserialize)]
pub struct CategoryFile {
    /// Category id
    pub id: String,

    /// Category title
    pub title: Localized<String>,

    /// Category description
    #[serde(default)]
    pub description: DescriptionFile,

    /// Icon name
    #[serde(default)]
    pub icon: String,

    /// Items in display order
    #[serde(default)]
    pub items: Vec<ItemFile>,
}

/// Item entry
#[derive(Debug, Deserialize)]
pub struct ItemFile {
    /// Item id
    pub id: String,

    /// Item name
    pub name: Localized<String>,

    /// Item description
    #[serde(default)]
    pub description: DescriptionFile,

    /// Price, e.g. `"150000 LBP"`
    pub price: String,

    /// Category id; defaults to the enclosing category
    pub category: Option<String>,

    /// Image path; resolved from the image table when omitted
    pub image: Option<String>,

    /// Tags
    #[serde(default)]
    pub tags: Tags,

    /// Optional metadata
    #[serde(flatten)]
    pub details: ItemDetails,
}

/// A description where either language may be left out.
#[derive(Debug, Default, Deserialize)]
pub struct DescriptionFile {
    /// English description
    pub en: Option<String>,

    /// Arabic description
    pub ar: Option<String>,
}

impl From<DescriptionFile> for Localized<Option<String>> {
    fn from(file: DescriptionFile) -> Self {
        Localized::new(file.en, file.ar)
    }
}

impl CategoryFile {
    /// Build the category, parsing every item price.
    ///
    /// # Errors
    ///
    /// Returns a [`CatalogError`] if a price cannot be parsed.
    pub fn try_into_category(self) -> Result<MenuCategory<'static>, CatalogError> {
        let category_id = self.id;

        let items = self
            .items
            .into_iter()
            .map(|item| item.try_into_item(&category_id))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(MenuCategory::new(category_id, self.title)
            .with_description(self.description.into())
            .with_icon(self.icon)
            .with_items(items))
    }
}

impl ItemFile {
    fn try_into_item(self, category_id: &str) -> Result<MenuItem<'static>, CatalogError> {
        let (minor_units, currency) = parse_price(&self.price)?;
        let category = self.category.unwrap_or_else(|| category_id.to_string());

        let item = MenuItem::new(
            self.id,
            self.name,
            Money::from_minor(minor_units, currency),
            category,
        )
        .with_description(self.description.into())
        .with_tags(self.tags)
        .with_details(self.details);

        Ok(match self.image {
            Some(image) => item.with_image(image),
            None => item,
        })
    }
}

/// Parse a price string (e.g. `"150000 LBP"`) into minor units and currency.
///
/// # Errors
///
/// Returns an error if the string is not in the format `AMOUNT CURRENCY`, if
/// the amount is not a whole number, or if the currency code is not recognized.
pub fn parse_price(s: &str) -> Result<(i64, &'static Currency), CatalogError> {
    let mut parts = s.split_whitespace();

    let (Some(amount), Some(currency_code), None) = (parts.next(), parts.next(), parts.next())
    else {
        return Err(CatalogError::InvalidPrice(format!(
            "Expected format 'AMOUNT CURRENCY', got: {s}"
        )));
    };

    let amount = amount
        .parse::<Decimal>()
        .map_err(|_err| CatalogError::InvalidPrice(s.to_string()))?;

    if !amount.fract().is_zero() {
        return Err(CatalogError::InvalidPrice(s.to_string()));
    }

    let minor_units = amount
        .to_i64()
        .ok_or_else(|| CatalogError::InvalidPrice(s.to_string()))?;

    let currency = match currency_code {
        "LBP" => LBP,
        "USD" => USD,
        "EUR" => EUR,
        "GBP" => GBP,
        other => return Err(CatalogError::UnknownCurrency(other.to_string())),
    };

    Ok((minor_units, currency))
}
