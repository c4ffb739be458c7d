//! Catalog
//!
//! The static, read-only menu: categories of items plus the venue they are
//! ordered from. A [`Catalog`] is validated when it is built and never changes
//! afterwards.

use std::{fs, path::Path};

use rustc_hash::FxHashSet;
use rusty_money::iso::Currency;
use serde::Deserialize;
use thiserror::Error;
use tracing::info;

use crate::{catalog::yaml::CatalogFile, i18n::Localized};

pub mod images;
pub mod items;
pub mod yaml;

pub use items::MenuItem;

/// The catalog compiled into the binary.
const EMBEDDED_CATALOG: &str = include_str!("../../menus/town-cafe.yml");

/// Catalog loading and validation errors
#[derive(Debug, Error)]
pub enum CatalogError {
    /// IO error reading a catalog file
    #[error("Failed to read catalog file: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error
    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_norway::Error),

    /// Invalid price format
    #[error("Invalid price format: {0}")]
    InvalidPrice(String),

    /// Unknown currency code
    #[error("Unknown currency code: {0}")]
    UnknownCurrency(String),

    /// Two items share an id
    #[error("Duplicate item id: {0}")]
    DuplicateItem(String),

    /// Two categories share an id
    #[error("Duplicate category id: {0}")]
    DuplicateCategory(String),

    /// An item has a price below zero
    #[error("Item {0} has a negative price")]
    NegativePrice(String),

    /// An item or category is missing its name in one of the languages
    #[error("{0} is missing its English or Arabic name")]
    MissingName(String),

    /// Item currency differs from the catalog currency (item id, item currency, catalog currency)
    #[error("Item {0} has currency {1}, but catalog has currency {2}")]
    CurrencyMismatch(String, &'static str, &'static str),

    /// Item is listed under a category other than the one it names
    #[error("Item {item} names category {named}, but is listed under {listed}")]
    CategoryMismatch {
        /// Item id
        item: String,
        /// Category id on the item
        named: String,
        /// Category the item is listed under
        listed: String,
    },

    /// The catalog has no items, so its currency is unknown
    #[error("Catalog has no items; currency unknown")]
    NoItems,
}

/// Where orders go and how the venue presents itself.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Venue {
    /// Venue name
    pub name: Localized<String>,

    /// Currency label shown after amounts, e.g. `LBP` / `ل.ل`
    pub currency_label: Localized<String>,

    /// Phone number orders are sent to
    pub order_phone: String,
}

/// A group of items shown together.
#[derive(Debug, Clone, PartialEq)]
pub struct MenuCategory<'a> {
    id: String,
    title: Localized<String>,
    description: Localized<Option<String>>,
    icon: String,
    items: Vec<MenuItem<'a>>,
}

impl<'a> MenuCategory<'a> {
    /// Create an empty category.
    pub fn new(id: impl Into<String>, title: Localized<String>) -> Self {
        Self {
            id: id.into(),
            title,
            description: Localized::default(),
            icon: String::new(),
            items: Vec::new(),
        }
    }

    /// Set the description.
    #[must_use]
    pub fn with_description(mut self, description: Localized<Option<String>>) -> Self {
        self.description = description;
        self
    }

    /// Set the icon name.
    #[must_use]
    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = icon.into();
        self
    }

    /// Append an item.
    #[must_use]
    pub fn with_item(mut self, item: MenuItem<'a>) -> Self {
        self.items.push(item);
        self
    }

    /// Replace the items.
    #[must_use]
    pub fn with_items(mut self, items: impl Into<Vec<MenuItem<'a>>>) -> Self {
        self.items = items.into();
        self
    }

    /// Category id
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Localized title
    pub fn title(&self) -> &Localized<String> {
        &self.title
    }

    /// Localized description
    pub fn description(&self) -> &Localized<Option<String>> {
        &self.description
    }

    /// Icon name
    pub fn icon(&self) -> &str {
        &self.icon
    }

    /// Items in display order
    pub fn items(&self) -> &[MenuItem<'a>] {
        &self.items
    }
}

/// The full menu.
#[derive(Debug, Clone, PartialEq)]
pub struct Catalog<'a> {
    venue: Venue,
    currency: &'a Currency,
    categories: Vec<MenuCategory<'a>>,
}

impl<'a> Catalog<'a> {
    /// Build a catalog, checking that item ids are unique, prices are not
    /// negative, names are present in both languages, every item uses the
    /// catalog currency and sits in the category it names.
    ///
    /// # Errors
    ///
    /// Returns the first [`CatalogError`] found.
    pub fn new(
        venue: Venue,
        currency: &'a Currency,
        categories: Vec<MenuCategory<'a>>,
    ) -> Result<Self, CatalogError> {
        let mut category_ids = FxHashSet::default();
        let mut item_ids = FxHashSet::default();

        for category in &categories {
            if !category_ids.insert(category.id()) {
                return Err(CatalogError::DuplicateCategory(category.id().to_string()));
            }

            if !has_both_names(category.title()) {
                return Err(CatalogError::MissingName(category.id().to_string()));
            }

            for item in category.items() {
                validate_item(item, category, currency)?;

                if !item_ids.insert(item.id()) {
                    return Err(CatalogError::DuplicateItem(item.id().to_string()));
                }
            }
        }

        Ok(Self {
            venue,
            currency,
            categories,
        })
    }

    /// Same venue and currency, different categories. Used for filtered views,
    /// which only ever hold a subset of an already validated catalog.
    pub(crate) fn with_categories(&self, categories: Vec<MenuCategory<'a>>) -> Self {
        Self {
            venue: self.venue.clone(),
            currency: self.currency,
            categories,
        }
    }

    /// Venue details
    pub fn venue(&self) -> &Venue {
        &self.venue
    }

    /// Catalog currency
    pub fn currency(&self) -> &'a Currency {
        self.currency
    }

    /// Categories in display order
    pub fn categories(&self) -> &[MenuCategory<'a>] {
        &self.categories
    }

    /// Look up a category by id.
    pub fn category(&self, id: &str) -> Option<&MenuCategory<'a>> {
        self.categories.iter().find(|category| category.id() == id)
    }

    /// Iterate over every item, category by category.
    pub fn items(&self) -> impl Iterator<Item = &MenuItem<'a>> {
        self.categories
            .iter()
            .flat_map(|category| category.items().iter())
    }

    /// Look up an item by id.
    pub fn item(&self, id: &str) -> Option<&MenuItem<'a>> {
        self.items().find(|item| item.id() == id)
    }

    /// Number of items across all categories.
    pub fn item_count(&self) -> usize {
        self.categories
            .iter()
            .map(|category| category.items().len())
            .sum()
    }

    /// True when no category holds any item.
    pub fn is_empty(&self) -> bool {
        self.item_count() == 0
    }
}

impl Catalog<'static> {
    /// The catalog compiled into the crate.
    ///
    /// # Errors
    ///
    /// Returns a [`CatalogError`] if the embedded document does not validate.
    pub fn embedded() -> Result<Self, CatalogError> {
        Self::from_yaml_str(EMBEDDED_CATALOG)
    }

    /// Load a catalog from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns a [`CatalogError`] if the file cannot be read, parsed or validated.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let contents = fs::read_to_string(path.as_ref())?;

        Self::from_yaml_str(&contents)
    }

    /// Parse and validate a catalog document.
    ///
    /// The catalog currency is taken from the first item; every other item must match it.
    ///
    /// # Errors
    ///
    /// Returns a [`CatalogError`] if the document cannot be parsed or validated.
    pub fn from_yaml_str(contents: &str) -> Result<Self, CatalogError> {
        let file: CatalogFile = serde_norway::from_str(contents)?;

        let categories = file
            .categories
            .into_iter()
            .map(yaml::CategoryFile::try_into_category)
            .collect::<Result<Vec<_>, _>>()?;

        let currency = categories
            .iter()
            .flat_map(|category| category.items().iter())
            .map(|item| item.price().currency())
            .next()
            .ok_or(CatalogError::NoItems)?;

        let catalog = Catalog::new(file.venue, currency, categories)?;

        info!(
            venue = %catalog.venue.name.en,
            categories = catalog.categories.len(),
            items = catalog.item_count(),
            currency = currency.iso_alpha_code,
            "loaded catalog"
        );

        Ok(catalog)
    }
}

fn validate_item(
    item: &MenuItem<'_>,
    category: &MenuCategory<'_>,
    currency: &Currency,
) -> Result<(), CatalogError> {
    if !has_both_names(item.name()) {
        return Err(CatalogError::MissingName(item.id().to_string()));
    }

    if item.price().to_minor_units() < 0 {
        return Err(CatalogError::NegativePrice(item.id().to_string()));
    }

    let item_currency = item.price().currency();

    if item_currency != currency {
        return Err(CatalogError::CurrencyMismatch(
            item.id().to_string(),
            item_currency.iso_alpha_code,
            currency.iso_alpha_code,
        ));
    }

    if item.category() != category.id() {
        return Err(CatalogError::CategoryMismatch {
            item: item.id().to_string(),
            named: item.category().to_string(),
            listed: category.id().to_string(),
        });
    }

    Ok(())
}

fn has_both_names(name: &Localized<String>) -> bool {
    !name.en.trim().is_empty() && !name.ar.trim().is_empty()
}
