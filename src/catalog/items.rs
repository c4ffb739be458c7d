//! Menu Items

use rusty_money::{Money, iso::Currency};
use serde::Deserialize;

use crate::{
    catalog::images::image_for,
    customizations::{CustomizationOptions, SpiceLevel},
    i18n::Localized,
    tags::Tags,
};

/// An immutable catalog record.
#[derive(Clone, Debug, PartialEq)]
pub struct MenuItem<'a> {
    id: String,
    name: Localized<String>,
    description: Localized<Option<String>>,
    price: Money<'a, Currency>,
    category: String,
    image: String,
    tags: Tags,
    details: ItemDetails,
}

impl<'a> MenuItem<'a> {
    /// Creates a new item with no description, tags or details.
    ///
    /// The image is resolved through [`image_for`] until one is set explicitly.
    pub fn new(
        id: impl Into<String>,
        name: Localized<String>,
        price: Money<'a, Currency>,
        category: impl Into<String>,
    ) -> Self {
        let id = id.into();
        let category = category.into();
        let image = image_for(&id, &name.en, &category).to_string();

        Self {
            id,
            name,
            description: Localized::default(),
            price,
            category,
            image,
            tags: Tags::default(),
            details: ItemDetails::default(),
        }
    }

    /// Set the description.
    #[must_use]
    pub fn with_description(mut self, description: Localized<Option<String>>) -> Self {
        self.description = description;
        self
    }

    /// Set the image path.
    #[must_use]
    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = image.into();
        self
    }

    /// Set the tags.
    #[must_use]
    pub fn with_tags(mut self, tags: Tags) -> Self {
        self.tags = tags;
        self
    }

    /// Set the optional metadata.
    #[must_use]
    pub fn with_details(mut self, details: ItemDetails) -> Self {
        self.details = details;
        self
    }

    /// Unique item identifier
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Localized name
    pub fn name(&self) -> &Localized<String> {
        &self.name
    }

    /// Localized description, either side may be missing
    pub fn description(&self) -> &Localized<Option<String>> {
        &self.description
    }

    /// Unit price
    pub fn price(&self) -> &Money<'a, Currency> {
        &self.price
    }

    /// Id of the category holding this item
    pub fn category(&self) -> &str {
        &self.category
    }

    /// Image path
    pub fn image(&self) -> &str {
        &self.image
    }

    /// Item tags
    pub fn tags(&self) -> &Tags {
        &self.tags
    }

    /// Optional metadata
    pub fn details(&self) -> &ItemDetails {
        &self.details
    }

    /// The customization axes the item offers.
    pub fn customization_options(&self) -> &CustomizationOptions {
        &self.details.customizations
    }
}

/// Optional item metadata. Every field defaults to "not stated".
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ItemDetails {
    /// Preparation time in minutes
    pub preparation_time: Option<u32>,

    /// Energy in kcal
    pub calories: Option<u32>,

    /// How spicy the item is
    pub spice_level: Option<SpiceLevel>,

    /// Dietary flags
    #[serde(flatten)]
    pub dietary: Dietary,

    /// Shown with a "popular" badge
    pub popular: bool,

    /// Shown with a "chef's choice" badge
    pub chef_recommended: bool,

    /// Allergens, as free text
    pub allergens: Vec<String>,

    /// Ingredients in both languages
    pub ingredients: Localized<Vec<String>>,

    /// Nutrition per serving
    pub nutrition: Option<Nutrition>,

    /// Customization axes offered to the customer
    pub customizations: CustomizationOptions,
}

/// Dietary flags.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Dietary {
    /// No meat or fish
    pub vegetarian: bool,

    /// No animal products
    pub vegan: bool,

    /// No gluten
    pub gluten_free: bool,

    /// No dairy
    pub dairy_free: bool,

    /// No nuts
    pub nut_free: bool,
}

/// Nutrition breakdown in grams.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct Nutrition {
    /// Protein
    pub protein: u32,

    /// Carbohydrates
    pub carbs: u32,

    /// Fat
    pub fat: u32,

    /// Fiber
    pub fiber: u32,
}
