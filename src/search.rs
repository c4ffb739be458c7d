//! Search
//!
//! Narrows a catalog down to the items matching a free-text query and a set of
//! flag filters. Results are new catalogs; the input is never modified.

use std::{fmt, str::FromStr};

use thiserror::Error;

use crate::{
    catalog::{Catalog, MenuItem},
    customizations::SpiceLevel,
    i18n::{Language, Message},
};

/// Error returned when a filter name is not recognized.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("Unknown filter: {0} (expected popular, chef-recommended, vegetarian or spicy)")]
pub struct UnknownFilter(pub String);

/// Flag filters offered next to the search box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum MenuFilter {
    /// Items marked popular
    Popular,

    /// Items the chef recommends
    ChefRecommended,

    /// Vegetarian items
    Vegetarian,

    /// Items at spice level hot or above
    Spicy,
}

impl MenuFilter {
    /// Every filter, in display order.
    pub const ALL: [MenuFilter; 4] = [
        MenuFilter::Popular,
        MenuFilter::ChefRecommended,
        MenuFilter::Vegetarian,
        MenuFilter::Spicy,
    ];

    /// Machine name, as accepted by [`FromStr`].
    pub fn as_str(self) -> &'static str {
        match self {
            MenuFilter::Popular => "popular",
            MenuFilter::ChefRecommended => "chef-recommended",
            MenuFilter::Vegetarian => "vegetarian",
            MenuFilter::Spicy => "spicy",
        }
    }

    /// Display label in the given language.
    pub fn label(self, language: Language) -> &'static str {
        let message = match self {
            MenuFilter::Popular => Message::FilterPopular,
            MenuFilter::ChefRecommended => Message::FilterChefRecommended,
            MenuFilter::Vegetarian => Message::FilterVegetarian,
            MenuFilter::Spicy => Message::FilterSpicy,
        };

        language.text(message)
    }

    /// Whether the item satisfies this filter.
    pub fn matches(self, item: &MenuItem<'_>) -> bool {
        let details = item.details();

        match self {
            MenuFilter::Popular => details.popular,
            MenuFilter::ChefRecommended => details.chef_recommended,
            MenuFilter::Vegetarian => details.dietary.vegetarian,
            MenuFilter::Spicy => matches!(
                details.spice_level,
                Some(SpiceLevel::Hot | SpiceLevel::VeryHot)
            ),
        }
    }
}

impl FromStr for MenuFilter {
    type Err = UnknownFilter;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim().to_ascii_lowercase().replace('_', "-");

        MenuFilter::ALL
            .into_iter()
            .find(|filter| filter.as_str() == name)
            .ok_or_else(|| UnknownFilter(s.to_string()))
    }
}

impl fmt::Display for MenuFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Keep the items whose name or description contains `query`.
///
/// English text is compared case-insensitively, Arabic text as a raw
/// substring. Categories left without items are dropped and order is kept.
/// An empty query returns an equal copy of the catalog.
pub fn filter<'a>(catalog: &Catalog<'a>, query: &str) -> Catalog<'a> {
    filter_with(catalog, query, &[])
}

/// Like [`filter`], but items must also satisfy every filter in `filters`.
pub fn filter_with<'a>(catalog: &Catalog<'a>, query: &str, filters: &[MenuFilter]) -> Catalog<'a> {
    if query.is_empty() && filters.is_empty() {
        return catalog.clone();
    }

    let needle = query.to_lowercase();

    let categories = catalog
        .categories()
        .iter()
        .filter_map(|category| {
            let items: Vec<_> = category
                .items()
                .iter()
                .filter(|item| matches_query(item, query, &needle))
                .filter(|item| filters.iter().all(|filter| filter.matches(item)))
                .cloned()
                .collect();

            (!items.is_empty()).then(|| category.clone().with_items(items))
        })
        .collect();

    catalog.with_categories(categories)
}

fn matches_query(item: &MenuItem<'_>, query: &str, needle: &str) -> bool {
    if query.is_empty() {
        return true;
    }

    let name = item.name();
    let description = item.description();

    name.en.to_lowercase().contains(needle)
        || name.ar.contains(query)
        || description
            .en
            .as_deref()
            .is_some_and(|en| en.to_lowercase().contains(needle))
        || description
            .ar
            .as_deref()
            .is_some_and(|ar| ar.contains(query))
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    fn ids(catalog: &Catalog<'_>) -> Vec<String> {
        catalog.items().map(|item| item.id().to_string()).collect()
    }

    #[test]
    fn empty_query_returns_equal_catalog() -> TestResult {
        let catalog = Catalog::embedded()?;

        assert_eq!(filter(&catalog, ""), catalog);

        Ok(())
    }

    #[test]
    fn english_query_is_case_insensitive() -> TestResult {
        let catalog = Catalog::embedded()?;
        let result = filter(&catalog, "PEPSI");

        assert_eq!(ids(&result), vec!["pepsi", "pepsi-diet"]);
        assert_eq!(result.categories().len(), 1);

        Ok(())
    }

    #[test]
    fn arabic_query_matches_arabic_name() -> TestResult {
        let catalog = Catalog::embedded()?;
        let result = filter(&catalog, "بيبسي");

        assert!(ids(&result).contains(&"pepsi".to_string()));

        Ok(())
    }

    #[test]
    fn query_matches_description() -> TestResult {
        let catalog = Catalog::embedded()?;
        let result = filter(&catalog, "cola");

        assert!(ids(&result).contains(&"pepsi".to_string()));

        Ok(())
    }

    #[test]
    fn no_match_yields_empty_catalog() -> TestResult {
        let catalog = Catalog::embedded()?;
        let result = filter(&catalog, "zzzz-nothing");

        assert!(result.categories().is_empty());
        assert!(result.is_empty());
        assert_eq!(result.venue(), catalog.venue());

        Ok(())
    }

    #[test]
    fn results_keep_catalog_order() -> TestResult {
        let catalog = Catalog::embedded()?;
        let result = filter(&catalog, "e");

        let expected: Vec<_> = ids(&catalog)
            .into_iter()
            .filter(|id| ids(&result).contains(id))
            .collect();

        assert_eq!(ids(&result), expected);

        Ok(())
    }

    #[test]
    fn flag_filters_must_all_hold() -> TestResult {
        let catalog = Catalog::embedded()?;
        let vegetarian = filter_with(&catalog, "", &[MenuFilter::Vegetarian]);

        assert!(!vegetarian.is_empty());
        assert!(
            vegetarian
                .items()
                .all(|item| item.details().dietary.vegetarian)
        );

        let popular_vegetarian = filter_with(
            &catalog,
            "",
            &[MenuFilter::Vegetarian, MenuFilter::Popular],
        );

        assert!(popular_vegetarian.items().all(|item| {
            item.details().dietary.vegetarian && item.details().popular
        }));

        Ok(())
    }

    #[test]
    fn filter_names_parse() -> TestResult {
        assert_eq!("popular".parse::<MenuFilter>()?, MenuFilter::Popular);
        assert_eq!(
            "Chef_Recommended".parse::<MenuFilter>()?,
            MenuFilter::ChefRecommended
        );
        assert_eq!(
            "halal".parse::<MenuFilter>(),
            Err(UnknownFilter("halal".to_string()))
        );

        Ok(())
    }

    #[test]
    fn filter_labels_are_localized() {
        assert_eq!(MenuFilter::Spicy.label(Language::En), "Spicy");
        assert_ne!(
            MenuFilter::Spicy.label(Language::Ar),
            MenuFilter::Spicy.label(Language::En)
        );
    }
}
