//! Localization
//!
//! The menu speaks Arabic and English. Catalog text carries both variants in a
//! [`Localized`] pair, UI strings are resolved through the [`Message`] table.

use std::{fmt, str::FromStr};

use serde::Deserialize;
use thiserror::Error;

/// Error returned when a language code is not supported.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("Unsupported language: {0} (expected `ar` or `en`)")]
pub struct UnsupportedLanguage(pub String);

/// Supported display languages.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Language {
    /// Arabic
    Ar,

    /// English
    #[default]
    En,
}

/// Text direction of a language.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Left to right
    Ltr,

    /// Right to left
    Rtl,
}

impl Language {
    /// Language code, `ar` or `en`.
    pub fn code(self) -> &'static str {
        match self {
            Language::Ar => "ar",
            Language::En => "en",
        }
    }

    /// The other supported language.
    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            Language::Ar => Language::En,
            Language::En => Language::Ar,
        }
    }

    /// Text direction for layout.
    pub fn direction(self) -> Direction {
        match self {
            Language::Ar => Direction::Rtl,
            Language::En => Direction::Ltr,
        }
    }

    /// Resolve a UI message in this language.
    pub fn text(self, message: Message) -> &'static str {
        let (en, ar) = message.entry();

        match self {
            Language::Ar => ar,
            Language::En => en,
        }
    }
}

impl FromStr for Language {
    type Err = UnsupportedLanguage;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ar" => Ok(Language::Ar),
            "en" => Ok(Language::En),
            other => Err(UnsupportedLanguage(other.to_string())),
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// A value held in both supported languages.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Deserialize)]
pub struct Localized<T> {
    /// English variant
    pub en: T,

    /// Arabic variant
    pub ar: T,
}

impl<T> Localized<T> {
    /// Create a new pair.
    pub fn new(en: T, ar: T) -> Self {
        Self { en, ar }
    }

    /// The variant for the given language.
    pub fn get(&self, language: Language) -> &T {
        match language {
            Language::Ar => &self.ar,
            Language::En => &self.en,
        }
    }
}

impl Localized<String> {
    /// Borrow the variant for the given language as a string slice.
    pub fn text(&self, language: Language) -> &str {
        self.get(language).as_str()
    }
}

impl Localized<Option<String>> {
    /// Borrow the variant for the given language, if present.
    pub fn text(&self, language: Language) -> Option<&str> {
        self.get(language).as_deref()
    }
}

/// Identifiers for every UI string the menu shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Message {
    /// Prefix of the order message header, followed by the venue name.
    OrderHeaderPrefix,

    /// Label in front of the order total.
    OrderTotal,

    /// Title of the cart panel.
    CartTitle,

    /// Shown when the cart has nothing in it.
    CartEmpty,

    /// Confirmation after calling a waiter.
    CallWaiter,

    /// Shown when a search matches nothing.
    NoResults,

    /// Label in front of the menu filters.
    FilterLabel,

    /// Popular filter.
    FilterPopular,

    /// Chef's choice filter.
    FilterChefRecommended,

    /// Vegetarian filter.
    FilterVegetarian,

    /// Spicy filter.
    FilterSpicy,

    /// Mild spice level.
    SpiceMild,

    /// Medium spice level.
    SpiceMedium,

    /// Hot spice level.
    SpiceHot,

    /// Very hot spice level.
    SpiceVeryHot,

    /// Add-to-cart button prefix, followed by the price.
    AddToCart,

    /// Item column header.
    ColumnItem,

    /// Quantity column header.
    ColumnQuantity,

    /// Price column header.
    ColumnPrice,

    /// Line total column header.
    ColumnAmount,

    /// Customization column header.
    ColumnCustomizations,
}

impl Message {
    /// English and Arabic text for this message.
    fn entry(self) -> (&'static str, &'static str) {
        match self {
            Message::OrderHeaderPrefix => ("New order from", "طلب جديد من"),
            Message::OrderTotal => ("Total:", "المجموع:"),
            Message::CartTitle => ("Your Order", "سلة التسوق"),
            Message::CartEmpty => ("Your cart is empty", "السلة فارغة"),
            Message::CallWaiter => ("Waiter will be called shortly", "سيتم استدعاء النادل قريباً"),
            Message::NoResults => ("No items found", "لم يتم العثور على أصناف"),
            Message::FilterLabel => ("Filter:", "تصفية:"),
            Message::FilterPopular => ("Popular", "الأكثر طلباً"),
            Message::FilterChefRecommended => ("Chef's Choice", "اختيار الشيف"),
            Message::FilterVegetarian => ("Vegetarian", "نباتي"),
            Message::FilterSpicy => ("Spicy", "حار"),
            Message::SpiceMild => ("Mild", "خفيف"),
            Message::SpiceMedium => ("Medium", "متوسط"),
            Message::SpiceHot => ("Hot", "حار"),
            Message::SpiceVeryHot => ("Very Hot", "حار جداً"),
            Message::AddToCart => ("Add", "إضافة"),
            Message::ColumnItem => ("Item", "الصنف"),
            Message::ColumnQuantity => ("Qty", "الكمية"),
            Message::ColumnPrice => ("Price", "السعر"),
            Message::ColumnAmount => ("Amount", "المبلغ"),
            Message::ColumnCustomizations => ("Options", "الخيارات"),
        }
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn parses_language_codes() -> TestResult {
        assert_eq!("ar".parse::<Language>()?, Language::Ar);
        assert_eq!(" EN ".parse::<Language>()?, Language::En);

        Ok(())
    }

    #[test]
    fn rejects_unknown_language() {
        let result = "fr".parse::<Language>();

        assert_eq!(result, Err(UnsupportedLanguage("fr".to_string())));
    }

    #[test]
    fn toggling_switches_between_the_two_languages() {
        assert_eq!(Language::En.toggled(), Language::Ar);
        assert_eq!(Language::Ar.toggled().toggled(), Language::Ar);
    }

    #[test]
    fn arabic_is_right_to_left() {
        assert_eq!(Language::Ar.direction(), Direction::Rtl);
        assert_eq!(Language::En.direction(), Direction::Ltr);
    }

    #[test]
    fn messages_resolve_per_language() {
        assert_eq!(Language::En.text(Message::OrderTotal), "Total:");
        assert_eq!(Language::Ar.text(Message::OrderTotal), "المجموع:");
    }

    #[test]
    fn localized_pairs_pick_the_requested_variant() {
        let name = Localized::new("Pepsi".to_string(), "بيبسي".to_string());
        let description: Localized<Option<String>> =
            Localized::new(Some("Classic cola drink".to_string()), None);

        assert_eq!(name.text(Language::Ar), "بيبسي");
        assert_eq!(description.text(Language::En), Some("Classic cola drink"));
        assert_eq!(description.text(Language::Ar), None);
    }
}
