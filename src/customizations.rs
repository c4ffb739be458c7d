//! Customizations
//!
//! Modifiers a customer attaches to a cart line. Values are kept in canonical
//! form so that structural equality is the cart identity: surrounding
//! whitespace is trimmed, empty strings count as absent, and extras are a
//! sorted set.

use std::{borrow::Cow, fmt, str::FromStr};

use serde::Deserialize;
use smallvec::SmallVec;
use thiserror::Error;

use crate::i18n::{Language, Message};

/// Errors related to parsing or validating customizations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CustomizationError {
    /// A spice level string was not one of the four known levels.
    #[error("Unknown spice level: {0}")]
    UnknownSpiceLevel(String),

    /// A `key=value` pair used a key that is not a customization field.
    #[error("Unknown customization field: {0}")]
    UnknownField(String),

    /// A customization segment was not in `key=value` form.
    #[error("Malformed customization: {0}")]
    Malformed(String),

    /// The item does not offer a choice of spice level.
    #[error("Spice level cannot be chosen for this item")]
    SpiceLevelNotOffered,

    /// The size is not one of the item's sizes.
    #[error("Size {0} is not offered for this item")]
    SizeNotOffered(String),

    /// The extra is not one of the item's extras.
    #[error("Extra {0} is not offered for this item")]
    ExtraNotOffered(String),
}

/// Spice level, shared by item metadata and customer choices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SpiceLevel {
    /// Mild
    Mild,

    /// Medium
    Medium,

    /// Hot
    Hot,

    /// Very hot
    VeryHot,
}

impl SpiceLevel {
    /// All levels, mildest first.
    pub const ALL: [SpiceLevel; 4] = [
        SpiceLevel::Mild,
        SpiceLevel::Medium,
        SpiceLevel::Hot,
        SpiceLevel::VeryHot,
    ];

    /// Stable identifier, as used in catalog files.
    pub fn as_str(self) -> &'static str {
        match self {
            SpiceLevel::Mild => "mild",
            SpiceLevel::Medium => "medium",
            SpiceLevel::Hot => "hot",
            SpiceLevel::VeryHot => "very-hot",
        }
    }

    /// Display label in the given language.
    pub fn label(self, language: Language) -> &'static str {
        let message = match self {
            SpiceLevel::Mild => Message::SpiceMild,
            SpiceLevel::Medium => Message::SpiceMedium,
            SpiceLevel::Hot => Message::SpiceHot,
            SpiceLevel::VeryHot => Message::SpiceVeryHot,
        };

        language.text(message)
    }
}

impl FromStr for SpiceLevel {
    type Err = CustomizationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();

        SpiceLevel::ALL
            .into_iter()
            .find(|level| level.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| CustomizationError::UnknownSpiceLevel(wanted.to_string()))
    }
}

impl fmt::Display for SpiceLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Customer choices for one cart line.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Customizations {
    spice_level: Option<SpiceLevel>,
    size: Option<String>,
    extras: SmallVec<[String; 4]>,
    notes: Option<String>,
}

impl Customizations {
    /// No customizations.
    pub fn none() -> Self {
        Self::default()
    }

    /// Set the spice level.
    #[must_use]
    pub fn with_spice_level(mut self, level: SpiceLevel) -> Self {
        self.spice_level = Some(level);
        self
    }

    /// Set the size. Blank sizes clear the choice.
    #[must_use]
    pub fn with_size(mut self, size: impl AsRef<str>) -> Self {
        self.size = normalize(size.as_ref());
        self
    }

    /// Add one extra. Blank extras are ignored.
    #[must_use]
    pub fn with_extra(mut self, extra: impl AsRef<str>) -> Self {
        if let Some(extra) = normalize(extra.as_ref()) {
            if let Err(pos) = self.extras.binary_search(&extra) {
                self.extras.insert(pos, extra);
            }
        }

        self
    }

    /// Add several extras.
    #[must_use]
    pub fn with_extras<I, S>(self, extras: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        extras
            .into_iter()
            .fold(self, |acc, extra| acc.with_extra(extra))
    }

    /// Set the free-text note. Blank notes clear it.
    #[must_use]
    pub fn with_notes(mut self, notes: impl AsRef<str>) -> Self {
        self.notes = normalize(notes.as_ref());
        self
    }

    /// Chosen spice level.
    pub fn spice_level(&self) -> Option<SpiceLevel> {
        self.spice_level
    }

    /// Chosen size.
    pub fn size(&self) -> Option<&str> {
        self.size.as_deref()
    }

    /// Chosen extras, sorted.
    pub fn extras(&self) -> &[String] {
        &self.extras
    }

    /// Free-text note.
    pub fn notes(&self) -> Option<&str> {
        self.notes.as_deref()
    }

    /// True when nothing was chosen.
    pub fn is_empty(&self) -> bool {
        self.spice_level.is_none()
            && self.size.is_none()
            && self.extras.is_empty()
            && self.notes.is_none()
    }

    /// Human readable summary in the given language, empty when nothing was chosen.
    pub fn describe(&self, language: Language) -> String {
        let mut parts: SmallVec<[String; 4]> = SmallVec::new();

        if let Some(level) = self.spice_level {
            parts.push(level.label(language).to_string());
        }

        if let Some(size) = &self.size {
            parts.push(size.clone());
        }

        if !self.extras.is_empty() {
            parts.push(format!("+{}", self.extras.join(", +")));
        }

        if let Some(notes) = &self.notes {
            parts.push(format!("\"{notes}\""));
        }

        parts.join(" · ")
    }
}

/// Canonical serialization: fields in name order, absent fields omitted.
///
/// `%`, `;`, `=` and `|` inside values are percent-escaped, so distinct
/// values never print the same string and the output always parses back.
impl fmt::Display for Customizations {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut separator = "";

        if !self.extras.is_empty() {
            let extras: SmallVec<[String; 4]> =
                self.extras.iter().map(|extra| escape(extra)).collect();

            write!(f, "extras={}", extras.join("|"))?;
            separator = ";";
        }

        if let Some(notes) = &self.notes {
            write!(f, "{separator}notes={}", escape(notes))?;
            separator = ";";
        }

        if let Some(size) = &self.size {
            write!(f, "{separator}size={}", escape(size))?;
            separator = ";";
        }

        if let Some(level) = self.spice_level {
            write!(f, "{separator}spice={level}")?;
        }

        Ok(())
    }
}

/// Parses the canonical `key=value;...` form. Keys may appear in any order and
/// values may carry percent-escapes.
impl FromStr for Customizations {
    type Err = CustomizationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut customizations = Customizations::none();

        for segment in s.split(';').filter(|segment| !segment.trim().is_empty()) {
            let (key, value) = segment
                .split_once('=')
                .ok_or_else(|| CustomizationError::Malformed(segment.to_string()))?;

            customizations = match key.trim() {
                "spice" | "spice_level" => {
                    customizations.with_spice_level(value.parse::<SpiceLevel>()?)
                }
                "size" => customizations.with_size(unescape(value)?),
                "extras" | "extra" => customizations.with_extras(
                    value
                        .split('|')
                        .map(unescape)
                        .collect::<Result<SmallVec<[String; 4]>, _>>()?,
                ),
                "notes" | "note" => customizations.with_notes(unescape(value)?),
                other => return Err(CustomizationError::UnknownField(other.to_string())),
            };
        }

        Ok(customizations)
    }
}

/// The customization axes an item offers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct CustomizationOptions {
    /// Whether the customer may choose a spice level.
    pub spice_level: bool,

    /// Sizes to choose from.
    pub sizes: Vec<String>,

    /// Extras to choose from.
    pub extras: Vec<String>,
}

impl CustomizationOptions {
    /// True when the item offers nothing to customize.
    pub fn is_empty(&self) -> bool {
        !self.spice_level && self.sizes.is_empty() && self.extras.is_empty()
    }

    /// Check that every choice is one the item offers. Notes are always allowed.
    ///
    /// # Errors
    ///
    /// Returns the first choice that the item does not offer.
    pub fn check(&self, customizations: &Customizations) -> Result<(), CustomizationError> {
        if customizations.spice_level().is_some() && !self.spice_level {
            return Err(CustomizationError::SpiceLevelNotOffered);
        }

        if let Some(size) = customizations.size() {
            if !self.sizes.iter().any(|offered| offered == size) {
                return Err(CustomizationError::SizeNotOffered(size.to_string()));
            }
        }

        if let Some(extra) = customizations
            .extras()
            .iter()
            .find(|extra| !self.extras.contains(extra))
        {
            return Err(CustomizationError::ExtraNotOffered(extra.clone()));
        }

        Ok(())
    }
}

fn escape(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());

    for ch in value.chars() {
        match ch {
            '%' => escaped.push_str("%25"),
            ';' => escaped.push_str("%3B"),
            '=' => escaped.push_str("%3D"),
            '|' => escaped.push_str("%7C"),
            other => escaped.push(other),
        }
    }

    escaped
}

fn unescape(value: &str) -> Result<String, CustomizationError> {
    urlencoding::decode(value)
        .map(Cow::into_owned)
        .map_err(|_err| CustomizationError::Malformed(value.to_string()))
}

fn normalize(value: &str) -> Option<String> {
    let trimmed = value.trim();

    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn blank_fields_equal_no_customizations() {
        let blank = Customizations::none()
            .with_size("")
            .with_notes("   ")
            .with_extras([""; 0]);

        assert_eq!(blank, Customizations::none());
        assert!(blank.is_empty());
    }

    #[test]
    fn extras_order_does_not_matter() {
        let left = Customizations::none().with_extras(["mint", "lemon"]);
        let right = Customizations::none().with_extras(["lemon", "mint", "lemon"]);

        assert_eq!(left, right);
        assert_eq!(left.extras(), ["lemon".to_string(), "mint".to_string()]);
    }

    #[test]
    fn whitespace_is_trimmed() {
        let left = Customizations::none().with_size(" L ").with_notes("no ice ");
        let right = Customizations::none().with_notes("no ice").with_size("L");

        assert_eq!(left, right);
    }

    #[test]
    fn display_is_canonical() {
        let customizations = Customizations::none()
            .with_spice_level(SpiceLevel::VeryHot)
            .with_size("L")
            .with_extras(["mint", "lemon"])
            .with_notes("no ice");

        assert_eq!(
            customizations.to_string(),
            "extras=lemon|mint;notes=no ice;size=L;spice=very-hot"
        );
        assert_eq!(Customizations::none().to_string(), "");
    }

    #[test]
    fn parse_accepts_any_key_order() -> TestResult {
        let parsed: Customizations = "spice=hot;size=L;extras=mint|lemon".parse()?;
        let reordered: Customizations = "extras=lemon|mint;size=L;spice=hot".parse()?;

        assert_eq!(parsed, reordered);
        assert_eq!(parsed.spice_level(), Some(SpiceLevel::Hot));
        assert_eq!(parsed.size(), Some("L"));

        Ok(())
    }

    #[test]
    fn parse_round_trips_canonical_form() -> TestResult {
        let customizations = Customizations::none()
            .with_size("S")
            .with_notes("extra hot");

        let parsed: Customizations = customizations.to_string().parse()?;

        assert_eq!(parsed, customizations);

        Ok(())
    }

    #[test]
    fn separators_inside_values_do_not_collide() {
        let note_with_size = Customizations::none().with_notes("a;size=L");
        let note_and_size = Customizations::none().with_notes("a").with_size("L");

        assert_ne!(note_with_size, note_and_size);
        assert_ne!(note_with_size.to_string(), note_and_size.to_string());

        let piped_extra = Customizations::none().with_extra("x|y");
        let two_extras = Customizations::none().with_extras(["x", "y"]);

        assert_ne!(piped_extra, two_extras);
        assert_ne!(piped_extra.to_string(), two_extras.to_string());
    }

    #[test]
    fn values_with_separators_round_trip() -> TestResult {
        let customizations = Customizations::none()
            .with_notes("no ice; lemon")
            .with_size("a=b")
            .with_extras(["x|y", "50% sugar"]);

        assert_eq!(
            customizations.to_string(),
            "extras=50%25 sugar|x%7Cy;notes=no ice%3B lemon;size=a%3Db"
        );

        let parsed: Customizations = customizations.to_string().parse()?;

        assert_eq!(parsed, customizations);
        assert_eq!(parsed.notes(), Some("no ice; lemon"));

        Ok(())
    }

    #[test]
    fn parse_rejects_escapes_that_are_not_utf8() {
        assert_eq!(
            "notes=%FF".parse::<Customizations>(),
            Err(CustomizationError::Malformed("%FF".to_string()))
        );
    }

    #[test]
    fn parse_rejects_unknown_fields_and_levels() {
        assert_eq!(
            "colour=red".parse::<Customizations>(),
            Err(CustomizationError::UnknownField("colour".to_string()))
        );
        assert_eq!(
            "spice=lava".parse::<Customizations>(),
            Err(CustomizationError::UnknownSpiceLevel("lava".to_string()))
        );
        assert_eq!(
            "size".parse::<Customizations>(),
            Err(CustomizationError::Malformed("size".to_string()))
        );
    }

    #[test]
    fn options_check_rejects_choices_not_offered() {
        let options = CustomizationOptions {
            spice_level: false,
            sizes: vec!["S".to_string(), "L".to_string()],
            extras: vec!["mint".to_string()],
        };

        assert_eq!(
            options.check(&Customizations::none().with_size("L").with_extra("mint")),
            Ok(())
        );
        assert_eq!(
            options.check(&Customizations::none().with_size("XL")),
            Err(CustomizationError::SizeNotOffered("XL".to_string()))
        );
        assert_eq!(
            options.check(&Customizations::none().with_extra("honey")),
            Err(CustomizationError::ExtraNotOffered("honey".to_string()))
        );
        assert_eq!(
            options.check(&Customizations::none().with_spice_level(SpiceLevel::Mild)),
            Err(CustomizationError::SpiceLevelNotOffered)
        );
    }

    #[test]
    fn describe_lists_choices_in_language() {
        let customizations = Customizations::none()
            .with_spice_level(SpiceLevel::Hot)
            .with_size("L");

        assert_eq!(customizations.describe(Language::En), "Hot · L");
        assert_eq!(customizations.describe(Language::Ar), "حار · L");
        assert_eq!(Customizations::none().describe(Language::En), "");
    }
}
