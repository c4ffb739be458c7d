//! Session
//!
//! Everything a customer changes while browsing the menu, held in one place:
//! display language and theme, search and filters, the section in view, the
//! item whose detail view is open and the cart.

use std::{fmt, str::FromStr};

use smallvec::SmallVec;
use thiserror::Error;
use tracing::debug;

use crate::{
    cart::{Cart, CartError, CartObserver, NoopObserver},
    catalog::{Catalog, MenuItem},
    customizations::Customizations,
    i18n::{Language, Message},
    order::{self, OrderError},
    search::{self, MenuFilter},
};

/// Errors related to session navigation or ordering.
#[derive(Debug, Error, PartialEq)]
pub enum SessionError {
    /// No category has this id.
    #[error("Unknown section: {0}")]
    UnknownSection(String),

    /// No item has this id.
    #[error("Unknown item: {0}")]
    UnknownItem(String),

    /// Adding from the detail view requires an open item.
    #[error("No item is selected")]
    NoItemSelected,

    /// Error from the cart.
    #[error(transparent)]
    Cart(#[from] CartError),
}

/// Error returned when a theme name is not recognized.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("Unknown theme: {0} (expected `light` or `dark`)")]
pub struct UnknownTheme(pub String);

/// Color theme of the menu.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Theme {
    /// Light background
    #[default]
    Light,

    /// Dark background
    Dark,
}

impl Theme {
    /// The other theme.
    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }
}

impl FromStr for Theme {
    type Err = UnknownTheme;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            other => Err(UnknownTheme(other.to_string())),
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        })
    }
}

/// Browsing and ordering state for one customer.
#[derive(Debug, Clone)]
pub struct MenuSession<'a> {
    catalog: Catalog<'a>,
    language: Language,
    theme: Theme,
    query: String,
    filters: SmallVec<[MenuFilter; 4]>,
    active_section: Option<String>,
    selected_item: Option<String>,
    cart: Cart<'a>,
}

impl<'a> MenuSession<'a> {
    /// Start a session on `catalog` with an empty cart, English text, the
    /// light theme and the first section active.
    pub fn new(catalog: Catalog<'a>) -> Self {
        let cart = Cart::new(catalog.currency());
        let active_section = catalog
            .categories()
            .first()
            .map(|category| category.id().to_string());

        Self {
            catalog,
            language: Language::default(),
            theme: Theme::default(),
            query: String::new(),
            filters: SmallVec::new(),
            active_section,
            selected_item: None,
            cart,
        }
    }

    /// Start in the given language.
    #[must_use]
    pub fn with_language(mut self, language: Language) -> Self {
        self.language = language;
        self
    }

    /// The full catalog.
    pub fn catalog(&self) -> &Catalog<'a> {
        &self.catalog
    }

    /// Display language
    pub fn language(&self) -> Language {
        self.language
    }

    /// Switch between Arabic and English.
    pub fn toggle_language(&mut self) -> Language {
        self.language = self.language.toggled();
        self.language
    }

    /// Color theme
    pub fn theme(&self) -> Theme {
        self.theme
    }

    /// Switch between light and dark.
    pub fn toggle_theme(&mut self) -> Theme {
        self.theme = self.theme.toggled();
        self.theme
    }

    /// Current search query
    pub fn query(&self) -> &str {
        &self.query
    }

    /// Replace the search query.
    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
    }

    /// Active filters, in display order.
    pub fn filters(&self) -> &[MenuFilter] {
        &self.filters
    }

    /// Turn a filter on or off. Returns whether it is now active.
    pub fn toggle_filter(&mut self, filter: MenuFilter) -> bool {
        match self.filters.binary_search(&filter) {
            Ok(idx) => {
                self.filters.remove(idx);
                false
            }
            Err(idx) => {
                self.filters.insert(idx, filter);
                true
            }
        }
    }

    /// Turn every filter off.
    pub fn clear_filters(&mut self) {
        self.filters.clear();
    }

    /// The catalog narrowed by the current query and filters.
    pub fn visible_catalog(&self) -> Catalog<'a> {
        search::filter_with(&self.catalog, &self.query, &self.filters)
    }

    /// Id of the section in view
    pub fn active_section(&self) -> Option<&str> {
        self.active_section.as_deref()
    }

    /// Scroll to a section.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::UnknownSection`] if no category has this id.
    pub fn select_section(&mut self, id: &str) -> Result<(), SessionError> {
        if self.catalog.category(id).is_none() {
            return Err(SessionError::UnknownSection(id.to_string()));
        }

        self.active_section = Some(id.to_string());

        Ok(())
    }

    /// Open the detail view of an item.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::UnknownItem`] if no item has this id.
    pub fn open_item(&mut self, id: &str) -> Result<&MenuItem<'a>, SessionError> {
        let item = self
            .catalog
            .item(id)
            .ok_or_else(|| SessionError::UnknownItem(id.to_string()))?;

        self.selected_item = Some(id.to_string());

        Ok(item)
    }

    /// Close the detail view.
    pub fn close_item(&mut self) {
        self.selected_item = None;
    }

    /// The item whose detail view is open.
    pub fn selected_item(&self) -> Option<&MenuItem<'a>> {
        self.selected_item
            .as_deref()
            .and_then(|id| self.catalog.item(id))
    }

    /// Add one unit of an item straight from its card.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::UnknownItem`] for an unknown id, or a cart error.
    pub fn quick_add(&mut self, id: &str) -> Result<(), SessionError> {
        let item = self
            .catalog
            .item(id)
            .ok_or_else(|| SessionError::UnknownItem(id.to_string()))?;

        self.cart.add(item, 1, Customizations::none())?;

        Ok(())
    }

    /// Add the open item to the cart, then close its detail view.
    ///
    /// # Errors
    ///
    /// See [`MenuSession::add_selected_with_observer`].
    pub fn add_selected(
        &mut self,
        quantity: i64,
        customizations: Customizations,
    ) -> Result<(), SessionError> {
        self.add_selected_with_observer(quantity, customizations, &mut NoopObserver)
    }

    /// Add the open item to the cart, notifying `observer`, then close its
    /// detail view. The view stays open if the cart rejects the addition.
    ///
    /// # Errors
    ///
    /// - [`SessionError::NoItemSelected`]: no detail view is open.
    /// - [`SessionError::Cart`]: the cart rejected the quantity.
    pub fn add_selected_with_observer<O: CartObserver>(
        &mut self,
        quantity: i64,
        customizations: Customizations,
        observer: &mut O,
    ) -> Result<(), SessionError> {
        let item = self
            .selected_item
            .as_deref()
            .and_then(|id| self.catalog.item(id))
            .ok_or(SessionError::NoItemSelected)?;

        self.cart
            .add_with_observer(item, quantity, customizations, observer)?;

        debug!(item = item.id(), quantity, "added from detail view");

        self.selected_item = None;

        Ok(())
    }

    /// The cart
    pub fn cart(&self) -> &Cart<'a> {
        &self.cart
    }

    /// The cart, for removing lines or changing quantities.
    pub fn cart_mut(&mut self) -> &mut Cart<'a> {
        &mut self.cart
    }

    /// Units in the cart, shown on the cart badge.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::Overflow`] if the count does not fit in 64 bits.
    pub fn cart_item_count(&self) -> Result<u64, CartError> {
        Ok(self.cart.totals()?.total_items)
    }

    /// Checkout is only offered once something is in the cart.
    pub fn can_checkout(&self) -> bool {
        !self.cart.is_empty()
    }

    /// Order message in the session language.
    ///
    /// # Errors
    ///
    /// See [`order::compose`].
    pub fn order_message(&self) -> Result<String, OrderError> {
        order::compose(&self.cart, self.catalog.venue(), self.language)
    }

    /// Checkout deep link in the session language.
    ///
    /// # Errors
    ///
    /// See [`order::checkout_link`].
    pub fn checkout_link(&self) -> Result<String, OrderError> {
        order::checkout_link(&self.cart, self.catalog.venue(), self.language)
    }

    /// Confirmation shown after calling a waiter.
    pub fn call_waiter(&self) -> &'static str {
        self.language.text(Message::CallWaiter)
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::customizations::SpiceLevel;

    use super::*;

    fn session() -> Result<MenuSession<'static>, crate::catalog::CatalogError> {
        Ok(MenuSession::new(Catalog::embedded()?))
    }

    #[test]
    fn starts_in_english_light_on_first_section() -> TestResult {
        let session = session()?;

        assert_eq!(session.language(), Language::En);
        assert_eq!(session.theme(), Theme::Light);
        assert_eq!(session.active_section(), Some("shisha"));
        assert!(!session.can_checkout());

        Ok(())
    }

    #[test]
    fn toggles_language_and_theme() -> TestResult {
        let mut session = session()?;

        assert_eq!(session.toggle_language(), Language::Ar);
        assert_eq!(session.toggle_theme(), Theme::Dark);
        assert_eq!(session.call_waiter(), "سيتم استدعاء النادل قريباً");
        assert_eq!(session.toggle_language(), Language::En);
        assert_eq!(session.call_waiter(), "Waiter will be called shortly");

        Ok(())
    }

    #[test]
    fn theme_names_round_trip() -> TestResult {
        assert_eq!("Dark".parse::<Theme>()?, Theme::Dark);
        assert_eq!(Theme::Light.to_string(), "light");
        assert_eq!(
            "Sepia".parse::<Theme>(),
            Err(UnknownTheme("sepia".to_string()))
        );

        Ok(())
    }

    #[test]
    fn filters_toggle_and_narrow_catalog() -> TestResult {
        let mut session = session()?;

        assert!(session.toggle_filter(MenuFilter::Vegetarian));
        assert!(session.toggle_filter(MenuFilter::Popular));
        assert_eq!(
            session.filters(),
            &[MenuFilter::Popular, MenuFilter::Vegetarian]
        );
        assert!(!session.toggle_filter(MenuFilter::Popular));

        let visible = session.visible_catalog();

        assert!(visible.items().all(|item| item.details().dietary.vegetarian));

        session.clear_filters();
        session.set_query("");

        assert_eq!(session.visible_catalog(), *session.catalog());

        Ok(())
    }

    #[test]
    fn query_narrows_visible_catalog() -> TestResult {
        let mut session = session()?;

        session.set_query("almaza");

        let ids: Vec<_> = session
            .visible_catalog()
            .items()
            .map(|item| item.id().to_string())
            .collect();

        assert_eq!(ids, vec!["almaza", "almaza-light"]);
        assert_eq!(session.query(), "almaza");

        Ok(())
    }

    #[test]
    fn select_section_requires_known_category() -> TestResult {
        let mut session = session()?;

        session.select_section("snacks")?;

        assert_eq!(session.active_section(), Some("snacks"));
        assert_eq!(
            session.select_section("desserts"),
            Err(SessionError::UnknownSection("desserts".to_string()))
        );
        assert_eq!(session.active_section(), Some("snacks"));

        Ok(())
    }

    #[test]
    fn add_from_detail_view_closes_it() -> TestResult {
        let mut session = session()?;

        session.open_item("coffee")?;

        assert_eq!(session.selected_item().map(MenuItem::id), Some("coffee"));

        session.add_selected(2, Customizations::none().with_size("Large"))?;

        assert!(session.selected_item().is_none());
        assert_eq!(session.cart_item_count()?, 2);
        assert!(session.can_checkout());

        Ok(())
    }

    #[test]
    fn rejected_add_keeps_detail_view_open() -> TestResult {
        let mut session = session()?;

        session.open_item("coffee")?;

        assert_eq!(
            session.add_selected(0, Customizations::none()),
            Err(SessionError::Cart(CartError::InvalidQuantity(0)))
        );
        assert!(session.selected_item().is_some());

        Ok(())
    }

    #[test]
    fn add_without_selection_fails() -> TestResult {
        let mut session = session()?;

        assert_eq!(
            session.add_selected(1, Customizations::none()),
            Err(SessionError::NoItemSelected)
        );

        Ok(())
    }

    #[test]
    fn unknown_item_is_rejected() -> TestResult {
        let mut session = session()?;

        assert!(matches!(
            session.open_item("burger"),
            Err(SessionError::UnknownItem(id)) if id == "burger"
        ));
        assert_eq!(
            session.quick_add("burger"),
            Err(SessionError::UnknownItem("burger".to_string()))
        );

        Ok(())
    }

    #[test]
    fn observer_runs_for_detail_view_adds() -> TestResult {
        let mut session = session()?;
        let mut buzzes = 0;

        session.open_item("shisha")?;
        session.add_selected_with_observer(
            1,
            Customizations::none().with_spice_level(SpiceLevel::Mild),
            &mut |_: &crate::cart::CartLine<'_>, _: u64| buzzes += 1,
        )?;

        assert_eq!(buzzes, 1);

        Ok(())
    }

    #[test]
    fn checkout_follows_session_language() -> TestResult {
        let mut session = session()?.with_language(Language::Ar);

        assert!(matches!(session.checkout_link(), Err(OrderError::EmptyCart)));

        session.quick_add("pepsi")?;
        session.quick_add("pepsi")?;

        let message = session.order_message()?;

        assert!(message.starts_with("طلب جديد من تاون كافيه"));
        assert!(message.contains("x2"));
        assert!(session.checkout_link()?.starts_with("https://wa.me/96170264131?text="));

        session.cart_mut().clear();

        assert!(!session.can_checkout());

        Ok(())
    }
}
