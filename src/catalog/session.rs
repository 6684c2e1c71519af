//! Catalog browsing session
//!
//! Owns one user's filter state, the debounced search input and the
//! selected pattern, and turns query results into the view the presentation
//! layer renders.

use super::debounce::{Clock, Debouncer, SystemClock, DEFAULT_WINDOW};
use super::ingest::Catalog;
use super::models::Product;
use super::query::{
    evaluate, parse_price_bound, CategoryFilter, FilterState, PriceRange, QueryResult,
    SortOption, DEFAULT_PRICE_MAX, DEFAULT_PRICE_MIN,
};
use crate::config::Config;
use serde::Serialize;
use std::time::Duration;

// =============================================================================
// View Models
// =============================================================================

/// A product as displayed, with its derived pre-discount price.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductView<'a> {
    #[serde(flatten)]
    pub product: &'a Product,
    pub original_price_minor: u64,
}

impl<'a> From<&'a Product> for ProductView<'a> {
    fn from(product: &'a Product) -> Self {
        Self {
            original_price_minor: product.original_price_minor(),
            product,
        }
    }
}

/// One selectable pattern chip with its match count.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PatternChip {
    pub pattern: String,
    pub count: usize,
    pub selected: bool,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupView<'a> {
    pub pattern: String,
    pub count: usize,
    pub products: Vec<ProductView<'a>>,
}

/// Everything needed to render the product listing.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogView<'a> {
    /// Products shown: the selected group's size, or the total match count
    pub shown: usize,
    /// Matches across all groups, the "All" chip count
    pub total: usize,
    pub catalog_size: usize,
    pub selected_pattern: Option<String>,
    pub patterns: Vec<PatternChip>,
    pub groups: Vec<GroupView<'a>>,
    /// Set when the selected pattern has no matches
    pub empty_message: Option<String>,
}

impl<'a> CatalogView<'a> {
    /// Builds the view, narrowing the displayed groups to `selected` if set.
    pub fn from_result(
        result: QueryResult<'a>,
        catalog_size: usize,
        selected: Option<&str>,
    ) -> Self {
        let total = result.total();
        let patterns = result
            .groups()
            .iter()
            .map(|g| PatternChip {
                pattern: g.pattern.clone(),
                count: g.len(),
                selected: selected == Some(g.pattern.as_str()),
            })
            .collect();

        let groups: Vec<GroupView<'a>> = result
            .into_groups()
            .into_iter()
            .filter(|g| selected.map_or(true, |tag| g.pattern == tag))
            .map(|g| GroupView {
                count: g.products.len(),
                products: g.products.into_iter().map(ProductView::from).collect(),
                pattern: g.pattern,
            })
            .collect();

        let shown = match selected {
            Some(_) => groups.iter().map(|g| g.count).sum(),
            None => total,
        };

        let empty_message = match selected {
            Some(tag) if shown == 0 => Some(format!("No products found in {tag}")),
            _ => None,
        };

        Self {
            shown,
            total,
            catalog_size,
            selected_pattern: selected.map(str::to_string),
            patterns,
            groups,
            empty_message,
        }
    }
}

// =============================================================================
// Session
// =============================================================================

/// Per-user browsing state. Search input only reaches the filter once it
/// has been quiet for the debounce window.
#[derive(Debug)]
pub struct CatalogSession<C: Clock = SystemClock> {
    filter: FilterState,
    search: Debouncer<String, C>,
    selected_pattern: Option<String>,
}

impl Default for CatalogSession<SystemClock> {
    fn default() -> Self {
        Self::new(DEFAULT_WINDOW)
    }
}

impl CatalogSession<SystemClock> {
    pub fn new(window: Duration) -> Self {
        Self::with_clock(window, SystemClock)
    }

    /// Session using the configured search window.
    pub fn from_config(config: &Config) -> Self {
        Self::new(config.search_window())
    }
}

impl<C: Clock> CatalogSession<C> {
    pub fn with_clock(window: Duration, clock: C) -> Self {
        Self {
            filter: FilterState::default(),
            search: Debouncer::with_clock(window, clock),
            selected_pattern: None,
        }
    }

    pub fn filter(&self) -> &FilterState {
        &self.filter
    }

    pub fn selected_pattern(&self) -> Option<&str> {
        self.selected_pattern.as_deref()
    }

    /// Records a keystroke-level search update.
    pub fn type_search(&mut self, text: impl Into<String>) {
        self.search.submit(text.into());
    }

    pub fn has_pending_search(&self) -> bool {
        self.search.is_pending()
    }

    /// Commits the pending search term if the window has elapsed.
    /// Returns whether the filter changed.
    pub fn tick(&mut self) -> bool {
        match self.search.poll() {
            Some(term) => self.commit_search(term),
            None => false,
        }
    }

    /// Commits the pending search term immediately.
    pub fn flush_search(&mut self) -> bool {
        match self.search.flush() {
            Some(term) => self.commit_search(term),
            None => false,
        }
    }

    fn commit_search(&mut self, term: String) -> bool {
        if self.filter.search_term == term {
            return false;
        }
        tracing::debug!(search = %term, "search term committed");
        self.filter.search_term = term;
        true
    }

    pub fn set_sort(&mut self, sort: SortOption) {
        self.filter.sort_option = sort;
    }

    pub fn set_category(&mut self, category: CategoryFilter) {
        self.filter.category_filter = category;
    }

    pub fn set_price_range(&mut self, range: PriceRange) {
        self.filter.price_range = range;
    }

    /// Applies a typed minimum price; unparseable input means `0`.
    pub fn set_price_min_input(&mut self, input: &str) {
        self.filter.price_range.min = parse_price_bound(input, DEFAULT_PRICE_MIN);
    }

    /// Applies a typed maximum price; unparseable input means `5000`.
    pub fn set_price_max_input(&mut self, input: &str) {
        self.filter.price_range.max = parse_price_bound(input, DEFAULT_PRICE_MAX);
    }

    pub fn select_pattern(&mut self, pattern: Option<String>) {
        self.selected_pattern = pattern;
    }

    pub fn evaluate<'a>(&self, catalog: &'a Catalog) -> QueryResult<'a> {
        evaluate(catalog.products(), &self.filter)
    }

    pub fn view<'a>(&self, catalog: &'a Catalog) -> CatalogView<'a> {
        CatalogView::from_result(
            self.evaluate(catalog),
            catalog.len(),
            self.selected_pattern.as_deref(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::debounce::ManualClock;
    use crate::catalog::models::fixtures::product;

    fn catalog() -> Catalog {
        let mut solid = product("s1", 500);
        solid.title = "Solid Track Pants".into();
        solid.pattern_tag = "Solid".into();
        solid.discount_percent = Some(50);

        let mut printed = product("p1", 700);
        printed.title = "Printed Track Pants".into();
        printed.pattern_tag = "Printed".into();

        let mut joggers = product("j1", 900);
        joggers.title = "Joggers".into();

        Catalog::new(vec![solid, printed, joggers])
    }

    fn session(clock: &ManualClock) -> CatalogSession<ManualClock> {
        CatalogSession::with_clock(DEFAULT_WINDOW, clock.clone())
    }

    #[test]
    fn test_search_applies_only_after_quiescence() {
        let clock = ManualClock::new();
        let catalog = catalog();
        let mut session = session(&clock);

        session.type_search("j");
        session.type_search("jog");
        assert!(!session.tick());
        assert_eq!(session.view(&catalog).total, 3);

        clock.advance(DEFAULT_WINDOW);
        assert!(session.tick());
        assert_eq!(session.filter().search_term, "jog");
        assert_eq!(session.view(&catalog).total, 1);
    }

    #[test]
    fn test_from_config_uses_search_window() {
        let config = Config {
            search_debounce_ms: 150,
            ..Config::default()
        };
        let session = CatalogSession::from_config(&config);
        assert_eq!(session.search.window(), Duration::from_millis(150));
        assert_eq!(session.filter(), &FilterState::default());
    }

    #[test]
    fn test_flush_bypasses_window() {
        let clock = ManualClock::new();
        let mut session = session(&clock);

        session.type_search("printed");
        assert!(session.flush_search());
        assert!(!session.has_pending_search());
        assert_eq!(session.filter().search_term, "printed");
        // Same term again does not count as a change.
        session.type_search("printed");
        assert!(!session.flush_search());
    }

    #[test]
    fn test_price_inputs_fall_back() {
        let clock = ManualClock::new();
        let mut session = session(&clock);

        session.set_price_min_input("100");
        session.set_price_max_input("");
        assert_eq!(session.filter().price_range, PriceRange { min: 100, max: 5000 });

        session.set_price_min_input("lots");
        assert_eq!(session.filter().price_range.min, 0);
    }

    #[test]
    fn test_view_lists_chips_and_original_prices() {
        let clock = ManualClock::new();
        let catalog = catalog();
        let session = session(&clock);
        let view = session.view(&catalog);

        assert_eq!(view.shown, 3);
        assert_eq!(view.catalog_size, 3);
        let chips: Vec<_> = view.patterns.iter().map(|c| (c.pattern.as_str(), c.count)).collect();
        assert_eq!(chips, vec![("Solid", 1), ("Printed", 1), ("Other", 1)]);
        assert_eq!(view.groups[0].products[0].original_price_minor, 1000);
        assert!(view.empty_message.is_none());
    }

    #[test]
    fn test_selected_pattern_narrows_view() {
        let clock = ManualClock::new();
        let catalog = catalog();
        let mut session = session(&clock);

        session.select_pattern(Some("Printed".into()));
        let view = session.view(&catalog);
        assert_eq!(view.shown, 1);
        assert_eq!(view.total, 3);
        assert_eq!(view.groups.len(), 1);
        assert!(view.patterns.iter().any(|c| c.pattern == "Printed" && c.selected));

        session.set_category(CategoryFilter::Discounted);
        let view = session.view(&catalog);
        assert_eq!(view.shown, 0);
        assert_eq!(view.empty_message.as_deref(), Some("No products found in Printed"));
    }

    #[test]
    fn test_view_serializes_flat_product_fields() {
        let clock = ManualClock::new();
        let catalog = catalog();
        let mut session = session(&clock);
        session.set_sort(SortOption::PriceDesc);

        let json = serde_json::to_value(session.view(&catalog)).unwrap();
        let first = &json["groups"][0]["products"][0];
        assert_eq!(first["id"], "j1");
        assert_eq!(first["sellingPriceMinor"], 900);
        assert_eq!(first["originalPriceMinor"], 900);
        assert_eq!(json["catalogSize"], 3);
    }
}
