//! Catalog Query Engine
//!
//! `evaluate` runs the filter → sort → group pipeline over a borrowed product
//! slice. It never fails: an empty catalog, an inverted price range or a
//! search with no hits all produce an empty `QueryResult`.

use super::models::Product;
use serde::{Deserialize, Serialize};

/// Default inclusive price bounds for a fresh session
pub const DEFAULT_PRICE_MIN: u64 = 0;
pub const DEFAULT_PRICE_MAX: u64 = 5000;

// =============================================================================
// Filter State
// =============================================================================

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum CategoryFilter {
    #[default]
    #[serde(rename = "all")]
    All,
    #[serde(rename = "discounted")]
    Discounted,
    #[serde(rename = "inStock")]
    InStock,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortOption {
    #[default]
    #[serde(rename = "default")]
    Default,
    #[serde(rename = "priceLowHigh")]
    PriceAsc,
    #[serde(rename = "priceHighLow")]
    PriceDesc,
    #[serde(rename = "rating")]
    RatingDesc,
}

/// Inclusive price bounds in minor units. `min > max` is allowed and
/// matches nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PriceRange {
    pub min: u64,
    pub max: u64,
}

impl Default for PriceRange {
    fn default() -> Self {
        Self {
            min: DEFAULT_PRICE_MIN,
            max: DEFAULT_PRICE_MAX,
        }
    }
}

impl PriceRange {
    pub fn contains(&self, price: u64) -> bool {
        self.min <= price && price <= self.max
    }
}

/// The user's current narrowing and ordering choices.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FilterState {
    pub search_term: String,
    pub price_range: PriceRange,
    pub category_filter: CategoryFilter,
    pub sort_option: SortOption,
}

impl FilterState {
    fn matches(&self, product: &Product, needle: &str) -> bool {
        self.matches_search(product, needle)
            && self.price_range.contains(product.selling_price_minor)
            && self.matches_category(product)
    }

    fn matches_search(&self, product: &Product, needle: &str) -> bool {
        needle.is_empty()
            || product.title.to_lowercase().contains(needle)
            || product
                .brand
                .as_deref()
                .is_some_and(|brand| brand.to_lowercase().contains(needle))
    }

    fn matches_category(&self, product: &Product) -> bool {
        match self.category_filter {
            CategoryFilter::All => true,
            CategoryFilter::Discounted => product.is_discounted(),
            CategoryFilter::InStock => !product.out_of_stock,
        }
    }
}

/// Parses a price bound typed by the user, falling back to `fallback`.
///
/// The UI falls back to `0` for the minimum and `5000` for the maximum.
pub fn parse_price_bound(input: &str, fallback: u64) -> u64 {
    input.trim().parse().unwrap_or(fallback)
}

// =============================================================================
// Query Result
// =============================================================================

/// Products sharing one pattern tag, in result order.
#[derive(Debug, Clone, Serialize)]
pub struct ProductGroup<'a> {
    pub pattern: String,
    pub products: Vec<&'a Product>,
}

impl ProductGroup<'_> {
    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

/// Grouped output of the pipeline. Groups appear in first-seen order.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(transparent)]
pub struct QueryResult<'a> {
    groups: Vec<ProductGroup<'a>>,
}

impl<'a> QueryResult<'a> {
    /// Number of matched products across all groups.
    pub fn total(&self) -> usize {
        self.groups.iter().map(ProductGroup::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn group(&self, pattern: &str) -> Option<&ProductGroup<'a>> {
        self.groups.iter().find(|g| g.pattern == pattern)
    }

    pub fn groups(&self) -> &[ProductGroup<'a>] {
        &self.groups
    }

    /// Pattern tags in group order.
    pub fn patterns(&self) -> impl Iterator<Item = &str> {
        self.groups.iter().map(|g| g.pattern.as_str())
    }

    /// All matched products, group by group.
    pub fn products(&self) -> impl Iterator<Item = &'a Product> + '_ {
        self.groups.iter().flat_map(|g| g.products.iter().copied())
    }

    pub fn into_groups(self) -> Vec<ProductGroup<'a>> {
        self.groups
    }

    fn push(&mut self, product: &'a Product) {
        match self
            .groups
            .iter_mut()
            .find(|g| g.pattern == product.pattern_tag)
        {
            Some(group) => group.products.push(product),
            None => self.groups.push(ProductGroup {
                pattern: product.pattern_tag.clone(),
                products: vec![product],
            }),
        }
    }
}

// =============================================================================
// Pipeline
// =============================================================================

/// Filters, sorts and groups `catalog` according to `filter`.
pub fn evaluate<'a>(catalog: &'a [Product], filter: &FilterState) -> QueryResult<'a> {
    let needle = filter.search_term.to_lowercase();

    let mut matched: Vec<&Product> = catalog
        .iter()
        .filter(|product| filter.matches(product, &needle))
        .collect();

    // `sort_by` is stable, so ties keep catalog order.
    match filter.sort_option {
        SortOption::Default => {}
        SortOption::PriceAsc => matched.sort_by_key(|p| p.selling_price_minor),
        SortOption::PriceDesc => {
            matched.sort_by(|a, b| b.selling_price_minor.cmp(&a.selling_price_minor))
        }
        SortOption::RatingDesc => {
            matched.sort_by(|a, b| b.average_rating.total_cmp(&a.average_rating))
        }
    }

    let mut result = QueryResult::default();
    for product in matched {
        result.push(product);
    }

    tracing::debug!(
        search = %filter.search_term,
        matched = result.total(),
        groups = result.groups.len(),
        "catalog query evaluated"
    );

    result
}
