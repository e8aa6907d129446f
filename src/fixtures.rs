//! Fixtures
//!
//! YAML-defined products, baskets and offers for tests and demos, loaded
//! from `./fixtures` by default.

use std::{fs, path::PathBuf};

use rustc_hash::FxHashMap;
use rusty_money::iso::Currency;
use slotmap::SlotMap;
use thiserror::Error;

use crate::{
    basket::{Basket, line::Line},
    fixtures::{
        baskets::BasketFixture,
        offers::{OfferFixture, OfferRule, OffersFixture, ThresholdApplicator},
        products::ProductsFixture,
    },
    offers::OfferKey,
    products::{Product, ProductKey},
};

pub mod baskets;
pub mod offers;
pub mod products;

/// Fixture Parsing Errors
#[derive(Debug, Error)]
pub enum FixtureError {
    /// IO error reading fixture files
    #[error("Failed to read fixture file: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error
    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_norway::Error),

    /// Invalid price format
    #[error("Invalid price format: {0}")]
    InvalidPrice(String),

    /// Invalid percentage
    #[error("Invalid percentage: {0}")]
    InvalidPercentage(String),

    /// Unknown currency code
    #[error("Unknown currency code: {0}")]
    UnknownCurrency(String),

    /// Product not found
    #[error("Product not found: {0}")]
    ProductNotFound(String),

    /// Offer not found
    #[error("Offer not found: {0}")]
    OfferNotFound(String),

    /// Currency mismatch between fixture entries
    #[error("Currency mismatch: expected {0}, found {1}")]
    CurrencyMismatch(String, String),

    /// No products loaded yet
    #[error("No products loaded yet; currency unknown")]
    NoCurrency,

    /// No basket lines loaded
    #[error("No basket lines loaded; cannot create basket")]
    NoLines,

    /// Not enough lines in fixture
    #[error("Not enough lines in fixture, available: {available}, requested: {requested}")]
    NotEnoughLines {
        /// Number of lines defined in the fixture
        available: usize,

        /// Number of lines requested
        requested: usize,
    },

    /// Basket creation error
    #[error("Failed to create basket: {0}")]
    Basket(#[from] crate::basket::BasketError),
}

/// Fixture
#[derive(Debug)]
pub struct Fixture<'a> {
    /// Base path for fixture files
    base_path: PathBuf,

    /// `SlotMap` storing products with generated keys
    products: SlotMap<ProductKey, Product<'a>>,

    /// String key -> `SlotMap` key mappings for lookups
    product_keys: FxHashMap<String, ProductKey>,

    /// Keyspace for offer key generation
    offer_slots: SlotMap<OfferKey, ()>,

    /// String key -> offer key mappings for lookups
    offer_keys: FxHashMap<String, OfferKey>,

    /// Offer rules in fixture-key order
    rules: Vec<OfferRule<'a>>,

    /// Pre-built basket lines (reference products by `ProductKey`)
    lines: Vec<Line<'a>>,

    /// Currency for the fixture set
    currency: Option<&'static Currency>,
}

impl<'a> Fixture<'a> {
    /// Create a new empty fixture with default base path
    pub fn new() -> Self {
        Self::with_base_path("./fixtures")
    }

    /// Create a new empty fixture with custom base path
    pub fn with_base_path(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
            products: SlotMap::with_key(),
            product_keys: FxHashMap::default(),
            offer_slots: SlotMap::with_key(),
            offer_keys: FxHashMap::default(),
            rules: Vec::new(),
            lines: Vec::new(),
            currency: None,
        }
    }

    /// Load products from a YAML fixture file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed, or if there are currency mismatches.
    pub fn load_products(&mut self, name: &str) -> Result<&mut Self, FixtureError> {
        let file_path = self.base_path.join("products").join(format!("{name}.yml"));
        let contents = fs::read_to_string(&file_path)?;
        let fixture: ProductsFixture = serde_norway::from_str(&contents)?;

        for (key, product_fixture) in fixture.products {
            // Parse to get currency first, before creating the product.
            let (_minor_units, currency) = products::parse_price(&product_fixture.price)?;

            self.check_currency(currency)?;

            let product: Product<'a> = product_fixture.try_into()?;
            let product_key = self.products.insert(product);

            self.product_keys.insert(key, product_key);
        }

        Ok(self)
    }

    /// Load basket lines from a YAML fixture file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed, or if referenced products don't exist.
    pub fn load_basket(&mut self, name: &str) -> Result<&mut Self, FixtureError> {
        let file_path = self.base_path.join("baskets").join(format!("{name}.yml"));
        let contents = fs::read_to_string(&file_path)?;
        let fixture: BasketFixture = serde_norway::from_str(&contents)?;

        for line_fixture in fixture.lines {
            let product_key = self.product_key(&line_fixture.product)?;

            let product = self
                .products
                .get(product_key)
                .ok_or_else(|| FixtureError::ProductNotFound(line_fixture.product.clone()))?;

            self.lines
                .push(Line::new(product_key, line_fixture.quantity, product.price));
        }

        Ok(self)
    }

    /// Load offers from a YAML fixture file.
    ///
    /// Rules are ordered by their fixture key so application order is
    /// deterministic.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, or if an offer
    /// configuration is invalid.
    pub fn load_offers(&mut self, name: &str) -> Result<&mut Self, FixtureError> {
        let file_path = self.base_path.join("offers").join(format!("{name}.yml"));
        let contents = fs::read_to_string(&file_path)?;
        let fixture: OffersFixture = serde_norway::from_str(&contents)?;

        let mut entries: Vec<(String, OfferFixture)> = fixture.offers.into_iter().collect();

        entries.sort_by(|(a, _), (b, _)| a.cmp(b));

        for (key, offer_fixture) in entries {
            let offer_key = self.offer_slots.insert(());
            let rule = offer_fixture.try_into_rule(offer_key)?;

            if let Some(min) = rule.min_subtotal() {
                self.check_currency(min.currency())?;
            }

            self.rules.push(rule);
            self.offer_keys.insert(key, offer_key);
        }

        Ok(self)
    }

    /// Load a complete fixture set (products, basket, and offers with the same name)
    ///
    /// # Errors
    ///
    /// Returns an error if any of the fixture files cannot be loaded.
    pub fn from_set(name: &str) -> Result<Self, FixtureError> {
        let mut fixture = Self::new();

        fixture
            .load_products(name)?
            .load_basket(name)?
            .load_offers(name)?;

        Ok(fixture)
    }

    fn check_currency(&mut self, currency: &'static Currency) -> Result<(), FixtureError> {
        if let Some(existing) = self.currency {
            if existing != currency {
                return Err(FixtureError::CurrencyMismatch(
                    existing.iso_alpha_code.to_string(),
                    currency.iso_alpha_code.to_string(),
                ));
            }
        } else {
            self.currency = Some(currency);
        }

        Ok(())
    }

    /// Get a product by its string key
    ///
    /// # Errors
    ///
    /// Returns an error if the product is not found.
    pub fn product(&self, key: &str) -> Result<&Product<'a>, FixtureError> {
        let product_key = self.product_key(key)?;

        self.products
            .get(product_key)
            .ok_or_else(|| FixtureError::ProductNotFound(key.to_string()))
    }

    /// Get a product key by its string key
    ///
    /// # Errors
    ///
    /// Returns an error if the product is not found.
    pub fn product_key(&self, key: &str) -> Result<ProductKey, FixtureError> {
        self.product_keys
            .get(key)
            .copied()
            .ok_or_else(|| FixtureError::ProductNotFound(key.to_string()))
    }

    /// Get an offer rule by its string key
    ///
    /// # Errors
    ///
    /// Returns an error if the offer is not found.
    pub fn offer_rule(&self, key: &str) -> Result<&OfferRule<'a>, FixtureError> {
        let offer_key = self
            .offer_keys
            .get(key)
            .copied()
            .ok_or_else(|| FixtureError::OfferNotFound(key.to_string()))?;

        self.rules
            .iter()
            .find(|rule| rule.offer().key() == offer_key)
            .ok_or_else(|| FixtureError::OfferNotFound(key.to_string()))
    }

    /// Get all loaded basket lines
    pub fn lines(&self) -> &[Line<'a>] {
        &self.lines
    }

    /// Get all loaded offer rules, in fixture-key order
    pub fn rules(&self) -> &[OfferRule<'a>] {
        &self.rules
    }

    /// Create a basket from the loaded lines
    ///
    /// # Errors
    ///
    /// Returns an error if no lines are loaded or if basket creation fails.
    pub fn basket(&self, n: Option<usize>) -> Result<Basket<'a>, FixtureError> {
        let currency = self.currency.ok_or(FixtureError::NoCurrency)?;

        if self.lines.is_empty() {
            return Err(FixtureError::NoLines);
        }

        if let Some(n) = n
            && n > self.lines.len()
        {
            return Err(FixtureError::NotEnoughLines {
                requested: n,
                available: self.lines.len(),
            });
        }

        let lines: Vec<Line<'a>> = self
            .lines
            .iter()
            .take(n.unwrap_or(self.lines.len()))
            .cloned()
            .collect();

        Ok(Basket::with_lines(lines, currency)?)
    }

    /// Create a [`ThresholdApplicator`] from the loaded offer rules
    pub fn applicator(&self) -> ThresholdApplicator<'a> {
        ThresholdApplicator::new(self.rules.clone())
    }

    /// Get the currency
    ///
    /// # Errors
    ///
    /// Returns an error if no products have been loaded yet.
    pub fn currency(&self) -> Result<&'static Currency, FixtureError> {
        self.currency.ok_or(FixtureError::NoCurrency)
    }
}

impl Default for Fixture<'_> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use std::{env, fs, path::Path};

    use rusty_money::iso::GBP;
    use testresult::TestResult;

    use super::*;

    fn write_fixture(base: &Path, category: &str, name: &str, contents: &str) -> TestResult {
        let dir = base.join(category);

        fs::create_dir_all(&dir)?;
        fs::write(dir.join(format!("{name}.yml")), contents)?;

        Ok(())
    }

    #[test]
    fn fixture_loads_products_basket_and_offers() -> TestResult {
        let fixture = Fixture::from_set("storefront")?;

        assert_eq!(fixture.product_keys.len(), 3);

        let coffee = fixture.product("coffee")?;

        assert_eq!(coffee.name, "Ground Coffee");
        assert_eq!(coffee.price.to_minor_units(), 450);

        assert_eq!(fixture.lines().len(), 3);
        assert_eq!(fixture.rules().len(), 3);
        assert_eq!(fixture.currency()?, GBP);

        Ok(())
    }

    #[test]
    fn fixture_rules_are_in_key_order() -> TestResult {
        let fixture = Fixture::from_set("storefront")?;

        let names: Vec<&str> = fixture
            .rules()
            .iter()
            .map(|rule| rule.offer().name())
            .collect();

        // Fixture keys sort as: big_spender, clearance, multibuy.
        assert_eq!(names, ["Big Spender", "Clearance", "Pastry Multibuy"]);

        Ok(())
    }

    #[test]
    fn fixture_basket_creates_basket_from_all_lines() -> TestResult {
        let fixture = Fixture::from_set("storefront")?;
        let basket = fixture.basket(None)?;

        assert_eq!(basket.len(), 3);
        assert_eq!(basket.currency(), GBP);

        Ok(())
    }

    #[test]
    fn fixture_basket_creates_basket_from_first_n_lines() -> TestResult {
        let fixture = Fixture::from_set("storefront")?;
        let basket = fixture.basket(Some(2))?;

        assert_eq!(basket.len(), 2);

        Ok(())
    }

    #[test]
    fn fixture_basket_rejects_request_for_too_many_lines() -> TestResult {
        let fixture = Fixture::from_set("storefront")?;
        let result = fixture.basket(Some(10));

        assert!(matches!(
            result,
            Err(FixtureError::NotEnoughLines {
                requested: 10,
                available: 3
            })
        ));

        Ok(())
    }

    #[test]
    fn fixture_product_not_found_returns_error() {
        let fixture = Fixture::new();
        let result = fixture.product("nonexistent");

        assert!(matches!(result, Err(FixtureError::ProductNotFound(_))));
    }

    #[test]
    fn fixture_offer_not_found_returns_error() {
        let fixture = Fixture::new();
        let result = fixture.offer_rule("missing");

        assert!(matches!(result, Err(FixtureError::OfferNotFound(_))));
    }

    #[test]
    fn fixture_no_basket_lines_returns_error() -> TestResult {
        let mut fixture = Fixture::new();

        fixture.load_products("storefront")?;

        let result = fixture.basket(None);

        assert!(matches!(result, Err(FixtureError::NoLines)));

        Ok(())
    }

    #[test]
    fn fixture_no_currency_returns_error() {
        let fixture = Fixture::new();
        let result = fixture.currency();

        assert!(matches!(result, Err(FixtureError::NoCurrency)));
    }

    #[test]
    fn fixture_load_products_rejects_currency_mismatch() -> TestResult {
        let unique = format!(
            "wicker-fixtures-{}-{}",
            std::process::id(),
            std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)?
                .as_nanos()
        );

        let base_path = env::temp_dir().join(unique);

        write_fixture(
            &base_path,
            "products",
            "usd_set",
            "products:\n  apple:\n    name: Apple\n    price: 1.00 USD\n",
        )?;

        write_fixture(
            &base_path,
            "products",
            "gbp_set",
            "products:\n  banana:\n    name: Banana\n    price: 1.00 GBP\n",
        )?;

        let mut fixture = Fixture::with_base_path(&base_path);

        fixture.load_products("usd_set")?;

        let result = fixture.load_products("gbp_set");

        assert!(matches!(result, Err(FixtureError::CurrencyMismatch(_, _))));

        Ok(())
    }

    #[test]
    fn fixture_exclusive_flag_survives_loading() -> TestResult {
        let fixture = Fixture::from_set("storefront")?;

        assert!(fixture.offer_rule("clearance")?.offer().is_exclusive());
        assert!(!fixture.offer_rule("multibuy")?.offer().is_exclusive());

        Ok(())
    }
}
