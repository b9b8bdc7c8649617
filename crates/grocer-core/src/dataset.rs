//! # Dataset
//!
//! The catalog and stores a session works on.
//!
//! ## Where Datasets Come From
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  dataset.toml ──(front end reads file)──► DatasetConfig ─┐              │
//! │                                                          │              │
//! │  Dataset::builtin_config() ──────────────────────────────┤              │
//! │                                                          ▼              │
//! │                                           Dataset::from_config()        │
//! │                                           • validate names / prices     │
//! │                                           • build ONE shared catalog    │
//! │                                           • inventories = catalog clones│
//! │                                                          │              │
//! │                                                          ▼              │
//! │                                                   Session::new()        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Store inventories hold clones of catalog products, so product ids agree
//! between the catalog, every inventory and the cart.
//!
//! ## Dataset File Format
//! ```toml
//! [[products]]
//! name = "Milk (Skim)"
//! category = "DAIRY"
//! base_price = "2.00"
//!
//! [[products]]
//! name = "Batteries (AA)"
//! category = "UTIL"
//! uniform = true
//! base_price = "4.00"
//!
//! [[stores]]
//! name = "Store C"
//! x = 550
//! y = 250
//! default_modifier = "1.03"
//! modifiers = { WHEAT = "0.95", DAIRY = "0.93" }
//! stock = { except = ["Batteries (AA)"] }
//! ```
//!
//! Prices and modifiers are strings so they are never parsed as floats.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};

use crate::catalog::{Catalog, Product};
use crate::error::{CoreError, CoreResult, ValidationError};
use crate::store::{PricePolicy, Store};
use crate::types::{Category, Location};
use crate::validation::{
    validate_base_price, validate_modifier, validate_product_name, validate_store_name,
};

/// Where the user starts on the built-in map.
pub const DEFAULT_USER_LOCATION: Location = Location::new(520, 290);

// =============================================================================
// Configuration Types
// =============================================================================

/// One catalog entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductConfig {
    pub name: String,
    pub category: Category,
    /// Same price at every store.
    #[serde(default)]
    pub uniform: bool,
    /// Decimal string, e.g. "2.30".
    pub base_price: String,
}

/// Which catalog products a store carries.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StockConfig {
    /// The whole catalog.
    #[default]
    All,
    /// Only these product names.
    Only(Vec<String>),
    /// The whole catalog minus these product names.
    Except(Vec<String>),
}

/// One store entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreConfig {
    pub name: String,
    pub x: i64,
    pub y: i64,
    /// Multiplier for categories not listed in `modifiers`.
    #[serde(default = "default_modifier")]
    pub default_modifier: String,
    /// Category label → multiplier, e.g. `DAIRY = "0.93"`.
    #[serde(default)]
    pub modifiers: BTreeMap<String, String>,
    #[serde(default)]
    pub stock: StockConfig,
}

fn default_modifier() -> String {
    "1.00".to_string()
}

/// A whole dataset as written in a configuration file.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DatasetConfig {
    #[serde(default)]
    pub products: Vec<ProductConfig>,
    #[serde(default)]
    pub stores: Vec<StoreConfig>,
}

// =============================================================================
// Dataset
// =============================================================================

/// A validated catalog plus stores whose inventories come from it.
#[derive(Debug, Clone)]
pub struct Dataset {
    catalog: Catalog,
    stores: Vec<Store>,
}

impl Dataset {
    /// Assembles a dataset from already-built parts.
    ///
    /// ## Errors
    /// - Duplicate store names
    /// - An inventory product that is not (by id) a catalog product
    pub fn new(catalog: Catalog, stores: Vec<Store>) -> CoreResult<Self> {
        let mut seen = HashSet::new();
        for store in &stores {
            validate_store_name(store.name())?;
            if !seen.insert(store.name().to_string()) {
                return Err(ValidationError::Duplicate {
                    field: "store name".to_string(),
                    value: store.name().to_string(),
                }
                .into());
            }
            if let Some(stray) = store.inventory().iter().find(|p| !catalog.contains(p)) {
                return Err(CoreError::UnknownInventoryItem {
                    store: store.name().to_string(),
                    product: stray.name().to_string(),
                });
            }
        }
        Ok(Dataset { catalog, stores })
    }

    /// Validates a configuration and builds the dataset.
    pub fn from_config(config: &DatasetConfig) -> CoreResult<Self> {
        let mut catalog = Catalog::new();
        for entry in &config.products {
            validate_product_name(&entry.name)?;
            let base_price = validate_base_price(&entry.base_price)?;
            catalog.insert(Product::new(
                entry.name.clone(),
                entry.category,
                entry.uniform,
                base_price,
            ))?;
        }

        let stores = config
            .stores
            .iter()
            .map(|entry| build_store(&catalog, entry))
            .collect::<CoreResult<Vec<_>>>()?;

        Dataset::new(catalog, stores)
    }

    /// The demo dataset: 25 products and four stores.
    pub fn builtin() -> Self {
        Dataset::from_config(&Dataset::builtin_config()).expect("built-in dataset is valid")
    }

    /// Configuration behind [`Dataset::builtin`].
    pub fn builtin_config() -> DatasetConfig {
        use Category::*;

        let products: &[(&str, Category, bool, &str)] = &[
            ("Apples (Red)", Fruit, false, "1.05"),
            ("Apples (Green)", Fruit, false, "1.05"),
            ("Bananas", Fruit, false, "1.00"),
            ("Bread", Wheat, false, "2.30"),
            ("Grapes (Green)", Fruit, false, "0.95"),
            ("Chips", Snack, false, "1.25"),
            ("Crisps", Snack, false, "1.25"),
            ("Chisps", Snack, false, "1.25"),
            ("Beef (1 lb)", Meat, false, "6.00"),
            ("Chicken (1 lb)", Meat, false, "5.00"),
            ("Laundry Detergent", Util, true, "3.00"),
            ("Paper Towels", Util, false, "2.00"),
            ("Batteries (AA)", Util, true, "4.00"),
            ("Batteries (AAA)", Util, true, "2.00"),
            ("Cereal", Wheat, false, "3.00"),
            ("Milk (Skim)", Dairy, false, "2.00"),
            ("Milk (.5%)", Dairy, false, "2.10"),
            ("Milk (1%)", Dairy, false, "2.20"),
            ("Milk (2%)", Dairy, false, "2.30"),
            ("Cheese", Dairy, false, "3.00"),
            ("Water (2 L)", Beverage, false, "2.00"),
            ("Coca Cola (2 L)", Beverage, true, "2.00"),
            ("Pepsi (2 L)", Beverage, true, "2.00"),
            ("Sparkling Water", Beverage, false, "2.00"),
            ("Ice Cream", Dairy, false, "4.00"),
        ];

        let store = |name: &str,
                     (x, y): (i64, i64),
                     default: &str,
                     modifiers: &[(&str, &str)],
                     missing: &[&str]| StoreConfig {
            name: name.to_string(),
            x,
            y,
            default_modifier: default.to_string(),
            modifiers: modifiers
                .iter()
                .map(|(c, m)| (c.to_string(), m.to_string()))
                .collect(),
            stock: if missing.is_empty() {
                StockConfig::All
            } else {
                StockConfig::Except(missing.iter().map(|n| n.to_string()).collect())
            },
        };

        DatasetConfig {
            products: products
                .iter()
                .map(|&(name, category, uniform, price)| ProductConfig {
                    name: name.to_string(),
                    category,
                    uniform,
                    base_price: price.to_string(),
                })
                .collect(),
            stores: vec![
                store(
                    "Store A",
                    (400, 320),
                    "1.05",
                    &[("BEVERAGE", "0.92"), ("FRUIT", "0.94"), ("MEAT", "0.93")],
                    &["Bananas", "Chips", "Chisps"],
                ),
                store(
                    "Store B",
                    (490, 290),
                    "1.06",
                    &[("SNACK", "0.91"), ("UTIL", "0.92"), ("VEGGIE", "0.91")],
                    &["Chisps", "Apples (Green)", "Paper Towels"],
                ),
                store(
                    "Store C",
                    (550, 250),
                    "1.03",
                    &[("WHEAT", "0.95"), ("DAIRY", "0.93"), ("MEAT", "0.91")],
                    &["Paper Towels", "Batteries (AAA)", "Apples (Green)"],
                ),
                store("Store D", (630, 320), "0.98", &[], &[]),
            ],
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn stores(&self) -> &[Store] {
        &self.stores
    }

    pub fn into_parts(self) -> (Catalog, Vec<Store>) {
        (self.catalog, self.stores)
    }
}

fn build_store(catalog: &Catalog, entry: &StoreConfig) -> CoreResult<Store> {
    validate_store_name(&entry.name)?;

    let mut policy = PricePolicy::flat(validate_modifier(&entry.default_modifier)?);
    for (label, raw) in &entry.modifiers {
        let category: Category = label.parse()?;
        policy = policy.with(category, validate_modifier(raw)?);
    }

    let named = match &entry.stock {
        StockConfig::All => Vec::new(),
        StockConfig::Only(names) | StockConfig::Except(names) => names.clone(),
    };
    for name in &named {
        if catalog.find_by_name(name).is_none() {
            return Err(CoreError::UnknownInventoryItem {
                store: entry.name.clone(),
                product: name.clone(),
            });
        }
    }

    let inventory = catalog
        .iter()
        .filter(|p| match &entry.stock {
            StockConfig::All => true,
            StockConfig::Only(names) => names.iter().any(|n| n == p.name()),
            StockConfig::Except(names) => !names.iter().any(|n| n == p.name()),
        })
        .cloned()
        .collect();

    Ok(Store::new(
        entry.name.clone(),
        inventory,
        Location::new(entry.x, entry.y),
        policy,
    ))
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Money;
    use crate::types::PriceModifier;

    fn product(name: &str, price: &str) -> ProductConfig {
        ProductConfig {
            name: name.to_string(),
            category: Category::Dairy,
            uniform: false,
            base_price: price.to_string(),
        }
    }

    fn store(name: &str, stock: StockConfig) -> StoreConfig {
        StoreConfig {
            name: name.to_string(),
            x: 0,
            y: 0,
            default_modifier: default_modifier(),
            modifiers: BTreeMap::new(),
            stock,
        }
    }

    #[test]
    fn test_builtin_shape() {
        let dataset = Dataset::builtin();
        assert_eq!(dataset.catalog().len(), 25);

        let names: Vec<&str> = dataset.stores().iter().map(Store::name).collect();
        assert_eq!(names, vec!["Store A", "Store B", "Store C", "Store D"]);

        let sizes: Vec<usize> = dataset.stores().iter().map(|s| s.inventory().len()).collect();
        assert_eq!(sizes, vec![22, 22, 22, 25]);
    }

    #[test]
    fn test_builtin_inventories_share_catalog_identity() {
        let dataset = Dataset::builtin();
        let bread = dataset.catalog().require("Bread").unwrap();
        assert!(dataset.stores().iter().all(|s| s.stocks(bread)));

        let store_c = &dataset.stores()[2];
        assert!(store_c.stocks_name("Batteries (AA)"));
        assert!(!store_c.stocks_name("Batteries (AAA)"));
        assert!(!store_c.stocks_name("Paper Towels"));
        assert!(!store_c.stocks_name("Apples (Green)"));
        assert_eq!(
            store_c.policy().for_category(Category::Dairy),
            PriceModifier::from_bps(9300)
        );
    }

    #[test]
    fn test_from_config_stock_variants() {
        let config = DatasetConfig {
            products: vec![product("Milk", "2.00"), product("Cheese", "3.00")],
            stores: vec![
                store("All", StockConfig::All),
                store("Only", StockConfig::Only(vec!["Cheese".to_string()])),
                store("Except", StockConfig::Except(vec!["Cheese".to_string()])),
            ],
        };

        let dataset = Dataset::from_config(&config).unwrap();
        let stocked: Vec<Vec<&str>> = dataset
            .stores()
            .iter()
            .map(|s| s.inventory().iter().map(Product::name).collect())
            .collect();
        assert_eq!(
            stocked,
            vec![vec!["Milk", "Cheese"], vec!["Cheese"], vec!["Milk"]]
        );
        assert_eq!(
            dataset.catalog().require("Milk").unwrap().base_price(),
            Money::from_cents(200)
        );
    }

    #[test]
    fn test_from_config_rejects_unknown_inventory_name() {
        let config = DatasetConfig {
            products: vec![product("Milk", "2.00")],
            stores: vec![store("Store A", StockConfig::Only(vec!["Durian".to_string()]))],
        };
        assert!(matches!(
            Dataset::from_config(&config),
            Err(CoreError::UnknownInventoryItem { .. })
        ));
    }

    #[test]
    fn test_from_config_rejects_bad_values() {
        let negative = DatasetConfig {
            products: vec![product("Milk", "-2.00")],
            stores: vec![],
        };
        assert!(Dataset::from_config(&negative).is_err());

        let mut bad_modifier = store("Store A", StockConfig::All);
        bad_modifier.modifiers.insert("DAIRY".to_string(), "0".to_string());
        let config = DatasetConfig {
            products: vec![product("Milk", "2.00")],
            stores: vec![bad_modifier],
        };
        assert!(Dataset::from_config(&config).is_err());

        let mut bad_category = store("Store A", StockConfig::All);
        bad_category.modifiers.insert("FROZEN".to_string(), "0.9".to_string());
        let config = DatasetConfig {
            products: vec![],
            stores: vec![bad_category],
        };
        assert!(Dataset::from_config(&config).is_err());
    }

    #[test]
    fn test_from_config_rejects_duplicates() {
        let products = DatasetConfig {
            products: vec![product("Milk", "2.00"), product("Milk", "2.10")],
            stores: vec![],
        };
        assert!(Dataset::from_config(&products).is_err());

        let stores = DatasetConfig {
            products: vec![],
            stores: vec![store("Store A", StockConfig::All), store("Store A", StockConfig::All)],
        };
        assert!(matches!(
            Dataset::from_config(&stores),
            Err(CoreError::Validation(ValidationError::Duplicate { .. }))
        ));
    }

    #[test]
    fn test_new_rejects_inventory_outside_catalog() {
        let catalog = Catalog::new();
        let stray = Product::new("Milk", Category::Dairy, false, Money::from_cents(200));
        let store = Store::new("Store A", vec![stray], Location::new(0, 0), PricePolicy::default());

        assert!(matches!(
            Dataset::new(catalog, vec![store]),
            Err(CoreError::UnknownInventoryItem { .. })
        ));
    }
}
