//! # Rendering
//!
//! Turns session reads into text. Nothing here mutates or decides.
//!
//! ```text
//! mode:     cheapest
//! closest:  Store B (330 ft)
//! selected: Store C (440 ft)
//!   total:   $2.19
//!   missing: none
//! product:  Bread at Store C costs $2.19
//! ```

use grocer_core::{
    CartTotal, Catalog, MissingItems, Product, SelectedProductInfo, Session, SessionView,
    ShelfPrice, Store,
};

use crate::config::ShellConfig;

pub const HELP: &str = "\
commands:
  products                     list the catalog
  stores                       list stores with distance and pricing
  cart                         list the cart
  add <product>                add one unit to the cart
  remove <product>             remove one unit from the cart
  pick <product>               choose a cart product for price lookup
  unpick                       clear the chosen product
  choose <store>               choose a store (explicit mode)
  mode <explicit|closest|cheapest>
  locate <x> <y>               move to map coordinates
  price <store> / <product>    price of one product at one store
  status                       show the current selection
  help                         show this text
  quit                         leave";

pub fn products(catalog: &Catalog, config: &ShellConfig) -> String {
    if catalog.is_empty() {
        return "catalog is empty".to_string();
    }
    let width = name_width(catalog.iter().map(Product::name));
    catalog
        .iter()
        .map(|p| {
            let uniform = if p.is_uniform() { "  (same price everywhere)" } else { "" };
            format!(
                "  {:<width$}  {:<8}  {}{}",
                p.name(),
                p.category().as_str(),
                config.format_money(p.base_price()),
                uniform,
                width = width
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn stores(session: &Session, config: &ShellConfig) -> String {
    if session.stores().is_empty() {
        return "no stores".to_string();
    }
    let closest = session.closest_store().map(Store::name);
    let selected = session.selected_store().map(Store::name);
    let width = name_width(session.stores().iter().map(Store::name));

    session
        .stores()
        .iter()
        .map(|store| {
            let marker = match (Some(store.name()) == selected, Some(store.name()) == closest) {
                (true, _) => '>',
                (false, true) => '*',
                _ => ' ',
            };
            let mut modifiers: Vec<String> = store
                .policy()
                .modifiers()
                .iter()
                .map(|(category, m)| format!("{} x{}", category, m))
                .collect();
            modifiers.push(format!("other x{}", store.policy().default_modifier()));

            let total = match session.cart_total(store) {
                CartTotal::Empty => String::new(),
                CartTotal::Total(amount) => format!("  cart {}", config.format_money(amount)),
            };
            format!(
                "{} {:<width$}  {}  {} ft  [{}]{}",
                marker,
                store.name(),
                store.location(),
                store.distance_to_user(),
                modifiers.join(", "),
                total,
                width = width
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn cart(session: &Session, config: &ShellConfig) -> String {
    let cart = session.cart();
    if cart.is_empty() {
        return "cart is empty".to_string();
    }

    // One line per distinct product, in first-added order.
    let mut seen: Vec<&Product> = Vec::new();
    for product in cart.iter() {
        if !seen.iter().any(|p| p.is_same_item(product)) {
            seen.push(product);
        }
    }
    let chosen = session.selected_product();

    let mut lines: Vec<String> = seen
        .iter()
        .map(|product| {
            let marker = if chosen.is_some_and(|c| c.is_same_item(product)) { '>' } else { ' ' };
            format!(
                "{} {} x {}",
                marker,
                cart.quantity_of(product),
                product.name()
            )
        })
        .collect();

    if let Some(store) = session.selected_store() {
        if let Some(total) = session.cart_total(store).amount() {
            lines.push(format!("  total at {}: {}", store.name(), config.format_money(total)));
        }
    }
    lines.join("\n")
}

pub fn status(view: &SessionView, config: &ShellConfig) -> String {
    let mut lines = vec![format!("mode:     {}", view.mode)];

    lines.push(match view.closest {
        Some(ref c) => format!("closest:  {} ({} ft)", c.name, c.distance_feet),
        None => "closest:  none".to_string(),
    });

    match view.selected {
        Some(ref report) => {
            lines.push(format!(
                "selected: {} ({} ft)",
                report.name, report.distance_feet
            ));
            lines.push(format!("  total:   {}", total(&report.cart_total, config)));
            lines.push(format!("  missing: {}", missing(&report.missing_items)));
        }
        None => lines.push("selected: none".to_string()),
    }

    lines.push(format!(
        "product:  {}",
        product_info(&view.selected_product_info, config)
    ));
    lines.join("\n")
}

pub fn price(store: &Store, product: &Product, price: ShelfPrice, config: &ShellConfig) -> String {
    match price {
        ShelfPrice::Available(amount) => format!(
            "{} at {}: {}",
            product.name(),
            store.name(),
            config.format_money(amount)
        ),
        ShelfPrice::Unavailable => {
            format!("{} is not available at {}", product.name(), store.name())
        }
    }
}

fn total(total: &CartTotal, config: &ShellConfig) -> String {
    match total {
        CartTotal::Empty => "-".to_string(),
        CartTotal::Total(amount) => config.format_money(*amount),
    }
}

fn missing(items: &MissingItems) -> String {
    match items {
        MissingItems::EmptyCart => "-".to_string(),
        MissingItems::Items(products) if products.is_empty() => "none".to_string(),
        MissingItems::Items(_) => items.names().join(", "),
    }
}

fn product_info(info: &SelectedProductInfo, config: &ShellConfig) -> String {
    match info {
        SelectedProductInfo::CartEmpty => "cart is empty".to_string(),
        SelectedProductInfo::NoProductSelected => "no product picked".to_string(),
        SelectedProductInfo::NoStoreSelected => "no store selected".to_string(),
        SelectedProductInfo::Unavailable { product, store } => {
            format!("{} is not available at {}", product, store)
        }
        SelectedProductInfo::Price {
            product,
            store,
            price,
        } => format!("{} at {} costs {}", product, store, config.format_money(*price)),
    }
}

fn name_width<'a>(names: impl Iterator<Item = &'a str>) -> usize {
    names.map(|n| n.chars().count()).max().unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use grocer_core::{Dataset, Location, SelectionMode};

    fn session() -> Session {
        Session::new(Dataset::builtin(), Location::new(520, 290))
    }

    #[test]
    fn test_status_of_fresh_session() {
        let session = session();
        let text = status(session.view(), &ShellConfig::default());
        assert_eq!(
            text,
            "mode:     explicit\n\
             closest:  Store B (330 ft)\n\
             selected: none\n\
             product:  cart is empty"
        );
    }

    #[test]
    fn test_status_with_selection() {
        let mut session = session();
        let bread = session.catalog().require("Bread").unwrap().clone();
        session.add_to_cart(&bread).unwrap();
        session.set_mode(SelectionMode::Cheapest);
        session.select_product(&bread).unwrap();

        let text = status(session.view(), &ShellConfig::default());
        assert!(text.contains("selected: Store C (550 ft)"));
        assert!(text.contains("  total:   $2.19"));
        assert!(text.contains("  missing: none"));
        assert!(text.contains("product:  Bread at Store C costs $2.19"));
    }

    #[test]
    fn test_missing_lists_names() {
        let mut session = session();
        let bananas = session.catalog().require("Bananas").unwrap().clone();
        session.add_to_cart(&bananas).unwrap();
        let store_a = session.store_by_name("Store A").unwrap();

        assert_eq!(missing(&session.missing_items(store_a)), "Bananas");
        assert_eq!(missing(&MissingItems::EmptyCart), "-");
    }

    #[test]
    fn test_cart_groups_units() {
        let mut session = session();
        let milk = session.catalog().require("Milk (Skim)").unwrap().clone();
        session.add_to_cart(&milk).unwrap();
        session.add_to_cart(&milk).unwrap();

        assert_eq!(cart(&session, &ShellConfig::default()), "  2 x Milk (Skim)");
    }

    #[test]
    fn test_stores_marks_closest() {
        let session = session();
        let text = stores(&session, &ShellConfig::default());
        let store_b = text.lines().nth(1).unwrap();
        assert!(store_b.starts_with("* Store B"));
        assert!(store_b.contains("330 ft"));
    }

    #[test]
    fn test_price_line() {
        let session = session();
        let store_d = session.store_by_name("Store D").unwrap();
        let milk = session.catalog().require("Milk (Skim)").unwrap();
        let text = price(
            store_d,
            milk,
            session.effective_price(store_d, milk),
            &ShellConfig::default(),
        );
        assert_eq!(text, "Milk (Skim) at Store D: $1.96");
    }
}
