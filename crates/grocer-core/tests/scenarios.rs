//! End-to-end scenarios driven through the public `Session` API.

use grocer_core::{
    CartTotal, Category, CoreError, Dataset, DatasetConfig, Location, MissingItems, Money,
    SelectedProductInfo, SelectionMode, Session, ShelfPrice,
};

const SMALL_TOWN: &str = r#"
[[products]]
name = "Milk"
category = "DAIRY"
base_price = "2.00"

[[products]]
name = "Bread"
category = "WHEAT"
base_price = "2.30"

[[products]]
name = "Batteries (AA)"
category = "UTIL"
uniform = true
base_price = "4.00"

[[products]]
name = "Durian"
category = "FRUIT"
base_price = "9.99"

[[stores]]
name = "Store A"
x = 0
y = 0
default_modifier = "1.05"
modifiers = { DAIRY = "0.93" }
stock = { only = ["Milk", "Bread"] }

[[stores]]
name = "Store D"
x = 30
y = 40
default_modifier = "0.98"
stock = { except = ["Durian"] }
"#;

fn small_town() -> Session {
    let config: DatasetConfig = toml::from_str(SMALL_TOWN).unwrap();
    Session::new(Dataset::from_config(&config).unwrap(), Location::new(0, 0))
}

fn add(session: &mut Session, name: &str) {
    let product = session.catalog().require(name).unwrap().clone();
    session.add_to_cart(&product).unwrap();
}

#[test]
fn milk_price_depends_on_store_policy() {
    let session = small_town();
    let milk = session.catalog().require("Milk").unwrap();
    let store_a = session.store_by_name("Store A").unwrap();
    let store_d = session.store_by_name("Store D").unwrap();

    assert_eq!(
        session.effective_price(store_a, milk),
        ShelfPrice::Available(Money::from_cents(186))
    );
    assert_eq!(
        session.effective_price(store_d, milk),
        ShelfPrice::Available(Money::from_cents(196))
    );
    assert_eq!(Money::from_cents(186).to_string(), "$1.86");
}

#[test]
fn unstocked_items_are_reported_missing_and_left_out_of_total() {
    let mut session = small_town();
    add(&mut session, "Bread");
    add(&mut session, "Batteries (AA)");

    let store_a = session.store_by_name("Store A").unwrap();
    assert_eq!(
        session.cart_total(store_a),
        CartTotal::Total(Money::from_cents(242))
    );
    assert_eq!(
        session.missing_items(store_a).names(),
        vec!["Batteries (AA)"]
    );
}

#[test]
fn distance_is_truncated_map_units_in_feet() {
    let session = small_town();
    let store_d = session.store_by_name("Store D").unwrap();
    assert_eq!(session.distance_to(store_d), 550);

    let view = session.view();
    let closest = view.closest.as_ref().unwrap();
    assert_eq!(closest.name, "Store A");
    assert_eq!(closest.distance_feet, 0);
}

#[test]
fn cheapest_with_empty_cart_selects_nothing() {
    let mut session = small_town();
    session.set_mode(SelectionMode::Cheapest);

    assert!(session.selected_store().is_none());
    assert!(session.view().selected.is_none());
    let store_a = session.store_by_name("Store A").unwrap();
    assert_eq!(session.cart_total(store_a), CartTotal::Empty);
    assert_eq!(session.missing_items(store_a), MissingItems::EmptyCart);
    assert_eq!(
        session.selected_product_info(),
        &SelectedProductInfo::CartEmpty
    );
}

#[test]
fn cheapest_never_picks_a_store_with_zero_total() {
    let mut session = small_town();
    session.set_mode(SelectionMode::Cheapest);
    add(&mut session, "Batteries (AA)");

    // Store A stocks none of the cart, so its 0.00 total does not win.
    assert_eq!(session.selected_store().unwrap().name(), "Store D");

    let report = session.view().selected.clone().unwrap();
    assert_eq!(report.cart_total, CartTotal::Total(Money::from_cents(400)));
    assert!(report.missing_items.is_none_missing());
}

#[test]
fn cheapest_clears_selection_when_no_store_is_feasible() {
    let mut session = small_town();
    session.set_mode(SelectionMode::Cheapest);
    add(&mut session, "Milk");
    assert_eq!(session.selected_store().unwrap().name(), "Store A");

    let milk = session.catalog().require("Milk").unwrap().clone();
    assert!(session.remove_from_cart(&milk));
    add(&mut session, "Durian");
    assert!(session.selected_store().is_none());
}

#[test]
fn cheapest_follows_cart_changes() {
    let mut session = small_town();
    session.set_mode(SelectionMode::Cheapest);

    add(&mut session, "Milk");
    // 1.86 at A vs 1.96 at D
    assert_eq!(session.selected_store().unwrap().name(), "Store A");

    add(&mut session, "Batteries (AA)");
    // 1.86 at A (batteries missing) vs 5.96 at D
    assert_eq!(session.selected_store().unwrap().name(), "Store A");
}

#[test]
fn explicit_mode_starts_clear_and_keeps_choice() {
    let mut session = small_town();
    session.set_mode(SelectionMode::Closest);
    assert_eq!(session.selected_store().unwrap().name(), "Store A");

    session.set_mode(SelectionMode::Explicit);
    assert!(session.selected_store().is_none());

    let store_d = session.store_by_name("Store D").unwrap().clone();
    session.select_store(&store_d).unwrap();
    session.set_user_location(30, 40);
    add(&mut session, "Milk");
    assert_eq!(session.selected_store().unwrap().name(), "Store D");
}

#[test]
fn choosing_a_store_outside_explicit_is_ignored() {
    let mut session = small_town();
    session.set_mode(SelectionMode::Closest);
    let revision = session.revision();

    let store_d = session.store_by_name("Store D").unwrap().clone();
    session.select_store(&store_d).unwrap();

    assert_eq!(session.selected_store().unwrap().name(), "Store A");
    assert_eq!(session.revision(), revision);
}

#[test]
fn closest_tracks_user_location() {
    let mut session = small_town();
    session.set_mode(SelectionMode::Closest);
    session.set_user_location(29, 39);

    assert_eq!(session.selected_store().unwrap().name(), "Store D");
    assert_eq!(session.view().closest.as_ref().unwrap().distance_feet, 11);
}

#[test]
fn uniform_products_cost_the_same_everywhere() {
    let session = Session::new(Dataset::builtin(), Location::new(520, 290));
    for name in ["Laundry Detergent", "Batteries (AAA)", "Coca Cola (2 L)", "Pepsi (2 L)"] {
        let product = session.catalog().require(name).unwrap();
        assert!(product.is_uniform());
        for store in session.stores().iter().filter(|s| s.stocks(product)) {
            assert_eq!(
                session.effective_price(store, product),
                ShelfPrice::Available(product.base_price()),
                "{name} at {}",
                store.name()
            );
        }
    }

    let aaa = session.catalog().require("Batteries (AAA)").unwrap();
    let store_c = session.store_by_name("Store C").unwrap();
    assert_eq!(session.effective_price(store_c, aaa), ShelfPrice::Unavailable);
}

#[test]
fn selected_product_lookup_walks_priorities() {
    let mut session = small_town();
    assert_eq!(
        session.selected_product_info(),
        &SelectedProductInfo::CartEmpty
    );

    add(&mut session, "Batteries (AA)");
    assert_eq!(
        session.selected_product_info(),
        &SelectedProductInfo::NoProductSelected
    );

    let batteries = session.catalog().require("Batteries (AA)").unwrap().clone();
    session.select_product(&batteries).unwrap();
    assert_eq!(
        session.selected_product_info(),
        &SelectedProductInfo::NoStoreSelected
    );

    let store_a = session.store_by_name("Store A").unwrap().clone();
    session.select_store(&store_a).unwrap();
    assert_eq!(
        session.selected_product_info(),
        &SelectedProductInfo::Unavailable {
            product: "Batteries (AA)".to_string(),
            store: "Store A".to_string(),
        }
    );

    let store_d = session.store_by_name("Store D").unwrap().clone();
    session.select_store(&store_d).unwrap();
    assert_eq!(
        session.selected_product_info(),
        &SelectedProductInfo::Price {
            product: "Batteries (AA)".to_string(),
            store: "Store D".to_string(),
            price: Money::from_cents(400),
        }
    );

    assert!(session.remove_from_cart(&batteries));
    assert!(session.selected_product().is_none());
    assert_eq!(
        session.selected_product_info(),
        &SelectedProductInfo::CartEmpty
    );
}

#[test]
fn commands_reject_unknown_references() {
    let mut session = small_town();
    let stranger = grocer_core::Product::new("Milk", Category::Dairy, false, Money::from_cents(200));

    assert!(matches!(
        session.add_to_cart(&stranger),
        Err(CoreError::ProductNotFound(_))
    ));
    assert!(matches!(
        session.select_product(&stranger),
        Err(CoreError::ProductNotInCart(_))
    ));
    assert!(!session.remove_from_cart(&stranger));
    assert_eq!(session.revision(), 0);
}

#[test]
fn view_serializes_for_front_ends() {
    let mut session = small_town();
    session.set_mode(SelectionMode::Closest);
    add(&mut session, "Milk");

    let json = serde_json::to_value(session.view()).unwrap();
    assert_eq!(json["mode"], "closest");
    assert_eq!(json["closest"]["name"], "Store A");
    assert_eq!(json["selected"]["cartTotal"]["kind"], "total");
    assert_eq!(json["selected"]["cartTotal"]["total"], 186);
}
