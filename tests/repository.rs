use coffee_pos::domain::customer::{ContactDetail, CustomerIdentity, CustomerType, NewCustomer};
use coffee_pos::domain::membership::NewMembership;
use coffee_pos::domain::order::{NewOrder, NewOrderLine, OrderListQuery};
use coffee_pos::domain::preference::NewPreference;
use coffee_pos::domain::product::{ProductListQuery, UpdateProduct};
use coffee_pos::domain::report::SalesDateRange;
use coffee_pos::repository::{
    CategoryReader, CustomerReader, CustomerWriter, OrderReader, OrderWriter, PreferenceReader,
    PreferenceWriter, ProductReader, ProductWriter, ReportReader, RepositoryError,
};

mod common;

fn order_of(customer_id: i32, lines: &[(i32, i32, i64)]) -> NewOrder {
    let lines = lines
        .iter()
        .map(|(product_id, quantity, price)| NewOrderLine::new(*product_id, *quantity, *price))
        .collect::<Option<Vec<_>>>()
        .unwrap();
    NewOrder::new(customer_id, "cash", lines).unwrap()
}

#[test]
fn test_catalog_lists_active_products_by_category_then_name() {
    let test_db = common::TestDb::new();
    let repo = test_db.repo();
    let menu = common::seed_menu(&repo);

    let categories = repo.list_categories().unwrap();
    assert_eq!(categories.len(), 1);
    assert_eq!(categories[0].name, "Coffee");

    let products = repo.list_products(ProductListQuery::new()).unwrap();
    let names: Vec<_> = products.iter().map(|product| product.name.as_str()).collect();
    assert_eq!(names, vec!["Latte", "Muffin"]);
    assert_eq!(products[0].category_name.as_deref(), Some("Coffee"));

    let all = repo
        .list_products(ProductListQuery::new().include_inactive())
        .unwrap();
    assert_eq!(all.len(), 3);

    let mocha = repo.get_product_by_id(menu.retired_mocha.id).unwrap().unwrap();
    assert!(!mocha.is_active);
}

#[test]
fn test_update_missing_product_is_not_found() {
    let test_db = common::TestDb::new();
    let repo = test_db.repo();

    let err = repo
        .update_product(404, &UpdateProduct::new().price_cents(100))
        .expect_err("expected update of a missing product to fail");
    assert!(matches!(err, RepositoryError::NotFound));
}

#[test]
fn test_price_change_does_not_rewrite_order_history() {
    let test_db = common::TestDb::new();
    let repo = test_db.repo();
    let menu = common::seed_menu(&repo);
    let customer = repo.create_customer(&NewCustomer::new("Alice")).unwrap();

    let order = repo
        .create_order(&order_of(customer.id, &[(menu.latte.id, 2, 3500)]))
        .unwrap();

    let updated = repo
        .update_product(menu.latte.id, &UpdateProduct::new().price_cents(3900))
        .unwrap();
    assert_eq!(updated.price_cents, 3900);

    let reloaded = repo.get_order_by_id(order.id).unwrap().unwrap();
    assert_eq!(reloaded.lines[0].unit_price_cents, 3500);
    assert_eq!(reloaded.lines[0].line_amount_cents, 7000);
    assert_eq!(reloaded.total_cents, 7000);
}

#[test]
fn test_order_is_persisted_with_all_lines() {
    let test_db = common::TestDb::new();
    let repo = test_db.repo();
    let menu = common::seed_menu(&repo);
    let customer = repo.create_customer(&NewCustomer::new("Alice")).unwrap();

    let order = repo
        .create_order(&order_of(
            customer.id,
            &[(menu.latte.id, 2, 3500), (menu.muffin.id, 1, 1850)],
        ))
        .unwrap();

    assert_eq!(order.total_cents, 8850);
    assert_eq!(order.lines.len(), 2);
    assert_eq!(order.lines[0].product_name, "Latte");
    assert_eq!(order.lines[1].product_name, "Muffin");
    assert_eq!(order.total_cents, order.lines_total_cents());
}

#[test]
fn test_unavailable_product_rolls_back_the_whole_order() {
    let test_db = common::TestDb::new();
    let repo = test_db.repo();
    let menu = common::seed_menu(&repo);
    let customer = repo.create_customer(&NewCustomer::new("Alice")).unwrap();

    let err = repo
        .create_order(&order_of(
            customer.id,
            &[(menu.latte.id, 1, 3500), (menu.retired_mocha.id, 1, 4000)],
        ))
        .expect_err("expected an inactive product to abort the order");
    assert!(matches!(err, RepositoryError::ProductUnavailable(id) if id == menu.retired_mocha.id));

    let err = repo
        .create_order(&order_of(customer.id, &[(menu.latte.id, 1, 3500), (9999, 1, 100)]))
        .expect_err("expected a missing product to abort the order");
    assert!(matches!(err, RepositoryError::ProductUnavailable(9999)));

    assert_eq!(test_db.count_orders(), 0);
    assert_eq!(test_db.count_order_lines(), 0);
}

#[test]
fn test_stale_unit_price_rolls_back_the_order() {
    let test_db = common::TestDb::new();
    let repo = test_db.repo();
    let menu = common::seed_menu(&repo);
    let customer = repo.create_customer(&NewCustomer::new("Alice")).unwrap();

    let priced = order_of(customer.id, &[(menu.muffin.id, 1, 1850), (menu.latte.id, 1, 3500)]);
    repo.update_product(menu.latte.id, &UpdateProduct::new().price_cents(3800))
        .unwrap();

    let err = repo
        .create_order(&priced)
        .expect_err("expected a changed price to abort the order");
    assert!(matches!(
        err,
        RepositoryError::PriceChanged {
            product_id,
            expected_cents: 3500,
            current_cents: 3800,
        } if product_id == menu.latte.id
    ));
    assert_eq!(test_db.count_orders(), 0);
    assert_eq!(test_db.count_order_lines(), 0);
}

#[test]
fn test_order_with_mismatched_total_is_refused() {
    let test_db = common::TestDb::new();
    let repo = test_db.repo();
    let menu = common::seed_menu(&repo);
    let customer = repo.create_customer(&NewCustomer::new("Alice")).unwrap();

    let mut new_order = order_of(customer.id, &[(menu.latte.id, 1, 3500)]);
    new_order.total_cents += 1;

    let err = repo
        .create_order(&new_order)
        .expect_err("expected a mismatched total to fail");
    assert!(matches!(err, RepositoryError::ConstraintViolation(_)));
    assert_eq!(test_db.count_orders(), 0);
}

#[test]
fn test_orders_are_listed_newest_first_with_customer_names() {
    let test_db = common::TestDb::new();
    let repo = test_db.repo();
    let menu = common::seed_menu(&repo);
    let alice = repo.create_customer(&NewCustomer::new("Alice")).unwrap();
    let bob = repo.create_customer(&NewCustomer::new("Bob")).unwrap();

    let first = repo
        .create_order(&order_of(alice.id, &[(menu.latte.id, 1, 3500)]))
        .unwrap();
    let second = repo
        .create_order(&order_of(bob.id, &[(menu.muffin.id, 1, 1850)]))
        .unwrap();
    repo.create_order(&order_of(alice.id, &[(menu.muffin.id, 2, 1850)]))
        .unwrap();

    let (total, items) = repo.list_orders(OrderListQuery::new()).unwrap();
    assert_eq!(total, 3);
    assert_eq!(items[1].id, second.id);
    assert_eq!(items[1].customer_name, "Bob");

    let (total, items) = repo
        .list_orders(OrderListQuery::new().customer_id(alice.id).paginate(2, 1))
        .unwrap();
    assert_eq!(total, 2);
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].id, first.id);
}

#[test]
fn test_customer_matching_prefers_members_then_newest() {
    let test_db = common::TestDb::new();
    let repo = test_db.repo();

    let older = repo
        .create_customer(&NewCustomer::new("Alice Smith").with_email("a@x.com"))
        .unwrap();
    let member = repo
        .create_member(
            &NewCustomer::new("ALICE SMITH").with_email("a@x.com"),
            &NewMembership::new("hash", None),
        )
        .unwrap();
    let newer = repo
        .create_customer(&NewCustomer::new("alice smith").with_email("a@x.com"))
        .unwrap();
    assert!(newer.id > older.id);

    let matched = repo
        .find_matching_customer(&CustomerIdentity::new("  Alice smith ").with_email("A@X.com"))
        .unwrap()
        .unwrap();
    assert_eq!(matched.id, member.customer.id);
    assert_eq!(matched.customer_type, CustomerType::Member);

    let nobody = repo
        .find_matching_customer(&CustomerIdentity::new("Alice Smith").with_email("b@x.com"))
        .unwrap();
    assert!(nobody.is_none());
}

#[test]
fn test_member_is_created_with_its_membership() {
    let test_db = common::TestDb::new();
    let repo = test_db.repo();

    let member = repo
        .create_member(
            &NewCustomer::new("Alice Smith")
                .with_email("alice@example.com")
                .with_phone("555-0101"),
            &NewMembership::new("hash", None),
        )
        .unwrap();
    assert_eq!(member.customer.customer_type, CustomerType::Member);
    assert_eq!(member.membership.customer_id, member.customer.id);

    let loaded = repo
        .get_member_by_email("alice@example.com")
        .unwrap()
        .unwrap();
    assert_eq!(loaded.customer.id, member.customer.id);
    assert_eq!(loaded.membership.password_hash, "hash");

    let by_phone = repo
        .find_member_by_contact("alice smith", &ContactDetail::Phone("555-0101".to_string()))
        .unwrap();
    assert_eq!(by_phone.map(|customer| customer.id), Some(member.customer.id));

    let wrong_email = repo
        .find_member_by_contact(
            "Alice Smith",
            &ContactDetail::Email("other@example.com".to_string()),
        )
        .unwrap();
    assert!(wrong_email.is_none());
}

#[test]
fn test_member_email_is_unique_among_members() {
    let test_db = common::TestDb::new();
    let repo = test_db.repo();

    repo.create_member(
        &NewCustomer::new("Alice Smith").with_email("dup@x.com"),
        &NewMembership::new("hash", None),
    )
    .unwrap();

    let err = repo
        .create_member(
            &NewCustomer::new("Other").with_email("dup@x.com"),
            &NewMembership::new("hash", None),
        )
        .unwrap_err();
    assert!(matches!(err, RepositoryError::UniqueViolation(_)));
    assert_eq!(test_db.count_customers(), 1);

    // Regular customers may share the address with a member.
    let guest = repo
        .create_customer(&NewCustomer::new("Other").with_email("dup@x.com"))
        .unwrap();
    let err = repo
        .create_membership(guest.id, &NewMembership::new("hash", None))
        .unwrap_err();
    assert!(matches!(err, RepositoryError::UniqueViolation(_)));
    assert!(repo.get_membership(guest.id).unwrap().is_none());
    assert!(!repo.get_customer_by_id(guest.id).unwrap().unwrap().is_member());
}

#[test]
fn test_regular_customer_is_promoted_to_member() {
    let test_db = common::TestDb::new();
    let repo = test_db.repo();

    let regular = repo
        .create_customer(&NewCustomer::new("Bob").with_email("bob@example.com"))
        .unwrap();
    assert!(repo.find_members_by_name("bob").unwrap().is_empty());
    assert!(repo.get_membership(regular.id).unwrap().is_none());

    let member = repo
        .create_membership(regular.id, &NewMembership::new("hash", None))
        .unwrap();
    assert_eq!(member.customer.id, regular.id);
    assert!(member.customer.is_member());

    let members = repo.find_members_by_name("BOB").unwrap();
    assert_eq!(members.len(), 1);
    assert!(repo.get_membership(regular.id).unwrap().is_some());
    assert_eq!(test_db.count_customers(), 1);
}

#[test]
fn test_membership_for_missing_customer_changes_nothing() {
    let test_db = common::TestDb::new();
    let repo = test_db.repo();

    let err = repo
        .create_membership(404, &NewMembership::new("hash", None))
        .expect_err("expected membership for a missing customer to fail");
    assert!(matches!(err, RepositoryError::NotFound));
    assert!(repo.get_membership(404).unwrap().is_none());
}

#[test]
fn test_preference_upsert_keeps_one_row_per_type() {
    let test_db = common::TestDb::new();
    let repo = test_db.repo();
    let customer = repo.create_customer(&NewCustomer::new("Alice")).unwrap();

    repo.upsert_preference(&NewPreference::new(customer.id, "default_pay", "cash"))
        .unwrap();
    let saved = repo
        .upsert_preference(&NewPreference::new(customer.id, "default_pay", "card"))
        .unwrap();
    repo.upsert_preference(&NewPreference::new(customer.id, "milk", "oat"))
        .unwrap();

    assert_eq!(saved.preference_value, "card");
    assert_eq!(test_db.count_preferences(customer.id), 2);

    let stored = repo
        .get_preference(customer.id, "default_pay")
        .unwrap()
        .unwrap();
    assert_eq!(stored.preference_value, "card");
    assert_eq!(repo.list_preferences(customer.id).unwrap().len(), 2);
}

#[test]
fn test_reports_aggregate_orders() {
    let test_db = common::TestDb::new();
    let repo = test_db.repo();
    let menu = common::seed_menu(&repo);
    let alice = repo.create_customer(&NewCustomer::new("Alice")).unwrap();
    let bob = repo.create_customer(&NewCustomer::new("Bob")).unwrap();

    repo.create_order(&order_of(
        alice.id,
        &[(menu.latte.id, 2, 3500), (menu.muffin.id, 1, 1850)],
    ))
    .unwrap();
    repo.create_order(&order_of(alice.id, &[(menu.latte.id, 1, 3500)]))
        .unwrap();

    let daily = repo.daily_sales(SalesDateRange::default()).unwrap();
    assert_eq!(daily.len(), 1);
    assert_eq!(daily[0].order_count, 2);
    assert_eq!(daily[0].total_cents, 12350);

    let products = repo.product_sales().unwrap();
    assert_eq!(products[0].product_name, "Latte");
    assert_eq!(products[0].total_quantity, 3);
    assert_eq!(products[0].revenue_cents, 10500);
    assert_eq!(products[0].order_count, 2);
    assert_eq!(products[0].category_name.as_deref(), Some("Coffee"));

    let customers = repo.customer_sales().unwrap();
    assert_eq!(customers.len(), 2);
    assert_eq!(customers[0].customer_id, alice.id);
    assert_eq!(customers[0].total_spent_cents, 12350);
    assert!(customers[0].last_order_at.is_some());
    assert_eq!(customers[1].customer_id, bob.id);
    assert_eq!(customers[1].order_count, 0);
    assert!(customers[1].last_order_at.is_none());

    let summary = repo.customer_summary(alice.id).unwrap().unwrap();
    assert_eq!(summary.order_count, 2);

    let favorites = repo.favorite_products(alice.id, 5).unwrap();
    assert_eq!(favorites[0].product_id, menu.latte.id);
    assert_eq!(favorites[0].total_quantity, 3);
    assert_eq!(favorites.len(), 2);
}
