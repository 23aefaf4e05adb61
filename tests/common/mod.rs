//! Helpers for integration tests.
#![allow(dead_code)]

use diesel::prelude::*;
use pushkind_common::db::DbPool;
use tempfile::TempDir;

use coffee_pos::db::{establish_connection_pool, run_migrations};
use coffee_pos::domain::category::NewCategory;
use coffee_pos::domain::product::{NewProduct, Product};
use coffee_pos::repository::{CategoryWriter, DieselRepository, ProductWriter};

/// Migrated SQLite database living in its own temporary directory.
pub struct TestDb {
    dir: TempDir,
    pool: DbPool,
}

impl TestDb {
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temporary directory.");
        let path = dir.path().join("coffee_shop.db");
        let url = path.to_str().expect("Temporary path is not valid UTF-8.");

        let pool = establish_connection_pool(url).expect("Failed to establish SQLite connection.");
        run_migrations(&pool).expect("Migrations failed");

        TestDb { dir, pool }
    }

    pub fn pool(&self) -> DbPool {
        self.pool.clone()
    }

    pub fn repo(&self) -> DieselRepository {
        DieselRepository::new(self.pool())
    }

    pub fn path(&self) -> std::path::PathBuf {
        self.dir.path().join("coffee_shop.db")
    }

    pub fn count_orders(&self) -> i64 {
        use coffee_pos::schema::orders;

        let mut conn = self.pool.get().expect("Failed to get SQLite connection.");
        orders::table.count().get_result(&mut conn).unwrap()
    }

    pub fn count_order_lines(&self) -> i64 {
        use coffee_pos::schema::order_lines;

        let mut conn = self.pool.get().expect("Failed to get SQLite connection.");
        order_lines::table.count().get_result(&mut conn).unwrap()
    }

    pub fn count_customers(&self) -> i64 {
        use coffee_pos::schema::customers;

        let mut conn = self.pool.get().expect("Failed to get SQLite connection.");
        customers::table.count().get_result(&mut conn).unwrap()
    }

    pub fn count_preferences(&self, customer_id: i32) -> i64 {
        use coffee_pos::schema::preferences;

        let mut conn = self.pool.get().expect("Failed to get SQLite connection.");
        preferences::table
            .filter(preferences::customer_id.eq(customer_id))
            .count()
            .get_result(&mut conn)
            .unwrap()
    }
}

/// Seed the menu used across tests: Latte 35.00, Muffin 18.50 and an
/// inactive Mocha 40.00, all in the "Coffee" category.
pub struct Menu {
    pub latte: Product,
    pub muffin: Product,
    pub retired_mocha: Product,
}

pub fn seed_menu(repo: &DieselRepository) -> Menu {
    let coffee = repo
        .create_category(&NewCategory::new("Coffee"))
        .unwrap();

    let latte = repo
        .create_product(&NewProduct::new("Latte", 3500).with_category_id(coffee.id))
        .unwrap();
    let muffin = repo
        .create_product(&NewProduct::new("Muffin", 1850).with_category_id(coffee.id))
        .unwrap();
    let retired_mocha = repo
        .create_product(
            &NewProduct::new("Mocha", 4000)
                .with_category_id(coffee.id)
                .inactive(),
        )
        .unwrap();

    Menu {
        latte,
        muffin,
        retired_mocha,
    }
}
