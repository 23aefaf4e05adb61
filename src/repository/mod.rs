//! Persistence gateway: read/write traits per entity and their diesel implementation.

use pushkind_common::db::{DbConnection, DbPool};

use crate::domain::{
    category::{Category, NewCategory},
    customer::{ContactDetail, Customer, CustomerIdentity, NewCustomer},
    membership::{Member, Membership, NewMembership},
    order::{NewOrder, Order, OrderListItem, OrderListQuery},
    preference::{NewPreference, Preference},
    product::{NewProduct, Product, ProductListQuery, UpdateProduct},
    report::{CustomerSales, DailySales, FavoriteProduct, ProductSales, SalesDateRange},
};

pub mod category;
pub mod customer;
pub mod errors;
pub mod order;
pub mod preference;
pub mod product;
pub mod report;

#[cfg(test)]
pub mod mock;

pub use errors::{RepositoryError, RepositoryResult};

#[derive(Clone)]
/// Diesel-backed repository implementation that wraps an r2d2 pool.
pub struct DieselRepository {
    pool: DbPool, // r2d2::Pool is cheap to clone
}

impl DieselRepository {
    /// Create a new repository using the provided connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    fn conn(&self) -> RepositoryResult<DbConnection> {
        Ok(self.pool.get()?)
    }
}

/// Read-only operations over categories.
pub trait CategoryReader {
    fn get_category_by_id(&self, id: i32) -> RepositoryResult<Option<Category>>;
    fn list_categories(&self) -> RepositoryResult<Vec<Category>>;
}

/// Write operations over categories.
pub trait CategoryWriter {
    fn create_category(&self, new_category: &NewCategory) -> RepositoryResult<Category>;
}

/// Read-only operations over catalog products.
pub trait ProductReader {
    fn get_product_by_id(&self, id: i32) -> RepositoryResult<Option<Product>>;
    fn list_products(&self, query: ProductListQuery) -> RepositoryResult<Vec<Product>>;
}

/// Write operations over catalog products.
pub trait ProductWriter {
    fn create_product(&self, new_product: &NewProduct) -> RepositoryResult<Product>;
    fn update_product(&self, product_id: i32, updates: &UpdateProduct)
    -> RepositoryResult<Product>;
}

/// Lookups used by identity resolution, verification and member login.
pub trait CustomerReader {
    fn get_customer_by_id(&self, id: i32) -> RepositoryResult<Option<Customer>>;
    /// Customer whose name matches case-insensitively and, when the identity
    /// carries one, whose email matches. Members win over regular customers,
    /// then the most recently created row.
    fn find_matching_customer(
        &self,
        identity: &CustomerIdentity,
    ) -> RepositoryResult<Option<Customer>>;
    /// Member customers with the given name, newest first.
    fn find_members_by_name(&self, name: &str) -> RepositoryResult<Vec<Customer>>;
    /// Member with the given name whose email or phone equals `contact`.
    fn find_member_by_contact(
        &self,
        name: &str,
        contact: &ContactDetail,
    ) -> RepositoryResult<Option<Customer>>;
    fn get_membership(&self, customer_id: i32) -> RepositoryResult<Option<Membership>>;
    fn get_member_by_email(&self, email: &str) -> RepositoryResult<Option<Member>>;
}

/// Customer and membership writes.
pub trait CustomerWriter {
    /// Insert a `regular` customer.
    fn create_customer(&self, new_customer: &NewCustomer) -> RepositoryResult<Customer>;
    /// Insert a `member` customer and its membership record in one transaction.
    fn create_member(
        &self,
        new_customer: &NewCustomer,
        new_membership: &NewMembership,
    ) -> RepositoryResult<Member>;
    /// Attach a membership to an existing customer and mark it as `member`,
    /// in one transaction.
    fn create_membership(
        &self,
        customer_id: i32,
        new_membership: &NewMembership,
    ) -> RepositoryResult<Member>;
}

/// Read-only operations over customer preferences.
pub trait PreferenceReader {
    fn get_preference(
        &self,
        customer_id: i32,
        preference_type: &str,
    ) -> RepositoryResult<Option<Preference>>;
    fn list_preferences(&self, customer_id: i32) -> RepositoryResult<Vec<Preference>>;
}

/// Write operations over customer preferences.
pub trait PreferenceWriter {
    /// Insert the preference or overwrite the value stored for the same
    /// `(customer, type)` pair.
    fn upsert_preference(&self, preference: &NewPreference) -> RepositoryResult<Preference>;
}

/// Read-only operations over orders.
pub trait OrderReader {
    fn get_order_by_id(&self, id: i32) -> RepositoryResult<Option<Order>>;
    fn list_orders(&self, query: OrderListQuery)
    -> RepositoryResult<(usize, Vec<OrderListItem>)>;
}

/// Write operations over orders.
pub trait OrderWriter {
    /// Persist the header and every line, or nothing.
    fn create_order(&self, new_order: &NewOrder) -> RepositoryResult<Order>;
}

/// Read-only sales aggregates.
pub trait ReportReader {
    fn daily_sales(&self, range: SalesDateRange) -> RepositoryResult<Vec<DailySales>>;
    fn product_sales(&self) -> RepositoryResult<Vec<ProductSales>>;
    /// Every customer with order count, total spent and last order,
    /// including customers who never ordered.
    fn customer_sales(&self) -> RepositoryResult<Vec<CustomerSales>>;
    fn customer_summary(&self, customer_id: i32) -> RepositoryResult<Option<CustomerSales>>;
    fn favorite_products(
        &self,
        customer_id: i32,
        limit: i64,
    ) -> RepositoryResult<Vec<FavoriteProduct>>;
}
