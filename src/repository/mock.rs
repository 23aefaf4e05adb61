use mockall::mock;

use super::{
    CategoryReader, CategoryWriter, CustomerReader, CustomerWriter, OrderReader, OrderWriter,
    PreferenceReader, PreferenceWriter, ProductReader, ProductWriter, ReportReader,
};
use crate::domain::{
    category::{Category, NewCategory},
    customer::{ContactDetail, Customer, CustomerIdentity, NewCustomer},
    membership::{Member, Membership, NewMembership},
    order::{NewOrder, Order, OrderListItem, OrderListQuery},
    preference::{NewPreference, Preference},
    product::{NewProduct, Product, ProductListQuery, UpdateProduct},
    report::{CustomerSales, DailySales, FavoriteProduct, ProductSales, SalesDateRange},
};
use crate::repository::RepositoryResult;

mock! {
    pub Repository {}

    impl CategoryReader for Repository {
        fn get_category_by_id(&self, id: i32) -> RepositoryResult<Option<Category>>;
        fn list_categories(&self) -> RepositoryResult<Vec<Category>>;
    }

    impl CategoryWriter for Repository {
        fn create_category(&self, new_category: &NewCategory) -> RepositoryResult<Category>;
    }

    impl ProductReader for Repository {
        fn get_product_by_id(&self, id: i32) -> RepositoryResult<Option<Product>>;
        fn list_products(&self, query: ProductListQuery) -> RepositoryResult<Vec<Product>>;
    }

    impl ProductWriter for Repository {
        fn create_product(&self, new_product: &NewProduct) -> RepositoryResult<Product>;
        fn update_product(&self, product_id: i32, updates: &UpdateProduct) -> RepositoryResult<Product>;
    }

    impl CustomerReader for Repository {
        fn get_customer_by_id(&self, id: i32) -> RepositoryResult<Option<Customer>>;
        fn find_matching_customer(&self, identity: &CustomerIdentity) -> RepositoryResult<Option<Customer>>;
        fn find_members_by_name(&self, name: &str) -> RepositoryResult<Vec<Customer>>;
        fn find_member_by_contact(&self, name: &str, contact: &ContactDetail) -> RepositoryResult<Option<Customer>>;
        fn get_membership(&self, customer_id: i32) -> RepositoryResult<Option<Membership>>;
        fn get_member_by_email(&self, email: &str) -> RepositoryResult<Option<Member>>;
    }

    impl CustomerWriter for Repository {
        fn create_customer(&self, new_customer: &NewCustomer) -> RepositoryResult<Customer>;
        fn create_member(&self, new_customer: &NewCustomer, new_membership: &NewMembership) -> RepositoryResult<Member>;
        fn create_membership(&self, customer_id: i32, new_membership: &NewMembership) -> RepositoryResult<Member>;
    }

    impl PreferenceReader for Repository {
        fn get_preference(&self, customer_id: i32, preference_type: &str) -> RepositoryResult<Option<Preference>>;
        fn list_preferences(&self, customer_id: i32) -> RepositoryResult<Vec<Preference>>;
    }

    impl PreferenceWriter for Repository {
        fn upsert_preference(&self, preference: &NewPreference) -> RepositoryResult<Preference>;
    }

    impl OrderReader for Repository {
        fn get_order_by_id(&self, id: i32) -> RepositoryResult<Option<Order>>;
        fn list_orders(&self, query: OrderListQuery) -> RepositoryResult<(usize, Vec<OrderListItem>)>;
    }

    impl OrderWriter for Repository {
        fn create_order(&self, new_order: &NewOrder) -> RepositoryResult<Order>;
    }

    impl ReportReader for Repository {
        fn daily_sales(&self, range: SalesDateRange) -> RepositoryResult<Vec<DailySales>>;
        fn product_sales(&self) -> RepositoryResult<Vec<ProductSales>>;
        fn customer_sales(&self) -> RepositoryResult<Vec<CustomerSales>>;
        fn customer_summary(&self, customer_id: i32) -> RepositoryResult<Option<CustomerSales>>;
        fn favorite_products(&self, customer_id: i32, limit: i64) -> RepositoryResult<Vec<FavoriteProduct>>;
    }
}
