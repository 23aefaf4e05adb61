//! Row types for the aggregate queries, which are written as raw SQL.

use chrono::{NaiveDate, NaiveDateTime};
use diesel::QueryableByName;
use diesel::sql_types::{BigInt, Date, Integer, Nullable, Text, Timestamp};

use crate::domain::report::{CustomerSales, DailySales, FavoriteProduct, ProductSales};

#[derive(Debug, QueryableByName)]
pub struct DailySalesRow {
    #[diesel(sql_type = Date)]
    pub order_date: NaiveDate,
    #[diesel(sql_type = BigInt)]
    pub order_count: i64,
    #[diesel(sql_type = BigInt)]
    pub total_cents: i64,
}

#[derive(Debug, QueryableByName)]
pub struct ProductSalesRow {
    #[diesel(sql_type = Integer)]
    pub product_id: i32,
    #[diesel(sql_type = Text)]
    pub product_name: String,
    #[diesel(sql_type = Nullable<Text>)]
    pub category_name: Option<String>,
    #[diesel(sql_type = BigInt)]
    pub total_quantity: i64,
    #[diesel(sql_type = BigInt)]
    pub revenue_cents: i64,
    #[diesel(sql_type = BigInt)]
    pub order_count: i64,
}

#[derive(Debug, QueryableByName)]
pub struct CustomerSalesRow {
    #[diesel(sql_type = Integer)]
    pub customer_id: i32,
    #[diesel(sql_type = Text)]
    pub customer_name: String,
    #[diesel(sql_type = Text)]
    pub customer_type: String,
    #[diesel(sql_type = BigInt)]
    pub order_count: i64,
    #[diesel(sql_type = BigInt)]
    pub total_spent_cents: i64,
    #[diesel(sql_type = Nullable<Timestamp>)]
    pub last_order_at: Option<NaiveDateTime>,
}

#[derive(Debug, QueryableByName)]
pub struct FavoriteProductRow {
    #[diesel(sql_type = Integer)]
    pub product_id: i32,
    #[diesel(sql_type = Text)]
    pub name: String,
    #[diesel(sql_type = BigInt)]
    pub price_cents: i64,
    #[diesel(sql_type = BigInt)]
    pub total_quantity: i64,
    #[diesel(sql_type = BigInt)]
    pub order_count: i64,
}

impl From<DailySalesRow> for DailySales {
    fn from(value: DailySalesRow) -> Self {
        Self {
            date: value.order_date,
            order_count: value.order_count,
            total_cents: value.total_cents,
        }
    }
}

impl From<ProductSalesRow> for ProductSales {
    fn from(value: ProductSalesRow) -> Self {
        Self {
            product_id: value.product_id,
            product_name: value.product_name,
            category_name: value.category_name,
            total_quantity: value.total_quantity,
            revenue_cents: value.revenue_cents,
            order_count: value.order_count,
        }
    }
}

impl From<CustomerSalesRow> for CustomerSales {
    fn from(value: CustomerSalesRow) -> Self {
        Self {
            customer_id: value.customer_id,
            customer_name: value.customer_name,
            customer_type: value.customer_type.as_str().into(),
            order_count: value.order_count,
            total_spent_cents: value.total_spent_cents,
            last_order_at: value.last_order_at,
        }
    }
}

impl From<FavoriteProductRow> for FavoriteProduct {
    fn from(value: FavoriteProductRow) -> Self {
        Self {
            product_id: value.product_id,
            name: value.name,
            price_cents: value.price_cents,
            total_quantity: value.total_quantity,
            order_count: value.order_count,
        }
    }
}
