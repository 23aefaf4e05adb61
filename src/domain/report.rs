use chrono::{NaiveDate, NaiveDateTime};
use serde::Serialize;

use crate::domain::customer::CustomerType;

/// Inclusive date range applied to the daily sales report.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SalesDateRange {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct DailySales {
    pub date: NaiveDate,
    pub order_count: i64,
    pub total_cents: i64,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ProductSales {
    pub product_id: i32,
    pub product_name: String,
    pub category_name: Option<String>,
    pub total_quantity: i64,
    pub revenue_cents: i64,
    /// Number of distinct orders containing the product.
    pub order_count: i64,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct CustomerSales {
    pub customer_id: i32,
    pub customer_name: String,
    pub customer_type: CustomerType,
    pub order_count: i64,
    pub total_spent_cents: i64,
    pub last_order_at: Option<NaiveDateTime>,
}

/// A product the customer orders most, by quantity.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct FavoriteProduct {
    pub product_id: i32,
    pub name: String,
    pub price_cents: i64,
    pub total_quantity: i64,
    pub order_count: i64,
}
