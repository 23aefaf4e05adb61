//! Read-only sales reports. Amounts are rendered as exact decimals.

use chrono::{NaiveDate, NaiveDateTime};
use pushkind_common::routes::check_role;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::SERVICE_ACCESS_ROLE;
use crate::domain::auth::Operator;
use crate::domain::customer::CustomerType;
use crate::domain::money::{average, cents_to_decimal};
use crate::domain::report::{CustomerSales, DailySales, ProductSales, SalesDateRange};
use crate::repository::ReportReader;
use crate::services::{ServiceError, ServiceResult};

/// Optional inclusive bounds for the daily sales report.
#[derive(Debug, Default, Deserialize)]
pub struct SalesQuery {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct DailySalesView {
    pub date: NaiveDate,
    pub order_count: i64,
    pub total: Decimal,
    pub average_order: Decimal,
}

impl From<DailySales> for DailySalesView {
    fn from(value: DailySales) -> Self {
        Self {
            date: value.date,
            order_count: value.order_count,
            total: cents_to_decimal(value.total_cents),
            average_order: average(value.total_cents, value.order_count),
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ProductSalesView {
    pub product_id: i32,
    pub product_name: String,
    pub category_name: Option<String>,
    pub total_quantity: i64,
    pub revenue: Decimal,
    pub order_count: i64,
}

impl From<ProductSales> for ProductSalesView {
    fn from(value: ProductSales) -> Self {
        Self {
            product_id: value.product_id,
            product_name: value.product_name,
            category_name: value.category_name,
            total_quantity: value.total_quantity,
            revenue: cents_to_decimal(value.revenue_cents),
            order_count: value.order_count,
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct CustomerSalesView {
    pub customer_id: i32,
    pub customer_name: String,
    pub customer_type: CustomerType,
    pub order_count: i64,
    pub total_spent: Decimal,
    pub average_order: Decimal,
    pub last_order_at: Option<NaiveDateTime>,
}

impl From<CustomerSales> for CustomerSalesView {
    fn from(value: CustomerSales) -> Self {
        Self {
            customer_id: value.customer_id,
            customer_name: value.customer_name,
            customer_type: value.customer_type,
            order_count: value.order_count,
            total_spent: cents_to_decimal(value.total_spent_cents),
            average_order: average(value.total_spent_cents, value.order_count),
            last_order_at: value.last_order_at,
        }
    }
}

fn ensure_admin(operator: &Operator) -> ServiceResult<()> {
    if !check_role(SERVICE_ACCESS_ROLE, &operator.roles) {
        return Err(ServiceError::Unauthorized);
    }
    Ok(())
}

/// Sales per day, newest first.
pub fn sales_by_day<R>(
    repo: &R,
    operator: &Operator,
    query: SalesQuery,
) -> ServiceResult<Vec<DailySalesView>>
where
    R: ReportReader + ?Sized,
{
    ensure_admin(operator)?;

    if let (Some(start), Some(end)) = (query.start_date, query.end_date) {
        if start > end {
            return Err(ServiceError::Validation(
                "start_date must not be after end_date".to_string(),
            ));
        }
    }

    let range = SalesDateRange {
        start: query.start_date,
        end: query.end_date,
    };

    let rows = repo.daily_sales(range).map_err(ServiceError::from)?;
    Ok(rows.into_iter().map(Into::into).collect())
}

/// Sales per product, by revenue.
pub fn sales_by_product<R>(repo: &R, operator: &Operator) -> ServiceResult<Vec<ProductSalesView>>
where
    R: ReportReader + ?Sized,
{
    ensure_admin(operator)?;

    let rows = repo.product_sales().map_err(ServiceError::from)?;
    Ok(rows.into_iter().map(Into::into).collect())
}

/// Spend per customer, including customers who never ordered.
pub fn sales_by_customer<R>(
    repo: &R,
    operator: &Operator,
) -> ServiceResult<Vec<CustomerSalesView>>
where
    R: ReportReader + ?Sized,
{
    ensure_admin(operator)?;

    let rows = repo.customer_sales().map_err(ServiceError::from)?;
    Ok(rows.into_iter().map(Into::into).collect())
}
