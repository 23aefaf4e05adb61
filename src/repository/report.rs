use diesel::prelude::*;
use diesel::sql_query;
use diesel::sql_types::{BigInt, Integer, Nullable, Text};

use crate::{
    domain::report::{CustomerSales, DailySales, FavoriteProduct, ProductSales, SalesDateRange},
    models::report::{CustomerSalesRow, DailySalesRow, FavoriteProductRow, ProductSalesRow},
    repository::{DieselRepository, ReportReader, RepositoryResult},
};

const DAILY_SALES_SQL: &str = "
    SELECT DATE(o.ordered_at) AS order_date,
           COUNT(o.id) AS order_count,
           COALESCE(SUM(o.total_cents), 0) AS total_cents
    FROM orders o
    WHERE (? IS NULL OR DATE(o.ordered_at) >= ?)
      AND (? IS NULL OR DATE(o.ordered_at) <= ?)
    GROUP BY DATE(o.ordered_at)
    ORDER BY order_date DESC";

const PRODUCT_SALES_SQL: &str = "
    SELECT p.id AS product_id,
           p.name AS product_name,
           c.name AS category_name,
           COALESCE(SUM(ol.quantity), 0) AS total_quantity,
           COALESCE(SUM(ol.line_amount_cents), 0) AS revenue_cents,
           COUNT(DISTINCT ol.order_id) AS order_count
    FROM order_lines ol
    JOIN products p ON ol.product_id = p.id
    LEFT JOIN categories c ON p.category_id = c.id
    GROUP BY p.id, p.name, c.name
    ORDER BY revenue_cents DESC, p.name ASC";

const CUSTOMER_SALES_SQL: &str = "
    SELECT c.id AS customer_id,
           c.name AS customer_name,
           c.customer_type AS customer_type,
           COUNT(o.id) AS order_count,
           COALESCE(SUM(o.total_cents), 0) AS total_spent_cents,
           MAX(o.ordered_at) AS last_order_at
    FROM customers c
    LEFT JOIN orders o ON o.customer_id = c.id
    WHERE (? IS NULL OR c.id = ?)
    GROUP BY c.id, c.name, c.customer_type
    ORDER BY total_spent_cents DESC, c.id ASC";

const FAVORITE_PRODUCTS_SQL: &str = "
    SELECT p.id AS product_id,
           p.name AS name,
           p.price_cents AS price_cents,
           SUM(ol.quantity) AS total_quantity,
           COUNT(ol.order_id) AS order_count
    FROM order_lines ol
    JOIN products p ON ol.product_id = p.id
    JOIN orders o ON ol.order_id = o.id
    WHERE o.customer_id = ?
    GROUP BY p.id, p.name, p.price_cents
    ORDER BY total_quantity DESC, order_count DESC, p.id ASC
    LIMIT ?";

impl ReportReader for DieselRepository {
    fn daily_sales(&self, range: SalesDateRange) -> RepositoryResult<Vec<DailySales>> {
        let mut conn = self.conn()?;

        let start = range.start.map(|date| date.format("%Y-%m-%d").to_string());
        let end = range.end.map(|date| date.format("%Y-%m-%d").to_string());

        let rows = sql_query(DAILY_SALES_SQL)
            .bind::<Nullable<Text>, _>(start.clone())
            .bind::<Nullable<Text>, _>(start)
            .bind::<Nullable<Text>, _>(end.clone())
            .bind::<Nullable<Text>, _>(end)
            .load::<DailySalesRow>(&mut conn)?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    fn product_sales(&self) -> RepositoryResult<Vec<ProductSales>> {
        let mut conn = self.conn()?;
        let rows = sql_query(PRODUCT_SALES_SQL).load::<ProductSalesRow>(&mut conn)?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    fn customer_sales(&self) -> RepositoryResult<Vec<CustomerSales>> {
        let mut conn = self.conn()?;
        let rows = sql_query(CUSTOMER_SALES_SQL)
            .bind::<Nullable<Integer>, _>(None::<i32>)
            .bind::<Nullable<Integer>, _>(None::<i32>)
            .load::<CustomerSalesRow>(&mut conn)?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    fn customer_summary(&self, customer_id: i32) -> RepositoryResult<Option<CustomerSales>> {
        let mut conn = self.conn()?;
        let row = sql_query(CUSTOMER_SALES_SQL)
            .bind::<Nullable<Integer>, _>(Some(customer_id))
            .bind::<Nullable<Integer>, _>(Some(customer_id))
            .get_result::<CustomerSalesRow>(&mut conn)
            .optional()?;

        Ok(row.map(Into::into))
    }

    fn favorite_products(
        &self,
        customer_id: i32,
        limit: i64,
    ) -> RepositoryResult<Vec<FavoriteProduct>> {
        let mut conn = self.conn()?;
        let rows = sql_query(FAVORITE_PRODUCTS_SQL)
            .bind::<Integer, _>(customer_id)
            .bind::<BigInt, _>(limit)
            .load::<FavoriteProductRow>(&mut conn)?;

        Ok(rows.into_iter().map(Into::into).collect())
    }
}
