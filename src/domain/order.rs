use chrono::NaiveDateTime;
use pushkind_common::pagination::Pagination;
use serde::{Deserialize, Serialize};

/// Domain representation of a persisted order with its lines.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Order {
    /// Unique identifier of the order.
    pub id: i32,
    /// Customer the order belongs to.
    pub customer_id: i32,
    /// Timestamp for when the order was placed.
    pub ordered_at: NaiveDateTime,
    /// Free-form payment label such as `cash` or `card`.
    pub payment_method: String,
    /// Order total in cents; equals the sum of the line amounts.
    pub total_cents: i64,
    /// Lines in insertion order.
    pub lines: Vec<OrderLine>,
}

impl Order {
    pub fn lines_total_cents(&self) -> i64 {
        self.lines.iter().map(|line| line.line_amount_cents).sum()
    }
}

/// A single product line captured when the order was placed.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct OrderLine {
    pub id: i32,
    pub product_id: i32,
    pub product_name: String,
    pub quantity: i32,
    /// Price snapshot taken at order time.
    pub unit_price_cents: i64,
    pub line_amount_cents: i64,
}

/// Line payload with its amount computed from the price snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewOrderLine {
    pub product_id: i32,
    pub quantity: i32,
    pub unit_price_cents: i64,
    pub line_amount_cents: i64,
}

impl NewOrderLine {
    /// Returns `None` when the line amount overflows.
    pub fn new(product_id: i32, quantity: i32, unit_price_cents: i64) -> Option<Self> {
        let line_amount_cents = unit_price_cents.checked_mul(i64::from(quantity))?;
        Some(Self {
            product_id,
            quantity,
            unit_price_cents,
            line_amount_cents,
        })
    }
}

/// Payload persisted atomically as one order header plus its lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewOrder {
    pub customer_id: i32,
    pub payment_method: String,
    pub total_cents: i64,
    pub ordered_at: NaiveDateTime,
    pub lines: Vec<NewOrderLine>,
}

impl NewOrder {
    /// Build an order whose total is the sum of `lines`.
    ///
    /// Returns `None` when the total overflows.
    pub fn new(
        customer_id: i32,
        payment_method: impl Into<String>,
        lines: Vec<NewOrderLine>,
    ) -> Option<Self> {
        let total_cents = lines
            .iter()
            .try_fold(0i64, |total, line| total.checked_add(line.line_amount_cents))?;
        Some(Self {
            customer_id,
            payment_method: payment_method.into(),
            total_cents,
            ordered_at: chrono::Local::now().naive_utc(),
            lines,
        })
    }
}

/// One requested `(product, quantity)` pair as submitted at checkout.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct OrderItemRequest {
    pub product_id: i32,
    pub quantity: i64,
}

impl OrderItemRequest {
    pub fn new(product_id: i32, quantity: i64) -> Self {
        Self {
            product_id,
            quantity,
        }
    }
}

/// Order header joined with the customer's name, as shown in the history list.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct OrderListItem {
    pub id: i32,
    pub customer_id: i32,
    pub customer_name: String,
    pub ordered_at: NaiveDateTime,
    pub payment_method: String,
    pub total_cents: i64,
}

/// Query definition used to list orders.
#[derive(Debug, Clone, Default)]
pub struct OrderListQuery {
    /// Optional customer identifier filter.
    pub customer_id: Option<i32>,
    /// Optional pagination options applied to the query.
    pub pagination: Option<Pagination>,
}

impl OrderListQuery {
    pub fn new() -> Self {
        Self::default()
    }

    /// Filter the results by customer identifier.
    pub fn customer_id(mut self, customer_id: i32) -> Self {
        self.customer_id = Some(customer_id);
        self
    }

    /// Apply pagination to the query with the given page number and page size.
    pub fn paginate(mut self, page: usize, per_page: usize) -> Self {
        self.pagination = Some(Pagination { page, per_page });
        self
    }
}
