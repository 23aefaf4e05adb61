use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::order::{
    NewOrder as DomainNewOrder, NewOrderLine as DomainNewOrderLine, Order as DomainOrder,
    OrderLine as DomainOrderLine, OrderListItem as DomainOrderListItem,
};

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::orders)]
pub struct Order {
    pub id: i32,
    pub customer_id: i32,
    pub ordered_at: NaiveDateTime,
    pub payment_method: String,
    pub total_cents: i64,
}

#[derive(Debug, Clone, Identifiable, Queryable, Selectable, Associations)]
#[diesel(table_name = crate::schema::order_lines)]
#[diesel(belongs_to(Order, foreign_key = order_id))]
pub struct OrderLine {
    pub id: i32,
    pub order_id: i32,
    pub product_id: i32,
    pub quantity: i32,
    pub unit_price_cents: i64,
    pub line_amount_cents: i64,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::orders)]
pub struct NewOrder<'a> {
    pub customer_id: i32,
    pub ordered_at: NaiveDateTime,
    pub payment_method: &'a str,
    pub total_cents: i64,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::order_lines)]
pub struct NewOrderLine {
    pub order_id: i32,
    pub product_id: i32,
    pub quantity: i32,
    pub unit_price_cents: i64,
    pub line_amount_cents: i64,
}

impl Order {
    /// Attach lines loaded together with their product names.
    pub fn into_domain(self, lines: Vec<(OrderLine, String)>) -> DomainOrder {
        DomainOrder {
            id: self.id,
            customer_id: self.customer_id,
            ordered_at: self.ordered_at,
            payment_method: self.payment_method,
            total_cents: self.total_cents,
            lines: lines
                .into_iter()
                .map(|(line, product_name)| line.into_domain(product_name))
                .collect(),
        }
    }

    pub fn into_list_item(self, customer_name: String) -> DomainOrderListItem {
        DomainOrderListItem {
            id: self.id,
            customer_id: self.customer_id,
            customer_name,
            ordered_at: self.ordered_at,
            payment_method: self.payment_method,
            total_cents: self.total_cents,
        }
    }
}

impl OrderLine {
    pub fn into_domain(self, product_name: String) -> DomainOrderLine {
        DomainOrderLine {
            id: self.id,
            product_id: self.product_id,
            product_name,
            quantity: self.quantity,
            unit_price_cents: self.unit_price_cents,
            line_amount_cents: self.line_amount_cents,
        }
    }
}

impl From<(Order, Vec<(OrderLine, String)>)> for DomainOrder {
    fn from(value: (Order, Vec<(OrderLine, String)>)) -> Self {
        value.0.into_domain(value.1)
    }
}

impl<'a> From<&'a DomainNewOrder> for NewOrder<'a> {
    fn from(value: &'a DomainNewOrder) -> Self {
        Self {
            customer_id: value.customer_id,
            ordered_at: value.ordered_at,
            payment_method: value.payment_method.as_str(),
            total_cents: value.total_cents,
        }
    }
}

impl NewOrderLine {
    pub fn from_domain(order_id: i32, value: &DomainNewOrderLine) -> Self {
        Self {
            order_id,
            product_id: value.product_id,
            quantity: value.quantity,
            unit_price_cents: value.unit_price_cents,
            line_amount_cents: value.line_amount_cents,
        }
    }
}
