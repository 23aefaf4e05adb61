use actix_web::{Responder, get, post, web};
use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::domain::auth::Operator;
use crate::domain::customer::Customer;
use crate::domain::money::cents_to_decimal;
use crate::domain::order::{Order, OrderLine};
use crate::forms::checkout::CheckoutForm;
use crate::repository::DieselRepository;
use crate::routes::{blocking, created, error_response, ok};
use crate::services::orders::{self, CheckoutReceipt, CustomerSource, OrdersQuery};

#[derive(Debug, Serialize)]
pub struct OrderLineView {
    pub id: i32,
    pub product_id: i32,
    pub product_name: String,
    pub quantity: i32,
    pub unit_price: Decimal,
    pub line_amount: Decimal,
}

impl From<OrderLine> for OrderLineView {
    fn from(value: OrderLine) -> Self {
        Self {
            id: value.id,
            product_id: value.product_id,
            product_name: value.product_name,
            quantity: value.quantity,
            unit_price: cents_to_decimal(value.unit_price_cents),
            line_amount: cents_to_decimal(value.line_amount_cents),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct OrderView {
    pub id: i32,
    pub customer_id: i32,
    pub ordered_at: NaiveDateTime,
    pub payment_method: String,
    pub total: Decimal,
    pub lines: Vec<OrderLineView>,
}

impl From<Order> for OrderView {
    fn from(value: Order) -> Self {
        Self {
            id: value.id,
            customer_id: value.customer_id,
            ordered_at: value.ordered_at,
            payment_method: value.payment_method,
            total: cents_to_decimal(value.total_cents),
            lines: value.lines.into_iter().map(Into::into).collect(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CheckoutView {
    pub order_id: i32,
    pub customer: Customer,
    pub customer_source: CustomerSource,
    pub order: OrderView,
}

impl From<CheckoutReceipt> for CheckoutView {
    fn from(value: CheckoutReceipt) -> Self {
        Self {
            order_id: value.order.id,
            customer: value.customer,
            customer_source: value.customer_source,
            order: value.order.into(),
        }
    }
}

#[post("/api/orders")]
pub async fn checkout(
    repo: web::Data<DieselRepository>,
    form: web::Json<CheckoutForm>,
) -> impl Responder {
    let result = blocking(move || {
        let request = form.into_inner().into_checkout_request()?;
        orders::checkout(repo.get_ref(), request)
    })
    .await;

    match result {
        Ok(receipt) => created(CheckoutView::from(receipt)),
        Err(err) => error_response(&err, "place order"),
    }
}

#[get("/api/orders")]
pub async fn list_orders(
    params: web::Query<OrdersQuery>,
    operator: Operator,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let result =
        blocking(move || orders::list_orders(repo.get_ref(), &operator, params.into_inner()))
            .await;

    match result {
        Ok(page) => ok(page),
        Err(err) => error_response(&err, "list orders"),
    }
}

#[get("/api/orders/{order_id}")]
pub async fn show_order(
    path: web::Path<i32>,
    operator: Operator,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let order_id = path.into_inner();
    match blocking(move || orders::load_order(repo.get_ref(), &operator, order_id)).await {
        Ok(order) => ok(OrderView::from(order)),
        Err(err) => error_response(&err, "load order"),
    }
}
