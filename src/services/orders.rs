//! Order placement and order history.

use chrono::NaiveDateTime;
use pushkind_common::pagination::{DEFAULT_ITEMS_PER_PAGE, Paginated};
use pushkind_common::routes::check_role;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::auth::Operator;
use crate::domain::customer::{Customer, CustomerIdentity};
use crate::domain::money::cents_to_decimal;
use crate::domain::order::{
    NewOrder, NewOrderLine, Order, OrderItemRequest, OrderListItem, OrderListQuery,
};
use crate::repository::{
    CustomerReader, CustomerWriter, OrderReader, OrderWriter, PreferenceReader, ProductReader,
    RepositoryError,
};
use crate::services::identity::{Resolution, resolve_customer};
use crate::services::{ServiceError, ServiceResult};
use crate::{DEFAULT_PAY_PREFERENCE, DEFAULT_PAYMENT_METHOD, SERVICE_ACCESS_ROLE};

/// How the ordering customer is identified at checkout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckoutCustomer {
    /// A customer id the caller already knows, e.g. a logged-in member.
    Existing(i32),
    /// Identity fields resolved through [`resolve_customer`].
    Identify(CustomerIdentity),
}

/// Everything needed to resolve a customer and place an order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutRequest {
    pub customer: CheckoutCustomer,
    pub payment_method: Option<String>,
    pub items: Vec<OrderItemRequest>,
}

/// Which branch produced the ordering customer.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum CustomerSource {
    Existing,
    Matched,
    Created,
}

/// Result of a successful checkout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutReceipt {
    pub order: Order,
    pub customer: Customer,
    pub customer_source: CustomerSource,
}

/// Pick the payment method for an order: the explicit value, else the
/// customer's `default_pay` preference, else `cash`.
pub fn resolve_payment_method<R>(
    repo: &R,
    customer_id: i32,
    explicit: Option<&str>,
) -> ServiceResult<String>
where
    R: PreferenceReader + ?Sized,
{
    if let Some(method) = explicit.map(str::trim).filter(|value| !value.is_empty()) {
        return Ok(method.to_string());
    }

    let preference = repo
        .get_preference(customer_id, DEFAULT_PAY_PREFERENCE)
        .map_err(ServiceError::from)?;

    Ok(preference
        .map(|preference| preference.preference_value.trim().to_string())
        .filter(|value| !value.is_empty())
        .unwrap_or_else(|| DEFAULT_PAYMENT_METHOD.to_string()))
}

/// Price `items` against the current catalog and persist them as one order
/// for `customer_id`.
///
/// Lines are recorded exactly as submitted; repeated product ids are not
/// merged.
pub fn place_order<R>(
    repo: &R,
    customer_id: i32,
    payment_method: Option<&str>,
    items: &[OrderItemRequest],
) -> ServiceResult<Order>
where
    R: CustomerReader + ProductReader + PreferenceReader + OrderWriter + ?Sized,
{
    let lines = price_lines(repo, items)?;

    let customer = repo
        .get_customer_by_id(customer_id)
        .map_err(ServiceError::from)?;
    if customer.is_none() {
        return Err(ServiceError::CustomerNotFound(customer_id));
    }

    persist_order(repo, customer_id, payment_method, lines)
}

/// Resolve the ordering customer and place the order.
///
/// Items are validated and priced before the customer is resolved, so a
/// rejected order never leaves a freshly created customer behind.
pub fn checkout<R>(repo: &R, request: CheckoutRequest) -> ServiceResult<CheckoutReceipt>
where
    R: CustomerReader
        + CustomerWriter
        + ProductReader
        + PreferenceReader
        + OrderWriter
        + ?Sized,
{
    let CheckoutRequest {
        customer,
        payment_method,
        items,
    } = request;

    let lines = price_lines(repo, &items)?;

    let (customer, customer_source) = match customer {
        CheckoutCustomer::Existing(customer_id) => {
            let customer = repo
                .get_customer_by_id(customer_id)
                .map_err(ServiceError::from)?
                .ok_or(ServiceError::CustomerNotFound(customer_id))?;
            (customer, CustomerSource::Existing)
        }
        CheckoutCustomer::Identify(identity) => match resolve_customer(repo, &identity)? {
            Resolution::Matched(customer) => (customer, CustomerSource::Matched),
            Resolution::Created(customer) => (customer, CustomerSource::Created),
            Resolution::Ambiguous { candidates } => {
                return Err(ServiceError::AmbiguousIdentity {
                    name: identity.name,
                    candidates,
                });
            }
        },
    };

    let order = persist_order(repo, customer.id, payment_method.as_deref(), lines)?;

    Ok(CheckoutReceipt {
        order,
        customer,
        customer_source,
    })
}

/// Check quantities, then snapshot the current price of every requested
/// product. Nothing is written.
fn price_lines<R>(repo: &R, items: &[OrderItemRequest]) -> ServiceResult<Vec<NewOrderLine>>
where
    R: ProductReader + ?Sized,
{
    if items.is_empty() {
        return Err(ServiceError::EmptyOrder);
    }

    let quantities = items
        .iter()
        .map(validate_quantity)
        .collect::<ServiceResult<Vec<i32>>>()?;

    let mut lines = Vec::with_capacity(items.len());
    for (item, quantity) in items.iter().zip(quantities) {
        let product = repo
            .get_product_by_id(item.product_id)
            .map_err(ServiceError::from)?
            .filter(|product| product.is_active)
            .ok_or(ServiceError::ProductNotFound(item.product_id))?;

        let line = NewOrderLine::new(product.id, quantity, product.price_cents).ok_or_else(|| {
            ServiceError::Validation(format!(
                "line amount for product {} is out of range",
                product.id
            ))
        })?;
        lines.push(line);
    }

    Ok(lines)
}

fn validate_quantity(item: &OrderItemRequest) -> ServiceResult<i32> {
    i32::try_from(item.quantity)
        .ok()
        .filter(|quantity| *quantity > 0)
        .ok_or(ServiceError::InvalidQuantity {
            product_id: item.product_id,
            quantity: item.quantity,
        })
}

fn persist_order<R>(
    repo: &R,
    customer_id: i32,
    payment_method: Option<&str>,
    lines: Vec<NewOrderLine>,
) -> ServiceResult<Order>
where
    R: PreferenceReader + OrderWriter + ?Sized,
{
    let payment_method = resolve_payment_method(repo, customer_id, payment_method)?;

    let new_order = NewOrder::new(customer_id, payment_method, lines)
        .ok_or_else(|| ServiceError::Validation("order total is out of range".to_string()))?;

    let order = repo.create_order(&new_order).map_err(|err| match err {
        RepositoryError::ProductUnavailable(product_id) => {
            ServiceError::ProductNotFound(product_id)
        }
        RepositoryError::PriceChanged { product_id, .. } => {
            log::info!("Price of product {product_id} changed while placing an order");
            ServiceError::Conflict(format!(
                "price of product {product_id} changed; resubmit the order"
            ))
        }
        other => {
            log::error!("Failed to persist order for customer {customer_id}: {other}");
            ServiceError::from(other)
        }
    })?;

    log::info!(
        "Placed order {} for customer {} ({} line(s), {} cents, {})",
        order.id,
        order.customer_id,
        order.lines.len(),
        order.total_cents,
        order.payment_method
    );

    Ok(order)
}

/// Query parameters accepted by the order history listing.
#[derive(Debug, Default, Deserialize)]
pub struct OrdersQuery {
    pub customer_id: Option<i32>,
    /// Page requested by the UI (1-based).
    pub page: Option<usize>,
}

/// Row of the order history listing.
#[derive(Debug, Serialize)]
pub struct OrderListItemView {
    pub id: i32,
    pub customer_id: i32,
    pub customer_name: String,
    pub ordered_at: NaiveDateTime,
    pub payment_method: String,
    pub total: Decimal,
}

impl From<OrderListItem> for OrderListItemView {
    fn from(value: OrderListItem) -> Self {
        Self {
            id: value.id,
            customer_id: value.customer_id,
            customer_name: value.customer_name,
            ordered_at: value.ordered_at,
            payment_method: value.payment_method,
            total: cents_to_decimal(value.total_cents),
        }
    }
}

/// Paginated order history, newest first.
pub fn list_orders<R>(
    repo: &R,
    operator: &Operator,
    query: OrdersQuery,
) -> ServiceResult<Paginated<OrderListItemView>>
where
    R: OrderReader + ?Sized,
{
    if !check_role(SERVICE_ACCESS_ROLE, &operator.roles) {
        return Err(ServiceError::Unauthorized);
    }

    let page = query.page.unwrap_or(1).max(1);
    let mut list_query = OrderListQuery::new().paginate(page, DEFAULT_ITEMS_PER_PAGE);

    if let Some(customer_id) = query.customer_id {
        list_query = list_query.customer_id(customer_id);
    }

    let (total, orders) = repo.list_orders(list_query).map_err(ServiceError::from)?;
    let view_items: Vec<OrderListItemView> = orders.into_iter().map(Into::into).collect();

    let total_pages = total.div_ceil(DEFAULT_ITEMS_PER_PAGE);
    Ok(Paginated::new(view_items, page, total_pages))
}

/// Load one order with its lines.
pub fn load_order<R>(repo: &R, operator: &Operator, order_id: i32) -> ServiceResult<Order>
where
    R: OrderReader + ?Sized,
{
    if !check_role(SERVICE_ACCESS_ROLE, &operator.roles) {
        return Err(ServiceError::Unauthorized);
    }

    repo.get_order_by_id(order_id)
        .map_err(ServiceError::from)?
        .ok_or(ServiceError::OrderNotFound(order_id))
}
