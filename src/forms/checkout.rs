use pushkind_common::routes::empty_string_as_none;
use serde::Deserialize;
use validator::Validate;

use crate::domain::customer::CustomerIdentity;
use crate::domain::order::OrderItemRequest;
use crate::forms::{FormError, FormResult, optional_text, required_text};
use crate::services::orders::{CheckoutCustomer, CheckoutRequest};

const TEXT_MAX_LEN: u64 = 256;

/// One `(product, quantity)` entry of the checkout payload.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct CheckoutItemForm {
    pub product_id: i32,
    /// Kept wide so out-of-range quantities reach the order engine's check.
    pub quantity: i64,
}

/// Payload of `POST /api/orders`.
///
/// Either `customer_id` or `customer_name` identifies the customer. Contact
/// fields are only used together with the name.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct CheckoutForm {
    #[validate(range(min = 1))]
    #[serde(default)]
    pub customer_id: Option<i32>,
    #[validate(length(max = TEXT_MAX_LEN))]
    #[serde(default)]
    pub customer_name: Option<String>,
    /// Blank input from an empty form field counts as missing.
    #[validate(email)]
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub customer_email: Option<String>,
    #[validate(length(max = TEXT_MAX_LEN))]
    #[serde(default)]
    pub customer_phone: Option<String>,
    #[validate(length(max = TEXT_MAX_LEN))]
    #[serde(default)]
    pub customer_address: Option<String>,
    /// Confirms a plain customer should be created although members share the name.
    #[serde(default)]
    pub force_regular: bool,
    #[validate(length(max = TEXT_MAX_LEN))]
    #[serde(default)]
    pub payment_method: Option<String>,
    #[serde(default)]
    pub items: Vec<CheckoutItemForm>,
}

impl CheckoutForm {
    pub fn into_checkout_request(self) -> FormResult<CheckoutRequest> {
        self.validate()?;

        let customer = match self.customer_id {
            Some(customer_id) => CheckoutCustomer::Existing(customer_id),
            None => {
                let name = required_text(
                    self.customer_name.as_deref().unwrap_or_default(),
                    "customer_name",
                )?;

                let mut identity = CustomerIdentity::new(name);
                if let Some(email) = optional_text(self.customer_email.as_deref()) {
                    identity = identity.with_email(email);
                }
                if let Some(phone) = optional_text(self.customer_phone.as_deref()) {
                    identity = identity.with_phone(phone);
                }
                if let Some(address) = optional_text(self.customer_address.as_deref()) {
                    identity = identity.with_address(address);
                }
                if self.force_regular {
                    identity = identity.force_regular();
                }
                CheckoutCustomer::Identify(identity)
            }
        };

        let items = self
            .items
            .iter()
            .map(|item| OrderItemRequest::new(item.product_id, item.quantity))
            .collect();

        Ok(CheckoutRequest {
            customer,
            payment_method: optional_text(self.payment_method.as_deref()),
            items,
        })
    }
}
