use pushkind_common::routes::empty_string_as_none;
use serde::Deserialize;
use validator::Validate;

use crate::domain::customer::NewCustomer;
use crate::forms::{FormResult, optional_text, required_text};

const TEXT_MAX_LEN: u64 = 256;

/// Payload of `POST /api/customers`.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct AddCustomerForm {
    #[validate(length(min = 1, max = TEXT_MAX_LEN))]
    pub name: String,
    #[validate(email)]
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub email: Option<String>,
    #[validate(length(max = TEXT_MAX_LEN))]
    #[serde(default)]
    pub phone: Option<String>,
    #[validate(length(max = TEXT_MAX_LEN))]
    #[serde(default)]
    pub address: Option<String>,
}

impl AddCustomerForm {
    pub fn into_new_customer(self) -> FormResult<NewCustomer> {
        self.validate()?;

        let mut new_customer = NewCustomer::new(required_text(&self.name, "name")?);
        if let Some(email) = optional_text(self.email.as_deref()) {
            new_customer = new_customer.with_email(email);
        }
        if let Some(phone) = optional_text(self.phone.as_deref()) {
            new_customer = new_customer.with_phone(phone);
        }
        if let Some(address) = optional_text(self.address.as_deref()) {
            new_customer = new_customer.with_address(address);
        }

        Ok(new_customer)
    }
}

/// Payload of `POST /api/customers/verify`.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct VerifyCustomerForm {
    #[validate(length(max = TEXT_MAX_LEN))]
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
}

/// Sanitized verification input.
#[derive(Debug, PartialEq, Eq)]
pub struct VerifyCustomerInput {
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
}

impl VerifyCustomerForm {
    pub fn into_input(self) -> FormResult<VerifyCustomerInput> {
        self.validate()?;

        Ok(VerifyCustomerInput {
            name: required_text(&self.name, "name")?,
            email: optional_text(self.email.as_deref()),
            phone: optional_text(self.phone.as_deref()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::forms::FormError;

    #[test]
    fn customer_form_normalizes_contact_details() {
        let form = AddCustomerForm {
            name: "Bob".to_string(),
            email: Some("Bob@Example.com".to_string()),
            phone: Some(" ".to_string()),
            address: None,
        };

        match form.into_new_customer() {
            Ok(customer) => {
                assert_eq!(customer.email.as_deref(), Some("bob@example.com"));
                assert!(customer.phone.is_none());
            }
            Err(err) => panic!("form should convert: {err}"),
        }
    }

    #[test]
    fn blank_customer_email_is_missing() {
        let form: AddCustomerForm =
            match serde_json::from_str(r#"{"name": "Bob", "email": "", "phone": "555-1"}"#) {
                Ok(form) => form,
                Err(err) => panic!("payload should deserialize: {err}"),
            };

        match form.into_new_customer() {
            Ok(customer) => {
                assert!(customer.email.is_none());
                assert_eq!(customer.phone.as_deref(), Some("555-1"));
            }
            Err(err) => panic!("form should convert: {err}"),
        }
    }

    #[test]
    fn verify_form_requires_a_name() {
        let form = VerifyCustomerForm {
            name: "  ".to_string(),
            ..VerifyCustomerForm::default()
        };

        assert!(matches!(form.into_input(), Err(FormError::EmptyField("name"))));
    }
}
