use rust_decimal::Decimal;
use serde::Deserialize;
use validator::Validate;

use crate::domain::category::NewCategory;
use crate::domain::product::{NewProduct, UpdateProduct};
use crate::forms::{FormError, FormResult, optional_text, price_to_cents, required_text};

const NAME_MAX_LEN: u64 = 128;
const DESCRIPTION_MAX_LEN: u64 = 2048;

/// Payload of `POST /api/categories`.
#[derive(Debug, Deserialize, Validate)]
pub struct AddCategoryForm {
    #[validate(length(min = 1, max = NAME_MAX_LEN))]
    pub name: String,
    #[validate(length(max = DESCRIPTION_MAX_LEN))]
    #[serde(default)]
    pub description: Option<String>,
}

impl AddCategoryForm {
    pub fn into_new_category(self) -> FormResult<NewCategory> {
        self.validate()?;

        let mut new_category = NewCategory::new(required_text(&self.name, "name")?);
        if let Some(description) = optional_text(self.description.as_deref()) {
            new_category = new_category.with_description(description);
        }

        Ok(new_category)
    }
}

/// Payload of `POST /api/products`.
#[derive(Debug, Deserialize, Validate)]
pub struct AddProductForm {
    #[validate(length(min = 1, max = NAME_MAX_LEN))]
    pub name: String,
    /// Unit price with at most two decimal places.
    pub price: Decimal,
    #[validate(range(min = 1))]
    #[serde(default)]
    pub category_id: Option<i32>,
    #[serde(default)]
    pub is_active: Option<bool>,
}

impl AddProductForm {
    pub fn into_new_product(self) -> FormResult<NewProduct> {
        self.validate()?;

        let name = required_text(&self.name, "name")?;
        let price_cents = price_to_cents(self.price, "price")?;

        let mut new_product = NewProduct::new(name, price_cents);
        if let Some(category_id) = self.category_id {
            new_product = new_product.with_category_id(category_id);
        }
        if self.is_active == Some(false) {
            new_product = new_product.inactive();
        }

        Ok(new_product)
    }
}

/// Payload of `PATCH /api/products/{id}`; absent fields stay unchanged.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdateProductForm {
    #[validate(length(min = 1, max = NAME_MAX_LEN))]
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub price: Option<Decimal>,
    #[serde(default)]
    pub is_active: Option<bool>,
}

impl UpdateProductForm {
    pub fn into_update_product(self) -> FormResult<UpdateProduct> {
        self.validate()?;

        let mut update = UpdateProduct::new();
        if let Some(name) = self.name.as_deref() {
            update = update.name(required_text(name, "name")?);
        }
        if let Some(price) = self.price {
            update = update.price_cents(price_to_cents(price, "price")?);
        }
        if let Some(is_active) = self.is_active {
            update = update.active(is_active);
        }

        if update.is_empty() {
            return Err(FormError::NothingToUpdate);
        }

        Ok(update)
    }
}
