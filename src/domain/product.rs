use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Domain representation of a catalog product.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Product {
    /// Unique identifier of the product.
    pub id: i32,
    /// Optional category the product is listed under.
    pub category_id: Option<i32>,
    /// Name of the category, when the product has one.
    pub category_name: Option<String>,
    /// Human-readable name of the product.
    pub name: String,
    /// Current unit price in cents.
    pub price_cents: i64,
    /// Only active products can be ordered.
    pub is_active: bool,
    /// Timestamp for when the product record was created.
    pub created_at: NaiveDateTime,
    /// Timestamp for the last update to the product record.
    pub updated_at: NaiveDateTime,
}

/// Payload required to insert a new product.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewProduct {
    pub category_id: Option<i32>,
    pub name: String,
    pub price_cents: i64,
    pub is_active: bool,
    pub updated_at: NaiveDateTime,
}

impl NewProduct {
    /// Build an active product payload with the current timestamp.
    pub fn new(name: impl Into<String>, price_cents: i64) -> Self {
        Self {
            category_id: None,
            name: name.into(),
            price_cents,
            is_active: true,
            updated_at: chrono::Local::now().naive_utc(),
        }
    }

    pub fn with_category_id(mut self, category_id: i32) -> Self {
        self.category_id = Some(category_id);
        self
    }

    pub fn inactive(mut self) -> Self {
        self.is_active = false;
        self
    }
}

/// Patch data applied when updating an existing product.
///
/// Historical order lines keep their own price snapshot, so a price change
/// only affects orders placed afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateProduct {
    pub name: Option<String>,
    pub price_cents: Option<i64>,
    pub is_active: Option<bool>,
    pub updated_at: NaiveDateTime,
}

impl Default for UpdateProduct {
    fn default() -> Self {
        Self::new()
    }
}

impl UpdateProduct {
    /// Create a new patch object with no changes applied yet.
    pub fn new() -> Self {
        Self {
            name: None,
            price_cents: None,
            is_active: None,
            updated_at: chrono::Local::now().naive_utc(),
        }
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn price_cents(mut self, price_cents: i64) -> Self {
        self.price_cents = Some(price_cents);
        self
    }

    pub fn active(mut self, is_active: bool) -> Self {
        self.is_active = Some(is_active);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.price_cents.is_none() && self.is_active.is_none()
    }
}

/// Query definition used to list catalog products.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductListQuery {
    pub category_id: Option<i32>,
    /// Whether inactive products should be included in the results.
    pub include_inactive: bool,
}

impl ProductListQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn category_id(mut self, category_id: i32) -> Self {
        self.category_id = Some(category_id);
        self
    }

    pub fn include_inactive(mut self) -> Self {
        self.include_inactive = true;
        self
    }
}
