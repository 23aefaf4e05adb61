use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::product::{
    NewProduct as DomainNewProduct, Product as DomainProduct,
    UpdateProduct as DomainUpdateProduct,
};

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::products)]
pub struct Product {
    pub id: i32,
    pub category_id: Option<i32>,
    pub name: String,
    pub price_cents: i64,
    pub is_active: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::products)]
pub struct NewProduct<'a> {
    pub category_id: Option<i32>,
    pub name: &'a str,
    pub price_cents: i64,
    pub is_active: bool,
    pub updated_at: NaiveDateTime,
}

#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::products)]
pub struct UpdateProduct<'a> {
    pub name: Option<&'a str>,
    pub price_cents: Option<i64>,
    pub is_active: Option<bool>,
    pub updated_at: NaiveDateTime,
}

impl Product {
    pub fn into_domain(self, category_name: Option<String>) -> DomainProduct {
        DomainProduct {
            id: self.id,
            category_id: self.category_id,
            category_name,
            name: self.name,
            price_cents: self.price_cents,
            is_active: self.is_active,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

impl From<(Product, Option<String>)> for DomainProduct {
    fn from(value: (Product, Option<String>)) -> Self {
        value.0.into_domain(value.1)
    }
}

impl<'a> From<&'a DomainNewProduct> for NewProduct<'a> {
    fn from(value: &'a DomainNewProduct) -> Self {
        Self {
            category_id: value.category_id,
            name: value.name.as_str(),
            price_cents: value.price_cents,
            is_active: value.is_active,
            updated_at: value.updated_at,
        }
    }
}

impl<'a> From<&'a DomainUpdateProduct> for UpdateProduct<'a> {
    fn from(value: &'a DomainUpdateProduct) -> Self {
        Self {
            name: value.name.as_deref(),
            price_cents: value.price_cents,
            is_active: value.is_active,
            updated_at: value.updated_at,
        }
    }
}
