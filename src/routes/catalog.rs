use actix_web::{Responder, get, patch, post, web};
use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::domain::auth::Operator;
use crate::domain::money::cents_to_decimal;
use crate::domain::product::Product;
use crate::forms::catalog::{AddCategoryForm, AddProductForm, UpdateProductForm};
use crate::repository::DieselRepository;
use crate::routes::{blocking, created, error_response, ok};
use crate::services::catalog;

/// Product as rendered by the API, with the price as a decimal string.
#[derive(Debug, Serialize)]
pub struct ProductView {
    pub id: i32,
    pub category_id: Option<i32>,
    pub category_name: Option<String>,
    pub name: String,
    pub price: Decimal,
    pub is_active: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl From<Product> for ProductView {
    fn from(value: Product) -> Self {
        Self {
            id: value.id,
            category_id: value.category_id,
            category_name: value.category_name,
            name: value.name,
            price: cents_to_decimal(value.price_cents),
            is_active: value.is_active,
            created_at: value.created_at,
            updated_at: value.updated_at,
        }
    }
}

#[get("/api/products")]
pub async fn list_products(
    params: web::Query<catalog::ProductsQuery>,
    operator: Operator,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let result =
        blocking(move || catalog::list_products(repo.get_ref(), &operator, params.into_inner()))
            .await;

    match result {
        Ok(products) => ok(products
            .into_iter()
            .map(ProductView::from)
            .collect::<Vec<_>>()),
        Err(err) => error_response(&err, "list products"),
    }
}

#[post("/api/products")]
pub async fn add_product(
    operator: Operator,
    repo: web::Data<DieselRepository>,
    form: web::Json<AddProductForm>,
) -> impl Responder {
    let result =
        blocking(move || catalog::create_product(repo.get_ref(), &operator, form.into_inner()))
            .await;

    match result {
        Ok(product) => created(ProductView::from(product)),
        Err(err) => error_response(&err, "create product"),
    }
}

#[patch("/api/products/{product_id}")]
pub async fn update_product(
    path: web::Path<i32>,
    operator: Operator,
    repo: web::Data<DieselRepository>,
    form: web::Json<UpdateProductForm>,
) -> impl Responder {
    let product_id = path.into_inner();
    let result = blocking(move || {
        catalog::update_product(repo.get_ref(), &operator, product_id, form.into_inner())
    })
    .await;

    match result {
        Ok(product) => ok(ProductView::from(product)),
        Err(err) => error_response(&err, "update product"),
    }
}

#[get("/api/categories")]
pub async fn list_categories(repo: web::Data<DieselRepository>) -> impl Responder {
    match blocking(move || catalog::list_categories(repo.get_ref())).await {
        Ok(categories) => ok(categories),
        Err(err) => error_response(&err, "list categories"),
    }
}

#[post("/api/categories")]
pub async fn add_category(
    operator: Operator,
    repo: web::Data<DieselRepository>,
    form: web::Json<AddCategoryForm>,
) -> impl Responder {
    let result =
        blocking(move || catalog::create_category(repo.get_ref(), &operator, form.into_inner()))
            .await;

    match result {
        Ok(category) => created(category),
        Err(err) => error_response(&err, "create category"),
    }
}
