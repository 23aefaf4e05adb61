//! Product and category catalog.

use pushkind_common::routes::check_role;
use serde::Deserialize;

use crate::SERVICE_ACCESS_ROLE;
use crate::domain::auth::Operator;
use crate::domain::category::Category;
use crate::domain::product::{Product, ProductListQuery};
use crate::forms::catalog::{AddCategoryForm, AddProductForm, UpdateProductForm};
use crate::repository::{CategoryReader, CategoryWriter, ProductReader, ProductWriter};
use crate::services::{ServiceError, ServiceResult};

/// Query parameters accepted by the product listing.
#[derive(Debug, Default, Deserialize)]
pub struct ProductsQuery {
    pub category_id: Option<i32>,
    /// Only honoured for operators with the admin role.
    #[serde(default)]
    pub include_inactive: bool,
}

/// Products ordered by category name, then product name.
pub fn list_products<R>(
    repo: &R,
    operator: &Operator,
    query: ProductsQuery,
) -> ServiceResult<Vec<Product>>
where
    R: ProductReader + ?Sized,
{
    let mut list_query = ProductListQuery::new();
    if let Some(category_id) = query.category_id {
        list_query = list_query.category_id(category_id);
    }
    if query.include_inactive && check_role(SERVICE_ACCESS_ROLE, &operator.roles) {
        list_query = list_query.include_inactive();
    }

    repo.list_products(list_query).map_err(ServiceError::from)
}

pub fn list_categories<R>(repo: &R) -> ServiceResult<Vec<Category>>
where
    R: CategoryReader + ?Sized,
{
    repo.list_categories().map_err(ServiceError::from)
}

pub fn create_category<R>(
    repo: &R,
    operator: &Operator,
    form: AddCategoryForm,
) -> ServiceResult<Category>
where
    R: CategoryWriter + ?Sized,
{
    if !check_role(SERVICE_ACCESS_ROLE, &operator.roles) {
        return Err(ServiceError::Unauthorized);
    }

    let new_category = form.into_new_category()?;

    repo.create_category(&new_category)
        .map_err(ServiceError::from)
}

pub fn create_product<R>(
    repo: &R,
    operator: &Operator,
    form: AddProductForm,
) -> ServiceResult<Product>
where
    R: CategoryReader + ProductWriter + ?Sized,
{
    if !check_role(SERVICE_ACCESS_ROLE, &operator.roles) {
        return Err(ServiceError::Unauthorized);
    }

    let new_product = form.into_new_product()?;

    if let Some(category_id) = new_product.category_id {
        let category = repo
            .get_category_by_id(category_id)
            .map_err(ServiceError::from)?;
        if category.is_none() {
            return Err(ServiceError::Validation(format!(
                "category {category_id} does not exist"
            )));
        }
    }

    let product = repo
        .create_product(&new_product)
        .map_err(ServiceError::from)?;

    log::info!("Created product {} ({})", product.id, product.name);

    Ok(product)
}

/// Change the name, price or active flag of a product.
///
/// Order lines keep the price captured when they were placed.
pub fn update_product<R>(
    repo: &R,
    operator: &Operator,
    product_id: i32,
    form: UpdateProductForm,
) -> ServiceResult<Product>
where
    R: ProductReader + ProductWriter + ?Sized,
{
    if !check_role(SERVICE_ACCESS_ROLE, &operator.roles) {
        return Err(ServiceError::Unauthorized);
    }

    let update = form.into_update_product()?;

    if repo
        .get_product_by_id(product_id)
        .map_err(ServiceError::from)?
        .is_none()
    {
        return Err(ServiceError::ProductNotFound(product_id));
    }

    repo.update_product(product_id, &update)
        .map_err(ServiceError::from)
}
