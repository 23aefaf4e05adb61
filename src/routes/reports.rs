use actix_web::{Responder, get, web};

use crate::domain::auth::Operator;
use crate::repository::DieselRepository;
use crate::routes::{blocking, error_response, ok};
use crate::services::reports::{self, SalesQuery};

#[get("/api/reports/sales")]
pub async fn sales_report(
    params: web::Query<SalesQuery>,
    operator: Operator,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let result =
        blocking(move || reports::sales_by_day(repo.get_ref(), &operator, params.into_inner()))
            .await;

    match result {
        Ok(rows) => ok(rows),
        Err(err) => error_response(&err, "load sales report"),
    }
}

#[get("/api/reports/products")]
pub async fn products_report(
    operator: Operator,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match blocking(move || reports::sales_by_product(repo.get_ref(), &operator)).await {
        Ok(rows) => ok(rows),
        Err(err) => error_response(&err, "load product report"),
    }
}

#[get("/api/reports/customers")]
pub async fn customers_report(
    operator: Operator,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match blocking(move || reports::sales_by_customer(repo.get_ref(), &operator)).await {
        Ok(rows) => ok(rows),
        Err(err) => error_response(&err, "load customer report"),
    }
}
