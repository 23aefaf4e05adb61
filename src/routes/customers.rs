use actix_web::{Responder, post, web};
use serde::Serialize;

use crate::domain::customer::Customer;
use crate::forms::customers::{AddCustomerForm, VerifyCustomerForm};
use crate::repository::DieselRepository;
use crate::routes::{blocking, created, error_response, ok};
use crate::services::identity::{self, Verification};
use crate::services::{ServiceError, customers};

/// Outcome of a membership claim. An unknown name or a contact mismatch is
/// reported as an error.
#[derive(Debug, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum VerificationView {
    RequiresContact { candidates: usize },
    Verified { customer: Customer },
}

#[post("/api/customers")]
pub async fn add_customer(
    repo: web::Data<DieselRepository>,
    form: web::Json<AddCustomerForm>,
) -> impl Responder {
    match blocking(move || customers::create_customer(repo.get_ref(), form.into_inner())).await {
        Ok(customer) => created(customer),
        Err(err) => error_response(&err, "create customer"),
    }
}

#[post("/api/customers/verify")]
pub async fn verify_customer(
    repo: web::Data<DieselRepository>,
    form: web::Json<VerifyCustomerForm>,
) -> impl Responder {
    let result = blocking(move || {
        let input = form.into_inner().into_input()?;
        let verification = identity::verify_member(
            repo.get_ref(),
            &input.name,
            input.email.as_deref(),
            input.phone.as_deref(),
        )?;

        match verification {
            Verification::NotFound => Err(ServiceError::NoMemberNamed(input.name)),
            Verification::RequiresContact { candidates } => {
                Ok(VerificationView::RequiresContact { candidates })
            }
            Verification::Verified(customer) => Ok(VerificationView::Verified { customer }),
            Verification::Mismatch => Err(ServiceError::IdentityMismatch { name: input.name }),
        }
    })
    .await;

    match result {
        Ok(view) => ok(view),
        Err(err) => error_response(&err, "verify customer"),
    }
}
