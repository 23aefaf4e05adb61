use std::future::{Ready, ready};

use actix_web::dev::Payload;
use actix_web::http::header;
use actix_web::{FromRequest, HttpRequest, web};
use subtle::ConstantTimeEq;

use crate::SERVICE_ACCESS_ROLE;
use crate::config::ServerConfig;
use crate::domain::auth::Operator;

/// Name given to the operator authenticated through `ADMIN_TOKEN`.
const ADMIN_OPERATOR: &str = "admin";

/// Any request yields an operator; only a matching bearer token carries the
/// admin role. Services decide whether the role is required.
impl FromRequest for Operator {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(Ok(operator_from_request(req)))
    }
}

fn operator_from_request(req: &HttpRequest) -> Operator {
    let Some(expected) = req
        .app_data::<web::Data<ServerConfig>>()
        .and_then(|config| config.admin_token.clone())
    else {
        return Operator::anonymous();
    };

    let token = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::trim);

    match token {
        Some(token) if tokens_match(token, &expected) => {
            Operator::with_role(ADMIN_OPERATOR, SERVICE_ACCESS_ROLE)
        }
        _ => Operator::anonymous(),
    }
}

/// Compares in constant time for tokens of equal length.
fn tokens_match(presented: &str, expected: &str) -> bool {
    !expected.is_empty() && bool::from(presented.as_bytes().ct_eq(expected.as_bytes()))
}
