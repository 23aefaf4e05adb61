use thiserror::Error;

use crate::forms::FormError;
use crate::repository::RepositoryError;

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Coarse error category shared by every service failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    NotFound,
    AmbiguousIdentity,
    IdentityMismatch,
    Unauthorized,
    Conflict,
    Persistence,
}

/// Errors returned by the service layer.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("validation failed: {0}")]
    Validation(String),
    #[error("an order must contain at least one item")]
    EmptyOrder,
    #[error("invalid quantity {quantity} for product {product_id}")]
    InvalidQuantity { product_id: i32, quantity: i64 },
    #[error("product {0} not found")]
    ProductNotFound(i32),
    #[error("customer {0} not found")]
    CustomerNotFound(i32),
    #[error("member {0} not found")]
    MemberNotFound(i32),
    #[error("no member named `{0}`")]
    NoMemberNamed(String),
    #[error("order {0} not found")]
    OrderNotFound(i32),
    #[error("found {candidates} member(s) named `{name}`; provide an email or phone number")]
    AmbiguousIdentity { name: String, candidates: usize },
    #[error("email or phone does not match any member named `{name}`")]
    IdentityMismatch { name: String },
    #[error("invalid email or password")]
    InvalidCredentials,
    #[error("unauthorized")]
    Unauthorized,
    #[error("conflict: {0}")]
    Conflict(String),
    #[error("repository error: {0}")]
    Repository(#[from] RepositoryError),
    #[error("internal error: {0}")]
    Internal(String),
}

impl ServiceError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Validation(_) | Self::EmptyOrder | Self::InvalidQuantity { .. } => {
                ErrorKind::Validation
            }
            Self::ProductNotFound(_)
            | Self::CustomerNotFound(_)
            | Self::MemberNotFound(_)
            | Self::NoMemberNamed(_)
            | Self::OrderNotFound(_) => ErrorKind::NotFound,
            Self::AmbiguousIdentity { .. } => ErrorKind::AmbiguousIdentity,
            Self::IdentityMismatch { .. } => ErrorKind::IdentityMismatch,
            Self::InvalidCredentials | Self::Unauthorized => ErrorKind::Unauthorized,
            Self::Conflict(_) => ErrorKind::Conflict,
            Self::Repository(RepositoryError::NotFound) => ErrorKind::NotFound,
            Self::Repository(_) | Self::Internal(_) => ErrorKind::Persistence,
        }
    }
}

impl From<FormError> for ServiceError {
    fn from(value: FormError) -> Self {
        match value {
            FormError::Validation(errors) => Self::Validation(errors.to_string()),
            other => Self::Validation(other.to_string()),
        }
    }
}
