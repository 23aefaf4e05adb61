use diesel::r2d2::PoolError;
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use thiserror::Error;

pub type RepositoryResult<T> = Result<T, RepositoryError>;

/// Errors produced by the persistence layer.
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("record not found")]
    NotFound,
    /// A product referenced by an order line is missing or no longer active.
    #[error("product {0} is missing or inactive")]
    ProductUnavailable(i32),
    /// The product's price differs from the snapshot taken when the order was priced.
    #[error("price of product {product_id} changed from {expected_cents} to {current_cents}")]
    PriceChanged {
        product_id: i32,
        expected_cents: i64,
        current_cents: i64,
    },
    /// A unique index rejected the write, e.g. a second member with the same email.
    #[error("unique constraint violation: {0}")]
    UniqueViolation(String),
    #[error("constraint violation: {0}")]
    ConstraintViolation(String),
    #[error("connection pool error: {0}")]
    Pool(#[from] PoolError),
    #[error("database error: {0}")]
    Database(DieselError),
}

impl From<DieselError> for RepositoryError {
    fn from(err: DieselError) -> Self {
        match err {
            DieselError::NotFound => Self::NotFound,
            DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, info) => {
                log::debug!("Unique violation: {}", info.message());
                Self::UniqueViolation(info.message().to_string())
            }
            DieselError::DatabaseError(
                kind @ (DatabaseErrorKind::ForeignKeyViolation
                | DatabaseErrorKind::CheckViolation
                | DatabaseErrorKind::NotNullViolation),
                info,
            ) => {
                log::debug!("Constraint violation ({kind:?}): {}", info.message());
                Self::ConstraintViolation(info.message().to_string())
            }
            other => Self::Database(other),
        }
    }
}
