pub mod catalog;
pub mod customers;
pub mod errors;
pub mod identity;
pub mod members;
pub mod orders;
pub mod reports;

pub use errors::{ErrorKind, ServiceError, ServiceResult};
