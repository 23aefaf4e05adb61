use chrono::{NaiveDate, NaiveDateTime};
use serde::Serialize;

use crate::domain::customer::Customer;

/// Credential record owned by a `member` customer.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Membership {
    pub customer_id: i32,
    /// Argon2 PHC string; never rendered.
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub date_of_birth: Option<NaiveDate>,
    pub registered_at: NaiveDateTime,
}

/// Membership data inserted together with its customer at registration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewMembership {
    pub password_hash: String,
    pub date_of_birth: Option<NaiveDate>,
    pub registered_at: NaiveDateTime,
}

impl NewMembership {
    pub fn new(password_hash: impl Into<String>, date_of_birth: Option<NaiveDate>) -> Self {
        Self {
            password_hash: password_hash.into(),
            date_of_birth,
            registered_at: chrono::Local::now().naive_utc(),
        }
    }
}

/// A member customer joined with its membership record.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Member {
    pub customer: Customer,
    pub membership: Membership,
}
