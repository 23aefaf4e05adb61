use chrono::{NaiveDate, NaiveDateTime};
use diesel::prelude::*;

use crate::domain::membership::{
    Membership as DomainMembership, NewMembership as DomainNewMembership,
};

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::memberships, primary_key(customer_id))]
pub struct Membership {
    pub customer_id: i32,
    pub password_hash: String,
    pub date_of_birth: Option<NaiveDate>,
    pub registered_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::memberships)]
pub struct NewMembership<'a> {
    pub customer_id: i32,
    pub password_hash: &'a str,
    pub date_of_birth: Option<NaiveDate>,
    pub registered_at: NaiveDateTime,
}

impl<'a> NewMembership<'a> {
    pub fn from_domain(customer_id: i32, value: &'a DomainNewMembership) -> Self {
        Self {
            customer_id,
            password_hash: value.password_hash.as_str(),
            date_of_birth: value.date_of_birth,
            registered_at: value.registered_at,
        }
    }
}

impl From<Membership> for DomainMembership {
    fn from(value: Membership) -> Self {
        Self {
            customer_id: value.customer_id,
            password_hash: value.password_hash,
            date_of_birth: value.date_of_birth,
            registered_at: value.registered_at,
        }
    }
}
