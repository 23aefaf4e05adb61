use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::customer::{
    Customer as DomainCustomer, CustomerType, NewCustomer as DomainNewCustomer,
};

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::customers)]
pub struct Customer {
    pub id: i32,
    pub name: String,
    pub name_key: String,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
    pub customer_type: String,
    pub created_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::customers)]
pub struct NewCustomer<'a> {
    pub name: &'a str,
    pub name_key: String,
    pub phone: Option<&'a str>,
    pub email: Option<&'a str>,
    pub address: Option<&'a str>,
    pub customer_type: &'static str,
    pub created_at: NaiveDateTime,
}

impl<'a> NewCustomer<'a> {
    pub fn from_domain(value: &'a DomainNewCustomer, customer_type: CustomerType) -> Self {
        Self {
            name: value.name.as_str(),
            name_key: value.name_key(),
            phone: value.phone.as_deref(),
            email: value.email.as_deref(),
            address: value.address.as_deref(),
            customer_type: customer_type.into(),
            created_at: chrono::Local::now().naive_utc(),
        }
    }
}

impl From<Customer> for DomainCustomer {
    fn from(value: Customer) -> Self {
        Self {
            id: value.id,
            name: value.name,
            phone: value.phone,
            email: value.email,
            address: value.address,
            customer_type: value.customer_type.as_str().into(),
            created_at: value.created_at,
        }
    }
}
