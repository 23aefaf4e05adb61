use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::preference::{
    NewPreference as DomainNewPreference, Preference as DomainPreference,
};

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::preferences)]
pub struct Preference {
    pub id: i32,
    pub customer_id: i32,
    pub preference_type: String,
    pub preference_value: String,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::preferences)]
pub struct NewPreference<'a> {
    pub customer_id: i32,
    pub preference_type: &'a str,
    pub preference_value: &'a str,
    pub updated_at: NaiveDateTime,
}

impl From<Preference> for DomainPreference {
    fn from(value: Preference) -> Self {
        Self {
            customer_id: value.customer_id,
            preference_type: value.preference_type,
            preference_value: value.preference_value,
            updated_at: value.updated_at,
        }
    }
}

impl<'a> From<&'a DomainNewPreference> for NewPreference<'a> {
    fn from(value: &'a DomainNewPreference) -> Self {
        Self {
            customer_id: value.customer_id,
            preference_type: value.preference_type.as_str(),
            preference_value: value.preference_value.as_str(),
            updated_at: value.updated_at,
        }
    }
}
