use chrono::NaiveDateTime;
use serde::Serialize;

/// Current value of one preference type for a customer.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Preference {
    pub customer_id: i32,
    pub preference_type: String,
    pub preference_value: String,
    pub updated_at: NaiveDateTime,
}

/// Upsert payload keyed by `(customer_id, preference_type)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPreference {
    pub customer_id: i32,
    pub preference_type: String,
    pub preference_value: String,
    pub updated_at: NaiveDateTime,
}

impl NewPreference {
    pub fn new(
        customer_id: i32,
        preference_type: impl Into<String>,
        preference_value: impl Into<String>,
    ) -> Self {
        Self {
            customer_id,
            preference_type: preference_type.into(),
            preference_value: preference_value.into(),
            updated_at: chrono::Local::now().naive_utc(),
        }
    }
}
