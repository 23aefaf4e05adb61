use chrono::NaiveDate;
use pushkind_common::routes::empty_string_as_none;
use serde::Deserialize;
use validator::Validate;

use crate::forms::{FormError, FormResult, optional_text, required_text};
use crate::services::members::{MIN_PASSWORD_LENGTH, MemberRegistration};

const TEXT_MAX_LEN: u64 = 256;
const MIN_PASSWORD_LEN: u64 = MIN_PASSWORD_LENGTH as u64;
const PASSWORD_MAX_LEN: u64 = 1024;
const DATE_FORMAT: &str = "%Y-%m-%d";

/// Payload of `POST /api/auth/register`.
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterMemberForm {
    #[validate(length(min = 1, max = TEXT_MAX_LEN))]
    pub name: String,
    #[validate(email)]
    pub email: String,
    #[validate(length(min = MIN_PASSWORD_LEN, max = PASSWORD_MAX_LEN))]
    pub password: String,
    #[validate(length(max = TEXT_MAX_LEN))]
    #[serde(default)]
    pub phone: Option<String>,
    #[validate(length(max = TEXT_MAX_LEN))]
    #[serde(default)]
    pub address: Option<String>,
    /// `YYYY-MM-DD`; blank means not given.
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub date_of_birth: Option<String>,
}

impl RegisterMemberForm {
    pub fn into_registration(self) -> FormResult<MemberRegistration> {
        self.validate()?;

        let date_of_birth = match optional_text(self.date_of_birth.as_deref()) {
            Some(value) => Some(NaiveDate::parse_from_str(&value, DATE_FORMAT).map_err(|_| {
                FormError::InvalidDate {
                    field: "date_of_birth",
                    value,
                }
            })?),
            None => None,
        };

        Ok(MemberRegistration {
            name: required_text(&self.name, "name")?,
            email: self.email,
            password: self.password,
            phone: optional_text(self.phone.as_deref()),
            address: optional_text(self.address.as_deref()),
            date_of_birth,
        })
    }
}

/// Payload of `POST /api/auth/login`.
#[derive(Debug, Deserialize, Validate)]
pub struct LoginForm {
    #[validate(length(min = 1))]
    pub email: String,
    #[validate(length(min = 1))]
    pub password: String,
}

/// Payload of `POST /api/member/preferences`.
#[derive(Debug, Deserialize, Validate)]
pub struct PreferenceForm {
    #[validate(range(min = 1))]
    pub customer_id: i32,
    #[validate(length(min = 1, max = 64))]
    pub preference_type: String,
    #[validate(length(max = TEXT_MAX_LEN))]
    pub preference_value: String,
}

/// Query string of `GET /api/member/preferences`.
#[derive(Debug, Deserialize)]
pub struct PreferencesQuery {
    pub customer_id: i32,
}
