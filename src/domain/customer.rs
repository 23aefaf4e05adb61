use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Whether a customer is a walk-in guest or a registered loyalty member.
#[derive(Debug, Default, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum CustomerType {
    #[default]
    Regular,
    /// Always backed by a membership record.
    Member,
}

impl CustomerType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Regular => "regular",
            Self::Member => "member",
        }
    }
}

impl From<&str> for CustomerType {
    fn from(value: &str) -> Self {
        match value {
            "member" => Self::Member,
            _ => Self::Regular,
        }
    }
}

impl From<CustomerType> for &'static str {
    fn from(value: CustomerType) -> Self {
        value.as_str()
    }
}

/// Domain representation of a customer.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Customer {
    /// Unique identifier of the customer.
    pub id: i32,
    /// Display name exactly as entered.
    pub name: String,
    pub phone: Option<String>,
    /// Email address stored in lowercase for comparisons.
    pub email: Option<String>,
    pub address: Option<String>,
    pub customer_type: CustomerType,
    /// Timestamp for when the customer record was created.
    pub created_at: NaiveDateTime,
}

impl Customer {
    pub fn is_member(&self) -> bool {
        self.customer_type == CustomerType::Member
    }
}

/// Payload required to insert a new customer.
///
/// The stored customer type is decided by the repository call used to insert
/// the payload, never by the payload itself.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewCustomer {
    pub name: String,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
}

impl NewCustomer {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Attach an email address, normalised to lowercase.
    #[must_use]
    pub fn with_email(mut self, email: impl AsRef<str>) -> Self {
        self.email = Some(normalize_email(email.as_ref()));
        self
    }

    #[must_use]
    pub fn with_phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = Some(phone.into());
        self
    }

    #[must_use]
    pub fn with_address(mut self, address: impl Into<String>) -> Self {
        self.address = Some(address.into());
        self
    }

    /// Folded form of the name used for case-insensitive lookups.
    pub fn name_key(&self) -> String {
        name_key(&self.name)
    }
}

/// Identity fields typed at checkout, used to find or create the ordering customer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CustomerIdentity {
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    /// Create a regular customer even when members share the name.
    pub force_regular: bool,
}

impl CustomerIdentity {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_email(mut self, email: impl AsRef<str>) -> Self {
        self.email = Some(normalize_email(email.as_ref()));
        self
    }

    #[must_use]
    pub fn with_phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = Some(phone.into());
        self
    }

    #[must_use]
    pub fn with_address(mut self, address: impl Into<String>) -> Self {
        self.address = Some(address.into());
        self
    }

    #[must_use]
    pub fn force_regular(mut self) -> Self {
        self.force_regular = true;
        self
    }

    /// Whether an email or phone number was supplied.
    pub fn has_contact(&self) -> bool {
        self.email.is_some() || self.phone.is_some()
    }

    /// Payload for a new regular customer carrying every supplied field.
    pub fn to_new_customer(&self) -> NewCustomer {
        NewCustomer {
            name: self.name.clone(),
            phone: self.phone.clone(),
            email: self.email.clone(),
            address: self.address.clone(),
        }
    }
}

/// A single contact detail used to confirm a member's identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContactDetail {
    Email(String),
    Phone(String),
}

impl ContactDetail {
    /// Pick the detail to check. Email takes precedence over phone.
    pub fn from_parts(email: Option<&str>, phone: Option<&str>) -> Option<Self> {
        match (email, phone) {
            (Some(email), _) => Some(Self::Email(normalize_email(email))),
            (None, Some(phone)) => Some(Self::Phone(phone.trim().to_string())),
            (None, None) => None,
        }
    }
}

/// Case-folded name used as the matching key.
pub fn name_key(name: &str) -> String {
    name.trim().to_lowercase()
}

pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}
