use serde::{Deserialize, Serialize};

/// Caller of an administrative operation, as established by the HTTP boundary.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Operator {
    pub name: String,
    pub roles: Vec<String>,
}

impl Operator {
    /// An operator without any roles.
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn with_role(name: impl Into<String>, role: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            roles: vec![role.into()],
        }
    }
}
