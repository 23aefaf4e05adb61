//! Maps checkout identity fields to exactly one customer.
//!
//! Names are a natural key only in a weak sense: two concurrent resolutions
//! for the same unmatched name may both create a customer. There is no
//! uniqueness constraint on `(name, email)` to prevent it.

use crate::domain::customer::{ContactDetail, Customer, CustomerIdentity};
use crate::repository::{CustomerReader, CustomerWriter};
use crate::services::{ServiceError, ServiceResult};

/// Outcome of resolving checkout identity fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// An existing customer matched the name and contact details.
    Matched(Customer),
    /// Nothing matched, or a regular order was forced; a new regular customer was created.
    Created(Customer),
    /// Members share the name and no contact detail was supplied.
    Ambiguous { candidates: usize },
}

impl Resolution {
    /// The resolved customer, unless disambiguation is still required.
    pub fn customer(&self) -> Option<&Customer> {
        match self {
            Self::Matched(customer) | Self::Created(customer) => Some(customer),
            Self::Ambiguous { .. } => None,
        }
    }
}

/// Outcome of the "claim your membership" check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verification {
    /// No member carries the name.
    NotFound,
    /// Members carry the name but no email or phone was supplied.
    RequiresContact { candidates: usize },
    Verified(Customer),
    /// The contact detail does not belong to any member with the name.
    Mismatch,
}

/// Resolve `identity` to an existing customer, a newly created regular
/// customer, or an ambiguity the caller must settle first.
///
/// With an email or phone the customer matching the name (and the email, when
/// given) is reused. Without one, members sharing the name block the order
/// unless `force_regular` is set. A new customer is only ever `regular`.
pub fn resolve_customer<R>(repo: &R, identity: &CustomerIdentity) -> ServiceResult<Resolution>
where
    R: CustomerReader + CustomerWriter + ?Sized,
{
    let name = identity.name.trim();
    if name.is_empty() {
        return Err(ServiceError::Validation(
            "customer name is required".to_string(),
        ));
    }

    if identity.has_contact() {
        let existing = repo
            .find_matching_customer(identity)
            .map_err(ServiceError::from)?;

        if let Some(customer) = existing {
            log::debug!("Resolved `{name}` to existing customer {}", customer.id);
            return Ok(Resolution::Matched(customer));
        }

        return create_regular(repo, identity);
    }

    let members = repo
        .find_members_by_name(name)
        .map_err(ServiceError::from)?;

    if !members.is_empty() && !identity.force_regular {
        log::debug!(
            "Name `{name}` matches {} member(s); verification required",
            members.len()
        );
        return Ok(Resolution::Ambiguous {
            candidates: members.len(),
        });
    }

    create_regular(repo, identity)
}

fn create_regular<R>(repo: &R, identity: &CustomerIdentity) -> ServiceResult<Resolution>
where
    R: CustomerWriter + ?Sized,
{
    let created = repo
        .create_customer(&identity.to_new_customer())
        .map_err(ServiceError::from)?;

    log::info!("Created regular customer {} for `{}`", created.id, created.name);

    Ok(Resolution::Created(created))
}

/// Check whether the caller is the member registered under `name`.
///
/// Email is checked when present, otherwise phone. Only member rows are
/// considered.
pub fn verify_member<R>(
    repo: &R,
    name: &str,
    email: Option<&str>,
    phone: Option<&str>,
) -> ServiceResult<Verification>
where
    R: CustomerReader + ?Sized,
{
    let name = name.trim();
    if name.is_empty() {
        return Err(ServiceError::Validation(
            "customer name is required".to_string(),
        ));
    }

    let candidates = repo
        .find_members_by_name(name)
        .map_err(ServiceError::from)?;

    if candidates.is_empty() {
        return Ok(Verification::NotFound);
    }

    let email = email.map(str::trim).filter(|value| !value.is_empty());
    let phone = phone.map(str::trim).filter(|value| !value.is_empty());

    let Some(contact) = ContactDetail::from_parts(email, phone) else {
        return Ok(Verification::RequiresContact {
            candidates: candidates.len(),
        });
    };

    let member = repo
        .find_member_by_contact(name, &contact)
        .map_err(ServiceError::from)?;

    Ok(match member {
        Some(member) => Verification::Verified(member),
        None => {
            log::debug!("Contact details do not match any member named `{name}`");
            Verification::Mismatch
        }
    })
}
