//! Member registration, login, preferences and the admin member view.

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use chrono::NaiveDate;
use pushkind_common::routes::check_role;
use serde::Serialize;

use crate::SERVICE_ACCESS_ROLE;
use crate::domain::auth::Operator;
use crate::domain::customer::{Customer, CustomerIdentity, NewCustomer, normalize_email};
use crate::domain::membership::{Member, Membership, NewMembership};
use crate::domain::preference::{NewPreference, Preference};
use crate::domain::report::{CustomerSales, FavoriteProduct};
use crate::repository::{
    CustomerReader, CustomerWriter, PreferenceReader, PreferenceWriter, ReportReader,
    RepositoryError,
};
use crate::services::{ServiceError, ServiceResult};

pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Number of favorite products returned alongside preferences.
pub const FAVORITE_PRODUCTS_LIMIT: i64 = 5;

/// Data collected by the registration form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberRegistration {
    pub name: String,
    pub email: String,
    pub password: String,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
}

/// Saved preferences together with the customer's most ordered products.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct MemberPreferences {
    pub customer_id: i32,
    pub preferences: Vec<Preference>,
    pub favorites: Vec<FavoriteProduct>,
}

/// Everything the admin member page shows about one customer.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct MemberDetails {
    pub customer: Customer,
    pub membership: Option<Membership>,
    pub preferences: Vec<Preference>,
    pub favorites: Vec<FavoriteProduct>,
    pub summary: Option<CustomerSales>,
}

/// Register a new member.
///
/// A regular customer with the same name and email is promoted instead of
/// duplicated. Only one member may use a given email.
pub fn register_member<R>(repo: &R, registration: MemberRegistration) -> ServiceResult<Member>
where
    R: CustomerReader + CustomerWriter + ?Sized,
{
    let name = registration.name.trim();
    if name.is_empty() {
        return Err(ServiceError::Validation("name must not be empty".to_string()));
    }

    let email = normalize_email(&registration.email);
    if email.is_empty() {
        return Err(ServiceError::Validation("email must not be empty".to_string()));
    }

    if registration.password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(ServiceError::Validation(format!(
            "password must be at least {MIN_PASSWORD_LENGTH} characters"
        )));
    }

    if repo
        .get_member_by_email(&email)
        .map_err(ServiceError::from)?
        .is_some()
    {
        return Err(member_email_taken(&email));
    }

    let password_hash = hash_password(&registration.password)?;
    let new_membership = NewMembership::new(password_hash, registration.date_of_birth);

    let identity = CustomerIdentity::new(name).with_email(&email);
    let existing = repo
        .find_matching_customer(&identity)
        .map_err(ServiceError::from)?
        .filter(|customer| !customer.is_member());

    let member = match existing {
        Some(customer) => repo
            .create_membership(customer.id, &new_membership)
            .map_err(|err| duplicate_email_conflict(err, &email))?,
        None => {
            let mut new_customer = NewCustomer::new(name).with_email(&email);
            if let Some(phone) = registration.phone.filter(|phone| !phone.trim().is_empty()) {
                new_customer = new_customer.with_phone(phone.trim());
            }
            if let Some(address) = registration
                .address
                .filter(|address| !address.trim().is_empty())
            {
                new_customer = new_customer.with_address(address.trim());
            }
            repo.create_member(&new_customer, &new_membership)
                .map_err(|err| duplicate_email_conflict(err, &email))?
        }
    };

    log::info!(
        "Registered member {} ({})",
        member.customer.id,
        member.customer.name
    );

    Ok(member)
}

fn member_email_taken(email: &str) -> ServiceError {
    ServiceError::Conflict(format!("a member with email {email} already exists"))
}

/// A concurrent registration can pass the lookup above; the unique index on
/// member emails then rejects the insert.
fn duplicate_email_conflict(err: RepositoryError, email: &str) -> ServiceError {
    match err {
        RepositoryError::UniqueViolation(_) => member_email_taken(email),
        other => ServiceError::from(other),
    }
}

/// Check a member's credentials and return the member on success.
pub fn login_member<R>(repo: &R, email: &str, password: &str) -> ServiceResult<Member>
where
    R: CustomerReader + ?Sized,
{
    let email = normalize_email(email);
    let member = repo
        .get_member_by_email(&email)
        .map_err(ServiceError::from)?
        .ok_or(ServiceError::InvalidCredentials)?;

    verify_password(password, &member.membership.password_hash)?;

    Ok(member)
}

/// Insert or overwrite one preference of an existing customer.
pub fn save_preference<R>(
    repo: &R,
    customer_id: i32,
    preference_type: &str,
    preference_value: &str,
) -> ServiceResult<Preference>
where
    R: CustomerReader + PreferenceWriter + ?Sized,
{
    let preference_type = preference_type.trim();
    if preference_type.is_empty() {
        return Err(ServiceError::Validation(
            "preference type must not be empty".to_string(),
        ));
    }

    if repo
        .get_customer_by_id(customer_id)
        .map_err(ServiceError::from)?
        .is_none()
    {
        return Err(ServiceError::CustomerNotFound(customer_id));
    }

    let preference = NewPreference::new(customer_id, preference_type, preference_value.trim());
    repo.upsert_preference(&preference)
        .map_err(ServiceError::from)
}

pub fn load_preferences<R>(repo: &R, customer_id: i32) -> ServiceResult<MemberPreferences>
where
    R: CustomerReader + PreferenceReader + ReportReader + ?Sized,
{
    if repo
        .get_customer_by_id(customer_id)
        .map_err(ServiceError::from)?
        .is_none()
    {
        return Err(ServiceError::CustomerNotFound(customer_id));
    }

    let preferences = repo
        .list_preferences(customer_id)
        .map_err(ServiceError::from)?;
    let favorites = repo
        .favorite_products(customer_id, FAVORITE_PRODUCTS_LIMIT)
        .map_err(ServiceError::from)?;

    Ok(MemberPreferences {
        customer_id,
        preferences,
        favorites,
    })
}

pub fn load_member_details<R>(
    repo: &R,
    operator: &Operator,
    customer_id: i32,
) -> ServiceResult<MemberDetails>
where
    R: CustomerReader + PreferenceReader + ReportReader + ?Sized,
{
    if !check_role(SERVICE_ACCESS_ROLE, &operator.roles) {
        return Err(ServiceError::Unauthorized);
    }

    let customer = repo
        .get_customer_by_id(customer_id)
        .map_err(ServiceError::from)?
        .ok_or(ServiceError::MemberNotFound(customer_id))?;

    let membership = repo
        .get_membership(customer_id)
        .map_err(ServiceError::from)?;
    let preferences = repo
        .list_preferences(customer_id)
        .map_err(ServiceError::from)?;
    let favorites = repo
        .favorite_products(customer_id, FAVORITE_PRODUCTS_LIMIT)
        .map_err(ServiceError::from)?;
    let summary = repo
        .customer_summary(customer_id)
        .map_err(ServiceError::from)?;

    Ok(MemberDetails {
        customer,
        membership,
        preferences,
        favorites,
        summary,
    })
}

/// Hash a password using Argon2id.
fn hash_password(password: &str) -> ServiceResult<String> {
    let salt = SaltString::generate(&mut OsRng);

    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|err| ServiceError::Internal(format!("failed to hash password: {err}")))
}

fn verify_password(password: &str, hash: &str) -> ServiceResult<()> {
    let parsed_hash = PasswordHash::new(hash).map_err(|_| ServiceError::InvalidCredentials)?;

    Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .map_err(|_| ServiceError::InvalidCredentials)
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDateTime;

    use super::*;
    use crate::domain::customer::CustomerType;
    use crate::repository::mock::MockRepository;

    fn fixed_datetime() -> NaiveDateTime {
        match NaiveDate::from_ymd_opt(2024, 1, 1) {
            Some(date) => date.and_hms_opt(0, 0, 0).unwrap_or_default(),
            None => NaiveDateTime::default(),
        }
    }

    fn customer(id: i32, name: &str, email: &str, customer_type: CustomerType) -> Customer {
        Customer {
            id,
            name: name.to_string(),
            phone: None,
            email: Some(email.to_string()),
            address: None,
            customer_type,
            created_at: fixed_datetime(),
        }
    }

    fn member_from(customer: Customer, new_membership: &NewMembership) -> Member {
        Member {
            membership: Membership {
                customer_id: customer.id,
                password_hash: new_membership.password_hash.clone(),
                date_of_birth: new_membership.date_of_birth,
                registered_at: fixed_datetime(),
            },
            customer: Customer {
                customer_type: CustomerType::Member,
                ..customer
            },
        }
    }

    fn registration(password: &str) -> MemberRegistration {
        MemberRegistration {
            name: "Alice Smith".to_string(),
            email: "Alice@Example.com".to_string(),
            password: password.to_string(),
            phone: Some("555-0101".to_string()),
            address: None,
            date_of_birth: None,
        }
    }

    fn registered_member(password: &str) -> Member {
        let hash = match hash_password(password) {
            Ok(hash) => hash,
            Err(err) => panic!("hashing should succeed: {err}"),
        };
        member_from(
            customer(4, "Alice Smith", "alice@example.com", CustomerType::Regular),
            &NewMembership::new(hash, None),
        )
    }

    #[test]
    fn register_creates_member_with_hashed_password() {
        let mut repo = MockRepository::new();
        repo.expect_get_member_by_email()
            .times(1)
            .withf(|email| email == "alice@example.com")
            .returning(|_| Ok(None));
        repo.expect_find_matching_customer()
            .times(1)
            .returning(|_| Ok(None));
        repo.expect_create_membership().never();
        repo.expect_create_member()
            .times(1)
            .withf(|new_customer, new_membership| {
                new_customer.email.as_deref() == Some("alice@example.com")
                    && new_customer.phone.as_deref() == Some("555-0101")
                    && new_membership.password_hash.starts_with("$argon2")
            })
            .returning(|new_customer, new_membership| {
                Ok(member_from(
                    customer(
                        3,
                        &new_customer.name,
                        "alice@example.com",
                        CustomerType::Member,
                    ),
                    new_membership,
                ))
            });

        match register_member(&repo, registration("correct horse")) {
            Ok(member) => {
                assert_eq!(member.customer.id, 3);
                assert!(member.customer.is_member());
            }
            Err(err) => panic!("registration should succeed: {err}"),
        }
    }

    #[test]
    fn register_promotes_matching_regular_customer() {
        let mut repo = MockRepository::new();
        repo.expect_get_member_by_email().returning(|_| Ok(None));
        repo.expect_find_matching_customer()
            .times(1)
            .returning(|_| {
                Ok(Some(customer(
                    8,
                    "Alice Smith",
                    "alice@example.com",
                    CustomerType::Regular,
                )))
            });
        repo.expect_create_member().never();
        repo.expect_create_membership()
            .times(1)
            .withf(|customer_id, _| *customer_id == 8)
            .returning(|customer_id, new_membership| {
                Ok(member_from(
                    customer(
                        customer_id,
                        "Alice Smith",
                        "alice@example.com",
                        CustomerType::Regular,
                    ),
                    new_membership,
                ))
            });

        match register_member(&repo, registration("correct horse")) {
            Ok(member) => {
                assert_eq!(member.customer.id, 8);
                assert!(member.customer.is_member());
            }
            Err(err) => panic!("registration should succeed: {err}"),
        }
    }

    #[test]
    fn register_rejects_short_password_and_taken_email() {
        let mut repo = MockRepository::new();
        repo.expect_create_member().never();

        assert!(matches!(
            register_member(&repo, registration("short")),
            Err(ServiceError::Validation(_))
        ));

        repo.expect_get_member_by_email()
            .returning(|_| Ok(Some(registered_member("whatever1"))));

        assert!(matches!(
            register_member(&repo, registration("correct horse")),
            Err(ServiceError::Conflict(_))
        ));
    }

    #[test]
    fn concurrent_registration_with_same_email_is_a_conflict() {
        let mut repo = MockRepository::new();
        repo.expect_get_member_by_email().returning(|_| Ok(None));
        repo.expect_find_matching_customer().returning(|_| Ok(None));
        repo.expect_create_member().times(1).returning(|_, _| {
            Err(RepositoryError::UniqueViolation(
                "UNIQUE constraint failed: customers.email".to_string(),
            ))
        });

        let err = match register_member(&repo, registration("correct horse")) {
            Ok(member) => panic!("expected a conflict, got member {}", member.customer.id),
            Err(err) => err,
        };
        assert!(matches!(err, ServiceError::Conflict(_)));
        assert_eq!(err.kind(), crate::services::ErrorKind::Conflict);
    }

    #[test]
    fn login_accepts_only_the_right_password() {
        let mut repo = MockRepository::new();
        repo.expect_get_member_by_email()
            .withf(|email| email == "alice@example.com")
            .returning(|_| Ok(Some(registered_member("correct horse"))));

        match login_member(&repo, " ALICE@example.com ", "correct horse") {
            Ok(member) => assert_eq!(member.customer.id, 4),
            Err(err) => panic!("login should succeed: {err}"),
        }

        assert!(matches!(
            login_member(&repo, "alice@example.com", "wrong horse"),
            Err(ServiceError::InvalidCredentials)
        ));
    }

    #[test]
    fn login_with_unknown_email_is_rejected() {
        let mut repo = MockRepository::new();
        repo.expect_get_member_by_email().returning(|_| Ok(None));

        assert!(matches!(
            login_member(&repo, "nobody@example.com", "correct horse"),
            Err(ServiceError::InvalidCredentials)
        ));
    }

    #[test]
    fn save_preference_requires_existing_customer() {
        let mut repo = MockRepository::new();
        repo.expect_get_customer_by_id().returning(|_| Ok(None));
        repo.expect_upsert_preference().never();

        assert!(matches!(
            save_preference(&repo, 99, "default_pay", "card"),
            Err(ServiceError::CustomerNotFound(99))
        ));
    }

    #[test]
    fn save_preference_upserts_trimmed_value() {
        let mut repo = MockRepository::new();
        repo.expect_get_customer_by_id().returning(|id| {
            Ok(Some(customer(
                id,
                "Alice Smith",
                "alice@example.com",
                CustomerType::Member,
            )))
        });
        repo.expect_upsert_preference()
            .times(1)
            .withf(|preference| {
                preference.customer_id == 4
                    && preference.preference_type == "default_pay"
                    && preference.preference_value == "card"
            })
            .returning(|preference| {
                Ok(Preference {
                    customer_id: preference.customer_id,
                    preference_type: preference.preference_type.clone(),
                    preference_value: preference.preference_value.clone(),
                    updated_at: fixed_datetime(),
                })
            });

        match save_preference(&repo, 4, "default_pay", " card ") {
            Ok(preference) => assert_eq!(preference.preference_value, "card"),
            Err(err) => panic!("saving should succeed: {err}"),
        }
    }

    #[test]
    fn preferences_come_with_top_five_favorites() {
        let mut repo = MockRepository::new();
        repo.expect_get_customer_by_id().returning(|id| {
            Ok(Some(customer(
                id,
                "Alice Smith",
                "alice@example.com",
                CustomerType::Member,
            )))
        });
        repo.expect_list_preferences().returning(|_| Ok(Vec::new()));
        repo.expect_favorite_products()
            .times(1)
            .withf(|customer_id, limit| *customer_id == 4 && *limit == FAVORITE_PRODUCTS_LIMIT)
            .returning(|_, _| {
                Ok(vec![FavoriteProduct {
                    product_id: 1,
                    name: "Latte".to_string(),
                    price_cents: 3500,
                    total_quantity: 6,
                    order_count: 3,
                }])
            });

        match load_preferences(&repo, 4) {
            Ok(preferences) => assert_eq!(preferences.favorites.len(), 1),
            Err(err) => panic!("loading should succeed: {err}"),
        }
    }

    #[test]
    fn member_details_are_admin_only() {
        let mut repo = MockRepository::new();
        repo.expect_get_customer_by_id().never();

        assert!(matches!(
            load_member_details(&repo, &Operator::anonymous(), 4),
            Err(ServiceError::Unauthorized)
        ));

        let mut repo = MockRepository::new();
        repo.expect_get_customer_by_id().returning(|_| Ok(None));
        let admin = Operator::with_role("till", SERVICE_ACCESS_ROLE);
        assert!(matches!(
            load_member_details(&repo, &admin, 4),
            Err(ServiceError::MemberNotFound(4))
        ));
    }
}
