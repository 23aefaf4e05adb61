use actix_web::{Responder, get, post, web};
use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::Serialize;
use validator::Validate;

use crate::domain::auth::Operator;
use crate::domain::customer::Customer;
use crate::domain::membership::Member;
use crate::domain::money::{average, cents_to_decimal};
use crate::domain::preference::Preference;
use crate::domain::report::FavoriteProduct;
use crate::forms::FormError;
use crate::forms::members::{LoginForm, PreferenceForm, PreferencesQuery, RegisterMemberForm};
use crate::repository::DieselRepository;
use crate::routes::{blocking, created, error_response, ok};
use crate::services::members::{self, MemberDetails, MemberPreferences};

/// Member profile without the credential.
#[derive(Debug, Serialize)]
pub struct MemberView {
    pub customer: Customer,
    pub date_of_birth: Option<NaiveDate>,
    pub registered_at: NaiveDateTime,
}

impl From<Member> for MemberView {
    fn from(value: Member) -> Self {
        Self {
            customer: value.customer,
            date_of_birth: value.membership.date_of_birth,
            registered_at: value.membership.registered_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct FavoriteProductView {
    pub product_id: i32,
    pub name: String,
    pub price: Decimal,
    pub total_quantity: i64,
    pub order_count: i64,
}

impl From<FavoriteProduct> for FavoriteProductView {
    fn from(value: FavoriteProduct) -> Self {
        Self {
            product_id: value.product_id,
            name: value.name,
            price: cents_to_decimal(value.price_cents),
            total_quantity: value.total_quantity,
            order_count: value.order_count,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct PreferencesView {
    pub customer_id: i32,
    pub preferences: Vec<Preference>,
    pub favorites: Vec<FavoriteProductView>,
}

impl From<MemberPreferences> for PreferencesView {
    fn from(value: MemberPreferences) -> Self {
        Self {
            customer_id: value.customer_id,
            preferences: value.preferences,
            favorites: value.favorites.into_iter().map(Into::into).collect(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct OrderStatsView {
    pub order_count: i64,
    pub total_spent: Decimal,
    pub average_order: Decimal,
    pub last_order_at: Option<NaiveDateTime>,
}

#[derive(Debug, Serialize)]
pub struct MemberDetailsView {
    pub customer: Customer,
    pub date_of_birth: Option<NaiveDate>,
    pub registered_at: Option<NaiveDateTime>,
    pub preferences: Vec<Preference>,
    pub favorites: Vec<FavoriteProductView>,
    pub stats: OrderStatsView,
}

impl From<MemberDetails> for MemberDetailsView {
    fn from(value: MemberDetails) -> Self {
        let (order_count, total_spent_cents, last_order_at) = value
            .summary
            .map(|summary| {
                (
                    summary.order_count,
                    summary.total_spent_cents,
                    summary.last_order_at,
                )
            })
            .unwrap_or((0, 0, None));

        Self {
            customer: value.customer,
            date_of_birth: value
                .membership
                .as_ref()
                .and_then(|membership| membership.date_of_birth),
            registered_at: value
                .membership
                .as_ref()
                .map(|membership| membership.registered_at),
            preferences: value.preferences,
            favorites: value.favorites.into_iter().map(Into::into).collect(),
            stats: OrderStatsView {
                order_count,
                total_spent: cents_to_decimal(total_spent_cents),
                average_order: average(total_spent_cents, order_count),
                last_order_at,
            },
        }
    }
}

#[post("/api/auth/register")]
pub async fn register(
    repo: web::Data<DieselRepository>,
    form: web::Json<RegisterMemberForm>,
) -> impl Responder {
    let result = blocking(move || {
        let registration = form.into_inner().into_registration()?;
        members::register_member(repo.get_ref(), registration)
    })
    .await;

    match result {
        Ok(member) => created(MemberView::from(member)),
        Err(err) => error_response(&err, "register member"),
    }
}

#[post("/api/auth/login")]
pub async fn login(
    repo: web::Data<DieselRepository>,
    form: web::Json<LoginForm>,
) -> impl Responder {
    let result = blocking(move || {
        let form = form.into_inner();
        form.validate().map_err(FormError::from)?;
        members::login_member(repo.get_ref(), &form.email, &form.password)
    })
    .await;

    match result {
        Ok(member) => ok(MemberView::from(member)),
        Err(err) => error_response(&err, "log in member"),
    }
}

#[get("/api/member/preferences")]
pub async fn show_preferences(
    params: web::Query<PreferencesQuery>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let customer_id = params.customer_id;
    match blocking(move || members::load_preferences(repo.get_ref(), customer_id)).await {
        Ok(preferences) => ok(PreferencesView::from(preferences)),
        Err(err) => error_response(&err, "load preferences"),
    }
}

#[post("/api/member/preferences")]
pub async fn save_preference(
    repo: web::Data<DieselRepository>,
    form: web::Json<PreferenceForm>,
) -> impl Responder {
    let result = blocking(move || {
        let form = form.into_inner();
        form.validate().map_err(FormError::from)?;
        members::save_preference(
            repo.get_ref(),
            form.customer_id,
            &form.preference_type,
            &form.preference_value,
        )
    })
    .await;

    match result {
        Ok(preference) => ok(preference),
        Err(err) => error_response(&err, "save preference"),
    }
}

#[get("/api/admin/members/{customer_id}")]
pub async fn show_member(
    path: web::Path<i32>,
    operator: Operator,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let customer_id = path.into_inner();
    let result =
        blocking(move || members::load_member_details(repo.get_ref(), &operator, customer_id))
            .await;

    match result {
        Ok(details) => ok(MemberDetailsView::from(details)),
        Err(err) => error_response(&err, "load member details"),
    }
}
