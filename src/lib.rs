pub mod config;
pub mod db;
pub mod domain;
pub mod forms;
pub mod models;
pub mod repository;
pub mod routes;
pub mod schema;
pub mod services;

/// Role required for order history, member details and reports.
pub const SERVICE_ACCESS_ROLE: &str = "admin";

/// Preference type that stores a customer's default payment method.
pub const DEFAULT_PAY_PREFERENCE: &str = "default_pay";

/// Payment method used when neither the request nor a preference supplies one.
pub const DEFAULT_PAYMENT_METHOD: &str = "cash";
