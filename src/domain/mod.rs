pub mod auth;
pub mod category;
pub mod customer;
pub mod membership;
pub mod money;
pub mod order;
pub mod preference;
pub mod product;
pub mod report;
