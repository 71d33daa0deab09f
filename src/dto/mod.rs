pub mod admin;
pub mod auth;
pub mod customers;
pub mod orders;
pub mod products;
