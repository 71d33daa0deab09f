pub mod audit;
pub mod catalog;
pub mod config;
pub mod customers;
pub mod dto;
pub mod error;
pub mod fixtures;
pub mod middleware;
pub mod models;
pub mod query;
pub mod response;
pub mod routes;
pub mod services;
pub mod state;
pub mod status;
pub mod store;
