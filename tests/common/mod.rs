#![allow(dead_code)]

use std::time::Duration;

use chrono::NaiveDate;
use furniture_store_api::{
    config::AppConfig,
    error::AppError,
    models::{LineItem, NewOrder, Order, ShippingInfo},
    services::auth_service::hash_password,
    state::AppState,
    status::OrderStatus,
};

pub const ADMIN_EMAIL: &str = "admin@example.com";
pub const ADMIN_PASSWORD: &str = "admin123";

pub fn test_config() -> AppConfig {
    AppConfig {
        host: "127.0.0.1".into(),
        port: 0,
        jwt_secret: "test-secret".into(),
        admin_email: ADMIN_EMAIL.into(),
        admin_password_hash: hash_password(ADMIN_PASSWORD).expect("hash admin password"),
        image_domains: vec!["images.unsplash.com".into()],
        default_page_size: 10,
        simulated_latency: Duration::ZERO,
    }
}

pub async fn test_state() -> Result<AppState, AppError> {
    AppState::bootstrap(test_config()).await
}

pub fn day(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid date")
}

pub fn shipping_info() -> ShippingInfo {
    ShippingInfo {
        recipient: "Test Buyer".into(),
        address: "1 Test Lane".into(),
        city: "Springfield".into(),
        state: "IL".into(),
        zip_code: "62701".into(),
        country: "United States".into(),
        method: "Standard Shipping".into(),
        tracking_number: None,
        estimated_delivery: None,
    }
}

pub fn new_order(id: &str, status: OrderStatus, unit_price: i64, date: NaiveDate) -> NewOrder {
    NewOrder {
        id: Some(id.into()),
        date: Some(date),
        status: Some(status),
        customer_name: "Test Buyer".into(),
        customer_email: "buyer@example.com".into(),
        items: vec![LineItem {
            product_id: "prod-001".into(),
            name: format!("Item for {id}"),
            unit_price,
            quantity: 1,
            variant: None,
        }],
        shipping: 0,
        tax: 0,
        total: None,
        shipping_info: shipping_info(),
        payment_method: "Visa".into(),
        notes: None,
        timeline: None,
    }
}

pub fn order(id: &str, status: OrderStatus, total: i64) -> Order {
    Order::new(new_order(id, status, total, day(2024, 1, 1))).expect("valid order")
}

pub fn ids(orders: &[Order]) -> Vec<&str> {
    orders.iter().map(|o| o.id.as_str()).collect()
}
