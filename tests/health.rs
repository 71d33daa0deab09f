mod common;

use axum::extract::State;
use furniture_store_api::routes::health::health_check;

#[tokio::test]
async fn health_check_reports_loaded_orders() -> anyhow::Result<()> {
    let state = common::test_state().await?;
    let response = health_check(State(state)).await;
    assert_eq!(response.0.message, "Health check");

    let data = response.0.data.expect("health data");
    assert_eq!(data.status, "ok");
    assert!(!data.orders_loading);
    assert_eq!(data.orders, 4);
    Ok(())
}
