mod common;

use common::{ADMIN_EMAIL, ADMIN_PASSWORD, day, new_order, test_state};
use furniture_store_api::{
    dto::{
        auth::LoginRequest,
        orders::{UpdateOrderRequest, UpdateOrderStatusRequest},
    },
    error::AppError,
    middleware::auth::AuthUser,
    routes::params::{CustomerListQuery, OrderListQuery},
    services::{admin_service, auth_service, order_service},
    state::AppState,
    status::{OrderStatus, StepState},
};

async fn admin(state: &AppState) -> anyhow::Result<AuthUser> {
    let resp = auth_service::login_admin(
        state,
        LoginRequest {
            email: ADMIN_EMAIL.into(),
            password: ADMIN_PASSWORD.into(),
        },
    )
    .await?;
    let login = resp.data.expect("login data");
    let token = login
        .token
        .strip_prefix("Bearer ")
        .expect("bearer prefix");
    let session = auth_service::decode_session(&state.config.jwt_secret, token)?;
    assert_eq!(session.email, ADMIN_EMAIL);
    assert_eq!(session.role, "admin");
    Ok(AuthUser { session })
}

// Storefront lists and tracks orders; admin ships one to the door; the
// customer cannot cancel once it has been delivered.
#[tokio::test]
async fn admin_delivers_and_storefront_tracks() -> anyhow::Result<()> {
    let state = test_state().await?;
    let admin = admin(&state).await?;

    for status in [OrderStatus::OutForDelivery, OrderStatus::Delivered] {
        let resp = admin_service::update_order_status(
            &state,
            &admin,
            "ORD-2024-002",
            UpdateOrderStatusRequest {
                status,
                timeline: None,
            },
        )
        .await?;
        assert_eq!(resp.data.expect("order").status, status);
    }

    let listed = order_service::list_orders(
        &state,
        OrderListQuery {
            status: Some("Delivered".into()),
            ..OrderListQuery::default()
        },
    )
    .await?;
    let meta = listed.meta.expect("meta");
    assert_eq!(meta.total, Some(3));
    assert_eq!(meta.has_more, Some(false));

    let tracking = order_service::get_tracking(&state, "ORD-2024-002")
        .await?
        .data
        .expect("tracking");
    assert_eq!(tracking.progress_percent, 100);
    assert_eq!(tracking.steps[3].state, StepState::Current);
    assert_eq!(tracking.side_branch, None);

    let err = order_service::cancel_order(&state, "ORD-2024-002")
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::BadRequest(_)));
    Ok(())
}

#[tokio::test]
async fn customer_cancels_a_processing_order() -> anyhow::Result<()> {
    let state = test_state().await?;
    let resp = order_service::cancel_order(&state, "ORD-2024-003").await?;
    assert_eq!(resp.data.expect("order").status, OrderStatus::Cancelled);

    let tracking = order_service::get_tracking(&state, "ORD-2024-003")
        .await?
        .data
        .expect("tracking");
    assert_eq!(tracking.side_branch, Some(OrderStatus::Cancelled));
    assert_eq!(tracking.steps[0].state, StepState::Completed);
    Ok(())
}

#[tokio::test]
async fn order_list_paginates_and_sorts() -> anyhow::Result<()> {
    let state = test_state().await?;

    let resp = order_service::list_orders(
        &state,
        OrderListQuery {
            sort_by: Some(furniture_store_api::store::OrderSortBy::Total),
            sort_order: Some(furniture_store_api::query::SortOrder::Asc),
            per_page: Some(3),
            ..OrderListQuery::default()
        },
    )
    .await?;
    let items = resp.data.expect("orders").items;
    let totals: Vec<i64> = items.iter().map(|o| o.totals.total()).collect();
    assert_eq!(totals, vec![86_548, 97_092, 105_284]);
    assert_eq!(resp.meta.expect("meta").has_more, Some(true));

    let more = order_service::list_orders(
        &state,
        OrderListQuery {
            q: Some("chair".into()),
            loaded: Some(1),
            per_page: Some(1),
            ..OrderListQuery::default()
        },
    )
    .await?;
    let ids: Vec<String> = more.data.expect("orders").items.into_iter().map(|o| o.id).collect();
    assert_eq!(ids, vec!["ORD-2024-002".to_string()]);
    assert_eq!(more.meta.expect("meta").has_more, Some(true));

    let bad = order_service::list_orders(
        &state,
        OrderListQuery {
            status: Some("lost".into()),
            ..OrderListQuery::default()
        },
    )
    .await;
    assert!(matches!(bad, Err(AppError::BadRequest(_))));
    Ok(())
}

#[tokio::test]
async fn wrong_password_is_rejected() -> anyhow::Result<()> {
    let state = test_state().await?;
    let err = auth_service::login_admin(
        &state,
        LoginRequest {
            email: ADMIN_EMAIL.into(),
            password: "nope".into(),
        },
    )
    .await
    .unwrap_err();
    match err {
        AppError::BadRequest(msg) => assert_eq!(msg, "Invalid email or password"),
        other => panic!("unexpected error {other:?}"),
    }

    assert!(matches!(
        auth_service::decode_session(&state.config.jwt_secret, "not-a-token"),
        Err(AppError::Unauthorized)
    ));
    Ok(())
}

#[tokio::test]
async fn admin_creates_edits_and_sees_dashboard() -> anyhow::Result<()> {
    let state = test_state().await?;
    let admin = admin(&state).await?;

    let created = admin_service::create_order(
        &state,
        &admin,
        new_order("ORD-2024-005", OrderStatus::Processing, 44_900, day(2024, 3, 20)),
    )
    .await?
    .data
    .expect("order");
    assert_eq!(created.totals.total(), 44_900);

    let edited = admin_service::update_order(
        &state,
        &admin,
        "ORD-2024-005",
        UpdateOrderRequest {
            notes: Some("Gift wrap".into()),
            ..UpdateOrderRequest::default()
        },
    )
    .await?
    .data
    .expect("order");
    assert_eq!(edited.notes.as_deref(), Some("Gift wrap"));

    let dashboard = admin_service::dashboard(&state, &admin)
        .await?
        .data
        .expect("dashboard");
    assert_eq!(dashboard.orders.total_orders, 5);
    assert_eq!(dashboard.recent_orders.len(), 3);
    assert_eq!(dashboard.recent_orders[0].id, "ORD-2024-005");
    assert_eq!(dashboard.products, 12);
    assert_eq!(dashboard.customers, 6);
    Ok(())
}

#[tokio::test]
async fn read_only_admin_cannot_mutate_orders() -> anyhow::Result<()> {
    let state = test_state().await?;
    let mut admin = admin(&state).await?;
    admin.session.permissions.retain(|p| p != "orders:write");

    let err = admin_service::update_order_status(
        &state,
        &admin,
        "ORD-2024-003",
        UpdateOrderStatusRequest {
            status: OrderStatus::Confirmed,
            timeline: None,
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(err, AppError::Forbidden));

    admin.session.role = "viewer".into();
    assert!(matches!(
        admin_service::dashboard(&state, &admin).await,
        Err(AppError::Forbidden)
    ));
    Ok(())
}

#[tokio::test]
async fn customers_are_searchable() -> anyhow::Result<()> {
    let state = test_state().await?;
    let admin = admin(&state).await?;

    let resp = admin_service::list_customers(
        &state,
        &admin,
        CustomerListQuery {
            q: Some("PORTLAND".into()),
            ..CustomerListQuery::default()
        },
    )
    .await?;
    let names: Vec<String> = resp
        .data
        .expect("customers")
        .items
        .into_iter()
        .map(|c| c.name)
        .collect();
    assert_eq!(names, vec!["Sarah Johnson".to_string()]);

    let inactive = admin_service::list_customers(
        &state,
        &admin,
        CustomerListQuery {
            status: Some("inactive".into()),
            sort_by: Some(furniture_store_api::customers::CustomerSortBy::Name),
            sort_order: Some(furniture_store_api::query::SortOrder::Asc),
            ..CustomerListQuery::default()
        },
    )
    .await?;
    let names: Vec<String> = inactive
        .data
        .expect("customers")
        .items
        .into_iter()
        .map(|c| c.name)
        .collect();
    assert_eq!(names, vec!["Emily Davis".to_string(), "Olivia Martinez".to_string()]);

    assert!(matches!(
        admin_service::get_customer(&state, &admin, "cust-999").await,
        Err(AppError::NotFound)
    ));
    Ok(())
}

#[tokio::test]
async fn state_keeps_only_the_password_hash() -> anyhow::Result<()> {
    let state = test_state().await?;
    let stored = &state.config.admin_password_hash;
    assert_ne!(stored, ADMIN_PASSWORD);
    assert!(!stored.contains(ADMIN_PASSWORD));
    assert!(stored.starts_with("$argon2"));

    // the stored hash still authenticates the configured password
    admin(&state).await?;
    Ok(())
}
