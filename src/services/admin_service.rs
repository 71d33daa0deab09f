use crate::{
    audit::log_audit,
    dto::{
        admin::DashboardSummary,
        customers::CustomerList,
        orders::{OrderList, UpdateOrderRequest, UpdateOrderStatusRequest},
    },
    error::{AppError, AppResult},
    middleware::auth::{AuthUser, ensure_admin, ensure_permission},
    models::{Customer, CustomerStatus, NewOrder, Order},
    query::{Filter, Sort},
    response::{ApiResponse, Meta},
    routes::params::{CustomerListQuery, OrderListQuery},
    services::{auth_service::ORDERS_WRITE, order_service::order_view},
    state::AppState,
};

pub async fn dashboard(
    state: &AppState,
    user: &AuthUser,
) -> AppResult<ApiResponse<DashboardSummary>> {
    ensure_admin(user)?;
    let summary = DashboardSummary {
        orders: state.orders.stats().await,
        recent_orders: state.orders.recent().await,
        products: state.catalog.products().len(),
        customers: state.customers.len(),
    };
    Ok(ApiResponse::success("Dashboard", summary, Some(Meta::empty())))
}

pub async fn list_all_orders(
    state: &AppState,
    user: &AuthUser,
    query: OrderListQuery,
) -> AppResult<ApiResponse<OrderList>> {
    ensure_admin(user)?;
    let view = order_view(&query, state.config.default_page_size)?;
    let orders = state.orders.list().await;
    let page = view.apply(&orders);

    let meta = Meta::from_page(&page);
    Ok(ApiResponse::success(
        "Orders",
        OrderList { items: page.items },
        Some(meta),
    ))
}

pub async fn get_order_admin(
    state: &AppState,
    user: &AuthUser,
    id: &str,
) -> AppResult<ApiResponse<Order>> {
    ensure_admin(user)?;
    let order = state.orders.get_by_id(id).await?;
    Ok(ApiResponse::success("Order found", order, Some(Meta::empty())))
}

pub async fn create_order(
    state: &AppState,
    user: &AuthUser,
    payload: NewOrder,
) -> AppResult<ApiResponse<Order>> {
    ensure_permission(user, ORDERS_WRITE)?;
    let order = state.orders.add(payload).await?;

    log_audit(
        Some(user.email()),
        "order_create",
        Some("orders"),
        Some(serde_json::json!({ "order_id": order.id, "total": order.totals.total() })),
    );

    Ok(ApiResponse::success(
        "Order created",
        order,
        Some(Meta::empty()),
    ))
}

pub async fn update_order(
    state: &AppState,
    user: &AuthUser,
    id: &str,
    payload: UpdateOrderRequest,
) -> AppResult<ApiResponse<Order>> {
    ensure_permission(user, ORDERS_WRITE)?;
    let order = state.orders.update_details(id, payload.into()).await?;

    log_audit(
        Some(user.email()),
        "order_update",
        Some("orders"),
        Some(serde_json::json!({ "order_id": order.id })),
    );

    Ok(ApiResponse::success(
        "Order updated",
        order,
        Some(Meta::empty()),
    ))
}

pub async fn update_order_status(
    state: &AppState,
    user: &AuthUser,
    id: &str,
    payload: UpdateOrderStatusRequest,
) -> AppResult<ApiResponse<Order>> {
    ensure_permission(user, ORDERS_WRITE)?;
    let order = state
        .orders
        .update_status(id, payload.status, payload.timeline)
        .await?;

    log_audit(
        Some(user.email()),
        "order_status_update",
        Some("orders"),
        Some(serde_json::json!({ "order_id": order.id, "status": order.status })),
    );

    Ok(ApiResponse::success(
        "Order updated",
        order,
        Some(Meta::empty()),
    ))
}

pub async fn list_customers(
    state: &AppState,
    user: &AuthUser,
    query: CustomerListQuery,
) -> AppResult<ApiResponse<CustomerList>> {
    ensure_admin(user)?;
    let filter = Filter::<CustomerStatus>::parse(query.status.as_deref())
        .map_err(|err| AppError::BadRequest(err.to_string()))?;
    let pagination = query.pagination();

    let mut view = pagination.view(state.config.default_page_size);
    view.set_filter(filter)
        .set_search(query.q.clone())
        .set_sort(query.sort_by.map(|key| Sort {
            key,
            order: query.sort_order.unwrap_or_default(),
        }));
    pagination.position(&mut view);

    let page = state.customers.list(&view);
    let meta = Meta::from_page(&page);
    Ok(ApiResponse::success(
        "Customers",
        CustomerList { items: page.items },
        Some(meta),
    ))
}

pub async fn get_customer(
    state: &AppState,
    user: &AuthUser,
    id: &str,
) -> AppResult<ApiResponse<Customer>> {
    ensure_admin(user)?;
    let customer = state.customers.get(id)?.clone();
    Ok(ApiResponse::success("Customer found", customer, Some(Meta::empty())))
}
