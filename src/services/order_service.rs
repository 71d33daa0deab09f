use crate::{
    audit::log_audit,
    dto::orders::OrderList,
    error::{AppError, AppResult},
    models::Order,
    query::{Filter, ListView, Sort},
    response::{ApiResponse, Meta},
    routes::params::OrderListQuery,
    state::AppState,
    status::{OrderStatus, TrackingView, tracking_view},
    store::OrderSortBy,
};

/// Turns list parameters into a positioned view. Shared by the storefront
/// and admin order listings.
pub fn order_view(
    query: &OrderListQuery,
    default_per_page: usize,
) -> AppResult<ListView<OrderStatus, OrderSortBy>> {
    let filter = Filter::<OrderStatus>::parse(query.status.as_deref())
        .map_err(|err| AppError::BadRequest(err.to_string()))?;
    let pagination = query.pagination();

    let mut view = pagination.view(default_per_page);
    view.set_filter(filter)
        .set_search(query.q.clone())
        .set_sort(Some(Sort {
            key: query.sort_by.unwrap_or(OrderSortBy::Date),
            order: query.sort_order.unwrap_or_default(),
        }));
    pagination.position(&mut view);
    Ok(view)
}

pub async fn list_orders(
    state: &AppState,
    query: OrderListQuery,
) -> AppResult<ApiResponse<OrderList>> {
    let view = order_view(&query, state.config.default_page_size)?;
    let orders = state.orders.list().await;
    let page = view.apply(&orders);

    let meta = Meta::from_page(&page);
    Ok(ApiResponse::success(
        "Ok",
        OrderList { items: page.items },
        Some(meta),
    ))
}

pub async fn get_order(state: &AppState, id: &str) -> AppResult<ApiResponse<Order>> {
    let order = state.orders.get_by_id(id).await?;
    Ok(ApiResponse::success("OK", order, Some(Meta::empty())))
}

pub async fn get_tracking(state: &AppState, id: &str) -> AppResult<ApiResponse<TrackingView>> {
    let order = state.orders.get_by_id(id).await?;
    Ok(ApiResponse::success(
        "OK",
        tracking_view(&order),
        Some(Meta::empty()),
    ))
}

pub async fn cancel_order(state: &AppState, id: &str) -> AppResult<ApiResponse<Order>> {
    let order = state.orders.cancel(id).await?;

    log_audit(
        Some(&order.customer_email),
        "order_cancel",
        Some("orders"),
        Some(serde_json::json!({ "order_id": order.id })),
    );

    Ok(ApiResponse::success(
        "Order cancelled",
        order,
        Some(Meta::empty()),
    ))
}
