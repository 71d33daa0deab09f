use serde::Serialize;
use utoipa::ToSchema;

use crate::{models::Order, store::OrderStats};

#[derive(Debug, Serialize, ToSchema)]
pub struct DashboardSummary {
    pub orders: OrderStats,
    pub recent_orders: Vec<Order>,
    pub products: usize,
    pub customers: usize,
}
