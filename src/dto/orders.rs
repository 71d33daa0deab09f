use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{
    models::{Order, ShippingInfo, TimelineEntry},
    status::OrderStatus,
    store::OrderPatch,
};

#[derive(Debug, Serialize, ToSchema)]
pub struct OrderList {
    pub items: Vec<Order>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateOrderStatusRequest {
    pub status: OrderStatus,
    /// Replaces the recorded timeline when present.
    pub timeline: Option<Vec<TimelineEntry>>,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct UpdateOrderRequest {
    pub shipping_info: Option<ShippingInfo>,
    pub payment_method: Option<String>,
    pub notes: Option<String>,
}

impl From<UpdateOrderRequest> for OrderPatch {
    fn from(req: UpdateOrderRequest) -> Self {
        OrderPatch {
            shipping_info: req.shipping_info,
            payment_method: req.payment_method,
            notes: req.notes,
        }
    }
}
