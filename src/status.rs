//! Order lifecycle: the closed status set, its transition table, and the
//! progress/timeline views derived from a current status.

use std::{fmt, str::FromStr};

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{
    error::StoreError,
    models::{Order, TimelineEntry},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    Processing,
    Confirmed,
    Shipped,
    InTransit,
    OutForDelivery,
    Delivered,
    Cancelled,
    Returned,
}

/// The happy path used for visual progress. `InTransit` and
/// `OutForDelivery` sit on the `Shipped` step.
pub const CANONICAL_PROGRESSION: [OrderStatus; 4] = [
    OrderStatus::Processing,
    OrderStatus::Confirmed,
    OrderStatus::Shipped,
    OrderStatus::Delivered,
];

const LINEAR: [OrderStatus; 6] = [
    OrderStatus::Processing,
    OrderStatus::Confirmed,
    OrderStatus::Shipped,
    OrderStatus::InTransit,
    OrderStatus::OutForDelivery,
    OrderStatus::Delivered,
];

impl OrderStatus {
    pub fn label(self) -> &'static str {
        match self {
            OrderStatus::Processing => "Processing",
            OrderStatus::Confirmed => "Confirmed",
            OrderStatus::Shipped => "Shipped",
            OrderStatus::InTransit => "In Transit",
            OrderStatus::OutForDelivery => "Out for Delivery",
            OrderStatus::Delivered => "Delivered",
            OrderStatus::Cancelled => "Cancelled",
            OrderStatus::Returned => "Returned",
        }
    }

    /// Position used when sorting by status: the linear path first, then
    /// the two side branches.
    pub fn rank(self) -> u8 {
        match self {
            OrderStatus::Processing => 0,
            OrderStatus::Confirmed => 1,
            OrderStatus::Shipped => 2,
            OrderStatus::InTransit => 3,
            OrderStatus::OutForDelivery => 4,
            OrderStatus::Delivered => 5,
            OrderStatus::Cancelled => 6,
            OrderStatus::Returned => 7,
        }
    }

    pub fn is_side_branch(self) -> bool {
        matches!(self, OrderStatus::Cancelled | OrderStatus::Returned)
    }

    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            OrderStatus::Delivered | OrderStatus::Cancelled | OrderStatus::Returned
        )
    }

    /// Index on [`CANONICAL_PROGRESSION`], `None` for side branches.
    pub fn canonical_index(self) -> Option<usize> {
        match self {
            OrderStatus::Processing => Some(0),
            OrderStatus::Confirmed => Some(1),
            OrderStatus::Shipped | OrderStatus::InTransit | OrderStatus::OutForDelivery => Some(2),
            OrderStatus::Delivered => Some(3),
            OrderStatus::Cancelled | OrderStatus::Returned => None,
        }
    }

    pub fn can_transition_to(self, next: OrderStatus) -> bool {
        if self.is_terminal() {
            return false;
        }
        if next.is_side_branch() {
            return true;
        }
        next.rank() > self.rank()
    }

    pub fn transition(self, next: OrderStatus) -> Result<OrderStatus, StoreError> {
        if self.can_transition_to(next) {
            Ok(next)
        } else {
            Err(StoreError::InvalidTransition {
                from: self,
                to: next,
            })
        }
    }

    pub fn default_description(self) -> &'static str {
        match self {
            OrderStatus::Processing => "Your order has been placed and is being processed",
            OrderStatus::Confirmed => "Your order has been confirmed and is being prepared",
            OrderStatus::Shipped => "Your order has been shipped",
            OrderStatus::InTransit => "Your package is on its way",
            OrderStatus::OutForDelivery => "Your package is out for delivery",
            OrderStatus::Delivered => "Your order has been delivered",
            OrderStatus::Cancelled => "Your order has been cancelled",
            OrderStatus::Returned => "Your order has been returned",
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for OrderStatus {
    type Err = StoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .chars()
            .map(|c| match c {
                ' ' | '-' => '_',
                c => c.to_ascii_lowercase(),
            })
            .collect();
        let status = match normalized.as_str() {
            "processing" => OrderStatus::Processing,
            "confirmed" => OrderStatus::Confirmed,
            "shipped" => OrderStatus::Shipped,
            "in_transit" => OrderStatus::InTransit,
            "out_for_delivery" => OrderStatus::OutForDelivery,
            "delivered" => OrderStatus::Delivered,
            "cancelled" | "canceled" => OrderStatus::Cancelled,
            "returned" => OrderStatus::Returned,
            _ => return Err(StoreError::Invalid(format!("unknown order status {s:?}"))),
        };
        Ok(status)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum StepState {
    Completed,
    Current,
    Inactive,
}

/// State of canonical step `step` (0-based) for an order at `current`.
/// Side branches keep only the first step completed.
pub fn step_state(current: OrderStatus, step: usize) -> StepState {
    match current.canonical_index() {
        Some(index) if step < index => StepState::Completed,
        Some(index) if step == index => StepState::Current,
        Some(_) => StepState::Inactive,
        None if step == 0 => StepState::Completed,
        None => StepState::Inactive,
    }
}

/// `(index + 1) / steps * 100` on the canonical progression; 0 for side
/// branches, which report their outcome through [`TrackingView::side_branch`].
pub fn progress_percent(status: OrderStatus) -> u8 {
    match status.canonical_index() {
        Some(index) => ((index + 1) * 100 / CANONICAL_PROGRESSION.len()) as u8,
        None => 0,
    }
}

/// Timeline for an order that has reached `status` without recorded
/// history: reached steps are completed a day apart from `placed_on`,
/// the rest are pending.
pub fn synthesize_timeline(status: OrderStatus, placed_on: NaiveDate) -> Vec<TimelineEntry> {
    let day = |offset: usize| placed_on.checked_add_days(Days::new(offset as u64));

    if status.is_side_branch() {
        return vec![
            TimelineEntry::completed(OrderStatus::Processing, placed_on),
            TimelineEntry {
                status,
                date: day(1),
                completed: true,
                description: status.default_description().to_string(),
            },
        ];
    }

    LINEAR
        .iter()
        .enumerate()
        .filter(|(_, step)| {
            // sub-states of shipping only appear once reached
            !matches!(step, OrderStatus::InTransit | OrderStatus::OutForDelivery)
                || step.rank() <= status.rank()
        })
        .map(|(offset, &step)| {
            let completed = step.rank() <= status.rank();
            TimelineEntry {
                status: step,
                date: if completed { day(offset) } else { None },
                completed,
                description: step.default_description().to_string(),
            }
        })
        .collect()
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct TrackingStep {
    pub status: OrderStatus,
    pub label: String,
    pub state: StepState,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct TrackingView {
    pub order_id: String,
    pub status: OrderStatus,
    pub steps: Vec<TrackingStep>,
    pub progress_percent: u8,
    pub side_branch: Option<OrderStatus>,
    pub timeline: Vec<TimelineEntry>,
    pub tracking_number: Option<String>,
    pub estimated_delivery: Option<NaiveDate>,
}

pub fn tracking_view(order: &Order) -> TrackingView {
    let steps = CANONICAL_PROGRESSION
        .iter()
        .enumerate()
        .map(|(index, &step)| TrackingStep {
            status: step,
            label: step.label().to_string(),
            state: step_state(order.status, index),
        })
        .collect();

    TrackingView {
        order_id: order.id.clone(),
        status: order.status,
        steps,
        progress_percent: progress_percent(order.status),
        side_branch: order.status.is_side_branch().then_some(order.status),
        timeline: order.timeline.clone(),
        tracking_number: order.shipping_info.tracking_number.clone(),
        estimated_delivery: order.shipping_info.estimated_delivery,
    }
}
