//! In-memory order store. Sole owner and mutator of the order collection.

use std::{cmp::Ordering, collections::BTreeMap, sync::Arc, time::Duration};

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use utoipa::ToSchema;

use crate::{
    error::{StoreError, StoreResult},
    models::{NewOrder, Order, ShippingInfo, TimelineEntry},
    query::Listable,
    status::OrderStatus,
};

/// Number of orders kept in the "recent" slice.
pub const RECENT_LIMIT: usize = 3;

/// Where the store loads its orders from.
pub trait OrderSource: Send + Sync {
    fn fetch(&self) -> StoreResult<Vec<Order>>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum OrderSortBy {
    Date,
    Total,
    Status,
}

impl Listable for Order {
    type Facet = OrderStatus;
    type SortKey = OrderSortBy;

    fn facet_matches(&self, facet: &OrderStatus) -> bool {
        self.status == *facet
    }

    fn haystacks(&self) -> Vec<&str> {
        let mut fields = vec![self.id.as_str()];
        fields.extend(self.items.iter().map(|item| item.name.as_str()));
        fields
    }

    fn compare_by(&self, other: &Self, key: OrderSortBy) -> Ordering {
        match key {
            OrderSortBy::Date => self.date.cmp(&other.date),
            OrderSortBy::Total => self.totals.total().cmp(&other.totals.total()),
            OrderSortBy::Status => self.status.rank().cmp(&other.status.rank()),
        }
    }
}

/// Admin edit of the descriptive fields. Status and totals go through
/// their own entry points.
#[derive(Debug, Clone, Default)]
pub struct OrderPatch {
    pub shipping_info: Option<ShippingInfo>,
    pub payment_method: Option<String>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct StatusCount {
    pub status: OrderStatus,
    pub count: usize,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct OrderStats {
    pub total_orders: usize,
    /// Sum of totals in cents, excluding cancelled and returned orders.
    pub revenue: i64,
    pub by_status: Vec<StatusCount>,
}

#[derive(Default)]
struct Inner {
    orders: Vec<Order>,
    recent: Vec<Order>,
    loading: bool,
}

impl Inner {
    /// Keeps the date-desc order and the recent slice in sync. Runs after
    /// every mutation.
    fn reindex(&mut self) {
        self.orders.sort_by(|a, b| b.date.cmp(&a.date));
        self.recent = self.orders.iter().take(RECENT_LIMIT).cloned().collect();
    }

    fn find_mut(&mut self, id: &str) -> StoreResult<&mut Order> {
        self.orders
            .iter_mut()
            .find(|order| order.id == id)
            .ok_or_else(|| StoreError::order_not_found(id))
    }
}

#[derive(Clone, Default)]
pub struct OrderStore {
    inner: Arc<RwLock<Inner>>,
    latency: Duration,
}

impl OrderStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an artificial delay to [`OrderStore::load`].
    pub fn with_latency(latency: Duration) -> Self {
        Self {
            inner: Arc::default(),
            latency,
        }
    }

    /// Builds a store and loads it from `source`.
    pub async fn init(source: &dyn OrderSource, latency: Duration) -> StoreResult<Self> {
        let store = Self::with_latency(latency);
        store.load(source).await?;
        Ok(store)
    }

    pub async fn load(&self, source: &dyn OrderSource) -> StoreResult<usize> {
        self.inner.write().await.loading = true;

        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }

        let mut inner = self.inner.write().await;
        inner.loading = false;
        let orders = source.fetch()?;
        inner.orders = orders;
        inner.reindex();
        tracing::debug!(count = inner.orders.len(), "orders loaded");
        Ok(inner.orders.len())
    }

    pub async fn dispose(&self) {
        let mut inner = self.inner.write().await;
        inner.orders.clear();
        inner.recent.clear();
        inner.loading = false;
    }

    pub async fn is_loading(&self) -> bool {
        self.inner.read().await.loading
    }

    pub async fn list(&self) -> Vec<Order> {
        self.inner.read().await.orders.clone()
    }

    pub async fn recent(&self) -> Vec<Order> {
        self.inner.read().await.recent.clone()
    }

    pub async fn get_by_id(&self, id: &str) -> StoreResult<Order> {
        self.inner
            .read()
            .await
            .orders
            .iter()
            .find(|order| order.id == id)
            .cloned()
            .ok_or_else(|| StoreError::order_not_found(id))
    }

    pub async fn get_by_status(&self, status: OrderStatus) -> Vec<Order> {
        self.inner
            .read()
            .await
            .orders
            .iter()
            .filter(|order| order.status == status)
            .cloned()
            .collect()
    }

    pub async fn add(&self, input: NewOrder) -> StoreResult<Order> {
        let order = Order::new(input)?;
        let mut inner = self.inner.write().await;
        if inner.orders.iter().any(|existing| existing.id == order.id) {
            return Err(StoreError::Conflict(format!("Order {}", order.id)));
        }
        inner.orders.push(order.clone());
        inner.reindex();
        Ok(order)
    }

    /// Moves an order along the transition table. Without an explicit
    /// `timeline` the new status is recorded on the existing one.
    pub async fn update_status(
        &self,
        id: &str,
        next: OrderStatus,
        timeline: Option<Vec<TimelineEntry>>,
    ) -> StoreResult<Order> {
        let mut inner = self.inner.write().await;
        let order = inner.find_mut(id)?;
        order.status = order.status.transition(next)?;
        match timeline {
            Some(timeline) => order.timeline = timeline,
            None => record_step(&mut order.timeline, next),
        }
        let updated = order.clone();
        inner.reindex();
        Ok(updated)
    }

    pub async fn cancel(&self, id: &str) -> StoreResult<Order> {
        self.update_status(id, OrderStatus::Cancelled, None).await
    }

    pub async fn update_details(&self, id: &str, patch: OrderPatch) -> StoreResult<Order> {
        let mut inner = self.inner.write().await;
        let order = inner.find_mut(id)?;
        if let Some(shipping_info) = patch.shipping_info {
            order.shipping_info = shipping_info;
        }
        if let Some(payment_method) = patch.payment_method {
            order.payment_method = payment_method;
        }
        if let Some(notes) = patch.notes {
            order.notes = Some(notes).filter(|n| !n.trim().is_empty());
        }
        let updated = order.clone();
        inner.reindex();
        Ok(updated)
    }

    pub async fn stats(&self) -> OrderStats {
        let inner = self.inner.read().await;
        let mut counts: BTreeMap<u8, StatusCount> = BTreeMap::new();
        let mut revenue = 0_i64;
        for order in &inner.orders {
            counts
                .entry(order.status.rank())
                .or_insert(StatusCount {
                    status: order.status,
                    count: 0,
                })
                .count += 1;
            if !order.status.is_side_branch() {
                revenue = revenue.saturating_add(order.totals.total());
            }
        }
        OrderStats {
            total_orders: inner.orders.len(),
            revenue,
            by_status: counts.into_values().collect(),
        }
    }
}

/// Marks `status` reached in the timeline. On the happy path, pending
/// entries up to and including `status` are completed; a status without an
/// entry is inserted ahead of the remaining pending ones. Side branches drop
/// the pending steps that can no longer be reached.
fn record_step(timeline: &mut Vec<TimelineEntry>, status: OrderStatus) {
    let today = Utc::now().date_naive();

    if status.is_side_branch() {
        timeline.retain(|entry| entry.completed);
        timeline.push(TimelineEntry::completed(status, today));
        return;
    }

    let mut found = false;
    for entry in timeline
        .iter_mut()
        .filter(|entry| !entry.completed && entry.status.rank() <= status.rank())
    {
        found |= entry.status == status;
        entry.completed = true;
        entry.date = Some(today);
    }
    if !found {
        let at = timeline
            .iter()
            .position(|entry| !entry.completed)
            .unwrap_or(timeline.len());
        timeline.insert(at, TimelineEntry::completed(status, today));
    }
}
