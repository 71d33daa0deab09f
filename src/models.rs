use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::{
    error::{StoreError, StoreResult},
    status::{OrderStatus, synthesize_timeline},
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct SelectedVariant {
    pub color: Option<String>,
    pub size: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct LineItem {
    pub product_id: String,
    pub name: String,
    /// Unit price in cents.
    pub unit_price: i64,
    pub quantity: u32,
    pub variant: Option<SelectedVariant>,
}

impl LineItem {
    pub fn line_total(&self) -> Option<i64> {
        self.unit_price.checked_mul(i64::from(self.quantity))
    }
}

/// Monetary summary of an order. Only built through [`Totals::compute`] or
/// [`Totals::from_parts`], so `total == subtotal + shipping + tax` holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
pub struct Totals {
    subtotal: i64,
    shipping: i64,
    tax: i64,
    total: i64,
}

impl Totals {
    pub fn compute(items: &[LineItem], shipping: i64, tax: i64) -> StoreResult<Self> {
        let subtotal = items.iter().try_fold(0_i64, |acc, item| {
            item.line_total()
                .and_then(|line| acc.checked_add(line))
                .ok_or_else(|| StoreError::InvalidTotals("subtotal overflow".into()))
        })?;
        Self::assemble(subtotal, shipping, tax)
    }

    pub fn from_parts(subtotal: i64, shipping: i64, tax: i64, total: i64) -> StoreResult<Self> {
        let totals = Self::assemble(subtotal, shipping, tax)?;
        if totals.total != total {
            return Err(StoreError::InvalidTotals(format!(
                "total {total} does not equal {subtotal} + {shipping} + {tax}"
            )));
        }
        Ok(totals)
    }

    fn assemble(subtotal: i64, shipping: i64, tax: i64) -> StoreResult<Self> {
        if subtotal < 0 || shipping < 0 || tax < 0 {
            return Err(StoreError::InvalidTotals(
                "amounts must not be negative".into(),
            ));
        }
        let total = subtotal
            .checked_add(shipping)
            .and_then(|sum| sum.checked_add(tax))
            .ok_or_else(|| StoreError::InvalidTotals("total overflow".into()))?;
        Ok(Self {
            subtotal,
            shipping,
            tax,
            total,
        })
    }

    pub fn subtotal(&self) -> i64 {
        self.subtotal
    }

    pub fn shipping(&self) -> i64 {
        self.shipping
    }

    pub fn tax(&self) -> i64 {
        self.tax
    }

    pub fn total(&self) -> i64 {
        self.total
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ShippingInfo {
    pub recipient: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    pub country: String,
    pub method: String,
    pub tracking_number: Option<String>,
    pub estimated_delivery: Option<NaiveDate>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct TimelineEntry {
    pub status: OrderStatus,
    pub date: Option<NaiveDate>,
    pub completed: bool,
    pub description: String,
}

impl TimelineEntry {
    pub fn completed(status: OrderStatus, date: NaiveDate) -> Self {
        Self {
            status,
            date: Some(date),
            completed: true,
            description: status.default_description().to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct Order {
    pub id: String,
    pub date: NaiveDate,
    pub status: OrderStatus,
    pub customer_name: String,
    pub customer_email: String,
    pub items: Vec<LineItem>,
    pub totals: Totals,
    pub shipping_info: ShippingInfo,
    pub timeline: Vec<TimelineEntry>,
    pub payment_method: String,
    pub notes: Option<String>,
}

/// Input for the validated order factory.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct NewOrder {
    pub id: Option<String>,
    pub date: Option<NaiveDate>,
    pub status: Option<OrderStatus>,
    pub customer_name: String,
    pub customer_email: String,
    pub items: Vec<LineItem>,
    pub shipping: i64,
    pub tax: i64,
    /// When present it must match the recomputed total.
    pub total: Option<i64>,
    pub shipping_info: ShippingInfo,
    pub payment_method: String,
    pub notes: Option<String>,
    pub timeline: Option<Vec<TimelineEntry>>,
}

impl Order {
    pub fn new(input: NewOrder) -> StoreResult<Self> {
        if input.items.is_empty() {
            return Err(StoreError::Invalid("order has no items".into()));
        }
        if let Some(item) = input.items.iter().find(|i| i.quantity == 0) {
            return Err(StoreError::Invalid(format!(
                "quantity for {} must be at least 1",
                item.product_id
            )));
        }
        if let Some(item) = input.items.iter().find(|i| i.unit_price < 0) {
            return Err(StoreError::Invalid(format!(
                "unit price for {} must not be negative",
                item.product_id
            )));
        }

        let totals = Totals::compute(&input.items, input.shipping, input.tax)?;
        if let Some(declared) = input.total {
            Totals::from_parts(totals.subtotal(), totals.shipping(), totals.tax(), declared)?;
        }

        let date = input.date.unwrap_or_else(|| Utc::now().date_naive());
        let status = input.status.unwrap_or(OrderStatus::Processing);
        let id = match input.id {
            Some(id) if !id.trim().is_empty() => id,
            _ => build_order_number(date),
        };
        let timeline = input
            .timeline
            .unwrap_or_else(|| synthesize_timeline(status, date));

        Ok(Order {
            id,
            date,
            status,
            customer_name: input.customer_name,
            customer_email: input.customer_email,
            items: input.items,
            totals,
            shipping_info: input.shipping_info,
            timeline,
            payment_method: input.payment_method,
            notes: input.notes,
        })
    }
}

fn build_order_number(date: NaiveDate) -> String {
    let suffix = Uuid::new_v4().simple().to_string();
    format!("ORD-{}-{}", date.format("%Y%m%d"), &suffix[..8])
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct Product {
    pub id: String,
    pub name: String,
    pub description: String,
    /// Price in cents.
    pub price: i64,
    pub original_price: Option<i64>,
    pub discount: Option<u8>,
    pub category: String,
    pub subcategory: Option<String>,
    pub in_stock: bool,
    pub rating: f32,
    pub reviews: u32,
    pub featured: bool,
    pub is_new_arrival: bool,
    pub image: String,
    pub colors: Vec<String>,
    pub sizes: Vec<String>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct Subcategory {
    pub id: String,
    pub name: String,
    pub slug: String,
    pub item_count: u32,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct Category {
    pub id: String,
    pub name: String,
    pub slug: String,
    pub item_count: u32,
    pub subcategories: Vec<Subcategory>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum CustomerStatus {
    Active,
    Inactive,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct Customer {
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub location: String,
    pub status: CustomerStatus,
    pub orders: u32,
    /// Lifetime spend in cents.
    pub total_spent: i64,
    pub joined: NaiveDate,
}
