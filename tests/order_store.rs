mod common;

use std::time::Duration;

use common::{day, ids, new_order};
use furniture_store_api::{
    error::{StoreError, StoreResult},
    fixtures::FixtureSource,
    models::{Order, TimelineEntry},
    status::OrderStatus,
    store::{OrderPatch, OrderSource, OrderStore, RECENT_LIMIT},
};

struct FailingSource;

impl OrderSource for FailingSource {
    fn fetch(&self) -> StoreResult<Vec<Order>> {
        Err(StoreError::Io("backend unavailable".into()))
    }
}

async fn seeded() -> anyhow::Result<OrderStore> {
    Ok(OrderStore::init(&FixtureSource, Duration::ZERO).await?)
}

#[tokio::test]
async fn seeded_store_filters_and_cancels() -> anyhow::Result<()> {
    let store = seeded().await?;

    let delivered = store.get_by_status(OrderStatus::Delivered).await;
    assert_eq!(ids(&delivered), vec!["ORD-2024-001", "ORD-2024-004"]);

    let before = store.list().await;
    let cancelled = store.cancel("ORD-2024-003").await?;
    assert_eq!(cancelled.status, OrderStatus::Cancelled);

    let after = store.list().await;
    assert_eq!(ids(&after), ids(&before));
    for (old, new) in before.iter().zip(after.iter()) {
        if old.id != "ORD-2024-003" {
            assert_eq!(old.status, new.status);
            assert_eq!(old.timeline, new.timeline);
        }
    }
    Ok(())
}

#[tokio::test]
async fn terminal_orders_cannot_be_cancelled() -> anyhow::Result<()> {
    let store = seeded().await?;
    let err = store.cancel("ORD-2024-001").await.unwrap_err();
    assert!(matches!(
        err,
        StoreError::InvalidTransition {
            from: OrderStatus::Delivered,
            to: OrderStatus::Cancelled
        }
    ));
    assert_eq!(
        store.get_by_id("ORD-2024-001").await?.status,
        OrderStatus::Delivered
    );
    Ok(())
}

#[tokio::test]
async fn unknown_ids_are_not_found() -> anyhow::Result<()> {
    let store = seeded().await?;
    assert!(matches!(
        store.get_by_id("ORD-404").await,
        Err(StoreError::NotFound { .. })
    ));
    assert!(matches!(
        store.update_status("ORD-404", OrderStatus::Confirmed, None).await,
        Err(StoreError::NotFound { .. })
    ));
    Ok(())
}

#[tokio::test]
async fn status_update_completes_the_timeline_entry() -> anyhow::Result<()> {
    let store = seeded().await?;

    let order = store
        .update_status("ORD-2024-003", OrderStatus::Confirmed, None)
        .await?;
    let confirmed = order
        .timeline
        .iter()
        .find(|e| e.status == OrderStatus::Confirmed)
        .expect("confirmed entry");
    assert!(confirmed.completed);
    assert!(confirmed.date.is_some());

    // skipping ahead completes the steps in between
    let order = store
        .update_status("ORD-2024-003", OrderStatus::InTransit, None)
        .await?;
    let statuses: Vec<OrderStatus> = order.timeline.iter().map(|e| e.status).collect();
    assert_eq!(
        statuses,
        vec![
            OrderStatus::Processing,
            OrderStatus::Confirmed,
            OrderStatus::Shipped,
            OrderStatus::InTransit,
            OrderStatus::Delivered,
        ]
    );
    assert!(order.timeline[..4].iter().all(|e| e.completed));
    assert!(!order.timeline[4].completed);
    Ok(())
}

#[tokio::test]
async fn explicit_timeline_replaces_history() -> anyhow::Result<()> {
    let store = seeded().await?;
    let timeline = vec![TimelineEntry::completed(
        OrderStatus::Shipped,
        day(2024, 3, 9),
    )];

    let order = store
        .update_status("ORD-2024-003", OrderStatus::Shipped, Some(timeline.clone()))
        .await?;
    assert_eq!(order.timeline, timeline);
    Ok(())
}

#[tokio::test]
async fn cancelling_drops_unreachable_steps() -> anyhow::Result<()> {
    let store = seeded().await?;
    let order = store.cancel("ORD-2024-002").await?;

    assert!(order.timeline.iter().all(|e| e.completed));
    assert_eq!(
        order.timeline.last().map(|e| e.status),
        Some(OrderStatus::Cancelled)
    );
    Ok(())
}

#[tokio::test]
async fn recent_slice_tracks_newest_orders() -> anyhow::Result<()> {
    let store = seeded().await?;
    let recent = store.recent().await;
    assert_eq!(recent.len(), RECENT_LIMIT);
    assert_eq!(ids(&recent), vec!["ORD-2024-001", "ORD-2024-002", "ORD-2024-003"]);

    store
        .add(new_order("ORD-NEW", OrderStatus::Processing, 5_000, day(2024, 4, 1)))
        .await?;
    let recent = store.recent().await;
    assert_eq!(ids(&recent), vec!["ORD-NEW", "ORD-2024-001", "ORD-2024-002"]);
    assert_eq!(store.list().await.len(), 5);
    Ok(())
}

#[tokio::test]
async fn add_rejects_duplicates_and_bad_totals() -> anyhow::Result<()> {
    let store = seeded().await?;

    let duplicate = new_order("ORD-2024-001", OrderStatus::Processing, 100, day(2024, 4, 1));
    assert!(matches!(
        store.add(duplicate).await,
        Err(StoreError::Conflict(_))
    ));

    let mut mismatched = new_order("ORD-BAD", OrderStatus::Processing, 100, day(2024, 4, 1));
    mismatched.tax = 8;
    mismatched.total = Some(100);
    assert!(matches!(
        store.add(mismatched).await,
        Err(StoreError::InvalidTotals(_))
    ));

    let mut empty = new_order("ORD-EMPTY", OrderStatus::Processing, 100, day(2024, 4, 1));
    empty.items[0].quantity = 0;
    assert!(matches!(store.add(empty).await, Err(StoreError::Invalid(_))));

    assert_eq!(store.list().await.len(), 4);
    Ok(())
}

#[tokio::test]
async fn generated_ids_and_computed_totals() -> anyhow::Result<()> {
    let store = OrderStore::new();
    let mut input = new_order("", OrderStatus::Processing, 2_500, day(2024, 5, 2));
    input.items[0].quantity = 2;
    input.shipping = 1_000;
    input.tax = 400;

    let order = store.add(input).await?;
    assert!(order.id.starts_with("ORD-20240502-"));
    assert_eq!(order.totals.subtotal(), 5_000);
    assert_eq!(order.totals.total(), 6_400);
    Ok(())
}

#[tokio::test]
async fn details_patch_leaves_status_alone() -> anyhow::Result<()> {
    let store = seeded().await?;
    let order = store
        .update_details(
            "ORD-2024-002",
            OrderPatch {
                notes: Some("Call before delivery".into()),
                payment_method: Some("Amex ending in 0005".into()),
                ..OrderPatch::default()
            },
        )
        .await?;

    assert_eq!(order.notes.as_deref(), Some("Call before delivery"));
    assert_eq!(order.payment_method, "Amex ending in 0005");
    assert_eq!(order.status, OrderStatus::InTransit);

    let cleared = store
        .update_details(
            "ORD-2024-002",
            OrderPatch {
                notes: Some("  ".into()),
                ..OrderPatch::default()
            },
        )
        .await?;
    assert_eq!(cleared.notes, None);
    Ok(())
}

#[tokio::test]
async fn stats_exclude_side_branches_from_revenue() -> anyhow::Result<()> {
    let store = seeded().await?;
    let stats = store.stats().await;
    assert_eq!(stats.total_orders, 4);
    assert_eq!(stats.revenue, 188_784 + 86_548 + 105_284 + 97_092);

    store.cancel("ORD-2024-003").await?;
    let stats = store.stats().await;
    assert_eq!(stats.revenue, 188_784 + 86_548 + 97_092);
    let cancelled = stats
        .by_status
        .iter()
        .find(|c| c.status == OrderStatus::Cancelled)
        .map(|c| c.count);
    assert_eq!(cancelled, Some(1));
    Ok(())
}

#[tokio::test]
async fn failed_load_clears_the_loading_flag() {
    let store = OrderStore::new();
    let err = store.load(&FailingSource).await.unwrap_err();
    assert!(matches!(err, StoreError::Io(_)));
    assert!(!store.is_loading().await);
}

#[tokio::test]
async fn slow_source_loads_and_dispose_empties() -> anyhow::Result<()> {
    let store = OrderStore::with_latency(Duration::from_millis(5));
    assert_eq!(store.load(&FixtureSource).await?, 4);
    assert!(!store.is_loading().await);

    store.dispose().await;
    assert!(store.list().await.is_empty());
    assert!(store.recent().await.is_empty());
    Ok(())
}
