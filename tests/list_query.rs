mod common;

use common::{ids, order};
use furniture_store_api::{
    models::Order,
    query::{Filter, ListQuery, ListView, PageRequest, PaginationMode, Sort, SortOrder, run},
    status::OrderStatus,
    store::OrderSortBy,
};

fn unsorted(filter: Filter<OrderStatus>, page: PageRequest) -> ListQuery<OrderStatus, OrderSortBy> {
    ListQuery {
        filter,
        search: None,
        sort: None,
        page,
    }
}

fn first_page() -> PageRequest {
    PageRequest::Page {
        page: 1,
        per_page: 50,
    }
}

fn numbered(count: usize) -> Vec<Order> {
    (1..=count)
        .map(|n| order(&format!("ORD-{n:03}"), OrderStatus::Processing, 1_000))
        .collect()
}

#[test]
fn status_filter_keeps_matching_orders_in_place() {
    let orders = vec![
        order("A", OrderStatus::Delivered, 100),
        order("B", OrderStatus::Shipped, 100),
        order("C", OrderStatus::Cancelled, 100),
        order("D", OrderStatus::Delivered, 100),
    ];
    let filter = Filter::parse(Some("delivered")).unwrap();

    let page = run(&orders, &unsorted(filter, first_page()));
    assert_eq!(ids(&page.items), vec!["A", "D"]);
    assert_eq!(page.total, 2);
}

#[test]
fn all_sentinel_passes_everything_through() {
    let filter: Filter<OrderStatus> = Filter::parse(Some("All")).unwrap();
    assert_eq!(filter, Filter::All);
    assert_eq!(Filter::<OrderStatus>::parse(None).unwrap(), Filter::All);

    let orders = vec![
        order("A", OrderStatus::Delivered, 100),
        order("B", OrderStatus::Shipped, 100),
    ];
    let page = run(&orders, &unsorted(filter, first_page()));
    assert_eq!(page.items.len(), 2);
}

#[test]
fn sort_by_total_descending() {
    let orders = vec![
        order("A", OrderStatus::Processing, 100),
        order("B", OrderStatus::Processing, 50),
        order("C", OrderStatus::Processing, 200),
    ];
    let mut query = unsorted(Filter::All, first_page());
    query.sort = Some(Sort {
        key: OrderSortBy::Total,
        order: SortOrder::Desc,
    });

    let page = run(&orders, &query);
    let totals: Vec<i64> = page.items.iter().map(|o| o.totals.total()).collect();
    assert_eq!(totals, vec![200, 100, 50]);
}

#[test]
fn equal_keys_keep_insertion_order_in_both_directions() {
    let orders = vec![
        order("A", OrderStatus::Processing, 100),
        order("B", OrderStatus::Processing, 50),
        order("C", OrderStatus::Processing, 100),
    ];
    let mut query = unsorted(Filter::All, first_page());

    query.sort = Some(Sort {
        key: OrderSortBy::Total,
        order: SortOrder::Desc,
    });
    assert_eq!(ids(&run(&orders, &query).items), vec!["A", "C", "B"]);

    query.sort = Some(Sort {
        key: OrderSortBy::Total,
        order: SortOrder::Asc,
    });
    assert_eq!(ids(&run(&orders, &query).items), vec!["B", "A", "C"]);
}

#[test]
fn search_matches_id_or_item_name_ignoring_case() {
    let orders = vec![
        order("ORD-1", OrderStatus::Processing, 100),
        order("ORD-2", OrderStatus::Processing, 100),
    ];
    let mut query = unsorted(Filter::All, first_page());

    query.search = Some("item FOR ord-2".into());
    assert_eq!(ids(&run(&orders, &query).items), vec!["ORD-2"]);

    query.search = Some("ord-".into());
    assert_eq!(ids(&run(&orders, &query).items), vec!["ORD-1", "ORD-2"]);

    query.search = Some("   ".into());
    assert_eq!(run(&orders, &query).items.len(), 2);
}

#[test]
fn page_slicing_covers_the_tail() {
    let orders = numbered(25);

    let first = run(&orders, &unsorted(Filter::All, PageRequest::Page { page: 1, per_page: 10 }));
    assert_eq!(first.items.len(), 10);
    assert_eq!(first.items[0].id, "ORD-001");
    assert_eq!(first.items[9].id, "ORD-010");
    assert!(first.has_more);

    let third = run(&orders, &unsorted(Filter::All, PageRequest::Page { page: 3, per_page: 10 }));
    assert_eq!(ids(&third.items), vec!["ORD-021", "ORD-022", "ORD-023", "ORD-024", "ORD-025"]);
    assert_eq!(third.total, 25);
    assert!(!third.has_more);

    let past_end = run(
        &orders,
        &unsorted(Filter::All, PageRequest::Page { page: 4, per_page: 10 }),
    );
    assert!(past_end.items.is_empty());
}

#[test]
fn load_more_accumulates_without_gaps() {
    let orders = numbered(25);
    let mut view: ListView<OrderStatus, OrderSortBy> = ListView::new(10, PaginationMode::LoadMore);

    assert_eq!(view.apply(&orders).items.len(), 10);

    view.load_more();
    let page = view.apply(&orders);
    let expected: Vec<String> = (1..=20).map(|n| format!("ORD-{n:03}")).collect();
    assert_eq!(ids(&page.items), expected.iter().map(String::as_str).collect::<Vec<_>>());
    assert!(page.has_more);

    view.load_more();
    let page = view.apply(&orders);
    assert_eq!(page.items.len(), 25);
    assert!(!page.has_more);
}

#[test]
fn changing_criteria_rewinds_the_view() {
    let mut view: ListView<OrderStatus, OrderSortBy> = ListView::new(10, PaginationMode::Paged);
    view.go_to_page(3);
    view.load_more();
    assert_eq!(view.page(), 3);

    view.set_search(Some("sofa".into()));
    assert_eq!(view.page(), 1);
    assert_eq!(view.loaded(), 10);

    view.next_page().next_page();
    view.set_search(Some(" sofa ".into()));
    assert_eq!(view.page(), 3, "same search term keeps position");

    view.set_filter(Filter::Only(OrderStatus::Delivered));
    assert_eq!(view.page(), 1);

    view.go_to_page(2);
    view.set_sort(Some(Sort {
        key: OrderSortBy::Date,
        order: SortOrder::Asc,
    }));
    assert_eq!(view.page(), 1);
}

#[test]
fn restored_load_more_count_rounds_to_whole_steps() {
    let mut view: ListView<OrderStatus, OrderSortBy> = ListView::new(10, PaginationMode::LoadMore);
    view.set_loaded(15);
    assert_eq!(view.loaded(), 20);
    view.set_loaded(0);
    assert_eq!(view.loaded(), 10);
}
