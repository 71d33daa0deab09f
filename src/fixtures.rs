//! Seed data: the furniture catalog, demo customers and sample orders.

use chrono::NaiveDate;

use crate::{
    error::{StoreError, StoreResult},
    models::{
        Category, Customer, CustomerStatus, LineItem, NewOrder, Order, Product, SelectedVariant,
        ShippingInfo, Subcategory,
    },
    status::OrderStatus,
    store::OrderSource,
};

/// Serves the sample orders.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixtureSource;

impl OrderSource for FixtureSource {
    fn fetch(&self) -> StoreResult<Vec<Order>> {
        sample_orders()
    }
}

fn date(year: i32, month: u32, day: u32) -> StoreResult<NaiveDate> {
    NaiveDate::from_ymd_opt(year, month, day)
        .ok_or_else(|| StoreError::Io(format!("invalid fixture date {year}-{month}-{day}")))
}

fn item(product_id: &str, name: &str, unit_price: i64, quantity: u32) -> LineItem {
    LineItem {
        product_id: product_id.into(),
        name: name.into(),
        unit_price,
        quantity,
        variant: None,
    }
}

fn address(recipient: &str, street: &str, city: &str, state: &str, zip: &str) -> ShippingInfo {
    ShippingInfo {
        recipient: recipient.into(),
        address: street.into(),
        city: city.into(),
        state: state.into(),
        zip_code: zip.into(),
        country: "United States".into(),
        method: "Standard Shipping".into(),
        tracking_number: None,
        estimated_delivery: None,
    }
}

/// Four orders, newest first: delivered, in transit, processing, delivered.
pub fn sample_orders() -> StoreResult<Vec<Order>> {
    let mut sofa = item("prod-001", "Modern Velvet Sofa", 129_900, 1);
    sofa.variant = Some(SelectedVariant {
        color: Some("Emerald".into()),
        size: None,
    });

    let mut in_transit_shipping =
        address("Sarah Johnson", "42 Oak Avenue", "Portland", "OR", "97205");
    in_transit_shipping.method = "Express Shipping".into();
    in_transit_shipping.tracking_number = Some("1Z999AA10123456784".into());
    in_transit_shipping.estimated_delivery = Some(date(2024, 3, 14)?);

    let mut delivered_shipping = address("John Smith", "128 Maple Street", "Austin", "TX", "78701");
    delivered_shipping.tracking_number = Some("9400111899223197428490".into());

    let seeds = vec![
        NewOrder {
            id: Some("ORD-2024-001".into()),
            date: Some(date(2024, 3, 12)?),
            status: Some(OrderStatus::Delivered),
            customer_name: "John Smith".into(),
            customer_email: "john.smith@example.com".into(),
            items: vec![sofa, item("prod-004", "Walnut Coffee Table", 44_900, 1)],
            shipping: 0,
            tax: 13_984,
            total: Some(188_784),
            shipping_info: delivered_shipping.clone(),
            payment_method: "Visa ending in 4242".into(),
            notes: None,
            timeline: None,
        },
        NewOrder {
            id: Some("ORD-2024-002".into()),
            date: Some(date(2024, 3, 8)?),
            status: Some(OrderStatus::InTransit),
            customer_name: "Sarah Johnson".into(),
            customer_email: "sarah.j@example.com".into(),
            items: vec![item("prod-007", "Oak Dining Chair", 18_900, 4)],
            shipping: 4_900,
            tax: 6_048,
            total: Some(86_548),
            shipping_info: in_transit_shipping,
            payment_method: "Mastercard ending in 5555".into(),
            notes: Some("Leave at the front desk".into()),
            timeline: None,
        },
        NewOrder {
            id: Some("ORD-2024-003".into()),
            date: Some(date(2024, 3, 5)?),
            status: Some(OrderStatus::Processing),
            customer_name: "Michael Brown".into(),
            customer_email: "m.brown@example.com".into(),
            items: vec![
                item("prod-009", "Ergonomic Office Chair", 34_900, 1),
                item("prod-010", "Standing Desk", 59_900, 1),
            ],
            shipping: 2_900,
            tax: 7_584,
            total: Some(105_284),
            shipping_info: address("Michael Brown", "9 Pine Road", "Denver", "CO", "80202"),
            payment_method: "PayPal".into(),
            notes: None,
            timeline: None,
        },
        NewOrder {
            id: Some("ORD-2024-004".into()),
            date: Some(date(2024, 2, 18)?),
            status: Some(OrderStatus::Delivered),
            customer_name: "John Smith".into(),
            customer_email: "john.smith@example.com".into(),
            items: vec![item("prod-005", "Platform Bed Frame", 89_900, 1)],
            shipping: 0,
            tax: 7_192,
            total: Some(97_092),
            shipping_info: delivered_shipping,
            payment_method: "Visa ending in 4242".into(),
            notes: None,
            timeline: None,
        },
    ];

    seeds.into_iter().map(Order::new).collect()
}

#[allow(clippy::too_many_arguments)]
fn product(
    id: &str,
    name: &str,
    description: &str,
    price: i64,
    original_price: Option<i64>,
    category: &str,
    subcategory: &str,
    rating: f32,
    reviews: u32,
) -> Product {
    let discount = original_price
        .filter(|original| *original > price)
        .map(|original| ((original - price) * 100 / original) as u8);
    Product {
        id: id.into(),
        name: name.into(),
        description: description.into(),
        price,
        original_price,
        discount,
        category: category.into(),
        subcategory: Some(subcategory.into()),
        in_stock: true,
        rating,
        reviews,
        featured: false,
        is_new_arrival: false,
        image: format!("/images/products/{id}.jpg"),
        colors: Vec::new(),
        sizes: Vec::new(),
    }
}

#[rustfmt::skip]
pub fn products() -> Vec<Product> {
    let mut products = vec![
        product("prod-001", "Modern Velvet Sofa", "Three-seat sofa in soft velvet with solid oak legs", 129_900, Some(159_900), "living-room", "sofas", 4.8, 124),
        product("prod-002", "Linen Sectional Sofa", "Modular L-shaped sectional with washable linen covers", 219_900, None, "living-room", "sofas", 4.6, 87),
        product("prod-003", "Leather Accent Chair", "Mid-century lounge chair in full-grain leather", 59_900, Some(69_900), "living-room", "chairs", 4.5, 56),
        product("prod-004", "Walnut Coffee Table", "Solid walnut table with a lower storage shelf", 44_900, None, "living-room", "tables", 4.7, 98),
        product("prod-005", "Platform Bed Frame", "Low-profile queen bed frame with upholstered headboard", 89_900, None, "bedroom", "beds", 4.6, 143),
        product("prod-006", "Six-Drawer Dresser", "Oak veneer dresser with soft-close drawers", 74_900, Some(84_900), "bedroom", "storage", 4.4, 61),
        product("prod-007", "Oak Dining Chair", "Curved-back dining chair in solid white oak", 18_900, None, "dining", "chairs", 4.3, 45),
        product("prod-008", "Extendable Dining Table", "Seats six, extends to eight with a hidden leaf", 99_900, None, "dining", "tables", 4.7, 72),
        product("prod-009", "Ergonomic Office Chair", "Adjustable lumbar support and breathable mesh back", 34_900, Some(39_900), "office", "chairs", 4.5, 210),
        product("prod-010", "Standing Desk", "Electric height-adjustable desk with memory presets", 59_900, None, "office", "desks", 4.6, 134),
        product("prod-011", "Teak Outdoor Lounger", "Weather-resistant teak lounger with cushion", 64_900, None, "outdoor", "seating", 4.2, 28),
        product("prod-012", "Rattan Bistro Set", "Two chairs and a round table for small patios", 39_900, Some(49_900), "outdoor", "sets", 4.1, 19),
    ];

    for p in products.iter_mut() {
        match p.id.as_str() {
            "prod-001" | "prod-005" | "prod-008" | "prod-009" => p.featured = true,
            "prod-002" | "prod-010" | "prod-011" => p.is_new_arrival = true,
            "prod-006" => p.in_stock = false,
            _ => {}
        }
    }
    products[0].colors = vec!["Emerald".into(), "Navy".into(), "Blush".into()];
    products[4].sizes = vec!["Full".into(), "Queen".into(), "King".into()];
    products[10].image = "https://images.unsplash.com/photo-1600210492486-724fe5c67fb0".into();
    products
}

fn subcategory(id: &str, name: &str, item_count: u32) -> Subcategory {
    Subcategory {
        id: id.into(),
        name: name.into(),
        slug: id.into(),
        item_count,
    }
}

pub fn categories() -> Vec<Category> {
    let category = |id: &str, name: &str, subcategories: Vec<Subcategory>| Category {
        id: id.into(),
        name: name.into(),
        slug: id.into(),
        item_count: subcategories.iter().map(|s| s.item_count).sum(),
        subcategories,
    };

    vec![
        category(
            "living-room",
            "Living Room",
            vec![
                subcategory("sofas", "Sofas", 2),
                subcategory("chairs", "Chairs", 1),
                subcategory("tables", "Tables", 1),
            ],
        ),
        category(
            "bedroom",
            "Bedroom",
            vec![subcategory("beds", "Beds", 1), subcategory("storage", "Storage", 1)],
        ),
        category(
            "dining",
            "Dining",
            vec![subcategory("chairs", "Chairs", 1), subcategory("tables", "Tables", 1)],
        ),
        category(
            "office",
            "Office",
            vec![subcategory("chairs", "Chairs", 1), subcategory("desks", "Desks", 1)],
        ),
        category(
            "outdoor",
            "Outdoor",
            vec![subcategory("seating", "Seating", 1), subcategory("sets", "Sets", 1)],
        ),
    ]
}

#[rustfmt::skip]
pub fn customers() -> StoreResult<Vec<Customer>> {
    let customer = |id: &str,
                    name: &str,
                    email: &str,
                    phone: &str,
                    location: &str,
                    status: CustomerStatus,
                    orders: u32,
                    total_spent: i64,
                    joined: NaiveDate| Customer {
        id: id.into(),
        name: name.into(),
        email: email.into(),
        phone: phone.into(),
        location: location.into(),
        status,
        orders,
        total_spent,
        joined,
    };

    Ok(vec![
        customer("cust-001", "John Smith", "john.smith@example.com", "+1 512 555 0101", "Austin, TX", CustomerStatus::Active, 2, 285_876, date(2023, 6, 2)?),
        customer("cust-002", "Sarah Johnson", "sarah.j@example.com", "+1 503 555 0142", "Portland, OR", CustomerStatus::Active, 1, 86_548, date(2023, 9, 14)?),
        customer("cust-003", "Michael Brown", "m.brown@example.com", "+1 303 555 0199", "Denver, CO", CustomerStatus::Active, 1, 105_284, date(2024, 1, 21)?),
        customer("cust-004", "Emily Davis", "emily.davis@example.com", "+1 206 555 0177", "Seattle, WA", CustomerStatus::Inactive, 0, 0, date(2022, 11, 3)?),
        customer("cust-005", "David Wilson", "d.wilson@example.com", "+1 312 555 0123", "Chicago, IL", CustomerStatus::Active, 3, 412_300, date(2022, 4, 18)?),
        customer("cust-006", "Olivia Martinez", "olivia.m@example.com", "+1 305 555 0165", "Miami, FL", CustomerStatus::Inactive, 1, 39_900, date(2023, 2, 27)?),
    ])
}
