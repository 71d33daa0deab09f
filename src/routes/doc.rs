use utoipa::{
    Modify, OpenApi,
    openapi::{
        self,
        OpenApi as OpenApiSpec,
        security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    },
};
use utoipa_scalar::{Scalar, Servable};

use crate::{
    catalog::ProductSortBy,
    customers::CustomerSortBy,
    dto::{
        admin::DashboardSummary,
        auth::{AdminSession, LoginRequest, LoginResponse},
        customers::CustomerList,
        orders::{OrderList, UpdateOrderRequest, UpdateOrderStatusRequest},
        products::{CategoryList, ProductList},
    },
    models::{
        Category, Customer, CustomerStatus, LineItem, NewOrder, Order, Product, SelectedVariant,
        ShippingInfo, Subcategory, TimelineEntry, Totals,
    },
    query::SortOrder,
    response::{ApiResponse, Meta},
    routes::{admin, auth, health, orders, products},
    status::{OrderStatus, StepState, TrackingStep, TrackingView},
    store::{OrderSortBy, OrderStats, StatusCount},
};

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health_check,
        auth::login,
        auth::me,
        products::list_products,
        products::featured_products,
        products::new_arrivals,
        products::get_product,
        products::related_products,
        products::list_categories,
        orders::list_orders,
        orders::get_order,
        orders::get_tracking,
        orders::cancel_order,
        admin::dashboard,
        admin::list_all_orders,
        admin::create_order,
        admin::get_order_admin,
        admin::update_order,
        admin::update_order_status,
        admin::list_customers,
        admin::get_customer
    ),
    components(
        schemas(
            Order,
            OrderStatus,
            LineItem,
            SelectedVariant,
            Totals,
            ShippingInfo,
            TimelineEntry,
            NewOrder,
            Product,
            Category,
            Subcategory,
            Customer,
            CustomerStatus,
            TrackingView,
            TrackingStep,
            StepState,
            OrderStats,
            StatusCount,
            OrderSortBy,
            ProductSortBy,
            CustomerSortBy,
            SortOrder,
            OrderList,
            ProductList,
            CategoryList,
            CustomerList,
            DashboardSummary,
            UpdateOrderRequest,
            UpdateOrderStatusRequest,
            LoginRequest,
            LoginResponse,
            AdminSession,
            Meta,
            ApiResponse<Order>,
            ApiResponse<OrderList>,
            ApiResponse<Product>,
            ApiResponse<ProductList>,
            ApiResponse<TrackingView>,
            ApiResponse<CustomerList>,
            ApiResponse<DashboardSummary>
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Health check endpoint"),
        (name = "Products", description = "Catalog endpoints"),
        (name = "Orders", description = "Order history and tracking"),
        (name = "Admin", description = "Back-office endpoints"),
        (name = "Auth", description = "Admin session endpoints"),
    )
)]
pub struct ApiDoc;

pub fn scalar_docs() -> Scalar<OpenApiSpec> {
    Scalar::with_url("/docs", ApiDoc::openapi())
}
