use crate::{
    catalog::ProductFilters,
    dto::products::{CategoryList, ProductList},
    error::{AppError, AppResult},
    models::Product,
    query::{Filter, Sort},
    response::{ApiResponse, Meta},
    routes::params::{ProductQuery, RelatedQuery},
    state::AppState,
};

const DEFAULT_RELATED: usize = 4;

pub fn list_products(state: &AppState, query: ProductQuery) -> AppResult<ApiResponse<ProductList>> {
    if query
        .min_price
        .zip(query.max_price)
        .is_some_and(|(min, max)| min > max)
    {
        return Err(AppError::BadRequest(
            "min_price must not exceed max_price".into(),
        ));
    }

    let filter: Filter<String> = match Filter::parse(query.category.as_deref()) {
        Ok(filter) => filter,
        Err(never) => match never {},
    };
    let filters = ProductFilters {
        subcategory: query.subcategory.clone().filter(|s| !s.trim().is_empty()),
        min_price: query.min_price,
        max_price: query.max_price,
        in_stock: query.in_stock,
        featured: query.featured,
        new_arrival: query.new_arrival,
    };
    let pagination = query.pagination();

    let mut view = pagination.view(state.config.default_page_size);
    view.set_filter(filter)
        .set_search(query.q.clone())
        .set_sort(query.sort_by.map(|key| Sort {
            key,
            order: query.sort_order.unwrap_or_default(),
        }));
    pagination.position(&mut view);

    let page = state.catalog.list(&filters, &view);
    let meta = Meta::from_page(&page);
    Ok(ApiResponse::success(
        "Products",
        ProductList { items: page.items },
        Some(meta),
    ))
}

pub fn get_product(state: &AppState, id: &str) -> AppResult<ApiResponse<Product>> {
    let product = state.catalog.get(id)?.clone();
    Ok(ApiResponse::success("Product", product, None))
}

pub fn related_products(
    state: &AppState,
    id: &str,
    query: RelatedQuery,
) -> AppResult<ApiResponse<ProductList>> {
    let limit = query.limit.unwrap_or(DEFAULT_RELATED).clamp(1, 20);
    let items = state.catalog.related(id, limit)?;
    Ok(ApiResponse::success(
        "Related products",
        ProductList { items },
        Some(Meta::empty()),
    ))
}

pub fn featured_products(state: &AppState) -> ApiResponse<ProductList> {
    ApiResponse::success(
        "Featured products",
        ProductList {
            items: state.catalog.featured(),
        },
        Some(Meta::empty()),
    )
}

pub fn new_arrivals(state: &AppState) -> ApiResponse<ProductList> {
    ApiResponse::success(
        "New arrivals",
        ProductList {
            items: state.catalog.new_arrivals(),
        },
        Some(Meta::empty()),
    )
}

pub fn list_categories(state: &AppState) -> ApiResponse<CategoryList> {
    ApiResponse::success(
        "Categories",
        CategoryList {
            items: state.catalog.categories().to_vec(),
        },
        Some(Meta::empty()),
    )
}
