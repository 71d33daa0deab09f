use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};

use crate::{
    catalog::ProductSortBy,
    customers::CustomerSortBy,
    query::{ListView, PaginationMode, SortOrder},
    store::OrderSortBy,
};

/// Page position sent by a client. `loaded` switches to cumulative
/// "load more" mode.
#[derive(Debug, Default, Clone, Copy)]
pub struct Pagination {
    pub page: Option<usize>,
    pub per_page: Option<usize>,
    pub loaded: Option<usize>,
}

impl Pagination {
    pub fn view<F, K>(&self, default_per_page: usize) -> ListView<F, K>
    where
        F: Clone + PartialEq,
        K: Copy + PartialEq,
    {
        let per_page = self.per_page.unwrap_or(default_per_page).clamp(1, 100);
        let mode = if self.loaded.is_some() {
            PaginationMode::LoadMore
        } else {
            PaginationMode::Paged
        };
        ListView::new(per_page, mode)
    }

    /// Moves an already-configured view to the requested position. Call
    /// after the criteria are set, since setting them rewinds the view.
    pub fn position<F, K>(&self, view: &mut ListView<F, K>)
    where
        F: Clone + PartialEq,
        K: Copy + PartialEq,
    {
        match view.mode() {
            PaginationMode::Paged => {
                view.go_to_page(self.page.unwrap_or(1));
            }
            PaginationMode::LoadMore => {
                view.set_loaded(self.loaded.unwrap_or(0));
            }
        }
    }
}

#[derive(Debug, Default, Deserialize, ToSchema, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct OrderListQuery {
    /// Status to keep, or `all`.
    pub status: Option<String>,
    /// Matches order id and item names.
    pub q: Option<String>,
    pub sort_by: Option<OrderSortBy>,
    pub sort_order: Option<SortOrder>,
    pub page: Option<usize>,
    pub per_page: Option<usize>,
    pub loaded: Option<usize>,
}

impl OrderListQuery {
    pub fn pagination(&self) -> Pagination {
        Pagination {
            page: self.page,
            per_page: self.per_page,
            loaded: self.loaded,
        }
    }
}

#[derive(Debug, Default, Deserialize, ToSchema, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ProductQuery {
    /// Category slug, or `all`.
    pub category: Option<String>,
    pub subcategory: Option<String>,
    /// Matches product name and description.
    pub q: Option<String>,
    pub min_price: Option<i64>,
    pub max_price: Option<i64>,
    pub in_stock: Option<bool>,
    pub featured: Option<bool>,
    pub new_arrival: Option<bool>,
    pub sort_by: Option<ProductSortBy>,
    pub sort_order: Option<SortOrder>,
    pub page: Option<usize>,
    pub per_page: Option<usize>,
    pub loaded: Option<usize>,
}

impl ProductQuery {
    pub fn pagination(&self) -> Pagination {
        Pagination {
            page: self.page,
            per_page: self.per_page,
            loaded: self.loaded,
        }
    }
}

#[derive(Debug, Default, Deserialize, ToSchema, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct CustomerListQuery {
    /// `active`, `inactive` or `all`.
    pub status: Option<String>,
    /// Matches name, email, phone and location.
    pub q: Option<String>,
    pub sort_by: Option<CustomerSortBy>,
    pub sort_order: Option<SortOrder>,
    pub page: Option<usize>,
    pub per_page: Option<usize>,
    pub loaded: Option<usize>,
}

impl CustomerListQuery {
    pub fn pagination(&self) -> Pagination {
        Pagination {
            page: self.page,
            per_page: self.per_page,
            loaded: self.loaded,
        }
    }
}

#[derive(Debug, Default, Deserialize, ToSchema, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct RelatedQuery {
    pub limit: Option<usize>,
}
