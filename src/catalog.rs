//! Read-only product catalog and category tree.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{
    error::{StoreError, StoreResult},
    models::{Category, Product},
    query::{ListView, Listable, Page},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ProductSortBy {
    Name,
    Price,
    Rating,
}

impl Listable for Product {
    /// Category slug.
    type Facet = String;
    type SortKey = ProductSortBy;

    fn facet_matches(&self, facet: &String) -> bool {
        self.category == *facet
    }

    fn haystacks(&self) -> Vec<&str> {
        vec![self.name.as_str(), self.description.as_str()]
    }

    fn compare_by(&self, other: &Self, key: ProductSortBy) -> Ordering {
        match key {
            ProductSortBy::Name => self.name.to_lowercase().cmp(&other.name.to_lowercase()),
            ProductSortBy::Price => self.price.cmp(&other.price),
            ProductSortBy::Rating => self.rating.total_cmp(&other.rating),
        }
    }
}

/// Narrowing applied before the list pipeline runs.
#[derive(Debug, Clone, Default)]
pub struct ProductFilters {
    pub subcategory: Option<String>,
    pub min_price: Option<i64>,
    pub max_price: Option<i64>,
    pub in_stock: Option<bool>,
    pub featured: Option<bool>,
    pub new_arrival: Option<bool>,
}

impl ProductFilters {
    fn accepts(&self, product: &Product) -> bool {
        self.subcategory
            .as_deref()
            .is_none_or(|sub| product.subcategory.as_deref() == Some(sub))
            && self.min_price.is_none_or(|min| product.price >= min)
            && self.max_price.is_none_or(|max| product.price <= max)
            && self.in_stock.is_none_or(|flag| product.in_stock == flag)
            && self.featured.is_none_or(|flag| product.featured == flag)
            && self.new_arrival.is_none_or(|flag| product.is_new_arrival == flag)
    }
}

#[derive(Debug, Clone, Default)]
pub struct Catalog {
    products: Vec<Product>,
    categories: Vec<Category>,
}

impl Catalog {
    pub fn new(products: Vec<Product>, categories: Vec<Category>) -> Self {
        Self {
            products,
            categories,
        }
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn get(&self, id: &str) -> StoreResult<&Product> {
        self.products
            .iter()
            .find(|product| product.id == id)
            .ok_or_else(|| StoreError::NotFound {
                resource: "Product",
                id: id.to_string(),
            })
    }

    pub fn list(
        &self,
        filters: &ProductFilters,
        view: &ListView<String, ProductSortBy>,
    ) -> Page<Product> {
        let narrowed: Vec<Product> = self
            .products
            .iter()
            .filter(|product| filters.accepts(product))
            .cloned()
            .collect();
        view.apply(&narrowed)
    }

    pub fn featured(&self) -> Vec<Product> {
        self.products.iter().filter(|p| p.featured).cloned().collect()
    }

    pub fn new_arrivals(&self) -> Vec<Product> {
        self.products
            .iter()
            .filter(|p| p.is_new_arrival)
            .cloned()
            .collect()
    }

    /// Other products from the same category, catalog order.
    pub fn related(&self, id: &str, limit: usize) -> StoreResult<Vec<Product>> {
        let product = self.get(id)?;
        Ok(self
            .products
            .iter()
            .filter(|other| other.category == product.category && other.id != product.id)
            .take(limit)
            .cloned()
            .collect())
    }

    /// Products whose image host is not on `allowed`. Relative paths are
    /// served locally and always pass.
    pub fn disallowed_images<'a>(&'a self, allowed: &[String]) -> Vec<&'a Product> {
        self.products
            .iter()
            .filter(|product| {
                image_host(&product.image)
                    .is_some_and(|host| !allowed.iter().any(|domain| domain == host))
            })
            .collect()
    }
}

fn image_host(url: &str) -> Option<&str> {
    let rest = url
        .strip_prefix("https://")
        .or_else(|| url.strip_prefix("http://"))?;
    rest.split(['/', ':']).next().filter(|host| !host.is_empty())
}
