use std::{cmp::Ordering, str::FromStr};

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{
    error::{StoreError, StoreResult},
    models::{Customer, CustomerStatus},
    query::{ListView, Listable, Page},
};

impl FromStr for CustomerStatus {
    type Err = StoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "active" => Ok(CustomerStatus::Active),
            "inactive" => Ok(CustomerStatus::Inactive),
            _ => Err(StoreError::Invalid(format!("unknown customer status {s:?}"))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum CustomerSortBy {
    Name,
    Joined,
    Orders,
    TotalSpent,
}

impl Listable for Customer {
    type Facet = CustomerStatus;
    type SortKey = CustomerSortBy;

    fn facet_matches(&self, facet: &CustomerStatus) -> bool {
        self.status == *facet
    }

    fn haystacks(&self) -> Vec<&str> {
        vec![
            self.name.as_str(),
            self.email.as_str(),
            self.phone.as_str(),
            self.location.as_str(),
        ]
    }

    fn compare_by(&self, other: &Self, key: CustomerSortBy) -> Ordering {
        match key {
            CustomerSortBy::Name => self.name.to_lowercase().cmp(&other.name.to_lowercase()),
            CustomerSortBy::Joined => self.joined.cmp(&other.joined),
            CustomerSortBy::Orders => self.orders.cmp(&other.orders),
            CustomerSortBy::TotalSpent => self.total_spent.cmp(&other.total_spent),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct CustomerDirectory {
    customers: Vec<Customer>,
}

impl CustomerDirectory {
    pub fn new(customers: Vec<Customer>) -> Self {
        Self { customers }
    }

    pub fn len(&self) -> usize {
        self.customers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.customers.is_empty()
    }

    pub fn list(&self, view: &ListView<CustomerStatus, CustomerSortBy>) -> Page<Customer> {
        view.apply(&self.customers)
    }

    pub fn get(&self, id: &str) -> StoreResult<&Customer> {
        self.customers
            .iter()
            .find(|customer| customer.id == id)
            .ok_or_else(|| StoreError::NotFound {
                resource: "Customer",
                id: id.to_string(),
            })
    }
}
