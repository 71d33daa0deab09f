use serde::Serialize;
use utoipa::ToSchema;

use crate::query::Page;

#[derive(Debug, Serialize, ToSchema, Clone)]
pub struct Meta {
    pub page: Option<i64>,
    pub per_page: Option<i64>,
    pub total: Option<i64>,
    pub has_more: Option<bool>,
}

impl Meta {
    pub fn empty() -> Self {
        Self {
            page: None,
            per_page: None,
            total: None,
            has_more: None,
        }
    }

    pub fn from_page<T>(page: &Page<T>) -> Self {
        Self {
            page: Some(page.page as i64),
            per_page: Some(page.per_page as i64),
            total: Some(page.total as i64),
            has_more: Some(page.has_more),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ApiResponse<T> {
    pub message: String,
    pub data: Option<T>,
    pub meta: Option<Meta>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn success(message: impl Into<String>, data: T, meta: Option<Meta>) -> Self {
        Self {
            message: message.into(),
            data: Some(data),
            meta,
        }
    }
}
