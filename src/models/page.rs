// src/models/page.rs

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::common::params::Pagination;

/// Envelope padrão das listagens paginadas.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub page: i64,
    pub page_size: i64,
    pub total: i64,
    pub rows: Vec<T>,
}

impl<T> Page<T> {
    pub fn new(pagination: Pagination, total: i64, rows: Vec<T>) -> Self {
        Self {
            page: pagination.page,
            page_size: pagination.page_size,
            total,
            rows,
        }
    }
}
