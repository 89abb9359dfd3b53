use serde::{Deserialize, Deserializer, Serialize};
use utoipa::ToSchema;

fn deserialize_optional_i64<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let s: Option<String> = Option::deserialize(deserializer)?;
    match s {
        Some(s) if s.is_empty() => Ok(None),
        Some(s) => s.parse::<i64>().map(Some).map_err(serde::de::Error::custom),
        None => Ok(None),
    }
}

/// Page-based pagination query parameters.
///
/// Both fields tolerate empty strings (`?page=&limit=`), which are treated
/// as absent.
#[derive(Debug, Deserialize, ToSchema)]
pub struct PaginationParams {
    #[serde(default, deserialize_with = "deserialize_optional_i64")]
    pub page: Option<i64>,
    #[serde(default, deserialize_with = "deserialize_optional_i64")]
    pub limit: Option<i64>,
}

impl Default for PaginationParams {
    fn default() -> Self {
        Self {
            page: Some(1),
            limit: Some(10),
        }
    }
}

impl PaginationParams {
    pub fn page(&self) -> i64 {
        self.page.unwrap_or(1).max(1)
    }

    pub fn limit(&self) -> i64 {
        self.limit.unwrap_or(10).clamp(1, 100)
    }

    pub fn offset(&self) -> i64 {
        (self.page() - 1) * self.limit()
    }
}

/// Pagination block included in every list response.
#[derive(Debug, Serialize, ToSchema)]
pub struct PaginationMeta {
    pub current_page: i64,
    pub total_page: i64,
    pub per_page: i64,
    pub total_data: i64,
}

impl PaginationMeta {
    /// `total_page` is at least 1, even for an empty result set.
    pub fn new(current_page: i64, per_page: i64, total_data: i64) -> Self {
        let total_page = (total_data + per_page - 1) / per_page;
        Self {
            current_page,
            total_page: total_page.max(1),
            per_page,
            total_data,
        }
    }
}
