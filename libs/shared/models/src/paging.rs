use serde::{Deserialize, Serialize};

/// Paged list envelope returned by the manager API's customer and dentist
/// list routes. Older deployments spell the fields `data`/`total`, current
/// ones `items`/`totalCount`; accept both.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Paged<T> {
    #[serde(alias = "data", default = "Vec::new")]
    pub items: Vec<T>,

    #[serde(alias = "total", default)]
    pub total_count: i64,
}

impl<T> Default for Paged<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            total_count: 0,
        }
    }
}

impl<T> Paged<T> {
    pub fn total_pages(&self, page_size: i64) -> i64 {
        if page_size <= 0 {
            return 0;
        }
        (self.total_count + page_size - 1) / page_size
    }
}
