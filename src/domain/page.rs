use serde::{Deserialize, Serialize};

/// One page of a listing. The four count fields are always present, even for
/// an empty result; they are computed by the backend, not checked here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: u64,
    pub page: u32,
    pub per_page: u32,
    pub total_pages: u32,
}

impl<T> Page<T> {
    pub fn single(item: T, page: u32, per_page: u32) -> Self {
        Self {
            items: vec![item],
            total: 1,
            page,
            per_page,
            total_pages: 1,
        }
    }
}

/// Generic filter parameters shared by scraper and workflow listings.
#[derive(Debug, Clone, Default)]
pub struct ListParams {
    pub page: Option<u32>,
    pub per_page: Option<u32>,
    pub search: Option<String>,
}

impl ListParams {
    pub fn to_query(&self) -> Vec<(String, String)> {
        let mut query = Vec::new();
        if let Some(page) = self.page {
            query.push(("page".to_string(), page.to_string()));
        }
        if let Some(per_page) = self.per_page {
            query.push(("per_page".to_string(), per_page.to_string()));
        }
        if let Some(search) = &self.search {
            query.push(("search".to_string(), search.clone()));
        }
        query
    }
}
