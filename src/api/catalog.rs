//! Catalog (Sklad) Endpoints
//!
//! Unit list and the paginated, filterable stock listing behind the picker.

use leptos_autocomplete::{ready_query, with_query, DEFAULT_MIN_LENGTH};

use super::{get_json, ApiError};
use crate::models::{CatalogPage, UnitsResponse};

/// One catalog listing request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogQuery {
    pub page: u32,
    pub search: Option<String>,
    pub unit: Option<String>,
}

impl CatalogQuery {
    /// Search text shorter than the autocomplete minimum lists everything
    pub fn new(page: u32, search: &str, unit: &str) -> Self {
        let unit = unit.trim();
        Self {
            page: page.max(1),
            search: ready_query(search, DEFAULT_MIN_LENGTH),
            unit: (!unit.is_empty()).then(|| unit.to_string()),
        }
    }

    pub fn url(&self, base: &str) -> String {
        let page = self.page.to_string();
        let mut params = vec![("page", page.as_str())];
        if let Some(search) = &self.search {
            params.push(("search", search.as_str()));
        }
        if let Some(unit) = &self.unit {
            params.push(("unit", unit.as_str()));
        }
        with_query(base, &params)
    }
}

pub async fn fetch_units(url: &str) -> Result<Vec<String>, ApiError> {
    let response: UnitsResponse = get_json(url).await?;
    Ok(response.units)
}

pub async fn fetch_catalog_page(base: &str, query: &CatalogQuery) -> Result<CatalogPage, ApiError> {
    get_json(&query.url(base)).await
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE: &str = "/poruchki/sklad-modal-data/";

    #[test]
    fn test_plain_page() {
        let query = CatalogQuery::new(3, "", "");
        assert_eq!(query.url(BASE), "/poruchki/sklad-modal-data/?page=3");
    }

    #[test]
    fn test_short_search_is_not_sent() {
        let query = CatalogQuery::new(1, " ф ", "");
        assert_eq!(query.search, None);
        assert_eq!(query.url(BASE), "/poruchki/sklad-modal-data/?page=1");
    }

    #[test]
    fn test_search_and_unit() {
        let query = CatalogQuery::new(0, " oil filter ", "бр.");
        assert_eq!(query.page, 1);
        assert_eq!(query.url(BASE), "/poruchki/sklad-modal-data/?page=1&search=oil%20filter&unit=%D0%B1%D1%80.");
    }
}
