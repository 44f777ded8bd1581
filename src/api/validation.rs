use serde::Deserialize;

use super::ApiError;
use crate::config::ApiConfig;
use crate::db::ListParams;

pub fn validate_id(id: i32) -> Result<i32, ApiError> {
    if id <= 0 {
        return Err(ApiError::validation(format!(
            "Invalid ID: {id}. ID must be a positive integer"
        )));
    }
    Ok(id)
}

/// Query string of a collection request.
#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    pub search: Option<String>,
    pub ordering: Option<String>,
    pub page: Option<u64>,
    pub page_size: Option<u64>,
}

impl ListQuery {
    /// Resolves the paging defaults; `page_size` is capped at the configured maximum.
    pub fn into_params(self, api: &ApiConfig) -> Result<ListParams, ApiError> {
        let page = self.page.unwrap_or(1);
        if page == 0 {
            return Err(ApiError::NotFound("Invalid page.".to_string()));
        }

        let page_size = match self.page_size {
            Some(0) | None => api.default_page_size,
            Some(size) => size.min(api.max_page_size),
        };

        let search = self
            .search
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty());

        Ok(ListParams {
            search,
            ordering: self.ordering,
            page,
            page_size,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_id() {
        assert!(validate_id(1).is_ok());
        assert!(validate_id(12345).is_ok());
        assert!(validate_id(0).is_err());
        assert!(validate_id(-1).is_err());
    }

    #[test]
    fn test_list_query_defaults() {
        let params = ListQuery::default()
            .into_params(&ApiConfig::default())
            .unwrap();
        assert_eq!(params.page, 1);
        assert_eq!(params.page_size, 20);
        assert!(params.search.is_none());
    }

    #[test]
    fn test_list_query_caps_page_size() {
        let query = ListQuery {
            page_size: Some(5000),
            search: Some("   ".to_string()),
            ..ListQuery::default()
        };
        let params = query.into_params(&ApiConfig::default()).unwrap();
        assert_eq!(params.page_size, 100);
        assert!(params.search.is_none());
    }

    #[test]
    fn test_list_query_rejects_page_zero() {
        let query = ListQuery {
            page: Some(0),
            ..ListQuery::default()
        };
        assert!(query.into_params(&ApiConfig::default()).is_err());
    }
}
