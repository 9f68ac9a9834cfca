use serde::{Deserialize, Serialize};

use crate::config::PaginationConfig;
use crate::db::models::api::error_codes;
use crate::error::AppError;

/// Raw listing parameters as they arrive on the query string.
#[derive(Deserialize, Default, Clone, Debug)]
pub struct CollectionQuery {
    pub search: Option<String>,
    pub ordering: Option<String>,
    pub page: Option<i64>,
    pub page_size: Option<i64>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OrderBy {
    pub field: String,
    pub descending: bool,
}

/// Listing parameters after allowlist checks and page-size clamping.
#[derive(Clone, Debug)]
pub struct ResolvedQuery {
    pub search: Option<String>,
    pub ordering: Vec<OrderBy>,
    ordering_raw: Option<String>,
    pub page: i64,
    pub page_size: i64,
}

impl ResolvedQuery {
    pub fn offset(&self) -> i64 {
        (self.page - 1) * self.page_size
    }
}

/// Validates `ordering` against the entity's allowlist and clamps
/// `page_size`. An unrecognized ordering field is a client error, never
/// silently dropped; an oversized `page_size` is clamped, never rejected.
pub fn resolve_query(
    raw: &CollectionQuery,
    allowed_ordering: &[&str],
    pagination: &PaginationConfig,
) -> Result<ResolvedQuery, AppError> {
    let page = raw.page.unwrap_or(1).max(1);
    let page_size = raw
        .page_size
        .unwrap_or(pagination.default_page_size)
        .clamp(1, pagination.max_page_size);

    let search = raw
        .search
        .as_ref()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty());

    let mut ordering = Vec::new();
    if let Some(fields) = raw.ordering.as_ref().filter(|s| !s.trim().is_empty()) {
        for part in fields.split(',') {
            let part = part.trim();
            let (field, descending) = match part.strip_prefix('-') {
                Some(rest) => (rest, true),
                None => (part, false),
            };
            if field.is_empty() || !allowed_ordering.contains(&field) {
                return Err(AppError::validation(
                    Some("ordering"),
                    error_codes::QUERY_BAD_ORDERING,
                    format!("Cannot order by unknown field: {}", part),
                ));
            }
            ordering.push(OrderBy {
                field: field.to_string(),
                descending,
            });
        }
    }

    Ok(ResolvedQuery {
        search,
        ordering,
        ordering_raw: raw.ordering.clone().filter(|s| !s.trim().is_empty()),
        page,
        page_size,
    })
}

/// One page of a collection plus the metadata needed to walk it.
#[derive(Serialize, Debug)]
pub struct Page<T> {
    pub count: i64,
    pub next: Option<String>,
    pub previous: Option<String>,
    pub results: Vec<T>,
}

impl<T> Page<T> {
    pub fn new(
        results: Vec<T>,
        count: i64,
        query: &ResolvedQuery,
        base_url: &str,
        path: &str,
        extra_params: &[(&str, String)],
    ) -> Self {
        let has_next = query.offset() + query.page_size < count;
        let next = has_next
            .then(|| page_url(base_url, path, query, extra_params, query.page + 1))
            .flatten();
        let previous = (query.page > 1)
            .then(|| page_url(base_url, path, query, extra_params, query.page - 1))
            .flatten();

        Self {
            count,
            next,
            previous,
            results,
        }
    }
}

fn page_url(
    base_url: &str,
    path: &str,
    query: &ResolvedQuery,
    extra_params: &[(&str, String)],
    page: i64,
) -> Option<String> {
    let mut url = url::Url::parse(base_url).ok()?;
    url.set_path(path);
    {
        let mut pairs = url.query_pairs_mut();
        for (key, value) in extra_params {
            pairs.append_pair(key, value);
        }
        if let Some(search) = &query.search {
            pairs.append_pair("search", search);
        }
        if let Some(ordering) = &query.ordering_raw {
            pairs.append_pair("ordering", ordering);
        }
        pairs.append_pair("page", &page.to_string());
        pairs.append_pair("page_size", &query.page_size.to_string());
    }
    Some(url.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pagination() -> PaginationConfig {
        PaginationConfig {
            default_page_size: 25,
            max_page_size: 100,
        }
    }

    fn raw(ordering: Option<&str>, page: Option<i64>, page_size: Option<i64>) -> CollectionQuery {
        CollectionQuery {
            search: None,
            ordering: ordering.map(|s| s.to_string()),
            page,
            page_size,
        }
    }

    #[test]
    fn defaults_applied() {
        let q = resolve_query(&raw(None, None, None), &["name"], &pagination()).unwrap();
        assert_eq!(q.page, 1);
        assert_eq!(q.page_size, 25);
        assert!(q.ordering.is_empty());
    }

    #[test]
    fn page_size_is_clamped_not_rejected() {
        let q = resolve_query(&raw(None, None, Some(500)), &["name"], &pagination()).unwrap();
        assert_eq!(q.page_size, 100);

        let q = resolve_query(&raw(None, None, Some(0)), &["name"], &pagination()).unwrap();
        assert_eq!(q.page_size, 1);
    }

    #[test]
    fn unknown_ordering_field_is_rejected() {
        let err = resolve_query(
            &raw(Some("nonexistent_field"), None, None),
            &["name", "end"],
            &pagination(),
        );
        assert!(matches!(err, Err(AppError::Validation { .. })));
    }

    #[test]
    fn ordering_parses_direction_and_multiple_fields() {
        let q = resolve_query(&raw(Some("-end,name"), None, None), &["name", "end"], &pagination())
            .unwrap();
        assert_eq!(
            q.ordering,
            vec![
                OrderBy {
                    field: "end".to_string(),
                    descending: true
                },
                OrderBy {
                    field: "name".to_string(),
                    descending: false
                },
            ]
        );
    }

    #[test]
    fn page_links_preserve_query_params() {
        let mut q = resolve_query(
            &raw(Some("-end"), Some(2), Some(10)),
            &["end"],
            &pagination(),
        )
        .unwrap();
        q.search = Some("alpha".to_string());

        let page = Page::new(vec![(); 10], 35, &q, "http://api.example.com", "/sprints", &[]);
        assert_eq!(page.count, 35);
        let next = page.next.unwrap();
        assert!(next.starts_with("http://api.example.com/sprints?"));
        assert!(next.contains("search=alpha"));
        assert!(next.contains("ordering=-end"));
        assert!(next.contains("page=3"));
        assert!(next.contains("page_size=10"));
        assert!(page.previous.unwrap().contains("page=1"));
    }

    #[test]
    fn first_and_last_pages_have_no_dangling_links() {
        let q = resolve_query(&raw(None, None, Some(10)), &[], &pagination()).unwrap();
        let page = Page::new(vec![(); 7], 7, &q, "http://localhost:8000", "/tasks", &[]);
        assert!(page.next.is_none());
        assert!(page.previous.is_none());
    }

    #[test]
    fn filter_params_carried_into_links() {
        let q = resolve_query(&raw(None, Some(1), Some(5)), &[], &pagination()).unwrap();
        let page = Page::new(
            vec![(); 5],
            12,
            &q,
            "http://localhost:8000",
            "/tasks",
            &[("assigned", "alice".to_string())],
        );
        assert!(page.next.unwrap().contains("assigned=alice"));
    }
}
