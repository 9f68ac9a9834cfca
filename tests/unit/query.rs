use sprintboard::config::PaginationConfig;
use sprintboard::error::AppError;
use sprintboard::query::{CollectionQuery, Page, resolve_query};

fn pagination() -> PaginationConfig {
    PaginationConfig {
        default_page_size: 25,
        max_page_size: 100,
    }
}

#[test]
fn oversized_page_size_is_clamped() {
    let raw = CollectionQuery {
        page_size: Some(1000),
        ..Default::default()
    };
    let query = resolve_query(&raw, &[], &pagination()).unwrap();
    assert_eq!(query.page_size, 100);
}

#[test]
fn unknown_ordering_is_a_client_error() {
    let raw = CollectionQuery {
        ordering: Some("nonexistent_field".to_string()),
        ..Default::default()
    };
    match resolve_query(&raw, &["end", "name"], &pagination()) {
        Err(AppError::Validation { errors }) => {
            assert_eq!(errors[0].field.as_deref(), Some("ordering"));
        }
        other => panic!("expected validation error, got {:?}", other.map(|_| ())),
    }
}

#[test]
fn page_metadata_walks_the_collection() {
    let raw = CollectionQuery {
        page: Some(2),
        page_size: Some(10),
        ..Default::default()
    };
    let query = resolve_query(&raw, &[], &pagination()).unwrap();

    let page = Page::new(vec![(); 10], 25, &query, "http://localhost:8000", "/tasks", &[]);
    assert_eq!(page.count, 25);
    assert!(page.next.as_deref().unwrap().contains("page=3"));
    assert!(page.previous.as_deref().unwrap().contains("page=1"));
}
