//! Hook behaviour driven through a scripted transport.

use super::{BookHook, BooksHook, ReviewsHook, ReviewsQuery};
use crate::catalog::Catalog;
use crate::client::CatalogClient;
use crate::http::HttpResponse;
use crate::pagination::PaginationParams;
use crate::testing::ScriptedTransport;

fn catalog() -> Catalog<ScriptedTransport> {
    Catalog::new(CatalogClient::new("http://api"), ScriptedTransport::new())
}

fn book_json(id: i64, title: &str) -> String {
    format!(r#"{{"id":{id},"title":"{title}","author":"Someone","created_at":"2024-05-01T09:00:00"}}"#)
}

fn reviews_json(book_id: i64, count: usize) -> String {
    let reviews: Vec<String> = (1..=count)
        .map(|i| {
            format!(
                r#"{{"id":{i},"book_id":{book_id},"reviewer_name":"R{i}","rating":5,"created_at":"2024-05-01T09:00:00"}}"#
            )
        })
        .collect();
    format!(
        r#"{{"id":{book_id},"title":"T","author":"A","created_at":"2024-05-01T09:00:00","reviews":[{}]}}"#,
        reviews.join(",")
    )
}

#[test]
fn page_params_reach_the_list_endpoint_unchanged() {
    let catalog = catalog();
    let mut hook = BooksHook::new(PaginationParams::for_page(1, 10));
    for page in 1..=4u32 {
        catalog.transport().respond(200, "[]");
        assert!(hook.sync_and_run(&catalog, PaginationParams::for_page(page, 10), 0));
    }
    let skips: Vec<String> = catalog
        .transport()
        .requests()
        .iter()
        .map(|r| format!("{}/{}", r.query_value("skip").unwrap(), r.query_value("limit").unwrap()))
        .collect();
    assert_eq!(skips, vec!["0/10", "10/10", "20/10", "30/10"]);
}

#[test]
fn refresh_token_and_refetch_each_trigger_one_cycle() {
    let catalog = catalog();
    let params = PaginationParams::for_page(1, 10);
    let mut hook = BooksHook::new(params);

    catalog.transport().respond(200, "[]");
    hook.sync_and_run(&catalog, params, 0);
    assert_eq!(catalog.transport().requests().len(), 1);

    // Same key: nothing happens.
    assert!(!hook.sync_and_run(&catalog, params, 0));
    assert_eq!(catalog.transport().requests().len(), 1);

    // Bumped token: exactly one more.
    catalog.transport().respond(200, "[]");
    hook.sync_and_run(&catalog, params, 1);
    assert_eq!(catalog.transport().requests().len(), 2);

    // Manual refetch, twice.
    catalog.transport().respond(200, "[]").respond(200, "[]");
    hook.refetch_and_run(&catalog);
    hook.refetch_and_run(&catalog);
    assert_eq!(catalog.transport().requests().len(), 4);
}

#[test]
fn empty_list_is_success_not_error() {
    let catalog = catalog();
    let mut hook = BooksHook::new(PaginationParams::for_page(1, 10));
    catalog.transport().respond(200, "[]");
    hook.refetch_and_run(&catalog);
    assert!(!hook.loading());
    assert!(hook.error().is_none());
    assert!(hook.books().is_empty());
}

#[test]
fn network_error_on_get_book() {
    let catalog = catalog();
    let mut hook = BookHook::new(0);
    catalog.transport().fail("connection reset");
    hook.sync_and_run(&catalog, 42, 0);
    assert!(!hook.loading());
    assert_eq!(hook.error(), Some("Failed to fetch book details"));
    assert!(hook.data().is_none());
}

#[test]
fn out_of_order_completion_keeps_latest_request() {
    let catalog = catalog();
    let client = catalog.client();
    let mut hook = BookHook::new(0);

    let first = hook.sync(client, 1, 0).unwrap();
    let second = hook.sync(client, 2, 0).unwrap();

    // The newer request finishes first; the older one straggles in after.
    assert!(hook.complete(client, second, Ok(HttpResponse::new(200, book_json(2, "Emma")))));
    assert!(!hook.complete(client, first, Ok(HttpResponse::new(200, book_json(1, "Dune")))));
    assert_eq!(hook.data().unwrap().title, "Emma");
}

#[test]
fn in_order_completion_commits_each_result() {
    let catalog = catalog();
    let client = catalog.client();
    let mut hook = BookHook::new(0);

    let first = hook.sync(client, 1, 0).unwrap();
    assert!(hook.complete(client, first, Ok(HttpResponse::new(200, book_json(1, "Dune")))));
    let second = hook.sync(client, 2, 0).unwrap();
    assert!(hook.complete(client, second, Ok(HttpResponse::new(200, book_json(2, "Emma")))));
    assert_eq!(hook.data().unwrap().id, 2);
}

#[test]
fn missing_book_id_never_fetches() {
    let catalog = catalog();
    let mut hook = ReviewsHook::new(ReviewsQuery {
        book_id: 0,
        page: PaginationParams::for_page(1, 5),
    });
    assert!(!hook.refetch_and_run(&catalog));
    assert!(hook.loading());
    assert!(catalog.transport().requests().is_empty());
}

#[test]
fn review_total_tracks_returned_collection() {
    let catalog = catalog();
    let query = ReviewsQuery {
        book_id: 3,
        page: PaginationParams::for_page(1, 5),
    };
    let mut hook = ReviewsHook::new(query);

    // Server returns every review in one collection.
    catalog.transport().respond(200, reviews_json(3, 7));
    hook.sync_and_run(&catalog, query, 0);
    assert_eq!(hook.total(), 7);

    // Server returns only the visible page.
    catalog.transport().respond(200, reviews_json(3, 5));
    hook.sync_and_run(&catalog, query, 1);
    assert_eq!(hook.total(), 5);
}

#[test]
fn review_failure_uses_review_message() {
    let catalog = catalog();
    let query = ReviewsQuery {
        book_id: 3,
        page: PaginationParams::for_page(1, 5),
    };
    let mut hook = ReviewsHook::new(query);
    catalog.transport().respond(404, r#"{"detail":"Book not found"}"#);
    hook.sync_and_run(&catalog, query, 0);
    assert_eq!(hook.error(), Some("Failed to fetch reviews"));
    assert_eq!(hook.total(), 0);
}
