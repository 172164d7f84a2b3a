//! Full book/review lifecycle against the live mock server.
//!
//! # Design
//! Starts the mock server on a random port, then drives `Catalog` and the
//! fetch hooks over real HTTP using a ureq-backed `Transport`. Validates that
//! request building and response parsing work end-to-end with the actual
//! server schema.

use bookshelf_core::{
    ApiError, BookFormData, BookHook, BooksHook, Catalog, CatalogClient, HttpMethod, HttpRequest, HttpResponse,
    PaginationParams, ReviewFormData, ReviewsHook, ReviewsQuery, Transport,
};

/// Executes requests with ureq, returning 4xx/5xx responses as data so the
/// client can interpret them.
struct UreqTransport {
    agent: ureq::Agent,
}

impl UreqTransport {
    fn new() -> Self {
        let agent = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .build()
            .new_agent();
        Self { agent }
    }
}

impl Transport for UreqTransport {
    fn execute(&self, req: &HttpRequest) -> Result<HttpResponse, ApiError> {
        let url = req.full_url();
        let result = match (req.method, req.body.as_deref()) {
            (HttpMethod::Get, _) => self.agent.get(&url).call(),
            (HttpMethod::Delete, _) => self.agent.delete(&url).call(),
            (HttpMethod::Post, Some(body)) => self
                .agent
                .post(&url)
                .content_type("application/json")
                .send(body.as_bytes()),
            (HttpMethod::Post, None) => self.agent.post(&url).send_empty(),
            (HttpMethod::Put, Some(body)) => self
                .agent
                .put(&url)
                .content_type("application/json")
                .send(body.as_bytes()),
            (HttpMethod::Put, None) => self.agent.put(&url).send_empty(),
        };
        let mut response = result.map_err(|e| ApiError::Transport(e.to_string()))?;
        let status = response.status().as_u16();
        let body = response.body_mut().read_to_string().unwrap_or_default();
        Ok(HttpResponse::new(status, body))
    }
}

fn start_server() -> std::net::SocketAddr {
    let std_listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = std_listener.local_addr().unwrap();
    std_listener.set_nonblocking(true).unwrap();

    std::thread::spawn(move || {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        rt.block_on(async {
            let listener = tokio::net::TcpListener::from_std(std_listener).unwrap();
            mock_server::run(listener).await
        })
        .unwrap();
    });

    addr
}

fn api_root(addr: std::net::SocketAddr) -> String {
    format!("http://{addr}{}", mock_server::API_PREFIX)
}

fn book_form(title: &str) -> BookFormData {
    BookFormData {
        title: title.to_string(),
        author: "Frank Herbert".to_string(),
        ..Default::default()
    }
}

#[test]
fn catalog_lifecycle() {
    let addr = start_server();
    let catalog = Catalog::new(CatalogClient::new(&api_root(addr)), UreqTransport::new());
    let first_page = PaginationParams::for_page(1, 10);

    // Step 1: list is empty.
    assert!(catalog.list_books(first_page).unwrap().is_empty());

    // Step 2: create two books.
    let dune = catalog.create_book(&book_form("Dune")).unwrap();
    assert_eq!(dune.title, "Dune");
    let messiah = catalog.create_book(&book_form("Dune Messiah")).unwrap();

    // Step 3: pagination reaches the server unchanged.
    let page_two = catalog.list_books(PaginationParams::for_page(2, 1)).unwrap();
    assert_eq!(page_two.len(), 1);
    assert_eq!(page_two[0].id, messiah.id);

    // Step 4: update.
    let mut form = book_form("Dune");
    form.publication_year = Some(1965);
    let updated = catalog.update_book(dune.id, &form).unwrap();
    assert_eq!(updated.publication_year, Some(1965));
    assert!(updated.updated_at.is_some());

    // Step 5: reviews.
    let review = catalog
        .create_review(
            dune.id,
            &ReviewFormData {
                reviewer_name: "Ann".to_string(),
                rating: 5,
                comment: Some("Spice must flow".to_string()),
            },
        )
        .unwrap();
    assert_eq!(review.book_id, dune.id);
    assert_eq!(catalog.get_review(review.id).unwrap().rating, 5);

    let edited = catalog
        .update_review(
            review.id,
            &ReviewFormData {
                reviewer_name: "Ann".to_string(),
                rating: 3,
                comment: None,
            },
        )
        .unwrap();
    assert_eq!(edited.rating, 3);
    assert!(edited.is_edited());

    let page = catalog.list_reviews(dune.id, PaginationParams::for_page(1, 5)).unwrap();
    assert_eq!(page.book.id, dune.id);
    assert_eq!(page.reviews.len(), 1);

    // Step 6: delete the review; it is gone on the next fetch.
    catalog.delete_review(review.id).unwrap();
    let page = catalog.list_reviews(dune.id, PaginationParams::for_page(1, 5)).unwrap();
    assert!(page.reviews.is_empty());

    // Step 7: delete the book; it disappears from the list and 404s.
    catalog.delete_book(dune.id).unwrap();
    let books = catalog.list_books(first_page).unwrap();
    assert!(books.iter().all(|b| b.id != dune.id));
    assert!(matches!(catalog.get_book(dune.id), Err(ApiError::NotFound)));
    assert!(matches!(catalog.delete_book(dune.id), Err(ApiError::NotFound)));

    // Step 8: server-side validation surfaces as an HTTP error.
    let mut bad = book_form("Children of Dune");
    bad.isbn = Some("0441172717".to_string());
    catalog.create_book(&bad).unwrap();
    let err = catalog.create_book(&bad).unwrap_err();
    assert!(matches!(err, ApiError::Http { status: 400, .. }));
}

#[test]
fn hooks_against_live_server() {
    let addr = start_server();
    let catalog = Catalog::new(CatalogClient::new(&api_root(addr)), UreqTransport::new());
    let book = catalog.create_book(&book_form("Dune")).unwrap();
    for n in 0..7 {
        catalog
            .create_review(
                book.id,
                &ReviewFormData {
                    reviewer_name: format!("Reader {n}"),
                    rating: 4,
                    comment: None,
                },
            )
            .unwrap();
    }

    let mut books = BooksHook::new(PaginationParams::for_page(1, 10));
    assert!(books.sync_and_run(&catalog, PaginationParams::for_page(1, 10), 0));
    assert_eq!(books.books().len(), 1);

    let mut detail = BookHook::new(0);
    assert!(detail.sync_and_run(&catalog, book.id, 0));
    assert_eq!(detail.data().unwrap().title, "Dune");

    // The server embeds all seven reviews, so the total is seven even at
    // page size five.
    let query = ReviewsQuery {
        book_id: book.id,
        page: PaginationParams::for_page(1, 5),
    };
    let mut reviews = ReviewsHook::new(query);
    assert!(reviews.sync_and_run(&catalog, query, 0));
    assert_eq!(reviews.total(), 7);

    let mut missing = BookHook::new(0);
    missing.sync_and_run(&catalog, 9_999, 0);
    assert_eq!(missing.error(), Some("Failed to fetch book details"));
    assert!(missing.data().is_none());
}
