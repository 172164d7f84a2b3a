//! Integration tests for the bookshelf CLI
//!
//! Each test starts its own in-memory mock server on a random port and
//! points the binary at it with `--api-url`.

use assert_cmd::Command;
use predicates::prelude::*;

fn start_server() -> String {
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

    format!("http://{addr}{}", mock_server::API_PREFIX)
}

fn bookshelf(api: &str) -> Command {
    let mut cmd = Command::cargo_bin("bookshelf").unwrap();
    cmd.args(["--api-url", api]);
    cmd
}

fn add_dune(api: &str) {
    bookshelf(api)
        .args(["add-book", "--title", "Dune", "--author", "Frank Herbert", "--year", "1965"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Created book #1: Dune"));
}

#[test]
fn test_help() {
    let mut cmd = Command::cargo_bin("bookshelf").unwrap();
    cmd.arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage:"))
        .stdout(predicate::str::contains("open"))
        .stdout(predicate::str::contains("add-book"))
        .stdout(predicate::str::contains("delete-review"));
}

#[test]
fn test_empty_catalogue() {
    let api = start_server();
    bookshelf(&api)
        .arg("open")
        .assert()
        .success()
        .stdout(predicate::str::contains("0 books found"))
        .stdout(predicate::str::contains("No books found"));
}

#[test]
fn test_added_book_is_listed() {
    let api = start_server();
    add_dune(&api);
    bookshelf(&api)
        .args(["open", "/"])
        .assert()
        .success()
        .stdout(predicate::str::contains("1 book found"))
        .stdout(predicate::str::contains("#1 Dune by Frank Herbert"))
        .stdout(predicate::str::contains("Published: 1965"));
}

#[test]
fn test_invalid_book_is_rejected_locally() {
    let api = start_server();
    bookshelf(&api)
        .args(["add-book", "--author", "Nobody"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("title is required"));
    bookshelf(&api)
        .arg("open")
        .assert()
        .success()
        .stdout(predicate::str::contains("No books found"));
}

#[test]
fn test_reviews_on_detail_page() {
    let api = start_server();
    add_dune(&api);
    bookshelf(&api)
        .args(["open", "/books/1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No description provided."))
        .stdout(predicate::str::contains("No reviews yet"));

    bookshelf(&api)
        .args(["add-review", "1", "--name", "Ann", "--rating", "3", "--comment", "Sandy"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Added review #1 to book #1"));
    bookshelf(&api)
        .args(["edit-review", "1", "--rating", "4"])
        .assert()
        .success();
    bookshelf(&api)
        .args(["open", "/books/1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Reviews (1)"))
        .stdout(predicate::str::contains("★★★★☆ (4/5)"))
        .stdout(predicate::str::contains("Sandy"));
}

#[test]
fn test_edit_page_is_prefilled() {
    let api = start_server();
    add_dune(&api);
    bookshelf(&api)
        .args(["edit-book", "1", "--description", "Spice."])
        .assert()
        .success()
        .stdout(predicate::str::contains("Updated book #1: Dune"));
    bookshelf(&api)
        .args(["open", "/books/1/edit"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Edit Book"))
        .stdout(predicate::str::contains("Description: Spice."));
}

#[test]
fn test_delete_book_with_yes() {
    let api = start_server();
    add_dune(&api);
    bookshelf(&api)
        .args(["delete-book", "1", "--yes"])
        .assert()
        .success()
        .stdout(predicate::str::contains("-> /"))
        .stdout(predicate::str::contains("Deleted book #1"));
    bookshelf(&api)
        .arg("open")
        .assert()
        .success()
        .stdout(predicate::str::contains("No books found"));
}

#[test]
fn test_declined_delete_keeps_book() {
    let api = start_server();
    add_dune(&api);
    bookshelf(&api)
        .args(["delete-book", "1"])
        .write_stdin("n\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("This will also delete all reviews."))
        .stdout(predicate::str::contains("Cancelled"));
    bookshelf(&api)
        .arg("open")
        .assert()
        .success()
        .stdout(predicate::str::contains("#1 Dune"));
}

#[test]
fn test_delete_review_prompt_accepts_yes() {
    let api = start_server();
    add_dune(&api);
    bookshelf(&api)
        .args(["add-review", "1", "--name", "Ann", "--rating", "5"])
        .assert()
        .success();
    bookshelf(&api)
        .args(["delete-review", "1"])
        .write_stdin("y\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Are you sure you want to delete this review?"))
        .stdout(predicate::str::contains("Deleted review #1"));
}

#[test]
fn test_missing_book() {
    let api = start_server();
    bookshelf(&api)
        .args(["open", "/books/99"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("Failed to fetch book details"));
}

#[test]
fn test_unknown_route() {
    let api = start_server();
    bookshelf(&api)
        .args(["open", "/authors/1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no page matches"));
}

#[test]
fn test_page_size_out_of_range() {
    let api = start_server();
    bookshelf(&api)
        .args(["--page-size", "0", "open"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("page_size must be between 1 and 100"));
}

#[test]
fn test_unreachable_api_reports_failure() {
    bookshelf("http://127.0.0.1:9/api/v1")
        .arg("open")
        .assert()
        .failure()
        .stdout(predicate::str::contains("Error: Failed to fetch books"));
}
