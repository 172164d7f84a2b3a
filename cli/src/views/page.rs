use bookshelf_core::{BookHook, BookId, Catalog, Transport};

use super::{BookDetailView, BookFormView, BookListView};
use crate::router::Route;

/// `/books/{id}/edit`: fetch the book, then show the prefilled form.
#[derive(Debug)]
pub struct EditBookPage {
    hook: BookHook,
    book_id: BookId,
    form: Option<BookFormView>,
}

impl EditBookPage {
    pub fn new(book_id: BookId) -> Self {
        Self {
            hook: BookHook::new(book_id),
            book_id,
            form: None,
        }
    }

    pub fn load<T: Transport>(&mut self, catalog: &Catalog<T>) -> bool {
        let fetched = self.hook.sync_and_run(catalog, self.book_id, 0);
        if self.form.is_none() {
            self.form = self.hook.data().map(BookFormView::edit);
        }
        fetched
    }

    pub fn form_mut(&mut self) -> Option<&mut BookFormView> {
        self.form.as_mut()
    }

    pub fn render(&self) -> String {
        if self.hook.loading() {
            return "Loading book details...\n".to_string();
        }
        if let Some(error) = self.hook.error() {
            return format!("Error: {error}\n");
        }
        match &self.form {
            Some(form) => form.render(),
            None => "Book not found\n".to_string(),
        }
    }
}

/// Whatever page a route resolves to.
#[derive(Debug)]
pub enum Page {
    Home(BookListView),
    BookDetail(BookDetailView),
    AddBook(BookFormView),
    EditBook(EditBookPage),
}

impl Page {
    pub fn open(route: Route, page_size: u32) -> Self {
        match route {
            Route::Home => Page::Home(BookListView::new(page_size)),
            Route::NewBook => Page::AddBook(BookFormView::new()),
            Route::BookDetail(id) => Page::BookDetail(BookDetailView::new(id, page_size)),
            Route::EditBook(id) => Page::EditBook(EditBookPage::new(id)),
        }
    }

    pub fn load<T: Transport>(&mut self, catalog: &Catalog<T>) -> bool {
        match self {
            Page::Home(view) => view.load(catalog),
            Page::BookDetail(view) => view.load(catalog),
            Page::AddBook(_) => false,
            Page::EditBook(page) => page.load(catalog),
        }
    }

    /// The page's primary fetch error, if its main data failed to load.
    pub fn error(&self) -> Option<&str> {
        match self {
            Page::Home(view) => view.hook().error(),
            Page::BookDetail(view) => view.hook().error(),
            Page::AddBook(_) => None,
            Page::EditBook(page) => page.hook.error(),
        }
    }

    pub fn render(&self) -> String {
        match self {
            Page::Home(view) => view.render(),
            Page::BookDetail(view) => view.render(),
            Page::AddBook(form) => form.render(),
            Page::EditBook(page) => page.render(),
        }
    }
}
