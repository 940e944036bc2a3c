//! End-to-end flows against an in-memory backend.
//!
//! The backend speaks the real wire format: calls are built with the same
//! `HttpCall` builders the Zellij client uses, and answers go back through
//! `decode_web_result` with the call's context, as the plugin runtime wires
//! them.

use std::collections::VecDeque;

use rstest::{fixture, rstest};

use crate::api::{decode_web_result, BookApi, HttpCall, HttpMethod, Operation};
use crate::app::{handle_event, Action, AppState, Event, FormKind, InputMode};
use crate::domain::{filter_books, Book, BookDraft, BookId, Result};
use crate::ui::Theme;

const BASE_URL: &str = "http://books.test";

#[derive(Default)]
struct InMemoryBackend {
    books: Vec<Book>,
    next_id: u32,
    failing: Option<Operation>,
    sent: Vec<HttpCall>,
    inbox: VecDeque<Event>,
}

impl InMemoryBackend {
    fn with_books(books: Vec<Book>) -> Self {
        Self {
            next_id: 2,
            books,
            ..Self::default()
        }
    }

    fn respond(&mut self, call: HttpCall, status: u16, body: Vec<u8>) {
        let response = decode_web_result(status, &body, &call.context)
            .expect("bookdesk context is always recognised");
        self.sent.push(call);
        self.inbox.push_back(Event::Api(response));
    }

    fn fails(&self, operation: Operation) -> bool {
        self.failing == Some(operation)
    }
}

impl BookApi for InMemoryBackend {
    fn fetch_books(&mut self) -> Result<()> {
        let call = HttpCall::fetch_books(BASE_URL);
        let body = serde_json::to_vec(&self.books)?;
        self.respond(call, 200, body);
        Ok(())
    }

    fn create_book(&mut self, draft: &BookDraft) -> Result<()> {
        let call = HttpCall::create_book(BASE_URL, draft)?;
        if self.fails(Operation::CreateBook) {
            self.respond(call, 500, b"{}".to_vec());
            return Ok(());
        }
        let book = Book::from_draft(BookId::new(self.next_id.to_string()), draft.clone());
        self.next_id += 1;
        self.books.push(book.clone());
        let body = serde_json::to_vec(&book)?;
        self.respond(call, 201, body);
        Ok(())
    }

    fn update_book(&mut self, book: &Book) -> Result<()> {
        let call = HttpCall::update_book(BASE_URL, book)?;
        if self.fails(Operation::UpdateBook) {
            self.respond(call, 500, b"{\"detail\":\"boom\"}".to_vec());
            return Ok(());
        }
        if let Some(stored) = self.books.iter_mut().find(|b| b.id == book.id) {
            *stored = book.clone();
        }
        let body = serde_json::to_vec(book)?;
        self.respond(call, 200, body);
        Ok(())
    }

    fn delete_book(&mut self, id: &BookId) -> Result<()> {
        let call = HttpCall::delete_book(BASE_URL, id);
        if self.fails(Operation::DeleteBook) {
            self.respond(call, 404, Vec::new());
            return Ok(());
        }
        self.books.retain(|b| &b.id != id);
        self.respond(call, 204, Vec::new());
        Ok(())
    }
}

struct Harness {
    state: AppState,
    backend: InMemoryBackend,
}

impl Harness {
    /// Handles `event`, dispatches its requests and feeds every answer back.
    fn send(&mut self, event: Event) {
        let mut queue = VecDeque::from([event]);
        while let Some(event) = queue.pop_front() {
            let (_, actions) = handle_event(&mut self.state, &event).unwrap();
            for action in actions {
                if let Action::Request(request) = action {
                    request.dispatch(&mut self.backend).unwrap();
                }
            }
            queue.extend(self.backend.inbox.drain(..));
        }
    }

    fn type_text(&mut self, text: &str) {
        for c in text.chars() {
            self.send(Event::Char(c));
        }
    }

    fn clear_field(&mut self) {
        for _ in 0..16 {
            self.send(Event::Backspace);
        }
    }

    fn methods_sent(&self) -> Vec<HttpMethod> {
        self.backend.sent.iter().map(|call| call.method).collect()
    }
}

fn dune() -> Book {
    Book {
        id: BookId::new("1"),
        title: "Dune".to_string(),
        author: "Herbert".to_string(),
        published_year: 1965,
        price: 10.0,
    }
}

#[fixture]
fn harness() -> Harness {
    let mut harness = Harness {
        state: AppState::new(Theme::default()),
        backend: InMemoryBackend::with_books(vec![dune()]),
    };
    harness.send(Event::PermissionsResult { granted: true });
    harness
}

#[rstest]
fn permission_grant_loads_the_collection(harness: Harness) {
    assert_eq!(harness.state.books, vec![dune()]);
    assert!(!harness.state.loading);
    assert_eq!(harness.methods_sent(), vec![HttpMethod::Get]);
    assert_eq!(harness.backend.sent[0].url, "http://books.test/books/");
}

#[rstest]
#[case("dune", 1)]
#[case("1965", 1)]
#[case("zzz", 0)]
fn search_filters_the_loaded_list(mut harness: Harness, #[case] query: &str, #[case] expected: usize) {
    assert_eq!(filter_books(&harness.state.books, query).len(), expected);

    harness.send(Event::SearchMode);
    harness.type_text(query);
    assert_eq!(harness.state.filtered_books.len(), expected);
}

#[rstest]
fn create_appends_exactly_the_server_record(mut harness: Harness) {
    harness.send(Event::OpenCreateForm);
    harness.type_text("Emma");
    harness.send(Event::NextField);
    harness.type_text("Austen");
    harness.send(Event::NextField);
    harness.clear_field();
    harness.type_text("1815");
    harness.send(Event::NextField);
    harness.clear_field();
    harness.type_text("7.5");
    harness.send(Event::Submit);

    let created = Book {
        id: BookId::new("2"),
        title: "Emma".to_string(),
        author: "Austen".to_string(),
        published_year: 1815,
        price: 7.5,
    };
    assert_eq!(harness.state.books, vec![dune(), created]);
    assert_eq!(harness.state.input_mode, InputMode::Normal);
    assert!(harness.state.create_form.title.is_empty());

    let post = &harness.backend.sent[1];
    assert_eq!(post.method, HttpMethod::Post);
    let body: serde_json::Value = serde_json::from_slice(&post.body).unwrap();
    assert_eq!(body["title"], "Emma");
    assert!(body.get("id").is_none());
}

#[rstest]
fn failed_create_keeps_form_open_and_list_unchanged(mut harness: Harness) {
    harness.backend.failing = Some(Operation::CreateBook);
    harness.send(Event::OpenCreateForm);
    harness.type_text("Emma");
    harness.send(Event::NextField);
    harness.type_text("Austen");
    harness.send(Event::Submit);

    assert_eq!(harness.state.books, vec![dune()]);
    assert_eq!(harness.state.input_mode, InputMode::Form(FormKind::Create));
    assert_eq!(harness.state.create_form.title, "Emma");
}

#[rstest]
fn edit_with_future_year_is_rejected_locally(mut harness: Harness) {
    harness.send(Event::EditSelected);
    harness.send(Event::NextField);
    harness.send(Event::NextField);
    harness.clear_field();
    harness.type_text("3000");
    harness.send(Event::Submit);

    assert_eq!(harness.methods_sent(), vec![HttpMethod::Get]);
    assert_eq!(harness.state.input_mode, InputMode::Form(FormKind::Edit));
    let session = harness.state.editing.as_ref().unwrap();
    assert!(session.form.notice.as_deref().unwrap().contains("3000"));
    assert_eq!(harness.state.books, vec![dune()]);
}

#[rstest]
fn successful_edit_replaces_record_and_closes_modal(mut harness: Harness) {
    harness.send(Event::EditSelected);
    harness.type_text(" Messiah");
    harness.send(Event::Submit);

    let put = &harness.backend.sent[1];
    assert_eq!(put.method, HttpMethod::Put);
    assert_eq!(put.url, "http://books.test/books/1");
    assert_eq!(harness.state.books[0].title, "Dune Messiah");
    assert!(harness.state.editing.is_none());
    assert_eq!(harness.state.input_mode, InputMode::Normal);
}

#[rstest]
fn failed_update_keeps_list_and_unsaved_edits(mut harness: Harness) {
    harness.backend.failing = Some(Operation::UpdateBook);
    harness.send(Event::EditSelected);
    harness.type_text(" Messiah");
    harness.send(Event::Submit);

    assert_eq!(harness.methods_sent(), vec![HttpMethod::Get, HttpMethod::Put]);
    assert_eq!(harness.state.books, vec![dune()]);
    assert_eq!(harness.state.input_mode, InputMode::Form(FormKind::Edit));
    let session = harness.state.editing.as_ref().unwrap();
    assert_eq!(session.form.title, "Dune Messiah");
}

#[rstest]
fn declined_delete_sends_nothing(mut harness: Harness) {
    harness.send(Event::DeleteSelected);
    assert_eq!(harness.state.input_mode, InputMode::ConfirmDelete);
    harness.send(Event::DeclineDelete);

    assert_eq!(harness.methods_sent(), vec![HttpMethod::Get]);
    assert_eq!(harness.state.books, vec![dune()]);
    assert_eq!(harness.state.input_mode, InputMode::Normal);
}

#[rstest]
#[case(false, 0)]
#[case(true, 1)]
fn confirmed_delete_follows_the_server(mut harness: Harness, #[case] fails: bool, #[case] remaining: usize) {
    if fails {
        harness.backend.failing = Some(Operation::DeleteBook);
    }
    harness.send(Event::DeleteSelected);
    harness.send(Event::ConfirmDelete);

    assert_eq!(harness.methods_sent(), vec![HttpMethod::Get, HttpMethod::Delete]);
    assert_eq!(harness.state.books.len(), remaining);
    assert_eq!(harness.state.filtered_books.len(), remaining);
}

#[rstest]
fn refresh_picks_up_server_side_changes(mut harness: Harness) {
    harness.backend.books.push(Book {
        id: BookId::new("9"),
        title: "Emma".to_string(),
        author: "Austen".to_string(),
        published_year: 1815,
        price: 7.5,
    });
    harness.send(Event::Refresh);

    assert_eq!(harness.state.books.len(), 2);
    assert_eq!(harness.methods_sent(), vec![HttpMethod::Get, HttpMethod::Get]);
}
