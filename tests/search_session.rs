//! Whole search sessions driven through `handle_event`.
//!
//! `FakeImageApi` answers fetches from an in-memory table keyed by
//! `(query, page)`, producing the same HTTP status and JSON body the real
//! endpoint would. Responses go back through `decode_response`, so the
//! request and response halves of the API layer are exercised too.

use serde_json::json;
use std::collections::{BTreeMap, VecDeque};
use url::Url;
use zgallery::api::{decode_response, generation_from_context, FetchRequest};
use zgallery::app::display::{banner, Banner, FAILURE_MESSAGE};
use zgallery::app::ModalState;
use zgallery::ui::StatusLine;
use zgallery::{handle_event, initialize, Action, AppState, Config, Event, FetchError, InputMode};

#[derive(Default)]
struct FakeImageApi {
    responses: BTreeMap<(String, u32), (u16, Vec<u8>)>,
    requests: Vec<(String, u32)>,
}

impl FakeImageApi {
    fn page(mut self, query: &str, page: u32, ids: &[&str], total_pages: u32) -> Self {
        let results: Vec<_> = ids
            .iter()
            .map(|id| {
                json!({
                    "id": id,
                    "width": 1600,
                    "height": 900,
                    "alt_description": format!("{query} photo {id}"),
                    "description": null,
                    "urls": {
                        "small": format!("https://img.test/small/{id}"),
                        "regular": format!("https://img.test/regular/{id}"),
                    },
                    "user": { "name": "Test Photographer" },
                })
            })
            .collect();
        let body = json!({ "total_pages": total_pages, "results": results });
        self.responses
            .insert((query.to_string(), page), (200, body.to_string().into_bytes()));
        self
    }

    fn failing(mut self, query: &str, page: u32, status: u16, body: &str) -> Self {
        self.responses
            .insert((query.to_string(), page), (status, body.as_bytes().to_vec()));
        self
    }

    fn respond(&mut self, request: &FetchRequest) -> Event {
        let url = Url::parse(&request.url).unwrap();
        let params: BTreeMap<String, String> = url.query_pairs().into_owned().collect();
        let query = params["query"].clone();
        let page: u32 = params["page"].parse().unwrap();
        self.requests.push((query.clone(), page));

        let (status, body) = self
            .responses
            .get(&(query, page))
            .cloned()
            .unwrap_or((404, b"{\"errors\":[\"not found\"]}".to_vec()));

        Event::FetchSettled {
            generation: generation_from_context(&request.context).unwrap(),
            outcome: decode_response(status, &body),
        }
    }
}

struct Session {
    state: AppState,
    api: FakeImageApi,
    pending: VecDeque<FetchRequest>,
    timers_armed: usize,
    opened: Vec<(String, String)>,
}

impl Session {
    fn new(api: FakeImageApi) -> Self {
        let mut config = BTreeMap::new();
        config.insert("api_key".to_string(), "test-key".to_string());
        let state = initialize(&Config::from_zellij(&config));
        assert!(state.api.is_some());

        Self {
            state,
            api,
            pending: VecDeque::new(),
            timers_armed: 0,
            opened: Vec::new(),
        }
    }

    fn send(&mut self, event: Event) -> bool {
        let (render, actions) = handle_event(&mut self.state, &event).unwrap();
        for action in actions {
            match action {
                Action::Fetch(request) => self.pending.push_back(request),
                Action::ScheduleTimeout { .. } => self.timers_armed += 1,
                Action::OpenExternal { program, url } => self.opened.push((program, url)),
                Action::CloseFocus => {}
            }
        }
        render
    }

    /// Replaces whatever is in the search bar with `query` and presses Enter.
    fn search(&mut self, query: &str) {
        self.send(Event::FocusSearch);
        while !self.state.input.is_empty() {
            self.send(Event::Backspace);
        }
        for c in query.chars() {
            self.send(Event::Char(c));
        }
        self.send(Event::SubmitQuery);
    }

    /// Answers the oldest outstanding fetch; returns whether it was applied.
    fn resolve_oldest(&mut self) -> bool {
        let request = self.pending.pop_front().unwrap();
        let event = self.api.respond(&request);
        self.send(event)
    }

    fn ids(&self) -> Vec<&str> {
        self.state.search.items().iter().map(|item| item.id.as_str()).collect()
    }
}

#[test]
fn first_page_then_load_more_appends() {
    let api = FakeImageApi::default()
        .page("cats", 1, &["img1", "img2"], 3)
        .page("cats", 2, &["img3"], 3);
    let mut session = Session::new(api);

    session.search("cats");
    assert!(session.state.search.is_loading());
    assert!(session.resolve_oldest());

    assert_eq!(session.ids(), vec!["img1", "img2"]);
    assert!(session.state.search.has_more());
    assert!(!session.state.search.is_empty());

    session.send(Event::LoadMore);
    assert_eq!(session.state.search.page(), 2);
    assert!(session.resolve_oldest());

    assert_eq!(session.ids(), vec!["img1", "img2", "img3"]);
    assert!(session.state.search.has_more());
    assert_eq!(
        session.api.requests,
        vec![("cats".to_string(), 1), ("cats".to_string(), 2)]
    );
}

#[test]
fn has_more_tracks_reported_total_pages() {
    let api = FakeImageApi::default()
        .page("owls", 1, &["a", "b"], 2)
        .page("owls", 2, &["c"], 2);
    let mut session = Session::new(api);

    session.search("owls");
    session.resolve_oldest();
    assert!(session.state.search.has_more());

    session.send(Event::LoadMore);
    session.resolve_oldest();
    assert!(!session.state.search.has_more());
    assert_eq!(session.ids().len(), 3);

    session.send(Event::LoadMore);
    assert!(session.pending.is_empty());
    assert_eq!(session.state.search.page(), 2);
}

#[test]
fn every_submit_is_a_total_reset() {
    let api = FakeImageApi::default()
        .page("cats", 1, &["img1"], 4)
        .failing("cats", 2, 500, "{}")
        .page("dogs", 1, &["dog1"], 1);
    let mut session = Session::new(api);

    session.search("cats");
    session.resolve_oldest();
    session.send(Event::LoadMore);
    session.resolve_oldest();
    assert!(session.state.search.error().is_some());

    session.search("dogs");
    let search = &session.state.search;
    assert!(search.items().is_empty());
    assert_eq!(search.page(), 1);
    assert!(search.error().is_none());
    assert!(!search.is_empty());
    assert!(!search.has_more());
    assert!(search.is_loading());
}

#[test]
fn no_results_shows_the_empty_banner() {
    let api = FakeImageApi::default().page("zzzznoresults", 1, &[], 0);
    let mut session = Session::new(api);

    session.search("zzzznoresults");
    session.resolve_oldest();

    assert!(session.state.search.is_empty());
    assert!(session.state.search.items().is_empty());
    assert!(!session.state.search.has_more());
    assert_eq!(banner(&session.state.search), Some(Banner::NoResults));
}

#[test]
fn empty_later_page_keeps_existing_items() {
    let api = FakeImageApi::default()
        .page("cats", 1, &["img1", "img2"], 5)
        .page("cats", 2, &[], 5);
    let mut session = Session::new(api);

    session.search("cats");
    session.resolve_oldest();
    session.send(Event::LoadMore);
    session.resolve_oldest();

    assert!(session.state.search.is_empty());
    assert_eq!(session.ids(), vec!["img1", "img2"]);
}

#[test]
fn failures_collapse_into_one_generic_message() {
    let api = FakeImageApi::default()
        .failing("cats", 1, 503, "Service Unavailable")
        .failing("dogs", 1, 200, "<html>not json</html>");
    let mut session = Session::new(api);

    session.search("cats");
    session.resolve_oldest();
    assert_eq!(
        session.state.search.error(),
        Some(&FetchError::Status { status: 503 })
    );
    assert!(!session.state.search.is_loading());

    let vm = session.state.compute_viewmodel(30, 100);
    assert_eq!(
        vm.status,
        Some(StatusLine::Message {
            text: FAILURE_MESSAGE.to_string(),
            is_error: true,
        })
    );

    session.search("dogs");
    session.resolve_oldest();
    assert!(matches!(session.state.search.error(), Some(FetchError::Decode(_))));
    assert_eq!(banner(&session.state.search), Some(Banner::Failed));
}

#[test]
fn stale_page_from_previous_query_is_discarded() {
    let api = FakeImageApi::default()
        .page("cats", 1, &["cat1", "cat2"], 1)
        .page("dogs", 1, &["dog1"], 1);
    let mut session = Session::new(api);

    session.search("cats");
    session.search("dogs");
    assert_eq!(session.pending.len(), 2);

    assert!(!session.resolve_oldest());
    assert!(session.state.search.items().is_empty());
    assert!(session.state.search.is_loading());

    assert!(session.resolve_oldest());
    assert_eq!(session.ids(), vec!["dog1"]);
}

#[test]
fn unanswered_fetch_times_out_and_can_be_retried() {
    let api = FakeImageApi::default().page("cats", 1, &["img1"], 1);
    let mut session = Session::new(api);

    session.search("cats");
    assert_eq!(session.timers_armed, 1);

    assert!(session.send(Event::TimerFired));
    assert_eq!(session.state.search.error(), Some(&FetchError::Timeout));
    assert!(!session.state.search.is_loading());

    assert!(!session.resolve_oldest());
    assert!(session.state.search.items().is_empty());

    session.search("cats");
    assert!(session.resolve_oldest());
    assert_eq!(session.ids(), vec!["img1"]);
    assert!(session.state.search.error().is_none());

    assert!(!session.send(Event::TimerFired));
    assert!(session.state.search.error().is_none());
}

#[test]
fn status_line_follows_the_search_lifecycle() {
    let api = FakeImageApi::default().page("cats", 1, &["img1"], 2);
    let mut session = Session::new(api);

    assert_eq!(banner(&session.state.search), Some(Banner::Ready));

    session.search("cats");
    let vm = session.state.compute_viewmodel(30, 100);
    assert!(matches!(vm.status, Some(StatusLine::Loading(_))));
    assert!(vm.load_more.is_none());

    session.resolve_oldest();
    let vm = session.state.compute_viewmodel(30, 100);
    assert_eq!(vm.status, None);
    assert_eq!(vm.gallery.len(), 1);
    assert_eq!(vm.gallery[0].number, 1);
    assert_eq!(vm.gallery[0].dimensions, "1600x900");
    assert!(vm.load_more.as_ref().is_some_and(|info| info.enabled));

    session.send(Event::LoadMore);
    let vm = session.state.compute_viewmodel(30, 100);
    assert!(vm.load_more.as_ref().is_some_and(|info| !info.enabled));
    assert_eq!(vm.gallery.len(), 1);
}

#[test]
fn blank_query_never_reaches_the_api() {
    let mut session = Session::new(FakeImageApi::default());

    session.search("   ");

    assert!(session.pending.is_empty());
    assert_eq!(session.timers_armed, 0);
    assert!(session.state.notice.is_some());
    assert_eq!(session.state.input_mode, InputMode::Typing);
}

#[test]
fn modal_shows_selected_image_and_opens_it_externally() {
    let api = FakeImageApi::default().page("cats", 1, &["img1", "img2"], 1);
    let mut session = Session::new(api);

    session.search("cats");
    session.resolve_oldest();
    session.send(Event::KeyDown);
    session.send(Event::OpenSelected);

    assert!(session.state.modal.is_open());
    assert_eq!(session.state.modal.src(), "https://img.test/regular/img2");
    assert_eq!(session.state.modal.alt(), "cats photo img2");

    session.send(Event::KeyDown);
    assert_eq!(session.state.selected_index, 1);

    session.send(Event::OpenExternal);
    assert_eq!(
        session.opened,
        vec![(
            "xdg-open".to_string(),
            "https://img.test/regular/img2".to_string()
        )]
    );

    session.send(Event::CloseModal);
    assert_eq!(session.state.modal, ModalState::default());
    session.send(Event::CloseModal);
    assert_eq!(session.state.modal, ModalState::default());
}

#[test]
fn modal_open_and_close_directly() {
    let mut modal = ModalState::default();

    modal.open("url1", "cat");
    assert!(modal.is_open());
    assert_eq!(modal.src(), "url1");

    modal.close();
    assert!(!modal.is_open());
    assert_eq!(modal.src(), "");
    assert_eq!(modal.alt(), "");
}
