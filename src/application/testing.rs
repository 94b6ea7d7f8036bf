//! In-memory collaborators for view tests.

use std::sync::Mutex;

use async_trait::async_trait;
use blogdesk_api_types::{AuthorRef, AuthorSummary, Post};
use serde_json::json;

use super::cancel::CancelToken;
use super::service::{PostPayload, PostService, ServiceError, ServiceResponse};
use super::ui::{Navigator, Notification, Notifier, Route, SummaryRenderer};

type Reply<T> = Result<ServiceResponse<T>, ServiceError>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Call {
    Create(PostPayload),
    GetById(String),
    GetAll,
    Update(String, PostPayload),
}

/// Scripted service: every operation returns a clone of its configured reply.
#[derive(Default)]
pub(crate) struct FakePostService {
    create: Mutex<Option<Reply<serde_json::Value>>>,
    get_by_id: Mutex<Option<Reply<Post>>>,
    get_all: Mutex<Option<Reply<Vec<Post>>>>,
    update: Mutex<Option<Reply<serde_json::Value>>>,
    /// Fire the caller's token before replying, as if the view unmounted mid-request.
    cancel_during_call: Mutex<bool>,
    calls: Mutex<Vec<Call>>,
}

impl FakePostService {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn with_create(self, reply: Reply<serde_json::Value>) -> Self {
        *self.create.lock().expect("lock") = Some(reply);
        self
    }

    pub(crate) fn with_get_by_id(self, reply: Reply<Post>) -> Self {
        *self.get_by_id.lock().expect("lock") = Some(reply);
        self
    }

    pub(crate) fn with_get_all(self, reply: Reply<Vec<Post>>) -> Self {
        *self.get_all.lock().expect("lock") = Some(reply);
        self
    }

    pub(crate) fn with_update(self, reply: Reply<serde_json::Value>) -> Self {
        *self.update.lock().expect("lock") = Some(reply);
        self
    }

    pub(crate) fn cancelling_during_call(self) -> Self {
        *self.cancel_during_call.lock().expect("lock") = true;
        self
    }

    pub(crate) fn calls(&self) -> Vec<Call> {
        self.calls.lock().expect("lock").clone()
    }

    fn record(&self, call: Call, cancel: &CancelToken) {
        self.calls.lock().expect("lock").push(call);
        if *self.cancel_during_call.lock().expect("lock") {
            cancel.cancel();
        }
    }

    fn reply<T: Clone>(slot: &Mutex<Option<Reply<T>>>) -> Reply<T> {
        slot.lock()
            .expect("lock")
            .clone()
            .unwrap_or_else(|| Err(ServiceError::Network("no reply scripted".into())))
    }
}

#[async_trait]
impl PostService for FakePostService {
    async fn create(
        &self,
        payload: PostPayload,
        cancel: &CancelToken,
    ) -> Result<ServiceResponse<serde_json::Value>, ServiceError> {
        self.record(Call::Create(payload), cancel);
        Self::reply(&self.create)
    }

    async fn get_by_id(
        &self,
        id: &str,
        cancel: &CancelToken,
    ) -> Result<ServiceResponse<Post>, ServiceError> {
        self.record(Call::GetById(id.to_string()), cancel);
        Self::reply(&self.get_by_id)
    }

    async fn get_all(
        &self,
        cancel: &CancelToken,
    ) -> Result<ServiceResponse<Vec<Post>>, ServiceError> {
        self.record(Call::GetAll, cancel);
        Self::reply(&self.get_all)
    }

    async fn update(
        &self,
        id: &str,
        payload: PostPayload,
        cancel: &CancelToken,
    ) -> Result<ServiceResponse<serde_json::Value>, ServiceError> {
        self.record(Call::Update(id.to_string(), payload), cancel);
        Self::reply(&self.update)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Event {
    Notified(Notification),
    Navigated(Route),
}

/// Notifier and navigator in one, recording a single ordered event log.
#[derive(Default)]
pub(crate) struct Recorder {
    events: Mutex<Vec<Event>>,
}

impl Recorder {
    pub(crate) fn events(&self) -> Vec<Event> {
        self.events.lock().expect("lock").clone()
    }

    pub(crate) fn notifications(&self) -> Vec<Notification> {
        self.events()
            .into_iter()
            .filter_map(|event| match event {
                Event::Notified(n) => Some(n),
                Event::Navigated(_) => None,
            })
            .collect()
    }

    pub(crate) fn routes(&self) -> Vec<Route> {
        self.events()
            .into_iter()
            .filter_map(|event| match event {
                Event::Navigated(route) => Some(route),
                Event::Notified(_) => None,
            })
            .collect()
    }
}

impl Notifier for Recorder {
    fn notify(&self, notification: Notification) {
        self.events
            .lock()
            .expect("lock")
            .push(Event::Notified(notification));
    }
}

impl Navigator for Recorder {
    fn navigate(&self, route: Route) {
        self.events.lock().expect("lock").push(Event::Navigated(route));
    }
}

#[derive(Default)]
pub(crate) struct RecordingRenderer {
    pub(crate) lines: Mutex<Vec<String>>,
}

impl RecordingRenderer {
    pub(crate) fn lines(&self) -> Vec<String> {
        self.lines.lock().expect("lock").clone()
    }
}

impl SummaryRenderer for RecordingRenderer {
    fn heading(&self, text: &str) {
        self.lines.lock().expect("lock").push(format!("# {text}"));
    }

    fn empty_state(&self, text: &str) {
        self.lines.lock().expect("lock").push(format!("empty: {text}"));
    }

    fn card(&self, post: &Post) {
        self.lines
            .lock()
            .expect("lock")
            .push(format!("card: {}", post.title));
    }
}

pub(crate) fn post_by(id: &str, author: &str) -> Post {
    Post {
        id: id.to_string(),
        title: format!("Title {id}"),
        summary: "A summary".into(),
        content: "<p>Body</p>".into(),
        cover: Some(format!("https://cdn.example/{id}.png")),
        author: Some(AuthorRef::Embedded(AuthorSummary {
            id: author.to_string(),
            username: None,
        })),
        created_at: None,
    }
}

pub(crate) fn created() -> Reply<serde_json::Value> {
    Ok(ServiceResponse::new(201, json!({ "_id": "new" })))
}
