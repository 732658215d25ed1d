//! Lifecycle of a single remote call as observable state.
//!
//! A [`Request`] owns one [`RequestState`] and runs futures against it:
//!
//! ```text
//! Idle -> Loading -> Success | Error
//!            \-> Cancelled
//! ```
//!
//! Runs are fenced: each run takes the next sequence number and only the
//! newest run may write its result. Every run is abortable; an aborted run
//! never touches state.

use std::cell::{Cell, RefCell};
use std::future::Future;
use std::rc::Rc;

use eventnow_shared::ApiError;
use futures_util::future::{abortable, AbortHandle};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::api_client::ApiClient;
use crate::cell::StateCell;
use crate::http::HttpMethod;
use crate::log_warn;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RequestPhase {
    #[default]
    Idle,
    Loading,
    Success,
    Error,
    Cancelled,
}

/// What a view renders for a remote call.
///
/// A failed run keeps the previous `data`, so a page can show stale content
/// next to the error while the user retries.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestState<T> {
    pub data: Option<T>,
    pub loading: bool,
    pub error: Option<String>,
    pub phase: RequestPhase,
}

impl<T> Default for RequestState<T> {
    fn default() -> Self {
        Self {
            data: None,
            loading: false,
            error: None,
            phase: RequestPhase::Idle,
        }
    }
}

impl<T> RequestState<T> {
    /// Loading, or idle and never run: "show a spinner until the first load".
    pub fn is_pending(&self) -> bool {
        self.loading || (self.phase == RequestPhase::Idle && self.data.is_none())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum RequestOutcome<T> {
    Success(T),
    Failed(ApiError),
    /// A newer run started before this one finished; its result was dropped.
    Superseded,
    Cancelled,
}

impl<T> RequestOutcome<T> {
    pub fn ok(self) -> Option<T> {
        match self {
            RequestOutcome::Success(data) => Some(data),
            _ => None,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, RequestOutcome::Success(_))
    }

    pub fn error(&self) -> Option<&ApiError> {
        match self {
            RequestOutcome::Failed(err) => Some(err),
            _ => None,
        }
    }
}

pub struct Request<T, C> {
    state: C,
    seq: Rc<Cell<u64>>,
    in_flight: Rc<RefCell<Vec<(u64, AbortHandle)>>>,
    _data: std::marker::PhantomData<fn() -> T>,
}

impl<T, C: Clone> Clone for Request<T, C> {
    fn clone(&self) -> Self {
        Self {
            state: self.state.clone(),
            seq: self.seq.clone(),
            in_flight: self.in_flight.clone(),
            _data: std::marker::PhantomData,
        }
    }
}

impl<T, C> Request<T, C>
where
    T: Clone + 'static,
    C: StateCell<RequestState<T>>,
{
    pub fn new(state: C) -> Self {
        Self {
            state,
            seq: Rc::new(Cell::new(0)),
            in_flight: Rc::new(RefCell::new(Vec::new())),
            _data: std::marker::PhantomData,
        }
    }

    pub fn state(&self) -> &C {
        &self.state
    }

    pub fn in_flight(&self) -> usize {
        self.in_flight.borrow().len()
    }

    /// Drive `fut` to completion and record its result, unless a newer run
    /// starts first or the run is aborted.
    pub async fn run<F>(&self, fut: F) -> RequestOutcome<T>
    where
        F: Future<Output = Result<T, ApiError>>,
    {
        let id = self.seq.get() + 1;
        self.seq.set(id);
        self.state.with_mut(|s| {
            s.loading = true;
            s.error = None;
            s.phase = RequestPhase::Loading;
        });

        let (fut, handle) = abortable(fut);
        self.in_flight.borrow_mut().push((id, handle));
        let result = fut.await;
        self.in_flight.borrow_mut().retain(|(run, _)| *run != id);

        let Ok(result) = result else {
            return RequestOutcome::Cancelled;
        };
        if id != self.seq.get() {
            return RequestOutcome::Superseded;
        }

        match result {
            Ok(data) => {
                self.state.with_mut(|s| {
                    s.data = Some(data.clone());
                    s.loading = false;
                    s.phase = RequestPhase::Success;
                });
                RequestOutcome::Success(data)
            }
            Err(err @ ApiError::Unauthorized { .. }) => {
                // The session is gone and the client already signed out.
                log_warn!("Request rejected, session expired: {}", err);
                self.state.with_mut(|s| {
                    s.loading = false;
                    s.phase = RequestPhase::Idle;
                });
                RequestOutcome::Failed(err)
            }
            Err(err) => {
                log_warn!("Request failed: {}", err);
                let message = err.user_message();
                self.state.with_mut(|s| {
                    s.error = Some(message);
                    s.loading = false;
                    s.phase = RequestPhase::Error;
                });
                RequestOutcome::Failed(err)
            }
        }
    }

    /// Abort every in-flight run without touching state. Used on unmount,
    /// when the state cell may already be gone. Returns how many runs were
    /// aborted; each handle is aborted exactly once.
    pub fn detach(&self) -> usize {
        let handles: Vec<_> = self.in_flight.borrow_mut().drain(..).collect();
        for (_, handle) in &handles {
            handle.abort();
        }
        // Results of anything started before now are stale.
        self.seq.set(self.seq.get() + 1);
        handles.len()
    }

    /// Abort in-flight runs and mark the request cancelled. `data` and
    /// `error` are left as they were.
    pub fn cancel(&self) -> usize {
        let aborted = self.detach();
        if aborted > 0 {
            self.state.with_mut(|s| {
                s.loading = false;
                s.phase = RequestPhase::Cancelled;
            });
        }
        aborted
    }

    /// Clear `data` and `error`. `loading` is untouched.
    pub fn reset(&self) {
        self.state.with_mut(|s| {
            s.data = None;
            s.error = None;
            if !s.loading {
                s.phase = RequestPhase::Idle;
            }
        });
    }
}

/// A [`Request`] bound to the [`ApiClient`], with one method per HTTP verb.
pub struct ApiRequest<T, C> {
    request: Request<T, C>,
    api: ApiClient,
}

impl<T, C: Clone> Clone for ApiRequest<T, C> {
    fn clone(&self) -> Self {
        Self {
            request: self.request.clone(),
            api: self.api.clone(),
        }
    }
}

impl<T, C> ApiRequest<T, C>
where
    T: Clone + DeserializeOwned + 'static,
    C: StateCell<RequestState<T>>,
{
    pub fn new(api: ApiClient, state: C) -> Self {
        Self {
            request: Request::new(state),
            api,
        }
    }

    pub fn request(&self) -> &Request<T, C> {
        &self.request
    }

    pub fn state(&self) -> &C {
        self.request.state()
    }

    pub async fn fetch_data(
        &self,
        method: HttpMethod,
        path: &str,
        body: Option<String>,
    ) -> RequestOutcome<T> {
        self.request
            .run(self.api.request_json(method, path, body))
            .await
    }

    pub async fn get(&self, path: &str) -> RequestOutcome<T> {
        self.fetch_data(HttpMethod::Get, path, None).await
    }

    pub async fn post<B: Serialize>(&self, path: &str, body: &B) -> RequestOutcome<T> {
        match serde_json::to_string(body) {
            Ok(body) => self.fetch_data(HttpMethod::Post, path, Some(body)).await,
            Err(e) => self.encode_failure(e).await,
        }
    }

    pub async fn put<B: Serialize>(&self, path: &str, body: &B) -> RequestOutcome<T> {
        match serde_json::to_string(body) {
            Ok(body) => self.fetch_data(HttpMethod::Put, path, Some(body)).await,
            Err(e) => self.encode_failure(e).await,
        }
    }

    pub async fn delete(&self, path: &str) -> RequestOutcome<T> {
        self.fetch_data(HttpMethod::Delete, path, None).await
    }

    /// Run a typed service call through the same lifecycle.
    pub async fn call<F, Fut>(&self, f: F) -> RequestOutcome<T>
    where
        F: FnOnce(ApiClient) -> Fut,
        Fut: Future<Output = Result<T, ApiError>>,
    {
        self.request.run(f(self.api.clone())).await
    }

    async fn encode_failure(&self, e: serde_json::Error) -> RequestOutcome<T> {
        let err = ApiError::Deserialize(e.to_string());
        self.request.run(async move { Err(err) }).await
    }

    pub fn reset(&self) {
        self.request.reset();
    }

    pub fn cancel(&self) -> usize {
        self.request.cancel()
    }

    pub fn detach(&self) -> usize {
        self.request.detach()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::rc::Rc;

    use serde_json::{json, Value};

    use super::*;
    use crate::cell::local;
    use crate::storage::{AuthStorage, Persistence};
    use crate::testing::{ok_json, MockTransport};

    type ValueCell = Rc<RefCell<RequestState<Value>>>;

    fn api_request(mock: &Rc<MockTransport>) -> (ApiRequest<Value, ValueCell>, ApiClient) {
        let api = ApiClient::new(mock.clone(), AuthStorage::in_memory());
        (ApiRequest::new(api.clone(), local(RequestState::default())), api)
    }

    #[tokio::test]
    async fn success_stores_data_and_clears_loading() {
        let mock = MockTransport::new();
        mock.push_json(200, json!({"id": 1}));
        let (req, _) = api_request(&mock);

        let outcome = req.get("/events/1").await;

        assert!(outcome.is_success());
        let state = req.state().get();
        assert_eq!(state.data, Some(json!({"id": 1})));
        assert_eq!(state.error, None);
        assert!(!state.loading);
        assert_eq!(state.phase, RequestPhase::Success);
    }

    #[tokio::test]
    async fn failure_sets_message_and_keeps_previous_data() {
        let mock = MockTransport::new();
        mock.push_json(200, json!(["first"]));
        mock.push(400, r#"{"detail":"Event is full"}"#);
        let (req, _) = api_request(&mock);

        req.get("/events").await;
        let outcome = req.post("/registrations", &json!({"event_id": 1})).await;

        assert_eq!(outcome.error().and_then(ApiError::status), Some(400));
        let state = req.state().get();
        assert_eq!(state.data, Some(json!(["first"])));
        assert_eq!(state.error.as_deref(), Some("Event is full"));
        assert!(!state.loading);
        assert_eq!(state.phase, RequestPhase::Error);
    }

    #[tokio::test]
    async fn newer_run_wins_over_slower_older_run() {
        let mock = MockTransport::new();
        let first_gate = mock.push_gated();
        let second_gate = mock.push_gated();
        let (req, _) = api_request(&mock);

        let (first, second) = futures_util::join!(req.get("/events?page=1"), async {
            second_gate.send(ok_json(json!("page 2"))).unwrap();
            let outcome = req.get("/events?page=2").await;
            first_gate.send(ok_json(json!("page 1"))).unwrap();
            outcome
        });

        assert_eq!(first, RequestOutcome::Superseded);
        assert_eq!(second, RequestOutcome::Success(json!("page 2")));
        let state = req.state().get();
        assert_eq!(state.data, Some(json!("page 2")));
        assert!(!state.loading);
    }

    #[tokio::test]
    async fn cancel_aborts_in_flight_once_without_result() {
        let mock = MockTransport::new();
        let gate = mock.push_gated();
        let (req, _) = api_request(&mock);
        let aborted = Cell::new(0);

        let (outcome, ()) = futures_util::join!(req.get("/events"), async {
            aborted.set(req.cancel());
            assert_eq!(req.cancel(), 0);
        });

        assert_eq!(outcome, RequestOutcome::Cancelled);
        assert_eq!(aborted.get(), 1);
        assert_eq!(req.request().in_flight(), 0);
        let state = req.state().get();
        assert_eq!(state.phase, RequestPhase::Cancelled);
        assert_eq!(state.data, None);
        assert!(!state.loading);
        drop(gate);
    }

    #[tokio::test]
    async fn detach_leaves_state_untouched() {
        let mock = MockTransport::new();
        let gate = mock.push_gated();
        let (req, _) = api_request(&mock);

        let (outcome, detached) = futures_util::join!(req.get("/events"), async {
            let detached = req.detach();
            let _ = gate.send(ok_json(json!("late")));
            detached
        });

        assert_eq!(detached, 1);
        assert_eq!(outcome, RequestOutcome::Cancelled);
        let state = req.state().get();
        assert_eq!(state.data, None);
        assert_eq!(state.phase, RequestPhase::Loading);
    }

    #[tokio::test]
    async fn reset_clears_data_and_error() {
        let mock = MockTransport::new();
        mock.push(500, "");
        let (req, _) = api_request(&mock);
        req.get("/events").await;
        req.reset();
        assert_eq!(req.state().get(), RequestState::default());
    }

    #[tokio::test]
    async fn unauthorized_get_signs_out_and_redirects() {
        let mock = MockTransport::new();
        mock.push(401, "");
        let (req, api) = api_request(&mock);
        let redirected = Rc::new(Cell::new(false));
        let flag = redirected.clone();
        api.set_on_session_expired(Rc::new(move || flag.set(true)));
        api.storage().set_token("abc", Persistence::Durable);

        let outcome = req.get("/registrations/my-registrations").await;

        assert!(matches!(
            outcome,
            RequestOutcome::Failed(ApiError::Unauthorized { status: 401, .. })
        ));
        assert_eq!(api.storage().token(), None);
        assert!(redirected.get());
        let state = req.state().get();
        assert_eq!(state.error, None);
        assert!(!state.loading);
        assert_eq!(state.phase, RequestPhase::Idle);
    }

    #[tokio::test]
    async fn expired_token_keeps_previous_data_without_error() {
        let mock = MockTransport::new();
        mock.push_json(200, json!([1, 2]));
        mock.push(401, r#"{"detail":"Token expired"}"#);
        let api = ApiClient::new(mock.clone(), AuthStorage::in_memory());
        api.storage().set_token("abc", Persistence::Durable);
        let req = ApiRequest::<Vec<i64>, _>::new(api, local(RequestState::default()));

        req.get("/events").await;
        req.get("/events").await;

        let state = req.state().get();
        assert_eq!(state.error, None);
        assert_eq!(state.data, Some(vec![1, 2]));
    }

    #[tokio::test]
    async fn typed_service_calls_share_the_lifecycle() {
        let mock = MockTransport::new();
        mock.push_json(200, json!({"totalEvents": 4}));
        let api = ApiClient::new(mock.clone(), AuthStorage::in_memory());
        let req = ApiRequest::new(api, local(RequestState::default()));

        let stats = req.call(|api| async move { api.admin_stats().await }).await;
        assert_eq!(stats.ok().map(|s| s.total_events), Some(4));
        assert_eq!(req.state().get().phase, RequestPhase::Success);
    }
}
