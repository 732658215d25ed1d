//! Scripted transport for tests.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use eventnow_shared::ApiError;
use futures_channel::oneshot;

use crate::http::{HttpRequest, HttpResponse, HttpTransport};

enum Reply {
    Ready(Result<HttpResponse, ApiError>),
    Gated(oneshot::Receiver<HttpResponse>),
}

/// Answers requests from a FIFO queue and records every request it sees.
#[derive(Default)]
pub struct MockTransport {
    replies: RefCell<VecDeque<Reply>>,
    requests: RefCell<Vec<HttpRequest>>,
}

impl MockTransport {
    pub fn new() -> Rc<Self> {
        Rc::new(Self::default())
    }

    pub fn push(&self, status: u16, body: &str) {
        self.replies.borrow_mut().push_back(Reply::Ready(Ok(HttpResponse {
            status,
            body: body.to_string(),
        })));
    }

    pub fn push_json(&self, status: u16, body: serde_json::Value) {
        self.push(status, &body.to_string());
    }

    pub fn push_error(&self, err: ApiError) {
        self.replies.borrow_mut().push_back(Reply::Ready(Err(err)));
    }

    /// Queue a reply that only resolves once the returned sender fires.
    /// Dropping the sender resolves it as a network error.
    pub fn push_gated(&self) -> oneshot::Sender<HttpResponse> {
        let (tx, rx) = oneshot::channel();
        self.replies.borrow_mut().push_back(Reply::Gated(rx));
        tx
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests.borrow().clone()
    }

    pub fn last_request(&self) -> Option<HttpRequest> {
        self.requests.borrow().last().cloned()
    }
}

pub fn ok_json(body: serde_json::Value) -> HttpResponse {
    HttpResponse {
        status: 200,
        body: body.to_string(),
    }
}

#[async_trait::async_trait(?Send)]
impl HttpTransport for MockTransport {
    async fn send(&self, req: HttpRequest) -> Result<HttpResponse, ApiError> {
        self.requests.borrow_mut().push(req);
        let reply = self.replies.borrow_mut().pop_front();
        match reply {
            Some(Reply::Ready(result)) => result,
            Some(Reply::Gated(rx)) => rx
                .await
                .map_err(|_| ApiError::Network("gate dropped".to_string())),
            None => Err(ApiError::Network("no mock response queued".to_string())),
        }
    }
}
