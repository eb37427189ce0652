//! Scripted transport for tests: answers requests in order and records them.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use async_trait::async_trait;
use futures::channel::oneshot;

use crate::error::ApiError;
use crate::services::http::{HttpRequest, HttpResponse, HttpTransport};

type Reply = Result<HttpResponse, ApiError>;

enum Scripted {
    Ready(Reply),
    /// Held until the test sends the reply, so a request can be left in flight.
    Gated(oneshot::Receiver<Reply>),
}

#[derive(Clone, Default)]
pub struct MockTransport {
    replies: Rc<RefCell<VecDeque<Scripted>>>,
    requests: Rc<RefCell<Vec<HttpRequest>>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_json(&self, status: u16, body: &str) {
        self.push_response(HttpResponse {
            status,
            status_text: String::new(),
            body: body.to_string(),
        });
    }

    pub fn push_response(&self, response: HttpResponse) {
        self.replies
            .borrow_mut()
            .push_back(Scripted::Ready(Ok(response)));
    }

    pub fn push_error(&self, err: ApiError) {
        self.replies.borrow_mut().push_back(Scripted::Ready(Err(err)));
    }

    /// Queue a reply the test releases later through the returned sender.
    pub fn push_gate(&self) -> oneshot::Sender<Reply> {
        let (tx, rx) = oneshot::channel();
        self.replies.borrow_mut().push_back(Scripted::Gated(rx));
        tx
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests.borrow().clone()
    }

    pub fn last_request(&self) -> Option<HttpRequest> {
        self.requests.borrow().last().cloned()
    }

    pub fn mutating_requests(&self) -> usize {
        self.requests
            .borrow()
            .iter()
            .filter(|r| r.method.is_mutating())
            .count()
    }
}

pub fn json_response(status: u16, body: &str) -> Reply {
    Ok(HttpResponse {
        status,
        status_text: String::new(),
        body: body.to_string(),
    })
}

#[async_trait(?Send)]
impl HttpTransport for MockTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        self.requests.borrow_mut().push(request.clone());
        let next = self.replies.borrow_mut().pop_front();
        match next {
            Some(Scripted::Ready(reply)) => reply,
            Some(Scripted::Gated(rx)) => rx
                .await
                .unwrap_or_else(|_| Err(ApiError::Network("gate dropped".to_string()))),
            None => panic!("no scripted reply for {} {}", request.method.as_str(), request.url),
        }
    }
}
