//! A scripted `Transport` for exercising hooks and views without a server.
//!
//! Responses are queued in order and handed out one per request; every
//! executed request is recorded for later inspection.

use std::cell::RefCell;
use std::collections::VecDeque;

use crate::error::ApiError;
use crate::http::{HttpRequest, HttpResponse, Transport};

#[derive(Debug)]
enum Scripted {
    Response(HttpResponse),
    Failure(String),
}

#[derive(Debug, Default)]
pub struct ScriptedTransport {
    queue: RefCell<VecDeque<Scripted>>,
    requests: RefCell<Vec<HttpRequest>>,
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a response with the given status and body.
    pub fn respond(&self, status: u16, body: impl Into<String>) -> &Self {
        self.queue
            .borrow_mut()
            .push_back(Scripted::Response(HttpResponse::new(status, body)));
        self
    }

    /// Queue a transport-level failure.
    pub fn fail(&self, message: &str) -> &Self {
        self.queue
            .borrow_mut()
            .push_back(Scripted::Failure(message.to_string()));
        self
    }

    /// Every request executed so far, in order.
    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests.borrow().clone()
    }
}

impl Transport for ScriptedTransport {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, ApiError> {
        self.requests.borrow_mut().push(request.clone());
        match self.queue.borrow_mut().pop_front() {
            Some(Scripted::Response(response)) => Ok(response),
            Some(Scripted::Failure(message)) => Err(ApiError::Transport(message)),
            None => Err(ApiError::Transport(format!(
                "no scripted response for {} {}",
                request.method.as_str(),
                request.full_url()
            ))),
        }
    }
}
