//! Scripted [`FieldClient`] double for tests.
//!
//! `MockFieldClient` plays back queued responses per operation and records
//! every call it sees, so tests can assert both what went over the "wire"
//! and that nothing did.

use std::collections::VecDeque;
use std::sync::Mutex;

use crate::{
    ClientConfig, DeleteFieldRequest, DeleteFieldResult, FieldAttributes, FieldClient,
    GetFieldRequest, PostFieldRequest, PutFieldRequest, Result,
};

/// One remote call as the mock observed it.
#[derive(Debug, Clone)]
pub enum RecordedCall {
    Get(GetFieldRequest),
    Post(PostFieldRequest),
    Put(PutFieldRequest),
    Delete(DeleteFieldRequest),
}

/// A [`FieldClient`] that answers from pre-queued responses.
///
/// An operation with an empty queue panics — an unscripted network call in a
/// test is a test bug, not something to paper over.
#[derive(Default)]
pub struct MockFieldClient {
    config: ClientConfig,
    calls: Mutex<Vec<RecordedCall>>,
    get_responses: Mutex<VecDeque<Result<FieldAttributes>>>,
    post_responses: Mutex<VecDeque<Result<FieldAttributes>>>,
    put_responses: Mutex<VecDeque<Result<FieldAttributes>>>,
    delete_responses: Mutex<VecDeque<Result<DeleteFieldResult>>>,
}

impl MockFieldClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a specific config snapshot (what `config_snapshot` reports).
    pub fn with_config(config: ClientConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    /// Queue the next `get_field` outcome.
    pub fn push_get(&self, response: Result<FieldAttributes>) {
        self.get_responses.lock().unwrap().push_back(response);
    }

    /// Queue the next `post_field` outcome.
    pub fn push_post(&self, response: Result<FieldAttributes>) {
        self.post_responses.lock().unwrap().push_back(response);
    }

    /// Queue the next `put_field` outcome.
    pub fn push_put(&self, response: Result<FieldAttributes>) {
        self.put_responses.lock().unwrap().push_back(response);
    }

    /// Queue the next `delete_field` outcome.
    pub fn push_delete(&self, response: Result<DeleteFieldResult>) {
        self.delete_responses.lock().unwrap().push_back(response);
    }

    /// Every call observed so far, in order.
    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    fn record(&self, call: RecordedCall) {
        self.calls.lock().unwrap().push(call);
    }
}

#[async_trait::async_trait]
impl FieldClient for MockFieldClient {
    async fn get_field(&self, req: GetFieldRequest) -> Result<FieldAttributes> {
        self.record(RecordedCall::Get(req));
        self.get_responses
            .lock()
            .unwrap()
            .pop_front()
            .expect("unexpected get_field call: no scripted response")
    }

    async fn post_field(&self, req: PostFieldRequest) -> Result<FieldAttributes> {
        self.record(RecordedCall::Post(req));
        self.post_responses
            .lock()
            .unwrap()
            .pop_front()
            .expect("unexpected post_field call: no scripted response")
    }

    async fn put_field(&self, req: PutFieldRequest) -> Result<FieldAttributes> {
        self.record(RecordedCall::Put(req));
        self.put_responses
            .lock()
            .unwrap()
            .pop_front()
            .expect("unexpected put_field call: no scripted response")
    }

    async fn delete_field(&self, req: DeleteFieldRequest) -> Result<DeleteFieldResult> {
        self.record(RecordedCall::Delete(req));
        self.delete_responses
            .lock()
            .unwrap()
            .pop_front()
            .expect("unexpected delete_field call: no scripted response")
    }

    fn config_snapshot(&self) -> ClientConfig {
        self.config.clone()
    }
}
