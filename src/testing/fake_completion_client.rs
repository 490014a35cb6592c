use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use crate::domain::{CompletionError, CompletionRequest};
use crate::ports::CompletionClient;

/// Replies from a script in call order, echoing the prompt once the script
/// runs out. Every request is recorded.
#[derive(Clone, Default)]
pub struct FakeCompletionClient {
    pub requests: Arc<Mutex<Vec<CompletionRequest>>>,
    script: Arc<Mutex<VecDeque<Result<String, CompletionError>>>>,
}

impl FakeCompletionClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_script(script: Vec<Result<String, CompletionError>>) -> Self {
        Self { requests: Arc::default(), script: Arc::new(Mutex::new(script.into())) }
    }

    pub fn recorded_prompts(&self) -> Vec<String> {
        self.requests.lock().unwrap().iter().map(|request| request.prompt.clone()).collect()
    }
}

impl CompletionClient for FakeCompletionClient {
    fn complete(&self, request: &CompletionRequest) -> Result<String, CompletionError> {
        self.requests.lock().unwrap().push(request.clone());
        match self.script.lock().unwrap().pop_front() {
            Some(reply) => reply,
            None => Ok(format!("# Reply\n{}", request.prompt)),
        }
    }
}
