//! Scripted query executor for crawler tests.
//!
//! Serves a fixed sequence of `data` payloads in submission order, which
//! matches the crawl's strictly sequential request model, and records every
//! executed query so tests can assert on request counts and contents.

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::Value;

use super::client::QueryExecutor;
use super::error::RetrievalError;

/// One scripted exchange: a `data` payload or a transport failure.
pub type ScriptedExchange = Result<Value, String>;

/// Executor that replays a pre-recorded script of responses.
#[derive(Debug, Default)]
pub struct ScriptedExecutor {
    script: Mutex<VecDeque<ScriptedExchange>>,
    executed: Mutex<Vec<String>>,
}

impl ScriptedExecutor {
    /// Creates an executor that serves the given `data` payloads in order.
    #[must_use]
    pub fn new(responses: impl IntoIterator<Item = Value>) -> Self {
        Self {
            script: Mutex::new(responses.into_iter().map(Ok).collect()),
            executed: Mutex::new(Vec::new()),
        }
    }

    /// Creates an executor from a script that may include failures.
    #[must_use]
    pub fn with_script(script: impl IntoIterator<Item = ScriptedExchange>) -> Self {
        Self {
            script: Mutex::new(script.into_iter().collect()),
            executed: Mutex::new(Vec::new()),
        }
    }

    /// Every query executed so far, in submission order.
    #[must_use]
    pub fn executed_queries(&self) -> Vec<String> {
        self.executed
            .lock()
            .map(|queries| queries.clone())
            .unwrap_or_default()
    }

    /// Number of queries executed so far.
    #[must_use]
    pub fn request_count(&self) -> usize {
        self.executed.lock().map(|queries| queries.len()).unwrap_or(0)
    }
}

#[async_trait]
impl QueryExecutor for ScriptedExecutor {
    async fn execute(&self, query: &str) -> Result<Value, RetrievalError> {
        if let Ok(mut executed) = self.executed.lock() {
            executed.push(query.to_owned());
        }

        let next = self
            .script
            .lock()
            .map_err(|_poisoned| RetrievalError::Transport {
                message: "script mutex poisoned".to_owned(),
            })?
            .pop_front();

        match next {
            Some(Ok(data)) => Ok(data),
            Some(Err(message)) => Err(RetrievalError::Transport { message }),
            None => Err(RetrievalError::Transport {
                message: format!("script exhausted by unexpected query: {query}"),
            }),
        }
    }
}
