//! In-memory transport for pipeline tests.

use std::collections::VecDeque;
use std::sync::Mutex;
use std::time::Duration;

use serde_json::Value;
use tokio::time::Instant;

use crate::transport::{RequestUnit, Transport, TransportFailure};

type Reply = Result<Value, TransportFailure>;

/// Replies from a script and records when each call was made.
#[derive(Debug)]
pub(crate) struct ScriptedTransport {
    script: Mutex<VecDeque<Reply>>,
    fallback: Option<Reply>,
    calls: Mutex<Vec<(Duration, String)>>,
    start: Instant,
}

impl ScriptedTransport {
    pub(crate) fn new(script: Vec<Reply>) -> Self {
        Self {
            script: Mutex::new(script.into()),
            fallback: None,
            calls: Mutex::new(Vec::new()),
            start: Instant::now(),
        }
    }

    /// Answers every call with `reply`.
    pub(crate) fn repeating(reply: Reply) -> Self {
        Self {
            fallback: Some(reply),
            ..Self::new(Vec::new())
        }
    }

    pub(crate) fn calls(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    /// Time of each call, relative to construction.
    pub(crate) fn offsets(&self) -> Vec<Duration> {
        self.calls.lock().unwrap().iter().map(|(at, _)| *at).collect()
    }

    pub(crate) fn paths(&self) -> Vec<String> {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .map(|(_, path)| path.clone())
            .collect()
    }
}

#[async_trait::async_trait]
impl Transport for ScriptedTransport {
    async fn send(&self, unit: &RequestUnit) -> Reply {
        self.calls
            .lock()
            .unwrap()
            .push((Instant::now() - self.start, unit.path().to_string()));
        let next = self.script.lock().unwrap().pop_front();
        next.or_else(|| self.fallback.clone())
            .unwrap_or_else(|| Err(TransportFailure::network("script exhausted")))
    }
}
