use crate::domain::ports::{RemoteCall, RemoteChannel, Verb};
use crate::error::PluginError;
use async_trait::async_trait;
use serde_json::Value;
use std::collections::{HashMap, VecDeque};
use std::sync::Arc;
use tokio::sync::RwLock;

type Reply = Result<Value, PluginError>;

/// A thread-safe in-memory stand-in for the native channel.
///
/// Records every call it receives, in order, and answers each verb from a
/// queue of scripted replies. A verb with nothing queued fails with a
/// "no scripted reply" error, which is what the CLI dry run relies on.
#[derive(Default, Clone)]
pub struct ScriptedChannel {
    calls: Arc<RwLock<Vec<RemoteCall>>>,
    replies: Arc<RwLock<HashMap<Verb, VecDeque<Reply>>>>,
}

impl ScriptedChannel {
    /// Creates a channel with no scripted replies.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a successful reply for the next call of `verb`.
    pub async fn succeed(&self, verb: Verb, value: Value) {
        self.push(verb, Ok(value)).await;
    }

    /// Queues a failure for the next call of `verb`.
    pub async fn fail(&self, verb: Verb, message: impl Into<String>) {
        self.push(verb, Err(PluginError::new(message))).await;
    }

    async fn push(&self, verb: Verb, reply: Reply) {
        let mut replies = self.replies.write().await;
        replies.entry(verb).or_default().push_back(reply);
    }

    /// Every call received so far, oldest first.
    pub async fn calls(&self) -> Vec<RemoteCall> {
        self.calls.read().await.clone()
    }

    /// Calls received for a single verb.
    pub async fn calls_for(&self, verb: Verb) -> Vec<RemoteCall> {
        let calls = self.calls.read().await;
        calls.iter().filter(|call| call.verb == verb).cloned().collect()
    }
}

#[async_trait]
impl RemoteChannel for ScriptedChannel {
    async fn invoke(&self, call: RemoteCall) -> Result<Value, PluginError> {
        let verb = call.verb;
        self.calls.write().await.push(call);

        let mut replies = self.replies.write().await;
        replies
            .get_mut(&verb)
            .and_then(VecDeque::pop_front)
            .unwrap_or_else(|| Err(PluginError::new(format!("No scripted reply for {verb}"))))
    }
}
