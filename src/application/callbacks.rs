//! Callback-style completion for bridge operations.
//!
//! Some callers would rather hand over a success and a failure callback than
//! match on a `Result`. [`Continuations`] routes the outcome of an operation
//! to exactly one of the two. Either callback may be left out; it then
//! defaults to [`noop`] and that outcome is silently discarded, including
//! errors.

use crate::error::{PluginError, Result};
use std::future::Future;

pub type SuccessCallback<T> = Box<dyn FnOnce(T) + Send>;
pub type ErrorCallback = Box<dyn FnOnce(PluginError) + Send>;

/// The shared do-nothing callback.
pub fn noop<T>(_: T) {}

pub struct Continuations<T> {
    success: SuccessCallback<T>,
    error: ErrorCallback,
}

impl<T: 'static> Default for Continuations<T> {
    fn default() -> Self {
        Self {
            success: Box::new(noop::<T>),
            error: Box::new(noop::<PluginError>),
        }
    }
}

impl<T: 'static> Continuations<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_success(mut self, callback: impl FnOnce(T) + Send + 'static) -> Self {
        self.success = Box::new(callback);
        self
    }

    pub fn on_error(mut self, callback: impl FnOnce(PluginError) + Send + 'static) -> Self {
        self.error = Box::new(callback);
        self
    }

    /// Hands `result` to the matching callback.
    pub fn resolve(self, result: Result<T>) {
        match result {
            Ok(value) => (self.success)(value),
            Err(err) => (self.error)(err.into()),
        }
    }

    /// Awaits `operation` and resolves with its outcome.
    ///
    /// Operations that fail their local checks resolve through the error
    /// callback without reaching the native side.
    pub async fn settle<F>(self, operation: F)
    where
        F: Future<Output = Result<T>>,
    {
        self.resolve(operation.await);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::apple_pay::ApplePayTransaction;
    use crate::application::bridge::StripeBridge;
    use crate::domain::ports::Verb;
    use crate::domain::wallet::{ApplePayItem, ApplePayOptions};
    use crate::infrastructure::in_memory::ScriptedChannel;
    use serde_json::json;
    use std::sync::{Arc, Mutex};

    #[test]
    fn test_omitted_callbacks_discard_outcomes() {
        Continuations::<bool>::new().resolve(Ok(true));
        Continuations::<bool>::new().resolve(Err(PluginError::new("ignored").into()));
    }

    #[test]
    fn test_exactly_one_callback_fires() {
        let seen = Arc::new(Mutex::new(Vec::new()));

        let (ok, err) = (seen.clone(), seen.clone());
        Continuations::new()
            .on_success(move |v: u32| ok.lock().unwrap().push(format!("ok {v}")))
            .on_error(move |e| err.lock().unwrap().push(format!("err {}", e.message)))
            .resolve(Ok(7));

        assert_eq!(*seen.lock().unwrap(), vec!["ok 7".to_string()]);
    }

    #[tokio::test]
    async fn test_local_failure_reaches_error_callback_without_remote_call() {
        let channel = ScriptedChannel::new();
        let bridge = StripeBridge::new(Arc::new(channel.clone()));
        let error = Arc::new(Mutex::new(None));

        let sink = error.clone();
        Continuations::<ApplePayTransaction>::new()
            .on_error(move |e| *sink.lock().unwrap() = Some(e))
            .settle(bridge.pay_with_apple_pay(ApplePayOptions::default()))
            .await;

        assert_eq!(
            error.lock().unwrap().as_ref().map(|e| e.message.as_str()),
            Some("Missing one or more payment options.")
        );
        assert!(channel.calls().await.is_empty());
    }

    #[tokio::test]
    async fn test_apple_pay_success_hands_over_finalizer() {
        let channel = ScriptedChannel::new();
        channel
            .succeed(
                Verb::InitializeApplePayTransaction,
                json!({ "id": "tok_cb", "type": "card", "created": 1 }),
            )
            .await;
        let bridge = StripeBridge::new(Arc::new(channel.clone()));
        let options = ApplePayOptions {
            merchant_id: "merchant.com.example".to_string(),
            country: "US".to_string(),
            currency: "USD".to_string(),
            items: vec![ApplePayItem::new("Coffee", "3")],
            mode: "test".to_string(),
        };

        let (sender, receiver) = tokio::sync::oneshot::channel();
        Continuations::new()
            .on_success(move |transaction: ApplePayTransaction| {
                let _ = sender.send(transaction);
            })
            .settle(bridge.pay_with_apple_pay(options))
            .await;

        let transaction = receiver.await.unwrap();
        assert_eq!(transaction.token().id, "tok_cb");
        transaction.finalize(true).await;

        let finals = channel.calls_for(Verb::FinalizeApplePayTransaction).await;
        assert_eq!(finals.len(), 1);
        assert_eq!(finals[0].args, vec![json!(true)]);
    }
}
