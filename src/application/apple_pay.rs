//! Two-phase Apple Pay transactions.
//!
//! Opening a transaction yields a token, not a payment. The caller charges
//! the token and then reports the outcome through
//! [`ApplePayTransaction::finalize`], which closes the native payment sheet
//! with success or failure. A transaction that failed to open has nothing to
//! finalize.

use super::bridge::{StripeBridge, to_arg};
use crate::domain::ports::{RemoteCall, RemoteChannelRef, Verb};
use crate::domain::token::TokenResponse;
use crate::domain::wallet::ApplePayOptions;
use crate::error::Result;
use serde_json::json;
use std::fmt;
use std::future::Future;
use std::time::Duration;
use tracing::{debug, warn};

/// Lifecycle of one Apple Pay transaction.
///
/// `Idle -> Initializing -> AwaitingFinalization -> Closed`, or
/// `Initializing -> Closed(FailedToInitialize)` when the native side refuses
/// to open the payment sheet.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum WalletTransactionState {
    #[default]
    Idle,
    Initializing,
    AwaitingFinalization,
    Closed(Closure),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Closure {
    Committed,
    RolledBack,
    FailedToInitialize,
}

impl WalletTransactionState {
    /// Whether `next` directly follows `self`.
    pub fn can_advance_to(self, next: WalletTransactionState) -> bool {
        use WalletTransactionState::*;
        matches!(
            (self, next),
            (Idle, Initializing)
                | (Initializing, AwaitingFinalization)
                | (Initializing, Closed(Closure::FailedToInitialize))
                | (AwaitingFinalization, Closed(Closure::Committed | Closure::RolledBack))
        )
    }

    pub fn is_closed(self) -> bool {
        matches!(self, WalletTransactionState::Closed(_))
    }

    fn advance(&mut self, next: WalletTransactionState) {
        debug_assert!(self.can_advance_to(next), "{self:?} cannot move to {next:?}");
        debug!(from = ?*self, to = ?next, "Apple Pay transaction state changed");
        *self = next;
    }
}

impl StripeBridge {
    /// Opens an Apple Pay transaction.
    ///
    /// Incomplete options fail immediately without contacting the native
    /// side. Item amounts are sent as strings. If the native side opens the
    /// transaction but its token cannot be decoded, the transaction is rolled
    /// back before the decode error is returned.
    pub async fn pay_with_apple_pay(&self, mut options: ApplePayOptions) -> Result<ApplePayTransaction> {
        options.validate()?;
        options.normalize_amounts();

        let mut state = WalletTransactionState::Idle;
        state.advance(WalletTransactionState::Initializing);
        debug!(merchant = %options.merchant_id, "Opening Apple Pay transaction");
        let args = vec![
            json!(options.merchant_id),
            json!(options.country),
            json!(options.currency),
            to_arg(&options.items)?,
            json!(options.mode),
        ];

        let reply = match self.call(Verb::InitializeApplePayTransaction, args).await {
            Ok(reply) => reply,
            Err(err) => {
                state.advance(WalletTransactionState::Closed(Closure::FailedToInitialize));
                debug!(error = %err, "Apple Pay transaction failed to open");
                return Err(err);
            }
        };
        state.advance(WalletTransactionState::AwaitingFinalization);

        let token: TokenResponse = match serde_json::from_value(reply) {
            Ok(token) => token,
            Err(err) => {
                warn!(error = %err, "Apple Pay token is unreadable, rolling back");
                send_finalize(self.channel(), false, "<unreadable>").await;
                state.advance(WalletTransactionState::Closed(Closure::RolledBack));
                return Err(err.into());
            }
        };

        debug!(token = %token.id, "Apple Pay token received");
        Ok(ApplePayTransaction {
            token,
            channel: self.channel().clone(),
            state,
        })
    }
}

async fn send_finalize(channel: &RemoteChannelRef, payment_processed: bool, token_id: &str) {
    let call = RemoteCall::new(Verb::FinalizeApplePayTransaction, vec![json!(payment_processed)]);
    if let Err(err) = channel.invoke(call).await {
        warn!(token = %token_id, error = %err, "Apple Pay finalization was not acknowledged");
    }
}

/// An open Apple Pay transaction holding its token.
///
/// Must be finalized exactly once. `finalize` takes the transaction by value,
/// so a second call does not compile. Dropping it unfinalized sends nothing
/// and logs a warning; the native payment sheet then stays open.
#[must_use = "an Apple Pay transaction must be finalized"]
pub struct ApplePayTransaction {
    token: TokenResponse,
    channel: RemoteChannelRef,
    state: WalletTransactionState,
}

impl fmt::Debug for ApplePayTransaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApplePayTransaction")
            .field("token", &self.token)
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

impl ApplePayTransaction {
    pub fn token(&self) -> &TokenResponse {
        &self.token
    }

    pub fn state(&self) -> WalletTransactionState {
        self.state
    }

    /// Reports whether the payment was processed and closes the transaction.
    ///
    /// The native reply is ignored either way.
    pub async fn finalize(mut self, payment_processed: bool) -> WalletTransactionState {
        send_finalize(&self.channel, payment_processed, &self.token.id).await;

        let closure = if payment_processed {
            Closure::Committed
        } else {
            Closure::RolledBack
        };
        self.state.advance(WalletTransactionState::Closed(closure));
        self.state
    }

    /// Runs `process` with the token and finalizes with its outcome.
    pub async fn process<F, Fut>(self, process: F) -> WalletTransactionState
    where
        F: FnOnce(TokenResponse) -> Fut,
        Fut: Future<Output = bool>,
    {
        let processed = process(self.token.clone()).await;
        self.finalize(processed).await
    }

    /// Like [`process`](Self::process), but rolls back if processing does not
    /// finish within `limit`.
    pub async fn process_with_timeout<F, Fut>(self, limit: Duration, process: F) -> WalletTransactionState
    where
        F: FnOnce(TokenResponse) -> Fut,
        Fut: Future<Output = bool>,
    {
        let processed = match tokio::time::timeout(limit, process(self.token.clone())).await {
            Ok(processed) => processed,
            Err(_) => {
                warn!(token = %self.token.id, ?limit, "Payment processing timed out, rolling back");
                false
            }
        };
        self.finalize(processed).await
    }
}

impl Drop for ApplePayTransaction {
    fn drop(&mut self) {
        if !self.state.is_closed() {
            warn!(token = %self.token.id, "Apple Pay transaction dropped without being finalized");
        }
    }
}
