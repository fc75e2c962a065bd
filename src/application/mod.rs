//! Application layer: the typed operations callers use.
//!
//! `StripeBridge` validates requests and dispatches them to the native
//! channel. The Apple Pay two-phase flow lives in `apple_pay`, and
//! `callbacks` adapts any operation to success/failure callbacks.

pub mod apple_pay;
pub mod bridge;
pub mod callbacks;
