//! Request and response shapes exchanged with the native payment SDK, and
//! the port through which they travel.

pub mod account;
pub mod bank_account;
pub mod card;
pub mod ports;
pub mod source;
pub mod token;
pub mod wallet;
