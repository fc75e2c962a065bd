//! Implementations of the remote channel port.

pub mod in_memory;
