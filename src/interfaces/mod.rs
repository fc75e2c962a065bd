//! File formats the command-line tool reads and writes.

pub mod csv;
pub mod json;
