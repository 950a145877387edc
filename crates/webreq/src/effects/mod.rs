//! Emission backends.
//!
//! A [`PreparedRequest`](crate::PreparedRequest) maps onto either a two-phase
//! [`Connection`] (open, configure, connect, then write the body) or, with the
//! `reqwest` feature, a complete `reqwest::blocking::Request`.
//!
//! The connection transport is supplied by the caller through [`Transport`];
//! this crate decides what to set on it and when to write the body.

mod connection;
#[cfg(feature = "reqwest")]
mod request;

pub use connection::{Connection, DEFAULT_CHUNK_SIZE, OutputMode, PendingConnection, Transport};
