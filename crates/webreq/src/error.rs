//! Error types for webreq.

use std::io;
use std::path::PathBuf;

use thiserror::Error;
use webreq_transfer::TransferError;

use crate::data::HttpMethod;

#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid address '{address}': {source}")]
    InvalidAddress {
        address: String,
        #[source]
        source:  url::ParseError,
    },

    #[error("unknown HTTP method: {0}")]
    UnknownMethod(String),

    #[error("basic auth encoding failed: {0}")]
    AuthEncoding(String),

    #[error("cannot encode {0}")]
    Encoding(String),

    #[error(transparent)]
    Transfer(#[from] TransferError),

    #[error("body source {} is unavailable: {source}", path.display())]
    MissingBodySource {
        path:   PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("{method} requests cannot carry a body entity")]
    UnsupportedBody { method: HttpMethod },

    #[error("request body was already consumed by an earlier emission")]
    BodyConsumed,

    #[error("progress interval must be a positive number of bytes")]
    InvalidProgressInterval,

    #[error("connection failed: {0}")]
    Connection(#[source] io::Error),

    #[cfg(feature = "reqwest")]
    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
