//! Request construction with two emission representations.
//!
//! A [`RequestSpec`] accumulates method, address, parameters, headers, basic
//! credentials and an optional body stream. It is finalized once by
//! [`RequestSpec::prepare`] and then emitted as either:
//!
//! - a two-phase **connection**: [`PreparedRequest::into_connection`] opens a
//!   handle on a [`Transport`] and applies method, headers and body framing;
//!   [`PendingConnection::connect`] establishes it and streams the body
//! - a **request object** (feature `reqwest`): `PreparedRequest::into_request`
//!   builds a `reqwest::blocking::Request` with the body attached
//!
//! # Architecture
//!
//! - `data` - request description types
//! - `core` - pure transformations (encoding, auth, preparation)
//! - `effects` - emission backends behind the [`Transport`]/[`Connection`] traits
//!
//! Body copying and progress reporting live in [`webreq_transfer`].
//!
//! # Example
//!
//! ```
//! use webreq::{PreparedBody, RequestSpec};
//!
//! let mut spec = RequestSpec::post("http://example.com/login")?
//!     .param("user", "alice")
//!     .param("note", "hi there");
//!
//! let prepared = spec.prepare()?;
//! assert_eq!(prepared.url().as_str(), "http://example.com/login");
//! assert!(matches!(
//!     prepared.body(),
//!     Some(PreparedBody::Form(form)) if form == "user=alice&note=hi+there"
//! ));
//! # Ok::<(), webreq::Error>(())
//! ```

mod core;
mod data;
mod effects;
mod error;

pub use crate::core::{
    AUTHORIZATION, CONTENT_LENGTH, CONTENT_TYPE, Credentials, EmitWarning, FORM_CONTENT_TYPE,
    PreparedBody, PreparedRequest, TRANSFER_ENCODING, append_query, encode_pairs, encode_value,
};
pub use crate::data::{BodySource, HttpMethod, RequestSpec};
pub use crate::effects::{Connection, DEFAULT_CHUNK_SIZE, OutputMode, PendingConnection, Transport};
pub use crate::error::{Error, Result};

pub use webreq_transfer::{CancelHandle, Progress, ProgressCallback, TransferError, TransferOptions};
