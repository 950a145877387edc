use std::fmt;
use std::mem;

use tracing::{debug, warn};
use url::Url;
use webreq_transfer::{CancelHandle, TransferOptions};

use crate::core::encode::{FORM_CONTENT_TYPE, append_query, encode_pairs, header_pair};
use crate::data::spec::BodySlot;
use crate::data::{BodySource, HttpMethod, RequestSpec};
use crate::error::{Error, Result};

pub const AUTHORIZATION: &str = "Authorization";
pub const CONTENT_TYPE: &str = "Content-Type";
pub const CONTENT_LENGTH: &str = "Content-Length";
pub const TRANSFER_ENCODING: &str = "Transfer-Encoding";

/// Non-fatal overrides detected while preparing a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EmitWarning {
    /// A body stream replaced the form-encoded parameters of a body-bearing request.
    StreamOverridesParams { dropped: usize },

    /// Basic auth replaced a user-supplied `Authorization` header.
    AuthOverridesHeader,

    /// A user-supplied `Content-Length` or `Transfer-Encoding` header was
    /// removed; body framing is derived from the body alone.
    FramingHeaderDropped { name: String },
}

impl fmt::Display for EmitWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::StreamOverridesParams { dropped } => write!(
                f,
                "both body parameters and a body stream were set; {dropped} parameter(s) dropped in favour of the stream"
            ),
            Self::AuthOverridesHeader => {
                f.write_str("basic auth replaced a user-supplied Authorization header")
            }
            Self::FramingHeaderDropped { name } => {
                write!(f, "user-supplied {name} header dropped; framing follows the body")
            }
        }
    }
}

#[derive(Debug)]
pub enum PreparedBody {
    /// URL-encoded parameters of a body-bearing request.
    Form(String),
    Stream(BodySource),
}

/// Finalized request, computed once and mapped onto either backend.
///
/// Holds the final address (query already applied), headers in emission
/// order with basic auth applied last, and the body moved out of the spec.
#[derive(Debug)]
pub struct PreparedRequest {
    pub(crate) method:   HttpMethod,
    pub(crate) url:      Url,
    pub(crate) headers:  Vec<(String, String)>,
    pub(crate) body:     Option<PreparedBody>,
    pub(crate) warnings: Vec<EmitWarning>,
    pub(crate) transfer: TransferOptions,
    pub(crate) cancel:   Option<CancelHandle>,
}

impl PreparedRequest {
    pub fn method(&self) -> HttpMethod { self.method }

    pub fn url(&self) -> &Url { &self.url }

    pub fn headers(&self) -> &[(String, String)] { &self.headers }

    /// Case-insensitive header lookup.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    pub fn body(&self) -> Option<&PreparedBody> { self.body.as_ref() }

    pub fn warnings(&self) -> &[EmitWarning] { &self.warnings }
}

fn is_framing_header(name: &str) -> bool {
    name.eq_ignore_ascii_case(CONTENT_LENGTH) || name.eq_ignore_ascii_case(TRANSFER_ENCODING)
}

fn set_header(headers: &mut Vec<(String, String)>, name: &str, value: String) -> bool {
    let before = headers.len();
    headers.retain(|(n, _)| !n.eq_ignore_ascii_case(name));
    let replaced = headers.len() != before;
    headers.push((name.to_string(), value));
    replaced
}

impl RequestSpec {
    /// Finalize this spec into a [`PreparedRequest`].
    ///
    /// The attached body is single-use: it moves into the prepared request,
    /// and preparing again afterwards fails with [`Error::BodyConsumed`].
    /// Nothing is consumed when preparation fails.
    pub fn prepare(&mut self) -> Result<PreparedRequest> {
        if matches!(self.body, BodySlot::Consumed) {
            return Err(Error::BodyConsumed);
        }

        let mut warnings = Vec::new();
        let params_in_body = self.method.is_body_bearing() && !self.params.is_empty();

        let url = if !self.params.is_empty() && !self.method.is_body_bearing() {
            append_query(&self.url, &encode_pairs(self.param_entries()))
        } else {
            self.url.clone()
        };

        let mut headers = Vec::with_capacity(self.headers.len() + 2);
        for (name, value) in &self.headers {
            header_pair(name, value)?;
            if is_framing_header(name) {
                let warning = EmitWarning::FramingHeaderDropped { name: name.clone() };
                warn!(url = %url, "{warning}");
                warnings.push(warning);
                continue;
            }
            headers.push((name.clone(), value.clone()));
        }

        if let Some(credentials) = &self.basic_auth {
            let value = credentials.header_value()?;
            if set_header(&mut headers, AUTHORIZATION, value) {
                warn!(url = %url, "{}", EmitWarning::AuthOverridesHeader);
                warnings.push(EmitWarning::AuthOverridesHeader);
            }
        }

        let body = match mem::take(&mut self.body) {
            BodySlot::Ready(source) => {
                self.body = BodySlot::Consumed;
                if params_in_body {
                    let warning = EmitWarning::StreamOverridesParams {
                        dropped: self.params.len(),
                    };
                    warn!(url = %url, "{warning}");
                    warnings.push(warning);
                }
                Some(PreparedBody::Stream(source))
            }
            slot => {
                self.body = slot;
                if params_in_body {
                    if !headers.iter().any(|(n, _)| n.eq_ignore_ascii_case(CONTENT_TYPE)) {
                        headers.push((CONTENT_TYPE.to_string(), FORM_CONTENT_TYPE.to_string()));
                    }
                    Some(PreparedBody::Form(encode_pairs(self.param_entries())))
                } else {
                    None
                }
            }
        };

        debug!(method = %self.method, url = %url, headers = headers.len(), body = body.is_some(), "prepared request");

        Ok(PreparedRequest {
            method: self.method,
            url,
            headers,
            body,
            warnings,
            transfer: self.transfer,
            cancel: self.cancel.clone(),
        })
    }
}
