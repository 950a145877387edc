use std::io::Read;
use std::path::Path;

use indexmap::IndexMap;
use url::Url;
use webreq_transfer::{CancelHandle, ProgressCallback, TransferOptions};

use crate::core::Credentials;
use crate::data::{BodySource, HttpMethod};
use crate::error::{Error, Result};

/// Body slot of a [`RequestSpec`]. A body is single-use.
#[derive(Debug, Default)]
pub(crate) enum BodySlot {
    #[default]
    Empty,
    Ready(BodySource),
    Consumed,
}

/// Accumulated description of a request that has not been sent yet.
///
/// Parameters and headers keep insertion order. Writing an existing key
/// replaces its value in place (last write wins, first position kept).
///
/// # Examples
///
/// ```
/// use webreq::{HttpMethod, RequestSpec};
///
/// let spec = RequestSpec::new(HttpMethod::Get, "http://example.com/search")?
///     .param("q", "rust http")
///     .param_if_present("page", None::<&str>)
///     .header("Accept", "application/json")
///     .basic_auth("user", "secret");
///
/// assert_eq!(spec.param_entries().count(), 1);
/// # Ok::<(), webreq::Error>(())
/// ```
#[derive(Debug)]
pub struct RequestSpec {
    pub(crate) method:     HttpMethod,
    pub(crate) url:        Url,
    pub(crate) params:     IndexMap<String, String>,
    pub(crate) headers:    IndexMap<String, String>,
    pub(crate) basic_auth: Option<Credentials>,
    pub(crate) body:       BodySlot,
    pub(crate) transfer:   TransferOptions,
    pub(crate) cancel:     Option<CancelHandle>,
}

fn parse_address(address: &str) -> Result<Url> {
    Url::parse(address).map_err(|source| Error::InvalidAddress {
        address: address.to_string(),
        source,
    })
}

impl RequestSpec {
    /// Fails with [`Error::InvalidAddress`] unless `address` is an absolute URL.
    pub fn new(method: HttpMethod, address: &str) -> Result<Self> {
        Ok(Self::with_url(method, parse_address(address)?))
    }

    pub fn with_url(method: HttpMethod, url: Url) -> Self {
        Self {
            method,
            url,
            params: IndexMap::new(),
            headers: IndexMap::new(),
            basic_auth: None,
            body: BodySlot::Empty,
            transfer: TransferOptions::default(),
            cancel: None,
        }
    }

    pub fn get(address: &str) -> Result<Self> { Self::new(HttpMethod::Get, address) }

    pub fn post(address: &str) -> Result<Self> { Self::new(HttpMethod::Post, address) }

    pub fn put(address: &str) -> Result<Self> { Self::new(HttpMethod::Put, address) }

    pub fn delete(address: &str) -> Result<Self> { Self::new(HttpMethod::Delete, address) }

    /// Replace the target address.
    pub fn address(self, address: &str) -> Result<Self> {
        let url = parse_address(address)?;
        Ok(self.target(url))
    }

    #[must_use]
    pub fn target(mut self, url: Url) -> Self {
        self.url = url;
        self
    }

    /// Add a parameter. Pass `""` when a key must be sent without a value.
    #[must_use]
    pub fn param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.insert(key.into(), value.into());
        self
    }

    /// Add a parameter only when `value` is `Some`. `Some("")` is still added.
    #[must_use]
    pub fn param_if_present<V: Into<String>>(self, key: impl Into<String>, value: Option<V>) -> Self {
        match value {
            Some(value) => self.param(key, value),
            None => self,
        }
    }

    /// Add parameters in the iteration order of `params`.
    #[must_use]
    pub fn params<I, K, V>(mut self, params: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        for (key, value) in params {
            self.params.insert(key.into(), value.into());
        }
        self
    }

    #[must_use]
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    #[must_use]
    pub fn header_if_present<V: Into<String>>(self, name: impl Into<String>, value: Option<V>) -> Self {
        match value {
            Some(value) => self.header(name, value),
            None => self,
        }
    }

    /// Add headers in the iteration order of `headers`.
    #[must_use]
    pub fn headers<I, K, V>(mut self, headers: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        for (name, value) in headers {
            self.headers.insert(name.into(), value.into());
        }
        self
    }

    /// Attach Basic credentials. The `Authorization` header is computed at
    /// emission and replaces any user-supplied one.
    #[must_use]
    pub fn basic_auth(mut self, username: impl Into<String>, password: impl Into<String>) -> Self {
        self.basic_auth = Some(Credentials::new(username, password));
        self
    }

    /// Use `source` as the request body, replacing any earlier body.
    #[must_use]
    pub fn body(mut self, source: BodySource) -> Self {
        self.body = BodySlot::Ready(source);
        self
    }

    /// `length` is `None` when unknown; the connection path then uses chunked transfer.
    #[must_use]
    pub fn body_reader<R: Read + Send + 'static>(
        self,
        reader: R,
        length: Option<u64>,
        on_progress: Option<ProgressCallback>,
    ) -> Self {
        self.body(BodySource::from_reader(reader, length).with_progress(on_progress))
    }

    /// Stream a file as the body. A missing or unreadable file is reported as
    /// [`Error::MissingBodySource`] instead of leaving the body empty.
    pub fn body_file(self, path: impl AsRef<Path>, on_progress: Option<ProgressCallback>) -> Result<Self> {
        let source = BodySource::from_file(path)?;
        Ok(self.body(source.with_progress(on_progress)))
    }

    /// Send `body` as UTF-8 bytes.
    #[must_use]
    pub fn body_string(self, body: impl Into<String>, on_progress: Option<ProgressCallback>) -> Self {
        self.body_bytes(body.into().into_bytes(), on_progress)
    }

    #[must_use]
    pub fn body_bytes(self, body: impl Into<Vec<u8>>, on_progress: Option<ProgressCallback>) -> Self {
        self.body(BodySource::from_bytes(body).with_progress(on_progress))
    }

    /// Bytes between progress callbacks during body transfer. Must be positive.
    pub fn progress_interval(mut self, bytes: u64) -> Result<Self> {
        if bytes == 0 {
            return Err(Error::InvalidProgressInterval);
        }
        self.transfer.progress_interval = bytes;
        Ok(self)
    }

    /// Abort the body transfer when `handle` is cancelled.
    #[must_use]
    pub fn cancel_on(mut self, handle: CancelHandle) -> Self {
        self.cancel = Some(handle);
        self
    }

    pub fn method(&self) -> HttpMethod { self.method }

    pub fn target_url(&self) -> &Url { &self.url }

    pub fn param_entries(&self) -> impl Iterator<Item = (&str, &str)> {
        self.params.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn header_entries(&self) -> impl Iterator<Item = (&str, &str)> {
        self.headers.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn has_basic_auth(&self) -> bool { self.basic_auth.is_some() }

    /// `true` while a body is attached and not yet consumed by an emission.
    pub fn has_body(&self) -> bool { matches!(self.body, BodySlot::Ready(_)) }

    pub fn transfer_options(&self) -> TransferOptions { self.transfer }
}
