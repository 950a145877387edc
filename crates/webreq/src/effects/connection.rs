use std::io::{self, Write};

use tracing::debug;
use url::Url;
use webreq_transfer::{CancelHandle, StreamTransferer, TransferError, TransferOptions};

use crate::core::{CONTENT_LENGTH, PreparedBody, PreparedRequest};
use crate::data::{HttpMethod, RequestSpec};
use crate::error::{Error, Result};

/// Chunk size requested for bodies of unknown length.
pub const DEFAULT_CHUNK_SIZE: usize = 8192;

/// How a connection frames the body it is about to receive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    /// No body will be written.
    #[default]
    None,
    /// Exactly this many bytes follow, announced by `Content-Length`.
    FixedLength(u64),
    /// Length unknown; the body is sent in chunks of at most this size.
    Chunked(usize),
}

/// Opens connection handles for an address.
///
/// Opening yields an unconnected handle: method, headers and output mode
/// are fixed first, and the transport connects afterwards.
pub trait Transport {
    type Conn: Connection;

    fn open(&self, url: &Url) -> io::Result<Self::Conn>;
}

/// Low-level, two-phase request handle.
pub trait Connection {
    /// Writable body sink. Dropping it releases the borrow on the connection.
    type Sink<'a>: Write
    where
        Self: 'a;

    fn set_method(&mut self, method: HttpMethod);

    /// Set a header, replacing any header of the same name.
    fn set_header(&mut self, name: &str, value: &str);

    fn set_output_mode(&mut self, mode: OutputMode);

    /// Establish the connection. Headers and method are fixed from here on.
    fn connect(&mut self) -> io::Result<()>;

    /// Body sink; only available once connected with an output mode set.
    fn sink(&mut self) -> io::Result<Self::Sink<'_>>;

    /// Complete the body (for example write the terminating chunk).
    fn finish(&mut self) -> io::Result<()> { Ok(()) }
}

/// A connection with method and headers applied, waiting for phase two.
///
/// Call [`connect`](Self::connect) to establish the transport and write the
/// body, or establish it yourself through [`connection_mut`](Self::connection_mut)
/// and then call [`on_connected`](Self::on_connected).
#[derive(Debug)]
pub struct PendingConnection<C> {
    connection: C,
    method:     HttpMethod,
    body:       Option<PreparedBody>,
    transfer:   TransferOptions,
    cancel:     Option<CancelHandle>,
}

impl<C: Connection> PendingConnection<C> {
    pub fn connection(&self) -> &C { &self.connection }

    pub fn connection_mut(&mut self) -> &mut C { &mut self.connection }

    /// `true` when phase two has bytes to write.
    pub fn has_body(&self) -> bool { self.body.is_some() }

    pub fn connect(mut self) -> Result<C> {
        self.connection.connect().map_err(Error::Connection)?;
        self.on_connected()
    }

    /// Write the body into an already established connection.
    pub fn on_connected(self) -> Result<C> {
        let Self {
            mut connection,
            method,
            body,
            transfer,
            cancel,
        } = self;

        match body {
            None => return Ok(connection),
            Some(PreparedBody::Form(form)) => {
                let mut sink = connection.sink().map_err(Error::Connection)?;
                sink.write_all(form.as_bytes())
                    .and_then(|()| sink.flush())
                    .map_err(|source| TransferError::Io {
                        transferred: 0,
                        source,
                    })?;
                debug!(%method, bytes = form.len(), "wrote form body");
            }
            Some(PreparedBody::Stream(source)) => {
                let (reader, length, on_progress) = source.into_parts();
                let sink = connection.sink().map_err(Error::Connection)?;

                let mut transferer = StreamTransferer::new(transfer).with_total_bytes(length);
                if let Some(on_progress) = on_progress {
                    transferer = transferer.with_progress(on_progress);
                }
                if let Some(cancel) = cancel {
                    transferer = transferer.with_cancel(cancel);
                }
                let written = transferer.transfer(reader, sink)?;
                debug!(%method, bytes = written, "streamed request body");
            }
        }

        connection.finish().map_err(Error::Connection)?;
        Ok(connection)
    }
}

impl PreparedRequest {
    /// Phase one of the connection representation: open a handle and apply
    /// method, headers and body framing.
    pub fn into_connection<T: Transport>(self, transport: &T) -> Result<PendingConnection<T::Conn>> {
        let PreparedRequest {
            method,
            url,
            headers,
            body,
            transfer,
            cancel,
            ..
        } = self;

        let mut connection = transport.open(&url).map_err(Error::Connection)?;
        connection.set_method(method);
        for (name, value) in &headers {
            connection.set_header(name, value);
        }

        let mode = match &body {
            None => OutputMode::None,
            Some(PreparedBody::Form(form)) => OutputMode::FixedLength(form.len() as u64),
            Some(PreparedBody::Stream(source)) => match source.length() {
                Some(length) => OutputMode::FixedLength(length),
                None => OutputMode::Chunked(DEFAULT_CHUNK_SIZE),
            },
        };
        if let OutputMode::FixedLength(length) = mode {
            connection.set_header(CONTENT_LENGTH, &length.to_string());
        }
        connection.set_output_mode(mode);

        debug!(%method, %url, ?mode, "opened connection representation");

        Ok(PendingConnection {
            connection,
            method,
            body,
            transfer,
            cancel,
        })
    }
}

impl RequestSpec {
    /// Prepare this spec and open a connection representation on `transport`.
    pub fn connection<T: Transport>(&mut self, transport: &T) -> Result<PendingConnection<T::Conn>> {
        self.prepare()?.into_connection(transport)
    }
}
