//! Request-object representation backed by `reqwest::blocking`.

use reqwest::blocking::{Body, Client, Request, Response};
use reqwest::header::AUTHORIZATION;
use tracing::debug;
use webreq_transfer::{ProgressReader, ProgressTracker};

use crate::core::{PreparedBody, PreparedRequest, header_pair};
use crate::data::RequestSpec;
use crate::error::{Error, Result};

impl PreparedRequest {
    /// Build a fully formed request, body included, ready for a client to send.
    ///
    /// A stream body on a method that cannot carry an entity is rejected with
    /// [`Error::UnsupportedBody`] instead of being dropped.
    pub fn into_request(self) -> Result<Request> {
        let PreparedRequest {
            method,
            url,
            headers,
            body,
            transfer,
            cancel,
            ..
        } = self;

        if matches!(body, Some(PreparedBody::Stream(_))) && !method.supports_entity() {
            return Err(Error::UnsupportedBody { method });
        }

        let mut request = Request::new(method.into(), url);
        let map = request.headers_mut();
        for (name, value) in &headers {
            let (header_name, mut header_value) = header_pair(name, value)?;
            if header_name == AUTHORIZATION {
                header_value.set_sensitive(true);
            }
            map.insert(header_name, header_value);
        }

        *request.body_mut() = match body {
            None => None,
            Some(PreparedBody::Form(form)) => Some(Body::from(form)),
            Some(PreparedBody::Stream(source)) => {
                transfer.validate()?;
                let (reader, length, on_progress) = source.into_parts();
                let tracker = ProgressTracker::new(on_progress, length, transfer.progress_interval);
                let mut reader = ProgressReader::new(reader, tracker);
                if let Some(cancel) = cancel {
                    reader = reader.with_cancel(cancel);
                }
                Some(match length {
                    Some(length) => Body::sized(reader, length),
                    None => Body::new(reader),
                })
            }
        };

        debug!(%method, url = %request.url(), "built request object");
        Ok(request)
    }
}

impl RequestSpec {
    /// Prepare this spec as a request object.
    ///
    /// The entity check runs before preparation, so an unsupported body is
    /// left attached to the spec.
    pub fn request(&mut self) -> Result<Request> {
        if self.has_body() && !self.method.supports_entity() {
            return Err(Error::UnsupportedBody {
                method: self.method,
            });
        }
        self.prepare()?.into_request()
    }

    /// Build the request object and execute it on `client`.
    pub fn send(&mut self, client: &Client) -> Result<Response> {
        let request = self.request()?;
        Ok(client.execute(request)?)
    }
}
