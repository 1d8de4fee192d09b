//! The executing client: one HTTP agent, one session, one error boundary.
//!
//! # Design
//! `ApiClient` owns a cookie-holding `ureq::Agent`. The cookie jar is the
//! session store: a login-established `JSESSIONID` rides along on every
//! later call with no caller involvement, and two client instances never
//! share session state. Non-2xx statuses come back as data rather than
//! transport errors (`http_status_as_error(false)`), keeping status
//! interpretation in one place. Calls run to completion on the calling
//! thread; there is no retry and no cancellation. The transport's global
//! timeout surfaces as a `NetworkFailure` like any other pre-response error.

use std::fmt;
use std::time::Duration;

use log::debug;
use serde::de::DeserializeOwned;
use serde_json::Value;
use ureq::Agent;

use crate::error::{self, ApiError};
use crate::http::{Method, RequestDescriptor};
use crate::shape::Shape;

/// Client for one repository instance, holding its session for the life of
/// the client.
#[derive(Clone)]
pub struct ApiClient {
    agent: Agent,
    base_url: String,
}

impl fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.base_url)
            .finish()
    }
}

impl ApiClient {
    /// Create a client for the API rooted at `base_url`.
    pub fn new(base_url: &str) -> Self {
        let agent = Agent::config_builder()
            .http_status_as_error(false)
            .timeout_global(Some(Duration::from_secs(30)))
            .build()
            .new_agent();
        Self {
            agent,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Execute a request and return the raw, untyped response body.
    ///
    /// The session cookie jar is read before the call and updated as a side
    /// effect of the call completing. All failures are normalized: transport
    /// errors to [`ApiError::NetworkFailure`], non-2xx statuses to
    /// [`ApiError::HttpError`], and a 2xx body that is not JSON to
    /// [`ApiError::ShapeMismatch`]. An empty 2xx body yields `Value::Null`.
    pub fn execute(&self, descriptor: &RequestDescriptor) -> Result<Value, ApiError> {
        let url = descriptor.url(&self.base_url);
        debug!("{} {}", descriptor.method, url);

        let sent = match (descriptor.method, &descriptor.body) {
            (Method::Get, _) => self.agent.get(&url).call(),
            (Method::Put, Some(body)) => self
                .agent
                .put(&url)
                .content_type("application/json")
                .send(body.to_string().as_bytes()),
            (Method::Put, None) => self.agent.put(&url).send_empty(),
            (Method::Post, Some(body)) => self
                .agent
                .post(&url)
                .content_type("application/json")
                .send(body.to_string().as_bytes()),
            (Method::Post, None) => self.agent.post(&url).send_empty(),
        };

        let mut response = sent.map_err(|err| error::transport_error(&err))?;
        let status = response.status();
        let body = response
            .body_mut()
            .read_to_string()
            .map_err(|err| error::transport_error(&err))?;

        if !status.is_success() {
            return Err(error::status_error(status, &body));
        }
        if body.is_empty() {
            return Ok(Value::Null);
        }
        serde_json::from_str(&body).map_err(|err| {
            ApiError::ShapeMismatch(format!("response body is not valid JSON: {err}"))
        })
    }

    /// Execute a request and resolve the response against a declared shape.
    ///
    /// Mis-shaped data never escapes this call: a failed validator or a
    /// failed deserialization rejects with [`ApiError::ShapeMismatch`].
    pub fn request<T: DeserializeOwned>(
        &self,
        descriptor: &RequestDescriptor,
        shape: &Shape<T>,
    ) -> Result<T, ApiError> {
        let raw = self.execute(descriptor)?;
        shape.resolve(raw)
    }

    /// Execute a request and hand back the body with no shape checking.
    ///
    /// Opting out of verification makes the value's structure the caller's
    /// responsibility.
    pub fn request_raw(&self, descriptor: &RequestDescriptor) -> Result<Value, ApiError> {
        self.execute(descriptor)
    }
}
