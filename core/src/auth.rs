//! Session establishment against the server's auth endpoints.
//!
//! Logging in both returns the session token and primes the client's cookie
//! jar; every later call from the same client rides that session with no
//! further caller action.

use serde_json::Value;

use crate::client::ApiClient;
use crate::error::ApiError;
use crate::http::RequestDescriptor;
use crate::shape::Shape;

impl ApiClient {
    /// Establish a session. Returns the server's session token; the session
    /// cookie is captured by this client's jar as a side effect.
    pub fn login(&self, username: &str, password: &str) -> Result<String, ApiError> {
        let descriptor = RequestDescriptor::post("auth/login")
            .query("username", username)
            .query("password", password);
        self.request(&descriptor, &Shape::checked(Value::is_string))
    }

    /// Invalidate the current session on the server. The jar may still hold
    /// the stale cookie afterwards; the server no longer honors it.
    pub fn logout(&self) -> Result<(), ApiError> {
        self.execute(&RequestDescriptor::put("auth/logout")).map(|_| ())
    }
}
