//! Caller credential forwarded to the account service.

use std::fmt;

use axum::http::HeaderValue;

/// Raw `Authorization` header value of the inbound request, e.g. `Bearer abc123`.
///
/// The service never inspects it; the exact header bytes are passed to every
/// balance mutation made on the caller's behalf.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(HeaderValue);

impl Credential {
    pub fn new(mut header_value: HeaderValue) -> Self {
        header_value.set_sensitive(true);
        Self(header_value)
    }

    pub fn from_static(header_value: &'static str) -> Self {
        Self::new(HeaderValue::from_static(header_value))
    }

    pub fn header_value(&self) -> &HeaderValue {
        &self.0
    }

    pub fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }
}

// Keeps tokens out of logs.
impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential(..)")
    }
}
