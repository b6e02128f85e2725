// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Message types for remote service and credential events.

use crate::observability::messages::StructuredLog;
use std::fmt::{Display, Formatter};
use tracing::Span;

/// An OAuth2 access token was issued for a service account.
///
/// # Log Level
/// `debug!` - Step detail
pub struct AccessTokenIssued<'a> {
    pub client_email: &'a str,
    pub expires_in: u64,
}

impl Display for AccessTokenIssued<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Access token issued for '{}': expires_in={}s",
            self.client_email, self.expires_in
        )
    }
}

impl StructuredLog for AccessTokenIssued<'_> {
    fn log(&self) {
        tracing::debug!(
            client_email = self.client_email,
            expires_in = self.expires_in,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::debug_span!(
            "access_token",
            span_name = name,
            client_email = self.client_email,
        )
    }
}

/// Longest prefix of a rejected response body that is ever logged.
pub const MAX_LOGGED_BODY_CHARS: usize = 512;

/// A remote endpoint answered with a non-success status.
///
/// # Log Level
/// `warn!` - The caller turns this into an error; at most
/// [`MAX_LOGGED_BODY_CHARS`] characters of the body are kept for diagnosis
///
/// # Example
/// ```
/// use docai_relay::observability::messages::backend::RemoteCallRejected;
///
/// let msg = RemoteCallRejected {
///     endpoint: "https://us-documentai.googleapis.com",
///     status: 403,
///     body: "PERMISSION_DENIED",
/// };
///
/// tracing::warn!("{}", msg);
/// ```
pub struct RemoteCallRejected<'a> {
    pub endpoint: &'a str,
    pub status: u16,
    pub body: &'a str,
}

impl RemoteCallRejected<'_> {
    /// The logged part of the body, cut on a character boundary.
    pub fn body_excerpt(&self) -> &str {
        match self.body.char_indices().nth(MAX_LOGGED_BODY_CHARS) {
            Some((end, _)) => &self.body[..end],
            None => self.body,
        }
    }
}

impl Display for RemoteCallRejected<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Call to '{}' rejected with HTTP {}: {}",
            self.endpoint,
            self.status,
            self.body_excerpt()
        )
    }
}

impl StructuredLog for RemoteCallRejected<'_> {
    fn log(&self) {
        tracing::warn!(endpoint = self.endpoint, status = self.status, "{}", self);
    }

    fn span(&self, name: &str) -> Span {
        tracing::warn_span!(
            "remote_call_rejected",
            span_name = name,
            endpoint = self.endpoint,
            status = self.status,
        )
    }
}
