// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! OAuth2 access tokens for a service account (JWT-bearer grant).
//!
//! A short-lived RS256 assertion signed with the service-account key is
//! exchanged at the key's `token_uri` for a bearer token. Tokens are not
//! cached; each invocation asks for its own.

use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::config::consts::CLOUD_PLATFORM_SCOPE;
use crate::config::ServiceAccountKey;
use crate::errors::{HandlerError, HandlerResult};
use crate::observability::messages::backend::{AccessTokenIssued, RemoteCallRejected};
use crate::observability::messages::StructuredLog;

const JWT_BEARER_GRANT: &str = "urn:ietf:params:oauth:grant-type:jwt-bearer";
const ASSERTION_LIFETIME_SECS: u64 = 3600;

/// Claims of the signed assertion.
#[derive(Debug, PartialEq, Eq, Serialize)]
pub(crate) struct AssertionClaims<'a> {
    pub iss: &'a str,
    pub scope: &'a str,
    pub aud: &'a str,
    pub iat: u64,
    pub exp: u64,
}

impl<'a> AssertionClaims<'a> {
    pub(crate) fn new(key: &'a ServiceAccountKey, issued_at: u64) -> Self {
        Self {
            iss: &key.client_email,
            scope: CLOUD_PLATFORM_SCOPE,
            aud: &key.token_uri,
            iat: issued_at,
            exp: issued_at + ASSERTION_LIFETIME_SECS,
        }
    }
}

/// A bearer token. `Debug` never prints the secret.
pub struct AccessToken(String);

impl AccessToken {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AccessToken(..)")
    }
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default)]
    expires_in: u64,
}

/// Sign the JWT assertion for `key`, issued at `issued_at` (unix seconds).
pub(crate) fn sign_assertion(key: &ServiceAccountKey, issued_at: u64) -> HandlerResult<String> {
    let encoding_key = EncodingKey::from_rsa_pem(key.private_key.as_bytes()).map_err(|e| {
        HandlerError::Configuration(format!(
            "Service-account private key is not a valid RSA PEM key: {e}"
        ))
    })?;

    let mut header = Header::new(Algorithm::RS256);
    header.kid = key.private_key_id.clone();

    encode(&header, &AssertionClaims::new(key, issued_at), &encoding_key).map_err(|e| {
        HandlerError::Configuration(format!("Failed to sign token assertion: {e}"))
    })
}

/// Exchange a signed assertion for an access token.
pub async fn fetch_access_token(
    http: &reqwest::Client,
    key: &ServiceAccountKey,
) -> HandlerResult<AccessToken> {
    let issued_at = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or_default();
    let assertion = sign_assertion(key, issued_at)?;

    let response = http
        .post(&key.token_uri)
        .form(&[
            ("grant_type", JWT_BEARER_GRANT),
            ("assertion", assertion.as_str()),
        ])
        .send()
        .await
        .map_err(|e| {
            HandlerError::ExtractionService(format!(
                "Token request to '{}' failed: {e}",
                key.token_uri
            ))
        })?;

    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        RemoteCallRejected {
            endpoint: &key.token_uri,
            status: status.as_u16(),
            body: &body,
        }
        .log();
        return Err(HandlerError::ExtractionService(format!(
            "Token endpoint '{}' returned HTTP {status}",
            key.token_uri
        )));
    }

    let token: TokenResponse = response.json().await.map_err(|e| {
        HandlerError::ExtractionService(format!("Invalid token response: {e}"))
    })?;

    AccessTokenIssued {
        client_email: &key.client_email,
        expires_in: token.expires_in,
    }
    .log();

    Ok(AccessToken(token.access_token))
}
