// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use crate::config::consts::{CREDENTIALS_VAR, DEFAULT_TOKEN_URI};
use crate::errors::{HandlerError, HandlerResult};
use serde::Deserialize;
use std::fmt;

const SERVICE_ACCOUNT_TYPE: &str = "service_account";

/// Google service-account key, as downloaded from the cloud console.
///
/// Only the fields needed for the JWT-bearer token exchange are kept; the
/// rest of the key file is ignored.
#[derive(Clone, Deserialize)]
pub struct ServiceAccountKey {
    #[serde(rename = "type", default)]
    pub key_type: Option<String>,
    pub client_email: String,
    pub private_key: String,
    #[serde(default)]
    pub private_key_id: Option<String>,
    #[serde(default = "default_token_uri")]
    pub token_uri: String,
    #[serde(default)]
    pub project_id: Option<String>,
}

fn default_token_uri() -> String {
    DEFAULT_TOKEN_URI.to_string()
}

impl ServiceAccountKey {
    /// Parse a JSON-encoded key.
    ///
    /// Fails with a configuration error when the text is not JSON, is not an
    /// object, lacks `client_email`/`private_key`, or declares a credential
    /// type other than `service_account`.
    pub fn from_json(raw: &str) -> HandlerResult<Self> {
        let value: serde_json::Value = serde_json::from_str(raw).map_err(|e| {
            HandlerError::Configuration(format!("{CREDENTIALS_VAR} is not valid JSON: {e}"))
        })?;

        if !value.is_object() {
            return Err(HandlerError::Configuration(format!(
                "{CREDENTIALS_VAR} must be a JSON object"
            )));
        }

        let key: ServiceAccountKey = serde_json::from_value(value).map_err(|e| {
            HandlerError::Configuration(format!(
                "{CREDENTIALS_VAR} is not a service-account key: {e}"
            ))
        })?;

        match key.key_type.as_deref() {
            None | Some(SERVICE_ACCOUNT_TYPE) => Ok(key),
            Some(other) => Err(HandlerError::Configuration(format!(
                "Unsupported credential type '{other}', expected '{SERVICE_ACCOUNT_TYPE}'"
            ))),
        }
    }
}

// Keeps the private key out of logs and panic messages.
impl fmt::Debug for ServiceAccountKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServiceAccountKey")
            .field("client_email", &self.client_email)
            .field("private_key_id", &self.private_key_id)
            .field("token_uri", &self.token_uri)
            .field("project_id", &self.project_id)
            .finish_non_exhaustive()
    }
}
