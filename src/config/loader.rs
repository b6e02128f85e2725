// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use crate::config::consts::{
    CONFIG_PATH_VAR, CREDENTIALS_PATH_VAR, CREDENTIALS_VAR, ENDPOINT_VAR, LOCATION_VAR,
    PROCESSOR_ID_VAR, PROJECT_ID_VAR,
};
use crate::config::credentials::ServiceAccountKey;
use crate::errors::{HandlerError, HandlerResult};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Process-wide configuration for the relay.
///
/// Built once at startup and handed to the handler. Identity and credentials
/// may be absent here; they are validated at the start of every invocation so
/// a misconfigured function fails each event with a configuration error
/// instead of refusing to start.
///
/// # Fields
/// * `processor` - Which remote extraction pipeline to invoke
/// * `credentials` - Inline JSON service-account key
/// * `credentials_path` - Path to a JSON service-account key file (used when `credentials` is absent)
/// * `endpoint` - Base URL override for the extraction service
///
/// # Example
/// ```yaml
/// processor:
///   project_id: my-project
///   location: us
///   processor_id: 4f2a9c
/// credentials_path: /opt/keys/relay.json
/// ```
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct HandlerConfig {
    #[serde(default)]
    pub processor: ProcessorIdentity,
    #[serde(default)]
    pub credentials: Option<String>,
    #[serde(default)]
    pub credentials_path: Option<PathBuf>,
    #[serde(default)]
    pub endpoint: Option<String>,
}

/// The (project, location, processor id) triple naming a remote processor.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct ProcessorIdentity {
    pub project_id: Option<String>,
    pub location: Option<String>,
    pub processor_id: Option<String>,
}

impl ProcessorIdentity {
    pub fn new(
        project_id: impl Into<String>,
        location: impl Into<String>,
        processor_id: impl Into<String>,
    ) -> Self {
        Self {
            project_id: Some(project_id.into()),
            location: Some(location.into()),
            processor_id: Some(processor_id.into()),
        }
    }

    /// Full resource name of the processor.
    ///
    /// # Example
    /// ```
    /// use docai_relay::config::ProcessorIdentity;
    ///
    /// let identity = ProcessorIdentity::new("p", "us", "proc");
    /// assert_eq!(
    ///     identity.processor_name().unwrap(),
    ///     "projects/p/locations/us/processors/proc"
    /// );
    /// ```
    pub fn processor_name(&self) -> HandlerResult<String> {
        let project_id = required(&self.project_id, PROJECT_ID_VAR)?;
        let location = required(&self.location, LOCATION_VAR)?;
        let processor_id = required(&self.processor_id, PROCESSOR_ID_VAR)?;
        Ok(format!(
            "projects/{project_id}/locations/{location}/processors/{processor_id}"
        ))
    }
}

fn required<'a>(value: &'a Option<String>, name: &str) -> HandlerResult<&'a str> {
    value
        .as_deref()
        .filter(|v| !v.is_empty())
        .ok_or_else(|| HandlerError::Configuration(format!("{name} is not set")))
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

impl HandlerConfig {
    /// Build configuration from the process environment.
    pub fn from_env() -> HandlerResult<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build configuration from an arbitrary variable lookup.
    ///
    /// When `DOCAI_RELAY_CONFIG` names a file it is loaded first; individual
    /// variables then override whatever the file set. Empty values count as
    /// unset.
    pub fn from_lookup<F>(lookup: F) -> HandlerResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = match non_empty(lookup(CONFIG_PATH_VAR)) {
            Some(path) => load_config(path)?,
            None => HandlerConfig::default(),
        };

        if let Some(v) = non_empty(lookup(PROJECT_ID_VAR)) {
            config.processor.project_id = Some(v);
        }
        if let Some(v) = non_empty(lookup(LOCATION_VAR)) {
            config.processor.location = Some(v);
        }
        if let Some(v) = non_empty(lookup(PROCESSOR_ID_VAR)) {
            config.processor.processor_id = Some(v);
        }
        if let Some(v) = non_empty(lookup(CREDENTIALS_VAR)) {
            config.credentials = Some(v);
        }
        if let Some(v) = non_empty(lookup(CREDENTIALS_PATH_VAR)) {
            config.credentials_path = Some(PathBuf::from(v));
        }
        if let Some(v) = non_empty(lookup(ENDPOINT_VAR)) {
            config.endpoint = Some(v);
        }

        Ok(config)
    }

    /// Parse the configured service-account key.
    ///
    /// Inline credentials win over a key file.
    pub fn service_account(&self) -> HandlerResult<ServiceAccountKey> {
        if let Some(inline) = self.credentials.as_deref().filter(|v| !v.is_empty()) {
            return ServiceAccountKey::from_json(inline);
        }

        match &self.credentials_path {
            Some(path) => {
                let raw = fs::read_to_string(path).map_err(|e| {
                    HandlerError::Configuration(format!(
                        "Failed to read credentials file '{}': {e}",
                        path.display()
                    ))
                })?;
                ServiceAccountKey::from_json(&raw)
            }
            None => Err(HandlerError::Configuration(format!(
                "{CREDENTIALS_VAR} is not set"
            ))),
        }
    }
}

/// Load a config from a YAML file
pub fn load_config<P: AsRef<Path>>(path: P) -> HandlerResult<HandlerConfig> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|e| {
        HandlerError::Configuration(format!(
            "Failed to read config file '{}': {e}",
            path.display()
        ))
    })?;
    serde_yaml::from_str(&content).map_err(|e| {
        HandlerError::Configuration(format!(
            "Failed to parse config file '{}': {e}",
            path.display()
        ))
    })
}
