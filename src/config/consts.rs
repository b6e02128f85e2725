// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

/// Environment variable naming an optional YAML configuration file
pub const CONFIG_PATH_VAR: &str = "DOCAI_RELAY_CONFIG";
/// Google Cloud project that owns the processor
pub const PROJECT_ID_VAR: &str = "GOOGLE_PROJECT_ID";
/// Processor location, e.g. `us` or `eu`
pub const LOCATION_VAR: &str = "GOOGLE_LOCATION";
/// Processor id within the project and location
pub const PROCESSOR_ID_VAR: &str = "GOOGLE_PROCESSOR_ID";
/// Inline JSON service-account key
pub const CREDENTIALS_VAR: &str = "GOOGLE_CREDENTIALS";
/// Path to a JSON service-account key file
pub const CREDENTIALS_PATH_VAR: &str = "GOOGLE_APPLICATION_CREDENTIALS";
/// Base URL override for the extraction endpoint
pub const ENDPOINT_VAR: &str = "GOOGLE_DOCUMENTAI_ENDPOINT";

/// Namespace segment every output key starts with
pub const OUTPUT_PREFIX: &str = "processed_text/";
/// Extension appended to every output key
pub const OUTPUT_EXTENSION: &str = ".txt";
/// Content type of every output object
pub const OUTPUT_CONTENT_TYPE: &str = "text/plain";

/// Default OAuth2 token endpoint for service accounts
pub const DEFAULT_TOKEN_URI: &str = "https://oauth2.googleapis.com/token";
/// Scope requested for Document AI calls
pub const CLOUD_PLATFORM_SCOPE: &str = "https://www.googleapis.com/auth/cloud-platform";
