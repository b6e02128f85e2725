// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

pub mod backends;      // storage + extraction clients
pub mod config;        // env / YAML config, service-account keys
pub mod errors;        // error handling
pub mod observability;
pub mod pipeline;      // event → extracted text
pub mod traits;        // backend seams
