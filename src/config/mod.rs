// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

mod credentials;
mod loader;
pub mod consts;

pub use credentials::ServiceAccountKey;
pub use loader::{load_config, HandlerConfig, ProcessorIdentity};
