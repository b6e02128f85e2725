// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

pub mod extractor;
pub mod storage;

pub use extractor::DocumentExtractor;
pub use storage::{ObjectBody, ObjectStore};
