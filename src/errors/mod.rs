// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

mod handler;

pub use handler::{HandlerError, HandlerResult};
