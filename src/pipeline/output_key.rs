// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use crate::config::consts::{OUTPUT_EXTENSION, OUTPUT_PREFIX};

/// Destination key for the text extracted from `source_key`.
///
/// The final extension of the last path segment is dropped (a dot followed by
/// at least one character that is neither `.` nor `/`), the result is placed
/// under `processed_text/` and `.txt` is appended. Directory segments are kept.
///
/// # Example
/// ```
/// use docai_relay::pipeline::output_key::derive_output_key;
///
/// assert_eq!(derive_output_key("invoice.pdf"), "processed_text/invoice.txt");
/// assert_eq!(derive_output_key("a.b.pdf"), "processed_text/a.b.txt");
/// assert_eq!(derive_output_key("noext"), "processed_text/noext.txt");
/// ```
pub fn derive_output_key(source_key: &str) -> String {
    format!(
        "{OUTPUT_PREFIX}{}{OUTPUT_EXTENSION}",
        strip_last_extension(source_key)
    )
}

fn strip_last_extension(key: &str) -> &str {
    match key.rfind('.') {
        Some(dot) => {
            let extension = &key[dot + 1..];
            if extension.is_empty() || extension.contains('/') {
                key
            } else {
                &key[..dot]
            }
        }
        None => key,
    }
}
