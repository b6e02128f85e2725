// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Media type inference from a filename extension.

pub const PDF_MIME_TYPE: &str = "application/pdf";
pub const TIFF_MIME_TYPE: &str = "image/tiff";
pub const JPEG_MIME_TYPE: &str = "image/jpeg";
pub const PNG_MIME_TYPE: &str = "image/png";
pub const BMP_MIME_TYPE: &str = "image/bmp";
pub const GIF_MIME_TYPE: &str = "image/gif";
pub const OCTET_STREAM_MIME_TYPE: &str = "application/octet-stream";

/// Map a filename (or object key) to the MIME type the extraction service expects.
///
/// Only the text after the final `.` is considered, compared case-insensitively.
/// Unknown extensions and names without a `.` fall back to
/// `application/octet-stream`.
///
/// # Example
/// ```
/// use docai_relay::pipeline::mime::resolve_mime_type;
///
/// assert_eq!(resolve_mime_type("scans/2024.03.INVOICE.PDF"), "application/pdf");
/// assert_eq!(resolve_mime_type("README"), "application/octet-stream");
/// ```
pub fn resolve_mime_type(filename: &str) -> &'static str {
    let Some((_, extension)) = filename.rsplit_once('.') else {
        return OCTET_STREAM_MIME_TYPE;
    };

    match extension.to_ascii_lowercase().as_str() {
        "pdf" => PDF_MIME_TYPE,
        "tiff" | "tif" => TIFF_MIME_TYPE,
        "jpg" | "jpeg" => JPEG_MIME_TYPE,
        "png" => PNG_MIME_TYPE,
        "bmp" => BMP_MIME_TYPE,
        "gif" => GIF_MIME_TYPE,
        _ => OCTET_STREAM_MIME_TYPE,
    }
}
