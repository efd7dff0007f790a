//! Image payload decoding for logo and background uploads.
//!
//! An uploaded file becomes a self-contained `data:` URI so the document
//! never references anything outside itself. Raster formats are sniffed and
//! fully decoded before they are accepted; SVG is accepted on a text sniff.

#[cfg(test)]
#[path = "upload_test.rs"]
mod upload_test;

use std::fmt;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde::Serialize;

/// Bytes inspected when sniffing for SVG markup.
const SVG_SNIFF_LEN: usize = 512;

/// MIME type of SVG payloads.
const SVG_MIME: &str = "image/svg+xml";

#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    #[error("image payload is empty")]
    EmptyPayload,
    #[error("unrecognized image format")]
    UnsupportedImage,
    #[error("image decode failed: {0}")]
    Decode(String),
}

/// A base64 `data:` URI holding an image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct DataUri(String);

impl DataUri {
    /// Encode raw bytes under the given MIME type.
    #[must_use]
    pub fn encode(mime: &str, bytes: &[u8]) -> Self {
        Self(format!("data:{mime};base64,{}", STANDARD.encode(bytes)))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn into_string(self) -> String {
        self.0
    }

    /// MIME type between `data:` and `;base64`.
    #[must_use]
    pub fn mime(&self) -> &str {
        self.0
            .strip_prefix("data:")
            .and_then(|rest| rest.split(';').next())
            .unwrap_or_default()
    }
}

impl fmt::Display for DataUri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Decode an uploaded file into an embeddable data URI.
///
/// # Errors
///
/// - `EmptyPayload` for zero bytes.
/// - `UnsupportedImage` when the bytes are neither SVG nor a known raster format.
/// - `Decode` when a recognized raster payload fails to decode.
pub fn decode_image_payload(bytes: &[u8]) -> Result<DataUri, DecodeError> {
    if bytes.is_empty() {
        return Err(DecodeError::EmptyPayload);
    }
    if looks_like_svg(bytes) {
        return Ok(DataUri::encode(SVG_MIME, bytes));
    }
    let format = image::guess_format(bytes).map_err(|_| DecodeError::UnsupportedImage)?;
    image::load_from_memory_with_format(bytes, format).map_err(|e| DecodeError::Decode(e.to_string()))?;
    Ok(DataUri::encode(format.to_mime_type(), bytes))
}

fn looks_like_svg(bytes: &[u8]) -> bool {
    let head = &bytes[..bytes.len().min(SVG_SNIFF_LEN)];
    let text = String::from_utf8_lossy(head);
    let text = text.trim_start_matches('\u{feff}').trim_start();
    text.starts_with("<svg") || (text.starts_with("<?xml") && text.contains("<svg"))
}
