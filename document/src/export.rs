//! Export plan: which pages and files a document exports to.
//!
//! Capturing pixels belongs to the host. This module only fixes the page
//! geometry, the raster scale, and the output names, so every host exports
//! the same files for the same document.

#[cfg(test)]
#[path = "export_test.rs"]
mod export_test;

use serde::{Deserialize, Serialize};

use crate::consts::{
    PAGE_HEIGHT_MM, PAGE_WIDTH_MM, PDF_RASTER_SCALE, PNG_RASTER_SCALE, PREVIEW_HEIGHT_PX, PREVIEW_WIDTH_PX,
};
use crate::doc::{BrochureContent, SideKey};

/// Stem used when the requested one sanitizes to nothing.
const FALLBACK_STEM: &str = "brochure";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    Pdf,
    Png,
}

impl ExportFormat {
    #[must_use]
    pub fn raster_scale(self) -> u32 {
        match self {
            Self::Pdf => PDF_RASTER_SCALE,
            Self::Png => PNG_RASTER_SCALE,
        }
    }
}

/// One captured side and where it lands.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportPage {
    pub side: SideKey,
    /// Output file for PNG exports; PDF pages share the plan's file.
    pub file_name: Option<String>,
    pub width_mm: f64,
    pub height_mm: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportPlan {
    pub format: ExportFormat,
    /// Capture scale applied to the preview canvas.
    pub scale: u32,
    /// Captured pixel size of one side.
    pub capture_width_px: u32,
    pub capture_height_px: u32,
    /// The single output document for PDF exports.
    pub file_name: Option<String>,
    pub pages: Vec<ExportPage>,
}

impl ExportPlan {
    /// Plan an export of every present side, front first.
    #[must_use]
    pub fn for_document(content: &BrochureContent, file_stem: &str, format: ExportFormat) -> Self {
        let stem = sanitize_file_stem(file_stem);
        let scale = format.raster_scale();
        let pages = SideKey::ALL
            .into_iter()
            .filter(|side| content.side(*side).is_some())
            .map(|side| ExportPage {
                side,
                file_name: match format {
                    ExportFormat::Pdf => None,
                    ExportFormat::Png => Some(format!("{stem}-{}.png", side.as_str())),
                },
                width_mm: PAGE_WIDTH_MM,
                height_mm: PAGE_HEIGHT_MM,
            })
            .collect();
        Self {
            format,
            scale,
            capture_width_px: PREVIEW_WIDTH_PX * scale,
            capture_height_px: PREVIEW_HEIGHT_PX * scale,
            file_name: match format {
                ExportFormat::Pdf => Some(format!("{stem}.pdf")),
                ExportFormat::Png => None,
            },
            pages,
        }
    }
}

/// Make `raw` safe to use as a file name stem.
///
/// Path separators, reserved punctuation, and control characters become `-`;
/// surrounding whitespace and dots are trimmed.
#[must_use]
pub fn sanitize_file_stem(raw: &str) -> String {
    let cleaned: String = raw
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '-',
            c if c.is_control() => '-',
            c => c,
        })
        .collect();
    let trimmed = cleaned.trim_matches(|c: char| c.is_whitespace() || c == '.');
    if trimmed.is_empty() { FALLBACK_STEM.to_string() } else { trimmed.to_string() }
}
