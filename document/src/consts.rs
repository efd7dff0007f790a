//! Shared constants for the document crate.

// ── Sentinels and seeds ─────────────────────────────────────────

/// Background `value` meaning "no background" for every background kind.
pub const NONE_VALUE: &str = "none";

/// Opacity of the seed background a first merge starts from.
pub const SEED_BACKGROUND_OPACITY: f64 = 1.0;

/// Color of the seed border a first merge starts from.
pub const DEFAULT_BORDER_COLOR: &str = "#000000";

/// Opacity assigned to an uploaded panel background image.
pub const UPLOADED_BACKGROUND_OPACITY: f64 = 0.7;

// ── Resolution defaults ─────────────────────────────────────────

/// Default opacity of an image background painted on a single panel.
pub const PANEL_IMAGE_OPACITY: f64 = 0.6;

/// Default opacity of an image background painted as the global layer.
pub const GLOBAL_IMAGE_OPACITY: f64 = 0.35;

/// Default opacity of a color, pattern, or gradient painted on a single panel.
pub const PANEL_FILL_OPACITY: f64 = 0.05;

/// Default opacity of a color, pattern, or gradient painted as the global layer.
pub const GLOBAL_FILL_OPACITY: f64 = 0.03;

/// Share of the edge covered by a `center` border with no `widthPercent`.
pub const DEFAULT_CENTER_BORDER_PERCENT: f64 = 50.0;

/// Angle of linear gradients, in degrees.
pub const LINEAR_GRADIENT_ANGLE_DEG: f64 = 135.0;

/// QR code size in pixels when the block has no `fontSize`.
pub const DEFAULT_QR_SIZE_PX: f64 = 120.0;

// ── Block ids ───────────────────────────────────────────────────

/// Length of generated block ids.
pub const BLOCK_ID_LEN: usize = 9;

/// Alphabet of generated block ids (base 36).
pub const BLOCK_ID_ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

// ── Page geometry ───────────────────────────────────────────────

/// Exported page width in millimetres (A4 landscape).
pub const PAGE_WIDTH_MM: f64 = 297.0;

/// Exported page height in millimetres (A4 landscape).
pub const PAGE_HEIGHT_MM: f64 = 210.0;

/// On-screen preview width of one side, in CSS pixels.
pub const PREVIEW_WIDTH_PX: u32 = 1122;

/// On-screen preview height of one side, in CSS pixels.
pub const PREVIEW_HEIGHT_PX: u32 = 794;

/// Raster scale used when capturing sides for PDF pages.
pub const PDF_RASTER_SCALE: u32 = 2;

/// Raster scale used when capturing sides as standalone PNG images.
pub const PNG_RASTER_SCALE: u32 = 3;
