//! Render view-model: what a side looks like, with every default resolved.
//!
//! DESIGN
//! ======
//! The browser draws the preview; this module decides what it draws. A side
//! becomes a grid of `PanelView`s, each carrying its effective background
//! (panel or global, see [`crate::resolve`]), its two edge borders, and one
//! `BlockView` per block. Renderers never apply defaults of their own, so
//! the on-screen preview and the exported pages agree by construction.
//!
//! Everything here is a pure function of the document: identical input
//! produces identical output.

#[cfg(test)]
#[path = "render_test.rs"]
mod render_test;

use serde::Serialize;

use crate::consts::{DEFAULT_QR_SIZE_PX, PREVIEW_HEIGHT_PX, PREVIEW_WIDTH_PX};
use crate::doc::{
    Block, BlockType, BorderEdge, BrochureContent, FontWeight, IconAlign, Panel, SideKey, TextAlign, VerticalAlign,
};
use crate::resolve::{EffectiveBackground, EffectiveBorder, effective_background, effective_border};

/// Block label that marks a panel as a cover panel.
const COVER_LABEL: &str = "Industry Label";

/// Prefixes that turn a body line into a bullet item.
const BULLET_PREFIXES: [&str; 2] = ["- ", "* "];

// =============================================================================
// VIEW TYPES
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SideView {
    pub side: SideKey,
    /// Grid columns: one per panel, at most three.
    pub columns: u8,
    pub width_px: u32,
    pub height_px: u32,
    pub theme_color: String,
    pub panels: Vec<PanelView>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PanelView {
    pub id: String,
    pub index: usize,
    pub background: Option<EffectiveBackground>,
    pub border_top: Option<EffectiveBorder>,
    pub border_bottom: Option<EffectiveBorder>,
    pub vertical_align: VerticalAlign,
    /// Cover panels center their content both ways, ignoring `vertical_align`.
    pub cover: bool,
    pub blocks: Vec<BlockView>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockView {
    pub id: String,
    pub kind: BlockType,
    pub label: String,
    pub text_align: TextAlign,
    /// CSS numeric weight: 400, 700, or 900.
    pub font_weight: u16,
    pub font_size: Option<f64>,
    /// Text color; `None` leaves the renderer's default.
    pub color: Option<String>,
    pub icon: Option<String>,
    pub icon_align: IconAlign,
    pub body: BlockBody,
}

impl BlockView {
    #[must_use]
    pub fn has_icon(&self) -> bool {
        self.icon.is_some()
    }
}

/// Kind-specific payload of a block.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum BlockBody {
    Text { lines: Vec<TextLine> },
    Icon { name: Option<String>, size_px: Option<f64> },
    /// `src: None` renders the upload placeholder.
    Logo { src: Option<String>, alt: Option<String> },
    Image { src: Option<String>, alt: Option<String> },
    Qr { value: String, size_px: f64, color: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TextLine {
    pub text: String,
    pub bullet: bool,
}

// =============================================================================
// RENDERING
// =============================================================================

/// Build the view of one side. `None` when the side is absent.
#[must_use]
pub fn render_side(content: &BrochureContent, side: SideKey) -> Option<SideView> {
    let panels = &content.side(side)?.panels;
    let theme = content.theme_color.as_str();
    Some(SideView {
        side,
        columns: grid_columns(panels.len()),
        width_px: PREVIEW_WIDTH_PX,
        height_px: PREVIEW_HEIGHT_PX,
        theme_color: theme.to_string(),
        panels: panels
            .iter()
            .enumerate()
            .map(|(index, panel)| render_panel(panel, index, content, theme))
            .collect(),
    })
}

/// Grid column count for a side with `panel_count` panels.
#[must_use]
pub fn grid_columns(panel_count: usize) -> u8 {
    match panel_count {
        0 | 1 => 1,
        2 => 2,
        _ => 3,
    }
}

fn render_panel(panel: &Panel, index: usize, content: &BrochureContent, theme: &str) -> PanelView {
    PanelView {
        id: panel.id.clone(),
        index,
        background: effective_background(panel.background.as_ref(), content.global_background.as_ref(), theme),
        border_top: effective_border(panel.border(BorderEdge::Top), BorderEdge::Top, theme),
        border_bottom: effective_border(panel.border(BorderEdge::Bottom), BorderEdge::Bottom, theme),
        vertical_align: panel.effective_align(),
        cover: panel.blocks.iter().any(|b| b.label == COVER_LABEL),
        blocks: panel.blocks.iter().map(|b| render_block(b, theme)).collect(),
    }
}

/// Build the view of one block against `theme`.
#[must_use]
pub fn render_block(block: &Block, theme: &str) -> BlockView {
    let color = match block.kind {
        BlockType::Subheading => Some(theme.to_string()),
        _ => block.color.clone().filter(|c| !c.is_empty()),
    };
    BlockView {
        id: block.id.clone(),
        kind: block.kind,
        label: block.label.clone(),
        text_align: block.text_align.unwrap_or_default(),
        font_weight: numeric_weight(block.font_weight),
        font_size: block.font_size.filter(|s| *s > 0.0),
        color,
        icon: non_empty(block.icon.as_ref()),
        icon_align: block.icon_align.unwrap_or(IconAlign::Top),
        body: block_body(block, theme),
    }
}

fn block_body(block: &Block, theme: &str) -> BlockBody {
    match block.kind {
        BlockType::Heading | BlockType::Subheading => BlockBody::Text {
            lines: vec![TextLine { text: block.content.clone().unwrap_or_default(), bullet: false }],
        },
        BlockType::Body => BlockBody::Text { lines: body_lines(block.content.as_deref().unwrap_or_default()) },
        BlockType::Icon => BlockBody::Icon { name: non_empty(block.icon.as_ref()), size_px: block.font_size },
        BlockType::Logo => BlockBody::Logo { src: non_empty(block.src.as_ref()), alt: block.alt.clone() },
        BlockType::Image => BlockBody::Image { src: non_empty(block.src.as_ref()), alt: block.alt.clone() },
        BlockType::Qr => BlockBody::Qr {
            value: block.value.clone().unwrap_or_default(),
            size_px: block.font_size.filter(|s| *s > 0.0).unwrap_or(DEFAULT_QR_SIZE_PX),
            color: theme.to_string(),
        },
    }
}

/// Split body text into lines, marking `- ` and `* ` items as bullets.
#[must_use]
pub fn body_lines(text: &str) -> Vec<TextLine> {
    text.split('\n')
        .map(|line| {
            let trimmed = line.trim();
            match BULLET_PREFIXES.iter().find_map(|p| trimmed.strip_prefix(p)) {
                Some(item) => TextLine { text: item.to_string(), bullet: true },
                None => TextLine { text: line.to_string(), bullet: false },
            }
        })
        .collect()
}

/// CSS weight for a font weight; unset is normal.
#[must_use]
pub fn numeric_weight(weight: Option<FontWeight>) -> u16 {
    match weight {
        Some(FontWeight::Bold) => 700,
        Some(FontWeight::Black) => 900,
        Some(FontWeight::Normal) | None => 400,
    }
}

fn non_empty(value: Option<&String>) -> Option<String> {
    value.filter(|v| !v.is_empty()).cloned()
}
