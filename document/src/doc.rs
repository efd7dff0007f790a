//! Document model: sides, panels, blocks, and their decorations.
//!
//! This module defines the brochure tree (`BrochureContent` → `Side` →
//! `Panel` → `Block`), the decoration records attached to panels
//! (`PanelBackground`, `BorderStyle`), and the sparse patch types used for
//! incremental edits (`BlockPatch`, `BackgroundPatch`, `BorderPatch`).
//!
//! Every type serializes in the camelCase shape the browser front-end sends
//! and receives. Patches merge shallowly: a supplied field wins, an omitted
//! field keeps its prior value. Patches carry no `id` or `type` for blocks, so
//! neither can change after creation.

#[cfg(test)]
#[path = "doc_test.rs"]
mod doc_test;

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::consts::{DEFAULT_BORDER_COLOR, NONE_VALUE, SEED_BACKGROUND_OPACITY};

/// Identifier of a block, unique within its panel.
pub type BlockId = String;

// =============================================================================
// ENUMS
// =============================================================================

/// One of the two printable sides of a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SideKey {
    Front,
    Back,
}

impl SideKey {
    /// Both sides in print order.
    pub const ALL: [SideKey; 2] = [SideKey::Front, SideKey::Back];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Front => "front",
            Self::Back => "back",
        }
    }

    /// Parse a path segment such as `"front"`.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "front" => Some(Self::Front),
            "back" => Some(Self::Back),
            _ => None,
        }
    }
}

/// The kind of content a block carries. Fixed once the block exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BlockType {
    Heading,
    Subheading,
    Body,
    Image,
    Qr,
    Logo,
    Icon,
}

/// Global layout style. Only one style exists today.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LayoutStyle {
    #[default]
    Flat,
}

/// Named procedural background pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PatternStyle {
    None,
    Dots,
    Grid,
    Lines,
    Waves,
    Custom,
}

impl PatternStyle {
    /// Parse the `value` of a pattern background. Unknown ids yield `None`.
    #[must_use]
    pub fn from_value(value: &str) -> Option<Self> {
        match value {
            "none" => Some(Self::None),
            "dots" => Some(Self::Dots),
            "grid" => Some(Self::Grid),
            "lines" => Some(Self::Lines),
            "waves" => Some(Self::Waves),
            "custom" => Some(Self::Custom),
            _ => None,
        }
    }
}

/// Discriminator of a [`PanelBackground`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackgroundKind {
    Color,
    Pattern,
    Image,
    Gradient,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GradientType {
    Linear,
    Radial,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GradientShape {
    Circle,
    Linear,
}

/// Line style of a panel edge border. `None` draws nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BorderLine {
    None,
    Solid,
    Dashed,
    Dotted,
}

/// How much of the edge a border spans.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BorderDisplay {
    #[default]
    Full,
    Center,
}

/// Which panel edge a border sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BorderEdge {
    Top,
    Bottom,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VerticalAlign {
    #[default]
    Top,
    Center,
    Bottom,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAlign {
    #[default]
    Left,
    Center,
    Right,
    Justify,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontWeight {
    Normal,
    Bold,
    Black,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IconAlign {
    Top,
    Center,
    Bottom,
}

// =============================================================================
// BACKGROUND
// =============================================================================

/// Background of a panel or of the whole document.
///
/// Stored as a flat record rather than an enum so that switching `kind`
/// keeps fields that belong to another kind (a leftover `secondary_color`
/// after switching to a pattern, for instance). The resolver reads only the
/// fields relevant to the current kind; see [`crate::resolve`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PanelBackground {
    #[serde(rename = "type")]
    pub kind: BackgroundKind,
    /// Hex color, pattern id, image URL / data URI, or gradient start color.
    pub value: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secondary_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gradient_type: Option<GradientType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gradient_shape: Option<GradientShape>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub opacity: Option<f64>,
}

impl PanelBackground {
    /// The record a merge starts from when nothing was set before.
    #[must_use]
    pub fn seed() -> Self {
        Self {
            kind: BackgroundKind::Pattern,
            value: NONE_VALUE.to_string(),
            secondary_color: None,
            gradient_type: None,
            gradient_shape: None,
            opacity: Some(SEED_BACKGROUND_OPACITY),
        }
    }

    /// Flat color background.
    #[must_use]
    pub fn color(value: impl Into<String>) -> Self {
        Self {
            kind: BackgroundKind::Color,
            value: value.into(),
            secondary_color: None,
            gradient_type: None,
            gradient_shape: None,
            opacity: None,
        }
    }

    /// True when the value is the `"none"` sentinel, whatever the kind.
    #[must_use]
    pub fn is_none(&self) -> bool {
        self.value == NONE_VALUE
    }

    /// Merge supplied patch fields into this background.
    pub fn merge(&mut self, patch: &BackgroundPatch) {
        if let Some(kind) = patch.kind {
            self.kind = kind;
        }
        if let Some(ref value) = patch.value {
            self.value.clone_from(value);
        }
        if let Some(ref secondary) = patch.secondary_color {
            self.secondary_color = Some(secondary.clone());
        }
        if let Some(gradient_type) = patch.gradient_type {
            self.gradient_type = Some(gradient_type);
        }
        if let Some(shape) = patch.gradient_shape {
            self.gradient_shape = Some(shape);
        }
        if let Some(opacity) = patch.opacity {
            self.opacity = Some(opacity);
        }
    }
}

/// Sparse update for a [`PanelBackground`]. Only present fields are applied.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BackgroundPatch {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<BackgroundKind>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secondary_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gradient_type: Option<GradientType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gradient_shape: Option<GradientShape>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub opacity: Option<f64>,
}

// =============================================================================
// BORDER
// =============================================================================

/// Border drawn along the top or bottom edge of a panel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BorderStyle {
    #[serde(rename = "type")]
    pub kind: BorderLine,
    pub color: String,
    /// Stroke width in pixels.
    pub width: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display: Option<BorderDisplay>,
    /// Share of the edge covered when `display` is `center`, 0–100.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width_percent: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub opacity: Option<f64>,
}

impl BorderStyle {
    /// The record a merge starts from when the edge had no border.
    #[must_use]
    pub fn seed() -> Self {
        Self {
            kind: BorderLine::None,
            color: DEFAULT_BORDER_COLOR.to_string(),
            width: 0.0,
            display: None,
            width_percent: None,
            opacity: None,
        }
    }

    /// Merge supplied patch fields. `width_percent` is clamped to 0–100.
    pub fn merge(&mut self, patch: &BorderPatch) {
        if let Some(kind) = patch.kind {
            self.kind = kind;
        }
        if let Some(ref color) = patch.color {
            self.color.clone_from(color);
        }
        if let Some(width) = patch.width {
            self.width = width;
        }
        if let Some(display) = patch.display {
            self.display = Some(display);
        }
        if let Some(percent) = patch.width_percent {
            self.width_percent = Some(percent.clamp(0.0, 100.0));
        }
        if let Some(opacity) = patch.opacity {
            self.opacity = Some(opacity);
        }
    }
}

/// Sparse update for a [`BorderStyle`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BorderPatch {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<BorderLine>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display: Option<BorderDisplay>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width_percent: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub opacity: Option<f64>,
}

// =============================================================================
// BLOCK
// =============================================================================

/// A typed content unit inside a panel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Block {
    pub id: BlockId,
    #[serde(rename = "type")]
    pub kind: BlockType,
    #[serde(default)]
    pub label: String,
    /// Text of heading, subheading, and body blocks.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    /// Icon identifier shown beside or instead of text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    /// Image URL or data URI for image and logo blocks.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub src: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alt: Option<String>,
    /// Encoded value of QR blocks.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_link: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_align: Option<TextAlign>,
    /// Font size in pixels. Image-like blocks reuse it as their display size.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_size: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_weight: Option<FontWeight>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon_align: Option<IconAlign>,
    /// Text color override.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

impl Block {
    /// A bare block with only `id`, `kind`, and `label` set.
    #[must_use]
    pub fn new(id: impl Into<BlockId>, kind: BlockType, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            kind,
            label: label.into(),
            content: None,
            icon: None,
            src: None,
            alt: None,
            value: None,
            placeholder: None,
            is_link: None,
            text_align: None,
            font_size: None,
            font_weight: None,
            icon_align: None,
            color: None,
        }
    }

    /// A freshly added block of `kind`, filled with that kind's defaults.
    #[must_use]
    pub fn with_defaults(id: impl Into<BlockId>, kind: BlockType) -> Self {
        let mut block = match kind {
            BlockType::Heading => Self::new(id, kind, "Title").text("New Title", 24.0, FontWeight::Bold),
            BlockType::Subheading => Self::new(id, kind, "Subtitle").text("New Subtitle", 18.0, FontWeight::Bold),
            BlockType::Body => {
                Self::new(id, kind, "Description").text("New description text goes here...", 14.0, FontWeight::Normal)
            }
            BlockType::Icon => {
                let mut b = Self::new(id, kind, "Icon");
                b.icon = Some("Star".into());
                b.font_size = Some(32.0);
                b
            }
            BlockType::Qr => {
                let mut b = Self::new(id, kind, "QR Code");
                b.value = Some("https://".into());
                b.font_size = Some(100.0);
                b
            }
            BlockType::Logo => Self::new(id, kind, "Logo").picture("Logo", 120.0),
            BlockType::Image => Self::new(id, kind, "Image").picture("Image", 200.0),
        };
        block.text_align = Some(TextAlign::Left);
        block
    }

    fn text(mut self, content: &str, size: f64, weight: FontWeight) -> Self {
        self.content = Some(content.into());
        self.font_size = Some(size);
        self.font_weight = Some(weight);
        self
    }

    fn picture(mut self, alt: &str, size: f64) -> Self {
        self.src = Some(String::new());
        self.alt = Some(alt.into());
        self.font_size = Some(size);
        self
    }

    /// Shallow-merge a patch. `id` and `kind` are never touched.
    pub fn apply_patch(&mut self, patch: &BlockPatch) {
        if let Some(ref label) = patch.label {
            self.label.clone_from(label);
        }
        merge_opt(&mut self.content, patch.content.as_ref());
        merge_opt(&mut self.icon, patch.icon.as_ref());
        merge_opt(&mut self.src, patch.src.as_ref());
        merge_opt(&mut self.alt, patch.alt.as_ref());
        merge_opt(&mut self.value, patch.value.as_ref());
        merge_opt(&mut self.placeholder, patch.placeholder.as_ref());
        merge_opt(&mut self.is_link, patch.is_link.as_ref());
        merge_opt(&mut self.text_align, patch.text_align.as_ref());
        merge_opt(&mut self.font_size, patch.font_size.as_ref());
        merge_opt(&mut self.font_weight, patch.font_weight.as_ref());
        merge_opt(&mut self.icon_align, patch.icon_align.as_ref());
        merge_opt(&mut self.color, patch.color.as_ref());
    }
}

fn merge_opt<T: Clone>(slot: &mut Option<T>, incoming: Option<&T>) {
    if let Some(v) = incoming {
        *slot = Some(v.clone());
    }
}

/// Sparse update for a [`Block`]. Only present fields are applied.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub src: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alt: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_link: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_align: Option<TextAlign>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_size: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_weight: Option<FontWeight>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon_align: Option<IconAlign>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

// =============================================================================
// PANEL / SIDE / DOCUMENT
// =============================================================================

/// One rectangular region of a side.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Panel {
    pub id: String,
    #[serde(default)]
    pub blocks: Vec<Block>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background: Option<PanelBackground>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub border_top: Option<BorderStyle>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub border_bottom: Option<BorderStyle>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vertical_align: Option<VerticalAlign>,
}

impl Panel {
    /// An undecorated panel holding `blocks`.
    #[must_use]
    pub fn new(id: impl Into<String>, blocks: Vec<Block>) -> Self {
        Self {
            id: id.into(),
            blocks,
            background: None,
            border_top: None,
            border_bottom: None,
            vertical_align: None,
        }
    }

    #[must_use]
    pub fn block(&self, id: &str) -> Option<&Block> {
        self.blocks.iter().find(|b| b.id == id)
    }

    pub fn block_mut(&mut self, id: &str) -> Option<&mut Block> {
        self.blocks.iter_mut().find(|b| b.id == id)
    }

    #[must_use]
    pub fn contains_block(&self, id: &str) -> bool {
        self.block(id).is_some()
    }

    #[must_use]
    pub fn border(&self, edge: BorderEdge) -> Option<&BorderStyle> {
        match edge {
            BorderEdge::Top => self.border_top.as_ref(),
            BorderEdge::Bottom => self.border_bottom.as_ref(),
        }
    }

    pub fn border_slot(&mut self, edge: BorderEdge) -> &mut Option<BorderStyle> {
        match edge {
            BorderEdge::Top => &mut self.border_top,
            BorderEdge::Bottom => &mut self.border_bottom,
        }
    }

    /// Vertical alignment with the default applied.
    #[must_use]
    pub fn effective_align(&self) -> VerticalAlign {
        self.vertical_align.unwrap_or_default()
    }
}

/// Ordered panels of one side.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Side {
    pub panels: Vec<Panel>,
}

/// The working document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BrochureContent {
    pub theme_color: String,
    #[serde(default)]
    pub layout: LayoutStyle,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub global_background: Option<PanelBackground>,
    pub front: Side,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub back: Option<Side>,
}

impl BrochureContent {
    #[must_use]
    pub fn side(&self, key: SideKey) -> Option<&Side> {
        match key {
            SideKey::Front => Some(&self.front),
            SideKey::Back => self.back.as_ref(),
        }
    }

    pub fn side_mut(&mut self, key: SideKey) -> Option<&mut Side> {
        match key {
            SideKey::Front => Some(&mut self.front),
            SideKey::Back => self.back.as_mut(),
        }
    }

    #[must_use]
    pub fn panel(&self, side: SideKey, index: usize) -> Option<&Panel> {
        self.side(side).and_then(|s| s.panels.get(index))
    }

    pub fn panel_mut(&mut self, side: SideKey, index: usize) -> Option<&mut Panel> {
        self.side_mut(side).and_then(|s| s.panels.get_mut(index))
    }

    #[must_use]
    pub fn block(&self, side: SideKey, index: usize, block_id: &str) -> Option<&Block> {
        self.panel(side, index).and_then(|p| p.block(block_id))
    }

    /// Every panel of the document, front first.
    pub fn panels_mut(&mut self) -> impl Iterator<Item = &mut Panel> {
        self.front
            .panels
            .iter_mut()
            .chain(self.back.iter_mut().flat_map(|s| s.panels.iter_mut()))
    }

    /// Check structural invariants: each present side has at least one panel
    /// and block ids are unique within each panel.
    ///
    /// # Errors
    ///
    /// Returns the first violation found.
    pub fn validate(&self) -> Result<(), ValidationError> {
        for key in SideKey::ALL {
            let Some(side) = self.side(key) else {
                continue;
            };
            if side.panels.is_empty() {
                return Err(ValidationError::EmptySide(key));
            }
            for panel in &side.panels {
                let mut seen = HashSet::new();
                for block in &panel.blocks {
                    if !seen.insert(block.id.as_str()) {
                        return Err(ValidationError::DuplicateBlockId {
                            panel_id: panel.id.clone(),
                            block_id: block.id.clone(),
                        });
                    }
                }
            }
        }
        Ok(())
    }
}

/// Structural invariant violations reported by [`BrochureContent::validate`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("{} side has no panels", .0.as_str())]
    EmptySide(SideKey),
    #[error("duplicate block id {block_id} in panel {panel_id}")]
    DuplicateBlockId { panel_id: String, block_id: String },
}

/// Immutable named starting document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Template {
    pub id: String,
    pub name: String,
    /// Display category shown in the template picker.
    pub category: String,
    pub theme_color: String,
    #[serde(default)]
    pub layout: LayoutStyle,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preview_image: Option<String>,
    pub content: BrochureContent,
}
