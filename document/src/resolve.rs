//! Resolution rule: which background and borders actually paint a panel.
//!
//! A panel's own background wins whenever it is present and its value is
//! not the `"none"` sentinel; otherwise the document's global background
//! paints in its place. Opacity left unset falls back to a default that
//! depends on both the background kind and the layer it paints on: the
//! global layer sits beneath every panel at once and stays fainter.
//!
//! Everything here is a pure function of its inputs.

#[cfg(test)]
#[path = "resolve_test.rs"]
mod resolve_test;

use serde::Serialize;

use crate::consts::{
    DEFAULT_CENTER_BORDER_PERCENT, GLOBAL_FILL_OPACITY, GLOBAL_IMAGE_OPACITY, LINEAR_GRADIENT_ANGLE_DEG,
    PANEL_FILL_OPACITY, PANEL_IMAGE_OPACITY,
};
use crate::doc::{
    BackgroundKind, BorderDisplay, BorderEdge, BorderLine, BorderStyle, GradientShape, GradientType, Panel,
    PanelBackground, PatternStyle,
};

/// Layer a background paints on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LayerScope {
    Panel,
    Global,
}

/// Geometry of a gradient layer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum GradientForm {
    Linear { angle_deg: f64 },
    Radial { circle: bool },
}

/// A background reduced to the fields its kind actually uses.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum BackgroundLayer {
    Color { color: String },
    /// Procedural pattern stroked in `color` (the theme color).
    Pattern { pattern: PatternStyle, color: String },
    Image { url: String },
    Gradient { start: String, end: String, form: GradientForm },
}

/// The background that paints a panel, with its resolved opacity.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EffectiveBackground {
    pub scope: LayerScope,
    pub layer: BackgroundLayer,
    pub opacity: f64,
}

/// A border that paints, with every default applied.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EffectiveBorder {
    pub edge: BorderEdge,
    pub line: BorderLine,
    pub color: String,
    pub width_px: f64,
    /// Horizontally centered share of the edge, 0–100.
    pub span_percent: f64,
    pub opacity: f64,
}

/// True when the panel's own background suppresses the global layer.
#[must_use]
pub fn panel_overrides_global(panel: &Panel) -> bool {
    panel.background.as_ref().is_some_and(|bg| !bg.is_none())
}

/// Resolve what background paints a panel.
///
/// Returns `None` when nothing paints: no background at either level, both
/// set to `"none"`, or the winning background names an unknown pattern. An
/// unknown pattern on the panel still suppresses the global layer.
#[must_use]
pub fn effective_background(
    panel: Option<&PanelBackground>,
    global: Option<&PanelBackground>,
    theme_color: &str,
) -> Option<EffectiveBackground> {
    match panel {
        Some(bg) if !bg.is_none() => resolve_layer(bg, LayerScope::Panel, theme_color),
        _ => global
            .filter(|bg| !bg.is_none())
            .and_then(|bg| resolve_layer(bg, LayerScope::Global, theme_color)),
    }
}

/// Resolve a single background at a given scope, ignoring the other level.
#[must_use]
pub fn resolve_layer(bg: &PanelBackground, scope: LayerScope, theme_color: &str) -> Option<EffectiveBackground> {
    if bg.is_none() {
        return None;
    }
    let layer = match bg.kind {
        BackgroundKind::Color => BackgroundLayer::Color { color: bg.value.clone() },
        BackgroundKind::Image => BackgroundLayer::Image { url: bg.value.clone() },
        BackgroundKind::Pattern => match PatternStyle::from_value(&bg.value)? {
            PatternStyle::None => return None,
            pattern => BackgroundLayer::Pattern { pattern, color: theme_color.to_string() },
        },
        BackgroundKind::Gradient => {
            let end = bg
                .secondary_color
                .as_deref()
                .filter(|c| !c.is_empty())
                .unwrap_or(theme_color)
                .to_string();
            let form = match bg.gradient_type {
                Some(GradientType::Radial) => {
                    GradientForm::Radial { circle: bg.gradient_shape == Some(GradientShape::Circle) }
                }
                _ => GradientForm::Linear { angle_deg: LINEAR_GRADIENT_ANGLE_DEG },
            };
            BackgroundLayer::Gradient { start: bg.value.clone(), end, form }
        }
    };
    let opacity = bg
        .opacity
        .map_or_else(|| default_opacity(bg.kind, scope), |o| o.clamp(0.0, 1.0));
    Some(EffectiveBackground { scope, layer, opacity })
}

/// Opacity applied when a background leaves `opacity` unset.
#[must_use]
pub fn default_opacity(kind: BackgroundKind, scope: LayerScope) -> f64 {
    match (kind, scope) {
        (BackgroundKind::Image, LayerScope::Panel) => PANEL_IMAGE_OPACITY,
        (BackgroundKind::Image, LayerScope::Global) => GLOBAL_IMAGE_OPACITY,
        (_, LayerScope::Panel) => PANEL_FILL_OPACITY,
        (_, LayerScope::Global) => GLOBAL_FILL_OPACITY,
    }
}

/// Resolve one edge border. Absent borders and `none` lines paint nothing.
/// A `center` span of zero falls back to the default half width.
#[must_use]
pub fn effective_border(border: Option<&BorderStyle>, edge: BorderEdge, theme_color: &str) -> Option<EffectiveBorder> {
    let border = border.filter(|b| b.kind != BorderLine::None)?;
    let span_percent = match border.display.unwrap_or_default() {
        BorderDisplay::Full => 100.0,
        BorderDisplay::Center => border
            .width_percent
            .filter(|p| *p > 0.0)
            .map_or(DEFAULT_CENTER_BORDER_PERCENT, |p| p.min(100.0)),
    };
    let color = if border.color.is_empty() { theme_color.to_string() } else { border.color.clone() };
    Some(EffectiveBorder {
        edge,
        line: border.kind,
        color,
        width_px: border.width,
        span_percent,
        opacity: border.opacity.map_or(1.0, |o| o.clamp(0.0, 1.0)),
    })
}
