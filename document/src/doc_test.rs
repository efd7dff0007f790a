#![allow(clippy::float_cmp)]

use serde_json::json;

use super::*;

fn heading(id: &str) -> Block {
    Block::with_defaults(id, BlockType::Heading)
}

fn two_panel_doc() -> BrochureContent {
    BrochureContent {
        theme_color: "#112233".into(),
        layout: LayoutStyle::Flat,
        global_background: None,
        front: Side { panels: vec![Panel::new("f1", vec![heading("a")]), Panel::new("f2", vec![])] },
        back: Some(Side { panels: vec![Panel::new("b1", vec![heading("b")])] }),
    }
}

// =============================================================
// Serde shape
// =============================================================

#[test]
fn block_serializes_camel_case_with_type_tag() {
    let mut block = Block::new("x1", BlockType::Qr, "QR");
    block.font_size = Some(100.0);
    block.is_link = Some(true);
    let value = serde_json::to_value(&block).unwrap();
    assert_eq!(value, json!({ "id": "x1", "type": "qr", "label": "QR", "fontSize": 100.0, "isLink": true }));
}

#[test]
fn block_deserializes_with_missing_optionals() {
    let block: Block = serde_json::from_value(json!({ "id": "a", "type": "body" })).unwrap();
    assert_eq!(block.kind, BlockType::Body);
    assert!(block.label.is_empty());
    assert!(block.content.is_none());
}

#[test]
fn background_uses_type_key() {
    let bg: PanelBackground = serde_json::from_value(json!({
        "type": "gradient",
        "value": "#ffffff",
        "secondaryColor": "#000000",
        "gradientType": "radial",
        "gradientShape": "circle"
    }))
    .unwrap();
    assert_eq!(bg.kind, BackgroundKind::Gradient);
    assert_eq!(bg.gradient_type, Some(GradientType::Radial));
    assert_eq!(bg.gradient_shape, Some(GradientShape::Circle));
    assert_eq!(bg.opacity, None);
}

#[test]
fn content_without_back_side() {
    let content: BrochureContent = serde_json::from_value(json!({
        "themeColor": "#000",
        "front": { "panels": [{ "id": "p", "blocks": [] }] }
    }))
    .unwrap();
    assert!(content.back.is_none());
    assert_eq!(content.layout, LayoutStyle::Flat);
    assert!(content.side(SideKey::Back).is_none());
}

#[test]
fn side_key_parse() {
    assert_eq!(SideKey::parse("front"), Some(SideKey::Front));
    assert_eq!(SideKey::parse("back"), Some(SideKey::Back));
    assert_eq!(SideKey::parse("Front"), None);
    assert_eq!(SideKey::Back.as_str(), "back");
}

#[test]
fn pattern_from_value() {
    assert_eq!(PatternStyle::from_value("dots"), Some(PatternStyle::Dots));
    assert_eq!(PatternStyle::from_value("none"), Some(PatternStyle::None));
    assert_eq!(PatternStyle::from_value("stripes"), None);
}

// =============================================================
// Block defaults and patches
// =============================================================

#[test]
fn defaults_per_block_type() {
    let h = Block::with_defaults("1", BlockType::Heading);
    assert_eq!(h.label, "Title");
    assert_eq!(h.content.as_deref(), Some("New Title"));
    assert_eq!(h.font_size, Some(24.0));
    assert_eq!(h.font_weight, Some(FontWeight::Bold));

    let s = Block::with_defaults("2", BlockType::Subheading);
    assert_eq!(s.content.as_deref(), Some("New Subtitle"));
    assert_eq!(s.font_size, Some(18.0));

    let b = Block::with_defaults("3", BlockType::Body);
    assert_eq!(b.font_weight, Some(FontWeight::Normal));
    assert_eq!(b.font_size, Some(14.0));

    let i = Block::with_defaults("4", BlockType::Icon);
    assert_eq!(i.icon.as_deref(), Some("Star"));
    assert_eq!(i.font_size, Some(32.0));

    let q = Block::with_defaults("5", BlockType::Qr);
    assert_eq!(q.value.as_deref(), Some("https://"));
    assert_eq!(q.font_size, Some(100.0));

    let l = Block::with_defaults("6", BlockType::Logo);
    assert_eq!(l.src.as_deref(), Some(""));
    assert_eq!(l.alt.as_deref(), Some("Logo"));
    assert_eq!(l.font_size, Some(120.0));

    let img = Block::with_defaults("7", BlockType::Image);
    assert_eq!(img.alt.as_deref(), Some("Image"));
    assert_eq!(img.font_size, Some(200.0));

    for block in [h, s, b, i, q, l, img] {
        assert_eq!(block.text_align, Some(TextAlign::Left));
    }
}

#[test]
fn patch_merges_only_supplied_fields() {
    let mut block = heading("h");
    block.color = Some("#ff0000".into());
    let patch = BlockPatch { content: Some("Hello".into()), font_size: Some(30.0), ..Default::default() };
    block.apply_patch(&patch);
    assert_eq!(block.content.as_deref(), Some("Hello"));
    assert_eq!(block.font_size, Some(30.0));
    assert_eq!(block.font_weight, Some(FontWeight::Bold));
    assert_eq!(block.color.as_deref(), Some("#ff0000"));
    assert_eq!(block.id, "h");
    assert_eq!(block.kind, BlockType::Heading);
}

#[test]
fn patch_json_ignores_id_and_type() {
    let patch: BlockPatch = serde_json::from_value(json!({ "id": "evil", "type": "qr", "label": "L" })).unwrap();
    let mut block = heading("h");
    block.apply_patch(&patch);
    assert_eq!(block.id, "h");
    assert_eq!(block.kind, BlockType::Heading);
    assert_eq!(block.label, "L");
}

#[test]
fn empty_patch_is_identity() {
    let mut block = heading("h");
    let before = block.clone();
    block.apply_patch(&BlockPatch::default());
    assert_eq!(block, before);
}

// =============================================================
// Background and border merges
// =============================================================

#[test]
fn background_seed_shape() {
    let seed = PanelBackground::seed();
    assert_eq!(seed.kind, BackgroundKind::Pattern);
    assert!(seed.is_none());
    assert_eq!(seed.opacity, Some(1.0));
}

#[test]
fn background_merge_keeps_stale_fields() {
    let mut bg = PanelBackground::seed();
    bg.merge(&BackgroundPatch {
        kind: Some(BackgroundKind::Gradient),
        value: Some("#ffffff".into()),
        secondary_color: Some("#000000".into()),
        ..Default::default()
    });
    bg.merge(&BackgroundPatch { kind: Some(BackgroundKind::Pattern), value: Some("dots".into()), ..Default::default() });
    assert_eq!(bg.kind, BackgroundKind::Pattern);
    assert_eq!(bg.value, "dots");
    assert_eq!(bg.secondary_color.as_deref(), Some("#000000"));
}

#[test]
fn none_sentinel_ignores_kind() {
    let mut bg = PanelBackground::color("none");
    assert!(bg.is_none());
    bg.kind = BackgroundKind::Image;
    assert!(bg.is_none());
}

#[test]
fn border_merge_clamps_width_percent() {
    let mut border = BorderStyle::seed();
    assert_eq!(border.kind, BorderLine::None);
    assert_eq!(border.color, "#000000");
    border.merge(&BorderPatch { width_percent: Some(140.0), ..Default::default() });
    assert_eq!(border.width_percent, Some(100.0));
    border.merge(&BorderPatch { width_percent: Some(-3.0), ..Default::default() });
    assert_eq!(border.width_percent, Some(0.0));
}

#[test]
fn border_merge_partial() {
    let mut border = BorderStyle::seed();
    border.merge(&BorderPatch { kind: Some(BorderLine::Dashed), width: Some(2.0), ..Default::default() });
    assert_eq!(border.kind, BorderLine::Dashed);
    assert_eq!(border.width, 2.0);
    assert_eq!(border.color, "#000000");
    assert!(border.display.is_none());
}

// =============================================================
// Panels and validation
// =============================================================

#[test]
fn panel_border_slots() {
    let mut panel = Panel::new("p", vec![]);
    *panel.border_slot(BorderEdge::Bottom) = Some(BorderStyle::seed());
    assert!(panel.border(BorderEdge::Bottom).is_some());
    assert!(panel.border(BorderEdge::Top).is_none());
    assert_eq!(panel.effective_align(), VerticalAlign::Top);
}

#[test]
fn panels_mut_visits_front_then_back() {
    let mut doc = two_panel_doc();
    let ids: Vec<String> = doc.panels_mut().map(|p| p.id.clone()).collect();
    assert_eq!(ids, ["f1", "f2", "b1"]);
}

#[test]
fn addressing_helpers() {
    let doc = two_panel_doc();
    assert!(doc.block(SideKey::Front, 0, "a").is_some());
    assert!(doc.block(SideKey::Front, 1, "a").is_none());
    assert!(doc.panel(SideKey::Back, 1).is_none());
}

#[test]
fn validate_accepts_well_formed() {
    assert!(two_panel_doc().validate().is_ok());
}

#[test]
fn validate_rejects_empty_side() {
    let mut doc = two_panel_doc();
    doc.back = Some(Side { panels: vec![] });
    assert_eq!(doc.validate(), Err(ValidationError::EmptySide(SideKey::Back)));
}

#[test]
fn validate_rejects_duplicate_block_ids() {
    let mut doc = two_panel_doc();
    doc.front.panels[0].blocks.push(heading("a"));
    assert_eq!(
        doc.validate(),
        Err(ValidationError::DuplicateBlockId { panel_id: "f1".into(), block_id: "a".into() })
    );
}

#[test]
fn same_block_id_in_different_panels_is_fine() {
    let mut doc = two_panel_doc();
    doc.front.panels[1].blocks.push(heading("a"));
    assert!(doc.validate().is_ok());
}
