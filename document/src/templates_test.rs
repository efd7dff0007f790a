use serde_json::json;

use super::*;
use crate::doc::SideKey;

fn minimal(id: &str) -> serde_json::Value {
    json!({
        "id": id,
        "name": format!("Template {id}"),
        "category": "Test",
        "themeColor": "#000000",
        "content": {
            "themeColor": "#111111",
            "front": { "panels": [{ "id": "p1", "blocks": [{ "id": "a", "type": "heading", "content": "Hi" }] }] }
        }
    })
}

#[test]
fn builtin_has_manguard_first() {
    let registry = TemplateRegistry::builtin();
    assert_eq!(registry.len(), 1);
    let template = registry.default_template().unwrap();
    assert_eq!(template.id, BUILTIN_TEMPLATE_ID);
    assert_eq!(template.name, "Manguard Security Service");
    assert_eq!(template.category, "Security");
    assert_eq!(template.theme_color, "#1E40AF");
    assert_eq!(template.content.theme_color, "#1A365D");
}

#[test]
fn builtin_content_shape() {
    let registry = TemplateRegistry::builtin();
    let content = &registry.get(BUILTIN_TEMPLATE_ID).unwrap().content;
    assert!(content.validate().is_ok());

    let front: Vec<&str> = content.front.panels.iter().map(|p| p.id.as_str()).collect();
    assert_eq!(front, ["m-f-1", "m-f-2", "m-f-3"]);
    let back = content.side(SideKey::Back).unwrap();
    let back_ids: Vec<&str> = back.panels.iter().map(|p| p.id.as_str()).collect();
    assert_eq!(back_ids, ["m-b-1", "m-b-2", "m-b-3"]);

    assert_eq!(content.front.panels[2].blocks.len(), 11);
    assert_eq!(back.panels[0].blocks.len(), 13);
    assert_eq!(back.panels[0].blocks[12].id, "m-b-1-13");
    assert!(content.front.panels[2].background.is_some());
    assert!(back.panels[2].border_top.is_some());
    assert!(content.block(SideKey::Back, 1, "m-b-2-3").is_some_and(|b| b.kind == crate::doc::BlockType::Qr));
    assert!(content.block(SideKey::Front, 0, "m-f-1-1").is_some_and(|b| b.kind == crate::doc::BlockType::Logo));
}

#[test]
fn builtin_round_trips_through_json() {
    let registry = TemplateRegistry::builtin();
    let raw = serde_json::to_string(&registry.iter().cloned().collect::<Vec<_>>()).unwrap();
    let reloaded = TemplateRegistry::load_json(&raw).unwrap();
    assert_eq!(reloaded.default_template(), registry.default_template());
}

#[test]
fn load_json_keeps_order() {
    let raw = json!([minimal("b"), minimal("a")]).to_string();
    let registry = TemplateRegistry::load_json(&raw).unwrap();
    assert_eq!(registry.default_template().unwrap().id, "b");
    assert!(registry.get("a").is_some());
    assert!(registry.get("zzz").is_none());
}

#[test]
fn builtin_with_json_appends() {
    let raw = json!([minimal("extra")]).to_string();
    let registry = TemplateRegistry::builtin_with_json(&raw).unwrap();
    let ids: Vec<&str> = registry.iter().map(|t| t.id.as_str()).collect();
    assert_eq!(ids, [BUILTIN_TEMPLATE_ID, "extra"]);
}

#[test]
fn builtin_with_json_rejects_shadowing() {
    let raw = json!([minimal(BUILTIN_TEMPLATE_ID)]).to_string();
    assert!(matches!(TemplateRegistry::builtin_with_json(&raw), Err(TemplateError::Duplicate(id)) if id == BUILTIN_TEMPLATE_ID));
}

#[test]
fn rejects_empty_list() {
    assert!(matches!(TemplateRegistry::load_json("[]"), Err(TemplateError::Empty)));
}

#[test]
fn rejects_blank_id() {
    let raw = json!([minimal("  ")]).to_string();
    assert!(matches!(TemplateRegistry::load_json(&raw), Err(TemplateError::EmptyId)));
}

#[test]
fn rejects_duplicate_ids() {
    let raw = json!([minimal("x"), minimal("x")]).to_string();
    assert!(matches!(TemplateRegistry::load_json(&raw), Err(TemplateError::Duplicate(id)) if id == "x"));
}

#[test]
fn rejects_invalid_content() {
    let mut bad = minimal("x");
    bad["content"]["front"]["panels"] = json!([]);
    let raw = json!([bad]).to_string();
    assert!(matches!(TemplateRegistry::load_json(&raw), Err(TemplateError::Invalid { id, .. }) if id == "x"));
}

#[test]
fn rejects_malformed_json() {
    assert!(matches!(TemplateRegistry::load_json("{not json"), Err(TemplateError::Parse(_))));
}

#[test]
fn summaries_list_picker_fields() {
    let summaries = TemplateRegistry::builtin().summaries();
    assert_eq!(summaries.len(), 1);
    let value = serde_json::to_value(&summaries[0]).unwrap();
    assert_eq!(value["id"], BUILTIN_TEMPLATE_ID);
    assert_eq!(value["themeColor"], "#1E40AF");
    assert!(value.get("content").is_none());
}
