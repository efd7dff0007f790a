//! Template registry: the immutable starting documents a session can load.
//!
//! The registry always carries the built-in security-services brochure and
//! may be extended with templates parsed from JSON. Every template is
//! validated on the way in, so the store never deep-copies a document that
//! breaks the side/panel/block invariants.

#[cfg(test)]
#[path = "templates_test.rs"]
mod templates_test;

use std::collections::HashSet;

use serde::Serialize;

use crate::doc::{
    Block, BlockType, BorderDisplay, BorderLine, BorderStyle, BrochureContent, FontWeight, IconAlign, LayoutStyle,
    Panel, PanelBackground, Side, Template, TextAlign, ValidationError, VerticalAlign,
};

/// Id of the built-in template, which is also the default.
pub const BUILTIN_TEMPLATE_ID: &str = "manguard-security";

#[derive(Debug, thiserror::Error)]
pub enum TemplateError {
    #[error("template id is empty")]
    EmptyId,
    #[error("duplicate template id: {0}")]
    Duplicate(String),
    #[error("template {id} is invalid: {source}")]
    Invalid {
        id: String,
        #[source]
        source: ValidationError,
    },
    #[error("template json parse failed: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("registry has no templates")]
    Empty,
}

/// Listing entry for the template picker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateSummary {
    pub id: String,
    pub name: String,
    pub category: String,
    pub theme_color: String,
    pub preview_image: Option<String>,
}

/// Ordered, validated set of templates. The first one is the default.
#[derive(Debug, Clone)]
pub struct TemplateRegistry {
    templates: Vec<Template>,
}

impl TemplateRegistry {
    /// Registry holding only the built-in brochure.
    #[must_use]
    pub fn builtin() -> Self {
        Self { templates: vec![manguard_template()] }
    }

    /// Build a registry from `templates`, in order.
    ///
    /// # Errors
    ///
    /// Fails on an empty list, an empty or repeated id, or a template whose
    /// content does not validate.
    pub fn from_templates(templates: Vec<Template>) -> Result<Self, TemplateError> {
        if templates.is_empty() {
            return Err(TemplateError::Empty);
        }
        let mut seen = HashSet::new();
        for template in &templates {
            if template.id.trim().is_empty() {
                return Err(TemplateError::EmptyId);
            }
            if !seen.insert(template.id.as_str()) {
                return Err(TemplateError::Duplicate(template.id.clone()));
            }
            template
                .content
                .validate()
                .map_err(|source| TemplateError::Invalid { id: template.id.clone(), source })?;
        }
        Ok(Self { templates })
    }

    /// Parse a JSON array of templates.
    ///
    /// # Errors
    ///
    /// Returns `Parse` for malformed JSON, otherwise as [`Self::from_templates`].
    pub fn load_json(raw: &str) -> Result<Self, TemplateError> {
        let templates: Vec<Template> = serde_json::from_str(raw)?;
        Self::from_templates(templates)
    }

    /// Built-in templates followed by the ones parsed from `raw`.
    ///
    /// # Errors
    ///
    /// As [`Self::load_json`]; an id colliding with a built-in is a `Duplicate`.
    pub fn builtin_with_json(raw: &str) -> Result<Self, TemplateError> {
        let mut templates = Self::builtin().templates;
        templates.extend(serde_json::from_str::<Vec<Template>>(raw)?);
        Self::from_templates(templates)
    }

    /// The template a fresh or reset session starts from.
    #[must_use]
    pub fn default_template(&self) -> Option<&Template> {
        self.templates.first()
    }

    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Template> {
        self.templates.iter().find(|t| t.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Template> {
        self.templates.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.templates.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    #[must_use]
    pub fn summaries(&self) -> Vec<TemplateSummary> {
        self.templates
            .iter()
            .map(|t| TemplateSummary {
                id: t.id.clone(),
                name: t.name.clone(),
                category: t.category.clone(),
                theme_color: t.theme_color.clone(),
                preview_image: t.preview_image.clone(),
            })
            .collect()
    }
}

impl Default for TemplateRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

// =============================================================================
// BUILT-IN CONTENT
// =============================================================================

fn manguard_template() -> Template {
    Template {
        id: BUILTIN_TEMPLATE_ID.into(),
        name: "Manguard Security Service".into(),
        category: "Security".into(),
        theme_color: "#1E40AF".into(),
        layout: LayoutStyle::Flat,
        preview_image: None,
        content: manguard_content(),
    }
}

fn manguard_content() -> BrochureContent {
    BrochureContent {
        theme_color: "#1A365D".into(),
        layout: LayoutStyle::Flat,
        global_background: None,
        front: Side { panels: vec![welcome_panel(), foundation_panel(), services_panel()] },
        back: Some(Side { panels: vec![why_us_panel(), reviews_panel(), contact_panel()] }),
    }
}

fn centered(id: &str, blocks: Vec<Block>) -> Panel {
    Panel { vertical_align: Some(VerticalAlign::Center), ..Panel::new(id, blocks) }
}

fn text(id: &str, kind: BlockType, content: &str, size: Option<f64>) -> Block {
    let label = match kind {
        BlockType::Heading => "Title",
        BlockType::Subheading => "Subtitle",
        _ => "Description",
    };
    Block { content: Some(content.into()), font_size: size, ..Block::new(id, kind, label) }
}

fn heading(id: &str, content: &str, size: f64) -> Block {
    text(id, BlockType::Heading, content, Some(size))
}

fn subheading(id: &str, content: &str, icon: &str) -> Block {
    Block { icon: Some(icon.into()), ..text(id, BlockType::Subheading, content, Some(14.0)) }
}

fn body(id: &str, content: &str, size: f64) -> Block {
    text(id, BlockType::Body, content, Some(size))
}

fn center(block: Block) -> Block {
    Block { text_align: Some(TextAlign::Center), ..block }
}

fn contact_line(id: &str, content: &str, icon: &str) -> Block {
    Block {
        icon: Some(icon.into()),
        icon_align: Some(IconAlign::Center),
        ..text(id, BlockType::Body, content, None)
    }
}

fn welcome_panel() -> Panel {
    let logo = Block {
        src: Some(String::new()),
        alt: Some("MANGUARD".into()),
        ..Block::new("m-f-1-1", BlockType::Logo, "Logo")
    };
    let title = Block {
        font_weight: Some(FontWeight::Black),
        ..center(heading("m-f-1-2", "MANGUARD SECURITY SERVICE", 22.0))
    };
    centered("m-f-1", vec![logo, title])
}

fn foundation_panel() -> Panel {
    centered(
        "m-f-2",
        vec![
            heading("m-f-2-1", "Our Foundation", 20.0),
            subheading("m-f-2-2", "Who We Are", "ShieldCheck"),
            body(
                "m-f-2-3",
                "Welcome to MANGUARD SECURITY SERVICE, a premier security agency dedicated to providing top-tier \
                 security services across South India. Established by Ex-Army officials and managed by a team of \
                 dynamic and experienced executives, we are built on a foundation of discipline and professionalism.",
                13.0,
            ),
            subheading("m-f-2-4", "Our Vision", "Eye"),
            body(
                "m-f-2-5",
                "To be the leading security service provider in South India, known for our commitment to \
                 excellence, innovation, and customer satisfaction. We aim to set new standards through continuous \
                 improvement and adherence to the highest ethical standards.",
                13.0,
            ),
            subheading("m-f-2-6", "Our Mission", "Target"),
            body(
                "m-f-2-7",
                "To deliver reliable and professional security services by employing well-trained personnel and \
                 leveraging the latest technologies. We strive to create a secure environment, protecting assets \
                 with utmost dedication and integrity.",
                13.0,
            ),
        ],
    )
}

fn services_panel() -> Panel {
    let services = [
        ("Corporate & Office Security", "Building", "Protecting offices, factories, business centers, and commercial buildings."),
        ("VIP & Executive Protection", "UserCheck", "Close and discreet security for high-profile individuals and diplomats."),
        ("Event Security Management", "Users", "Comprehensive security for corporate events, weddings, and conferences."),
        ("Residential & Community", "Home", "Round-the-clock protection for apartments and gated communities."),
        ("Industrial & Construction", "Factory", "Specialized security for industrial facilities and construction sites."),
    ];
    let mut blocks = vec![heading("m-f-3-1", "Our Services", 18.0)];
    blocks.extend(titled_pairs("m-f-3", 2, &services));
    Panel {
        background: Some(PanelBackground { opacity: Some(1.0), ..PanelBackground::color("#F8FAFC") }),
        ..centered("m-f-3", blocks)
    }
}

fn why_us_panel() -> Panel {
    let reasons = [
        ("Experienced Professionals", "Award", "Our team is comprised of Ex-Army personnel and seasoned technical experts."),
        ("Comprehensive Training", "GraduationCap", "We invest heavily in development to handle any security challenge effectively."),
        ("Advanced Technology", "Cpu", "Leveraging cutting-edge surveillance and access control technologies."),
        ("Customized Solutions", "Layout", "Tailored security solutions that align perfectly with your requirements."),
        ("Commitment to Excellence", "Star", "Highest standards reflected in our proactive approach and attention to detail."),
        ("24/7 Support", "Clock", "Available round-the-clock to respond swiftly to any security incidents."),
    ];
    let mut blocks = vec![heading("m-b-1-1", "Why Choose Us", 18.0)];
    blocks.extend(titled_pairs("m-b-1", 2, &reasons));
    centered("m-b-1", blocks)
}

fn reviews_panel() -> Panel {
    let qr = Block {
        value: Some("https://manguardsecurity.com".into()),
        font_size: Some(100.0),
        text_align: Some(TextAlign::Center),
        ..Block::new("m-b-2-3", BlockType::Qr, "QR")
    };
    centered(
        "m-b-2",
        vec![
            center(heading("m-b-2-1", "We are experienced in providing you with security", 20.0)),
            qr,
            center(body("m-b-2-4", "Scan to verify our certificates and view our licenses.", 10.0)),
        ],
    )
}

fn contact_panel() -> Panel {
    let blocks = vec![
        center(heading("m-b-3-1", "MANGUARD SECURITY", 22.0)),
        center(body(
            "m-b-3-2",
            "Connect with Manguard Security Service for reliable and professional security solutions. Our team is \
             ready to assist you safely.",
            11.0,
        )),
        contact_line("m-b-3-3", "contact@manguardsecurity.com", "Mail"),
        contact_line("m-b-3-4", "+91 98765 43210", "Phone"),
        contact_line("m-b-3-5", "Licensed & Insured | South India HQ", "Shield"),
        center(body("m-b-3-6", "\u{a9} 2026 Manguard Security Service - All Rights Reserved", 9.0)),
    ];
    let rule = BorderStyle {
        kind: BorderLine::Solid,
        color: "#1A365D".into(),
        width: 4.0,
        display: Some(BorderDisplay::Center),
        width_percent: Some(40.0),
        opacity: None,
    };
    Panel { border_top: Some(rule), ..centered("m-b-3", blocks) }
}

/// Subheading + body pairs numbered from `first` under `panel_id`.
fn titled_pairs(panel_id: &str, first: usize, items: &[(&str, &str, &str)]) -> Vec<Block> {
    items
        .iter()
        .enumerate()
        .flat_map(|(i, (title, icon, detail))| {
            let n = first + i * 2;
            [
                subheading(&format!("{panel_id}-{n}"), title, icon),
                body(&format!("{panel_id}-{}", n + 1), detail, 13.0),
            ]
        })
        .collect()
}
