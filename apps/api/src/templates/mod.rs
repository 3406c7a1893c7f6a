//! The fixed set of résumé templates a user can pick from.
//!
//! Templates are `static` data: defined once, looked up by key, never mutated.
//! The default field structure handed to clients is derived from each template's
//! capability flags, so a template that supports projects advertises a `projects`
//! collection and every other template advertises `awards`.

use serde::Serialize;
use serde_json::{json, Value};

/// Colour and font tokens a client uses to style its editor preview.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StyleTokens {
    pub primary_color: &'static str,
    pub secondary_color: &'static str,
    pub background_color: &'static str,
    pub font_family: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TemplateDefinition {
    pub id: u32,
    pub key: &'static str,
    pub name: &'static str,
    pub styles: StyleTokens,
    /// Whether the Projects section is rendered. Templates without it render Awards instead.
    pub supports_projects: bool,
}

impl TemplateDefinition {
    /// Empty-default content skeleton for this template.
    pub fn field_structure(&self) -> Value {
        let mut structure = json!({
            "professionalInfo": {
                "name": "",
                "email": "",
                "phone": "",
                "location": "",
                "linkedin": "",
            },
            "summary": "",
            "workExperience": [],
            "education": [],
            "certifications": [],
            "skills": [],
        });
        let extra = if self.supports_projects {
            "projects"
        } else {
            "awards"
        };
        if let Value::Object(map) = &mut structure {
            map.insert(extra.to_string(), json!([]));
        }
        structure
    }
}

/// Wire representation for `GET /api/resumes/templates`.
#[derive(Debug, Clone, Serialize)]
pub struct TemplateSummary {
    pub id: u32,
    pub name: &'static str,
    pub key: &'static str,
    pub styles: StyleTokens,
    pub structure: Value,
}

impl From<&TemplateDefinition> for TemplateSummary {
    fn from(t: &TemplateDefinition) -> Self {
        TemplateSummary {
            id: t.id,
            name: t.name,
            key: t.key,
            styles: t.styles,
            structure: t.field_structure(),
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Built-in templates
// ────────────────────────────────────────────────────────────────────────────

static TEMPLATES: [TemplateDefinition; 3] = [
    TemplateDefinition {
        id: 1,
        key: "modern",
        name: "Modern Tech",
        styles: StyleTokens {
            primary_color: "#2563eb",
            secondary_color: "#64748b",
            background_color: "#ffffff",
            font_family: "Helvetica",
        },
        supports_projects: true,
    },
    TemplateDefinition {
        id: 2,
        key: "corporate",
        name: "Corporate World",
        styles: StyleTokens {
            primary_color: "#003366",
            secondary_color: "#666666",
            background_color: "#ffffff",
            font_family: "Times-Roman",
        },
        supports_projects: false,
    },
    TemplateDefinition {
        id: 3,
        key: "creative",
        name: "Creative World",
        styles: StyleTokens {
            primary_color: "#b300b3",
            secondary_color: "#ff66a3",
            background_color: "#ffffff",
            font_family: "Courier",
        },
        supports_projects: false,
    },
];

/// All built-in templates, in id order.
pub fn list() -> &'static [TemplateDefinition] {
    &TEMPLATES
}

/// Looks up a template by key. Keys are case-sensitive.
pub fn get(key: &str) -> Option<&'static TemplateDefinition> {
    TEMPLATES.iter().find(|t| t.key == key)
}

/// Unknown keys never support projects.
pub fn supports_projects(key: &str) -> bool {
    get(key).is_some_and(|t| t.supports_projects)
}
