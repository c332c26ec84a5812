use std::collections::HashMap;

use serde::Serialize;

use vf_document::{Document, Entity, EntityType, PLACEHOLDER_RE};
use vf_dictionary::DataDictionary;

/// Structured preview output, sections and entities in document order.
#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct RenderedDocument {
    pub name: String,
    pub sections: Vec<RenderedSection>,
}

#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct RenderedSection {
    pub id: String,
    pub name: String,
    pub entities: Vec<RenderedEntity>,
}

#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct RenderedEntity {
    pub id: String,
    pub label: String,
    pub html: String,
}

/// Pure projection of a document against a sample-data record. Never fails:
/// missing sample values fall back to a bracketed placeholder and unknown
/// dictionary ids render as the raw id.
pub fn render(
    document: &Document,
    dictionary: &DataDictionary,
    sample_data: &HashMap<String, String>,
) -> RenderedDocument {
    let mut sections = Vec::with_capacity(document.section_order.len());
    for section_id in &document.section_order {
        let section = match document.section(section_id) {
            Some(section) => section,
            None => continue,
        };
        let entities = section
            .children
            .iter()
            .filter_map(|child| document.entity(child))
            .map(|entity| RenderedEntity {
                id: entity.id.clone(),
                label: entity.label.clone(),
                html: render_entity(entity, dictionary, sample_data),
            })
            .collect();
        sections.push(RenderedSection {
            id: section.id.clone(),
            name: section.name.clone(),
            entities,
        });
    }
    RenderedDocument {
        name: document.name.clone(),
        sections,
    }
}

/// Content blocks substitute placeholders; everything else renders as a
/// disabled display widget.
pub fn render_entity(
    entity: &Entity,
    dictionary: &DataDictionary,
    sample_data: &HashMap<String, String>,
) -> String {
    if let Some(content) = &entity.content {
        return substitute(content, sample_data);
    }
    render_field_widget(entity, dictionary, sample_data)
}

/// Replace every `{{field_id}}` occurrence with the sample value for that id,
/// or `[field_id]` when no sample value exists. Replacement is global and
/// malformed placeholder syntax passes through verbatim.
pub fn substitute(content: &str, sample_data: &HashMap<String, String>) -> String {
    PLACEHOLDER_RE
        .replace_all(content, |caps: &regex::Captures| {
            let id = &caps[1];
            match sample_data.get(id) {
                Some(value) => value.clone(),
                None => format!("[{}]", id),
            }
        })
        .into_owned()
}

fn render_field_widget(
    entity: &Entity,
    dictionary: &DataDictionary,
    sample_data: &HashMap<String, String>,
) -> String {
    let value = sample_data.get(&entity.id).cloned().unwrap_or_default();
    let class = entity.custom_class_name.as_deref().unwrap_or("");
    match entity.entity_type {
        EntityType::Textarea => format!(
            r#"<textarea class="{}" disabled>{}</textarea>"#,
            class, value
        ),
        EntityType::Select => {
            let options = entity
                .options
                .iter()
                .map(|option| {
                    let selected = if *option == value { " selected" } else { "" };
                    format!(r#"<option{}>{}</option>"#, selected, option)
                })
                .collect::<Vec<_>>()
                .join("");
            format!(r#"<select class="{}" disabled>{}</select>"#, class, options)
        }
        EntityType::Checkbox => {
            let checked = if value == "true" || value == "1" {
                " checked"
            } else {
                ""
            };
            format!(
                r#"<input type="checkbox" class="{}"{} disabled>"#,
                class, checked
            )
        }
        EntityType::Date => format!(
            r#"<input type="date" class="{}" value="{}" disabled>"#,
            class, value
        ),
        EntityType::Number => format!(
            r#"<input type="number" class="{}" value="{}" disabled>"#,
            class, value
        ),
        EntityType::Photo | EntityType::Image => format!(
            r#"<div class="photo-preview {}">{}</div>"#,
            class,
            if value.is_empty() { "No photo" } else { value.as_str() }
        ),
        EntityType::Location => format!(
            r#"<input type="text" class="location-input {}" value="{}" disabled>"#,
            class, value
        ),
        EntityType::Table => format!(r#"<div class="table-preview {}"></div>"#, class),
        EntityType::Chart => format!(r#"<div class="chart-preview {}"></div>"#, class),
        EntityType::Data => {
            // A data block without content shows its bound dictionary fields.
            let labels = entity
                .data_fields
                .iter()
                .map(|id| dictionary.label_or_id(id))
                .collect::<Vec<_>>()
                .join(", ");
            format!(r#"<div class="data-block {}">{}</div>"#, class, labels)
        }
        EntityType::Text => format!(
            r#"<input type="text" class="{}" value="{}" disabled>"#,
            class, value
        ),
    }
}
