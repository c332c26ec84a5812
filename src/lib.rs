pub use vf_dictionary;
pub use vf_dnd;
pub use vf_document;
pub use vf_editor;
pub use vf_render;
pub use vf_store;

use std::collections::HashMap;

use vf_dictionary::{DataDictionary, DictionaryField};
use vf_document::{Document, EntityTemplate, EntityType, DEFAULT_SECTIONS};
use vf_render::RenderedDocument;

/// The built-in property-valuation catalog.
pub fn default_dictionary() -> DataDictionary {
    vf_dictionary::default_catalog()
}

/// A fresh document carrying the standard valuation sections.
pub fn new_default_document(name: &str) -> Document {
    Document::create_empty(name, &DEFAULT_SECTIONS)
}

/// Palette mapping: turn a dictionary entry into an insertable template. The
/// catalog's type strings are open-ended, so anything unrecognized falls back
/// to a plain text field.
pub fn template_from_dictionary(field: &DictionaryField) -> EntityTemplate {
    let entity_type = match field.field_type.as_str() {
        "number" => EntityType::Number,
        "textarea" => EntityType::Textarea,
        "select" => EntityType::Select,
        "checkbox" => EntityType::Checkbox,
        "date" => EntityType::Date,
        "photo" => EntityType::Photo,
        "location" => EntityType::Location,
        _ => EntityType::Text,
    };
    EntityTemplate::new(entity_type, &field.label)
}

/// One-call preview against the default dictionary.
pub fn render_standard_preview(
    document: &Document,
    sample_data: &HashMap<String, String>,
) -> RenderedDocument {
    vf_render::render(document, &default_dictionary(), sample_data)
}
