use crate::document::Document;
use crate::schema::Entity;

/// Serialize the flat save shape to JSON. Section grouping never travels on
/// the wire; it is rebuilt from each entity's `sectionId` on import.
pub fn export_flat(document: &Document) -> serde_json::Result<String> {
    serde_json::to_string(&document.flatten())
}

/// Parse a flat entity list and rebuild a document from it.
pub fn import_flat(name: &str, json: &str) -> serde_json::Result<Document> {
    let flat: Vec<Entity> = serde_json::from_str(json)?;
    Ok(Document::hydrate(name, flat))
}
