use std::collections::HashMap;

use valoforms::{
    default_dictionary, new_default_document, render_standard_preview, template_from_dictionary,
};
use vf_dnd::{DragEngine, DragOutcome, DragPayload, DropSpot};
use vf_document::{import_flat, EditorSession, EntityPatch, EntityTemplate, EntityType};
use vf_editor::EditorPanel;
use vf_store::{DocumentStore, DraftCache, MemoryDraftCache, MemoryStore};

/// End-to-end builder pass: open the editor, drag a palette field in, edit it,
/// preview, save, and reload from the flat wire shape.
#[test]
fn test_full_builder_flow() {
    let mut session = EditorSession::new();
    session.open_editor().unwrap();

    let mut doc = new_default_document("123 Main St Appraisal");
    let dictionary = default_dictionary();

    // Drag "Bedrooms" out of the palette onto the property section.
    let bedrooms = dictionary.get("bedrooms").unwrap();
    let mut engine = DragEngine::new();
    engine
        .begin_drag(DragPayload::PaletteField {
            template: template_from_dictionary(bedrooms),
        })
        .unwrap();
    let outcome = engine
        .end_drag(
            &mut doc,
            Some(DropSpot::Section {
                section_id: "property_details".into(),
            }),
        )
        .unwrap();
    let field_id = match outcome {
        DragOutcome::Inserted { entity_id } => entity_id,
        other => panic!("expected insert, got {:?}", other),
    };

    // Edit it through the panel.
    let mut panel = EditorPanel::new();
    panel.select(&doc, &field_id).unwrap();
    panel.set_required(&mut doc, true).unwrap();
    panel.set_placeholder(&mut doc, "e.g. 3").unwrap();

    // Add a summary block with placeholders.
    let block_id = doc
        .add_entity("valuation", &EntityTemplate::new(EntityType::Data, "Summary"))
        .unwrap();
    doc.update_entity(
        &block_id,
        EntityPatch {
            content: Some("Estimated value: {{estimated_value}}".into()),
            ..Default::default()
        },
    )
    .unwrap();

    // Preview with partial sample data.
    session.toggle_preview().unwrap();
    let mut sample = HashMap::new();
    sample.insert("estimated_value".to_string(), "$500,000".to_string());
    let rendered = render_standard_preview(&doc, &sample);
    let valuation = rendered
        .sections
        .iter()
        .find(|s| s.id == "valuation")
        .unwrap();
    assert_eq!(valuation.entities[0].html, "Estimated value: $500,000");

    // Keep a draft, then save for real from editing mode.
    session.toggle_preview().unwrap();
    assert!(session.can_save());
    let mut drafts = MemoryDraftCache::new(256 * 1024);
    drafts.save_draft(&doc.id, &doc);
    assert_eq!(drafts.load_draft(&doc.id).unwrap(), doc);

    let mut store = MemoryStore::new();
    store.save(&doc).unwrap();
    assert_eq!(store.list().len(), 1);

    // Round-trip the flat wire shape a backend would receive.
    let json = vf_document::export_flat(&doc).unwrap();
    let rebuilt = import_flat(&doc.name, &json).unwrap();
    assert_eq!(rebuilt.flatten(), doc.flatten());
    assert_eq!(
        rebuilt.section_order,
        vec!["property_details".to_string(), "valuation".to_string()]
    );

    session.exit_to_list();
    assert!(!session.can_save());
}
