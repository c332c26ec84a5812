use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::content::placeholders;
use crate::defaults::{canonical_rank, section_display_name};
use crate::error::DocumentError;
use crate::schema::{Entity, EntityTemplate, EntityType, LogicRule, Section, ValidationRules};

/// The full editable artifact: ordered sections plus an entity table.
///
/// All builder state lives here and is only mutated through the operations
/// below. Every entity belongs to exactly one section at any time, and the
/// section count never reaches zero through any sequence of valid operations.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lender: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub property_type: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default)]
    pub has_conflict: bool,
    pub section_order: Vec<String>,
    pub sections: HashMap<String, Section>,
    pub entities: HashMap<String, Entity>,
}

/// Partial update applied by `update_entity`. `None` fields are left alone.
#[derive(Clone, Debug, Default)]
pub struct EntityPatch {
    pub label: Option<String>,
    pub placeholder: Option<String>,
    pub description: Option<String>,
    pub required: Option<bool>,
    pub options: Option<Vec<String>>,
    pub parent_section_id: Option<String>,
    pub validation_rules: Option<ValidationRules>,
    pub conditional_logic: Option<Vec<LogicRule>>,
    pub content: Option<String>,
    pub custom_class_name: Option<String>,
}

impl Document {
    /// New empty document with the given named sections, in the given order.
    pub fn create_empty(name: &str, default_sections: &[(&str, &str)]) -> Document {
        let now = Utc::now();
        let mut doc = Document {
            id: Uuid::new_v4().to_string(),
            name: name.to_string(),
            lender: None,
            property_type: None,
            created_at: now,
            updated_at: now,
            has_conflict: false,
            section_order: Vec::new(),
            sections: HashMap::new(),
            entities: HashMap::new(),
        };
        for (id, section_name) in default_sections {
            doc.push_section(id, section_name);
        }
        doc
    }

    /// Rebuild a document from the flat save shape: one section per distinct
    /// `sectionId`, known sections first in canonical order, unknown ids as
    /// trailing custom sections in first-seen order. Entities keep their input
    /// order within each section.
    ///
    /// An empty flat list yields the default section skeleton, since a
    /// document never has zero sections.
    pub fn hydrate(name: &str, flat: Vec<Entity>) -> Document {
        if flat.is_empty() {
            return Document::create_empty(name, &crate::defaults::DEFAULT_SECTIONS);
        }

        let mut first_seen: Vec<String> = Vec::new();
        for entity in &flat {
            if !first_seen.contains(&entity.parent_section_id) {
                first_seen.push(entity.parent_section_id.clone());
            }
        }

        let mut known: Vec<String> = first_seen
            .iter()
            .filter(|id| canonical_rank(id).is_some())
            .cloned()
            .collect();
        known.sort_by_key(|id| canonical_rank(id));
        let custom = first_seen.iter().filter(|id| canonical_rank(id).is_none());

        let mut doc = Document::create_empty(name, &[]);
        for id in known.iter().chain(custom) {
            doc.push_section(id, &section_display_name(id));
        }

        for entity in flat {
            if doc.entities.contains_key(&entity.id) {
                log::warn!("duplicate entity id '{}' in flat input, skipping", entity.id);
                continue;
            }
            let section = doc
                .sections
                .get_mut(&entity.parent_section_id)
                .expect("section created for every distinct sectionId");
            section.children.push(entity.id.clone());
            doc.entities.insert(entity.id.clone(), entity);
        }
        doc
    }

    // --- Section operations ---

    /// Append a new empty section. The name must be non-empty after trimming;
    /// auto-generated names are the caller's concern.
    pub fn add_section(&mut self, name: &str) -> Result<String, DocumentError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(DocumentError::Validation("section name is empty".into()));
        }
        let id = Uuid::new_v4().to_string();
        self.push_section(&id, name);
        self.touch();
        Ok(id)
    }

    pub fn rename_section(&mut self, id: &str, name: &str) -> Result<(), DocumentError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(DocumentError::Validation("section name is empty".into()));
        }
        let section = self
            .sections
            .get_mut(id)
            .ok_or_else(|| DocumentError::NotFound(format!("section '{}'", id)))?;
        if section.name != name {
            section.name = name.to_string();
            self.touch();
        }
        Ok(())
    }

    /// Delete a section and hand every entity it owned to the first remaining
    /// section in top-level order, after that section's existing children and
    /// in their original relative order. Deleting the last section is refused.
    pub fn delete_section(&mut self, id: &str) -> Result<(), DocumentError> {
        if !self.sections.contains_key(id) {
            return Err(DocumentError::NotFound(format!("section '{}'", id)));
        }
        if self.section_order.len() == 1 {
            return Err(DocumentError::Invariant(
                "cannot delete the last remaining section".into(),
            ));
        }

        self.section_order.retain(|s| s != id);
        let removed = self.sections.remove(id).expect("checked above");

        let heir_id = self.section_order[0].clone();
        for child in &removed.children {
            if let Some(entity) = self.entities.get_mut(child) {
                entity.parent_section_id = heir_id.clone();
            }
        }
        let heir = self.sections.get_mut(&heir_id).expect("order entries exist");
        heir.children.extend(removed.children);
        self.touch();
        Ok(())
    }

    pub fn reorder_sections(&mut self, from: usize, to: usize) -> Result<(), DocumentError> {
        let len = self.section_order.len();
        if from >= len {
            return Err(DocumentError::Range { index: from, len });
        }
        if to >= len {
            return Err(DocumentError::Range { index: to, len });
        }
        if from != to {
            let id = self.section_order.remove(from);
            self.section_order.insert(to, id);
            self.touch();
        }
        Ok(())
    }

    // --- Entity operations ---

    /// Clone a template into the given section, appending at the end.
    /// Returns the fresh entity id.
    pub fn add_entity(
        &mut self,
        section_id: &str,
        template: &EntityTemplate,
    ) -> Result<String, DocumentError> {
        if !self.sections.contains_key(section_id) {
            return Err(DocumentError::NotFound(format!("section '{}'", section_id)));
        }
        let id = Uuid::new_v4().to_string();
        let data_fields = template
            .content
            .as_deref()
            .map(placeholders)
            .unwrap_or_default();
        let entity = Entity {
            id: id.clone(),
            entity_type: template.entity_type.unwrap_or(EntityType::Text),
            label: template.label.clone(),
            placeholder: template.placeholder.clone(),
            description: template.description.clone(),
            required: template.required,
            options: template.options.clone(),
            parent_section_id: section_id.to_string(),
            validation_rules: template.validation_rules.clone(),
            conditional_logic: Vec::new(),
            content: template.content.clone(),
            data_fields,
            custom_class_name: template.custom_class_name.clone(),
        };
        self.sections
            .get_mut(section_id)
            .expect("checked above")
            .children
            .push(id.clone());
        self.entities.insert(id.clone(), entity);
        self.touch();
        Ok(id)
    }

    /// Merge a partial update into one entity. A changed `parent_section_id`
    /// moves the entity: removed from the old section's list and appended to
    /// the new one, both sides updated together. Setting `content` recomputes
    /// the entity's `data_fields` from its placeholders.
    pub fn update_entity(&mut self, id: &str, patch: EntityPatch) -> Result<(), DocumentError> {
        if !self.entities.contains_key(id) {
            return Err(DocumentError::NotFound(format!("entity '{}'", id)));
        }
        if let Some(new_parent) = &patch.parent_section_id {
            if !self.sections.contains_key(new_parent) {
                return Err(DocumentError::NotFound(format!("section '{}'", new_parent)));
            }
            let current = self.entities[id].parent_section_id.clone();
            if *new_parent != current {
                let old = self.sections.get_mut(&current).expect("owner exists");
                old.children.retain(|c| c != id);
                self.sections
                    .get_mut(new_parent)
                    .expect("checked above")
                    .children
                    .push(id.to_string());
            }
        }

        let entity = self.entities.get_mut(id).expect("checked above");
        if let Some(parent) = patch.parent_section_id {
            entity.parent_section_id = parent;
        }
        if let Some(label) = patch.label {
            entity.label = label;
        }
        if let Some(placeholder) = patch.placeholder {
            entity.placeholder = Some(placeholder);
        }
        if let Some(description) = patch.description {
            entity.description = Some(description);
        }
        if let Some(required) = patch.required {
            entity.required = required;
        }
        if let Some(options) = patch.options {
            entity.options = options;
        }
        if let Some(rules) = patch.validation_rules {
            entity.validation_rules = Some(rules);
        }
        if let Some(logic) = patch.conditional_logic {
            entity.conditional_logic = logic;
        }
        if let Some(content) = patch.content {
            entity.data_fields = placeholders(&content);
            entity.content = Some(content);
        }
        if let Some(class_name) = patch.custom_class_name {
            entity.custom_class_name = Some(class_name);
        }
        self.touch();
        Ok(())
    }

    /// Remove an entity from its section and from the entity table. Logic
    /// rules elsewhere that target it are left in place; they simply never
    /// match again.
    pub fn delete_entity(&mut self, id: &str) -> Result<(), DocumentError> {
        let entity = self
            .entities
            .remove(id)
            .ok_or_else(|| DocumentError::NotFound(format!("entity '{}'", id)))?;
        if let Some(owner) = self.sections.get_mut(&entity.parent_section_id) {
            owner.children.retain(|c| c != id);
        }
        self.touch();
        Ok(())
    }

    /// Move one child within a section's ordered list. Both indices must be
    /// in range; `from == to` is a valid no-op.
    pub fn reorder_within_section(
        &mut self,
        section_id: &str,
        from: usize,
        to: usize,
    ) -> Result<(), DocumentError> {
        let section = self
            .sections
            .get_mut(section_id)
            .ok_or_else(|| DocumentError::NotFound(format!("section '{}'", section_id)))?;
        let len = section.children.len();
        if from >= len {
            return Err(DocumentError::Range { index: from, len });
        }
        if to >= len {
            return Err(DocumentError::Range { index: to, len });
        }
        if from != to {
            let child = section.children.remove(from);
            section.children.insert(to, child);
            self.touch();
        }
        Ok(())
    }

    /// Take an entity out of one section and insert it into another at
    /// `to_index` (clamped to the target list's length). The entity must
    /// actually be listed in `from_section_id`; a stale drag event that claims
    /// otherwise is rejected without mutating anything.
    pub fn move_between_sections(
        &mut self,
        entity_id: &str,
        from_section_id: &str,
        to_section_id: &str,
        to_index: usize,
    ) -> Result<(), DocumentError> {
        if !self.entities.contains_key(entity_id) {
            return Err(DocumentError::NotFound(format!("entity '{}'", entity_id)));
        }
        if !self.sections.contains_key(to_section_id) {
            return Err(DocumentError::NotFound(format!("section '{}'", to_section_id)));
        }
        let from = self
            .sections
            .get(from_section_id)
            .ok_or_else(|| DocumentError::NotFound(format!("section '{}'", from_section_id)))?;
        let position = from
            .children
            .iter()
            .position(|c| c == entity_id)
            .ok_or_else(|| {
                DocumentError::NotFound(format!(
                    "entity '{}' in section '{}'",
                    entity_id, from_section_id
                ))
            })?;

        self.sections
            .get_mut(from_section_id)
            .expect("checked above")
            .children
            .remove(position);
        let to = self.sections.get_mut(to_section_id).expect("checked above");
        let index = to_index.min(to.children.len());
        to.children.insert(index, entity_id.to_string());
        self.entities
            .get_mut(entity_id)
            .expect("checked above")
            .parent_section_id = to_section_id.to_string();
        self.touch();
        Ok(())
    }

    // --- Projections ---

    /// Save-time projection: sections in top-level order, each section's
    /// children in order, every entity tagged with its `sectionId`.
    pub fn flatten(&self) -> Vec<Entity> {
        let mut flat = Vec::with_capacity(self.entities.len());
        for section_id in &self.section_order {
            let section = &self.sections[section_id];
            for child in &section.children {
                flat.push(self.entities[child].clone());
            }
        }
        flat
    }

    pub fn section(&self, id: &str) -> Option<&Section> {
        self.sections.get(id)
    }

    pub fn entity(&self, id: &str) -> Option<&Entity> {
        self.entities.get(id)
    }

    /// First section in top-level order. A valid document always has one.
    pub fn first_section_id(&self) -> Option<&str> {
        self.section_order.first().map(String::as_str)
    }

    pub fn mark_conflict(&mut self) {
        self.has_conflict = true;
    }

    pub fn clear_conflict(&mut self) {
        self.has_conflict = false;
    }

    /// Structural self-check: the top-level order and the section table agree,
    /// and every entity appears in exactly one section's child list, which is
    /// also the section it claims as parent.
    pub fn verify(&self) -> Result<(), DocumentError> {
        if self.section_order.len() != self.sections.len() {
            return Err(DocumentError::Invariant(
                "section order and section table disagree".into(),
            ));
        }
        let mut seen: HashMap<&str, &str> = HashMap::new();
        for section_id in &self.section_order {
            let section = self.sections.get(section_id).ok_or_else(|| {
                DocumentError::Invariant(format!("ordered section '{}' missing", section_id))
            })?;
            for child in &section.children {
                let entity = self.entities.get(child).ok_or_else(|| {
                    DocumentError::Invariant(format!("child '{}' has no entity", child))
                })?;
                if entity.parent_section_id != *section_id {
                    return Err(DocumentError::Invariant(format!(
                        "entity '{}' listed in '{}' but owned by '{}'",
                        child, section_id, entity.parent_section_id
                    )));
                }
                if seen.insert(child.as_str(), section_id.as_str()).is_some() {
                    return Err(DocumentError::Invariant(format!(
                        "entity '{}' appears in more than one section",
                        child
                    )));
                }
            }
        }
        if seen.len() != self.entities.len() {
            return Err(DocumentError::Invariant(
                "entity table and section children disagree".into(),
            ));
        }
        Ok(())
    }

    fn push_section(&mut self, id: &str, name: &str) {
        self.section_order.push(id.to_string());
        self.sections.insert(
            id.to_string(),
            Section {
                id: id.to_string(),
                name: name.to_string(),
                children: Vec::new(),
            },
        );
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}
