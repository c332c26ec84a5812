use serde::{Deserialize, Serialize};

use vf_document::{Document, DocumentError, EntityTemplate};

use crate::geometry::{hit_test, DropZone, Point};

/// What is being dragged. The three kinds carry their own payload so the
/// resolution step can match exhaustively instead of dispatching on strings.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DragPayload {
    /// A template dragged out of the data-dictionary palette; not yet part of
    /// the document.
    PaletteField { template: EntityTemplate },
    /// A top-level section being reordered.
    Section { section_id: String },
    /// An entity already in the document.
    Entity {
        entity_id: String,
        from_section_id: String,
    },
}

/// Where the pointer is at drop time.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DropSpot {
    /// A section container's background (possibly an empty section).
    Section { section_id: String },
    /// A specific entity inside a section.
    Entity {
        section_id: String,
        entity_id: String,
    },
    /// The root canvas, outside any section.
    Canvas,
}

/// Terminal result of a drag. `Cancelled` and `Rejected` guarantee the
/// document was not touched.
#[derive(Clone, Debug, PartialEq)]
pub enum DragOutcome {
    Cancelled,
    Rejected,
    Inserted { entity_id: String },
    SectionReordered,
    EntityReordered,
    EntityMoved,
}

#[derive(Clone, Debug)]
struct ActiveDrag {
    payload: DragPayload,
    hover: Option<DropSpot>,
}

/// Translates one pointer (or keyboard) interaction into a single terminal
/// drag result. Nothing is mutated until `end_drag` resolves successfully,
/// so a cancelled drag has no state to roll back.
#[derive(Debug, Default)]
pub struct DragEngine {
    active: Option<ActiveDrag>,
}

impl DragEngine {
    pub fn new() -> Self {
        DragEngine::default()
    }

    pub fn is_dragging(&self) -> bool {
        self.active.is_some()
    }

    pub fn payload(&self) -> Option<&DragPayload> {
        self.active.as_ref().map(|drag| &drag.payload)
    }

    pub fn hover(&self) -> Option<&DropSpot> {
        self.active.as_ref().and_then(|drag| drag.hover.as_ref())
    }

    /// Record the active drag. The UI disables pointer capture elsewhere, so
    /// a second `begin_drag` while one is in flight is a caller bug.
    pub fn begin_drag(&mut self, payload: DragPayload) -> Result<(), DocumentError> {
        if self.active.is_some() {
            return Err(DocumentError::Invariant(
                "a drag is already in progress".into(),
            ));
        }
        log::debug!("drag started: {:?}", payload);
        self.active = Some(ActiveDrag {
            payload,
            hover: None,
        });
        Ok(())
    }

    /// Continuous phase: track which droppable the pointer currently covers.
    pub fn hover_at(&mut self, zones: &[DropZone], point: Point) {
        if let Some(drag) = self.active.as_mut() {
            drag.hover = hit_test(zones, point).map(|zone| zone.spot.clone());
        }
    }

    /// Abort the drag (Escape, or releasing outside every droppable). The
    /// document is untouched.
    pub fn cancel(&mut self) -> DragOutcome {
        if self.active.take().is_some() {
            log::debug!("drag cancelled");
        }
        DragOutcome::Cancelled
    }

    /// Terminal event: resolve the drop against the document. `None` means
    /// the pointer was released outside any droppable and nothing happens.
    pub fn end_drag(
        &mut self,
        document: &mut Document,
        over: Option<DropSpot>,
    ) -> Result<DragOutcome, DocumentError> {
        let drag = self
            .active
            .take()
            .ok_or_else(|| DocumentError::Invariant("no drag in progress".into()))?;

        let spot = match over {
            Some(spot) => spot,
            None => {
                log::debug!("drag released outside any droppable");
                return Ok(DragOutcome::Cancelled);
            }
        };

        let outcome = match drag.payload {
            DragPayload::PaletteField { template } => {
                Self::resolve_palette_drop(document, template, spot)
            }
            DragPayload::Section { section_id } => {
                Self::resolve_section_drop(document, &section_id, spot)
            }
            DragPayload::Entity {
                entity_id,
                from_section_id,
            } => Self::resolve_entity_drop(document, &entity_id, &from_section_id, spot),
        }?;
        log::debug!("drag resolved: {:?}", outcome);
        Ok(outcome)
    }

    /// Palette templates insert into the section under the pointer; a bare
    /// canvas drop falls back to the first section in top-level order. With no
    /// sections at all the drop is rejected rather than creating an orphan.
    fn resolve_palette_drop(
        document: &mut Document,
        template: EntityTemplate,
        spot: DropSpot,
    ) -> Result<DragOutcome, DocumentError> {
        let section_id = match spot {
            DropSpot::Section { section_id } => section_id,
            DropSpot::Entity { section_id, .. } => section_id,
            DropSpot::Canvas => match document.first_section_id() {
                Some(id) => id.to_string(),
                None => {
                    log::warn!("palette drop rejected: document has no sections");
                    return Ok(DragOutcome::Rejected);
                }
            },
        };
        let entity_id = document.add_entity(&section_id, &template)?;
        Ok(DragOutcome::Inserted { entity_id })
    }

    fn resolve_section_drop(
        document: &mut Document,
        section_id: &str,
        spot: DropSpot,
    ) -> Result<DragOutcome, DocumentError> {
        let target_id = match spot {
            DropSpot::Section { section_id } => section_id,
            DropSpot::Entity { section_id, .. } => section_id,
            DropSpot::Canvas => return Ok(DragOutcome::Cancelled),
        };
        let from = Self::section_position(document, section_id)?;
        let to = Self::section_position(document, &target_id)?;
        if from == to {
            return Ok(DragOutcome::Cancelled);
        }
        document.reorder_sections(from, to)?;
        Ok(DragOutcome::SectionReordered)
    }

    fn resolve_entity_drop(
        document: &mut Document,
        entity_id: &str,
        from_section_id: &str,
        spot: DropSpot,
    ) -> Result<DragOutcome, DocumentError> {
        match spot {
            DropSpot::Entity {
                section_id: target_section,
                entity_id: target_entity,
            } => {
                if target_entity == entity_id {
                    return Ok(DragOutcome::Cancelled);
                }
                let target_index = document
                    .section(&target_section)
                    .ok_or_else(|| {
                        DocumentError::NotFound(format!("section '{}'", target_section))
                    })?
                    .children
                    .iter()
                    .position(|c| c == &target_entity)
                    .ok_or_else(|| {
                        DocumentError::NotFound(format!("entity '{}'", target_entity))
                    })?;

                if target_section == from_section_id {
                    let from_index = document
                        .section(from_section_id)
                        .ok_or_else(|| {
                            DocumentError::NotFound(format!("section '{}'", from_section_id))
                        })?
                        .children
                        .iter()
                        .position(|c| c == entity_id)
                        .ok_or_else(|| {
                            DocumentError::NotFound(format!(
                                "entity '{}' in section '{}'",
                                entity_id, from_section_id
                            ))
                        })?;
                    document.reorder_within_section(from_section_id, from_index, target_index)?;
                    Ok(DragOutcome::EntityReordered)
                } else {
                    document.move_between_sections(
                        entity_id,
                        from_section_id,
                        &target_section,
                        target_index,
                    )?;
                    Ok(DragOutcome::EntityMoved)
                }
            }
            DropSpot::Section {
                section_id: target_section,
            } => {
                // Container background: append at the end.
                if target_section == from_section_id {
                    let len = document
                        .section(from_section_id)
                        .ok_or_else(|| {
                            DocumentError::NotFound(format!("section '{}'", from_section_id))
                        })?
                        .children
                        .len();
                    let from_index = document
                        .section(from_section_id)
                        .expect("checked above")
                        .children
                        .iter()
                        .position(|c| c == entity_id)
                        .ok_or_else(|| {
                            DocumentError::NotFound(format!(
                                "entity '{}' in section '{}'",
                                entity_id, from_section_id
                            ))
                        })?;
                    if len <= 1 || from_index == len - 1 {
                        return Ok(DragOutcome::Cancelled);
                    }
                    document.reorder_within_section(from_section_id, from_index, len - 1)?;
                    Ok(DragOutcome::EntityReordered)
                } else {
                    let len = document
                        .section(&target_section)
                        .ok_or_else(|| {
                            DocumentError::NotFound(format!("section '{}'", target_section))
                        })?
                        .children
                        .len();
                    document.move_between_sections(
                        entity_id,
                        from_section_id,
                        &target_section,
                        len,
                    )?;
                    Ok(DragOutcome::EntityMoved)
                }
            }
            DropSpot::Canvas => Ok(DragOutcome::Cancelled),
        }
    }

    fn section_position(document: &Document, section_id: &str) -> Result<usize, DocumentError> {
        document
            .section_order
            .iter()
            .position(|s| s == section_id)
            .ok_or_else(|| DocumentError::NotFound(format!("section '{}'", section_id)))
    }
}
