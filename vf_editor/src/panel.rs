use vf_document::{
    Document, DocumentError, EntityPatch, EntityType, LogicAction, LogicCondition, LogicRule,
    ValidationRules,
};

/// Side panel bound to at most one selected entity. Every mutation funnels
/// through `Document::update_entity`; the panel never reaches into the
/// document's tables directly.
#[derive(Debug, Default)]
pub struct EditorPanel {
    selected: Option<String>,
}

impl EditorPanel {
    pub fn new() -> Self {
        EditorPanel::default()
    }

    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    pub fn select(&mut self, document: &Document, id: &str) -> Result<(), DocumentError> {
        if document.entity(id).is_none() {
            return Err(DocumentError::NotFound(format!("entity '{}'", id)));
        }
        self.selected = Some(id.to_string());
        Ok(())
    }

    pub fn clear(&mut self) {
        self.selected = None;
    }

    /// Drop the selection if the entity has vanished from the document, e.g.
    /// after a delete elsewhere.
    pub fn sync(&mut self, document: &Document) {
        if let Some(id) = &self.selected {
            if document.entity(id).is_none() {
                log::debug!("selected entity '{}' no longer exists, clearing selection", id);
                self.selected = None;
            }
        }
    }

    // --- Plain property edits ---

    pub fn set_label(&self, document: &mut Document, label: &str) -> Result<(), DocumentError> {
        self.patch(
            document,
            EntityPatch {
                label: Some(label.to_string()),
                ..Default::default()
            },
        )
    }

    pub fn set_placeholder(
        &self,
        document: &mut Document,
        placeholder: &str,
    ) -> Result<(), DocumentError> {
        self.patch(
            document,
            EntityPatch {
                placeholder: Some(placeholder.to_string()),
                ..Default::default()
            },
        )
    }

    pub fn set_description(
        &self,
        document: &mut Document,
        description: &str,
    ) -> Result<(), DocumentError> {
        self.patch(
            document,
            EntityPatch {
                description: Some(description.to_string()),
                ..Default::default()
            },
        )
    }

    pub fn set_required(
        &self,
        document: &mut Document,
        required: bool,
    ) -> Result<(), DocumentError> {
        self.patch(
            document,
            EntityPatch {
                required: Some(required),
                ..Default::default()
            },
        )
    }

    pub fn set_custom_class(
        &self,
        document: &mut Document,
        class_name: &str,
    ) -> Result<(), DocumentError> {
        self.patch(
            document,
            EntityPatch {
                custom_class_name: Some(class_name.to_string()),
                ..Default::default()
            },
        )
    }

    pub fn set_validation_rules(
        &self,
        document: &mut Document,
        rules: ValidationRules,
    ) -> Result<(), DocumentError> {
        self.patch(
            document,
            EntityPatch {
                validation_rules: Some(rules),
                ..Default::default()
            },
        )
    }

    pub fn set_content(
        &self,
        document: &mut Document,
        content: &str,
    ) -> Result<(), DocumentError> {
        self.patch(
            document,
            EntityPatch {
                content: Some(content.to_string()),
                ..Default::default()
            },
        )
    }

    /// Property-panel section move; always appends at the end of the target.
    pub fn move_to_section(
        &self,
        document: &mut Document,
        section_id: &str,
    ) -> Result<(), DocumentError> {
        self.patch(
            document,
            EntityPatch {
                parent_section_id: Some(section_id.to_string()),
                ..Default::default()
            },
        )
    }

    // --- Option list editing (select entities) ---

    /// Append an option string as typed. Duplicates are kept; the user's
    /// entries are never silently deduplicated.
    pub fn add_option(&self, document: &mut Document, text: &str) -> Result<(), DocumentError> {
        let mut options = self.select_options(document)?;
        options.push(text.to_string());
        self.patch(
            document,
            EntityPatch {
                options: Some(options),
                ..Default::default()
            },
        )
    }

    pub fn update_option(
        &self,
        document: &mut Document,
        index: usize,
        text: &str,
    ) -> Result<(), DocumentError> {
        let mut options = self.select_options(document)?;
        if index >= options.len() {
            return Err(DocumentError::Range {
                index,
                len: options.len(),
            });
        }
        options[index] = text.to_string();
        self.patch(
            document,
            EntityPatch {
                options: Some(options),
                ..Default::default()
            },
        )
    }

    pub fn remove_option(
        &self,
        document: &mut Document,
        index: usize,
    ) -> Result<(), DocumentError> {
        let mut options = self.select_options(document)?;
        if index >= options.len() {
            return Err(DocumentError::Range {
                index,
                len: options.len(),
            });
        }
        options.remove(index);
        self.patch(
            document,
            EntityPatch {
                options: Some(options),
                ..Default::default()
            },
        )
    }

    // --- Conditional logic editing ---

    /// Conditions the panel may offer for a given target type: numeric
    /// comparisons only against numeric targets, checked/unchecked only
    /// against checkboxes.
    pub fn allowed_conditions(target_type: EntityType) -> Vec<LogicCondition> {
        let mut conditions = vec![LogicCondition::Equals, LogicCondition::NotEquals];
        if target_type.is_numeric() {
            conditions.push(LogicCondition::GreaterThan);
            conditions.push(LogicCondition::LessThan);
        }
        if target_type.is_checkbox() {
            conditions.push(LogicCondition::IsChecked);
            conditions.push(LogicCondition::IsNotChecked);
        }
        conditions
    }

    /// Whether the value input is shown for a condition.
    pub fn condition_needs_value(condition: LogicCondition) -> bool {
        condition.needs_value()
    }

    /// Add a rule. The target must be a different entity that currently
    /// exists, and the condition must be allowed for the target's type. (The
    /// document itself tolerates rules whose target is later deleted.)
    pub fn add_rule(&self, document: &mut Document, rule: LogicRule) -> Result<(), DocumentError> {
        let selected = self.selected_id()?;
        if rule.target_field_id == selected {
            return Err(DocumentError::Validation(
                "a rule cannot target its own field".into(),
            ));
        }
        let target = document.entity(&rule.target_field_id).ok_or_else(|| {
            DocumentError::NotFound(format!("entity '{}'", rule.target_field_id))
        })?;
        if !Self::allowed_conditions(target.entity_type).contains(&rule.condition) {
            return Err(DocumentError::Validation(format!(
                "condition {:?} not applicable to a {:?} target",
                rule.condition, target.entity_type
            )));
        }
        let mut rules = self.logic_rules(document)?;
        rules.push(rule);
        self.patch(
            document,
            EntityPatch {
                conditional_logic: Some(rules),
                ..Default::default()
            },
        )
    }

    pub fn remove_rule(
        &self,
        document: &mut Document,
        index: usize,
    ) -> Result<(), DocumentError> {
        let mut rules = self.logic_rules(document)?;
        if index >= rules.len() {
            return Err(DocumentError::Range {
                index,
                len: rules.len(),
            });
        }
        rules.remove(index);
        self.patch(
            document,
            EntityPatch {
                conditional_logic: Some(rules),
                ..Default::default()
            },
        )
    }

    /// Change a rule's condition. A previously entered comparison value is
    /// kept even when the new condition does not use one; it is dead data,
    /// never interpreted.
    pub fn set_rule_condition(
        &self,
        document: &mut Document,
        index: usize,
        condition: LogicCondition,
    ) -> Result<(), DocumentError> {
        let mut rules = self.logic_rules(document)?;
        let len = rules.len();
        let rule = rules
            .get_mut(index)
            .ok_or(DocumentError::Range { index, len })?;
        rule.condition = condition;
        self.patch(
            document,
            EntityPatch {
                conditional_logic: Some(rules),
                ..Default::default()
            },
        )
    }

    /// Retarget a rule. The entered value is preserved; if the current
    /// condition is not applicable to the new target's type it falls back to
    /// equals.
    pub fn set_rule_target(
        &self,
        document: &mut Document,
        index: usize,
        target_field_id: &str,
    ) -> Result<(), DocumentError> {
        let selected = self.selected_id()?;
        if target_field_id == selected {
            return Err(DocumentError::Validation(
                "a rule cannot target its own field".into(),
            ));
        }
        let target_type = document
            .entity(target_field_id)
            .ok_or_else(|| DocumentError::NotFound(format!("entity '{}'", target_field_id)))?
            .entity_type;

        let mut rules = self.logic_rules(document)?;
        let len = rules.len();
        let rule = rules
            .get_mut(index)
            .ok_or(DocumentError::Range { index, len })?;
        rule.target_field_id = target_field_id.to_string();
        if !Self::allowed_conditions(target_type).contains(&rule.condition) {
            rule.condition = LogicCondition::Equals;
        }
        self.patch(
            document,
            EntityPatch {
                conditional_logic: Some(rules),
                ..Default::default()
            },
        )
    }

    pub fn set_rule_value(
        &self,
        document: &mut Document,
        index: usize,
        value: &str,
    ) -> Result<(), DocumentError> {
        let mut rules = self.logic_rules(document)?;
        let len = rules.len();
        let rule = rules
            .get_mut(index)
            .ok_or(DocumentError::Range { index, len })?;
        rule.value = Some(value.to_string());
        self.patch(
            document,
            EntityPatch {
                conditional_logic: Some(rules),
                ..Default::default()
            },
        )
    }

    pub fn set_rule_action(
        &self,
        document: &mut Document,
        index: usize,
        action: LogicAction,
    ) -> Result<(), DocumentError> {
        let mut rules = self.logic_rules(document)?;
        let len = rules.len();
        let rule = rules
            .get_mut(index)
            .ok_or(DocumentError::Range { index, len })?;
        rule.action = action;
        self.patch(
            document,
            EntityPatch {
                conditional_logic: Some(rules),
                ..Default::default()
            },
        )
    }

    // --- Internals ---

    fn selected_id(&self) -> Result<&str, DocumentError> {
        self.selected
            .as_deref()
            .ok_or_else(|| DocumentError::Invariant("no entity selected".into()))
    }

    fn patch(&self, document: &mut Document, patch: EntityPatch) -> Result<(), DocumentError> {
        let id = self.selected_id()?.to_string();
        document.update_entity(&id, patch)
    }

    fn select_options(&self, document: &Document) -> Result<Vec<String>, DocumentError> {
        let id = self.selected_id()?;
        let entity = document
            .entity(id)
            .ok_or_else(|| DocumentError::NotFound(format!("entity '{}'", id)))?;
        if !entity.entity_type.is_select() {
            return Err(DocumentError::Invariant(
                "options only apply to select fields".into(),
            ));
        }
        Ok(entity.options.clone())
    }

    fn logic_rules(&self, document: &Document) -> Result<Vec<LogicRule>, DocumentError> {
        let id = self.selected_id()?;
        let entity = document
            .entity(id)
            .ok_or_else(|| DocumentError::NotFound(format!("entity '{}'", id)))?;
        Ok(entity.conditional_logic.clone())
    }
}
