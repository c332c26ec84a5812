use serde::{Deserialize, Serialize};

/// Closed set of entity types. The first eight are the form-builder field
/// types; data/image/table/chart are report content blocks. A `Text` entity
/// with `content` set is a text block rather than a text field.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum EntityType {
    Text,
    Number,
    Textarea,
    Select,
    Checkbox,
    Date,
    Photo,
    Location,
    Data,
    Image,
    Table,
    Chart,
}

impl EntityType {
    pub fn is_numeric(self) -> bool {
        matches!(self, EntityType::Number)
    }

    pub fn is_checkbox(self) -> bool {
        matches!(self, EntityType::Checkbox)
    }

    pub fn is_select(self) -> bool {
        matches!(self, EntityType::Select)
    }

    pub fn is_block(self) -> bool {
        matches!(
            self,
            EntityType::Data | EntityType::Image | EntityType::Table | EntityType::Chart
        )
    }
}

/// Per-field validation constraints, interpreted according to the entity type.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ValidationRules {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_length: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_length: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum LogicCondition {
    Equals,
    NotEquals,
    GreaterThan,
    LessThan,
    IsChecked,
    IsNotChecked,
}

impl LogicCondition {
    /// The checked/unchecked conditions carry no comparison value.
    pub fn needs_value(self) -> bool {
        !matches!(self, LogicCondition::IsChecked | LogicCondition::IsNotChecked)
    }
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum LogicAction {
    Show,
    Hide,
}

/// A show/hide rule keyed off another entity's value. A rule whose target has
/// since been deleted stays in place and is treated as never satisfied.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LogicRule {
    pub target_field_id: String,
    pub condition: LogicCondition,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    pub action: LogicAction,
}

/// The unit a section contains: a form field or a report content block.
/// This is also the flat wire shape; `sectionId` tags ownership so section
/// grouping never travels separately.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Entity {
    pub id: String,
    #[serde(rename = "type")]
    pub entity_type: EntityType,
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub required: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<String>,
    #[serde(rename = "sectionId")]
    pub parent_section_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub validation_rules: Option<ValidationRules>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub conditional_logic: Vec<LogicRule>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub data_fields: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_class_name: Option<String>,
}

/// Blueprint for a new entity. `add_entity` clones it, assigns a fresh id and
/// stamps the owning section.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct EntityTemplate {
    #[serde(default, rename = "type")]
    pub entity_type: Option<EntityType>,
    #[serde(default)]
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub required: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub validation_rules: Option<ValidationRules>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_class_name: Option<String>,
}

impl EntityTemplate {
    pub fn new(entity_type: EntityType, label: &str) -> Self {
        EntityTemplate {
            entity_type: Some(entity_type),
            label: label.to_string(),
            ..Default::default()
        }
    }
}

/// Named ordered container of entities. `children` holds entity ids in render
/// order; it never contains duplicates and only references entities present in
/// the owning document's entity table.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Section {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub children: Vec<String>,
}
