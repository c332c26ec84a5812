use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Immutable catalog entry for a bindable field. The `id` is what `{{id}}`
/// placeholder tokens must match literally.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DictionaryField {
    pub id: String,
    pub label: String,
    #[serde(rename = "type")]
    pub field_type: String,
    pub category: String,
}

/// Read-only lookup catalog backing the insertable-field palette and the
/// preview renderer's placeholder resolution. There is no referential
/// integrity here: a document may reference ids the catalog does not know,
/// and consumers degrade to rendering the raw id.
#[derive(Debug, Clone, Default)]
pub struct DataDictionary {
    fields: Vec<DictionaryField>,
    by_id: HashMap<String, usize>,
}

impl DataDictionary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_field(&mut self, field: DictionaryField) {
        self.by_id.insert(field.id.clone(), self.fields.len());
        self.fields.push(field);
    }

    pub fn get(&self, id: &str) -> Option<&DictionaryField> {
        self.by_id.get(id).map(|i| &self.fields[*i])
    }

    /// Display label for an id, or the raw id when the catalog has no entry.
    pub fn label_or_id<'a>(&'a self, id: &'a str) -> &'a str {
        self.get(id).map(|f| f.label.as_str()).unwrap_or(id)
    }

    pub fn fields(&self) -> &[DictionaryField] {
        &self.fields
    }

    pub fn categories(&self) -> Vec<&str> {
        let mut seen: Vec<&str> = Vec::new();
        for field in &self.fields {
            if !seen.contains(&field.category.as_str()) {
                seen.push(&field.category);
            }
        }
        seen
    }

    pub fn fields_in_category(&self, category: &str) -> Vec<&DictionaryField> {
        self.fields.iter().filter(|f| f.category == category).collect()
    }

    pub fn save_to_file<P: AsRef<std::path::Path>>(&self, path: P) -> anyhow::Result<()> {
        let json = serde_json::to_string_pretty(&self.fields)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    pub fn load_from_file<P: AsRef<std::path::Path>>(path: P) -> anyhow::Result<Self> {
        let data = std::fs::read_to_string(path)?;
        let fields: Vec<DictionaryField> = serde_json::from_str(&data)?;
        Ok(Self::from_fields(fields))
    }

    pub fn load_from_yaml_file<P: AsRef<std::path::Path>>(path: P) -> anyhow::Result<Self> {
        let data = std::fs::read_to_string(path)?;
        let fields: Vec<DictionaryField> = serde_yaml::from_str(&data)?;
        Ok(Self::from_fields(fields))
    }

    pub fn from_fields(fields: Vec<DictionaryField>) -> Self {
        let mut dict = Self::new();
        for field in fields {
            dict.add_field(field);
        }
        dict
    }
}

/// The built-in property-valuation catalog used by the palette.
pub fn default_catalog() -> DataDictionary {
    let entries: [(&str, &str, &str, &str); 16] = [
        ("client_name", "Client Name", "text", "client"),
        ("client_email", "Client Email", "text", "client"),
        ("lender_name", "Lender", "text", "client"),
        ("property_address", "Property Address", "location", "property"),
        ("property_type", "Property Type", "select", "property"),
        ("bedrooms", "Bedrooms", "number", "property"),
        ("bathrooms", "Bathrooms", "number", "property"),
        ("square_footage", "Square Footage", "number", "property"),
        ("lot_size", "Lot Size", "number", "property"),
        ("year_built", "Year Built", "number", "property"),
        ("estimated_value", "Estimated Value", "number", "valuation"),
        ("price_per_sqft", "Price per Sq Ft", "number", "valuation"),
        ("valuation_date", "Valuation Date", "date", "valuation"),
        ("inspection_date", "Inspection Date", "date", "inspection"),
        ("inspector_name", "Inspector", "text", "inspection"),
        ("condition_rating", "Condition Rating", "select", "inspection"),
    ];
    DataDictionary::from_fields(
        entries
            .iter()
            .map(|(id, label, field_type, category)| DictionaryField {
                id: (*id).to_string(),
                label: (*label).to_string(),
                field_type: (*field_type).to_string(),
                category: (*category).to_string(),
            })
            .collect(),
    )
}
