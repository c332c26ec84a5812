/// Canonical section set for a valuation template, in canonical order.
/// Hydration places these first; anything else becomes a trailing custom
/// section in first-seen order.
pub const DEFAULT_SECTIONS: [(&str, &str); 8] = [
    ("client_info", "Client Information"),
    ("property_details", "Property Details"),
    ("inspection", "Inspection"),
    ("valuation", "Valuation"),
    ("comparables", "Comparables"),
    ("photos", "Photos"),
    ("location", "Location"),
    ("additional_notes", "Additional Notes"),
];

/// Position of a section id in the canonical order, if it is a known one.
pub fn canonical_rank(section_id: &str) -> Option<usize> {
    DEFAULT_SECTIONS.iter().position(|(id, _)| *id == section_id)
}

/// Deterministic display name for a section id: the canonical name for known
/// sections, otherwise the id with underscores opened up and words title-cased
/// ("risk_notes" -> "Risk Notes").
pub fn section_display_name(section_id: &str) -> String {
    if let Some((_, name)) = DEFAULT_SECTIONS.iter().find(|(id, _)| *id == section_id) {
        return (*name).to_string();
    }
    section_id
        .split('_')
        .filter(|part| !part.is_empty())
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
