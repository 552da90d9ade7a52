use super::entry::{NodeTemplate, NodeTypeCategory, PaletteEntry, PaletteSource};
use crate::dnd::DragPayload;

/// Color given to nodes whose palette id is not registered.
pub const DEFAULT_FALLBACK_COLOR: &str = "#000000";

const CATEGORY_TABLE: [(&str, &str, &str, NodeTypeCategory); 4] = [
    ("input", "Input", "#FF6B6B", NodeTypeCategory::Input),
    ("logic", "Logic", "#4ECDC4", NodeTypeCategory::Logic),
    ("output", "Output", "#45B7D1", NodeTypeCategory::Output),
    ("utility", "Utility", "#FFA07A", NodeTypeCategory::Utility),
];

const RESOURCE_TABLE: [(&str, &str, &str); 4] = [
    ("Patient", "Patient", "#4CAF50"),
    ("Observation", "Observation", "#2196F3"),
    ("Condition", "Condition", "#FFC107"),
    ("MedicationRequest", "Medication Request", "#9C27B0"),
];

/// Static catalog of draggable items: generic node categories and FHIR resource kinds.
///
/// The registry is immutable once handed to an editor. Extra resource kinds can be
/// registered with [`PaletteRegistry::with_resource`] while building it.
#[derive(Debug, Clone)]
pub struct PaletteRegistry {
    categories: Vec<PaletteEntry>,
    resources: Vec<PaletteEntry>,
    fallback_color: String,
}

impl Default for PaletteRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

impl PaletteRegistry {
    /// The built-in node categories and FHIR resources.
    pub fn builtin() -> Self {
        let categories = CATEGORY_TABLE
            .iter()
            .map(|(id, label, color, category)| PaletteEntry::new(*id, *label, *color, *category))
            .collect();
        let resources = RESOURCE_TABLE
            .iter()
            .map(|(id, label, color)| {
                PaletteEntry::new(*id, *label, *color, NodeTypeCategory::Resource)
            })
            .collect();

        Self {
            categories,
            resources,
            fallback_color: DEFAULT_FALLBACK_COLOR.to_string(),
        }
    }

    /// Registers an additional FHIR resource kind. An existing entry with the same id is replaced.
    pub fn with_resource(
        mut self,
        id: impl Into<String>,
        label: impl Into<String>,
        color: impl Into<String>,
    ) -> Self {
        let entry = PaletteEntry::new(id, label, color, NodeTypeCategory::Resource);
        match self.resources.iter_mut().find(|r| r.id == entry.id) {
            Some(existing) => *existing = entry,
            None => self.resources.push(entry),
        }
        self
    }

    pub fn with_fallback_color(mut self, color: impl Into<String>) -> Self {
        self.fallback_color = color.into();
        self
    }

    pub fn fallback_color(&self) -> &str {
        &self.fallback_color
    }

    pub fn categories(&self) -> &[PaletteEntry] {
        &self.categories
    }

    pub fn resources(&self) -> &[PaletteEntry] {
        &self.resources
    }

    /// Looks up an id in the resource table, then in the category table.
    pub fn lookup(&self, id: &str) -> Option<&PaletteEntry> {
        self.lookup_resource(id).or_else(|| self.lookup_category(id))
    }

    pub fn lookup_resource(&self, id: &str) -> Option<&PaletteEntry> {
        self.resources.iter().find(|r| r.id == id)
    }

    pub fn lookup_category(&self, id: &str) -> Option<&PaletteEntry> {
        self.categories.iter().find(|c| c.id == id)
    }

    /// Resolves a palette id into a node template. Never fails: unknown ids become a
    /// `resource` node labelled with the raw id and painted in the fallback color.
    pub fn resolve(&self, id: &str) -> NodeTemplate {
        let (entry, source) = match self.lookup_resource(id) {
            Some(entry) => (Some(entry), PaletteSource::Resource),
            None => match self.lookup_category(id) {
                Some(entry) => (Some(entry), PaletteSource::Category),
                None => (None, PaletteSource::Fallback),
            },
        };

        match entry {
            Some(entry) => NodeTemplate {
                palette_id: id.to_string(),
                category: entry.category,
                label: entry.label.clone(),
                color: entry.color.clone(),
                source,
            },
            None => NodeTemplate {
                palette_id: id.to_string(),
                category: NodeTypeCategory::Resource,
                label: id.to_string(),
                color: self.fallback_color.clone(),
                source,
            },
        }
    }

    /// Case-insensitive substring search over ids and labels, categories first.
    /// An empty query matches everything.
    pub fn search<'a>(&'a self, query: &str) -> impl Iterator<Item = &'a PaletteEntry> + use<'a> {
        let needle = query.trim().to_lowercase();
        self.categories
            .iter()
            .chain(self.resources.iter())
            .filter(move |entry| {
                needle.is_empty()
                    || entry.id.to_lowercase().contains(&needle)
                    || entry.label.to_lowercase().contains(&needle)
            })
    }

    /// Builds the drag payload a palette item emits when a drag starts.
    /// Returns `None` for ids that are not registered.
    pub fn drag_start(&self, id: &str) -> Option<DragPayload> {
        self.lookup(id).map(|entry| DragPayload::for_palette_item(&entry.id))
    }
}
