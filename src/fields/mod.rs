//! Editable fields exposed by each node category.
//!
//! Every category owns a fixed set of form controls. The set is chosen by an
//! exhaustive match on [`NodeTypeCategory`], so adding a category forces a
//! decision about its fields.

use crate::error::EditorError;
use crate::palette::NodeTypeCategory;
use chrono::NaiveDate;

/// Date inputs produce ISO calendar dates.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// One choice of a select control.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectOption {
    pub value: &'static str,
    pub label: &'static str,
}

const fn opt(value: &'static str, label: &'static str) -> SelectOption {
    SelectOption { value, label }
}

/// The kind of form control a field is rendered with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Select(&'static [SelectOption]),
    Text,
    Date,
    TextArea,
}

/// A single editable field of a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: &'static str,
    pub placeholder: &'static str,
    pub kind: FieldKind,
}

const fn field(name: &'static str, placeholder: &'static str, kind: FieldKind) -> FieldSpec {
    FieldSpec {
        name,
        placeholder,
        kind,
    }
}

const TRIGGER_TYPES: &[SelectOption] = &[
    opt("onLaunch", "On App Launch"),
    opt("buttonClick", "Button Click"),
    opt("scheduled", "Scheduled Interval"),
];

const OUTPUT_FORMATS: &[SelectOption] = &[
    opt("Text", "Text"),
    opt("Table", "Table"),
    opt("Chart", "Chart"),
    opt("Notification", "Notification"),
];

const UTILITY_FUNCTIONS: &[SelectOption] = &[
    opt("dateCalc", "Date Calculation"),
    opt("unitConv", "Unit Conversion"),
    opt("dataFormat", "Data Formatting"),
];

const RESOURCE_OPERATIONS: &[SelectOption] = &[
    opt("read", "Read"),
    opt("search", "Search"),
    opt("create", "Create"),
    opt("update", "Update"),
];

const INPUT_FIELDS: &[FieldSpec] = &[
    field(
        "triggerType",
        "Select trigger type",
        FieldKind::Select(TRIGGER_TYPES),
    ),
    field("patientId", "Patient ID", FieldKind::Text),
    field("startDate", "Start Date", FieldKind::Date),
    field("endDate", "End Date", FieldKind::Date),
];

const LOGIC_FIELDS: &[FieldSpec] = &[
    field("logic", "Enter conditional logic", FieldKind::TextArea),
    field("transformation", "Data Transformation", FieldKind::Text),
];

const OUTPUT_FIELDS: &[FieldSpec] = &[
    field(
        "outputFormat",
        "Select Output Format",
        FieldKind::Select(OUTPUT_FORMATS),
    ),
    field(
        "visualizationSettings",
        "Visualization Settings",
        FieldKind::Text,
    ),
];

const UTILITY_FIELDS: &[FieldSpec] = &[
    field(
        "utilityFunction",
        "Select Utility Function",
        FieldKind::Select(UTILITY_FUNCTIONS),
    ),
    field("functionParameters", "Function Parameters", FieldKind::Text),
];

const RESOURCE_FIELDS: &[FieldSpec] = &[
    field("resourceId", "Resource ID", FieldKind::Text),
    field(
        "operation",
        "Select Operation",
        FieldKind::Select(RESOURCE_OPERATIONS),
    ),
];

impl NodeTypeCategory {
    /// The fields a node of this category exposes, in display order.
    pub fn fields(&self) -> &'static [FieldSpec] {
        match self {
            NodeTypeCategory::Input => INPUT_FIELDS,
            NodeTypeCategory::Logic => LOGIC_FIELDS,
            NodeTypeCategory::Output => OUTPUT_FIELDS,
            NodeTypeCategory::Utility => UTILITY_FIELDS,
            NodeTypeCategory::Resource => RESOURCE_FIELDS,
        }
    }

    pub fn field(&self, name: &str) -> Result<&'static FieldSpec, EditorError> {
        self.fields()
            .iter()
            .find(|f| f.name == name)
            .ok_or_else(|| EditorError::UnknownField {
                category: *self,
                field: name.to_string(),
            })
    }
}

impl FieldSpec {
    /// Checks a raw control value. The empty string is always accepted and clears the field.
    pub fn validate(&self, value: &str) -> Result<(), EditorError> {
        if value.is_empty() {
            return Ok(());
        }

        match self.kind {
            FieldKind::Select(options) => {
                if options.iter().any(|o| o.value == value) {
                    Ok(())
                } else {
                    let allowed: Vec<&str> = options.iter().map(|o| o.value).collect();
                    Err(self.invalid(value, format!("expected one of {}", allowed.join(", "))))
                }
            }
            FieldKind::Date => NaiveDate::parse_from_str(value, DATE_FORMAT)
                .map(|_| ())
                .map_err(|e| self.invalid(value, format!("expected a YYYY-MM-DD date ({})", e))),
            FieldKind::Text | FieldKind::TextArea => Ok(()),
        }
    }

    fn invalid(&self, value: &str, reason: String) -> EditorError {
        EditorError::InvalidFieldValue {
            field: self.name.to_string(),
            value: value.to_string(),
            reason,
        }
    }
}
