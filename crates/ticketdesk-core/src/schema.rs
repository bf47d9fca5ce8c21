//! Field and column contract shared with the presentation layer.

use serde::Serialize;

use crate::model::{ATTACHMENT_EXTENSIONS, IssueType, Priority, Status};

pub const ISSUE_TYPE_OPTIONS: [&str; 3] = [
    IssueType::Bug.as_str(),
    IssueType::Request.as_str(),
    IssueType::Requirement.as_str(),
];

pub const STATUS_OPTIONS: [&str; 3] = [
    Status::Open.as_str(),
    Status::InProgress.as_str(),
    Status::Closed.as_str(),
];

pub const PRIORITY_OPTIONS: [&str; 3] = [
    Priority::High.as_str(),
    Priority::Medium.as_str(),
    Priority::Low.as_str(),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    Choice,
    Text,
    File,
}

/// One input of the creation form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FormField {
    pub name: &'static str,
    pub label: &'static str,
    pub kind: FieldKind,
    pub required: bool,
    /// Closed option list for choices, accepted extensions for files.
    pub options: &'static [&'static str],
}

/// Creation form inputs in display order. Status is not settable here;
/// new tickets always start Open.
pub const FORM_FIELDS: [FormField; 4] = [
    FormField {
        name: "issue_type",
        label: "Issue Type",
        kind: FieldKind::Choice,
        required: true,
        options: &ISSUE_TYPE_OPTIONS,
    },
    FormField {
        name: "issue",
        label: "Describe the issue",
        kind: FieldKind::Text,
        required: false,
        options: &[],
    },
    FormField {
        name: "priority",
        label: "Priority",
        kind: FieldKind::Choice,
        required: true,
        options: &PRIORITY_OPTIONS,
    },
    FormField {
        name: "attachment",
        label: "Upload an attachment (optional)",
        kind: FieldKind::File,
        required: false,
        options: &ATTACHMENT_EXTENSIONS,
    },
];

/// Columns of the ticket grid, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Column {
    Id,
    IssueType,
    Issue,
    Status,
    Priority,
    DateSubmitted,
    Attachment,
}

impl Column {
    pub const ALL: [Self; 7] = [
        Self::Id,
        Self::IssueType,
        Self::Issue,
        Self::Status,
        Self::Priority,
        Self::DateSubmitted,
        Self::Attachment,
    ];

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Id => "ID",
            Self::IssueType => "Issue Type",
            Self::Issue => "Issue",
            Self::Status => "Status",
            Self::Priority => "Priority",
            Self::DateSubmitted => "Date Submitted",
            Self::Attachment => "Attachment",
        }
    }

    /// Only status and priority are written back to the store.
    #[must_use]
    pub const fn is_editable(self) -> bool {
        matches!(self, Self::Status | Self::Priority)
    }

    /// Columns the grid must lock against editing.
    #[must_use]
    pub const fn is_locked(self) -> bool {
        matches!(self, Self::Id | Self::DateSubmitted | Self::Attachment)
    }

    #[must_use]
    pub const fn options(self) -> Option<&'static [&'static str]> {
        match self {
            Self::Status => Some(&STATUS_OPTIONS),
            Self::Priority => Some(&PRIORITY_OPTIONS),
            _ => None,
        }
    }
}

/// Serializable description of one grid column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ColumnSpec {
    pub label: &'static str,
    pub editable: bool,
    pub locked: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<&'static [&'static str]>,
}

impl From<Column> for ColumnSpec {
    fn from(column: Column) -> Self {
        Self {
            label: column.label(),
            editable: column.is_editable(),
            locked: column.is_locked(),
            options: column.options(),
        }
    }
}

/// The full form and grid contract.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Schema {
    pub form: Vec<FormField>,
    pub grid: Vec<ColumnSpec>,
}

#[must_use]
pub fn schema() -> Schema {
    Schema {
        form: FORM_FIELDS.to_vec(),
        grid: Column::ALL.iter().copied().map(ColumnSpec::from).collect(),
    }
}
