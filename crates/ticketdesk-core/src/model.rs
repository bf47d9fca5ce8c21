use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

use crate::error::TicketError;

/// Prefix shared by every ticket identifier.
pub const ID_PREFIX: &str = "TICKET-";

/// Text shown in place of an attachment name when none was uploaded.
pub const NO_ATTACHMENT: &str = "No attachment";

/// File extensions the creation form accepts for attachments.
pub const ATTACHMENT_EXTENSIONS: [&str; 5] = ["pdf", "docx", "png", "jpg", "jpeg"];

/// The three kinds of support ticket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String")]
pub enum IssueType {
    Bug,
    Request,
    Requirement,
}

impl IssueType {
    pub const ALL: [Self; 3] = [Self::Bug, Self::Request, Self::Requirement];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Bug => "Bug",
            Self::Request => "Request",
            Self::Requirement => "Requirement",
        }
    }
}

/// Ticket workflow status. Any status may move to any other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String")]
pub enum Status {
    Open,
    #[serde(rename = "In Progress")]
    InProgress,
    Closed,
}

impl Status {
    pub const ALL: [Self; 3] = [Self::Open, Self::InProgress, Self::Closed];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Open => "Open",
            Self::InProgress => "In Progress",
            Self::Closed => "Closed",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String")]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl Priority {
    pub const ALL: [Self; 3] = [Self::High, Self::Medium, Self::Low];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::High => "High",
            Self::Medium => "Medium",
            Self::Low => "Low",
        }
    }
}

/// Identifier of the form `TICKET-<n>`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TicketId(String);

impl TicketId {
    #[must_use]
    pub fn from_number(number: u64) -> Self {
        Self(format!("{ID_PREFIX}{number}"))
    }

    /// Numeric suffix, or `None` when the id is not of the form `TICKET-<n>`.
    #[must_use]
    pub fn number(&self) -> Option<u64> {
        self.0.strip_prefix(ID_PREFIX)?.parse().ok()
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for TicketId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// Display name of an uploaded attachment. The file content is never kept.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct AttachmentName(String);

impl AttachmentName {
    /// Validate an uploaded file name and keep only its final path component.
    ///
    /// # Errors
    ///
    /// Returns [`TicketError::Attachment`] when the name is empty or its
    /// extension is not one of [`ATTACHMENT_EXTENSIONS`].
    pub fn parse(raw: &str) -> Result<Self, TicketError> {
        let name = raw
            .trim()
            .rsplit(['/', '\\'])
            .next()
            .unwrap_or_default()
            .trim();
        if name.is_empty() {
            return Err(TicketError::Attachment {
                name: raw.to_string(),
                reason: "file name is empty",
            });
        }

        let allowed = name.rsplit_once('.').is_some_and(|(stem, ext)| {
            !stem.is_empty()
                && ATTACHMENT_EXTENSIONS
                    .iter()
                    .any(|allowed| ext.eq_ignore_ascii_case(allowed))
        });
        if !allowed {
            return Err(TicketError::Attachment {
                name: raw.to_string(),
                reason: "expected a pdf, docx, png, jpg or jpeg file",
            });
        }

        Ok(Self(name.to_string()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for AttachmentName {
    type Error = TicketError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<AttachmentName> for String {
    fn from(value: AttachmentName) -> Self {
        value.0
    }
}

/// One row of the ticket table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ticket {
    pub id: TicketId,
    pub issue_type: IssueType,
    pub issue: String,
    pub status: Status,
    pub priority: Priority,
    pub date_submitted: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attachment: Option<AttachmentName>,
}

impl Ticket {
    /// Attachment name for display, falling back to [`NO_ATTACHMENT`].
    #[must_use]
    pub fn attachment_label(&self) -> &str {
        self.attachment
            .as_ref()
            .map_or(NO_ATTACHMENT, AttachmentName::as_str)
    }
}

/// Fields collected by the creation form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewTicket {
    pub issue_type: IssueType,
    #[serde(default)]
    pub issue: String,
    pub priority: Priority,
    #[serde(default)]
    pub attachment: Option<AttachmentName>,
}

impl NewTicket {
    #[must_use]
    pub fn new(issue_type: IssueType, issue: impl Into<String>, priority: Priority) -> Self {
        Self {
            issue_type,
            issue: issue.into(),
            priority,
            attachment: None,
        }
    }

    #[must_use]
    pub fn with_attachment(mut self, attachment: AttachmentName) -> Self {
        self.attachment = Some(attachment);
        self
    }
}

/// One row of the editable grid as the presentation layer sends it back.
///
/// Status and priority arrive as raw option text and are validated by the
/// store. Any other columns the grid carries are not read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridEdit {
    pub id: TicketId,
    pub status: String,
    pub priority: String,
}

impl From<&Ticket> for GridEdit {
    fn from(ticket: &Ticket) -> Self {
        Self {
            id: ticket.id.clone(),
            status: ticket.status.to_string(),
            priority: ticket.priority.to_string(),
        }
    }
}

impl fmt::Display for IssueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for TicketId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Display for AttachmentName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Lowercase and drop separators so `In Progress`, `in_progress` and
/// `IN-PROGRESS` compare equal.
fn normalize(input: &str) -> String {
    input
        .trim()
        .chars()
        .filter(|c| !matches!(c, ' ' | '-' | '_'))
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

impl FromStr for IssueType {
    type Err = TicketError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize(s).as_str() {
            "bug" => Ok(Self::Bug),
            "request" => Ok(Self::Request),
            "requirement" => Ok(Self::Requirement),
            _ => Err(TicketError::Validation {
                field: "issue type",
                value: s.to_string(),
            }),
        }
    }
}

impl FromStr for Status {
    type Err = TicketError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize(s).as_str() {
            "open" => Ok(Self::Open),
            "inprogress" => Ok(Self::InProgress),
            "closed" => Ok(Self::Closed),
            _ => Err(TicketError::Validation {
                field: "status",
                value: s.to_string(),
            }),
        }
    }
}

impl FromStr for Priority {
    type Err = TicketError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize(s).as_str() {
            "high" => Ok(Self::High),
            "medium" => Ok(Self::Medium),
            "low" => Ok(Self::Low),
            _ => Err(TicketError::Validation {
                field: "priority",
                value: s.to_string(),
            }),
        }
    }
}

impl TryFrom<String> for IssueType {
    type Error = TicketError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl TryFrom<String> for Status {
    type Error = TicketError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl TryFrom<String> for Priority {
    type Error = TicketError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}
