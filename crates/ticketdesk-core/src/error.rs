use std::fmt;

/// Machine-readable error codes for presentation-layer decision making.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    ConfigParseError,
    MalformedRequest,
    InvalidSeedConfig,
    InvalidEnumValue,
    InvalidAttachment,
    SnapshotMismatch,
    SessionNotFound,
}

impl ErrorCode {
    /// Stable code identifier (`E####`) for machine parsing.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::ConfigParseError => "E1002",
            Self::MalformedRequest => "E1003",
            Self::InvalidSeedConfig => "E1004",
            Self::InvalidEnumValue => "E2005",
            Self::InvalidAttachment => "E2006",
            Self::SnapshotMismatch => "E3001",
            Self::SessionNotFound => "E4001",
        }
    }

    /// Short human-facing summary for logs and terminal output.
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::ConfigParseError => "Config file parse error",
            Self::MalformedRequest => "Malformed request",
            Self::InvalidSeedConfig => "Invalid seed batch settings",
            Self::InvalidEnumValue => "Invalid issue type/status/priority value",
            Self::InvalidAttachment => "Unsupported attachment",
            Self::SnapshotMismatch => "Edited snapshot does not match the store",
            Self::SessionNotFound => "Session not found",
        }
    }

    /// Optional remediation hint that can be surfaced to users.
    #[must_use]
    pub const fn hint(self) -> Option<&'static str> {
        match self {
            Self::ConfigParseError => Some("Fix syntax in the ticketdesk config.toml and retry."),
            Self::MalformedRequest => {
                Some("Send one JSON object per line with an \"op\" field.")
            }
            Self::InvalidSeedConfig => Some(
                "Keep seed.count between 0 and 100000 and no larger than seed.first_id.",
            ),
            Self::InvalidEnumValue => Some(
                "Use Bug/Request/Requirement, Open/In Progress/Closed, or High/Medium/Low.",
            ),
            Self::InvalidAttachment => Some("Attach a pdf, docx, png, jpg or jpeg file."),
            Self::SnapshotMismatch => {
                Some("Reload the snapshot and reapply status/priority edits.")
            }
            Self::SessionNotFound => Some("Open the session before sending requests to it."),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Errors surfaced by ticket store operations.
///
/// Every variant aborts only the operation that raised it; the store keeps
/// whatever state it had before the call.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TicketError {
    /// An enumerated field received a value outside its allowed set.
    #[error("invalid {field}: '{value}'")]
    Validation { field: &'static str, value: String },

    /// An attachment name was empty or had a disallowed extension.
    #[error("unsupported attachment '{name}': {reason}")]
    Attachment { name: String, reason: &'static str },

    /// An edited snapshot diverged from the store's current identity/order.
    #[error("edited snapshot is stale: {reason}")]
    Consistency { reason: String },

    /// Seed batch parameters that would produce duplicate or
    /// non-positive ids, or an unbounded batch.
    #[error("invalid seed settings: {reason}")]
    InvalidSeed { reason: String },

    /// No store is registered under the given session id.
    #[error("session not found: {session}")]
    SessionNotFound { session: String },
}

impl TicketError {
    /// Machine error code for this failure.
    #[must_use]
    pub const fn error_code(&self) -> ErrorCode {
        match self {
            Self::Validation { .. } => ErrorCode::InvalidEnumValue,
            Self::Attachment { .. } => ErrorCode::InvalidAttachment,
            Self::Consistency { .. } => ErrorCode::SnapshotMismatch,
            Self::InvalidSeed { .. } => ErrorCode::InvalidSeedConfig,
            Self::SessionNotFound { .. } => ErrorCode::SessionNotFound,
        }
    }

    /// Remediation text for this failure.
    #[must_use]
    pub fn suggestion(&self) -> String {
        self.error_code()
            .hint()
            .unwrap_or_else(|| self.error_code().message())
            .to_string()
    }

    /// True when the error came from an out-of-set or malformed input value.
    #[must_use]
    pub const fn is_validation(&self) -> bool {
        matches!(self, Self::Validation { .. } | Self::Attachment { .. })
    }

    /// True when the error came from a stale or corrupted edited snapshot.
    #[must_use]
    pub const fn is_consistency(&self) -> bool {
        matches!(self, Self::Consistency { .. })
    }
}
