// ════════════════════════════════════════════════════════════════
//  Agent Error
// ════════════════════════════════════════════════════════════════

/// Category of an ingestion error. Allows the dispatcher to make
/// intelligent decisions about error handling (skip record path,
/// log and swallow, fail at startup).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Malformed record body — bad input, skip the record's special path.
    Decode,
    /// Required field absent (plugin heartbeat without "name") — skip path.
    MissingField,
    /// Remote task service rejected a submission — log and swallow.
    Forward,
    /// Log-line formatting failed — suppress only the log line.
    Serialize,
    /// I/O or network error on an external call — transient.
    Io,
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorKind::Decode => f.write_str("decode"),
            ErrorKind::MissingField => f.write_str("missing_field"),
            ErrorKind::Forward => f.write_str("forward"),
            ErrorKind::Serialize => f.write_str("serialize"),
            ErrorKind::Io => f.write_str("io"),
        }
    }
}

/// Unified error type for collaborator traits and record handling.
///
/// Carries an `ErrorKind` for categorization and a human-readable
/// message. `From` impls assign the appropriate kind automatically and
/// allow ergonomic `?` in handler implementations.
#[derive(Clone)]
pub struct AgentError {
    kind: ErrorKind,
    message: String,
}

impl AgentError {
    /// Malformed record body — skip the record's special path.
    pub fn decode(msg: impl Into<String>) -> Self {
        Self { kind: ErrorKind::Decode, message: msg.into() }
    }

    /// Required field absent from a decoded field map.
    pub fn missing_field(msg: impl Into<String>) -> Self {
        Self { kind: ErrorKind::MissingField, message: msg.into() }
    }

    /// Task service rejected a submission.
    pub fn forward(msg: impl Into<String>) -> Self {
        Self { kind: ErrorKind::Forward, message: msg.into() }
    }

    /// Serialization of a field map failed.
    pub fn serialize(msg: impl Into<String>) -> Self {
        Self { kind: ErrorKind::Serialize, message: msg.into() }
    }

    /// I/O error on an external call.
    pub fn io(msg: impl Into<String>) -> Self {
        Self { kind: ErrorKind::Io, message: msg.into() }
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl std::fmt::Debug for AgentError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.kind, self.message)
    }
}

impl std::fmt::Display for AgentError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for AgentError {}

impl From<prost::DecodeError> for AgentError {
    fn from(e: prost::DecodeError) -> Self {
        Self { kind: ErrorKind::Decode, message: e.to_string() }
    }
}

impl From<serde_json::Error> for AgentError {
    fn from(e: serde_json::Error) -> Self {
        Self { kind: ErrorKind::Serialize, message: e.to_string() }
    }
}

impl From<std::io::Error> for AgentError {
    fn from(e: std::io::Error) -> Self {
        Self { kind: ErrorKind::Io, message: e.to_string() }
    }
}
