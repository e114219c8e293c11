use std::fmt;
use std::time::Duration;

use thiserror::Error;

/// Echoed back by every completion event so the caller can match a
/// response to the request it actually issued.
pub type RequestToken = u64;

/// Connection settings for the collaborator endpoints. All three services
/// live behind one base URL.
#[derive(Debug, Clone)]
pub struct ServiceSettings {
    pub base_url: String,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
}

impl Default for ServiceSettings {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:8000".to_string(),
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(30),
        }
    }
}

/// Resume payload handed to the extraction collaborator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResumeUpload {
    pub file_name: String,
    pub media_type: String,
    pub bytes: Vec<u8>,
}

/// Extraction collaborator output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedResume {
    pub file_name: String,
    pub text: String,
}

/// Scoring collaborator output, verbatim from the wire. The raw score is
/// untrusted; consumers clamp it into [0, 100] when rendering.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoreReport {
    pub raw_score: f64,
    pub matched_skills: Vec<String>,
    pub missing_skills: Vec<String>,
}

/// Parameters for one generation call, already resolved to wire values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DraftRequest {
    pub resume_text: String,
    pub job_description: String,
    pub tone: String,
    pub max_chars: u32,
    pub message_type: String,
}

/// Generation collaborator output. The service reports its own failures as
/// an error payload inside a successful response; that text is carried
/// through as a note rather than treated as a transport failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DraftReply {
    Message(String),
    ServiceNote(String),
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{kind}: {message}")]
pub struct ServiceError {
    pub kind: ServiceFailure,
    pub message: String,
}

impl ServiceError {
    pub(crate) fn new(kind: ServiceFailure, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServiceFailure {
    /// No response reached us at all.
    Network,
    Timeout,
    /// The collaborator answered with a non-success status.
    Status(u16),
    /// The request could not be marshalled locally.
    InvalidRequest,
    /// The response body did not decode as expected.
    InvalidResponse,
}

impl fmt::Display for ServiceFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ServiceFailure::Network => write!(f, "network error"),
            ServiceFailure::Timeout => write!(f, "timeout"),
            ServiceFailure::Status(code) => write!(f, "http status {code}"),
            ServiceFailure::InvalidRequest => write!(f, "invalid request"),
            ServiceFailure::InvalidResponse => write!(f, "invalid response"),
        }
    }
}

/// Completion events delivered back to the platform layer.
#[derive(Debug, Clone, PartialEq)]
pub enum EngineEvent {
    ExtractionCompleted {
        token: RequestToken,
        result: Result<ExtractedResume, ServiceError>,
    },
    ScoringCompleted {
        token: RequestToken,
        result: Result<ScoreReport, ServiceError>,
    },
    DraftCompleted {
        token: RequestToken,
        result: Result<DraftReply, ServiceError>,
    },
}
