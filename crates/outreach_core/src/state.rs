use std::fmt;

use crate::view_model::{AppViewModel, ScoreView};

/// Correlates an in-flight remote request with its completion message.
/// A completion whose token no longer matches the stage's current token is
/// stale (the user moved on) and must be dropped.
pub type RequestToken = u64;

/// Smallest message budget the generation collaborator accepts.
pub const MIN_MESSAGE_CHARS: u32 = 100;
/// Largest message budget the generation collaborator accepts.
pub const MAX_MESSAGE_CHARS: u32 = 600;

/// Raw uploaded resume file, held until extraction consumes it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResumeDocument {
    pub file_name: String,
    pub media_type: String,
    pub bytes: Vec<u8>,
}

impl ResumeDocument {
    /// Whether the declared media type is PDF (parameters ignored).
    pub fn is_pdf(&self) -> bool {
        let essence = self
            .media_type
            .split(';')
            .next()
            .unwrap_or(&self.media_type)
            .trim();
        essence.eq_ignore_ascii_case("application/pdf")
    }
}

/// Which page of the workflow the user is on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ActiveView {
    /// Upload + job description + score view.
    #[default]
    Scoring,
    /// Outreach message generator view.
    Generation,
}

/// Voice of the generated message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tone {
    #[default]
    Formal,
    Friendly,
    Cold,
    Warm,
}

impl Tone {
    /// Wire value understood by the generation collaborator.
    pub fn as_str(&self) -> &'static str {
        match self {
            Tone::Formal => "formal",
            Tone::Friendly => "friendly",
            Tone::Cold => "cold",
            Tone::Warm => "warm",
        }
    }
}

/// Kind of outreach message to produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MessageType {
    /// Cold email for a job application.
    #[default]
    Email,
    /// LinkedIn direct message.
    LinkedInDm,
    /// Cover-letter answer to "Why this role?".
    CoverAnswer,
}

impl MessageType {
    /// Wire value understood by the generation collaborator.
    pub fn as_str(&self) -> &'static str {
        match self {
            MessageType::Email => "email",
            MessageType::LinkedInDm => "linkedin",
            MessageType::CoverAnswer => "cover",
        }
    }
}

/// Skill-match outcome for one scoring invocation. Immutable once built;
/// each new invocation replaces the previous result wholesale.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoreResult {
    /// Match score, always within 0..=100.
    pub score: u8,
    pub matched_skills: Vec<String>,
    pub missing_skills: Vec<String>,
}

impl ScoreResult {
    /// Builds a result from an untrusted raw score, clamping into [0, 100].
    /// Non-finite raw values clamp to 0. Skill order is preserved as-is.
    pub fn from_raw(raw_score: f64, matched_skills: Vec<String>, missing_skills: Vec<String>) -> Self {
        let score = if raw_score.is_finite() {
            raw_score.round().clamp(0.0, 100.0) as u8
        } else {
            0
        };
        Self {
            score,
            matched_skills,
            missing_skills,
        }
    }
}

/// Outcome of one generation invocation as reported by the collaborator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GeneratedMessage {
    /// Usable message text.
    Content(String),
    /// The collaborator answered with an error payload instead of content.
    /// Its text is rendered in the message slot (degrade-to-message).
    ErrorText(String),
}

/// Fully resolved parameters for one generation request. `max_chars` is
/// already clamped into the valid budget when this is constructed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRequest {
    pub resume_text: String,
    pub job_description: String,
    pub tone: Tone,
    pub max_chars: u32,
    pub message_type: MessageType,
}

/// User-facing failure, caught at the stage boundary. Nothing in the
/// workflow propagates as a panic out of a stage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StageError {
    /// Bad or missing local input; no network call was attempted.
    Validation(String),
    /// Required upstream data absent; no network call was attempted.
    PrerequisiteMissing(String),
    /// The request never reached the collaborator or no response arrived.
    NetworkFailure(String),
    /// The collaborator responded with a failure status or error payload.
    CollaboratorError(String),
    /// The system clipboard rejected the copy action.
    Clipboard(String),
}

impl fmt::Display for StageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StageError::Validation(message) => write!(f, "{message}"),
            StageError::PrerequisiteMissing(message) => write!(f, "{message}"),
            StageError::NetworkFailure(message) => {
                write!(f, "Network error: {message}")
            }
            StageError::CollaboratorError(message) => {
                write!(f, "Server error: {message}")
            }
            StageError::Clipboard(message) => write!(f, "Clipboard error: {message}"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub(crate) enum UploadPhase {
    #[default]
    Idle,
    Uploading {
        token: RequestToken,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub(crate) enum ScoringPhase {
    #[default]
    Idle,
    Requesting {
        token: RequestToken,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub(crate) enum GenerationPhase {
    #[default]
    Idle,
    Requesting {
        token: RequestToken,
    },
    Rendered(String),
    Errored(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppState {
    view: ActiveView,
    resume_file: Option<ResumeDocument>,
    resume_text: Option<String>,
    job_description: String,
    upload: UploadPhase,
    scoring: ScoringPhase,
    score: Option<ScoreResult>,
    generation: GenerationPhase,
    tone: Tone,
    message_type: MessageType,
    max_chars: u32,
    alert: Option<StageError>,
    next_token: RequestToken,
    dirty: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self {
            max_chars: 300,
            ..Self::default()
        }
    }

    /// Snapshot of everything a renderer needs.
    pub fn view(&self) -> AppViewModel {
        let (message_text, message_is_error) = match &self.generation {
            GenerationPhase::Rendered(text) => (Some(text.clone()), false),
            GenerationPhase::Errored(text) => (Some(text.clone()), true),
            GenerationPhase::Idle | GenerationPhase::Requesting { .. } => (None, false),
        };
        AppViewModel {
            active_view: self.view,
            uploading: self.is_uploading(),
            resume_file_name: self.resume_file.as_ref().map(|doc| doc.file_name.clone()),
            resume_text: self.resume_text.clone(),
            job_description: self.job_description.clone(),
            scoring: self.is_scoring(),
            score: self.score.as_ref().map(|result| ScoreView {
                score: result.score,
                bar_percent: result.score,
                matched_skills: result.matched_skills.clone(),
                missing_skills: result.missing_skills.clone(),
            }),
            tone: self.tone,
            message_type: self.message_type,
            max_chars: self.max_chars,
            generating: self.is_generating(),
            message_text,
            message_is_error,
            alert: self.alert.as_ref().map(StageError::to_string),
            dirty: self.dirty,
        }
    }

    /// Returns the dirty flag and resets it; the shell renders when true.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub(crate) fn issue_token(&mut self) -> RequestToken {
        self.next_token += 1;
        self.next_token
    }

    pub(crate) fn resume_file(&self) -> Option<&ResumeDocument> {
        self.resume_file.as_ref()
    }

    pub(crate) fn set_resume_file(&mut self, document: ResumeDocument) {
        self.resume_file = Some(document);
        self.mark_dirty();
    }

    pub(crate) fn resume_text(&self) -> Option<&str> {
        self.resume_text.as_deref()
    }

    pub(crate) fn job_description(&self) -> &str {
        &self.job_description
    }

    pub(crate) fn set_job_description(&mut self, text: String) {
        self.job_description = text;
        self.mark_dirty();
    }

    pub(crate) fn raise_alert(&mut self, error: StageError) {
        self.alert = Some(error);
        self.mark_dirty();
    }

    pub(crate) fn is_uploading(&self) -> bool {
        matches!(self.upload, UploadPhase::Uploading { .. })
    }

    pub(crate) fn begin_upload(&mut self) -> RequestToken {
        let token = self.issue_token();
        self.upload = UploadPhase::Uploading { token };
        self.alert = None;
        self.mark_dirty();
        token
    }

    pub(crate) fn upload_matches(&self, token: RequestToken) -> bool {
        self.upload == UploadPhase::Uploading { token }
    }

    pub(crate) fn finish_upload_ok(&mut self, text: String) {
        self.upload = UploadPhase::Idle;
        self.resume_text = Some(text);
        self.mark_dirty();
    }

    pub(crate) fn finish_upload_err(&mut self, error: StageError) {
        self.upload = UploadPhase::Idle;
        self.raise_alert(error);
    }

    pub(crate) fn is_scoring(&self) -> bool {
        matches!(self.scoring, ScoringPhase::Requesting { .. })
    }

    pub(crate) fn begin_scoring(&mut self) -> RequestToken {
        let token = self.issue_token();
        self.scoring = ScoringPhase::Requesting { token };
        self.alert = None;
        self.mark_dirty();
        token
    }

    pub(crate) fn scoring_matches(&self, token: RequestToken) -> bool {
        self.scoring == ScoringPhase::Requesting { token }
    }

    pub(crate) fn finish_scoring_ok(&mut self, result: ScoreResult) {
        self.scoring = ScoringPhase::Idle;
        self.score = Some(result);
        self.mark_dirty();
    }

    /// Keeps the last good score visible; only the alert changes.
    pub(crate) fn finish_scoring_err(&mut self, error: StageError) {
        self.scoring = ScoringPhase::Idle;
        self.raise_alert(error);
    }

    pub(crate) fn show_generator(&mut self) {
        self.view = ActiveView::Generation;
        self.alert = None;
        self.mark_dirty();
    }

    pub(crate) fn set_tone(&mut self, tone: Tone) {
        self.tone = tone;
        self.mark_dirty();
    }

    pub(crate) fn set_message_type(&mut self, message_type: MessageType) {
        self.message_type = message_type;
        self.mark_dirty();
    }

    pub(crate) fn set_max_chars(&mut self, max_chars: u32) {
        self.max_chars = max_chars;
        self.mark_dirty();
    }

    pub(crate) fn is_generating(&self) -> bool {
        matches!(self.generation, GenerationPhase::Requesting { .. })
    }

    pub(crate) fn begin_generation(&mut self) -> RequestToken {
        let token = self.issue_token();
        self.generation = GenerationPhase::Requesting { token };
        self.alert = None;
        self.mark_dirty();
        token
    }

    pub(crate) fn generation_matches(&self, token: RequestToken) -> bool {
        self.generation == GenerationPhase::Requesting { token }
    }

    /// Builds the request from the current parameters, clamping the budget.
    pub(crate) fn generation_request(
        &self,
        resume_text: String,
        job_description: String,
    ) -> GenerationRequest {
        GenerationRequest {
            resume_text,
            job_description,
            tone: self.tone,
            max_chars: self.max_chars.clamp(MIN_MESSAGE_CHARS, MAX_MESSAGE_CHARS),
            message_type: self.message_type,
        }
    }

    pub(crate) fn finish_generation(&mut self, outcome: GeneratedMessage) {
        self.generation = match outcome {
            GeneratedMessage::Content(text) => GenerationPhase::Rendered(text),
            GeneratedMessage::ErrorText(text) => GenerationPhase::Errored(text),
        };
        self.mark_dirty();
    }

    /// Text currently shown in the message slot, rendered or errored.
    pub(crate) fn displayed_message(&self) -> Option<&str> {
        match &self.generation {
            GenerationPhase::Rendered(text) | GenerationPhase::Errored(text) => Some(text),
            GenerationPhase::Idle | GenerationPhase::Requesting { .. } => None,
        }
    }

    pub(crate) fn seed_from_session(&mut self, resume_text: String, job_description: String) {
        self.resume_text = Some(resume_text);
        self.job_description = job_description;
        self.mark_dirty();
    }

    /// Drops everything derived from the cleared session. The selected file
    /// and generation parameters are kept; they are user input, not cache.
    /// All request phases go back to `Idle`, so completions still in flight
    /// arrive stale and are discarded.
    pub(crate) fn reset_session(&mut self) {
        self.resume_text = None;
        self.job_description.clear();
        self.score = None;
        self.upload = UploadPhase::Idle;
        self.scoring = ScoringPhase::Idle;
        self.generation = GenerationPhase::Idle;
        self.view = ActiveView::Scoring;
        self.alert = None;
        self.mark_dirty();
    }
}
