use crate::{ActiveView, MessageType, Tone};

/// Render-ready snapshot of the whole workflow.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppViewModel {
    pub active_view: ActiveView,
    pub uploading: bool,
    pub resume_file_name: Option<String>,
    pub resume_text: Option<String>,
    pub job_description: String,
    pub scoring: bool,
    pub score: Option<ScoreView>,
    pub tone: Tone,
    pub message_type: MessageType,
    /// Raw character budget as typed; clamping happens at request time.
    pub max_chars: u32,
    pub generating: bool,
    /// Text in the message slot: generated content, or the collaborator's
    /// error text when it degraded to a message.
    pub message_text: Option<String>,
    pub message_is_error: bool,
    pub alert: Option<String>,
    pub dirty: bool,
}

/// Score display: the bar percent is pre-clamped so a renderer can use it
/// directly as a width.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoreView {
    pub score: u8,
    pub bar_percent: u8,
    pub matched_skills: Vec<String>,
    pub missing_skills: Vec<String>,
}
