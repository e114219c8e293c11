use crate::{GeneratedMessage, MessageType, RequestToken, ResumeDocument, ScoreResult, StageError, Tone};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// User picked a resume file in the file dialog.
    ResumeFileSelected(ResumeDocument),
    /// User clicked Upload on the currently selected file.
    UploadClicked,
    /// User edited the job-description text box.
    JobDescriptionChanged(String),
    /// User clicked Get Score.
    ScoreClicked,
    /// User clicked Generate Message (navigates to the generator view).
    ProceedClicked,
    /// User picked a tone in the generator view.
    ToneSelected(Tone),
    /// User picked a message type in the generator view.
    MessageTypeSelected(MessageType),
    /// User edited the character budget (raw, clamped at request time).
    MaxCharsChanged(u32),
    /// User clicked Generate in the generator view.
    GenerateClicked,
    /// User clicked Copy on the displayed message.
    CopyClicked,
    /// User explicitly cleared the session.
    ClearSessionClicked,
    /// Restore texts from a persisted session. Persisted values are
    /// untrusted; the pair is dropped unless both are non-empty.
    RestoreSession {
        resume_text: Option<String>,
        job_description: Option<String>,
    },
    /// Extraction collaborator finished for the given request token.
    ExtractionFinished {
        token: RequestToken,
        result: Result<String, StageError>,
    },
    /// Scoring collaborator finished for the given request token.
    ScoringFinished {
        token: RequestToken,
        result: Result<ScoreResult, StageError>,
    },
    /// Generation collaborator finished for the given request token.
    GenerationFinished {
        token: RequestToken,
        result: Result<GeneratedMessage, StageError>,
    },
    /// Clipboard side effect finished.
    CopyFinished { result: Result<(), String> },
    /// UI/render tick to coalesce rendering.
    Tick,
    /// Fallback for placeholder wiring.
    NoOp,
}
