use crate::{GenerationRequest, RequestToken, ResumeDocument};

/// IO the platform layer must perform on behalf of the state machine.
/// Every remote effect carries the token its completion message must echo.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Send the document to the extraction collaborator.
    ExtractResume {
        token: RequestToken,
        document: ResumeDocument,
    },
    /// Send both texts to the scoring collaborator.
    ScoreResume {
        token: RequestToken,
        resume_text: String,
        job_description: String,
    },
    /// Send the resolved request to the generation collaborator.
    GenerateMessage {
        token: RequestToken,
        request: GenerationRequest,
    },
    /// Place the displayed message text on the system clipboard.
    CopyToClipboard { text: String },
}
