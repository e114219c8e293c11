//! Outreach core: pure state machine and view-model helpers.
//!
//! Models the linear resume workflow: upload a resume for text extraction,
//! score it against a pasted job description, then generate an outreach
//! message. All IO happens elsewhere; this crate only turns messages into
//! new state plus effects for the platform layer to execute.
mod effect;
mod msg;
mod state;
mod store;
mod update;
mod view_model;

pub use effect::Effect;
pub use msg::Msg;
pub use state::{
    ActiveView, AppState, GeneratedMessage, GenerationRequest, MessageType, RequestToken,
    ResumeDocument, ScoreResult, StageError, Tone, MAX_MESSAGE_CHARS, MIN_MESSAGE_CHARS,
};
pub use store::{StoreKey, WorkflowStore};
pub use update::update;
pub use view_model::{AppViewModel, ScoreView};
