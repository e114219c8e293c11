//! Outreach engine: HTTP collaborator clients and effect execution.
mod engine;
mod services;
mod types;

pub use engine::{EngineCommands, EngineHandle};
pub use services::{DraftGenerator, HttpCollaborators, MatchScorer, ResumeExtractor};
pub use types::{
    DraftReply, DraftRequest, EngineEvent, ExtractedResume, RequestToken, ResumeUpload,
    ScoreReport, ServiceError, ServiceFailure, ServiceSettings,
};
