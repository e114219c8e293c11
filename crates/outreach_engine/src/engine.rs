use std::sync::{mpsc, Arc};
use std::thread;

use flow_logging::flow_debug;

use crate::services::{DraftGenerator, HttpCollaborators, MatchScorer, ResumeExtractor};
use crate::{DraftRequest, EngineEvent, RequestToken, ResumeUpload, ServiceError};

enum EngineCommand {
    Extract {
        token: RequestToken,
        upload: ResumeUpload,
    },
    Score {
        token: RequestToken,
        resume_text: String,
        job_description: String,
    },
    Draft {
        token: RequestToken,
        request: DraftRequest,
    },
}

/// Clonable command side of the engine, for callers that hand the event
/// side to a separate pump thread.
#[derive(Clone)]
pub struct EngineCommands {
    cmd_tx: mpsc::Sender<EngineCommand>,
}

impl EngineCommands {
    pub fn extract(&self, token: RequestToken, upload: ResumeUpload) {
        let _ = self.cmd_tx.send(EngineCommand::Extract { token, upload });
    }

    pub fn score(
        &self,
        token: RequestToken,
        resume_text: impl Into<String>,
        job_description: impl Into<String>,
    ) {
        let _ = self.cmd_tx.send(EngineCommand::Score {
            token,
            resume_text: resume_text.into(),
            job_description: job_description.into(),
        });
    }

    pub fn draft(&self, token: RequestToken, request: DraftRequest) {
        let _ = self.cmd_tx.send(EngineCommand::Draft { token, request });
    }
}

/// Runs the collaborator calls on a background tokio runtime and reports
/// completions over a channel. One spawned task per command; ordering per
/// stage is the caller's concern (the core's busy flags allow at most one
/// outstanding request per stage anyway).
pub struct EngineHandle {
    commands: EngineCommands,
    event_rx: mpsc::Receiver<EngineEvent>,
}

impl EngineHandle {
    pub fn new(settings: crate::ServiceSettings) -> Result<Self, ServiceError> {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();
        let collaborators = Arc::new(HttpCollaborators::new(settings)?);

        thread::spawn(move || {
            let runtime = tokio::runtime::Runtime::new().expect("tokio runtime");
            while let Ok(command) = cmd_rx.recv() {
                let collaborators = collaborators.clone();
                let event_tx = event_tx.clone();
                runtime.spawn(async move {
                    handle_command(collaborators.as_ref(), command, event_tx).await;
                });
            }
        });

        Ok(Self {
            commands: EngineCommands { cmd_tx },
            event_rx,
        })
    }

    /// Clonable sender for enqueueing work from another thread.
    pub fn commands(&self) -> EngineCommands {
        self.commands.clone()
    }

    pub fn extract(&self, token: RequestToken, upload: ResumeUpload) {
        self.commands.extract(token, upload);
    }

    pub fn score(
        &self,
        token: RequestToken,
        resume_text: impl Into<String>,
        job_description: impl Into<String>,
    ) {
        self.commands.score(token, resume_text, job_description);
    }

    pub fn draft(&self, token: RequestToken, request: DraftRequest) {
        self.commands.draft(token, request);
    }

    pub fn try_recv(&self) -> Option<EngineEvent> {
        self.event_rx.try_recv().ok()
    }
}

async fn handle_command(
    collaborators: &HttpCollaborators,
    command: EngineCommand,
    event_tx: mpsc::Sender<EngineEvent>,
) {
    match command {
        EngineCommand::Extract { token, upload } => {
            flow_debug!("extract token={} file={}", token, upload.file_name);
            let result = collaborators.extract(upload).await;
            let _ = event_tx.send(EngineEvent::ExtractionCompleted { token, result });
        }
        EngineCommand::Score {
            token,
            resume_text,
            job_description,
        } => {
            flow_debug!("score token={}", token);
            let result = collaborators.score(&resume_text, &job_description).await;
            let _ = event_tx.send(EngineEvent::ScoringCompleted { token, result });
        }
        EngineCommand::Draft { token, request } => {
            flow_debug!("draft token={} type={}", token, request.message_type);
            let result = collaborators.generate(&request).await;
            let _ = event_tx.send(EngineEvent::DraftCompleted { token, result });
        }
    }
}
