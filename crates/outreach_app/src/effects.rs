use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

use flow_logging::{flow_info, flow_warn};
use outreach_core::{Effect, GeneratedMessage, Msg, ScoreResult, StageError};
use outreach_engine::{
    DraftReply, DraftRequest, EngineCommands, EngineEvent, EngineHandle, ResumeUpload,
    ServiceError, ServiceFailure, ServiceSettings,
};

use crate::clipboard::ClipboardSink;

/// Executes core effects against the engine and the clipboard, and feeds
/// engine completions back into the message channel.
pub struct EffectRunner {
    commands: EngineCommands,
    clipboard: Arc<dyn ClipboardSink>,
    msg_tx: mpsc::Sender<Msg>,
    pump_stop: Arc<AtomicBool>,
    pump_thread: Option<thread::JoinHandle<()>>,
}

impl EffectRunner {
    pub fn new(
        msg_tx: mpsc::Sender<Msg>,
        settings: ServiceSettings,
        clipboard: Arc<dyn ClipboardSink>,
    ) -> Result<Self, ServiceError> {
        let engine = EngineHandle::new(settings)?;
        let commands = engine.commands();
        let pump_stop = Arc::new(AtomicBool::new(false));
        let pump_thread = spawn_event_loop(engine, msg_tx.clone(), pump_stop.clone());
        Ok(Self {
            commands,
            clipboard,
            msg_tx,
            pump_stop,
            pump_thread: Some(pump_thread),
        })
    }

    pub fn enqueue(&self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::ExtractResume { token, document } => {
                    flow_info!(
                        "ExtractResume token={} file={} bytes={}",
                        token,
                        document.file_name,
                        document.bytes.len()
                    );
                    self.commands.extract(
                        token,
                        ResumeUpload {
                            file_name: document.file_name,
                            media_type: document.media_type,
                            bytes: document.bytes,
                        },
                    );
                }
                Effect::ScoreResume {
                    token,
                    resume_text,
                    job_description,
                } => {
                    flow_info!("ScoreResume token={}", token);
                    self.commands.score(token, resume_text, job_description);
                }
                Effect::GenerateMessage { token, request } => {
                    flow_info!(
                        "GenerateMessage token={} type={} max_chars={}",
                        token,
                        request.message_type.as_str(),
                        request.max_chars
                    );
                    self.commands.draft(
                        token,
                        DraftRequest {
                            resume_text: request.resume_text,
                            job_description: request.job_description,
                            tone: request.tone.as_str().to_string(),
                            max_chars: request.max_chars,
                            message_type: request.message_type.as_str().to_string(),
                        },
                    );
                }
                Effect::CopyToClipboard { text } => {
                    let result = self.clipboard.set_text(&text);
                    if let Err(message) = &result {
                        flow_warn!("clipboard copy failed: {}", message);
                    }
                    let _ = self.msg_tx.send(Msg::CopyFinished { result });
                }
            }
        }
    }
}

/// Stops the event pump. The engine's own thread exits once its command
/// senders drop with the runner.
impl Drop for EffectRunner {
    fn drop(&mut self) {
        self.pump_stop.store(true, Ordering::Relaxed);
        if let Some(handle) = self.pump_thread.take() {
            let _ = handle.join();
        }
    }
}

fn spawn_event_loop(
    engine: EngineHandle,
    msg_tx: mpsc::Sender<Msg>,
    stop: Arc<AtomicBool>,
) -> thread::JoinHandle<()> {
    thread::spawn(move || loop {
        if stop.load(Ordering::Relaxed) {
            break;
        }
        if let Some(event) = engine.try_recv() {
            if msg_tx.send(map_event(event)).is_err() {
                break;
            }
        } else {
            thread::sleep(Duration::from_millis(20));
        }
    })
}

fn map_event(event: EngineEvent) -> Msg {
    match event {
        EngineEvent::ExtractionCompleted { token, result } => Msg::ExtractionFinished {
            token,
            result: result
                .map(|extracted| extracted.text)
                .map_err(map_failure),
        },
        EngineEvent::ScoringCompleted { token, result } => Msg::ScoringFinished {
            token,
            result: result
                .map(|report| {
                    ScoreResult::from_raw(
                        report.raw_score,
                        report.matched_skills,
                        report.missing_skills,
                    )
                })
                .map_err(map_failure),
        },
        EngineEvent::DraftCompleted { token, result } => Msg::GenerationFinished {
            token,
            result: result
                .map(|reply| match reply {
                    DraftReply::Message(text) => GeneratedMessage::Content(text),
                    DraftReply::ServiceNote(text) => GeneratedMessage::ErrorText(text),
                })
                .map_err(map_failure),
        },
    }
}

fn map_failure(error: ServiceError) -> StageError {
    match error.kind {
        ServiceFailure::Network | ServiceFailure::Timeout => {
            StageError::NetworkFailure(error.message)
        }
        ServiceFailure::Status(code) => {
            StageError::CollaboratorError(format!("{code} - {}", error.message))
        }
        ServiceFailure::InvalidRequest | ServiceFailure::InvalidResponse => {
            StageError::CollaboratorError(error.message)
        }
    }
}
