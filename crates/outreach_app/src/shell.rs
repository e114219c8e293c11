use std::path::PathBuf;
use std::sync::{mpsc, Arc};
use std::time::Duration;

use outreach_core::{update, AppState, AppViewModel, Msg, StoreKey, WorkflowStore};
use outreach_engine::{ServiceError, ServiceSettings};

use crate::clipboard::ClipboardSink;
use crate::effects::EffectRunner;
use crate::persistence;

/// Owns the state machine, the workflow store, and the effect runner.
///
/// A host UI feeds it messages from its widgets via [`dispatch`] and polls
/// [`pump`] for engine completions; both return a fresh view model whenever
/// the state actually changed.
///
/// [`dispatch`]: WorkflowShell::dispatch
/// [`pump`]: WorkflowShell::pump
pub struct WorkflowShell {
    state: AppState,
    store: WorkflowStore,
    runner: EffectRunner,
    msg_rx: mpsc::Receiver<Msg>,
    session_dir: Option<PathBuf>,
    saved_revision: u64,
}

impl WorkflowShell {
    /// Builds the shell and, when a session directory is given, restores
    /// the persisted session through the core's validation path.
    pub fn new(
        settings: ServiceSettings,
        clipboard: Arc<dyn ClipboardSink>,
        session_dir: Option<PathBuf>,
    ) -> Result<Self, ServiceError> {
        let (msg_tx, msg_rx) = mpsc::channel();
        let runner = EffectRunner::new(msg_tx, settings, clipboard)?;
        let mut shell = Self {
            state: AppState::new(),
            store: WorkflowStore::new(),
            runner,
            msg_rx,
            session_dir,
            saved_revision: 0,
        };

        if let Some(dir) = shell.session_dir.clone() {
            let (resume_text, job_description) = persistence::load_session(&dir);
            if resume_text.is_some() || job_description.is_some() {
                shell.dispatch(Msg::RestoreSession {
                    resume_text,
                    job_description,
                });
            }
            // What we just read does not need re-saving.
            shell.saved_revision = shell.store.revision();
        }
        Ok(shell)
    }

    /// Applies one message and executes its effects. Returns a view model
    /// when the state changed and the host should re-render.
    pub fn dispatch(&mut self, msg: Msg) -> Option<AppViewModel> {
        let state = std::mem::take(&mut self.state);
        let (state, effects) = update(state, &mut self.store, msg);
        self.state = state;
        self.runner.enqueue(effects);
        self.persist_if_needed();

        if self.state.consume_dirty() {
            Some(self.state.view())
        } else {
            None
        }
    }

    /// Waits up to `timeout` for one engine-originated message and applies
    /// it. Returns a view model when it changed the state.
    pub fn pump(&mut self, timeout: Duration) -> Option<AppViewModel> {
        match self.msg_rx.recv_timeout(timeout) {
            Ok(msg) => self.dispatch(msg),
            Err(_) => None,
        }
    }

    /// Current render snapshot, independent of the dirty flag.
    pub fn view(&self) -> AppViewModel {
        self.state.view()
    }

    /// Read-only access to the session store, mainly for tests.
    pub fn store(&self) -> &WorkflowStore {
        &self.store
    }

    fn persist_if_needed(&mut self) {
        let Some(dir) = &self.session_dir else {
            return;
        };
        if self.store.revision() == self.saved_revision {
            return;
        }
        persistence::save_session(
            dir,
            self.store.get(StoreKey::ResumeText),
            self.store.get(StoreKey::JobDescription),
        );
        self.saved_revision = self.store.revision();
    }
}
