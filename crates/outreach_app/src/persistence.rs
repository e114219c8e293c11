use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use chrono::Utc;
use flow_logging::{flow_error, flow_info, flow_warn};
use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;
use thiserror::Error;

const SESSION_FILENAME: &str = ".outreach_session.ron";

#[derive(Debug, Error)]
pub(crate) enum PersistError {
    #[error("session directory missing or not writable: {0}")]
    SessionDir(String),
    #[error("io error: {0}")]
    Io(#[from] io::Error),
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
struct PersistedSession {
    saved_utc: String,
    resume_text: Option<String>,
    job_description: Option<String>,
}

/// Reads a previously saved session. The file is untrusted input: any
/// read or parse problem degrades to an empty pair, and the core applies
/// its own both-or-nothing validation on top.
pub(crate) fn load_session(dir: &Path) -> (Option<String>, Option<String>) {
    let path = dir.join(SESSION_FILENAME);
    let content = match fs::read_to_string(&path) {
        Ok(text) => text,
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            return (None, None);
        }
        Err(err) => {
            flow_warn!("Failed to read persisted session from {:?}: {}", path, err);
            return (None, None);
        }
    };

    let session: PersistedSession = match ron::from_str(&content) {
        Ok(session) => session,
        Err(err) => {
            flow_warn!("Failed to parse persisted session from {:?}: {}", path, err);
            return (None, None);
        }
    };

    flow_info!("Loaded persisted session from {:?}", path);
    (session.resume_text, session.job_description)
}

pub(crate) fn save_session(dir: &Path, resume_text: Option<&str>, job_description: Option<&str>) {
    let session = PersistedSession {
        saved_utc: Utc::now().to_rfc3339(),
        resume_text: resume_text.map(ToOwned::to_owned),
        job_description: job_description.map(ToOwned::to_owned),
    };

    let pretty = ron::ser::PrettyConfig::new();
    let content = match ron::ser::to_string_pretty(&session, pretty) {
        Ok(text) => text,
        Err(err) => {
            flow_error!("Failed to serialize session: {}", err);
            return;
        }
    };

    if let Err(err) = atomic_write(dir, SESSION_FILENAME, &content) {
        flow_error!("Failed to write persisted session to {:?}: {}", dir, err);
    }
}

fn ensure_session_dir(dir: &Path) -> Result<(), PersistError> {
    if dir.exists() {
        let meta = fs::metadata(dir).map_err(|e| PersistError::SessionDir(e.to_string()))?;
        if !meta.is_dir() {
            return Err(PersistError::SessionDir("path is not a directory".into()));
        }
    } else {
        fs::create_dir_all(dir).map_err(|e| PersistError::SessionDir(e.to_string()))?;
    }
    Ok(())
}

/// Write a temp file then rename, so a crash never leaves a torn session.
fn atomic_write(dir: &Path, filename: &str, content: &str) -> Result<PathBuf, PersistError> {
    ensure_session_dir(dir)?;

    let target = dir.join(filename);
    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(content.as_bytes())?;
    tmp.flush()?;
    tmp.as_file_mut().sync_all()?;

    if target.exists() {
        fs::remove_file(&target)?;
    }
    tmp.persist(&target).map_err(|e| PersistError::Io(e.error))?;
    Ok(target)
}
