use crate::{
    AppState, Effect, GeneratedMessage, Msg, RequestToken, ScoreResult, StageError, StoreKey,
    WorkflowStore,
};

/// Pure update function: applies a message to state and returns any effects.
///
/// The store is the injected session cache shared by all stages; `update`
/// is its single writer, which keeps the write discipline reviewable in
/// one place.
pub fn update(mut state: AppState, store: &mut WorkflowStore, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::ResumeFileSelected(document) => {
            state.set_resume_file(document);
            Vec::new()
        }
        Msg::UploadClicked => upload_clicked(&mut state),
        Msg::ExtractionFinished { token, result } => {
            extraction_finished(&mut state, store, token, result)
        }
        Msg::JobDescriptionChanged(text) => {
            state.set_job_description(text);
            Vec::new()
        }
        Msg::ScoreClicked => score_clicked(&mut state),
        Msg::ScoringFinished { token, result } => scoring_finished(&mut state, token, result),
        Msg::ProceedClicked => proceed_clicked(&mut state, store),
        Msg::ToneSelected(tone) => {
            state.set_tone(tone);
            Vec::new()
        }
        Msg::MessageTypeSelected(message_type) => {
            state.set_message_type(message_type);
            Vec::new()
        }
        Msg::MaxCharsChanged(max_chars) => {
            state.set_max_chars(max_chars);
            Vec::new()
        }
        Msg::GenerateClicked => generate_clicked(&mut state, store),
        Msg::GenerationFinished { token, result } => {
            generation_finished(&mut state, token, result)
        }
        Msg::CopyClicked => copy_clicked(&state),
        Msg::CopyFinished { result } => {
            if let Err(message) = result {
                state.raise_alert(StageError::Clipboard(message));
            }
            Vec::new()
        }
        Msg::ClearSessionClicked => {
            store.clear();
            state.reset_session();
            Vec::new()
        }
        Msg::RestoreSession {
            resume_text,
            job_description,
        } => {
            restore_session(&mut state, store, resume_text, job_description);
            Vec::new()
        }
        Msg::Tick | Msg::NoOp => Vec::new(),
    };

    (state, effects)
}

fn upload_clicked(state: &mut AppState) -> Vec<Effect> {
    // One outstanding extraction at a time; repeated clicks are dropped.
    if state.is_uploading() {
        return Vec::new();
    }

    let document = match state.resume_file() {
        Some(document) => document.clone(),
        None => {
            state.raise_alert(StageError::Validation(
                "Please select a PDF resume first.".to_string(),
            ));
            return Vec::new();
        }
    };
    if document.bytes.is_empty() {
        state.raise_alert(StageError::Validation(
            "The selected resume file is empty.".to_string(),
        ));
        return Vec::new();
    }
    if !document.is_pdf() {
        state.raise_alert(StageError::Validation(
            "Resumes must be uploaded as PDF.".to_string(),
        ));
        return Vec::new();
    }

    let token = state.begin_upload();
    vec![Effect::ExtractResume { token, document }]
}

fn extraction_finished(
    state: &mut AppState,
    store: &mut WorkflowStore,
    token: RequestToken,
    result: Result<String, StageError>,
) -> Vec<Effect> {
    if !state.upload_matches(token) {
        // Stale response for an abandoned request; drop it.
        return Vec::new();
    }
    match result {
        Ok(text) => {
            store.put(StoreKey::ResumeText, text.clone());
            state.finish_upload_ok(text);
        }
        Err(error) => {
            // The store keeps whatever it held before the failed upload.
            state.finish_upload_err(error);
        }
    }
    Vec::new()
}

fn score_clicked(state: &mut AppState) -> Vec<Effect> {
    if state.is_scoring() {
        return Vec::new();
    }

    let resume_text = state.resume_text().unwrap_or_default().to_string();
    let job_description = state.job_description().to_string();
    if resume_text.trim().is_empty() || job_description.trim().is_empty() {
        state.raise_alert(StageError::PrerequisiteMissing(
            "Please upload a resume and paste a job description first.".to_string(),
        ));
        return Vec::new();
    }

    let token = state.begin_scoring();
    vec![Effect::ScoreResume {
        token,
        resume_text,
        job_description,
    }]
}

fn scoring_finished(
    state: &mut AppState,
    token: RequestToken,
    result: Result<ScoreResult, StageError>,
) -> Vec<Effect> {
    if !state.scoring_matches(token) {
        return Vec::new();
    }
    match result {
        Ok(score) => state.finish_scoring_ok(score),
        Err(error) => state.finish_scoring_err(error),
    }
    Vec::new()
}

fn proceed_clicked(state: &mut AppState, store: &mut WorkflowStore) -> Vec<Effect> {
    let resume_text = state.resume_text().unwrap_or_default().to_string();
    let job_description = state.job_description().to_string();
    if resume_text.trim().is_empty() || job_description.trim().is_empty() {
        state.raise_alert(StageError::PrerequisiteMissing(
            "Please upload a resume and paste a job description first.".to_string(),
        ));
        return Vec::new();
    }

    // The one store write that does not originate from the upload stage:
    // both texts are committed together at the transition point.
    store.commit_pair(resume_text, job_description);
    state.show_generator();
    Vec::new()
}

fn generate_clicked(state: &mut AppState, store: &WorkflowStore) -> Vec<Effect> {
    if state.is_generating() {
        return Vec::new();
    }

    // Read fresh at call time. Absent values degrade to empty strings so
    // the generator stays usable standalone; the collaborator reports the
    // missing-input condition itself.
    let resume_text = store
        .get(StoreKey::ResumeText)
        .unwrap_or_default()
        .to_string();
    let job_description = store
        .get(StoreKey::JobDescription)
        .unwrap_or_default()
        .to_string();

    let token = state.begin_generation();
    let request = state.generation_request(resume_text, job_description);
    vec![Effect::GenerateMessage { token, request }]
}

fn generation_finished(
    state: &mut AppState,
    token: RequestToken,
    result: Result<GeneratedMessage, StageError>,
) -> Vec<Effect> {
    if !state.generation_matches(token) {
        return Vec::new();
    }
    let outcome = match result {
        Ok(outcome) => outcome,
        // Transport failures land in the errored message slot too, so the
        // generator view never goes blank.
        Err(error) => GeneratedMessage::ErrorText(error.to_string()),
    };
    state.finish_generation(outcome);
    Vec::new()
}

fn copy_clicked(state: &AppState) -> Vec<Effect> {
    match state.displayed_message() {
        Some(text) => vec![Effect::CopyToClipboard {
            text: text.to_string(),
        }],
        None => Vec::new(),
    }
}

fn restore_session(
    state: &mut AppState,
    store: &mut WorkflowStore,
    resume_text: Option<String>,
    job_description: Option<String>,
) {
    match (resume_text, job_description) {
        (Some(resume_text), Some(job_description))
            if !resume_text.trim().is_empty() && !job_description.trim().is_empty() =>
        {
            store.commit_pair(resume_text.clone(), job_description.clone());
            state.seed_from_session(resume_text, job_description);
        }
        // Partial or empty persisted pairs are untrusted and ignored.
        _ => {}
    }
}
