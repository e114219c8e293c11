use std::sync::Once;

use outreach_core::{
    update, ActiveView, AppState, Effect, GeneratedMessage, MessageType, Msg, RequestToken,
    ResumeDocument, StageError, StoreKey, Tone, WorkflowStore,
};

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(flow_logging::initialize_for_tests);
}

/// Runs the workflow up to a committed store and the generator view.
fn generator_state(store: &mut WorkflowStore) -> AppState {
    let document = ResumeDocument {
        file_name: "resume.pdf".to_string(),
        media_type: "application/pdf".to_string(),
        bytes: b"%PDF-1.4 test".to_vec(),
    };
    let (state, _) = update(AppState::new(), store, Msg::ResumeFileSelected(document));
    let (state, effects) = update(state, store, Msg::UploadClicked);
    let token = request_token(&effects);
    let (state, _) = update(
        state,
        store,
        Msg::ExtractionFinished {
            token,
            result: Ok("Python, SQL".to_string()),
        },
    );
    let (state, _) = update(
        state,
        store,
        Msg::JobDescriptionChanged("Python, SQL, AWS".to_string()),
    );
    let (state, _) = update(state, store, Msg::ProceedClicked);
    state
}

fn request_token(effects: &[Effect]) -> RequestToken {
    effects
        .iter()
        .find_map(|effect| match effect {
            Effect::ExtractResume { token, .. }
            | Effect::ScoreResume { token, .. }
            | Effect::GenerateMessage { token, .. } => Some(*token),
            _ => None,
        })
        .expect("request effect")
}

#[test]
fn proceed_without_job_description_blocks_navigation() {
    init_logging();
    let mut store = WorkflowStore::new();
    let (state, effects) = update(AppState::new(), &mut store, Msg::ProceedClicked);

    assert!(effects.is_empty());
    let view = state.view();
    assert_eq!(view.active_view, ActiveView::Scoring);
    assert_eq!(
        view.alert.as_deref(),
        Some("Please upload a resume and paste a job description first.")
    );
    assert_eq!(store.get(StoreKey::JobDescription), None);
}

#[test]
fn proceed_commits_both_texts_and_navigates() {
    init_logging();
    let mut store = WorkflowStore::new();
    let state = generator_state(&mut store);

    assert_eq!(state.view().active_view, ActiveView::Generation);
    assert_eq!(store.get(StoreKey::ResumeText), Some("Python, SQL"));
    assert_eq!(store.get(StoreKey::JobDescription), Some("Python, SQL, AWS"));
}

#[test]
fn generate_reads_the_store_fresh_at_call_time() {
    init_logging();
    let mut store = WorkflowStore::new();
    let state = generator_state(&mut store);

    // A later upload overwrote the resume text between renders.
    store.put(StoreKey::ResumeText, "updated resume".to_string());

    let (_state, effects) = update(state, &mut store, Msg::GenerateClicked);
    match &effects[..] {
        [Effect::GenerateMessage { request, .. }] => {
            assert_eq!(request.resume_text, "updated resume");
            assert_eq!(request.job_description, "Python, SQL, AWS");
        }
        other => panic!("unexpected effects: {other:?}"),
    }
}

#[test]
fn generate_with_empty_store_degrades_to_empty_strings() {
    init_logging();
    let mut store = WorkflowStore::new();
    let (state, effects) = update(AppState::new(), &mut store, Msg::GenerateClicked);

    match &effects[..] {
        [Effect::GenerateMessage { request, .. }] => {
            assert_eq!(request.resume_text, "");
            assert_eq!(request.job_description, "");
        }
        other => panic!("unexpected effects: {other:?}"),
    }
    assert!(state.view().generating);
}

#[test]
fn second_click_while_generating_is_dropped() {
    init_logging();
    let mut store = WorkflowStore::new();
    let state = generator_state(&mut store);
    let (state, first) = update(state, &mut store, Msg::GenerateClicked);
    assert_eq!(first.len(), 1);

    let (_state, second) = update(state, &mut store, Msg::GenerateClicked);
    assert!(second.is_empty());
}

#[test]
fn request_carries_selected_parameters_with_clamped_budget() {
    init_logging();
    let mut store = WorkflowStore::new();
    let state = generator_state(&mut store);
    let (state, _) = update(state, &mut store, Msg::ToneSelected(Tone::Cold));
    let (state, _) = update(
        state,
        &mut store,
        Msg::MessageTypeSelected(MessageType::LinkedInDm),
    );
    let (state, _) = update(state, &mut store, Msg::MaxCharsChanged(300));

    let (_state, effects) = update(state, &mut store, Msg::GenerateClicked);
    match &effects[..] {
        [Effect::GenerateMessage { request, .. }] => {
            assert_eq!(request.tone, Tone::Cold);
            assert_eq!(request.message_type, MessageType::LinkedInDm);
            assert_eq!(request.max_chars, 300);
        }
        other => panic!("unexpected effects: {other:?}"),
    }
}

#[test]
fn out_of_range_budgets_are_clamped() {
    init_logging();
    let mut store = WorkflowStore::new();

    for (typed, sent) in [(50u32, 100u32), (1000, 600), (100, 100), (600, 600)] {
        let state = generator_state(&mut store);
        let (state, _) = update(state, &mut store, Msg::MaxCharsChanged(typed));
        let (_state, effects) = update(state, &mut store, Msg::GenerateClicked);
        match &effects[..] {
            [Effect::GenerateMessage { request, .. }] => {
                assert_eq!(request.max_chars, sent, "typed {typed}");
            }
            other => panic!("unexpected effects: {other:?}"),
        }
    }
}

#[test]
fn collaborator_error_text_is_rendered_in_the_message_slot() {
    init_logging();
    let mut store = WorkflowStore::new();
    let state = generator_state(&mut store);
    let (state, effects) = update(state, &mut store, Msg::GenerateClicked);
    let token = request_token(&effects);

    let (state, _) = update(
        state,
        &mut store,
        Msg::GenerationFinished {
            token,
            result: Ok(GeneratedMessage::ErrorText("quota exceeded".to_string())),
        },
    );

    let view = state.view();
    assert!(!view.generating);
    assert_eq!(view.message_text.as_deref(), Some("quota exceeded"));
    assert!(view.message_is_error);
}

#[test]
fn generated_content_is_rendered() {
    init_logging();
    let mut store = WorkflowStore::new();
    let state = generator_state(&mut store);
    let (state, effects) = update(state, &mut store, Msg::GenerateClicked);
    let token = request_token(&effects);

    let (state, _) = update(
        state,
        &mut store,
        Msg::GenerationFinished {
            token,
            result: Ok(GeneratedMessage::Content("Hi! Saw your post.".to_string())),
        },
    );

    let view = state.view();
    assert_eq!(view.message_text.as_deref(), Some("Hi! Saw your post."));
    assert!(!view.message_is_error);
}

#[test]
fn transport_failure_lands_in_the_errored_slot() {
    init_logging();
    let mut store = WorkflowStore::new();
    let state = generator_state(&mut store);
    let (state, effects) = update(state, &mut store, Msg::GenerateClicked);
    let token = request_token(&effects);

    let (state, _) = update(
        state,
        &mut store,
        Msg::GenerationFinished {
            token,
            result: Err(StageError::NetworkFailure("connection refused".to_string())),
        },
    );

    let view = state.view();
    assert_eq!(
        view.message_text.as_deref(),
        Some("Network error: connection refused")
    );
    assert!(view.message_is_error);
}

#[test]
fn generation_is_reentrant_from_a_terminal_state() {
    init_logging();
    let mut store = WorkflowStore::new();
    let state = generator_state(&mut store);
    let (state, effects) = update(state, &mut store, Msg::GenerateClicked);
    let token = request_token(&effects);
    let (state, _) = update(
        state,
        &mut store,
        Msg::GenerationFinished {
            token,
            result: Ok(GeneratedMessage::Content("first".to_string())),
        },
    );

    let (state, effects) = update(state, &mut store, Msg::GenerateClicked);
    assert_eq!(effects.len(), 1);
    assert!(state.view().generating);

    let token = request_token(&effects);
    let (state, _) = update(
        state,
        &mut store,
        Msg::GenerationFinished {
            token,
            result: Ok(GeneratedMessage::Content("second".to_string())),
        },
    );
    assert_eq!(state.view().message_text.as_deref(), Some("second"));
}

#[test]
fn stale_generation_response_is_discarded_after_clear() {
    init_logging();
    let mut store = WorkflowStore::new();
    let state = generator_state(&mut store);
    let (state, effects) = update(state, &mut store, Msg::GenerateClicked);
    let token = request_token(&effects);

    // User cleared the session while the request was in flight.
    let (state, _) = update(state, &mut store, Msg::ClearSessionClicked);

    let (state, _) = update(
        state,
        &mut store,
        Msg::GenerationFinished {
            token,
            result: Ok(GeneratedMessage::Content("late arrival".to_string())),
        },
    );

    assert_eq!(state.view().message_text, None);
}

#[test]
fn copy_emits_the_displayed_text() {
    init_logging();
    let mut store = WorkflowStore::new();
    let state = generator_state(&mut store);
    let (state, effects) = update(state, &mut store, Msg::GenerateClicked);
    let token = request_token(&effects);
    let (state, _) = update(
        state,
        &mut store,
        Msg::GenerationFinished {
            token,
            result: Ok(GeneratedMessage::Content("copy me".to_string())),
        },
    );

    let (_state, effects) = update(state, &mut store, Msg::CopyClicked);
    assert_eq!(
        effects,
        vec![Effect::CopyToClipboard {
            text: "copy me".to_string()
        }]
    );
}

#[test]
fn copy_with_nothing_displayed_is_a_noop() {
    init_logging();
    let mut store = WorkflowStore::new();
    let (_state, effects) = update(AppState::new(), &mut store, Msg::CopyClicked);
    assert!(effects.is_empty());
}

#[test]
fn clipboard_failure_is_reported_but_does_not_block() {
    init_logging();
    let mut store = WorkflowStore::new();
    let state = generator_state(&mut store);

    let (state, _) = update(
        state,
        &mut store,
        Msg::CopyFinished {
            result: Err("no display server".to_string()),
        },
    );

    assert_eq!(
        state.view().alert.as_deref(),
        Some("Clipboard error: no display server")
    );
    // The stage remains fully usable.
    let (_state, effects) = update(state, &mut store, Msg::GenerateClicked);
    assert_eq!(effects.len(), 1);
}
