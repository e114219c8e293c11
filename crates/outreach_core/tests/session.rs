use outreach_core::{update, ActiveView, AppState, Msg, StoreKey, WorkflowStore};

#[test]
fn restore_seeds_store_and_page_state() {
    let mut store = WorkflowStore::new();
    let (state, effects) = update(
        AppState::new(),
        &mut store,
        Msg::RestoreSession {
            resume_text: Some("Python, SQL".to_string()),
            job_description: Some("Python, SQL, AWS".to_string()),
        },
    );

    assert!(effects.is_empty());
    assert_eq!(store.get(StoreKey::ResumeText), Some("Python, SQL"));
    assert_eq!(store.get(StoreKey::JobDescription), Some("Python, SQL, AWS"));
    let view = state.view();
    assert_eq!(view.resume_text.as_deref(), Some("Python, SQL"));
    assert_eq!(view.job_description, "Python, SQL, AWS");
}

#[test]
fn partial_persisted_pair_is_ignored() {
    let mut store = WorkflowStore::new();
    let (state, _) = update(
        AppState::new(),
        &mut store,
        Msg::RestoreSession {
            resume_text: Some("Python, SQL".to_string()),
            job_description: None,
        },
    );

    assert_eq!(store.get(StoreKey::ResumeText), None);
    assert_eq!(state.view().resume_text, None);
}

#[test]
fn blank_persisted_values_are_ignored() {
    let mut store = WorkflowStore::new();
    let (_state, _) = update(
        AppState::new(),
        &mut store,
        Msg::RestoreSession {
            resume_text: Some("   ".to_string()),
            job_description: Some("real job".to_string()),
        },
    );

    assert_eq!(store.get(StoreKey::ResumeText), None);
    assert_eq!(store.get(StoreKey::JobDescription), None);
}

#[test]
fn clear_resets_store_and_derived_state() {
    let mut store = WorkflowStore::new();
    let (state, _) = update(
        AppState::new(),
        &mut store,
        Msg::RestoreSession {
            resume_text: Some("resume".to_string()),
            job_description: Some("job".to_string()),
        },
    );
    let (state, _) = update(state, &mut store, Msg::ProceedClicked);
    assert_eq!(state.view().active_view, ActiveView::Generation);

    let (state, effects) = update(state, &mut store, Msg::ClearSessionClicked);

    assert!(effects.is_empty());
    assert_eq!(store.get(StoreKey::ResumeText), None);
    assert_eq!(store.get(StoreKey::JobDescription), None);
    let view = state.view();
    assert_eq!(view.active_view, ActiveView::Scoring);
    assert_eq!(view.resume_text, None);
    assert_eq!(view.job_description, "");
    assert_eq!(view.score, None);
    assert_eq!(view.message_text, None);
}
