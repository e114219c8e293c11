use outreach_core::{update, AppState, Msg, WorkflowStore};

#[test]
fn update_is_noop() {
    let state = AppState::new();
    let mut store = WorkflowStore::new();
    let (next, effects) = update(state.clone(), &mut store, Msg::NoOp);

    assert_eq!(state, next);
    assert!(effects.is_empty());
    assert_eq!(store, WorkflowStore::new());
}

#[test]
fn tick_is_noop() {
    let state = AppState::new();
    let mut store = WorkflowStore::new();
    let (next, effects) = update(state.clone(), &mut store, Msg::Tick);

    assert_eq!(state, next);
    assert!(effects.is_empty());
}
