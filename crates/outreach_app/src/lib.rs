//! Outreach app shell: platform wiring around the core state machine.
//!
//! A host UI embeds [`WorkflowShell`], feeds it [`outreach_core::Msg`]s
//! from its widgets, and renders the view models it returns. Everything
//! with a side effect lives here: the HTTP engine, the clipboard, and the
//! optional session file.
mod clipboard;
mod effects;
mod persistence;
mod shell;

pub use clipboard::{ClipboardSink, SystemClipboard};
pub use effects::EffectRunner;
pub use shell::WorkflowShell;
