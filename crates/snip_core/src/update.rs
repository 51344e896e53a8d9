use crate::{AppState, Effect, HistoryEntry, Msg, Notice};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::HistoryLoaded(history) => {
            state.replace_history(history);
            Vec::new()
        }
        Msg::InputChanged(text) => {
            state.set_input(text);
            Vec::new()
        }
        Msg::Submitted => {
            if state.input().trim().is_empty() {
                return (state, Vec::new());
            }
            // Single-flight: a second submit while one is pending is dropped, not queued.
            if state.is_submitting() {
                return (state, Vec::new());
            }
            let (submission, url) = state.begin_submission();
            vec![Effect::Shorten { submission, url }]
        }
        Msg::ShortenFinished {
            submission,
            created_at_ms,
            result,
        } => {
            let Some(original_url) = state.in_flight_url(submission).map(ToOwned::to_owned)
            else {
                return (state, Vec::new());
            };
            match result {
                Ok(short_url) => {
                    let id = state.next_entry_id(created_at_ms);
                    state.complete_success(HistoryEntry::new(id, original_url, short_url));
                    vec![Effect::PersistHistory(state.history().clone())]
                }
                Err(failure) => {
                    state.complete_failure(failure);
                    Vec::new()
                }
            }
        }
        Msg::CopyRequested(text) => {
            state.set_notice(Notice::Copied(text.clone()));
            vec![Effect::CopyToClipboard { text }]
        }
        Msg::DeleteRequested(id) => {
            if !state.history().contains(id) {
                return (state, Vec::new());
            }
            // Clears the displayed result whenever the only entry goes away,
            // without checking that it was the displayed one.
            if state.remove_entry(id) {
                state.clear_last_result();
            }
            vec![Effect::PersistHistory(state.history().clone())]
        }
    };

    (state, effects)
}
