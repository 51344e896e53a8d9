use snip_core::{
    update, AppState, Effect, EntryId, History, HistoryEntry, Msg, Notice, SubmissionState,
};

fn init_logging() {
    snip_logging::initialize_for_tests();
}

fn loaded(entries: Vec<HistoryEntry>) -> AppState {
    let (state, effects) = update(AppState::new(), Msg::HistoryLoaded(History::from_entries(entries)));
    assert!(effects.is_empty());
    state
}

fn shorten(state: AppState, url: &str, short: &str, at: u64) -> AppState {
    let (state, _) = update(state, Msg::InputChanged(url.to_string()));
    let (state, effects) = update(state, Msg::Submitted);
    let submission = match &effects[..] {
        [Effect::Shorten { submission, .. }] => *submission,
        other => panic!("unexpected effects {other:?}"),
    };
    let (state, _) = update(
        state,
        Msg::ShortenFinished {
            submission,
            created_at_ms: at,
            result: Ok(short.to_string()),
        },
    );
    state
}

#[test]
fn loaded_history_is_kept_in_order() {
    init_logging();
    let state = loaded(vec![
        HistoryEntry::new(EntryId(30), "https://c", "http://s/c"),
        HistoryEntry::new(EntryId(20), "https://b", "http://s/b"),
    ]);

    let ids: Vec<_> = state.view().history.iter().map(|row| row.id).collect();
    assert_eq!(ids, vec![EntryId(30), EntryId(20)]);
}

#[test]
fn new_entries_get_ids_above_loaded_ones() {
    init_logging();
    let state = loaded(vec![HistoryEntry::new(EntryId(9_000), "https://a", "http://s/a")]);
    let state = shorten(state, "https://b", "http://s/b", 10);

    assert_eq!(state.history().newest().map(|entry| entry.id), Some(EntryId(9_001)));
}

#[test]
fn delete_removes_only_the_matching_entry_and_persists() {
    init_logging();
    let state = loaded(vec![
        HistoryEntry::new(EntryId(3), "https://c", "http://s/c"),
        HistoryEntry::new(EntryId(2), "https://b", "http://s/b"),
        HistoryEntry::new(EntryId(1), "https://a", "http://s/a"),
    ]);

    let (state, effects) = update(state, Msg::DeleteRequested(EntryId(2)));

    let remaining: Vec<_> = state.history().iter().map(|entry| entry.id.0).collect();
    assert_eq!(remaining, vec![3, 1]);
    assert_eq!(effects, vec![Effect::PersistHistory(state.history().clone())]);
    assert_eq!(state.notice(), Some(&Notice::Deleted(EntryId(2))));
}

#[test]
fn delete_of_absent_id_is_noop() {
    init_logging();
    let state = loaded(vec![HistoryEntry::new(EntryId(1), "https://a", "http://s/a")]);
    let before = state.clone();

    let (state, effects) = update(state, Msg::DeleteRequested(EntryId(77)));

    assert!(effects.is_empty());
    assert_eq!(state, before);
}

#[test]
fn deleting_the_only_entry_clears_last_result() {
    init_logging();
    let state = shorten(AppState::new(), "https://example.com", "http://s/x1", 1);
    assert_eq!(state.last_result(), Some("http://s/x1"));
    let id = state.history().entries()[0].id;

    let (state, effects) = update(state, Msg::DeleteRequested(id));

    assert!(state.history().is_empty());
    assert_eq!(state.last_result(), None);
    assert_eq!(state.submission(), &SubmissionState::Idle);
    assert_eq!(effects, vec![Effect::PersistHistory(History::new())]);
}

#[test]
fn deleting_displayed_entry_among_several_keeps_last_result() {
    init_logging();
    let state = shorten(AppState::new(), "https://a", "http://s/a", 1);
    let state = shorten(state, "https://b", "http://s/b", 2);
    let displayed = state.history().entries()[0].id;

    let (state, _) = update(state, Msg::DeleteRequested(displayed));

    assert_eq!(state.history().len(), 1);
    assert_eq!(state.last_result(), Some("http://s/b"));
}

#[test]
fn deleting_last_entry_does_not_touch_in_flight_submission() {
    init_logging();
    let state = loaded(vec![HistoryEntry::new(EntryId(1), "https://a", "http://s/a")]);
    let (state, _) = update(state, Msg::InputChanged("https://b".to_string()));
    let (state, _) = update(state, Msg::Submitted);

    let (state, _) = update(state, Msg::DeleteRequested(EntryId(1)));

    assert!(state.is_submitting());
    assert!(state.history().is_empty());
}

#[test]
fn copy_emits_clipboard_effect_and_notice() {
    init_logging();
    let state = loaded(vec![HistoryEntry::new(EntryId(1), "https://a", "http://s/a")]);
    let history_before = state.history().clone();

    let (mut state, effects) = update(state, Msg::CopyRequested("http://s/a".to_string()));

    assert_eq!(
        effects,
        vec![Effect::CopyToClipboard {
            text: "http://s/a".to_string()
        }]
    );
    assert_eq!(state.history(), &history_before);
    assert_eq!(state.notice(), Some(&Notice::Copied("http://s/a".to_string())));
    assert!(state.consume_dirty());
}
