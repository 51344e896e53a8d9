use snip_core::{
    update, AppState, Effect, FailureKind, Msg, Notice, ShortenFailure, SubmissionState,
    SubmissionStatus, FAILURE_MESSAGE,
};

fn init_logging() {
    snip_logging::initialize_for_tests();
}

fn submit_url(state: AppState, input: &str) -> (AppState, Vec<Effect>) {
    let (state, _) = update(state, Msg::InputChanged(input.to_string()));
    update(state, Msg::Submitted)
}

fn finish(state: AppState, submission: u64, at: u64, short: &str) -> (AppState, Vec<Effect>) {
    update(
        state,
        Msg::ShortenFinished {
            submission,
            created_at_ms: at,
            result: Ok(short.to_string()),
        },
    )
}

#[test]
fn submit_moves_idle_to_submitting_and_emits_one_request() {
    init_logging();
    let (state, effects) = submit_url(AppState::new(), "https://example.com/a/very/long/path");

    assert!(state.is_submitting());
    assert_eq!(state.view().status, SubmissionStatus::Submitting);
    assert_eq!(
        effects,
        vec![Effect::Shorten {
            submission: 1,
            url: "https://example.com/a/very/long/path".to_string(),
        }]
    );
}

#[test]
fn blank_input_is_ignored_without_transition() {
    init_logging();
    let (state, effects) = submit_url(AppState::new(), "   \t ");

    assert!(effects.is_empty());
    assert_eq!(state.submission(), &SubmissionState::Idle);
    assert_eq!(state.view().error_message, None);
}

#[test]
fn repeated_submits_while_in_flight_are_dropped() {
    init_logging();
    let (state, first) = submit_url(AppState::new(), "https://first.example.com");
    assert_eq!(first.len(), 1);
    let before = state.clone();

    let (state, effects) = update(state, Msg::Submitted);
    assert!(effects.is_empty());
    let (state, effects) = update(state, Msg::Submitted);
    assert!(effects.is_empty());

    assert_eq!(state, before);
    assert_eq!(state.input(), "https://first.example.com");
}

#[test]
fn success_records_entry_and_exposes_last_result() {
    init_logging();
    let (state, _) = submit_url(AppState::new(), "https://example.com/a/very/long/path");
    let (mut state, effects) = finish(state, 1, 1_700_000_000_000, "http://s/x1");

    let view = state.view();
    assert_eq!(view.status, SubmissionStatus::Succeeded);
    assert_eq!(view.last_result.as_deref(), Some("http://s/x1"));
    assert_eq!(view.input, "");
    assert_eq!(view.history.len(), 1);
    assert_eq!(view.history[0].original_url, "https://example.com/a/very/long/path");
    assert_eq!(view.history[0].short_url, "http://s/x1");
    assert_eq!(view.history[0].id.0, 1_700_000_000_000);
    assert_eq!(view.notice, Some(Notice::Shortened("http://s/x1".to_string())));
    assert_eq!(effects, vec![Effect::PersistHistory(state.history().clone())]);
    assert!(state.consume_dirty());
}

#[test]
fn original_url_is_stored_verbatim() {
    init_logging();
    let raw = "  https://Example.com/Path?q=1  ";
    let (state, effects) = submit_url(AppState::new(), raw);
    assert_eq!(
        effects,
        vec![Effect::Shorten {
            submission: 1,
            url: raw.to_string(),
        }]
    );
    let (state, _) = finish(state, 1, 10, "http://s/q");
    assert_eq!(state.history().entries()[0].original_url, raw);
}

#[test]
fn failure_keeps_history_and_shows_generic_message() {
    init_logging();
    let (state, _) = submit_url(AppState::new(), "https://example.com");
    let (state, effects) = update(
        state,
        Msg::ShortenFinished {
            submission: 1,
            created_at_ms: 5,
            result: Err(ShortenFailure::new(FailureKind::Network, "http status 500")),
        },
    );

    assert!(effects.is_empty());
    assert!(state.history().is_empty());
    let view = state.view();
    assert_eq!(view.status, SubmissionStatus::Failed);
    assert_eq!(view.last_result, None);
    assert_eq!(view.error_message.as_deref(), Some(FAILURE_MESSAGE));
    assert_eq!(view.notice, Some(Notice::SubmissionFailed));
    // Input is kept so the user can retry by resubmitting.
    assert_eq!(view.input, "https://example.com");
}

#[test]
fn failed_state_accepts_a_new_submission() {
    init_logging();
    let (state, _) = submit_url(AppState::new(), "https://example.com");
    let (state, _) = update(
        state,
        Msg::ShortenFinished {
            submission: 1,
            created_at_ms: 5,
            result: Err(ShortenFailure::new(FailureKind::Protocol, "missing short_url")),
        },
    );

    let (state, effects) = update(state, Msg::Submitted);
    assert!(state.is_submitting());
    assert_eq!(
        effects,
        vec![Effect::Shorten {
            submission: 2,
            url: "https://example.com".to_string(),
        }]
    );
}

#[test]
fn new_submission_clears_last_result_immediately() {
    init_logging();
    let (state, _) = submit_url(AppState::new(), "https://old.example.com");
    let (state, _) = finish(state, 1, 100, "http://s/abc");
    assert_eq!(state.last_result(), Some("http://s/abc"));

    let (state, effects) = submit_url(state, "http://new");
    assert_eq!(effects.len(), 1);
    assert_eq!(state.last_result(), None);
    assert_eq!(state.view().last_result, None);
}

#[test]
fn successive_successes_are_listed_newest_first() {
    init_logging();
    let mut state = AppState::new();
    for (n, url) in ["https://s1.example.com", "https://s2.example.com", "https://s3.example.com"]
        .iter()
        .enumerate()
    {
        let (next, effects) = submit_url(state, url);
        let submission = match &effects[..] {
            [Effect::Shorten { submission, .. }] => *submission,
            other => panic!("unexpected effects {other:?}"),
        };
        let (next, _) = finish(next, submission, 1_000 + n as u64, &format!("http://s/{n}"));
        state = next;
    }

    let originals: Vec<_> = state
        .history()
        .iter()
        .map(|entry| entry.original_url.as_str())
        .collect();
    assert_eq!(
        originals,
        vec![
            "https://s3.example.com",
            "https://s2.example.com",
            "https://s1.example.com"
        ]
    );
}

#[test]
fn entry_ids_stay_unique_when_clock_does_not_advance() {
    init_logging();
    let (state, _) = submit_url(AppState::new(), "https://a.example.com");
    let (state, _) = finish(state, 1, 500, "http://s/a");
    let (state, _) = submit_url(state, "https://b.example.com");
    let (state, _) = finish(state, 2, 400, "http://s/b");

    let ids: Vec<_> = state.history().iter().map(|entry| entry.id.0).collect();
    assert_eq!(ids, vec![501, 500]);
}

#[test]
fn stale_completion_is_ignored() {
    init_logging();
    let (state, _) = submit_url(AppState::new(), "https://example.com");
    let before = state.clone();

    let (state, effects) = finish(state, 42, 1, "http://s/stale");
    assert!(effects.is_empty());
    assert_eq!(state, before);

    // A completion arriving after the machine already settled is dropped too.
    let (state, _) = finish(state, 1, 2, "http://s/ok");
    let (state, effects) = finish(state, 1, 3, "http://s/dup");
    assert!(effects.is_empty());
    assert_eq!(state.history().len(), 1);
    assert_eq!(state.last_result(), Some("http://s/ok"));
}
