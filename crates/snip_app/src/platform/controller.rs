use snip_core::{update, AppState, AppViewModel, EntryId, History, Msg, Notice};
use snip_logging::snip_debug;

use super::effects::EffectRunner;

/// Everything the session loop reacts to, funnelled through one channel.
#[derive(Debug)]
pub enum AppEvent {
    /// Message for the core, e.g. a forwarded engine completion.
    Core(Msg),
    /// Line typed in the interactive session.
    Line(String),
    /// Standard input reached end of file.
    InputClosed,
}

/// Owns the submission state machine and the effect runner. Every change
/// goes through [`update`]; the resulting effects run before control returns.
pub struct SubmissionController {
    state: AppState,
    effects: EffectRunner,
}

impl SubmissionController {
    /// Creates the controller and replays the stored history into it.
    pub fn new(effects: EffectRunner) -> Self {
        let history = effects.store().load();
        let mut controller = Self {
            state: AppState::new(),
            effects,
        };
        controller.dispatch(Msg::HistoryLoaded(history));
        controller
    }

    /// Applies `msg`, runs the effects and reports whether anything visible changed.
    pub fn dispatch(&mut self, msg: Msg) -> bool {
        let state = std::mem::take(&mut self.state);
        let (mut state, effects) = update(state, msg);
        let dirty = state.consume_dirty();
        self.state = state;
        self.effects.run(effects);
        dirty
    }

    /// Submits `url` and reports whether a new request was dispatched. While a
    /// request is pending the call is dropped and the state is left as it was.
    pub fn submit(&mut self, url: &str) -> bool {
        if self.state.is_submitting() {
            snip_debug!("submit ignored while a request is in flight");
            return false;
        }
        self.dispatch(Msg::InputChanged(url.to_string()));
        self.dispatch(Msg::Submitted);
        let dispatched = self.state.is_submitting();
        if !dispatched {
            snip_debug!("submit ignored for blank input");
        }
        dispatched
    }

    pub fn copy(&mut self, short_url: &str) {
        self.dispatch(Msg::CopyRequested(short_url.to_string()));
    }

    /// Copies the short URL of entry `id`; `false` when there is no such entry.
    pub fn copy_entry(&mut self, id: EntryId) -> bool {
        let Some(short_url) = self.state.history().get(id).map(|e| e.short_url.clone()) else {
            return false;
        };
        self.copy(&short_url);
        true
    }

    /// Deletes entry `id`; `false` when there was no such entry.
    pub fn delete(&mut self, id: EntryId) -> bool {
        let existed = self.state.history().contains(id);
        self.dispatch(Msg::DeleteRequested(id));
        existed
    }

    pub fn is_submitting(&self) -> bool {
        self.state.is_submitting()
    }

    pub fn last_result(&self) -> Option<&str> {
        self.state.last_result()
    }

    pub fn history(&self) -> &History {
        self.state.history()
    }

    pub fn take_notice(&mut self) -> Option<Notice> {
        self.state.take_notice()
    }

    pub fn view(&self) -> AppViewModel {
        self.state.view()
    }
}
