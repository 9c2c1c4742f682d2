//! Suggestion list state machine.
//!
//! Closed, open, or open with a highlighted row. Kept free of DOM types so
//! listeners and tests drive it the same way.

use serde_json::Value;

/// Navigation keys the list reacts to
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NavKey {
    Down,
    Up,
    Enter,
    Escape,
}

impl NavKey {
    /// Map a `KeyboardEvent::key()` value
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "ArrowDown" => Some(Self::Down),
            "ArrowUp" => Some(Self::Up),
            "Enter" => Some(Self::Enter),
            "Escape" => Some(Self::Escape),
            _ => None,
        }
    }
}

/// Result of feeding a key into the state machine
#[derive(Clone, Debug, PartialEq)]
pub enum KeyOutcome {
    /// List closed, key passes through untouched
    Ignored,
    /// Highlight moved
    Highlight,
    /// Enter with nothing highlighted; swallowed so the form doesn't submit
    Held,
    /// Enter on a highlighted row; list is now closed
    Commit(Value),
    /// Escape closed the list
    Closed,
}

impl KeyOutcome {
    pub fn prevents_default(&self) -> bool {
        matches!(self, Self::Highlight | Self::Held | Self::Commit(_))
    }
}

/// What an input event asks the widget to do
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum InputAction {
    /// Query too short: cancel the pending search, list is closed
    Close,
    /// (Re)arm the debounce timer for this trimmed query
    Schedule(String),
}

/// Trimmed query if it is long enough to search for
pub fn ready_query(raw: &str, min_length: usize) -> Option<String> {
    let query = raw.trim();
    (query.chars().count() >= min_length).then(|| query.to_string())
}

#[derive(Debug, Default)]
pub struct SuggestState {
    suggestions: Vec<Value>,
    highlighted: Option<usize>,
    open: bool,
    generation: u64,
}

impl SuggestState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn highlighted(&self) -> Option<usize> {
        self.highlighted
    }

    pub fn suggestions(&self) -> &[Value] {
        &self.suggestions
    }

    pub fn on_input(&mut self, raw: &str, min_length: usize) -> InputAction {
        match ready_query(raw, min_length) {
            Some(query) => InputAction::Schedule(query),
            None => {
                self.close();
                InputAction::Close
            }
        }
    }

    /// Start a request; its response is only applied while this stays the
    /// newest generation.
    pub fn begin_request(&mut self) -> u64 {
        self.generation += 1;
        self.generation
    }

    /// Install results for `generation`. Returns false for stale responses.
    pub fn apply_results(&mut self, generation: u64, suggestions: Vec<Value>) -> bool {
        if generation != self.generation {
            return false;
        }
        self.open = !suggestions.is_empty();
        self.suggestions = suggestions;
        self.highlighted = None;
        true
    }

    /// Request for `generation` failed. Closes the list if it was current.
    pub fn fail(&mut self, generation: u64) -> bool {
        if generation != self.generation {
            return false;
        }
        self.close();
        true
    }

    pub fn key(&mut self, key: NavKey) -> KeyOutcome {
        if !self.open {
            return KeyOutcome::Ignored;
        }
        match key {
            NavKey::Down => {
                let last = self.suggestions.len().saturating_sub(1);
                self.highlighted = Some(match self.highlighted {
                    None => 0,
                    Some(index) => (index + 1).min(last),
                });
                KeyOutcome::Highlight
            }
            NavKey::Up => {
                self.highlighted = match self.highlighted {
                    None | Some(0) => None,
                    Some(index) => Some(index - 1),
                };
                KeyOutcome::Highlight
            }
            NavKey::Enter => match self.highlighted.and_then(|index| self.take(index)) {
                Some(record) => KeyOutcome::Commit(record),
                None => KeyOutcome::Held,
            },
            NavKey::Escape => {
                self.close();
                KeyOutcome::Closed
            }
        }
    }

    /// Highlight the row under the pointer. Returns true if it changed.
    pub fn hover(&mut self, index: usize) -> bool {
        if !self.open || index >= self.suggestions.len() || self.highlighted == Some(index) {
            return false;
        }
        self.highlighted = Some(index);
        true
    }

    /// Remove the record at `index` and close the list
    pub fn take(&mut self, index: usize) -> Option<Value> {
        if !self.open || index >= self.suggestions.len() {
            return None;
        }
        let record = self.suggestions.swap_remove(index);
        self.close();
        Some(record)
    }

    /// Close and drop suggestions. In-flight responses become stale.
    pub fn close(&mut self) {
        self.open = false;
        self.highlighted = None;
        self.suggestions.clear();
        self.generation += 1;
    }
}
