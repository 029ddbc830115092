//! Conversation state held by an actor.

use std::collections::HashMap;

use duskhaven_content::domain::dialogue::{DEFAULT_NODE, DialogueResponse};

/// Where one actor stands in a conversation with one mobile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DialogueState {
    pub current_node: String,
    /// Waiting for the actor to pick one of `options`.
    pub awaiting: bool,
    /// Lines exchanged so far, oldest first.
    pub history: Vec<String>,
    /// Responses offered by the node last rendered.
    pub options: Vec<DialogueResponse>,
}

impl DialogueState {
    /// Back to the start node, no longer awaiting.
    pub fn reset(&mut self) {
        self.current_node = DEFAULT_NODE.to_owned();
        self.awaiting = false;
        self.options.clear();
    }
}

impl Default for DialogueState {
    fn default() -> Self {
        Self {
            current_node: DEFAULT_NODE.to_owned(),
            awaiting: false,
            history: Vec::new(),
            options: Vec::new(),
        }
    }
}

/// Every conversation of one actor, keyed by mobile template id.
#[derive(Debug, Clone, Default)]
pub struct DialogueBook {
    states: HashMap<String, DialogueState>,
}

impl DialogueBook {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn get(&self, mobile: &str) -> Option<&DialogueState> {
        self.states.get(mobile)
    }

    /// State for `mobile`, created at the start node on first use.
    pub fn entry(&mut self, mobile: &str) -> &mut DialogueState {
        self.states.entry(mobile.to_owned()).or_default()
    }

    /// Starts focusing on `mobile`: any other conversation stops awaiting.
    pub fn focus(&mut self, mobile: &str) -> &mut DialogueState {
        for (key, state) in &mut self.states {
            if key != mobile {
                state.awaiting = false;
                state.options.clear();
            }
        }
        self.entry(mobile)
    }

    /// The conversation currently waiting for a response, if any.
    #[must_use]
    pub fn pending(&self) -> Option<&str> {
        self.states
            .iter()
            .find(|(_, state)| state.awaiting)
            .map(|(key, _)| key.as_str())
    }

    /// Stops every conversation from awaiting.
    pub fn interrupt_all(&mut self) {
        for state in self.states.values_mut() {
            state.awaiting = false;
            state.options.clear();
        }
    }
}
