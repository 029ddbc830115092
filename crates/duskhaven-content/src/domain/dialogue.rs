//! Conversation graphs attached to mobile templates.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Id of the node every conversation starts (and resets) at.
pub const DEFAULT_NODE: &str = "default";

/// Effect run when a player picks a response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DialogueAction {
    /// Restores health to the speaking actor.
    Heal {
        /// Health restored.
        amount: i32,
    },
    /// Hands the actor a fresh item instance.
    GiveItem {
        /// Item template id.
        item: String,
    },
    /// Awards experience to the actor.
    GrantExperience {
        /// Experience awarded.
        amount: u32,
    },
    /// Forwards a named behavior to the mobile (e.g. `attack`).
    Behavior {
        /// Behavior name.
        name: String,
    },
}

/// One selectable reply.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DialogueResponse {
    /// What the actor says.
    pub text: String,
    /// Node rendered next; `None` ends the conversation.
    #[serde(default)]
    pub next: Option<String>,
    /// Optional effect.
    #[serde(default)]
    pub action: Option<DialogueAction>,
}

/// A node: what the mobile says and how the actor may answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DialogueNode {
    /// Line spoken by the mobile.
    pub message: String,
    /// Offered replies, in order.
    #[serde(default)]
    pub responses: Vec<DialogueResponse>,
}

/// Node graph keyed by node id.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DialogueTree {
    /// Nodes by id. Must contain [`DEFAULT_NODE`] to be usable.
    pub nodes: HashMap<String, DialogueNode>,
}

impl DialogueTree {
    /// Looks up a node.
    #[must_use]
    pub fn node(&self, id: &str) -> Option<&DialogueNode> {
        self.nodes.get(id)
    }

    /// Returns every `next` reference that does not resolve to a node.
    #[must_use]
    pub fn dangling_references(&self) -> Vec<String> {
        let mut dangling: Vec<String> = self
            .nodes
            .values()
            .flat_map(|node| node.responses.iter())
            .filter_map(|response| response.next.as_ref())
            .filter(|next| !self.nodes.contains_key(next.as_str()))
            .cloned()
            .collect();
        dangling.sort();
        dangling.dedup();
        dangling
    }
}
