//! Rendering nodes and advancing a conversation.

use duskhaven_content::domain::dialogue::{DEFAULT_NODE, DialogueNode, DialogueResponse, DialogueTree};
use duskhaven_core::error::DomainError;
use duskhaven_core::rng::DeterministicRng;
use tracing::warn;

use super::state::DialogueState;

/// Lines used by mobiles that have neither a node graph nor a greeting.
pub const FALLBACK_LINES: [&str; 3] = [
    "{mobile} nods at you.",
    "{mobile} has nothing to say to you.",
    "{mobile} looks at you curiously.",
];

/// What a mobile says when talked to without a node graph. The greeting's
/// `{name}` is replaced with the actor's name.
pub fn fallback_line(
    mobile: &str,
    greeting: Option<&str>,
    actor: &str,
    rng: &mut dyn DeterministicRng,
) -> String {
    if let Some(greeting) = greeting {
        return format!("{mobile} says, \"{}\"", greeting.replace("{name}", actor));
    }
    let last = u32::try_from(FALLBACK_LINES.len() - 1).unwrap_or(0);
    let index = usize::try_from(rng.next_u32_range(0, last)).unwrap_or(0);
    FALLBACK_LINES
        .get(index)
        .unwrap_or(&FALLBACK_LINES[0])
        .replace("{mobile}", mobile)
}

/// The mobile's line followed by numbered response options.
#[must_use]
pub fn render_node(mobile: &str, node: &DialogueNode) -> Vec<String> {
    let mut lines = vec![format!("{mobile} says, \"{}\"", node.message)];
    lines.extend(
        node.responses
            .iter()
            .enumerate()
            .map(|(i, response)| format!("  {}. {}", i + 1, response.text)),
    );
    lines
}

/// Renders `node_id` and marks the state as awaiting a response when the
/// node offers any. A missing node falls back to the start node.
///
/// # Errors
///
/// Returns `DomainError::Integrity` if neither the node nor the start node exists.
pub fn present(
    state: &mut DialogueState,
    tree: &DialogueTree,
    mobile: &str,
    node_id: &str,
) -> Result<Vec<String>, DomainError> {
    let (id, node) = match tree.node(node_id) {
        Some(node) => (node_id, node),
        None => {
            warn!(mobile, node = node_id, "dialogue node missing, restarting conversation");
            let node = tree.node(DEFAULT_NODE).ok_or_else(|| {
                DomainError::Integrity(format!("{mobile} has no {DEFAULT_NODE} dialogue node"))
            })?;
            (DEFAULT_NODE, node)
        }
    };

    state.current_node = id.to_owned();
    state.options.clone_from(&node.responses);
    state.awaiting = !node.responses.is_empty();
    state.history.push(format!("{mobile}: {}", node.message));
    Ok(render_node(mobile, node))
}

/// Takes the actor's 1-based choice out of the offered options.
///
/// On success the state is no longer awaiting; the caller decides whether
/// the conversation moves to `response.next` or ends.
///
/// # Errors
///
/// Returns `DomainError::Rejected` if nothing is awaiting a response or the
/// index is out of range.
pub fn choose(state: &mut DialogueState, index: usize) -> Result<DialogueResponse, DomainError> {
    if !state.awaiting {
        return Err(DomainError::rejected("You are not in a conversation."));
    }
    let response = index
        .checked_sub(1)
        .and_then(|i| state.options.get(i))
        .cloned()
        .ok_or_else(|| {
            DomainError::rejected(format!(
                "Choose a response between 1 and {}.",
                state.options.len()
            ))
        })?;

    state.history.push(format!("> {}", response.text));
    state.awaiting = false;
    state.options.clear();
    Ok(response)
}

/// Ends the conversation and returns the closing line.
#[must_use]
pub fn close(state: &mut DialogueState, mobile: &str) -> String {
    state.reset();
    format!("{mobile} nods and turns back to what they were doing.")
}

#[cfg(test)]
mod tests {
    use super::*;
    use duskhaven_test_support::{MockRng, sample_pack};

    fn guard_tree() -> DialogueTree {
        sample_pack()
            .mobile("guard")
            .and_then(|m| m.dialogue.clone())
            .unwrap()
    }

    #[test]
    fn test_present_default_node_offers_numbered_choices() {
        // Arrange
        let tree = guard_tree();
        let mut state = DialogueState::default();

        // Act
        let lines = present(&mut state, &tree, "gate guard", DEFAULT_NODE).unwrap();

        // Assert
        assert_eq!(lines[0], "gate guard says, \"Halt! State your business.\"");
        assert_eq!(lines[1], "  1. I seek passage north.");
        assert_eq!(lines.len(), 4);
        assert!(state.awaiting);
        assert_eq!(state.history.len(), 1);
    }

    #[test]
    fn test_choose_out_of_range_is_rejected_and_keeps_awaiting() {
        let tree = guard_tree();
        let mut state = DialogueState::default();
        present(&mut state, &tree, "gate guard", DEFAULT_NODE).unwrap();

        assert!(choose(&mut state, 0).is_err());
        assert!(choose(&mut state, 4).is_err());
        assert!(state.awaiting);
    }

    #[test]
    fn test_choose_without_pending_conversation_is_rejected() {
        let mut state = DialogueState::default();

        let err = choose(&mut state, 1).unwrap_err();

        assert_eq!(err.player_message(), "You are not in a conversation.");
    }

    #[test]
    fn test_choose_returns_response_and_records_history() {
        let tree = guard_tree();
        let mut state = DialogueState::default();
        present(&mut state, &tree, "gate guard", DEFAULT_NODE).unwrap();

        let response = choose(&mut state, 1).unwrap();

        assert_eq!(response.next.as_deref(), Some("passage"));
        assert!(!state.awaiting);
        assert_eq!(state.history.last().unwrap(), "> I seek passage north.");
    }

    #[test]
    fn test_present_missing_node_restarts_at_default() {
        let tree = guard_tree();
        let mut state = DialogueState::default();

        present(&mut state, &tree, "gate guard", "nowhere").unwrap();

        assert_eq!(state.current_node, DEFAULT_NODE);
    }

    #[test]
    fn test_close_resets_to_default() {
        let mut state = DialogueState {
            current_node: "passage".into(),
            ..DialogueState::default()
        };

        let line = close(&mut state, "gate guard");

        assert!(line.starts_with("gate guard"));
        assert_eq!(state.current_node, DEFAULT_NODE);
    }

    #[test]
    fn test_fallback_uses_greeting_template() {
        let line = fallback_line("town crier", Some("Hear ye, {name}!"), "Alice", &mut MockRng);

        assert_eq!(line, "town crier says, \"Hear ye, Alice!\"");
    }

    #[test]
    fn test_fallback_without_greeting_picks_fixed_line() {
        let line = fallback_line("giant rat", None, "Alice", &mut MockRng);

        assert_eq!(line, "giant rat nods at you.");
    }
}
