//! Lines waiting to be delivered to sessions.

use std::collections::VecDeque;

use duskhaven_core::ids::SessionId;

/// Something the host must do for a session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outgoing {
    /// Deliver one line of text.
    Line { session: SessionId, text: String },
    /// Close the connection after delivering everything queued before it.
    Close { session: SessionId },
}

/// FIFO of outgoing deliveries, drained by the host after each event.
#[derive(Debug, Default)]
pub struct Outbox {
    queue: VecDeque<Outgoing>,
}

impl Outbox {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn line(&mut self, session: SessionId, text: impl Into<String>) {
        self.queue.push_back(Outgoing::Line {
            session,
            text: text.into(),
        });
    }

    pub fn close(&mut self, session: SessionId) {
        self.queue.push_back(Outgoing::Close { session });
    }

    /// Removes and returns everything queued, oldest first.
    pub fn drain(&mut self) -> Vec<Outgoing> {
        self.queue.drain(..).collect()
    }

    /// Removes and returns the lines queued for one session, leaving the rest.
    pub fn take_lines(&mut self, session: SessionId) -> Vec<String> {
        let mut lines = Vec::new();
        self.queue.retain(|entry| match entry {
            Outgoing::Line { session: to, text } if *to == session => {
                lines.push(text.clone());
                false
            }
            _ => true,
        });
        lines
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}
