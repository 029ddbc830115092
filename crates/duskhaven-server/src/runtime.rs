//! The engine loop: the only task that touches the world.
//!
//! Connections talk to it through [`EngineEvent`]s. Between events it
//! advances game time on a fixed tick, reaps idle sessions and flushes the
//! outbox to each connection's writer.

use std::collections::HashMap;
use std::time::Duration;

use duskhaven_core::ids::SessionId;
use duskhaven_engine::application::world::{GameWorld, WorldStatus};
use duskhaven_engine::domain::outbox::Outgoing;
use tokio::sync::{mpsc, oneshot, watch};
use tokio::time::{Instant, MissedTickBehavior};
use tracing::{debug, info};

use crate::dispatch::dispatch;

/// Something for a connection's writer to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Delivery {
    Line(String),
    Close,
}

/// Input from the transport.
#[derive(Debug)]
pub enum EngineEvent {
    /// A connection opened. The engine answers with its session id.
    Opened {
        writer: mpsc::UnboundedSender<Delivery>,
        reply: oneshot::Sender<SessionId>,
    },
    /// A line arrived on a session.
    Line { session: SessionId, text: String },
    /// A connection went away.
    Closed { session: SessionId },
}

/// Owns the world and the per-session writers.
pub struct EngineRuntime {
    world: GameWorld,
    writers: HashMap<SessionId, mpsc::UnboundedSender<Delivery>>,
    status: watch::Sender<WorldStatus>,
    tick: Duration,
}

impl EngineRuntime {
    #[must_use]
    pub fn new(world: GameWorld, status: watch::Sender<WorldStatus>, tick_ms: u64) -> Self {
        Self {
            world,
            writers: HashMap::new(),
            status,
            tick: Duration::from_millis(tick_ms.max(1)),
        }
    }

    /// The world, for inspection.
    #[must_use]
    pub fn world(&self) -> &GameWorld {
        &self.world
    }

    /// Processes events until every sender is dropped.
    pub async fn run(mut self, mut events: mpsc::Receiver<EngineEvent>) {
        let started = Instant::now();
        let mut ticker = tokio::time::interval(self.tick);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        info!(tick = ?self.tick, "engine loop started");

        loop {
            tokio::select! {
                event = events.recv() => match event {
                    Some(event) => self.handle(event).await,
                    None => break,
                },
                _ = ticker.tick() => {
                    let elapsed = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);
                    self.tick_to(elapsed);
                }
            }
            self.flush();
        }
        info!("engine loop stopped");
    }

    /// Applies one transport event to the world. Output stays queued until
    /// [`EngineRuntime::flush`].
    pub async fn handle(&mut self, event: EngineEvent) {
        match event {
            EngineEvent::Opened { writer, reply } => {
                let session = self.world.begin_session();
                self.writers.insert(session, writer);
                if reply.send(session).is_err() {
                    debug!(session = %session, "connection gone before its session opened");
                    self.world.end_session(session);
                    self.writers.remove(&session);
                }
            }
            EngineEvent::Line { session, text } => {
                dispatch(&mut self.world, session, &text).await;
            }
            EngineEvent::Closed { session } => {
                self.world.end_session(session);
                self.writers.remove(&session);
            }
        }
    }

    /// Runs game time forward to `elapsed_ms` and ends idle sessions.
    pub fn tick_to(&mut self, elapsed_ms: u64) {
        if elapsed_ms > self.world.now_ms() {
            self.world.advance_to(elapsed_ms);
        }
        self.world.reap_idle();
    }

    /// Hands queued output to the connection writers and publishes status.
    pub fn flush(&mut self) {
        for outgoing in self.world.drain_outbox() {
            match outgoing {
                Outgoing::Line { session, text } => {
                    if let Some(writer) = self.writers.get(&session) {
                        // A closed writer means the reader is about to report Closed.
                        let _ = writer.send(Delivery::Line(text));
                    }
                }
                Outgoing::Close { session } => {
                    if let Some(writer) = self.writers.remove(&session) {
                        let _ = writer.send(Delivery::Close);
                    }
                }
            }
        }
        self.status.send_replace(self.world.status());
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use chrono::TimeZone;
    use duskhaven_character::application::persistence::PersistenceGateway;
    use duskhaven_engine::domain::config::EngineConfig;
    use duskhaven_test_support::{FixedClock, FixedRng, RecordingStateStore, sample_pack};

    use super::*;

    fn runtime() -> (EngineRuntime, watch::Receiver<WorldStatus>) {
        let clock = Arc::new(FixedClock(
            chrono::Utc.with_ymd_and_hms(2026, 1, 15, 10, 0, 0).unwrap(),
        ));
        let (gateway, _writer) =
            PersistenceGateway::new(Arc::new(RecordingStateStore::new()), clock.clone());
        let world = GameWorld::new(
            EngineConfig::default(),
            Arc::new(sample_pack()),
            gateway,
            clock,
            Box::new(FixedRng::new(10, 1.0)),
        )
        .unwrap();
        let (status_tx, status_rx) = watch::channel(world.status());
        (EngineRuntime::new(world, status_tx, 100), status_rx)
    }

    async fn open(rt: &mut EngineRuntime) -> (SessionId, mpsc::UnboundedReceiver<Delivery>) {
        let (writer, deliveries) = mpsc::unbounded_channel();
        let (reply, session) = oneshot::channel();
        rt.handle(EngineEvent::Opened { writer, reply }).await;
        (session.await.unwrap(), deliveries)
    }

    fn lines(deliveries: &mut mpsc::UnboundedReceiver<Delivery>) -> Vec<Delivery> {
        let mut out = Vec::new();
        while let Ok(delivery) = deliveries.try_recv() {
            out.push(delivery);
        }
        out
    }

    #[tokio::test]
    async fn test_opened_connection_is_greeted_with_the_name_prompt() {
        // Arrange
        let (mut rt, _status) = runtime();

        // Act
        let (_session, mut deliveries) = open(&mut rt).await;
        rt.flush();

        // Assert
        let got = lines(&mut deliveries);
        assert_eq!(got.first(), Some(&Delivery::Line("Welcome to Duskhaven.".into())));
        assert!(got.contains(&Delivery::Line("By what name are you known?".into())));
    }

    #[tokio::test]
    async fn test_login_is_published_in_status() {
        // Arrange
        let (mut rt, status) = runtime();
        let (session, _deliveries) = open(&mut rt).await;

        // Act
        rt.handle(EngineEvent::Line {
            session,
            text: "Aria".into(),
        })
        .await;
        rt.flush();

        // Assert
        assert_eq!(status.borrow().online_actors, vec!["Aria".to_string()]);
        assert_eq!(status.borrow().sessions, 1);
    }

    #[tokio::test]
    async fn test_quit_sends_farewell_then_close() {
        // Arrange
        let (mut rt, _status) = runtime();
        let (session, mut deliveries) = open(&mut rt).await;
        rt.handle(EngineEvent::Line {
            session,
            text: "Aria".into(),
        })
        .await;
        rt.flush();
        lines(&mut deliveries);

        // Act
        rt.handle(EngineEvent::Line {
            session,
            text: "quit".into(),
        })
        .await;
        rt.flush();

        // Assert
        let got = lines(&mut deliveries);
        assert_eq!(got.first(), Some(&Delivery::Line("Farewell, Aria.".into())));
        assert_eq!(got.last(), Some(&Delivery::Close));
        assert!(rt.world().actor("Aria").is_none());
    }

    #[tokio::test]
    async fn test_closed_connection_frees_the_name() {
        // Arrange
        let (mut rt, status) = runtime();
        let (session, _deliveries) = open(&mut rt).await;
        rt.handle(EngineEvent::Line {
            session,
            text: "Aria".into(),
        })
        .await;

        // Act
        rt.handle(EngineEvent::Closed { session }).await;
        rt.flush();

        // Assert
        assert!(rt.world().sessions().bound_to("Aria").is_none());
        assert!(status.borrow().online_actors.is_empty());
    }

    #[tokio::test]
    async fn test_tick_advances_game_time() {
        // Arrange
        let (mut rt, status) = runtime();

        // Act
        rt.tick_to(2500);
        rt.flush();

        // Assert
        assert_eq!(rt.world().now_ms(), 2500);
        assert_eq!(status.borrow().virtual_time_ms, 2500);
    }
}
