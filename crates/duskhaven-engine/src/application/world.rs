//! The `GameWorld` context: every registry one world needs, owned in one
//! place and mutated by one logical thread.

use std::collections::HashMap;
use std::sync::Arc;

use duskhaven_character::application::persistence::PersistenceGateway;
use duskhaven_character::domain::actor::Actor;
use duskhaven_content::application::pack::ContentPack;
use duskhaven_core::clock::Clock;
use duskhaven_core::error::DomainError;
use duskhaven_core::ids::{LocationId, SessionId};
use duskhaven_core::rng::DeterministicRng;
use duskhaven_core::scheduler::Scheduler;
use duskhaven_session::domain::registry::SessionRegistry;
use duskhaven_world::application::population::populate_world;
use duskhaven_world::domain::graph::WorldGraph;
use duskhaven_world::domain::registry::EntityRegistry;
use serde::Serialize;
use tracing::{debug, info};

use crate::domain::config::EngineConfig;
use crate::domain::outbox::{Outbox, Outgoing};
use crate::domain::task::WorldTask;

/// Snapshot of a world for operators.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct WorldStatus {
    pub sessions: usize,
    pub online_actors: Vec<String>,
    pub locations: usize,
    pub live_mobiles: usize,
    pub pending_tasks: usize,
    pub virtual_time_ms: u64,
}

/// One authoritative world. Independent worlds share nothing.
pub struct GameWorld {
    pub(crate) config: EngineConfig,
    pub(crate) graph: WorldGraph,
    pub(crate) entities: EntityRegistry,
    pub(crate) actors: HashMap<String, Actor>,
    pub(crate) sessions: SessionRegistry,
    pub(crate) scheduler: Scheduler<WorldTask>,
    pub(crate) persistence: PersistenceGateway,
    pub(crate) outbox: Outbox,
    pub(crate) clock: Arc<dyn Clock>,
    pub(crate) rng: Box<dyn DeterministicRng>,
}

impl std::fmt::Debug for GameWorld {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GameWorld")
            .field("locations", &self.graph.len())
            .field("actors", &self.actors.len())
            .field("sessions", &self.sessions.len())
            .field("now_ms", &self.scheduler.now_ms())
            .finish_non_exhaustive()
    }
}

impl GameWorld {
    /// Builds and populates a world from `pack`.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Integrity` if the pack has no rooms or the
    /// configured start or safe location does not exist.
    pub fn new(
        config: EngineConfig,
        pack: Arc<ContentPack>,
        persistence: PersistenceGateway,
        clock: Arc<dyn Clock>,
        rng: Box<dyn DeterministicRng>,
    ) -> Result<Self, DomainError> {
        let (graph, entities) = populate_world(pack)?;
        for (role, id) in [
            ("start", &config.start_location),
            ("safe", &config.safe_location),
        ] {
            if !graph.contains(id) {
                return Err(DomainError::Integrity(format!(
                    "{role} location {id} does not exist"
                )));
            }
        }
        info!(
            start = %config.start_location,
            safe = %config.safe_location,
            "game world ready"
        );
        Ok(Self {
            config,
            graph,
            entities,
            actors: HashMap::new(),
            sessions: SessionRegistry::new(),
            scheduler: Scheduler::new(),
            persistence,
            outbox: Outbox::new(),
            clock,
            rng,
        })
    }

    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    #[must_use]
    pub fn graph(&self) -> &WorldGraph {
        &self.graph
    }

    #[must_use]
    pub fn entities(&self) -> &EntityRegistry {
        &self.entities
    }

    #[must_use]
    pub fn sessions(&self) -> &SessionRegistry {
        &self.sessions
    }

    /// The online actor called `name`.
    #[must_use]
    pub fn actor(&self, name: &str) -> Option<&Actor> {
        self.actors.get(name)
    }

    pub fn actor_mut(&mut self, name: &str) -> Option<&mut Actor> {
        self.actors.get_mut(name)
    }

    /// Current virtual time.
    #[must_use]
    pub fn now_ms(&self) -> u64 {
        self.scheduler.now_ms()
    }

    #[must_use]
    pub fn pending_tasks(&self) -> usize {
        self.scheduler.pending()
    }

    /// Whether any queued task matches `predicate`.
    pub fn has_task(&self, predicate: impl FnMut(&WorldTask) -> bool) -> bool {
        self.scheduler.any(predicate)
    }

    #[must_use]
    pub fn status(&self) -> WorldStatus {
        let mut online_actors: Vec<String> = self.actors.keys().cloned().collect();
        online_actors.sort();
        WorldStatus {
            sessions: self.sessions.len(),
            online_actors,
            locations: self.graph.len(),
            live_mobiles: self.entities.live_mobiles(),
            pending_tasks: self.scheduler.pending(),
            virtual_time_ms: self.scheduler.now_ms(),
        }
    }

    /// Everything queued for delivery, oldest first.
    pub fn drain_outbox(&mut self) -> Vec<Outgoing> {
        self.outbox.drain()
    }

    /// Lines queued for one session, leaving other deliveries in place.
    pub fn take_lines(&mut self, session: SessionId) -> Vec<String> {
        self.outbox.take_lines(session)
    }

    /// Records input activity on `session`.
    pub fn touch(&mut self, session: SessionId) {
        self.sessions.touch(session, self.scheduler.now_ms());
    }

    /// Runs every task due up to `target_ms`, each at its own fire time,
    /// then moves the clock to `target_ms`.
    pub fn advance_to(&mut self, target_ms: u64) {
        while let Some(task) = self.scheduler.pop_due(target_ms) {
            self.run_task(task);
        }
        self.scheduler.advance_to(target_ms);
    }

    pub fn advance_by(&mut self, delta_ms: u64) {
        self.advance_to(self.scheduler.now_ms().saturating_add(delta_ms));
    }

    fn run_task(&mut self, task: WorldTask) {
        debug!(?task, now_ms = self.scheduler.now_ms(), "running task");
        match task {
            WorldTask::CombatTurn { attacker, defender } => self.resolve_turn(&attacker, &defender),
            WorldTask::Respawn {
                template_id,
                location,
            } => self.respawn(&template_id, &location),
            WorldTask::ShowLocation { actor } => self.show_revival(&actor),
            WorldTask::DialogueContinue { actor, mobile, node } => {
                self.continue_dialogue(&actor, &mobile, &node);
            }
            WorldTask::Aggro { mobile, actor } => self.aggro(mobile, &actor),
        }
    }

    // --- output ---

    /// Queues one line for `session`.
    pub fn send(&mut self, session: SessionId, text: impl Into<String>) {
        self.outbox.line(session, text);
    }

    /// Sends to the session bound to `name`. Offline actors hear nothing.
    pub(crate) fn tell(&mut self, name: &str, text: impl Into<String>) {
        if let Some(session) = self.sessions.bound_to(name) {
            self.outbox.line(session, text);
        }
    }

    /// Sends to every actor in `location` except `except`.
    pub(crate) fn tell_room(&mut self, location: &LocationId, text: &str, except: Option<&str>) {
        let targets = self.graph.broadcast_targets(location);
        for name in targets.iter().filter(|name| Some(name.as_str()) != except) {
            self.tell(name, text);
        }
    }

    // --- lookups ---

    /// Name of the actor bound to `session`.
    pub(crate) fn playing_actor(&self, session: SessionId) -> Result<String, DomainError> {
        self.sessions
            .actor_of(session)
            .map(str::to_owned)
            .ok_or_else(|| DomainError::rejected("You must choose a name first."))
    }

    pub(crate) fn online(&self, name: &str) -> Result<&Actor, DomainError> {
        self.actors
            .get(name)
            .ok_or_else(|| DomainError::NotFound(format!("actor {name}")))
    }

    pub(crate) fn online_mut(&mut self, name: &str) -> Result<&mut Actor, DomainError> {
        self.actors
            .get_mut(name)
            .ok_or_else(|| DomainError::NotFound(format!("actor {name}")))
    }

    /// Queues a snapshot of the named actor for writing.
    pub(crate) fn save_actor(&self, name: &str) {
        if let Some(actor) = self.actors.get(name) {
            self.persistence.save(actor);
        }
    }

    /// The description of `location` as seen by `viewer`.
    pub(crate) fn describe(&self, location: &LocationId, viewer: &str) -> Result<Vec<String>, DomainError> {
        let room = self.graph.require(location)?;
        let mut lines = vec![
            room.title.clone(),
            room.description.clone(),
            format!("Exits: {}", room.exit_list()),
        ];
        if !room.items.is_empty() {
            let names: Vec<&str> = room.items.iter().map(|item| item.name.as_str()).collect();
            lines.push(format!("Items: {}", names.join(", ")));
        }
        let mobiles = self.entities.mobiles_in(&self.graph, location);
        if !mobiles.is_empty() {
            let names: Vec<&str> = mobiles.iter().map(|mobile| mobile.name.as_str()).collect();
            lines.push(format!("Creatures: {}", names.join(", ")));
        }
        let others = self.graph.others_in(location, viewer);
        if !others.is_empty() {
            lines.push(format!("Also here: {}", others.join(", ")));
        }
        Ok(lines)
    }

    /// Sends the actor's current location to them.
    pub(crate) fn show_location(&mut self, name: &str) -> Result<(), DomainError> {
        let location = self.online(name)?.location.clone();
        for line in self.describe(&location, name)? {
            self.tell(name, line);
        }
        Ok(())
    }
}
