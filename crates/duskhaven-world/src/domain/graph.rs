//! The location graph.

use std::collections::BTreeMap;

use duskhaven_content::application::pack::ContentPack;
use duskhaven_core::error::DomainError;
use duskhaven_core::ids::LocationId;
use tracing::error;

use super::location::Location;

/// Every location in the world, keyed by id.
#[derive(Debug, Clone, Default)]
pub struct WorldGraph {
    locations: BTreeMap<LocationId, Location>,
}

impl WorldGraph {
    /// Builds empty locations for every room template.
    #[must_use]
    pub fn from_pack(pack: &ContentPack) -> Self {
        let locations = pack
            .rooms
            .iter()
            .map(|room| {
                let location = Location::from_template(room);
                (location.id.clone(), location)
            })
            .collect();
        Self { locations }
    }

    pub fn insert(&mut self, location: Location) {
        self.locations.insert(location.id.clone(), location);
    }

    #[must_use]
    pub fn get(&self, id: &LocationId) -> Option<&Location> {
        self.locations.get(id)
    }

    pub fn get_mut(&mut self, id: &LocationId) -> Option<&mut Location> {
        self.locations.get_mut(id)
    }

    #[must_use]
    pub fn contains(&self, id: &LocationId) -> bool {
        self.locations.contains_key(id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.locations.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.locations.is_empty()
    }

    /// Like [`Self::get`], for ids that must resolve.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Integrity` if the location does not exist.
    pub fn require(&self, id: &LocationId) -> Result<&Location, DomainError> {
        self.get(id)
            .ok_or_else(|| DomainError::Integrity(format!("location {id} does not exist")))
    }

    /// Mutable form of [`Self::require`].
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Integrity` if the location does not exist.
    pub fn require_mut(&mut self, id: &LocationId) -> Result<&mut Location, DomainError> {
        self.locations
            .get_mut(id)
            .ok_or_else(|| DomainError::Integrity(format!("location {id} does not exist")))
    }

    /// Resolves the destination of the exit leading `direction` from `from`.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Rejected` when there is no such exit, and
    /// `DomainError::Integrity` (logged) when the exit leads to a location
    /// that does not exist.
    pub fn destination(&self, from: &LocationId, direction: &str) -> Result<LocationId, DomainError> {
        let origin = self.require(from)?;
        let exit = origin
            .exit(direction)
            .ok_or_else(|| DomainError::rejected("You can't go that way."))?;
        if !self.contains(&exit.destination) {
            error!(
                location = %from,
                direction = %exit.direction,
                destination = %exit.destination,
                "exit leads to a missing location"
            );
            return Err(DomainError::Integrity(format!(
                "exit {} from {from} leads to missing location {}",
                exit.direction, exit.destination
            )));
        }
        Ok(exit.destination.clone())
    }

    /// Every actor present in `location`, in arrival order.
    #[must_use]
    pub fn broadcast_targets(&self, location: &LocationId) -> Vec<String> {
        self.get(location)
            .map(|loc| loc.occupants.clone())
            .unwrap_or_default()
    }

    /// Actors in `location` other than `except`.
    #[must_use]
    pub fn others_in(&self, location: &LocationId, except: &str) -> Vec<String> {
        self.broadcast_targets(location)
            .into_iter()
            .filter(|name| name != except)
            .collect()
    }
}
