//! A node in the world graph.

use duskhaven_content::domain::templates::RoomTemplate;
use duskhaven_core::ids::{LocationId, MobileId};
use duskhaven_inventory::domain::item::Item;

use super::direction::normalize;

/// One exit out of a location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Exit {
    /// Normalized direction name.
    pub direction: String,
    pub destination: LocationId,
}

/// A location with its exits and current contents. Every content list keeps
/// insertion order, which is the order name lookup scans.
#[derive(Debug, Clone)]
pub struct Location {
    pub id: LocationId,
    pub title: String,
    pub description: String,
    pub exits: Vec<Exit>,
    /// Names of actors present.
    pub occupants: Vec<String>,
    pub items: Vec<Item>,
    pub mobiles: Vec<MobileId>,
}

impl Location {
    /// Builds an empty location from its template.
    #[must_use]
    pub fn from_template(template: &RoomTemplate) -> Self {
        Self {
            id: LocationId::new(template.id.clone()),
            title: template.title.clone(),
            description: template.description.clone(),
            exits: template
                .exits
                .iter()
                .map(|exit| Exit {
                    direction: normalize(&exit.direction),
                    destination: LocationId::new(exit.destination.clone()),
                })
                .collect(),
            occupants: Vec::new(),
            items: Vec::new(),
            mobiles: Vec::new(),
        }
    }

    /// The exit leading `direction`, if any.
    #[must_use]
    pub fn exit(&self, direction: &str) -> Option<&Exit> {
        let wanted = normalize(direction);
        self.exits.iter().find(|exit| exit.direction == wanted)
    }

    #[must_use]
    pub fn has_occupant(&self, name: &str) -> bool {
        self.occupants.iter().any(|occupant| occupant == name)
    }

    /// Adds an occupant once.
    pub fn add_occupant(&mut self, name: &str) {
        if !self.has_occupant(name) {
            self.occupants.push(name.to_owned());
        }
    }

    /// Removes an occupant. Returns whether it was present.
    pub fn remove_occupant(&mut self, name: &str) -> bool {
        let before = self.occupants.len();
        self.occupants.retain(|occupant| occupant != name);
        before != self.occupants.len()
    }

    /// Removes a mobile from the contents. Returns whether it was present.
    pub fn remove_mobile(&mut self, id: MobileId) -> bool {
        let before = self.mobiles.len();
        self.mobiles.retain(|mobile| *mobile != id);
        before != self.mobiles.len()
    }

    /// Comma-separated exit directions, or "none".
    #[must_use]
    pub fn exit_list(&self) -> String {
        if self.exits.is_empty() {
            return "none".to_owned();
        }
        self.exits
            .iter()
            .map(|exit| exit.direction.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}
