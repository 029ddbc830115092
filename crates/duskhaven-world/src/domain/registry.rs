//! Instantiates items and mobiles from templates and tracks live mobiles.

use std::collections::HashMap;
use std::sync::Arc;

use duskhaven_content::application::pack::ContentPack;
use duskhaven_content::domain::templates::MobileTemplate;
use duskhaven_core::error::DomainError;
use duskhaven_core::ids::{LocationId, MobileId};
use duskhaven_core::lookup::resolve;
use duskhaven_inventory::domain::item::Item;
use tracing::debug;

use super::graph::WorldGraph;
use super::mobile::Mobile;

/// Templates plus every live mobile. Item instances are owned by their
/// containers, so only mobiles are tracked here.
#[derive(Debug, Clone)]
pub struct EntityRegistry {
    templates: Arc<ContentPack>,
    mobiles: HashMap<MobileId, Mobile>,
}

impl EntityRegistry {
    #[must_use]
    pub fn new(templates: Arc<ContentPack>) -> Self {
        Self {
            templates,
            mobiles: HashMap::new(),
        }
    }

    #[must_use]
    pub fn templates(&self) -> &ContentPack {
        &self.templates
    }

    #[must_use]
    pub fn mobile_template(&self, id: &str) -> Option<&MobileTemplate> {
        self.templates.mobile(id)
    }

    /// Creates a fresh item instance.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::NotFound` if there is no such item template.
    pub fn create_item(&self, template_id: &str) -> Result<Item, DomainError> {
        self.templates
            .item(template_id)
            .map(Item::from_template)
            .ok_or_else(|| DomainError::NotFound(format!("item template {template_id}")))
    }

    /// Creates a mobile from its template and places it in `location`.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::NotFound` for an unknown template and
    /// `DomainError::Integrity` for an unknown location.
    pub fn spawn_mobile(
        &mut self,
        graph: &mut WorldGraph,
        template_id: &str,
        location: &LocationId,
    ) -> Result<MobileId, DomainError> {
        let template = self
            .templates
            .mobile(template_id)
            .ok_or_else(|| DomainError::NotFound(format!("mobile template {template_id}")))?;
        let room = graph.require_mut(location)?;
        let mobile = Mobile::from_template(template, location.clone());
        let id = mobile.id;
        room.mobiles.push(id);
        debug!(mobile = %id, template = template_id, location = %location, "mobile spawned");
        self.mobiles.insert(id, mobile);
        Ok(id)
    }

    /// Removes a mobile from the registry and from its location.
    pub fn remove_mobile(&mut self, graph: &mut WorldGraph, id: MobileId) -> Option<Mobile> {
        let mobile = self.mobiles.remove(&id)?;
        if let Some(room) = graph.get_mut(&mobile.location) {
            room.remove_mobile(id);
        }
        Some(mobile)
    }

    #[must_use]
    pub fn mobile(&self, id: MobileId) -> Option<&Mobile> {
        self.mobiles.get(&id)
    }

    pub fn mobile_mut(&mut self, id: MobileId) -> Option<&mut Mobile> {
        self.mobiles.get_mut(&id)
    }

    /// Live mobiles in `location`, in spawn order.
    #[must_use]
    pub fn mobiles_in<'a>(&'a self, graph: &'a WorldGraph, location: &LocationId) -> Vec<&'a Mobile> {
        graph
            .get(location)
            .map(|room| {
                room.mobiles
                    .iter()
                    .filter_map(|id| self.mobiles.get(id))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Finds a mobile in `location` by the shared lookup policy.
    #[must_use]
    pub fn find_mobile_in(
        &self,
        graph: &WorldGraph,
        location: &LocationId,
        query: &str,
    ) -> Option<MobileId> {
        let present = self.mobiles_in(graph, location);
        resolve(&present, query).map(|index| present[index].id)
    }

    /// Whether any live mobile was spawned from `template_id` in `location`.
    #[must_use]
    pub fn has_template_in(&self, graph: &WorldGraph, location: &LocationId, template_id: &str) -> bool {
        self.mobiles_in(graph, location)
            .iter()
            .any(|mobile| mobile.template_id == template_id)
    }

    #[must_use]
    pub fn live_mobiles(&self) -> usize {
        self.mobiles.len()
    }
}
