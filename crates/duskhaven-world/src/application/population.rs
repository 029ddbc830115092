//! Builds a populated world from a content pack.

use std::sync::Arc;

use duskhaven_content::application::pack::ContentPack;
use duskhaven_core::error::DomainError;
use duskhaven_core::ids::LocationId;
use tracing::{info, warn};

use crate::domain::graph::WorldGraph;
use crate::domain::registry::EntityRegistry;

/// Creates every location and instantiates each room's listed items and
/// mobiles in listed order. Unknown template references are skipped with a
/// warning.
///
/// # Errors
///
/// Returns `DomainError::Integrity` if the pack has no rooms.
pub fn populate_world(pack: Arc<ContentPack>) -> Result<(WorldGraph, EntityRegistry), DomainError> {
    if pack.rooms.is_empty() {
        return Err(DomainError::Integrity("content pack has no rooms".to_owned()));
    }

    let mut graph = WorldGraph::from_pack(&pack);
    let mut registry = EntityRegistry::new(Arc::clone(&pack));
    let mut items = 0_usize;

    for room in &pack.rooms {
        let location = LocationId::new(room.id.clone());
        for template_id in &room.items {
            match registry.create_item(template_id) {
                Ok(item) => {
                    graph.require_mut(&location)?.items.push(item);
                    items += 1;
                }
                Err(err) => warn!(room = %location, item = %template_id, error = %err, "skipping item"),
            }
        }
        for template_id in &room.mobiles {
            if let Err(err) = registry.spawn_mobile(&mut graph, template_id, &location) {
                warn!(room = %location, mobile = %template_id, error = %err, "skipping mobile");
            }
        }
    }

    info!(
        locations = graph.len(),
        items,
        mobiles = registry.live_mobiles(),
        "world populated"
    );
    Ok((graph, registry))
}
