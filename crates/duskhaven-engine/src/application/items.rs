//! Item verbs: carrying, wearing, using and inspecting things.

use duskhaven_content::domain::templates::EquipSlot;
use duskhaven_core::error::DomainError;
use duskhaven_core::ids::SessionId;
use duskhaven_core::lookup::resolve;
use duskhaven_inventory::domain::equipment::{equip, unequip};
use duskhaven_inventory::domain::inventory::{drop_into, take_from};
use duskhaven_inventory::domain::item::{Item, ItemAction};
use tracing::{debug, instrument};

use super::world::GameWorld;

fn require_query<'a>(query: &'a str, verb: &str) -> Result<&'a str, DomainError> {
    let query = query.trim();
    if query.is_empty() {
        return Err(DomainError::rejected(format!("{verb} what?")));
    }
    Ok(query)
}

fn describe_item(item: &Item) -> Vec<String> {
    let meta = &item.metadata;
    let mut lines = vec![item.name.clone()];
    if !item.description.is_empty() {
        lines.push(item.description.clone());
    }
    let mut facts = vec![format!("weight {}", meta.weight)];
    if meta.damage != 0 {
        facts.push(format!("damage {}", meta.damage));
    }
    if meta.defense != 0 {
        facts.push(format!("defense {}", meta.defense));
    }
    if meta.healing != 0 {
        facts.push(format!("healing {}", meta.healing));
    }
    if let Some(slot) = meta.slot {
        facts.push(format!("worn as {slot}"));
    }
    lines.push(format!("({})", facts.join(", ")));
    lines
}

impl GameWorld {
    /// Picks up an item from the actor's location.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Rejected` if the item is not here, the actor
    /// cannot carry it, or it is fixed in place.
    #[instrument(skip(self), fields(session = %session))]
    pub fn take(&mut self, session: SessionId, query: &str) -> Result<(), DomainError> {
        let name = self.playing_actor(session)?;
        let query = require_query(query, "Take")?;
        let actor = self
            .actors
            .get_mut(&name)
            .ok_or_else(|| DomainError::NotFound(format!("actor {name}")))?;
        let room = self.graph.require_mut(&actor.location)?;
        let item = take_from(&mut room.items, &mut actor.inventory, query, &self.config.limits)?;
        let location = actor.location.clone();
        debug!(actor = %name, item = %item.template_id, "item taken");

        self.tell(&name, format!("You take the {}.", item.name));
        self.tell_room(&location, &format!("{name} takes the {}.", item.name), Some(&name));
        self.save_actor(&name);
        Ok(())
    }

    /// Puts a carried item down in the actor's location.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Rejected` if the item is not carried or may not
    /// be dropped.
    #[instrument(skip(self), fields(session = %session))]
    pub fn drop_item(&mut self, session: SessionId, query: &str) -> Result<(), DomainError> {
        let name = self.playing_actor(session)?;
        let query = require_query(query, "Drop")?;
        let actor = self
            .actors
            .get_mut(&name)
            .ok_or_else(|| DomainError::NotFound(format!("actor {name}")))?;
        let room = self.graph.require_mut(&actor.location)?;
        let item = drop_into(&mut actor.inventory, &mut room.items, query)?;
        let location = actor.location.clone();
        debug!(actor = %name, item = %item.template_id, "item dropped");

        self.tell(&name, format!("You drop the {}.", item.name));
        self.tell_room(&location, &format!("{name} drops the {}.", item.name), Some(&name));
        self.save_actor(&name);
        Ok(())
    }

    /// Moves a carried item into its equipment slot.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Rejected` if the item is not carried, has no
    /// slot, or the slot is taken.
    pub fn equip(&mut self, session: SessionId, query: &str) -> Result<(), DomainError> {
        let name = self.playing_actor(session)?;
        let query = require_query(query, "Equip")?;
        let actor = self.online_mut(&name)?;
        let item = equip(&mut actor.inventory, &mut actor.equipment, query)?;
        let line = if item.slot() == Some(EquipSlot::Weapon) {
            format!("You wield the {}.", item.name)
        } else {
            format!("You wear the {}.", item.name)
        };
        self.tell(&name, line);
        self.save_actor(&name);
        Ok(())
    }

    /// Moves an equipped item, named or by slot, back into the inventory.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Rejected` if nothing matches, the item is cursed,
    /// or the inventory is full.
    pub fn unequip(&mut self, session: SessionId, query: &str) -> Result<(), DomainError> {
        let name = self.playing_actor(session)?;
        let query = require_query(query, "Remove")?;
        let limits = self.config.limits;
        let actor = self.online_mut(&name)?;
        let item = unequip(&mut actor.inventory, &mut actor.equipment, query, &limits)?;
        self.tell(&name, format!("You remove the {}.", item.name));
        self.save_actor(&name);
        Ok(())
    }

    /// Uses a carried item. Consumables are destroyed; healing applies to
    /// the actor.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Rejected` if the item is not carried or cannot
    /// be used.
    pub fn use_item(&mut self, session: SessionId, query: &str) -> Result<(), DomainError> {
        let name = self.playing_actor(session)?;
        let query = require_query(query, "Use")?;
        let actor = self.online_mut(&name)?;
        let item = actor
            .inventory
            .find(query)
            .ok_or_else(|| DomainError::rejected("You aren't carrying that."))?;
        item.check(ItemAction::Use)?;
        let (item_name, healing, consumed) = (
            item.name.clone(),
            item.metadata.healing,
            item.category.is_consumable(),
        );
        if consumed {
            actor.inventory.remove(query);
        }
        let restored = actor.attributes.heal(healing);
        let (health, max_health) = (actor.attributes.health, actor.attributes.max_health);

        self.tell(
            &name,
            format!("You use the {item_name} and recover {restored} health. ({health}/{max_health})"),
        );
        if consumed {
            self.tell(&name, format!("The {item_name} is gone."));
        }
        self.save_actor(&name);
        Ok(())
    }

    /// Lists carried and equipped items.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Rejected` if the session is not playing.
    pub fn inventory(&mut self, session: SessionId) -> Result<(), DomainError> {
        let name = self.playing_actor(session)?;
        let limits = self.config.limits;
        let actor = self.online(&name)?;

        let mut lines = Vec::new();
        if actor.inventory.is_empty() {
            lines.push("You are carrying nothing.".to_owned());
        } else {
            lines.push("You are carrying:".to_owned());
            lines.extend(actor.inventory.items().iter().map(|item| format!("  {}", item.name)));
        }
        if !actor.equipment.is_empty() {
            lines.push("You are using:".to_owned());
            lines.extend(
                actor
                    .equipment
                    .iter()
                    .map(|(slot, item)| format!("  {slot}: {}", item.name)),
            );
        }
        lines.push(format!(
            "Items {}/{}  Weight {:.1}/{:.1}",
            actor.inventory.len(),
            limits.max_items,
            actor.inventory.total_weight(),
            limits.max_weight
        ));
        for line in lines {
            self.send(session, line);
        }
        Ok(())
    }

    /// Shows the actor's vitals and progress.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Rejected` if the session is not playing.
    pub fn score(&mut self, session: SessionId) -> Result<(), DomainError> {
        let name = self.playing_actor(session)?;
        let line = self.online(&name)?.status_line();
        self.send(session, line);
        Ok(())
    }

    /// Describes something the actor can see: carried or worn items first,
    /// then items on the ground, then creatures and other actors here.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Rejected` if nothing matches.
    pub fn examine(&mut self, session: SessionId, query: &str) -> Result<(), DomainError> {
        let name = self.playing_actor(session)?;
        let query = require_query(query, "Examine")?;
        let actor = self.online(&name)?;
        let room = self.graph.require(&actor.location)?;

        let worn: Vec<&Item> = actor.equipment.iter().map(|(_, item)| item).collect();
        let lines = if let Some(item) = actor.inventory.find(query) {
            describe_item(item)
        } else if let Some(index) = resolve(&worn, query) {
            describe_item(worn[index])
        } else if let Some(index) = resolve(&room.items, query) {
            describe_item(&room.items[index])
        } else if let Some(mobile) = self
            .entities
            .find_mobile_in(&self.graph, &actor.location, query)
            .and_then(|id| self.entities.mobile(id))
        {
            let a = &mobile.attributes;
            vec![
                mobile.name.clone(),
                mobile.description.clone(),
                format!(
                    "Level {}. Health {}/{}.{}",
                    mobile.stats.level,
                    a.health,
                    a.max_health,
                    if mobile.combat.is_active() { " It is fighting." } else { "" }
                ),
            ]
        } else if let Some(other) = room
            .occupants
            .iter()
            .filter(|other| **other != name)
            .find(|other| other.eq_ignore_ascii_case(query))
            .and_then(|other| self.actors.get(other))
        {
            vec![format!("{} is a level {} adventurer.", other.name, other.stats.level)]
        } else {
            return Err(DomainError::rejected("You don't see that here."));
        };

        for line in lines {
            self.send(session, line);
        }
        Ok(())
    }
}
