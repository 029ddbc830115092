//! A small content pack shared by tests across the workspace.
//!
//! Layout:
//!
//! ```text
//!            woods (wolf)
//!              |
//!            gate (guard, sword)
//!              |
//! temple --> square (crier, rat, fountain, apple) -- market (potion, helm, amulet, ring, anvil)
//!              |
//!            sewer (missing)
//! ```

use duskhaven_content::application::pack::ContentPack;

/// YAML source of [`sample_pack`].
pub const SAMPLE_PACK_YAML: &str = r#"
rooms:
  - id: square
    title: Town Square
    description: A cobbled square around a dry fountain.
    exits:
      - { direction: north, destination: gate }
      - { direction: east, destination: market }
      - { direction: down, destination: sewer }
    items: [fountain, apple]
    mobiles: [crier, rat]
  - id: gate
    title: North Gate
    description: A squat gatehouse guards the road north.
    exits:
      - { direction: south, destination: square }
      - { direction: north, destination: woods }
    items: [sword]
    mobiles: [guard]
  - id: market
    title: Market Row
    description: Empty stalls line the street.
    exits:
      - { direction: west, destination: square }
    items: [potion, helm, amulet, ring, anvil]
  - id: woods
    title: Dark Woods
    description: Branches knit together overhead.
    exits:
      - { direction: south, destination: gate }
    mobiles: [wolf]
  - id: temple
    title: Temple of Rest
    description: Candles burn before a quiet altar.
    exits:
      - { direction: east, destination: square }

items:
  - id: fountain
    name: stone fountain
    description: Carved from a single block.
    metadata: { weight: 1000.0, flags: { fixed: true } }
  - id: apple
    name: red apple
    category: food
    metadata: { weight: 0.5, healing: 5 }
  - id: sword
    name: iron sword
    category: weapon
    metadata: { weight: 5.0, damage: 5, slot: weapon }
  - id: helm
    name: dented helm
    category: armor
    metadata: { weight: 3.0, defense: 2, slot: head }
  - id: potion
    name: healing potion
    category: potion
    metadata: { weight: 0.5, healing: 25 }
  - id: amulet
    name: bound amulet
    metadata: { weight: 0.2, flags: { nodrop: true } }
  - id: ring
    name: black ring
    metadata: { weight: 0.1, defense: 1, slot: ring, flags: { cursed: true } }
  - id: anvil
    name: iron anvil
    metadata: { weight: 150.0 }

mobiles:
  - id: crier
    name: town crier
    description: He clutches a brass bell.
    greeting: "Hear ye, {name}! All is well!"
    attributes: { health: 20 }
  - id: rat
    name: giant rat
    description: Its whiskers twitch.
    level: 2
    attributes: { health: 5 }
    respawn_ms: 60000
  - id: guard
    name: gate guard
    description: A bored soldier in a dented breastplate.
    level: 3
    attributes: { health: 50 }
    dialogue:
      nodes:
        default:
          message: Halt! State your business.
          responses:
            - text: I seek passage north.
              next: passage
            - text: Patch me up?
              action: { type: heal, amount: 10 }
            - text: Draw your blade!
              action: { type: behavior, name: attack }
        passage:
          message: The woods are no place for the unprepared. Take this.
          responses:
            - text: Thank you.
              action: { type: give_item, item: potion }
  - id: wolf
    name: grey wolf
    description: Lean and hungry.
    level: 2
    hostile: true
    attributes: { health: 30 }
    stats: { strength: 12, dexterity: 14 }
    damage: 2
    respawn_ms: 60000
"#;

/// Parses [`SAMPLE_PACK_YAML`].
///
/// # Panics
///
/// Panics if the embedded YAML is invalid.
#[must_use]
pub fn sample_pack() -> ContentPack {
    ContentPack::from_yaml_str(SAMPLE_PACK_YAML)
        .expect("sample pack must parse")
        .pack
}
