//! Content packs: a full set of room, item and mobile templates.
//!
//! A pack is usually read from a YAML document with top-level `rooms`,
//! `items` and `mobiles` lists. Structural problems that make the world
//! unbuildable (duplicate ids, no rooms) are errors; dangling references are
//! reported as issues and tolerated, since the engine handles them at
//! runtime (an exit to a missing room blocks movement).

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use thiserror::Error;
use tracing::{info, warn};

use crate::domain::dialogue::DEFAULT_NODE;
use crate::domain::templates::{ItemTemplate, MobileTemplate, RoomTemplate};

/// Errors raised while reading a content pack.
#[derive(Debug, Error)]
pub enum ContentError {
    /// The pack file could not be read.
    #[error("failed to read content pack: {0}")]
    Io(#[from] std::io::Error),

    /// The pack is not valid YAML or does not match the template schema.
    #[error("failed to parse content pack: {0}")]
    Parse(#[from] serde_yaml::Error),

    /// The pack parsed but cannot produce a world.
    #[error("invalid content pack: {0}")]
    Invalid(String),
}

/// A non-fatal problem found in a pack.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentIssue {
    /// An exit names a room that does not exist.
    UnknownExitDestination {
        /// Room holding the exit.
        room: String,
        /// Exit direction.
        direction: String,
        /// Missing destination id.
        destination: String,
    },
    /// A room lists an item template that does not exist.
    UnknownItem {
        /// Room listing the item.
        room: String,
        /// Missing template id.
        item: String,
    },
    /// A room lists a mobile template that does not exist.
    UnknownMobile {
        /// Room listing the mobile.
        room: String,
        /// Missing template id.
        mobile: String,
    },
    /// A dialogue response points at a node that does not exist.
    DanglingDialogueNode {
        /// Mobile owning the tree.
        mobile: String,
        /// Missing node id.
        node: String,
    },
    /// A dialogue tree has no `default` node.
    MissingDefaultNode {
        /// Mobile owning the tree.
        mobile: String,
    },
}

/// All templates that make up a world.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContentPack {
    /// Room templates.
    pub rooms: Vec<RoomTemplate>,
    /// Item templates.
    pub items: Vec<ItemTemplate>,
    /// Mobile templates.
    pub mobiles: Vec<MobileTemplate>,
}

/// A pack together with the digest of the source it was read from.
#[derive(Debug, Clone)]
pub struct LoadedPack {
    /// The parsed templates.
    pub pack: ContentPack,
    /// Hex SHA-256 of the source text.
    pub digest: String,
    /// Non-fatal problems found during validation.
    pub issues: Vec<ContentIssue>,
}

impl ContentPack {
    /// Parses a pack from YAML text and validates it.
    ///
    /// # Errors
    ///
    /// Returns `ContentError::Parse` for malformed YAML and
    /// `ContentError::Invalid` for structural problems.
    pub fn from_yaml_str(source: &str) -> Result<LoadedPack, ContentError> {
        let pack: Self = serde_yaml::from_str(source)?;
        let issues = pack.validate()?;
        Ok(LoadedPack {
            pack,
            digest: digest(source),
            issues,
        })
    }

    /// Reads, parses and validates a pack file, logging any issues.
    ///
    /// # Errors
    ///
    /// Returns `ContentError` if the file cannot be read, parsed, or built.
    pub fn load_file(path: &Path) -> Result<LoadedPack, ContentError> {
        let source = std::fs::read_to_string(path)?;
        let loaded = Self::from_yaml_str(&source)?;
        for issue in &loaded.issues {
            warn!(path = %path.display(), ?issue, "content pack issue");
        }
        info!(
            path = %path.display(),
            digest = %loaded.digest,
            rooms = loaded.pack.rooms.len(),
            items = loaded.pack.items.len(),
            mobiles = loaded.pack.mobiles.len(),
            "content pack loaded"
        );
        Ok(loaded)
    }

    /// Checks the pack. Fatal problems are returned as an error; tolerated
    /// problems are returned as a list.
    ///
    /// # Errors
    ///
    /// Returns `ContentError::Invalid` if the pack has no rooms or reuses an
    /// id within one template kind.
    pub fn validate(&self) -> Result<Vec<ContentIssue>, ContentError> {
        if self.rooms.is_empty() {
            return Err(ContentError::Invalid("pack defines no rooms".into()));
        }
        let room_ids = unique_ids("room", self.rooms.iter().map(|r| r.id.as_str()))?;
        let item_ids = unique_ids("item", self.items.iter().map(|i| i.id.as_str()))?;
        let mobile_ids = unique_ids("mobile", self.mobiles.iter().map(|m| m.id.as_str()))?;

        let mut issues = Vec::new();
        for room in &self.rooms {
            for exit in &room.exits {
                if !room_ids.contains(exit.destination.as_str()) {
                    issues.push(ContentIssue::UnknownExitDestination {
                        room: room.id.clone(),
                        direction: exit.direction.clone(),
                        destination: exit.destination.clone(),
                    });
                }
            }
            for item in &room.items {
                if !item_ids.contains(item.as_str()) {
                    issues.push(ContentIssue::UnknownItem {
                        room: room.id.clone(),
                        item: item.clone(),
                    });
                }
            }
            for mobile in &room.mobiles {
                if !mobile_ids.contains(mobile.as_str()) {
                    issues.push(ContentIssue::UnknownMobile {
                        room: room.id.clone(),
                        mobile: mobile.clone(),
                    });
                }
            }
        }
        for mobile in &self.mobiles {
            let Some(tree) = &mobile.dialogue else {
                continue;
            };
            if tree.node(DEFAULT_NODE).is_none() {
                issues.push(ContentIssue::MissingDefaultNode {
                    mobile: mobile.id.clone(),
                });
            }
            for node in tree.dangling_references() {
                issues.push(ContentIssue::DanglingDialogueNode {
                    mobile: mobile.id.clone(),
                    node,
                });
            }
        }
        Ok(issues)
    }

    /// Finds an item template by id.
    #[must_use]
    pub fn item(&self, id: &str) -> Option<&ItemTemplate> {
        self.items.iter().find(|t| t.id == id)
    }

    /// Finds a mobile template by id.
    #[must_use]
    pub fn mobile(&self, id: &str) -> Option<&MobileTemplate> {
        self.mobiles.iter().find(|t| t.id == id)
    }
}

fn unique_ids<'a>(
    kind: &str,
    ids: impl Iterator<Item = &'a str>,
) -> Result<HashSet<&'a str>, ContentError> {
    let mut seen = HashSet::new();
    for id in ids {
        if !seen.insert(id) {
            return Err(ContentError::Invalid(format!("duplicate {kind} id: {id}")));
        }
    }
    Ok(seen)
}

/// Hex SHA-256 of a pack's source text.
#[must_use]
pub fn digest(source: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(source.as_bytes());
    format!("{:x}", hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;

    const PACK: &str = r#"
rooms:
  - id: square
    title: Town Square
    description: A cobbled square.
    exits:
      - { direction: north, destination: tavern }
      - { direction: down, destination: sewer }
    items: [lantern, ghost_item]
    mobiles: [rat]
  - id: tavern
    title: The Tavern
    exits:
      - { direction: south, destination: square }
items:
  - id: lantern
    name: brass lantern
    category: misc
    metadata: { weight: 2.0, flags: { fixed: true } }
mobiles:
  - id: rat
    name: sewer rat
    level: 1
    attributes: { health: 5, max_health: 5 }
    respawn_ms: 60000
    dialogue:
      nodes:
        greeting:
          message: "Squeak."
"#;

    #[test]
    fn test_from_yaml_str_parses_templates() {
        // Act
        let loaded = ContentPack::from_yaml_str(PACK).unwrap();

        // Assert
        assert_eq!(loaded.pack.rooms.len(), 2);
        assert_eq!(loaded.pack.rooms[0].exits[0].destination, "tavern");
        assert!(loaded.pack.item("lantern").unwrap().metadata.flags.fixed);
        assert_eq!(loaded.pack.mobile("rat").unwrap().respawn_ms, Some(60_000));
        assert_eq!(loaded.digest.len(), 64);
    }

    #[test]
    fn test_validate_reports_dangling_references_as_issues() {
        let loaded = ContentPack::from_yaml_str(PACK).unwrap();

        assert!(loaded.issues.contains(&ContentIssue::UnknownExitDestination {
            room: "square".into(),
            direction: "down".into(),
            destination: "sewer".into(),
        }));
        assert!(loaded.issues.contains(&ContentIssue::UnknownItem {
            room: "square".into(),
            item: "ghost_item".into(),
        }));
        assert!(loaded.issues.contains(&ContentIssue::MissingDefaultNode {
            mobile: "rat".into(),
        }));
    }

    #[test]
    fn test_validate_rejects_duplicate_room_ids() {
        let source = r"
rooms:
  - { id: a, title: A }
  - { id: a, title: Also A }
";
        let err = ContentPack::from_yaml_str(source).unwrap_err();

        match err {
            ContentError::Invalid(msg) => assert!(msg.contains("duplicate room id: a")),
            other => panic!("expected Invalid, got {other:?}"),
        }
    }

    #[test]
    fn test_validate_rejects_empty_pack() {
        let err = ContentPack::from_yaml_str("items: []").unwrap_err();
        assert!(matches!(err, ContentError::Invalid(_)));
    }

    #[test]
    fn test_malformed_yaml_is_parse_error() {
        let err = ContentPack::from_yaml_str("rooms: [ { id: ").unwrap_err();
        assert!(matches!(err, ContentError::Parse(_)));
    }

    #[test]
    fn test_digest_is_stable() {
        assert_eq!(digest("abc"), digest("abc"));
        assert_ne!(digest("abc"), digest("abd"));
    }
}
