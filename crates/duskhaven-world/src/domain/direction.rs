//! Exit directions, abbreviations and opposites.

/// Expands the usual one- and two-letter abbreviations and lowercases the rest.
#[must_use]
pub fn normalize(direction: &str) -> String {
    let lowered = direction.trim().to_lowercase();
    let expanded = match lowered.as_str() {
        "n" => "north",
        "s" => "south",
        "e" => "east",
        "w" => "west",
        "u" => "up",
        "d" => "down",
        "ne" => "northeast",
        "nw" => "northwest",
        "se" => "southeast",
        "sw" => "southwest",
        other => other,
    };
    expanded.to_owned()
}

/// The direction an arriving actor came from, when it is a known one.
#[must_use]
pub fn opposite(direction: &str) -> Option<&'static str> {
    match normalize(direction).as_str() {
        "north" => Some("south"),
        "south" => Some("north"),
        "east" => Some("west"),
        "west" => Some("east"),
        "up" => Some("down"),
        "down" => Some("up"),
        "northeast" => Some("southwest"),
        "southwest" => Some("northeast"),
        "northwest" => Some("southeast"),
        "southeast" => Some("northwest"),
        _ => None,
    }
}

/// Line shown to the occupants of the destination.
#[must_use]
pub fn arrival_message(name: &str, direction: &str) -> String {
    match opposite(direction) {
        Some("up") => format!("{name} arrives from above."),
        Some("down") => format!("{name} arrives from below."),
        Some(from) => format!("{name} arrives from the {from}."),
        None => format!("{name} has arrived."),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opposites_are_symmetric() {
        for dir in [
            "north",
            "south",
            "east",
            "west",
            "up",
            "down",
            "northeast",
            "southwest",
            "northwest",
            "southeast",
        ] {
            let back = opposite(dir).unwrap();
            assert_eq!(opposite(back), Some(dir));
        }
    }

    #[test]
    fn test_unknown_direction_has_no_opposite() {
        assert_eq!(opposite("portal"), None);
        assert_eq!(arrival_message("Alice", "portal"), "Alice has arrived.");
    }

    #[test]
    fn test_arrival_mentions_reverse_direction() {
        assert_eq!(
            arrival_message("Alice", "north"),
            "Alice arrives from the south."
        );
        assert_eq!(arrival_message("Bob", "down"), "Bob arrives from above.");
    }

    #[test]
    fn test_normalize_expands_abbreviations() {
        assert_eq!(normalize("N"), "north");
        assert_eq!(normalize(" sw "), "southwest");
        assert_eq!(normalize("Portal"), "portal");
    }
}
