//! Turns a line of player input into a verb operation on the world.

use duskhaven_core::error::DomainError;
use duskhaven_core::ids::SessionId;
use duskhaven_engine::application::world::GameWorld;
use tracing::{debug, error};

/// Lines sent in answer to `help`.
pub const HELP: &[&str] = &[
    "Commands:",
    "  look, examine <thing>, score, inventory (i), who",
    "  north/south/east/west/up/down (n, s, e, w, u, d, ne, nw, se, sw), go <direction>",
    "  take <item>, drop <item>, equip <item>, unequip <item or slot>, use <item>",
    "  attack <creature>, talk <creature>, respond <number>",
    "  say <message>, quit",
];

/// A parsed line of input. Arguments borrow from the line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command<'a> {
    Move(&'a str),
    Look,
    Take(&'a str),
    Drop(&'a str),
    Equip(&'a str),
    Unequip(&'a str),
    Use(&'a str),
    Inventory,
    Examine(&'a str),
    Attack(&'a str),
    Talk(&'a str),
    Respond(&'a str),
    Say(&'a str),
    Who,
    Score,
    Help,
    Quit,
    Empty,
    Unknown(&'a str),
}

const DIRECTION_WORDS: &[&str] = &[
    "n", "s", "e", "w", "u", "d", "ne", "nw", "se", "sw", "north", "south", "east", "west",
    "up", "down", "northeast", "northwest", "southeast", "southwest",
];

impl<'a> Command<'a> {
    /// Splits `line` into a verb and its argument. Verbs are case-insensitive.
    #[must_use]
    pub fn parse(line: &'a str) -> Self {
        let line = line.trim();
        if line.is_empty() {
            return Self::Empty;
        }
        let (verb, rest) = line
            .split_once(char::is_whitespace)
            .map_or((line, ""), |(verb, rest)| (verb, rest.trim()));
        let lowered = verb.to_ascii_lowercase();

        if DIRECTION_WORDS.contains(&lowered.as_str()) {
            return Self::Move(verb);
        }
        match lowered.as_str() {
            "go" | "move" | "walk" => Self::Move(rest),
            "look" | "l" => Self::Look,
            "take" | "get" => Self::Take(rest),
            "drop" => Self::Drop(rest),
            "equip" | "wield" | "wear" => Self::Equip(rest),
            "unequip" | "remove" => Self::Unequip(rest),
            "use" | "eat" | "drink" => Self::Use(rest),
            "inventory" | "inv" | "i" => Self::Inventory,
            "examine" | "x" => Self::Examine(rest),
            "attack" | "kill" | "k" => Self::Attack(rest),
            "talk" => Self::Talk(rest),
            "respond" | "r" => Self::Respond(rest),
            "say" => Self::Say(rest),
            "who" => Self::Who,
            "score" | "sc" => Self::Score,
            "help" | "?" => Self::Help,
            "quit" | "exit" => Self::Quit,
            _ => Self::Unknown(verb),
        }
    }
}

/// Feeds one line from `session` into the world. A session still choosing
/// a name gets the login flow; a playing session gets a verb. Failures are
/// reported to the session and never escape.
pub async fn dispatch(world: &mut GameWorld, session: SessionId, line: &str) {
    let Some(playing) = world.sessions().get(session).map(|s| s.is_playing()) else {
        debug!(session = %session, "line for unknown session dropped");
        return;
    };
    world.touch(session);
    if !playing {
        world.handle_login_line(session, line).await;
        return;
    }

    let command = Command::parse(line);
    let result = match command {
        Command::Move(direction) => world.move_actor(session, direction),
        Command::Look => world.look(session),
        Command::Take(query) => world.take(session, query),
        Command::Drop(query) => world.drop_item(session, query),
        Command::Equip(query) => world.equip(session, query),
        Command::Unequip(query) => world.unequip(session, query),
        Command::Use(query) => world.use_item(session, query),
        Command::Inventory => world.inventory(session),
        Command::Examine(query) => world.examine(session, query),
        Command::Attack(query) => world.attack(session, query),
        Command::Talk(query) => world.talk(session, query),
        Command::Respond(choice) => world.respond(session, choice),
        Command::Say(text) => world.say(session, text),
        Command::Who => world.who(session),
        Command::Score => world.score(session),
        Command::Help => {
            for line in HELP {
                world.send(session, *line);
            }
            Ok(())
        }
        Command::Quit => {
            world.quit(session);
            Ok(())
        }
        Command::Empty => Ok(()),
        Command::Unknown(verb) => Err(DomainError::rejected(format!(
            "I don't know how to \"{verb}\". Type help for a list of commands."
        ))),
    };

    if let Err(e) = result {
        match &e {
            DomainError::Integrity(_) | DomainError::Infrastructure(_) => {
                error!(session = %session, ?command, error = %e, "command failed");
            }
            _ => debug!(session = %session, ?command, error = %e, "command rejected"),
        }
        world.send(session, e.player_message());
    }
}
