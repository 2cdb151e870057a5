//! Command table for the expense shell.

use crate::cli::core::CommandResult;
use crate::cli::shell_context::ShellContext;

/// Furthest edit distance at which an unknown word still gets a suggestion.
const MAX_SUGGESTION_DISTANCE: usize = 3;

pub type CommandHandler = fn(&mut ShellContext, &[&str]) -> CommandResult;

/// One shell command: its name, the line shown by `help`, and the handler.
pub struct CommandEntry {
    pub name: &'static str,
    pub description: &'static str,
    pub usage: &'static str,
    pub handler: CommandHandler,
}

impl CommandEntry {
    pub const fn new(
        name: &'static str,
        description: &'static str,
        usage: &'static str,
        handler: CommandHandler,
    ) -> Self {
        Self {
            name,
            description,
            usage,
            handler,
        }
    }
}

/// Commands in registration order, which is also the `help` order.
#[derive(Default)]
pub struct CommandRegistry {
    entries: Vec<CommandEntry>,
}

impl CommandRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `entry`, replacing an earlier command of the same name in place.
    pub fn register(&mut self, entry: CommandEntry) {
        match self.entries.iter_mut().find(|known| known.name == entry.name) {
            Some(known) => *known = entry,
            None => self.entries.push(entry),
        }
    }

    pub fn get(&self, name: &str) -> Option<&CommandEntry> {
        self.entries.iter().find(|entry| entry.name == name)
    }

    pub fn list(&self) -> &[CommandEntry] {
        &self.entries
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.iter().map(|entry| entry.name)
    }

    pub fn handler(&self, name: &str) -> Option<CommandHandler> {
        self.get(name).map(|entry| entry.handler)
    }

    /// Closest command name to a mistyped word, compared case-insensitively.
    pub fn suggest(&self, input: &str) -> Option<&'static str> {
        let typed = input.to_lowercase();
        self.names()
            .map(|name| (strsim::levenshtein(name, &typed), name))
            .filter(|(distance, _)| *distance <= MAX_SUGGESTION_DISTANCE)
            .min_by_key(|(distance, _)| *distance)
            .map(|(_, name)| name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn noop(_: &mut ShellContext, _: &[&str]) -> CommandResult {
        Ok(())
    }

    #[test]
    fn reregistering_keeps_position_and_takes_new_text() {
        let mut registry = CommandRegistry::new();
        registry.register(CommandEntry::new("list", "old", "list", noop));
        registry.register(CommandEntry::new("add", "Record", "add", noop));
        registry.register(CommandEntry::new("list", "new", "list", noop));

        assert_eq!(registry.names().collect::<Vec<_>>(), vec!["list", "add"]);
        assert_eq!(registry.get("list").map(|entry| entry.description), Some("new"));
        assert!(registry.handler("missing").is_none());
    }

    #[test]
    fn suggestions_ignore_case() {
        let mut registry = CommandRegistry::new();
        registry.register(CommandEntry::new("budgets", "", "budgets", noop));
        assert_eq!(registry.suggest("BUDGTS"), Some("budgets"));
    }
}
