use crate::registry;

/// A submitted line split into command and arguments.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedCommand {
    /// Lower-cased with aliases resolved; empty for a blank line
    pub command: String,
    pub args: Vec<String>,
}

impl ParsedCommand {
    /// Splits `line` on whitespace runs. There is no quoting or escaping.
    pub fn parse(line: &str) -> Self {
        let mut parts = line.split_whitespace();
        let Some(first) = parts.next() else {
            return Self::default();
        };

        let command = first.to_lowercase();
        Self {
            command: registry::canonical_name(&command).to_string(),
            args: parts.map(String::from).collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.command.is_empty()
    }
}
