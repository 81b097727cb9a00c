/// What a scrollback line was produced by
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    /// An echoed submission
    Command,
    Output,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryEntry {
    pub kind: EntryKind,
    pub text: String,
}

impl HistoryEntry {
    pub fn command(text: impl Into<String>) -> Self {
        Self {
            kind: EntryKind::Command,
            text: text.into(),
        }
    }

    pub fn output(text: impl Into<String>) -> Self {
        Self {
            kind: EntryKind::Output,
            text: text.into(),
        }
    }
}

/// The displayed log: append-only, except for a reset to the boot sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scrollback {
    boot: Vec<String>,
    entries: Vec<HistoryEntry>,
}

impl Scrollback {
    pub fn new(boot: Vec<String>) -> Self {
        let mut me = Self {
            boot,
            entries: Vec::new(),
        };
        me.reset();
        me
    }

    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    pub fn push(&mut self, entry: HistoryEntry) {
        self.entries.push(entry);
    }

    pub fn extend(&mut self, entries: impl IntoIterator<Item = HistoryEntry>) {
        self.entries.extend(entries);
    }

    /// Replace everything with the boot sequence
    pub fn reset(&mut self) {
        self.entries.clear();
        self.entries
            .extend(self.boot.iter().map(|line| HistoryEntry::output(line.as_str())));
    }
}
