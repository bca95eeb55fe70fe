//! Command history with up/down navigation.

/// What a navigation step does to the input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Recall {
    /// Replace the input with this entry.
    Entry(String),
    /// Walked past the newest entry: empty the input.
    Blank,
    /// Nothing to do.
    Unchanged,
}

/// Append-only list of submitted lines plus a navigation cursor.
///
/// `cursor` is `None` while the user is typing fresh input, or the index
/// of the entry currently shown.
#[derive(Debug, Clone, Default)]
pub struct History {
    entries: Vec<String>,
    cursor: Option<usize>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a submitted line. Blank lines are ignored. Always ends navigation.
    pub fn push(&mut self, line: &str) {
        self.cursor = None;
        if !line.trim().is_empty() {
            self.entries.push(line.to_string());
        }
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    pub fn cursor(&self) -> Option<usize> {
        self.cursor
    }

    pub fn reset_cursor(&mut self) {
        self.cursor = None;
    }

    /// Step toward older entries. Starts at the newest; stops at the oldest.
    pub fn previous(&mut self) -> Recall {
        let Some(newest) = self.entries.len().checked_sub(1) else {
            return Recall::Unchanged;
        };
        let index = match self.cursor {
            None => newest,
            Some(i) => i.saturating_sub(1),
        };
        self.cursor = Some(index);
        Recall::Entry(self.entries[index].clone())
    }

    /// Step toward newer entries; past the newest, navigation ends.
    pub fn next(&mut self) -> Recall {
        match self.cursor {
            None => Recall::Unchanged,
            Some(i) if i + 1 < self.entries.len() => {
                self.cursor = Some(i + 1);
                Recall::Entry(self.entries[i + 1].clone())
            }
            Some(_) => {
                self.cursor = None;
                Recall::Blank
            }
        }
    }
}
