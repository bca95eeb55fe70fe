//! Clipboard access and the session's copy ring.

use std::collections::VecDeque;
use std::sync::Mutex;

/// Entries kept by [`ClipboardRing`].
pub const RING_CAPACITY: usize = 10;

/// The desktop clipboard.
pub trait Clipboard: Send + Sync {
    fn read(&self) -> Option<String>;
    fn write(&self, text: &str);
}

/// Clipboard held in memory, for the REPL and tests.
#[derive(Debug, Default)]
pub struct MemoryClipboard {
    content: Mutex<Option<String>>,
}

impl MemoryClipboard {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Clipboard for MemoryClipboard {
    fn read(&self) -> Option<String> {
        self.content.lock().ok().and_then(|c| c.clone())
    }

    fn write(&self, text: &str) {
        if let Ok(mut content) = self.content.lock() {
            *content = Some(text.to_string());
        }
    }
}

/// Recently copied texts, most recent first.
#[derive(Debug, Clone)]
pub struct ClipboardRing {
    entries: VecDeque<String>,
    capacity: usize,
}

impl Default for ClipboardRing {
    fn default() -> Self {
        Self::with_capacity(RING_CAPACITY)
    }
}

impl ClipboardRing {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Add `text` at the front. A repeat of the current head is dropped;
    /// the oldest entry falls off when full.
    pub fn push(&mut self, text: &str) {
        if self.entries.front().is_some_and(|head| head == text) {
            return;
        }
        self.entries.push_front(text.to_string());
        self.entries.truncate(self.capacity);
    }

    pub fn head(&self) -> Option<&str> {
        self.entries.front().map(String::as_str)
    }

    pub fn entries(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_most_recent_first() {
        let mut ring = ClipboardRing::default();
        ring.push("a");
        ring.push("b");
        assert_eq!(ring.entries().collect::<Vec<_>>(), vec!["b", "a"]);
    }

    #[test]
    fn test_skips_repeat_of_head_only() {
        let mut ring = ClipboardRing::default();
        ring.push("a");
        ring.push("a");
        assert_eq!(ring.len(), 1);
        ring.push("b");
        ring.push("a");
        assert_eq!(ring.entries().collect::<Vec<_>>(), vec!["a", "b", "a"]);
    }

    #[test]
    fn test_capacity_bound() {
        let mut ring = ClipboardRing::default();
        for i in 0..25 {
            ring.push(&i.to_string());
        }
        assert_eq!(ring.len(), RING_CAPACITY);
        assert_eq!(ring.head(), Some("24"));
        assert_eq!(ring.entries().last(), Some("15"));
    }

    #[test]
    fn test_memory_clipboard() {
        let clipboard = MemoryClipboard::new();
        assert_eq!(clipboard.read(), None);
        clipboard.write("hello");
        assert_eq!(clipboard.read().as_deref(), Some("hello"));
    }
}
