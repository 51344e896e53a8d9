use std::collections::HashSet;
use std::fmt;

/// Stable key of a history entry. Assigned from the creation time in Unix
/// milliseconds, bumped so that it is always larger than any earlier id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct EntryId(pub u64);

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

/// One past shortening result. Fields are never edited after creation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryEntry {
    pub id: EntryId,
    pub original_url: String,
    pub short_url: String,
}

impl HistoryEntry {
    pub fn new(id: EntryId, original_url: impl Into<String>, short_url: impl Into<String>) -> Self {
        Self {
            id,
            original_url: original_url.into(),
            short_url: short_url.into(),
        }
    }
}

/// Ordered history, newest first. Order is insertion order and is never
/// re-sorted.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct History {
    entries: Vec<HistoryEntry>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a history from entries already in newest-first order.
    ///
    /// Later entries reusing an id seen earlier in the sequence are dropped so
    /// the result never holds two entries with the same id.
    pub fn from_entries(entries: Vec<HistoryEntry>) -> Self {
        let mut seen = HashSet::with_capacity(entries.len());
        let entries = entries
            .into_iter()
            .filter(|entry| seen.insert(entry.id))
            .collect();
        Self { entries }
    }

    /// Returns a new history with `entry` in front. `self` is left untouched.
    ///
    /// An existing entry with the same id is replaced by the new one.
    pub fn prepend(&self, entry: HistoryEntry) -> History {
        let mut entries = Vec::with_capacity(self.entries.len() + 1);
        let id = entry.id;
        entries.push(entry);
        entries.extend(self.entries.iter().filter(|e| e.id != id).cloned());
        History { entries }
    }

    /// Returns a new history without the entry `id`. Absent ids are a no-op.
    pub fn remove(&self, id: EntryId) -> History {
        History {
            entries: self
                .entries
                .iter()
                .filter(|entry| entry.id != id)
                .cloned()
                .collect(),
        }
    }

    pub fn get(&self, id: EntryId) -> Option<&HistoryEntry> {
        self.entries.iter().find(|entry| entry.id == id)
    }

    pub fn contains(&self, id: EntryId) -> bool {
        self.get(id).is_some()
    }

    pub fn newest(&self) -> Option<&HistoryEntry> {
        self.entries.first()
    }

    pub fn max_id(&self) -> Option<EntryId> {
        self.entries.iter().map(|entry| entry.id).max()
    }

    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    pub fn iter(&self) -> std::slice::Iter<'_, HistoryEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<'a> IntoIterator for &'a History {
    type Item = &'a HistoryEntry;
    type IntoIter = std::slice::Iter<'a, HistoryEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
