//
// Copyright (c) 2026 Jeff Garzik
//
// This file is part of the posixutils-rs project covered under
// the MIT License.  For the full license text, please see the LICENSE
// file in the root directory of this project.
// SPDX-License-Identifier: MIT
//

//! Insertion-ordered message index
//!
//! Maps a message key to its entry while remembering the order in which
//! keys were first inserted.  The merged catalog is written in that
//! order, so the index is a hash map of slot positions over a vector of
//! slots rather than a plain `HashMap`.

use crate::po_lib::po_file::PoEntry;
use std::collections::HashMap;
use std::fmt;

/// Identity of a message during a merge: its msgid alone.
///
/// msgctxt is not part of the key, so entries that differ only in
/// context share one slot and the last one read wins.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MessageKey {
    pub msgid: String,
}

impl MessageKey {
    pub fn new(msgid: &str) -> Self {
        MessageKey {
            msgid: msgid.to_string(),
        }
    }

    pub fn of(entry: &PoEntry) -> Self {
        MessageKey::new(&entry.msgid)
    }
}

impl fmt::Display for MessageKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.msgid)
    }
}

#[derive(Debug, Clone, Default)]
pub struct MessageIndex {
    slots: Vec<Option<PoEntry>>,
    positions: HashMap<MessageKey, usize>,
    live: usize,
}

impl MessageIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Index a catalog's entries in O(n).
    ///
    /// When a key occurs more than once the later entry wins, but keeps
    /// the position of the first occurrence.
    pub fn build(entries: Vec<PoEntry>) -> Self {
        let mut index = MessageIndex {
            slots: Vec::with_capacity(entries.len()),
            positions: HashMap::with_capacity(entries.len()),
            live: 0,
        };
        for entry in entries {
            index.insert(entry);
        }
        index
    }

    pub fn len(&self) -> usize {
        self.live
    }

    pub fn is_empty(&self) -> bool {
        self.live == 0
    }

    pub fn contains(&self, key: &MessageKey) -> bool {
        self.positions.contains_key(key)
    }

    pub fn get(&self, key: &MessageKey) -> Option<&PoEntry> {
        let pos = *self.positions.get(key)?;
        self.slots[pos].as_ref()
    }

    /// Insert or overwrite; an overwritten key stays where it was.
    /// Returns the entry previously stored under the key.
    pub fn insert(&mut self, entry: PoEntry) -> Option<PoEntry> {
        let key = MessageKey::of(&entry);
        match self.positions.get(&key) {
            Some(&pos) => self.slots[pos].replace(entry),
            None => {
                self.positions.insert(key, self.slots.len());
                self.slots.push(Some(entry));
                self.live += 1;
                None
            }
        }
    }

    /// Remove a key; a later insert of the same key appends at the end.
    pub fn remove(&mut self, key: &MessageKey) -> Option<PoEntry> {
        let pos = self.positions.remove(key)?;
        let entry = self.slots[pos].take();
        if entry.is_some() {
            self.live -= 1;
        }
        entry
    }

    /// Entries in insertion order
    pub fn iter(&self) -> impl Iterator<Item = &PoEntry> {
        self.slots.iter().flatten()
    }

    /// Consume the index, yielding entries in insertion order
    pub fn into_entries(self) -> impl Iterator<Item = PoEntry> {
        self.slots.into_iter().flatten()
    }
}
