//
// Copyright (c) 2026 Jeff Garzik
//
// This file is part of the posixutils-rs project covered under
// the MIT License.  For the full license text, please see the LICENSE
// file in the root directory of this project.
// SPDX-License-Identifier: MIT
//

//! Three-way reconciliation of translation catalogs
//!
//! Every message is merged on its own.  Only the translation (all
//! `msgstr` forms) takes part in the decision; comments, flags and the
//! rest of the chosen entry are carried over untouched.  When both sides
//! changed a translation differently, the ours entry is kept with its
//! translation replaced by a conflict block:
//!
//! ```text
//! <<<<<<< HEAD
//! <ours>
//! =======
//! <theirs>
//! >>>>>>> <label>
//! ```

use super::index::{MessageIndex, MessageKey};
use crate::po_lib::po_file::{PoEntry, PoFile};

/// Header comment line identifying merged catalogs
pub const MERGE_ATTRIBUTION: &str = "Merged by mergepo";

/// Outcome of merging one message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    pub entry: PoEntry,
    pub conflicted: bool,
}

/// Result of merging three catalogs
#[derive(Debug, Clone)]
pub struct MergeOutcome {
    pub catalog: PoFile,
    /// Keys resolved with a conflict, in output order
    pub conflicts: Vec<MessageKey>,
}

impl MergeOutcome {
    pub fn conflict_count(&self) -> usize {
        self.conflicts.len()
    }
}

fn conflict_block(ours: &str, theirs: &str, label: &str) -> String {
    format!(
        "<<<<<<< HEAD\n{}\n=======\n{}\n>>>>>>> {}\n",
        ours, theirs, label
    )
}

/// Rewrite every translation form of `ours` into a conflict block.
/// A form missing on one side counts as empty.
fn mark_conflict(mut ours: PoEntry, theirs: &PoEntry, label: &str) -> PoEntry {
    let forms = ours.msgstr.len().max(theirs.msgstr.len());
    ours.msgstr = (0..forms)
        .map(|i| {
            let a = ours.msgstr.get(i).map(String::as_str).unwrap_or("");
            let b = theirs.msgstr.get(i).map(String::as_str).unwrap_or("");
            conflict_block(a, b, label)
        })
        .collect();
    ours
}

/// Merge one message given its ancestor (`o`), ours (`a`) and theirs
/// (`b`) versions.
///
/// A message present on one side only is taken from that side; whether
/// it was added there or deleted on the other side cannot be told apart
/// and is not attempted.  With neither side present the ancestor entry
/// is kept.
pub fn resolve(
    o: Option<PoEntry>,
    a: Option<PoEntry>,
    b: Option<PoEntry>,
    label: &str,
) -> Option<Resolution> {
    let clean = |entry| {
        Some(Resolution {
            entry,
            conflicted: false,
        })
    };

    match (o, a, b) {
        (_, Some(a), None) => clean(a),
        (_, None, Some(b)) => clean(b),
        (o, None, None) => o.and_then(clean),
        (Some(o), Some(a), Some(b)) if o.msgstr == a.msgstr && o.msgstr == b.msgstr => clean(o),
        (Some(o), Some(a), Some(b)) if o.msgstr == a.msgstr => clean(b),
        (Some(o), Some(a), Some(b)) if o.msgstr == b.msgstr => clean(a),
        (_, Some(a), Some(b)) => Some(Resolution {
            entry: mark_conflict(a, &b, label),
            conflicted: true,
        }),
    }
}

/// Header entry for the merged catalog: ours, with the attribution
/// line in front of its comments.
fn merged_header(ours: Option<PoEntry>) -> PoEntry {
    let mut header = ours.unwrap_or_else(|| PoEntry::new("", ""));
    if header.translator_comments.first().map(String::as_str) != Some(MERGE_ATTRIBUTION) {
        header
            .translator_comments
            .insert(0, MERGE_ATTRIBUTION.to_string());
    }
    header
}

/// Merge three catalogs.
///
/// Output order: ancestor messages in ancestor order, then messages new
/// in ours in ours order, then messages new in theirs in theirs order.
/// `label` names the theirs side in conflict blocks.  The result is
/// written like ours: same charset, line terminators and trailing
/// comments.
pub fn merge_catalogs(ancestor: PoFile, ours: PoFile, theirs: PoFile, label: &str) -> MergeOutcome {
    let base = MessageIndex::build(ancestor.entries);
    let mut ours_idx = MessageIndex::build(ours.entries);
    let mut theirs_idx = MessageIndex::build(theirs.entries);

    let mut merged = MessageIndex::new();
    let mut conflicts = Vec::new();

    let mut record = |merged: &mut MessageIndex, resolution: Option<Resolution>| {
        if let Some(res) = resolution {
            if res.conflicted {
                conflicts.push(MessageKey::of(&res.entry));
            }
            merged.insert(res.entry);
        }
    };

    for o in base.into_entries() {
        let key = MessageKey::of(&o);
        let a = ours_idx.remove(&key);
        let b = theirs_idx.remove(&key);
        record(&mut merged, resolve(Some(o), a, b, label));
    }

    for a in ours_idx.into_entries() {
        let b = theirs_idx.remove(&MessageKey::of(&a));
        record(&mut merged, resolve(None, Some(a), b, label));
    }

    for b in theirs_idx.into_entries() {
        merged.insert(b);
    }

    MergeOutcome {
        catalog: PoFile {
            header: Some(merged_header(ours.header)),
            entries: merged.into_entries().collect(),
            trailing: ours.trailing,
            charset: ours.charset,
            crlf: ours.crlf,
        },
        conflicts,
    }
}
