//
// Copyright (c) 2026 Jeff Garzik
//
// This file is part of the posixutils-rs project covered under
// the MIT License.  For the full license text, please see the LICENSE
// file in the root directory of this project.
// SPDX-License-Identifier: MIT
//

//! File-level merge: load three catalogs, reconcile, write the result.
//!
//! All inputs are parsed before anything is written, so a missing or
//! malformed input leaves the destination untouched.  The result goes
//! to a temporary file next to the destination which is then renamed
//! over it; on any failure the temporary file is removed when dropped.

use super::index::MessageKey;
use super::reconcile::merge_catalogs;
use crate::po_lib::po_file::{PoError, PoFile};
use std::ffi::OsStr;
use std::fmt;
use std::fs;
use std::io::{self, BufWriter};
use std::path::{Path, PathBuf};

/// Outcome of a completed merge
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MergeStatus {
    Clean,
    /// Merged, with conflict blocks left in these messages
    Conflicts(Vec<MessageKey>),
}

impl MergeStatus {
    pub fn conflict_count(&self) -> usize {
        match self {
            MergeStatus::Clean => 0,
            MergeStatus::Conflicts(keys) => keys.len(),
        }
    }

    /// Exit status expected from a merge driver
    pub fn exit_code(&self) -> i32 {
        match self {
            MergeStatus::Clean => 0,
            MergeStatus::Conflicts(_) => 1,
        }
    }
}

/// Fatal merge error
#[derive(Debug)]
pub enum MergeError {
    /// An input catalog is missing, unreadable or malformed
    Read { path: PathBuf, source: PoError },
    /// The merged catalog could not be written
    Write { path: PathBuf, source: io::Error },
}

impl MergeError {
    pub fn path(&self) -> &Path {
        match self {
            MergeError::Read { path, .. } | MergeError::Write { path, .. } => path,
        }
    }
}

impl fmt::Display for MergeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MergeError::Read { path, source } => write!(f, "{}: {}", path.display(), source),
            MergeError::Write { path, source } => write!(f, "{}: {}", path.display(), source),
        }
    }
}

impl std::error::Error for MergeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            MergeError::Read { source, .. } => Some(source),
            MergeError::Write { source, .. } => Some(source),
        }
    }
}

fn load(path: &Path) -> Result<PoFile, MergeError> {
    PoFile::load(path).map_err(|source| MergeError::Read {
        path: path.to_path_buf(),
        source,
    })
}

/// Replace `dest` with the serialized catalog via a temporary file in
/// the same directory, keeping the permissions of an existing `dest`.
fn write_catalog(catalog: &PoFile, dest: &Path) -> io::Result<()> {
    let dir = match dest.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut tmp = tempfile::Builder::new()
        .prefix(".mergepo-")
        .suffix(".po")
        .tempfile_in(dir)?;
    catalog.write_to(BufWriter::new(tmp.as_file_mut()))?;

    if let Ok(meta) = fs::metadata(dest) {
        tmp.as_file().set_permissions(meta.permissions())?;
    }

    tmp.persist(dest).map_err(|e| e.error)?;
    Ok(())
}

/// Merge `ancestor`, `ours` and `theirs` into `output`.
///
/// `label` names the theirs side in conflict blocks; a merge driver
/// passes the theirs path exactly as it received it.  Its bytes are
/// written unchanged into a catalog in a non-UTF-8 charset; in a UTF-8
/// catalog, bytes that are not UTF-8 become U+FFFD.
pub fn merge_files(
    ancestor: &Path,
    ours: &Path,
    theirs: &Path,
    label: &OsStr,
    output: &Path,
) -> Result<MergeStatus, MergeError> {
    let o = load(ancestor)?;
    let a = load(ours)?;
    let b = load(theirs)?;

    let label = a.charset.decode_os(label);
    let outcome = merge_catalogs(o, a, b, &label);

    write_catalog(&outcome.catalog, output).map_err(|source| MergeError::Write {
        path: output.to_path_buf(),
        source,
    })?;

    if outcome.conflicts.is_empty() {
        Ok(MergeStatus::Clean)
    } else {
        Ok(MergeStatus::Conflicts(outcome.conflicts))
    }
}
