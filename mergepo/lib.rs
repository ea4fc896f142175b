//
// Copyright (c) 2026 Jeff Garzik
//
// This file is part of the posixutils-rs project covered under
// the MIT License.  For the full license text, please see the LICENSE
// file in the root directory of this project.
// SPDX-License-Identifier: MIT
//

//! posixutils-mergepo library
//!
//! This library provides the pieces of the mergepo merge driver:
//! - po_lib: .po catalog reading and writing
//! - merge_lib: three-way reconciliation of catalogs

pub mod merge_lib;
pub mod po_lib;
