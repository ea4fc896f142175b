//
// Copyright (c) 2026 Jeff Garzik
//
// This file is part of the posixutils-rs project covered under
// the MIT License.  For the full license text, please see the LICENSE
// file in the root directory of this project.
// SPDX-License-Identifier: MIT
//

//! Three-way merge of .po catalogs
//!
//! - index: insertion-ordered message lookup
//! - reconcile: per-message decision rule and catalog assembly
//! - driver: file loading, scoped output and merge status

pub mod driver;
pub mod index;
pub mod reconcile;
