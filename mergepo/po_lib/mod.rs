//
// Copyright (c) 2026 Jeff Garzik
//
// This file is part of the posixutils-rs project covered under
// the MIT License.  For the full license text, please see the LICENSE
// file in the root directory of this project.
// SPDX-License-Identifier: MIT
//

//! Portable Object catalog support
//!
//! Reading and writing of .po files, keeping every entry field so that
//! a catalog can be rewritten without losing information.

pub mod charset;
pub mod po_file;
