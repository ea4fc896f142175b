//
// Copyright (c) 2026 Jeff Garzik
//
// This file is part of the posixutils-rs project covered under
// the MIT License.  For the full license text, please see the LICENSE
// file in the root directory of this project.
// SPDX-License-Identifier: MIT
//

//! mergepo - three-way merge driver for message catalogs
//!
//! Invoked by git with the ancestor, current and other versions of a
//! .po file.  The current file is replaced with the merged catalog;
//! messages translated differently on both sides get conflict markers.
//!
//! ```text
//! # .gitattributes
//! *.po merge=mergepo
//!
//! # .git/config
//! [merge "mergepo"]
//!     name = gettext catalog merge driver
//!     driver = mergepo %O %A %B
//! ```

use clap::Parser;
use gettextrs::{bind_textdomain_codeset, gettext, setlocale, textdomain, LocaleCategory};
use plib::PROJECT_NAME;
use posixutils_mergepo::merge_lib::driver::{merge_files, MergeStatus};
use std::path::PathBuf;
use std::process::exit;
use std::time::Instant;

/// Exit status for unreadable, malformed or unwritable catalogs
const EXIT_FATAL: i32 = 2;

/// mergepo - three-way merge driver for message catalogs
#[derive(Parser)]
#[command(
    version,
    about = gettext("mergepo - three-way merge driver for message catalogs"),
    disable_help_flag = true,
    disable_version_flag = true
)]
struct Args {
    #[arg(short = 'v', long, help = gettext("Report each conflicting message and the merge time"))]
    verbose: bool,

    #[arg(short = 'o', long = "output-file", help = gettext("Write the merged catalog here instead of replacing CURRENT"))]
    output: Option<PathBuf>,

    #[arg(short, long, action = clap::ArgAction::HelpLong, help = gettext("Print help"))]
    help: Option<bool>,

    #[arg(short = 'V', long, action = clap::ArgAction::Version, help = gettext("Print version"))]
    version: Option<bool>,

    #[arg(help = gettext("Common ancestor version of the catalog (%O)"))]
    ancestor: PathBuf,

    #[arg(help = gettext("Current version of the catalog, replaced by the result (%A)"))]
    current: PathBuf,

    #[arg(help = gettext("Other branch version of the catalog (%B)"))]
    other: PathBuf,
}

fn main() {
    // Set up localization
    setlocale(LocaleCategory::LcAll, "");
    if textdomain(PROJECT_NAME).is_err() {
        // Ignore error - translation may not be available
    }
    let _ = bind_textdomain_codeset(PROJECT_NAME, "UTF-8");

    let args = Args::parse();

    let start = Instant::now();
    let output = args.output.as_ref().unwrap_or(&args.current);

    // the conflict label is the other path's bytes, as given
    let label = args.other.as_os_str();
    let status = match merge_files(&args.ancestor, &args.current, &args.other, label, output) {
        Ok(status) => status,
        Err(e) => {
            eprintln!("mergepo: {}", e);
            exit(EXIT_FATAL);
        }
    };

    if let MergeStatus::Conflicts(ref keys) = status {
        if args.verbose {
            for key in keys {
                eprintln!("mergepo: {}: {} {}", output.display(), gettext("conflict in"), key);
            }
        }
        eprintln!(
            "mergepo: {}: {} {}",
            output.display(),
            keys.len(),
            gettext("translation conflicts")
        );
    }

    if args.verbose {
        eprintln!(
            "mergepo: {} {:.3}s",
            gettext("merged in"),
            start.elapsed().as_secs_f64()
        );
    }

    exit(status.exit_code());
}
