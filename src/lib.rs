// Copyright 2024 Google LLC
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//      http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Helpers for moving translations between Gettext catalogs and
//! spreadsheets.
//!
//! Translators often prefer to work in a spreadsheet where every
//! message is a row and every language is a column. The functions
//! here convert a set of PO files into such a workbook and extract
//! the per-language PO files from it again.
//!
//! The `pet` binary exposes the two directions as the `toxls` and
//! `fromxls` subcommands.

use std::path::Path;

use anyhow::Context;
use polib::catalog::Catalog;
use polib::po_file;

pub mod assemble;
pub mod columns;
pub mod extract;
pub mod locale;
pub mod merge;

/// Convert a message context into the form expected by
/// [`Catalog::find_message`].
///
/// Catalogs store a missing context as the empty string.
pub fn context(msgctxt: &str) -> Option<&str> {
    (!msgctxt.is_empty()).then_some(msgctxt)
}

/// Parse the PO or POT file at `path`.
pub fn load_catalog(path: &Path) -> anyhow::Result<Catalog> {
    po_file::parse(path).with_context(|| format!("Could not parse {path:?} as PO file"))
}

/// Render the source references of a message the way they appear in
/// an `Occurrences` cell.
///
/// # Examples
///
/// ```
/// use po_xlsx_tool::join_sources;
///
/// assert_eq!(join_sources("src/a.rs:10\nsrc/b.rs:2"), "src/a.rs:10, src/b.rs:2");
/// assert_eq!(join_sources(""), "");
/// ```
pub fn join_sources(source: &str) -> String {
    source.split_whitespace().collect::<Vec<_>>().join(", ")
}

/// Inverse of [`join_sources`]: turn an `Occurrences` cell into
/// newline separated source references.
///
/// # Examples
///
/// ```
/// use po_xlsx_tool::split_sources;
///
/// assert_eq!(split_sources("src/a.rs:10, src/b.rs:2"), "src/a.rs:10\nsrc/b.rs:2");
/// assert_eq!(split_sources(" , "), "");
/// ```
pub fn split_sources(cell: &str) -> String {
    cell.split(',')
        .map(str::trim)
        .filter(|source| !source.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_context_empty() {
        assert_eq!(context(""), None);
    }

    #[test]
    fn test_context_present() {
        assert_eq!(context("menu"), Some("menu"));
    }

    #[test]
    fn test_join_sources_multiple_lines() {
        assert_eq!(
            join_sources("foo.py:1 bar.py:20\nbaz.py"),
            "foo.py:1, bar.py:20, baz.py"
        );
    }

    #[test]
    fn test_split_sources_round_trip() {
        let source = "foo.py:1\nbar.py:20\nbaz.py";
        assert_eq!(split_sources(&join_sources(source)), source);
    }

    #[test]
    fn test_load_catalog_missing_file() {
        let Err(err) = load_catalog(Path::new("does/not/exist.po")) else {
            panic!("Parsed a missing catalog");
        };
        assert!(err.to_string().contains("does/not/exist.po"));
    }
}
