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

//! Column headers of the translation sheet.

use std::collections::{HashMap, HashSet};

use calamine::Data;

/// The well-known columns of a translation sheet.
///
/// Every other non-empty header cell names a locale.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ColumnHeader {
    Msgctxt,
    Msgid,
    Comment,
    TranslatorComment,
    Occurrences,
}

impl ColumnHeader {
    pub const ALL: [ColumnHeader; 5] = [
        ColumnHeader::Msgctxt,
        ColumnHeader::Msgid,
        ColumnHeader::Comment,
        ColumnHeader::TranslatorComment,
        ColumnHeader::Occurrences,
    ];

    /// The text written in the header row for this column.
    pub fn header(self) -> &'static str {
        match self {
            ColumnHeader::Msgctxt => "Message context",
            ColumnHeader::Msgid => "Message id",
            ColumnHeader::Comment => "Comment",
            ColumnHeader::TranslatorComment => "Translator comment",
            ColumnHeader::Occurrences => "Occurrences",
        }
    }

    pub fn from_header(text: &str) -> Option<ColumnHeader> {
        ColumnHeader::ALL
            .into_iter()
            .find(|column| column.header() == text)
    }
}

/// Text content of a cell, or `None` for blank cells.
///
/// Numbers and booleans are rendered the way they display, so a
/// message id of `42` typed into a spreadsheet comes back as `"42"`.
pub fn cell_text(cell: &Data) -> Option<String> {
    let text = match cell {
        Data::Empty => return None,
        Data::String(text) => text.clone(),
        other => other.to_string(),
    };
    (!text.is_empty()).then_some(text)
}

/// Mapping from header text to column index, built from the first
/// row of a sheet.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct HeaderMap {
    headers: Vec<Option<String>>,
    index: HashMap<String, usize>,
}

impl HeaderMap {
    /// Build the map from a header row. If a header is repeated, the
    /// leftmost column wins.
    pub fn from_row(row: &[Data]) -> HeaderMap {
        let headers = row.iter().map(cell_text).collect::<Vec<_>>();
        let mut index = HashMap::new();
        for (idx, header) in headers.iter().enumerate() {
            if let Some(header) = header {
                index.entry(header.clone()).or_insert(idx);
            }
        }
        HeaderMap { headers, index }
    }

    pub fn column(&self, column: ColumnHeader) -> Option<usize> {
        self.index.get(column.header()).copied()
    }

    pub fn locale_column(&self, locale: &str) -> Option<usize> {
        self.index.get(locale).copied()
    }

    /// The locale headers found to the right of the last well-known
    /// column, in column order. A repeated locale is listed once.
    pub fn locales(&self) -> Vec<&str> {
        let first_locale_column = ColumnHeader::ALL
            .into_iter()
            .filter_map(|column| self.column(column))
            .max()
            .map_or(0, |idx| idx + 1);
        let mut seen = HashSet::new();
        self.headers
            .iter()
            .skip(first_locale_column)
            .flatten()
            .filter(|header| ColumnHeader::from_header(header).is_none())
            .map(String::as_str)
            .filter(|locale| seen.insert(*locale))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn header_row(headers: &[&str]) -> Vec<Data> {
        headers
            .iter()
            .map(|header| match *header {
                "" => Data::Empty,
                header => Data::String(String::from(header)),
            })
            .collect()
    }

    #[test]
    fn test_header_round_trip() {
        for column in ColumnHeader::ALL {
            assert_eq!(ColumnHeader::from_header(column.header()), Some(column));
        }
        assert_eq!(ColumnHeader::from_header("en"), None);
    }

    #[test]
    fn test_cell_text() {
        assert_eq!(cell_text(&Data::Empty), None);
        assert_eq!(cell_text(&Data::String(String::new())), None);
        assert_eq!(cell_text(&Data::String(String::from("foo"))), Some(String::from("foo")));
        assert_eq!(cell_text(&Data::Float(42.0)), Some(String::from("42")));
        assert_eq!(cell_text(&Data::Int(7)), Some(String::from("7")));
        assert_eq!(cell_text(&Data::Bool(true)), Some(String::from("true")));
    }

    #[test]
    fn test_header_map_columns() {
        let headers = HeaderMap::from_row(&header_row(&[
            "Message context",
            "Message id",
            "Occurrences",
            "Comment",
            "en",
            "cs",
        ]));
        assert_eq!(headers.column(ColumnHeader::Msgctxt), Some(0));
        assert_eq!(headers.column(ColumnHeader::Msgid), Some(1));
        assert_eq!(headers.column(ColumnHeader::Occurrences), Some(2));
        assert_eq!(headers.column(ColumnHeader::Comment), Some(3));
        assert_eq!(headers.column(ColumnHeader::TranslatorComment), None);
        assert_eq!(headers.locale_column("en"), Some(4));
        assert_eq!(headers.locale_column("cs"), Some(5));
        assert_eq!(headers.locale_column("de"), None);
    }

    #[test]
    fn test_header_map_locales() {
        let headers = HeaderMap::from_row(&header_row(&["Message id", "en", "", "cs"]));
        assert_eq!(headers.locales(), vec!["en", "cs"]);
    }

    #[test]
    fn test_header_map_locales_after_last_known_column() {
        // Columns left of the message columns are not locales.
        let headers = HeaderMap::from_row(&header_row(&[
            "Notes",
            "Message id",
            "Occurrences",
            "de",
        ]));
        assert_eq!(headers.locales(), vec!["de"]);
    }

    #[test]
    fn test_header_map_msgid_in_first_column() {
        let headers = HeaderMap::from_row(&header_row(&["Message id", "fr"]));
        assert_eq!(headers.column(ColumnHeader::Msgid), Some(0));
        assert_eq!(headers.locales(), vec!["fr"]);
    }

    #[test]
    fn test_header_map_duplicate_header() {
        let headers = HeaderMap::from_row(&header_row(&["Message id", "en", "en"]));
        assert_eq!(headers.locale_column("en"), Some(1));
    }

    #[test]
    fn test_header_map_missing_msgid() {
        let headers = HeaderMap::from_row(&header_row(&["en", "cs"]));
        assert_eq!(headers.column(ColumnHeader::Msgid), None);
        assert_eq!(headers.locales(), vec!["en", "cs"]);
    }

    #[test]
    fn test_repeated_locale_listed_once() {
        let headers = HeaderMap::from_row(&header_row(&["Message id", "en", "en", "cs"]));
        assert_eq!(headers.locales(), vec!["en", "cs"]);
    }
}
