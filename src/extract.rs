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

//! This file contains main logic used by the `fromxls` subcommand.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, bail, Context};
use calamine::{open_workbook_auto, Data, Reader};
use chrono::{DateTime, Local};
use log::{error, info, warn};
use polib::catalog::Catalog;
use polib::message::Message;
use polib::metadata::CatalogMetadata;
use polib::po_file;

use crate::columns::{cell_text, ColumnHeader, HeaderMap};
use crate::locale::LocaleTarget;
use crate::split_sources;

/// Column positions needed to turn a row into a message.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct RowLayout {
    pub msgid: usize,
    pub msgctxt: Option<usize>,
    pub comment: Option<usize>,
    pub occurrences: Option<usize>,
}

impl RowLayout {
    /// Returns `None` if the sheet has no `Message id` column.
    pub fn new(headers: &HeaderMap) -> Option<RowLayout> {
        Some(RowLayout {
            msgid: headers.column(ColumnHeader::Msgid)?,
            msgctxt: headers.column(ColumnHeader::Msgctxt),
            comment: headers.column(ColumnHeader::Comment),
            occurrences: headers.column(ColumnHeader::Occurrences),
        })
    }
}

/// Convert a spreadsheet row into a catalog message.
///
/// Rows without a message id give `Ok(None)`. A row which does not
/// reach one of the columns in `layout` is an error.
pub fn message_from_row(
    row: &[Data],
    layout: &RowLayout,
    msgstr_column: usize,
) -> anyhow::Result<Option<Message>> {
    let cell = |column: usize| -> anyhow::Result<Option<String>> {
        row.get(column)
            .map(cell_text)
            .ok_or_else(|| anyhow!("Row with {} cells is too short", row.len()))
    };
    let optional_cell = |column: Option<usize>| -> anyhow::Result<String> {
        match column {
            Some(column) => Ok(cell(column)?.unwrap_or_default()),
            None => Ok(String::new()),
        }
    };

    let Some(msgid) = cell(layout.msgid)? else {
        return Ok(None);
    };
    let msgstr = cell(msgstr_column)?.unwrap_or_default();
    let msgctxt = optional_cell(layout.msgctxt)?;
    let comments = optional_cell(layout.comment)?;
    let source = split_sources(&optional_cell(layout.occurrences)?);

    Ok(Some(
        Message::build_singular()
            .with_msgctxt(msgctxt)
            .with_msgid(msgid)
            .with_msgstr(msgstr)
            .with_comments(comments)
            .with_source(source)
            .done(),
    ))
}

/// Format the modification time of `path` as a PO revision date.
pub fn po_timestamp(path: &Path) -> anyhow::Result<String> {
    let modified = fs::metadata(path)
        .and_then(|metadata| metadata.modified())
        .with_context(|| format!("Could not read modification time of {}", path.display()))?;
    Ok(DateTime::<Local>::from(modified)
        .format("%Y-%m-%d %H:%M%z")
        .to_string())
}

/// Build the header of a generated catalog.
pub fn generate_catalog_metadata(locale: &str, revision_date: &str) -> CatalogMetadata {
    let mut metadata = CatalogMetadata::new();
    metadata.po_revision_date = String::from(revision_date);
    metadata.language = String::from(locale);
    metadata.mime_version = String::from("1.0");
    metadata.content_type = String::from("text/plain; charset=UTF-8");
    metadata.content_transfer_encoding = String::from("8bit");
    metadata
}

/// Build the catalog for one locale column from the data rows of a
/// sheet. Rows which are too short are logged and skipped.
pub fn build_catalog<'a, I>(
    rows: I,
    layout: &RowLayout,
    msgstr_column: usize,
    metadata: CatalogMetadata,
) -> Catalog
where
    I: IntoIterator<Item = &'a [Data]>,
{
    let mut catalog = Catalog::new(metadata);
    for (idx, row) in rows.into_iter().enumerate() {
        match message_from_row(row, layout, msgstr_column) {
            Ok(Some(message)) => catalog.append_or_update(message),
            Ok(None) => {}
            // Data rows start on the second line of the sheet.
            Err(err) => warn!("Skipping row {}: {err}", idx + 2),
        }
    }
    catalog
}

/// Decide which locales to extract from a sheet: the targets given on
/// the command line, or every locale column of the sheet.
fn locale_targets(
    explicit: &[LocaleTarget],
    headers: &HeaderMap,
    output_dir: &Path,
) -> Vec<LocaleTarget> {
    if !explicit.is_empty() {
        return explicit.to_vec();
    }
    headers
        .locales()
        .into_iter()
        .map(|locale| LocaleTarget::new(locale, output_dir))
        .collect()
}

/// Extract PO files from every sheet in the workbook at `input`.
///
/// With an empty `locales` list, every locale column is extracted to
/// `<output_dir>/<locale>.po`. Returns the paths of the written
/// catalogs.
pub fn extract_workbook(
    input: &Path,
    output_dir: &Path,
    ignore_sheets: &[String],
    locales: &[String],
) -> anyhow::Result<Vec<PathBuf>> {
    if !output_dir.is_dir() {
        bail!("Output directory {} does not exist", output_dir.display());
    }
    let explicit_targets = locales
        .iter()
        .map(|locale| LocaleTarget::parse(locale, output_dir))
        .collect::<anyhow::Result<Vec<_>>>()?;
    let mut workbook = open_workbook_auto(input)
        .with_context(|| format!("Could not open workbook {}", input.display()))?;
    let revision_date = po_timestamp(input)?;

    let mut written = Vec::new();
    let mut empty = Vec::new();
    for sheet_name in workbook.sheet_names() {
        if ignore_sheets.contains(&sheet_name) {
            info!("Ignoring sheet: {sheet_name}");
            continue;
        }
        let range = workbook
            .worksheet_range(&sheet_name)
            .with_context(|| format!("Could not read sheet {sheet_name:?}"))?;
        if range.height() < 2 {
            continue;
        }
        info!("Processing sheet {sheet_name}");

        let mut rows = range.rows();
        let Some(header_row) = rows.next() else {
            continue;
        };
        let headers = HeaderMap::from_row(header_row);
        let Some(layout) = RowLayout::new(&headers) else {
            error!(
                "Could not find a {:?} column in sheet {sheet_name}",
                ColumnHeader::Msgid.header()
            );
            continue;
        };

        for target in locale_targets(&explicit_targets, &headers, output_dir) {
            info!("Processing locale: {}", target.locale);
            let Some(msgstr_column) = headers.locale_column(&target.locale) else {
                error!("Could not find a {:?} column", target.locale);
                continue;
            };
            let metadata = generate_catalog_metadata(&target.locale, &revision_date);
            let catalog = build_catalog(range.rows().skip(1), &layout, msgstr_column, metadata);
            if catalog.count() == 0 {
                error!("No messages found for {}, aborting", target.locale);
                empty.push(target.locale);
                continue;
            }
            po_file::write(&catalog, &target.path)
                .with_context(|| format!("Could not write catalog to {}", target.path.display()))?;
            info!("Created file: {}", target.path.display());
            written.push(target.path);
        }
    }

    if !empty.is_empty() {
        bail!("No messages found for {}", empty.join(", "));
    }
    Ok(written)
}
