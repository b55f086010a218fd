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

//! This file contains main logic used by the `toxls` subcommand.

use std::collections::HashSet;
use std::path::Path;

use anyhow::{bail, Context};
use clap::ValueEnum;
use log::info;
use polib::catalog::Catalog;
use polib::message::MessageView;
use rust_xlsxwriter::{Format, Workbook};

use crate::columns::ColumnHeader;
use crate::locale::{find_template, LocaleCatalog};
use crate::merge::merge_catalog;
use crate::{context, join_sources, load_catalog};

/// Name of the sheet written by [`assemble_workbook`].
pub const SHEET_NAME: &str = "Translations";

/// Comment columns which can be included in the spreadsheet.
#[derive(Debug, Copy, Clone, PartialEq, Eq, ValueEnum)]
pub enum CommentKind {
    /// Source references, in an `Occurrences` column.
    Reference,
    /// Comments extracted from the source code, in a `Comment` column.
    Extracted,
    All,
}

/// A `(msgid, msgctxt)` pair identifying one row of the sheet.
///
/// Plural messages also carry their `msgid_plural`, which is part of
/// the catalog lookup key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MessageKey {
    pub msgid: String,
    pub msgctxt: String,
    pub msgid_plural: Option<String>,
}

impl MessageKey {
    fn find<'a>(&self, catalog: &'a Catalog) -> Option<&'a dyn MessageView> {
        catalog.find_message(
            context(&self.msgctxt),
            &self.msgid,
            self.msgid_plural.as_deref(),
        )
    }
}

/// Collect the message keys of all catalogs.
///
/// The keys are ordered by their first appearance and are unique by
/// `(msgid, msgctxt)`. Messages without a msgid are skipped.
pub fn collect_messages(catalogs: &[LocaleCatalog]) -> Vec<MessageKey> {
    let mut seen = HashSet::new();
    let mut keys = Vec::new();
    for LocaleCatalog { catalog, .. } in catalogs {
        for message in catalog.messages() {
            if message.msgid().is_empty() {
                continue;
            }
            if seen.insert((message.msgid(), message.msgctxt())) {
                keys.push(MessageKey {
                    msgid: String::from(message.msgid()),
                    msgctxt: String::from(message.msgctxt()),
                    msgid_plural: message.msgid_plural().ok().map(String::from),
                });
            }
        }
    }
    keys
}

/// The text shown in a translation cell: the `msgstr`, or the first
/// form of a plural message.
fn translation(message: &dyn MessageView) -> &str {
    if message.is_plural() {
        message
            .msgstr_plural()
            .ok()
            .and_then(|forms| forms.first())
            .map_or("", String::as_str)
    } else {
        message.msgstr().unwrap_or_default()
    }
}

/// A cell of the generated sheet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SheetCell {
    Empty,
    Text(String),
    /// A translation marked as fuzzy, highlighted in the sheet.
    Fuzzy(String),
}

impl SheetCell {
    fn from_text(text: &str) -> SheetCell {
        if text.is_empty() {
            SheetCell::Empty
        } else {
            SheetCell::Text(String::from(text))
        }
    }
}

/// The content of the translation sheet before it is written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sheet {
    pub header: Vec<String>,
    pub rows: Vec<Vec<SheetCell>>,
}

/// Lay out the catalogs as a sheet with one row per message and one
/// column per catalog.
///
/// Comments and source references are taken from the first catalog.
pub fn build_sheet(catalogs: &[LocaleCatalog], comments: &[CommentKind]) -> anyhow::Result<Sheet> {
    let Some(reference) = catalogs.first() else {
        bail!("No catalogs to convert");
    };
    let wants = |kind| comments.contains(&kind) || comments.contains(&CommentKind::All);
    let has_msgctxt = catalogs.iter().any(|LocaleCatalog { catalog, .. }| {
        catalog
            .messages()
            .any(|message| !message.msgctxt().is_empty())
    });
    let has_occurrences = wants(CommentKind::Reference);
    let has_comment = wants(CommentKind::Extracted);

    let mut header = Vec::new();
    if has_msgctxt {
        header.push(String::from(ColumnHeader::Msgctxt.header()));
    }
    header.push(String::from(ColumnHeader::Msgid.header()));
    if has_occurrences {
        header.push(String::from(ColumnHeader::Occurrences.header()));
    }
    if has_comment {
        header.push(String::from(ColumnHeader::Comment.header()));
    }
    header.extend(catalogs.iter().map(|catalog| catalog.locale.clone()));

    let mut rows = Vec::new();
    for key in collect_messages(catalogs) {
        let mut row = Vec::with_capacity(header.len());
        if has_msgctxt {
            row.push(SheetCell::from_text(&key.msgctxt));
        }
        row.push(SheetCell::from_text(&key.msgid));
        let reference_message = key.find(&reference.catalog);
        if has_occurrences {
            let sources = reference_message
                .map(|message| join_sources(message.source()))
                .unwrap_or_default();
            row.push(SheetCell::from_text(&sources));
        }
        if has_comment {
            let comment = reference_message.map_or("", |message| message.comments());
            row.push(SheetCell::from_text(comment));
        }
        for LocaleCatalog { catalog, .. } in catalogs {
            let cell = match key.find(catalog) {
                None => SheetCell::Empty,
                Some(message) => {
                    let msgstr = translation(message);
                    if message.is_fuzzy() {
                        SheetCell::Fuzzy(String::from(msgstr))
                    } else {
                        SheetCell::from_text(msgstr)
                    }
                }
            };
            row.push(cell);
        }
        rows.push(row);
    }

    Ok(Sheet { header, rows })
}

/// Write `sheet` to a new workbook at `output`.
pub fn write_sheet(sheet: &Sheet, output: &Path) -> anyhow::Result<()> {
    let fuzzy_format = Format::new().set_bold().set_italic();
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(SHEET_NAME)?;

    for (col, header) in sheet.header.iter().enumerate() {
        worksheet.write_string(0, u16::try_from(col)?, header)?;
    }
    for (row_idx, row) in sheet.rows.iter().enumerate() {
        let row_idx = u32::try_from(row_idx + 1)?;
        for (col, cell) in row.iter().enumerate() {
            let col = u16::try_from(col)?;
            match cell {
                SheetCell::Empty => {}
                SheetCell::Text(text) => {
                    worksheet.write_string(row_idx, col, text)?;
                }
                SheetCell::Fuzzy(text) => {
                    worksheet.write_string_with_format(row_idx, col, text, &fuzzy_format)?;
                }
            }
        }
    }
    worksheet.set_freeze_panes(0, 1)?;
    worksheet.autofit();

    workbook
        .save(output)
        .with_context(|| format!("Could not write workbook to {}", output.display()))?;
    Ok(())
}

/// Merge every catalog with a POT template.
///
/// Without an explicit `template`, the first `.pot` file in
/// `directory` is used.
pub fn merge_catalogs(
    catalogs: Vec<LocaleCatalog>,
    template: Option<&Path>,
    directory: &Path,
) -> anyhow::Result<Vec<LocaleCatalog>> {
    let template_path = match template {
        Some(path) => path.to_path_buf(),
        None => find_template(directory)?,
    };
    info!("Merging with: {}", template_path.display());
    let template = load_catalog(&template_path)?;
    Ok(catalogs
        .into_iter()
        .map(|LocaleCatalog { locale, catalog }| LocaleCatalog {
            locale,
            catalog: merge_catalog(catalog, &template),
        })
        .collect())
}

/// Convert `catalogs` into a single workbook at `output`.
pub fn assemble_workbook(
    catalogs: &[LocaleCatalog],
    comments: &[CommentKind],
    output: &Path,
) -> anyhow::Result<()> {
    let sheet = build_sheet(catalogs, comments)?;
    info!(
        "Writing {} messages in {} languages",
        sheet.rows.len(),
        catalogs.len()
    );
    write_sheet(&sheet, output)?;
    info!("{} created", output.display());
    Ok(())
}
