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

//! Convert between PO files and XLSX spreadsheets.
//!
//! `pet toxls` collects one or more PO files into a single
//! `messages.xlsx` with a column per language. After the translators
//! are done, `pet fromxls` writes the PO files back out.

use std::env;
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Parser;
use po_xlsx_tool::assemble::{assemble_workbook, merge_catalogs, CommentKind};
use po_xlsx_tool::extract::extract_workbook;
use po_xlsx_tool::locale::load_catalogs;

fn main() -> anyhow::Result<()> {
    env_logger::init_from_env(env_logger::Env::default().filter_or("RUST_LOG", "info"));
    match Args::parse() {
        Args::FromXls {
            ignore_sheets,
            output_dir,
            input_file,
            locales,
        } => {
            extract_workbook(&input_file, &output_dir, &ignore_sheets, &locales)?;
        }
        Args::ToXls {
            comments,
            output,
            msgmerge,
            template,
            catalogs,
        } => {
            to_xls(&comments, &output, msgmerge, template.as_deref(), &catalogs)?;
        }
    }

    Ok(())
}

#[derive(Clone, Debug, Parser)]
#[command(version, about = "Convert between XLSX spreadsheets and PO files")]
enum Args {
    /// Convert an XLSX file to PO files.
    ///
    /// `pet fromxls en cs` creates en.po and cs.po from messages.xlsx,
    /// `pet fromxls en=British.po` creates British.po, and `pet
    /// fromxls` extracts every language column.
    #[command(name = "fromxls")]
    FromXls {
        /// Ignore sheets with this name.
        #[arg(short, long = "ignoresheet", value_name = "SHEET")]
        ignore_sheets: Vec<String>,
        /// Output directory for the PO files.
        #[arg(short, long = "outdir", default_value = ".")]
        output_dir: PathBuf,
        /// The spreadsheet to read.
        #[arg(short = 'f', long = "inputfile", default_value = "messages.xlsx")]
        input_file: PathBuf,
        /// Languages to extract, optionally with a file name.
        #[arg(value_name = "LOCALE[=FILE.po]")]
        locales: Vec<String>,
    },
    /// Convert PO files to an XLSX file.
    ///
    /// The language of a PO file is taken from its `Language` header,
    /// or else from the file name. Use `cs=path/to/mydomain.po` to
    /// set it explicitly. Without arguments, every PO file in the
    /// current directory is used.
    #[command(name = "toxls")]
    ToXls {
        /// Comments to include in the spreadsheet.
        #[arg(short, long, value_enum, default_values_t = [CommentKind::Reference])]
        comments: Vec<CommentKind>,
        /// The spreadsheet to write.
        #[arg(short, long, default_value = "messages.xlsx")]
        output: PathBuf,
        /// Update the catalogs from a POT template first.
        #[arg(short, long)]
        msgmerge: bool,
        /// The template to merge with. Defaults to the first POT file
        /// in the current directory.
        #[arg(short, long, requires = "msgmerge")]
        template: Option<PathBuf>,
        #[arg(value_name = "CATALOG")]
        catalogs: Vec<String>,
    },
}

fn to_xls(
    comments: &[CommentKind],
    output: &Path,
    msgmerge: bool,
    template: Option<&Path>,
    catalog_args: &[String],
) -> anyhow::Result<()> {
    let current_dir = env::current_dir().context("Could not determine current directory")?;
    let mut catalogs = load_catalogs(catalog_args, &current_dir)?;
    if msgmerge {
        catalogs = merge_catalogs(catalogs, template, &current_dir)?;
    }

    assemble_workbook(&catalogs, comments, output)
}
