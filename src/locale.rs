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

//! Locale arguments given on the command line.

use std::fs::read_dir;
use std::path::{Component, Path, PathBuf};

use anyhow::{bail, Context};
use log::info;
use polib::catalog::Catalog;

use crate::load_catalog;

/// A locale column to extract and the PO file it is written to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocaleTarget {
    pub locale: String,
    pub path: PathBuf,
}

impl LocaleTarget {
    /// Target for `locale` using the default `<locale>.po` file name.
    pub fn new(locale: &str, output_dir: &Path) -> LocaleTarget {
        LocaleTarget {
            locale: String::from(locale),
            path: output_dir.join(format!("{locale}.po")),
        }
    }

    /// Parse a `<locale>` or `<locale>=<file.po>` argument.
    ///
    /// # Examples
    ///
    /// ```
    /// use po_xlsx_tool::locale::LocaleTarget;
    /// use std::path::Path;
    ///
    /// let target = LocaleTarget::parse("en=British.po", Path::new("po")).unwrap();
    /// assert_eq!(target.locale, "en");
    /// assert_eq!(target.path, Path::new("po/British.po"));
    /// ```
    pub fn parse(arg: &str, output_dir: &Path) -> anyhow::Result<LocaleTarget> {
        let Some((locale, file_name)) = arg.split_once('=') else {
            if arg.is_empty() {
                bail!("Empty locale argument");
            }
            return Ok(LocaleTarget::new(arg, output_dir));
        };
        if locale.is_empty() {
            bail!("Missing locale in {arg:?}");
        }
        if file_name.is_empty() {
            bail!("Missing file name in {arg:?}");
        }
        let escapes_output_dir = Path::new(file_name)
            .components()
            .any(|component| matches!(component, Component::Prefix(_) | Component::RootDir));
        if escapes_output_dir {
            bail!("File name in {arg:?} must be relative to the output directory");
        }
        Ok(LocaleTarget {
            locale: String::from(locale),
            path: output_dir.join(file_name),
        })
    }
}

/// A parsed catalog together with the locale of its spreadsheet
/// column.
pub struct LocaleCatalog {
    pub locale: String,
    pub catalog: Catalog,
}

impl LocaleCatalog {
    /// Load a catalog given as `<file.po>` or `<locale>=<file.po>`.
    ///
    /// The `=` form is only recognized when `arg` does not name an
    /// existing file.
    pub fn from_arg(arg: &str) -> anyhow::Result<LocaleCatalog> {
        let path = Path::new(arg);
        if !path.exists() {
            if let Some((locale, path)) = arg.split_once('=') {
                if locale.is_empty() {
                    bail!("Missing locale in {arg:?}");
                }
                return LocaleCatalog::load(Path::new(path), Some(locale));
            }
        }
        LocaleCatalog::load(path, None)
    }

    /// Load the catalog at `path`, guessing the locale unless one is
    /// given.
    pub fn load(path: &Path, locale: Option<&str>) -> anyhow::Result<LocaleCatalog> {
        if !path.is_file() {
            bail!("Catalog {} does not exist", path.display());
        }
        let catalog = load_catalog(path)?;
        let locale = match locale {
            Some(locale) => String::from(locale),
            None => locale_for_catalog(path, &catalog),
        };
        info!("Read {} messages for {locale} from {}", catalog.count(), path.display());
        Ok(LocaleCatalog { locale, catalog })
    }
}

/// Guess the locale of a catalog: the `Language` header when present,
/// otherwise the file stem.
pub fn locale_for_catalog(path: &Path, catalog: &Catalog) -> String {
    if !catalog.metadata.language.is_empty() {
        return catalog.metadata.language.clone();
    }
    path.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Given a directory path, returns the paths of all files with the
/// given extension in it, sorted by name.
pub fn files_with_extension(directory: &Path, extension: &str) -> anyhow::Result<Vec<PathBuf>> {
    let mut files = read_dir(directory)
        .with_context(|| format!("Could not read directory {}", directory.display()))?
        .filter_map(|entry| {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => return Some(Err(e.into())),
            };
            let path = entry.path();
            if path.is_file() && path.extension()? == extension {
                Some(Ok(path))
            } else {
                None
            }
        })
        .collect::<anyhow::Result<Vec<_>>>()?;
    files.sort();
    Ok(files)
}

/// Load every `.po` file in `directory`.
pub fn catalogs_in_dir(directory: &Path) -> anyhow::Result<Vec<LocaleCatalog>> {
    files_with_extension(directory, "po")?
        .iter()
        .map(|path| LocaleCatalog::load(path, None))
        .collect()
}

/// Load the catalogs named on the command line, or every `.po` file
/// in `directory` when there are none.
pub fn load_catalogs(catalog_args: &[String], directory: &Path) -> anyhow::Result<Vec<LocaleCatalog>> {
    if catalog_args.is_empty() {
        return catalogs_in_dir(directory);
    }
    catalog_args
        .iter()
        .map(|arg| LocaleCatalog::from_arg(arg))
        .collect()
}

/// Find the template to merge with: the first `.pot` file in
/// `directory`.
pub fn find_template(directory: &Path) -> anyhow::Result<PathBuf> {
    match files_with_extension(directory, "pot")?.into_iter().next() {
        Some(path) => Ok(path),
        None => bail!("No .pot file found in {}", directory.display()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use polib::message::Message;
    use polib::metadata::CatalogMetadata;
    use polib::po_file;
    use pretty_assertions::assert_eq;
    use std::fs;

    fn write_catalog(path: &Path, language: &str) -> anyhow::Result<()> {
        let mut metadata = CatalogMetadata::new();
        metadata.language = String::from(language);
        let mut catalog = Catalog::new(metadata);
        catalog.append_or_update(
            Message::build_singular()
                .with_msgid(String::from("Hello"))
                .with_msgstr(String::from("Ahoj"))
                .done(),
        );
        po_file::write(&catalog, path)?;
        Ok(())
    }

    #[test]
    fn test_parse_plain_locale() -> anyhow::Result<()> {
        let target = LocaleTarget::parse("en", Path::new("out"))?;
        assert_eq!(
            target,
            LocaleTarget {
                locale: String::from("en"),
                path: PathBuf::from("out/en.po"),
            }
        );
        Ok(())
    }

    #[test]
    fn test_parse_locale_with_file_name() -> anyhow::Result<()> {
        let target = LocaleTarget::parse("en=British.po", Path::new("."))?;
        assert_eq!(target.locale, "en");
        assert_eq!(target.path, PathBuf::from("./British.po"));
        Ok(())
    }

    #[test]
    fn test_parse_splits_at_first_equals() -> anyhow::Result<()> {
        let target = LocaleTarget::parse("cs=a=b.po", Path::new("po"))?;
        assert_eq!(target.locale, "cs");
        assert_eq!(target.path, PathBuf::from("po/a=b.po"));
        Ok(())
    }

    #[test]
    fn test_parse_invalid() {
        assert!(LocaleTarget::parse("", Path::new(".")).is_err());
        assert!(LocaleTarget::parse("=British.po", Path::new(".")).is_err());
        assert!(LocaleTarget::parse("en=", Path::new(".")).is_err());
    }

    #[test]
    fn test_parse_rejects_absolute_file_name() {
        assert!(LocaleTarget::parse("en=/tmp/British.po", Path::new("po")).is_err());
    }

    #[test]
    fn test_parse_keeps_subdirectory() -> anyhow::Result<()> {
        let target = LocaleTarget::parse("en=en/LC_MESSAGES/app.po", Path::new("po"))?;
        assert!(target.path.starts_with("po"));
        assert_eq!(target.path, PathBuf::from("po/en/LC_MESSAGES/app.po"));
        Ok(())
    }

    #[test]
    fn test_locale_from_language_header() -> anyhow::Result<()> {
        let tmpdir = tempfile::tempdir()?;
        let path = tmpdir.path().join("Bulgarian.po");
        write_catalog(&path, "bg")?;
        let catalog = LocaleCatalog::from_arg(path.to_str().unwrap())?;
        assert_eq!(catalog.locale, "bg");
        Ok(())
    }

    #[test]
    fn test_locale_from_file_stem() -> anyhow::Result<()> {
        let tmpdir = tempfile::tempdir()?;
        let path = tmpdir.path().join("en.po");
        write_catalog(&path, "")?;
        let catalog = LocaleCatalog::from_arg(path.to_str().unwrap())?;
        assert_eq!(catalog.locale, "en");
        assert_eq!(catalog.catalog.count(), 1);
        Ok(())
    }

    #[test]
    fn test_locale_from_argument() -> anyhow::Result<()> {
        let tmpdir = tempfile::tempdir()?;
        let path = tmpdir.path().join("Czech.po");
        write_catalog(&path, "de")?;
        let catalog = LocaleCatalog::from_arg(&format!("cs={}", path.display()))?;
        assert_eq!(catalog.locale, "cs");
        Ok(())
    }

    #[test]
    fn test_missing_catalog() {
        assert!(LocaleCatalog::from_arg("no-such-file.po").is_err());
        assert!(LocaleCatalog::from_arg("cs=no-such-file.po").is_err());
    }

    #[test]
    fn test_catalogs_in_dir() -> anyhow::Result<()> {
        let tmpdir = tempfile::tempdir()?;
        write_catalog(&tmpdir.path().join("fr.po"), "")?;
        write_catalog(&tmpdir.path().join("cs.po"), "")?;
        fs::write(tmpdir.path().join("notes.txt"), "not a catalog")?;
        let locales = catalogs_in_dir(tmpdir.path())?
            .into_iter()
            .map(|catalog| catalog.locale)
            .collect::<Vec<_>>();
        assert_eq!(locales, vec!["cs", "fr"]);
        Ok(())
    }

    #[test]
    fn test_load_catalogs_from_arguments() -> anyhow::Result<()> {
        let tmpdir = tempfile::tempdir()?;
        let path = tmpdir.path().join("Czech.po");
        write_catalog(&path, "")?;
        write_catalog(&tmpdir.path().join("fr.po"), "")?;
        let arg = format!("cs={}", path.display());
        let locales = load_catalogs(&[arg], tmpdir.path())?
            .into_iter()
            .map(|catalog| catalog.locale)
            .collect::<Vec<_>>();
        assert_eq!(locales, vec!["cs"]);

        let locales = load_catalogs(&[], tmpdir.path())?
            .into_iter()
            .map(|catalog| catalog.locale)
            .collect::<Vec<_>>();
        assert_eq!(locales, vec!["Czech", "fr"]);
        Ok(())
    }

    #[test]
    fn test_find_template() -> anyhow::Result<()> {
        let tmpdir = tempfile::tempdir()?;
        assert!(find_template(tmpdir.path()).is_err());
        write_catalog(&tmpdir.path().join("messages.pot"), "")?;
        write_catalog(&tmpdir.path().join("cs.po"), "")?;
        assert_eq!(
            find_template(tmpdir.path())?,
            tmpdir.path().join("messages.pot")
        );
        Ok(())
    }
}
