use arbitrary::Arbitrary;
use calamine::Data;
use po_xlsx_tool::locale::LocaleCatalog;
use polib::catalog::Catalog;
use polib::message::{Message, MessageMutView};
use polib::metadata::CatalogMetadata;

/// Generate a random catalog for fuzzing.
pub fn create_catalog(locale: &str, messages: Vec<(&str, &str, &str, bool)>) -> LocaleCatalog {
    let mut catalog = Catalog::new(CatalogMetadata::new());
    for (idx, (msgctxt, msgid, msgstr, fuzzy)) in messages.into_iter().enumerate() {
        let mut message = Message::build_singular()
            .with_source(format!("foo.py:{idx}"))
            .with_msgctxt(String::from(msgctxt))
            .with_msgid(String::from(msgid))
            .with_msgstr(String::from(msgstr))
            .done();
        if fuzzy {
            message.flags_mut().add_flag("fuzzy");
        }
        catalog.append_or_update(message);
    }
    LocaleCatalog {
        locale: String::from(locale),
        catalog,
    }
}

/// Wrapper enum for generating arbitrary spreadsheet cells.
#[derive(Arbitrary, Debug)]
pub enum Cell {
    Empty,
    String(String),
    Float(f64),
    Int(i64),
    Bool(bool),
}

impl From<Cell> for Data {
    fn from(other: Cell) -> Data {
        match other {
            Cell::Empty => Data::Empty,
            Cell::String(text) => Data::String(text),
            Cell::Float(value) => Data::Float(value),
            Cell::Int(value) => Data::Int(value),
            Cell::Bool(value) => Data::Bool(value),
        }
    }
}
