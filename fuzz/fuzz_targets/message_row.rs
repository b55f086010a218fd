#![no_main]

use calamine::Data;
use libfuzzer_sys::fuzz_target;
use po_xlsx_tool::columns::HeaderMap;
use po_xlsx_tool::extract::{message_from_row, RowLayout};
use po_xlsx_tool_fuzz::Cell;
use polib::message::MessageView;

fuzz_target!(|inputs: (Vec<Cell>, Vec<Cell>, usize)| {
    let (header, row, msgstr_column) = inputs;
    let header = header.into_iter().map(Data::from).collect::<Vec<_>>();
    let row = row.into_iter().map(Data::from).collect::<Vec<_>>();
    let headers = HeaderMap::from_row(&header);
    let Some(layout) = RowLayout::new(&headers) else {
        return;
    };
    // Err(_) means the row is too short, which is fine.
    if let Ok(Some(message)) = message_from_row(&row, &layout, msgstr_column) {
        assert!(!message.msgid().is_empty());
    }
});
