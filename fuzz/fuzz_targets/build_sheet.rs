#![no_main]

use libfuzzer_sys::fuzz_target;
use po_xlsx_tool::assemble::{build_sheet, collect_messages, CommentKind};
use po_xlsx_tool_fuzz::create_catalog;

fuzz_target!(|inputs: Vec<Vec<(&str, &str, &str, bool)>>| {
    let catalogs = inputs
        .into_iter()
        .enumerate()
        .map(|(idx, messages)| create_catalog(&format!("l{idx}"), messages))
        .collect::<Vec<_>>();
    let keys = collect_messages(&catalogs);
    if let Ok(sheet) = build_sheet(&catalogs, &[CommentKind::All]) {
        assert_eq!(sheet.rows.len(), keys.len());
        for row in &sheet.rows {
            assert_eq!(row.len(), sheet.header.len());
        }
    }
});
