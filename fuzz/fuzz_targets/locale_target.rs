#![no_main]

use libfuzzer_sys::fuzz_target;
use po_xlsx_tool::locale::LocaleTarget;
use std::path::Path;

fuzz_target!(|arg: &str| {
    if let Ok(target) = LocaleTarget::parse(arg, Path::new("po")) {
        assert!(!target.locale.is_empty());
        assert!(target.path.starts_with("po"));
    }
});
