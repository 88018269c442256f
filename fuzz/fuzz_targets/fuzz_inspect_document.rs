#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        let report = zahlung::pain::inspect_document(s);
        let _ = report.status_line();
    }
});
