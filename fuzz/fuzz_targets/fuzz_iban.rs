#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        if let Ok(iban) = zahlung::core::validate_iban(s) {
            // anything accepted must survive its own formatting
            assert!(zahlung::core::validate_iban(&iban.formatted()).is_ok());
        }
        let _ = zahlung::core::validate_bic(s);
        let _ = zahlung::core::validate_creditor_id(s);
        if s.len() >= 8 && s.is_char_boundary(8) {
            let (blz, account) = s.split_at(8);
            let _ = zahlung::core::construct_german_iban(blz, account);
        }
    }
});
